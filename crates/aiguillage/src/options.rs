use std::env;

/// Route table options. Should be passed to [`RouteTable::build`](crate::RouteTable::build).
///
/// ## Examples
/// Default values:
/// ```rust
/// use aiguillage::RouterOptions;
///
/// let options = RouterOptions::default();
/// assert_eq!(options.base_url, None);
/// ```
/// Custom values:
/// ```rust
/// use aiguillage::RouterOptions;
///
/// let options = RouterOptions {
///     base_url: Some("/console".into()),
///     ..Default::default()
/// };
/// # let _ = options;
/// ```
#[derive(Debug, Clone)]
pub struct RouterOptions {
    /// Path prefix under which the application is served, e.g. `/console`.
    ///
    /// When set, [`resolve`](crate::RouteTable::resolve) strips it from incoming
    /// paths (paths outside the prefix are `NotFound`) and
    /// [`url_for`](crate::RouteTable::url_for) prepends it to generated URLs.
    /// Typically sourced from deployment configuration, see [`RouterOptions::from_env`].
    pub base_url: Option<String>,

    /// How many redirects [`navigate`](crate::RouteTable::navigate) follows
    /// before giving up on a chain. Defaults to `8`.
    pub max_redirects: usize,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            base_url: None,
            max_redirects: 8,
        }
    }
}

impl RouterOptions {
    /// Builds options from the environment: `AIGUILLAGE_BASE_URL` sets
    /// [`base_url`](RouterOptions::base_url) when present and non-empty.
    pub fn from_env() -> Self {
        Self {
            base_url: env::var("AIGUILLAGE_BASE_URL")
                .ok()
                .filter(|v| !v.is_empty()),
            ..Default::default()
        }
    }
}
