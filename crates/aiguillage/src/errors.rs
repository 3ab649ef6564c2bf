//! Error types for Aiguillage.
use std::fmt::{self, Debug, Formatter};
use thiserror::Error;

macro_rules! impl_debug_for_error {
    ($($t:ty),*) => {
        $(
            impl Debug for $t {
                fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                    // Rust's uses the Debug trait to show errors when they're returned from main
                    // But, thiserror uses the Display trait to show errors. This redirects Debug to Display, essentially.
                    write!(f, "{}", self)
                }
            }
        )*
    };
}

/// Errors reported while building a [`RouteTable`](crate::RouteTable).
#[derive(Error)]
pub enum TableError {
    #[error("route pattern cannot be empty, use `/` for the root route")]
    EmptyPattern,
    #[error(
        "invalid parameter syntax in `{pattern}`. A parameter must span a whole segment, e.g. `/pay/preview/[prepay_id]`"
    )]
    InvalidPattern { pattern: String },
    #[error("parameter `{name}` appears more than once in `{pattern}`")]
    DuplicateParameter { pattern: String, name: String },
    #[error("`{path}` is nested too deeply, children cannot declare children of their own")]
    NestedChildren { path: String },
}

#[derive(Error)]
pub enum UrlError {
    #[error("no route renders the requested view")]
    RouteNotFound,
    #[error("route `{pattern}` is missing parameter `{name}`")]
    MissingParameter { pattern: String, name: String },
}

#[derive(Error)]
pub enum NavigationError {
    #[error(
        "navigating to `{path}` followed more than {limit} redirects, the table likely contains a redirect cycle"
    )]
    TooManyRedirects { path: String, limit: usize },
}

#[derive(Error, Debug)]
pub enum RouterError {
    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Url(#[from] UrlError),

    #[error(transparent)]
    Navigation(#[from] NavigationError),
}

impl_debug_for_error!(TableError, UrlError, NavigationError);
