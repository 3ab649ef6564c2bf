//! The route table: compilation, resolution, navigation and URL generation.
//!
//! A [`RouteTable`] is built once from an ordered list of [`Route`] records,
//! validated, and immutable thereafter. Resolution is a pure function of the
//! requested path and the table: the same path always yields the same
//! [`RenderDecision`].
use log::{debug, trace};

use crate::errors::{NavigationError, TableError, UrlError};
use crate::options::RouterOptions;
use crate::route::{RenderDecision, Route, RouteParams, RouteTarget};
use crate::routing::{PatternSegment, match_pattern, normalize_path, parse_pattern};

/// An ordered, immutable mapping from path patterns to render decisions.
///
/// ## Example
/// ```rust
/// use aiguillage::{RenderDecision, Route, RouteTable, RouterOptions, routes};
///
/// #[derive(Debug, Clone, PartialEq)]
/// enum AppView {
///     Home,
/// }
///
/// let table = RouteTable::build(
///     routes![Route::view("/", AppView::Home)],
///     RouterOptions::default(),
/// )?;
///
/// match table.resolve("/") {
///     RenderDecision::Render { view, .. } => assert_eq!(view, AppView::Home),
///     other => panic!("unexpected decision: {:?}", other),
/// }
/// # Ok::<(), aiguillage::errors::TableError>(())
/// ```
pub struct RouteTable<V> {
    routes: Vec<Route<V>>,
    compiled: Vec<CompiledRoute<V>>,
    options: RouterOptions,
}

/// The result of a successful [`RouteTable::navigate`] call: the final
/// decision (never a redirect) and the trail that led to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Navigation<V> {
    /// Either `Render` or `NotFound`, redirects have already been followed.
    pub decision: RenderDecision<V>,
    /// The final, normalized path the decision was made for.
    pub path: String,
    /// Every visited path that redirected, in order. Empty for direct hits.
    pub redirects: Vec<String>,
}

struct CompiledRoute<V> {
    /// The full pattern as declared, normalized. Used for logging and errors.
    pattern: String,
    segments: Vec<PatternSegment>,
    target: CompiledTarget<V>,
}

enum CompiledTarget<V> {
    Render { view: V, parents: Vec<V> },
    Redirect(String),
}

impl<V: Clone> RouteTable<V> {
    /// Compiles and validates a route table. Children are flattened onto their
    /// parent prefix at this point, preserving declaration order; matching at
    /// resolve time is first-match against the flattened list.
    pub fn build(routes: Vec<Route<V>>, options: RouterOptions) -> Result<Self, TableError> {
        let mut compiled = Vec::new();

        for route in &routes {
            if route.path.is_empty() {
                return Err(TableError::EmptyPattern);
            }

            match &route.target {
                RouteTarget::View(view) => {
                    compiled.push(CompiledRoute::new(
                        &route.path,
                        CompiledTarget::Render {
                            view: view.clone(),
                            parents: Vec::new(),
                        },
                    )?);
                }
                RouteTarget::Redirect(to) => {
                    compiled.push(CompiledRoute::new(
                        &route.path,
                        CompiledTarget::Redirect(to.clone()),
                    )?);
                }
                RouteTarget::Children { layout, children } => {
                    let mut has_default = false;

                    for child in children {
                        let full_path = format!("{}/{}", route.path, child.path);
                        let is_default = child.path.split('/').all(|s| s.is_empty());
                        has_default |= is_default;

                        match &child.target {
                            RouteTarget::View(view) => {
                                compiled.push(CompiledRoute::new(
                                    &full_path,
                                    CompiledTarget::Render {
                                        view: view.clone(),
                                        parents: vec![layout.clone()],
                                    },
                                )?);
                            }
                            RouteTarget::Redirect(to) => {
                                compiled.push(CompiledRoute::new(
                                    &full_path,
                                    CompiledTarget::Redirect(to.clone()),
                                )?);
                            }
                            RouteTarget::Children { .. } => {
                                return Err(TableError::NestedChildren {
                                    path: normalize_path(&full_path),
                                });
                            }
                        }
                    }

                    // Without a default child, the exact parent path renders
                    // the layout alone (empty outlet)
                    if !has_default {
                        compiled.push(CompiledRoute::new(
                            &route.path,
                            CompiledTarget::Render {
                                view: layout.clone(),
                                parents: Vec::new(),
                            },
                        )?);
                    }
                }
            }
        }

        debug!(
            "route table compiled, {} entries from {} declared routes",
            compiled.len(),
            routes.len()
        );

        Ok(Self {
            routes,
            compiled,
            options,
        })
    }

    /// Resolves a path to a [`RenderDecision`]. Pure and side-effect-free:
    /// redirects are returned as-is, unmatched paths are an explicit
    /// [`RenderDecision::NotFound`].
    pub fn resolve(&self, path: &str) -> RenderDecision<V> {
        match self.strip_base(path) {
            Some(path) => self.resolve_normalized(&normalize_path(&path)),
            None => {
                debug!("{} is outside the configured base URL", path);
                RenderDecision::NotFound
            }
        }
    }

    /// Resolves a path, following redirects until a render or not-found
    /// decision. Chains longer than
    /// [`RouterOptions::max_redirects`](crate::RouterOptions::max_redirects)
    /// fail instead of spinning.
    pub fn navigate(&self, path: &str) -> Result<Navigation<V>, NavigationError> {
        let mut current = match self.strip_base(path) {
            Some(stripped) => normalize_path(&stripped),
            None => {
                return Ok(Navigation {
                    decision: RenderDecision::NotFound,
                    path: normalize_path(path),
                    redirects: Vec::new(),
                });
            }
        };
        let mut redirects = Vec::new();

        loop {
            match self.resolve_normalized(&current) {
                RenderDecision::Redirect { to } => {
                    if redirects.len() >= self.options.max_redirects {
                        return Err(NavigationError::TooManyRedirects {
                            path: normalize_path(path),
                            limit: self.options.max_redirects,
                        });
                    }

                    debug!("redirect {} -> {}", current, to);
                    redirects.push(current);
                    current = normalize_path(&to);
                }
                decision => {
                    return Ok(Navigation {
                        decision,
                        path: current,
                        redirects,
                    });
                }
            }
        }
    }

    /// Builds the URL of the first route rendering the given view, with the
    /// captured parameters substituted back into the pattern and the base URL
    /// prepended.
    ///
    /// Note that this merely generates the URL from the route pattern and
    /// parameters, redirects are not applied to it.
    pub fn url_for(&self, view: &V, params: &RouteParams) -> Result<String, UrlError>
    where
        V: PartialEq,
    {
        let route = self
            .compiled
            .iter()
            .find(|route| {
                matches!(&route.target, CompiledTarget::Render { view: v, .. } if v == view)
            })
            .ok_or(UrlError::RouteNotFound)?;

        let mut parts = Vec::with_capacity(route.segments.len());
        for segment in &route.segments {
            match segment {
                PatternSegment::Literal(text) => parts.push(text.as_str()),
                PatternSegment::Param(key) => {
                    parts.push(params.get(key).ok_or_else(|| UrlError::MissingParameter {
                        pattern: route.pattern.clone(),
                        name: key.clone(),
                    })?)
                }
            }
        }

        let path = if parts.is_empty() {
            "/".to_string()
        } else {
            format!("/{}", parts.join("/"))
        };

        Ok(match &self.options.base_url {
            Some(base) => format!("{}{}", normalize_path(base).trim_end_matches('/'), path),
            None => path,
        })
    }

    /// The route records the table was built from, in declaration order.
    pub fn routes(&self) -> &[Route<V>] {
        &self.routes
    }

    pub fn options(&self) -> &RouterOptions {
        &self.options
    }

    fn resolve_normalized(&self, path: &str) -> RenderDecision<V> {
        for route in &self.compiled {
            if let Some(params) = match_pattern(&route.segments, path) {
                trace!("{} matched {}", path, route.pattern);

                return match &route.target {
                    CompiledTarget::Render { view, parents } => RenderDecision::Render {
                        view: view.clone(),
                        parents: parents.clone(),
                        params,
                    },
                    CompiledTarget::Redirect(to) => RenderDecision::Redirect { to: to.clone() },
                };
            }
        }

        debug!("no route matched {}", path);
        RenderDecision::NotFound
    }

    /// Strips the configured base URL from an incoming path. `None` means the
    /// path lives outside the base. Redirect targets are table-space paths and
    /// never go through this.
    fn strip_base(&self, path: &str) -> Option<String> {
        let Some(base) = &self.options.base_url else {
            return Some(path.to_string());
        };

        let base = normalize_path(base);
        if base == "/" {
            return Some(path.to_string());
        }

        let path = normalize_path(path);
        if path == base {
            Some("/".to_string())
        } else {
            path.strip_prefix(&format!("{}/", base))
                .map(|rest| format!("/{}", rest))
        }
    }
}

impl<V> CompiledRoute<V> {
    fn new(path: &str, target: CompiledTarget<V>) -> Result<Self, TableError> {
        let pattern = normalize_path(path);
        let segments = parse_pattern(&pattern)?;

        Ok(Self {
            pattern,
            segments,
            target,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum AppView {
        AdminLayout,
        MerchantList,
        TransactionList,
        RefundList,
        PayPreview,
        Settings,
    }

    /// The admin console table: three admin sub-views under a layout, a
    /// payment preview with a captured id, and two redirects.
    fn admin_routes() -> Vec<Route<AppView>> {
        routes![
            Route::children(
                "/admin",
                AppView::AdminLayout,
                vec![
                    Route::view("merchants", AppView::MerchantList),
                    Route::view("transactions", AppView::TransactionList),
                    Route::view("refunds", AppView::RefundList),
                    Route::default_redirect("/admin/merchants"),
                ],
            ),
            Route::view("/pay/preview/[prepay_id]", AppView::PayPreview),
            Route::redirect("/", "/admin"),
        ]
    }

    fn admin_table() -> RouteTable<AppView> {
        RouteTable::build(admin_routes(), RouterOptions::default()).unwrap()
    }

    fn assert_renders(table: &RouteTable<AppView>, path: &str, view: AppView, parents: &[AppView]) {
        match table.resolve(path) {
            RenderDecision::Render {
                view: v,
                parents: p,
                ..
            } => {
                assert_eq!(v, view, "wrong view for {}", path);
                assert_eq!(p, parents, "wrong parents for {}", path);
            }
            other => panic!("expected {} to render, got {:?}", path, other),
        }
    }

    #[test]
    fn test_concrete_paths_render_listed_views() {
        let table = admin_table();

        assert_renders(
            &table,
            "/admin/merchants",
            AppView::MerchantList,
            &[AppView::AdminLayout],
        );
        assert_renders(
            &table,
            "/admin/transactions",
            AppView::TransactionList,
            &[AppView::AdminLayout],
        );
        assert_renders(
            &table,
            "/admin/refunds",
            AppView::RefundList,
            &[AppView::AdminLayout],
        );
    }

    #[test]
    fn test_admin_redirects_to_merchants() {
        let table = admin_table();
        assert_eq!(
            table.resolve("/admin"),
            RenderDecision::Redirect {
                to: "/admin/merchants".to_string()
            }
        );
    }

    #[test]
    fn test_root_redirects_to_admin() {
        let table = admin_table();
        assert_eq!(
            table.resolve("/"),
            RenderDecision::Redirect {
                to: "/admin".to_string()
            }
        );
    }

    #[test]
    fn test_preview_captures_prepay_id() {
        let table = admin_table();

        match table.resolve("/pay/preview/abc123") {
            RenderDecision::Render { view, params, .. } => {
                assert_eq!(view, AppView::PayPreview);
                assert_eq!(params.get("prepay_id"), Some("abc123"));
            }
            other => panic!("expected a render, got {:?}", other),
        }
    }

    #[test]
    fn test_preview_captures_segment_safe_characters() {
        let table = admin_table();

        match table.resolve("/pay/preview/wx_2023-10.01~id") {
            RenderDecision::Render { params, .. } => {
                assert_eq!(params.get("prepay_id"), Some("wx_2023-10.01~id"));
            }
            other => panic!("expected a render, got {:?}", other),
        }
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let table = admin_table();

        for path in ["/admin/merchants", "/admin", "/", "/pay/preview/x", "/nope"] {
            assert_eq!(table.resolve(path), table.resolve(path));
        }
    }

    #[test]
    fn test_unmatched_paths_are_not_found() {
        let table = admin_table();

        assert_eq!(table.resolve("/admin/unknown"), RenderDecision::NotFound);
        assert_eq!(table.resolve("/nonexistent"), RenderDecision::NotFound);
        assert_eq!(table.resolve("/pay/preview"), RenderDecision::NotFound);
        assert_eq!(
            table.resolve("/pay/preview/a/b"),
            RenderDecision::NotFound
        );
    }

    #[test]
    fn test_trailing_and_duplicate_slashes_are_normalized() {
        let table = admin_table();

        assert_renders(
            &table,
            "/admin/merchants/",
            AppView::MerchantList,
            &[AppView::AdminLayout],
        );
        assert_renders(
            &table,
            "//admin//refunds",
            AppView::RefundList,
            &[AppView::AdminLayout],
        );
    }

    #[test]
    fn test_navigate_follows_redirect_chain() {
        let table = admin_table();

        let navigation = table.navigate("/").unwrap();
        assert_eq!(navigation.path, "/admin/merchants");
        assert_eq!(navigation.redirects, vec!["/", "/admin"]);
        match navigation.decision {
            RenderDecision::Render { view, .. } => assert_eq!(view, AppView::MerchantList),
            other => panic!("expected a render, got {:?}", other),
        }
    }

    #[test]
    fn test_navigate_direct_hit_has_no_redirects() {
        let table = admin_table();

        let navigation = table.navigate("/admin/refunds").unwrap();
        assert!(navigation.redirects.is_empty());
        assert_eq!(navigation.path, "/admin/refunds");
    }

    #[test]
    fn test_navigate_unmatched_is_not_found() {
        let table = admin_table();

        let navigation = table.navigate("/nonexistent").unwrap();
        assert!(navigation.decision.is_not_found());
    }

    #[test]
    fn test_navigate_rejects_redirect_cycles() {
        let table = RouteTable::build(
            routes![
                Route::<AppView>::redirect("/a", "/b"),
                Route::redirect("/b", "/a"),
            ],
            RouterOptions::default(),
        )
        .unwrap();

        match table.navigate("/a") {
            Err(NavigationError::TooManyRedirects { path, limit }) => {
                assert_eq!(path, "/a");
                assert_eq!(limit, RouterOptions::default().max_redirects);
            }
            other => panic!("expected a redirect cycle error, got {:?}", other),
        }
    }

    #[test]
    fn test_base_url_is_stripped_from_incoming_paths() {
        let table = RouteTable::build(
            admin_routes(),
            RouterOptions {
                base_url: Some("/console".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

        assert_renders(
            &table,
            "/console/admin/merchants",
            AppView::MerchantList,
            &[AppView::AdminLayout],
        );
        // The root of the base prefix is the table's root
        assert_eq!(
            table.resolve("/console"),
            RenderDecision::Redirect {
                to: "/admin".to_string()
            }
        );
        // Paths outside the base never match
        assert_eq!(
            table.resolve("/admin/merchants"),
            RenderDecision::NotFound
        );
    }

    #[test]
    fn test_url_for_substitutes_params() {
        let table = admin_table();

        let params: RouteParams = [("prepay_id", "abc123")].into_iter().collect();
        assert_eq!(
            table.url_for(&AppView::PayPreview, &params).unwrap(),
            "/pay/preview/abc123"
        );
        assert_eq!(
            table
                .url_for(&AppView::MerchantList, &RouteParams::new())
                .unwrap(),
            "/admin/merchants"
        );
    }

    #[test]
    fn test_url_for_prepends_base_url() {
        let table = RouteTable::build(
            admin_routes(),
            RouterOptions {
                base_url: Some("/console".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

        let params: RouteParams = [("prepay_id", "abc123")].into_iter().collect();
        assert_eq!(
            table.url_for(&AppView::PayPreview, &params).unwrap(),
            "/console/pay/preview/abc123"
        );
    }

    #[test]
    fn test_url_for_missing_parameter() {
        let table = admin_table();

        match table.url_for(&AppView::PayPreview, &RouteParams::new()) {
            Err(UrlError::MissingParameter { pattern, name }) => {
                assert_eq!(pattern, "/pay/preview/[prepay_id]");
                assert_eq!(name, "prepay_id");
            }
            other => panic!("expected a missing parameter error, got {:?}", other),
        }
    }

    #[test]
    fn test_url_for_unknown_view() {
        let table = admin_table();

        assert!(matches!(
            table.url_for(&AppView::Settings, &RouteParams::new()),
            Err(UrlError::RouteNotFound)
        ));
    }

    #[test]
    fn test_parent_without_default_child_renders_layout_alone() {
        let table = RouteTable::build(
            routes![Route::children(
                "/admin",
                AppView::AdminLayout,
                vec![Route::view("merchants", AppView::MerchantList)],
            )],
            RouterOptions::default(),
        )
        .unwrap();

        assert_renders(&table, "/admin", AppView::AdminLayout, &[]);
    }

    #[test]
    fn test_empty_path_view_child_is_the_index() {
        let table = RouteTable::build(
            routes![Route::children(
                "/admin",
                AppView::AdminLayout,
                vec![Route::view("", AppView::MerchantList)],
            )],
            RouterOptions::default(),
        )
        .unwrap();

        assert_renders(
            &table,
            "/admin",
            AppView::MerchantList,
            &[AppView::AdminLayout],
        );
    }

    #[test]
    fn test_first_match_wins_in_declaration_order() {
        let table = RouteTable::build(
            routes![
                Route::view("/pay/preview/[prepay_id]", AppView::PayPreview),
                Route::view("/pay/preview/fixed", AppView::Settings),
            ],
            RouterOptions::default(),
        )
        .unwrap();

        // The dynamic entry is declared first, so it shadows the static one
        match table.resolve("/pay/preview/fixed") {
            RenderDecision::Render { view, .. } => assert_eq!(view, AppView::PayPreview),
            other => panic!("expected a render, got {:?}", other),
        }
    }

    #[test]
    fn test_build_rejects_nested_children() {
        let result = RouteTable::build(
            routes![Route::children(
                "/admin",
                AppView::AdminLayout,
                vec![Route::children(
                    "reports",
                    AppView::Settings,
                    vec![Route::view("daily", AppView::TransactionList)],
                )],
            )],
            RouterOptions::default(),
        );

        match result {
            Err(TableError::NestedChildren { path }) => assert_eq!(path, "/admin/reports"),
            other => panic!("expected a nesting error, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_build_rejects_empty_top_level_pattern() {
        let result = RouteTable::build(
            routes![Route::view("", AppView::Settings)],
            RouterOptions::default(),
        );

        assert!(matches!(result, Err(TableError::EmptyPattern)));
    }

    #[test]
    fn test_table_definition_survives_serialization() {
        let routes = routes![
            Route::children(
                "/admin",
                "AdminLayout".to_string(),
                vec![
                    Route::view("merchants", "MerchantList".to_string()),
                    Route::default_redirect("/admin/merchants"),
                ],
            ),
            Route::redirect("/", "/admin"),
        ];

        let json = serde_json::to_string(&routes).unwrap();
        let back: Vec<Route<String>> = serde_json::from_str(&json).unwrap();
        assert_eq!(routes, back);

        let table = RouteTable::build(back, RouterOptions::default()).unwrap();
        assert_eq!(
            table.resolve("/admin"),
            RenderDecision::Redirect {
                to: "/admin/merchants".to_string()
            }
        );
    }
}
