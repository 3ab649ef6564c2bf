//! Aiguillage is a declarative route table for single-page applications: an
//! ordered, immutable mapping from URL path patterns to the views of your
//! application, with nested child routes, captured path parameters and
//! redirects.
//!
//! Resolving a path is a pure function: given the same table and the same
//! path, [`RouteTable::resolve`] always returns the same [`RenderDecision`],
//! one of `Render`, `Redirect` or `NotFound`. The table knows nothing about
//! rendering itself; it only hands back stable references to your views.
//!
//! ## Example
//! ```rust
//! use aiguillage::{RenderDecision, Route, RouteTable, RouterOptions, routes};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! enum AppView {
//!     AdminLayout,
//!     MerchantList,
//!     PayPreview,
//! }
//!
//! let table = RouteTable::build(
//!     routes![
//!         Route::children("/admin", AppView::AdminLayout, vec![
//!             Route::view("merchants", AppView::MerchantList),
//!             Route::default_redirect("/admin/merchants"),
//!         ]),
//!         Route::view("/pay/preview/[prepay_id]", AppView::PayPreview),
//!         Route::redirect("/", "/admin"),
//!     ],
//!     RouterOptions::default(),
//! )?;
//!
//! assert_eq!(
//!     table.resolve("/"),
//!     RenderDecision::Redirect { to: "/admin".to_string() },
//! );
//! # Ok::<(), aiguillage::errors::TableError>(())
//! ```

// Modules the end-user will interact directly or indirectly with
pub mod errors;
pub mod logging;
pub mod route;
pub mod table;

mod options;
mod routing;

// Exports for end-users
pub use options::RouterOptions;
pub use route::{RenderDecision, Route, RouteParams, RouteTarget};
pub use table::{Navigation, RouteTable};

// Re-export FxHashMap so that code building RouteParams by hand can use it without
// requiring users to add it as a dependency.
#[doc(hidden)]
pub use rustc_hash::FxHashMap;

#[macro_export]
/// Helps to declare the ordered list of routes a [`RouteTable`] is built from.
///
/// ## Example
/// ```rust
/// use aiguillage::{Route, routes};
///
/// let table: Vec<Route<&str>> = routes![
///     Route::view("/about", "About"),
///     Route::redirect("/", "/about"),
/// ];
/// # let _ = table;
/// ```
macro_rules! routes {
    [$($route:expr),* $(,)?] => {
        vec![$($route),*]
    };
}
