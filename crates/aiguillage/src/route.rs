//! Core types to declare the routes of your application.
//!
//! A route table is an ordered list of [`Route`] records. Each record pairs a
//! path pattern with a [`RouteTarget`]: a view to render, a redirect to
//! another path, or a list of child routes sharing the parent path as prefix.
//! The table never looks inside a view reference, any `Clone + PartialEq`
//! type works: an enum of your application's screens, a function pointer, an
//! id...
//!
//! ## Example
//! ```rust
//! use aiguillage::{Route, routes};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! enum AppView {
//!     AdminLayout,
//!     MerchantList,
//!     PayPreview,
//! }
//!
//! let table = routes![
//!     Route::children("/admin", AppView::AdminLayout, vec![
//!         Route::view("merchants", AppView::MerchantList),
//!         Route::default_redirect("/admin/merchants"),
//!     ]),
//!     Route::view("/pay/preview/[prepay_id]", AppView::PayPreview),
//!     Route::redirect("/", "/admin"),
//! ];
//! # let _ = table;
//! ```
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// A single entry of a route table: a path pattern and what it resolves to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route<V> {
    /// Path pattern. Segments written `[name]` capture a parameter; inside a
    /// [`RouteTarget::Children`] list, paths are relative to the parent and an
    /// empty path marks the default entry for the parent prefix.
    pub path: String,
    pub target: RouteTarget<V>,
}

/// What a matched route resolves to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RouteTarget<V> {
    /// Render this view.
    View(V),
    /// Resolve the given path in place of the requested one.
    Redirect(String),
    /// Nested routes. The layout view wraps whichever child matches.
    Children { layout: V, children: Vec<Route<V>> },
}

impl<V> Route<V> {
    /// A route rendering a view.
    pub fn view(path: impl Into<String>, view: V) -> Self {
        Self {
            path: path.into(),
            target: RouteTarget::View(view),
        }
    }

    /// A route redirecting to another path.
    pub fn redirect(path: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            target: RouteTarget::Redirect(to.into()),
        }
    }

    /// A route with nested children, rendered inside the given layout view.
    pub fn children(path: impl Into<String>, layout: V, children: Vec<Route<V>>) -> Self {
        Self {
            path: path.into(),
            target: RouteTarget::Children {
                layout,
                children,
            },
        }
    }

    /// The default entry of a sibling list: an empty-path child redirecting
    /// away, used when the parent path is visited with no further segment.
    pub fn default_redirect(to: impl Into<String>) -> Self {
        Self::redirect("", to)
    }
}

/// Parameters captured from dynamic path segments.
///
/// Keys are the names declared in the pattern; values are the literal path
/// segments they matched, e.g. resolving `/pay/preview/abc123` against
/// `/pay/preview/[prepay_id]` captures `prepay_id = "abc123"`.
#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteParams(pub FxHashMap<String, String>);

impl RouteParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(|v| v.as_str())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<K, V> FromIterator<(K, V)> for RouteParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = FxHashMap::default();
        for (key, value) in iter {
            map.insert(key.into(), value.into());
        }
        RouteParams(map)
    }
}

/// The outcome of resolving a path against a [`RouteTable`](crate::RouteTable).
#[derive(Debug, Clone, PartialEq)]
pub enum RenderDecision<V> {
    /// Mount `view`, wrapped by `parents` (enclosing layout views, outermost
    /// first), with the captured `params`.
    Render {
        view: V,
        parents: Vec<V>,
        params: RouteParams,
    },
    /// Resolve `to` in place of the requested path. [`resolve`](crate::RouteTable::resolve)
    /// returns redirects as-is; [`navigate`](crate::RouteTable::navigate) follows them.
    Redirect { to: String },
    /// No entry matched. Always an explicit decision, never a panic.
    NotFound,
}

impl<V> RenderDecision<V> {
    pub fn is_not_found(&self) -> bool {
        matches!(self, RenderDecision::NotFound)
    }
}
