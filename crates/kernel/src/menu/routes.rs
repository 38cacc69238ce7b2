//! Route index - maps logical routes to URLs and back.
//!
//! The request layer knows the URL it is serving; the navigation builder
//! wants the logical route (`lesxon.view`). The index is built from the same
//! store as the menu so both always agree.

use std::collections::HashMap;

use indexmap::IndexMap;
use tracing::debug;

use crate::store::ConfigurationStore;

/// A registered route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    /// Logical route name (e.g. "products.category.electronics").
    pub route: String,
    /// URL pattern; `:name` segments are parameters.
    pub url: String,
    /// Module that owns the route.
    pub module: String,
    /// Permission guarding the route; `None` for module-level routes.
    pub permission: Option<String>,
}

/// Result of matching a path against registered routes.
#[derive(Debug, Clone)]
pub struct RouteMatch<'a> {
    /// The matched entry.
    pub entry: &'a RouteEntry,
    /// Path parameters extracted (e.g. `/products/:id` on `/products/42`
    /// yields `{"id": "42"}`).
    pub params: HashMap<String, String>,
}

/// Index of every route declared in a store.
#[derive(Debug, Clone, Default)]
pub struct RouteIndex {
    /// Entries keyed by logical route, in declaration order.
    entries: IndexMap<String, RouteEntry>,
    /// Route names sorted for matching: most specific patterns first.
    patterns: Vec<String>,
}

impl RouteIndex {
    /// Build the index from a store.
    ///
    /// Module routes come before item routes; the first declaration of a
    /// logical route wins.
    pub fn from_store(store: &ConfigurationStore) -> Self {
        let mut index = Self::default();

        for module in store.modules() {
            if let (Some(route), Some(url)) = (&module.route, &module.url) {
                index.register(RouteEntry {
                    route: route.clone(),
                    url: url.clone(),
                    module: module.name.clone(),
                    permission: None,
                });
            }

            for item in module.items() {
                if item.route.is_empty() || item.url.is_empty() {
                    continue;
                }
                index.register(RouteEntry {
                    route: item.route.clone(),
                    url: item.url.clone(),
                    module: module.name.clone(),
                    permission: (!item.permission.is_empty()).then(|| item.permission.clone()),
                });
            }
        }

        index.build_patterns();
        index
    }

    fn register(&mut self, entry: RouteEntry) {
        if !self.entries.contains_key(&entry.route) {
            self.entries.insert(entry.route.clone(), entry);
        }
    }

    /// Sort by specificity: fewer params first, then deeper paths.
    fn build_patterns(&mut self) {
        self.patterns = self.entries.keys().cloned().collect();

        let entries = &self.entries;
        self.patterns.sort_by_key(|route| {
            let url = entries.get(route).map(|e| e.url.as_str()).unwrap_or_default();
            let param_count = url.matches(':').count();
            let segment_count = url.matches('/').count();
            (param_count, -(segment_count as i32))
        });

        debug!(routes = self.patterns.len(), "built route index");
    }

    /// URL of a logical route.
    pub fn url_for(&self, route: &str) -> Option<&str> {
        self.entries.get(route).map(|e| e.url.as_str())
    }

    /// Get a route entry by logical name.
    pub fn get(&self, route: &str) -> Option<&RouteEntry> {
        self.entries.get(route)
    }

    /// Match a request path against registered routes.
    pub fn match_path(&self, path: &str) -> Option<RouteMatch<'_>> {
        self.patterns.iter().find_map(|route| {
            let entry = self.entries.get(route)?;
            match_pattern(&entry.url, path).map(|params| RouteMatch { entry, params })
        })
    }

    /// Get route count.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = &RouteEntry> {
        self.entries.values()
    }
}

/// Match a route pattern against a path, extracting parameters.
///
/// Pattern: "/products/:id/edit"
/// Path: "/products/42/edit"
/// Result: Some({"id": "42"})
fn match_pattern(pattern: &str, path: &str) -> Option<HashMap<String, String>> {
    let pattern_parts: Vec<&str> = pattern.split('/').collect();
    let path_parts: Vec<&str> = path.split('/').collect();

    if pattern_parts.len() != path_parts.len() {
        return None;
    }

    let mut params = HashMap::new();

    for (pat, actual) in pattern_parts.iter().zip(path_parts.iter()) {
        if let Some(param_name) = pat.strip_prefix(':') {
            params.insert(param_name.to_string(), actual.to_string());
        } else if pat != actual {
            return None;
        }
    }

    Some(params)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::store::{ModuleOptions, PermissionOptions};

    fn index() -> RouteIndex {
        let mut store = ConfigurationStore::new();
        store.add_module(
            "home",
            "Home",
            "fas fa-home",
            ModuleOptions::default().public().url("/").route("home.home"),
        );
        store.add_permission(
            "products",
            "products_electronics",
            "Electronics",
            PermissionOptions::default()
                .url("/products/category/electronics")
                .route("products.category.electronics"),
        );
        store.add_permission(
            "products",
            "products_item",
            "Product detail",
            PermissionOptions::default()
                .url("/products/:id")
                .route("products.item"),
        );
        store.add_permission(
            "products",
            "products_all",
            "All",
            PermissionOptions::default().url("/products").route("products.index"),
        );
        RouteIndex::from_store(&store)
    }

    #[test]
    fn match_pattern_exact() {
        let params = match_pattern("/lesxon/view", "/lesxon/view");
        assert!(params.unwrap().is_empty());
    }

    #[test]
    fn match_pattern_with_param() {
        let params = match_pattern("/products/:id", "/products/42").unwrap();
        assert_eq!(params.get("id"), Some(&"42".to_string()));
    }

    #[test]
    fn match_pattern_no_match() {
        assert!(match_pattern("/lesxon/view", "/lesxon/zip").is_none());
        assert!(match_pattern("/products/:id", "/products/a/b").is_none());
    }

    #[test]
    fn url_for_route() {
        let index = index();
        assert_eq!(index.url_for("home.home"), Some("/"));
        assert_eq!(index.url_for("products.index"), Some("/products"));
        assert!(index.url_for("missing.route").is_none());
        assert_eq!(index.len(), 4);
    }

    #[test]
    fn literal_routes_win_over_params() {
        let index = index();

        let found = index.match_path("/products/category/electronics").unwrap();
        assert_eq!(found.entry.route, "products.category.electronics");

        let found = index.match_path("/products/42").unwrap();
        assert_eq!(found.entry.route, "products.item");
        assert_eq!(found.params.get("id"), Some(&"42".to_string()));
        assert_eq!(found.entry.permission.as_deref(), Some("products_item"));
    }

    #[test]
    fn unknown_path() {
        assert!(index().match_path("/nowhere").is_none());
    }
}
