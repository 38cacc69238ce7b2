//! Store snapshots and their copy-on-write holder.
//!
//! A [`Navigator`] pairs a configuration store with the maps derived from
//! it; it is immutable and answers every request-path query. The
//! [`SharedNavigator`] holds the current snapshot behind a lock that is
//! only taken long enough to clone or swap an `Arc`, so readers never see
//! a half-applied mutation batch.

use std::sync::Arc;

use indexmap::IndexMap;
use tracing::info;

use crate::derived::DerivedMaps;
use crate::menu::{
    self, HOME_MODULE, NavigationBuilder, NavigationNode, PermissionSummary, RouteIndex,
};
use crate::models::User;
use crate::permissions::AccessEvaluator;
use crate::store::ConfigurationStore;

/// An immutable store snapshot with its derived maps.
#[derive(Debug, Clone)]
pub struct Navigator {
    store: ConfigurationStore,
    derived: DerivedMaps,
    routes: RouteIndex,
    home: String,
}

impl Navigator {
    /// Derive everything from a store, using `home` as the home module.
    pub fn new(store: ConfigurationStore) -> Self {
        Self::with_home(store, HOME_MODULE)
    }

    /// Derive everything from a store with a custom home module.
    pub fn with_home(store: ConfigurationStore, home: impl Into<String>) -> Self {
        let derived = DerivedMaps::derive_all(&store);
        let routes = RouteIndex::from_store(&store);
        Self {
            store,
            derived,
            routes,
            home: home.into(),
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &ConfigurationStore {
        &self.store
    }

    /// The derived lookup maps.
    pub fn derived(&self) -> &DerivedMaps {
        &self.derived
    }

    /// The route index.
    pub fn routes(&self) -> &RouteIndex {
        &self.routes
    }

    /// Name of the home module.
    pub fn home_module(&self) -> &str {
        &self.home
    }

    /// Check if a module is visible to the caller.
    pub fn is_module_accessible(&self, user: Option<&User>, module: &str) -> bool {
        AccessEvaluator::new(&self.store, &self.derived).is_module_accessible(user, module)
    }

    /// Check if the user holds at least one of the module's permissions.
    pub fn has_any_permission(&self, user: &User, module: &str) -> bool {
        AccessEvaluator::new(&self.store, &self.derived).has_any_permission(user, module)
    }

    /// Build the navigation tree for a request.
    pub fn build_navigation(
        &self,
        current_route: Option<&str>,
        user: Option<&User>,
    ) -> Vec<NavigationNode> {
        NavigationBuilder::new(&self.store, &self.derived)
            .with_home(&self.home)
            .build(current_route, user)
    }

    /// Build the navigation tree for a request path instead of a route.
    ///
    /// Paths that match no route leave every entry inactive.
    pub fn build_navigation_for_path(&self, path: &str, user: Option<&User>) -> Vec<NavigationNode> {
        let route = self.routes.match_path(path).map(|m| m.entry.route.as_str());
        self.build_navigation(route, user)
    }

    /// Summarize one module's permissions for the caller.
    pub fn module_permission_summary(
        &self,
        user: Option<&User>,
        module: &str,
    ) -> Option<PermissionSummary> {
        menu::module_permission_summary(&self.store, &self.derived, user, module)
    }

    /// Summarize every module that declares permissions.
    pub fn permission_summary(&self, user: Option<&User>) -> IndexMap<String, PermissionSummary> {
        menu::permission_summary(&self.store, &self.derived, user)
    }

    /// Copy the store for a mutation batch.
    pub fn to_store(&self) -> ConfigurationStore {
        self.store.clone()
    }
}

/// Process-wide holder of the current [`Navigator`] snapshot.
///
/// Cloning is cheap; all clones share the same snapshot slot.
#[derive(Debug, Clone)]
pub struct SharedNavigator {
    current: Arc<parking_lot::RwLock<Arc<Navigator>>>,
}

impl SharedNavigator {
    /// Wrap an initial snapshot.
    pub fn new(navigator: Navigator) -> Self {
        Self {
            current: Arc::new(parking_lot::RwLock::new(Arc::new(navigator))),
        }
    }

    /// Grab the current snapshot. It stays valid after later swaps.
    pub fn load(&self) -> Arc<Navigator> {
        Arc::clone(&self.current.read())
    }

    /// Apply a mutation batch to a copy of the store, re-derive once and
    /// swap the result in.
    ///
    /// Writers are serialized; readers keep using the old snapshot until
    /// the swap.
    pub fn update<R>(&self, apply: impl FnOnce(&mut ConfigurationStore) -> R) -> R {
        let mut slot = self.current.write();

        let mut store = slot.to_store();
        let result = apply(&mut store);
        let next = Navigator::with_home(store, slot.home_module());

        info!(modules = next.store().len(), "navigation config updated");
        *slot = Arc::new(next);
        result
    }

    /// Replace the snapshot wholesale (e.g. after reloading a config file).
    pub fn replace(&self, navigator: Navigator) {
        *self.current.write() = Arc::new(navigator);
    }
}
