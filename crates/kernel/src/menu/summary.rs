//! Per-module permission summaries for profile and admin pages.

use indexmap::IndexMap;
use serde::Serialize;

use crate::derived::DerivedMaps;
use crate::models::User;
use crate::permissions::AccessEvaluator;
use crate::store::ConfigurationStore;

/// One permission's grant state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionGrant {
    pub granted: bool,
    pub description: String,
}

/// What a user can do inside one module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionSummary {
    pub display_name: String,
    pub permission_count: usize,
    pub has_access: bool,
    pub permissions: IndexMap<String, PermissionGrant>,
}

/// Summarize one module. `None` for unknown modules.
pub fn module_permission_summary(
    store: &ConfigurationStore,
    derived: &DerivedMaps,
    user: Option<&User>,
    module: &str,
) -> Option<PermissionSummary> {
    let definition = store.get(module)?;
    let access = AccessEvaluator::new(store, derived);

    let permissions: IndexMap<_, _> = derived
        .permission_descriptions
        .get(module)
        .into_iter()
        .flatten()
        .map(|(permission, description)| {
            let grant = PermissionGrant {
                granted: user.is_some_and(|u| u.has_permission(permission)),
                description: description.clone(),
            };
            (permission.clone(), grant)
        })
        .collect();

    Some(PermissionSummary {
        display_name: definition.display_name.clone(),
        permission_count: permissions.len(),
        has_access: access.is_module_accessible(user, module),
        permissions,
    })
}

/// Summarize every module that declares permissions, in declaration order.
pub fn permission_summary(
    store: &ConfigurationStore,
    derived: &DerivedMaps,
    user: Option<&User>,
) -> IndexMap<String, PermissionSummary> {
    store
        .module_names()
        .filter(|name| derived.module_permissions(name).next().is_some())
        .filter_map(|name| {
            module_permission_summary(store, derived, user, name)
                .map(|summary| (name.to_string(), summary))
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::store::{ModuleOptions, PermissionOptions};

    fn store() -> ConfigurationStore {
        let mut store = ConfigurationStore::new();
        store.add_module("home", "Home", "fas fa-home", ModuleOptions::default().public());
        store.add_module("autotrackr", "Autotrackr", "fas fa-cogs", ModuleOptions::default());
        store.add_permission(
            "autotrackr",
            "autotrackr_service_orders",
            "Manage service orders",
            PermissionOptions::default(),
        );
        store.add_permission(
            "autotrackr",
            "autotrackr_erm_model",
            "Access ERM model tools",
            PermissionOptions::default(),
        );
        store
    }

    #[test]
    fn summary_counts_and_grants() {
        let store = store();
        let derived = DerivedMaps::derive_all(&store);
        let user = User::with_permissions(["autotrackr_erm_model"]);

        let summary = module_permission_summary(&store, &derived, Some(&user), "autotrackr").unwrap();
        assert_eq!(summary.display_name, "Autotrackr");
        assert_eq!(summary.permission_count, 2);
        assert!(summary.has_access);
        assert!(!summary.permissions["autotrackr_service_orders"].granted);
        assert!(summary.permissions["autotrackr_erm_model"].granted);
        assert_eq!(
            summary.permissions["autotrackr_erm_model"].description,
            "Access ERM model tools"
        );
    }

    #[test]
    fn summary_skips_modules_without_permissions() {
        let store = store();
        let derived = DerivedMaps::derive_all(&store);

        let all = permission_summary(&store, &derived, None);
        assert_eq!(all.keys().collect::<Vec<_>>(), vec!["autotrackr"]);
        assert!(!all["autotrackr"].has_access);
    }

    #[test]
    fn unknown_module_has_no_summary() {
        let store = store();
        let derived = DerivedMaps::derive_all(&store);
        assert!(module_permission_summary(&store, &derived, None, "missing").is_none());
    }
}
