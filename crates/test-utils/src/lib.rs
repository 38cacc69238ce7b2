//! Navgate test utilities.
//!
//! Helpers for integration testing: user fixtures, store builders,
//! and assertion utilities for navigation trees.

use navgate_kernel::defaults::grant_all;
use navgate_kernel::models::{PermissionSet, User};
use navgate_kernel::ConfigurationStore;
use uuid::Uuid;

/// Create a signed-in test user holding exactly these permissions.
pub fn test_user(permissions: &[&str]) -> User {
    User::new(Uuid::now_v7(), permissions.iter().copied().collect())
}

/// Create a signed-in user holding every permission of the listed modules.
pub fn full_access_user(store: &ConfigurationStore, modules: &[&str]) -> User {
    User::new(Uuid::now_v7(), grant_all(store, modules.iter().copied()))
}

/// Create a signed-in user whose permission map explicitly denies these
/// permissions and grants nothing.
pub fn denied_user(permissions: &[&str]) -> User {
    let mut set = PermissionSet::new();
    for permission in permissions {
        set.deny(*permission);
    }
    User::new(Uuid::now_v7(), set)
}

/// Store builders for testing.
pub mod stores {
    use navgate_kernel::{ConfigurationStore, ModuleOptions, PermissionOptions};

    /// Public home module on `/` with route `home.home`.
    pub fn with_home() -> ConfigurationStore {
        let mut store = ConfigurationStore::new();
        store.add_module(
            "home",
            "Home",
            "fas fa-home",
            ModuleOptions::default().public().url("/").route("home.home"),
        );
        store
    }

    /// Add a gated module whose permissions all land in one section.
    pub fn add_gated(
        store: &mut ConfigurationStore,
        module: &str,
        display_name: &str,
        header: &str,
        permissions: &[&str],
        opts: ModuleOptions,
    ) {
        store.add_module(
            module,
            display_name,
            "fas fa-circle",
            opts.route_prefix(format!("{module}.")),
        );
        for permission in permissions {
            store.add_permission(
                module,
                permission,
                "",
                PermissionOptions::default().in_section(header),
            );
        }
    }

    /// Store loaded from [`crate::UNGATED_ITEMS_JSON`].
    pub fn with_ungated_items() -> ConfigurationStore {
        match ConfigurationStore::from_json_str(crate::UNGATED_ITEMS_JSON) {
            Ok(store) => store,
            Err(e) => panic!("ungated items fixture failed to load: {e:#}"),
        }
    }

    /// Home, products, and lesxon depending on products.
    pub fn lesxon_depends_on_products() -> ConfigurationStore {
        let mut store = with_home();
        add_gated(
            &mut store,
            "products",
            "Products",
            "Categories:",
            &["products_electronics", "products_clothing"],
            ModuleOptions::default(),
        );
        add_gated(
            &mut store,
            "lesxon",
            "LesXon",
            "ETL.EXTRACT:",
            &["lesxon_view", "lesxon_download"],
            ModuleOptions::default().depends_on("products"),
        );
        store
    }
}

/// Menu with items that carry no permission: a public `help` module with
/// two ungated links, and a gated `lesxon` module mixing both kinds.
pub const UNGATED_ITEMS_JSON: &str = r#"{"modules": [
    {"name": "home", "display_name": "Home", "url": "/", "route": "home.home", "public_access": true},
    {"name": "help", "display_name": "Help", "public_access": true, "sections": [
        {"header": "Support:", "order": 1, "items": [
            {"permission": "", "display_name": "FAQ", "url": "/help/faq", "route": "help.faq", "order": 1},
            {"permission": "", "display_name": "About", "url": "/help/about", "route": "help.about", "order": 2}
        ]}
    ]},
    {"name": "lesxon", "display_name": "LesXon", "route_prefix": "lesxon.", "sections": [
        {"header": "ETL.EXTRACT:", "order": 1, "items": [
            {"permission": "lesxon_view", "description": "View data and reports"},
            {"permission": "", "display_name": "Docs", "url": "/lesxon/docs", "route": "lesxon.docs"}
        ]}
    ]}
]}"#;

/// Assertion helpers for navigation trees.
pub mod assert {
    use navgate_kernel::menu::{NavChild, NavigationNode};

    /// Names of the top-level entries, in order.
    pub fn node_names(nodes: &[NavigationNode]) -> Vec<&str> {
        nodes.iter().map(|n| n.name.as_str()).collect()
    }

    /// Names of a node's links, in order.
    pub fn link_names(node: &NavigationNode) -> Vec<&str> {
        node.children
            .iter()
            .filter_map(NavChild::as_link)
            .map(|l| l.name.as_str())
            .collect()
    }

    /// Find a top-level entry by display name, failing the test if absent.
    pub fn node<'a>(nodes: &'a [NavigationNode], name: &str) -> &'a NavigationNode {
        match nodes.iter().find(|n| n.name == name) {
            Some(node) => node,
            None => panic!("Expected navigation entry '{name}', got: {:?}", node_names(nodes)),
        }
    }

    /// Assert that no entry other than `home` is an empty dropdown.
    pub fn no_empty_shells(nodes: &[NavigationNode], home: &str) {
        for node in nodes.iter().filter(|n| n.name != home) {
            assert!(
                node.children.iter().any(NavChild::is_link),
                "Expected '{}' to have at least one link",
                node.name
            );
        }
    }

    /// Assert that dividers only ever sit between two rendered sections.
    pub fn dividers_between_sections(node: &NavigationNode) {
        let children = &node.children;
        assert!(
            !matches!(children.first(), Some(NavChild::Divider)),
            "'{}' starts with a divider",
            node.name
        );
        assert!(
            !matches!(children.last(), Some(NavChild::Divider | NavChild::Header { .. })),
            "'{}' ends with a divider or header",
            node.name
        );
    }
}
