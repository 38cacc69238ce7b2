//! Navigation tree builder.
//!
//! Produces the navbar for one request: the home module first, then every
//! enabled, accessible module in declaration order with its permission
//! filtered dropdown.

use serde::Serialize;
use tracing::debug;

use crate::derived::DerivedMaps;
use crate::models::{Badge, MenuItem, Module, PermissionSet, User};
use crate::permissions::AccessEvaluator;
use crate::store::ConfigurationStore;

/// Module rendered first and without a dropdown.
pub const HOME_MODULE: &str = "home";

/// URL used for modules that only open a dropdown.
const DROPDOWN_URL: &str = "#";

/// A top-level navbar entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationNode {
    pub name: String,
    pub url: String,
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub children: Vec<NavChild>,
}

/// A dropdown entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NavChild {
    Header { text: String },
    Divider,
    Link(NavLink),
}

impl NavChild {
    /// Check if this entry is a link rather than a marker.
    pub fn is_link(&self) -> bool {
        matches!(self, NavChild::Link(_))
    }

    /// The link, if this entry is one.
    pub fn as_link(&self) -> Option<&NavLink> {
        match self {
            NavChild::Link(link) => Some(link),
            _ => None,
        }
    }
}

/// A permission-filtered dropdown link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub name: String,
    pub url: String,
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<Badge>,
}

impl NavLink {
    fn from_item(item: &MenuItem, current_route: Option<&str>) -> Self {
        Self {
            name: item.display_name.clone(),
            url: item.url.clone(),
            active: !item.route.is_empty()
                && current_route.is_some_and(|route| route == item.route),
            icon: non_empty(&item.icon),
            badge: item.badge.clone(),
        }
    }
}

/// Builds navigation trees from one store snapshot.
#[derive(Debug, Clone, Copy)]
pub struct NavigationBuilder<'a> {
    store: &'a ConfigurationStore,
    derived: &'a DerivedMaps,
    home: &'a str,
}

impl<'a> NavigationBuilder<'a> {
    /// Create a builder using [`HOME_MODULE`] as the home module.
    pub fn new(store: &'a ConfigurationStore, derived: &'a DerivedMaps) -> Self {
        Self {
            store,
            derived,
            home: HOME_MODULE,
        }
    }

    /// Use a different module as the home module.
    pub fn with_home(mut self, home: &'a str) -> Self {
        self.home = home;
        self
    }

    /// Build the navigation tree for a request.
    pub fn build(&self, current_route: Option<&str>, user: Option<&User>) -> Vec<NavigationNode> {
        let access = AccessEvaluator::new(self.store, self.derived);
        let mut nodes = Vec::with_capacity(self.store.len());

        if let Some(home) = self.store.get(self.home) {
            nodes.push(NavigationNode {
                name: home.display_name.clone(),
                url: home.url.clone().unwrap_or_else(|| "/".to_string()),
                active: home.matches_route(current_route),
                icon: non_empty(&home.icon),
                children: Vec::new(),
            });
        }

        for module in self.store.modules() {
            if module.name == self.home || !module.enabled {
                continue;
            }
            if !access.is_module_accessible(user, &module.name) {
                continue;
            }

            let children = self.children(module, current_route, user);

            // Never render a gated module as an empty shell.
            if !module.public_access && user.is_some() && !children.iter().any(NavChild::is_link) {
                debug!(module = %module.name, "no visible items; module dropped");
                continue;
            }

            nodes.push(NavigationNode {
                name: module.display_name.clone(),
                url: module.url.clone().unwrap_or_else(|| DROPDOWN_URL.to_string()),
                active: module.matches_route(current_route),
                icon: non_empty(&module.icon),
                children,
            });
        }

        nodes
    }

    /// Dropdown entries of a module: sections in order, separated by
    /// dividers, each with its header and visible links. Sections without
    /// visible links are left out entirely.
    fn children(
        &self,
        module: &Module,
        current_route: Option<&str>,
        user: Option<&User>,
    ) -> Vec<NavChild> {
        let permissions = user.and_then(|u| u.permissions.as_ref());
        let mut children = Vec::new();

        for section in self.derived.sections(&module.name) {
            let links: Vec<_> = section
                .items
                .iter()
                .filter(|item| item_visible(item, permissions))
                .map(|item| NavChild::Link(NavLink::from_item(item, current_route)))
                .collect();

            if links.is_empty() {
                continue;
            }

            if !children.is_empty() {
                children.push(NavChild::Divider);
            }
            if let Some(header) = &section.header {
                children.push(NavChild::Header {
                    text: header.clone(),
                });
            }
            children.extend(links);
        }

        children
    }
}

/// With a permission map an item shows iff its permission is held; without
/// one it falls back to the item's default visibility.
fn item_visible(item: &MenuItem, permissions: Option<&PermissionSet>) -> bool {
    match permissions {
        Some(_) if item.permission.is_empty() => true,
        Some(held) => held.contains(&item.permission),
        None => item.shown_by_default(),
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::models::ANONYMOUS_USER_ID;
    use crate::store::{ModuleOptions, PermissionOptions};

    fn store() -> ConfigurationStore {
        let mut store = ConfigurationStore::new();
        store.add_module(
            "home",
            "Home",
            "fas fa-home",
            ModuleOptions::default().public().url("/").route("home.home"),
        );
        store.add_module(
            "lesxon",
            "LesXon",
            "fas fa-chart-line",
            ModuleOptions::default().route_prefix("lesxon."),
        );
        for (permission, section) in [
            ("lesxon_view", "ETL.EXTRACT:"),
            ("lesxon_download", "ETL.EXTRACT:"),
            ("lesxon_klines", "ETL.TRANSFORM:"),
            ("lesxon_supabase", "ETL.LOAD:"),
        ] {
            store.add_permission(
                "lesxon",
                permission,
                "",
                PermissionOptions::default().in_section(section),
            );
        }
        store
    }

    fn build(store: &ConfigurationStore, route: Option<&str>, user: Option<&User>) -> Vec<NavigationNode> {
        let derived = DerivedMaps::derive_all(store);
        NavigationBuilder::new(store, &derived).build(route, user)
    }

    #[test]
    fn home_comes_first_without_children() {
        let nodes = build(&store(), Some("home.home"), None);
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].name, "Home");
        assert_eq!(nodes[0].url, "/");
        assert!(nodes[0].active);
        assert!(nodes[0].children.is_empty());
    }

    #[test]
    fn home_is_first_even_when_declared_last() {
        let mut modules = store().to_modules();
        modules.rotate_left(1);
        let store = ConfigurationStore::from_modules(modules);

        let user = User::with_permissions(["lesxon_view"]);
        let nodes = build(&store, None, Some(&user));
        let names: Vec<_> = nodes.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["Home", "LesXon"]);
    }

    #[test]
    fn sections_without_visible_items_are_elided() {
        let user = User::with_permissions(["lesxon_view", "lesxon_supabase"]);
        let nodes = build(&store(), Some("lesxon.view"), Some(&user));
        let lesxon = &nodes[1];

        assert!(lesxon.active);
        assert_eq!(lesxon.url, "#");
        assert_eq!(
            lesxon.children,
            vec![
                NavChild::Header {
                    text: "ETL.EXTRACT:".to_string()
                },
                NavChild::Link(NavLink {
                    name: "View".to_string(),
                    url: "/lesxon/view".to_string(),
                    active: true,
                    icon: Some("fas fa-circle".to_string()),
                    badge: None,
                }),
                NavChild::Divider,
                NavChild::Header {
                    text: "ETL.LOAD:".to_string()
                },
                NavChild::Link(NavLink {
                    name: "Supabase".to_string(),
                    url: "/lesxon/supabase".to_string(),
                    active: false,
                    icon: Some("fas fa-circle".to_string()),
                    badge: None,
                }),
            ]
        );
    }

    #[test]
    fn disabled_module_is_skipped() {
        let mut store = store();
        store.set_module_enabled("lesxon", false);

        let user = User::with_permissions(["lesxon_view"]);
        assert_eq!(build(&store, None, Some(&user)).len(), 1);
    }

    #[test]
    fn public_module_without_permission_context_uses_default_show() {
        let mut store = store();
        store.add_module("docs", "Docs", "fas fa-book", ModuleOptions::default().public());
        store.add_permission("docs", "docs_guide", "Guide", PermissionOptions::default());
        store.add_permission("docs", "docs_api", "API", PermissionOptions::default());
        let mut modules = store.to_modules();
        modules[2].sections[0].items[0].default_show = Some(true);
        let store = ConfigurationStore::from_modules(modules);

        let nodes = build(&store, None, None);
        let docs = nodes.iter().find(|n| n.name == "Docs").unwrap();
        let links: Vec<_> = docs.children.iter().filter_map(NavChild::as_link).collect();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].name, "Guide");

        // A user without a permission map falls back the same way.
        let user = User::without_permissions(ANONYMOUS_USER_ID);
        let nodes = build(&store, None, Some(&user));
        let docs = nodes.iter().find(|n| n.name == "Docs").unwrap();
        assert_eq!(docs.children.iter().filter(|c| c.is_link()).count(), 1);
    }

    #[test]
    fn item_without_permission_is_always_visible() {
        let item = MenuItem::new("", "Help");
        assert!(item_visible(&item, None));
        assert!(item_visible(&item, Some(&PermissionSet::new())));
    }

    #[test]
    fn serializes_with_kind_tags() {
        let user = User::with_permissions(["lesxon_view"]);
        let nodes = build(&store(), None, Some(&user));
        let json = serde_json::to_value(&nodes).unwrap();

        assert_eq!(json[1]["children"][0]["kind"], "header");
        assert_eq!(json[1]["children"][1]["kind"], "link");
        assert_eq!(json[1]["children"][1]["url"], "/lesxon/view");
        assert!(json[0].get("icon").is_some());
    }
}
