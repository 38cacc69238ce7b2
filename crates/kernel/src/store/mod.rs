//! Configuration store: the single source of truth for modules, sections
//! and menu items.
//!
//! The store is plain data. Mutations never refresh derived lookup maps;
//! callers re-derive with [`crate::derived::DerivedMaps::derive_all`] after a
//! batch, or go through [`crate::SharedNavigator::update`] which does it once.

pub mod labels;
mod loader;
mod validate;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::models::{Badge, MenuItem, Module, Section};

pub use loader::StoreFile;
pub use validate::ValidationReport;

/// Options for [`ConfigurationStore::add_permission`].
///
/// Unset label fields are derived from the permission string.
#[derive(Debug, Clone, Default)]
pub struct PermissionOptions {
    pub section: Option<String>,
    pub display_name: Option<String>,
    pub url: Option<String>,
    pub route: Option<String>,
    pub icon: Option<String>,
    pub order: Option<i32>,
    pub default_show: Option<bool>,
    pub badge: Option<Badge>,
}

impl PermissionOptions {
    /// Place the item in the section with this header.
    pub fn in_section(mut self, header: impl Into<String>) -> Self {
        self.section = Some(header.into());
        self
    }

    /// Set the display name.
    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Set the URL.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the logical route.
    pub fn route(mut self, route: impl Into<String>) -> Self {
        self.route = Some(route.into());
        self
    }

    /// Set the icon class.
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Set the sort order within the section.
    pub fn order(mut self, order: i32) -> Self {
        self.order = Some(order);
        self
    }

    /// Attach a badge.
    pub fn badge(mut self, badge: Badge) -> Self {
        self.badge = Some(badge);
        self
    }
}

/// Options for [`ConfigurationStore::add_module`].
#[derive(Debug, Clone, Default)]
pub struct ModuleOptions {
    pub depends_on: Vec<String>,
    pub public_access: bool,
    pub route_prefix: Option<String>,
    pub url: Option<String>,
    pub route: Option<String>,
}

impl ModuleOptions {
    /// Require partial access to another module first.
    pub fn depends_on(mut self, module: impl Into<String>) -> Self {
        self.depends_on.push(module.into());
        self
    }

    /// Make the module visible to every caller.
    pub fn public(mut self) -> Self {
        self.public_access = true;
        self
    }

    /// Set the route prefix that marks the module active.
    pub fn route_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.route_prefix = Some(prefix.into());
        self
    }

    /// Set the module's own link.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the exact route that marks the module active.
    pub fn route(mut self, route: impl Into<String>) -> Self {
        self.route = Some(route.into());
        self
    }
}

/// Declaration-ordered collection of navigation modules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigurationStore {
    modules: IndexMap<String, Module>,
}

impl ConfigurationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from module definitions, filling in missing labels.
    ///
    /// A repeated module name replaces the earlier definition in place.
    pub fn from_modules(modules: impl IntoIterator<Item = Module>) -> Self {
        let mut store = Self::new();

        for mut module in modules {
            for section in &mut module.sections {
                for item in &mut section.items {
                    labels::fill_missing(&module.name, item);
                }
            }

            if let Some(previous) = store.modules.insert(module.name.clone(), module) {
                warn!(module = %previous.name, "duplicate module definition replaced");
            }
        }

        store
    }

    /// Export the modules in declaration order.
    pub fn to_modules(&self) -> Vec<Module> {
        self.modules.values().cloned().collect()
    }

    /// Get a module by name.
    pub fn get(&self, name: &str) -> Option<&Module> {
        self.modules.get(name)
    }

    /// Check whether a module is defined.
    pub fn contains(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    /// All modules in declaration order.
    pub fn modules(&self) -> impl Iterator<Item = &Module> {
        self.modules.values()
    }

    /// Module names in declaration order.
    pub fn module_names(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(|s| s.as_str())
    }

    /// Get module count.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Add a module or update the metadata of an existing one.
    ///
    /// Existing sections and the module's position are kept.
    pub fn add_module(
        &mut self,
        name: &str,
        display_name: &str,
        icon: &str,
        opts: ModuleOptions,
    ) {
        let module = self
            .modules
            .entry(name.to_string())
            .or_insert_with(|| Module::new(name, display_name, icon));

        module.display_name = display_name.to_string();
        module.icon = icon.to_string();
        module.depends_on = opts.depends_on;
        module.public_access = opts.public_access;
        module.route_prefix = opts.route_prefix;
        module.url = opts.url;
        module.route = opts.route;
        module.implicit = false;

        debug!(module = %name, public = module.public_access, "module added");
    }

    /// Remove a module with all its sections. Unknown names are a no-op.
    pub fn remove_module(&mut self, name: &str) -> bool {
        let removed = self.modules.shift_remove(name).is_some();
        if removed {
            debug!(module = %name, "module removed");
        }
        removed
    }

    /// Enable or disable a module. Unknown names are a no-op.
    pub fn set_module_enabled(&mut self, name: &str, enabled: bool) -> bool {
        match self.modules.get_mut(name) {
            Some(module) => {
                module.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// Insert or overwrite one menu item.
    ///
    /// An item already present stays where it is unless `opts.section` moves
    /// it elsewhere. New items join the section named by `opts.section`, or
    /// a new section ordered after every existing one.
    pub fn add_permission(
        &mut self,
        module: &str,
        permission: &str,
        description: &str,
        opts: PermissionOptions,
    ) {
        let entry = self.modules.entry(module.to_string()).or_insert_with(|| {
            debug!(module = %module, "creating implicit module");
            let mut created = Module::new(
                module,
                labels::display_name_for(module, module),
                labels::DEFAULT_ICON,
            );
            created.implicit = true;
            created
        });

        let mut item = MenuItem::new(permission, description);
        item.display_name = opts.display_name.unwrap_or_default();
        item.url = opts.url.unwrap_or_default();
        item.route = opts.route.unwrap_or_default();
        item.icon = opts.icon.unwrap_or_default();
        item.default_show = opts.default_show;
        item.badge = opts.badge;
        labels::fill_missing(module, &mut item);

        let target = opts
            .section
            .as_deref()
            .and_then(|header| entry.sections.iter().position(|s| s.header.as_deref() == Some(header)));

        if let Some((si, ii)) = entry.find_item(permission) {
            if opts.section.is_none() || target == Some(si) {
                item.order = opts.order.unwrap_or(entry.sections[si].items[ii].order);
                entry.sections[si].items[ii] = item;
                debug!(module = %module, permission = %permission, "permission overwritten");
                return;
            }

            // Moving to another section.
            entry.sections[si].items.remove(ii);
            if entry.sections[si].items.is_empty() {
                entry.sections.remove(si);
            }
        }

        let target = opts
            .section
            .as_deref()
            .and_then(|header| entry.sections.iter().position(|s| s.header.as_deref() == Some(header)));

        match target {
            Some(si) => {
                let section = &mut entry.sections[si];
                item.order = opts
                    .order
                    .unwrap_or_else(|| {
                        section.max_item_order().map_or(1, |o| o.saturating_add(1))
                    });
                section.items.push(item);
            }
            None => {
                let order = entry.max_section_order().map_or(1, |o| o.saturating_add(1));
                let mut section = Section::new(opts.section, order);
                item.order = opts.order.unwrap_or(1);
                section.items.push(item);
                entry.sections.push(section);
            }
        }

        debug!(module = %module, permission = %permission, "permission added");
    }

    /// Delete one menu item, pruning its section when it empties.
    ///
    /// Modules created implicitly by [`add_permission`](Self::add_permission)
    /// are removed with their last section. Unknown modules or permissions
    /// are a no-op.
    pub fn remove_permission(&mut self, module: &str, permission: &str) -> bool {
        let Some(entry) = self.modules.get_mut(module) else {
            return false;
        };
        let Some((si, ii)) = entry.find_item(permission) else {
            return false;
        };

        entry.sections[si].items.remove(ii);
        if entry.sections[si].items.is_empty() {
            entry.sections.remove(si);
        }

        if entry.sections.is_empty() && entry.implicit {
            self.modules.shift_remove(module);
            debug!(module = %module, "implicit module removed with its last permission");
        }

        debug!(module = %module, permission = %permission, "permission removed");
        true
    }
}
