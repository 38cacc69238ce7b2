//! Lookup maps derived from the configuration store.
//!
//! Everything here is recomputed in one full pass whenever the store
//! changes. Only enabled sections and items contribute; every module gets
//! an entry, possibly empty.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, warn};

use crate::models::MenuItem;
use crate::store::ConfigurationStore;

/// One section of a module, as rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionView {
    /// Header text; `None` for anonymous sections.
    pub header: Option<String>,
    /// Permissions of the section's gated items, in display order.
    pub permissions: Vec<String>,
    /// Every enabled item in display order, including items without a
    /// permission.
    pub items: Vec<MenuItem>,
}

/// Flattened views of the configuration store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DerivedMaps {
    /// module → permission → description. Items without a permission are
    /// not listed here or in `items_by_permission`.
    pub permission_descriptions: IndexMap<String, IndexMap<String, String>>,
    /// permission → icon. Permission names are global for this map.
    pub permission_icons: HashMap<String, String>,
    /// module → sections ordered by section order, items by item order.
    pub module_sections: IndexMap<String, Vec<SectionView>>,
    /// module → permission → item.
    pub items_by_permission: IndexMap<String, IndexMap<String, MenuItem>>,
}

impl DerivedMaps {
    /// Derive every lookup map from the store.
    pub fn derive_all(store: &ConfigurationStore) -> Self {
        let mut derived = Self::default();

        for module in store.modules() {
            let mut sections: Vec<_> = module.sections.iter().filter(|s| s.enabled).collect();
            // Stable: equal orders keep insertion order.
            sections.sort_by_key(|s| s.order);

            let mut descriptions = IndexMap::new();
            let mut items = IndexMap::new();
            let mut views = Vec::with_capacity(sections.len());

            for section in sections {
                let mut enabled: Vec<_> = section.items.iter().filter(|i| i.enabled).collect();
                enabled.sort_by_key(|i| i.order);

                for item in enabled.iter().filter(|i| !i.permission.is_empty()) {
                    descriptions.insert(item.permission.clone(), item.description.clone());
                    items.insert(item.permission.clone(), (*item).clone());

                    if let Some(previous) = derived
                        .permission_icons
                        .insert(item.permission.clone(), item.icon.clone())
                        && previous != item.icon
                    {
                        warn!(
                            permission = %item.permission,
                            module = %module.name,
                            "permission icon redefined; permission names must be globally unique"
                        );
                    }
                }

                views.push(SectionView {
                    header: section.header.clone(),
                    permissions: enabled
                        .iter()
                        .filter(|i| !i.permission.is_empty())
                        .map(|i| i.permission.clone())
                        .collect(),
                    items: enabled.into_iter().cloned().collect(),
                });
            }

            derived
                .permission_descriptions
                .insert(module.name.clone(), descriptions);
            derived.items_by_permission.insert(module.name.clone(), items);
            derived.module_sections.insert(module.name.clone(), views);
        }

        debug!(
            modules = derived.module_sections.len(),
            permissions = derived.permission_icons.len(),
            "derived menu maps"
        );

        derived
    }

    /// Declared permissions of a module. Unknown modules have none.
    pub fn module_permissions(&self, module: &str) -> impl Iterator<Item = &str> {
        self.permission_descriptions
            .get(module)
            .into_iter()
            .flat_map(|perms| perms.keys().map(|p| p.as_str()))
    }

    /// Ordered sections of a module. Unknown modules have none.
    pub fn sections(&self, module: &str) -> &[SectionView] {
        self.module_sections
            .get(module)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Look up an item by module and permission.
    pub fn item(&self, module: &str, permission: &str) -> Option<&MenuItem> {
        self.items_by_permission.get(module)?.get(permission)
    }

    /// Look up a permission's description.
    pub fn description(&self, module: &str, permission: &str) -> Option<&str> {
        self.permission_descriptions
            .get(module)?
            .get(permission)
            .map(|d| d.as_str())
    }

    /// Look up a permission's icon.
    pub fn icon(&self, permission: &str) -> Option<&str> {
        self.permission_icons.get(permission).map(|i| i.as_str())
    }
}
