//! Navigation module and section models.

use serde::{Deserialize, Serialize};

use super::MenuItem;

/// A named (or anonymous) group of items inside a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Header text rendered above the group. Anonymous sections have none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,

    /// Sort order among the module's sections (lower = earlier).
    #[serde(default, alias = "section_order")]
    pub order: i32,

    /// Disabled sections are skipped during derivation.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Items in insertion order.
    #[serde(default)]
    pub items: Vec<MenuItem>,
}

impl Section {
    /// Create an empty, enabled section.
    pub fn new(header: Option<String>, order: i32) -> Self {
        Self {
            header,
            order,
            enabled: true,
            items: Vec::new(),
        }
    }

    /// Look up an item by permission.
    pub fn item(&self, permission: &str) -> Option<&MenuItem> {
        self.items.iter().find(|i| i.permission == permission)
    }

    /// Position of an item by permission.
    pub fn position(&self, permission: &str) -> Option<usize> {
        self.items.iter().position(|i| i.permission == permission)
    }

    /// Largest item order in the section, if any.
    pub fn max_item_order(&self) -> Option<i32> {
        self.items.iter().map(|i| i.order).max()
    }
}

/// Top-level navigable feature area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    /// Machine name; also the permission namespace prefix.
    pub name: String,

    /// Human-readable name shown in the navbar.
    #[serde(default)]
    pub display_name: String,

    /// Icon class.
    #[serde(default)]
    pub icon: String,

    /// Link for modules rendered as a plain entry (e.g. home → "/").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Exact logical route that marks the module active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,

    /// Route prefix that marks the module active (e.g. "lesxon.").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_prefix: Option<String>,

    /// Modules whose permissions must be partially held first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,

    /// Visible to every caller, authenticated or not.
    #[serde(default)]
    pub public_access: bool,

    /// Disabled modules are never rendered.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Sections in insertion order.
    #[serde(default)]
    pub sections: Vec<Section>,

    /// Set when the module entry was created by adding a permission to an
    /// undeclared module. Such entries are dropped with their last section.
    #[serde(skip)]
    pub(crate) implicit: bool,
}

fn default_true() -> bool {
    true
}

impl Module {
    /// Create an enabled, non-public module with no sections.
    pub fn new(
        name: impl Into<String>,
        display_name: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            icon: icon.into(),
            url: None,
            route: None,
            route_prefix: None,
            depends_on: Vec::new(),
            public_access: false,
            enabled: true,
            sections: Vec::new(),
            implicit: false,
        }
    }

    /// Find the section with the given header.
    pub fn section(&self, header: &str) -> Option<&Section> {
        self.sections
            .iter()
            .find(|s| s.header.as_deref() == Some(header))
    }

    /// Find the section and item holding a permission.
    pub fn find_item(&self, permission: &str) -> Option<(usize, usize)> {
        self.sections.iter().enumerate().find_map(|(si, section)| {
            section.position(permission).map(|ii| (si, ii))
        })
    }

    /// Look up an item by permission across all sections.
    pub fn item(&self, permission: &str) -> Option<&MenuItem> {
        self.find_item(permission)
            .map(|(si, ii)| &self.sections[si].items[ii])
    }

    /// Largest section order in the module, if any.
    pub fn max_section_order(&self) -> Option<i32> {
        self.sections.iter().map(|s| s.order).max()
    }

    /// Iterate over every item, enabled or not, in storage order.
    pub fn items(&self) -> impl Iterator<Item = &MenuItem> {
        self.sections.iter().flat_map(|s| s.items.iter())
    }

    /// Whether the module was created implicitly by a permission insert.
    pub fn is_implicit(&self) -> bool {
        self.implicit
    }

    /// Whether a route activates this module, by exact route or prefix.
    pub fn matches_route(&self, current_route: Option<&str>) -> bool {
        let Some(current) = current_route else {
            return false;
        };

        self.route.as_deref() == Some(current)
            || self
                .route_prefix
                .as_deref()
                .is_some_and(|prefix| !prefix.is_empty() && current.starts_with(prefix))
    }
}
