//! Menu item model.
//!
//! A menu item is one permission-gated link inside a module's dropdown.
//! Items are grouped into [`Section`](super::Section)s and keyed by their
//! permission string, which doubles as the item's identity.

use serde::{Deserialize, Serialize};

/// Badge rendered next to a menu item (e.g. "New").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    /// Visible badge text.
    pub text: String,

    /// Visual style ("primary", "warning", ...).
    #[serde(rename = "type", alias = "kind")]
    pub kind: String,

    /// Accessible label for screen readers.
    #[serde(default)]
    pub label: String,
}

/// Menu item record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Permission key required to see the item (e.g. "lesxon_view").
    pub permission: String,

    /// Human-readable link text. Derived from the permission when empty.
    #[serde(default)]
    pub display_name: String,

    /// Longer description, shown in permission summaries.
    #[serde(default)]
    pub description: String,

    /// Link destination. Derived as `/{module}/{suffix}` when empty.
    #[serde(default)]
    pub url: String,

    /// Logical route name. Derived as `{module}.{suffix}` when empty.
    #[serde(default)]
    pub route: String,

    /// Icon class.
    #[serde(default)]
    pub icon: String,

    /// Sort order within the section (lower = earlier).
    #[serde(default, alias = "item_order")]
    pub order: i32,

    /// Disabled items are kept in the store but never derived or rendered.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Visibility when no permission context exists. `None` means "hide when
    /// a permission is declared, show otherwise".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_show: Option<bool>,

    /// Optional badge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<Badge>,
}

fn default_true() -> bool {
    true
}

impl MenuItem {
    /// Create an enabled item with only a permission and description set.
    ///
    /// Labels are left empty for [`crate::store::labels`] to fill in.
    pub fn new(permission: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            permission: permission.into(),
            display_name: String::new(),
            description: description.into(),
            url: String::new(),
            route: String::new(),
            icon: String::new(),
            order: 0,
            enabled: true,
            default_show: None,
            badge: None,
        }
    }

    /// Whether the item is shown when the caller carries no permission map.
    pub fn shown_by_default(&self) -> bool {
        self.default_show.unwrap_or(self.permission.is_empty())
    }
}
