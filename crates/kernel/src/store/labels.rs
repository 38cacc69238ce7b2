//! Label derivation for menu items.
//!
//! Display names, URLs and routes are derived from the permission string:
//! `products_home_garden` in module `products` has suffix `home_garden`,
//! URL `/products/home_garden`, route `products.home_garden` and display
//! name "Home & Garden".

use crate::models::MenuItem;

/// Display names for suffixes that plain title-casing gets wrong.
pub const DISPLAY_NAME_OVERRIDES: &[(&str, &str)] = &[
    ("home_garden", "Home & Garden"),
    ("erm_model", "ERM Model"),
    ("etl", "ETL"),
    ("api", "API"),
];

/// Icon used when neither the caller nor the config names one.
pub const DEFAULT_ICON: &str = "fas fa-circle";

/// Strip the `{module}_` prefix from a permission.
///
/// Permissions outside the module namespace are returned unchanged.
pub fn permission_suffix<'a>(module: &str, permission: &'a str) -> &'a str {
    permission
        .strip_prefix(module)
        .and_then(|rest| rest.strip_prefix('_'))
        .filter(|rest| !rest.is_empty())
        .unwrap_or(permission)
}

/// Title-case an underscore-separated suffix, honoring the override table.
pub fn display_name_for(module: &str, permission: &str) -> String {
    let suffix = permission_suffix(module, permission);

    if let Some((_, name)) = DISPLAY_NAME_OVERRIDES.iter().find(|(k, _)| *k == suffix) {
        return (*name).to_string();
    }

    suffix
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            DISPLAY_NAME_OVERRIDES
                .iter()
                .find(|(k, _)| *k == word)
                .map(|(_, name)| (*name).to_string())
                .unwrap_or_else(|| capitalize(word))
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// URL for a permission: `/{module}/{suffix}`.
pub fn url_for(module: &str, permission: &str) -> String {
    format!("/{module}/{}", permission_suffix(module, permission))
}

/// Logical route for a permission: `{module}.{suffix}`.
pub fn route_for(module: &str, permission: &str) -> String {
    format!("{module}.{}", permission_suffix(module, permission))
}

/// Fill empty label fields of an item from its permission.
///
/// Items without a permission have nothing to derive from and only get the
/// default icon.
pub fn fill_missing(module: &str, item: &mut MenuItem) {
    if item.icon.is_empty() {
        item.icon = DEFAULT_ICON.to_string();
    }
    if item.permission.is_empty() {
        return;
    }
    if item.display_name.is_empty() {
        item.display_name = display_name_for(module, &item.permission);
    }
    if item.url.is_empty() {
        item.url = url_for(module, &item.permission);
    }
    if item.route.is_empty() {
        item.route = route_for(module, &item.permission);
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
