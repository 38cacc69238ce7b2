//! Built-in reference menu.
//!
//! Used when no configuration file is given, and as the fixture most tests
//! build on.

use crate::models::{Badge, PermissionSet};
use crate::store::{ConfigurationStore, ModuleOptions, PermissionOptions};

/// `(permission, display name, description, url, route, icon)`
type ItemRow<'a> = (&'a str, &'a str, &'a str, &'a str, &'a str, &'a str);

/// Build the reference store: home, lesxon, autotrackr and products.
pub fn default_store() -> ConfigurationStore {
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
    add_section(
        &mut store,
        "lesxon",
        "ETL.EXTRACT:",
        &[
            ("lesxon_view", "View", "View data and reports", "/lesxon/view", "lesxon.view", "fas fa-eye"),
            ("lesxon_download", "Download", "Download files and datasets", "/lesxon/download", "lesxon.download", "fas fa-download"),
            ("lesxon_zip", "Zip", "Create and manage zip archives", "/lesxon/zip", "lesxon.zip", "fas fa-file-archive"),
        ],
    );
    add_section(
        &mut store,
        "lesxon",
        "ETL.TRANSFORM:",
        &[
            ("lesxon_transactions", "Transactions", "Manage transaction data", "/lesxon/transactions", "lesxon.transactions", "fas fa-exchange-alt"),
            ("lesxon_klines", "Klines", "View and analyze klines data", "/lesxon/klines", "lesxon.klines", "fas fa-chart-bar"),
        ],
    );
    add_section(
        &mut store,
        "lesxon",
        "ETL.LOAD:",
        &[
            ("lesxon_supabase", "Supabase", "Access LesXon Supabase integration", "/lesxon/supabase", "lesxon.supabase", "fas fa-database"),
        ],
    );

    store.add_module(
        "autotrackr",
        "Autotrackr",
        "fas fa-cogs",
        ModuleOptions::default().route_prefix("autotrackr."),
    );
    add_section(
        &mut store,
        "autotrackr",
        "ETL.EXTRACT:",
        &[
            ("autotrackr_service_orders", "Service Orders", "Manage service orders", "/autotrackr/service_orders", "autotrackr.service_orders", "fas fa-clipboard-list"),
        ],
    );
    add_section(
        &mut store,
        "autotrackr",
        "ETL.TRANSFORM:",
        &[
            ("autotrackr_erm_model", "ERM Model", "Access ERM model tools", "/autotrackr/erm_model", "autotrackr.erm_model", "fas fa-project-diagram"),
        ],
    );
    add_section(
        &mut store,
        "autotrackr",
        "ETL.LOAD:",
        &[
            ("autotrackr_supabase", "Supabase", "Access Autotrackr Supabase integration", "/autotrackr/supabase", "autotrackr.supabase", "fas fa-database"),
        ],
    );

    store.add_module(
        "products",
        "Products",
        "fas fa-shopping-cart",
        ModuleOptions::default().route_prefix("products."),
    );
    add_section(
        &mut store,
        "products",
        "Categories:",
        &[
            ("products_electronics", "Electronics", "Manage electronics catalog", "/products/category/electronics", "products.category.electronics", "fas fa-laptop"),
            ("products_clothing", "Clothing", "Manage clothing catalog", "/products/category/clothing", "products.category.clothing", "fas fa-tshirt"),
            ("products_home_garden", "Home & Garden", "Manage home & garden catalog", "/products/category/home", "products.category.home", "fas fa-home"),
        ],
    );
    add_section(
        &mut store,
        "products",
        "Product Management:",
        &[
            ("products_new", "Add New Product", "Manage new product listings", "/products/new", "products.new", "fas fa-plus-circle"),
            ("products_manage", "Manage Products", "Full product management access", "/products/manage", "products.manage", "fas fa-edit"),
        ],
    );
    store.add_permission(
        "products",
        "products_all",
        "View all products",
        PermissionOptions::default()
            .display_name("All Products")
            .url("/products")
            .route("products.index")
            .icon("fas fa-list")
            .badge(Badge {
                text: "New".to_string(),
                kind: "primary".to_string(),
                label: "New item".to_string(),
            }),
    );

    store
}

fn add_section(store: &mut ConfigurationStore, module: &str, header: &str, items: &[ItemRow<'_>]) {
    for (permission, name, description, url, route, icon) in items {
        store.add_permission(
            module,
            permission,
            description,
            PermissionOptions::default()
                .in_section(header)
                .display_name(*name)
                .url(*url)
                .route(*route)
                .icon(*icon),
        );
    }
}

/// Grant every permission declared by the listed modules.
///
/// Unknown modules contribute nothing.
pub fn grant_all<'a>(
    store: &ConfigurationStore,
    modules: impl IntoIterator<Item = &'a str>,
) -> PermissionSet {
    let mut permissions = PermissionSet::new();

    for name in modules {
        if let Some(module) = store.get(name) {
            for item in module.items() {
                permissions.grant(item.permission.clone());
            }
        }
    }

    permissions
}
