#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Configuration store tests: loading, mutation, derivation and summaries.

use std::path::Path;

use navgate_kernel::defaults::default_store;
use navgate_kernel::{
    ConfigIssue, ConfigurationStore, DerivedMaps, ModuleOptions, Navigator, PermissionOptions,
    SharedNavigator,
};
use navgate_test_utils::{assert, full_access_user, stores, test_user};

fn sample_config() -> ConfigurationStore {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/menu.toml");
    ConfigurationStore::from_path(&path).unwrap()
}

#[test]
fn sample_config_loads() {
    let store = sample_config();

    let names: Vec<_> = store.module_names().collect();
    assert_eq!(names, vec!["home", "lesxon", "products"]);
    assert!(store.validate().is_clean());

    let garden = store.get("products").unwrap().item("products_home_garden").unwrap();
    assert_eq!(garden.display_name, "Home & Garden");

    let klines = store.get("lesxon").unwrap().item("lesxon_klines").unwrap();
    assert_eq!(klines.url, "/lesxon/klines");
    assert_eq!(klines.route, "lesxon.klines");
}

#[test]
fn sections_and_items_follow_order_not_declaration() {
    let derived = DerivedMaps::derive_all(&sample_config());

    let sections = derived.sections("lesxon");
    let headers: Vec<_> = sections.iter().map(|s| s.header.as_deref()).collect();
    assert_eq!(headers, vec![Some("ETL.EXTRACT:"), Some("ETL.TRANSFORM:")]);
    assert_eq!(sections[0].permissions, vec!["lesxon_view", "lesxon_download"]);

    // Equal orders keep declaration order.
    let sections = derived.sections("products");
    assert_eq!(
        sections[0].permissions,
        vec!["products_electronics", "products_home_garden"]
    );
    assert!(sections[1].header.is_none());
}

#[test]
fn sample_config_renders_with_dependency() {
    let store = sample_config();
    let navigator = Navigator::new(store.clone());

    let user = full_access_user(&store, &["lesxon"]);
    let nodes = navigator.build_navigation(Some("lesxon.view"), Some(&user));
    assert_eq!(assert::node_names(&nodes), vec!["Home"]);

    let user = test_user(&["lesxon_view", "lesxon_klines", "products_all"]);
    let nodes = navigator.build_navigation(Some("lesxon.view"), Some(&user));
    assert_eq!(assert::node_names(&nodes), vec!["Home", "LesXon", "Products"]);
    assert_eq!(
        assert::link_names(assert::node(&nodes, "LesXon")),
        vec!["View", "Klines"]
    );
    assert_eq!(
        assert::link_names(assert::node(&nodes, "Products")),
        vec!["All Products"]
    );
}

#[test]
fn cyclic_config_is_rejected() {
    let content = r#"
        [[modules]]
        name = "a"
        depends_on = ["b"]

        [[modules]]
        name = "b"
        depends_on = ["a"]
    "#;

    let err = ConfigurationStore::from_toml_str(content).unwrap_err();
    assert!(err.to_string().contains("circular dependency"), "{err}");
}

#[test]
fn duplicate_permission_is_reported() {
    let mut store = stores::with_home();
    store.add_permission("lesxon", "shared_view", "View", PermissionOptions::default());
    store.add_permission("products", "shared_view", "View", PermissionOptions::default());

    let report = store.validate();
    let errors: Vec<_> = report.errors().collect();
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0], ConfigIssue::DuplicatePermission { .. }));
}

#[test]
fn add_then_remove_restores_derived_maps() {
    let mut store = default_store();
    let before_store = store.clone();
    let before = DerivedMaps::derive_all(&store);

    store.add_permission(
        "lesxon",
        "lesxon_audit",
        "Audit trail",
        PermissionOptions::default().in_section("ETL.LOAD:"),
    );
    let during = DerivedMaps::derive_all(&store);
    assert_ne!(during, before);
    assert_eq!(during.description("lesxon", "lesxon_audit"), Some("Audit trail"));

    assert!(store.remove_permission("lesxon", "lesxon_audit"));
    assert_eq!(DerivedMaps::derive_all(&store), before);
    assert_eq!(store, before_store);
}

#[test]
fn add_then_remove_in_new_section_and_module() {
    let mut store = default_store();
    let before = DerivedMaps::derive_all(&store);

    store.add_permission("lesxon", "lesxon_misc", "Misc", PermissionOptions::default());
    store.add_permission("billing", "billing_invoices", "Invoices", PermissionOptions::default());
    assert!(store.contains("billing"));

    store.remove_permission("lesxon", "lesxon_misc");
    store.remove_permission("billing", "billing_invoices");
    assert!(!store.contains("billing"));
    assert_eq!(DerivedMaps::derive_all(&store), before);
}

#[test]
fn permission_summary_reports_grants() {
    let navigator = Navigator::new(default_store());
    let user = test_user(&["autotrackr_erm_model"]);

    let summary = navigator.permission_summary(Some(&user));
    let modules: Vec<_> = summary.keys().map(|k| k.as_str()).collect();
    assert_eq!(modules, vec!["lesxon", "autotrackr", "products"]);

    let autotrackr = &summary["autotrackr"];
    assert_eq!(autotrackr.display_name, "Autotrackr");
    assert_eq!(autotrackr.permission_count, 3);
    assert!(autotrackr.has_access);
    assert!(autotrackr.permissions["autotrackr_erm_model"].granted);
    assert!(!autotrackr.permissions["autotrackr_supabase"].granted);
    assert_eq!(
        autotrackr.permissions["autotrackr_service_orders"].description,
        "Manage service orders"
    );

    assert!(!summary["lesxon"].has_access);
    assert!(navigator.module_permission_summary(Some(&user), "missing").is_none());
}

#[test]
fn shared_navigator_batches_mutations() {
    let shared = SharedNavigator::new(Navigator::new(stores::with_home()));
    let user = test_user(&["reports_daily", "reports_weekly"]);

    shared.update(|store| {
        store.add_module(
            "reports",
            "Reports",
            "fas fa-file-alt",
            ModuleOptions::default().route_prefix("reports."),
        );
        store.add_permission("reports", "reports_daily", "Daily", PermissionOptions::default());
        store.add_permission("reports", "reports_weekly", "Weekly", PermissionOptions::default());
    });

    let navigator = shared.load();
    let nodes = navigator.build_navigation(Some("reports.weekly"), Some(&user));
    let reports = assert::node(&nodes, "Reports");
    assert!(reports.active);
    assert_eq!(assert::link_names(reports), vec!["Daily", "Weekly"]);
    assert_eq!(navigator.routes().url_for("reports.daily"), Some("/reports/daily"));
}

#[test]
fn store_round_trips_through_json() {
    let store = default_store();
    let json = serde_json::to_string(&store.to_file()).unwrap();

    let loaded = ConfigurationStore::from_json_str(&json).unwrap();
    assert_eq!(
        DerivedMaps::derive_all(&loaded),
        DerivedMaps::derive_all(&store)
    );
}

#[test]
fn ungated_items_survive_export_and_reload() {
    let store = stores::with_ungated_items();
    assert!(store.validate().is_clean());

    let json = serde_json::to_string(&store.to_file()).unwrap();
    let reloaded = ConfigurationStore::from_json_str(&json).unwrap();
    assert_eq!(reloaded, store);

    let navigator = Navigator::new(reloaded);
    let nodes = navigator.build_navigation(None, None);
    assert_eq!(assert::link_names(assert::node(&nodes, "Help")), vec!["FAQ", "About"]);

    let faq = navigator.routes().get("help.faq").unwrap();
    assert_eq!(faq.url, "/help/faq");
    assert!(faq.permission.is_none());
}

#[test]
fn order_at_the_limit_does_not_overflow() {
    let mut store = ConfigurationStore::new();
    store.add_permission(
        "lesxon",
        "lesxon_view",
        "View",
        PermissionOptions::default().in_section("ETL.EXTRACT:").order(i32::MAX),
    );
    store.add_permission(
        "lesxon",
        "lesxon_zip",
        "Zip",
        PermissionOptions::default().in_section("ETL.EXTRACT:"),
    );

    let mut modules = store.to_modules();
    modules[0].sections[0].order = i32::MAX;
    let mut store = ConfigurationStore::from_modules(modules);
    store.add_permission("lesxon", "lesxon_misc", "Misc", PermissionOptions::default());

    let lesxon = store.get("lesxon").unwrap();
    assert_eq!(lesxon.item("lesxon_zip").unwrap().order, i32::MAX);
    assert_eq!(lesxon.sections[1].order, i32::MAX);
}
