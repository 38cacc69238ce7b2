//! Navgate Kernel Library
//!
//! Module-visibility and permission-resolution engine for navigation menus.
//! The request layer hands in `(current_route, user)` and gets back a
//! permission-filtered, rendering-ready navigation tree. The `navgate`
//! binary exposes the same engine on the command line.

pub mod config;
pub mod defaults;
pub mod derived;
pub mod error;
pub mod menu;
pub mod models;
pub mod navigator;
pub mod permissions;
pub mod store;

pub use config::Config;
pub use derived::{DerivedMaps, SectionView};
pub use error::ConfigIssue;
pub use navigator::{Navigator, SharedNavigator};
pub use store::{ConfigurationStore, ModuleOptions, PermissionOptions, ValidationReport};
