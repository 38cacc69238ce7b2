//! Navigation output for the request layer.
//!
//! Given a store snapshot, the menu system provides:
//! - The permission-filtered navbar tree for a `(route, user)` pair
//! - Per-module permission summaries
//! - A route index translating URLs to logical routes and back

mod builder;
mod routes;
mod summary;

pub use builder::{HOME_MODULE, NavChild, NavLink, NavigationBuilder, NavigationNode};
pub use routes::{RouteEntry, RouteIndex, RouteMatch};
pub use summary::{
    PermissionGrant, PermissionSummary, module_permission_summary, permission_summary,
};
