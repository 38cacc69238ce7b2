//! Configuration and caller models.

pub mod menu_item;
pub mod module;
pub mod user;

pub use menu_item::{Badge, MenuItem};
pub use module::{Module, Section};
pub use user::{ANONYMOUS_USER_ID, PermissionSet, User};
