//! User model as seen by the navigation engine.
//!
//! Users are authenticated and loaded elsewhere; the engine only reads the
//! permission map and never mutates a user.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Anonymous user UUID (nil UUID).
pub const ANONYMOUS_USER_ID: Uuid = Uuid::nil();

/// Granted permissions, keyed by permission string.
///
/// A permission counts as held only when it maps to `true`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet(BTreeMap<String, bool>);

impl PermissionSet {
    /// Create an empty permission set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant a permission.
    pub fn grant(&mut self, permission: impl Into<String>) {
        self.0.insert(permission.into(), true);
    }

    /// Record a permission as explicitly denied.
    pub fn deny(&mut self, permission: impl Into<String>) {
        self.0.insert(permission.into(), false);
    }

    /// Check whether a permission is held.
    pub fn contains(&self, permission: &str) -> bool {
        self.0.get(permission).copied().unwrap_or(false)
    }

    /// Iterate over held permissions.
    pub fn granted(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(|(_, granted)| **granted)
            .map(|(permission, _)| permission.as_str())
    }

    /// Number of entries, granted or denied.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the set has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(|p| (p.into(), true)).collect())
    }
}

impl From<BTreeMap<String, bool>> for PermissionSet {
    fn from(map: BTreeMap<String, bool>) -> Self {
        Self(map)
    }
}

/// User record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,

    /// Permission map. `None` means the request carries no permission
    /// context at all, which differs from an empty map during child
    /// filtering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<PermissionSet>,
}

impl User {
    /// Create a user with the given permissions.
    pub fn new(id: Uuid, permissions: PermissionSet) -> Self {
        Self {
            id,
            permissions: Some(permissions),
        }
    }

    /// Create a user holding every listed permission.
    pub fn with_permissions<I, S>(permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Uuid::now_v7(), permissions.into_iter().collect())
    }

    /// Create a user without a permission map.
    pub fn without_permissions(id: Uuid) -> Self {
        Self {
            id,
            permissions: None,
        }
    }

    /// Check if this is the anonymous user.
    pub fn is_anonymous(&self) -> bool {
        self.id == ANONYMOUS_USER_ID
    }

    /// Check if the user holds a permission. A missing map holds nothing.
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions
            .as_ref()
            .is_some_and(|p| p.contains(permission))
    }
}
