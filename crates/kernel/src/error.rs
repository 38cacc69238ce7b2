//! Configuration error types.
//!
//! The navigation engine itself never fails; unknown modules and broken
//! references degrade to "inaccessible". These issues are reported by
//! [`ConfigurationStore::validate`](crate::ConfigurationStore::validate) and
//! turned into load errors where they would make the menu ambiguous.

use thiserror::Error;

/// A structural problem in the menu configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigIssue {
    #[error("module at position {0} has an empty name")]
    EmptyModuleName(usize),

    #[error("module '{module}' depends on '{dependency}' which is not defined")]
    UnknownDependency { module: String, dependency: String },

    #[error("circular dependency detected involving modules: {}", .0.join(", "))]
    DependencyCycle(Vec<String>),

    #[error("permission '{permission}' is declared by both '{first}' and '{second}'")]
    DuplicatePermission {
        permission: String,
        first: String,
        second: String,
    },
}

impl ConfigIssue {
    /// Whether the issue makes the configuration unusable.
    ///
    /// Unknown dependencies only make the dependent module inaccessible, so
    /// they are tolerated.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ConfigIssue::UnknownDependency { .. })
    }
}
