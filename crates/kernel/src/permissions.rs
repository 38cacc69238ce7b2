//! Module access evaluation.
//!
//! A module is accessible when it is public, or when the caller holds at
//! least one of its permissions and satisfies each of its direct
//! dependencies. Dependencies are checked one hop deep: a dependency's own
//! dependencies only matter when that module is evaluated itself.

use tracing::trace;

use crate::derived::DerivedMaps;
use crate::models::User;
use crate::store::ConfigurationStore;

/// Access checks against one store snapshot.
#[derive(Debug, Clone, Copy)]
pub struct AccessEvaluator<'a> {
    store: &'a ConfigurationStore,
    derived: &'a DerivedMaps,
}

impl<'a> AccessEvaluator<'a> {
    /// Create an evaluator over a store and its derived maps.
    pub fn new(store: &'a ConfigurationStore, derived: &'a DerivedMaps) -> Self {
        Self { store, derived }
    }

    /// Check if the user holds at least one of the module's permissions.
    ///
    /// Unknown modules and users without a permission map hold nothing.
    pub fn has_any_permission(&self, user: &User, module: &str) -> bool {
        self.derived
            .module_permissions(module)
            .any(|permission| user.has_permission(permission))
    }

    /// Check if a module is visible to the caller.
    ///
    /// - Unknown modules are inaccessible.
    /// - Public modules are accessible to everyone, including anonymous callers.
    /// - Otherwise a user is required, every direct dependency must be public
    ///   or partially held, and the user must hold a permission of the module.
    pub fn is_module_accessible(&self, user: Option<&User>, module: &str) -> bool {
        let Some(definition) = self.store.get(module) else {
            return false;
        };

        if definition.public_access {
            return true;
        }

        let Some(user) = user else {
            return false;
        };

        for dependency in &definition.depends_on {
            if !self.dependency_satisfied(user, dependency) {
                trace!(module = %module, dependency = %dependency, "dependency not satisfied");
                return false;
            }
        }

        self.has_any_permission(user, module)
    }

    /// A missing dependency counts as a non-public module nobody can hold.
    fn dependency_satisfied(&self, user: &User, dependency: &str) -> bool {
        match self.store.get(dependency) {
            Some(module) if module.public_access => true,
            Some(_) => self.has_any_permission(user, dependency),
            None => false,
        }
    }
}
