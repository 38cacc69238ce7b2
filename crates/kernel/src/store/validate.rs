//! Structural validation of the configuration store.
//!
//! Dependency cycles are found with Kahn's algorithm: modules whose
//! dependencies can all be ordered first are peeled off, and whatever is
//! left over sits on (or behind) a cycle.

use std::collections::{HashMap, HashSet, VecDeque};

use super::ConfigurationStore;
use crate::error::ConfigIssue;

/// Issues found by [`ConfigurationStore::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub issues: Vec<ConfigIssue>,
}

impl ValidationReport {
    /// Check if no issues were found.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Issues that make the configuration unusable.
    pub fn errors(&self) -> impl Iterator<Item = &ConfigIssue> {
        self.issues.iter().filter(|i| i.is_fatal())
    }

    /// Issues that are tolerated.
    pub fn warnings(&self) -> impl Iterator<Item = &ConfigIssue> {
        self.issues.iter().filter(|i| !i.is_fatal())
    }
}

impl ConfigurationStore {
    /// Check the store for structural problems.
    pub fn validate(&self) -> ValidationReport {
        let mut issues = Vec::new();

        for (position, module) in self.modules().enumerate() {
            if module.name.trim().is_empty() {
                issues.push(ConfigIssue::EmptyModuleName(position));
            }
            for dependency in &module.depends_on {
                if !self.contains(dependency) {
                    issues.push(ConfigIssue::UnknownDependency {
                        module: module.name.clone(),
                        dependency: dependency.clone(),
                    });
                }
            }
        }

        issues.extend(duplicate_permissions(self));

        if let Some(cycle) = find_cycle(self) {
            issues.push(ConfigIssue::DependencyCycle(cycle));
        }

        ValidationReport { issues }
    }
}

fn duplicate_permissions(store: &ConfigurationStore) -> Vec<ConfigIssue> {
    let mut owners: HashMap<&str, &str> = HashMap::new();
    let mut issues = Vec::new();

    for module in store.modules() {
        for item in module.items() {
            if item.permission.is_empty() {
                continue;
            }
            if let Some(first) = owners.insert(&item.permission, &module.name) {
                issues.push(ConfigIssue::DuplicatePermission {
                    permission: item.permission.clone(),
                    first: first.to_string(),
                    second: module.name.clone(),
                });
            }
        }
    }

    issues
}

/// Return the modules that cannot be ordered, in declaration order.
///
/// Dependencies on undefined modules are ignored here.
fn find_cycle(store: &ConfigurationStore) -> Option<Vec<String>> {
    // in_degree[m] = number of defined modules m depends on
    let mut in_degree: HashMap<&str, usize> = HashMap::new();
    let mut dependents: HashMap<&str, Vec<&str>> = HashMap::new();

    for module in store.modules() {
        let deps: HashSet<&str> = module
            .depends_on
            .iter()
            .map(|d| d.as_str())
            .filter(|d| store.contains(d))
            .collect();

        in_degree.insert(&module.name, deps.len());
        for dep in deps {
            dependents.entry(dep).or_default().push(&module.name);
        }
    }

    let mut queue: VecDeque<&str> = store
        .module_names()
        .filter(|name| in_degree.get(name) == Some(&0))
        .collect();
    let mut ordered: HashSet<&str> = HashSet::new();

    while let Some(module) = queue.pop_front() {
        ordered.insert(module);

        for dependent in dependents.get(module).into_iter().flatten() {
            if let Some(degree) = in_degree.get_mut(dependent) {
                *degree -= 1;
                if *degree == 0 {
                    queue.push_back(*dependent);
                }
            }
        }
    }

    if ordered.len() == store.len() {
        return None;
    }

    Some(
        store
            .module_names()
            .filter(|name| !ordered.contains(name))
            .map(String::from)
            .collect(),
    )
}
