// SPDX-FileCopyrightText: 2026 Masala Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cached access to environment variables.

use std::collections::BTreeMap;
use std::sync::{Mutex, OnceLock};

use masala_core::sync::lock;
use masala_core::{MasalaError, MasalaObject, Result};
use tracing::debug;

const TRACE_TARGET: &str = "masala::environment_manager";

/// Reads each environment variable from the OS once and answers later
/// queries from the cache, including for variables that were unset.
pub struct EnvironmentManager {
    variables: Mutex<BTreeMap<String, Option<String>>>,
}

impl EnvironmentManager {
    fn new() -> Self {
        Self {
            variables: Mutex::new(BTreeMap::new()),
        }
    }

    /// The process-wide instance, created on first use.
    pub fn get_instance() -> &'static EnvironmentManager {
        static INSTANCE: OnceLock<EnvironmentManager> = OnceLock::new();
        INSTANCE.get_or_init(EnvironmentManager::new)
    }

    /// `(true, value)` if `name` was set on first query, `(false, "")`
    /// otherwise. A value that is not valid Unicode is converted lossily.
    pub fn get_environment_variable(&self, name: &str) -> (bool, String) {
        let mut variables = lock(&self.variables);
        let value = variables.entry(name.to_string()).or_insert_with(|| {
            let value = std::env::var_os(name).map(|v| v.to_string_lossy().into_owned());
            debug!(target: TRACE_TARGET, variable = name, found = value.is_some(), "read environment variable");
            value
        });
        match value {
            Some(value) => (true, value.clone()),
            None => (false, String::new()),
        }
    }

    /// The value of `name`, or a resource error if it is unset.
    pub fn required_environment_variable(&self, name: &str) -> Result<String> {
        match self.get_environment_variable(name) {
            (true, value) => Ok(value),
            (false, _) => Err(MasalaError::resource(
                self.class_namespace_and_name(),
                "required_environment_variable",
                format!("The environment variable \"{name}\" is not set."),
                None,
            )),
        }
    }

    /// Forget every cached value so the next query reads the OS again.
    pub fn reset(&self) {
        lock(&self.variables).clear();
    }
}

impl MasalaObject for EnvironmentManager {
    fn class_name(&self) -> String {
        "MasalaEnvironmentManager".into()
    }

    fn class_namespace(&self) -> String {
        "masala::base::managers::environment".into()
    }
}

impl std::fmt::Debug for EnvironmentManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvironmentManager")
            .field("cached", &lock(&self.variables).len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARIABLE: &str = "MASALA_ENVIRONMENT_MANAGER_UNIT_TEST";

    #[test]
    #[serial]
    fn unset_variable_stays_cached_as_unset() {
        let manager = EnvironmentManager::new();
        // SAFETY: serialized with every other test that touches the environment.
        unsafe { std::env::remove_var(VARIABLE) };
        assert_eq!(manager.get_environment_variable(VARIABLE), (false, String::new()));

        unsafe { std::env::set_var(VARIABLE, "late") };
        assert_eq!(manager.get_environment_variable(VARIABLE), (false, String::new()));
        assert!(manager.required_environment_variable(VARIABLE).is_err());

        manager.reset();
        assert_eq!(manager.get_environment_variable(VARIABLE), (true, "late".to_string()));
        unsafe { std::env::remove_var(VARIABLE) };
    }

    #[test]
    #[serial]
    fn set_value_is_not_reread() {
        let manager = EnvironmentManager::new();
        unsafe { std::env::set_var(VARIABLE, "first") };
        assert_eq!(manager.required_environment_variable(VARIABLE).unwrap(), "first");
        unsafe { std::env::set_var(VARIABLE, "second") };
        assert_eq!(manager.required_environment_variable(VARIABLE).unwrap(), "first");
        unsafe { std::env::remove_var(VARIABLE) };
    }
}
