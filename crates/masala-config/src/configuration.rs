// SPDX-FileCopyrightText: 2026 Masala Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Memoized configuration objects, one per key.
//!
//! A configuration is built the first time its key is requested and shared
//! for the rest of the process, so each configuration source is read at
//! most once.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::sync::{Arc, Mutex, OnceLock};

use masala_core::sync::lock;
use masala_core::{MasalaObject, Result};
use tracing::debug;

const TRACE_TARGET: &str = "masala::configuration_manager";

/// A loaded, immutable configuration object.
pub trait ConfigurationBase: Debug + Send + Sync + 'static {
    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<T: Debug + Send + Sync + 'static> ConfigurationBase for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

/// Proof that a configuration is being built on behalf of the
/// [`ConfigurationManager`]. Only the manager can make one.
#[derive(Debug)]
pub struct AuthorizationToken {
    _private: (),
}

pub struct ConfigurationManager {
    settings: Mutex<BTreeMap<String, Arc<dyn ConfigurationBase>>>,
}

impl ConfigurationManager {
    fn new() -> Self {
        Self {
            settings: Mutex::new(BTreeMap::new()),
        }
    }

    /// The process-wide instance, created on first use.
    pub fn get_instance() -> &'static ConfigurationManager {
        static INSTANCE: OnceLock<ConfigurationManager> = OnceLock::new();
        INSTANCE.get_or_init(ConfigurationManager::new)
    }

    /// The configuration stored under `unique_key`, built by `creator` on
    /// first request.
    ///
    /// The manager's lock is held while `creator` runs, so concurrent
    /// first requests build once. `creator` must not request another
    /// configuration. A failed build stores nothing.
    pub fn get_configuration_settings(
        &self,
        unique_key: &str,
        creator: impl FnOnce(&AuthorizationToken) -> Result<Arc<dyn ConfigurationBase>>,
    ) -> Result<Arc<dyn ConfigurationBase>> {
        let mut settings = lock(&self.settings);
        if let Some(existing) = settings.get(unique_key) {
            return Ok(Arc::clone(existing));
        }
        debug!(target: TRACE_TARGET, key = unique_key, "loading configuration");
        let created = creator(&AuthorizationToken { _private: () })?;
        settings.insert(unique_key.to_string(), Arc::clone(&created));
        Ok(created)
    }

    /// As [`get_configuration_settings`](Self::get_configuration_settings),
    /// for a configuration of concrete type `T`.
    ///
    /// Fails if `unique_key` already holds a configuration of another type.
    pub fn get_typed_configuration<T: ConfigurationBase>(
        &self,
        unique_key: &str,
        creator: impl FnOnce(&AuthorizationToken) -> Result<T>,
    ) -> Result<Arc<T>> {
        let stored = self.get_configuration_settings(unique_key, |token| {
            let created: Arc<dyn ConfigurationBase> = Arc::new(creator(token)?);
            Ok(created)
        })?;
        stored.into_any().downcast::<T>().map_err(|_| {
            self.contract_error(
                "get_typed_configuration",
                format!(
                    "The configuration stored under \"{unique_key}\" is not a {}.",
                    std::any::type_name::<T>()
                ),
            )
        })
    }

    pub fn has_configuration(&self, unique_key: &str) -> bool {
        lock(&self.settings).contains_key(unique_key)
    }

    pub fn n_configurations(&self) -> usize {
        lock(&self.settings).len()
    }

    /// Forget every stored configuration. For tests.
    pub fn reset(&self) {
        lock(&self.settings).clear();
    }
}

impl MasalaObject for ConfigurationManager {
    fn class_name(&self) -> String {
        "MasalaConfigurationManager".into()
    }

    fn class_namespace(&self) -> String {
        "masala::base::managers::configuration".into()
    }
}

impl Debug for ConfigurationManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigurationManager")
            .field("keys", &lock(&self.settings).keys().collect::<Vec<_>>())
            .finish()
    }
}
