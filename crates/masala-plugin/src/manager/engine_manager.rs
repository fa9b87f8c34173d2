// SPDX-FileCopyrightText: 2026 Masala Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The process-wide registry of engine creators, keyed by engine name.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, OnceLock};

use masala_core::sync::lock;
use masala_core::{MasalaError, MasalaObject, Result};
use tracing::{debug, info};

use crate::criterion::{EngineRequest, RequestCriterion};
use crate::engine::{EngineApiObject, EngineCreator};

const TRACE_TARGET: &str = "masala::engine_manager";

pub struct EngineManager {
    creators: Mutex<BTreeMap<String, Arc<dyn EngineCreator>>>,
}

impl EngineManager {
    fn new() -> Self {
        Self {
            creators: Mutex::new(BTreeMap::new()),
        }
    }

    /// The process-wide instance, created on first use.
    pub fn get_instance() -> &'static EngineManager {
        static INSTANCE: OnceLock<EngineManager> = OnceLock::new();
        INSTANCE.get_or_init(EngineManager::new)
    }

    /// Create an engine by registered name.
    ///
    /// An unknown name is an error when `throw_if_missing` is set and
    /// `Ok(None)` otherwise. The creator runs after the registry lock is
    /// released.
    pub fn create_engine(
        &self,
        engine_name: &str,
        throw_if_missing: bool,
    ) -> Result<Option<Arc<dyn EngineApiObject>>> {
        let creator = lock(&self.creators).get(engine_name).cloned();
        match creator {
            Some(creator) => creator.create_engine().map(Some),
            None if throw_if_missing => Err(MasalaError::not_found(
                self.class_namespace_and_name(),
                "create_engine",
                format!("Could not find engine \"{engine_name}\".  Has it been registered?"),
            )),
            None => Ok(None),
        }
    }

    /// Register `creator` under `engine_name`.
    ///
    /// An existing registration is an error when `throw_if_present` is set
    /// and is replaced otherwise.
    pub fn register_engine(
        &self,
        engine_name: &str,
        creator: Arc<dyn EngineCreator>,
        throw_if_present: bool,
    ) -> Result<()> {
        let mut creators = lock(&self.creators);
        if throw_if_present && creators.contains_key(engine_name) {
            return Err(self.already_registered("register_engine", engine_name));
        }
        creators.insert(engine_name.to_string(), creator);
        debug!(target: TRACE_TARGET, engine = engine_name, "registered engine");
        Ok(())
    }

    /// Register several creators under their namespace-and-name. Nothing is
    /// registered if any name is taken.
    pub fn register_engines(&self, engine_creators: &[Arc<dyn EngineCreator>]) -> Result<()> {
        let mut creators = lock(&self.creators);
        let mut names = Vec::with_capacity(engine_creators.len());
        for creator in engine_creators {
            let name = creator.plugin_object_namespace_and_name();
            if creators.contains_key(&name) || names.contains(&name) {
                return Err(self.already_registered("register_engines", &name));
            }
            names.push(name);
        }
        for (name, creator) in names.into_iter().zip(engine_creators) {
            debug!(target: TRACE_TARGET, engine = %name, "registered engine");
            creators.insert(name, Arc::clone(creator));
        }
        Ok(())
    }

    /// Remove the registration for `engine_name`.
    ///
    /// A missing name is an error when `throw_if_missing` is set and a
    /// no-op otherwise.
    pub fn unregister_engine(&self, engine_name: &str, throw_if_missing: bool) -> Result<()> {
        let removed = lock(&self.creators).remove(engine_name);
        if removed.is_none() {
            if throw_if_missing {
                return Err(self.not_registered("unregister_engine", engine_name));
            }
            return Ok(());
        }
        debug!(target: TRACE_TARGET, engine = engine_name, "unregistered engine");
        Ok(())
    }

    /// Remove several creators by namespace-and-name. Nothing is removed if
    /// any of them is missing.
    pub fn unregister_engines(&self, engine_creators: &[Arc<dyn EngineCreator>]) -> Result<()> {
        let mut creators = lock(&self.creators);
        let names: Vec<String> = engine_creators
            .iter()
            .map(|creator| creator.plugin_object_namespace_and_name())
            .collect();
        if let Some(missing) = names.iter().find(|name| !creators.contains_key(*name)) {
            return Err(self.not_registered("unregister_engines", missing));
        }
        for name in names {
            creators.remove(&name);
            debug!(target: TRACE_TARGET, engine = %name, "unregistered engine");
        }
        Ok(())
    }

    /// Remove every engine.
    pub fn reset(&self) {
        let mut creators = lock(&self.creators);
        let removed = creators.len();
        creators.clear();
        info!(target: TRACE_TARGET, removed, "reset the engine manager");
    }

    pub fn total_engines(&self) -> usize {
        lock(&self.creators).len()
    }

    /// Every registered engine name, sorted.
    pub fn registered_engine_names(&self) -> Vec<String> {
        lock(&self.creators).keys().cloned().collect()
    }

    /// Creators satisfying `criterion`, in name order.
    pub fn engines_matching(
        &self,
        criterion: &dyn RequestCriterion<dyn EngineCreator>,
    ) -> Result<Vec<Arc<dyn EngineCreator>>> {
        let snapshot: Vec<Arc<dyn EngineCreator>> =
            lock(&self.creators).values().cloned().collect();
        let mut matches = Vec::new();
        for creator in snapshot {
            if criterion.evaluate(creator.as_ref())? {
                matches.push(creator);
            }
        }
        Ok(matches)
    }

    /// Creators satisfying every requirement in `request`.
    pub fn compatible_engines(&self, request: &EngineRequest) -> Result<Vec<Arc<dyn EngineCreator>>> {
        let snapshot: Vec<Arc<dyn EngineCreator>> =
            lock(&self.creators).values().cloned().collect();
        let mut matches = Vec::new();
        for creator in snapshot {
            if request.engine_is_compatible_with_criteria(creator.as_ref())? {
                matches.push(creator);
            }
        }
        Ok(matches)
    }

    fn already_registered(&self, function: &str, engine_name: &str) -> MasalaError {
        MasalaError::duplicate(
            self.class_namespace_and_name(),
            function,
            format!("Engine \"{engine_name}\" has already been registered!"),
        )
    }

    fn not_registered(&self, function: &str, engine_name: &str) -> MasalaError {
        MasalaError::not_found(
            self.class_namespace_and_name(),
            function,
            format!("No engine was registered with name \"{engine_name}\"."),
        )
    }
}

impl MasalaObject for EngineManager {
    fn class_name(&self) -> String {
        "MasalaEngineManager".into()
    }

    fn class_namespace(&self) -> String {
        "masala::base::managers::engine".into()
    }
}

impl std::fmt::Debug for EngineManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineManager")
            .field("engines", &self.registered_engine_names())
            .finish()
    }
}
