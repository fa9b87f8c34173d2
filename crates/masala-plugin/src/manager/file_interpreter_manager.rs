// SPDX-FileCopyrightText: 2026 Masala Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The process-wide registry of file-interpreter creators, indexed by name,
//! file descriptor and file extension.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, OnceLock};

use masala_core::sync::lock;
use masala_core::{MasalaError, MasalaObject, Result};
use tracing::{debug, info};

use crate::file_interpreter::{
    FileInterpreterApiObject, FileInterpreterCreator, normalize_extension,
};

const TRACE_TARGET: &str = "masala::file_interpreter_manager";

#[derive(Default)]
struct Registry {
    by_name: BTreeMap<String, Arc<dyn FileInterpreterCreator>>,
    /// Descriptor to registered names, in registration order.
    by_descriptor: BTreeMap<String, Vec<String>>,
    /// Lower-case extension to registered names, in registration order.
    by_extension: BTreeMap<String, Vec<String>>,
}

impl Registry {
    fn insert(&mut self, name: &str, creator: Arc<dyn FileInterpreterCreator>) {
        self.remove(name);
        for descriptor in creator.file_interpreter_file_descriptors() {
            index_once(&mut self.by_descriptor, descriptor, name);
        }
        for extension in creator.file_interpreter_file_extensions() {
            index_once(&mut self.by_extension, normalize_extension(&extension), name);
        }
        self.by_name.insert(name.to_string(), creator);
    }

    fn remove(&mut self, name: &str) -> bool {
        if self.by_name.remove(name).is_none() {
            return false;
        }
        for index in [&mut self.by_descriptor, &mut self.by_extension] {
            index.retain(|_, names| {
                names.retain(|n| n != name);
                !names.is_empty()
            });
        }
        true
    }

    fn lookup(&self, names: Option<&Vec<String>>) -> Vec<Arc<dyn FileInterpreterCreator>> {
        names
            .into_iter()
            .flatten()
            .filter_map(|name| self.by_name.get(name).cloned())
            .collect()
    }
}

fn index_once(index: &mut BTreeMap<String, Vec<String>>, key: String, name: &str) {
    if key.is_empty() {
        return;
    }
    let names = index.entry(key).or_default();
    if !names.iter().any(|n| n == name) {
        names.push(name.to_string());
    }
}

pub struct FileInterpreterManager {
    registry: Mutex<Registry>,
}

impl FileInterpreterManager {
    fn new() -> Self {
        Self {
            registry: Mutex::new(Registry::default()),
        }
    }

    /// The process-wide instance, created on first use.
    pub fn get_instance() -> &'static FileInterpreterManager {
        static INSTANCE: OnceLock<FileInterpreterManager> = OnceLock::new();
        INSTANCE.get_or_init(FileInterpreterManager::new)
    }

    /// Remove every file interpreter.
    pub fn reset(&self) {
        let mut registry = lock(&self.registry);
        let removed = registry.by_name.len();
        *registry = Registry::default();
        info!(
            target: TRACE_TARGET,
            removed,
            "reset the file interpreter manager; no file interpreters are registered"
        );
    }

    pub fn total_file_interpreters(&self) -> usize {
        lock(&self.registry).by_name.len()
    }

    /// Every registered name, sorted.
    pub fn registered_file_interpreter_names(&self) -> Vec<String> {
        lock(&self.registry).by_name.keys().cloned().collect()
    }

    /// Register `creator` under `name`.
    ///
    /// An existing registration is an error when `throw_if_present` is set
    /// and is replaced, indexes included, otherwise.
    pub fn register_file_interpreter(
        &self,
        name: &str,
        creator: Arc<dyn FileInterpreterCreator>,
        throw_if_present: bool,
    ) -> Result<()> {
        let mut registry = lock(&self.registry);
        if throw_if_present && registry.by_name.contains_key(name) {
            return Err(self.already_registered("register_file_interpreter", name));
        }
        registry.insert(name, creator);
        debug!(target: TRACE_TARGET, file_interpreter = name, "registered file interpreter");
        Ok(())
    }

    /// Register several creators under their namespace-and-name. Nothing is
    /// registered if any name is taken.
    pub fn register_file_interpreters(
        &self,
        creators: &[Arc<dyn FileInterpreterCreator>],
    ) -> Result<()> {
        let mut registry = lock(&self.registry);
        let mut names = Vec::with_capacity(creators.len());
        for creator in creators {
            let name = creator.plugin_object_namespace_and_name();
            if registry.by_name.contains_key(&name) || names.contains(&name) {
                return Err(self.already_registered("register_file_interpreters", &name));
            }
            names.push(name);
        }
        for (name, creator) in names.iter().zip(creators) {
            registry.insert(name, Arc::clone(creator));
            debug!(target: TRACE_TARGET, file_interpreter = %name, "registered file interpreter");
        }
        Ok(())
    }

    /// Remove the registration for `name`.
    ///
    /// A missing name is an error when `throw_if_missing` is set and a
    /// no-op otherwise.
    pub fn unregister_file_interpreter(&self, name: &str, throw_if_missing: bool) -> Result<()> {
        if !lock(&self.registry).remove(name) {
            if throw_if_missing {
                return Err(self.not_registered("unregister_file_interpreter", name));
            }
            return Ok(());
        }
        debug!(target: TRACE_TARGET, file_interpreter = name, "unregistered file interpreter");
        Ok(())
    }

    /// Remove several creators by namespace-and-name. Nothing is removed if
    /// any of them is missing.
    pub fn unregister_file_interpreters(
        &self,
        creators: &[Arc<dyn FileInterpreterCreator>],
    ) -> Result<()> {
        let mut registry = lock(&self.registry);
        let names: Vec<String> = creators
            .iter()
            .map(|creator| creator.plugin_object_namespace_and_name())
            .collect();
        if let Some(missing) = names.iter().find(|name| !registry.by_name.contains_key(*name)) {
            return Err(self.not_registered("unregister_file_interpreters", missing));
        }
        for name in &names {
            registry.remove(name);
            debug!(target: TRACE_TARGET, file_interpreter = %name, "unregistered file interpreter");
        }
        Ok(())
    }

    /// Create a file interpreter by registered name.
    pub fn create_file_interpreter(
        &self,
        name: &str,
        throw_if_missing: bool,
    ) -> Result<Option<Arc<dyn FileInterpreterApiObject>>> {
        let creator = lock(&self.registry).by_name.get(name).cloned();
        match creator {
            Some(creator) => creator.create_file_interpreter().map(Some),
            None if throw_if_missing => Err(MasalaError::not_found(
                self.class_namespace_and_name(),
                "create_file_interpreter",
                format!("Could not find file interpreter \"{name}\".  Has it been registered?"),
            )),
            None => Ok(None),
        }
    }

    /// Creators handling files with `extension`, matched without case and
    /// with or without a leading dot, in registration order.
    pub fn file_interpreters_for_extension(
        &self,
        extension: &str,
    ) -> Vec<Arc<dyn FileInterpreterCreator>> {
        let extension = normalize_extension(extension);
        let registry = lock(&self.registry);
        registry.lookup(registry.by_extension.get(&extension))
    }

    /// Creators handling files described by `descriptor`, in registration
    /// order.
    pub fn file_interpreters_for_descriptor(
        &self,
        descriptor: &str,
    ) -> Vec<Arc<dyn FileInterpreterCreator>> {
        let registry = lock(&self.registry);
        registry.lookup(registry.by_descriptor.get(descriptor))
    }

    /// Every known file extension, sorted.
    pub fn all_file_extensions(&self) -> Vec<String> {
        lock(&self.registry).by_extension.keys().cloned().collect()
    }

    /// Every known file descriptor, sorted.
    pub fn all_file_descriptors(&self) -> Vec<String> {
        lock(&self.registry).by_descriptor.keys().cloned().collect()
    }

    fn already_registered(&self, function: &str, name: &str) -> MasalaError {
        MasalaError::duplicate(
            self.class_namespace_and_name(),
            function,
            format!(
                "The {name} file interpreter has already been registered with the \
                 MasalaFileInterpreterManager!"
            ),
        )
    }

    fn not_registered(&self, function: &str, name: &str) -> MasalaError {
        MasalaError::not_found(
            self.class_namespace_and_name(),
            function,
            format!(
                "The {name} file interpreter has not been registered with the \
                 MasalaFileInterpreterManager!"
            ),
        )
    }
}

impl MasalaObject for FileInterpreterManager {
    fn class_name(&self) -> String {
        "MasalaFileInterpreterManager".into()
    }

    fn class_namespace(&self) -> String {
        "masala::base::managers::file_interpreter".into()
    }
}

impl std::fmt::Debug for FileInterpreterManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileInterpreterManager")
            .field("file_interpreters", &self.registered_file_interpreter_names())
            .finish()
    }
}
