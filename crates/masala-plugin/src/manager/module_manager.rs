// SPDX-FileCopyrightText: 2026 Masala Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The process-wide registry of every plugin creator, keyed by manager key.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex, OnceLock};

use masala_core::sync::lock;
use masala_core::types::{CategoryPath, category_matches};
use masala_core::{MasalaError, MasalaObject, Result};
use tracing::{debug, info};

use crate::creator::PluginCreator;
use crate::criterion::RequestCriterion;
use crate::plugin_api::PluginApiObject;

const TRACE_TARGET: &str = "masala::plugin_module_manager";

/// Registry of plugin creators.
///
/// Keys come from [`PluginCreator::plugin_object_manager_key`]. Category and
/// keyword queries scan the map; registries hold tens to hundreds of
/// entries.
pub struct PluginModuleManager {
    plugins: Mutex<BTreeMap<String, Arc<dyn PluginCreator>>>,
}

impl PluginModuleManager {
    fn new() -> Self {
        Self {
            plugins: Mutex::new(BTreeMap::new()),
        }
    }

    /// The process-wide instance, created on first use.
    pub fn get_instance() -> &'static PluginModuleManager {
        static INSTANCE: OnceLock<PluginModuleManager> = OnceLock::new();
        INSTANCE.get_or_init(PluginModuleManager::new)
    }

    /// Remove every plugin.
    pub fn reset(&self) {
        lock(&self.plugins).clear();
        info!(
            target: TRACE_TARGET,
            "reset the plugin module manager; no plugins are registered"
        );
    }

    pub fn total_plugins(&self) -> usize {
        lock(&self.plugins).len()
    }

    pub fn has_plugin(&self, creator: &dyn PluginCreator) -> Result<bool> {
        let key = creator.plugin_object_manager_key()?;
        Ok(lock(&self.plugins).contains_key(&key))
    }

    pub fn has_any_plugin(&self, creators: &[Arc<dyn PluginCreator>]) -> Result<bool> {
        let keys = manager_keys(creators)?;
        let plugins = lock(&self.plugins);
        Ok(keys.iter().any(|key| plugins.contains_key(key)))
    }

    /// Fails if a plugin with the same key is already present.
    pub fn add_plugin(&self, creator: Arc<dyn PluginCreator>) -> Result<()> {
        self.add_plugins(&[creator])
    }

    /// Add several plugins. Nothing is added if any of them is already
    /// present or appears twice in `creators`.
    pub fn add_plugins(&self, creators: &[Arc<dyn PluginCreator>]) -> Result<()> {
        let keys = manager_keys(creators)?;
        let mut plugins = lock(&self.plugins);
        let mut seen = BTreeSet::new();
        for (key, creator) in keys.iter().zip(creators) {
            if plugins.contains_key(key) || !seen.insert(key.as_str()) {
                return Err(MasalaError::duplicate(
                    self.class_namespace_and_name(),
                    "add_plugins",
                    format!(
                        "Plugin \"{}\" has already been added to the plugin manager.",
                        creator.plugin_object_namespace_and_name()
                    ),
                ));
            }
        }
        for (key, creator) in keys.into_iter().zip(creators) {
            plugins.insert(key, Arc::clone(creator));
            debug!(
                target: TRACE_TARGET,
                plugin = %creator.plugin_object_namespace_and_name(),
                "added plugin"
            );
        }
        Ok(())
    }

    /// Fails if the plugin is not present.
    pub fn remove_plugin(&self, creator: &dyn PluginCreator) -> Result<()> {
        let key = creator.plugin_object_manager_key()?;
        let mut plugins = lock(&self.plugins);
        if plugins.remove(&key).is_none() {
            return Err(self.missing_plugin("remove_plugin", creator));
        }
        debug!(
            target: TRACE_TARGET,
            plugin = %creator.plugin_object_namespace_and_name(),
            "removed plugin"
        );
        Ok(())
    }

    /// Remove several plugins. Nothing is removed if any of them is absent.
    pub fn remove_plugins(&self, creators: &[Arc<dyn PluginCreator>]) -> Result<()> {
        let keys = manager_keys(creators)?;
        let mut plugins = lock(&self.plugins);
        for (key, creator) in keys.iter().zip(creators) {
            if !plugins.contains_key(key) {
                return Err(self.missing_plugin("remove_plugins", creator.as_ref()));
            }
        }
        for (key, creator) in keys.iter().zip(creators) {
            plugins.remove(key);
            debug!(
                target: TRACE_TARGET,
                plugin = %creator.plugin_object_namespace_and_name(),
                "removed plugin"
            );
        }
        Ok(())
    }

    /// Every manager key, sorted.
    pub fn all_plugin_list(&self) -> Vec<String> {
        lock(&self.plugins).keys().cloned().collect()
    }

    /// Every category known to the manager, including each parent of a
    /// declared category, sorted.
    pub fn all_categories(&self) -> Vec<CategoryPath> {
        let plugins = lock(&self.plugins);
        let mut categories = BTreeSet::new();
        for creator in plugins.values() {
            for category in creator.plugin_object_categories() {
                for depth in 1..=category.len() {
                    categories.insert(category[..depth].to_vec());
                }
            }
        }
        categories.into_iter().collect()
    }

    /// Every keyword known to the manager, sorted.
    pub fn all_keywords(&self) -> Vec<String> {
        let plugins = lock(&self.plugins);
        plugins
            .values()
            .flat_map(|creator| creator.plugin_object_keywords())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Names of the plugins with `keyword`. Fails if no plugin has it.
    pub fn plugins_by_keyword(&self, keyword: &str, include_namespace: bool) -> Result<Vec<String>> {
        let names = self.names_where(include_namespace, |creator| {
            creator.plugin_object_keywords().iter().any(|k| k == keyword)
        });
        if names.is_empty() {
            return Err(MasalaError::not_found(
                self.class_namespace_and_name(),
                "plugins_by_keyword",
                format!("Keyword \"{keyword}\" not found!"),
            ));
        }
        Ok(names)
    }

    /// Names of the plugins having every keyword in `keywords`.
    ///
    /// Fails if `keywords` is empty, if the first keyword is unknown, or if
    /// no plugin has them all.
    pub fn plugins_by_keywords(
        &self,
        keywords: &[String],
        include_namespace: bool,
    ) -> Result<Vec<String>> {
        let Some(first) = keywords.first() else {
            return Err(self.contract_error(
                "plugins_by_keywords",
                "No keywords were provided to this function!".into(),
            ));
        };
        self.plugins_by_keyword(first, include_namespace)?;
        let names = self.names_where(include_namespace, |creator| {
            let have = creator.plugin_object_keywords();
            keywords.iter().all(|k| have.contains(k))
        });
        if names.is_empty() {
            return Err(MasalaError::not_found(
                self.class_namespace_and_name(),
                "plugins_by_keywords",
                "No plugins were found containing all specified keywords.",
            ));
        }
        Ok(names)
    }

    /// Names of the plugins in `category`, or under it when
    /// `include_subcategories` is set. An unknown category yields an empty
    /// list.
    pub fn plugins_by_category(
        &self,
        category: &[String],
        include_subcategories: bool,
        include_namespace: bool,
    ) -> Result<Vec<String>> {
        if category.is_empty() {
            return Err(self.contract_error(
                "plugins_by_category",
                "No category was provided to this function!".into(),
            ));
        }
        Ok(self.names_where(include_namespace, |creator| {
            creator
                .plugin_object_categories()
                .iter()
                .any(|c| category_matches(c, category, include_subcategories))
        }))
    }

    /// Create an instance of the plugin `plugin_name` (namespace and name)
    /// found in `category` or any of its subcategories.
    pub fn create_plugin_object_instance_by_category(
        &self,
        category: &[String],
        plugin_name: &str,
    ) -> Result<Arc<dyn PluginApiObject>> {
        let in_category: Vec<Arc<dyn PluginCreator>> = self.creators_where(|creator| {
            creator
                .plugin_object_categories()
                .iter()
                .any(|c| category_matches(c, category, true))
        });
        let listed = category.join(", ");
        if in_category.is_empty() {
            return Err(MasalaError::not_found(
                self.class_namespace_and_name(),
                "create_plugin_object_instance_by_category",
                format!(
                    "Could not find plugin category [ {listed} ] when attempting to create a \
                     plugin instance of type \"{plugin_name}\"."
                ),
            ));
        }
        let creator = in_category
            .into_iter()
            .find(|creator| creator.plugin_object_namespace_and_name() == plugin_name)
            .ok_or_else(|| {
                MasalaError::not_found(
                    self.class_namespace_and_name(),
                    "create_plugin_object_instance_by_category",
                    format!(
                        "Could not find a plugin with name \"{plugin_name}\" in category [ {listed} ]."
                    ),
                )
            })?;
        debug!(target: TRACE_TARGET, plugin = plugin_name, "creating plugin instance");
        creator.create_plugin_object()
    }

    /// Create an instance of the plugin `plugin_name` (namespace and name)
    /// having `keyword`.
    pub fn create_plugin_object_instance_by_keyword(
        &self,
        keyword: &str,
        plugin_name: &str,
    ) -> Result<Arc<dyn PluginApiObject>> {
        let with_keyword: Vec<Arc<dyn PluginCreator>> = self.creators_where(|creator| {
            creator.plugin_object_keywords().iter().any(|k| k == keyword)
        });
        if with_keyword.is_empty() {
            return Err(MasalaError::not_found(
                self.class_namespace_and_name(),
                "create_plugin_object_instance_by_keyword",
                format!(
                    "Could not find plugin keyword \"{keyword}\" when attempting to create a \
                     plugin instance of type \"{plugin_name}\"."
                ),
            ));
        }
        let creator = with_keyword
            .into_iter()
            .find(|creator| creator.plugin_object_namespace_and_name() == plugin_name)
            .ok_or_else(|| {
                MasalaError::not_found(
                    self.class_namespace_and_name(),
                    "create_plugin_object_instance_by_keyword",
                    format!(
                        "Could not find a plugin with name \"{plugin_name}\" and keyword \"{keyword}\"."
                    ),
                )
            })?;
        debug!(target: TRACE_TARGET, plugin = plugin_name, "creating plugin instance");
        creator.create_plugin_object()
    }

    /// Creators satisfying `criterion`, in key order.
    pub fn plugins_matching(
        &self,
        criterion: &dyn RequestCriterion<dyn PluginCreator>,
    ) -> Result<Vec<Arc<dyn PluginCreator>>> {
        let mut matches = Vec::new();
        for creator in self.creators_where(|_| true) {
            if criterion.evaluate(creator.as_ref())? {
                matches.push(creator);
            }
        }
        Ok(matches)
    }

    fn creators_where(
        &self,
        keep: impl Fn(&dyn PluginCreator) -> bool,
    ) -> Vec<Arc<dyn PluginCreator>> {
        lock(&self.plugins)
            .values()
            .filter(|creator| keep(creator.as_ref()))
            .cloned()
            .collect()
    }

    fn names_where(
        &self,
        include_namespace: bool,
        keep: impl Fn(&dyn PluginCreator) -> bool,
    ) -> Vec<String> {
        self.creators_where(keep)
            .iter()
            .map(|creator| {
                if include_namespace {
                    creator.plugin_object_namespace_and_name()
                } else {
                    creator.plugin_object_name()
                }
            })
            .collect()
    }

    fn missing_plugin(&self, function: &str, creator: &dyn PluginCreator) -> MasalaError {
        MasalaError::not_found(
            self.class_namespace_and_name(),
            function,
            format!(
                "Plugin \"{}\" is not present in the plugin manager.",
                creator.plugin_object_namespace_and_name()
            ),
        )
    }
}

fn manager_keys(creators: &[Arc<dyn PluginCreator>]) -> Result<Vec<String>> {
    creators
        .iter()
        .map(|creator| creator.plugin_object_manager_key())
        .collect()
}

impl MasalaObject for PluginModuleManager {
    fn class_name(&self) -> String {
        "MasalaPluginModuleManager".into()
    }

    fn class_namespace(&self) -> String {
        "masala::base::managers::plugin_module".into()
    }
}

impl std::fmt::Debug for PluginModuleManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginModuleManager")
            .field("plugins", &self.all_plugin_list())
            .finish()
    }
}
