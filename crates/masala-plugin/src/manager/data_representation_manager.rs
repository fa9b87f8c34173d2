// SPDX-FileCopyrightText: 2026 Masala Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The process-wide registry of data-representation creators, and the
//! queries engines use to pick a representation.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, OnceLock};

use masala_core::sync::lock;
use masala_core::types::{CategoryPath, split_namespace_and_name};
use masala_core::{MasalaError, MasalaObject, Result};
use strum::Display;
use tracing::{debug, info};

use crate::criterion::DataRepresentationRequest;
use crate::criterion::name::class_names_match;
use crate::data_representation::{DataRepresentationApiObject, DataRepresentationCreator};
use crate::engine::EngineApiObject;

const TRACE_TARGET: &str = "masala::data_representation_manager";

/// How a data-representation query for an engine was satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum DataRepresentationRequestResult {
    /// Nothing in the requested categories can be used.
    RequestReturnedNoResults,
    /// Representations that declare the engine compatible.
    RequestReturnedTypesCompatibleWithEngine,
    /// Representations the engine does not reject, none declaring it.
    RequestReturnedTypesNotIncompatibleWithEngine,
    /// Preferred representations that declare the engine compatible.
    RequestReturnedPreferredTypesCompatibleWithEngine,
    /// Preferred representations the engine does not reject.
    RequestReturnedPreferredTypesNotIncompatibleWithEngine,
}

pub struct DataRepresentationManager {
    creators: Mutex<BTreeMap<String, Arc<dyn DataRepresentationCreator>>>,
}

impl DataRepresentationManager {
    fn new() -> Self {
        Self {
            creators: Mutex::new(BTreeMap::new()),
        }
    }

    /// The process-wide instance, created on first use.
    pub fn get_instance() -> &'static DataRepresentationManager {
        static INSTANCE: OnceLock<DataRepresentationManager> = OnceLock::new();
        INSTANCE.get_or_init(DataRepresentationManager::new)
    }

    /// Create a data representation by registered name.
    ///
    /// An unknown name is an error when `throw_if_missing` is set and
    /// `Ok(None)` otherwise.
    pub fn create_data_representation(
        &self,
        name: &str,
        throw_if_missing: bool,
    ) -> Result<Option<Arc<dyn DataRepresentationApiObject>>> {
        let creator = lock(&self.creators).get(name).cloned();
        self.create_from("create_data_representation", name, creator, throw_if_missing)
    }

    /// As [`create_data_representation`](Self::create_data_representation),
    /// matching the short class name of each registered name. The first
    /// match in name order wins.
    pub fn create_data_representation_by_short_name(
        &self,
        short_name: &str,
        throw_if_missing: bool,
    ) -> Result<Option<Arc<dyn DataRepresentationApiObject>>> {
        let creator = lock(&self.creators)
            .iter()
            .find(|(name, _)| split_namespace_and_name(name).1 == short_name)
            .map(|(_, creator)| Arc::clone(creator));
        self.create_from(
            "create_data_representation_by_short_name",
            short_name,
            creator,
            throw_if_missing,
        )
    }

    fn create_from(
        &self,
        function: &str,
        name: &str,
        creator: Option<Arc<dyn DataRepresentationCreator>>,
        throw_if_missing: bool,
    ) -> Result<Option<Arc<dyn DataRepresentationApiObject>>> {
        match creator {
            Some(creator) => creator.create_data_representation().map(Some),
            None if throw_if_missing => Err(MasalaError::not_found(
                self.class_namespace_and_name(),
                function,
                format!("Could not find data representation \"{name}\".  Has it been registered?"),
            )),
            None => Ok(None),
        }
    }

    /// Register `creator` under `name`.
    ///
    /// An existing registration is an error when `throw_if_present` is set
    /// and is replaced otherwise.
    pub fn register_data_representation(
        &self,
        name: &str,
        creator: Arc<dyn DataRepresentationCreator>,
        throw_if_present: bool,
    ) -> Result<()> {
        let mut creators = lock(&self.creators);
        if throw_if_present && creators.contains_key(name) {
            return Err(self.already_registered("register_data_representation", name));
        }
        creators.insert(name.to_string(), creator);
        debug!(target: TRACE_TARGET, data_representation = name, "registered data representation");
        Ok(())
    }

    /// Register several creators under their namespace-and-name. Nothing is
    /// registered if any name is taken.
    pub fn register_data_representations(
        &self,
        new_creators: &[Arc<dyn DataRepresentationCreator>],
    ) -> Result<()> {
        let mut creators = lock(&self.creators);
        let mut names = Vec::with_capacity(new_creators.len());
        for creator in new_creators {
            let name = creator.plugin_object_namespace_and_name();
            if creators.contains_key(&name) || names.contains(&name) {
                return Err(self.already_registered("register_data_representations", &name));
            }
            names.push(name);
        }
        for (name, creator) in names.into_iter().zip(new_creators) {
            debug!(target: TRACE_TARGET, data_representation = %name, "registered data representation");
            creators.insert(name, Arc::clone(creator));
        }
        Ok(())
    }

    /// Remove the registration for `name`.
    ///
    /// A missing name is an error when `throw_if_missing` is set and a
    /// no-op otherwise.
    pub fn unregister_data_representation(&self, name: &str, throw_if_missing: bool) -> Result<()> {
        if lock(&self.creators).remove(name).is_none() {
            if throw_if_missing {
                return Err(self.not_registered("unregister_data_representation", name));
            }
            return Ok(());
        }
        debug!(target: TRACE_TARGET, data_representation = name, "unregistered data representation");
        Ok(())
    }

    /// Remove several creators by namespace-and-name. Nothing is removed if
    /// any of them is missing.
    pub fn unregister_data_representations(
        &self,
        old_creators: &[Arc<dyn DataRepresentationCreator>],
    ) -> Result<()> {
        let mut creators = lock(&self.creators);
        let names: Vec<String> = old_creators
            .iter()
            .map(|creator| creator.plugin_object_namespace_and_name())
            .collect();
        if let Some(missing) = names.iter().find(|name| !creators.contains_key(*name)) {
            return Err(self.not_registered("unregister_data_representations", missing));
        }
        for name in names {
            creators.remove(&name);
            debug!(target: TRACE_TARGET, data_representation = %name, "unregistered data representation");
        }
        Ok(())
    }

    /// Remove every data representation.
    pub fn reset(&self) {
        lock(&self.creators).clear();
        info!(
            target: TRACE_TARGET,
            "reset the data representation manager; no data representations are registered"
        );
    }

    pub fn total_data_representations(&self) -> usize {
        lock(&self.creators).len()
    }

    /// Every registered name, sorted.
    pub fn registered_data_representation_names(&self) -> Vec<String> {
        lock(&self.creators).keys().cloned().collect()
    }

    /// Creators satisfying every requirement in `request`, in name order.
    pub fn compatible_data_representation_creators(
        &self,
        request: &DataRepresentationRequest,
    ) -> Result<Vec<Arc<dyn DataRepresentationCreator>>> {
        let snapshot: Vec<Arc<dyn DataRepresentationCreator>> =
            lock(&self.creators).values().cloned().collect();
        let mut matches = Vec::new();
        for creator in snapshot {
            if request.data_representation_is_compatible_with_criteria(creator.as_ref())? {
                matches.push(creator);
            }
        }
        Ok(matches)
    }

    /// Representations in `categories` usable by `engine`.
    ///
    /// Those declaring the engine compatible are returned if there are any.
    /// Otherwise every representation in the categories that the engine
    /// does not reject is returned.
    pub fn data_representation_creators_for_engine(
        &self,
        categories: &[CategoryPath],
        allow_subcategories: bool,
        engine: &dyn EngineApiObject,
    ) -> Result<(Vec<Arc<dyn DataRepresentationCreator>>, DataRepresentationRequestResult)> {
        let mut compatible = DataRepresentationRequest::new();
        compatible.add_engine_compatibility_requirement(&engine.inner_class_namespace_and_name());
        compatible.add_data_representation_category_requirement(
            categories.to_vec(),
            allow_subcategories,
        );
        let found = self.compatible_data_representation_creators(&compatible)?;
        if !found.is_empty() {
            return Ok((
                found,
                DataRepresentationRequestResult::RequestReturnedTypesCompatibleWithEngine,
            ));
        }

        let mut in_categories = DataRepresentationRequest::new();
        in_categories.add_data_representation_category_requirement(
            categories.to_vec(),
            allow_subcategories,
        );
        let mut found = self.compatible_data_representation_creators(&in_categories)?;
        found.retain(|creator| !engine.data_representation_is_incompatible_with_engine(creator.as_ref()));
        let result = if found.is_empty() {
            DataRepresentationRequestResult::RequestReturnedNoResults
        } else {
            DataRepresentationRequestResult::RequestReturnedTypesNotIncompatibleWithEngine
        };
        Ok((found, result))
    }

    /// As [`data_representation_creators_for_engine`](Self::data_representation_creators_for_engine),
    /// narrowed to `preferred` names (bare or namespaced) in the order given.
    ///
    /// If none of the preferred names is usable, the unnarrowed list is
    /// returned with its original classification.
    pub fn data_representation_creators_for_engine_with_preferred(
        &self,
        categories: &[CategoryPath],
        allow_subcategories: bool,
        engine: &dyn EngineApiObject,
        preferred: &[String],
    ) -> Result<(Vec<Arc<dyn DataRepresentationCreator>>, DataRepresentationRequestResult)> {
        let (found, first_result) =
            self.data_representation_creators_for_engine(categories, allow_subcategories, engine)?;
        if found.is_empty() {
            return Ok((found, DataRepresentationRequestResult::RequestReturnedNoResults));
        }

        let mut narrowed: Vec<Arc<dyn DataRepresentationCreator>> = Vec::new();
        for name in preferred {
            for creator in &found {
                if class_names_match(&creator.plugin_object_namespace_and_name(), name)
                    && !narrowed.iter().any(|kept| Arc::ptr_eq(kept, creator))
                {
                    narrowed.push(Arc::clone(creator));
                }
            }
        }
        if narrowed.is_empty() {
            return Ok((found, first_result));
        }
        let result = match first_result {
            DataRepresentationRequestResult::RequestReturnedTypesCompatibleWithEngine => {
                DataRepresentationRequestResult::RequestReturnedPreferredTypesCompatibleWithEngine
            }
            _ => DataRepresentationRequestResult::RequestReturnedPreferredTypesNotIncompatibleWithEngine,
        };
        Ok((narrowed, result))
    }

    fn already_registered(&self, function: &str, name: &str) -> MasalaError {
        MasalaError::duplicate(
            self.class_namespace_and_name(),
            function,
            format!("MasalaDataRepresentation \"{name}\" has already been registered!"),
        )
    }

    fn not_registered(&self, function: &str, name: &str) -> MasalaError {
        MasalaError::not_found(
            self.class_namespace_and_name(),
            function,
            format!("No data representation was registered with name \"{name}\"."),
        )
    }
}

impl MasalaObject for DataRepresentationManager {
    fn class_name(&self) -> String {
        "MasalaDataRepresentationManager".into()
    }

    fn class_namespace(&self) -> String {
        "masala::base::managers::engine".into()
    }
}

impl std::fmt::Debug for DataRepresentationManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataRepresentationManager")
            .field("data_representations", &self.registered_data_representation_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_names_display_in_screaming_case() {
        assert_eq!(
            DataRepresentationRequestResult::RequestReturnedNoResults.to_string(),
            "REQUEST_RETURNED_NO_RESULTS"
        );
        assert_eq!(
            DataRepresentationRequestResult::RequestReturnedPreferredTypesCompatibleWithEngine
                .to_string(),
            "REQUEST_RETURNED_PREFERRED_TYPES_COMPATIBLE_WITH_ENGINE"
        );
    }
}
