// SPDX-FileCopyrightText: 2026 Masala Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use masala_core::Result;
use strum::Display;

use crate::data_representation::DataRepresentationCreator;

use super::RequestCriterion;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum EngineCompatibilityCriterionMode {
    /// Listed engines must appear among the creator's compatible engines.
    MustBeExplicitlyCompatible,
    /// Listed engines must appear among the creator's incompatible engines.
    MustBeExplicitlyIncompatible,
}

/// Filters data-representation creators by the engines they declare
/// themselves compatible or incompatible with.
///
/// Engines are named by full namespace and name. With `match_any` one
/// listed engine suffices; otherwise all must be declared. An empty engine
/// list never holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineCompatibilityCriterion {
    engines: Vec<String>,
    match_any: bool,
    mode: EngineCompatibilityCriterionMode,
}

impl EngineCompatibilityCriterion {
    pub fn new(mode: EngineCompatibilityCriterionMode) -> Self {
        Self {
            engines: Vec::new(),
            match_any: false,
            mode,
        }
    }

    pub fn with_engine(mut self, engine_namespace_and_name: impl Into<String>) -> Self {
        self.engines.push(engine_namespace_and_name.into());
        self
    }

    pub fn with_engines(mut self, engines: Vec<String>, match_any: bool) -> Self {
        self.engines = engines;
        self.match_any = match_any;
        self
    }

    pub fn set_match_any(&mut self, match_any: bool) {
        self.match_any = match_any;
    }

    pub fn engines(&self) -> &[String] {
        &self.engines
    }

    pub fn match_any(&self) -> bool {
        self.match_any
    }

    pub fn mode(&self) -> EngineCompatibilityCriterionMode {
        self.mode
    }
}

impl RequestCriterion<dyn DataRepresentationCreator> for EngineCompatibilityCriterion {
    fn evaluate(&self, creator: &dyn DataRepresentationCreator) -> Result<bool> {
        if self.engines.is_empty() {
            return Ok(false);
        }
        let declared = match self.mode {
            EngineCompatibilityCriterionMode::MustBeExplicitlyCompatible => {
                creator.compatible_masala_engines()
            }
            EngineCompatibilityCriterionMode::MustBeExplicitlyIncompatible => {
                creator.incompatible_masala_engines()
            }
        };
        let declared_has = |engine: &String| declared.contains(engine);
        Ok(if self.match_any {
            self.engines.iter().any(declared_has)
        } else {
            self.engines.iter().all(declared_has)
        })
    }
}

#[cfg(test)]
mod tests {
    use std::any::Any;
    use std::sync::Arc;

    use masala_core::types::CategoryPath;
    use masala_core::{MasalaError, MasalaObject};

    use super::*;
    use crate::creator::PluginCreator;
    use crate::data_representation::DataRepresentationApiObject;
    use crate::plugin_api::PluginApiObject;

    struct Declares {
        compatible: Vec<String>,
        incompatible: Vec<String>,
    }

    impl MasalaObject for Declares {
        fn class_name(&self) -> String {
            "DeclaresCreator".into()
        }
        fn class_namespace(&self) -> String {
            "masala::tests".into()
        }
    }

    fn unsupported<T>() -> masala_core::Result<T> {
        Err(MasalaError::contract("masala::tests", "create", "unsupported"))
    }

    impl PluginCreator for Declares {
        fn create_plugin_object(&self) -> masala_core::Result<Arc<dyn PluginApiObject>> {
            unsupported()
        }
        fn encapsulate_plugin_object_instance(
            &self,
            _instance: Arc<dyn Any + Send + Sync>,
        ) -> masala_core::Result<Arc<dyn PluginApiObject>> {
            unsupported()
        }
        fn encapsulate_const_plugin_object_instance(
            &self,
            _instance: Arc<dyn Any + Send + Sync>,
        ) -> masala_core::Result<Arc<dyn PluginApiObject>> {
            unsupported()
        }
        fn plugin_object_categories(&self) -> Vec<CategoryPath> {
            vec![vec!["DataRepresentation".into()]]
        }
        fn plugin_object_keywords(&self) -> Vec<String> {
            Vec::new()
        }
        fn plugin_object_name(&self) -> String {
            "Declares".into()
        }
        fn plugin_object_namespace(&self) -> String {
            "masala::tests".into()
        }
    }

    impl DataRepresentationCreator for Declares {
        fn create_data_representation(
            &self,
        ) -> masala_core::Result<Arc<dyn DataRepresentationApiObject>> {
            unsupported()
        }
        fn data_representation_categories(&self) -> Vec<CategoryPath> {
            Vec::new()
        }
        fn data_representation_keywords(&self) -> Vec<String> {
            Vec::new()
        }
        fn compatible_masala_engines(&self) -> Vec<String> {
            self.compatible.clone()
        }
        fn incompatible_masala_engines(&self) -> Vec<String> {
            self.incompatible.clone()
        }
        fn present_data_representation_properties(&self) -> Vec<String> {
            Vec::new()
        }
        fn absent_data_representation_properties(&self) -> Vec<String> {
            Vec::new()
        }
        fn into_plugin_creator(self: Arc<Self>) -> Arc<dyn PluginCreator> {
            self
        }
    }

    fn creator() -> Declares {
        Declares {
            compatible: vec!["e::A".into(), "e::B".into()],
            incompatible: vec!["e::C".into()],
        }
    }

    #[test]
    fn all_versus_any() {
        let subject: &dyn DataRepresentationCreator = &creator();
        let engines = vec!["e::A".to_string(), "e::Z".to_string()];
        let all = EngineCompatibilityCriterion::new(
            EngineCompatibilityCriterionMode::MustBeExplicitlyCompatible,
        )
        .with_engines(engines.clone(), false);
        let any = EngineCompatibilityCriterion::new(
            EngineCompatibilityCriterionMode::MustBeExplicitlyCompatible,
        )
        .with_engines(engines, true);
        assert!(!all.evaluate(subject).unwrap());
        assert!(any.evaluate(subject).unwrap());
    }

    #[test]
    fn incompatible_mode_reads_the_other_list() {
        let subject: &dyn DataRepresentationCreator = &creator();
        let criterion = EngineCompatibilityCriterion::new(
            EngineCompatibilityCriterionMode::MustBeExplicitlyIncompatible,
        )
        .with_engine("e::C");
        assert!(criterion.evaluate(subject).unwrap());
        let criterion = EngineCompatibilityCriterion::new(
            EngineCompatibilityCriterionMode::MustBeExplicitlyIncompatible,
        )
        .with_engine("e::A");
        assert!(!criterion.evaluate(subject).unwrap());
    }

    #[test]
    fn empty_engine_list_never_holds() {
        let subject: &dyn DataRepresentationCreator = &creator();
        for mode in [
            EngineCompatibilityCriterionMode::MustBeExplicitlyCompatible,
            EngineCompatibilityCriterionMode::MustBeExplicitlyIncompatible,
        ] {
            assert!(!EngineCompatibilityCriterion::new(mode).evaluate(subject).unwrap());
        }
    }
}
