// SPDX-FileCopyrightText: 2026 Masala Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request builders: an implicit AND over criteria assembled from common
//! requirements, for engine and data-representation discovery.

use std::sync::Arc;

use masala_core::Result;
use masala_core::types::CategoryPath;

use crate::data_representation::DataRepresentationCreator;
use crate::engine::EngineCreator;

use super::{
    AndCriterion, CategoryCriterion, CategoryCriterionMode, EngineCompatibilityCriterion,
    EngineCompatibilityCriterionMode, KeywordCriterion, KeywordCriterionMode,
    NameRequirementCriterion, RequestCriterion, SharedCriterion,
};

/// Requirements an engine creator must satisfy.
#[derive(Default)]
pub struct EngineRequest {
    criteria: AndCriterion<dyn EngineCreator>,
}

impl EngineRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require the engine to have this name, with or without namespace.
    pub fn add_engine_name_requirement(&mut self, name: &str) -> Result<()> {
        let criterion = NameRequirementCriterion::new(name)?;
        self.criteria.add_criterion(Arc::new(criterion));
        Ok(())
    }

    /// Require the engine to be in at least one of `categories`.
    pub fn add_engine_category_requirement(
        &mut self,
        categories: Vec<CategoryPath>,
        allow_subcategories: bool,
    ) {
        self.criteria.add_criterion(Arc::new(CategoryCriterion::new(
            categories,
            allow_subcategories,
            CategoryCriterionMode::MustBeInAtLeastOne,
        )));
    }

    /// Require the engine to be in none of `categories`.
    pub fn add_engine_category_exclusion(
        &mut self,
        categories: Vec<CategoryPath>,
        allow_subcategories: bool,
    ) {
        self.criteria.add_criterion(Arc::new(CategoryCriterion::new(
            categories,
            allow_subcategories,
            CategoryCriterionMode::MustNotBeInAny,
        )));
    }

    pub fn add_engine_keyword_requirement(
        &mut self,
        keywords: Vec<String>,
        mode: KeywordCriterionMode,
    ) -> Result<()> {
        let criterion = KeywordCriterion::new(keywords, mode)?;
        self.criteria.add_criterion(Arc::new(criterion));
        Ok(())
    }

    pub fn add_engine_criterion(&mut self, criterion: SharedCriterion<dyn EngineCreator>) {
        self.criteria.add_criterion(criterion);
    }

    pub fn n_criteria(&self) -> usize {
        self.criteria.n_criteria()
    }

    /// An empty request accepts every engine.
    pub fn engine_is_compatible_with_criteria(
        &self,
        creator: &(dyn EngineCreator + 'static),
    ) -> Result<bool> {
        self.criteria.evaluate(creator)
    }
}

/// Requirements a data-representation creator must satisfy.
#[derive(Default)]
pub struct DataRepresentationRequest {
    criteria: AndCriterion<dyn DataRepresentationCreator>,
}

impl DataRepresentationRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require explicit compatibility with one engine, named by namespace
    /// and name.
    pub fn add_engine_compatibility_requirement(&mut self, engine_namespace_and_name: &str) {
        self.criteria.add_criterion(Arc::new(
            EngineCompatibilityCriterion::new(
                EngineCompatibilityCriterionMode::MustBeExplicitlyCompatible,
            )
            .with_engine(engine_namespace_and_name),
        ));
    }

    pub fn add_engines_compatibility_requirement(&mut self, engines: Vec<String>, match_any: bool) {
        self.criteria.add_criterion(Arc::new(
            EngineCompatibilityCriterion::new(
                EngineCompatibilityCriterionMode::MustBeExplicitlyCompatible,
            )
            .with_engines(engines, match_any),
        ));
    }

    pub fn add_engine_incompatibility_requirement(&mut self, engine_namespace_and_name: &str) {
        self.criteria.add_criterion(Arc::new(
            EngineCompatibilityCriterion::new(
                EngineCompatibilityCriterionMode::MustBeExplicitlyIncompatible,
            )
            .with_engine(engine_namespace_and_name),
        ));
    }

    pub fn add_engines_incompatibility_requirement(
        &mut self,
        engines: Vec<String>,
        match_any: bool,
    ) {
        self.criteria.add_criterion(Arc::new(
            EngineCompatibilityCriterion::new(
                EngineCompatibilityCriterionMode::MustBeExplicitlyIncompatible,
            )
            .with_engines(engines, match_any),
        ));
    }

    pub fn add_data_representation_name_requirement(&mut self, name: &str) -> Result<()> {
        let criterion = NameRequirementCriterion::new(name)?;
        self.criteria.add_criterion(Arc::new(criterion));
        Ok(())
    }

    pub fn add_data_representation_category_requirement(
        &mut self,
        categories: Vec<CategoryPath>,
        allow_subcategories: bool,
    ) {
        self.criteria.add_criterion(Arc::new(CategoryCriterion::new(
            categories,
            allow_subcategories,
            CategoryCriterionMode::MustBeInAtLeastOne,
        )));
    }

    pub fn add_data_representation_category_exclusion(
        &mut self,
        categories: Vec<CategoryPath>,
        allow_subcategories: bool,
    ) {
        self.criteria.add_criterion(Arc::new(CategoryCriterion::new(
            categories,
            allow_subcategories,
            CategoryCriterionMode::MustNotBeInAny,
        )));
    }

    pub fn add_data_representation_keyword_requirement(
        &mut self,
        keywords: Vec<String>,
        mode: KeywordCriterionMode,
    ) -> Result<()> {
        let criterion = KeywordCriterion::new(keywords, mode)?;
        self.criteria.add_criterion(Arc::new(criterion));
        Ok(())
    }

    pub fn add_data_representation_criterion(
        &mut self,
        criterion: SharedCriterion<dyn DataRepresentationCreator>,
    ) {
        self.criteria.add_criterion(criterion);
    }

    pub fn n_criteria(&self) -> usize {
        self.criteria.n_criteria()
    }

    /// An empty request accepts every data representation.
    pub fn data_representation_is_compatible_with_criteria(
        &self,
        creator: &(dyn DataRepresentationCreator + 'static),
    ) -> Result<bool> {
        self.criteria.evaluate(creator)
    }
}
