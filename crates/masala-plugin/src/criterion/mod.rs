// SPDX-FileCopyrightText: 2026 Masala Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Composable predicates over creators, used to filter registry contents.
//!
//! A criterion is configured once and then only evaluated. Evaluation has
//! no side effects, so a tree of criteria may be shared between threads and
//! reused across queries.

pub mod category;
pub mod engine_compatibility;
pub mod keyword;
pub mod name;
pub mod request;

use std::sync::Arc;

use masala_core::types::CategoryPath;
use masala_core::{MasalaError, Result};

use crate::creator::PluginCreator;
use crate::data_representation::DataRepresentationCreator;
use crate::engine::EngineCreator;

pub use category::{CategoryCriterion, CategoryCriterionMode};
pub use engine_compatibility::{EngineCompatibilityCriterion, EngineCompatibilityCriterionMode};
pub use keyword::{KeywordCriterion, KeywordCriterionMode};
pub use name::NameRequirementCriterion;
pub use request::{DataRepresentationRequest, EngineRequest};

const ORIGIN: &str = "masala::base::managers::plugin_module::criterion";

/// A boolean predicate over creators of kind `C`.
pub trait RequestCriterion<C: ?Sized>: Send + Sync {
    fn evaluate(&self, creator: &C) -> Result<bool>;
}

/// Shared handle to a criterion, as stored in combinators and requests.
pub type SharedCriterion<C> = Arc<dyn RequestCriterion<C>>;

/// What a criterion can ask of the creator it is evaluated against.
///
/// Engine and data-representation creators answer with their
/// kind-specific categories and keywords rather than their plugin ones.
pub trait CriterionSubject {
    fn subject_namespace_and_name(&self) -> String;

    fn subject_name(&self) -> String;

    fn subject_categories(&self) -> Vec<CategoryPath>;

    fn subject_keywords(&self) -> Vec<String>;
}

impl CriterionSubject for dyn PluginCreator {
    fn subject_namespace_and_name(&self) -> String {
        self.plugin_object_namespace_and_name()
    }

    fn subject_name(&self) -> String {
        self.plugin_object_name()
    }

    fn subject_categories(&self) -> Vec<CategoryPath> {
        self.plugin_object_categories()
    }

    fn subject_keywords(&self) -> Vec<String> {
        self.plugin_object_keywords()
    }
}

impl CriterionSubject for dyn EngineCreator {
    fn subject_namespace_and_name(&self) -> String {
        self.plugin_object_namespace_and_name()
    }

    fn subject_name(&self) -> String {
        self.plugin_object_name()
    }

    fn subject_categories(&self) -> Vec<CategoryPath> {
        self.engine_categories()
    }

    fn subject_keywords(&self) -> Vec<String> {
        self.engine_keywords()
    }
}

impl CriterionSubject for dyn DataRepresentationCreator {
    fn subject_namespace_and_name(&self) -> String {
        self.plugin_object_namespace_and_name()
    }

    fn subject_name(&self) -> String {
        self.plugin_object_name()
    }

    fn subject_categories(&self) -> Vec<CategoryPath> {
        self.data_representation_categories()
    }

    fn subject_keywords(&self) -> Vec<String> {
        self.data_representation_keywords()
    }
}

/// Holds when every child holds. With no children it holds.
pub struct AndCriterion<C: ?Sized + 'static> {
    criteria: Vec<SharedCriterion<C>>,
}

impl<C: ?Sized + 'static> AndCriterion<C> {
    pub fn new() -> Self {
        Self {
            criteria: Vec::new(),
        }
    }

    pub fn with(mut self, criterion: SharedCriterion<C>) -> Self {
        self.criteria.push(criterion);
        self
    }

    pub fn add_criterion(&mut self, criterion: SharedCriterion<C>) {
        self.criteria.push(criterion);
    }

    pub fn n_criteria(&self) -> usize {
        self.criteria.len()
    }
}

impl<C: ?Sized + 'static> Default for AndCriterion<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ?Sized + 'static> RequestCriterion<C> for AndCriterion<C> {
    fn evaluate(&self, creator: &C) -> Result<bool> {
        for criterion in &self.criteria {
            if !criterion.evaluate(creator)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// Holds when at least one child holds. Evaluating with no children is a
/// contract error.
pub struct OrCriterion<C: ?Sized + 'static> {
    criteria: Vec<SharedCriterion<C>>,
}

impl<C: ?Sized + 'static> OrCriterion<C> {
    pub fn new() -> Self {
        Self {
            criteria: Vec::new(),
        }
    }

    pub fn with(mut self, criterion: SharedCriterion<C>) -> Self {
        self.criteria.push(criterion);
        self
    }

    pub fn add_criterion(&mut self, criterion: SharedCriterion<C>) {
        self.criteria.push(criterion);
    }

    pub fn n_criteria(&self) -> usize {
        self.criteria.len()
    }
}

impl<C: ?Sized + 'static> Default for OrCriterion<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ?Sized + 'static> RequestCriterion<C> for OrCriterion<C> {
    fn evaluate(&self, creator: &C) -> Result<bool> {
        if self.criteria.is_empty() {
            return Err(MasalaError::contract(
                format!("{ORIGIN}::OrCriterion"),
                "evaluate",
                "At least one criterion must be passed to this class for OR logic to work.",
            ));
        }
        for criterion in &self.criteria {
            if criterion.evaluate(creator)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// Negates its child. Evaluating before a child is set is a contract
/// error.
pub struct NotCriterion<C: ?Sized + 'static> {
    criterion: Option<SharedCriterion<C>>,
}

impl<C: ?Sized + 'static> NotCriterion<C> {
    pub fn new() -> Self {
        Self { criterion: None }
    }

    pub fn of(criterion: SharedCriterion<C>) -> Self {
        Self {
            criterion: Some(criterion),
        }
    }

    pub fn set_criterion(&mut self, criterion: SharedCriterion<C>) {
        self.criterion = Some(criterion);
    }
}

impl<C: ?Sized + 'static> Default for NotCriterion<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ?Sized + 'static> RequestCriterion<C> for NotCriterion<C> {
    fn evaluate(&self, creator: &C) -> Result<bool> {
        let criterion = self.criterion.as_ref().ok_or_else(|| {
            MasalaError::contract(
                format!("{ORIGIN}::NotCriterion"),
                "evaluate",
                "A criterion must be set in order for the NotCriterion to negate it.",
            )
        })?;
        Ok(!criterion.evaluate(creator)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(bool);

    impl RequestCriterion<str> for Fixed {
        fn evaluate(&self, _creator: &str) -> Result<bool> {
            Ok(self.0)
        }
    }

    fn t() -> SharedCriterion<str> {
        Arc::new(Fixed(true))
    }

    fn f() -> SharedCriterion<str> {
        Arc::new(Fixed(false))
    }

    #[test]
    fn and_requires_all() {
        assert!(AndCriterion::new().with(t()).with(t()).evaluate("x").unwrap());
        assert!(!AndCriterion::new().with(t()).with(f()).evaluate("x").unwrap());
    }

    #[test]
    fn empty_and_is_vacuously_true() {
        assert!(AndCriterion::<str>::new().evaluate("x").unwrap());
    }

    #[test]
    fn or_requires_any_and_rejects_empty() {
        assert!(OrCriterion::new().with(f()).with(t()).evaluate("x").unwrap());
        assert!(!OrCriterion::new().with(f()).evaluate("x").unwrap());
        let err = OrCriterion::<str>::new().evaluate("x").unwrap_err();
        assert!(err.message().contains("At least one criterion"));
    }

    #[test]
    fn not_negates_and_requires_child() {
        assert!(!NotCriterion::of(t()).evaluate("x").unwrap());
        assert!(NotCriterion::of(f()).evaluate("x").unwrap());
        assert!(NotCriterion::<str>::new().evaluate("x").is_err());
    }

    #[test]
    fn errors_propagate_through_combinators() {
        let unset: SharedCriterion<str> = Arc::new(NotCriterion::<str>::new());
        assert!(AndCriterion::new().with(t()).with(Arc::clone(&unset)).evaluate("x").is_err());
        // Short-circuiting stops before the failing child.
        assert!(!AndCriterion::new().with(f()).with(unset).evaluate("x").unwrap());
    }

    #[test]
    fn shared_tree_evaluates_from_many_threads() {
        let tree: SharedCriterion<str> = Arc::new(
            OrCriterion::new()
                .with(f())
                .with(Arc::new(NotCriterion::of(f()))),
        );
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let tree = Arc::clone(&tree);
                std::thread::spawn(move || tree.evaluate("x").unwrap())
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }
}
