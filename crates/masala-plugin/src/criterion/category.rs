// SPDX-FileCopyrightText: 2026 Masala Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use masala_core::types::{CategoryPath, category_matches};
use masala_core::{MasalaError, Result};
use strum::Display;

use super::{CriterionSubject, ORIGIN, RequestCriterion};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum CategoryCriterionMode {
    /// The creator must be in at least one of the listed categories.
    MustBeInAtLeastOne,
    /// The creator must be in none of them.
    MustNotBeInAny,
}

/// Filters creators by hierarchical category.
///
/// With subcategories allowed, a creator in `[A, B, C]` counts as being in
/// `[A, B]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCriterion {
    categories: Vec<CategoryPath>,
    allow_subcategories: bool,
    mode: CategoryCriterionMode,
}

impl CategoryCriterion {
    pub fn new(
        categories: Vec<CategoryPath>,
        allow_subcategories: bool,
        mode: CategoryCriterionMode,
    ) -> Self {
        Self {
            categories,
            allow_subcategories,
            mode,
        }
    }

    pub fn categories(&self) -> &[CategoryPath] {
        &self.categories
    }

    pub fn allow_subcategories(&self) -> bool {
        self.allow_subcategories
    }

    pub fn mode(&self) -> CategoryCriterionMode {
        self.mode
    }

    fn is_in_category(
        &self,
        required: &[String],
        creator_categories: &[CategoryPath],
        creator_name: &str,
    ) -> Result<bool> {
        if required.is_empty() {
            return Err(MasalaError::contract(
                format!("{ORIGIN}::CategoryCriterion"),
                "is_in_category",
                "Got an empty category to match against.",
            ));
        }
        for category in creator_categories {
            if category.is_empty() {
                return Err(MasalaError::contract(
                    format!("{ORIGIN}::CategoryCriterion"),
                    "is_in_category",
                    format!("{creator_name} lists itself as belonging to an empty category."),
                ));
            }
            if category_matches(category, required, self.allow_subcategories) {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

impl<C: CriterionSubject + ?Sized> RequestCriterion<C> for CategoryCriterion {
    fn evaluate(&self, creator: &C) -> Result<bool> {
        let creator_categories = creator.subject_categories();
        let creator_name = creator.subject_name();
        for required in &self.categories {
            if self.is_in_category(required, &creator_categories, &creator_name)? {
                return Ok(self.mode == CategoryCriterionMode::MustBeInAtLeastOne);
            }
        }
        Ok(self.mode == CategoryCriterionMode::MustNotBeInAny)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use masala_core::category_path;

    struct Subject(Vec<CategoryPath>);

    impl CriterionSubject for Subject {
        fn subject_namespace_and_name(&self) -> String {
            "t::Subject".into()
        }
        fn subject_name(&self) -> String {
            "Subject".into()
        }
        fn subject_categories(&self) -> Vec<CategoryPath> {
            self.0.clone()
        }
        fn subject_keywords(&self) -> Vec<String> {
            Vec::new()
        }
    }

    fn kinematic() -> Subject {
        Subject(vec![category_path(&["Solver", "KinematicSolver", "Analytic"])])
    }

    #[test]
    fn exact_match_without_subcategories() {
        let exact = CategoryCriterion::new(
            vec![category_path(&["Solver", "KinematicSolver", "Analytic"])],
            false,
            CategoryCriterionMode::MustBeInAtLeastOne,
        );
        assert!(exact.evaluate(&kinematic()).unwrap());

        let parent = CategoryCriterion::new(
            vec![category_path(&["Solver"])],
            false,
            CategoryCriterionMode::MustBeInAtLeastOne,
        );
        assert!(!parent.evaluate(&kinematic()).unwrap());
    }

    #[test]
    fn parent_matches_with_subcategories() {
        let parent = CategoryCriterion::new(
            vec![category_path(&["Solver"])],
            true,
            CategoryCriterionMode::MustBeInAtLeastOne,
        );
        assert!(parent.evaluate(&kinematic()).unwrap());

        let excluded = CategoryCriterion::new(
            vec![category_path(&["Solver", "KinematicSolver"])],
            true,
            CategoryCriterionMode::MustNotBeInAny,
        );
        assert!(!excluded.evaluate(&kinematic()).unwrap());
    }

    #[test]
    fn empty_category_list() {
        let must = CategoryCriterion::new(vec![], true, CategoryCriterionMode::MustBeInAtLeastOne);
        let must_not = CategoryCriterion::new(vec![], true, CategoryCriterionMode::MustNotBeInAny);
        assert!(!must.evaluate(&kinematic()).unwrap());
        assert!(must_not.evaluate(&kinematic()).unwrap());
    }

    #[test]
    fn empty_paths_are_contract_errors() {
        let bad_required =
            CategoryCriterion::new(vec![vec![]], true, CategoryCriterionMode::MustBeInAtLeastOne);
        assert!(bad_required.evaluate(&kinematic()).is_err());

        let ok = CategoryCriterion::new(
            vec![category_path(&["Solver"])],
            true,
            CategoryCriterionMode::MustBeInAtLeastOne,
        );
        assert!(ok.evaluate(&Subject(vec![vec![]])).is_err());
    }
}
