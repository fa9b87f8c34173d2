// SPDX-FileCopyrightText: 2026 Masala Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use masala_core::{MasalaError, Result};
use strum::Display;

use super::{CriterionSubject, ORIGIN, RequestCriterion};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum KeywordCriterionMode {
    MustHaveAtLeastOne,
    MustHaveAll,
    MustHaveNone,
}

/// Filters creators by keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordCriterion {
    keywords: Vec<String>,
    mode: KeywordCriterionMode,
}

impl KeywordCriterion {
    /// Fails if `keywords` is empty or contains an empty keyword.
    pub fn new(keywords: Vec<String>, mode: KeywordCriterionMode) -> Result<Self> {
        if keywords.is_empty() {
            return Err(MasalaError::contract(
                format!("{ORIGIN}::KeywordCriterion"),
                "new",
                "At least one keyword must be provided.",
            ));
        }
        if keywords.iter().any(String::is_empty) {
            return Err(MasalaError::contract(
                format!("{ORIGIN}::KeywordCriterion"),
                "new",
                "Got an empty keyword.",
            ));
        }
        Ok(Self { keywords, mode })
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn mode(&self) -> KeywordCriterionMode {
        self.mode
    }
}

impl<C: CriterionSubject + ?Sized> RequestCriterion<C> for KeywordCriterion {
    fn evaluate(&self, creator: &C) -> Result<bool> {
        let have = creator.subject_keywords();
        if have.iter().any(String::is_empty) {
            return Err(MasalaError::contract(
                format!("{ORIGIN}::KeywordCriterion"),
                "evaluate",
                format!("{} lists itself as having an empty keyword.", creator.subject_name()),
            ));
        }
        let has = |keyword: &String| have.contains(keyword);
        Ok(match self.mode {
            KeywordCriterionMode::MustHaveAtLeastOne => self.keywords.iter().any(has),
            KeywordCriterionMode::MustHaveAll => self.keywords.iter().all(has),
            KeywordCriterionMode::MustHaveNone => !self.keywords.iter().any(has),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use masala_core::types::CategoryPath;

    struct Subject(Vec<&'static str>);

    impl CriterionSubject for Subject {
        fn subject_namespace_and_name(&self) -> String {
            "t::Subject".into()
        }
        fn subject_name(&self) -> String {
            "Subject".into()
        }
        fn subject_categories(&self) -> Vec<CategoryPath> {
            Vec::new()
        }
        fn subject_keywords(&self) -> Vec<String> {
            self.0.iter().map(|k| (*k).to_string()).collect()
        }
    }

    fn criterion(keywords: &[&str], mode: KeywordCriterionMode) -> KeywordCriterion {
        KeywordCriterion::new(keywords.iter().map(|k| (*k).to_string()).collect(), mode).unwrap()
    }

    #[test]
    fn modes() {
        let subject = Subject(vec!["protein", "design"]);
        assert!(
            criterion(&["peptide", "design"], KeywordCriterionMode::MustHaveAtLeastOne)
                .evaluate(&subject)
                .unwrap()
        );
        assert!(
            !criterion(&["peptide", "design"], KeywordCriterionMode::MustHaveAll)
                .evaluate(&subject)
                .unwrap()
        );
        assert!(
            criterion(&["protein", "design"], KeywordCriterionMode::MustHaveAll)
                .evaluate(&subject)
                .unwrap()
        );
        assert!(
            criterion(&["peptide"], KeywordCriterionMode::MustHaveNone)
                .evaluate(&subject)
                .unwrap()
        );
    }

    #[test]
    fn rejects_empty_keyword_sets() {
        assert!(KeywordCriterion::new(vec![], KeywordCriterionMode::MustHaveAll).is_err());
        assert!(
            KeywordCriterion::new(vec![String::new()], KeywordCriterionMode::MustHaveAll).is_err()
        );
        let bad_subject = Subject(vec![""]);
        assert!(
            criterion(&["a"], KeywordCriterionMode::MustHaveNone)
                .evaluate(&bad_subject)
                .is_err()
        );
    }
}
