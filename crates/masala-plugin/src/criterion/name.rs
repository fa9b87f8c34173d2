// SPDX-FileCopyrightText: 2026 Masala Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use masala_core::types::split_namespace_and_name;
use masala_core::{MasalaError, Result};

use super::{CriterionSubject, ORIGIN, RequestCriterion};

/// Requires the creator's class to have a given name.
///
/// The target is `Name` or `ns::Name`. A bare name matches that class in any
/// namespace. A qualified target matches when its namespace segments are the
/// trailing segments of the creator's namespace, at any depth: `b::Foo`
/// matches `b::Foo`, `a::b::Foo` and `x::y::b::Foo`, but not `c::Foo` or
/// `ab::Foo`. Use the fully qualified name to require one exact namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameRequirementCriterion {
    name: String,
    namespace: Vec<String>,
}

impl NameRequirementCriterion {
    /// Fails if `target` has an empty class name.
    pub fn new(target: &str) -> Result<Self> {
        let (namespace, name) = split_namespace_and_name(target);
        if name.is_empty() {
            return Err(MasalaError::contract(
                format!("{ORIGIN}::NameRequirementCriterion"),
                "new",
                format!("Could not parse a class name from \"{target}\"."),
            ));
        }
        Ok(Self { name, namespace })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> &[String] {
        &self.namespace
    }

    /// Whether `namespace_and_name` satisfies this requirement.
    pub fn matches(&self, namespace_and_name: &str) -> bool {
        let (namespace, name) = split_namespace_and_name(namespace_and_name);
        name == self.name && namespace.ends_with(&self.namespace)
    }
}

impl<C: CriterionSubject + ?Sized> RequestCriterion<C> for NameRequirementCriterion {
    fn evaluate(&self, creator: &C) -> Result<bool> {
        Ok(self.matches(&creator.subject_namespace_and_name()))
    }
}

/// Whether two class names refer to the same class under
/// [`NameRequirementCriterion`] rules, with `target` as the pattern.
pub fn class_names_match(candidate: &str, target: &str) -> bool {
    NameRequirementCriterion::new(target)
        .map(|criterion| criterion.matches(candidate))
        .unwrap_or(false)
}
