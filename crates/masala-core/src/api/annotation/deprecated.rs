// SPDX-FileCopyrightText: 2026 Masala Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deprecation schedule for a described function.

use std::any::Any;

use serde_json::{Map, Value};

use super::{
    ANNOTATION_NAMESPACE, ConstructorAnnotation, FunctionAnnotation, GetterAnnotation,
    SetterAnnotation, WorkFunctionAnnotation,
};
use crate::api::constructor::ConstructorDefinition;
use crate::api::getter::GetterDefinition;
use crate::api::setter::SetterDefinition;
use crate::api::work_function::WorkFunctionDefinition;
use crate::error::{MasalaError, Result};
use crate::traits::MasalaObject;

/// A `(major, minor)` library version.
pub type MajorMinor = (u64, u64);

/// Where a library version falls in a deprecation schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeprecationStatus {
    Supported,
    Warning,
    Deprecated,
}

/// Announces the library version in which a function goes away, and
/// optionally the earlier version from which callers are warned.
///
/// Versions refer to the library that defines the function, not to the
/// core library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeprecatedAnnotation {
    library_name: String,
    warnings_start: Option<MajorMinor>,
    deprecated_in: MajorMinor,
}

impl DeprecatedAnnotation {
    /// A schedule with no warning period.
    pub fn new(library_name: impl Into<String>, deprecated_in: MajorMinor) -> Self {
        Self {
            library_name: library_name.into(),
            warnings_start: None,
            deprecated_in,
        }
    }

    /// A schedule with a warning period. `warnings_start` must precede
    /// `deprecated_in`.
    pub fn with_warnings(
        library_name: impl Into<String>,
        warnings_start: MajorMinor,
        deprecated_in: MajorMinor,
    ) -> Result<Self> {
        if warnings_start >= deprecated_in {
            return Err(MasalaError::contract(
                format!("{ANNOTATION_NAMESPACE}::DeprecatedAnnotation"),
                "with_warnings",
                "The version at which the function is deprecated must be after the version at \
                 which warnings start.",
            ));
        }
        Ok(Self {
            library_name: library_name.into(),
            warnings_start: Some(warnings_start),
            deprecated_in,
        })
    }

    pub fn library_name(&self) -> &str {
        &self.library_name
    }

    pub fn has_warning_start(&self) -> bool {
        self.warnings_start.is_some()
    }

    /// The version from which warnings are issued. Errors if none was set.
    pub fn version_at_which_warnings_start(&self) -> Result<MajorMinor> {
        self.warnings_start.ok_or_else(|| {
            self.contract_error(
                "version_at_which_warnings_start",
                "No version was set at which warnings should start.".into(),
            )
        })
    }

    pub fn version_at_which_function_deprecated(&self) -> MajorMinor {
        self.deprecated_in
    }

    /// Classify a library version against this schedule.
    pub fn status_at(&self, version: &semver::Version) -> DeprecationStatus {
        let current = (version.major, version.minor);
        if current >= self.deprecated_in {
            DeprecationStatus::Deprecated
        } else if self.warnings_start.is_some_and(|start| current >= start) {
            DeprecationStatus::Warning
        } else {
            DeprecationStatus::Supported
        }
    }
}

impl MasalaObject for DeprecatedAnnotation {
    fn class_name(&self) -> String {
        "DeprecatedAnnotation".into()
    }

    fn class_namespace(&self) -> String {
        ANNOTATION_NAMESPACE.into()
    }
}

impl FunctionAnnotation for DeprecatedAnnotation {
    fn additional_description(&self) -> String {
        let (major, minor) = self.deprecated_in;
        let base = format!(
            "This function will be deprecated in version {major}.{minor} of the {} library.",
            self.library_name
        );
        match self.warnings_start {
            Some((w_major, w_minor)) => format!(
                "{base}  Deprecation warnings will begin in version {w_major}.{w_minor}."
            ),
            None => base,
        }
    }

    fn modify_json_description(&self, json: &mut Map<String, Value>) {
        json.insert("Will_Be_Deprecated".into(), Value::Bool(true));
        json.insert(
            "Library_Name_For_Deprecation_Version".into(),
            Value::String(self.library_name.clone()),
        );
        json.insert("Deprecation_Major_Version".into(), self.deprecated_in.0.into());
        json.insert("Deprecation_Minor_Version".into(), self.deprecated_in.1.into());
        if let Some((major, minor)) = self.warnings_start {
            json.insert("Deprecation_Warning_Major_Version".into(), major.into());
            json.insert("Deprecation_Warning_Minor_Version".into(), minor.into());
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl ConstructorAnnotation for DeprecatedAnnotation {
    fn is_compatible_with_constructor(&self, _constructor: &ConstructorDefinition) -> bool {
        true
    }
}

impl GetterAnnotation for DeprecatedAnnotation {
    fn is_compatible_with_getter(&self, _getter: &GetterDefinition) -> bool {
        true
    }
}

impl SetterAnnotation for DeprecatedAnnotation {
    fn is_compatible_with_setter(&self, _setter: &SetterDefinition) -> bool {
        true
    }
}

impl WorkFunctionAnnotation for DeprecatedAnnotation {
    fn is_compatible_with_work_function(&self, _work_function: &WorkFunctionDefinition) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warning_start_must_precede_deprecation() {
        assert!(DeprecatedAnnotation::with_warnings("core", (1, 2), (1, 2)).is_err());
        assert!(DeprecatedAnnotation::with_warnings("core", (2, 0), (1, 9)).is_err());
        assert!(DeprecatedAnnotation::with_warnings("core", (1, 9), (2, 0)).is_ok());
    }

    #[test]
    fn missing_warning_start_is_an_error() {
        let annotation = DeprecatedAnnotation::new("core", (3, 0));
        assert!(!annotation.has_warning_start());
        assert!(annotation.version_at_which_warnings_start().is_err());
    }

    #[test]
    fn status_follows_schedule() {
        let annotation = DeprecatedAnnotation::with_warnings("core", (1, 4), (2, 0)).unwrap();
        let at = |v: &str| annotation.status_at(&semver::Version::parse(v).unwrap());
        assert_eq!(at("1.3.9"), DeprecationStatus::Supported);
        assert_eq!(at("1.4.0"), DeprecationStatus::Warning);
        assert_eq!(at("2.0.0"), DeprecationStatus::Deprecated);
        assert_eq!(at("2.1.0"), DeprecationStatus::Deprecated);
    }

    #[test]
    fn description_and_json_mention_versions() {
        let annotation = DeprecatedAnnotation::with_warnings("numeric", (0, 9), (1, 0)).unwrap();
        assert_eq!(
            annotation.additional_description(),
            "This function will be deprecated in version 1.0 of the numeric library.  \
             Deprecation warnings will begin in version 0.9."
        );

        let mut json = Map::new();
        annotation.modify_json_description(&mut json);
        assert_eq!(json["Will_Be_Deprecated"], Value::Bool(true));
        assert_eq!(json["Deprecation_Major_Version"], 1);
        assert_eq!(json["Deprecation_Warning_Minor_Version"], 9);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        fn rank(status: DeprecationStatus) -> u8 {
            match status {
                DeprecationStatus::Supported => 0,
                DeprecationStatus::Warning => 1,
                DeprecationStatus::Deprecated => 2,
            }
        }

        proptest! {
            #[test]
            fn status_never_recovers_in_later_versions(
                warn in (0u64..5, 0u64..5),
                gap in 1u64..5,
                a in (0u64..8, 0u64..8, 0u64..3),
                b in (0u64..8, 0u64..8, 0u64..3),
            ) {
                let deprecated_in = (warn.0, warn.1 + gap);
                let annotation = DeprecatedAnnotation::with_warnings("core", warn, deprecated_in).unwrap();
                let (low, high) = if a <= b { (a, b) } else { (b, a) };
                let low = semver::Version::new(low.0, low.1, low.2);
                let high = semver::Version::new(high.0, high.1, high.2);
                prop_assert!(rank(annotation.status_at(&low)) <= rank(annotation.status_at(&high)));
            }
        }
    }
}
