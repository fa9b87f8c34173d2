// SPDX-FileCopyrightText: 2026 Masala Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Machine-readable metadata attached to described functions.
//!
//! Each function kind has its own annotation trait with a compatibility
//! check. The descriptor calls the check when the annotation is attached and
//! rejects incompatible annotations with a contract error.

pub mod deprecated;
pub mod no_ui;
pub mod owned_single_object;

use std::any::Any;

use serde_json::{Map, Value};

use crate::api::constructor::ConstructorDefinition;
use crate::api::getter::GetterDefinition;
use crate::api::setter::SetterDefinition;
use crate::api::work_function::WorkFunctionDefinition;
use crate::traits::MasalaObject;

pub use deprecated::{DeprecatedAnnotation, DeprecationStatus, MajorMinor};
pub use no_ui::NoUiAnnotation;
pub use owned_single_object::OwnedSingleObjectSetterAnnotation;

/// Behavior common to every annotation kind.
pub trait FunctionAnnotation: MasalaObject {
    /// Text appended to the annotated function's description. Empty means
    /// nothing is appended.
    fn additional_description(&self) -> String {
        String::new()
    }

    /// Edit the JSON description of the annotated function.
    fn modify_json_description(&self, _json: &mut Map<String, Value>) {}

    fn as_any(&self) -> &dyn Any;
}

pub trait ConstructorAnnotation: FunctionAnnotation {
    fn is_compatible_with_constructor(&self, constructor: &ConstructorDefinition) -> bool;
}

pub trait GetterAnnotation: FunctionAnnotation {
    fn is_compatible_with_getter(&self, getter: &GetterDefinition) -> bool;
}

pub trait SetterAnnotation: FunctionAnnotation {
    fn is_compatible_with_setter(&self, setter: &SetterDefinition) -> bool;
}

pub trait WorkFunctionAnnotation: FunctionAnnotation {
    fn is_compatible_with_work_function(&self, work_function: &WorkFunctionDefinition) -> bool;
}

pub(crate) const ANNOTATION_NAMESPACE: &str = "masala::base::api::annotation";
