// SPDX-FileCopyrightText: 2026 Masala Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

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
use crate::traits::MasalaObject;

/// Marks a function as not meant to be exposed in user interfaces.
/// Compatible with every function kind.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoUiAnnotation;

impl MasalaObject for NoUiAnnotation {
    fn class_name(&self) -> String {
        "NoUiAnnotation".into()
    }

    fn class_namespace(&self) -> String {
        ANNOTATION_NAMESPACE.into()
    }
}

impl FunctionAnnotation for NoUiAnnotation {
    fn additional_description(&self) -> String {
        "This function is not intended for inclusion in user interfaces or graphical user \
         interfaces."
            .into()
    }

    fn modify_json_description(&self, json: &mut Map<String, Value>) {
        json.insert("Not_For_User_Interface".into(), Value::Bool(true));
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl ConstructorAnnotation for NoUiAnnotation {
    fn is_compatible_with_constructor(&self, _constructor: &ConstructorDefinition) -> bool {
        true
    }
}

impl GetterAnnotation for NoUiAnnotation {
    fn is_compatible_with_getter(&self, _getter: &GetterDefinition) -> bool {
        true
    }
}

impl SetterAnnotation for NoUiAnnotation {
    fn is_compatible_with_setter(&self, _setter: &SetterDefinition) -> bool {
        true
    }
}

impl WorkFunctionAnnotation for NoUiAnnotation {
    fn is_compatible_with_work_function(&self, _work_function: &WorkFunctionDefinition) -> bool {
        true
    }
}
