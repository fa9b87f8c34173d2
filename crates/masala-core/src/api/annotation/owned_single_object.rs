// SPDX-FileCopyrightText: 2026 Masala Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::any::Any;

use super::{ANNOTATION_NAMESPACE, FunctionAnnotation, SetterAnnotation};
use crate::api::setter::SetterDefinition;
use crate::traits::MasalaObject;

/// Marks a one-input setter whose argument becomes an object wholly and
/// uniquely owned by the receiver, so user interfaces can offer to configure
/// it inline.
#[derive(Debug, Clone, Copy, Default)]
pub struct OwnedSingleObjectSetterAnnotation;

impl MasalaObject for OwnedSingleObjectSetterAnnotation {
    fn class_name(&self) -> String {
        "OwnedSingleObjectSetterAnnotation".into()
    }

    fn class_namespace(&self) -> String {
        ANNOTATION_NAMESPACE.into()
    }
}

impl FunctionAnnotation for OwnedSingleObjectSetterAnnotation {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl SetterAnnotation for OwnedSingleObjectSetterAnnotation {
    fn is_compatible_with_setter(&self, setter: &SetterDefinition) -> bool {
        setter.n_inputs() == 1
    }
}
