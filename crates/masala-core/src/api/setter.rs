// SPDX-FileCopyrightText: 2026 Masala Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Setter descriptors.

use std::any::TypeId;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::api::annotation::SetterAnnotation;
use crate::api::params::ParameterTypes;
use crate::api::signature::{
    Binding, ParameterDescriptor, Virtuality, annotated_description, describe_inputs,
    input_lines, inputs_json, signature_inputs,
};
use crate::error::{MasalaError, Result};

const ORIGIN: &str = "masala::base::api::setter::SetterDefinition";

/// Describes a mutator of the described class and binds it.
pub struct SetterDefinition {
    name: String,
    description: String,
    inputs: Vec<ParameterDescriptor>,
    input_type_ids: Vec<TypeId>,
    virtuality: Virtuality,
    annotations: Vec<Arc<dyn SetterAnnotation>>,
    binding: Binding,
}

impl std::fmt::Debug for SetterDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SetterDefinition")
            .field("name", &self.name)
            .field("inputs", &self.inputs)
            .field("virtuality", &self.virtuality)
            .field("annotations", &self.annotations.len())
            .finish()
    }
}

impl SetterDefinition {
    /// Describe a setter taking `Args`.
    pub fn new<Args, F>(
        name: &str,
        description: &str,
        inputs: &[(&str, &str)],
        function: F,
    ) -> Result<Self>
    where
        Args: ParameterTypes,
        F: Fn(Args) -> Result<()> + Send + Sync + 'static,
    {
        let (inputs, input_type_ids) = describe_inputs::<Args>(ORIGIN, name, inputs)?;
        Ok(Self {
            name: name.to_string(),
            description: description.to_string(),
            inputs,
            input_type_ids,
            virtuality: Virtuality::NonVirtual,
            annotations: Vec::new(),
            binding: Binding::new(function),
        })
    }

    pub fn with_virtuality(mut self, virtuality: Virtuality) -> Self {
        self.virtuality = virtuality;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> String {
        annotated_description(
            &self.description,
            self.annotations.iter().map(|a| a.additional_description()),
        )
    }

    pub fn n_inputs(&self) -> usize {
        self.inputs.len()
    }

    pub fn inputs(&self) -> &[ParameterDescriptor] {
        &self.inputs
    }

    pub fn virtuality(&self) -> Virtuality {
        self.virtuality
    }

    /// Whether this setter takes exactly one input of type `T`.
    pub fn takes_single<T: 'static>(&self) -> bool {
        self.input_type_ids.as_slice() == [TypeId::of::<T>()]
    }

    pub fn add_annotation(&mut self, annotation: Arc<dyn SetterAnnotation>) -> Result<()> {
        if !annotation.is_compatible_with_setter(self) {
            return Err(MasalaError::contract(
                ORIGIN,
                "add_annotation",
                format!(
                    "The {} setter annotation reports that it is incompatible with setter \
                     function {}.",
                    annotation.class_name(),
                    self.name
                ),
            ));
        }
        self.annotations.push(annotation);
        Ok(())
    }

    pub fn n_annotations(&self) -> usize {
        self.annotations.len()
    }

    pub fn annotation(&self, index: usize) -> Result<Arc<dyn SetterAnnotation>> {
        self.annotations.get(index).cloned().ok_or_else(|| {
            MasalaError::contract(
                ORIGIN,
                "annotation",
                format!(
                    "This setter has {} annotations.  Index {index} is out of range.",
                    self.annotations.len()
                ),
            )
        })
    }

    /// The first attached annotation of type `T`, if any.
    pub fn find_annotation<T: 'static>(&self) -> Option<&T> {
        self.annotations
            .iter()
            .find_map(|a| a.as_any().downcast_ref::<T>())
    }

    /// Invoke the bound setter.
    pub fn set<Args: ParameterTypes>(&self, args: Args) -> Result<()> {
        self.binding.call(ORIGIN, &self.name, args)
    }

    pub fn human_readable_description(&self) -> String {
        format!(
            "Setter:\t{}void {}{}{}:\n{}\n{}",
            self.virtuality.prefix(),
            self.name,
            signature_inputs(&self.inputs),
            self.virtuality.suffix(),
            self.description(),
            input_lines(&self.inputs)
        )
    }

    pub fn json_description(&self) -> Value {
        let mut json = Map::new();
        json.insert("Setter_Name".into(), self.name.clone().into());
        json.insert("Setter_Description".into(), self.description().into());
        json.insert("Is_Const".into(), Value::Bool(false));
        self.virtuality.write_json(&mut json);
        json.insert("Setter_N_Inputs".into(), self.inputs.len().into());
        json.insert("Inputs".into(), inputs_json(&self.inputs));
        for annotation in &self.annotations {
            annotation.modify_json_description(&mut json);
        }
        Value::Object(json)
    }
}
