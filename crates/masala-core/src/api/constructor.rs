// SPDX-FileCopyrightText: 2026 Masala Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Constructor descriptors.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::api::annotation::ConstructorAnnotation;
use crate::api::params::ParameterTypes;
use crate::api::signature::{
    Binding, ParameterDescriptor, annotated_description, describe_inputs, input_lines,
    inputs_json, signature_inputs,
};
use crate::error::Result;

const ORIGIN: &str = "masala::base::api::constructor::ConstructorDefinition";

/// Describes one way of constructing the described class, and binds the
/// function that does it.
pub struct ConstructorDefinition {
    name: String,
    description: String,
    inputs: Vec<ParameterDescriptor>,
    annotations: Vec<Arc<dyn ConstructorAnnotation>>,
    binding: Binding,
}

impl std::fmt::Debug for ConstructorDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConstructorDefinition")
            .field("name", &self.name)
            .field("inputs", &self.inputs)
            .field("annotations", &self.annotations.len())
            .finish()
    }
}

impl ConstructorDefinition {
    /// Describe a constructor taking `Args` and producing `O`.
    ///
    /// `inputs` holds one (name, description) pair per element of `Args`.
    pub fn new<Args, O, F>(
        name: &str,
        description: &str,
        inputs: &[(&str, &str)],
        function: F,
    ) -> Result<Self>
    where
        Args: ParameterTypes,
        O: 'static,
        F: Fn(Args) -> Result<O> + Send + Sync + 'static,
    {
        let (inputs, _) = describe_inputs::<Args>(ORIGIN, name, inputs)?;
        Ok(Self {
            name: name.to_string(),
            description: description.to_string(),
            inputs,
            annotations: Vec::new(),
            binding: Binding::new(function),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The description, followed by any text the annotations add.
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

    /// Attach an annotation. Fails if the annotation rejects this constructor.
    pub fn add_annotation(&mut self, annotation: Arc<dyn ConstructorAnnotation>) -> Result<()> {
        if !annotation.is_compatible_with_constructor(self) {
            return Err(crate::MasalaError::contract(
                ORIGIN,
                "add_annotation",
                format!(
                    "The {} constructor annotation reports that it is incompatible with \
                     constructor function {}.",
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

    pub fn annotation(&self, index: usize) -> Result<Arc<dyn ConstructorAnnotation>> {
        self.annotations.get(index).cloned().ok_or_else(|| {
            crate::MasalaError::contract(
                ORIGIN,
                "annotation",
                format!(
                    "This constructor has {} annotations.  Index {index} is out of range.",
                    self.annotations.len()
                ),
            )
        })
    }

    /// Invoke the bound constructor.
    pub fn construct<Args: ParameterTypes, O: 'static>(&self, args: Args) -> Result<O> {
        self.binding.call(ORIGIN, &self.name, args)
    }

    pub fn human_readable_description(&self) -> String {
        format!(
            "Constructor:\t{}{}:\n{}\n{}",
            self.name,
            signature_inputs(&self.inputs),
            self.description(),
            input_lines(&self.inputs)
        )
    }

    pub fn json_description(&self) -> Value {
        let mut json = Map::new();
        json.insert("Constructor_Name".into(), self.name.clone().into());
        json.insert("Constructor_Description".into(), self.description().into());
        json.insert("Is_Const".into(), Value::Bool(false));
        json.insert("Constructor_N_Inputs".into(), self.inputs.len().into());
        json.insert("Inputs".into(), inputs_json(&self.inputs));
        for annotation in &self.annotations {
            annotation.modify_json_description(&mut json);
        }
        Value::Object(json)
    }
}
