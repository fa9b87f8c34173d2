// SPDX-FileCopyrightText: 2026 Masala Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Getter descriptors.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::api::annotation::GetterAnnotation;
use crate::api::params::ParameterTypes;
use crate::api::signature::{
    Binding, OutputDescriptor, ParameterDescriptor, Virtuality, annotated_description,
    describe_inputs, input_lines, inputs_json, signature_inputs,
};
use crate::error::{MasalaError, Result};

const ORIGIN: &str = "masala::base::api::getter::GetterDefinition";

/// Describes a const accessor of the described class and binds it.
pub struct GetterDefinition {
    name: String,
    description: String,
    inputs: Vec<ParameterDescriptor>,
    output: OutputDescriptor,
    virtuality: Virtuality,
    annotations: Vec<Arc<dyn GetterAnnotation>>,
    binding: Binding,
}

impl std::fmt::Debug for GetterDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GetterDefinition")
            .field("name", &self.name)
            .field("inputs", &self.inputs)
            .field("output", &self.output)
            .field("virtuality", &self.virtuality)
            .field("annotations", &self.annotations.len())
            .finish()
    }
}

impl GetterDefinition {
    /// Describe a getter taking `Args` and returning `R`.
    ///
    /// `output` is the (name, description) of the returned value.
    pub fn new<Args, R, F>(
        name: &str,
        description: &str,
        inputs: &[(&str, &str)],
        output: (&str, &str),
        function: F,
    ) -> Result<Self>
    where
        Args: ParameterTypes,
        R: 'static,
        F: Fn(Args) -> Result<R> + Send + Sync + 'static,
    {
        let (inputs, _) = describe_inputs::<Args>(ORIGIN, name, inputs)?;
        Ok(Self {
            name: name.to_string(),
            description: description.to_string(),
            inputs,
            output: OutputDescriptor::of::<R>(output.0, output.1),
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

    pub fn output(&self) -> &OutputDescriptor {
        &self.output
    }

    pub fn virtuality(&self) -> Virtuality {
        self.virtuality
    }

    pub fn add_annotation(&mut self, annotation: Arc<dyn GetterAnnotation>) -> Result<()> {
        if !annotation.is_compatible_with_getter(self) {
            return Err(MasalaError::contract(
                ORIGIN,
                "add_annotation",
                format!(
                    "The {} getter annotation reports that it is incompatible with getter \
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

    pub fn annotation(&self, index: usize) -> Result<Arc<dyn GetterAnnotation>> {
        self.annotations.get(index).cloned().ok_or_else(|| {
            MasalaError::contract(
                ORIGIN,
                "annotation",
                format!(
                    "This getter has {} annotations.  Index {index} is out of range.",
                    self.annotations.len()
                ),
            )
        })
    }

    /// Invoke the bound getter.
    pub fn get<Args: ParameterTypes, R: 'static>(&self, args: Args) -> Result<R> {
        self.binding.call(ORIGIN, &self.name, args)
    }

    pub fn human_readable_description(&self) -> String {
        format!(
            "Getter:\t{}{} {}{} const{}:\n{}\n{}Output: \t{}\t{}\n",
            self.virtuality.prefix(),
            self.output.type_name,
            self.name,
            signature_inputs(&self.inputs),
            self.virtuality.suffix(),
            self.description(),
            input_lines(&self.inputs),
            self.output.name,
            self.output.description
        )
    }

    pub fn json_description(&self) -> Value {
        let mut json = Map::new();
        json.insert("Getter_Name".into(), self.name.clone().into());
        json.insert("Getter_Description".into(), self.description().into());
        json.insert("Is_Const".into(), Value::Bool(true));
        self.virtuality.write_json(&mut json);
        json.insert("Getter_N_Inputs".into(), self.inputs.len().into());
        json.insert("Inputs".into(), inputs_json(&self.inputs));
        json.insert("Output".into(), self.output.json());
        for annotation in &self.annotations {
            annotation.modify_json_description(&mut json);
        }
        Value::Object(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn scale_getter(store: Arc<Mutex<Vec<f64>>>) -> GetterDefinition {
        GetterDefinition::new::<(usize,), f64, _>(
            "value_at",
            "Get the stored value at an index.",
            &[("index", "Zero-based index.")],
            ("value", "The stored value."),
            move |(index,)| {
                store
                    .lock()
                    .unwrap()
                    .get(index)
                    .copied()
                    .ok_or_else(|| MasalaError::contract("t::Store", "value_at", "out of range"))
            },
        )
        .unwrap()
    }

    #[test]
    fn get_reads_through_binding() {
        let getter = scale_getter(Arc::new(Mutex::new(vec![0.5, 1.5])));
        assert_eq!(getter.get::<(usize,), f64>((1,)).unwrap(), 1.5);
        assert!(getter.get::<(usize,), f64>((5,)).is_err());
    }

    #[test]
    fn human_readable_marks_override() {
        let getter =
            scale_getter(Arc::new(Mutex::new(vec![]))).with_virtuality(Virtuality::Override);
        assert_eq!(
            getter.human_readable_description(),
            "Getter:\tf64 value_at( usize ) const override:\nGet the stored value at an index.\n\
             Input 0:\tindex\tZero-based index.\nOutput: \tvalue\tThe stored value.\n"
        );
    }

    #[test]
    fn json_has_output_block() {
        let getter =
            scale_getter(Arc::new(Mutex::new(vec![]))).with_virtuality(Virtuality::Virtual);
        let json = getter.json_description();
        assert_eq!(json["Getter_Name"], "value_at");
        assert_eq!(json["Is_Const"], true);
        assert_eq!(json["Is_Virtual_Not_Overriding_Base_API_Virtual_Function"], true);
        assert_eq!(json["Is_Override_Of_Base_API_Virtual_Function"], false);
        assert_eq!(json["Output"]["Output_Type"], "f64");
    }
}
