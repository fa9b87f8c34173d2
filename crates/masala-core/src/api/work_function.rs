// SPDX-FileCopyrightText: 2026 Masala Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Work-function descriptors.
//!
//! A work function is anything that is neither a constructor, a getter nor a
//! setter: it may take any inputs, mutate or not, and return anything.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::api::annotation::WorkFunctionAnnotation;
use crate::api::params::ParameterTypes;
use crate::api::signature::{
    Binding, OutputDescriptor, ParameterDescriptor, Virtuality, annotated_description,
    describe_inputs, input_lines, inputs_json, signature_inputs,
};
use crate::error::{MasalaError, Result};

const ORIGIN: &str = "masala::base::api::work_function::WorkFunctionDefinition";

pub struct WorkFunctionDefinition {
    name: String,
    description: String,
    inputs: Vec<ParameterDescriptor>,
    output: OutputDescriptor,
    is_const: bool,
    returns_this_ref: bool,
    triggers_no_mutex_lock: bool,
    always_returns_none: bool,
    virtuality: Virtuality,
    annotations: Vec<Arc<dyn WorkFunctionAnnotation>>,
    binding: Binding,
}

impl std::fmt::Debug for WorkFunctionDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkFunctionDefinition")
            .field("name", &self.name)
            .field("inputs", &self.inputs)
            .field("output", &self.output)
            .field("is_const", &self.is_const)
            .field("virtuality", &self.virtuality)
            .field("annotations", &self.annotations.len())
            .finish()
    }
}

impl WorkFunctionDefinition {
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
            is_const: false,
            returns_this_ref: false,
            triggers_no_mutex_lock: false,
            always_returns_none: false,
            virtuality: Virtuality::NonVirtual,
            annotations: Vec::new(),
            binding: Binding::new(function),
        })
    }

    /// Mark the function as not mutating the receiver.
    pub fn const_fn(mut self) -> Self {
        self.is_const = true;
        self
    }

    /// Mark the function as returning a reference to the receiver.
    pub fn returning_this_ref(mut self) -> Self {
        self.returns_this_ref = true;
        self
    }

    /// Mark the function as running without taking the receiver's lock.
    pub fn without_mutex_lock(mut self) -> Self {
        self.triggers_no_mutex_lock = true;
        self
    }

    /// Mark this version of the function as always returning nothing.
    pub fn always_returning_none(mut self) -> Self {
        self.always_returns_none = true;
        self
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

    pub fn is_const(&self) -> bool {
        self.is_const
    }

    pub fn returns_this_ref(&self) -> bool {
        self.returns_this_ref
    }

    pub fn triggers_no_mutex_lock(&self) -> bool {
        self.triggers_no_mutex_lock
    }

    pub fn always_returns_none(&self) -> bool {
        self.always_returns_none
    }

    pub fn virtuality(&self) -> Virtuality {
        self.virtuality
    }

    pub fn add_annotation(&mut self, annotation: Arc<dyn WorkFunctionAnnotation>) -> Result<()> {
        if !annotation.is_compatible_with_work_function(self) {
            return Err(MasalaError::contract(
                ORIGIN,
                "add_annotation",
                format!(
                    "The {} work function annotation reports that it is incompatible with work \
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

    pub fn annotation(&self, index: usize) -> Result<Arc<dyn WorkFunctionAnnotation>> {
        self.annotations.get(index).cloned().ok_or_else(|| {
            MasalaError::contract(
                ORIGIN,
                "annotation",
                format!(
                    "This work function has {} annotations.  Index {index} is out of range.",
                    self.annotations.len()
                ),
            )
        })
    }

    /// Invoke the bound work function.
    pub fn execute<Args: ParameterTypes, R: 'static>(&self, args: Args) -> Result<R> {
        self.binding.call(ORIGIN, &self.name, args)
    }

    pub fn human_readable_description(&self) -> String {
        let mut out = format!(
            "WorkFunction:\t{}{} {}{}{}{}:\n{}\n",
            self.virtuality.prefix(),
            self.output.type_name,
            self.name,
            signature_inputs(&self.inputs),
            if self.is_const { " const" } else { "" },
            self.virtuality.suffix(),
            self.description()
        );
        if self.always_returns_none {
            out.push_str("This version of this function always returns nothing.");
            if self.virtuality != Virtuality::NonVirtual {
                out.push_str("  This could be overridden by derived classes.");
            }
            out.push('\n');
        }
        if self.returns_this_ref {
            out.push_str(
                "Note that this function returns a reference to the original object (*this).\n",
            );
        }
        if self.triggers_no_mutex_lock {
            out.push_str(if self.returns_this_ref { "Also note " } else { "Note " });
            out.push_str("that this function triggers no mutex lock.\n");
        }
        out.push_str(&input_lines(&self.inputs));
        out.push_str(&format!(
            "Output: \t{}\t{}\n",
            self.output.name, self.output.description
        ));
        out
    }

    pub fn json_description(&self) -> Value {
        let mut json = Map::new();
        json.insert("Work_Function_Name".into(), self.name.clone().into());
        json.insert("Work_Function_Description".into(), self.description().into());
        json.insert("Is_Const".into(), Value::Bool(self.is_const));
        json.insert("Returns_This_Ref".into(), Value::Bool(self.returns_this_ref));
        self.virtuality.write_json(&mut json);
        if self.triggers_no_mutex_lock {
            json.insert("Triggers_No_Mutex_Lock".into(), Value::Bool(true));
        }
        if self.always_returns_none {
            json.insert("Always_Returns_Nullptr".into(), Value::Bool(true));
        }
        json.insert("Work_Function_N_Inputs".into(), self.inputs.len().into());
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
    use crate::api::annotation::NoUiAnnotation;

    fn sum_function() -> WorkFunctionDefinition {
        WorkFunctionDefinition::new::<(Vec<f64>,), f64, _>(
            "sum",
            "Add up a list of values.",
            &[("values", "The values to add.")],
            ("total", "The sum."),
            |(values,)| Ok(values.iter().sum()),
        )
        .unwrap()
        .const_fn()
    }

    #[test]
    fn execute_runs_binding() {
        let wf = sum_function();
        let total: f64 = wf.execute((vec![1.0, 2.0, 3.5],)).unwrap();
        assert_eq!(total, 6.5);
    }

    #[test]
    fn human_readable_notes_flags() {
        let wf = sum_function().returning_this_ref().without_mutex_lock();
        let text = wf.human_readable_description();
        assert!(text.starts_with("WorkFunction:\tf64 sum( Vec<f64> ) const:\n"));
        assert!(text.contains("returns a reference to the original object"));
        assert!(text.contains("Also note that this function triggers no mutex lock."));
        assert!(text.ends_with("Output: \ttotal\tThe sum.\n"));
    }

    #[test]
    fn json_includes_optional_flags_only_when_set() {
        let plain = sum_function().json_description();
        assert!(plain.get("Triggers_No_Mutex_Lock").is_none());
        assert_eq!(plain["Is_Const"], true);
        assert_eq!(plain["Work_Function_N_Inputs"], 1);

        let mut flagged = sum_function().without_mutex_lock().always_returning_none();
        flagged.add_annotation(Arc::new(NoUiAnnotation)).unwrap();
        let json = flagged.json_description();
        assert_eq!(json["Triggers_No_Mutex_Lock"], true);
        assert_eq!(json["Always_Returns_Nullptr"], true);
        assert_eq!(json["Not_For_User_Interface"], true);
    }
}
