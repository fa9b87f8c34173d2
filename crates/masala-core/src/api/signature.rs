// SPDX-FileCopyrightText: 2026 Masala Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pieces shared by every function descriptor: inputs, outputs,
//! virtuality and the type-erased bound callable.

use std::any::{Any, TypeId};
use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value, json};
use strum::Display;

use crate::api::params::{ParameterTypes, type_name_of};
use crate::error::{MasalaError, Result};

/// One input of a described function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterDescriptor {
    pub index: usize,
    pub name: String,
    pub description: String,
    pub type_name: String,
}

/// The value returned by a getter or work function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputDescriptor {
    pub name: String,
    pub description: String,
    pub type_name: String,
}

impl OutputDescriptor {
    pub(crate) fn of<R: 'static>(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            type_name: type_name_of::<R>(),
        }
    }

    pub(crate) fn json(&self) -> Value {
        json!({
            "Output_Type": self.type_name,
            "Output_Description": self.description,
            "Output_Name": self.name,
        })
    }
}

/// How a described function relates to the API of a parent class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum Virtuality {
    /// Not overridable.
    #[default]
    NonVirtual,
    /// Overridable, and not itself an override of a parent API function.
    Virtual,
    /// Overrides a parent API function.
    Override,
}

impl Virtuality {
    pub fn is_virtual_non_override(self) -> bool {
        self == Virtuality::Virtual
    }

    pub fn is_override(self) -> bool {
        self == Virtuality::Override
    }

    pub(crate) fn prefix(self) -> &'static str {
        if self.is_virtual_non_override() { "virtual " } else { "" }
    }

    pub(crate) fn suffix(self) -> &'static str {
        if self.is_override() { " override" } else { "" }
    }

    pub(crate) fn write_json(self, json: &mut Map<String, Value>) {
        json.insert(
            "Is_Virtual_Not_Overriding_Base_API_Virtual_Function".into(),
            Value::Bool(self.is_virtual_non_override()),
        );
        json.insert(
            "Is_Override_Of_Base_API_Virtual_Function".into(),
            Value::Bool(self.is_override()),
        );
    }
}

/// Pair supplied inputs (name, description) with the types of `Args`.
pub(crate) fn describe_inputs<Args: ParameterTypes>(
    origin: &str,
    function_name: &str,
    inputs: &[(&str, &str)],
) -> Result<(Vec<ParameterDescriptor>, Vec<TypeId>)> {
    if inputs.len() != Args::ARITY {
        return Err(MasalaError::contract(
            origin,
            "describe_inputs",
            format!(
                "Malformed arity for {function_name}(): the function takes {} input(s), but {} \
                 input description(s) were provided.",
                Args::ARITY,
                inputs.len()
            ),
        ));
    }
    let descriptors = Args::type_names()
        .into_iter()
        .zip(inputs)
        .enumerate()
        .map(|(index, (type_name, (name, description)))| ParameterDescriptor {
            index,
            name: (*name).to_string(),
            description: (*description).to_string(),
            type_name,
        })
        .collect();
    Ok((descriptors, Args::type_ids()))
}

/// `( T0, T1 )`, or `()` when there are no inputs.
pub(crate) fn signature_inputs(inputs: &[ParameterDescriptor]) -> String {
    if inputs.is_empty() {
        return "()".to_string();
    }
    let names: Vec<&str> = inputs.iter().map(|p| p.type_name.as_str()).collect();
    format!("( {} )", names.join(", "))
}

/// One `Input N:\tname\tdescription` line per input.
pub(crate) fn input_lines(inputs: &[ParameterDescriptor]) -> String {
    inputs
        .iter()
        .map(|p| format!("Input {}:\t{}\t{}\n", p.index, p.name, p.description))
        .collect()
}

/// The `{"Input_0": {...}, ...}` object.
pub(crate) fn inputs_json(inputs: &[ParameterDescriptor]) -> Value {
    let mut map = Map::new();
    for p in inputs {
        map.insert(
            format!("Input_{}", p.index),
            json!({
                "Input_Index": p.index,
                "Input_Type": p.type_name,
                "Input_Description": p.description,
                "Input_Name": p.name,
            }),
        );
    }
    Value::Object(map)
}

/// Description text followed by each annotation's additional description,
/// separated by two spaces.
pub(crate) fn annotated_description<'a>(
    base: &str,
    extras: impl IntoIterator<Item = String> + 'a,
) -> String {
    let mut out = base.to_string();
    for extra in extras {
        if !extra.is_empty() {
            out.push_str("  ");
            out.push_str(&extra);
        }
    }
    out
}

type Callable<Args, R> = Arc<dyn Fn(Args) -> Result<R> + Send + Sync>;

/// A bound callable with its argument and return types erased.
pub(crate) struct Binding {
    callable: Box<dyn Any + Send + Sync>,
}

impl Binding {
    pub(crate) fn new<Args, R, F>(function: F) -> Self
    where
        Args: 'static,
        R: 'static,
        F: Fn(Args) -> Result<R> + Send + Sync + 'static,
    {
        let callable: Callable<Args, R> = Arc::new(function);
        Self {
            callable: Box::new(callable),
        }
    }

    pub(crate) fn call<Args: 'static, R: 'static>(
        &self,
        origin: &str,
        function_name: &str,
        args: Args,
    ) -> Result<R> {
        let callable = self
            .callable
            .downcast_ref::<Callable<Args, R>>()
            .ok_or_else(|| {
                MasalaError::contract(
                    origin,
                    "call",
                    format!(
                        "{function_name}() was called with inputs {} returning {}, which does not \
                         match its bound signature.",
                        type_name_of::<Args>(),
                        type_name_of::<R>()
                    ),
                )
            })?;
        callable(args)
    }
}

impl std::fmt::Debug for Binding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding").finish_non_exhaustive()
    }
}
