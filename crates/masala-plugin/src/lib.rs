// SPDX-FileCopyrightText: 2026 Masala Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin registries for Masala.
//!
//! Plugins are wrapped in a generic API shim ([`PluginApi`]), built by
//! creators ([`PluginCreator`] and its engine, data-representation and
//! file-interpreter refinements), registered with process-wide managers and
//! discovered by name or by composable request criteria.

pub mod annotation;
pub mod creator;
pub mod criterion;
pub mod data_representation;
pub mod engine;
pub mod file_interpreter;
pub mod manager;
pub mod plugin_api;
pub mod registrator;

pub use annotation::PreferredTemplateDataRepresentationSetterAnnotation;
pub use creator::{PluginCreator, PluginObjectCreator};
pub use criterion::{
    AndCriterion, CriterionSubject, NameRequirementCriterion, NotCriterion, OrCriterion,
    RequestCriterion, SharedCriterion,
};
pub use data_representation::{
    DataRepresentation, DataRepresentationApiObject, DataRepresentationCreator,
};
pub use engine::{Engine, EngineApiObject, EngineCreator};
pub use file_interpreter::{FileInterpreter, FileInterpreterApiObject, FileInterpreterCreator};
pub use manager::{
    DataRepresentationManager, DataRepresentationRequestResult, EngineManager,
    FileInterpreterManager, PluginModuleManager,
};
pub use plugin_api::{DescribeApi, InnerHandle, PluginApi, PluginApiObject};
pub use registrator::Registrator;
