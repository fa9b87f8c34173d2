// SPDX-FileCopyrightText: 2026 Masala Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The reflective API-definition model.
//!
//! An [`ApiDefinition`] lists the constructors, setters, getters and work
//! functions a class exposes. Each descriptor carries its names, typed
//! inputs and output, and a bound callable, and can render itself as plain
//! text or JSON.

pub mod annotation;
pub mod constructor;
pub mod definition;
pub mod getter;
pub mod params;
pub mod setter;
pub mod signature;
pub mod work_function;

pub use constructor::ConstructorDefinition;
pub use definition::{ApiDefinition, ApiDefinitionCache};
pub use getter::GetterDefinition;
pub use params::{ParameterTypes, type_name_of};
pub use setter::SetterDefinition;
pub use signature::{OutputDescriptor, ParameterDescriptor, Virtuality};
pub use work_function::WorkFunctionDefinition;
