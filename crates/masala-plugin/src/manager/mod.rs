// SPDX-FileCopyrightText: 2026 Masala Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process-wide registries.
//!
//! Each manager is a lazily created singleton reached through
//! `get_instance()`. One mutex guards each registry's map; creators are
//! cloned out of the map and invoked after the lock is released, so a
//! creator may itself call back into a manager. `reset()` exists for test
//! isolation.

pub mod data_representation_manager;
pub mod engine_manager;
pub mod file_interpreter_manager;
pub mod module_manager;

pub use data_representation_manager::{DataRepresentationManager, DataRepresentationRequestResult};
pub use engine_manager::EngineManager;
pub use file_interpreter_manager::FileInterpreterManager;
pub use module_manager::PluginModuleManager;
