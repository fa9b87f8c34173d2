// SPDX-FileCopyrightText: 2026 Masala Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Installs every fixture in the process-wide managers.

use std::sync::Arc;

use masala_core::{MasalaError, Result};
use masala_plugin::{
    DataRepresentationCreator, DataRepresentationManager, EngineCreator, EngineManager,
    FileInterpreterCreator, FileInterpreterManager, PluginCreator, PluginModuleManager,
    PluginObjectCreator, Registrator,
};

use crate::{
    Analytic, CifFileInterpreter, DenseGrid, GenericSolver, Numeric, PdbFileInterpreter,
    PointCloud, SparseGrid,
};

static REGISTRATOR: Registrator =
    Registrator::new("masala::test_utils", register_all, unregister_all);

fn engine_creators() -> Vec<Arc<dyn EngineCreator>> {
    vec![
        PluginObjectCreator::<Analytic>::shared(),
        PluginObjectCreator::<Numeric>::shared(),
        PluginObjectCreator::<GenericSolver>::shared(),
    ]
}

fn data_representation_creators() -> Vec<Arc<dyn DataRepresentationCreator>> {
    vec![
        PluginObjectCreator::<DenseGrid>::shared(),
        PluginObjectCreator::<SparseGrid>::shared(),
        PluginObjectCreator::<PointCloud>::shared(),
    ]
}

fn file_interpreter_creators() -> Vec<Arc<dyn FileInterpreterCreator>> {
    vec![
        PluginObjectCreator::<PdbFileInterpreter>::shared(),
        PluginObjectCreator::<CifFileInterpreter>::shared(),
    ]
}

fn plugin_creators() -> Vec<Arc<dyn PluginCreator>> {
    let engines = engine_creators().into_iter().map(|c| c.into_plugin_creator());
    let data = data_representation_creators()
        .into_iter()
        .map(|c| c.into_plugin_creator());
    let files = file_interpreter_creators()
        .into_iter()
        .map(|c| c.into_plugin_creator());
    engines.chain(data).chain(files).collect()
}

fn register_all() -> Result<()> {
    EngineManager::get_instance().register_engines(&engine_creators())?;
    DataRepresentationManager::get_instance()
        .register_data_representations(&data_representation_creators())?;
    FileInterpreterManager::get_instance()
        .register_file_interpreters(&file_interpreter_creators())?;
    PluginModuleManager::get_instance().add_plugins(&plugin_creators())
}

fn unregister_all() -> Result<()> {
    PluginModuleManager::get_instance().remove_plugins(&plugin_creators())?;
    FileInterpreterManager::get_instance()
        .unregister_file_interpreters(&file_interpreter_creators())?;
    DataRepresentationManager::get_instance()
        .unregister_data_representations(&data_representation_creators())?;
    EngineManager::get_instance().unregister_engines(&engine_creators())
}

/// Register all fixtures once. Later calls return the first outcome.
pub fn register_test_plugins() -> std::result::Result<(), Arc<MasalaError>> {
    REGISTRATOR.register()
}

/// Remove all fixtures if [`register_test_plugins`] succeeded.
pub fn unregister_test_plugins() -> Result<()> {
    REGISTRATOR.unregister()
}
