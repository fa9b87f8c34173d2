// SPDX-FileCopyrightText: 2026 Masala Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Engines: plugins that perform a computation on data representations.

use std::sync::Arc;

use masala_core::types::CategoryPath;
use masala_core::{Plugin, Result};

use crate::creator::{PluginCreator, PluginObjectCreator};
use crate::data_representation::DataRepresentationCreator;
use crate::plugin_api::{DescribeApi, PluginApi, PluginApiObject};

/// Capability of every engine.
pub trait Engine: Plugin {
    /// Engine-specific categories, primary first.
    fn engine_categories(&self) -> Vec<CategoryPath>;

    fn engine_keywords(&self) -> Vec<String>;

    /// Whether this engine cannot work with data representations made by
    /// `creator`.
    fn data_representation_is_incompatible_with_engine(
        &self,
        _creator: &dyn DataRepresentationCreator,
    ) -> bool {
        false
    }
}

/// Object-safe view of an engine API shim.
pub trait EngineApiObject: PluginApiObject {
    fn engine_categories(&self) -> Vec<CategoryPath>;

    fn engine_keywords(&self) -> Vec<String>;

    fn data_representation_is_incompatible_with_engine(
        &self,
        creator: &dyn DataRepresentationCreator,
    ) -> bool;

    fn into_plugin_api(self: Arc<Self>) -> Arc<dyn PluginApiObject>;
}

impl std::fmt::Debug for dyn EngineApiObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineApiObject")
            .field("inner", &self.inner_class_namespace_and_name())
            .finish()
    }
}

impl<P: DescribeApi + Engine> EngineApiObject for PluginApi<P> {
    fn engine_categories(&self) -> Vec<CategoryPath> {
        self.with_inner(|engine| engine.engine_categories())
    }

    fn engine_keywords(&self) -> Vec<String> {
        self.with_inner(|engine| engine.engine_keywords())
    }

    fn data_representation_is_incompatible_with_engine(
        &self,
        creator: &dyn DataRepresentationCreator,
    ) -> bool {
        self.with_inner(|engine| engine.data_representation_is_incompatible_with_engine(creator))
    }

    fn into_plugin_api(self: Arc<Self>) -> Arc<dyn PluginApiObject> {
        self
    }
}

/// Factory for one engine class.
pub trait EngineCreator: PluginCreator {
    fn create_engine(&self) -> Result<Arc<dyn EngineApiObject>>;

    fn engine_categories(&self) -> Vec<CategoryPath>;

    fn engine_keywords(&self) -> Vec<String>;

    fn into_plugin_creator(self: Arc<Self>) -> Arc<dyn PluginCreator>;
}

impl<P: DescribeApi + Engine + Default> EngineCreator for PluginObjectCreator<P> {
    fn create_engine(&self) -> Result<Arc<dyn EngineApiObject>> {
        Ok(Arc::new(self.create()))
    }

    fn engine_categories(&self) -> Vec<CategoryPath> {
        self.prototype().engine_categories()
    }

    fn engine_keywords(&self) -> Vec<String> {
        self.prototype().engine_keywords()
    }

    fn into_plugin_creator(self: Arc<Self>) -> Arc<dyn PluginCreator> {
        self
    }
}

impl std::fmt::Debug for dyn EngineCreator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineCreator")
            .field("engine", &self.plugin_object_namespace_and_name())
            .finish()
    }
}
