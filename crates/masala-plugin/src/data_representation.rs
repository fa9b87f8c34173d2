// SPDX-FileCopyrightText: 2026 Masala Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Data representations: plugins holding data in a form suited to
//! particular engines.

use std::sync::Arc;

use masala_core::types::CategoryPath;
use masala_core::{Plugin, Result};

use crate::creator::{PluginCreator, PluginObjectCreator};
use crate::plugin_api::{DescribeApi, PluginApi, PluginApiObject};

/// Capability of every data representation.
pub trait DataRepresentation: Plugin {
    /// Data-representation-specific categories, primary first.
    fn data_representation_categories(&self) -> Vec<CategoryPath>;

    fn data_representation_keywords(&self) -> Vec<String>;

    /// Namespaces and names of engines known to work with this
    /// representation.
    fn compatible_masala_engines(&self) -> Vec<String> {
        Vec::new()
    }

    /// Namespaces and names of engines known not to work with it.
    fn incompatible_masala_engines(&self) -> Vec<String> {
        Vec::new()
    }

    fn present_data_representation_properties(&self) -> Vec<String> {
        Vec::new()
    }

    fn possibly_present_data_representation_properties(&self) -> Vec<String> {
        Vec::new()
    }

    fn absent_data_representation_properties(&self) -> Vec<String> {
        Vec::new()
    }

    fn possibly_absent_data_representation_properties(&self) -> Vec<String> {
        Vec::new()
    }

    /// Whether no data has been loaded.
    fn empty(&self) -> bool;

    /// Drop loaded data, keeping configuration.
    fn clear(&mut self);

    /// Drop loaded data and configuration.
    fn reset(&mut self);
}

/// Object-safe view of a data-representation API shim.
///
/// `clear` and `reset` take the shim's lock and fail on a const shim.
pub trait DataRepresentationApiObject: PluginApiObject {
    fn data_representation_categories(&self) -> Vec<CategoryPath>;

    fn data_representation_keywords(&self) -> Vec<String>;

    fn compatible_masala_engines(&self) -> Vec<String>;

    fn incompatible_masala_engines(&self) -> Vec<String>;

    fn empty(&self) -> bool;

    fn clear(&self) -> Result<()>;

    fn reset(&self) -> Result<()>;

    fn into_plugin_api(self: Arc<Self>) -> Arc<dyn PluginApiObject>;
}

impl std::fmt::Debug for dyn DataRepresentationApiObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataRepresentationApiObject")
            .field("inner", &self.inner_class_namespace_and_name())
            .finish()
    }
}

impl<P: DescribeApi + DataRepresentation> DataRepresentationApiObject for PluginApi<P> {
    fn data_representation_categories(&self) -> Vec<CategoryPath> {
        self.with_inner(|dr| dr.data_representation_categories())
    }

    fn data_representation_keywords(&self) -> Vec<String> {
        self.with_inner(|dr| dr.data_representation_keywords())
    }

    fn compatible_masala_engines(&self) -> Vec<String> {
        self.with_inner(|dr| dr.compatible_masala_engines())
    }

    fn incompatible_masala_engines(&self) -> Vec<String> {
        self.with_inner(|dr| dr.incompatible_masala_engines())
    }

    fn empty(&self) -> bool {
        self.with_inner(|dr| dr.empty())
    }

    fn clear(&self) -> Result<()> {
        self.inner_handle().write("clear", |dr| dr.clear())
    }

    fn reset(&self) -> Result<()> {
        self.inner_handle().write("reset", |dr| dr.reset())
    }

    fn into_plugin_api(self: Arc<Self>) -> Arc<dyn PluginApiObject> {
        self
    }
}

/// Factory for one data-representation class.
pub trait DataRepresentationCreator: PluginCreator {
    fn create_data_representation(&self) -> Result<Arc<dyn DataRepresentationApiObject>>;

    fn data_representation_categories(&self) -> Vec<CategoryPath>;

    fn data_representation_keywords(&self) -> Vec<String>;

    fn compatible_masala_engines(&self) -> Vec<String>;

    fn incompatible_masala_engines(&self) -> Vec<String>;

    fn present_data_representation_properties(&self) -> Vec<String>;

    fn absent_data_representation_properties(&self) -> Vec<String>;

    fn into_plugin_creator(self: Arc<Self>) -> Arc<dyn PluginCreator>;
}

impl<P: DescribeApi + DataRepresentation + Default> DataRepresentationCreator
    for PluginObjectCreator<P>
{
    fn create_data_representation(&self) -> Result<Arc<dyn DataRepresentationApiObject>> {
        Ok(Arc::new(self.create()))
    }

    fn data_representation_categories(&self) -> Vec<CategoryPath> {
        self.prototype().data_representation_categories()
    }

    fn data_representation_keywords(&self) -> Vec<String> {
        self.prototype().data_representation_keywords()
    }

    fn compatible_masala_engines(&self) -> Vec<String> {
        self.prototype().compatible_masala_engines()
    }

    fn incompatible_masala_engines(&self) -> Vec<String> {
        self.prototype().incompatible_masala_engines()
    }

    fn present_data_representation_properties(&self) -> Vec<String> {
        self.prototype().present_data_representation_properties()
    }

    fn absent_data_representation_properties(&self) -> Vec<String> {
        self.prototype().absent_data_representation_properties()
    }

    fn into_plugin_creator(self: Arc<Self>) -> Arc<dyn PluginCreator> {
        self
    }
}

impl std::fmt::Debug for dyn DataRepresentationCreator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataRepresentationCreator")
            .field("data_representation", &self.plugin_object_namespace_and_name())
            .finish()
    }
}
