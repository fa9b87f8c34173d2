// SPDX-FileCopyrightText: 2026 Masala Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! File interpreters: plugins that read or write a file format.

use std::sync::Arc;

use masala_core::{Plugin, Result};

use crate::creator::{PluginCreator, PluginObjectCreator};
use crate::plugin_api::{DescribeApi, PluginApi, PluginApiObject};

/// Capability of every file interpreter.
pub trait FileInterpreter: Plugin {
    /// Short descriptions of the file types handled, e.g. `"protein_data_bank_file"`.
    fn file_descriptors(&self) -> Vec<String>;

    /// Extensions handled, lower case, without the leading dot.
    fn file_extensions(&self) -> Vec<String>;
}

/// Object-safe view of a file-interpreter API shim.
pub trait FileInterpreterApiObject: PluginApiObject {
    fn file_descriptors(&self) -> Vec<String>;

    fn file_extensions(&self) -> Vec<String>;

    fn into_plugin_api(self: Arc<Self>) -> Arc<dyn PluginApiObject>;
}

impl std::fmt::Debug for dyn FileInterpreterApiObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileInterpreterApiObject")
            .field("inner", &self.inner_class_namespace_and_name())
            .finish()
    }
}

impl<P: DescribeApi + FileInterpreter> FileInterpreterApiObject for PluginApi<P> {
    fn file_descriptors(&self) -> Vec<String> {
        self.with_inner(|fi| fi.file_descriptors())
    }

    fn file_extensions(&self) -> Vec<String> {
        self.with_inner(|fi| normalize_extensions(fi.file_extensions()))
    }

    fn into_plugin_api(self: Arc<Self>) -> Arc<dyn PluginApiObject> {
        self
    }
}

/// Factory for one file-interpreter class.
pub trait FileInterpreterCreator: PluginCreator {
    fn create_file_interpreter(&self) -> Result<Arc<dyn FileInterpreterApiObject>>;

    fn file_interpreter_file_descriptors(&self) -> Vec<String>;

    /// Lower-case extensions handled by the interpreter.
    fn file_interpreter_file_extensions(&self) -> Vec<String>;

    fn into_plugin_creator(self: Arc<Self>) -> Arc<dyn PluginCreator>;
}

impl<P: DescribeApi + FileInterpreter + Default> FileInterpreterCreator for PluginObjectCreator<P> {
    fn create_file_interpreter(&self) -> Result<Arc<dyn FileInterpreterApiObject>> {
        Ok(Arc::new(self.create()))
    }

    fn file_interpreter_file_descriptors(&self) -> Vec<String> {
        self.prototype().file_descriptors()
    }

    fn file_interpreter_file_extensions(&self) -> Vec<String> {
        normalize_extensions(self.prototype().file_extensions())
    }

    fn into_plugin_creator(self: Arc<Self>) -> Arc<dyn PluginCreator> {
        self
    }
}

impl std::fmt::Debug for dyn FileInterpreterCreator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileInterpreterCreator")
            .field("file_interpreter", &self.plugin_object_namespace_and_name())
            .finish()
    }
}

/// `".PDB"` and `"pdb"` both become `"pdb"`.
pub(crate) fn normalize_extension(extension: &str) -> String {
    extension.trim_start_matches('.').to_lowercase()
}

/// Normalized, without duplicates or empty entries, first occurrence kept.
fn normalize_extensions(extensions: Vec<String>) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(extensions.len());
    for extension in extensions {
        let extension = normalize_extension(&extension);
        if !extension.is_empty() && !normalized.contains(&extension) {
            normalized.push(extension);
        }
    }
    normalized
}
