// SPDX-FileCopyrightText: 2026 Masala Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The reflective object root.

use std::sync::Weak;

use crate::api::ApiDefinition;
use crate::error::{MasalaError, Result};
use crate::types::join_namespace_and_name;

/// Self-describing base capability of every Masala type.
///
/// The (`class_namespace`, `class_name`) pair is the globally unique type key
/// and must be stable for the lifetime of the process.
pub trait MasalaObject: Send + Sync {
    /// The short class name, e.g. `"EngineManager"`.
    fn class_name(&self) -> String;

    /// The namespace, e.g. `"masala::base::managers::engine"`.
    fn class_namespace(&self) -> String;

    /// Namespace and name joined by `::`.
    fn class_namespace_and_name(&self) -> String {
        join_namespace_and_name(&self.class_namespace(), &self.class_name())
    }

    /// The `in Namespace::Class::function(): ` prefix used in error messages.
    fn errmsg_header(&self, function: &str) -> String {
        format!("in {}::{}(): ", self.class_namespace_and_name(), function)
    }

    /// A contract error raised by this object.
    fn contract_error(&self, function: &str, message: String) -> MasalaError {
        MasalaError::contract(self.class_namespace_and_name(), function, message)
    }

    /// The description of this object's public API.
    ///
    /// The definition is owned by the object and handed out as a weak
    /// reference. Types without a public API return `Ok(None)`.
    fn api_definition(&self) -> Result<Option<Weak<ApiDefinition>>> {
        Ok(None)
    }

    /// Whether [`api_definition`](Self::api_definition) yields a definition.
    fn has_api_definition(&self) -> bool {
        matches!(self.api_definition(), Ok(Some(_)))
    }
}

/// Shallow versus deep copy semantics.
///
/// `Clone` is the shallow copy: shared sub-objects stay shared.
/// [`make_independent`](Self::make_independent) replaces every shared
/// sub-object with a private copy, in place.
pub trait Independent: Clone {
    fn make_independent(&mut self);

    /// A copy that shares nothing with `self`.
    ///
    /// Calling `make_independent` on the result is a no-op.
    fn deep_clone(&self) -> Self {
        let mut copy = self.clone();
        copy.make_independent();
        copy
    }
}
