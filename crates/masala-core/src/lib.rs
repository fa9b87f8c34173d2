// SPDX-FileCopyrightText: 2026 Masala Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core types and traits for Masala.
//!
//! This crate defines the error type, the reflective object root, the
//! plugin capability trait, category and namespace helpers and the
//! API-definition model. It has no knowledge of the registries, which live
//! in `masala-plugin`.

pub mod api;
pub mod error;
pub mod sync;
pub mod traits;
pub mod types;

pub use error::{ErrorKind, MasalaError, Result};
pub use traits::{Independent, MasalaObject, Plugin};
pub use types::{
    CategoryPath, NAMESPACE_SEPARATOR, category_matches, category_path, join_namespace_and_name,
    split_namespace_and_name,
};
