// SPDX-FileCopyrightText: 2026 Masala Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capability traits implemented by every reflective Masala type.
//!
//! [`MasalaObject`] is the root: class identity plus an optional API
//! definition. [`Plugin`] adds the category and keyword metadata used by the
//! registries, and [`Independent`] describes shallow versus deep copies.

pub mod object;
pub mod plugin;

pub use object::{Independent, MasalaObject};
pub use plugin::Plugin;
