// SPDX-FileCopyrightText: 2026 Masala Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base capability of every runtime-discoverable component.

use crate::traits::object::MasalaObject;
use crate::types::CategoryPath;

/// A component that can be registered with, and discovered through, the
/// plugin registries.
///
/// Engines, data representations, file interpreters, selectors and scoring
/// terms all implement this. The first category path is the primary
/// registry key; non-emptiness of the categories is checked when the
/// manager key is computed, not here.
pub trait Plugin: MasalaObject {
    /// Hierarchical categories, primary first.
    fn categories(&self) -> Vec<CategoryPath>;

    /// Flat keyword list.
    fn keywords(&self) -> Vec<String>;
}
