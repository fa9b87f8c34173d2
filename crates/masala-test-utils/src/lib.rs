// SPDX-FileCopyrightText: 2026 Masala Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test fixtures for Masala integration tests.
//!
//! Provides small, deterministic plugins of every kind together with a
//! registrator that installs them in the process-wide managers.
//!
//! # Components
//!
//! - [`engines`] - kinematic and generic solver engines
//! - [`data_representations`] - grid and point-cloud data representations
//! - [`file_interpreters`] - PDB and CIF file interpreters
//! - [`registrator`] - one-shot registration of all of the above

/// Implements `MasalaObject` and `Plugin` for a fixture type.
macro_rules! fixture_identity {
    ($ty:ty, $name:literal, $namespace:expr, [$([$($cat:literal),+]),+], [$($kw:literal),*]) => {
        impl masala_core::MasalaObject for $ty {
            fn class_name(&self) -> String {
                $name.into()
            }

            fn class_namespace(&self) -> String {
                $namespace.into()
            }
        }

        impl masala_core::Plugin for $ty {
            fn categories(&self) -> Vec<masala_core::CategoryPath> {
                vec![$(masala_core::category_path(&[$($cat),+])),+]
            }

            fn keywords(&self) -> Vec<String> {
                vec![$($kw.to_string()),*]
            }
        }
    };
}

pub mod data_representations;
pub mod engines;
pub mod file_interpreters;
pub mod registrator;

pub use data_representations::{DenseGrid, PointCloud, SparseGrid};
pub use engines::{Analytic, GenericSolver, Numeric};
pub use file_interpreters::{CifFileInterpreter, PdbFileInterpreter};
pub use registrator::{register_test_plugins, unregister_test_plugins};
