// SPDX-FileCopyrightText: 2026 Masala Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixture file interpreters. Both claim the `structure_file` descriptor.

use masala_core::Independent;
use masala_plugin::{DescribeApi, FileInterpreter};

pub const NAMESPACE: &str = "masala::test_utils::file_interpreters";

#[derive(Debug, Clone, Default)]
pub struct PdbFileInterpreter;

fixture_identity!(
    PdbFileInterpreter,
    "PdbFileInterpreter",
    NAMESPACE,
    [["FileInterpreter", "StructureFileInterpreter"]],
    ["pdb", "structure"]
);

impl Independent for PdbFileInterpreter {
    fn make_independent(&mut self) {}
}

impl DescribeApi for PdbFileInterpreter {}

impl FileInterpreter for PdbFileInterpreter {
    fn file_descriptors(&self) -> Vec<String> {
        vec!["protein_data_bank_file".into(), "structure_file".into()]
    }

    fn file_extensions(&self) -> Vec<String> {
        vec!["PDB".into(), "ent".into()]
    }
}

#[derive(Debug, Clone, Default)]
pub struct CifFileInterpreter;

fixture_identity!(
    CifFileInterpreter,
    "CifFileInterpreter",
    NAMESPACE,
    [["FileInterpreter", "StructureFileInterpreter"]],
    ["cif", "structure"]
);

impl Independent for CifFileInterpreter {
    fn make_independent(&mut self) {}
}

impl DescribeApi for CifFileInterpreter {}

impl FileInterpreter for CifFileInterpreter {
    fn file_descriptors(&self) -> Vec<String> {
        vec!["crystallographic_information_file".into(), "structure_file".into()]
    }

    fn file_extensions(&self) -> Vec<String> {
        vec!["cif".into(), "mmcif".into()]
    }
}
