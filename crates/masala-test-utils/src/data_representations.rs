// SPDX-FileCopyrightText: 2026 Masala Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixture data representations.
//!
//! `DenseGrid` declares itself compatible with
//! [`Analytic`](crate::Analytic). `SparseGrid` sits in a grid subcategory
//! and declares nothing. `PointCloud` is outside the grid category.

use masala_core::types::CategoryPath;
use masala_core::{Independent, category_path};
use masala_plugin::{DataRepresentation, DescribeApi};

pub const NAMESPACE: &str = "masala::test_utils::data_representations";

#[derive(Debug, Clone, Default)]
pub struct DenseGrid {
    pub values: Vec<f64>,
    pub spacing: Option<f64>,
}

fixture_identity!(
    DenseGrid,
    "DenseGrid",
    NAMESPACE,
    [["DataRepresentation", "Grid"]],
    ["grid", "dense"]
);

impl Independent for DenseGrid {
    fn make_independent(&mut self) {}
}

impl DescribeApi for DenseGrid {}

impl DataRepresentation for DenseGrid {
    fn data_representation_categories(&self) -> Vec<CategoryPath> {
        vec![category_path(&["Grid"])]
    }

    fn data_representation_keywords(&self) -> Vec<String> {
        vec!["grid".into(), "dense".into()]
    }

    fn compatible_masala_engines(&self) -> Vec<String> {
        vec!["masala::test_utils::engines::Analytic".into()]
    }

    fn present_data_representation_properties(&self) -> Vec<String> {
        vec!["regular_spacing".into()]
    }

    fn empty(&self) -> bool {
        self.values.is_empty()
    }

    fn clear(&mut self) {
        self.values.clear();
    }

    fn reset(&mut self) {
        self.values.clear();
        self.spacing = None;
    }
}

#[derive(Debug, Clone, Default)]
pub struct SparseGrid {
    pub cells: Vec<(usize, f64)>,
}

fixture_identity!(
    SparseGrid,
    "SparseGrid",
    NAMESPACE,
    [["DataRepresentation", "Grid", "Sparse"]],
    ["grid", "sparse"]
);

impl Independent for SparseGrid {
    fn make_independent(&mut self) {}
}

impl DescribeApi for SparseGrid {}

impl DataRepresentation for SparseGrid {
    fn data_representation_categories(&self) -> Vec<CategoryPath> {
        vec![category_path(&["Grid", "Sparse"])]
    }

    fn data_representation_keywords(&self) -> Vec<String> {
        vec!["grid".into(), "sparse".into()]
    }

    fn absent_data_representation_properties(&self) -> Vec<String> {
        vec!["regular_spacing".into()]
    }

    fn empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn clear(&mut self) {
        self.cells.clear();
    }

    fn reset(&mut self) {
        self.cells.clear();
    }
}

#[derive(Debug, Clone, Default)]
pub struct PointCloud {
    pub points: Vec<[f64; 3]>,
}

fixture_identity!(
    PointCloud,
    "PointCloud",
    NAMESPACE,
    [["DataRepresentation", "Cloud"]],
    ["cloud"]
);

impl Independent for PointCloud {
    fn make_independent(&mut self) {}
}

impl DescribeApi for PointCloud {}

impl DataRepresentation for PointCloud {
    fn data_representation_categories(&self) -> Vec<CategoryPath> {
        vec![category_path(&["Cloud"])]
    }

    fn data_representation_keywords(&self) -> Vec<String> {
        vec!["cloud".into()]
    }

    fn incompatible_masala_engines(&self) -> Vec<String> {
        vec!["masala::test_utils::engines::Analytic".into()]
    }

    fn empty(&self) -> bool {
        self.points.is_empty()
    }

    fn clear(&mut self) {
        self.points.clear();
    }

    fn reset(&mut self) {
        self.points.clear();
    }
}
