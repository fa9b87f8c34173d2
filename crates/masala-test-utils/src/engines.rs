// SPDX-FileCopyrightText: 2026 Masala Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixture engines.
//!
//! `Analytic` and `Numeric` are kinematic solvers; `GenericSolver` sits one
//! category level higher. `Numeric` rejects [`SparseGrid`](crate::SparseGrid).

use std::sync::Arc;

use masala_core::api::{ApiDefinition, SetterDefinition};
use masala_core::types::CategoryPath;
use masala_core::{Independent, Result, category_path};
use masala_plugin::{
    DataRepresentationApiObject, DataRepresentationCreator, DescribeApi, Engine, InnerHandle,
    PluginApiObject, PreferredTemplateDataRepresentationSetterAnnotation,
};

pub const NAMESPACE: &str = "masala::test_utils::engines";

/// Closed-form kinematic solver.
#[derive(Debug, Clone, Default)]
pub struct Analytic {
    pub tolerance: f64,
}

fixture_identity!(
    Analytic,
    "Analytic",
    NAMESPACE,
    [["Solver", "KinematicSolver"]],
    ["solver", "kinematic", "analytic"]
);

impl Independent for Analytic {
    fn make_independent(&mut self) {}
}

impl DescribeApi for Analytic {}

impl Engine for Analytic {
    fn engine_categories(&self) -> Vec<CategoryPath> {
        vec![category_path(&["Solver", "KinematicSolver"])]
    }

    fn engine_keywords(&self) -> Vec<String> {
        vec!["kinematic".into(), "analytic".into()]
    }
}

/// Iterative kinematic solver.
#[derive(Debug, Clone, Default)]
pub struct Numeric {
    pub max_iterations: usize,
}

fixture_identity!(
    Numeric,
    "Numeric",
    NAMESPACE,
    [["Solver", "KinematicSolver"]],
    ["solver", "kinematic", "numeric"]
);

impl Independent for Numeric {
    fn make_independent(&mut self) {}
}

impl DescribeApi for Numeric {}

impl Engine for Numeric {
    fn engine_categories(&self) -> Vec<CategoryPath> {
        vec![category_path(&["Solver", "KinematicSolver"])]
    }

    fn engine_keywords(&self) -> Vec<String> {
        vec!["kinematic".into(), "numeric".into()]
    }

    fn data_representation_is_incompatible_with_engine(
        &self,
        creator: &dyn DataRepresentationCreator,
    ) -> bool {
        creator.plugin_object_name() == "SparseGrid"
    }
}

/// Solver that accepts any grid through an annotated setter.
#[derive(Debug, Clone, Default)]
pub struct GenericSolver {
    /// Inner class name of the last grid passed to `set_grid`.
    pub grid_name: Option<String>,
}

fixture_identity!(GenericSolver, "GenericSolver", NAMESPACE, [["Solver"]], ["solver"]);

impl Independent for GenericSolver {
    fn make_independent(&mut self) {}
}

impl DescribeApi for GenericSolver {
    fn api_description(&self) -> String {
        "A solver that works on any grid data representation.".into()
    }

    fn describe_api(definition: &mut ApiDefinition, inner: &InnerHandle<Self>) -> Result<()> {
        let handle = inner.clone();
        let mut set_grid = SetterDefinition::new::<(Arc<dyn DataRepresentationApiObject>,), _>(
            "set_grid",
            "Set the grid the solver works on.",
            &[("grid", "A grid data representation.")],
            move |(grid,)| {
                handle.write("set_grid", |solver| {
                    solver.grid_name = Some(grid.inner_class_name());
                })
            },
        )?;
        set_grid.add_annotation(Arc::new(
            PreferredTemplateDataRepresentationSetterAnnotation::new(
                category_path(&["Grid"]),
                vec!["grid".into()],
                true,
            ),
        ))?;
        definition.add_setter(set_grid);
        Ok(())
    }
}

impl Engine for GenericSolver {
    fn engine_categories(&self) -> Vec<CategoryPath> {
        vec![category_path(&["Solver"])]
    }

    fn engine_keywords(&self) -> Vec<String> {
        vec!["generic".into()]
    }
}
