// SPDX-FileCopyrightText: 2026 Masala Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Setter annotation naming which data representations a setter accepts.

use std::any::Any;
use std::sync::Arc;

use masala_core::api::SetterDefinition;
use masala_core::api::annotation::{FunctionAnnotation, SetterAnnotation};
use masala_core::types::{CategoryPath, split_namespace_and_name};
use masala_core::{MasalaObject, Result};
use serde_json::{Map, Value, json};

use crate::criterion::{DataRepresentationRequest, KeywordCriterionMode};
use crate::data_representation::{DataRepresentationApiObject, DataRepresentationCreator};
use crate::manager::DataRepresentationManager;

/// Marks a setter taking one `Arc<dyn DataRepresentationApiObject>` and
/// records which registered data representations may be passed to it.
///
/// Eligible representations are those in `category` (and its
/// subcategories, if enabled) having at least one of `keywords`. An empty
/// category or keyword list does not restrict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferredTemplateDataRepresentationSetterAnnotation {
    category: CategoryPath,
    include_subcategory: bool,
    keywords: Vec<String>,
}

impl PreferredTemplateDataRepresentationSetterAnnotation {
    pub fn new(category: CategoryPath, keywords: Vec<String>, include_subcategory: bool) -> Self {
        Self {
            category,
            include_subcategory,
            keywords,
        }
    }

    pub fn data_representation_manager_input_object_category(&self) -> &[String] {
        &self.category
    }

    pub fn data_representation_manager_include_subcategory(&self) -> bool {
        self.include_subcategory
    }

    pub fn data_representation_manager_input_object_keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Names of the currently registered data representations this setter
    /// accepts, short or with namespace.
    pub fn names_of_eligible_owned_objects(&self, short_names: bool) -> Result<Vec<String>> {
        Ok(self
            .eligible_creators()?
            .iter()
            .map(|creator| {
                if short_names {
                    creator.plugin_object_name()
                } else {
                    creator.plugin_object_namespace_and_name()
                }
            })
            .collect())
    }

    pub fn short_names_of_eligible_owned_objects(&self) -> Result<Vec<String>> {
        self.names_of_eligible_owned_objects(true)
    }

    /// A fresh, empty instance of the eligible data representation named
    /// `object_name`, given short or with namespace. A short name shared by
    /// several eligible classes picks the first in name order.
    pub fn create_empty_data_representation(
        &self,
        object_name: &str,
    ) -> Result<Arc<dyn DataRepresentationApiObject>> {
        let creator = self
            .eligible_creators()?
            .into_iter()
            .find(|creator| {
                creator.plugin_object_name() == object_name
                    || creator.plugin_object_namespace_and_name() == object_name
            })
            .ok_or_else(|| {
                self.contract_error(
                    "create_empty_data_representation",
                    format!("The {object_name} class is not compatible with this object."),
                )
            })?;
        creator.create_data_representation()
    }

    fn eligible_creators(&self) -> Result<Vec<Arc<dyn DataRepresentationCreator>>> {
        let mut request = DataRepresentationRequest::new();
        if !self.category.is_empty() {
            request.add_data_representation_category_requirement(
                vec![self.category.clone()],
                self.include_subcategory,
            );
        }
        if !self.keywords.is_empty() {
            request.add_data_representation_keyword_requirement(
                self.keywords.clone(),
                KeywordCriterionMode::MustHaveAtLeastOne,
            )?;
        }
        DataRepresentationManager::get_instance().compatible_data_representation_creators(&request)
    }

    /// Pass `object` to `setter` after checking that it is eligible.
    pub fn set_object(
        &self,
        object: Arc<dyn DataRepresentationApiObject>,
        setter: &SetterDefinition,
    ) -> Result<()> {
        if !self.is_compatible_with_setter(setter) {
            return Err(self.contract_error(
                "set_object",
                format!(
                    "Expected the \"{}\" function to take a single data representation, but it \
                     takes {} inputs.",
                    setter.name(),
                    setter.n_inputs()
                ),
            ));
        }
        let eligible = self.names_of_eligible_owned_objects(false)?;
        let full_name = object.inner_class_namespace_and_name();
        if !eligible.contains(&full_name) {
            return Err(self.contract_error(
                "set_object",
                format!(
                    "The {} class is not something that can be passed to the {}() function.",
                    split_namespace_and_name(&full_name).1,
                    setter.name()
                ),
            ));
        }
        setter.set((object,))
    }
}

impl MasalaObject for PreferredTemplateDataRepresentationSetterAnnotation {
    fn class_name(&self) -> String {
        "PreferredTemplateDataRepresentationSetterAnnotation".into()
    }

    fn class_namespace(&self) -> String {
        "masala::base::api::setter::setter_annotation".into()
    }
}

impl FunctionAnnotation for PreferredTemplateDataRepresentationSetterAnnotation {
    fn additional_description(&self) -> String {
        let mut text = String::from("This setter accepts a data representation");
        if !self.category.is_empty() {
            text.push_str(&format!(" in category [ {} ]", self.category.join(", ")));
            if self.include_subcategory {
                text.push_str(" or its subcategories");
            }
        }
        if !self.keywords.is_empty() {
            text.push_str(&format!(
                " with at least one of the keywords [ {} ]",
                self.keywords.join(", ")
            ));
        }
        text.push('.');
        text
    }

    fn modify_json_description(&self, json: &mut Map<String, Value>) {
        json.insert(
            "Preferred_Data_Representation".into(),
            json!({
                "Category": self.category,
                "Include_Subcategories": self.include_subcategory,
                "Keywords": self.keywords,
            }),
        );
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl SetterAnnotation for PreferredTemplateDataRepresentationSetterAnnotation {
    fn is_compatible_with_setter(&self, setter: &SetterDefinition) -> bool {
        setter.takes_single::<Arc<dyn DataRepresentationApiObject>>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use masala_core::category_path;

    fn annotation() -> PreferredTemplateDataRepresentationSetterAnnotation {
        PreferredTemplateDataRepresentationSetterAnnotation::new(
            category_path(&["Grid"]),
            vec!["grid".into()],
            true,
        )
    }

    #[test]
    fn attaches_only_to_data_representation_setters() {
        let mut good = SetterDefinition::new::<(Arc<dyn DataRepresentationApiObject>,), _>(
            "set_grid",
            "Set the grid.",
            &[("grid", "The grid to use.")],
            |_| Ok(()),
        )
        .unwrap();
        assert!(good.add_annotation(Arc::new(annotation())).is_ok());
        assert!(
            good.find_annotation::<PreferredTemplateDataRepresentationSetterAnnotation>()
                .is_some()
        );

        let mut bad = SetterDefinition::new::<(f64,), _>(
            "set_spacing",
            "Set the spacing.",
            &[("spacing", "Grid spacing.")],
            |_| Ok(()),
        )
        .unwrap();
        assert!(bad.add_annotation(Arc::new(annotation())).is_err());
    }

    #[test]
    fn description_and_json() {
        let annotation = annotation();
        assert_eq!(
            annotation.additional_description(),
            "This setter accepts a data representation in category [ Grid ] or its \
             subcategories with at least one of the keywords [ grid ]."
        );
        let mut json = Map::new();
        annotation.modify_json_description(&mut json);
        assert_eq!(
            json["Preferred_Data_Representation"]["Keywords"],
            json!(["grid"])
        );
        assert_eq!(
            json["Preferred_Data_Representation"]["Include_Subcategories"],
            json!(true)
        );
    }
}
