// SPDX-FileCopyrightText: 2026 Masala Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin creators: one factory per plugin class.
//!
//! A creator constructs bare instances of its plugin wrapped in a
//! [`PluginApi`], wraps caller-supplied instances, and reports the plugin's
//! identity and metadata, so the registries never need the concrete type.

use std::any::Any;
use std::sync::{Arc, Mutex};

use masala_core::types::{CategoryPath, join_namespace_and_name};
use masala_core::{MasalaError, MasalaObject, Result};

use crate::plugin_api::{DescribeApi, PluginApi, PluginApiObject};

/// Object-safe factory for one plugin class.
pub trait PluginCreator: MasalaObject {
    /// A fresh instance of the plugin, wrapped in its API shim.
    fn create_plugin_object(&self) -> Result<Arc<dyn PluginApiObject>>;

    /// Wrap an existing instance without copying it.
    ///
    /// `instance` must be an `Arc<Mutex<P>>` for this creator's plugin type
    /// `P`. A caller that keeps its own reference to the instance gives up
    /// the shim's locking guarantee for whatever it does outside the lock.
    fn encapsulate_plugin_object_instance(
        &self,
        instance: Arc<dyn Any + Send + Sync>,
    ) -> Result<Arc<dyn PluginApiObject>>;

    /// As [`encapsulate_plugin_object_instance`](Self::encapsulate_plugin_object_instance),
    /// producing a shim that refuses mutation.
    fn encapsulate_const_plugin_object_instance(
        &self,
        instance: Arc<dyn Any + Send + Sync>,
    ) -> Result<Arc<dyn PluginApiObject>>;

    /// Hierarchical categories, primary first.
    fn plugin_object_categories(&self) -> Vec<CategoryPath>;

    fn plugin_object_keywords(&self) -> Vec<String>;

    fn plugin_object_name(&self) -> String;

    fn plugin_object_namespace(&self) -> String;

    fn plugin_object_namespace_and_name(&self) -> String {
        join_namespace_and_name(&self.plugin_object_namespace(), &self.plugin_object_name())
    }

    /// The registry key: the segments of the first category joined by
    /// commas, then `:`, then the plugin name.
    ///
    /// Fails if there are no categories or the first one is empty.
    fn plugin_object_manager_key(&self) -> Result<String> {
        let categories = self.plugin_object_categories();
        let Some(first) = categories.first() else {
            return Err(self.contract_error(
                "plugin_object_manager_key",
                format!(
                    "No categories were specified for plugin object type \"{}\".",
                    self.plugin_object_namespace_and_name()
                ),
            ));
        };
        if first.is_empty() {
            return Err(self.contract_error(
                "plugin_object_manager_key",
                format!(
                    "No hierarchical category relationship was specified for the first category \
                     for plugin object type \"{}\".",
                    self.plugin_object_namespace_and_name()
                ),
            ));
        }
        Ok(format!("{}:{}", first.join(","), self.plugin_object_name()))
    }

    /// Creators are equal when they make the same plugin under the same key.
    fn same_plugin_as(&self, other: &dyn PluginCreator) -> bool {
        self.plugin_object_namespace_and_name() == other.plugin_object_namespace_and_name()
            && self.plugin_object_manager_key().ok() == other.plugin_object_manager_key().ok()
    }
}

impl std::fmt::Debug for dyn PluginCreator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginCreator")
            .field("plugin", &self.plugin_object_namespace_and_name())
            .finish()
    }
}

/// Generic creator for any plugin type with a default constructor.
///
/// A prototype instance answers the metadata queries; each
/// [`create`](Self::create) builds a new `P::default()`.
pub struct PluginObjectCreator<P> {
    prototype: P,
}

impl<P: DescribeApi + Default> PluginObjectCreator<P> {
    pub fn new() -> Self {
        Self {
            prototype: P::default(),
        }
    }

    /// A shared creator, as the registries take it.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// A fresh instance wrapped in its concrete shim type.
    pub fn create(&self) -> PluginApi<P> {
        PluginApi::new(P::default())
    }

    pub(crate) fn prototype(&self) -> &P {
        &self.prototype
    }

    pub(crate) fn downcast_instance(
        &self,
        function: &str,
        instance: Arc<dyn Any + Send + Sync>,
    ) -> Result<Arc<Mutex<P>>> {
        instance.downcast::<Mutex<P>>().map_err(|_| {
            MasalaError::contract(
                self.class_namespace_and_name(),
                function,
                format!(
                    "The object passed to this function is not a {} instance.",
                    self.plugin_object_namespace_and_name()
                ),
            )
        })
    }
}

impl<P: DescribeApi + Default> Default for PluginObjectCreator<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: DescribeApi> std::fmt::Debug for PluginObjectCreator<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginObjectCreator")
            .field("plugin", &self.prototype.class_namespace_and_name())
            .finish()
    }
}

impl<P: DescribeApi> MasalaObject for PluginObjectCreator<P> {
    fn class_name(&self) -> String {
        format!("{}Creator", self.prototype.class_name())
    }

    fn class_namespace(&self) -> String {
        self.prototype.class_namespace()
    }
}

impl<P: DescribeApi + Default> PluginCreator for PluginObjectCreator<P> {
    fn create_plugin_object(&self) -> Result<Arc<dyn PluginApiObject>> {
        Ok(Arc::new(self.create()))
    }

    fn encapsulate_plugin_object_instance(
        &self,
        instance: Arc<dyn Any + Send + Sync>,
    ) -> Result<Arc<dyn PluginApiObject>> {
        let inner = self.downcast_instance("encapsulate_plugin_object_instance", instance)?;
        Ok(Arc::new(PluginApi::encapsulate(inner)))
    }

    fn encapsulate_const_plugin_object_instance(
        &self,
        instance: Arc<dyn Any + Send + Sync>,
    ) -> Result<Arc<dyn PluginApiObject>> {
        let inner = self.downcast_instance("encapsulate_const_plugin_object_instance", instance)?;
        Ok(Arc::new(PluginApi::encapsulate_const(inner)))
    }

    fn plugin_object_categories(&self) -> Vec<CategoryPath> {
        self.prototype.categories()
    }

    fn plugin_object_keywords(&self) -> Vec<String> {
        self.prototype.keywords()
    }

    fn plugin_object_name(&self) -> String {
        self.prototype.class_name()
    }

    fn plugin_object_namespace(&self) -> String {
        self.prototype.class_namespace()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use masala_core::{Independent, Plugin, category_path};
    use proptest::prelude::*;

    #[derive(Debug, Clone, Default)]
    struct FooSelector;

    impl MasalaObject for FooSelector {
        fn class_name(&self) -> String {
            "FooSelector".into()
        }
        fn class_namespace(&self) -> String {
            "masala::tests::select".into()
        }
    }

    impl Plugin for FooSelector {
        fn categories(&self) -> Vec<CategoryPath> {
            vec![category_path(&["Selector", "AtomSelector"])]
        }
        fn keywords(&self) -> Vec<String> {
            vec!["atom".into(), "selector".into()]
        }
    }

    impl Independent for FooSelector {
        fn make_independent(&mut self) {}
    }

    impl DescribeApi for FooSelector {}

    /// A creator with configurable metadata, for key tests.
    struct MetadataCreator {
        name: String,
        categories: Vec<CategoryPath>,
    }

    impl MasalaObject for MetadataCreator {
        fn class_name(&self) -> String {
            "MetadataCreator".into()
        }
        fn class_namespace(&self) -> String {
            "masala::tests".into()
        }
    }

    impl PluginCreator for MetadataCreator {
        fn create_plugin_object(&self) -> Result<Arc<dyn PluginApiObject>> {
            Ok(Arc::new(PluginApi::new(FooSelector)))
        }
        fn encapsulate_plugin_object_instance(
            &self,
            _instance: Arc<dyn Any + Send + Sync>,
        ) -> Result<Arc<dyn PluginApiObject>> {
            Err(self.contract_error("encapsulate_plugin_object_instance", "unsupported".into()))
        }
        fn encapsulate_const_plugin_object_instance(
            &self,
            _instance: Arc<dyn Any + Send + Sync>,
        ) -> Result<Arc<dyn PluginApiObject>> {
            Err(self.contract_error("encapsulate_const_plugin_object_instance", "unsupported".into()))
        }
        fn plugin_object_categories(&self) -> Vec<CategoryPath> {
            self.categories.clone()
        }
        fn plugin_object_keywords(&self) -> Vec<String> {
            Vec::new()
        }
        fn plugin_object_name(&self) -> String {
            self.name.clone()
        }
        fn plugin_object_namespace(&self) -> String {
            "masala::tests".into()
        }
    }

    #[test]
    fn manager_key_joins_first_category() {
        let creator = PluginObjectCreator::<FooSelector>::new();
        assert_eq!(
            creator.plugin_object_manager_key().unwrap(),
            "Selector,AtomSelector:FooSelector"
        );
        assert_eq!(creator.class_name(), "FooSelectorCreator");
        assert_eq!(
            creator.plugin_object_namespace_and_name(),
            "masala::tests::select::FooSelector"
        );
    }

    #[test]
    fn manager_key_requires_categories() {
        let none = MetadataCreator {
            name: "X".into(),
            categories: vec![],
        };
        let err = none.plugin_object_manager_key().unwrap_err();
        assert!(err.message().contains("No categories were specified"));

        let empty_first = MetadataCreator {
            name: "X".into(),
            categories: vec![vec![], category_path(&["A"])],
        };
        assert!(empty_first.plugin_object_manager_key().is_err());
    }

    #[test]
    fn created_object_matches_creator_identity() {
        let creator = PluginObjectCreator::<FooSelector>::new();
        let object = creator.create_plugin_object().unwrap();
        assert_eq!(object.class_name(), creator.plugin_object_name());
        assert_eq!(object.class_namespace(), creator.plugin_object_namespace());
    }

    #[test]
    fn encapsulation_checks_the_instance_type() {
        let creator = PluginObjectCreator::<FooSelector>::new();
        let good: Arc<dyn Any + Send + Sync> = Arc::new(Mutex::new(FooSelector));
        let wrapped = creator.encapsulate_const_plugin_object_instance(good).unwrap();
        assert!(wrapped.is_const());

        let bad: Arc<dyn Any + Send + Sync> = Arc::new(Mutex::new(5_u32));
        let err = creator.encapsulate_plugin_object_instance(bad).unwrap_err();
        assert!(err.message().contains("is not a masala::tests::select::FooSelector instance"));
    }

    #[test]
    fn equality_uses_name_and_key() {
        let a = PluginObjectCreator::<FooSelector>::new();
        let b = PluginObjectCreator::<FooSelector>::new();
        assert!(a.same_plugin_as(&b));
        let other = MetadataCreator {
            name: "FooSelector".into(),
            categories: vec![category_path(&["Selector", "AtomSelector"])],
        };
        assert!(!a.same_plugin_as(&other));
    }

    proptest! {
        #[test]
        fn manager_key_is_deterministic(
            segments in prop::collection::vec("[A-Za-z]{1,8}", 1..5),
            extra in prop::collection::vec(prop::collection::vec("[A-Za-z]{1,8}", 0..3), 0..3),
            name in "[A-Z][A-Za-z]{0,10}",
        ) {
            let mut categories = vec![segments.clone()];
            categories.extend(extra);
            let creator = MetadataCreator { name: name.clone(), categories };
            let key = creator.plugin_object_manager_key().unwrap();
            prop_assert_eq!(&key, &format!("{}:{}", segments.join(","), name));
            prop_assert_eq!(key, creator.plugin_object_manager_key().unwrap());
        }
    }
}
