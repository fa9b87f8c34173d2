// SPDX-FileCopyrightText: 2026 Masala Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The plugin API shim.
//!
//! A [`PluginApi`] owns one inner plugin instance behind a mutex. Every read
//! or write of the inner object from the outside goes through that mutex,
//! and the shim forwards class identity and builds the reflective API
//! definition of the inner type.

use std::any::Any;
use std::sync::{Arc, Mutex, Weak};

use masala_core::api::{ApiDefinition, ApiDefinitionCache, ConstructorDefinition};
use masala_core::sync::{lock, lock_pair};
use masala_core::types::{CategoryPath, join_namespace_and_name};
use masala_core::{Independent, MasalaError, MasalaObject, Plugin, Result};
use tracing::debug;

/// Object-safe view of a plugin API shim, as handed out by creators and
/// managers.
pub trait PluginApiObject: MasalaObject {
    /// Class name of the wrapped plugin.
    fn inner_class_name(&self) -> String;

    /// Namespace of the wrapped plugin.
    fn inner_class_namespace(&self) -> String;

    fn inner_class_namespace_and_name(&self) -> String {
        join_namespace_and_name(&self.inner_class_namespace(), &self.inner_class_name())
    }

    fn plugin_categories(&self) -> Vec<CategoryPath>;

    fn plugin_keywords(&self) -> Vec<String>;

    /// Whether this shim refuses mutation of the inner object.
    fn is_const(&self) -> bool;

    fn as_any(&self) -> &dyn Any;
}

impl std::fmt::Debug for dyn PluginApiObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginApiObject")
            .field("inner", &self.inner_class_namespace_and_name())
            .field("is_const", &self.is_const())
            .finish()
    }
}

/// Types that describe their own public API for the shim.
///
/// The provided methods give a plugin with no extra API a definition that
/// holds only the copy constructor the shim adds.
pub trait DescribeApi: Plugin + Independent + 'static {
    fn api_description(&self) -> String {
        format!("The {} plugin.", self.class_name())
    }

    fn is_lightweight(&self) -> bool {
        false
    }

    /// Add the getters, setters and work functions of this type.
    ///
    /// Bindings should capture a clone of `inner` so that each call goes
    /// through the shim's mutex.
    fn describe_api(_definition: &mut ApiDefinition, _inner: &InnerHandle<Self>) -> Result<()> {
        Ok(())
    }
}

/// Shared, lock-guarded access to the inner object of a shim.
pub struct InnerHandle<P> {
    inner: Arc<Mutex<P>>,
    is_const: bool,
}

impl<P> Clone for InnerHandle<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            is_const: self.is_const,
        }
    }
}

impl<P: MasalaObject> InnerHandle<P> {
    /// Run `f` with the inner object locked for reading.
    pub fn read<R>(&self, f: impl FnOnce(&P) -> R) -> R {
        let guard = lock(&self.inner);
        f(&guard)
    }

    /// Run `f` with the inner object locked for writing.
    ///
    /// Fails with a contract error when the handle belongs to a const shim.
    pub fn write<R>(&self, function: &str, f: impl FnOnce(&mut P) -> R) -> Result<R> {
        if self.is_const {
            let guard = lock(&self.inner);
            return Err(guard.contract_error(
                function,
                "Cannot modify an object encapsulated as const.".to_string(),
            ));
        }
        let mut guard = lock(&self.inner);
        Ok(f(&mut guard))
    }

    pub fn is_const(&self) -> bool {
        self.is_const
    }
}

/// Generic API shim over any plugin type.
///
/// Cloning a shim takes the inner lock and produces a new shim around a
/// shallow copy of the inner object; the copy is never const and starts with
/// an empty API definition.
pub struct PluginApi<P> {
    handle: InnerHandle<P>,
    class_name: String,
    class_namespace: String,
    api_definition: ApiDefinitionCache,
}

impl<P> std::fmt::Debug for PluginApi<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginApi")
            .field("inner", &join_namespace_and_name(&self.class_namespace, &self.class_name))
            .field("is_const", &self.handle.is_const)
            .field("api_definition_built", &self.api_definition.is_built())
            .finish()
    }
}

impl<P: DescribeApi> PluginApi<P> {
    /// Wrap a freshly constructed inner object.
    pub fn new(inner: P) -> Self {
        Self::from_parts(Arc::new(Mutex::new(inner)), false)
    }

    /// Wrap an existing shared instance without copying it.
    ///
    /// Code that keeps its own clone of `inner` can still lock the same
    /// mutex, but anything it does outside that lock is not protected by
    /// this shim.
    pub fn encapsulate(inner: Arc<Mutex<P>>) -> Self {
        Self::from_parts(inner, false)
    }

    /// Like [`encapsulate`](Self::encapsulate), but every mutation through
    /// the shim fails.
    pub fn encapsulate_const(inner: Arc<Mutex<P>>) -> Self {
        Self::from_parts(inner, true)
    }

    fn from_parts(inner: Arc<Mutex<P>>, is_const: bool) -> Self {
        let (class_name, class_namespace) = {
            let guard = lock(&inner);
            (guard.class_name(), guard.class_namespace())
        };
        Self {
            handle: InnerHandle { inner, is_const },
            class_name,
            class_namespace,
            api_definition: ApiDefinitionCache::new(),
        }
    }

    /// Read the inner object under the shim's lock.
    pub fn with_inner<R>(&self, f: impl FnOnce(&P) -> R) -> R {
        self.handle.read(f)
    }

    /// Modify the inner object under the shim's lock.
    pub fn with_inner_mut<R>(&self, f: impl FnOnce(&mut P) -> R) -> Result<R> {
        self.handle.write("with_inner_mut", f)
    }

    /// The shared inner object itself. Use with care: the caller becomes
    /// responsible for taking the lock.
    pub fn inner_object(&self) -> Arc<Mutex<P>> {
        Arc::clone(&self.handle.inner)
    }

    /// Lock-guarded access for API bindings.
    pub fn inner_handle(&self) -> InnerHandle<P> {
        self.handle.clone()
    }

    /// Replace the inner state of `self` with a shallow copy of `source`'s.
    ///
    /// Both inner locks are taken in address order, so two threads assigning
    /// two shims to each other cannot deadlock. Assigning a shim to itself,
    /// or to another shim over the same inner object, does nothing.
    pub fn assign_from(&self, source: &PluginApi<P>) -> Result<()> {
        if self.handle.is_const {
            return Err(MasalaError::contract(
                self.class_namespace_and_name(),
                "assign_from",
                "Cannot assign to an object encapsulated as const.",
            ));
        }
        let (mut target, source_guard) = lock_pair(&self.handle.inner, &source.handle.inner);
        if let Some(source_guard) = source_guard {
            *target = (*source_guard).clone();
        }
        Ok(())
    }

    fn build_api_definition(&self) -> Result<ApiDefinition> {
        let mut definition = self.handle.read(|inner| {
            ApiDefinition::for_plugin(inner, &inner.api_description(), inner.is_lightweight())
        });
        definition.add_constructor(ConstructorDefinition::new::<(Arc<PluginApi<P>>,), PluginApi<P>, _>(
            &self.class_name,
            &format!(
                "Copy constructor: makes a fully independent copy of an existing {} object.",
                self.class_name
            ),
            &[("src", "The object to copy.")],
            |(src,)| Ok(src.deep_clone()),
        )?);
        P::describe_api(&mut definition, &self.handle)?;
        Ok(definition)
    }
}

impl<P: DescribeApi> Clone for PluginApi<P> {
    fn clone(&self) -> Self {
        Self::new(self.handle.read(P::clone))
    }
}

impl<P: DescribeApi> Independent for PluginApi<P> {
    /// Detach from any other holder of the inner object by giving this shim
    /// a private, deep copy of it.
    fn make_independent(&mut self) {
        let copy = self.handle.read(P::deep_clone);
        self.handle.inner = Arc::new(Mutex::new(copy));
        self.api_definition.clear();
    }
}

impl<P: DescribeApi> MasalaObject for PluginApi<P> {
    fn class_name(&self) -> String {
        self.class_name.clone()
    }

    fn class_namespace(&self) -> String {
        self.class_namespace.clone()
    }

    fn api_definition(&self) -> Result<Option<Weak<ApiDefinition>>> {
        let weak = self.api_definition.get_or_build(|| {
            debug!(
                target: "masala::plugin_api",
                class = %self.class_namespace_and_name(),
                "building plugin API definition"
            );
            self.build_api_definition()
        })?;
        Ok(Some(weak))
    }
}

impl<P: DescribeApi> PluginApiObject for PluginApi<P> {
    fn inner_class_name(&self) -> String {
        self.class_name.clone()
    }

    fn inner_class_namespace(&self) -> String {
        self.class_namespace.clone()
    }

    fn plugin_categories(&self) -> Vec<CategoryPath> {
        self.handle.read(|inner| inner.categories())
    }

    fn plugin_keywords(&self) -> Vec<String> {
        self.handle.read(|inner| inner.keywords())
    }

    fn is_const(&self) -> bool {
        self.handle.is_const
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use masala_core::api::SetterDefinition;
    use masala_core::category_path;
    use std::thread;

    #[derive(Debug, Clone, Default)]
    struct Counter {
        count: i64,
        history: Arc<Mutex<Vec<i64>>>,
    }

    impl MasalaObject for Counter {
        fn class_name(&self) -> String {
            "Counter".into()
        }
        fn class_namespace(&self) -> String {
            "masala::tests::plugin_api".into()
        }
    }

    impl Plugin for Counter {
        fn categories(&self) -> Vec<CategoryPath> {
            vec![category_path(&["Test", "Counter"])]
        }
        fn keywords(&self) -> Vec<String> {
            vec!["counter".into()]
        }
    }

    impl Independent for Counter {
        fn make_independent(&mut self) {
            let copy = lock(&self.history).clone();
            self.history = Arc::new(Mutex::new(copy));
        }
    }

    impl DescribeApi for Counter {
        fn describe_api(definition: &mut ApiDefinition, inner: &InnerHandle<Self>) -> Result<()> {
            let handle = inner.clone();
            definition.add_setter(SetterDefinition::new::<(i64,), _>(
                "set_count",
                "Set the count.",
                &[("count", "The new count.")],
                move |(count,)| handle.write("set_count", |c| c.count = count),
            )?);
            Ok(())
        }
    }

    fn counter(count: i64) -> PluginApi<Counter> {
        PluginApi::new(Counter {
            count,
            ..Counter::default()
        })
    }

    #[test]
    fn forwards_identity_and_metadata() {
        let api = counter(3);
        assert_eq!(api.class_name(), "Counter");
        assert_eq!(api.inner_class_namespace_and_name(), "masala::tests::plugin_api::Counter");
        assert_eq!(api.plugin_keywords(), vec!["counter"]);
        assert!(!api.is_const());
    }

    #[test]
    fn api_definition_binds_through_the_shim() {
        let api = counter(0);
        let weak = api.api_definition().unwrap().unwrap();
        let definition = weak.upgrade().unwrap();
        assert_eq!(definition.n_constructors(), 1);
        assert!(definition.is_plugin_class());
        definition
            .setter_named("set_count")
            .unwrap()
            .set((42_i64,))
            .unwrap();
        assert_eq!(api.with_inner(|c| c.count), 42);
        assert!(api.has_api_definition());
    }

    #[test]
    fn copy_constructor_produces_independent_copy() {
        let api = Arc::new(counter(5));
        api.with_inner(|c| lock(&c.history).push(1));
        let definition = api.api_definition().unwrap().unwrap().upgrade().unwrap();
        let copy: PluginApi<Counter> = definition
            .constructor(0)
            .unwrap()
            .construct((Arc::clone(&api),))
            .unwrap();
        api.with_inner(|c| lock(&c.history).push(2));
        assert_eq!(copy.with_inner(|c| lock(&c.history).clone()), vec![1]);
        assert_eq!(copy.with_inner(|c| c.count), 5);
    }

    #[test]
    fn const_encapsulation_refuses_writes() {
        let shared = Arc::new(Mutex::new(Counter::default()));
        let api = PluginApi::encapsulate_const(Arc::clone(&shared));
        assert!(api.is_const());
        let err = api.with_inner_mut(|c| c.count = 1).unwrap_err();
        assert!(err.to_string().contains("encapsulated as const"));
        assert!(api.assign_from(&counter(9)).is_err());
        assert_eq!(lock(&shared).count, 0);
    }

    #[test]
    fn encapsulate_shares_without_copying() {
        let shared = Arc::new(Mutex::new(Counter::default()));
        let api = PluginApi::encapsulate(Arc::clone(&shared));
        api.with_inner_mut(|c| c.count = 7).unwrap();
        assert_eq!(lock(&shared).count, 7);
        assert!(Arc::ptr_eq(&api.inner_object(), &shared));
    }

    #[test]
    fn shallow_clone_shares_sub_objects_deep_clone_does_not() {
        let api = counter(1);
        let shallow = api.clone();
        let deep = api.deep_clone();
        api.with_inner(|c| lock(&c.history).push(10));
        assert_eq!(shallow.with_inner(|c| lock(&c.history).len()), 1);
        assert_eq!(deep.with_inner(|c| lock(&c.history).len()), 0);

        let mut again = deep.deep_clone();
        again.make_independent();
        assert_eq!(again.with_inner(|c| c.count), deep.with_inner(|c| c.count));
    }

    #[test]
    fn self_assignment_is_a_no_op() {
        let api = counter(4);
        api.assign_from(&api).unwrap();
        assert_eq!(api.with_inner(|c| c.count), 4);
    }

    #[test]
    fn concurrent_cross_assignment_does_not_deadlock() {
        let a = Arc::new(counter(1));
        let b = Arc::new(counter(2));
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let (x, y) = if i % 2 == 0 {
                    (Arc::clone(&a), Arc::clone(&b))
                } else {
                    (Arc::clone(&b), Arc::clone(&a))
                };
                thread::spawn(move || {
                    for _ in 0..500 {
                        x.assign_from(&y).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        let (va, vb) = (a.with_inner(|c| c.count), b.with_inner(|c| c.count));
        assert!([1, 2].contains(&va));
        assert!([1, 2].contains(&vb));
    }
}
