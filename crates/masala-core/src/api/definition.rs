// SPDX-FileCopyrightText: 2026 Masala Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The per-class API description and its lazily built cache.

use std::sync::{Arc, Mutex, Weak};

use serde_json::{Value, json};
use tracing::debug;

use crate::api::constructor::ConstructorDefinition;
use crate::api::getter::GetterDefinition;
use crate::api::setter::SetterDefinition;
use crate::api::work_function::WorkFunctionDefinition;
use crate::error::{MasalaError, Result};
use crate::sync::lock;
use crate::traits::{MasalaObject, Plugin};
use crate::types::{CategoryPath, join_namespace_and_name};

const ORIGIN: &str = "masala::base::api::ApiDefinition";

/// Description of the public API of one class: its constructors, setters,
/// getters and work functions, each with a bound callable.
///
/// A definition is assembled with the `add_*` methods and then published
/// through an [`ApiDefinitionCache`]; once published it is only read.
#[derive(Debug)]
pub struct ApiDefinition {
    class_name: String,
    class_namespace: String,
    description: String,
    is_lightweight: bool,
    plugin_metadata: Option<(Vec<CategoryPath>, Vec<String>)>,
    constructors: Vec<Arc<ConstructorDefinition>>,
    setters: Vec<Arc<SetterDefinition>>,
    getters: Vec<Arc<GetterDefinition>>,
    work_functions: Vec<Arc<WorkFunctionDefinition>>,
}

impl ApiDefinition {
    /// An empty definition for a non-plugin class.
    ///
    /// Lightweight classes are cheap value types that are usually created
    /// in bulk; user interfaces may treat them differently.
    pub fn new<T: MasalaObject + ?Sized>(object: &T, description: &str, is_lightweight: bool) -> Self {
        Self {
            class_name: object.class_name(),
            class_namespace: object.class_namespace(),
            description: description.to_string(),
            is_lightweight,
            plugin_metadata: None,
            constructors: Vec::new(),
            setters: Vec::new(),
            getters: Vec::new(),
            work_functions: Vec::new(),
        }
    }

    /// An empty definition for a plugin class; captures its categories and
    /// keywords.
    pub fn for_plugin<T: Plugin + ?Sized>(plugin: &T, description: &str, is_lightweight: bool) -> Self {
        let mut definition = Self::new(plugin, description, is_lightweight);
        definition.plugin_metadata = Some((plugin.categories(), plugin.keywords()));
        definition
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn class_namespace(&self) -> &str {
        &self.class_namespace
    }

    pub fn class_namespace_and_name(&self) -> String {
        join_namespace_and_name(&self.class_namespace, &self.class_name)
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_lightweight(&self) -> bool {
        self.is_lightweight
    }

    pub fn is_plugin_class(&self) -> bool {
        self.plugin_metadata.is_some()
    }

    pub fn plugin_categories(&self) -> &[CategoryPath] {
        self.plugin_metadata
            .as_ref()
            .map_or(&[], |(categories, _)| categories.as_slice())
    }

    pub fn plugin_keywords(&self) -> &[String] {
        self.plugin_metadata
            .as_ref()
            .map_or(&[], |(_, keywords)| keywords.as_slice())
    }

    pub fn add_constructor(&mut self, constructor: ConstructorDefinition) {
        self.constructors.push(Arc::new(constructor));
    }

    pub fn add_setter(&mut self, setter: SetterDefinition) {
        self.setters.push(Arc::new(setter));
    }

    pub fn add_getter(&mut self, getter: GetterDefinition) {
        self.getters.push(Arc::new(getter));
    }

    pub fn add_work_function(&mut self, work_function: WorkFunctionDefinition) {
        self.work_functions.push(Arc::new(work_function));
    }

    pub fn n_constructors(&self) -> usize {
        self.constructors.len()
    }

    pub fn n_setters(&self) -> usize {
        self.setters.len()
    }

    pub fn n_getters(&self) -> usize {
        self.getters.len()
    }

    pub fn n_work_functions(&self) -> usize {
        self.work_functions.len()
    }

    pub fn constructors(&self) -> &[Arc<ConstructorDefinition>] {
        &self.constructors
    }

    pub fn setters(&self) -> &[Arc<SetterDefinition>] {
        &self.setters
    }

    pub fn getters(&self) -> &[Arc<GetterDefinition>] {
        &self.getters
    }

    pub fn work_functions(&self) -> &[Arc<WorkFunctionDefinition>] {
        &self.work_functions
    }

    pub fn constructor(&self, index: usize) -> Result<Arc<ConstructorDefinition>> {
        indexed(&self.constructors, index, "constructor")
    }

    pub fn setter(&self, index: usize) -> Result<Arc<SetterDefinition>> {
        indexed(&self.setters, index, "setter")
    }

    pub fn getter(&self, index: usize) -> Result<Arc<GetterDefinition>> {
        indexed(&self.getters, index, "getter")
    }

    pub fn work_function(&self, index: usize) -> Result<Arc<WorkFunctionDefinition>> {
        indexed(&self.work_functions, index, "work_function")
    }

    /// The first setter with the given name. Overloads share a name; use the
    /// slice accessors to reach the others.
    pub fn setter_named(&self, name: &str) -> Option<Arc<SetterDefinition>> {
        self.setters.iter().find(|s| s.name() == name).cloned()
    }

    pub fn getter_named(&self, name: &str) -> Option<Arc<GetterDefinition>> {
        self.getters.iter().find(|g| g.name() == name).cloned()
    }

    pub fn work_function_named(&self, name: &str) -> Option<Arc<WorkFunctionDefinition>> {
        self.work_functions.iter().find(|w| w.name() == name).cloned()
    }

    /// The first constructor accepting `n_inputs` inputs.
    pub fn constructor_with_arity(&self, n_inputs: usize) -> Option<Arc<ConstructorDefinition>> {
        self.constructors
            .iter()
            .find(|c| c.n_inputs() == n_inputs)
            .cloned()
    }

    /// Plain-text help for the class.
    pub fn human_readable_description(&self) -> String {
        let mut out = format!(
            "{} API:\n\n{}\n",
            self.class_namespace_and_name(),
            self.description
        );
        push_section(
            &mut out,
            "CONSTRUCTORS",
            self.constructors.iter().map(|c| c.human_readable_description()),
        );
        push_section(
            &mut out,
            "SETTERS",
            self.setters.iter().map(|s| s.human_readable_description()),
        );
        push_section(
            &mut out,
            "GETTERS",
            self.getters.iter().map(|g| g.human_readable_description()),
        );
        push_section(
            &mut out,
            "WORK FUNCTIONS",
            self.work_functions.iter().map(|w| w.human_readable_description()),
        );

        out.push_str("\nPROPERTIES\n");
        out.push_str(&format!("Is_Lightweight:\t{}\n", upper_bool(self.is_lightweight)));
        out.push_str(&format!("Is_Plugin_Class:\t{}\n", upper_bool(self.is_plugin_class())));

        if let Some((categories, keywords)) = &self.plugin_metadata {
            out.push_str("\nPLUGIN_CATEGORIES:\n");
            for category in categories {
                out.push_str(&category.join(", "));
                out.push('\n');
            }
            out.push_str("\nPLUGIN_KEYWORDS:\n");
            out.push_str(&keywords.join(", "));
            out.push('\n');
        }
        out
    }

    /// Machine-readable description of the class, generated on each call.
    pub fn json_description(&self) -> Value {
        let mut json = json!({
            "Title": "API description",
            "Module": self.class_name,
            "ModuleNamespace": self.class_namespace,
            "Description": self.description,
            "Constructors": {
                "N_Constructors": self.constructors.len(),
                "Constructor_APIs": self.constructors.iter().map(|c| c.json_description()).collect::<Vec<_>>(),
            },
            "Setters": {
                "N_Setters": self.setters.len(),
                "Setter_APIs": self.setters.iter().map(|s| s.json_description()).collect::<Vec<_>>(),
            },
            "Getters": {
                "N_Getters": self.getters.len(),
                "Getter_APIs": self.getters.iter().map(|g| g.json_description()).collect::<Vec<_>>(),
            },
            "WorkFunctions": {
                "N_Work_Functions": self.work_functions.len(),
                "Work_Function_APIs": self.work_functions.iter().map(|w| w.json_description()).collect::<Vec<_>>(),
            },
            "Properties": {
                "Is_Lightweight": self.is_lightweight,
                "Is_Plugin_Class": self.is_plugin_class(),
            },
        });
        if let (Some((categories, keywords)), Some(map)) =
            (&self.plugin_metadata, json.as_object_mut())
        {
            map.insert("Plugin_Categories".into(), json!(categories));
            map.insert("Plugin_Keywords".into(), json!(keywords));
        }
        json
    }
}

fn indexed<T>(items: &[Arc<T>], index: usize, what: &str) -> Result<Arc<T>> {
    items.get(index).cloned().ok_or_else(|| {
        MasalaError::contract(
            ORIGIN,
            what,
            format!(
                "Index {index} is out of range: the definition has {} {what} entries.",
                items.len()
            ),
        )
    })
}

fn push_section(out: &mut String, title: &str, entries: impl Iterator<Item = String>) {
    let mut entries = entries.peekable();
    if entries.peek().is_none() {
        return;
    }
    out.push('\n');
    out.push_str(title);
    out.push('\n');
    for entry in entries {
        out.push('\n');
        out.push_str(&entry);
    }
}

fn upper_bool(value: bool) -> &'static str {
    if value { "TRUE" } else { "FALSE" }
}

/// Owner-side storage for a lazily built [`ApiDefinition`].
///
/// The first caller builds the definition while holding the cache lock and
/// publishes it only once complete, so readers see either nothing or the
/// full definition. Later callers get the cached copy. Callers receive a
/// [`Weak`] reference; the owner keeps the only strong one.
///
/// Cloning yields an empty cache: a definition binds the instance it was
/// built for.
#[derive(Debug, Default)]
pub struct ApiDefinitionCache {
    slot: Mutex<Option<Arc<ApiDefinition>>>,
}

impl ApiDefinitionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached definition, building it with `build` on first use.
    ///
    /// `build` must not call back into this cache.
    pub fn get_or_build(
        &self,
        build: impl FnOnce() -> Result<ApiDefinition>,
    ) -> Result<Weak<ApiDefinition>> {
        let mut slot = lock(&self.slot);
        if let Some(definition) = slot.as_ref() {
            return Ok(Arc::downgrade(definition));
        }
        let definition = Arc::new(build()?);
        debug!(
            class = %definition.class_namespace_and_name(),
            constructors = definition.n_constructors(),
            setters = definition.n_setters(),
            getters = definition.n_getters(),
            work_functions = definition.n_work_functions(),
            "built API definition"
        );
        let weak = Arc::downgrade(&definition);
        *slot = Some(definition);
        Ok(weak)
    }

    pub fn is_built(&self) -> bool {
        lock(&self.slot).is_some()
    }

    /// Drop the cached definition so the next request rebuilds it.
    pub fn clear(&self) {
        *lock(&self.slot) = None;
    }
}

impl Clone for ApiDefinitionCache {
    fn clone(&self) -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::signature::Virtuality;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use tracing_test::traced_test;

    struct Selector;

    impl MasalaObject for Selector {
        fn class_name(&self) -> String {
            "ResidueSelector".into()
        }
        fn class_namespace(&self) -> String {
            "masala::core::select".into()
        }
    }

    impl Plugin for Selector {
        fn categories(&self) -> Vec<CategoryPath> {
            vec![vec!["Selector".into(), "ResidueSelector".into()]]
        }
        fn keywords(&self) -> Vec<String> {
            vec!["selector".into(), "residue".into()]
        }
    }

    fn populated() -> ApiDefinition {
        let mut def = ApiDefinition::for_plugin(&Selector, "Selects residues.", false);
        def.add_constructor(
            ConstructorDefinition::new::<(), Selector, _>("ResidueSelector", "Default.", &[], |()| {
                Ok(Selector)
            })
            .unwrap(),
        );
        def.add_setter(
            SetterDefinition::new::<(usize,), _>(
                "set_index",
                "Set the residue index.",
                &[("index", "The index.")],
                |_| Ok(()),
            )
            .unwrap()
            .with_virtuality(Virtuality::Override),
        );
        def.add_getter(
            GetterDefinition::new::<(), usize, _>(
                "index",
                "Get the residue index.",
                &[],
                ("index", "The index."),
                |()| Ok(4),
            )
            .unwrap(),
        );
        def
    }

    #[test]
    fn counts_and_lookup() {
        let def = populated();
        assert_eq!(def.n_constructors(), 1);
        assert_eq!(def.n_setters(), 1);
        assert_eq!(def.n_getters(), 1);
        assert_eq!(def.n_work_functions(), 0);
        assert!(def.setter_named("set_index").is_some());
        assert!(def.getter_named("missing").is_none());
        assert!(def.work_function(0).is_err());
        assert_eq!(
            def.getter_named("index")
                .unwrap()
                .get::<(), usize>(())
                .unwrap(),
            4
        );
        assert!(def.constructor_with_arity(0).is_some());
    }

    #[test]
    fn human_readable_sections_in_order() {
        let text = populated().human_readable_description();
        assert!(text.starts_with("masala::core::select::ResidueSelector API:\n\nSelects residues.\n"));
        let ctor = text.find("\nCONSTRUCTORS\n").unwrap();
        let setters = text.find("\nSETTERS\n").unwrap();
        let getters = text.find("\nGETTERS\n").unwrap();
        let props = text.find("\nPROPERTIES\n").unwrap();
        assert!(ctor < setters && setters < getters && getters < props);
        assert!(!text.contains("WORK FUNCTIONS"));
        assert!(text.contains("Is_Plugin_Class:\tTRUE\n"));
        assert!(text.contains("\nPLUGIN_CATEGORIES:\nSelector, ResidueSelector\n"));
        assert!(text.ends_with("\nPLUGIN_KEYWORDS:\nselector, residue\n"));
    }

    #[test]
    fn json_has_expected_layout() {
        let json = populated().json_description();
        assert_eq!(json["Title"], "API description");
        assert_eq!(json["Module"], "ResidueSelector");
        assert_eq!(json["Setters"]["N_Setters"], 1);
        assert_eq!(json["Setters"]["Setter_APIs"][0]["Setter_Name"], "set_index");
        assert_eq!(json["WorkFunctions"]["N_Work_Functions"], 0);
        assert_eq!(json["Properties"]["Is_Plugin_Class"], true);
        assert_eq!(json["Plugin_Categories"][0][1], "ResidueSelector");
        assert_eq!(json["Plugin_Keywords"][1], "residue");
    }

    #[test]
    fn non_plugin_definition_omits_plugin_fields() {
        let def = ApiDefinition::new(&Selector, "Plain.", true);
        let json = def.json_description();
        assert!(json.get("Plugin_Categories").is_none());
        assert_eq!(json["Properties"]["Is_Lightweight"], true);
        assert!(!def.human_readable_description().contains("PLUGIN_CATEGORIES"));
    }

    #[test]
    fn cache_builds_once_across_threads() {
        let cache = Arc::new(ApiDefinitionCache::new());
        let builds = Arc::new(AtomicUsize::new(0));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let builds = Arc::clone(&builds);
                thread::spawn(move || {
                    let weak = cache
                        .get_or_build(|| {
                            builds.fetch_add(1, Ordering::SeqCst);
                            Ok(populated())
                        })
                        .unwrap();
                    weak.upgrade().unwrap().n_setters()
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), 1);
        }
        assert_eq!(builds.load(Ordering::SeqCst), 1);
        assert!(cache.is_built());
    }

    #[test]
    fn failed_build_publishes_nothing() {
        let cache = ApiDefinitionCache::new();
        let result = cache.get_or_build(|| Err(MasalaError::contract("t", "build", "boom")));
        assert!(result.is_err());
        assert!(!cache.is_built());
    }

    #[test]
    #[traced_test]
    fn building_logs_class_name() {
        let cache = ApiDefinitionCache::new();
        cache.get_or_build(|| Ok(populated())).unwrap();
        assert!(logs_contain("built API definition"));
        assert!(logs_contain("masala::core::select::ResidueSelector"));
    }

    #[test]
    fn weak_reference_dies_with_owner() {
        let cache = ApiDefinitionCache::new();
        let weak = cache.get_or_build(|| Ok(populated())).unwrap();
        assert!(weak.upgrade().is_some());
        drop(cache);
        assert!(weak.upgrade().is_none());
    }
}
