// SPDX-FileCopyrightText: 2026 Masala Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by plugins, creators and registries.

/// An ordered hierarchical classification, most general segment first
/// (e.g. `Solver -> KinematicSolver -> AnalyticKinematicSolver`).
pub type CategoryPath = Vec<String>;

/// Separator between namespace segments and the class name.
pub const NAMESPACE_SEPARATOR: &str = "::";

/// Build a [`CategoryPath`] from string slices.
pub fn category_path(segments: &[&str]) -> CategoryPath {
    segments.iter().map(|s| (*s).to_string()).collect()
}

/// Whether `candidate` equals `required`, or (when `allow_subcategories` is
/// set) lies underneath it.
pub fn category_matches(candidate: &[String], required: &[String], allow_subcategories: bool) -> bool {
    if allow_subcategories {
        candidate.len() >= required.len() && candidate[..required.len()] == *required
    } else {
        candidate == required
    }
}

/// Split `a::b::Name` into (`["a", "b"]`, `"Name"`).
///
/// A string without separators has an empty namespace.
pub fn split_namespace_and_name(namespace_and_name: &str) -> (Vec<String>, String) {
    let mut segments: Vec<String> = namespace_and_name
        .split(NAMESPACE_SEPARATOR)
        .map(str::to_string)
        .collect();
    let name = segments.pop().unwrap_or_default();
    (segments, name)
}

/// Join a namespace and a class name with the namespace separator.
pub fn join_namespace_and_name(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{namespace}{NAMESPACE_SEPARATOR}{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_handles_nested_namespaces() {
        let (ns, name) = split_namespace_and_name("masala::core::Pose");
        assert_eq!(ns, vec!["masala", "core"]);
        assert_eq!(name, "Pose");

        let (ns, name) = split_namespace_and_name("Pose");
        assert!(ns.is_empty());
        assert_eq!(name, "Pose");
    }

    #[test]
    fn category_prefix_matching() {
        let candidate = category_path(&["Solver", "KinematicSolver"]);
        assert!(category_matches(&candidate, &category_path(&["Solver"]), true));
        assert!(!category_matches(&candidate, &category_path(&["Solver"]), false));
        assert!(category_matches(&candidate, &candidate, false));
        assert!(!category_matches(
            &category_path(&["Solver"]),
            &candidate,
            true
        ));
    }

    #[test]
    fn join_skips_empty_namespace() {
        assert_eq!(join_namespace_and_name("", "Foo"), "Foo");
        assert_eq!(join_namespace_and_name("a::b", "Foo"), "a::b::Foo");
    }
}
