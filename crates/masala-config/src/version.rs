// SPDX-FileCopyrightText: 2026 Masala Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Version information for the core library and loaded plugin libraries.

use std::collections::BTreeMap;
use std::sync::{Mutex, OnceLock};

use masala_core::api::annotation::{DeprecatedAnnotation, DeprecationStatus};
use masala_core::sync::lock;
use masala_core::{MasalaError, MasalaObject, Result};
use semver::{Version, VersionReq};
use tracing::debug;

const TRACE_TARGET: &str = "masala::version_manager";

/// Name and version of one library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleVersionInfo {
    library_name: String,
    version: Version,
}

impl ModuleVersionInfo {
    pub fn new(library_name: impl Into<String>, version: Version) -> Self {
        Self {
            library_name: library_name.into(),
            version,
        }
    }

    /// Parse `version` as a semantic version.
    pub fn parse(library_name: impl Into<String>, version: &str) -> Result<Self> {
        let library_name = library_name.into();
        let version = Version::parse(version).map_err(|e| {
            MasalaError::contract(
                "masala::base::managers::version::MasalaModuleVersionInfo",
                "parse",
                format!("Could not parse \"{version}\" as the version of {library_name}: {e}"),
            )
        })?;
        Ok(Self::new(library_name, version))
    }

    pub fn library_name(&self) -> &str {
        &self.library_name
    }

    pub fn version(&self) -> &Version {
        &self.version
    }
}

pub struct VersionManager {
    libraries: Mutex<BTreeMap<String, ModuleVersionInfo>>,
}

impl VersionManager {
    fn new() -> Self {
        Self {
            libraries: Mutex::new(BTreeMap::new()),
        }
    }

    /// The process-wide instance, created on first use.
    pub fn get_instance() -> &'static VersionManager {
        static INSTANCE: OnceLock<VersionManager> = OnceLock::new();
        INSTANCE.get_or_init(VersionManager::new)
    }

    /// Record a library's version. Fails if the library is already known.
    pub fn add_library_information(&self, info: ModuleVersionInfo) -> Result<()> {
        let mut libraries = lock(&self.libraries);
        if libraries.contains_key(info.library_name()) {
            return Err(MasalaError::duplicate(
                self.class_namespace_and_name(),
                "add_library_information",
                format!(
                    "Version information for library \"{}\" has already been added.",
                    info.library_name()
                ),
            ));
        }
        debug!(
            target: TRACE_TARGET,
            library = info.library_name(),
            version = %info.version(),
            "added library version"
        );
        libraries.insert(info.library_name().to_string(), info);
        Ok(())
    }

    /// Forget a library's version. Returns whether it was known.
    pub fn remove_library_information(&self, library_name: &str) -> bool {
        lock(&self.libraries).remove(library_name).is_some()
    }

    pub fn library_information(&self, library_name: &str) -> Option<ModuleVersionInfo> {
        lock(&self.libraries).get(library_name).cloned()
    }

    pub fn library_version(&self, library_name: &str) -> Option<Version> {
        lock(&self.libraries)
            .get(library_name)
            .map(|info| info.version().clone())
    }

    /// Known library names, sorted.
    pub fn registered_libraries(&self) -> Vec<String> {
        lock(&self.libraries).keys().cloned().collect()
    }

    /// Whether the known version of `library_name` satisfies `requirement`.
    /// Fails if the library is unknown.
    pub fn library_satisfies(&self, library_name: &str, requirement: &VersionReq) -> Result<bool> {
        let version = self.known_version("library_satisfies", library_name)?;
        Ok(requirement.matches(&version))
    }

    /// Where the known version of the annotated function's library falls
    /// in its deprecation schedule. Fails if the library is unknown.
    pub fn deprecation_status(&self, annotation: &DeprecatedAnnotation) -> Result<DeprecationStatus> {
        let version = self.known_version("deprecation_status", annotation.library_name())?;
        Ok(annotation.status_at(&version))
    }

    pub fn reset(&self) {
        lock(&self.libraries).clear();
    }

    fn known_version(&self, function: &str, library_name: &str) -> Result<Version> {
        self.library_version(library_name).ok_or_else(|| {
            MasalaError::not_found(
                self.class_namespace_and_name(),
                function,
                format!("No version information was added for library \"{library_name}\"."),
            )
        })
    }
}

impl MasalaObject for VersionManager {
    fn class_name(&self) -> String {
        "MasalaVersionManager".into()
    }

    fn class_namespace(&self) -> String {
        "masala::base::managers::version".into()
    }
}

impl std::fmt::Debug for VersionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VersionManager")
            .field("libraries", &self.registered_libraries())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager_with(library: &str, version: &str) -> VersionManager {
        let manager = VersionManager::new();
        manager
            .add_library_information(ModuleVersionInfo::parse(library, version).unwrap())
            .unwrap();
        manager
    }

    #[test]
    fn requirements_check_the_known_version() {
        let manager = manager_with("standard_masala_plugins", "0.4.2");
        assert!(
            manager
                .library_satisfies("standard_masala_plugins", &VersionReq::parse("^0.4").unwrap())
                .unwrap()
        );
        assert!(
            !manager
                .library_satisfies("standard_masala_plugins", &VersionReq::parse(">=0.5").unwrap())
                .unwrap()
        );
        let err = manager
            .library_satisfies("other", &VersionReq::STAR)
            .unwrap_err();
        assert_eq!(err.kind(), masala_core::ErrorKind::NotFound);
    }

    #[test]
    fn duplicate_library_is_rejected() {
        let manager = manager_with("masala", "1.0.0");
        let err = manager
            .add_library_information(ModuleVersionInfo::parse("masala", "1.1.0").unwrap())
            .unwrap_err();
        assert_eq!(err.kind(), masala_core::ErrorKind::DuplicateRegistration);
        assert_eq!(manager.library_version("masala"), Some(Version::new(1, 0, 0)));

        assert!(manager.remove_library_information("masala"));
        assert!(manager.registered_libraries().is_empty());
    }

    #[test]
    fn invalid_version_is_a_contract_error() {
        assert!(ModuleVersionInfo::parse("masala", "one.two").is_err());
    }

    #[test]
    fn deprecation_status_uses_the_library_version() {
        let manager = manager_with("masala", "1.3.0");
        let warned = DeprecatedAnnotation::with_warnings("masala", (1, 2), (2, 0)).unwrap();
        assert_eq!(manager.deprecation_status(&warned).unwrap(), DeprecationStatus::Warning);
        let gone = DeprecatedAnnotation::new("masala", (1, 3));
        assert_eq!(manager.deprecation_status(&gone).unwrap(), DeprecationStatus::Deprecated);
        let elsewhere = DeprecatedAnnotation::new("other", (1, 0));
        assert!(manager.deprecation_status(&elsewhere).is_err());
    }
}
