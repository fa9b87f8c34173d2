// SPDX-FileCopyrightText: 2026 Masala Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Location of the Masala database directory.

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

use masala_core::sync::lock;
use masala_core::{MasalaError, MasalaObject, Result};
use tracing::info;

use crate::environment::EnvironmentManager;
use crate::settings::{MasalaSettings, masala_settings};

const TRACE_TARGET: &str = "masala::database_manager";

/// Environment variable consulted when the settings name no database path.
pub const DATABASE_PATH_VARIABLE: &str = "MASALA_DATABASE_PATH";

pub struct DatabaseManager {
    database_path: Mutex<Option<PathBuf>>,
}

impl DatabaseManager {
    fn new() -> Self {
        Self {
            database_path: Mutex::new(None),
        }
    }

    /// The process-wide instance, created on first use.
    pub fn get_instance() -> &'static DatabaseManager {
        static INSTANCE: OnceLock<DatabaseManager> = OnceLock::new();
        INSTANCE.get_or_init(DatabaseManager::new)
    }

    /// The database directory, resolved from the process settings on first
    /// call and cached.
    pub fn database_path(&self) -> Result<PathBuf> {
        let mut cached = lock(&self.database_path);
        if let Some(path) = cached.as_ref() {
            return Ok(path.clone());
        }
        let settings = masala_settings()?;
        let path = self.resolve_database_path(&settings, EnvironmentManager::get_instance())?;
        info!(target: TRACE_TARGET, path = %path.display(), "resolved database path");
        *cached = Some(path.clone());
        Ok(path)
    }

    /// `settings.database.path` if set, else the value of
    /// `MASALA_DATABASE_PATH`. A resource error if neither is available.
    pub fn resolve_database_path(
        &self,
        settings: &MasalaSettings,
        environment: &EnvironmentManager,
    ) -> Result<PathBuf> {
        if let Some(path) = &settings.database.path {
            return Ok(PathBuf::from(path));
        }
        match environment.get_environment_variable(DATABASE_PATH_VARIABLE) {
            (true, value) if !value.is_empty() => Ok(PathBuf::from(value)),
            _ => Err(MasalaError::resource(
                self.class_namespace_and_name(),
                "resolve_database_path",
                format!(
                    "No database path is configured.  Set database.path in masala.toml or the \
                     {DATABASE_PATH_VARIABLE} environment variable."
                ),
                None,
            )),
        }
    }

    /// Forget the cached path. For tests.
    pub fn reset(&self) {
        *lock(&self.database_path) = None;
    }
}

impl MasalaObject for DatabaseManager {
    fn class_name(&self) -> String {
        "MasalaDatabaseManager".into()
    }

    fn class_namespace(&self) -> String {
        "masala::base::managers::database".into()
    }
}

impl std::fmt::Debug for DatabaseManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseManager")
            .field("database_path", &*lock(&self.database_path))
            .finish()
    }
}
