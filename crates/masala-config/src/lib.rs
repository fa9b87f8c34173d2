// SPDX-FileCopyrightText: 2026 Masala Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process-wide managers for configuration, environment, disk access,
//! database location, library versions and tracer output.
//!
//! Every manager is a lazily created singleton reached through
//! `get_instance()`, guarded by its own mutex.
//!
//! # Usage
//!
//! ```no_run
//! use masala_config::{masala_settings, init_tracing, TracerManager};
//!
//! let settings = masala_settings().expect("settings errors");
//! init_tracing(&settings.log_level);
//! TracerManager::get_instance().apply_settings(&settings.tracers);
//! ```

pub mod configuration;
pub mod database;
pub mod disk;
pub mod environment;
pub mod settings;
pub mod tracer;
pub mod version;

pub use configuration::{AuthorizationToken, ConfigurationBase, ConfigurationManager};
pub use database::DatabaseManager;
pub use disk::DiskManager;
pub use environment::EnvironmentManager;
pub use settings::{
    DatabaseSettings, MasalaSettings, SETTINGS_KEY, SettingsError, TracerSettings,
    load_settings, load_settings_from_path, load_settings_from_str, masala_settings,
    validate_settings,
};
pub use tracer::{TracerManager, init_tracing};
pub use version::{ModuleVersionInfo, VersionManager};
