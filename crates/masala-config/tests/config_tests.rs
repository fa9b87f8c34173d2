// SPDX-FileCopyrightText: 2026 Masala Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for Masala settings and the process managers.

use figment::Jail;
use masala_config::{
    DatabaseManager, DiskManager, EnvironmentManager, MasalaSettings, SettingsError,
    load_settings, load_settings_from_path, load_settings_from_str,
};
use masala_core::ErrorKind;
use regex::Regex;
use serial_test::serial;

#[test]
fn full_toml_deserializes_into_settings() {
    let toml = r#"
log_level = "debug"

[tracers]
default_enabled = false
enabled = ["masala::plugin_manager"]
disabled = ["masala::disk_manager"]

[database]
path = "/opt/masala/database"
"#;

    let settings = load_settings_from_str(toml).expect("valid TOML should load");
    assert_eq!(settings.log_level, "debug");
    assert!(!settings.tracers.default_enabled);
    assert_eq!(settings.tracers.enabled, vec!["masala::plugin_manager"]);
    assert_eq!(settings.tracers.disabled, vec!["masala::disk_manager"]);
    assert_eq!(settings.database.path.as_deref(), Some("/opt/masala/database"));
}

#[test]
fn empty_toml_gives_defaults() {
    let settings = load_settings_from_str("").unwrap();
    assert_eq!(settings, MasalaSettings::default());
    assert!(settings.tracers.default_enabled);
    assert!(settings.database.path.is_none());
}

#[test]
fn unknown_field_is_rejected() {
    let err = load_settings_from_str("[database]\npaht = \"/tmp\"\n").unwrap_err();
    assert!(matches!(err, SettingsError::Load(_)));
    assert!(err.to_string().contains("paht"));
}

#[test]
fn invalid_values_are_reported_together() {
    let toml = r#"
log_level = "loud"

[tracers]
enabled = ["masala::a"]
disabled = ["masala::a"]
"#;
    match load_settings_from_str(toml).unwrap_err() {
        SettingsError::Invalid(errors) => {
            assert_eq!(errors.len(), 2);
            assert!(errors[0].contains("loud"));
            assert!(errors[1].contains("masala::a"));
        }
        other => panic!("expected validation errors, got {other}"),
    }
}

#[test]
#[serial]
fn environment_overrides_local_file() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "masala.toml",
            r#"
log_level = "warn"

[database]
path = "/from/file"
"#,
        )?;
        jail.set_env("MASALA_LOG_LEVEL", "trace");
        jail.set_env("MASALA_TRACERS_DEFAULT_ENABLED", "false");
        jail.set_env("MASALA_UNRELATED_KEY", "ignored");

        let settings = load_settings().map_err(|e| e.to_string())?;
        assert_eq!(settings.log_level, "trace");
        assert!(!settings.tracers.default_enabled);
        assert_eq!(settings.database.path.as_deref(), Some("/from/file"));
        Ok(())
    });
}

#[test]
#[serial]
fn environment_sets_database_path_for_explicit_file() {
    Jail::expect_with(|jail| {
        jail.create_file("custom.toml", "log_level = \"error\"\n")?;
        jail.set_env("MASALA_DATABASE_PATH", "/from/env");

        let settings =
            load_settings_from_path(&jail.directory().join("custom.toml")).map_err(|e| e.to_string())?;
        assert_eq!(settings.log_level, "error");
        assert_eq!(settings.database.path.as_deref(), Some("/from/env"));
        Ok(())
    });
}

#[test]
#[serial]
fn database_path_prefers_settings_then_environment() {
    const VARIABLE: &str = "MASALA_DATABASE_PATH";
    let database = DatabaseManager::get_instance();
    let environment = EnvironmentManager::get_instance();

    let mut settings = MasalaSettings::default();
    settings.database.path = Some("/from/settings".into());
    assert_eq!(
        database.resolve_database_path(&settings, environment).unwrap(),
        std::path::PathBuf::from("/from/settings")
    );

    settings.database.path = None;
    // SAFETY: serialized with every other test that touches the environment.
    unsafe { std::env::set_var(VARIABLE, "/from/env") };
    environment.reset();
    assert_eq!(
        database.resolve_database_path(&settings, environment).unwrap(),
        std::path::PathBuf::from("/from/env")
    );

    unsafe { std::env::remove_var(VARIABLE) };
    environment.reset();
    let err = database.resolve_database_path(&settings, environment).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Resource);
    assert!(err.message().contains(VARIABLE));
}

#[test]
fn disk_round_trip_and_listing() {
    let dir = tempfile::tempdir().unwrap();
    let disk = DiskManager::get_instance();

    disk.write_ascii_file(dir.path().join("a.pdb"), "ATOM 1\nATOM 2\n")
        .unwrap();
    disk.write_ascii_file(dir.path().join("b.cif"), "data_b\n").unwrap();
    disk.write_ascii_file(dir.path().join("notes.txt"), "{\"threads\": 4}")
        .unwrap();
    std::fs::create_dir(dir.path().join("sub")).unwrap();

    assert_eq!(
        disk.read_ascii_file_to_string_vector(dir.path().join("a.pdb"))
            .unwrap(),
        vec!["ATOM 1", "ATOM 2"]
    );
    assert_eq!(
        disk.read_ascii_file_to_string(dir.path().join("b.cif")).unwrap(),
        "data_b\n"
    );
    let json = disk.read_json_file(dir.path().join("notes.txt")).unwrap();
    assert_eq!(json["threads"], 4);

    assert_eq!(disk.subdirectories(dir.path()).unwrap(), vec![dir.path().join("sub")]);
    assert_eq!(disk.files(dir.path()).unwrap().len(), 3);

    let structures = Regex::new(r"^.*\.(pdb|cif)$").unwrap();
    assert_eq!(
        disk.files_matching(dir.path(), &structures).unwrap(),
        vec![dir.path().join("a.pdb"), dir.path().join("b.cif")]
    );
}

#[test]
fn malformed_json_is_a_resource_error() {
    let dir = tempfile::tempdir().unwrap();
    let disk = DiskManager::get_instance();
    let path = dir.path().join("broken.json");
    disk.write_ascii_file(&path, "{ not json").unwrap();

    let err = disk.read_json_file(&path).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Resource);
    assert!(err.message().contains("JSON"));
}

#[test]
fn absolute_path_is_absolute() {
    let path = DiskManager::get_instance()
        .absolute_path("relative/database")
        .unwrap();
    assert!(path.is_absolute());
    assert!(path.ends_with("relative/database"));
}
