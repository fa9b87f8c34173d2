// SPDX-FileCopyrightText: 2026 Masala Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for module registration through a `Registrator`.
//!
//! This binary is the only user of the fixture registrator, and every test
//! leaves it unregistered.

use masala_plugin::{
    DataRepresentationManager, EngineManager, FileInterpreterManager, PluginModuleManager,
};
use masala_test_utils::{register_test_plugins, unregister_test_plugins};
use serial_test::serial;
use tracing_test::traced_test;

fn totals() -> (usize, usize, usize, usize) {
    (
        EngineManager::get_instance().total_engines(),
        DataRepresentationManager::get_instance().total_data_representations(),
        FileInterpreterManager::get_instance().total_file_interpreters(),
        PluginModuleManager::get_instance().total_plugins(),
    )
}

#[test]
#[serial]
#[traced_test]
fn registration_fills_every_manager_once() {
    register_test_plugins().unwrap();
    register_test_plugins().unwrap();
    assert_eq!(totals(), (3, 3, 2, 8));
    assert!(logs_contain("registered module plugins"));

    unregister_test_plugins().unwrap();
    assert_eq!(totals(), (0, 0, 0, 0));
    // A second unregister finds nothing registered and does nothing.
    unregister_test_plugins().unwrap();
}

#[test]
#[serial]
fn concurrent_registration_runs_once() {
    let handles: Vec<_> = (0..8)
        .map(|_| std::thread::spawn(register_test_plugins))
        .collect();
    let outcomes: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(outcomes.iter().all(Result::is_ok));
    assert_eq!(totals(), (3, 3, 2, 8));

    unregister_test_plugins().unwrap();
    assert_eq!(totals(), (0, 0, 0, 0));
}
