// SPDX-FileCopyrightText: 2026 Masala Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Named tracers that can be switched on and off at runtime, on top of
//! `tracing`.
//!
//! Each tracer is a name such as `masala::plugin_manager`. A tracer with no
//! explicit state follows the global default. Messages written through
//! [`TracerManager::write_to_tracer`] go out as `tracing` events with the
//! target `masala::tracer`, one event per line, tagged with the tracer name
//! and the Masala thread index of the writing thread.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, OnceLock};
use std::thread::ThreadId;

use masala_core::MasalaObject;
use masala_core::sync::lock;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::settings::TracerSettings;

const TRACE_TARGET: &str = "masala::tracer";

#[derive(Debug)]
struct TracerState {
    global_default: bool,
    explicit: BTreeMap<String, bool>,
}

pub struct TracerManager {
    state: Mutex<TracerState>,
    thread_indices: Mutex<HashMap<ThreadId, usize>>,
}

impl TracerManager {
    fn new() -> Self {
        Self {
            state: Mutex::new(TracerState {
                global_default: true,
                explicit: BTreeMap::new(),
            }),
            thread_indices: Mutex::new(HashMap::new()),
        }
    }

    /// The process-wide instance, created on first use.
    pub fn get_instance() -> &'static TracerManager {
        static INSTANCE: OnceLock<TracerManager> = OnceLock::new();
        INSTANCE.get_or_init(TracerManager::new)
    }

    pub fn tracer_is_enabled(&self, tracer_name: &str) -> bool {
        let state = lock(&self.state);
        state
            .explicit
            .get(tracer_name)
            .copied()
            .unwrap_or(state.global_default)
    }

    /// Give `tracer_name` an explicit state, overriding the global default.
    pub fn set_tracer_state(&self, tracer_name: &str, enabled: bool) {
        lock(&self.state)
            .explicit
            .insert(tracer_name.to_string(), enabled);
    }

    /// Drop the explicit state of `tracer_name` so it follows the global
    /// default again.
    pub fn reset_tracer_state(&self, tracer_name: &str) {
        lock(&self.state).explicit.remove(tracer_name);
    }

    pub fn global_tracer_default(&self) -> bool {
        lock(&self.state).global_default
    }

    pub fn set_global_tracer_default(&self, enabled: bool) {
        lock(&self.state).global_default = enabled;
    }

    /// Replace every tracer state with the ones in `settings`.
    pub fn apply_settings(&self, settings: &TracerSettings) {
        let mut state = lock(&self.state);
        state.global_default = settings.default_enabled;
        state.explicit.clear();
        for name in &settings.disabled {
            state.explicit.insert(name.clone(), false);
        }
        for name in &settings.enabled {
            state.explicit.insert(name.clone(), true);
        }
    }

    /// Emit `message` on behalf of `tracer_name`, one event per line.
    ///
    /// Nothing is emitted if the tracer is disabled, unless `skip_check` is
    /// set.
    pub fn write_to_tracer(&self, tracer_name: &str, message: &str, skip_check: bool) {
        if !skip_check && !self.tracer_is_enabled(tracer_name) {
            return;
        }
        let thread = self.thread_id_string();
        for line in message.lines() {
            info!(target: TRACE_TARGET, tracer = tracer_name, thread = %thread, "{line}");
        }
    }

    /// Associate a thread with a Masala thread index, replacing any
    /// previous index for that thread.
    pub fn register_thread_id(&self, system_thread: ThreadId, masala_index: usize) {
        lock(&self.thread_indices).insert(system_thread, masala_index);
    }

    /// Forget a thread's index. Unknown threads are ignored.
    pub fn unregister_thread_id(&self, system_thread: ThreadId) {
        lock(&self.thread_indices).remove(&system_thread);
    }

    /// The Masala index of the calling thread as a string. `"0"` if no
    /// threads are registered at all, `"?"` if other threads are registered
    /// but this one is not.
    pub fn thread_id_string(&self) -> String {
        let indices = lock(&self.thread_indices);
        if indices.is_empty() {
            return "0".into();
        }
        match indices.get(&std::thread::current().id()) {
            Some(index) => index.to_string(),
            None => "?".into(),
        }
    }

    /// Forget every tracer state and thread index. For tests.
    pub fn reset(&self) {
        {
            let mut state = lock(&self.state);
            state.global_default = true;
            state.explicit.clear();
        }
        lock(&self.thread_indices).clear();
    }
}

impl MasalaObject for TracerManager {
    fn class_name(&self) -> String {
        "MasalaTracerManager".into()
    }

    fn class_namespace(&self) -> String {
        "masala::base::managers::tracer".into()
    }
}

impl std::fmt::Debug for TracerManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TracerManager")
            .field("state", &*lock(&self.state))
            .field("threads", &lock(&self.thread_indices).len())
            .finish()
    }
}

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins if set. Otherwise Masala targets log at `level` and
/// everything else at `warn`. Does nothing if a subscriber is already
/// installed.
pub fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("masala={level},warn")));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .try_init();
}
