// SPDX-FileCopyrightText: 2026 Masala Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One-time registration of a module's plugins.
//!
//! A module declares one `static` [`Registrator`] holding its register and
//! unregister functions, and exposes a function that calls
//! [`Registrator::register`]:
//!
//! ```
//! use masala_plugin::Registrator;
//!
//! fn register_all() -> masala_core::Result<()> {
//!     Ok(())
//! }
//!
//! fn unregister_all() -> masala_core::Result<()> {
//!     Ok(())
//! }
//!
//! static REGISTRATOR: Registrator =
//!     Registrator::new("masala::demo", register_all, unregister_all);
//!
//! assert!(REGISTRATOR.register().is_ok());
//! assert!(REGISTRATOR.register().is_ok());
//! ```

use std::sync::{Arc, Mutex};

use masala_core::sync::lock;
use masala_core::{MasalaError, Result};
use tracing::{error, info};

const TRACE_TARGET: &str = "masala::registrator";

type Outcome = std::result::Result<(), Arc<MasalaError>>;

/// Runs a registration function at most once per process, and reports the
/// stored outcome to every caller.
///
/// A failed registration is not retried. Registering the same plugin from
/// two modules is a deployment error, reported identically to every
/// caller.
pub struct Registrator {
    module: &'static str,
    register: fn() -> Result<()>,
    unregister: fn() -> Result<()>,
    outcome: Mutex<Option<Outcome>>,
}

impl Registrator {
    pub const fn new(
        module: &'static str,
        register: fn() -> Result<()>,
        unregister: fn() -> Result<()>,
    ) -> Self {
        Self {
            module,
            register,
            unregister,
            outcome: Mutex::new(None),
        }
    }

    pub fn module(&self) -> &'static str {
        self.module
    }

    /// Run the registration function if it has not run yet.
    ///
    /// Concurrent callers block until the first one finishes, then all see
    /// its outcome.
    pub fn register(&self) -> Outcome {
        let mut outcome = lock(&self.outcome);
        if let Some(done) = outcome.as_ref() {
            return done.clone();
        }
        let result = (self.register)().map_err(Arc::new);
        match &result {
            Ok(()) => info!(target: TRACE_TARGET, module = self.module, "registered module plugins"),
            Err(e) => error!(
                target: TRACE_TARGET,
                module = self.module,
                error = %e,
                "module plugin registration failed"
            ),
        }
        *outcome = Some(result.clone());
        result
    }

    /// Whether registration has run and succeeded.
    pub fn is_registered(&self) -> bool {
        matches!(*lock(&self.outcome), Some(Ok(())))
    }

    /// Undo a successful registration so that the next
    /// [`register`](Self::register) runs again. Does nothing if the module
    /// is not registered.
    pub fn unregister(&self) -> Result<()> {
        let mut outcome = lock(&self.outcome);
        if !matches!(*outcome, Some(Ok(()))) {
            return Ok(());
        }
        (self.unregister)()?;
        *outcome = None;
        info!(target: TRACE_TARGET, module = self.module, "unregistered module plugins");
        Ok(())
    }
}

impl std::fmt::Debug for Registrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registrator")
            .field("module", &self.module)
            .field("registered", &self.is_registered())
            .finish()
    }
}
