// SPDX-FileCopyrightText: 2026 Masala Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Masala workspace.
//!
//! Every failure surfaces as a single [`MasalaError`] whose variants classify
//! the failure and whose message carries the `in Namespace::Class::function():`
//! header of the code that raised it.

use strum::{Display, EnumString};
use thiserror::Error;

/// Result alias used throughout the workspace.
pub type Result<T, E = MasalaError> = std::result::Result<T, E>;

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Classification of a [`MasalaError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    Contract,
    NotFound,
    DuplicateRegistration,
    Resource,
    Config,
}

/// The error type used across all Masala managers, registries and API objects.
#[derive(Debug, Error)]
pub enum MasalaError {
    /// A precondition was violated at the call site (null input, empty
    /// category list, unset criterion, wrong arity).
    #[error("in {origin}::{function}(): {message}")]
    Contract {
        origin: String,
        function: String,
        message: String,
    },

    /// A lookup by name found nothing and the caller asked for a hard failure.
    #[error("in {origin}::{function}(): {message}")]
    NotFound {
        origin: String,
        function: String,
        message: String,
    },

    /// A registration collided with an existing key.
    #[error("in {origin}::{function}(): {message}")]
    DuplicateRegistration {
        origin: String,
        function: String,
        message: String,
    },

    /// Disk or environment failures. Never retried.
    #[error("in {origin}::{function}(): {message}")]
    Resource {
        origin: String,
        function: String,
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// Settings could not be loaded or failed validation.
    #[error("in {origin}::{function}(): {message}")]
    Config {
        origin: String,
        function: String,
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },
}

impl MasalaError {
    pub fn contract(
        origin: impl Into<String>,
        function: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Contract {
            origin: origin.into(),
            function: function.into(),
            message: message.into(),
        }
    }

    pub fn not_found(
        origin: impl Into<String>,
        function: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::NotFound {
            origin: origin.into(),
            function: function.into(),
            message: message.into(),
        }
    }

    pub fn duplicate(
        origin: impl Into<String>,
        function: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::DuplicateRegistration {
            origin: origin.into(),
            function: function.into(),
            message: message.into(),
        }
    }

    pub fn resource(
        origin: impl Into<String>,
        function: impl Into<String>,
        message: impl Into<String>,
        source: Option<BoxedSource>,
    ) -> Self {
        Self::Resource {
            origin: origin.into(),
            function: function.into(),
            message: message.into(),
            source,
        }
    }

    pub fn config(
        origin: impl Into<String>,
        function: impl Into<String>,
        message: impl Into<String>,
        source: Option<BoxedSource>,
    ) -> Self {
        Self::Config {
            origin: origin.into(),
            function: function.into(),
            message: message.into(),
            source,
        }
    }

    /// The classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Contract { .. } => ErrorKind::Contract,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::DuplicateRegistration { .. } => ErrorKind::DuplicateRegistration,
            Self::Resource { .. } => ErrorKind::Resource,
            Self::Config { .. } => ErrorKind::Config,
        }
    }

    /// The `Namespace::Class` that raised the error.
    pub fn origin(&self) -> &str {
        match self {
            Self::Contract { origin, .. }
            | Self::NotFound { origin, .. }
            | Self::DuplicateRegistration { origin, .. }
            | Self::Resource { origin, .. }
            | Self::Config { origin, .. } => origin,
        }
    }

    /// The function that raised the error.
    pub fn function(&self) -> &str {
        match self {
            Self::Contract { function, .. }
            | Self::NotFound { function, .. }
            | Self::DuplicateRegistration { function, .. }
            | Self::Resource { function, .. }
            | Self::Config { function, .. } => function,
        }
    }

    /// The message without the origin header.
    pub fn message(&self) -> &str {
        match self {
            Self::Contract { message, .. }
            | Self::NotFound { message, .. }
            | Self::DuplicateRegistration { message, .. }
            | Self::Resource { message, .. }
            | Self::Config { message, .. } => message,
        }
    }
}

/// Returns a [`MasalaError::Contract`] from the enclosing function when the
/// condition does not hold.
///
/// ```
/// use masala_core::{ensure_contract, Result};
///
/// fn positive(x: i32) -> Result<i32> {
///     ensure_contract!(x > 0, "demo::Checker", "positive", format!("{x} is not positive"));
///     Ok(x)
/// }
///
/// assert!(positive(1).is_ok());
/// assert!(positive(-1).is_err());
/// ```
#[macro_export]
macro_rules! ensure_contract {
    ($cond:expr, $origin:expr, $function:expr, $message:expr $(,)?) => {
        if !($cond) {
            return Err($crate::MasalaError::contract($origin, $function, $message));
        }
    };
}
