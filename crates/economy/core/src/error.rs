//! Common error infrastructure for economy-core.
//!
//! Domain errors (`ActionError`, `CatalogError`, `ProgressError`) live next to
//! the operations they validate. This module provides the classification they
//! share so that callers can pick a recovery strategy without matching on every
//! variant.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the same action may succeed later (e.g. more currency)
/// - **Validation**: the request itself is invalid and should not be retried as-is
/// - **Fatal**: the economy cannot run (e.g. an inconsistent catalog)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if the economy cannot continue (broken content).
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal)
    }
}

/// Common trait for all economy-core errors.
///
/// Implementors derive `thiserror::Error` for their `Display` impl and classify
/// each variant by recoverability, not by impact.
pub trait EconomyError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for this variant, used in logs, metrics and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
