//! Common error infrastructure for spell-core.
//!
//! Domain-specific errors (e.g., `RuneParseError`, `RegistryError`) are
//! defined in the modules that validate them; this module provides the shared
//! severity classification hosts use to pick a recovery strategy.
//!
//! Note that most "failures" in this engine are not errors at all: an empty
//! rune sequence derives to zero stats, and an ineligible evolution returns
//! `None`. Error types are reserved for data-integrity problems.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Example: a rune letter outside A-Z in host-supplied input.
    Validation,

    /// Fatal error - catalog or persisted data is corrupt, cannot continue.
    ///
    /// Example: an incomplete rune registry.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Fatal => "fatal",
        }
    }
}

/// Common trait for all spell-core errors.
///
/// All error enums implement this alongside `#[derive(thiserror::Error)]`;
/// severity tells the host whether correcting the input can help.
pub trait CoreError: std::fmt::Display + std::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;
}
