//! Masking error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while masking a document's ignored regions.
///
/// A broken ignore rule is a configuration defect that would otherwise
/// cause silent false negatives, so every variant aborts the current
/// document's mask operation and is surfaced to the caller.
#[derive(Debug, Error, miette::Diagnostic)]
pub enum MaskError {
    /// An ignore-rule pattern failed to compile.
    #[error("invalid ignore pattern `{pattern}` in {}: {message}", .config.display())]
    Pattern {
        /// The offending pattern text.
        pattern: String,
        /// Configuration file the pattern came from.
        config: PathBuf,
        /// Compiler diagnostic.
        message: String,
    },

    /// A syntax scope glob failed to compile.
    #[error("invalid syntax scope `{scope}` in {}: {message}", .config.display())]
    Scope {
        /// The offending glob text.
        scope: String,
        /// Configuration file the scope came from.
        config: PathBuf,
        /// Compiler diagnostic.
        message: String,
    },

    /// A placeholder template did not carry exactly one slot.
    #[error("placeholder template `{template}` must contain exactly one `{{}}` slot")]
    Template {
        /// The offending template text.
        template: String,
    },
}

impl MaskError {
    /// Creates a pattern compile error.
    pub fn pattern(
        pattern: impl Into<String>,
        config: impl Into<PathBuf>,
        message: impl Into<String>,
    ) -> Self {
        Self::Pattern {
            pattern: pattern.into(),
            config: config.into(),
            message: message.into(),
        }
    }

    /// Creates a scope compile error.
    pub fn scope(
        scope: impl Into<String>,
        config: impl Into<PathBuf>,
        message: impl Into<String>,
    ) -> Self {
        Self::Scope {
            scope: scope.into(),
            config: config.into(),
            message: message.into(),
        }
    }
}
