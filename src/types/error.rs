//! Unified Error Type System
//!
//! Single error enum (`CtxError`) for the entire application, plus the
//! crate-wide `Result` alias.
//!
//! ## Design Principles
//!
//! - Per-item failures (bad pattern, unreadable file) are downgraded to
//!   warnings at the call site and never abort a run
//! - Fatal failures (config, output stream) carry enough context to be
//!   printed as-is at the binary edge
//! - No panic/unwrap in library code - all errors are propagated

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CtxError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Domain Errors
    // -------------------------------------------------------------------------
    #[error("Invalid glob pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },

    #[error("Cannot load ignore file {path}: {message}")]
    IgnoreFile { path: PathBuf, message: String },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Cannot write output to {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, CtxError>;

// =============================================================================
// Helper Constructors
// =============================================================================

impl CtxError {
    /// Create a pattern error from the offending input and a cause
    pub fn pattern(pattern: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Pattern {
            pattern: pattern.into(),
            message: message.to_string(),
        }
    }

    /// Create an ignore-file error with the file path as context
    pub fn ignore_file(path: &Path, message: impl std::fmt::Display) -> Self {
        Self::IgnoreFile {
            path: path.to_path_buf(),
            message: message.to_string(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a template error
    pub fn template(message: impl Into<String>) -> Self {
        Self::Template(message.into())
    }
}

// =============================================================================
// Tests
// =============================================================================
