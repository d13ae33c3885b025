//! Configuration Types
//!
//! All configuration structures with sensible defaults.
//! Supports global (~/.config/ctxweave/) and project (.ctxweave.toml) level
//! configuration; CLI flags are layered on top by the binary.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// File discovery settings
    pub scan: ScanConfig,

    /// Output rendering settings
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scan: ScanConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    /// Returns `CtxError::Config` on validation failure.
    pub fn validate(&self) -> crate::types::Result<()> {
        let inline = self
            .output
            .template
            .as_deref()
            .is_some_and(|t| !t.is_empty());
        let file = self
            .output
            .template_file
            .as_deref()
            .is_some_and(|f| !f.as_os_str().is_empty());

        if inline && file {
            return Err(crate::types::CtxError::config(
                "output.template and output.template_file are mutually exclusive",
            ));
        }

        Ok(())
    }
}

// =============================================================================
// Scan Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Descend into subdirectories
    pub recursive: bool,

    /// Honor `.gitignore` files found in or above scanned directories
    pub gitignore: bool,

    /// Skip files whose leading bytes look binary
    pub binary_check: bool,

    /// Glob patterns excluded before any other rule
    pub exclude: Vec<String>,

    /// Additional ignore files in `.gitignore` syntax, applied globally
    pub ignore_files: Vec<PathBuf>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            recursive: true,
            gitignore: true,
            binary_check: true,
            exclude: Vec::new(),
            ignore_files: Vec::new(),
        }
    }
}

// =============================================================================
// Output Configuration
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Inline template; empty or absent means unset
    pub template: Option<String>,

    /// Template file path; empty or absent means unset
    pub template_file: Option<PathBuf>,
}
