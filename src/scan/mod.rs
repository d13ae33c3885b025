//! File Discovery Pipeline
//!
//! Turns input paths and glob patterns into the final, filtered list of
//! files. The pipeline runs in fixed order:
//!
//! 1. [`expand`]: glob expansion of every input into existing paths
//! 2. [`Scanner`]: directory descent with ignore-aware pruning
//! 3. [`PathFilter`]: the precedence chain deciding inclusion per path
//!    (explicit excludes → custom ignore rules → `.gitignore` hierarchy →
//!    binary sniff)
//!
//! [`GitignoreChain`] backs the `.gitignore` stage with a per-directory
//! compile cache; [`IgnoreRules`] is the single-ruleset building block used
//! by both the chain and the custom ignore files.

pub mod expand;
pub mod filter;
pub mod gitignore;
pub mod ruleset;
pub mod scanner;

pub use filter::{PathFilter, Stage};
pub use gitignore::GitignoreChain;
pub use ruleset::IgnoreRules;
pub use scanner::Scanner;

use std::path::PathBuf;

use crate::config::ScanConfig;

/// Options controlling the discovery pipeline.
///
/// Polarity is positive (`recursive: true` means descend); the CLI's
/// `--no-*` flags flip these off.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Descend into subdirectories of directory inputs
    pub recursive: bool,

    /// Consult `.gitignore` files in and above scanned directories
    pub use_gitignore: bool,

    /// Additional ignore files in `.gitignore` syntax, applied globally
    pub ignore_files: Vec<PathBuf>,

    /// Glob patterns excluded ahead of every other rule
    pub exclude: Vec<String>,

    /// Drop files whose first kilobyte contains a NUL byte
    pub binary_check: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            recursive: true,
            use_gitignore: true,
            ignore_files: Vec::new(),
            exclude: Vec::new(),
            binary_check: true,
        }
    }
}

impl From<&ScanConfig> for ScanOptions {
    fn from(config: &ScanConfig) -> Self {
        Self {
            recursive: config.recursive,
            use_gitignore: config.gitignore,
            ignore_files: config.ignore_files.clone(),
            exclude: config.exclude.clone(),
            binary_check: config.binary_check,
        }
    }
}
