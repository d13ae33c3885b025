//! CtxWeave - LLM Context Assembly from File Trees
//!
//! Discovers files across paths and glob patterns, filters them through a
//! layered ignore pipeline, and renders each survivor through a template
//! into one concatenated output stream.
//!
//! ## Core Features
//!
//! - **Glob Expansion**: inputs are paths or glob patterns, `**` recurses
//! - **Layered Filtering**: explicit excludes, custom ignore files,
//!   `.gitignore` hierarchies and binary detection, in a fixed order
//! - **Pruned Traversal**: excluded directories are never descended into
//! - **Templated Output**: per-file placeholder substitution, one stream out
//!
//! ## Quick Start
//!
//! ```ignore
//! use ctxweave::{Config, ScanOptions, Scanner};
//!
//! let files = Scanner::new(ScanOptions::default()).scan(&["src".to_string()])?;
//! let template = ctxweave::render::resolve(None, &Config::default())?;
//! let mut out = std::io::stdout().lock();
//! ctxweave::render::emit(&mut out, &files, &template)?;
//! ```
//!
//! ## Modules
//!
//! - [`scan`]: glob expansion, the exclusion chain, directory traversal
//! - [`render`]: template resolution, substitution and emission
//! - [`config`]: layered configuration (defaults, files, environment)
//! - [`cli`]: input acquisition and output stream selection
//! - [`types`]: shared error type and path utilities

pub mod cli;
pub mod config;
pub mod render;
pub mod scan;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{Config, ConfigLoader, OutputConfig, ScanConfig};

// Error Types
pub use types::error::{CtxError, Result};

// Scanning
pub use scan::{GitignoreChain, IgnoreRules, PathFilter, ScanOptions, Scanner, Stage};

// Rendering
pub use render::{DEFAULT_TEMPLATE, TemplateVars, apply, emit};
