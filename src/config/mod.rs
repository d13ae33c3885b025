//! Configuration Management
//!
//! Unified configuration system with hierarchical resolution:
//! 1. Built-in defaults
//! 2. Global config (~/.config/ctxweave/config.toml)
//! 3. Project config (./.ctxweave.toml)
//! 4. Environment variables (CTXWEAVE_*)
//! 5. CLI arguments (highest priority)

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::*;
