//! Configuration Loader (Figment-based)
//!
//! Loads and merges configuration from multiple sources using Figment:
//! 1. Built-in defaults (Serialized)
//! 2. Global config (~/.config/ctxweave/config.toml)
//! 3. Project config (./.ctxweave.toml)
//! 4. Environment variables (CTXWEAVE_* prefix)
//!
//! CLI flags are not part of the chain; the binary applies them field-wise
//! on top of the merged result.

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::env;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::types::Config;
use crate::types::{CtxError, Result};

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with full resolution chain using Figment:
    /// defaults → global → project → env vars
    pub fn load() -> Result<Config> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        // Merge global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            debug!("Loading global config from: {}", global_path.display());
            figment = figment.merge(Toml::file(&global_path));
        }

        // Merge project config
        let project_path = Self::project_config_path();
        if project_path.exists() {
            debug!("Loading project config from: {}", project_path.display());
            figment = figment.merge(Toml::file(&project_path));
        }

        // Merge environment variables (e.g., CTXWEAVE_SCAN_GITIGNORE -> scan.gitignore)
        figment = figment.merge(Env::prefixed("CTXWEAVE_").split('_').lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| CtxError::Config(format!("Configuration error: {}", e)))?;

        // Validate configuration after loading
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a specific file only
    pub fn load_from_file(path: &Path) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .extract()
            .map_err(|e| CtxError::Config(format!("Configuration error: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    // =========================================================================
    // Path Management
    // =========================================================================

    /// Get path to global config directory (~/.config/ctxweave/)
    pub fn global_dir() -> Option<PathBuf> {
        env::var("XDG_CONFIG_HOME")
            .ok()
            .map(PathBuf::from)
            .or_else(|| {
                env::var("HOME")
                    .ok()
                    .map(|home| PathBuf::from(home).join(".config"))
            })
            .map(|p| p.join("ctxweave"))
    }

    /// Get path to global config file
    pub fn global_config_path() -> Option<PathBuf> {
        Self::global_dir().map(|dir| dir.join("config.toml"))
    }

    /// Get path to project config file
    pub fn project_config_path() -> PathBuf {
        PathBuf::from(".ctxweave.toml")
    }

    // =========================================================================
    // Presentation
    // =========================================================================

    /// Render the merged configuration as pretty TOML (for `--show-config`)
    pub fn render(config: &Config) -> Result<String> {
        toml::to_string_pretty(config).map_err(|e| CtxError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_default_config() {
        let config = ConfigLoader::load().unwrap();
        assert!(config.scan.recursive);
        assert!(config.scan.binary_check);
    }

    #[test]
    fn test_env_override() {
        // SAFETY: This test runs in isolation
        unsafe {
            std::env::set_var("CTXWEAVE_SCAN_GITIGNORE", "false");
        }
        let config = ConfigLoader::load().unwrap();
        assert!(!config.scan.gitignore);
        unsafe {
            std::env::remove_var("CTXWEAVE_SCAN_GITIGNORE");
        }
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(
            &path,
            "[scan]\nrecursive = false\nexclude = [\"**/*.md\"]\n\n[output]\ntemplate = \"{path}\"\n",
        )
        .unwrap();

        let config = ConfigLoader::load_from_file(&path).unwrap();
        assert!(!config.scan.recursive);
        assert!(config.scan.gitignore); // untouched default
        assert_eq!(config.scan.exclude, vec!["**/*.md".to_string()]);
        assert_eq!(config.output.template.as_deref(), Some("{path}"));
    }

    #[test]
    fn test_load_from_file_rejects_conflicting_templates() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(
            &path,
            "[output]\ntemplate = \"{content}\"\ntemplate_file = \"tpl.txt\"\n",
        )
        .unwrap();

        assert!(ConfigLoader::load_from_file(&path).is_err());
    }

    #[test]
    fn test_render_round_trips_defaults() {
        let rendered = ConfigLoader::render(&Config::default()).unwrap();
        assert!(rendered.contains("[scan]"));
        assert!(rendered.contains("recursive = true"));
    }
}
