//! Output template resolution.
//!
//! Where the template text comes from, first hit wins: the `--template`
//! flag, the merged configuration (inline value, then file), template
//! files discovered in the working directory, the home directory and
//! the user config directory, and finally the built-in default.

use std::path::PathBuf;

use directories::BaseDirs;
use tracing::{debug, warn};

use crate::config::Config;
use crate::types::{CtxError, Result};

/// Fallback when no flag, configuration or discovered file provides one.
pub const DEFAULT_TEMPLATE: &str =
    "=== File Start: {path} ===\n```{extension}\n{content}\n```\n=== File End: {path} ===\n\n";

/// File name probed in the working and home directories.
pub const TEMPLATE_FILE_NAME: &str = ".ctxweave.template.txt";

/// Resolve the template text. `inline` carries the `--template` value.
pub fn resolve(inline: Option<&str>, config: &Config) -> Result<String> {
    if let Some(template) = from_config(inline, config)? {
        return Ok(template);
    }
    if let Some(template) = discover_in(&discovery_paths()) {
        return Ok(template);
    }
    debug!("Using built-in template");
    Ok(DEFAULT_TEMPLATE.to_string())
}

/// Flag- and configuration-driven sources. `Ok(None)` means fall
/// through to file discovery.
fn from_config(inline: Option<&str>, config: &Config) -> Result<Option<String>> {
    if let Some(template) = inline {
        return Ok(Some(template.to_string()));
    }
    if let Some(template) = config.output.template.as_deref().filter(|t| !t.is_empty()) {
        debug!("Using inline template from configuration");
        return Ok(Some(template.to_string()));
    }
    if let Some(file) = config
        .output
        .template_file
        .as_deref()
        .filter(|f| !f.as_os_str().is_empty())
    {
        // Explicitly configured, so failing to read it is fatal.
        let template = std::fs::read_to_string(file).map_err(|e| {
            CtxError::template(format!(
                "cannot read template file {}: {}",
                file.display(),
                e
            ))
        })?;
        debug!("Using template file {}", file.display());
        return Ok(Some(template));
    }
    Ok(None)
}

/// Probed locations, nearest first.
fn discovery_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(TEMPLATE_FILE_NAME)];
    if let Some(base) = BaseDirs::new() {
        paths.push(base.home_dir().join(TEMPLATE_FILE_NAME));
        paths.push(base.config_dir().join("ctxweave").join("template.txt"));
    }
    paths
}

/// First readable candidate wins. Absent files are skipped silently;
/// present but unreadable ones earn a warning.
fn discover_in(paths: &[PathBuf]) -> Option<String> {
    for path in paths {
        if !path.is_file() {
            continue;
        }
        match std::fs::read_to_string(path) {
            Ok(template) => {
                debug!("Using template from {}", path.display());
                return Some(template);
            }
            Err(err) => warn!("Cannot read template {}: {}", path.display(), err),
        }
    }
    None
}
