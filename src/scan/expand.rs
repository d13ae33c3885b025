//! Input expansion.
//!
//! Every input - literal path or glob pattern - goes through [`glob`]
//! uniformly: a meta-free input matches itself when it exists, `*` and `?`
//! stay within one path segment, `**` spans any number of segments, and
//! `[...]` matches character classes. Only paths that exist at expansion
//! time come back.

use std::path::PathBuf;

use tracing::{debug, warn};

use crate::types::{CtxError, Result};

/// Expand one input into the set of existing paths matching it.
///
/// Invalid pattern syntax is an error; callers treat it as recoverable,
/// warn and move on. Unreadable directories hit during expansion are
/// warned here and skipped - partial results are still returned.
///
/// A pattern whose last component is `**` yields the matching
/// directories but not the files inside them. [`Scanner`] compensates
/// by walking the pattern's prefix as a candidate of its own.
///
/// [`Scanner`]: super::Scanner
pub fn expand_pattern(input: &str) -> Result<Vec<PathBuf>> {
    let paths = glob::glob(input).map_err(|e| CtxError::pattern(input, e.msg))?;

    let mut matches = Vec::new();
    for entry in paths {
        match entry {
            Ok(path) => matches.push(path),
            Err(err) => warn!("Skipping unreadable match for '{}': {}", input, err),
        }
    }

    debug!("Pattern '{}' expanded to {} path(s)", input, matches.len());
    Ok(matches)
}
