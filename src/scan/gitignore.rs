//! Hierarchical `.gitignore` resolution.
//!
//! A path is ignored when the `.gitignore` of its own directory or of any
//! ancestor directory matches it. Rulesets are compiled lazily, one per
//! directory, and cached for the lifetime of the chain - a directory with
//! no `.gitignore` is cached too, so repeated queries never re-stat it.
//! Deeper files cannot un-ignore what an ancestor ignores; re-inclusion
//! works only through `!` negation within a single file.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use super::ruleset::IgnoreRules;
use crate::types::utils::absolutize;

const GITIGNORE_FILE: &str = ".gitignore";

pub struct GitignoreChain {
    enabled: bool,
    cwd: PathBuf,
    /// Directory → compiled rules; `None` records "no .gitignore here".
    cache: Mutex<HashMap<PathBuf, Option<Arc<IgnoreRules>>>>,
}

impl GitignoreChain {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            cwd: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Whether any `.gitignore` between the path's directory and the
    /// filesystem root excludes `path`. Always false when disabled.
    pub fn is_ignored(&self, path: &Path, is_dir: bool) -> bool {
        if !self.enabled {
            return false;
        }

        let absolute = absolutize(path, &self.cwd);
        let mut dir = if is_dir {
            absolute.clone()
        } else {
            match absolute.parent() {
                Some(parent) => parent.to_path_buf(),
                None => return false,
            }
        };

        loop {
            if let Some(rules) = self.rules_for(&dir)
                && rules.matches(&absolute, is_dir)
            {
                return true;
            }
            match dir.parent() {
                Some(parent) => dir = parent.to_path_buf(),
                None => return false,
            }
        }
    }

    /// Compiled rules for one directory, from cache or freshly built.
    fn rules_for(&self, dir: &Path) -> Option<Arc<IgnoreRules>> {
        let mut cache = self.cache.lock().expect("gitignore cache lock");
        if let Some(cached) = cache.get(dir) {
            return cached.clone();
        }

        let file = dir.join(GITIGNORE_FILE);
        let compiled = if file.is_file() {
            match IgnoreRules::from_file(dir, &file) {
                Ok(rules) => {
                    debug!("Compiled {}", file.display());
                    Some(Arc::new(rules))
                }
                Err(err) => {
                    warn!("Skipping {}: {}", file.display(), err);
                    None
                }
            }
        } else {
            None
        };

        cache.insert(dir.to_path_buf(), compiled.clone());
        compiled
    }
}
