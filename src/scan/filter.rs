//! The exclusion precedence chain.
//!
//! Every candidate path runs through the same ordered stages; the first
//! stage with an opinion wins and the rest are never consulted:
//!
//! 1. [`Stage::ExcludeGlobs`] - explicit `--exclude` patterns
//! 2. [`Stage::CustomRules`] - the user's ignore files, compiled globally
//! 3. [`Stage::Gitignore`] - the `.gitignore` hierarchy
//! 4. [`Stage::BinaryContent`] - NUL-byte sniff, files only
//!
//! Directories stop after stage 3, which is what lets the walker prune a
//! subtree without reading anything inside it.

use glob::{MatchOptions, Pattern};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::ScanOptions;
use super::gitignore::GitignoreChain;
use super::ruleset::IgnoreRules;
use crate::types::utils::to_slash_string;

/// Bytes sniffed from the head of a file for the binary heuristic.
const BINARY_SNIFF_LEN: usize = 1024;

/// Exclude patterns keep `*` and `?` inside one path segment; only `**`
/// spans directories, matching the expansion semantics.
const EXCLUDE_MATCH: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// The stages of the chain, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ExcludeGlobs,
    CustomRules,
    Gitignore,
    BinaryContent,
}

impl Stage {
    /// Evaluation order. First match short-circuits.
    pub const ORDER: [Stage; 4] = [
        Stage::ExcludeGlobs,
        Stage::CustomRules,
        Stage::Gitignore,
        Stage::BinaryContent,
    ];
}

pub struct PathFilter {
    exclude: Vec<Pattern>,
    custom: IgnoreRules,
    gitignore: GitignoreChain,
    binary_check: bool,
}

impl PathFilter {
    /// Compile the chain from pipeline options.
    ///
    /// Construction never fails: invalid exclude patterns and unreadable
    /// ignore files are warned once here and dropped from the chain.
    pub fn new(options: &ScanOptions) -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

        let mut exclude = Vec::with_capacity(options.exclude.len());
        for raw in &options.exclude {
            match Pattern::new(raw) {
                Ok(pattern) => exclude.push(pattern),
                Err(err) => warn!("Skipping exclude pattern '{}': {}", raw, err.msg),
            }
        }

        let custom = IgnoreRules::from_lines(&cwd, collect_ignore_lines(&options.ignore_files));

        Self {
            exclude,
            custom,
            gitignore: GitignoreChain::new(options.use_gitignore),
            binary_check: options.binary_check,
        }
    }

    /// Which stage, if any, excludes this path.
    ///
    /// Directories are only subject to the pattern stages; the binary
    /// sniff reads file bytes and is skipped for them.
    pub fn exclusion(&self, path: &Path, is_dir: bool) -> Option<Stage> {
        for stage in Stage::ORDER {
            let excluded = match stage {
                Stage::ExcludeGlobs => self.matches_exclude(path),
                Stage::CustomRules => self.custom.matches(path, is_dir),
                Stage::Gitignore => self.gitignore.is_ignored(path, is_dir),
                Stage::BinaryContent => !is_dir && self.binary_check && is_binary(path),
            };
            if excluded {
                return Some(stage);
            }
        }
        None
    }

    /// Convenience wrapper over [`Self::exclusion`] the walker uses.
    pub fn is_included(&self, path: &Path, is_dir: bool) -> bool {
        match self.exclusion(path, is_dir) {
            Some(stage) => {
                debug!("Excluding {} ({:?})", path.display(), stage);
                false
            }
            None => true,
        }
    }

    fn matches_exclude(&self, path: &Path) -> bool {
        if self.exclude.is_empty() {
            return false;
        }
        let slashed = to_slash_string(path);
        self.exclude
            .iter()
            .any(|pattern| pattern.matches_with(&slashed, EXCLUDE_MATCH))
    }
}

/// Gather pattern lines from every custom ignore file.
/// An unreadable file contributes nothing beyond a warning.
fn collect_ignore_lines(files: &[PathBuf]) -> Vec<String> {
    let mut lines = Vec::new();
    for file in files {
        match std::fs::read_to_string(file) {
            Ok(content) => lines.extend(content.lines().map(str::to_string)),
            Err(err) => warn!("Cannot read ignore file {}: {}", file.display(), err),
        }
    }
    lines
}

/// A file is treated as binary when its first kilobyte contains a NUL
/// byte. Files that cannot be read are not classified as binary; the
/// renderer deals with (and reports) the read failure instead.
fn is_binary(path: &Path) -> bool {
    let Ok(file) = File::open(path) else {
        return false;
    };
    let mut head = Vec::with_capacity(BINARY_SNIFF_LEN);
    if file
        .take(BINARY_SNIFF_LEN as u64)
        .read_to_end(&mut head)
        .is_err()
    {
        return false;
    }
    head.contains(&0)
}
