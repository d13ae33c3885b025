//! Compiled ignore rulesets.
//!
//! One [`IgnoreRules`] value holds the patterns of a single source - a
//! `.gitignore` file, or the concatenated lines of the user's custom ignore
//! files - compiled against a base directory. Matching follows `.gitignore`
//! semantics: `#` comments and blank lines are skipped, a trailing `/`
//! restricts a pattern to directories, a leading `/` anchors it to the
//! base, patterns without a `/` match at any depth, and `!` re-includes.

use ignore::Match;
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::types::{CtxError, Result};

pub struct IgnoreRules {
    base: PathBuf,
    matcher: Gitignore,
}

impl IgnoreRules {
    /// Compile a `.gitignore`-style file rooted at `base`.
    ///
    /// Unparsable lines are reported once and the remaining lines still
    /// take effect, which is how git itself treats a bad pattern.
    pub fn from_file(base: &Path, file: &Path) -> Result<Self> {
        let mut builder = GitignoreBuilder::new(base);
        if let Some(err) = builder.add(file) {
            warn!("Problem reading {}: {}", file.display(), err);
        }
        let matcher = builder
            .build()
            .map_err(|e| CtxError::ignore_file(file, e))?;

        Ok(Self {
            base: base.to_path_buf(),
            matcher,
        })
    }

    /// Compile raw pattern lines rooted at `base`.
    ///
    /// Bad lines are skipped with a warning; the result may be empty.
    pub fn from_lines<I, S>(base: &Path, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = GitignoreBuilder::new(base);
        for line in lines {
            let line = line.as_ref().trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Err(err) = builder.add_line(None, line) {
                warn!("Skipping ignore pattern '{}': {}", line, err);
            }
        }
        let matcher = builder.build().unwrap_or_else(|err| {
            warn!("Ignore rules disabled: {}", err);
            Gitignore::empty()
        });

        Self {
            base: base.to_path_buf(),
            matcher,
        }
    }

    /// True when no effective pattern was compiled.
    pub fn is_empty(&self) -> bool {
        self.matcher.is_empty()
    }

    /// Whether `path` is excluded by these rules.
    ///
    /// Parent directories are always part of the verdict, so a file
    /// inside a directory matched by a `dir/`-style pattern is itself
    /// considered matched - the outcome a walk with directory pruning
    /// would reach. An absolute path outside the base subtree is matched
    /// as raw text, ancestors included, which lets globally-scoped rules
    /// like `**/*.log` or `cache/` apply no matter where the candidate
    /// lives.
    pub fn matches(&self, path: &Path, is_dir: bool) -> bool {
        if self.matcher.is_empty() {
            return false;
        }

        let in_tree = !path.has_root() || path.starts_with(&self.base);
        let matched = if in_tree {
            self.matcher.matched_path_or_any_parents(path, is_dir)
        } else {
            // Raw matching sees one path at a time, so the ancestors
            // are tried by hand; the first verdict on an enclosing
            // directory stands for the path.
            let mut verdict = self.matcher.matched(path, is_dir);
            let mut dir = path.parent();
            while matches!(verdict, Match::None)
                && let Some(ancestor) = dir
                && ancestor.file_name().is_some()
            {
                verdict = self.matcher.matched(ancestor, true);
                dir = ancestor.parent();
            }
            verdict
        };

        match matched {
            Match::Ignore(_) => true,
            Match::Whitelist(_) | Match::None => false,
        }
    }
}
