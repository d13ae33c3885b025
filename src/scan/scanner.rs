//! Input expansion and directory traversal.
//!
//! [`Scanner`] turns raw CLI inputs (paths or glob patterns) into the
//! final sorted file list. Each input is expanded against the
//! filesystem, directories are walked, and every surviving path has
//! passed the whole [`PathFilter`](super::PathFilter) chain exactly
//! once. Excluded directories are pruned, so their contents are never
//! read.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ignore::WalkBuilder;
use tracing::{debug, warn};

use super::ScanOptions;
use super::expand::expand_pattern;
use super::filter::PathFilter;
use crate::types::Result;
use crate::types::utils::normalize_path;

pub struct Scanner {
    options: ScanOptions,
    filter: Arc<PathFilter>,
}

impl Scanner {
    pub fn new(options: ScanOptions) -> Self {
        let filter = Arc::new(PathFilter::new(&options));
        Self { options, filter }
    }

    /// Resolve every input into included files, deduplicated across
    /// overlapping inputs and sorted by their string form.
    ///
    /// Per-input problems (bad pattern syntax, vanished paths,
    /// unreadable directories) are logged and skipped; they never
    /// abort the scan.
    pub fn scan(&self, inputs: &[String]) -> Result<Vec<PathBuf>> {
        // An input containing `**` asked for depth itself, so the
        // directories it matched are walked recursively even when
        // recursion is off. The hint survives deduplication.
        let mut candidates: HashMap<PathBuf, bool> = HashMap::new();
        for input in inputs {
            let expanded = match expand_pattern(input) {
                Ok(expanded) => expanded,
                Err(err) => {
                    warn!("Skipping pattern '{}': {}", input, err);
                    continue;
                }
            };
            let deep = input.contains("**");
            for path in expanded {
                *candidates.entry(normalize_path(&path)).or_insert(false) |= deep;
            }
            // Expansion lists only directories for a trailing `**`.
            // Whatever the prefix names goes back in as a candidate, so
            // the walk reaches the files the expansion never yielded.
            if let Some(prefix) = doublestar_prefix(input)
                && let Ok(roots) = expand_pattern(prefix)
            {
                for path in roots {
                    candidates.insert(normalize_path(&path), true);
                }
            }
        }

        let mut included: HashSet<PathBuf> = HashSet::new();
        for (candidate, deep) in candidates {
            let metadata = match std::fs::metadata(&candidate) {
                Ok(metadata) => metadata,
                Err(err) => {
                    warn!("Cannot access {}: {}", candidate.display(), err);
                    continue;
                }
            };
            if metadata.is_dir() {
                self.walk_directory(&candidate, self.options.recursive || deep, &mut included);
            } else if self.filter.is_included(&candidate, false) {
                included.insert(candidate);
            }
        }

        let mut files: Vec<PathBuf> = included.into_iter().collect();
        files.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
        debug!("Scan produced {} file(s)", files.len());
        Ok(files)
    }

    /// Walk one directory, collecting files that pass the filter.
    ///
    /// Symlinks are listed but never followed; a symlinked file still
    /// gets in when named directly on the command line, where metadata
    /// resolution applies.
    fn walk_directory(&self, root: &Path, recurse: bool, included: &mut HashSet<PathBuf>) {
        let mut builder = WalkBuilder::new(root);
        builder.standard_filters(false).follow_links(false);
        if !recurse {
            builder.max_depth(Some(1));
        }

        let filter = Arc::clone(&self.filter);
        builder.filter_entry(move |entry| {
            // The root was named explicitly; it is walked even when a
            // rule would exclude it, its entries are still filtered.
            if entry.depth() == 0 {
                return true;
            }
            if !entry.file_type().is_some_and(|kind| kind.is_dir()) {
                return true;
            }
            filter.is_included(&normalize_path(entry.path()), true)
        });

        for result in builder.build() {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("Skipping unreadable entry: {}", err);
                    continue;
                }
            };
            if !entry.file_type().is_some_and(|kind| kind.is_file()) {
                continue;
            }
            let path = normalize_path(entry.path());
            if self.filter.is_included(&path, false) {
                included.insert(path);
            }
        }
    }
}

/// The pattern left of a trailing recursive component, when there is one.
/// A bare `**` recurses from the working directory.
fn doublestar_prefix(input: &str) -> Option<&str> {
    if input == "**" {
        return Some(".");
    }
    input.strip_suffix("/**")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_file(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    /// A small project tree exercising every exclusion stage:
    /// gitignored directories, an anchored directory, gitignored and
    /// binary files, and a nested source file.
    fn sample_project() -> TempDir {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "main.go", "package main\n");
        write_file(dir.path(), "src/helper.go", "package src\n");
        write_file(dir.path(), "README.md", "# readme\n");
        write_file(dir.path(), ".gitignore", "dist/\n*.bin\n/secrets/\n");
        write_file(dir.path(), "dist/app", "built\n");
        write_file(dir.path(), "secrets/key.txt", "hunter2\n");
        fs::write(
            dir.path().join("data.bin"),
            [0x7f, 0x45, 0x4c, 0x46, 0x00, 0x01],
        )
        .unwrap();
        fs::write(
            dir.path().join("logo.png"),
            [0x89, 0x50, 0x4e, 0x47, 0x00, 0x0a],
        )
        .unwrap();
        dir
    }

    fn scan_with(options: ScanOptions, inputs: &[String]) -> Vec<PathBuf> {
        Scanner::new(options).scan(inputs).unwrap()
    }

    fn relative(files: &[PathBuf], root: &Path) -> Vec<String> {
        files
            .iter()
            .map(|file| {
                file.strip_prefix(root)
                    .unwrap_or(file)
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    fn input(path: &Path) -> Vec<String> {
        vec![path.to_string_lossy().into_owned()]
    }

    #[test]
    fn test_default_scan_applies_every_stage() {
        let dir = sample_project();
        let files = scan_with(ScanOptions::default(), &input(dir.path()));
        assert_eq!(
            relative(&files, dir.path()),
            vec![".gitignore", "README.md", "main.go", "src/helper.go"]
        );
    }

    #[test]
    fn test_disabling_gitignore_reveals_ignored_paths() {
        let dir = sample_project();
        let options = ScanOptions {
            use_gitignore: false,
            ..ScanOptions::default()
        };
        let files = scan_with(options, &input(dir.path()));
        // data.bin and logo.png stay out: the binary stage still runs.
        assert_eq!(
            relative(&files, dir.path()),
            vec![
                ".gitignore",
                "README.md",
                "dist/app",
                "main.go",
                "secrets/key.txt",
                "src/helper.go"
            ]
        );
    }

    #[test]
    fn test_disabling_binary_check_reveals_binary_files() {
        let dir = sample_project();
        let options = ScanOptions {
            binary_check: false,
            ..ScanOptions::default()
        };
        let files = scan_with(options, &input(dir.path()));
        // data.bin is still gitignored by *.bin.
        assert_eq!(
            relative(&files, dir.path()),
            vec![".gitignore", "README.md", "logo.png", "main.go", "src/helper.go"]
        );
    }

    #[test]
    fn test_non_recursive_stays_at_top_level() {
        let dir = sample_project();
        let options = ScanOptions {
            recursive: false,
            ..ScanOptions::default()
        };
        let files = scan_with(options, &input(dir.path()));
        assert_eq!(
            relative(&files, dir.path()),
            vec![".gitignore", "README.md", "main.go"]
        );
    }

    #[test]
    fn test_doublestar_input_recurses_despite_flag() {
        let dir = sample_project();
        let options = ScanOptions {
            recursive: false,
            ..ScanOptions::default()
        };
        let pattern = format!("{}/**", dir.path().to_string_lossy());
        let files = scan_with(options, &[pattern]);
        // Matches arrive as direct candidates too, so gitignore and the
        // binary sniff must hold for files named outside a walk.
        assert_eq!(
            relative(&files, dir.path()),
            vec![".gitignore", "README.md", "main.go", "src/helper.go"]
        );
    }

    #[test]
    fn test_doublestar_covers_top_level_files() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "top.txt", "t\n");
        write_file(dir.path(), "sub/inner.txt", "i\n");

        // Expansion alone only surfaces `sub`; the files show up
        // because the prefix is walked as its own root.
        let pattern = format!("{}/**", dir.path().to_string_lossy());
        let files = scan_with(ScanOptions::default(), &[pattern]);
        assert_eq!(
            relative(&files, dir.path()),
            vec!["sub/inner.txt", "top.txt"]
        );
    }

    #[test]
    fn test_exclude_patterns_trim_the_walk() {
        let dir = sample_project();
        let options = ScanOptions {
            exclude: vec!["**/*.md".to_string(), "**/main.go".to_string()],
            ..ScanOptions::default()
        };
        let files = scan_with(options, &input(dir.path()));
        assert_eq!(
            relative(&files, dir.path()),
            vec![".gitignore", "src/helper.go"]
        );
    }

    #[test]
    fn test_custom_ignore_file_applies_everywhere() {
        let dir = sample_project();
        let rules_dir = TempDir::new().unwrap();
        let rules = rules_dir.path().join("context.ignore");
        fs::write(&rules, "**/helper.go\n").unwrap();

        let options = ScanOptions {
            ignore_files: vec![rules],
            ..ScanOptions::default()
        };
        let files = scan_with(options, &input(dir.path()));
        assert_eq!(
            relative(&files, dir.path()),
            vec![".gitignore", "README.md", "main.go"]
        );
    }

    #[test]
    fn test_custom_dir_rule_reaches_directly_named_file() {
        let dir = sample_project();
        let rules_dir = TempDir::new().unwrap();
        let rules = rules_dir.path().join("context.ignore");
        fs::write(&rules, "secrets/\n").unwrap();

        // The tree lives outside the working directory, and the file is
        // named explicitly rather than reached through a walk.
        let options = ScanOptions {
            use_gitignore: false,
            ignore_files: vec![rules],
            ..ScanOptions::default()
        };
        let files = scan_with(options, &input(&dir.path().join("secrets/key.txt")));
        assert!(files.is_empty());
    }

    #[test]
    fn test_multiple_inputs_union() {
        let left = TempDir::new().unwrap();
        let right = TempDir::new().unwrap();
        write_file(left.path(), "a.txt", "a\n");
        write_file(left.path(), "sub/c.txt", "c\n");
        write_file(right.path(), "b.txt", "b\n");

        let left_input = input(left.path());
        let right_input = input(right.path());
        let combined = vec![left_input[0].clone(), right_input[0].clone()];

        // Scanning two disjoint trees together equals the union of
        // scanning them separately.
        let mut expected = scan_with(ScanOptions::default(), &left_input);
        expected.extend(scan_with(ScanOptions::default(), &right_input));
        expected.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));

        let files = scan_with(ScanOptions::default(), &combined);
        assert_eq!(files, expected);
        assert_eq!(files.len(), 3);
    }

    #[test]
    fn test_overlapping_inputs_deduplicate() {
        let dir = sample_project();
        let inputs = vec![
            dir.path().to_string_lossy().into_owned(),
            dir.path().join("main.go").to_string_lossy().into_owned(),
        ];
        let files = scan_with(ScanOptions::default(), &inputs);
        assert_eq!(
            relative(&files, dir.path()),
            vec![".gitignore", "README.md", "main.go", "src/helper.go"]
        );
    }

    #[test]
    fn test_repeated_scan_is_stable() {
        let dir = sample_project();
        let first = scan_with(ScanOptions::default(), &input(dir.path()));
        let second = scan_with(ScanOptions::default(), &input(dir.path()));
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_inputs_produce_empty_list() {
        let files = scan_with(ScanOptions::default(), &[]);
        assert!(files.is_empty());
    }

    #[test]
    fn test_missing_input_is_skipped() {
        let dir = sample_project();
        let inputs = vec![
            dir.path().join("no-such-file.txt").to_string_lossy().into_owned(),
            dir.path().to_string_lossy().into_owned(),
        ];
        let files = scan_with(ScanOptions::default(), &inputs);
        assert_eq!(
            relative(&files, dir.path()),
            vec![".gitignore", "README.md", "main.go", "src/helper.go"]
        );
    }

    #[test]
    fn test_invalid_pattern_is_skipped() {
        let dir = sample_project();
        let inputs = vec!["src/[".to_string(), dir.path().to_string_lossy().into_owned()];
        let files = scan_with(ScanOptions::default(), &inputs);
        assert_eq!(
            relative(&files, dir.path()),
            vec![".gitignore", "README.md", "main.go", "src/helper.go"]
        );
    }

    #[test]
    fn test_direct_file_input_still_filtered() {
        let dir = sample_project();
        // Naming an ignored or binary file explicitly does not bypass
        // the chain.
        let ignored = scan_with(
            ScanOptions::default(),
            &input(&dir.path().join("secrets/key.txt")),
        );
        assert!(ignored.is_empty());

        let binary = scan_with(ScanOptions::default(), &input(&dir.path().join("logo.png")));
        assert!(binary.is_empty());

        let kept = scan_with(ScanOptions::default(), &input(&dir.path().join("main.go")));
        assert_eq!(relative(&kept, dir.path()), vec!["main.go"]);
    }

    #[test]
    fn test_gitignored_directory_contents_never_appear() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), ".gitignore", "vault/\n");
        write_file(dir.path(), "vault/deep/nested.txt", "x\n");
        write_file(dir.path(), "kept.txt", "y\n");

        let files = scan_with(ScanOptions::default(), &input(dir.path()));
        assert_eq!(
            relative(&files, dir.path()),
            vec![".gitignore", "kept.txt"]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_directory_is_skipped() {
        use std::os::unix::fs::PermissionsExt;

        // Root ignores permission bits, so this scenario only exists
        // for ordinary users.
        let uid = std::process::Command::new("id").arg("-u").output().unwrap();
        if String::from_utf8_lossy(&uid.stdout).trim() == "0" {
            return;
        }

        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "ok.txt", "fine\n");
        write_file(dir.path(), "locked/hidden.txt", "no\n");
        let locked = dir.path().join("locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        let files = Scanner::new(ScanOptions::default()).scan(&input(dir.path()));

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        let files = files.unwrap();
        assert_eq!(relative(&files, dir.path()), vec!["ok.txt"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_ignored_directory_is_pruned_before_read() {
        use std::os::unix::fs::PermissionsExt;

        // Pruning acts on the directory itself, so an ignored subtree is
        // never opened. An unreadable one therefore cannot break the walk.
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), ".gitignore", "locked/\n");
        write_file(dir.path(), "kept.txt", "y\n");
        write_file(dir.path(), "locked/hidden.txt", "no\n");
        let locked = dir.path().join("locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        let files = Scanner::new(ScanOptions::default()).scan(&input(dir.path()));

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        let files = files.unwrap();
        assert_eq!(relative(&files, dir.path()), vec![".gitignore", "kept.txt"]);
    }
}
