//! Shared path utilities.
//!
//! All helpers here are lexical: they never touch the filesystem and never
//! resolve symlinks, so a path's textual identity is stable between the
//! filtering pass and the rendering pass.

use std::path::{Component, Path, PathBuf};

/// Drop `.` components so `./src/main.go` and `src/main.go` compare equal.
///
/// A path that collapses to nothing (`.` or `./`) stays `.` rather than
/// becoming empty.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            other => out.push(other),
        }
    }
    if out.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        out
    }
}

/// Lexically absolutize `path` against `cwd`.
///
/// `.` components are dropped and `..` components pop the previous segment,
/// mirroring what a path join-and-clean would produce. `..` at the root is
/// discarded.
pub fn absolutize(path: &Path, cwd: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };

    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// Render a path with forward slashes regardless of platform.
pub fn to_slash_string(path: &Path) -> String {
    let raw = path.to_string_lossy();
    if std::path::MAIN_SEPARATOR == '/' {
        raw.into_owned()
    } else {
        raw.replace(std::path::MAIN_SEPARATOR, "/")
    }
}
