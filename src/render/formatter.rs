//! Placeholder substitution and output emission.
//!
//! Rendering is a single pass: each `{placeholder}` occurrence in the
//! template is replaced once, and substituted values are never scanned
//! again. File content containing literal `{path}` therefore survives
//! untouched.

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::types::Result;
use crate::types::utils::{absolutize, to_slash_string};

/// Values available to a template, precomputed per file.
#[derive(Debug, Clone)]
pub struct TemplateVars {
    pub content: String,
    pub path: String,
    pub abspath: String,
    pub basename: String,
    pub filename: String,
    pub extension: String,
}

impl TemplateVars {
    /// Read one file and derive its placeholder values.
    ///
    /// Content is decoded lossily, so the odd invalid byte renders as
    /// U+FFFD instead of failing the whole run.
    pub fn for_file(path: &Path, cwd: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let content = String::from_utf8_lossy(&bytes).into_owned();

        let lossy = |os: Option<&std::ffi::OsStr>| {
            os.map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default()
        };

        Ok(Self {
            content,
            path: display_path(path, cwd),
            abspath: to_slash_string(&absolutize(path, cwd)),
            basename: lossy(path.file_name()),
            filename: lossy(path.file_stem()),
            extension: lossy(path.extension()),
        })
    }
}

/// Working-directory-relative when the path allows it, as-given
/// otherwise. Always forward slashes.
fn display_path(path: &Path, cwd: &Path) -> String {
    if path.is_absolute()
        && let Ok(rel) = path.strip_prefix(cwd)
        && !rel.as_os_str().is_empty()
    {
        return to_slash_string(rel);
    }
    to_slash_string(path)
}

/// Substitute every placeholder occurrence in one pass.
///
/// Unknown names and unclosed braces are copied through verbatim.
pub fn apply(template: &str, vars: &TemplateVars) -> String {
    let mut out = String::with_capacity(template.len() + vars.content.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        match placeholder(tail, vars) {
            Some((value, consumed)) => {
                out.push_str(value);
                rest = &tail[consumed..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Match the placeholder at the head of `tail` (which starts with `{`).
/// Returns the replacement value and the byte length consumed.
fn placeholder<'a>(tail: &str, vars: &'a TemplateVars) -> Option<(&'a str, usize)> {
    let end = tail.find('}')?;
    let value = match &tail[1..end] {
        "content" => &vars.content,
        "path" => &vars.path,
        "abspath" => &vars.abspath,
        "basename" => &vars.basename,
        "filename" => &vars.filename,
        "extension" => &vars.extension,
        _ => return None,
    };
    Some((value, end + 1))
}

/// Render every file through the template into `writer`.
///
/// Files that fail to read are warned and skipped. Between two files a
/// single newline is inserted when the previous chunk is non-empty and
/// does not already end with one. Write and flush failures are fatal.
pub fn emit<W: Write>(writer: &mut W, files: &[PathBuf], template: &str) -> Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    for (index, file) in files.iter().enumerate() {
        let vars = match TemplateVars::for_file(file, &cwd) {
            Ok(vars) => vars,
            Err(err) => {
                warn!("Skipping {}: {}", file.display(), err);
                continue;
            }
        };
        let chunk = apply(template, &vars);
        writer.write_all(chunk.as_bytes())?;
        if index + 1 < files.len() && !chunk.is_empty() && !chunk.ends_with('\n') {
            writer.write_all(b"\n")?;
        }
    }
    writer.flush()?;
    Ok(())
}
