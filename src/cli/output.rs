//! Output stream selection.
//!
//! The result stream goes to stdout unless `--output` names a file.
//! Logs go to stderr, so piping the result never mixes the two.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::types::{CtxError, Result};

/// Open the sink the rendered output is written to.
pub fn open(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path).map_err(|source| CtxError::Output {
                path: path.to_path_buf(),
                source,
            })?;
            debug!("Writing output to {}", path.display());
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(std::io::stdout().lock()))),
    }
}
