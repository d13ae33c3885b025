//! Input acquisition.
//!
//! Positional arguments win. With no arguments and a piped stdin, each
//! non-blank line becomes one input; with an interactive terminal the
//! working directory is scanned.

use std::io::{BufRead, IsTerminal};

use tracing::debug;

use crate::types::Result;

/// Decide what the scan operates on.
pub fn resolve_inputs(args: &[String]) -> Result<Vec<String>> {
    if !args.is_empty() {
        debug!("Using {} argument(s) as inputs", args.len());
        return Ok(args.to_vec());
    }

    let stdin = std::io::stdin();
    if !stdin.is_terminal() {
        let inputs = collect_lines(stdin.lock())?;
        debug!("Read {} input(s) from stdin", inputs.len());
        return Ok(inputs);
    }

    debug!("No inputs given, scanning the working directory");
    Ok(vec![".".to_string()])
}

/// One input per line, trimmed, blank lines dropped. An empty reader
/// yields an empty list, which downstream treats as a successful
/// empty run.
fn collect_lines<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut inputs = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            inputs.push(trimmed.to_string());
        }
    }
    Ok(inputs)
}
