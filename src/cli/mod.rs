//! Command-line plumbing.
//!
//! The clap surface itself lives in `main.rs`; this module holds the
//! two I/O concerns around it: where inputs come from and where the
//! rendered stream goes.

pub mod input;
pub mod output;
