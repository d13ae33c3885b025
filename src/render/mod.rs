//! Output rendering.
//!
//! `template` decides which template text to use; `formatter` performs
//! placeholder substitution and writes the concatenated result.

pub mod formatter;
pub mod template;

pub use formatter::{TemplateVars, apply, emit};
pub use template::{DEFAULT_TEMPLATE, resolve};
