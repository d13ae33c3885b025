pub mod error;
pub mod utils;

pub use error::{CtxError, Result};
pub use utils::{absolutize, normalize_path, to_slash_string};
