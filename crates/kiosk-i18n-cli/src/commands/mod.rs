//! CLI command implementations.

mod check;
mod common;
mod translate;

pub use check::{CheckArgs, run_check};
pub use common::{DictionaryArgs, LoadedDictionaries};
pub use translate::{TranslateArgs, run_translate};
