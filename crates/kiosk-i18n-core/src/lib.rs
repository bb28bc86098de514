//! Core functionality for the kiosk localization runtime.
//!
//! This crate holds everything that does not touch a document or a storage
//! backend: the closed language set, dictionaries, plural rules, key
//! resolution with interpolation, and locale-aware formatting.

pub mod audit;
pub mod dictionary;
pub mod error;
pub mod fallback;
pub mod format;
pub mod interpolate;
pub mod language;
pub mod plural;
pub mod resolver;
pub mod store;

pub use dictionary::{Dictionaries, Table};
pub use error::DictionaryError;
pub use format::{DateStyle, Formatter, NumberOptions};
pub use interpolate::{Variables, interpolate, stringify};
pub use language::{Language, TextDirection};
pub use plural::PluralCategory;
pub use resolver::Resolver;
pub use store::DictionaryStore;

#[doc(hidden)]
pub use serde_json as __serde_json;

/// Builds a [`Variables`] map from `name => value` pairs.
///
/// Values go through `serde_json::json!`, so numbers, strings and booleans
/// can be written directly.
///
/// ```
/// let vars = kiosk_i18n_core::vars! { "name" => "Aysel", "count" => 3 };
/// assert_eq!(vars.len(), 2);
/// ```
#[macro_export]
macro_rules! vars {
    () => {
        $crate::Variables::new()
    };
    ($($name:expr => $value:expr),+ $(,)?) => {{
        let mut vars = $crate::Variables::new();
        $(
            vars.insert(::std::string::String::from($name), $crate::__serde_json::json!($value));
        )+
        vars
    }};
}
