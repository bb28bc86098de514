//! The closed set of languages the kiosk is translated into.

use crate::plural::{self, PluralCategory};
use serde::{Deserialize, Serialize};
use std::str::FromStr as _;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};
use unic_langid::LanguageIdentifier;

/// A supported language.
///
/// Parsing is ASCII case-insensitive, so `"RU"` and `"ru"` are the same code.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    Eq,
    Hash,
    IntoStaticStr,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Language {
    /// Azerbaijani.
    Az,
    /// English.
    En,
    /// Russian.
    Ru,
}

/// Text direction written to the document root.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, IntoStaticStr, PartialEq)]
#[strum(serialize_all = "lowercase")]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl Language {
    /// Used when nothing else is recognized.
    pub const FALLBACK: Language = Language::Az;

    /// Every supported language, in declaration order.
    pub const ALL: [Language; 3] = [Language::Az, Language::En, Language::Ru];

    /// Parses a code such as `"az"` or `" RU "`.
    ///
    /// Returns `None` for anything outside the supported set, including
    /// region-qualified tags like `"ru-RU"`; see
    /// [`fallback::language_from_locale`](crate::fallback::language_from_locale)
    /// for those.
    pub fn parse(code: &str) -> Option<Self> {
        Self::from_str(code.trim()).ok()
    }

    /// Parses a code, substituting `fallback` when it is not recognized.
    pub fn parse_or(code: &str, fallback: Language) -> Self {
        Self::parse(code).unwrap_or(fallback)
    }

    /// The lowercase code, e.g. `"az"`.
    pub fn code(self) -> &'static str {
        self.into()
    }

    pub fn direction(self) -> TextDirection {
        TextDirection::Ltr
    }

    /// The language as a `LanguageIdentifier`.
    pub fn langid(self) -> LanguageIdentifier {
        match self {
            Language::Az => unic_langid::langid!("az"),
            Language::En => unic_langid::langid!("en"),
            Language::Ru => unic_langid::langid!("ru"),
        }
    }

    /// The plural category of `count` in this language.
    pub fn plural_category(self, count: f64) -> PluralCategory {
        plural::plural_category(self, count)
    }
}

impl TextDirection {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}
