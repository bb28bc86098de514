//! The current language and how it is found when nothing has chosen one yet.

use crate::document::Document;
use crate::storage::Storage;
use kiosk_i18n_core::Language;
use kiosk_i18n_core::fallback::language_from_locale;
use strum::{Display, IntoStaticStr};

/// Which link of the precedence chain supplied the language.
#[derive(Clone, Copy, Debug, Display, Eq, IntoStaticStr, PartialEq)]
#[strum(serialize_all = "snake_case")]
pub enum LanguageSource {
    Cached,
    Persisted,
    Document,
    RuntimeLocale,
    Fallback,
}

#[derive(Clone, Debug)]
pub struct LanguageState {
    cached: Option<Language>,
    fallback: Language,
    runtime_locale: Option<String>,
    language_key: String,
}

impl LanguageState {
    pub fn new(fallback: Language, runtime_locale: Option<String>, language_key: &str) -> Self {
        Self {
            cached: None,
            fallback,
            runtime_locale,
            language_key: language_key.to_string(),
        }
    }

    pub fn fallback(&self) -> Language {
        self.fallback
    }

    pub fn cached(&self) -> Option<Language> {
        self.cached
    }

    pub fn set_cached(&mut self, lang: Language) {
        self.cached = Some(lang);
    }

    /// The current language; see [`resolve_with_source`](Self::resolve_with_source).
    pub fn resolve<D, S>(&self, doc: &D, storage: &S) -> Language
    where
        D: Document + ?Sized,
        S: Storage + ?Sized,
    {
        self.resolve_with_source(doc, storage).0
    }

    /// The cached language, or else the first recognized of: the persisted
    /// selection, the root element's `lang`, the runtime locale, the
    /// fallback. Never caches what it computes.
    pub fn resolve_with_source<D, S>(&self, doc: &D, storage: &S) -> (Language, LanguageSource)
    where
        D: Document + ?Sized,
        S: Storage + ?Sized,
    {
        if let Some(lang) = self.cached {
            return (lang, LanguageSource::Cached);
        }

        match storage.get(&self.language_key) {
            Ok(Some(saved)) => {
                if let Some(lang) = Language::parse(&saved) {
                    return (lang, LanguageSource::Persisted);
                }
            },
            Ok(None) => {},
            Err(err) => tracing::debug!("Cannot read persisted language: {}", err),
        }

        if let Some(lang) = doc.declared_language().and_then(Language::parse) {
            return (lang, LanguageSource::Document);
        }

        if let Some(lang) = self.runtime_locale.as_deref().and_then(language_from_locale) {
            return (lang, LanguageSource::RuntimeLocale);
        }

        (self.fallback, LanguageSource::Fallback)
    }
}
