use kiosk_i18n::I18nError;
use kiosk_i18n_core::DictionaryError;
use kiosk_i18n_toml::I18nConfigError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Failed to read {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: I18nConfigError,
    },

    #[error("{0} does not configure any dictionaries; pass --global instead")]
    NoDictionaries(PathBuf),

    #[error(transparent)]
    Dictionary(#[from] DictionaryError),

    #[error(transparent)]
    Runtime(#[from] I18nError),

    #[error("Unsupported language '{0}' (expected one of az, en, ru)")]
    UnknownLanguage(String),

    #[error("Invalid variable '{0}' (expected name=value)")]
    InvalidVariable(String),

    #[error("{missing} missing key(s) across dictionaries")]
    MissingKeys { missing: usize },
}
