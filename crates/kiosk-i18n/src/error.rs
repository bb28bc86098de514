use kiosk_i18n_core::DictionaryError;
use kiosk_i18n_toml::I18nConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend refuses every operation (private mode, quota, policy).
    #[error("Storage is unavailable")]
    Unavailable,
    /// A value could not be encoded for storage.
    #[error("Failed to encode storage value: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum I18nError {
    #[error(transparent)]
    Config(#[from] I18nConfigError),
    #[error(transparent)]
    Dictionary(#[from] DictionaryError),
}
