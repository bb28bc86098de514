#![doc = include_str!("../README.md")]

use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use unic_langid::{LanguageIdentifier, LanguageIdentifierError};

pub mod build;

/// File name looked up next to the manifest.
pub const CONFIG_FILE_NAME: &str = "i18n.toml";

#[derive(Debug, Error)]
pub enum I18nConfigError {
    /// Configuration file not found.
    #[error("i18n.toml configuration file not found")]
    NotFound,
    /// Failed to read configuration file.
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse configuration file.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),
    /// Encountered an invalid fallback language identifier.
    #[error("Invalid fallback language identifier '{name}'")]
    InvalidFallbackLanguageIdentifier {
        /// The invalid identifier.
        name: String,
        /// The parsing error produced by `unic-langid`.
        #[source]
        source: LanguageIdentifierError,
    },
    /// Encountered a language identifier that uses an unsupported subtag combination.
    #[error("Language identifier '{name}' is not supported: {reason}")]
    UnsupportedLanguageIdentifier {
        /// The invalid identifier.
        name: String,
        /// Explanation of why it is not supported.
        reason: String,
    },
    /// The default currency is not an ISO 4217 style code.
    #[error("Invalid default currency '{code}': expected three ASCII letters")]
    InvalidCurrency {
        /// The rejected code.
        code: String,
    },
}

/// Storage keys shared by every window of the same origin.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct StorageKeys {
    /// Key holding the authoritative selected language.
    pub language_key: String,
    /// Key holding the timestamped broadcast envelope.
    pub broadcast_key: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            language_key: "selectedLanguage".to_string(),
            broadcast_key: "i18n_broadcast".to_string(),
        }
    }
}

/// Where the host keeps its dictionary JSON files.
///
/// Paths are relative to the directory holding `i18n.toml`.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct DictionarySources {
    /// Flat per-language table, e.g. `{"az": {"greet": "Salam"}}`.
    pub global: PathBuf,
    /// Optional per-namespace table, e.g. `{"menu": {"az": {...}}}`.
    #[serde(default)]
    pub namespaces: Option<PathBuf>,
}

/// The configuration for the localization runtime.
///
/// Every field is optional in the file:
///
/// ```toml
/// fallback_language = "az"
/// default_currency = "AZN"
/// observe_mutations = true
/// initial_pass_delay_ms = 50
///
/// [storage]
/// language_key = "selectedLanguage"
/// broadcast_key = "i18n_broadcast"
///
/// [dictionaries]
/// global = "i18n/translations.json"
/// namespaces = "i18n/namespaces.json"
/// ```
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct I18nConfig {
    /// The language used when nothing else is recognized (e.g., "az").
    pub fallback_language: String,
    /// Currency used by `format_currency` when the caller gives none.
    pub default_currency: String,
    /// Re-apply translations to inserted document nodes.
    pub observe_mutations: bool,
    /// Delay before the one deferred full pass scheduled by `init`.
    pub initial_pass_delay_ms: u64,
    /// Log language changes and broadcasts at info level.
    pub debug: bool,
    /// Shared storage keys.
    pub storage: StorageKeys,
    /// Optional dictionary files.
    pub dictionaries: Option<DictionarySources>,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            fallback_language: "az".to_string(),
            default_currency: "AZN".to_string(),
            observe_mutations: true,
            initial_pass_delay_ms: 50,
            debug: false,
            storage: StorageKeys::default(),
            dictionaries: None,
        }
    }
}

impl I18nConfig {
    /// Reads the configuration from a path.
    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self, I18nConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(I18nConfigError::NotFound);
        }

        let content = fs_err::read_to_string(path)?;

        let config: I18nConfig = toml::from_str(&content)?;

        Ok(config)
    }

    /// Reads the configuration from the manifest directory.
    pub fn read_from_manifest_dir() -> Result<Self, I18nConfigError> {
        let manifest_dir = env::var("CARGO_MANIFEST_DIR").map_err(|_| I18nConfigError::NotFound)?;
        Self::from_manifest_dir(Path::new(&manifest_dir))
    }

    /// Reads `i18n.toml` located in `manifest_dir`.
    pub fn from_manifest_dir(manifest_dir: &Path) -> Result<Self, I18nConfigError> {
        Self::read_from_path(manifest_dir.join(CONFIG_FILE_NAME))
    }

    /// Checks the values that cannot be expressed by the file format alone.
    pub fn validate(&self) -> Result<(), I18nConfigError> {
        self.fallback_language_identifier()?;

        let code = &self.default_currency;
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(I18nConfigError::InvalidCurrency { code: code.clone() });
        }

        Ok(())
    }

    /// Returns the configured fallback language as a `LanguageIdentifier`.
    pub fn fallback_language_identifier(&self) -> Result<LanguageIdentifier, I18nConfigError> {
        let lang = self
            .fallback_language
            .parse::<LanguageIdentifier>()
            .map_err(
                |source| I18nConfigError::InvalidFallbackLanguageIdentifier {
                    name: self.fallback_language.clone(),
                    source,
                },
            )?;

        ensure_supported_language_identifier(&lang, &self.fallback_language)?;

        Ok(lang)
    }

    /// The deferred initial pass delay as a `Duration`.
    pub fn initial_pass_delay(&self) -> Duration {
        Duration::from_millis(self.initial_pass_delay_ms)
    }

    /// Resolves the dictionary paths against `base_dir`.
    ///
    /// If `base_dir` is `None`, uses `CARGO_MANIFEST_DIR` environment variable.
    /// Returns `Ok(None)` when no dictionaries are configured.
    pub fn dictionary_paths_from_base(
        &self,
        base_dir: Option<&Path>,
    ) -> Result<Option<DictionarySources>, I18nConfigError> {
        let Some(sources) = &self.dictionaries else {
            return Ok(None);
        };

        let base = match base_dir {
            Some(dir) => dir.to_path_buf(),
            None => {
                let manifest_dir =
                    env::var("CARGO_MANIFEST_DIR").map_err(|_| I18nConfigError::NotFound)?;
                PathBuf::from(manifest_dir)
            },
        };

        Ok(Some(DictionarySources {
            global: base.join(&sources.global),
            namespaces: sources.namespaces.as_ref().map(|ns| base.join(ns)),
        }))
    }
}

fn ensure_supported_language_identifier(
    lang: &LanguageIdentifier,
    original: &str,
) -> Result<(), I18nConfigError> {
    if lang.variants().next().is_some() {
        return Err(I18nConfigError::UnsupportedLanguageIdentifier {
            name: original.to_string(),
            reason: "variants are not supported".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_read_from_path_success() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("i18n.toml");

        let config_content = r#"
fallback_language = "en"
initial_pass_delay_ms = 10

[storage]
language_key = "lang"
"#;

        fs::write(&config_path, config_content).unwrap();

        let config = I18nConfig::read_from_path(&config_path).unwrap();
        assert_eq!(config.fallback_language, "en");
        assert_eq!(config.initial_pass_delay(), Duration::from_millis(10));
        assert_eq!(config.storage.language_key, "lang");
        assert_eq!(config.storage.broadcast_key, "i18n_broadcast");
        assert!(config.observe_mutations);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("i18n.toml");
        fs::write(&config_path, "").unwrap();

        let config = I18nConfig::read_from_path(&config_path).unwrap();
        assert_eq!(config, I18nConfig::default());
        assert_eq!(config.fallback_language, "az");
        assert_eq!(config.default_currency, "AZN");
    }

    #[test]
    fn test_read_from_path_file_not_found() {
        let non_existent_path = Path::new("/non/existent/path/i18n.toml");
        let result = I18nConfig::read_from_path(non_existent_path);
        assert!(matches!(result, Err(I18nConfigError::NotFound)));
    }

    #[test]
    fn test_read_from_path_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("i18n.toml");

        fs::write(&config_path, "fallback_language = [1, 2]\n").unwrap();

        let result = I18nConfig::read_from_path(&config_path);
        assert!(matches!(result, Err(I18nConfigError::ParseError(_))));
    }

    #[test]
    fn test_fallback_language_identifier_invalid() {
        let config = I18nConfig {
            fallback_language: "invalid-lang!".to_string(),
            ..I18nConfig::default()
        };

        let result = config.fallback_language_identifier();

        assert!(matches!(
            result,
            Err(I18nConfigError::InvalidFallbackLanguageIdentifier { name, .. })
                if name == "invalid-lang!"
        ));
    }

    #[rstest]
    #[case("AZN", true)]
    #[case("usd", true)]
    #[case("EURO", false)]
    #[case("₼", false)]
    #[case("", false)]
    fn test_validate_currency(#[case] code: &str, #[case] valid: bool) {
        let config = I18nConfig {
            default_currency: code.to_string(),
            ..I18nConfig::default()
        };

        assert_eq!(config.validate().is_ok(), valid);
    }

    #[test]
    fn test_dictionary_paths_resolve_against_base() {
        let config: I18nConfig = toml::from_str(
            r#"
[dictionaries]
global = "i18n/translations.json"
namespaces = "i18n/ns.json"
"#,
        )
        .unwrap();

        let paths = config
            .dictionary_paths_from_base(Some(Path::new("/srv/kiosk")))
            .unwrap()
            .unwrap();

        assert_eq!(paths.global, PathBuf::from("/srv/kiosk/i18n/translations.json"));
        assert_eq!(paths.namespaces, Some(PathBuf::from("/srv/kiosk/i18n/ns.json")));
    }

    #[test]
    fn test_dictionary_paths_absent() {
        let config = I18nConfig::default();
        assert_eq!(
            config
                .dictionary_paths_from_base(Some(Path::new("/tmp")))
                .unwrap(),
            None
        );
    }

    #[test]
    #[serial_test::serial]
    fn test_read_from_manifest_dir_uses_env() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("i18n.toml"),
            "fallback_language = \"ru\"\n",
        )
        .unwrap();

        let config = temp_env::with_var("CARGO_MANIFEST_DIR", Some(temp_dir.path()), || {
            I18nConfig::read_from_manifest_dir()
        })
        .unwrap();

        assert_eq!(config.fallback_language, "ru");
    }
}
