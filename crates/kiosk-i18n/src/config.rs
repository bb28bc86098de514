use crate::error::I18nError;
use kiosk_i18n_core::fallback::{language_from_locale, system_locale};
use kiosk_i18n_core::{Dictionaries, Language};
use kiosk_i18n_toml::{I18nConfig, I18nConfigError};
use std::path::Path;
use std::time::Duration;

/// Settings of one [`I18n`](crate::I18n) runtime.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RuntimeConfig {
    pub fallback: Language,
    pub default_currency: String,
    pub observe_mutations: bool,
    pub initial_pass_delay: Duration,
    /// Log language changes at info level instead of debug.
    pub debug: bool,
    pub language_key: String,
    pub broadcast_key: String,
    /// Locale of the host process, consulted before the fallback. `None`
    /// skips that step.
    pub runtime_locale: Option<String>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::from_validated(&I18nConfig::default(), Language::FALLBACK, None)
    }
}

impl RuntimeConfig {
    /// Builds the runtime settings from `i18n.toml` values, taking the
    /// runtime locale from the process environment.
    pub fn from_config(config: &I18nConfig) -> Result<Self, I18nConfigError> {
        config.validate()?;

        let fallback = language_from_locale(&config.fallback_language).ok_or_else(|| {
            I18nConfigError::UnsupportedLanguageIdentifier {
                name: config.fallback_language.clone(),
                reason: "the fallback must be one of az, en, ru".to_string(),
            }
        })?;

        Ok(Self::from_validated(config, fallback, system_locale()))
    }

    pub fn with_runtime_locale(mut self, locale: impl Into<String>) -> Self {
        self.runtime_locale = Some(locale.into());
        self
    }

    fn from_validated(config: &I18nConfig, fallback: Language, runtime_locale: Option<String>) -> Self {
        Self {
            fallback,
            default_currency: config.default_currency.to_ascii_uppercase(),
            observe_mutations: config.observe_mutations,
            initial_pass_delay: config.initial_pass_delay(),
            debug: config.debug,
            language_key: config.storage.language_key.clone(),
            broadcast_key: config.storage.broadcast_key.clone(),
            runtime_locale,
        }
    }
}

/// Loads the dictionaries configured in `config`, resolving paths against
/// `base_dir`. Empty dictionaries when none are configured.
pub fn load_dictionaries(config: &I18nConfig, base_dir: &Path) -> Result<Dictionaries, I18nError> {
    let Some(paths) = config.dictionary_paths_from_base(Some(base_dir))? else {
        tracing::debug!("No dictionaries configured");
        return Ok(Dictionaries::new());
    };

    Ok(Dictionaries::load(&paths.global, paths.namespaces.as_deref())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_the_config_file_defaults() {
        let config = RuntimeConfig::default();
        assert_eq!(config.fallback, Language::Az);
        assert_eq!(config.default_currency, "AZN");
        assert!(config.observe_mutations);
        assert_eq!(config.initial_pass_delay, Duration::from_millis(50));
        assert_eq!(config.language_key, "selectedLanguage");
        assert_eq!(config.broadcast_key, "i18n_broadcast");
        assert_eq!(config.runtime_locale, None);
    }

    #[test]
    fn from_config_maps_fallback() {
        let config = I18nConfig {
            fallback_language: "en-GB".to_string(),
            observe_mutations: false,
            ..I18nConfig::default()
        };

        let runtime = RuntimeConfig::from_config(&config).unwrap();

        assert_eq!(runtime.fallback, Language::En);
        assert!(!runtime.observe_mutations);
    }

    #[test]
    fn from_config_rejects_unsupported_fallback() {
        let config = I18nConfig {
            fallback_language: "de".to_string(),
            ..I18nConfig::default()
        };

        assert!(matches!(
            RuntimeConfig::from_config(&config),
            Err(I18nConfigError::UnsupportedLanguageIdentifier { .. })
        ));
    }

    #[test]
    fn load_dictionaries_resolves_against_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("i18n")).unwrap();
        fs::write(
            temp_dir.path().join("i18n/translations.json"),
            r#"{"az": {"greet": "Salam"}}"#,
        )
        .unwrap();
        fs::write(
            temp_dir.path().join("i18n.toml"),
            "[dictionaries]\nglobal = \"i18n/translations.json\"\n",
        )
        .unwrap();
        let config = I18nConfig::from_manifest_dir(temp_dir.path()).unwrap();

        let dicts = load_dictionaries(&config, temp_dir.path()).unwrap();

        assert_eq!(dicts.global(Language::Az).unwrap().get("greet").unwrap(), "Salam");
    }

    #[test]
    fn load_dictionaries_without_config_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let dicts = load_dictionaries(&I18nConfig::default(), temp_dir.path()).unwrap();
        assert!(dicts.is_empty());
    }
}
