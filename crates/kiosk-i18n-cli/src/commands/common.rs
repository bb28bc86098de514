use crate::error::CliError;
use clap::Args;
use kiosk_i18n::load_dictionaries;
use kiosk_i18n_core::Dictionaries;
use kiosk_i18n_toml::{CONFIG_FILE_NAME, I18nConfig};
use std::path::{Path, PathBuf};

/// Where to read dictionaries from.
#[derive(Debug, Clone, Args)]
pub struct DictionaryArgs {
    /// Path to i18n.toml (defaults to ./i18n.toml).
    #[arg(short, long, conflicts_with = "global")]
    pub config: Option<PathBuf>,

    /// Global dictionary JSON, bypassing i18n.toml.
    #[arg(short, long)]
    pub global: Option<PathBuf>,

    /// Namespace dictionary JSON, used together with --global.
    #[arg(short, long, requires = "global")]
    pub namespaces: Option<PathBuf>,
}

/// Dictionaries plus a description of where they came from.
#[derive(Debug)]
pub struct LoadedDictionaries {
    pub source: String,
    pub dictionaries: Dictionaries,
}

impl DictionaryArgs {
    pub fn load(&self) -> Result<LoadedDictionaries, CliError> {
        if let Some(global) = &self.global {
            let dictionaries = Dictionaries::load(global, self.namespaces.as_deref())?;
            let source = match &self.namespaces {
                Some(ns) => format!("{} + {}", global.display(), ns.display()),
                None => global.display().to_string(),
            };
            return Ok(LoadedDictionaries {
                source,
                dictionaries,
            });
        }

        let path = self
            .config
            .clone()
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
        let config = I18nConfig::read_from_path(&path).map_err(|source| CliError::Config {
            path: path.clone(),
            source,
        })?;

        if config.dictionaries.is_none() {
            return Err(CliError::NoDictionaries(path));
        }

        let base_dir = path.parent().unwrap_or(Path::new(""));
        tracing::debug!("Resolving dictionaries relative to '{}'", base_dir.display());

        Ok(LoadedDictionaries {
            source: path.display().to_string(),
            dictionaries: load_dictionaries(&config, base_dir)?,
        })
    }
}
