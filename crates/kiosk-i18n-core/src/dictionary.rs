//! Host-supplied translation tables.
//!
//! The global table maps language → key → string. A namespace is an overlay
//! with the same shape, consulted before the global table when a directive
//! names it.

use crate::error::DictionaryError;
use crate::interpolate::stringify;
use crate::language::Language;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Key → string for one language.
pub type Table = HashMap<String, String>;

const INLINE_ORIGIN: &str = "<inline>";

/// All dictionaries known to the runtime.
///
/// The runtime never mutates a `Dictionaries` it has been given; hosts
/// replace the whole value through [`DictionaryStore`](crate::DictionaryStore).
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Dictionaries {
    global: HashMap<Language, Table>,
    namespaces: HashMap<String, HashMap<Language, Table>>,
}

impl Dictionaries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds global entries for `lang`, returning `self` for chaining.
    pub fn with_entries<I, K, V>(mut self, lang: Language, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.extend_language(lang, entries);
        self
    }

    /// Adds entries for `lang` under `namespace`, returning `self` for chaining.
    pub fn with_namespace_entries<I, K, V>(
        mut self,
        namespace: &str,
        lang: Language,
        entries: I,
    ) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.extend_namespace(namespace, lang, entries);
        self
    }

    pub fn extend_language<I, K, V>(&mut self, lang: Language, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.global
            .entry(lang)
            .or_default()
            .extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
    }

    pub fn extend_namespace<I, K, V>(&mut self, namespace: &str, lang: Language, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.namespaces
            .entry(namespace.to_string())
            .or_default()
            .entry(lang)
            .or_default()
            .extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
    }

    /// The global table for `lang`.
    pub fn global(&self, lang: Language) -> Option<&Table> {
        self.global.get(&lang)
    }

    /// The table for `lang` inside `namespace`.
    pub fn namespace(&self, namespace: &str, lang: Language) -> Option<&Table> {
        self.namespaces.get(namespace)?.get(&lang)
    }

    /// Picks the table a lookup starts from: the namespaced table when it
    /// exists for `lang`, otherwise the global one.
    pub fn select(&self, lang: Language, namespace: Option<&str>) -> Option<&Table> {
        if let Some(ns) = namespace
            && let Some(table) = self.namespace(ns, lang)
        {
            return Some(table);
        }
        self.global(lang)
    }

    /// Namespace ids, sorted.
    pub fn namespace_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.namespaces.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn is_empty(&self) -> bool {
        self.global.values().all(Table::is_empty)
            && self
                .namespaces
                .values()
                .all(|langs| langs.values().all(Table::is_empty))
    }

    /// Parses the host's JSON tables.
    ///
    /// `global` looks like `{"az": {"greet": "Salam"}}` and `namespaces` like
    /// `{"menu": {"az": {"title": "Menyu"}}}`. Unknown language codes are
    /// skipped with a warning; string, number and boolean values are accepted.
    pub fn from_json_str(global: &str, namespaces: Option<&str>) -> Result<Self, DictionaryError> {
        let global: Value = serde_json::from_str(global)?;
        let namespaces: Option<Value> = namespaces.map(serde_json::from_str::<Value>).transpose()?;
        Self::from_values(&global, namespaces.as_ref(), Path::new(INLINE_ORIGIN))
    }

    /// Reads and parses dictionary files.
    pub fn load(global: &Path, namespaces: Option<&Path>) -> Result<Self, DictionaryError> {
        let global_value: Value = serde_json::from_str(&fs_err::read_to_string(global)?)?;
        let mut dictionaries = Self::from_values(&global_value, None, global)?;

        if let Some(path) = namespaces {
            let ns_value: Value = serde_json::from_str(&fs_err::read_to_string(path)?)?;
            let ns_only = Self::from_values(&Value::Object(Map::new()), Some(&ns_value), path)?;
            dictionaries.namespaces = ns_only.namespaces;
        }

        tracing::debug!(
            "Loaded dictionaries from {} ({} namespaces)",
            global.display(),
            dictionaries.namespaces.len()
        );

        Ok(dictionaries)
    }

    fn from_values(
        global: &Value,
        namespaces: Option<&Value>,
        origin: &Path,
    ) -> Result<Self, DictionaryError> {
        let mut dictionaries = Self::new();

        for (lang, entries) in language_tables(global, origin)? {
            dictionaries.extend_language(lang, entries);
        }

        if let Some(namespaces) = namespaces {
            let Value::Object(map) = namespaces else {
                return Err(layout_error(origin, "namespace root must be an object"));
            };
            for (ns, langs) in map {
                for (lang, entries) in language_tables(langs, origin)? {
                    dictionaries.extend_namespace(ns, lang, entries);
                }
            }
        }

        Ok(dictionaries)
    }
}

fn language_tables(value: &Value, origin: &Path) -> Result<Vec<(Language, Table)>, DictionaryError> {
    let Value::Object(map) = value else {
        return Err(layout_error(origin, "expected an object keyed by language code"));
    };

    let mut tables = Vec::with_capacity(map.len());
    for (code, entries) in map {
        let Some(lang) = Language::parse(code) else {
            tracing::warn!("Skipping unsupported language '{}' in {}", code, origin.display());
            continue;
        };
        let Value::Object(entries) = entries else {
            return Err(layout_error(
                origin,
                &format!("entries for '{}' must be an object", code),
            ));
        };

        let mut table = Table::with_capacity(entries.len());
        for (key, value) in entries {
            match value {
                Value::String(_) | Value::Number(_) | Value::Bool(_) => {
                    table.insert(key.clone(), stringify(value));
                },
                _ => tracing::warn!(
                    "Skipping non-text value for '{}' ({}) in {}",
                    key,
                    code,
                    origin.display()
                ),
            }
        }
        tables.push((lang, table));
    }

    Ok(tables)
}

fn layout_error(origin: &Path, reason: &str) -> DictionaryError {
    DictionaryError::Layout {
        origin: PathBuf::from(origin),
        reason: reason.to_string(),
    }
}
