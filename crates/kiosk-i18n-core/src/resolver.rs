//! Key resolution: plural selection, namespace fallback and interpolation.

use crate::dictionary::{Dictionaries, Table};
use crate::interpolate::{Variables, interpolate};
use crate::language::Language;
use crate::plural::PluralCategory;
use crate::store::DictionaryStore;
use serde_json::Value;

/// Resolves translation keys against a [`DictionaryStore`].
///
/// The resolver holds no state of its own beyond the store handle; each call
/// is a pure function of its arguments and the store's current snapshot.
#[derive(Clone, Debug, Default)]
pub struct Resolver {
    store: DictionaryStore,
}

impl Resolver {
    pub fn new(store: DictionaryStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &DictionaryStore {
        &self.store
    }

    /// Resolves `key` for `lang` and interpolates `vars`.
    ///
    /// Never fails: a key with no entry anywhere resolves to itself.
    pub fn resolve(
        &self,
        lang: Language,
        key: &str,
        vars: &Variables,
        namespace: Option<&str>,
    ) -> String {
        resolve_in(&self.store.snapshot(), lang, key, vars, namespace)
    }
}

/// [`Resolver::resolve`] against an explicit set of dictionaries.
pub fn resolve_in(
    dictionaries: &Dictionaries,
    lang: Language,
    key: &str,
    vars: &Variables,
    namespace: Option<&str>,
) -> String {
    interpolate(lookup(dictionaries, lang, key, vars, namespace), vars)
}

/// Finds the raw template for `key` without interpolating it.
///
/// Order: `key_<category>`, `key_other`, `key` in the selected table; when a
/// namespace was given, the same again in the global table; then `key` itself.
pub fn lookup<'a>(
    dictionaries: &'a Dictionaries,
    lang: Language,
    key: &'a str,
    vars: &Variables,
    namespace: Option<&str>,
) -> &'a str {
    let category = plural_count(vars).map(|count| lang.plural_category(count));

    if let Some(table) = dictionaries.select(lang, namespace)
        && let Some(found) = lookup_in_table(table, key, category)
    {
        return found;
    }

    if namespace.is_some()
        && let Some(table) = dictionaries.global(lang)
        && let Some(found) = lookup_in_table(table, key, category)
    {
        return found;
    }

    tracing::debug!("Translation for '{}' ({}) not found", key, lang);
    key
}

fn lookup_in_table<'a>(
    table: &'a Table,
    key: &str,
    category: Option<PluralCategory>,
) -> Option<&'a str> {
    if let Some(category) = category {
        if let Some(found) = table.get(&category.key_for(key)) {
            return Some(found);
        }
        if let Some(found) = table.get(&PluralCategory::Other.key_for(key)) {
            return Some(found);
        }
    }
    table.get(key).map(String::as_str)
}

/// The numeric `count` variable, if there is one.
///
/// JSON numbers count, and so do strings holding a finite number, since
/// values from single-variable attributes always arrive as text.
pub fn plural_count(vars: &Variables) -> Option<f64> {
    match vars.get("count")? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}
