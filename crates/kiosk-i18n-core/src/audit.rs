//! Consistency checks across the languages of a [`Dictionaries`].
//!
//! Plural variants are compared by their base key, since languages use
//! different sets of categories (`items_few` only exists in Russian).

use crate::dictionary::{Dictionaries, Table};
use crate::interpolate::placeholders;
use crate::language::Language;
use crate::plural::split_plural_key;
use std::collections::{BTreeMap, BTreeSet};

/// A key that exists in some language of a scope but not in `language`.
#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub struct MissingKey {
    /// `None` for the global table.
    pub namespace: Option<String>,
    pub language: Language,
    /// The base key (plural suffix removed).
    pub key: String,
}

/// A key whose placeholders differ from the reference language.
#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub struct PlaceholderMismatch {
    pub namespace: Option<String>,
    pub key: String,
    pub reference: Language,
    pub language: Language,
    pub expected: BTreeSet<String>,
    pub found: BTreeSet<String>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AuditReport {
    pub missing: Vec<MissingKey>,
    pub placeholder_mismatches: Vec<PlaceholderMismatch>,
}

impl AuditReport {
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.placeholder_mismatches.is_empty()
    }
}

/// Audits the global table across every supported language, and each
/// namespace across the languages it defines.
pub fn audit(dictionaries: &Dictionaries) -> AuditReport {
    let mut report = AuditReport::default();

    let global: Vec<(Language, Option<&Table>)> = Language::ALL
        .iter()
        .map(|&lang| (lang, dictionaries.global(lang)))
        .collect();
    audit_scope(None, &global, &mut report);

    for ns in dictionaries.namespace_ids() {
        let tables: Vec<(Language, Option<&Table>)> = Language::ALL
            .iter()
            .filter_map(|&lang| dictionaries.namespace(ns, lang).map(|t| (lang, Some(t))))
            .collect();
        audit_scope(Some(ns), &tables, &mut report);
    }

    report.missing.sort();
    report.placeholder_mismatches.sort();
    report
}

fn audit_scope(
    namespace: Option<&str>,
    tables: &[(Language, Option<&Table>)],
    report: &mut AuditReport,
) {
    let base_keys: BTreeMap<Language, BTreeSet<&str>> = tables
        .iter()
        .map(|(lang, table)| {
            let keys = table
                .map(|t| t.keys().map(|k| base_key(k)).collect())
                .unwrap_or_default();
            (*lang, keys)
        })
        .collect();

    let all_keys: BTreeSet<&str> = base_keys.values().flatten().copied().collect();

    for (lang, keys) in &base_keys {
        for key in all_keys.difference(keys) {
            report.missing.push(MissingKey {
                namespace: namespace.map(str::to_string),
                language: *lang,
                key: (*key).to_string(),
            });
        }
    }

    let mut exact_keys: BTreeSet<&str> = BTreeSet::new();
    for table in tables.iter().filter_map(|(_, table)| *table) {
        exact_keys.extend(table.keys().map(String::as_str));
    }

    for key in exact_keys {
        let mut reference: Option<(Language, BTreeSet<String>)> = None;
        for (lang, table) in tables {
            let Some(template) = table.and_then(|t| t.get(key)) else {
                continue;
            };
            let found: BTreeSet<String> =
                placeholders(template).into_iter().map(str::to_string).collect();

            if reference.is_none() {
                reference = Some((*lang, found));
                continue;
            }

            if let Some((ref_lang, expected)) = &reference
                && *expected != found
            {
                report.placeholder_mismatches.push(PlaceholderMismatch {
                    namespace: namespace.map(str::to_string),
                    key: key.to_string(),
                    reference: *ref_lang,
                    language: *lang,
                    expected: expected.clone(),
                    found,
                });
            }
        }
    }
}

fn base_key(key: &str) -> &str {
    split_plural_key(key).map_or(key, |(base, _)| base)
}
