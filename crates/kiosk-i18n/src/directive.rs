//! Translation directives: the `data-*` attributes the runtime reads.

use crate::document::{Document, NodeId};
use kiosk_i18n_core::Variables;
use serde_json::Value;

/// Base key; the element's text is replaced.
pub const TRANSLATE: &str = "data-translate";
/// Base key; the element's markup is replaced.
pub const TRANSLATE_HTML: &str = "data-translate-html";
/// Comma-separated attribute names to translate.
pub const TRANSLATE_ATTR: &str = "data-translate-attr";
/// Namespace to look keys up in first.
pub const TRANSLATE_NS: &str = "data-translate-ns";
/// JSON object of variables.
pub const VARS: &str = "data-vars";
/// Prefix of single-variable attributes, `data-var-amount="12.50"`.
pub const VAR_PREFIX: &str = "data-var-";
/// Prefix of per-attribute keys, `data-translate-placeholder="search.hint"`.
pub const TRANSLATE_PREFIX: &str = "data-translate-";
/// Marks a language switch button; the value is a language code.
pub const LANGUAGE_SWITCH: &str = "data-language-switch";

/// The namespace named by `node`, with an empty value treated as absent.
pub fn namespace<D: Document + ?Sized>(doc: &D, node: NodeId) -> Option<String> {
    doc.attribute(node, TRANSLATE_NS)
        .filter(|ns| !ns.is_empty())
        .map(str::to_string)
}

/// Variables declared on `node`.
///
/// Starts from the `data-vars` object; `data-var-<name>` attributes are
/// added on top and win on conflict. Bad `data-vars` JSON is ignored.
pub fn variables<D: Document + ?Sized>(doc: &D, node: NodeId) -> Variables {
    let mut vars = Variables::new();

    if let Some(raw) = doc.attribute(node, VARS)
        && !raw.trim().is_empty()
    {
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => vars.extend(map),
            Ok(Value::Null) => {},
            Ok(other) => tracing::debug!("Ignoring non-object data-vars: {}", other),
            Err(err) => tracing::debug!("Bad data-vars JSON '{}': {}", raw, err),
        }
    }

    for (name, value) in doc.attributes(node) {
        if let Some(var) = name.strip_prefix(VAR_PREFIX) {
            vars.insert(var.to_string(), Value::String(value.to_string()));
        }
    }

    vars
}

/// Attribute names listed in `data-translate-attr`, trimmed, empties dropped.
pub fn translated_attributes<D: Document + ?Sized>(doc: &D, node: NodeId) -> Vec<String> {
    doc.attribute(node, TRANSLATE_ATTR)
        .map(|list| {
            list.split(',')
                .map(str::trim)
                .filter(|attr| !attr.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// The key for translating `attr` on `node`.
///
/// `data-translate-<attr>` when present and non-empty, otherwise
/// `<baseKey>@<attr>` where the base key comes from `data-translate` or else
/// `data-translate-html`.
pub fn attribute_key<D: Document + ?Sized>(doc: &D, node: NodeId, attr: &str) -> Option<String> {
    let specific = format!("{}{}", TRANSLATE_PREFIX, attr);
    if let Some(key) = doc.attribute(node, &specific).filter(|key| !key.is_empty()) {
        return Some(key.to_string());
    }

    [TRANSLATE, TRANSLATE_HTML]
        .iter()
        .filter_map(|directive| doc.attribute(node, directive))
        .find(|base| !base.is_empty())
        .map(|base| format!("{}@{}", base, attr))
}
