//! `{name}` placeholder substitution.
//!
//! Substitution is a single left-to-right pass: text inserted for one
//! placeholder is never scanned again, and placeholders without a matching
//! variable are copied through verbatim.

use indexmap::IndexMap;
use serde_json::Value;

/// Variables available to a translation, in insertion order.
pub type Variables = IndexMap<String, Value>;

/// Replaces every `{name}` in `template` with the stringified `vars[name]`.
pub fn interpolate(template: &str, vars: &Variables) -> String {
    if vars.is_empty() || !template.contains('{') {
        return template.to_string();
    }

    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        match after.find(|c: char| c == '{' || c == '}') {
            Some(close) if after[close..].starts_with('}') => {
                let name = &after[..close];
                match vars.get(name) {
                    Some(value) => out.push_str(&stringify(value)),
                    None => out.push_str(&rest[open..open + close + 2]),
                }
                rest = &after[close + 1..];
            },
            _ => {
                out.push('{');
                rest = after;
            },
        }
    }

    out.push_str(rest);
    out
}

/// Renders a variable value the way it appears in translated text.
///
/// Integral numbers print without a fractional part, `null` is empty, and
/// arrays or objects print as compact JSON.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                n.as_f64().map(format_plain_number).unwrap_or_default()
            }
        },
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Formats a float without locale conventions: `12.5`, `3`, `NaN`, `Infinity`.
pub fn format_plain_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        let sign = if value > 0.0 { "" } else { "-" };
        format!("{}Infinity", sign)
    } else if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// The placeholder names used in `template`, in order of appearance.
pub fn placeholders(template: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        match after.find(|c: char| c == '{' || c == '}') {
            Some(close) if after[close..].starts_with('}') => {
                let name = &after[..close];
                if !name.is_empty() && !names.contains(&name) {
                    names.push(name);
                }
                rest = &after[close + 1..];
            },
            _ => rest = after,
        }
    }

    names
}
