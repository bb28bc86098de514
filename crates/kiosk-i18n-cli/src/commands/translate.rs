use crate::commands::DictionaryArgs;
use crate::error::CliError;
use clap::Parser;
use kiosk_i18n_core::resolver::resolve_in;
use kiosk_i18n_core::{Language, Variables};
use serde_json::Value;

/// Arguments for the translate command.
#[derive(Debug, Parser)]
pub struct TranslateArgs {
    /// Translation key, e.g. `greet` or `search@placeholder`.
    pub key: String,

    /// Language code (az, en, ru).
    #[arg(short, long)]
    pub lang: String,

    /// Namespace to look in before the global table.
    #[arg(long)]
    pub ns: Option<String>,

    /// Interpolation variable. Can be specified multiple times.
    #[arg(long = "var", value_name = "NAME=VALUE")]
    pub vars: Vec<String>,

    /// Shorthand for `--var count=N`; selects the plural form.
    #[arg(long, allow_negative_numbers = true)]
    pub count: Option<f64>,

    #[command(flatten)]
    pub dictionaries: DictionaryArgs,
}

/// Run the translate command, printing the resolved string.
pub fn run_translate(args: TranslateArgs) -> Result<(), CliError> {
    let lang = Language::parse(&args.lang)
        .ok_or_else(|| CliError::UnknownLanguage(args.lang.clone()))?;

    let mut vars = Variables::new();
    for raw in &args.vars {
        let (name, value) = parse_variable(raw)?;
        vars.insert(name, value);
    }
    if let Some(count) = args.count {
        vars.insert("count".to_string(), Value::from(count));
    }

    let loaded = args.dictionaries.load()?;
    println!(
        "{}",
        resolve_in(&loaded.dictionaries, lang, &args.key, &vars, args.ns.as_deref())
    );
    Ok(())
}

/// Splits `name=value`. Numbers and booleans keep their JSON type so that
/// `count=5` selects a plural form; everything else is a string.
fn parse_variable(raw: &str) -> Result<(String, Value), CliError> {
    let Some((name, value)) = raw.split_once('=') else {
        return Err(CliError::InvalidVariable(raw.to_string()));
    };
    let name = name.trim();
    if name.is_empty() {
        return Err(CliError::InvalidVariable(raw.to_string()));
    }

    let value = match serde_json::from_str::<Value>(value) {
        Ok(parsed @ (Value::Number(_) | Value::Bool(_))) => parsed,
        _ => Value::String(value.to_string()),
    };
    Ok((name.to_string(), value))
}
