// Report output goes to stdout through println! so colors survive piping
// into a pager; diagnostics go to stderr through tracing.

use colored::Colorize as _;
use kiosk_i18n_core::audit::{AuditReport, MissingKey, PlaceholderMismatch};
use std::collections::BTreeSet;
use tracing_subscriber::EnvFilter;

/// Installs the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` selects debug output for
/// the kiosk crates and warnings only without it.
pub fn init_logging(verbose: bool) {
    let default = if verbose {
        "kiosk_i18n=debug,kiosk_i18n_core=debug,kiosk_i18n_cli=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // A second install (e.g. in tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub fn print_check_header(source: &str, namespaces: usize) {
    println!(
        "{} {} ({} namespace{})",
        "Checking".dimmed(),
        source,
        namespaces,
        if namespaces == 1 { "" } else { "s" }
    );
}

pub fn print_missing_key(missing: &MissingKey) {
    println!(
        "{}: [{}] missing key `{}`",
        "error".red().bold(),
        missing.language,
        scoped_key(missing.namespace.as_deref(), &missing.key)
    );
}

pub fn print_placeholder_mismatch(mismatch: &PlaceholderMismatch) {
    println!(
        "{}: [{}] `{}` uses {} but [{}] uses {}",
        "warning".yellow().bold(),
        mismatch.language,
        scoped_key(mismatch.namespace.as_deref(), &mismatch.key),
        placeholder_list(&mismatch.found),
        mismatch.reference,
        placeholder_list(&mismatch.expected)
    );
}

pub fn print_check_summary(report: &AuditReport) {
    if report.is_clean() {
        println!("{}", "No issues found".green());
        return;
    }

    let missing = report.missing.len();
    let mismatches = report.placeholder_mismatches.len();
    let summary = format!(
        "{} missing key{}, {} placeholder mismatch{}",
        missing,
        if missing == 1 { "" } else { "s" },
        mismatches,
        if mismatches == 1 { "" } else { "es" }
    );

    if missing > 0 {
        println!("{}", summary.red());
    } else {
        println!("{}", summary.yellow());
    }
}

fn scoped_key(namespace: Option<&str>, key: &str) -> String {
    match namespace {
        Some(ns) => format!("{}:{}", ns, key),
        None => key.to_string(),
    }
}

fn placeholder_list(names: &BTreeSet<String>) -> String {
    if names.is_empty() {
        return "no placeholders".to_string();
    }
    names
        .iter()
        .map(|name| format!("{{{}}}", name))
        .collect::<Vec<_>>()
        .join(", ")
}
