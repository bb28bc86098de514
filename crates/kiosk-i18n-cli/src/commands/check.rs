//! Check command: audits dictionaries for keys missing in some language and
//! for placeholders that differ between languages.

use crate::commands::DictionaryArgs;
use crate::error::CliError;
use crate::ui;
use clap::Parser;
use kiosk_i18n_core::audit::audit;

/// Arguments for the check command.
#[derive(Debug, Parser)]
pub struct CheckArgs {
    #[command(flatten)]
    pub dictionaries: DictionaryArgs,
}

/// Run the check command.
///
/// Missing keys fail the run; placeholder mismatches are only reported.
pub fn run_check(args: CheckArgs) -> Result<(), CliError> {
    let loaded = args.dictionaries.load()?;
    let namespaces = loaded.dictionaries.namespace_ids().len();
    ui::print_check_header(&loaded.source, namespaces);

    let report = audit(&loaded.dictionaries);
    for missing in &report.missing {
        ui::print_missing_key(missing);
    }
    for mismatch in &report.placeholder_mismatches {
        ui::print_placeholder_mismatch(mismatch);
    }
    ui::print_check_summary(&report);

    if report.missing.is_empty() {
        Ok(())
    } else {
        Err(CliError::MissingKeys {
            missing: report.missing.len(),
        })
    }
}
