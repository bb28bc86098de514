use clap::{Parser, Subcommand};
use kiosk_i18n_cli::commands::{CheckArgs, TranslateArgs, run_check, run_translate};
use kiosk_i18n_cli::ui;

#[derive(Parser)]
#[command(name = "kiosk-i18n")]
#[command(about = "Audit kiosk dictionaries and resolve translation keys")]
#[command(version)]
struct Cli {
    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report keys missing in some language and mismatched placeholders
    Check(CheckArgs),

    /// Resolve one key the way the runtime would
    Translate(TranslateArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    ui::init_logging(cli.verbose);

    match cli.command {
        Commands::Check(args) => run_check(args)?,
        Commands::Translate(args) => run_translate(args)?,
    }

    Ok(())
}
