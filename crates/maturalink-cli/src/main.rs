//! MaturaLink command-line tool.
//!
//! Operates directly on a MaturaLink SQLite database: seeding, listings,
//! grouped views and graph export.

mod commands;
mod executor;
mod formatter;

use std::path::PathBuf;

use clap::Parser;
use commands::Command;
use formatter::OutputFormat;
use maturalink_core::Database;

/// MaturaLink command-line tool
#[derive(Parser, Debug)]
#[command(name = "maturalink")]
#[command(version, about = "Inspect and seed MaturaLink study maps")]
pub struct Args {
    /// Path to the SQLite database file
    #[arg(short, long, default_value = "maturalink.db")]
    pub database: PathBuf,

    /// Output format
    #[arg(long, default_value = "table", value_enum)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

fn main() {
    // Logs go to stderr so formatted output stays clean on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("maturalink_cli=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open(&args.database)?;
    let formatter = formatter::create_formatter(args.format);

    tracing::debug!(
        database = %args.database.display(),
        command = ?args.command,
        write = args.command.is_write(),
        "executing command"
    );

    match executor::execute(&db, &args.command, &*formatter) {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", formatter.format_error(&e.to_string()));
            std::process::exit(1);
        }
    }
}
