//! Doclet CLI - Command-line interface for Doclet
//!
//! Reads the JSON records a documentation extractor dumps, grafts them into
//! a nested tree and writes the result.

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "doclet")]
#[command(author = "Doclet Contributors")]
#[command(version)]
#[command(about = "Graft flat documentation records into a nested tree", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Which hooks transform the records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HookSet {
    /// Dump every record as a JSON object
    Json,
    /// Default stubs: log each record, produce nothing
    Log,
}

#[derive(Subcommand)]
enum Commands {
    /// Graft records and write the resulting tree as JSON
    Run {
        /// Records file (JSON array), or "-" for stdin
        input: PathBuf,

        /// Options file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Hooks to install
        #[arg(long, value_enum, default_value = "json")]
        hooks: HookSet,

        /// Keep the extractor's meta block on every node
        #[arg(long)]
        meta: bool,

        /// Silence the default hooks
        #[arg(short, long)]
        quiet: bool,

        /// Skip inherited members that do not override anything
        #[arg(long)]
        no_inherited: bool,

        /// Write single-line JSON
        #[arg(long)]
        compact: bool,
    },

    /// Graft records and print statistics about the run
    Stats {
        /// Records file (JSON array), or "-" for stdin
        input: PathBuf,

        /// Options file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// Print the first chevron-quoted email address found in TEXT
    Email {
        text: String,
    },
}

fn main() {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();

    let result = match cli.command {
        Commands::Run {
            input,
            config,
            output,
            hooks,
            meta,
            quiet,
            no_inherited,
            compact,
        } => commands::run(
            &input,
            commands::RunArgs {
                config: config.as_deref(),
                output: output.as_deref(),
                hooks,
                meta,
                quiet,
                no_inherited,
                compact,
            },
        ),
        Commands::Stats {
            input,
            config,
            json,
        } => commands::stats(&input, config.as_deref(), json),
        Commands::Email { text } => commands::email(&text),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}
