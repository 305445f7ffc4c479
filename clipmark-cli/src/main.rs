//! Clipmark CLI - Command-line interface for extracting reading annotations

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "clipmark")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export all annotations from a reader's history as JSON
    Export {
        /// Legacy session-file directory
        #[arg(short, long)]
        legacy_dir: Option<String>,

        /// Read-history registry file
        #[arg(short, long)]
        registry: Option<String>,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// List annotated books and their entry counts
    List {
        /// Legacy session-file directory
        #[arg(short, long)]
        legacy_dir: Option<String>,

        /// Read-history registry file
        #[arg(short, long)]
        registry: Option<String>,
    },

    /// Parse a single sidecar file and print its normalized entries
    Inspect {
        /// Sidecar file path
        sidecar: String,

        /// Document file the sidecar annotates (improves title resolution)
        #[arg(short, long)]
        doc: Option<String>,
    },

    /// Parse a flat "My Clippings"-style export
    Clippings {
        /// Clippings text file
        input: String,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        "clipmark_cli=debug,clipmark_core=debug"
    } else {
        "clipmark_cli=info"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Export {
            legacy_dir,
            registry,
            output,
        } => commands::export(legacy_dir.as_deref(), registry.as_deref(), output.as_deref()),

        Commands::List {
            legacy_dir,
            registry,
        } => commands::list(legacy_dir.as_deref(), registry.as_deref()),

        Commands::Inspect { sidecar, doc } => commands::inspect(&sidecar, doc.as_deref()),

        Commands::Clippings { input, output } => commands::clippings(&input, output.as_deref()),
    }
}
