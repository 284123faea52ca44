use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use harview_cli::OutputFormat;
use harview_cli::commands;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "harview")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Summarize HTTP Archive (HAR) files and list their requests",
    long_about = "harview decodes HAR files recorded by browsers and developer tools, \
                  and prints page summaries and per-request tables like a browser's network panel."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(
        short,
        long,
        global = true,
        value_enum,
        env = "HARVIEW_FORMAT",
        default_value = "pretty"
    )]
    format: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Show page title, request count, download size and load time
    Summary {
        /// Path to the HAR file, or - for stdin
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// List every request with status, size and duration
    Table {
        /// Path to the HAR file, or - for stdin
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Only report on this page id: its own headline and its entries
        #[arg(long, value_name = "ID")]
        page: Option<String>,
    },

    /// Show the archive's creator, browser and pages
    Info {
        /// Path to the HAR file, or - for stdin
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Generate shell completion scripts
    #[command(after_help = commands::completion::AFTER_HELP)]
    Completion {
        /// Shell to generate completions for
        #[arg(long, value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);
    tracing::debug!("Output format: {}", cli.format.as_str());

    match cli.command {
        Commands::Summary { file } => commands::summary::execute(&file, cli.format),
        Commands::Table { file, page } => {
            commands::table::execute(&file, page.as_deref(), cli.format)
        }
        Commands::Info { file } => commands::info::execute(&file, cli.format),
        Commands::Completion { shell } => commands::completion::execute(shell, &mut Cli::command()),
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("HARVIEW_LOG").unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("harview=debug,harview_cli=debug,harview_core=debug")
        } else {
            EnvFilter::new("harview=info")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
