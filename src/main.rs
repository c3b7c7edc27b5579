mod commands;

use std::path::PathBuf;

use anyhow::Result;
use calpost_core::CalpostConfig;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "calpost")]
#[command(about = "Turn event spreadsheets and calendar feeds into chat announcements")]
struct Cli {
    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to ./calpost.toml, then ~/.config/calpost/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render announcement messages from the events CSV
    Render {
        /// Events CSV to read when nothing is piped in
        #[arg(short, long)]
        events: Option<PathBuf>,

        /// Directory payload files are written to on automated runs
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,

        /// Write payload files even when run from a terminal
        #[arg(long, conflicts_with = "interactive")]
        automated: bool,

        /// Print messages for review even when input is piped
        #[arg(long, conflicts_with = "automated")]
        interactive: bool,
    },
    /// Convert a calendar feed (.ics) into events CSV
    Import {
        /// Feed to convert (reads stdin if omitted)
        input: Option<PathBuf>,

        /// Write the CSV here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the effective configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = CalpostConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Render {
            events,
            out_dir,
            automated,
            interactive,
        } => commands::render::run(
            &config,
            commands::render::RenderArgs {
                events,
                out_dir,
                automated,
                interactive,
            },
        ),
        Commands::Import { input, output } => {
            commands::import::run(&config, input.as_deref(), output.as_deref())
        }
        Commands::Config => commands::config::run(&config),
    }
}
