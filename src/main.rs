//! task-manager: command-line task tracker backed by flat text files

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use task_manager::config::{DataPaths, DATA_DIR_ENV};

mod commands;

#[derive(Parser)]
#[command(name = "task-manager")]
#[command(about = "Track tasks for a team in plain text files", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory holding user.txt, tasks.txt and the generated reports
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v for info, -vv for debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and use the interactive menu (default)
    Session,

    /// Print tasks as a table without logging in
    List {
        /// Only show tasks assigned to this user
        #[arg(long, short)]
        user: Option<String>,

        /// Only show completed tasks
        #[arg(long, short)]
        completed: bool,
    },

    /// Regenerate task_overview.txt and user_overview.txt and print them
    Report {
        /// Output format: text (the plain summary files) or json (default: text)
        #[arg(long, short, default_value = "text")]
        format: String,
    },
}

fn init_logging(verbose: u8) {
    // Logs go to stderr so prompts on stdout stay clean
    // RUST_LOG overrides the -v level
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level.as_str()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let paths = DataPaths::resolve(cli.data_dir)?;
    tracing::debug!(dir = %paths.dir().display(), "using data directory");

    match cli.command.unwrap_or(Commands::Session) {
        Commands::Session => {
            let mut console = commands::console::Console::stdio();
            commands::session::execute(&mut console, paths)?;
        }

        Commands::List { user, completed } => {
            let options = commands::list::ListOptions { user, completed };
            let output = commands::list::execute(&paths, options)?;
            println!("{}", output);
        }

        Commands::Report { format } => {
            let format = commands::reports::ReportFormat::from_str(&format)
                .context("Invalid format. Use 'text' or 'json'")?;
            let output = commands::reports::execute(&paths, format)?;
            println!("{}", output);
        }
    }

    Ok(())
}
