//! fistest CLI: take, review and validate revision tests from the terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "fistest", version, about = "Scored revision tests with result documents")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take a test headlessly and write the result documents
    Take {
        /// Path to the .toml test definition
        #[arg(long)]
        test: PathBuf,

        /// Learner name
        #[arg(long)]
        name: Option<String>,

        /// Answer as QUESTION=LETTER, e.g. "3=B" (repeatable)
        #[arg(long = "answer", value_name = "QUESTION=LETTER")]
        answers: Vec<String>,

        /// TOML file with `name` and an `[answers]` table
        #[arg(long)]
        answers_file: Option<PathBuf>,

        /// Cancel instead of submitting when questions are unanswered
        #[arg(long)]
        require_complete: bool,

        /// Also print the marked question paper after submitting
        #[arg(long)]
        paper: bool,

        /// Output directory (overrides config)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output formats: html, json, text, all (comma-separated, overrides config)
        #[arg(long)]
        format: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the question paper for a test
    Show {
        /// Path to the .toml test definition
        #[arg(long)]
        test: PathBuf,
    },

    /// Print the inline review of a saved JSON result document
    Review {
        /// Result document JSON
        #[arg(long)]
        document: PathBuf,
    },

    /// Validate test definition TOML files
    Validate {
        /// Path to a test definition file or directory
        #[arg(long)]
        test: PathBuf,
    },

    /// Create starter config and example test
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fistest=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Take {
            test,
            name,
            answers,
            answers_file,
            require_complete,
            paper,
            output,
            format,
            config,
        } => commands::take::execute(commands::take::TakeArgs {
            test,
            name,
            answers,
            answers_file,
            require_complete,
            paper,
            output,
            format,
            config,
        }),
        Commands::Show { test } => commands::show::execute(test),
        Commands::Review { document } => commands::review::execute(document),
        Commands::Validate { test } => commands::validate::execute(test),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
