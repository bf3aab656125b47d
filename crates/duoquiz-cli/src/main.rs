//! duoquiz CLI: validate level catalogs and play them in the terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "duoquiz", version, about = "Two-slot quiz progression engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a catalog in the terminal
    Play {
        /// Path to a .toml catalog or a directory of them
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Seed for answer placement (default: random)
        #[arg(long)]
        seed: Option<u64>,

        /// Scripted slot selections (e.g. "0,1,1"); reads stdin when absent
        #[arg(long)]
        answers: Option<String>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Show the question again after a wrong answer
        #[arg(long)]
        repeat_on_wrong: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate catalog TOML files
    Validate {
        /// Path to a .toml catalog or a directory of them
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Check that answer placement is balanced for every question
    Audit {
        /// Path to a .toml catalog or a directory of them
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Assignments to draw per question
        #[arg(long, default_value = "10000")]
        trials: u64,

        /// Seed for the audit draws (default: random)
        #[arg(long)]
        seed: Option<u64>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and example level catalog
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("duoquiz=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            catalog,
            seed,
            answers,
            format,
            repeat_on_wrong,
            config,
        } => commands::play::execute(catalog, seed, answers, format, repeat_on_wrong, config),
        Commands::Validate { catalog, config } => commands::validate::execute(catalog, config),
        Commands::Audit {
            catalog,
            trials,
            seed,
            config,
        } => commands::audit::execute(catalog, trials, seed, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
