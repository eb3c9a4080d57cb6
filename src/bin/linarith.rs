//! Linarith CLI
//!
//! # Commands
//!
//! - `linarith check <file>` - Run the tactic on a problem file
//! - `linarith list` - List the registered tactics

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use linarith::{parse_problem, Linarith, LinarithConfig, Tactic, TacticRegistry, Trace};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "linarith")]
#[command(about = "Prove goals by linear arithmetic")]
#[command(version)]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "log", action = ArgAction::Count, global = true)]
    log: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run linear arithmetic on a problem file
    Check {
        /// Problem file
        file: PathBuf,
        /// Print every scenario and its certificate
        #[arg(long)]
        verbose: bool,
        /// Tactic configuration as JSON, e.g. '{"verbose": true}'
        #[arg(long)]
        config: Option<String>,
    },
    /// List registered tactics
    List,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log);

    match cli.command {
        Commands::Check {
            file,
            verbose,
            config,
        } => {
            let proved = check_file(&file, verbose, config.as_deref())?;
            if !proved {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::List => {
            list_tactics();
            Ok(())
        }
    }
}

fn init_tracing(level: u8) {
    let default = match level {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn check_file(path: &PathBuf, verbose: bool, config: Option<&str>) -> anyhow::Result<bool> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let state = parse_problem(&source).with_context(|| format!("In {}", path.display()))?;

    let mut config = match config {
        Some(json) => LinarithConfig::from_json(json)?,
        None => LinarithConfig::default(),
    };
    config.verbose |= verbose;

    let mut trace = Trace::new();
    let remaining = Linarith::new(config).activate(&state, &mut trace)?;
    print!("{}", trace);
    Ok(remaining.is_empty())
}

fn list_tactics() {
    let registry = TacticRegistry::new();
    for name in registry.list_tactics() {
        if let Ok(tactic) = registry.get(&name) {
            println!("{} ({}): {}", tactic.name(), tactic.label(), tactic.description());
        }
    }
}
