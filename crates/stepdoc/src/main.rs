//! stepdoc CLI - EVA procedure step renderer.
//!
//! Provides commands for:
//! - `render`: Render step directives for an output type
//! - `check`: Validate every directive in a procedure file
//! - `modules`: List registered step modules
//! - `transform`: Run the token transform engine on a string

mod commands;
mod error;
mod output;
mod procedure;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, ModulesArgs, RenderArgs, TransformArgs};
use output::Output;

/// stepdoc - EVA procedure step renderer.
#[derive(Parser)]
#[command(name = "stepdoc", version, about)]
struct Cli {
    /// Enable verbose output (info-level logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render step directives into alterations.
    Render(RenderArgs),
    /// Validate every directive in a procedure file.
    Check(CheckArgs),
    /// List registered step modules and their variants.
    Modules(ModulesArgs),
    /// Transform text tokens into segments.
    Transform(TransformArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
        Commands::Check(args) => args.execute(),
        Commands::Modules(args) => args.execute(),
        Commands::Transform(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
