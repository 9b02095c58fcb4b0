mod commands;
mod config;

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    convert, init, render, reorder, ConvertArgs, InitArgs, RenderArgs, ReorderArgs,
};
use tracing_subscriber::EnvFilter;

/// Folio CLI - Convert, render and reorder documentation pages
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log conversion and drag decisions
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a new Folio project
    Init(InitArgs),

    /// Convert editor trees into stored pages
    Convert(ConvertArgs),

    /// Rebuild editor HTML from a stored page
    Render(RenderArgs),

    /// Move a table within an editor tree
    Reorder(ReorderArgs),
}

fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if cli.verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = std::env::current_dir()
        .context("Cannot get current directory")
        .and_then(|cwd| match cli.command {
            Command::Init(args) => init(args, &cwd),
            Command::Convert(args) => convert(args, &cwd),
            Command::Render(args) => render(args, &cwd),
            Command::Reorder(args) => reorder(args, &cwd),
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
