mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{generate, init, plugins, GenerateArgs, InitArgs, PluginsArgs};
use tracing_subscriber::EnvFilter;

/// Mapgen CLI - MyBatis mapper generation with a shared generic interface
#[derive(Parser, Debug)]
#[command(name = "mapgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log plugin and pipeline activity
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a starter config and table descriptor file
    Init(InitArgs),

    /// Generate models, mappers and mapper XML
    Generate(GenerateArgs),

    /// List the built-in plugins
    Plugins(PluginsArgs),
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| match cli.command {
            Command::Init(args) => init(args, &cwd),
            Command::Generate(args) => generate(args, &cwd),
            Command::Plugins(args) => plugins(args),
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
