mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{publish, validate, PublishArgs, ValidateArgs};
use tracing_subscriber::EnvFilter;

/// Pagecanvas CLI - site configuration tools
#[derive(Parser, Debug)]
#[command(name = "pagecanvas")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a site configuration file
    Validate(ValidateArgs),

    /// Render a site configuration to static HTML
    Publish(PublishArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Validate(args) => validate(args),
        Command::Publish(args) => publish(args),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
