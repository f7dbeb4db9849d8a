//! pgxdocs CLI - checks and exports the pgxcli documentation site configuration.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use pgxdocs_config::Format;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod watch;

#[derive(Parser)]
#[command(name = "pgxdocs")]
#[command(about = "Checks and exports the pgxcli documentation site configuration")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to docs.toml config file
    #[arg(short, long, default_value = "docs.toml", global = true)]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Scaffold docs.toml and starter pages for the pgxcli docs
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        yes: bool,
    },

    /// Validate the configuration and resolve sidebar slugs against pages
    Check {
        /// Re-run the check whenever the config or content changes
        #[arg(short, long)]
        watch: bool,

        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },

    /// Print the sidebar navigation tree
    Sidebar,

    /// Export the site configuration for the site generator
    Export {
        /// Output format: json, toml or starlight
        #[arg(short, long, default_value_t = Format::Json)]
        format: Format,

        /// Output file or directory (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip resolving slugs against the content directory
        #[arg(long)]
        skip_check: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(&cli.config, yes).await?;
        }
        Commands::Check { watch, strict } => {
            commands::check::run(&cli.config, watch, strict).await?;
        }
        Commands::Sidebar => {
            commands::sidebar::run(&cli.config).await?;
        }
        Commands::Export {
            format,
            output,
            skip_check,
        } => {
            commands::export::run(&cli.config, format, output, skip_check).await?;
        }
    }

    Ok(())
}
