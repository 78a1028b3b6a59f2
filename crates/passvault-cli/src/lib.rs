//! PassVault command-line interface.

pub mod commands;

use clap::{Parser, Subcommand};
use passvault_core::Config;

/// PassVault - generate passwords and keep them encrypted per owner
#[derive(Parser)]
#[command(name = "passvault")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase logging verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to config file
    #[arg(short, long, env = "PASSVAULT_CONFIG")]
    pub config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Print a new password without storing it
    Generate(commands::secrets::GenerateArgs),

    /// Generate a password, store it for an owner, and print it
    New(commands::secrets::NewArgs),

    /// Encrypt and store a password for an owner
    Store(commands::secrets::StoreArgs),

    /// Print the first password stored for an owner
    Get(commands::secrets::OwnerArgs),

    /// Show how many passwords are stored for an owner
    Count(commands::secrets::OwnerArgs),

    /// List owners that have stored passwords
    Owners,

    /// Configuration management
    Config(commands::config::ConfigArgs),

    /// Show version information
    Version,
}

/// Run the CLI with the given arguments and loaded configuration.
pub async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    match cli.command {
        Commands::Generate(args) => commands::secrets::generate(args),
        Commands::New(args) => commands::secrets::new(args, &config).await,
        Commands::Store(args) => commands::secrets::store(args, &config).await,
        Commands::Get(args) => commands::secrets::get(args, &config).await,
        Commands::Count(args) => commands::secrets::count(args, &config).await,
        Commands::Owners => commands::secrets::owners(&config).await,
        Commands::Config(args) => commands::config::run(args, cli.config.as_deref(), &config),
        Commands::Version => {
            println!("passvault {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
