//! PassVault CLI entry point.

use clap::Parser;
use passvault_cli::{run, Cli};
use passvault_core::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load_from(cli.config.as_deref())?;

    // Logs go to stderr so stdout only carries command output.
    let level = config.logging.level.raised(cli.verbose).as_str();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("passvault={level},passvault_cli={level},passvault_core={level},passvault_secrets={level}").into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    run(cli, config).await
}
