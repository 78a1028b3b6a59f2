//! Password commands.
//!
//! Provides `passvault generate|new|store|get|count|owners`, a thin layer
//! over [`SecretVault`] that only handles argument parsing and output.

use std::num::IntErrorKind;

use clap::Args;
use passvault_core::Config;
use passvault_secrets::SecretVault;

/// Parse a requested length, saturating integers outside `i64`.
///
/// Any integer is accepted since the generator clamps it anyway; only
/// non-numeric input is rejected.
pub fn parse_length(s: &str) -> Result<i64, String> {
    match s.trim().parse::<i64>() {
        Ok(n) => Ok(n),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Ok(i64::MAX),
            IntErrorKind::NegOverflow => Ok(i64::MIN),
            _ => Err(format!("invalid length '{s}': expected an integer")),
        },
    }
}

/// Arguments for `generate`.
#[derive(Args)]
pub struct GenerateArgs {
    /// Password length; clamped to 12..=30, random in that range if omitted
    #[arg(short, long, allow_negative_numbers = true, value_parser = parse_length)]
    pub length: Option<i64>,
}

/// Arguments for `new`.
#[derive(Args)]
pub struct NewArgs {
    /// Owner id the password is stored under
    pub owner: String,

    /// Password length; clamped to 12..=30, random in that range if omitted
    #[arg(short, long, allow_negative_numbers = true, value_parser = parse_length)]
    pub length: Option<i64>,
}

/// Arguments for `store`.
#[derive(Args)]
pub struct StoreArgs {
    /// Owner id the password is stored under
    pub owner: String,

    /// Password value (if omitted, prompts for hidden input)
    #[arg(long)]
    pub value: Option<String>,
}

/// Arguments naming a single owner.
#[derive(Args)]
pub struct OwnerArgs {
    /// Owner id
    pub owner: String,
}

async fn open_vault(config: &Config) -> anyhow::Result<SecretVault> {
    let key_file = config.vault.key_file_path()?;
    let database = config.vault.database_path()?;
    tracing::debug!(
        key_file = %key_file.display(),
        database = %database.display(),
        "opening vault"
    );
    SecretVault::open(&config.vault)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to open vault: {}", e))
}

/// Print a fresh password.
pub fn generate(args: GenerateArgs) -> anyhow::Result<()> {
    let password = passvault_secrets::generate_password(args.length);
    println!("{}", password.expose_secret());
    Ok(())
}

/// Generate, store, then print a password.
pub async fn new(args: NewArgs, config: &Config) -> anyhow::Result<()> {
    let vault = open_vault(config).await?;
    let password = vault
        .issue_password(&args.owner, args.length)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    eprintln!("Password stored for '{}'.", args.owner);
    println!("{}", password.expose_secret());
    Ok(())
}

/// Store a caller-supplied password.
pub async fn store(args: StoreArgs, config: &Config) -> anyhow::Result<()> {
    let value = match args.value {
        Some(v) => v,
        None => {
            let prompt = format!("Enter password for '{}': ", args.owner);
            rpassword::prompt_password(prompt)
                .map_err(|e| anyhow::anyhow!("Failed to read password: {}", e))?
        }
    };

    if value.is_empty() {
        anyhow::bail!("Password must not be empty");
    }

    let vault = open_vault(config).await?;
    vault
        .store_secret(&args.owner, &value)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("Password stored for '{}'.", args.owner);
    Ok(())
}

/// Print the first password stored for an owner.
pub async fn get(args: OwnerArgs, config: &Config) -> anyhow::Result<()> {
    let vault = open_vault(config).await?;
    let secret = vault
        .retrieve_secret(&args.owner)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    match secret {
        Some(secret) => {
            println!("{}", secret.expose_secret());
            Ok(())
        }
        None => anyhow::bail!("No password found for '{}'", args.owner),
    }
}

/// Print the record count for an owner.
pub async fn count(args: OwnerArgs, config: &Config) -> anyhow::Result<()> {
    let vault = open_vault(config).await?;
    let n = vault
        .record_count(&args.owner)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;
    println!("{}", n);
    Ok(())
}

/// List owners with stored passwords.
pub async fn owners(config: &Config) -> anyhow::Result<()> {
    let vault = open_vault(config).await?;
    let owners = vault.owners().await.map_err(|e| anyhow::anyhow!("{}", e))?;

    if owners.is_empty() {
        println!("No passwords stored.");
    } else {
        println!("{:<40} {}", "OWNER", "RECORDS");
        println!("{}", "-".repeat(48));
        for o in &owners {
            println!("{:<40} {}", o.owner_id, o.records);
        }
        println!("\n{} owner(s) total.", owners.len());
    }

    Ok(())
}
