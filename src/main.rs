//! Campus clubs server
//!
//! Serves the JSON API, or bootstraps the first super-administrator.

#![allow(missing_docs)]

use campus_clubs::auth::AuthSystem;
use campus_clubs::storage::StorageLayer;
use campus_clubs::{ClubsService, Config, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "clubs-server", version, about = "Campus club management service")]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(short, long, env = "CLUBS_CONFIG", default_value = "config/clubs.yaml")]
    config: PathBuf,

    /// Emit logs as JSON lines
    #[arg(long, env = "CLUBS_LOG_JSON")]
    log_json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Create a super-administrator account
    CreateAdmin {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "CLUBS_ADMIN_PASSWORD")]
        password: String,
    },
}

async fn create_admin(config: &Config, name: &str, email: &str, password: &str) -> Result<()> {
    let storage = StorageLayer::new(&config.storage).await?;
    storage.migrate().await?;

    let auth = AuthSystem::new(&config.auth, Arc::new(storage));
    let user = auth.create_super_admin(name, email, password).await?;

    println!("Created super administrator {} <{}>", user.id, user.email);
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(&cli.config).await?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => ClubsService::new(config).await?.run().await,
        Command::CreateAdmin {
            name,
            email,
            password,
        } => create_admin(&config, &name, &email, &password).await,
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Warning: failed to load .env: {}", e);
        }
    }

    let cli = Cli::parse();
    init_tracing(cli.log_json);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Display keeps multi-line messages readable
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
