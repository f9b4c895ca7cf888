//! # Campus Clubs
//!
//! Backend for a campus club portal: clubs, events, public event
//! registration, galleries and member accounts behind a JSON API.
//!
//! ## Features
//!
//! - **Role-based access**: a declarative policy table decides every privileged write
//! - **Safe registration**: capacity and email-domain rules are checked and applied atomically
//! - **Rotating sessions**: short-lived bearer tokens plus single-use refresh cookies
//! - **Pluggable storage**: SQLite by default, PostgreSQL behind the `postgres` feature
//!
//! ## Running the service
//!
//! ```rust,no_run
//! use campus_clubs::{ClubsService, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config/clubs.yaml").await?;
//!     let service = ClubsService::new(config).await?;
//!     service.run().await?;
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod auth;
pub mod config;
pub mod core;
pub mod server;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use utils::error::{ClubError, Result};

use tracing::info;

/// The club management service
pub struct ClubsService {
    config: Config,
    server: server::HttpServer,
}

impl ClubsService {
    /// Connect storage and prepare the HTTP server
    pub async fn new(config: Config) -> Result<Self> {
        info!("Creating campus clubs service");

        let server = server::HttpServer::new(&config).await?;

        Ok(Self { config, server })
    }

    /// Run until a shutdown signal arrives
    pub async fn run(self) -> Result<()> {
        info!("Starting {} v{}", NAME, VERSION);
        info!("Configuration: {:#?}", self.config);

        self.server.start().await?;

        Ok(())
    }
}

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
