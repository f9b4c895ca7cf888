//! HTTP server utility methods

use crate::server::server::HttpServer;
use crate::storage::StorageLayer;
use crate::utils::error::ClubError;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

impl HttpServer {
    /// Wait for Ctrl+C or SIGTERM and return the name of the signal received
    pub async fn shutdown_signal() -> &'static str {
        let interrupt = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Ctrl+C handler unavailable: {}", e);
                std::future::pending::<()>().await;
            }
        };

        #[cfg(unix)]
        let terminate = async {
            use tokio::signal::unix::{SignalKind, signal};
            match signal(SignalKind::terminate()) {
                Ok(mut sigterm) => {
                    sigterm.recv().await;
                }
                Err(e) => {
                    warn!("SIGTERM handler unavailable: {}", e);
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = interrupt => "SIGINT",
            _ = terminate => "SIGTERM",
        }
    }

    /// Delete expired refresh tokens every `period`, starting immediately
    pub(crate) fn spawn_token_purge(storage: Arc<StorageLayer>, period: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                match storage.db().purge_expired_refresh_tokens().await {
                    Ok(0) => debug!("No expired refresh tokens to purge"),
                    Ok(purged) => info!("Purged {} expired refresh tokens", purged),
                    Err(e) => warn!("Failed to purge expired refresh tokens: {}", e),
                }
            }
        })
    }

    /// Map a bind failure to a configuration error that names the fix
    pub(crate) fn format_bind_error(error: std::io::Error, bind_addr: &str, port: u16) -> ClubError {
        let message = match error.kind() {
            std::io::ErrorKind::AddrInUse => format!(
                "Port {} is already in use. Stop the other process or set CLUBS_PORT={} (or server.port in the config file)",
                port,
                port.saturating_add(1)
            ),
            std::io::ErrorKind::PermissionDenied => format!(
                "Permission denied for port {}. Use a port >= 1024, e.g. CLUBS_PORT=3001",
                port
            ),
            _ => format!("Failed to bind to {}: {}", bind_addr, error),
        };
        ClubError::Config(message)
    }
}
