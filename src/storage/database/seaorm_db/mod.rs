// Module declarations
mod club_ops;
mod connection;
mod event_ops;
mod gallery_ops;
mod registration_ops;
mod token_ops;
mod types;
mod user_ops;

// Re-export public types
pub use types::{DatabaseBackendType, SeaOrmDatabase};
