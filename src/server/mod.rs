//! HTTP server implementation
//!
//! This module provides the HTTP server and routing functionality.

pub mod middleware;
pub mod routes;

mod handlers;
pub mod server;
pub mod state;
mod utils;

pub use server::{HttpServer, create_app};
pub use state::AppState;
