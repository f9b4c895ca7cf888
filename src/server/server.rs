//! HTTP server core implementation

use crate::config::{Config, ServerConfig};
use crate::server::handlers::health_check;
use crate::server::routes;
use crate::server::state::AppState;
use crate::storage::StorageLayer;
use crate::utils::error::{ClubError, Result};
use actix_cors::Cors;
use actix_web::http::{Method, header};
use actix_web::{
    App, HttpServer as ActixHttpServer, ResponseError, error, middleware::DefaultHeaders, web,
};
use std::time::Duration;
use tracing::info;
use tracing_actix_web::TracingLogger;

const TOKEN_PURGE_INTERVAL: Duration = Duration::from_secs(3600);

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

impl HttpServer {
    /// Connect storage, run migrations and build the application state
    pub async fn new(config: &Config) -> Result<Self> {
        info!("Creating HTTP server");

        let storage = StorageLayer::new(&config.storage).await?;
        storage.migrate().await?;

        Ok(Self {
            config: config.server.clone(),
            state: AppState::new(config.clone(), storage),
        })
    }

    /// Start the HTTP server and run until a shutdown signal arrives
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.config.address();
        let port = self.config.port;

        info!("Starting HTTP server on {}", bind_addr);

        let storage = self.state.storage.clone();
        let state = web::Data::new(self.state);

        let server = ActixHttpServer::new(move || create_app(state.clone()))
            .workers(self.config.worker_count())
            .disable_signals()
            .bind(&bind_addr)
            .map_err(|e| Self::format_bind_error(e, &bind_addr, port))?
            .run();

        info!("HTTP server listening on {}", bind_addr);

        let purge = Self::spawn_token_purge(storage, TOKEN_PURGE_INTERVAL);

        let handle = server.handle();
        tokio::spawn(async move {
            let signal = Self::shutdown_signal().await;
            info!("Received {}, draining connections", signal);
            handle.stop(true).await;
        });

        let result = server.await;
        purge.abort();
        result.map_err(ClubError::Io)?;

        info!("HTTP server stopped");
        Ok(())
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}

fn build_cors(state: &AppState) -> Cors {
    let cors_config = &state.config.server.cors;
    let mut cors = Cors::default();

    if cors_config.enabled {
        if cors_config.allows_all_origins() {
            cors = cors.allow_any_origin();
        } else {
            for origin in &cors_config.allowed_origins {
                cors = cors.allowed_origin(origin);
            }
        }

        cors = cors
            .allowed_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
            .allowed_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
            .max_age(cors_config.max_age);

        if cors_config.allow_credentials {
            cors = cors.supports_credentials();
        }
    }

    cors
}

/// Create the Actix-web application
pub fn create_app(
    state: web::Data<AppState>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let cors = build_cors(&state);

    let json_config = web::JsonConfig::default()
        .limit(1024 * 1024)
        .error_handler(|err, _req| {
            let err = ClubError::validation(format!("Invalid request body: {}", err));
            error::InternalError::from_response(err.to_string(), err.error_response()).into()
        });

    let path_config = web::PathConfig::default().error_handler(|err, _req| {
        let err = ClubError::validation(format!("Invalid path parameter: {}", err));
        error::InternalError::from_response(err.to_string(), err.error_response()).into()
    });

    App::new()
        .app_data(state)
        .app_data(json_config)
        .app_data(path_config)
        .wrap(cors)
        .wrap(TracingLogger::default())
        .wrap(DefaultHeaders::new().add(("Server", "campus-clubs")))
        .route("/health", web::get().to(health_check))
        .configure(routes::configure_routes)
}
