//! Authentication routes
//!
//! Access tokens travel in the JSON body and the `Authorization` header;
//! refresh tokens only ever travel in an HttpOnly cookie.

mod cookies;
mod login;
mod models;
mod password;
mod session;
mod token;

use actix_web::web;

pub use login::login;
pub use models::*;
pub use password::change_password;
pub use session::logout;
pub use token::refresh;

/// Configure authentication routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/login", web::post().to(login))
            .route("/refresh", web::post().to(refresh))
            .route("/logout", web::post().to(logout))
            .route("/change-password", web::post().to(change_password)),
    );
}
