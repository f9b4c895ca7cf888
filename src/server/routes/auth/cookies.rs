//! Refresh token cookie construction

use crate::config::{AuthConfig, SameSitePolicy};
use actix_web::cookie::{Cookie, SameSite, time::Duration};

fn same_site(policy: SameSitePolicy) -> SameSite {
    match policy {
        SameSitePolicy::Strict => SameSite::Strict,
        SameSitePolicy::Lax => SameSite::Lax,
        SameSitePolicy::None => SameSite::None,
    }
}

/// HttpOnly cookie carrying a refresh token
pub(super) fn refresh_cookie(config: &AuthConfig, token: String) -> Cookie<'static> {
    let settings = &config.refresh_cookie;
    let max_age = i64::try_from(config.refresh_token_ttl).unwrap_or(i64::MAX);

    Cookie::build(settings.name.clone(), token)
        .path(settings.path.clone())
        .http_only(true)
        .secure(settings.secure)
        .same_site(same_site(settings.same_site))
        .max_age(Duration::seconds(max_age))
        .finish()
}

/// Cookie that clears the refresh token in the browser
pub(super) fn removal_cookie(config: &AuthConfig) -> Cookie<'static> {
    let mut cookie = refresh_cookie(config, String::new());
    cookie.make_removal();
    cookie
}
