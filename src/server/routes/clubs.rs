//! Club routes

use crate::auth::rbac::Action;
use crate::core::models::NewClub;
use crate::server::middleware::Caller;
use crate::server::state::AppState;
use crate::utils::error::{ClubError, Result};
use crate::utils::validation::FieldValidator;
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use tracing::info;

/// Club creation request
#[derive(Debug, Deserialize)]
pub struct CreateClubRequest {
    pub club_name: Option<String>,
    pub description: Option<String>,
    pub logo_image: Option<String>,
    pub poster_image: Option<String>,
    #[serde(rename = "type", alias = "club_type")]
    pub club_type: Option<String>,
}

/// Configure club routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/clubs")
            .route("", web::get().to(list_clubs))
            .route("", web::post().to(create_club))
            .route("/{id}", web::get().to(get_club)),
    );
}

/// List clubs with their member counts
pub async fn list_clubs(state: web::Data<AppState>) -> Result<HttpResponse> {
    let clubs = state.db().list_clubs().await?;
    Ok(HttpResponse::Ok().json(clubs))
}

/// Club detail with members and event count
pub async fn get_club(state: web::Data<AppState>, path: web::Path<i32>) -> Result<HttpResponse> {
    let club = state
        .db()
        .get_club_detail(path.into_inner())
        .await?
        .ok_or_else(|| ClubError::not_found("Club not found"))?;
    Ok(HttpResponse::Ok().json(club))
}

/// Create a club
pub async fn create_club(
    state: web::Data<AppState>,
    caller: Caller,
    request: web::Json<CreateClubRequest>,
) -> Result<HttpResponse> {
    let claims = caller.authorize(Action::CreateClub, None)?;

    let new_club = NewClub {
        club_name: FieldValidator::required("club_name", request.club_name.as_deref())?,
        description: FieldValidator::required("description", request.description.as_deref())?,
        logo_image: FieldValidator::required("logo_image", request.logo_image.as_deref())?,
        poster_image: FieldValidator::optional(request.poster_image.as_deref()),
        club_type: FieldValidator::required("type", request.club_type.as_deref())?,
    };

    let club = state.db().create_club(new_club).await?;
    info!("User {} created club {} ({})", claims.sub, club.id, club.club_name);

    Ok(HttpResponse::Created().json(club))
}
