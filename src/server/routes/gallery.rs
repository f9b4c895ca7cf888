//! Gallery routes

use super::fields;
use super::{ensure_club_exists, resolve_club_id};
use crate::auth::rbac::Action;
use crate::server::middleware::Caller;
use crate::server::state::AppState;
use crate::utils::error::{ClubError, Result};
use crate::utils::validation::FieldValidator;
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use tracing::info;

/// Gallery image upload request
#[derive(Debug, Deserialize)]
pub struct AddImageRequest {
    pub url: Option<String>,
    pub text: Option<String>,
    #[serde(default, deserialize_with = "fields::opt_i32")]
    pub club_id: Option<i32>,
}

/// Configure gallery routes
///
/// `GET /gallery/{id}` lists a club's images while `DELETE /gallery/{id}`
/// removes a single image.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/gallery")
            .route("", web::get().to(list_gallery))
            .route("", web::post().to(add_image))
            .route("/{id}", web::get().to(list_club_gallery))
            .route("/{id}", web::delete().to(delete_image)),
    );
}

/// List every gallery image
pub async fn list_gallery(state: web::Data<AppState>) -> Result<HttpResponse> {
    let images = state.db().list_gallery(None).await?;
    Ok(HttpResponse::Ok().json(images))
}

/// List one club's gallery images
pub async fn list_club_gallery(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    let images = state.db().list_gallery(Some(path.into_inner())).await?;
    Ok(HttpResponse::Ok().json(images))
}

/// Add an image to the caller's club gallery
pub async fn add_image(
    state: web::Data<AppState>,
    caller: Caller,
    request: web::Json<AddImageRequest>,
) -> Result<HttpResponse> {
    let claims = caller.authorize(Action::AddGalleryImage, None)?;
    let request = request.into_inner();

    let club_id = resolve_club_id(claims, request.club_id)?;
    let url = FieldValidator::required("url", request.url.as_deref())?;
    ensure_club_exists(&state, club_id).await?;

    let image = state
        .db()
        .add_gallery_image(club_id, url, FieldValidator::optional(request.text.as_deref()))
        .await?;

    info!("User {} added gallery image {} to club {}", claims.sub, image.id, club_id);
    Ok(HttpResponse::Created().json(image))
}

/// Delete a gallery image
pub async fn delete_image(
    state: web::Data<AppState>,
    caller: Caller,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    let image_id = path.into_inner();
    caller.authorize(Action::DeleteGalleryImage, None)?;

    let image = state
        .db()
        .find_gallery_image(image_id)
        .await?
        .ok_or_else(|| ClubError::not_found("Image not found"))?;

    let claims = caller.authorize(Action::DeleteGalleryImage, Some(image.club_id))?;

    if !state.db().delete_gallery_image(image_id).await? {
        return Err(ClubError::not_found("Image not found"));
    }

    info!("User {} deleted gallery image {}", claims.sub, image_id);
    Ok(HttpResponse::NoContent().finish())
}
