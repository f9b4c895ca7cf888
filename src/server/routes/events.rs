//! Event and registration routes

use super::fields;
use super::{ensure_club_exists, resolve_club_id};
use crate::auth::rbac::Action;
use crate::core::models::{EventChanges, EventDetail, NewEvent};
use crate::core::registration;
use crate::server::middleware::Caller;
use crate::server::state::AppState;
use crate::utils::error::{ClubError, Result};
use crate::utils::validation::{FieldValidator, MAX_DESCRIPTION_CHARS};
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use tracing::info;

/// Event creation request
#[derive(Debug, Default, Deserialize)]
pub struct CreateEventRequest {
    #[serde(default, deserialize_with = "fields::opt_i32")]
    pub club_id: Option<i32>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub venue: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub poc: Option<String>,
    pub thumbnail_url: Option<String>,
    #[serde(default, deserialize_with = "fields::opt_i32")]
    pub capacity: Option<i32>,
    #[serde(default, deserialize_with = "fields::opt_bool")]
    pub restrict_email_domain: Option<bool>,
    pub allowed_email_domain: Option<String>,
}

/// Partial event update; explicit nulls clear optional fields
#[derive(Debug, Default, Deserialize)]
pub struct UpdateEventRequest {
    #[serde(default, deserialize_with = "fields::opt_i32")]
    pub club_id: Option<i32>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub venue: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    #[serde(default, deserialize_with = "fields::nullable")]
    pub poc: Option<Option<String>>,
    #[serde(default, deserialize_with = "fields::nullable")]
    pub thumbnail_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "fields::nullable_i32")]
    pub capacity: Option<Option<i32>>,
    #[serde(default, deserialize_with = "fields::opt_bool")]
    pub restrict_email_domain: Option<bool>,
    #[serde(default, deserialize_with = "fields::nullable")]
    pub allowed_email_domain: Option<Option<String>>,
}

impl UpdateEventRequest {
    fn into_changes(self) -> Result<EventChanges> {
        let parse_time = |field: &str, value: Option<String>| {
            value
                .map(|v| FieldValidator::parse_timestamp(field, &v))
                .transpose()
        };

        Ok(EventChanges {
            club_id: self.club_id,
            name: self
                .name
                .map(|v| FieldValidator::required("name", Some(v.as_str())))
                .transpose()?,
            description: self
                .description
                .map(|v| FieldValidator::truncate(v.trim(), MAX_DESCRIPTION_CHARS)),
            venue: self
                .venue
                .map(|v| FieldValidator::required("venue", Some(v.as_str())))
                .transpose()?,
            start_time: parse_time("start_time", self.start_time)?,
            end_time: parse_time("end_time", self.end_time)?,
            poc: self.poc.map(|v| FieldValidator::optional(v.as_deref())),
            thumbnail_url: self
                .thumbnail_url
                .map(|v| FieldValidator::optional(v.as_deref())),
            capacity: self.capacity,
            restrict_email_domain: self.restrict_email_domain,
            allowed_email_domain: self
                .allowed_email_domain
                .map(|v| FieldValidator::normalize_domain(v.as_deref())),
        })
    }
}

/// Registration request
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Configure event routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/events")
            .route("", web::get().to(list_events))
            .route("", web::post().to(create_event))
            .route("/{id}", web::get().to(get_event))
            .route("/{id}", web::put().to(update_event))
            .route("/{id}", web::delete().to(delete_event))
            .route("/{id}/register", web::post().to(register))
            .route("/{id}/registrations", web::get().to(list_registrations)),
    );
}

fn restricted_domain(restrict: bool, domain: Option<&str>) -> Result<Option<String>> {
    if !restrict {
        return Ok(None);
    }
    FieldValidator::normalize_domain(domain)
        .map(Some)
        .ok_or_else(|| {
            ClubError::validation(
                "allowed_email_domain is required when restrict_email_domain is enabled",
            )
        })
}

/// List all events
pub async fn list_events(state: web::Data<AppState>) -> Result<HttpResponse> {
    let events = state.db().list_events().await?;
    Ok(HttpResponse::Ok().json(events))
}

/// Event detail with attendee count and seats left
pub async fn get_event(state: web::Data<AppState>, path: web::Path<i32>) -> Result<HttpResponse> {
    let detail: EventDetail = state
        .db()
        .get_event_detail(path.into_inner())
        .await?
        .ok_or_else(|| ClubError::not_found("Event not found"))?;
    Ok(HttpResponse::Ok().json(detail))
}

/// Create an event in the caller's club
pub async fn create_event(
    state: web::Data<AppState>,
    caller: Caller,
    request: web::Json<CreateEventRequest>,
) -> Result<HttpResponse> {
    let claims = caller.authorize(Action::CreateEvent, None)?;
    let request = request.into_inner();

    let club_id = resolve_club_id(claims, request.club_id)?;

    let name = FieldValidator::required("name", request.name.as_deref())?;
    let venue = FieldValidator::required("venue", request.venue.as_deref())?;
    let start_time = FieldValidator::parse_timestamp(
        "start_time",
        &FieldValidator::required("start_time", request.start_time.as_deref())?,
    )?;
    let end_time = FieldValidator::parse_timestamp(
        "end_time",
        &FieldValidator::required("end_time", request.end_time.as_deref())?,
    )?;
    FieldValidator::validate_time_range(&start_time, &end_time)?;
    FieldValidator::validate_capacity(request.capacity)?;

    let restrict_email_domain = request.restrict_email_domain.unwrap_or(false);
    let allowed_email_domain =
        restricted_domain(restrict_email_domain, request.allowed_email_domain.as_deref())?;

    ensure_club_exists(&state, club_id).await?;

    let description = FieldValidator::optional(request.description.as_deref())
        .map(|d| FieldValidator::truncate(&d, MAX_DESCRIPTION_CHARS))
        .unwrap_or_default();

    let event = state
        .db()
        .create_event(NewEvent {
            club_id,
            name,
            description,
            venue,
            start_time,
            end_time,
            poc: FieldValidator::optional(request.poc.as_deref()),
            thumbnail_url: FieldValidator::optional(request.thumbnail_url.as_deref()),
            capacity: request.capacity,
            restrict_email_domain,
            allowed_email_domain,
        })
        .await?;

    info!("User {} created event {} in club {}", claims.sub, event.id, club_id);
    Ok(HttpResponse::Created().json(event))
}

/// Partially update an event
pub async fn update_event(
    state: web::Data<AppState>,
    caller: Caller,
    path: web::Path<i32>,
    request: web::Json<UpdateEventRequest>,
) -> Result<HttpResponse> {
    let event_id = path.into_inner();
    caller.authorize(Action::UpdateEvent, None)?;

    let mut event = state
        .db()
        .find_event_by_id(event_id)
        .await?
        .ok_or_else(|| ClubError::not_found("Event not found"))?;

    let claims = caller.authorize(Action::UpdateEvent, Some(event.club_id))?;

    let changes = request.into_inner().into_changes()?;
    if let Some(club_id) = changes.club_id.filter(|id| *id != event.club_id) {
        if !claims.role.is_super_admin() {
            return Err(ClubError::forbidden(
                "Only a super administrator can move an event to another club",
            ));
        }
        ensure_club_exists(&state, club_id).await?;
    }

    changes.apply(&mut event);
    FieldValidator::validate_time_range(&event.start_time, &event.end_time)?;
    FieldValidator::validate_capacity(event.capacity)?;
    if event.restrict_email_domain && event.allowed_email_domain.is_none() {
        return Err(ClubError::validation(
            "allowed_email_domain is required when restrict_email_domain is enabled",
        ));
    }

    let event = state.db().update_event(&event).await?;
    info!("User {} updated event {}", claims.sub, event.id);
    Ok(HttpResponse::Ok().json(event))
}

/// Delete an event together with its registrations
pub async fn delete_event(
    state: web::Data<AppState>,
    caller: Caller,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    let event_id = path.into_inner();
    caller.authorize(Action::DeleteEvent, None)?;

    let event = state
        .db()
        .find_event_by_id(event_id)
        .await?
        .ok_or_else(|| ClubError::not_found("Event not found"))?;

    let claims = caller.authorize(Action::DeleteEvent, Some(event.club_id))?;

    if !state.db().delete_event(event_id).await? {
        return Err(ClubError::not_found("Event not found"));
    }

    info!("User {} deleted event {}", claims.sub, event_id);
    Ok(HttpResponse::NoContent().finish())
}

/// Register for an event; open to anyone
pub async fn register(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse> {
    let event_id = path.into_inner();
    let new_registration = registration::prepare(
        request.name.as_deref(),
        request.email.as_deref(),
        request.phone.as_deref(),
    )?;

    let registration = state
        .db()
        .register_for_event(event_id, &new_registration)
        .await?;

    info!("Registration {} created for event {}", registration.id, event_id);
    Ok(HttpResponse::Created().json(registration))
}

/// List an event's registrations, newest first
pub async fn list_registrations(
    state: web::Data<AppState>,
    caller: Caller,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    let event_id = path.into_inner();
    caller.authorize(Action::ViewRegistrations, None)?;

    let event = state
        .db()
        .find_event_by_id(event_id)
        .await?
        .ok_or_else(|| ClubError::not_found("Event not found"))?;

    caller.authorize(Action::ViewRegistrations, Some(event.club_id))?;

    let registrations = state.db().list_registrations(event_id).await?;
    Ok(HttpResponse::Ok().json(registrations))
}
