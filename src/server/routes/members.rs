//! Member routes

use super::ensure_club_exists;
use super::fields;
use crate::auth::jwt::Claims;
use crate::auth::rbac::{Action, DenyReason};
use crate::core::models::{MemberChanges, MemberView, NewMember, Role, User};
use crate::server::middleware::Caller;
use crate::server::state::AppState;
use crate::utils::crypto::hash_password;
use crate::utils::error::{ClubError, Result};
use crate::utils::validation::FieldValidator;
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use tracing::info;

/// Member creation request
#[derive(Debug, Deserialize)]
pub struct CreateMemberRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
    #[serde(default, deserialize_with = "fields::opt_i32")]
    pub club_id: Option<i32>,
}

/// Partial member update
#[derive(Debug, Default, Deserialize)]
pub struct UpdateMemberRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    #[serde(default, deserialize_with = "fields::nullable")]
    pub phone: Option<Option<String>>,
    pub role: Option<String>,
    #[serde(default, deserialize_with = "fields::nullable_i32")]
    pub club_id: Option<Option<i32>>,
}

/// Configure member routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/members")
            .route("", web::get().to(list_members))
            .route("", web::post().to(create_member))
            .route("/{id}", web::put().to(update_member))
            .route("/{id}", web::delete().to(delete_member)),
    );
}

fn parse_role(claims: &Claims, value: &str) -> Result<Role> {
    let role: Role = value.parse().map_err(ClubError::Validation)?;
    if !claims.role.can_assign(role) {
        return Err(ClubError::forbidden(
            "Only a super administrator can grant SUPER_ADMIN",
        ));
    }
    Ok(role)
}

fn require_club_assignment(role: Role, club_id: Option<i32>) -> Result<()> {
    if club_id.is_none() && !role.is_super_admin() {
        return Err(ClubError::validation("club_id is required for club members"));
    }
    Ok(())
}

/// Load a member and check it belongs to the caller's club
///
/// Accounts without a club are only reachable by super-administrators.
async fn load_target(
    state: &AppState,
    caller: &Caller,
    action: Action,
    member_id: i32,
) -> Result<User> {
    let claims = caller.authorize(action, None)?;

    let user = state
        .db()
        .find_user_by_id(member_id)
        .await?
        .ok_or_else(|| ClubError::not_found("Member not found"))?;

    match user.club_id {
        Some(club_id) => {
            caller.authorize(action, Some(club_id))?;
        }
        None if !claims.role.is_super_admin() => return Err(DenyReason::ClubMismatch.into()),
        None => {}
    }

    Ok(user)
}

/// List every member
pub async fn list_members(state: web::Data<AppState>) -> Result<HttpResponse> {
    let members = state.db().list_members().await?;
    Ok(HttpResponse::Ok().json(members))
}

/// Create a member account
pub async fn create_member(
    state: web::Data<AppState>,
    caller: Caller,
    request: web::Json<CreateMemberRequest>,
) -> Result<HttpResponse> {
    let claims = caller.authorize(Action::CreateMember, None)?;
    let request = request.into_inner();

    let role = match request.role.as_deref() {
        Some(value) => parse_role(claims, value)?,
        None => Role::default(),
    };

    let club_id = if claims.role.is_super_admin() {
        request.club_id
    } else {
        let own = claims
            .club_id
            .ok_or_else(|| ClubError::validation("Your account is not assigned to a club"))?;
        if request.club_id.is_some_and(|id| id != own) {
            return Err(DenyReason::ClubMismatch.into());
        }
        Some(own)
    };
    require_club_assignment(role, club_id)?;

    let name = FieldValidator::required("name", request.name.as_deref())?;
    let email = FieldValidator::normalize_email(&FieldValidator::required(
        "email",
        request.email.as_deref(),
    )?)?;
    let password = request
        .password
        .as_deref()
        .ok_or_else(|| ClubError::validation("password is required"))?;
    FieldValidator::validate_password(password)?;

    if let Some(club_id) = club_id {
        ensure_club_exists(&state, club_id).await?;
    }

    let user = state
        .db()
        .create_member(NewMember {
            name,
            email,
            phone: FieldValidator::optional(request.phone.as_deref()),
            role,
            club_id,
            password_hash: hash_password(password)?,
        })
        .await?;

    info!("User {} created member {} as {}", claims.sub, user.id, user.role);
    Ok(HttpResponse::Created().json(MemberView::from(user)))
}

/// Partially update a member
pub async fn update_member(
    state: web::Data<AppState>,
    caller: Caller,
    path: web::Path<i32>,
    request: web::Json<UpdateMemberRequest>,
) -> Result<HttpResponse> {
    let member_id = path.into_inner();
    let mut user = load_target(&state, &caller, Action::UpdateMember, member_id).await?;
    let claims = caller.authorize(Action::UpdateMember, user.club_id)?;
    let request = request.into_inner();

    if let Some(club_id) = request.club_id.filter(|id| *id != user.club_id) {
        if !claims.role.is_super_admin() {
            return Err(ClubError::forbidden(
                "Only a super administrator can move members between clubs",
            ));
        }
        if let Some(club_id) = club_id {
            ensure_club_exists(&state, club_id).await?;
        }
    }

    let password_hash = match request.password.as_deref() {
        Some(password) => {
            FieldValidator::validate_password(password)?;
            Some(hash_password(password)?)
        }
        None => None,
    };
    let password_changed = password_hash.is_some();

    let changes = MemberChanges {
        name: request
            .name
            .map(|v| FieldValidator::required("name", Some(v.as_str())))
            .transpose()?,
        email: request
            .email
            .map(|v| FieldValidator::normalize_email(&v))
            .transpose()?,
        phone: request.phone.map(|v| FieldValidator::optional(v.as_deref())),
        role: request
            .role
            .map(|v| parse_role(claims, &v))
            .transpose()?,
        club_id: request.club_id,
        password_hash,
    };

    changes.apply(&mut user);
    require_club_assignment(user.role, user.club_id)?;

    let user = if password_changed {
        state.db().update_member_revoking_sessions(&user).await?
    } else {
        state.db().update_member(&user).await?
    };

    info!("User {} updated member {}", claims.sub, user.id);
    Ok(HttpResponse::Ok().json(MemberView::from(user)))
}

/// Delete a member; their refresh tokens cascade
pub async fn delete_member(
    state: web::Data<AppState>,
    caller: Caller,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    let member_id = path.into_inner();
    let user = load_target(&state, &caller, Action::DeleteMember, member_id).await?;
    let claims = caller.authorize(Action::DeleteMember, user.club_id)?;

    if !state.db().delete_member(user.id).await? {
        return Err(ClubError::not_found("Member not found"));
    }

    info!("User {} deleted member {}", claims.sub, member_id);
    Ok(HttpResponse::NoContent().finish())
}
