use crate::core::models::{ClubMember, MemberView, NewMember, User};
use crate::utils::error::{ClubError, Result};
use sea_orm::*;
use tracing::debug;

use super::super::entities::{self, user};
use super::token_ops::revoke_user_tokens;
use super::types::SeaOrmDatabase;

const DUPLICATE_EMAIL: &str = "A member with this email already exists";

impl SeaOrmDatabase {
    /// Find user by ID
    pub async fn find_user_by_id(&self, user_id: i32) -> Result<Option<User>> {
        debug!("Finding user by ID: {}", user_id);

        let user_model = entities::User::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(ClubError::Database)?;

        Ok(user_model.map(|model| model.to_domain()))
    }

    /// Find user by (normalised) email
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        debug!("Finding user by email: {}", email);

        let user_model = entities::User::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(ClubError::Database)?;

        Ok(user_model.map(|model| model.to_domain()))
    }

    /// List every member, oldest first
    pub async fn list_members(&self) -> Result<Vec<MemberView>> {
        let models = entities::User::find()
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(ClubError::Database)?;

        Ok(models
            .iter()
            .map(|model| MemberView::from(model.to_domain()))
            .collect())
    }

    /// Members of one club, as embedded in the club detail
    pub async fn list_club_members(&self, club_id: i32) -> Result<Vec<ClubMember>> {
        let models = entities::User::find()
            .filter(user::Column::ClubId.eq(club_id))
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(ClubError::Database)?;

        Ok(models
            .iter()
            .map(|model| {
                let user = model.to_domain();
                ClubMember {
                    id: user.id,
                    name: user.name,
                    email: user.email,
                    role: user.role,
                    phone: user.phone,
                }
            })
            .collect())
    }

    /// Create a new member
    pub async fn create_member(&self, member: NewMember) -> Result<User> {
        debug!("Creating member: {}", member.email);

        let now = chrono::Utc::now();
        let active_model = user::ActiveModel {
            name: Set(member.name),
            email: Set(member.email),
            phone: Set(member.phone),
            password_hash: Set(member.password_hash),
            role: Set(member.role.as_str().to_string()),
            club_id: Set(member.club_id),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| ClubError::from_db_unique(e, DUPLICATE_EMAIL))?;

        Ok(model.to_domain())
    }

    /// Persist every mutable field of `member`
    pub async fn update_member(&self, member: &User) -> Result<User> {
        debug!("Updating member: {}", member.id);
        Ok(save_member(&self.db, member).await?.to_domain())
    }

    /// Persist `member` and revoke their refresh tokens in one transaction
    pub async fn update_member_revoking_sessions(&self, member: &User) -> Result<User> {
        debug!("Updating member {} and revoking sessions", member.id);

        let txn = self.db.begin().await.map_err(ClubError::Database)?;
        revoke_user_tokens(&txn, member.id).await?;
        let model = save_member(&txn, member).await?;
        txn.commit().await.map_err(ClubError::Database)?;

        Ok(model.to_domain())
    }

    /// Replace a password hash and revoke every refresh token of the user
    ///
    /// Both writes commit together. Returns the number of revoked tokens.
    pub async fn change_password_revoking_sessions(
        &self,
        user_id: i32,
        password_hash: &str,
    ) -> Result<u64> {
        debug!("Updating password for user: {}", user_id);

        let txn = self.db.begin().await.map_err(ClubError::Database)?;
        let revoked = revoke_user_tokens(&txn, user_id).await?;

        let mut user: user::ActiveModel = entities::User::find_by_id(user_id)
            .one(&txn)
            .await
            .map_err(ClubError::Database)?
            .ok_or_else(|| ClubError::not_found("User not found"))?
            .into();
        user.password_hash = Set(password_hash.to_string());
        user.updated_at = Set(chrono::Utc::now().into());
        user.update(&txn).await.map_err(ClubError::Database)?;

        txn.commit().await.map_err(ClubError::Database)?;
        Ok(revoked)
    }

    /// Delete a member; returns whether a row was removed
    pub async fn delete_member(&self, user_id: i32) -> Result<bool> {
        debug!("Deleting member: {}", user_id);

        let result = entities::User::delete_by_id(user_id)
            .exec(&self.db)
            .await
            .map_err(ClubError::Database)?;

        Ok(result.rows_affected > 0)
    }
}

async fn save_member<C: ConnectionTrait>(conn: &C, member: &User) -> Result<user::Model> {
    user::ActiveModel {
        id: Unchanged(member.id),
        name: Set(member.name.clone()),
        email: Set(member.email.clone()),
        phone: Set(member.phone.clone()),
        password_hash: Set(member.password_hash.clone()),
        role: Set(member.role.as_str().to_string()),
        club_id: Set(member.club_id),
        created_at: NotSet,
        updated_at: Set(chrono::Utc::now().into()),
    }
    .update(conn)
    .await
    .map_err(|e| match e {
        DbErr::RecordNotUpdated => ClubError::not_found("Member not found"),
        other => ClubError::from_db_unique(other, DUPLICATE_EMAIL),
    })
}
