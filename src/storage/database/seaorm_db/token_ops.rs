use crate::utils::error::{ClubError, Result};
use chrono::{DateTime, Utc};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::Expr;
use sea_orm::*;
use tracing::debug;

use super::super::entities::{self, refresh_token};
use super::types::SeaOrmDatabase;

impl SeaOrmDatabase {
    /// Record an issued refresh token
    pub async fn store_refresh_token(
        &self,
        jti: &str,
        user_id: i32,
        expires_at: DateTime<Utc>,
    ) -> Result<()> {
        debug!("Storing refresh token for user: {}", user_id);
        insert_refresh_token(&self.db, jti, user_id, expires_at).await
    }

    /// Consume `old_jti` and record `new_jti` in one transaction
    ///
    /// Returns `false`, storing nothing, when the old token is unknown,
    /// belongs to another user or was already used.
    pub async fn rotate_refresh_token(
        &self,
        old_jti: &str,
        user_id: i32,
        new_jti: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool> {
        let txn = self.db.begin().await.map_err(ClubError::Database)?;

        if !consume_token(&txn, old_jti, user_id).await? {
            txn.rollback().await.map_err(ClubError::Database)?;
            return Ok(false);
        }
        insert_refresh_token(&txn, new_jti, user_id, expires_at).await?;

        txn.commit().await.map_err(ClubError::Database)?;
        Ok(true)
    }

    /// Atomically mark a live refresh token as used
    ///
    /// Returns `false` when the token is unknown, belongs to another user or
    /// was already revoked, so each token mints at most one new session.
    pub async fn consume_refresh_token(&self, jti: &str, user_id: i32) -> Result<bool> {
        consume_token(&self.db, jti, user_id).await
    }

    /// Revoke a single refresh token
    pub async fn revoke_refresh_token(&self, jti: &str) -> Result<()> {
        let now: DateTimeWithTimeZone = Utc::now().into();

        entities::RefreshToken::update_many()
            .col_expr(refresh_token::Column::RevokedAt, Expr::value(now))
            .filter(refresh_token::Column::Id.eq(jti))
            .filter(refresh_token::Column::RevokedAt.is_null())
            .exec(&self.db)
            .await
            .map_err(ClubError::Database)?;

        Ok(())
    }

    /// Revoke every live refresh token of a user
    pub async fn revoke_user_refresh_tokens(&self, user_id: i32) -> Result<u64> {
        revoke_user_tokens(&self.db, user_id).await
    }

    /// Delete refresh tokens past their expiry
    pub async fn purge_expired_refresh_tokens(&self) -> Result<u64> {
        let now: DateTimeWithTimeZone = Utc::now().into();

        let result = entities::RefreshToken::delete_many()
            .filter(refresh_token::Column::ExpiresAt.lt(now))
            .exec(&self.db)
            .await
            .map_err(ClubError::Database)?;

        if result.rows_affected > 0 {
            debug!("Purged {} expired refresh tokens", result.rows_affected);
        }
        Ok(result.rows_affected)
    }
}

async fn insert_refresh_token<C: ConnectionTrait>(
    conn: &C,
    jti: &str,
    user_id: i32,
    expires_at: DateTime<Utc>,
) -> Result<()> {
    refresh_token::ActiveModel {
        id: Set(jti.to_string()),
        user_id: Set(user_id),
        expires_at: Set(expires_at.into()),
        revoked_at: Set(None),
        created_at: Set(Utc::now().into()),
    }
    .insert(conn)
    .await
    .map_err(ClubError::Database)?;

    Ok(())
}

async fn consume_token<C: ConnectionTrait>(conn: &C, jti: &str, user_id: i32) -> Result<bool> {
    let now: DateTimeWithTimeZone = Utc::now().into();

    let result = entities::RefreshToken::update_many()
        .col_expr(refresh_token::Column::RevokedAt, Expr::value(now))
        .filter(refresh_token::Column::Id.eq(jti))
        .filter(refresh_token::Column::UserId.eq(user_id))
        .filter(refresh_token::Column::RevokedAt.is_null())
        .exec(conn)
        .await
        .map_err(ClubError::Database)?;

    Ok(result.rows_affected == 1)
}

/// Revoke every live refresh token of `user_id` on `conn`
pub(super) async fn revoke_user_tokens<C: ConnectionTrait>(conn: &C, user_id: i32) -> Result<u64> {
    debug!("Revoking refresh tokens for user: {}", user_id);

    let now: DateTimeWithTimeZone = Utc::now().into();
    let result = entities::RefreshToken::update_many()
        .col_expr(refresh_token::Column::RevokedAt, Expr::value(now))
        .filter(refresh_token::Column::UserId.eq(user_id))
        .filter(refresh_token::Column::RevokedAt.is_null())
        .exec(conn)
        .await
        .map_err(ClubError::Database)?;

    Ok(result.rows_affected)
}
