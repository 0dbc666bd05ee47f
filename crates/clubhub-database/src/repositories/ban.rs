//! Ban repository implementation.

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use clubhub_core::error::{AppError, ErrorKind};
use clubhub_core::result::AppResult;
use clubhub_core::types::pagination::{PageRequest, PageResponse};
use clubhub_entity::ban::Ban;

use super::is_unique_violation;

/// Repository for the per-club ban registry.
#[derive(Debug, Clone)]
pub struct BanRepository {
    pool: PgPool,
}

impl BanRepository {
    /// Create a new ban repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find the ban for a (club, user) pair, if any.
    pub async fn find_pair(&self, club_id: Uuid, user_id: Uuid) -> AppResult<Option<Ban>> {
        sqlx::query_as::<_, Ban>("SELECT * FROM bans WHERE club_id = $1 AND user_id = $2")
            .bind(club_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find ban", e))
    }

    /// Check for a ban inside an open transaction.
    pub async fn exists_in_tx(
        &self,
        conn: &mut PgConnection,
        club_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM bans WHERE club_id = $1 AND user_id = $2)",
        )
        .bind(club_id)
        .bind(user_id)
        .fetch_one(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check ban", e))
    }

    /// Insert a new ban.
    pub async fn insert(
        &self,
        conn: &mut PgConnection,
        club_id: Uuid,
        user_id: Uuid,
        banned_by: Uuid,
        reason: Option<&str>,
    ) -> AppResult<Ban> {
        sqlx::query_as::<_, Ban>(
            "INSERT INTO bans (club_id, user_id, banned_by, reason) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(club_id)
        .bind(user_id)
        .bind(banned_by)
        .bind(reason)
        .fetch_one(conn)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::user_banned("User is already banned from this club")
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to create ban", e)
            }
        })
    }

    /// Delete the ban for a pair. Returns `true` if a row was removed.
    pub async fn delete_pair(&self, club_id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM bans WHERE club_id = $1 AND user_id = $2")
            .bind(club_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete ban", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// List a club's bans, newest first.
    pub async fn list(&self, club_id: Uuid, page: &PageRequest) -> AppResult<PageResponse<Ban>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bans WHERE club_id = $1")
            .bind(club_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count bans", e))?;

        let bans = sqlx::query_as::<_, Ban>(
            "SELECT * FROM bans WHERE club_id = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(club_id)
        .bind(page.sql_limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list bans", e))?;

        Ok(PageResponse::new(bans, page, total as u64))
    }
}
