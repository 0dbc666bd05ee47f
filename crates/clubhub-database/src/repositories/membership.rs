//! Membership repository implementation.

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use clubhub_core::error::{AppError, ErrorKind};
use clubhub_core::result::AppResult;
use clubhub_core::types::pagination::{PageRequest, PageResponse};
use clubhub_entity::membership::{ClubRole, Membership};

use super::is_unique_violation;

/// Repository for the (club, user) → role mapping.
#[derive(Debug, Clone)]
pub struct MembershipRepository {
    pool: PgPool,
}

impl MembershipRepository {
    /// Create a new membership repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a membership by its composite key.
    pub async fn find(&self, club_id: Uuid, user_id: Uuid) -> AppResult<Option<Membership>> {
        sqlx::query_as::<_, Membership>(
            "SELECT * FROM memberships WHERE club_id = $1 AND user_id = $2",
        )
        .bind(club_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find membership", e))
    }

    /// Find a membership inside an open transaction.
    pub async fn find_in_tx(
        &self,
        conn: &mut PgConnection,
        club_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<Membership>> {
        sqlx::query_as::<_, Membership>(
            "SELECT * FROM memberships WHERE club_id = $1 AND user_id = $2",
        )
        .bind(club_id)
        .bind(user_id)
        .fetch_optional(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find membership", e))
    }

    /// Insert a new membership.
    ///
    /// The `(club_id, user_id)` primary key resolves concurrent duplicate
    /// inserts: exactly one wins and the loser observes
    /// `MEMBER_ALREADY_EXISTS`.
    pub async fn insert(
        &self,
        conn: &mut PgConnection,
        club_id: Uuid,
        user_id: Uuid,
        role: ClubRole,
    ) -> AppResult<Membership> {
        sqlx::query_as::<_, Membership>(
            "INSERT INTO memberships (club_id, user_id, role) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(club_id)
        .bind(user_id)
        .bind(role)
        .fetch_one(conn)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::member_already_exists("User is already a member of this club")
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to create membership", e)
            }
        })
    }

    /// Delete a membership. Returns `true` if a row was removed.
    pub async fn delete(
        &self,
        conn: &mut PgConnection,
        club_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM memberships WHERE club_id = $1 AND user_id = $2")
            .bind(club_id)
            .bind(user_id)
            .execute(conn)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete membership", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    /// Update a member's role, returning the updated row if it existed.
    pub async fn update_role(
        &self,
        conn: &mut PgConnection,
        club_id: Uuid,
        user_id: Uuid,
        role: ClubRole,
    ) -> AppResult<Option<Membership>> {
        sqlx::query_as::<_, Membership>(
            "UPDATE memberships SET role = $3 \
             WHERE club_id = $1 AND user_id = $2 RETURNING *",
        )
        .bind(club_id)
        .bind(user_id)
        .bind(role)
        .fetch_optional(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update role", e))
    }

    /// List a club's members, optionally filtered by role, oldest first.
    pub async fn list(
        &self,
        club_id: Uuid,
        role: Option<ClubRole>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Membership>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM memberships WHERE club_id = $1 \
             AND ($2::club_role IS NULL OR role = $2)",
        )
        .bind(club_id)
        .bind(role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count members", e))?;

        let members = sqlx::query_as::<_, Membership>(
            "SELECT * FROM memberships WHERE club_id = $1 \
             AND ($2::club_role IS NULL OR role = $2) \
             ORDER BY joined_at ASC LIMIT $3 OFFSET $4",
        )
        .bind(club_id)
        .bind(role)
        .bind(page.sql_limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list members", e))?;

        Ok(PageResponse::new(members, page, total as u64))
    }
}
