//! Join request repository implementation.

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use clubhub_core::error::{AppError, ErrorKind};
use clubhub_core::result::AppResult;
use clubhub_core::types::pagination::{PageRequest, PageResponse};
use clubhub_entity::join_request::{JoinRequest, JoinRequestStatus};

use super::is_unique_violation;

/// Repository for join request rows.
#[derive(Debug, Clone)]
pub struct JoinRequestRepository {
    pool: PgPool,
}

impl JoinRequestRepository {
    /// Create a new join request repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a join request by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<JoinRequest>> {
        sqlx::query_as::<_, JoinRequest>("SELECT * FROM join_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find join request", e)
            })
    }

    /// Insert a new pending join request.
    ///
    /// The partial unique index on pending pairs resolves concurrent
    /// duplicate requests; the loser observes `DUPLICATE_REQUEST`.
    pub async fn insert(
        &self,
        conn: &mut PgConnection,
        club_id: Uuid,
        user_id: Uuid,
        message: Option<&str>,
    ) -> AppResult<JoinRequest> {
        sqlx::query_as::<_, JoinRequest>(
            "INSERT INTO join_requests (club_id, user_id, message) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(club_id)
        .bind(user_id)
        .bind(message)
        .fetch_one(conn)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::duplicate_request("A pending join request already exists for this club")
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to create join request", e)
            }
        })
    }

    /// Claim a pending request for approval by deleting it.
    ///
    /// `None` means the request was not pending any more (or was already
    /// claimed by a concurrent approval); exactly one of two concurrent
    /// claims returns the row.
    pub async fn claim_pending(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
    ) -> AppResult<Option<JoinRequest>> {
        sqlx::query_as::<_, JoinRequest>(
            "DELETE FROM join_requests WHERE id = $1 AND status = 'pending' RETURNING *",
        )
        .bind(id)
        .fetch_optional(conn)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to claim join request", e)
        })
    }

    /// Mark a pending request rejected; the record is retained.
    pub async fn reject_pending(&self, id: Uuid) -> AppResult<Option<JoinRequest>> {
        sqlx::query_as::<_, JoinRequest>(
            "UPDATE join_requests SET status = 'rejected', updated_at = NOW() \
             WHERE id = $1 AND status = 'pending' RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to reject join request", e)
        })
    }

    /// Delete the pending request for a pair, if one exists.
    ///
    /// Used when a ban or a membership grant must purge a coexisting
    /// pending request in the same transaction.
    pub async fn delete_pending_pair(
        &self,
        conn: &mut PgConnection,
        club_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            "DELETE FROM join_requests \
             WHERE club_id = $1 AND user_id = $2 AND status = 'pending'",
        )
        .bind(club_id)
        .bind(user_id)
        .execute(conn)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to delete pending request", e)
        })?;
        Ok(result.rows_affected() > 0)
    }

    /// List a club's join requests, newest first, optionally by status.
    pub async fn list(
        &self,
        club_id: Uuid,
        status: Option<JoinRequestStatus>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<JoinRequest>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM join_requests WHERE club_id = $1 \
             AND ($2::join_request_status IS NULL OR status = $2)",
        )
        .bind(club_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count requests", e))?;

        let requests = sqlx::query_as::<_, JoinRequest>(
            "SELECT * FROM join_requests WHERE club_id = $1 \
             AND ($2::join_request_status IS NULL OR status = $2) \
             ORDER BY created_at DESC LIMIT $3 OFFSET $4",
        )
        .bind(club_id)
        .bind(status)
        .bind(page.sql_limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list requests", e))?;

        Ok(PageResponse::new(requests, page, total as u64))
    }
}
