//! Club repository implementation.

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use clubhub_core::error::{AppError, ErrorKind};
use clubhub_core::result::AppResult;
use clubhub_entity::club::{Club, CreateClub};

use super::is_unique_violation;

/// Repository for club rows, invite codes, and the denormalized
/// member count.
#[derive(Debug, Clone)]
pub struct ClubRepository {
    pool: PgPool,
}

impl ClubRepository {
    /// Create a new club repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a club by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Club>> {
        sqlx::query_as::<_, Club>("SELECT * FROM clubs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find club", e))
    }

    /// Find a club by ID inside a transaction, locking the row.
    ///
    /// Every membership mutation locks the club row first so that the
    /// capacity check and the member-count update are serialized.
    pub async fn find_by_id_locked(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
    ) -> AppResult<Option<Club>> {
        sqlx::query_as::<_, Club>("SELECT * FROM clubs WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(conn)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock club", e))
    }

    /// Find a club by its live invite code, locking the row.
    pub async fn find_by_invite_code_locked(
        &self,
        conn: &mut PgConnection,
        code: &str,
    ) -> AppResult<Option<Club>> {
        sqlx::query_as::<_, Club>("SELECT * FROM clubs WHERE invite_code = $1 FOR UPDATE")
            .bind(code)
            .fetch_optional(conn)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find club by code", e)
            })
    }

    /// Check whether a club name is taken (case-insensitive), optionally
    /// excluding one club ID (for renames).
    pub async fn name_exists(&self, name: &str, exclude: Option<Uuid>) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM clubs WHERE LOWER(name) = LOWER($1) \
             AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(name)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check club name", e))
    }

    /// Insert a new club.
    pub async fn insert(
        &self,
        conn: &mut PgConnection,
        data: &CreateClub,
        owner_id: Uuid,
    ) -> AppResult<Club> {
        sqlx::query_as::<_, Club>(
            "INSERT INTO clubs (name, description, visibility, auto_approve, \
             member_invites_allowed, max_members, listed_in_directory, owner_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.visibility)
        .bind(data.auto_approve)
        .bind(data.member_invites_allowed)
        .bind(data.max_members)
        .bind(data.listed_in_directory)
        .bind(owner_id)
        .fetch_one(conn)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::club_already_exists("A club with this name already exists")
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to create club", e)
            }
        })
    }

    /// Update a club's settings from a full entity.
    ///
    /// Runs on the caller's transaction so the settings write stays ordered
    /// against the club row lock taken for the member-count check.
    pub async fn update(&self, conn: &mut PgConnection, club: &Club) -> AppResult<Club> {
        sqlx::query_as::<_, Club>(
            "UPDATE clubs SET name = $2, description = $3, visibility = $4, \
             auto_approve = $5, member_invites_allowed = $6, max_members = $7, \
             listed_in_directory = $8, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(club.id)
        .bind(&club.name)
        .bind(&club.description)
        .bind(club.visibility)
        .bind(club.auto_approve)
        .bind(club.member_invites_allowed)
        .bind(club.max_members)
        .bind(club.listed_in_directory)
        .fetch_one(conn)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::club_already_exists("A club with this name already exists")
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to update club", e)
            }
        })
    }

    /// Record a new owner on the club row.
    pub async fn set_owner(
        &self,
        conn: &mut PgConnection,
        club_id: Uuid,
        owner_id: Uuid,
    ) -> AppResult<bool> {
        let result =
            sqlx::query("UPDATE clubs SET owner_id = $2, updated_at = NOW() WHERE id = $1")
                .bind(club_id)
                .bind(owner_id)
                .execute(conn)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to set club owner", e)
                })?;
        Ok(result.rows_affected() > 0)
    }

    /// Mark a club archived.
    pub async fn set_archived(&self, club_id: Uuid) -> AppResult<bool> {
        let result =
            sqlx::query("UPDATE clubs SET is_archived = TRUE, updated_at = NOW() WHERE id = $1")
                .bind(club_id)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to archive club", e)
                })?;
        Ok(result.rows_affected() > 0)
    }

    /// Replace the club's live invite code.
    ///
    /// Returns `false` when the code collides with another club's live
    /// code; the caller retries with a fresh code.
    pub async fn set_invite_code(&self, club_id: Uuid, code: &str) -> AppResult<bool> {
        let result =
            sqlx::query("UPDATE clubs SET invite_code = $2, updated_at = NOW() WHERE id = $1")
                .bind(club_id)
                .bind(code)
                .execute(&self.pool)
                .await;
        match result {
            Ok(r) => Ok(r.rows_affected() > 0),
            Err(e) if is_unique_violation(&e) => Ok(false),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Database,
                "Failed to set invite code",
                e,
            )),
        }
    }

    /// Adjust the denormalized member count and return the new value.
    ///
    /// Only the membership-store primitives call this, always inside the
    /// same transaction as the membership insert or delete.
    pub async fn adjust_member_count(
        &self,
        conn: &mut PgConnection,
        club_id: Uuid,
        delta: i32,
    ) -> AppResult<i32> {
        sqlx::query_scalar::<_, i32>(
            "UPDATE clubs SET member_count = member_count + $2, updated_at = NOW() \
             WHERE id = $1 RETURNING member_count",
        )
        .bind(club_id)
        .bind(delta)
        .fetch_one(conn)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to adjust member count", e)
        })
    }
}
