//! Transactional membership-mutation primitives.
//!
//! Every code path that creates or destroys a membership goes through
//! [`MembershipStore::grant`] and [`MembershipStore::revoke`], inside a
//! transaction whose club row is locked. This keeps the Membership, Ban,
//! and pending JoinRequest sets mutually exclusive for any (club, user)
//! pair and keeps the denormalized member count in step with the rows.

use std::sync::Arc;

use sqlx::PgConnection;
use uuid::Uuid;

use clubhub_core::error::AppError;
use clubhub_core::result::AppResult;
use clubhub_database::repositories::{
    BanRepository, ClubRepository, JoinRequestRepository, MembershipRepository,
};
use clubhub_entity::club::Club;
use clubhub_entity::membership::{ClubRole, Membership};

/// Central arbiter for membership mutations.
#[derive(Debug, Clone)]
pub struct MembershipStore {
    /// Club repository.
    clubs: Arc<ClubRepository>,
    /// Membership repository.
    members: Arc<MembershipRepository>,
    /// Join request repository.
    requests: Arc<JoinRequestRepository>,
    /// Ban repository.
    bans: Arc<BanRepository>,
}

impl MembershipStore {
    /// Creates a new membership store.
    pub fn new(
        clubs: Arc<ClubRepository>,
        members: Arc<MembershipRepository>,
        requests: Arc<JoinRequestRepository>,
        bans: Arc<BanRepository>,
    ) -> Self {
        Self {
            clubs,
            members,
            requests,
            bans,
        }
    }

    /// Load a club inside the transaction with its row locked.
    ///
    /// The lock serializes concurrent membership mutations on the club, so
    /// the capacity check below reads a count no concurrent grant can move.
    pub(crate) async fn locked_club(
        &self,
        conn: &mut PgConnection,
        club_id: Uuid,
    ) -> AppResult<Club> {
        self.clubs
            .find_by_id_locked(conn, club_id)
            .await?
            .ok_or_else(|| AppError::club_not_found("Club not found"))
    }

    /// Grant a membership; the one place new membership rows come from.
    ///
    /// Enforces the archived, ban, duplicate, and capacity gates, purges
    /// any pending join request for the pair, and bumps the member count.
    /// Returns the membership and the club's new member count.
    pub(crate) async fn grant(
        &self,
        conn: &mut PgConnection,
        club: &Club,
        user_id: Uuid,
        role: ClubRole,
    ) -> AppResult<(Membership, i32)> {
        if club.is_archived {
            return Err(AppError::club_archived(
                "Archived clubs do not accept new members",
            ));
        }
        if self.bans.exists_in_tx(conn, club.id, user_id).await? {
            return Err(AppError::user_banned("User is banned from this club"));
        }
        if self.members.find_in_tx(conn, club.id, user_id).await?.is_some() {
            return Err(AppError::member_already_exists(
                "User is already a member of this club",
            ));
        }
        if club.is_full() {
            return Err(AppError::club_full("Club has reached its member cap"));
        }

        let membership = self.members.insert(conn, club.id, user_id, role).await?;
        // A membership and a pending request must never coexist.
        self.requests
            .delete_pending_pair(conn, club.id, user_id)
            .await?;
        let count = self.clubs.adjust_member_count(conn, club.id, 1).await?;
        Ok((membership, count))
    }

    /// Revoke a membership, decrementing the member count if a row was
    /// removed. Returns whether a membership existed.
    pub(crate) async fn revoke(
        &self,
        conn: &mut PgConnection,
        club_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<bool> {
        let removed = self.members.delete(conn, club_id, user_id).await?;
        if removed {
            self.clubs.adjust_member_count(conn, club_id, -1).await?;
        }
        Ok(removed)
    }

    /// Require the actor to hold at least `min` rank in the club.
    ///
    /// Returns the actor's membership so callers can apply stricter
    /// `can_manage` checks on top.
    pub(crate) async fn require_rank(
        &self,
        club_id: Uuid,
        actor_id: Uuid,
        min: ClubRole,
    ) -> AppResult<Membership> {
        let membership = self
            .members
            .find(club_id, actor_id)
            .await?
            .ok_or_else(|| AppError::forbidden("You are not a member of this club"))?;
        if membership.role < min {
            return Err(AppError::forbidden(format!(
                "This operation requires the {min} role or above"
            )));
        }
        Ok(membership)
    }
}
