//! Ban registry: exclusion records consulted before every
//! membership-granting operation.

use std::sync::Arc;

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use clubhub_core::error::AppError;
use clubhub_core::events::{BanEvent, EventPayload, MembershipEvent};
use clubhub_core::traits::{EventPublisher, UserDirectory};
use clubhub_core::types::pagination::{PageRequest, PageResponse};
use clubhub_database::repositories::{BanRepository, ClubRepository, JoinRequestRepository};
use clubhub_entity::ban::Ban;
use clubhub_entity::membership::ClubRole;

use crate::context::RequestContext;
use crate::membership::MembershipStore;
use crate::{events, tx};

/// Manages per-club bans.
#[derive(Clone)]
pub struct BanService {
    /// Connection pool for transactional boundaries.
    pool: PgPool,
    /// Club repository.
    clubs: Arc<ClubRepository>,
    /// Ban repository.
    bans: Arc<BanRepository>,
    /// Join request repository.
    requests: Arc<JoinRequestRepository>,
    /// Shared membership-mutation primitives.
    store: Arc<MembershipStore>,
    /// External user store.
    users: Arc<dyn UserDirectory>,
    /// Notification collaborator.
    publisher: Arc<dyn EventPublisher>,
}

impl BanService {
    /// Creates a new ban service.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        pool: PgPool,
        clubs: Arc<ClubRepository>,
        bans: Arc<BanRepository>,
        requests: Arc<JoinRequestRepository>,
        store: Arc<MembershipStore>,
        users: Arc<dyn UserDirectory>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            pool,
            clubs,
            bans,
            requests,
            store,
            users,
            publisher,
        }
    }

    /// Returns whether a user is banned from a club.
    pub async fn is_banned(&self, club_id: Uuid, user_id: Uuid) -> Result<bool, AppError> {
        Ok(self.bans.find_pair(club_id, user_id).await?.is_some())
    }

    /// Bans a user from a club.
    ///
    /// Atomically removes any existing membership and any pending join
    /// request for the pair. The owner can never be banned; transfer
    /// ownership or archive the club instead.
    pub async fn ban(
        &self,
        ctx: &RequestContext,
        club_id: Uuid,
        user_id: Uuid,
        reason: Option<String>,
    ) -> Result<Ban, AppError> {
        self.clubs
            .find_by_id(club_id)
            .await?
            .ok_or_else(|| AppError::club_not_found("Club not found"))?;
        if !self.users.user_exists(user_id).await? {
            return Err(AppError::user_not_found("Unknown user"));
        }
        self.store
            .require_rank(club_id, ctx.user_id, ClubRole::Admin)
            .await?;

        let mut txn = tx::begin(&self.pool).await?;

        let club = self.store.locked_club(&mut txn, club_id).await?;
        if club.is_archived {
            return Err(AppError::club_archived(
                "Archived clubs reject membership changes",
            ));
        }
        if club.owner_id == user_id {
            return Err(AppError::forbidden(
                "The club owner cannot be banned; transfer ownership or archive the club instead",
            ));
        }

        let ban = self
            .bans
            .insert(&mut txn, club_id, user_id, ctx.user_id, reason.as_deref())
            .await?;
        let membership_removed = self.store.revoke(&mut txn, club_id, user_id).await?;
        self.requests
            .delete_pending_pair(&mut txn, club_id, user_id)
            .await?;
        tx::commit(txn).await?;

        info!(
            ban_id = %ban.id,
            club_id = %club_id,
            user_id = %user_id,
            actor_id = %ctx.user_id,
            membership_removed,
            "User banned"
        );
        events::emit(
            &self.publisher,
            Some(ctx.user_id),
            EventPayload::Ban(BanEvent::Created {
                ban_id: ban.id,
                club_id,
                user_id,
                banned_by: ctx.user_id,
                membership_removed,
            }),
        )
        .await;
        if membership_removed {
            events::emit(
                &self.publisher,
                Some(ctx.user_id),
                EventPayload::Membership(MembershipEvent::Removed {
                    club_id,
                    user_id,
                    self_leave: false,
                }),
            )
            .await;
        }

        Ok(ban)
    }

    /// Lifts a ban. Idempotent: lifting a non-existent ban is a no-op.
    pub async fn unban(
        &self,
        ctx: &RequestContext,
        club_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), AppError> {
        self.clubs
            .find_by_id(club_id)
            .await?
            .ok_or_else(|| AppError::club_not_found("Club not found"))?;
        self.store
            .require_rank(club_id, ctx.user_id, ClubRole::Admin)
            .await?;

        let removed = self.bans.delete_pair(club_id, user_id).await?;
        if removed {
            info!(
                club_id = %club_id,
                user_id = %user_id,
                actor_id = %ctx.user_id,
                "Ban lifted"
            );
            events::emit(
                &self.publisher,
                Some(ctx.user_id),
                EventPayload::Ban(BanEvent::Removed { club_id, user_id }),
            )
            .await;
        }

        Ok(())
    }

    /// Lists a club's bans (admin-gated), newest first.
    pub async fn list_bans(
        &self,
        ctx: &RequestContext,
        club_id: Uuid,
        page: PageRequest,
    ) -> Result<PageResponse<Ban>, AppError> {
        self.clubs
            .find_by_id(club_id)
            .await?
            .ok_or_else(|| AppError::club_not_found("Club not found"))?;
        self.store
            .require_rank(club_id, ctx.user_id, ClubRole::Admin)
            .await?;
        self.bans.list(club_id, &page).await
    }
}
