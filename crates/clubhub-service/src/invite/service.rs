//! Invite code redemption.

use std::sync::Arc;

use sqlx::PgPool;
use tracing::info;

use clubhub_core::error::AppError;
use clubhub_core::events::{EventPayload, MembershipEvent};
use clubhub_core::traits::{EventPublisher, UserDirectory};
use clubhub_database::repositories::ClubRepository;
use clubhub_entity::club::Club;
use clubhub_entity::membership::ClubRole;

use crate::context::RequestContext;
use crate::membership::MembershipStore;
use crate::{events, tx};

/// Redeems invite codes into memberships.
///
/// Redemption is an explicit invitation channel: it always grants the
/// `member` role directly and bypasses the join-request flow, regardless
/// of the club's auto-approve setting.
#[derive(Clone)]
pub struct InviteService {
    /// Connection pool for transactional boundaries.
    pool: PgPool,
    /// Club repository.
    clubs: Arc<ClubRepository>,
    /// Shared membership-mutation primitives.
    store: Arc<MembershipStore>,
    /// External user store.
    users: Arc<dyn UserDirectory>,
    /// Notification collaborator.
    publisher: Arc<dyn EventPublisher>,
}

impl InviteService {
    /// Creates a new invite service.
    pub fn new(
        pool: PgPool,
        clubs: Arc<ClubRepository>,
        store: Arc<MembershipStore>,
        users: Arc<dyn UserDirectory>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            pool,
            clubs,
            store,
            users,
            publisher,
        }
    }

    /// Redeems an invite code for the acting user.
    ///
    /// Returns the club joined and the granted role.
    pub async fn redeem(
        &self,
        ctx: &RequestContext,
        code: &str,
    ) -> Result<(Club, ClubRole), AppError> {
        if !self.users.user_exists(ctx.user_id).await? {
            return Err(AppError::user_not_found("Unknown user"));
        }

        let mut txn = tx::begin(&self.pool).await?;

        let mut club = self
            .clubs
            .find_by_invite_code_locked(&mut txn, code)
            .await?
            .ok_or_else(|| AppError::invalid_code("Invite code is not valid"))?;
        // An archived club's code is no longer live.
        if club.is_archived {
            return Err(AppError::invalid_code("Invite code is not valid"));
        }

        let (membership, count) = self
            .store
            .grant(&mut txn, &club, ctx.user_id, ClubRole::Member)
            .await?;
        tx::commit(txn).await?;
        club.member_count = count;

        info!(
            club_id = %club.id,
            user_id = %ctx.user_id,
            "Invite code redeemed"
        );
        events::emit(
            &self.publisher,
            Some(ctx.user_id),
            EventPayload::Membership(MembershipEvent::Created {
                club_id: club.id,
                user_id: ctx.user_id,
                role: membership.role.to_string(),
                via: "invite_code".to_string(),
            }),
        )
        .await;

        Ok((club, membership.role))
    }
}
