//! Join request lifecycle: pending to approved or rejected.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use clubhub_core::error::AppError;
use clubhub_core::events::{EventPayload, JoinRequestEvent, MembershipEvent};
use clubhub_core::traits::{EventPublisher, UserDirectory};
use clubhub_core::types::pagination::{PageRequest, PageResponse};
use clubhub_database::repositories::{
    BanRepository, ClubRepository, JoinRequestRepository, MembershipRepository,
};
use clubhub_entity::join_request::{JoinRequest, JoinRequestStatus};
use clubhub_entity::membership::{ClubRole, Membership};

use crate::context::RequestContext;
use crate::membership::MembershipStore;
use crate::{events, tx};

/// Outcome of a join attempt.
///
/// Auto-approving clubs short-circuit straight to a membership with no
/// request record persisted; everything else enters the pending queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum JoinOutcome {
    /// A pending request was created and awaits an admin decision.
    Pending(JoinRequest),
    /// The club auto-approves; the user is a member immediately.
    Joined(Membership),
}

/// Manages the join request state machine.
#[derive(Clone)]
pub struct JoinRequestService {
    /// Connection pool for transactional boundaries.
    pool: PgPool,
    /// Club repository.
    clubs: Arc<ClubRepository>,
    /// Join request repository.
    requests: Arc<JoinRequestRepository>,
    /// Membership repository.
    members: Arc<MembershipRepository>,
    /// Ban repository.
    bans: Arc<BanRepository>,
    /// Shared membership-mutation primitives.
    store: Arc<MembershipStore>,
    /// External user store.
    users: Arc<dyn UserDirectory>,
    /// Notification collaborator.
    publisher: Arc<dyn EventPublisher>,
}

impl JoinRequestService {
    /// Creates a new join request service.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        pool: PgPool,
        clubs: Arc<ClubRepository>,
        requests: Arc<JoinRequestRepository>,
        members: Arc<MembershipRepository>,
        bans: Arc<BanRepository>,
        store: Arc<MembershipStore>,
        users: Arc<dyn UserDirectory>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            pool,
            clubs,
            requests,
            members,
            bans,
            store,
            users,
            publisher,
        }
    }

    /// Requests access to a club for the acting user.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        club_id: Uuid,
        message: Option<String>,
    ) -> Result<JoinOutcome, AppError> {
        if !self.users.user_exists(ctx.user_id).await? {
            return Err(AppError::user_not_found("Unknown user"));
        }

        let mut txn = tx::begin(&self.pool).await?;

        let club = self.store.locked_club(&mut txn, club_id).await?;
        if club.is_archived {
            return Err(AppError::club_archived(
                "Archived clubs do not accept join requests",
            ));
        }
        if self.bans.exists_in_tx(&mut txn, club_id, ctx.user_id).await? {
            return Err(AppError::user_banned("User is banned from this club"));
        }
        if self
            .members
            .find_in_tx(&mut txn, club_id, ctx.user_id)
            .await?
            .is_some()
        {
            return Err(AppError::member_already_exists(
                "User is already a member of this club",
            ));
        }

        if club.auto_approve {
            let (membership, _) = self
                .store
                .grant(&mut txn, &club, ctx.user_id, ClubRole::Member)
                .await?;
            tx::commit(txn).await?;

            info!(
                club_id = %club_id,
                user_id = %ctx.user_id,
                "Join auto-approved"
            );
            events::emit(
                &self.publisher,
                Some(ctx.user_id),
                EventPayload::Membership(MembershipEvent::Created {
                    club_id,
                    user_id: ctx.user_id,
                    role: membership.role.to_string(),
                    via: "auto_approve".to_string(),
                }),
            )
            .await;

            return Ok(JoinOutcome::Joined(membership));
        }

        let request = self
            .requests
            .insert(&mut txn, club_id, ctx.user_id, message.as_deref())
            .await?;
        tx::commit(txn).await?;

        info!(
            request_id = %request.id,
            club_id = %club_id,
            user_id = %ctx.user_id,
            "Join request created"
        );
        events::emit(
            &self.publisher,
            Some(ctx.user_id),
            EventPayload::JoinRequest(JoinRequestEvent::Created {
                request_id: request.id,
                club_id,
                user_id: ctx.user_id,
            }),
        )
        .await;

        Ok(JoinOutcome::Pending(request))
    }

    /// Approves a pending request, materializing a membership.
    ///
    /// The delete-where-pending claim ensures exactly one of two
    /// concurrent approvals wins; the loser observes
    /// `REQUEST_NOT_PENDING`.
    pub async fn approve(
        &self,
        ctx: &RequestContext,
        request_id: Uuid,
    ) -> Result<Membership, AppError> {
        let request = self
            .requests
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| AppError::request_not_found("Join request not found"))?;
        self.store
            .require_rank(request.club_id, ctx.user_id, ClubRole::Admin)
            .await?;
        if request.status.is_terminal() {
            return Err(AppError::request_not_pending(
                "Join request has already been resolved",
            ));
        }

        let mut txn = tx::begin(&self.pool).await?;

        let club = self.store.locked_club(&mut txn, request.club_id).await?;
        if club.is_archived {
            return Err(AppError::club_archived(
                "Archived clubs reject membership changes",
            ));
        }
        let claimed = self
            .requests
            .claim_pending(&mut txn, request_id)
            .await?
            .ok_or_else(|| {
                AppError::request_not_pending("Join request has already been resolved")
            })?;
        let (membership, _) = self
            .store
            .grant(&mut txn, &club, claimed.user_id, ClubRole::Member)
            .await?;
        tx::commit(txn).await?;

        info!(
            request_id = %request_id,
            club_id = %club.id,
            user_id = %claimed.user_id,
            actor_id = %ctx.user_id,
            "Join request approved"
        );
        events::emit(
            &self.publisher,
            Some(ctx.user_id),
            EventPayload::JoinRequest(JoinRequestEvent::Approved {
                request_id,
                club_id: club.id,
                user_id: claimed.user_id,
                approved_by: ctx.user_id,
            }),
        )
        .await;
        events::emit(
            &self.publisher,
            Some(ctx.user_id),
            EventPayload::Membership(MembershipEvent::Created {
                club_id: club.id,
                user_id: claimed.user_id,
                role: membership.role.to_string(),
                via: "join_request".to_string(),
            }),
        )
        .await;

        Ok(membership)
    }

    /// Rejects a pending request; the record is retained with status
    /// `rejected`, and the user may request again later.
    pub async fn reject(&self, ctx: &RequestContext, request_id: Uuid) -> Result<(), AppError> {
        let request = self
            .requests
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| AppError::request_not_found("Join request not found"))?;
        self.store
            .require_rank(request.club_id, ctx.user_id, ClubRole::Admin)
            .await?;

        let club = self
            .clubs
            .find_by_id(request.club_id)
            .await?
            .ok_or_else(|| AppError::club_not_found("Club not found"))?;
        if club.is_archived {
            return Err(AppError::club_archived(
                "Archived clubs reject membership changes",
            ));
        }

        self.requests
            .reject_pending(request_id)
            .await?
            .ok_or_else(|| {
                AppError::request_not_pending("Join request has already been resolved")
            })?;

        info!(
            request_id = %request_id,
            club_id = %request.club_id,
            actor_id = %ctx.user_id,
            "Join request rejected"
        );
        events::emit(
            &self.publisher,
            Some(ctx.user_id),
            EventPayload::JoinRequest(JoinRequestEvent::Rejected {
                request_id,
                club_id: request.club_id,
                user_id: request.user_id,
                rejected_by: ctx.user_id,
            }),
        )
        .await;

        Ok(())
    }

    /// Lists a club's join requests (admin-gated), newest first.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        club_id: Uuid,
        status: Option<JoinRequestStatus>,
        page: PageRequest,
    ) -> Result<PageResponse<JoinRequest>, AppError> {
        self.clubs
            .find_by_id(club_id)
            .await?
            .ok_or_else(|| AppError::club_not_found("Club not found"))?;
        self.store
            .require_rank(club_id, ctx.user_id, ClubRole::Admin)
            .await?;
        self.requests.list(club_id, status, &page).await
    }
}
