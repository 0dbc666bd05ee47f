//! Member management: removal, role changes, listing.

use std::sync::Arc;

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use clubhub_core::error::AppError;
use clubhub_core::events::{EventPayload, MembershipEvent};
use clubhub_core::traits::EventPublisher;
use clubhub_core::types::pagination::{PageRequest, PageResponse};
use clubhub_database::repositories::{ClubRepository, MembershipRepository};
use clubhub_entity::membership::{ClubRole, Membership};

use super::store::MembershipStore;
use crate::context::RequestContext;
use crate::{events, tx};

/// Manages existing memberships: removal, role changes, and listing.
#[derive(Clone)]
pub struct MembershipService {
    /// Connection pool for transactional boundaries.
    pool: PgPool,
    /// Shared membership-mutation primitives.
    store: Arc<MembershipStore>,
    /// Club repository.
    clubs: Arc<ClubRepository>,
    /// Membership repository.
    members: Arc<MembershipRepository>,
    /// Notification collaborator.
    publisher: Arc<dyn EventPublisher>,
}

impl MembershipService {
    /// Creates a new membership service.
    pub fn new(
        pool: PgPool,
        store: Arc<MembershipStore>,
        clubs: Arc<ClubRepository>,
        members: Arc<MembershipRepository>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            pool,
            store,
            clubs,
            members,
            publisher,
        }
    }

    /// Removes a member from a club.
    ///
    /// A member may always remove themself; removing anyone else requires
    /// strictly higher rank. The owner can never be removed; ownership
    /// must be transferred first, even for a self-leave.
    pub async fn remove_member(
        &self,
        ctx: &RequestContext,
        club_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), AppError> {
        let mut txn = tx::begin(&self.pool).await?;

        let club = self.store.locked_club(&mut txn, club_id).await?;
        if club.is_archived {
            return Err(AppError::club_archived(
                "Archived clubs reject membership changes",
            ));
        }

        let target = self
            .members
            .find_in_tx(&mut txn, club_id, user_id)
            .await?
            .ok_or_else(|| AppError::member_not_found("User is not a member of this club"))?;
        if target.role.is_owner() {
            return Err(AppError::cannot_remove_owner(
                "The owner cannot leave or be removed; transfer ownership first",
            ));
        }

        let self_leave = ctx.user_id == user_id;
        if !self_leave {
            let actor = self
                .members
                .find_in_tx(&mut txn, club_id, ctx.user_id)
                .await?
                .ok_or_else(|| AppError::forbidden("You are not a member of this club"))?;
            if !actor.role.can_manage(&target.role) {
                return Err(AppError::forbidden(
                    "You cannot remove a member of equal or higher rank",
                ));
            }
        }

        self.store.revoke(&mut txn, club_id, user_id).await?;
        tx::commit(txn).await?;

        info!(
            club_id = %club_id,
            user_id = %user_id,
            actor_id = %ctx.user_id,
            self_leave,
            "Member removed"
        );
        events::emit(
            &self.publisher,
            Some(ctx.user_id),
            EventPayload::Membership(MembershipEvent::Removed {
                club_id,
                user_id,
                self_leave,
            }),
        )
        .await;

        Ok(())
    }

    /// Changes a member's role between `member` and `admin`.
    ///
    /// Promotion to `owner` goes through ownership transfer, never through
    /// this call. The actor must out-rank both the current and new role.
    pub async fn change_role(
        &self,
        ctx: &RequestContext,
        club_id: Uuid,
        user_id: Uuid,
        new_role: ClubRole,
    ) -> Result<Membership, AppError> {
        if new_role.is_owner() {
            return Err(AppError::forbidden(
                "The owner role is assigned via ownership transfer",
            ));
        }

        let mut txn = tx::begin(&self.pool).await?;

        let club = self.store.locked_club(&mut txn, club_id).await?;
        if club.is_archived {
            return Err(AppError::club_archived(
                "Archived clubs reject membership changes",
            ));
        }

        let target = self
            .members
            .find_in_tx(&mut txn, club_id, user_id)
            .await?
            .ok_or_else(|| AppError::member_not_found("User is not a member of this club"))?;
        if target.role.is_owner() {
            return Err(AppError::forbidden(
                "The owner's role can only change via ownership transfer",
            ));
        }

        let actor = self
            .members
            .find_in_tx(&mut txn, club_id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::forbidden("You are not a member of this club"))?;
        if !actor.role.can_manage(&target.role) || !actor.role.can_manage(&new_role) {
            return Err(AppError::forbidden(
                "You cannot manage members at this rank",
            ));
        }

        let old_role = target.role;
        let updated = self
            .members
            .update_role(&mut txn, club_id, user_id, new_role)
            .await?
            .ok_or_else(|| AppError::member_not_found("User is not a member of this club"))?;
        tx::commit(txn).await?;

        info!(
            club_id = %club_id,
            user_id = %user_id,
            actor_id = %ctx.user_id,
            old_role = %old_role,
            new_role = %new_role,
            "Member role changed"
        );
        events::emit(
            &self.publisher,
            Some(ctx.user_id),
            EventPayload::Membership(MembershipEvent::RoleChanged {
                club_id,
                user_id,
                old_role: old_role.to_string(),
                new_role: new_role.to_string(),
            }),
        )
        .await;

        Ok(updated)
    }

    /// Lists a club's members, optionally filtered by role.
    pub async fn list_members(
        &self,
        club_id: Uuid,
        role: Option<ClubRole>,
        page: PageRequest,
    ) -> Result<PageResponse<Membership>, AppError> {
        self.clubs
            .find_by_id(club_id)
            .await?
            .ok_or_else(|| AppError::club_not_found("Club not found"))?;
        self.members.list(club_id, role, &page).await
    }

    /// Gets a single membership, if the user belongs to the club.
    pub async fn get_membership(
        &self,
        club_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Membership>, AppError> {
        self.members.find(club_id, user_id).await
    }
}
