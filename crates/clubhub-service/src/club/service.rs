//! Club lifecycle: creation, settings, ownership transfer, archival,
//! and invite code regeneration.

use std::sync::Arc;

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use clubhub_core::config::invite::InviteConfig;
use clubhub_core::error::AppError;
use clubhub_core::events::{ClubEvent, EventPayload, MembershipEvent};
use clubhub_core::traits::{EventPublisher, UserDirectory};
use clubhub_database::repositories::{ClubRepository, MembershipRepository};
use clubhub_entity::club::{Club, ClubPatch, CreateClub};
use clubhub_entity::membership::ClubRole;

use crate::context::RequestContext;
use crate::invite::InviteCodeGenerator;
use crate::membership::MembershipStore;
use crate::{events, tx};

/// Manages the club lifecycle.
#[derive(Clone)]
pub struct ClubService {
    /// Connection pool for transactional boundaries.
    pool: PgPool,
    /// Club repository.
    clubs: Arc<ClubRepository>,
    /// Membership repository.
    members: Arc<MembershipRepository>,
    /// Shared membership-mutation primitives.
    store: Arc<MembershipStore>,
    /// External user store.
    users: Arc<dyn UserDirectory>,
    /// Notification collaborator.
    publisher: Arc<dyn EventPublisher>,
    /// Invite code generator.
    code_generator: InviteCodeGenerator,
    /// Invite code settings.
    invite_config: InviteConfig,
}

impl ClubService {
    /// Creates a new club service.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        pool: PgPool,
        clubs: Arc<ClubRepository>,
        members: Arc<MembershipRepository>,
        store: Arc<MembershipStore>,
        users: Arc<dyn UserDirectory>,
        publisher: Arc<dyn EventPublisher>,
        invite_config: InviteConfig,
    ) -> Self {
        let code_generator = InviteCodeGenerator::new(invite_config.code_length);
        Self {
            pool,
            clubs,
            members,
            store,
            users,
            publisher,
            code_generator,
            invite_config,
        }
    }

    /// Creates a club with the acting user as owner.
    ///
    /// The club row and the owner membership are inserted in one
    /// transaction; a club is never observable without exactly one owner.
    pub async fn create(&self, ctx: &RequestContext, input: CreateClub) -> Result<Club, AppError> {
        let mut input = input;
        input.name = input.name.trim().to_string();
        Club::validate_name(&input.name)?;
        if let Some(cap) = input.max_members {
            if cap < 1 {
                return Err(AppError::validation("max_members must be at least 1"));
            }
        }
        if !self.users.user_exists(ctx.user_id).await? {
            return Err(AppError::user_not_found("Unknown user"));
        }
        if self.clubs.name_exists(&input.name, None).await? {
            return Err(AppError::club_already_exists(
                "A club with this name already exists",
            ));
        }

        let mut txn = tx::begin(&self.pool).await?;

        let mut club = self.clubs.insert(&mut txn, &input, ctx.user_id).await?;
        let (_, count) = self
            .store
            .grant(&mut txn, &club, ctx.user_id, ClubRole::Owner)
            .await?;
        tx::commit(txn).await?;
        club.member_count = count;

        info!(
            club_id = %club.id,
            name = %club.name,
            owner_id = %ctx.user_id,
            "Club created"
        );
        events::emit(
            &self.publisher,
            Some(ctx.user_id),
            EventPayload::Club(ClubEvent::Created {
                club_id: club.id,
                name: club.name.clone(),
                owner_id: ctx.user_id,
            }),
        )
        .await;
        events::emit(
            &self.publisher,
            Some(ctx.user_id),
            EventPayload::Membership(MembershipEvent::Created {
                club_id: club.id,
                user_id: ctx.user_id,
                role: ClubRole::Owner.to_string(),
                via: "owner".to_string(),
            }),
        )
        .await;

        Ok(club)
    }

    /// Gets a club by ID. Archived clubs remain readable.
    pub async fn get(&self, club_id: Uuid) -> Result<Club, AppError> {
        self.clubs
            .find_by_id(club_id)
            .await?
            .ok_or_else(|| AppError::club_not_found("Club not found"))
    }

    /// Updates a club's settings (admin-gated).
    ///
    /// The cap-changing path runs with the club row locked so the
    /// member count it validates against cannot move under a concurrent
    /// grant; `max_members` never ends up below the actual count.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        club_id: Uuid,
        patch: ClubPatch,
    ) -> Result<Club, AppError> {
        self.get(club_id).await?;
        self.store
            .require_rank(club_id, ctx.user_id, ClubRole::Admin)
            .await?;

        let changed_fields = patch.changed_fields();

        let new_name = match patch.name {
            Some(name) => {
                let name = name.trim().to_string();
                Club::validate_name(&name)?;
                if self.clubs.name_exists(&name, Some(club_id)).await? {
                    return Err(AppError::club_already_exists(
                        "A club with this name already exists",
                    ));
                }
                Some(name)
            }
            None => None,
        };

        let mut txn = tx::begin(&self.pool).await?;

        let mut club = self.store.locked_club(&mut txn, club_id).await?;
        if club.is_archived {
            return Err(AppError::club_archived("Archived clubs cannot be updated"));
        }

        if let Some(name) = new_name {
            club.name = name;
        }
        if let Some(description) = patch.description {
            club.description = description;
        }
        if let Some(visibility) = patch.visibility {
            club.visibility = visibility;
        }
        if let Some(auto_approve) = patch.auto_approve {
            club.auto_approve = auto_approve;
        }
        if let Some(member_invites_allowed) = patch.member_invites_allowed {
            club.member_invites_allowed = member_invites_allowed;
        }
        if let Some(max_members) = patch.max_members {
            if let Some(cap) = max_members {
                if cap < club.member_count {
                    return Err(AppError::validation(
                        "max_members cannot be below the current member count",
                    ));
                }
            }
            club.max_members = max_members;
        }
        if let Some(listed_in_directory) = patch.listed_in_directory {
            club.listed_in_directory = listed_in_directory;
        }

        let updated = self.clubs.update(&mut txn, &club).await?;
        tx::commit(txn).await?;

        info!(
            club_id = %club_id,
            actor_id = %ctx.user_id,
            changed = ?changed_fields,
            "Club updated"
        );
        events::emit(
            &self.publisher,
            Some(ctx.user_id),
            EventPayload::Club(ClubEvent::Updated {
                club_id,
                changed_fields,
            }),
        )
        .await;

        Ok(updated)
    }

    /// Transfers ownership to another existing member.
    ///
    /// Atomically demotes the current owner to `admin` and promotes the
    /// target to `owner`; exactly one owner exists before and after.
    pub async fn transfer_ownership(
        &self,
        ctx: &RequestContext,
        club_id: Uuid,
        new_owner_id: Uuid,
    ) -> Result<Club, AppError> {
        if new_owner_id == ctx.user_id {
            return Err(AppError::cannot_transfer_to_self(
                "Ownership is already held by this user",
            ));
        }

        let mut txn = tx::begin(&self.pool).await?;

        let club = self.store.locked_club(&mut txn, club_id).await?;
        if club.is_archived {
            return Err(AppError::club_archived(
                "Archived clubs reject membership changes",
            ));
        }
        let actor = self
            .members
            .find_in_tx(&mut txn, club_id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::forbidden("You are not a member of this club"))?;
        if !actor.role.is_owner() {
            return Err(AppError::forbidden(
                "Only the owner can transfer ownership",
            ));
        }
        self.members
            .find_in_tx(&mut txn, club_id, new_owner_id)
            .await?
            .ok_or_else(|| {
                AppError::member_not_found("The new owner must already be a member of the club")
            })?;

        // Demote-then-promote inside the same transaction keeps the
        // one-owner invariant unobservable in any intermediate state.
        self.members
            .update_role(&mut txn, club_id, ctx.user_id, ClubRole::Admin)
            .await?;
        self.members
            .update_role(&mut txn, club_id, new_owner_id, ClubRole::Owner)
            .await?;
        self.clubs.set_owner(&mut txn, club_id, new_owner_id).await?;
        tx::commit(txn).await?;

        info!(
            club_id = %club_id,
            previous_owner_id = %ctx.user_id,
            new_owner_id = %new_owner_id,
            "Ownership transferred"
        );
        events::emit(
            &self.publisher,
            Some(ctx.user_id),
            EventPayload::Membership(MembershipEvent::OwnershipTransferred {
                club_id,
                previous_owner_id: ctx.user_id,
                new_owner_id,
            }),
        )
        .await;

        self.get(club_id).await
    }

    /// Archives a club (owner-only). Archived clubs reject all
    /// membership-mutating operations but remain readable.
    pub async fn archive(&self, ctx: &RequestContext, club_id: Uuid) -> Result<(), AppError> {
        let club = self.get(club_id).await?;
        self.store
            .require_rank(club_id, ctx.user_id, ClubRole::Owner)
            .await?;
        if club.is_archived {
            return Ok(());
        }

        self.clubs.set_archived(club_id).await?;

        info!(club_id = %club_id, actor_id = %ctx.user_id, "Club archived");
        events::emit(
            &self.publisher,
            Some(ctx.user_id),
            EventPayload::Club(ClubEvent::Archived { club_id }),
        )
        .await;

        Ok(())
    }

    /// Returns the club's live invite code for sharing.
    ///
    /// Admins and the owner always see the code; regular members only when
    /// the club allows member invites.
    pub async fn invite_code(
        &self,
        ctx: &RequestContext,
        club_id: Uuid,
    ) -> Result<Option<String>, AppError> {
        let club = self.get(club_id).await?;
        let membership = self
            .store
            .require_rank(club_id, ctx.user_id, ClubRole::Member)
            .await?;
        if membership.role < ClubRole::Admin && !club.member_invites_allowed {
            return Err(AppError::forbidden(
                "Invite sharing by members is disabled for this club",
            ));
        }
        Ok(club.invite_code)
    }

    /// Regenerates the club's invite code (admin-gated).
    ///
    /// The new code replaces the old one in a single update, so the old
    /// code stops working the moment this returns.
    pub async fn regenerate_invite_code(
        &self,
        ctx: &RequestContext,
        club_id: Uuid,
    ) -> Result<String, AppError> {
        let club = self.get(club_id).await?;
        self.store
            .require_rank(club_id, ctx.user_id, ClubRole::Admin)
            .await?;
        if club.is_archived {
            return Err(AppError::club_archived(
                "Archived clubs cannot issue invite codes",
            ));
        }

        for _ in 0..self.invite_config.max_generate_attempts {
            let code = self.code_generator.generate();
            if self.clubs.set_invite_code(club_id, &code).await? {
                info!(club_id = %club_id, actor_id = %ctx.user_id, "Invite code regenerated");
                events::emit(
                    &self.publisher,
                    Some(ctx.user_id),
                    EventPayload::Club(ClubEvent::InviteCodeRegenerated { club_id }),
                )
                .await;
                return Ok(code);
            }
        }

        Err(AppError::internal(
            "Failed to generate a unique invite code",
        ))
    }
}
