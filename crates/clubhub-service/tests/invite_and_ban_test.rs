//! Integration tests for invite code redemption and the ban registry.

mod helpers;

use clubhub_core::error::ErrorCode;
use clubhub_entity::club::ClubPatch;
use clubhub_entity::membership::ClubRole;
use clubhub_service::JoinOutcome;

#[tokio::test]
async fn test_redeem_invite_code_grants_membership_once() {
    let Some(engine) = helpers::TestEngine::new().await else {
        return;
    };

    let owner = engine.register_user();
    let guest = engine.register_user();
    let club = engine.create_club(&owner, false, None).await;
    let code = engine
        .clubs
        .regenerate_invite_code(&owner, club.id)
        .await
        .unwrap();

    let (joined, role) = engine.invites.redeem(&guest, &code).await.unwrap();
    assert_eq!(joined.id, club.id);
    assert_eq!(role, ClubRole::Member);

    // A second redemption by the same user is a conflict, not a no-op.
    let err = engine.invites.redeem(&guest, &code).await.unwrap_err();
    assert!(err.is_code(ErrorCode::MemberAlreadyExists));
    assert_eq!(engine.member_count(club.id).await, 2);
}

#[tokio::test]
async fn test_redemption_bypasses_manual_approval() {
    let Some(engine) = helpers::TestEngine::new().await else {
        return;
    };

    let owner = engine.register_user();
    let guest = engine.register_user();
    // auto_approve is off; the code is an explicit invitation.
    let club = engine.create_club(&owner, false, None).await;
    let code = engine
        .clubs
        .regenerate_invite_code(&owner, club.id)
        .await
        .unwrap();

    engine.invites.redeem(&guest, &code).await.unwrap();
    assert!(
        engine
            .memberships
            .get_membership(club.id, guest.user_id)
            .await
            .unwrap()
            .is_some()
    );
}

#[tokio::test]
async fn test_redemption_purges_pending_request() {
    let Some(engine) = helpers::TestEngine::new().await else {
        return;
    };

    let owner = engine.register_user();
    let guest = engine.register_user();
    let club = engine.create_club(&owner, false, None).await;

    let JoinOutcome::Pending(request) = engine
        .join_requests
        .create(&guest, club.id, None)
        .await
        .unwrap()
    else {
        panic!("expected pending outcome");
    };

    let code = engine
        .clubs
        .regenerate_invite_code(&owner, club.id)
        .await
        .unwrap();
    engine.invites.redeem(&guest, &code).await.unwrap();

    // The grant swept the pending request; a membership and a pending
    // request for the same pair never coexist.
    let pending: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM join_requests \
         WHERE club_id = $1 AND user_id = $2 AND status = 'pending'",
    )
    .bind(club.id)
    .bind(guest.user_id)
    .fetch_one(&engine.pool)
    .await
    .unwrap();
    assert_eq!(pending, 0);

    let err = engine
        .join_requests
        .approve(&owner, request.id)
        .await
        .unwrap_err();
    assert!(err.is_code(ErrorCode::RequestNotFound));
}

#[tokio::test]
async fn test_invite_code_sharing_follows_club_setting() {
    let Some(engine) = helpers::TestEngine::new().await else {
        return;
    };

    let owner = engine.register_user();
    let member = engine.register_user();
    let club = engine.create_club(&owner, true, None).await;
    engine
        .join_requests
        .create(&member, club.id, None)
        .await
        .unwrap();
    let code = engine
        .clubs
        .regenerate_invite_code(&owner, club.id)
        .await
        .unwrap();

    // Member sharing is on by default.
    assert_eq!(
        engine.clubs.invite_code(&member, club.id).await.unwrap(),
        Some(code.clone())
    );

    let patch = ClubPatch {
        member_invites_allowed: Some(false),
        ..Default::default()
    };
    engine.clubs.update(&owner, club.id, patch).await.unwrap();

    // Regular members lose access; the owner keeps it.
    let err = engine
        .clubs
        .invite_code(&member, club.id)
        .await
        .unwrap_err();
    assert!(err.is_code(ErrorCode::Forbidden));
    assert_eq!(
        engine.clubs.invite_code(&owner, club.id).await.unwrap(),
        Some(code)
    );

    // Non-members never see the code.
    let outsider = engine.register_user();
    let err = engine
        .clubs
        .invite_code(&outsider, club.id)
        .await
        .unwrap_err();
    assert!(err.is_code(ErrorCode::Forbidden));
}

#[tokio::test]
async fn test_regeneration_invalidates_previous_code() {
    let Some(engine) = helpers::TestEngine::new().await else {
        return;
    };

    let owner = engine.register_user();
    let guest = engine.register_user();
    let club = engine.create_club(&owner, false, None).await;

    let old_code = engine
        .clubs
        .regenerate_invite_code(&owner, club.id)
        .await
        .unwrap();
    let new_code = engine
        .clubs
        .regenerate_invite_code(&owner, club.id)
        .await
        .unwrap();
    assert_ne!(old_code, new_code);

    let err = engine.invites.redeem(&guest, &old_code).await.unwrap_err();
    assert!(err.is_code(ErrorCode::InvalidCode));
    engine.invites.redeem(&guest, &new_code).await.unwrap();
}

#[tokio::test]
async fn test_unknown_code_is_invalid() {
    let Some(engine) = helpers::TestEngine::new().await else {
        return;
    };

    let guest = engine.register_user();
    let err = engine
        .invites
        .redeem(&guest, "NOSUCHCODE")
        .await
        .unwrap_err();
    assert!(err.is_code(ErrorCode::InvalidCode));
}

#[tokio::test]
async fn test_ban_removes_membership_and_blocks_reentry() {
    let Some(engine) = helpers::TestEngine::new().await else {
        return;
    };

    let owner = engine.register_user();
    let target = engine.register_user();
    let club = engine.create_club(&owner, true, None).await;
    engine
        .join_requests
        .create(&target, club.id, None)
        .await
        .unwrap();
    assert_eq!(engine.member_count(club.id).await, 2);

    engine
        .bans
        .ban(&owner, club.id, target.user_id, Some("spam".to_string()))
        .await
        .unwrap();

    assert!(engine.bans.is_banned(club.id, target.user_id).await.unwrap());
    assert!(
        engine
            .memberships
            .get_membership(club.id, target.user_id)
            .await
            .unwrap()
            .is_none()
    );
    assert_eq!(engine.member_count(club.id).await, 1);
    assert_eq!(engine.denormalized_count(club.id).await, 1);

    // Every entry channel is closed while the ban stands.
    let err = engine
        .join_requests
        .create(&target, club.id, None)
        .await
        .unwrap_err();
    assert!(err.is_code(ErrorCode::UserBanned));

    let code = engine
        .clubs
        .regenerate_invite_code(&owner, club.id)
        .await
        .unwrap();
    let err = engine.invites.redeem(&target, &code).await.unwrap_err();
    assert!(err.is_code(ErrorCode::UserBanned));
}

#[tokio::test]
async fn test_ban_purges_pending_request() {
    let Some(engine) = helpers::TestEngine::new().await else {
        return;
    };

    let owner = engine.register_user();
    let target = engine.register_user();
    let club = engine.create_club(&owner, false, None).await;

    let JoinOutcome::Pending(request) = engine
        .join_requests
        .create(&target, club.id, None)
        .await
        .unwrap()
    else {
        panic!("expected pending outcome");
    };

    engine
        .bans
        .ban(&owner, club.id, target.user_id, None)
        .await
        .unwrap();

    // The request was swept away with the ban.
    let err = engine
        .join_requests
        .approve(&owner, request.id)
        .await
        .unwrap_err();
    assert!(err.is_code(ErrorCode::RequestNotFound));
}

#[tokio::test]
async fn test_owner_cannot_be_banned() {
    let Some(engine) = helpers::TestEngine::new().await else {
        return;
    };

    let owner = engine.register_user();
    let admin = engine.register_user();
    let club = engine.create_club(&owner, true, None).await;
    engine
        .join_requests
        .create(&admin, club.id, None)
        .await
        .unwrap();
    engine
        .memberships
        .change_role(&owner, club.id, admin.user_id, ClubRole::Admin)
        .await
        .unwrap();

    let err = engine
        .bans
        .ban(&admin, club.id, owner.user_id, None)
        .await
        .unwrap_err();
    assert!(err.is_code(ErrorCode::Forbidden));
    assert!(
        engine
            .memberships
            .get_membership(club.id, owner.user_id)
            .await
            .unwrap()
            .is_some()
    );
}

#[tokio::test]
async fn test_double_ban_is_a_conflict() {
    let Some(engine) = helpers::TestEngine::new().await else {
        return;
    };

    let owner = engine.register_user();
    let target = engine.register_user();
    let club = engine.create_club(&owner, true, None).await;

    engine
        .bans
        .ban(&owner, club.id, target.user_id, None)
        .await
        .unwrap();
    let err = engine
        .bans
        .ban(&owner, club.id, target.user_id, None)
        .await
        .unwrap_err();
    assert!(err.is_code(ErrorCode::UserBanned));
}

#[tokio::test]
async fn test_unban_is_idempotent_and_reopens_entry() {
    let Some(engine) = helpers::TestEngine::new().await else {
        return;
    };

    let owner = engine.register_user();
    let target = engine.register_user();
    let club = engine.create_club(&owner, true, None).await;

    engine
        .bans
        .ban(&owner, club.id, target.user_id, None)
        .await
        .unwrap();
    engine
        .bans
        .unban(&owner, club.id, target.user_id)
        .await
        .unwrap();
    // Lifting an absent ban is a no-op.
    engine
        .bans
        .unban(&owner, club.id, target.user_id)
        .await
        .unwrap();

    assert!(!engine.bans.is_banned(club.id, target.user_id).await.unwrap());
    let outcome = engine
        .join_requests
        .create(&target, club.id, None)
        .await
        .unwrap();
    assert!(matches!(outcome, JoinOutcome::Joined(_)));
}

#[tokio::test]
async fn test_ban_requires_admin_rank() {
    let Some(engine) = helpers::TestEngine::new().await else {
        return;
    };

    let owner = engine.register_user();
    let member = engine.register_user();
    let target = engine.register_user();
    let club = engine.create_club(&owner, true, None).await;
    engine
        .join_requests
        .create(&member, club.id, None)
        .await
        .unwrap();
    engine
        .join_requests
        .create(&target, club.id, None)
        .await
        .unwrap();

    let err = engine
        .bans
        .ban(&member, club.id, target.user_id, None)
        .await
        .unwrap_err();
    assert!(err.is_code(ErrorCode::Forbidden));
}
