//! Integration tests for the club lifecycle: creation, settings,
//! ownership transfer, and archival.

mod helpers;

use clubhub_core::error::{ErrorCode, ErrorKind};
use clubhub_entity::club::{ClubPatch, ClubVisibility, CreateClub};
use clubhub_entity::membership::ClubRole;
use clubhub_service::JoinOutcome;

#[tokio::test]
async fn test_create_club_installs_exactly_one_owner() {
    let Some(engine) = helpers::TestEngine::new().await else {
        return;
    };

    let owner = engine.register_user();
    let club = engine.create_club(&owner, true, None).await;

    assert_eq!(club.owner_id, owner.user_id);
    assert_eq!(club.member_count, 1);
    assert_eq!(engine.owner_count(club.id).await, 1);
    assert_eq!(engine.denormalized_count(club.id).await, 1);

    let membership = engine
        .memberships
        .get_membership(club.id, owner.user_id)
        .await
        .unwrap()
        .expect("owner membership missing");
    assert_eq!(membership.role, ClubRole::Owner);
}

#[tokio::test]
async fn test_club_names_are_unique_case_insensitively() {
    let Some(engine) = helpers::TestEngine::new().await else {
        return;
    };

    let owner = engine.register_user();
    let name = helpers::unique_name("Chess");
    let input = CreateClub {
        name: name.clone(),
        description: None,
        visibility: ClubVisibility::Public,
        auto_approve: true,
        member_invites_allowed: true,
        max_members: None,
        listed_in_directory: true,
    };
    engine.clubs.create(&owner, input.clone()).await.unwrap();

    let mut clash = input;
    clash.name = name.to_uppercase();
    let err = engine.clubs.create(&owner, clash).await.unwrap_err();
    assert!(err.is_code(ErrorCode::ClubAlreadyExists));
}

#[tokio::test]
async fn test_update_requires_admin_rank() {
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

    let patch = ClubPatch {
        description: Some(Some("new text".to_string())),
        ..Default::default()
    };
    let err = engine
        .clubs
        .update(&member, club.id, patch)
        .await
        .unwrap_err();
    assert!(err.is_code(ErrorCode::Forbidden));
}

#[tokio::test]
async fn test_member_cap_cannot_drop_below_current_count() {
    let Some(engine) = helpers::TestEngine::new().await else {
        return;
    };

    let owner = engine.register_user();
    let club = engine.create_club(&owner, true, None).await;
    for _ in 0..2 {
        let joiner = engine.register_user();
        let outcome = engine
            .join_requests
            .create(&joiner, club.id, None)
            .await
            .unwrap();
        assert!(matches!(outcome, JoinOutcome::Joined(_)));
    }

    let patch = ClubPatch {
        max_members: Some(Some(2)),
        ..Default::default()
    };
    let err = engine
        .clubs
        .update(&owner, club.id, patch)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    // A cap at the current count is fine.
    let patch = ClubPatch {
        max_members: Some(Some(3)),
        ..Default::default()
    };
    let updated = engine.clubs.update(&owner, club.id, patch).await.unwrap();
    assert_eq!(updated.max_members, Some(3));
}

#[tokio::test]
async fn test_cap_lowering_and_join_race_preserves_invariant() {
    let Some(engine) = helpers::TestEngine::new().await else {
        return;
    };

    let owner = engine.register_user();
    let club = engine.create_club(&owner, true, None).await;
    let second = engine.register_user();
    engine
        .join_requests
        .create(&second, club.id, None)
        .await
        .unwrap();

    // Race lowering the cap to the current count against a third join.
    let third = engine.register_user();
    let clubs = engine.clubs.clone();
    let joins = engine.join_requests.clone();
    let patch = ClubPatch {
        max_members: Some(Some(2)),
        ..Default::default()
    };
    let (update_res, join_res) = tokio::join!(
        clubs.update(&owner, club.id, patch),
        joins.create(&third, club.id, None),
    );

    // Whichever order the row lock picks, the cap never ends up below
    // the member count.
    let club = engine.clubs.get(club.id).await.unwrap();
    if let Some(cap) = club.max_members {
        assert!(
            cap >= club.member_count,
            "cap {cap} below member count {}",
            club.member_count
        );
    }
    match (update_res.is_ok(), join_res.is_ok()) {
        // Cap landed first: the join must have hit it.
        (true, false) => assert!(join_res.unwrap_err().is_code(ErrorCode::ClubFull)),
        // Join landed first: the cap was below the new count.
        (false, true) => assert_eq!(update_res.unwrap_err().kind, ErrorKind::Validation),
        _ => panic!("exactly one of the racing calls must succeed"),
    }
}

#[tokio::test]
async fn test_transfer_ownership_swaps_roles_atomically() {
    let Some(engine) = helpers::TestEngine::new().await else {
        return;
    };

    let owner = engine.register_user();
    let successor = engine.register_user();
    let club = engine.create_club(&owner, true, None).await;
    engine
        .join_requests
        .create(&successor, club.id, None)
        .await
        .unwrap();

    let updated = engine
        .clubs
        .transfer_ownership(&owner, club.id, successor.user_id)
        .await
        .unwrap();

    assert_eq!(updated.owner_id, successor.user_id);
    assert_eq!(engine.owner_count(club.id).await, 1);

    let former = engine
        .memberships
        .get_membership(club.id, owner.user_id)
        .await
        .unwrap()
        .expect("former owner should remain a member");
    assert_eq!(former.role, ClubRole::Admin);

    // The former owner is now removable; removing twice surfaces the miss.
    engine
        .memberships
        .remove_member(&successor, club.id, owner.user_id)
        .await
        .unwrap();
    let err = engine
        .memberships
        .remove_member(&successor, club.id, owner.user_id)
        .await
        .unwrap_err();
    assert!(err.is_code(ErrorCode::MemberNotFound));
}

#[tokio::test]
async fn test_transfer_to_self_is_rejected() {
    let Some(engine) = helpers::TestEngine::new().await else {
        return;
    };

    let owner = engine.register_user();
    let club = engine.create_club(&owner, true, None).await;

    let err = engine
        .clubs
        .transfer_ownership(&owner, club.id, owner.user_id)
        .await
        .unwrap_err();
    assert!(err.is_code(ErrorCode::CannotTransferToSelf));
}

#[tokio::test]
async fn test_transfer_requires_current_owner() {
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
        .clubs
        .transfer_ownership(&admin, club.id, owner.user_id)
        .await
        .unwrap_err();
    assert!(err.is_code(ErrorCode::Forbidden));
}

#[tokio::test]
async fn test_archived_club_rejects_mutations_but_stays_readable() {
    let Some(engine) = helpers::TestEngine::new().await else {
        return;
    };

    let owner = engine.register_user();
    let member = engine.register_user();
    let outsider = engine.register_user();
    let club = engine.create_club(&owner, true, None).await;
    engine
        .join_requests
        .create(&member, club.id, None)
        .await
        .unwrap();

    engine.clubs.archive(&owner, club.id).await.unwrap();
    // Archiving twice is a no-op.
    engine.clubs.archive(&owner, club.id).await.unwrap();

    let err = engine
        .join_requests
        .create(&outsider, club.id, None)
        .await
        .unwrap_err();
    assert!(err.is_code(ErrorCode::ClubArchived));

    let err = engine
        .memberships
        .remove_member(&owner, club.id, member.user_id)
        .await
        .unwrap_err();
    assert!(err.is_code(ErrorCode::ClubArchived));

    let err = engine
        .clubs
        .regenerate_invite_code(&owner, club.id)
        .await
        .unwrap_err();
    assert!(err.is_code(ErrorCode::ClubArchived));

    // Reads still work.
    let fetched = engine.clubs.get(club.id).await.unwrap();
    assert!(fetched.is_archived);
    let members = engine
        .memberships
        .list_members(club.id, None, Default::default())
        .await
        .unwrap();
    assert_eq!(members.meta.total, 2);
}

#[tokio::test]
async fn test_archive_requires_owner() {
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

    let err = engine.clubs.archive(&admin, club.id).await.unwrap_err();
    assert!(err.is_code(ErrorCode::Forbidden));
}
