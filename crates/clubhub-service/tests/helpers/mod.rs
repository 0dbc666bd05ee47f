//! Shared test helpers for integration tests.
//!
//! These tests run against a live PostgreSQL pointed to by
//! `CLUBHUB_TEST_DATABASE_URL` and skip cleanly when it is not set.

#![allow(dead_code)]

use std::sync::{Arc, Once};

use sqlx::PgPool;
use uuid::Uuid;

use clubhub_core::config::{DatabaseConfig, invite::InviteConfig};
use clubhub_database::DatabasePool;
use clubhub_database::repositories::{
    BanRepository, ClubRepository, JoinRequestRepository, MembershipRepository,
};
use clubhub_entity::club::{Club, ClubVisibility, CreateClub};
use clubhub_service::{
    BanService, ClubService, InviteService, JoinRequestService, MembershipService,
    MembershipStore, NullEventPublisher, RequestContext, StaticUserDirectory,
};

/// Fully wired engine against the test database.
pub struct TestEngine {
    /// Database pool for direct assertions.
    pub pool: PgPool,
    /// User directory; tests register actors here.
    pub directory: Arc<StaticUserDirectory>,
    /// Club lifecycle service.
    pub clubs: ClubService,
    /// Membership service.
    pub memberships: MembershipService,
    /// Join request service.
    pub join_requests: JoinRequestService,
    /// Ban service.
    pub bans: BanService,
    /// Invite service.
    pub invites: InviteService,
}

impl TestEngine {
    /// Connect and wire the engine; `None` when no test database is
    /// configured.
    pub async fn new() -> Option<Self> {
        init_tracing();
        let url = std::env::var("CLUBHUB_TEST_DATABASE_URL").ok()?;

        let database = DatabasePool::connect(&DatabaseConfig {
            url,
            max_connections: 8,
            min_connections: 1,
            connect_timeout_seconds: 10,
            idle_timeout_seconds: 300,
        })
        .await
        .expect("Failed to connect to test database");
        assert!(database.health_check().await.expect("Health check failed"));
        let pool = database.into_pool();
        clubhub_database::migration::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let clubs_repo = Arc::new(ClubRepository::new(pool.clone()));
        let members_repo = Arc::new(MembershipRepository::new(pool.clone()));
        let requests_repo = Arc::new(JoinRequestRepository::new(pool.clone()));
        let bans_repo = Arc::new(BanRepository::new(pool.clone()));
        let store = Arc::new(MembershipStore::new(
            clubs_repo.clone(),
            members_repo.clone(),
            requests_repo.clone(),
            bans_repo.clone(),
        ));
        let directory = Arc::new(StaticUserDirectory::new());
        let publisher = Arc::new(NullEventPublisher);

        let clubs = ClubService::new(
            pool.clone(),
            clubs_repo.clone(),
            members_repo.clone(),
            store.clone(),
            directory.clone(),
            publisher.clone(),
            InviteConfig::default(),
        );
        let memberships = MembershipService::new(
            pool.clone(),
            store.clone(),
            clubs_repo.clone(),
            members_repo.clone(),
            publisher.clone(),
        );
        let join_requests = JoinRequestService::new(
            pool.clone(),
            clubs_repo.clone(),
            requests_repo.clone(),
            members_repo.clone(),
            bans_repo.clone(),
            store.clone(),
            directory.clone(),
            publisher.clone(),
        );
        let bans = BanService::new(
            pool.clone(),
            clubs_repo.clone(),
            bans_repo.clone(),
            requests_repo.clone(),
            store.clone(),
            directory.clone(),
            publisher.clone(),
        );
        let invites = InviteService::new(
            pool.clone(),
            clubs_repo,
            store,
            directory.clone(),
            publisher,
        );

        Some(Self {
            pool,
            directory,
            clubs,
            memberships,
            join_requests,
            bans,
            invites,
        })
    }

    /// Register a fresh user in the directory and return its context.
    pub fn register_user(&self) -> RequestContext {
        let user_id = Uuid::new_v4();
        self.directory.add(user_id);
        RequestContext::new(user_id)
    }

    /// Create a club with the given settings, owned by `owner`.
    pub async fn create_club(
        &self,
        owner: &RequestContext,
        auto_approve: bool,
        max_members: Option<i32>,
    ) -> Club {
        self.clubs
            .create(
                owner,
                CreateClub {
                    name: unique_name("test-club"),
                    description: None,
                    visibility: ClubVisibility::Public,
                    auto_approve,
                    member_invites_allowed: true,
                    max_members,
                    listed_in_directory: true,
                },
            )
            .await
            .expect("Failed to create test club")
    }

    /// Count memberships with the `owner` role in a club.
    pub async fn owner_count(&self, club_id: Uuid) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM memberships WHERE club_id = $1 AND role = 'owner'")
            .bind(club_id)
            .fetch_one(&self.pool)
            .await
            .expect("Failed to count owners")
    }

    /// Count all memberships in a club.
    pub async fn member_count(&self, club_id: Uuid) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM memberships WHERE club_id = $1")
            .bind(club_id)
            .fetch_one(&self.pool)
            .await
            .expect("Failed to count members")
    }

    /// Read the denormalized member count from the club row.
    pub async fn denormalized_count(&self, club_id: Uuid) -> i32 {
        sqlx::query_scalar("SELECT member_count FROM clubs WHERE id = $1")
            .bind(club_id)
            .fetch_one(&self.pool)
            .await
            .expect("Failed to read member_count")
    }
}

/// Generate a unique club name.
pub fn unique_name(prefix: &str) -> String {
    format!("{prefix}-{}", &Uuid::new_v4().simple().to_string()[..12])
}

fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}
