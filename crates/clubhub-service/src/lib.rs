//! # clubhub-service
//!
//! Business logic service layer for the ClubHub membership engine. Each
//! service orchestrates repositories and boundary collaborators to
//! implement the club, membership, join-request, ban, and invite-code
//! use cases.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references. Every state transition that
//! touches more than one entity runs inside a single database transaction;
//! the shared primitives in [`membership::MembershipStore`] are the only
//! code that creates or destroys membership rows, so the cross-entity
//! exclusivity invariant cannot be bypassed by a new caller.

pub mod ban;
pub mod club;
pub mod context;
pub mod directory;
pub mod events;
pub mod invite;
pub mod join_request;
pub mod membership;

mod tx;

pub use ban::BanService;
pub use club::ClubService;
pub use context::RequestContext;
pub use directory::StaticUserDirectory;
pub use events::NullEventPublisher;
pub use invite::{InviteCodeGenerator, InviteService};
pub use join_request::{JoinOutcome, JoinRequestService};
pub use membership::{MembershipService, MembershipStore};
