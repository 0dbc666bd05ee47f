//! Repository implementations for all ClubHub entities.

pub mod ban;
pub mod club;
pub mod join_request;
pub mod membership;

pub use ban::BanRepository;
pub use club::ClubRepository;
pub use join_request::JoinRequestRepository;
pub use membership::MembershipRepository;

/// Return whether a sqlx error is a unique-constraint violation.
///
/// Unique indexes are the arbiter for concurrent duplicate inserts; the
/// repositories translate violations into the corresponding Conflict-class
/// domain error instead of a generic database error.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}
