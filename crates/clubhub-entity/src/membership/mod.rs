//! Membership domain entities.

pub mod model;
pub mod role;

pub use model::Membership;
pub use role::ClubRole;
