//! Membership store and member management.

pub mod service;
pub mod store;

pub use service::MembershipService;
pub use store::MembershipStore;
