//! Invite code generation and redemption.

pub mod code;
pub mod service;

pub use code::InviteCodeGenerator;
pub use service::InviteService;
