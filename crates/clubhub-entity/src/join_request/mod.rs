//! Join request domain entities.

pub mod model;
pub mod status;

pub use model::JoinRequest;
pub use status::JoinRequestStatus;
