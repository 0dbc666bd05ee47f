//! Join request state machine.

pub mod service;

pub use service::{JoinOutcome, JoinRequestService};
