//! # clubhub-core
//!
//! Core crate for the ClubHub membership engine. Contains configuration
//! schemas, pagination types, domain events, boundary traits, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other ClubHub crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorCode, ErrorKind};
pub use result::AppResult;
