//! # clubhub-entity
//!
//! Domain entity models for the ClubHub membership engine. Every struct in
//! this crate represents a database table row or a domain value object.
//! All entities derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and
//! database entities additionally derive `sqlx::FromRow`.

pub mod ban;
pub mod club;
pub mod join_request;
pub mod membership;
