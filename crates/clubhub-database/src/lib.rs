//! # clubhub-database
//!
//! PostgreSQL connection management and concrete repository
//! implementations for all ClubHub entities.
//!
//! Read paths run against the shared pool; every write that participates
//! in a multi-entity atomic unit takes `&mut PgConnection` so services can
//! compose repositories inside one transaction.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
