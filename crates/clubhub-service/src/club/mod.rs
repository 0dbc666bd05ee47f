//! Club lifecycle management.

pub mod service;

pub use service::ClubService;
