//! Ban registry.

pub mod service;

pub use service::BanService;
