//! Ban domain entities.

pub mod model;

pub use model::Ban;
