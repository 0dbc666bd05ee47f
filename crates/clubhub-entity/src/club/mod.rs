//! Club domain entities.

pub mod model;
pub mod visibility;

pub use model::{Club, ClubPatch, CreateClub};
pub use visibility::ClubVisibility;
