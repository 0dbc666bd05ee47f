//! Core type definitions used across the ClubHub workspace.

pub mod pagination;
pub mod response;

pub use pagination::{PageMeta, PageRequest, PageResponse};
pub use response::ApiErrorResponse;
