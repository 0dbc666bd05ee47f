//! Boundary traits defined in `clubhub-core` and implemented by
//! surrounding collaborators.

pub mod event_publisher;
pub mod user_directory;

pub use event_publisher::EventPublisher;
pub use user_directory::UserDirectory;
