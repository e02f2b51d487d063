//! Repository Module
//!
//! Typed data access over the shared [`MemoryStore`](crate::db::MemoryStore).
//! Repositories are cheap to construct (they clone the Arc-backed store) and
//! are created per call site rather than held long-term.

pub mod item;
pub mod reservation;
pub mod user;

// Re-exports
pub use item::ItemRepository;
pub use reservation::ReservationRepository;
pub use user::UserRepository;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("In use: {0}")]
    InUse(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<validator::ValidationErrors> for RepoError {
    fn from(err: validator::ValidationErrors) -> Self {
        RepoError::Validation(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
