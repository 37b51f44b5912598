//! Persistence seams shared by the console services.
//!
//! Each service depends on a narrow repository trait; [`memory`] provides the process-local
//! implementations used by the API binary and the test suites.

pub mod memory;

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

pub(crate) fn new_id(prefix: &str) -> String {
    format!("{prefix}-{}", uuid::Uuid::new_v4().simple())
}
