use super::domain::{User, UserId};
use crate::storage::RepositoryError;

/// Storage abstraction for member accounts.
pub trait UserRepository: Send + Sync {
    fn insert(&self, user: User) -> Result<User, RepositoryError>;
    fn update(&self, user: User) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &UserId) -> Result<Option<User>, RepositoryError>;
    /// Every member ordered newest first.
    fn all(&self) -> Result<Vec<User>, RepositoryError>;
}
