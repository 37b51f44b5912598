use super::domain::{Admin, AdminId};
use crate::storage::RepositoryError;

/// Storage abstraction for console operators.
pub trait AdminRepository: Send + Sync {
    /// Fails with [`RepositoryError::Conflict`] when the e-mail is already registered.
    fn insert(&self, admin: Admin) -> Result<Admin, RepositoryError>;
    /// Inserts only while no admin exists, checking and writing under one lock.
    /// Returns `None` when the roster is already populated.
    fn insert_if_empty(&self, admin: Admin) -> Result<Option<Admin>, RepositoryError>;
    fn update(&self, admin: Admin) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &AdminId) -> Result<Option<Admin>, RepositoryError>;
    fn find_by_email(&self, email: &str) -> Result<Option<Admin>, RepositoryError>;
    fn all(&self) -> Result<Vec<Admin>, RepositoryError>;
    fn count(&self) -> Result<usize, RepositoryError>;
}
