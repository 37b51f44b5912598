use super::domain::{DependentCounts, Post, PostId, PostReport, PostVote};
use crate::storage::RepositoryError;

/// Storage abstraction for community posts and their dependent rows.
pub trait PostRepository: Send + Sync {
    fn insert(&self, post: Post) -> Result<Post, RepositoryError>;
    fn update(&self, post: Post) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &PostId) -> Result<Option<Post>, RepositoryError>;
    /// Newest posts first.
    fn all(&self) -> Result<Vec<Post>, RepositoryError>;
    fn insert_vote(&self, vote: PostVote) -> Result<(), RepositoryError>;
    fn insert_report(&self, report: PostReport) -> Result<(), RepositoryError>;
    fn dependent_counts(&self, id: &PostId) -> Result<DependentCounts, RepositoryError>;
    /// Removes the post together with its votes and reports in one step.
    /// Returns the number of dependent rows removed.
    fn purge(&self, id: &PostId) -> Result<DependentCounts, RepositoryError>;
}
