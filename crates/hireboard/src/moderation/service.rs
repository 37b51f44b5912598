use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::domain::{DependentCounts, Post, PostId, PostQuery};
use super::repository::PostRepository;
use super::state::TransitionError;
use crate::accounts::AdminId;
use crate::api::{Page, PageRequest};
use crate::audit::{AuditAction, AuditError, AuditLog, AuditRecord, AuditTarget};
use crate::storage::RepositoryError;

/// Applies admin moderation actions to posts and records each one in the audit log.
pub struct ModerationService<P, L> {
    posts: Arc<P>,
    audit: Arc<L>,
}

impl<P, L> ModerationService<P, L>
where
    P: PostRepository + 'static,
    L: AuditLog + 'static,
{
    pub fn new(posts: Arc<P>, audit: Arc<L>) -> Self {
        Self { posts, audit }
    }

    pub fn list(
        &self,
        query: &PostQuery,
        page: PageRequest,
    ) -> Result<Page<Post>, ModerationError> {
        let posts = self
            .posts
            .all()?
            .into_iter()
            .filter(|post| query.accepts(post))
            .collect();
        Ok(page.paginate(posts))
    }

    pub fn get(&self, id: &PostId) -> Result<Post, ModerationError> {
        self.posts
            .fetch(id)?
            .ok_or_else(|| ModerationError::NotFound(id.0.clone()))
    }

    pub fn approve(&self, actor: &AdminId, id: &PostId) -> Result<Post, ModerationError> {
        let mut post = self.get(id)?;
        post.approve(actor, Utc::now())?;
        self.posts.update(post.clone())?;
        self.record(actor, AuditAction::Approve, id, None)?;

        info!(admin_id = %actor.0, post_id = %id.0, "post approved");
        Ok(post)
    }

    pub fn reject(
        &self,
        actor: &AdminId,
        id: &PostId,
        reason: Option<String>,
    ) -> Result<Post, ModerationError> {
        let mut post = self.get(id)?;
        post.reject(actor, reason.clone(), Utc::now())?;
        self.posts.update(post.clone())?;
        self.record(actor, AuditAction::Reject, id, reason)?;

        info!(admin_id = %actor.0, post_id = %id.0, "post rejected");
        Ok(post)
    }

    /// Hides the post; the row and its dependents are kept.
    pub fn soft_delete(
        &self,
        actor: &AdminId,
        id: &PostId,
        reason: Option<String>,
    ) -> Result<Post, ModerationError> {
        let mut post = self.get(id)?;
        post.soft_delete(Utc::now())?;
        self.posts.update(post.clone())?;
        self.record(actor, AuditAction::Delete, id, reason)?;

        info!(admin_id = %actor.0, post_id = %id.0, "post soft deleted");
        Ok(post)
    }

    pub fn restore(&self, actor: &AdminId, id: &PostId) -> Result<Post, ModerationError> {
        let mut post = self.get(id)?;
        post.restore()?;
        self.posts.update(post.clone())?;
        self.record(actor, AuditAction::Restore, id, None)?;

        info!(admin_id = %actor.0, post_id = %id.0, "post restored");
        Ok(post)
    }

    /// Irreversibly removes the post with its votes and reports.
    ///
    /// The audit record is appended before the purge so the trail survives the
    /// delete. The two writes are not atomic: if the purge fails the audit log
    /// still holds a PERMANENT_DELETE entry for a post that exists.
    pub fn permanent_delete(
        &self,
        actor: &AdminId,
        id: &PostId,
        reason: Option<String>,
    ) -> Result<DependentCounts, ModerationError> {
        self.get(id)?;
        self.record(actor, AuditAction::PermanentDelete, id, reason)?;

        let removed = self.posts.purge(id).map_err(|err| {
            warn!(post_id = %id.0, error = %err, "purge failed after audit record was written");
            err
        })?;

        info!(
            admin_id = %actor.0,
            post_id = %id.0,
            votes = removed.votes,
            reports = removed.reports,
            "post permanently deleted"
        );
        Ok(removed)
    }

    fn record(
        &self,
        actor: &AdminId,
        action: AuditAction,
        id: &PostId,
        reason: Option<String>,
    ) -> Result<(), AuditError> {
        self.audit.append(AuditRecord::new(
            actor.clone(),
            action,
            AuditTarget::Post(id.clone()),
            reason,
        ))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ModerationError {
    #[error("post {0} not found")]
    NotFound(String),
    #[error(transparent)]
    InvalidTransition(#[from] TransitionError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Audit(#[from] AuditError),
}
