use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::domain::{User, UserId, UserQuery};
use super::repository::UserRepository;
use crate::accounts::AdminId;
use crate::api::{Page, PageRequest};
use crate::audit::{AuditAction, AuditError, AuditLog, AuditRecord, AuditTarget};
use crate::storage::RepositoryError;

/// Block, unblock, and soft delete member accounts on behalf of an admin.
pub struct UserAdminService<U, L> {
    users: Arc<U>,
    audit: Arc<L>,
}

impl<U, L> UserAdminService<U, L>
where
    U: UserRepository + 'static,
    L: AuditLog + 'static,
{
    pub fn new(users: Arc<U>, audit: Arc<L>) -> Self {
        Self { users, audit }
    }

    pub fn list(&self, query: &UserQuery, page: PageRequest) -> Result<Page<User>, UserAdminError> {
        let users = self
            .users
            .all()?
            .into_iter()
            .filter(|user| query.accepts(user))
            .collect();
        Ok(page.paginate(users))
    }

    pub fn block(
        &self,
        actor: &AdminId,
        id: &UserId,
        reason: Option<String>,
    ) -> Result<User, UserAdminError> {
        let mut user = self.load_live(id)?;
        if user.is_blocked {
            return Err(UserAdminError::InvalidState("user is already blocked"));
        }

        user.is_blocked = true;
        user.blocked_reason = reason.clone();
        self.users.update(user.clone())?;
        self.record(actor, AuditAction::BlockUser, id, reason)?;

        info!(admin_id = %actor.0, user_id = %id.0, "user blocked");
        Ok(user)
    }

    pub fn unblock(&self, actor: &AdminId, id: &UserId) -> Result<User, UserAdminError> {
        let mut user = self.load_live(id)?;
        if !user.is_blocked {
            return Err(UserAdminError::InvalidState("user is not blocked"));
        }

        user.is_blocked = false;
        user.blocked_reason = None;
        self.users.update(user.clone())?;
        self.record(actor, AuditAction::UnblockUser, id, None)?;

        info!(admin_id = %actor.0, user_id = %id.0, "user unblocked");
        Ok(user)
    }

    /// Soft delete; the account row is kept with `is_deleted` set.
    pub fn delete(&self, actor: &AdminId, id: &UserId) -> Result<User, UserAdminError> {
        let mut user = self.load_live(id)?;
        user.is_deleted = true;
        user.deleted_at = Some(Utc::now());
        self.users.update(user.clone())?;
        self.record(actor, AuditAction::DeleteUser, id, None)?;

        info!(admin_id = %actor.0, user_id = %id.0, "user deleted");
        Ok(user)
    }

    fn load_live(&self, id: &UserId) -> Result<User, UserAdminError> {
        let user = self
            .users
            .fetch(id)?
            .ok_or_else(|| UserAdminError::NotFound(id.0.clone()))?;
        if user.is_deleted {
            return Err(UserAdminError::InvalidState("user has been deleted"));
        }
        Ok(user)
    }

    fn record(
        &self,
        actor: &AdminId,
        action: AuditAction,
        id: &UserId,
        reason: Option<String>,
    ) -> Result<(), AuditError> {
        self.audit.append(AuditRecord::new(
            actor.clone(),
            action,
            AuditTarget::User(id.clone()),
            reason,
        ))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum UserAdminError {
    #[error("user {0} not found")]
    NotFound(String),
    #[error("{0}")]
    InvalidState(&'static str),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Audit(#[from] AuditError),
}
