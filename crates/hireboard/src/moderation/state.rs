//! Moderation transitions applied to a loaded [`Post`].
//!
//! `moderation_status` only moves out of `PENDING`; `is_deleted` is an
//! overlay that can be toggled from any status.

use chrono::{DateTime, Utc};

use super::domain::{ModerationStatus, Post};
use crate::accounts::AdminId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("post is already {}", .0.label())]
    AlreadyModerated(ModerationStatus),
    #[error("post has been deleted")]
    Deleted,
    #[error("post is not deleted")]
    NotDeleted,
}

impl Post {
    pub fn approve(&mut self, admin: &AdminId, at: DateTime<Utc>) -> Result<(), TransitionError> {
        self.ensure_reviewable()?;
        self.moderation_status = ModerationStatus::Approved;
        self.is_active = true;
        self.rejection_reason = None;
        self.stamp(admin, at);
        Ok(())
    }

    pub fn reject(
        &mut self,
        admin: &AdminId,
        reason: Option<String>,
        at: DateTime<Utc>,
    ) -> Result<(), TransitionError> {
        self.ensure_reviewable()?;
        self.moderation_status = ModerationStatus::Rejected;
        self.is_active = false;
        self.rejection_reason = reason;
        self.stamp(admin, at);
        Ok(())
    }

    pub fn soft_delete(&mut self, at: DateTime<Utc>) -> Result<(), TransitionError> {
        if self.is_deleted {
            return Err(TransitionError::Deleted);
        }
        self.is_deleted = true;
        self.deleted_at = Some(at);
        Ok(())
    }

    pub fn restore(&mut self) -> Result<(), TransitionError> {
        if !self.is_deleted {
            return Err(TransitionError::NotDeleted);
        }
        self.is_deleted = false;
        self.deleted_at = None;
        Ok(())
    }

    fn ensure_reviewable(&self) -> Result<(), TransitionError> {
        if self.is_deleted {
            return Err(TransitionError::Deleted);
        }
        match self.moderation_status {
            ModerationStatus::Pending => Ok(()),
            status => Err(TransitionError::AlreadyModerated(status)),
        }
    }

    fn stamp(&mut self, admin: &AdminId, at: DateTime<Utc>) {
        self.moderated_by = Some(admin.clone());
        self.moderated_at = Some(at);
    }
}
