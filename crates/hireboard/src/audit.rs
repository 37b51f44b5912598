//! Append-only trail of admin actions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::accounts::AdminId;
use crate::moderation::PostId;
use crate::storage::new_id;
use crate::users::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    Approve,
    Reject,
    Delete,
    Restore,
    PermanentDelete,
    BlockUser,
    UnblockUser,
    DeleteUser,
    CreateAdmin,
    ActivateAdmin,
    DeactivateAdmin,
}

/// Entity an audit record refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditTarget {
    Post(PostId),
    User(UserId),
    Admin(AdminId),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRecord {
    pub id: String,
    pub admin_id: AdminId,
    pub action: AuditAction,
    pub target: AuditTarget,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl AuditRecord {
    pub fn new(
        admin_id: AdminId,
        action: AuditAction,
        target: AuditTarget,
        reason: Option<String>,
    ) -> Self {
        Self {
            id: new_id("audit"),
            admin_id,
            action,
            target,
            reason,
            created_at: Utc::now(),
        }
    }
}

/// Append-only sink for audit records.
pub trait AuditLog: Send + Sync {
    fn append(&self, record: AuditRecord) -> Result<(), AuditError>;
    /// Most recent records first.
    fn recent(&self, limit: usize) -> Result<Vec<AuditRecord>, AuditError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("audit log unavailable: {0}")]
    Unavailable(String),
}
