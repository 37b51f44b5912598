use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::accounts::AdminId;
use crate::users::UserId;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PostId(pub String);

/// Review state of a community post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModerationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ModerationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ModerationStatus::Pending => "PENDING",
            ModerationStatus::Approved => "APPROVED",
            ModerationStatus::Rejected => "REJECTED",
        }
    }
}

/// Community post with its moderation state and soft-delete overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub author_id: UserId,
    pub title: String,
    pub content: String,
    pub moderation_status: ModerationStatus,
    pub is_active: bool,
    pub is_deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
    pub moderated_by: Option<AdminId>,
    pub moderated_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// A freshly submitted post awaiting review.
    pub fn submitted(
        id: PostId,
        author_id: UserId,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id,
            author_id,
            title: title.into(),
            content: content.into(),
            moderation_status: ModerationStatus::Pending,
            is_active: false,
            is_deleted: false,
            deleted_at: None,
            rejection_reason: None,
            moderated_by: None,
            moderated_at: None,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostVote {
    pub post_id: PostId,
    pub user_id: UserId,
    pub value: i8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostReport {
    pub post_id: PostId,
    pub reporter_id: UserId,
    pub reason: String,
}

/// Number of vote and report rows attached to a post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DependentCounts {
    pub votes: usize,
    pub reports: usize,
}

/// `GET /api/posts` query parameters.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub status: Option<ModerationStatus>,
    pub search: Option<String>,
    pub is_deleted: Option<bool>,
}

impl PostQuery {
    /// Soft-deleted posts only appear when `isDeleted=true` is requested.
    pub fn accepts(&self, post: &Post) -> bool {
        if post.is_deleted != self.is_deleted.unwrap_or(false) {
            return false;
        }
        if let Some(status) = self.status {
            if post.moderation_status != status {
                return false;
            }
        }
        match self.search.as_deref().map(str::trim) {
            Some(needle) if !needle.is_empty() => {
                let needle = needle.to_lowercase();
                post.title.to_lowercase().contains(&needle)
                    || post.content.to_lowercase().contains(&needle)
            }
            _ => true,
        }
    }
}

/// Optional body for reject and delete actions.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModerationRequest {
    pub reason: Option<String>,
}

impl ModerationRequest {
    pub fn into_reason(self) -> Option<String> {
        self.reason
            .map(|reason| reason.trim().to_string())
            .filter(|reason| !reason.is_empty())
    }
}
