use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for job-board members.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub String);

/// Member account as seen by the admin console.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub is_blocked: bool,
    pub blocked_reason: Option<String>,
    pub is_deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(id: UserId, email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            name: name.into(),
            is_blocked: false,
            blocked_reason: None,
            is_deleted: false,
            deleted_at: None,
            created_at: Utc::now(),
        }
    }

    fn matches_search(&self, needle: &str) -> bool {
        self.email.to_lowercase().contains(needle) || self.name.to_lowercase().contains(needle)
    }
}

/// `GET /api/users` query parameters.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    pub is_blocked: Option<bool>,
    pub is_deleted: Option<bool>,
}

impl UserQuery {
    /// Deleted members are hidden unless `isDeleted` is given explicitly.
    pub fn accepts(&self, user: &User) -> bool {
        if user.is_deleted != self.is_deleted.unwrap_or(false) {
            return false;
        }
        if let Some(blocked) = self.is_blocked {
            if user.is_blocked != blocked {
                return false;
            }
        }
        match self.search.as_deref().map(str::trim) {
            Some(needle) if !needle.is_empty() => user.matches_search(&needle.to_lowercase()),
            _ => true,
        }
    }
}

/// Optional body accompanying a block request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlockRequest {
    pub reason: Option<String>,
}
