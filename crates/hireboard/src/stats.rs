//! Dashboard overview counts for the admin console.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::Router;
use serde::Serialize;

use crate::accounts::AdminRepository;
use crate::api::{ApiError, ApiResponse};
use crate::audit::{AuditError, AuditLog, AuditRecord};
use crate::auth::AdminSession;
use crate::moderation::{ModerationStatus, PostRepository};
use crate::storage::RepositoryError;
use crate::users::UserRepository;

const RECENT_ACTIONS: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserCounts {
    pub total: usize,
    pub blocked: usize,
    pub deleted: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PostCounts {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
    pub deleted: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AdminCounts {
    pub total: usize,
    pub active: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub users: UserCounts,
    pub posts: PostCounts,
    pub admins: AdminCounts,
    pub recent_actions: Vec<AuditRecord>,
}

/// Read-only aggregation across every console store.
pub struct StatsService {
    users: Arc<dyn UserRepository>,
    posts: Arc<dyn PostRepository>,
    admins: Arc<dyn AdminRepository>,
    audit: Arc<dyn AuditLog>,
}

impl StatsService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        posts: Arc<dyn PostRepository>,
        admins: Arc<dyn AdminRepository>,
        audit: Arc<dyn AuditLog>,
    ) -> Self {
        Self {
            users,
            posts,
            admins,
            audit,
        }
    }

    pub fn overview(&self) -> Result<Overview, StatsError> {
        let mut users = UserCounts::default();
        for user in self.users.all()? {
            users.total += 1;
            if user.is_deleted {
                users.deleted += 1;
            } else if user.is_blocked {
                users.blocked += 1;
            }
        }

        let mut posts = PostCounts::default();
        for post in self.posts.all()? {
            posts.total += 1;
            if post.is_deleted {
                posts.deleted += 1;
                continue;
            }
            match post.moderation_status {
                ModerationStatus::Pending => posts.pending += 1,
                ModerationStatus::Approved => posts.approved += 1,
                ModerationStatus::Rejected => posts.rejected += 1,
            }
        }

        let roster = self.admins.all()?;
        let admins = AdminCounts {
            total: roster.len(),
            active: roster.iter().filter(|admin| admin.is_active).count(),
        };

        Ok(Overview {
            users,
            posts,
            admins,
            recent_actions: self.audit.recent(RECENT_ACTIONS)?,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Audit(#[from] AuditError),
}

impl From<StatsError> for ApiError {
    fn from(value: StatsError) -> Self {
        match value {
            StatsError::Repository(err) => err.into(),
            StatsError::Audit(err) => ApiError::Internal(err.to_string()),
        }
    }
}

pub fn stats_router(service: Arc<StatsService>) -> Router {
    Router::new()
        .route("/api/stats/overview", get(overview_handler))
        .with_state(service)
}

pub(crate) async fn overview_handler(
    State(service): State<Arc<StatsService>>,
    _session: AdminSession,
) -> Result<ApiResponse<Overview>, ApiError> {
    Ok(ApiResponse::ok(service.overview()?))
}
