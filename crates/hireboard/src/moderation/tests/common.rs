use std::sync::Arc;

use axum::http::{header, Method, Request};
use axum::response::Response;
use axum::{Extension, Router};
use chrono::Duration;
use serde_json::Value;

use crate::accounts::{Admin, AdminId, AdminRepository, AdminRole};
use crate::auth::{Authenticator, TokenIssuer};
use crate::moderation::{
    moderation_router, DependentCounts, ModerationService, Post, PostId, PostReport,
    PostRepository, PostVote,
};
use crate::storage::memory::{MemoryAdminStore, MemoryAuditLog, MemoryPostStore};
use crate::storage::RepositoryError;
use crate::users::UserId;

pub(super) const SUPER_ADMIN: &str = "admin-root";
pub(super) const MODERATOR: &str = "admin-mod";

pub(super) fn super_admin() -> AdminId {
    AdminId(SUPER_ADMIN.to_string())
}

pub(super) fn moderator() -> AdminId {
    AdminId(MODERATOR.to_string())
}

pub(super) fn pending_post(id: &str) -> Post {
    Post::submitted(
        PostId(id.to_string()),
        UserId("user-1".to_string()),
        format!("Interview tips {id}"),
        "Research the company before the call.",
    )
}

pub(super) type Service = ModerationService<MemoryPostStore, MemoryAuditLog>;

pub(super) fn build_service() -> (Service, Arc<MemoryPostStore>, Arc<MemoryAuditLog>) {
    let posts = Arc::new(MemoryPostStore::default());
    let audit = Arc::new(MemoryAuditLog::default());
    for id in ["post-1", "post-2", "post-3"] {
        posts.insert(pending_post(id)).expect("seed post");
    }
    (
        ModerationService::new(posts.clone(), audit.clone()),
        posts,
        audit,
    )
}

pub(super) fn add_engagement(posts: &MemoryPostStore, id: &str, votes: usize, reports: usize) {
    for n in 0..votes {
        posts
            .insert_vote(PostVote {
                post_id: PostId(id.to_string()),
                user_id: UserId(format!("voter-{n}")),
                value: 1,
            })
            .expect("vote");
    }
    for n in 0..reports {
        posts
            .insert_report(PostReport {
                post_id: PostId(id.to_string()),
                reporter_id: UserId(format!("reporter-{n}")),
                reason: "off topic".to_string(),
            })
            .expect("report");
    }
}

/// Post store whose purge always fails, for exercising the audit-first ordering.
#[derive(Default)]
pub(super) struct FailingPurgeStore {
    pub(super) inner: MemoryPostStore,
}

impl PostRepository for FailingPurgeStore {
    fn insert(&self, post: Post) -> Result<Post, RepositoryError> {
        self.inner.insert(post)
    }

    fn update(&self, post: Post) -> Result<(), RepositoryError> {
        self.inner.update(post)
    }

    fn fetch(&self, id: &PostId) -> Result<Option<Post>, RepositoryError> {
        self.inner.fetch(id)
    }

    fn all(&self) -> Result<Vec<Post>, RepositoryError> {
        self.inner.all()
    }

    fn insert_vote(&self, vote: PostVote) -> Result<(), RepositoryError> {
        self.inner.insert_vote(vote)
    }

    fn insert_report(&self, report: PostReport) -> Result<(), RepositoryError> {
        self.inner.insert_report(report)
    }

    fn dependent_counts(&self, id: &PostId) -> Result<DependentCounts, RepositoryError> {
        self.inner.dependent_counts(id)
    }

    fn purge(&self, _id: &PostId) -> Result<DependentCounts, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

/// Router wired with an authenticator that knows one super admin and one moderator.
pub(super) struct Console {
    pub(super) router: Router,
    pub(super) posts: Arc<MemoryPostStore>,
    pub(super) audit: Arc<MemoryAuditLog>,
    tokens: TokenIssuer,
    admins: Arc<MemoryAdminStore>,
}

impl Console {
    pub(super) fn new() -> Self {
        let (service, posts, audit) = build_service();
        let admins = Arc::new(MemoryAdminStore::default());
        for (id, email, role) in [
            (SUPER_ADMIN, "root@example.com", AdminRole::SuperAdmin),
            (MODERATOR, "mod@example.com", AdminRole::Moderator),
        ] {
            admins
                .insert(Admin::new(
                    AdminId(id.to_string()),
                    email,
                    "Console",
                    "unused-hash".to_string(),
                    role,
                ))
                .expect("seed admin");
        }

        let tokens = TokenIssuer::new(b"moderation-tests", Duration::hours(1));
        let authenticator = Authenticator::new(Arc::new(tokens.clone()), admins.clone());
        let router = moderation_router(Arc::new(service)).layer(Extension(authenticator));

        Self {
            router,
            posts,
            audit,
            tokens,
            admins,
        }
    }

    pub(super) fn token_for(&self, id: &AdminId) -> String {
        let admin = self
            .admins
            .fetch(id)
            .expect("fetch admin")
            .expect("admin seeded");
        self.tokens.issue(&admin).expect("issue token")
    }

    pub(super) fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Request<axum::body::Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(body.to_string()))
                .expect("request"),
            None => builder.body(axum::body::Body::empty()).expect("request"),
        }
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
