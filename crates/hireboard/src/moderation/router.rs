use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::{delete, get, put};
use axum::Router;

use super::domain::{DependentCounts, ModerationRequest, Post, PostId, PostQuery};
use super::repository::PostRepository;
use super::service::{ModerationError, ModerationService};
use crate::accounts::AdminRole;
use crate::api::{ApiError, ApiResponse, OptionalJson, Page, PageRequest};
use crate::audit::AuditLog;
use crate::auth::AdminSession;

type SharedService<P, L> = State<Arc<ModerationService<P, L>>>;

/// Post moderation endpoints for console admins.
pub fn moderation_router<P, L>(service: Arc<ModerationService<P, L>>) -> Router
where
    P: PostRepository + 'static,
    L: AuditLog + 'static,
{
    Router::new()
        .route("/api/posts", get(list_handler::<P, L>))
        .route(
            "/api/posts/:post_id",
            get(get_handler::<P, L>).delete(soft_delete_handler::<P, L>),
        )
        .route("/api/posts/:post_id/approve", put(approve_handler::<P, L>))
        .route("/api/posts/:post_id/reject", put(reject_handler::<P, L>))
        .route("/api/posts/:post_id/restore", put(restore_handler::<P, L>))
        .route(
            "/api/posts/:post_id/permanent",
            delete(permanent_delete_handler::<P, L>),
        )
        .with_state(service)
}

pub(crate) async fn list_handler<P, L>(
    State(service): SharedService<P, L>,
    _session: AdminSession,
    Query(query): Query<PostQuery>,
) -> Result<ApiResponse<Page<Post>>, ApiError>
where
    P: PostRepository + 'static,
    L: AuditLog + 'static,
{
    let page = PageRequest::new(query.page, query.limit)?;
    Ok(ApiResponse::ok(service.list(&query, page)?))
}

pub(crate) async fn get_handler<P, L>(
    State(service): SharedService<P, L>,
    _session: AdminSession,
    Path(post_id): Path<String>,
) -> Result<ApiResponse<Post>, ApiError>
where
    P: PostRepository + 'static,
    L: AuditLog + 'static,
{
    Ok(ApiResponse::ok(service.get(&PostId(post_id))?))
}

pub(crate) async fn approve_handler<P, L>(
    State(service): SharedService<P, L>,
    session: AdminSession,
    Path(post_id): Path<String>,
) -> Result<ApiResponse<Post>, ApiError>
where
    P: PostRepository + 'static,
    L: AuditLog + 'static,
{
    let post = service.approve(&session.admin_id, &PostId(post_id))?;
    Ok(ApiResponse::ok(post).with_message("post approved"))
}

pub(crate) async fn reject_handler<P, L>(
    State(service): SharedService<P, L>,
    session: AdminSession,
    Path(post_id): Path<String>,
    OptionalJson(body): OptionalJson<ModerationRequest>,
) -> Result<ApiResponse<Post>, ApiError>
where
    P: PostRepository + 'static,
    L: AuditLog + 'static,
{
    let reason = reason_from(body);
    let post = service.reject(&session.admin_id, &PostId(post_id), reason)?;
    Ok(ApiResponse::ok(post).with_message("post rejected"))
}

pub(crate) async fn soft_delete_handler<P, L>(
    State(service): SharedService<P, L>,
    session: AdminSession,
    Path(post_id): Path<String>,
    OptionalJson(body): OptionalJson<ModerationRequest>,
) -> Result<ApiResponse<Post>, ApiError>
where
    P: PostRepository + 'static,
    L: AuditLog + 'static,
{
    let reason = reason_from(body);
    let post = service.soft_delete(&session.admin_id, &PostId(post_id), reason)?;
    Ok(ApiResponse::ok(post).with_message("post deleted"))
}

pub(crate) async fn restore_handler<P, L>(
    State(service): SharedService<P, L>,
    session: AdminSession,
    Path(post_id): Path<String>,
) -> Result<ApiResponse<Post>, ApiError>
where
    P: PostRepository + 'static,
    L: AuditLog + 'static,
{
    let post = service.restore(&session.admin_id, &PostId(post_id))?;
    Ok(ApiResponse::ok(post).with_message("post restored"))
}

pub(crate) async fn permanent_delete_handler<P, L>(
    State(service): SharedService<P, L>,
    session: AdminSession,
    Path(post_id): Path<String>,
    OptionalJson(body): OptionalJson<ModerationRequest>,
) -> Result<ApiResponse<DependentCounts>, ApiError>
where
    P: PostRepository + 'static,
    L: AuditLog + 'static,
{
    session.require(AdminRole::SuperAdmin)?;
    let reason = reason_from(body);
    let removed = service.permanent_delete(&session.admin_id, &PostId(post_id), reason)?;
    Ok(ApiResponse::ok(removed).with_message("post permanently deleted"))
}

fn reason_from(body: Option<ModerationRequest>) -> Option<String> {
    body.and_then(ModerationRequest::into_reason)
}

impl From<ModerationError> for ApiError {
    fn from(value: ModerationError) -> Self {
        match value {
            ModerationError::NotFound(_) => ApiError::NotFound("post not found".into()),
            ModerationError::InvalidTransition(err) => ApiError::BadRequest(err.to_string()),
            ModerationError::Repository(err) => err.into(),
            ModerationError::Audit(err) => ApiError::Internal(err.to_string()),
        }
    }
}
