use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::{delete, get, put};
use axum::Router;

use super::domain::{BlockRequest, User, UserId, UserQuery};
use super::repository::UserRepository;
use super::service::{UserAdminError, UserAdminService};
use crate::api::{ApiError, ApiResponse, OptionalJson, Page, PageRequest};
use crate::audit::AuditLog;
use crate::auth::AdminSession;

type SharedService<U, L> = State<Arc<UserAdminService<U, L>>>;

pub fn user_router<U, L>(service: Arc<UserAdminService<U, L>>) -> Router
where
    U: UserRepository + 'static,
    L: AuditLog + 'static,
{
    Router::new()
        .route("/api/users", get(list_handler::<U, L>))
        .route("/api/users/:user_id", delete(delete_handler::<U, L>))
        .route("/api/users/:user_id/block", put(block_handler::<U, L>))
        .route("/api/users/:user_id/unblock", put(unblock_handler::<U, L>))
        .with_state(service)
}

pub(crate) async fn list_handler<U, L>(
    State(service): SharedService<U, L>,
    _session: AdminSession,
    Query(query): Query<UserQuery>,
) -> Result<ApiResponse<Page<User>>, ApiError>
where
    U: UserRepository + 'static,
    L: AuditLog + 'static,
{
    let page = PageRequest::new(query.page, query.limit)?;
    Ok(ApiResponse::ok(service.list(&query, page)?))
}

pub(crate) async fn block_handler<U, L>(
    State(service): SharedService<U, L>,
    session: AdminSession,
    Path(user_id): Path<String>,
    OptionalJson(body): OptionalJson<BlockRequest>,
) -> Result<ApiResponse<User>, ApiError>
where
    U: UserRepository + 'static,
    L: AuditLog + 'static,
{
    let reason = body
        .and_then(|request| request.reason)
        .map(|reason| reason.trim().to_string())
        .filter(|reason| !reason.is_empty());
    let user = service.block(&session.admin_id, &UserId(user_id), reason)?;
    Ok(ApiResponse::ok(user).with_message("user blocked"))
}

pub(crate) async fn unblock_handler<U, L>(
    State(service): SharedService<U, L>,
    session: AdminSession,
    Path(user_id): Path<String>,
) -> Result<ApiResponse<User>, ApiError>
where
    U: UserRepository + 'static,
    L: AuditLog + 'static,
{
    let user = service.unblock(&session.admin_id, &UserId(user_id))?;
    Ok(ApiResponse::ok(user).with_message("user unblocked"))
}

pub(crate) async fn delete_handler<U, L>(
    State(service): SharedService<U, L>,
    session: AdminSession,
    Path(user_id): Path<String>,
) -> Result<ApiResponse<User>, ApiError>
where
    U: UserRepository + 'static,
    L: AuditLog + 'static,
{
    let user = service.delete(&session.admin_id, &UserId(user_id))?;
    Ok(ApiResponse::ok(user).with_message("user deleted"))
}

impl From<UserAdminError> for ApiError {
    fn from(value: UserAdminError) -> Self {
        match value {
            UserAdminError::NotFound(_) => ApiError::NotFound("user not found".into()),
            UserAdminError::InvalidState(message) => ApiError::BadRequest(message.into()),
            UserAdminError::Repository(err) => err.into(),
            UserAdminError::Audit(err) => ApiError::Internal(err.to_string()),
        }
    }
}
