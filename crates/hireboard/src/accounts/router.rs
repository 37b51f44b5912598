use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use tracing::info;

use super::domain::{
    AdminId, AdminRole, AdminView, LoginRequest, LoginResponse, NewAdmin, SetupStatus,
};
use super::repository::AdminRepository;
use super::service::{AccountError, AccountService};
use crate::api::{ApiError, ApiResponse};
use crate::audit::AuditLog;
use crate::auth::AdminSession;

type SharedService<A, L> = State<Arc<AccountService<A, L>>>;

/// Setup, session, and admin management endpoints.
pub fn account_router<A, L>(service: Arc<AccountService<A, L>>) -> Router
where
    A: AdminRepository + 'static,
    L: AuditLog + 'static,
{
    Router::new()
        .route("/api/setup/status", get(setup_status_handler::<A, L>))
        .route(
            "/api/setup/create-first-admin",
            post(create_first_admin_handler::<A, L>),
        )
        .route("/api/auth/login", post(login_handler::<A, L>))
        .route("/api/auth/me", get(me_handler::<A, L>))
        .route("/api/auth/logout", post(logout_handler))
        .route(
            "/api/admins",
            get(list_admins_handler::<A, L>).post(create_admin_handler::<A, L>),
        )
        .route("/api/admins/:admin_id/activate", put(activate_handler::<A, L>))
        .route(
            "/api/admins/:admin_id/deactivate",
            put(deactivate_handler::<A, L>),
        )
        .with_state(service)
}

pub(crate) async fn setup_status_handler<A, L>(
    State(service): SharedService<A, L>,
) -> Result<ApiResponse<SetupStatus>, ApiError>
where
    A: AdminRepository + 'static,
    L: AuditLog + 'static,
{
    Ok(ApiResponse::ok(service.setup_status()?))
}

pub(crate) async fn create_first_admin_handler<A, L>(
    State(service): SharedService<A, L>,
    Json(request): Json<NewAdmin>,
) -> Result<impl IntoResponse, ApiError>
where
    A: AdminRepository + 'static,
    L: AuditLog + 'static,
{
    let admin = service.create_first_admin(request)?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::ok(admin).with_message("first admin created"),
    ))
}

pub(crate) async fn login_handler<A, L>(
    State(service): SharedService<A, L>,
    Json(request): Json<LoginRequest>,
) -> Result<ApiResponse<LoginResponse>, ApiError>
where
    A: AdminRepository + 'static,
    L: AuditLog + 'static,
{
    let response = service.login(request)?;
    Ok(ApiResponse::ok(response).with_message("login successful"))
}

pub(crate) async fn me_handler<A, L>(
    State(service): SharedService<A, L>,
    session: AdminSession,
) -> Result<ApiResponse<AdminView>, ApiError>
where
    A: AdminRepository + 'static,
    L: AuditLog + 'static,
{
    Ok(ApiResponse::ok(service.profile(&session.admin_id)?))
}

/// Tokens are stateless; logout only acknowledges so clients can drop theirs.
pub(crate) async fn logout_handler(session: AdminSession) -> ApiResponse<()> {
    info!(admin_id = %session.admin_id.0, "admin logged out");
    ApiResponse::message("logged out")
}

pub(crate) async fn list_admins_handler<A, L>(
    State(service): SharedService<A, L>,
    session: AdminSession,
) -> Result<ApiResponse<Vec<AdminView>>, ApiError>
where
    A: AdminRepository + 'static,
    L: AuditLog + 'static,
{
    session.require(AdminRole::SuperAdmin)?;
    Ok(ApiResponse::ok(service.list_admins()?))
}

pub(crate) async fn create_admin_handler<A, L>(
    State(service): SharedService<A, L>,
    session: AdminSession,
    Json(request): Json<NewAdmin>,
) -> Result<impl IntoResponse, ApiError>
where
    A: AdminRepository + 'static,
    L: AuditLog + 'static,
{
    session.require(AdminRole::SuperAdmin)?;
    let admin = service.create_admin(&session.admin_id, request)?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::ok(admin).with_message("admin created"),
    ))
}

pub(crate) async fn activate_handler<A, L>(
    State(service): SharedService<A, L>,
    session: AdminSession,
    Path(admin_id): Path<String>,
) -> Result<ApiResponse<AdminView>, ApiError>
where
    A: AdminRepository + 'static,
    L: AuditLog + 'static,
{
    session.require(AdminRole::SuperAdmin)?;
    let admin = service.set_active(&session.admin_id, &AdminId(admin_id), true)?;
    Ok(ApiResponse::ok(admin).with_message("admin activated"))
}

pub(crate) async fn deactivate_handler<A, L>(
    State(service): SharedService<A, L>,
    session: AdminSession,
    Path(admin_id): Path<String>,
) -> Result<ApiResponse<AdminView>, ApiError>
where
    A: AdminRepository + 'static,
    L: AuditLog + 'static,
{
    session.require(AdminRole::SuperAdmin)?;
    let admin = service.set_active(&session.admin_id, &AdminId(admin_id), false)?;
    Ok(ApiResponse::ok(admin).with_message("admin deactivated"))
}

impl From<AccountError> for ApiError {
    fn from(value: AccountError) -> Self {
        match value {
            AccountError::Validation(_)
            | AccountError::SetupCompleted
            | AccountError::EmailTaken
            | AccountError::CannotDeactivateSelf => ApiError::BadRequest(value.to_string()),
            AccountError::InvalidCredentials => ApiError::Unauthorized(value.to_string()),
            AccountError::Deactivated => ApiError::Forbidden(value.to_string()),
            AccountError::NotFound(_) => ApiError::NotFound("admin not found".into()),
            AccountError::Repository(err) => err.into(),
            AccountError::Password(_) | AccountError::Token(_) | AccountError::Audit(_) => {
                ApiError::Internal(value.to_string())
            }
        }
    }
}
