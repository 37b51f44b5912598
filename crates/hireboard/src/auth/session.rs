use std::sync::Arc;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use tracing::warn;

use super::token::TokenIssuer;
use crate::accounts::{AdminId, AdminRepository, AdminRole};
use crate::api::ApiError;

/// Verifies bearer tokens against the signing key and the current admin roster.
///
/// Installed on the router as an `Extension` so every handler taking an
/// [`AdminSession`] can resolve it.
#[derive(Clone)]
pub struct Authenticator {
    tokens: Arc<TokenIssuer>,
    admins: Arc<dyn AdminRepository>,
}

impl Authenticator {
    pub fn new(tokens: Arc<TokenIssuer>, admins: Arc<dyn AdminRepository>) -> Self {
        Self { tokens, admins }
    }

    pub fn authenticate(&self, header: Option<&str>) -> Result<AdminSession, ApiError> {
        let header =
            header.ok_or_else(|| ApiError::Unauthorized("missing Authorization header".into()))?;
        let token = header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ApiError::Unauthorized("expected Bearer token".into()))?;

        let claims = self.tokens.verify(token).map_err(|err| {
            warn!(error = %err, "rejected session token");
            ApiError::Unauthorized("invalid or expired token".into())
        })?;

        let admin_id = AdminId(claims.admin_id);
        let admin = self
            .admins
            .fetch(&admin_id)?
            .ok_or_else(|| ApiError::Unauthorized("admin no longer exists".into()))?;
        if !admin.is_active {
            return Err(ApiError::Unauthorized("admin account is deactivated".into()));
        }

        Ok(AdminSession {
            admin_id,
            email: admin.email,
            role: admin.role,
        })
    }
}

/// Authenticated admin resolved for the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSession {
    pub admin_id: AdminId,
    pub email: String,
    pub role: AdminRole,
}

impl AdminSession {
    pub fn require(&self, role: AdminRole) -> Result<(), ApiError> {
        if self.role.satisfies(role) {
            Ok(())
        } else {
            Err(ApiError::Forbidden(format!("{} role required", role.label())))
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminSession
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let authenticator = parts
            .extensions
            .get::<Authenticator>()
            .cloned()
            .ok_or_else(|| ApiError::Internal("authenticator extension missing".into()))?;

        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        authenticator.authenticate(header)
    }
}
