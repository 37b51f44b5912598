use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::domain::{
    Admin, AdminId, AdminRole, AdminView, LoginRequest, LoginResponse, NewAdmin, SetupStatus,
};
use super::repository::AdminRepository;
use crate::audit::{AuditAction, AuditError, AuditLog, AuditRecord, AuditTarget};
use crate::auth::{hash_password, verify_password, PasswordError, TokenError, TokenIssuer};
use crate::storage::{new_id, RepositoryError};

const MIN_PASSWORD_LEN: usize = 8;

/// First-admin setup, login, and admin roster management.
pub struct AccountService<A, L> {
    admins: Arc<A>,
    audit: Arc<L>,
    tokens: Arc<TokenIssuer>,
}

impl<A, L> AccountService<A, L>
where
    A: AdminRepository + 'static,
    L: AuditLog + 'static,
{
    pub fn new(admins: Arc<A>, audit: Arc<L>, tokens: Arc<TokenIssuer>) -> Self {
        Self {
            admins,
            audit,
            tokens,
        }
    }

    pub fn setup_status(&self) -> Result<SetupStatus, AccountError> {
        let admin_count = self.admins.count()?;
        Ok(SetupStatus {
            needs_setup: admin_count == 0,
            admin_count,
        })
    }

    /// Bootstraps the console with a super admin; refused once any admin exists.
    pub fn create_first_admin(&self, request: NewAdmin) -> Result<AdminView, AccountError> {
        if self.admins.count()? > 0 {
            return Err(AccountError::SetupCompleted);
        }

        let admin = self.build_admin(request, AdminRole::SuperAdmin)?;
        let stored = self
            .admins
            .insert_if_empty(admin)?
            .ok_or(AccountError::SetupCompleted)?;
        self.record(&stored.id, AuditAction::CreateAdmin, &stored.id)?;

        info!(admin_id = %stored.id.0, "first admin created");
        Ok(stored.view())
    }

    pub fn login(&self, request: LoginRequest) -> Result<LoginResponse, AccountError> {
        let email = normalize_email(&request.email);
        if email.is_empty() || request.password.is_empty() {
            return Err(AccountError::Validation("email and password are required"));
        }

        let Some(mut admin) = self.admins.find_by_email(&email)? else {
            warn!("login attempt for unknown admin");
            return Err(AccountError::InvalidCredentials);
        };

        if !verify_password(&request.password, &admin.password_hash)? {
            warn!(admin_id = %admin.id.0, "login attempt with wrong password");
            return Err(AccountError::InvalidCredentials);
        }
        if !admin.is_active {
            return Err(AccountError::Deactivated);
        }

        admin.last_login_at = Some(Utc::now());
        self.admins.update(admin.clone())?;
        let token = self.tokens.issue(&admin)?;

        info!(admin_id = %admin.id.0, role = admin.role.label(), "admin logged in");
        Ok(LoginResponse {
            token,
            admin: admin.view(),
        })
    }

    pub fn profile(&self, id: &AdminId) -> Result<AdminView, AccountError> {
        self.admins
            .fetch(id)?
            .map(|admin| admin.view())
            .ok_or_else(|| AccountError::NotFound(id.0.clone()))
    }

    pub fn create_admin(
        &self,
        actor: &AdminId,
        request: NewAdmin,
    ) -> Result<AdminView, AccountError> {
        let role = request.role.unwrap_or(AdminRole::Moderator);
        let admin = self.build_admin(request, role)?;
        let stored = self.store(admin)?;
        self.record(actor, AuditAction::CreateAdmin, &stored.id)?;

        info!(admin_id = %actor.0, created = %stored.id.0, role = role.label(), "admin created");
        Ok(stored.view())
    }

    pub fn list_admins(&self) -> Result<Vec<AdminView>, AccountError> {
        let mut admins = self.admins.all()?;
        admins.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(admins.iter().map(Admin::view).collect())
    }

    pub fn set_active(
        &self,
        actor: &AdminId,
        id: &AdminId,
        active: bool,
    ) -> Result<AdminView, AccountError> {
        if !active && actor == id {
            return Err(AccountError::CannotDeactivateSelf);
        }

        let mut admin = self
            .admins
            .fetch(id)?
            .ok_or_else(|| AccountError::NotFound(id.0.clone()))?;
        admin.is_active = active;
        self.admins.update(admin.clone())?;

        let action = if active {
            AuditAction::ActivateAdmin
        } else {
            AuditAction::DeactivateAdmin
        };
        self.record(actor, action, id)?;

        info!(admin_id = %actor.0, target = %id.0, active, "admin activation changed");
        Ok(admin.view())
    }

    fn build_admin(&self, request: NewAdmin, role: AdminRole) -> Result<Admin, AccountError> {
        let email = normalize_email(&request.email);
        let name = request.name.trim().to_string();

        if !is_plausible_email(&email) {
            return Err(AccountError::Validation("a valid email is required"));
        }
        if name.is_empty() {
            return Err(AccountError::Validation("name is required"));
        }
        if request.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AccountError::Validation(
                "password must be at least 8 characters",
            ));
        }

        let password_hash = hash_password(&request.password)?;
        Ok(Admin::new(
            AdminId(new_id("admin")),
            email,
            name,
            password_hash,
            role,
        ))
    }

    fn store(&self, admin: Admin) -> Result<Admin, AccountError> {
        self.admins.insert(admin).map_err(|err| match err {
            RepositoryError::Conflict => AccountError::EmailTaken,
            other => other.into(),
        })
    }

    fn record(
        &self,
        actor: &AdminId,
        action: AuditAction,
        target: &AdminId,
    ) -> Result<(), AuditError> {
        self.audit.append(AuditRecord::new(
            actor.clone(),
            action,
            AuditTarget::Admin(target.clone()),
            None,
        ))
    }
}

fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("{0}")]
    Validation(&'static str),
    #[error("setup has already been completed")]
    SetupCompleted,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("admin account is deactivated")]
    Deactivated,
    #[error("admin {0} not found")]
    NotFound(String),
    #[error("an admin with this email already exists")]
    EmailTaken,
    #[error("admins cannot deactivate themselves")]
    CannotDeactivateSelf,
    #[error(transparent)]
    Password(#[from] PasswordError),
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Audit(#[from] AuditError),
}
