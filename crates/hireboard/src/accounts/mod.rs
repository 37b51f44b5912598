//! Console operators: first-admin setup, login, and roster management.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{
    Admin, AdminId, AdminRole, AdminView, LoginRequest, LoginResponse, NewAdmin, SetupStatus,
};
pub use repository::AdminRepository;
pub use router::account_router;
pub use service::{AccountError, AccountService};
