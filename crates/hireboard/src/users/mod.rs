//! Member account administration.
pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{BlockRequest, User, UserId, UserQuery};
pub use repository::UserRepository;
pub use router::user_router;
pub use service::{UserAdminError, UserAdminService};
