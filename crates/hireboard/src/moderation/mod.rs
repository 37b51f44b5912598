//! Community post moderation.
//!
//! Posts start `PENDING` and are moved to `APPROVED` or `REJECTED` by an
//! admin. Soft delete and restore toggle visibility without touching the
//! review status; a permanent delete purges the post with its votes and
//! reports after the action has been written to the audit log.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;
pub mod state;

#[cfg(test)]
mod tests;

pub use domain::{
    DependentCounts, ModerationRequest, ModerationStatus, Post, PostId, PostQuery, PostReport,
    PostVote,
};
pub use repository::PostRepository;
pub use router::moderation_router;
pub use service::{ModerationError, ModerationService};
pub use state::TransitionError;
