//! Hireboard domain services: the admin console API and job match scoring.

pub mod accounts;
pub mod api;
pub mod audit;
pub mod auth;
pub mod config;
pub mod error;
pub mod matching;
pub mod moderation;
pub mod stats;
pub mod storage;
pub mod telemetry;
pub mod users;
