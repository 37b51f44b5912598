use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use super::domain::{CandidateProfile, JobId, JobRequirements, MatchScore};
use super::MatchEngine;
use crate::storage::RepositoryError;
use crate::users::UserId;

/// Read access to job postings' requirements.
pub trait JobCatalog: Send + Sync {
    fn requirements(&self, id: &JobId) -> Result<Option<JobRequirements>, RepositoryError>;
}

/// Read access to candidate profiles.
pub trait ProfileDirectory: Send + Sync {
    fn profile(&self, user: &UserId) -> Result<Option<CandidateProfile>, RepositoryError>;
}

/// Resolves a job and a candidate, then scores them.
pub struct MatchService<J, P> {
    jobs: Arc<J>,
    profiles: Arc<P>,
    engine: Arc<MatchEngine>,
}

impl<J, P> MatchService<J, P>
where
    J: JobCatalog + 'static,
    P: ProfileDirectory + 'static,
{
    pub fn new(jobs: Arc<J>, profiles: Arc<P>, engine: Arc<MatchEngine>) -> Self {
        Self {
            jobs,
            profiles,
            engine,
        }
    }

    pub fn score(
        &self,
        job_id: &JobId,
        user_id: &UserId,
        as_of: NaiveDate,
    ) -> Result<MatchScore, MatchServiceError> {
        let job = self
            .jobs
            .requirements(job_id)?
            .ok_or_else(|| MatchServiceError::JobNotFound(job_id.0.clone()))?;
        let profile = self
            .profiles
            .profile(user_id)?
            .ok_or_else(|| MatchServiceError::ProfileNotFound(user_id.0.clone()))?;

        let score = self.engine.compute(&profile, &job, as_of);
        debug!(
            job_id = %job_id.0,
            user_id = %user_id.0,
            overall = score.overall,
            "computed match score"
        );
        Ok(score)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MatchServiceError {
    #[error("job {0} not found")]
    JobNotFound(String),
    #[error("profile for user {0} not found")]
    ProfileNotFound(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
