use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;

use super::domain::{JobId, MatchScore};
use super::service::{JobCatalog, MatchService, MatchServiceError, ProfileDirectory};
use crate::api::ApiError;
use crate::users::UserId;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchQuery {
    pub user_id: Option<String>,
}

/// Consumer-facing route returning the bare [`MatchScore`] for a job and candidate.
pub fn match_router<J, P>(service: Arc<MatchService<J, P>>) -> Router
where
    J: JobCatalog + 'static,
    P: ProfileDirectory + 'static,
{
    Router::new()
        .route("/api/jobs/:job_id/match", get(match_handler::<J, P>))
        .with_state(service)
}

pub(crate) async fn match_handler<J, P>(
    State(service): State<Arc<MatchService<J, P>>>,
    Path(job_id): Path<String>,
    Query(query): Query<MatchQuery>,
) -> Result<Json<MatchScore>, ApiError>
where
    J: JobCatalog + 'static,
    P: ProfileDirectory + 'static,
{
    let user_id = query
        .user_id
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("userId is required".into()))?;

    let score = service.score(
        &JobId(job_id),
        &UserId(user_id),
        Utc::now().date_naive(),
    )?;
    Ok(Json(score))
}

impl From<MatchServiceError> for ApiError {
    fn from(value: MatchServiceError) -> Self {
        match value {
            MatchServiceError::JobNotFound(_) => ApiError::NotFound("job not found".into()),
            MatchServiceError::ProfileNotFound(_) => {
                ApiError::NotFound("candidate profile not found".into())
            }
            MatchServiceError::Repository(err) => err.into(),
        }
    }
}
