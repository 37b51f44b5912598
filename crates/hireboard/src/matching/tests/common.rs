use std::sync::Arc;

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::matching::{
    CandidateProfile, Education, Experience, ExperienceLevel, JobId, JobRequirements,
    MatchEngine, MatchService,
};
use crate::storage::memory::{MemoryJobCatalog, MemoryProfileDirectory};
use crate::users::UserId;

pub(super) fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date")
}

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

pub(super) fn job(skills: &[&str], level: ExperienceLevel) -> JobRequirements {
    JobRequirements {
        job_id: JobId("job-1".to_string()),
        title: "Frontend Engineer".to_string(),
        description: "Build accessible interfaces for our hiring platform.".to_string(),
        required_skills: strings(skills),
        experience_level: level,
    }
}

pub(super) fn stint(start: NaiveDate, end: Option<NaiveDate>) -> Experience {
    Experience {
        title: "Developer".to_string(),
        company: "Acme".to_string(),
        start_date: Some(start),
        end_date: end,
        current: end.is_none(),
    }
}

pub(super) fn degree(field: &str) -> Education {
    Education {
        degree: "Bachelor".to_string(),
        field_of_study: field.to_string(),
        institution: "State University".to_string(),
    }
}

pub(super) fn profile(skills: &[&str]) -> CandidateProfile {
    CandidateProfile {
        user_id: UserId("user-1".to_string()),
        skills: strings(skills),
        experiences: vec![stint(date(2020, 1, 1), Some(date(2023, 1, 1)))],
        education: vec![degree("Software Engineering")],
    }
}

pub(super) fn match_service() -> MatchService<MemoryJobCatalog, MemoryProfileDirectory> {
    let jobs = Arc::new(MemoryJobCatalog::default());
    let profiles = Arc::new(MemoryProfileDirectory::default());
    jobs.upsert(job(&["javascript", "react", "node"], ExperienceLevel::Mid))
        .expect("seed job");
    profiles
        .upsert(profile(&["javascript", "react"]))
        .expect("seed profile");
    MatchService::new(jobs, profiles, Arc::new(MatchEngine::default()))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
