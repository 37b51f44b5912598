//! Job-to-candidate match scoring.
//!
//! The engine is a pure function of the profile, the job requirements, the scoring policy,
//! and the evaluation date. Scores are recomputed on every request and never persisted.

mod config;
pub mod domain;
mod education;
mod experience;
pub mod router;
pub mod service;
mod skills;

#[cfg(test)]
mod tests;

pub use config::{MatchWeights, MatchingConfig, MatchingConfigError};
pub use domain::{
    CandidateProfile, Education, Experience, ExperienceLevel, JobId, JobRequirements,
    MatchBreakdown, MatchScore,
};
pub use education::{EducationRelevance, KeywordRelevance};
pub use experience::total_years;
pub use router::match_router;
pub use service::{JobCatalog, MatchService, MatchServiceError, ProfileDirectory};
pub use skills::normalize_skills;

use chrono::NaiveDate;

/// Stateless scorer applying a validated [`MatchingConfig`].
pub struct MatchEngine {
    config: MatchingConfig,
    relevance: Box<dyn EducationRelevance>,
}

impl MatchEngine {
    pub fn new(config: MatchingConfig) -> Result<Self, MatchingConfigError> {
        let relevance = KeywordRelevance::new(config.min_keyword_len);
        Self::with_relevance(config, Box::new(relevance))
    }

    pub fn with_relevance(
        config: MatchingConfig,
        relevance: Box<dyn EducationRelevance>,
    ) -> Result<Self, MatchingConfigError> {
        config.validate()?;
        Ok(Self { config, relevance })
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    pub fn compute(
        &self,
        profile: &CandidateProfile,
        job: &JobRequirements,
        as_of: NaiveDate,
    ) -> MatchScore {
        let skills = skills::match_skills(&profile.skills, &job.required_skills);

        let experience_years = experience::total_years(&profile.experiences, as_of);
        let threshold = self.config.threshold_for(job.experience_level);
        let (experience_match, experience_level_match) =
            experience::experience_score(experience_years, threshold);

        let has_relevant_education = self.relevance.is_relevant(&profile.education, job);
        let education_match = if has_relevant_education {
            100
        } else if profile.education.is_empty() {
            0
        } else {
            self.config.partial_education_score
        };

        let overall = self.overall(skills.score, experience_match, education_match);

        MatchScore {
            overall,
            skills_match: skills.score,
            experience_match,
            education_match,
            breakdown: MatchBreakdown {
                matched_skills: skills.matched,
                missing_skills: skills.missing,
                experience_years: (experience_years * 10.0).round() / 10.0,
                experience_level_match,
                has_relevant_education,
            },
        }
    }

    fn overall(&self, skills: u8, experience: u8, education: u8) -> u8 {
        let weights = &self.config.weights;
        let weighted = weights.skills * f64::from(skills)
            + weights.experience * f64::from(experience)
            + weights.education * f64::from(education);
        weighted.round().clamp(0.0, 100.0) as u8
    }
}

impl Default for MatchEngine {
    fn default() -> Self {
        Self {
            relevance: Box::new(KeywordRelevance::default()),
            config: MatchingConfig::default(),
        }
    }
}

/// Scores a profile against a job under `config`, measuring ongoing stints up to `as_of`.
pub fn compute_match(
    profile: &CandidateProfile,
    job: &JobRequirements,
    config: &MatchingConfig,
    as_of: NaiveDate,
) -> Result<MatchScore, MatchingConfigError> {
    let engine = MatchEngine::new(config.clone())?;
    Ok(engine.compute(profile, job, as_of))
}
