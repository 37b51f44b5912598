use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::ExperienceLevel;

const WEIGHT_TOLERANCE: f64 = 1e-6;

/// Relative contribution of each sub-score to the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchWeights {
    pub skills: f64,
    pub experience: f64,
    pub education: f64,
}

impl MatchWeights {
    pub fn sum(&self) -> f64 {
        self.skills + self.experience + self.education
    }
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            skills: 0.5,
            experience: 0.3,
            education: 0.2,
        }
    }
}

/// Scoring policy: weights, the seniority threshold table, and education fallbacks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingConfig {
    pub weights: MatchWeights,
    pub experience_thresholds: BTreeMap<ExperienceLevel, f64>,
    pub partial_education_score: u8,
    pub min_keyword_len: usize,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        let experience_thresholds = BTreeMap::from([
            (ExperienceLevel::Entry, 0.0),
            (ExperienceLevel::Mid, 2.0),
            (ExperienceLevel::Senior, 5.0),
            (ExperienceLevel::Lead, 7.0),
            (ExperienceLevel::Executive, 10.0),
        ]);

        Self {
            weights: MatchWeights::default(),
            experience_thresholds,
            partial_education_score: 50,
            min_keyword_len: 3,
        }
    }
}

impl MatchingConfig {
    /// Minimum years for a level; levels missing from the table require none.
    pub fn threshold_for(&self, level: ExperienceLevel) -> f64 {
        self.experience_thresholds
            .get(&level)
            .copied()
            .unwrap_or(0.0)
    }

    pub fn validate(&self) -> Result<(), MatchingConfigError> {
        let MatchWeights {
            skills,
            experience,
            education,
        } = self.weights;

        if [skills, experience, education]
            .iter()
            .any(|weight| !weight.is_finite() || *weight < 0.0)
        {
            return Err(MatchingConfigError::NegativeWeight);
        }

        let sum = self.weights.sum();
        if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(MatchingConfigError::WeightSum(sum));
        }

        if let Some((level, years)) = self
            .experience_thresholds
            .iter()
            .find(|(_, years)| !years.is_finite() || **years < 0.0)
        {
            return Err(MatchingConfigError::InvalidThreshold {
                level: level.label(),
                years: *years,
            });
        }

        if self.partial_education_score > 100 {
            return Err(MatchingConfigError::PartialEducationScore(
                self.partial_education_score,
            ));
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum MatchingConfigError {
    #[error("match weights must be finite and non-negative")]
    NegativeWeight,
    #[error("match weights must sum to 1.0 (got {0:.4})")]
    WeightSum(f64),
    #[error("experience threshold for {level} must be non-negative (got {years})")]
    InvalidThreshold { level: &'static str, years: f64 },
    #[error("partial education score must be within 0..=100 (got {0})")]
    PartialEducationScore(u8),
}
