use std::collections::BTreeSet;

use super::domain::{Education, JobRequirements};

/// Strategy deciding whether any of a candidate's education relates to a job.
///
/// The default keyword strategy is a heuristic; alternative strategies (taxonomy lookups,
/// embedding similarity) plug in here without touching the scoring pipeline.
pub trait EducationRelevance: Send + Sync {
    fn is_relevant(&self, education: &[Education], job: &JobRequirements) -> bool;
}

const STOP_WORDS: &[&str] = &[
    "and", "the", "for", "with", "you", "our", "are", "will", "who", "from", "this", "that",
    "job", "role", "team", "work", "years", "experience", "required", "senior", "junior",
];

/// Case-insensitive substring match of job keywords against degree and field of study.
#[derive(Debug, Clone)]
pub struct KeywordRelevance {
    min_keyword_len: usize,
}

impl KeywordRelevance {
    pub fn new(min_keyword_len: usize) -> Self {
        Self {
            min_keyword_len: min_keyword_len.max(1),
        }
    }

    /// Tokens from the job title, description, and required skills.
    pub fn keywords(&self, job: &JobRequirements) -> BTreeSet<String> {
        let sources = [job.title.as_str(), job.description.as_str()]
            .into_iter()
            .chain(job.required_skills.iter().map(String::as_str));

        sources
            .flat_map(|text| text.split(|c: char| !c.is_alphanumeric()))
            .map(str::to_lowercase)
            .filter(|token| token.chars().count() >= self.min_keyword_len)
            .filter(|token| !STOP_WORDS.contains(&token.as_str()))
            .collect()
    }
}

impl Default for KeywordRelevance {
    fn default() -> Self {
        Self::new(3)
    }
}

impl EducationRelevance for KeywordRelevance {
    fn is_relevant(&self, education: &[Education], job: &JobRequirements) -> bool {
        if education.is_empty() {
            return false;
        }

        let keywords = self.keywords(job);
        education.iter().any(|entry| {
            let field = entry.field_of_study.to_lowercase();
            let degree = entry.degree.to_lowercase();
            keywords.iter().any(|keyword| {
                field.contains(keyword.as_str()) || degree.contains(keyword.as_str())
            })
        })
    }
}
