use std::collections::BTreeSet;

/// Result of comparing a candidate's skills with a job's required skills.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SkillMatch {
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    pub score: u8,
}

/// Lower-cased, trimmed, de-duplicated skill names. Blank entries are dropped.
pub fn normalize_skills(skills: &[String]) -> BTreeSet<String> {
    skills
        .iter()
        .map(|skill| skill.trim().to_lowercase())
        .filter(|skill| !skill.is_empty())
        .collect()
}

pub(crate) fn match_skills(candidate: &[String], required: &[String]) -> SkillMatch {
    let required = normalize_skills(required);
    if required.is_empty() {
        return SkillMatch {
            matched: Vec::new(),
            missing: Vec::new(),
            score: 100,
        };
    }

    let candidate = normalize_skills(candidate);
    let (matched, missing): (Vec<String>, Vec<String>) = required
        .into_iter()
        .partition(|skill| candidate.contains(skill));

    let total = matched.len() + missing.len();
    let score = (100.0 * matched.len() as f64 / total as f64).round() as u8;

    SkillMatch {
        matched,
        missing,
        score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn partial_overlap_rounds_to_nearest_percent() {
        let result = match_skills(
            &skills(&["javascript", "react"]),
            &skills(&["javascript", "react", "node"]),
        );

        assert_eq!(result.matched, skills(&["javascript", "react"]));
        assert_eq!(result.missing, skills(&["node"]));
        assert_eq!(result.score, 67);
    }

    #[test]
    fn comparison_ignores_case_and_whitespace() {
        let result = match_skills(
            &skills(&["  TypeScript ", "RUST"]),
            &skills(&["rust", "typescript"]),
        );
        assert_eq!(result.score, 100);
        assert!(result.missing.is_empty());
    }

    #[test]
    fn no_requirements_is_a_full_match() {
        let result = match_skills(&[], &skills(&["   ", ""]));
        assert_eq!(result.score, 100);
        assert!(result.matched.is_empty());
    }

    #[test]
    fn duplicate_requirements_count_once() {
        let result = match_skills(&skills(&["go"]), &skills(&["Go", "go ", "sql"]));
        assert_eq!(result.matched, skills(&["go"]));
        assert_eq!(result.missing, skills(&["sql"]));
        assert_eq!(result.score, 50);
    }
}
