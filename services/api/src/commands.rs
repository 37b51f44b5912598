use chrono::{NaiveDate, Utc};
use clap::Args;
use hireboard::auth::hash_password;
use hireboard::config::AppConfig;
use hireboard::error::AppError;
use hireboard::matching::{CandidateProfile, JobRequirements, MatchEngine, MatchScore};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub(crate) struct MatchArgs {
    /// Candidate profile JSON (userId, skills, experiences, education)
    #[arg(long)]
    pub(crate) profile: PathBuf,
    /// Job requirements JSON (jobId, title, description, requiredSkills, experienceLevel)
    #[arg(long)]
    pub(crate) job: PathBuf,
    /// Date ongoing experience is measured to (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub(crate) struct HashPasswordArgs {
    /// Plain-text password to hash
    pub(crate) password: String,
}

pub(crate) fn run_match(args: MatchArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let engine = MatchEngine::new(config.matching)?;
    let as_of = evaluation_date(args.as_of);

    let score = score_files(&engine, &args.profile, &args.job, as_of)?;
    let rendered = serde_json::to_string_pretty(&score).map_err(std::io::Error::from)?;
    println!("{rendered}");
    Ok(())
}

pub(crate) fn run_hash_password(args: HashPasswordArgs) -> Result<(), AppError> {
    println!("{}", hash_password(&args.password)?);
    Ok(())
}

/// Defaults to the current UTC date, the same clock the match route uses.
fn evaluation_date(as_of: Option<NaiveDate>) -> NaiveDate {
    as_of.unwrap_or_else(|| Utc::now().date_naive())
}

fn score_files(
    engine: &MatchEngine,
    profile: &Path,
    job: &Path,
    as_of: NaiveDate,
) -> Result<MatchScore, AppError> {
    let profile: CandidateProfile = read_json(profile)?;
    let job: JobRequirements = read_json(job)?;
    Ok(engine.compute(&profile, &job, as_of))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let raw = std::fs::read_to_string(path)?;
    serde_json::from_str(&raw).map_err(|err| AppError::input(path, err))
}
