use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use chrono::NaiveDate;
use hireboard::accounts::AccountService;
use hireboard::auth::{Authenticator, TokenIssuer};
use hireboard::error::AppError;
use hireboard::matching::{
    CandidateProfile, Education, Experience, ExperienceLevel, JobId, JobRequirements,
    MatchEngine, MatchService,
};
use hireboard::moderation::{ModerationService, Post, PostId, PostReport, PostRepository, PostVote};
use hireboard::stats::StatsService;
use hireboard::storage::memory::{
    MemoryAdminStore, MemoryAuditLog, MemoryJobCatalog, MemoryPostStore, MemoryProfileDirectory,
    MemoryUserStore,
};
use hireboard::users::{User, UserAdminService, UserId, UserRepository};
use metrics_exporter_prometheus::PrometheusHandle;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local stores shared by every service.
#[derive(Default, Clone)]
pub(crate) struct Stores {
    pub(crate) admins: Arc<MemoryAdminStore>,
    pub(crate) users: Arc<MemoryUserStore>,
    pub(crate) posts: Arc<MemoryPostStore>,
    pub(crate) audit: Arc<MemoryAuditLog>,
    pub(crate) jobs: Arc<MemoryJobCatalog>,
    pub(crate) profiles: Arc<MemoryProfileDirectory>,
}

/// Services wired over the in-memory stores.
pub(crate) struct Application {
    pub(crate) accounts: Arc<AccountService<MemoryAdminStore, MemoryAuditLog>>,
    pub(crate) users: Arc<UserAdminService<MemoryUserStore, MemoryAuditLog>>,
    pub(crate) moderation: Arc<ModerationService<MemoryPostStore, MemoryAuditLog>>,
    pub(crate) stats: Arc<StatsService>,
    pub(crate) matching: Arc<MatchService<MemoryJobCatalog, MemoryProfileDirectory>>,
    pub(crate) authenticator: Authenticator,
}

impl Application {
    pub(crate) fn new(stores: &Stores, tokens: TokenIssuer, engine: MatchEngine) -> Self {
        let tokens = Arc::new(tokens);
        Self {
            accounts: Arc::new(AccountService::new(
                stores.admins.clone(),
                stores.audit.clone(),
                tokens.clone(),
            )),
            users: Arc::new(UserAdminService::new(
                stores.users.clone(),
                stores.audit.clone(),
            )),
            moderation: Arc::new(ModerationService::new(
                stores.posts.clone(),
                stores.audit.clone(),
            )),
            stats: Arc::new(StatsService::new(
                stores.users.clone(),
                stores.posts.clone(),
                stores.admins.clone(),
                stores.audit.clone(),
            )),
            matching: Arc::new(MatchService::new(
                stores.jobs.clone(),
                stores.profiles.clone(),
                Arc::new(engine),
            )),
            authenticator: Authenticator::new(tokens, stores.admins.clone()),
        }
    }
}

/// Loads a small member base, a moderation queue, and two job postings so the
/// console has something to show before real data is connected.
pub(crate) fn seed_demo(stores: &Stores) -> Result<(), AppError> {
    let members = [
        ("user-ada", "ada@example.com", "Ada Lovelace"),
        ("user-grace", "grace@example.com", "Grace Hopper"),
        ("user-linus", "linus@example.com", "Linus Torvalds"),
        ("user-spam", "deals@example.net", "Best Deals"),
    ];
    for (id, email, name) in members {
        stores
            .users
            .insert(User::new(UserId(id.to_string()), email, name))?;
    }

    let posts = [
        (
            "post-resume",
            "user-ada",
            "Resume review swap",
            "Happy to trade resume reviews with anyone targeting backend roles.",
        ),
        (
            "post-salary",
            "user-grace",
            "Salary negotiation notes",
            "Anchoring high worked better than I expected.",
        ),
        (
            "post-deals",
            "user-spam",
            "Earn $5000 a week from home",
            "Click the link in my profile.",
        ),
    ];
    for (id, author, title, content) in posts {
        stores.posts.insert(Post::submitted(
            PostId(id.to_string()),
            UserId(author.to_string()),
            title,
            content,
        ))?;
    }

    for voter in ["user-grace", "user-linus"] {
        stores.posts.insert_vote(PostVote {
            post_id: PostId("post-resume".to_string()),
            user_id: UserId(voter.to_string()),
            value: 1,
        })?;
    }
    for reporter in ["user-ada", "user-grace", "user-linus"] {
        stores.posts.insert_report(PostReport {
            post_id: PostId("post-deals".to_string()),
            reporter_id: UserId(reporter.to_string()),
            reason: "spam".to_string(),
        })?;
    }

    stores.jobs.upsert(JobRequirements {
        job_id: JobId("job-frontend".to_string()),
        title: "Frontend Engineer".to_string(),
        description: "Build the candidate dashboard in React and TypeScript.".to_string(),
        required_skills: vec!["javascript".into(), "react".into(), "typescript".into()],
        experience_level: ExperienceLevel::Mid,
    })?;
    stores.jobs.upsert(JobRequirements {
        job_id: JobId("job-platform".to_string()),
        title: "Platform Lead".to_string(),
        description: "Own the Rust services behind search and matching.".to_string(),
        required_skills: vec!["rust".into(), "postgres".into(), "kubernetes".into()],
        experience_level: ExperienceLevel::Lead,
    })?;

    stores.profiles.upsert(CandidateProfile {
        user_id: UserId("user-ada".to_string()),
        skills: vec!["JavaScript".into(), "React".into(), "CSS".into()],
        experiences: vec![Experience {
            title: "Frontend Developer".to_string(),
            company: "Analytical Engines".to_string(),
            start_date: NaiveDate::from_ymd_opt(2021, 2, 1),
            end_date: None,
            current: true,
        }],
        education: vec![Education {
            degree: "BSc".to_string(),
            field_of_study: "Software Engineering".to_string(),
            institution: "University of London".to_string(),
        }],
    })?;
    stores.profiles.upsert(CandidateProfile {
        user_id: UserId("user-linus".to_string()),
        skills: vec!["rust".into(), "c".into(), "git".into()],
        experiences: vec![Experience {
            title: "Kernel Maintainer".to_string(),
            company: "Open Source".to_string(),
            start_date: NaiveDate::from_ymd_opt(2012, 1, 1),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            current: false,
        }],
        education: Vec::new(),
    })?;

    info!(users = members.len(), posts = posts.len(), "seeded demo data");
    Ok(())
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hireboard::moderation::DependentCounts;

    #[test]
    fn demo_seed_populates_every_store() {
        let stores = Stores::default();
        seed_demo(&stores).expect("seed succeeds");

        assert_eq!(stores.users.all().expect("users").len(), 4);
        assert_eq!(stores.posts.all().expect("posts").len(), 3);
        assert_eq!(
            stores
                .posts
                .dependent_counts(&PostId("post-deals".into()))
                .expect("counts"),
            DependentCounts { votes: 0, reports: 3 }
        );

        let err = seed_demo(&stores).expect_err("second seed conflicts");
        assert!(matches!(err, AppError::Seed(_)));
    }

    #[test]
    fn parse_date_reports_the_bad_value() {
        assert_eq!(
            parse_date(" 2025-03-01 "),
            Ok(NaiveDate::from_ymd_opt(2025, 3, 1).expect("valid"))
        );
        let err = parse_date("03/01/2025").expect_err("wrong format");
        assert!(err.contains("03/01/2025"));
    }
}
