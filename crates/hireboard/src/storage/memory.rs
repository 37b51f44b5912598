//! Process-local stores backed by `Arc<Mutex<..>>` maps.
//!
//! Listing order follows insertion order (newest first) rather than
//! timestamps so records created within the same instant stay stable.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::RepositoryError;
use crate::accounts::{Admin, AdminId, AdminRepository};
use crate::audit::{AuditError, AuditLog, AuditRecord};
use crate::matching::{CandidateProfile, JobCatalog, JobId, JobRequirements, ProfileDirectory};
use crate::moderation::{DependentCounts, Post, PostId, PostReport, PostRepository, PostVote};
use crate::users::{User, UserId, UserRepository};

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, RepositoryError> {
    mutex
        .lock()
        .map_err(|_| RepositoryError::Unavailable("store mutex poisoned".to_string()))
}

/// Keyed rows tagged with an insertion sequence.
#[derive(Debug)]
struct Table<K, V> {
    rows: HashMap<K, (u64, V)>,
    next: u64,
}

impl<K, V> Default for Table<K, V> {
    fn default() -> Self {
        Self {
            rows: HashMap::new(),
            next: 0,
        }
    }
}

impl<K: std::hash::Hash + Eq, V: Clone> Table<K, V> {
    fn insert(&mut self, key: K, value: V) -> Result<(), RepositoryError> {
        if self.rows.contains_key(&key) {
            return Err(RepositoryError::Conflict);
        }
        self.rows.insert(key, (self.next, value));
        self.next += 1;
        Ok(())
    }

    fn replace(&mut self, key: &K, value: V) -> Result<(), RepositoryError> {
        match self.rows.get_mut(key) {
            Some((_, slot)) => {
                *slot = value;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn get(&self, key: &K) -> Option<V> {
        self.rows.get(key).map(|(_, value)| value.clone())
    }

    fn newest_first(&self) -> Vec<V> {
        let mut rows: Vec<_> = self.rows.values().collect();
        rows.sort_by(|a, b| b.0.cmp(&a.0));
        rows.into_iter().map(|(_, value)| value.clone()).collect()
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryAdminStore {
    admins: Arc<Mutex<Table<AdminId, Admin>>>,
}

fn insert_admin(table: &mut Table<AdminId, Admin>, admin: Admin) -> Result<Admin, RepositoryError> {
    let taken = table
        .rows
        .values()
        .any(|(_, existing)| existing.email.eq_ignore_ascii_case(&admin.email));
    if taken {
        return Err(RepositoryError::Conflict);
    }
    table.insert(admin.id.clone(), admin.clone())?;
    Ok(admin)
}

impl AdminRepository for MemoryAdminStore {
    fn insert(&self, admin: Admin) -> Result<Admin, RepositoryError> {
        insert_admin(&mut *lock(&self.admins)?, admin)
    }

    fn insert_if_empty(&self, admin: Admin) -> Result<Option<Admin>, RepositoryError> {
        let mut guard = lock(&self.admins)?;
        if !guard.rows.is_empty() {
            return Ok(None);
        }
        insert_admin(&mut guard, admin).map(Some)
    }

    fn update(&self, admin: Admin) -> Result<(), RepositoryError> {
        let id = admin.id.clone();
        lock(&self.admins)?.replace(&id, admin)
    }

    fn fetch(&self, id: &AdminId) -> Result<Option<Admin>, RepositoryError> {
        Ok(lock(&self.admins)?.get(id))
    }

    fn find_by_email(&self, email: &str) -> Result<Option<Admin>, RepositoryError> {
        let guard = lock(&self.admins)?;
        Ok(guard
            .rows
            .values()
            .find(|(_, admin)| admin.email.eq_ignore_ascii_case(email.trim()))
            .map(|(_, admin)| admin.clone()))
    }

    fn all(&self) -> Result<Vec<Admin>, RepositoryError> {
        Ok(lock(&self.admins)?.newest_first())
    }

    fn count(&self) -> Result<usize, RepositoryError> {
        Ok(lock(&self.admins)?.rows.len())
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryUserStore {
    users: Arc<Mutex<Table<UserId, User>>>,
}

impl UserRepository for MemoryUserStore {
    fn insert(&self, user: User) -> Result<User, RepositoryError> {
        lock(&self.users)?.insert(user.id.clone(), user.clone())?;
        Ok(user)
    }

    fn update(&self, user: User) -> Result<(), RepositoryError> {
        let id = user.id.clone();
        lock(&self.users)?.replace(&id, user)
    }

    fn fetch(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        Ok(lock(&self.users)?.get(id))
    }

    fn all(&self) -> Result<Vec<User>, RepositoryError> {
        Ok(lock(&self.users)?.newest_first())
    }
}

#[derive(Debug, Default)]
struct PostTables {
    posts: Table<PostId, Post>,
    votes: Vec<PostVote>,
    reports: Vec<PostReport>,
}

impl PostTables {
    fn counts(&self, id: &PostId) -> DependentCounts {
        DependentCounts {
            votes: self.votes.iter().filter(|vote| &vote.post_id == id).count(),
            reports: self
                .reports
                .iter()
                .filter(|report| &report.post_id == id)
                .count(),
        }
    }

    fn require_post(&self, id: &PostId) -> Result<(), RepositoryError> {
        if self.posts.rows.contains_key(id) {
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }
}

/// Posts with their votes and reports behind a single lock so a purge
/// removes all three together.
#[derive(Debug, Default, Clone)]
pub struct MemoryPostStore {
    tables: Arc<Mutex<PostTables>>,
}

impl PostRepository for MemoryPostStore {
    fn insert(&self, post: Post) -> Result<Post, RepositoryError> {
        lock(&self.tables)?
            .posts
            .insert(post.id.clone(), post.clone())?;
        Ok(post)
    }

    fn update(&self, post: Post) -> Result<(), RepositoryError> {
        let id = post.id.clone();
        lock(&self.tables)?.posts.replace(&id, post)
    }

    fn fetch(&self, id: &PostId) -> Result<Option<Post>, RepositoryError> {
        Ok(lock(&self.tables)?.posts.get(id))
    }

    fn all(&self) -> Result<Vec<Post>, RepositoryError> {
        Ok(lock(&self.tables)?.posts.newest_first())
    }

    fn insert_vote(&self, vote: PostVote) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.tables)?;
        guard.require_post(&vote.post_id)?;
        guard.votes.push(vote);
        Ok(())
    }

    fn insert_report(&self, report: PostReport) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.tables)?;
        guard.require_post(&report.post_id)?;
        guard.reports.push(report);
        Ok(())
    }

    fn dependent_counts(&self, id: &PostId) -> Result<DependentCounts, RepositoryError> {
        Ok(lock(&self.tables)?.counts(id))
    }

    fn purge(&self, id: &PostId) -> Result<DependentCounts, RepositoryError> {
        let mut guard = lock(&self.tables)?;
        guard.require_post(id)?;
        let removed = guard.counts(id);
        guard.votes.retain(|vote| &vote.post_id != id);
        guard.reports.retain(|report| &report.post_id != id);
        guard.posts.rows.remove(id);
        Ok(removed)
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryAuditLog {
    records: Arc<Mutex<Vec<AuditRecord>>>,
}

impl MemoryAuditLog {
    /// Every record in the order it was appended.
    pub fn records(&self) -> Vec<AuditRecord> {
        self.records
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl AuditLog for MemoryAuditLog {
    fn append(&self, record: AuditRecord) -> Result<(), AuditError> {
        self.records
            .lock()
            .map_err(|_| AuditError::Unavailable("audit mutex poisoned".to_string()))?
            .push(record);
        Ok(())
    }

    fn recent(&self, limit: usize) -> Result<Vec<AuditRecord>, AuditError> {
        let guard = self
            .records
            .lock()
            .map_err(|_| AuditError::Unavailable("audit mutex poisoned".to_string()))?;
        Ok(guard.iter().rev().take(limit).cloned().collect())
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryJobCatalog {
    jobs: Arc<Mutex<HashMap<JobId, JobRequirements>>>,
}

impl MemoryJobCatalog {
    pub fn upsert(&self, job: JobRequirements) -> Result<(), RepositoryError> {
        lock(&self.jobs)?.insert(job.job_id.clone(), job);
        Ok(())
    }
}

impl JobCatalog for MemoryJobCatalog {
    fn requirements(&self, id: &JobId) -> Result<Option<JobRequirements>, RepositoryError> {
        Ok(lock(&self.jobs)?.get(id).cloned())
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryProfileDirectory {
    profiles: Arc<Mutex<HashMap<UserId, CandidateProfile>>>,
}

impl MemoryProfileDirectory {
    pub fn upsert(&self, profile: CandidateProfile) -> Result<(), RepositoryError> {
        lock(&self.profiles)?.insert(profile.user_id.clone(), profile);
        Ok(())
    }
}

impl ProfileDirectory for MemoryProfileDirectory {
    fn profile(&self, user: &UserId) -> Result<Option<CandidateProfile>, RepositoryError> {
        Ok(lock(&self.profiles)?.get(user).cloned())
    }
}
