use std::sync::Arc;

use super::common::*;
use crate::api::PageRequest;
use crate::audit::{AuditAction, AuditTarget};
use crate::moderation::{
    DependentCounts, ModerationError, ModerationService, ModerationStatus, PostId, PostQuery,
    PostRepository, TransitionError,
};
use crate::storage::memory::MemoryAuditLog;
use crate::storage::RepositoryError;

#[test]
fn reject_with_reason_deactivates_and_audits_once() {
    let (service, _, audit) = build_service();
    let id = PostId("post-1".into());

    let post = service
        .reject(&moderator(), &id, Some("spam".into()))
        .expect("pending post rejects");

    assert_eq!(post.moderation_status, ModerationStatus::Rejected);
    assert!(!post.is_active);
    assert_eq!(post.rejection_reason.as_deref(), Some("spam"));
    assert_eq!(post.moderated_by, Some(moderator()));

    let records = audit.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].action, AuditAction::Reject);
    assert_eq!(records[0].reason.as_deref(), Some("spam"));
    assert_eq!(records[0].target, AuditTarget::Post(id));
}

#[test]
fn approve_then_reject_is_an_invalid_transition() {
    let (service, posts, audit) = build_service();
    let id = PostId("post-2".into());

    let approved = service.approve(&moderator(), &id).expect("approve");
    assert!(approved.is_active);

    match service.reject(&moderator(), &id, None) {
        Err(ModerationError::InvalidTransition(TransitionError::AlreadyModerated(
            ModerationStatus::Approved,
        ))) => {}
        other => panic!("expected invalid transition, got {other:?}"),
    }
    assert!(matches!(
        service.approve(&moderator(), &id),
        Err(ModerationError::InvalidTransition(_))
    ));

    let stored = posts.fetch(&id).expect("fetch").expect("present");
    assert_eq!(stored.moderation_status, ModerationStatus::Approved);
    assert_eq!(audit.records().len(), 1, "failed transitions are not audited");
}

#[test]
fn soft_delete_and_restore_keep_status_and_are_audited() {
    let (service, posts, audit) = build_service();
    let id = PostId("post-3".into());
    service.approve(&super_admin(), &id).expect("approve");

    let deleted = service
        .soft_delete(&super_admin(), &id, Some("duplicate".into()))
        .expect("soft delete");
    assert!(deleted.is_deleted);
    assert!(deleted.deleted_at.is_some());
    assert_eq!(deleted.moderation_status, ModerationStatus::Approved);
    assert!(posts.fetch(&id).expect("fetch").is_some(), "row is kept");

    let restored = service.restore(&super_admin(), &id).expect("restore");
    assert!(!restored.is_deleted);
    assert!(restored.deleted_at.is_none());

    let actions: Vec<_> = audit.records().iter().map(|record| record.action).collect();
    assert_eq!(
        actions,
        vec![AuditAction::Approve, AuditAction::Delete, AuditAction::Restore]
    );
    assert!(matches!(
        service.restore(&super_admin(), &id),
        Err(ModerationError::InvalidTransition(TransitionError::NotDeleted))
    ));
}

#[test]
fn permanent_delete_purges_votes_and_reports() {
    let (service, posts, audit) = build_service();
    let id = PostId("post-1".into());
    add_engagement(&posts, "post-1", 3, 2);
    add_engagement(&posts, "post-2", 1, 1);

    let removed = service
        .permanent_delete(&super_admin(), &id, None)
        .expect("purge");

    assert_eq!(removed, DependentCounts { votes: 3, reports: 2 });
    assert!(posts.fetch(&id).expect("fetch").is_none());
    assert_eq!(
        posts.dependent_counts(&id).expect("counts"),
        DependentCounts::default()
    );
    assert_eq!(
        posts
            .dependent_counts(&PostId("post-2".into()))
            .expect("counts"),
        DependentCounts { votes: 1, reports: 1 }
    );
    assert_eq!(audit.records()[0].action, AuditAction::PermanentDelete);

    assert!(matches!(
        service.permanent_delete(&super_admin(), &id, None),
        Err(ModerationError::NotFound(_))
    ));
}

#[test]
fn permanent_delete_writes_audit_before_purging() {
    let posts = Arc::new(FailingPurgeStore::default());
    posts.insert(pending_post("post-9")).expect("seed");
    let audit = Arc::new(MemoryAuditLog::default());
    let service = ModerationService::new(posts.clone(), audit.clone());

    let err = service
        .permanent_delete(&super_admin(), &PostId("post-9".into()), Some("illegal".into()))
        .expect_err("purge fails");

    assert!(matches!(
        err,
        ModerationError::Repository(RepositoryError::Unavailable(_))
    ));
    let records = audit.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].action, AuditAction::PermanentDelete);
    assert!(posts
        .fetch(&PostId("post-9".into()))
        .expect("fetch")
        .is_some());
}

#[test]
fn deleted_posts_cannot_be_moderated() {
    let (service, _, _) = build_service();
    let id = PostId("post-2".into());
    service.soft_delete(&moderator(), &id, None).expect("delete");

    assert!(matches!(
        service.approve(&moderator(), &id),
        Err(ModerationError::InvalidTransition(TransitionError::Deleted))
    ));
    assert!(matches!(
        service.soft_delete(&moderator(), &id, None),
        Err(ModerationError::InvalidTransition(TransitionError::Deleted))
    ));
}

#[test]
fn list_filters_by_status_search_and_deletion() {
    let (service, _, _) = build_service();
    service
        .approve(&moderator(), &PostId("post-1".into()))
        .expect("approve");
    service
        .soft_delete(&moderator(), &PostId("post-3".into()), None)
        .expect("delete");

    let pending = service
        .list(
            &PostQuery {
                status: Some(ModerationStatus::Pending),
                ..PostQuery::default()
            },
            PageRequest::default(),
        )
        .expect("list");
    assert_eq!(pending.pagination.total, 1);
    assert_eq!(pending.items[0].id, PostId("post-2".into()));

    let deleted = service
        .list(
            &PostQuery {
                is_deleted: Some(true),
                ..PostQuery::default()
            },
            PageRequest::default(),
        )
        .expect("list");
    assert_eq!(deleted.items.len(), 1);
    assert_eq!(deleted.items[0].id, PostId("post-3".into()));

    let search = service
        .list(
            &PostQuery {
                search: Some("TIPS POST-1".into()),
                ..PostQuery::default()
            },
            PageRequest::default(),
        )
        .expect("list");
    assert_eq!(search.items.len(), 1);

    let paged = service
        .list(
            &PostQuery::default(),
            PageRequest::new(Some(2), Some(1)).expect("page"),
        )
        .expect("list");
    assert_eq!(paged.pagination.total, 2);
    assert_eq!(paged.pagination.total_pages, 2);
    assert_eq!(paged.items[0].id, PostId("post-1".into()));
}
