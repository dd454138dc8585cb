//! DAO query behaviour against the in-memory session

#![allow(clippy::unwrap_used)]

use assert_matches::assert_matches;
use tessera_core::{
    AccessInfo, AccessInfoCreator, AccessPermission, AccessPermissionAttribute,
    AccessPermissionCreator, AccessPermissionQuery, Action, AttributeValue, ListResult, Permission,
    Predicate, ScopeId, SortOrder, TesseraError, UserId,
};
use tessera_store::{AccessInfoDao, AccessPermissionDao, EntitySession, MemorySession};

const MAX_LIMIT: usize = 100;

async fn seed_access_info(session: &MemorySession, scope_id: ScopeId) -> AccessInfo {
    let creator = AccessInfoCreator::new(scope_id).with_user_id(UserId::new());
    session
        .on_transacted_insert(move |em| AccessInfoDao::create(em, &creator))
        .await
        .unwrap()
}

async fn grant(
    session: &MemorySession,
    info: &AccessInfo,
    domain: &str,
    action: Action,
) -> AccessPermission {
    let creator = AccessPermissionCreator::new(info.scope_id)
        .with_access_info_id(info.id)
        .with_permission(Permission::new(domain, action, info.scope_id));
    session
        .on_transacted_insert(move |em| AccessPermissionDao::create(em, &creator))
        .await
        .unwrap()
}

#[tokio::test]
async fn query_filters_by_access_info_within_scope() {
    let session = MemorySession::new();
    let scope = ScopeId::new();
    let other_scope = ScopeId::new();

    let alice = seed_access_info(&session, scope).await;
    let bob = seed_access_info(&session, scope).await;
    let stranger = seed_access_info(&session, other_scope).await;

    let a1 = grant(&session, &alice, "device", Action::Read).await;
    let a2 = grant(&session, &alice, "device", Action::Write).await;
    grant(&session, &bob, "device", Action::Read).await;
    grant(&session, &stranger, "device", Action::Read).await;

    let query = AccessPermissionQuery::new(scope).with_predicate(Predicate::equals(
        AccessPermissionAttribute::AccessInfoId,
        AttributeValue::id(alice.id),
    ));
    let result = session
        .on_result(move |em| AccessPermissionDao::query(em, &query, MAX_LIMIT))
        .await
        .unwrap();

    let mut ids: Vec<_> = result.iter().map(|permission| permission.id).collect();
    ids.sort();
    let mut expected = vec![a1.id, a2.id];
    expected.sort();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn query_applies_sort_and_limit() {
    let session = MemorySession::new();
    let scope = ScopeId::new();
    let info = seed_access_info(&session, scope).await;

    for action in [Action::Write, Action::Read, Action::Delete] {
        grant(&session, &info, "device", action).await;
    }

    let query = AccessPermissionQuery::new(scope)
        .with_sort(AccessPermissionAttribute::Action, SortOrder::Ascending)
        .with_limit(2);
    let count_query = query.clone();

    let page = session
        .on_result(move |em| AccessPermissionDao::query(em, &query, MAX_LIMIT))
        .await
        .unwrap();
    let actions: Vec<_> = page
        .iter()
        .map(|permission| permission.permission.action.unwrap())
        .collect();
    assert_eq!(actions, vec![Action::Delete, Action::Read]);
    assert!(page.limit_exceeded);

    let total = session
        .on_result(move |em| Ok(AccessPermissionDao::count(em, &count_query)))
        .await
        .unwrap();
    assert_eq!(total, 3);
}

#[tokio::test]
async fn query_limit_is_capped() {
    let session = MemorySession::new();
    let scope = ScopeId::new();
    let info = seed_access_info(&session, scope).await;
    for action in Action::ALL {
        grant(&session, &info, "device", action).await;
    }

    let query = AccessPermissionQuery::new(scope).with_limit(1_000);
    let page = session
        .on_result(move |em| AccessPermissionDao::query(em, &query, 2))
        .await
        .unwrap();
    assert_eq!(page.len(), 2);
    assert!(page.limit_exceeded);
}

#[tokio::test]
async fn zero_limit_is_rejected() {
    let session = MemorySession::new();
    let query = AccessPermissionQuery::new(ScopeId::new()).with_limit(0);
    let result = session
        .on_result(move |em| AccessPermissionDao::query(em, &query, MAX_LIMIT))
        .await;
    assert_matches!(result, Err(TesseraError::IllegalArgument { .. }));
}

#[tokio::test]
async fn delete_by_access_info_removes_only_its_grants() {
    let session = MemorySession::new();
    let scope = ScopeId::new();
    let alice = seed_access_info(&session, scope).await;
    let bob = seed_access_info(&session, scope).await;
    grant(&session, &alice, "device", Action::Read).await;
    grant(&session, &alice, "user", Action::Read).await;
    let kept = grant(&session, &bob, "device", Action::Read).await;

    let alice_id = alice.id;
    let removed = session
        .on_transacted_insert(move |em| {
            Ok(AccessPermissionDao::delete_by_access_info_id(em, &alice_id))
        })
        .await
        .unwrap();
    assert_eq!(removed, 2);

    let tables = session.snapshot().await;
    assert_eq!(tables.access_permission_count(), 1);
    let kept_id = kept.id;
    let still_there = session
        .on_result(move |em| Ok(AccessPermissionDao::find(em, &kept_id)))
        .await
        .unwrap();
    assert!(still_there.is_some());
}

#[tokio::test]
async fn delete_missing_is_not_found() {
    let session = MemorySession::new();
    let missing = tessera_core::AccessPermissionId::new();
    let result = session
        .on_transacted_action(move |em| AccessPermissionDao::delete(em, &missing).map(|_| ()))
        .await;
    assert_matches!(result, Err(TesseraError::NotFound { .. }));
}

#[tokio::test]
async fn offset_pages_through_sorted_results() {
    let session = MemorySession::new();
    let scope = ScopeId::new();
    let info = seed_access_info(&session, scope).await;
    for action in Action::ALL {
        grant(&session, &info, "device", action).await;
    }

    let sorted = AccessPermissionQuery::new(scope)
        .with_sort(AccessPermissionAttribute::Action, SortOrder::Ascending)
        .with_limit(2);
    let page_at = |offset: usize| {
        let query = sorted.clone().with_offset(offset);
        let session = session.clone();
        async move {
            session
                .on_result(move |em| AccessPermissionDao::query(em, &query, MAX_LIMIT))
                .await
                .unwrap()
        }
    };

    let actions = |page: &ListResult<AccessPermission>| -> Vec<Action> {
        page.iter()
            .map(|permission| permission.permission.action.unwrap())
            .collect()
    };

    let middle = page_at(1).await;
    assert_eq!(actions(&middle), vec![Action::Delete, Action::Execute]);
    assert!(middle.limit_exceeded);

    let last = page_at(3).await;
    assert_eq!(actions(&last), vec![Action::Read, Action::Write]);
    assert!(!last.limit_exceeded);

    let past_end = page_at(5).await;
    assert!(past_end.is_empty());
    assert!(!past_end.limit_exceeded);
    assert_eq!(past_end.first_item(), None);
    assert_eq!(
        last.first_item().map(|granted| granted.permission.action),
        Some(Some(Action::Read))
    );
}
