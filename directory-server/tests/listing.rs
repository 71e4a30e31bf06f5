//! Employee listing: pagination, search, sorting and redaction

mod common;

use std::sync::Arc;

use common::{CountingStore, admin, seed, service_with, staff};
use directory_server::db::DirectoryStore;
use directory_server::directory::PageRequest;
use shared::ErrorCode;

fn page(page: i64, page_size: i64) -> PageRequest {
    PageRequest {
        page: Some(page),
        page_size: Some(page_size),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_pages_over_25_records() {
    let store = Arc::new(CountingStore::new());
    seed(store.as_ref(), 25).await;
    let service = service_with(store.clone());
    let viewer = staff();

    for (n, expected) in [(1, 10), (2, 10), (3, 5), (4, 0), (9, 0)] {
        let result = service
            .list_employees(Some(&viewer), &page(n, 10))
            .await
            .unwrap();
        assert_eq!(result.items.len(), expected, "page {n}");
        assert_eq!(result.total, 25, "total is independent of the window");
        assert_eq!(result.page, n);
        assert_eq!(result.page_size, 10);
        assert_eq!(result.total_pages, 3);
    }
}

#[tokio::test]
async fn test_window_length_formula() {
    let store = Arc::new(CountingStore::new());
    seed(store.as_ref(), 13).await;
    let service = service_with(store.clone());
    let viewer = staff();

    for page_size in [1_i64, 4, 5, 13, 20] {
        for n in 1..=5_i64 {
            let result = service
                .list_employees(Some(&viewer), &page(n, page_size))
                .await
                .unwrap();
            let expected = page_size.min((result.total - (n - 1) * page_size).max(0));
            assert_eq!(result.items.len() as i64, expected, "page {n} size {page_size}");
        }
    }
}

#[tokio::test]
async fn test_pages_do_not_overlap() {
    let store = Arc::new(CountingStore::new());
    seed(store.as_ref(), 25).await;
    let service = service_with(store.clone());
    let viewer = admin();

    let mut seen = std::collections::HashSet::new();
    for n in 1..=3 {
        let result = service
            .list_employees(Some(&viewer), &page(n, 10))
            .await
            .unwrap();
        for item in result.items {
            assert!(seen.insert(item.id.to_string()), "duplicate across pages");
        }
    }
    assert_eq!(seen.len(), 25);
}

#[tokio::test]
async fn test_every_result_matches_search() {
    let store = Arc::new(CountingStore::new());
    seed(store.as_ref(), 25).await;
    let service = service_with(store.clone());
    let viewer = staff();

    for term in ["sales", "MANAGER", "family1", "person0", "@example", "nobody-matches"] {
        let result = service
            .list_employees(
                Some(&viewer),
                &PageRequest {
                    page_size: Some(100),
                    search: Some(term.into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let needle = term.to_lowercase();
        for e in &result.items {
            let hit = [&e.first_name, &e.last_name, &e.email, &e.department, &e.position]
                .iter()
                .any(|v| v.to_lowercase().contains(&needle));
            assert!(hit, "{term} not found in {:?}", e);
        }
        assert_eq!(result.total, result.items.len() as i64);
    }
}

#[tokio::test]
async fn test_search_counts_before_paging() {
    let store = Arc::new(CountingStore::new());
    seed(store.as_ref(), 25).await;
    let service = service_with(store.clone());

    // 25 records, departments rotate over 3 values: indices 0,3,...,24 are Sales
    let result = service
        .list_employees(
            Some(&staff()),
            &PageRequest {
                page: Some(2),
                page_size: Some(5),
                search: Some("Sales".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(result.total, 9);
    assert_eq!(result.items.len(), 4);
}

#[tokio::test]
async fn test_empty_search_matches_all() {
    let store = Arc::new(CountingStore::new());
    seed(store.as_ref(), 7).await;
    let service = service_with(store.clone());

    let result = service
        .list_employees(
            Some(&staff()),
            &PageRequest {
                search: Some(String::new()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(result.total, 7);
}

#[tokio::test]
async fn test_sort_direction() {
    let store = Arc::new(CountingStore::new());
    seed(store.as_ref(), 12).await;
    let service = service_with(store.clone());
    let viewer = staff();

    let names = |dir: &str| PageRequest {
        page_size: Some(100),
        sort_field: Some("name".into()),
        sort_dir: Some(dir.into()),
        ..Default::default()
    };

    let asc: Vec<String> = service
        .list_employees(Some(&viewer), &names("asc"))
        .await
        .unwrap()
        .items
        .into_iter()
        .map(|e| e.first_name)
        .collect();
    let mut expected = asc.clone();
    expected.sort();
    assert_eq!(asc, expected);

    let desc: Vec<String> = service
        .list_employees(Some(&viewer), &names("desc"))
        .await
        .unwrap()
        .items
        .into_iter()
        .map(|e| e.first_name)
        .collect();
    expected.reverse();
    assert_eq!(desc, expected);
}

#[tokio::test]
async fn test_invalid_sort_never_reaches_storage() {
    let store = Arc::new(CountingStore::new());
    seed(store.as_ref(), 3).await;
    store.reset();
    let service = service_with(store.clone());

    for (field, dir) in [("salary", "asc"), ("name", "sideways"), ("firstName", "asc")] {
        let err = service
            .list_employees(
                Some(&admin()),
                &PageRequest {
                    sort_field: Some(field.into()),
                    sort_dir: Some(dir.into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidSortParameters);
    }
    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn test_anonymous_listing_rejected_before_storage() {
    let store = Arc::new(CountingStore::new());
    let service = service_with(store.clone());

    let err = service
        .list_employees(None, &PageRequest::default())
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::NotAuthenticated);
    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn test_redaction_per_role() {
    let store = Arc::new(CountingStore::new());
    let records = seed(store.as_ref(), 5).await;
    store.set_flagged(records[0].id, true).await.unwrap();
    let service = service_with(store.clone());
    let request = PageRequest {
        page_size: Some(100),
        ..Default::default()
    };

    let as_staff = service.list_employees(Some(&staff()), &request).await.unwrap();
    assert_eq!(as_staff.items.len(), 5);
    for e in &as_staff.items {
        assert_eq!(e.flagged, None);
        assert_eq!(e.created_at, None);
        assert_eq!(e.updated_at, None);
    }

    let as_admin = service.list_employees(Some(&admin()), &request).await.unwrap();
    for e in &as_admin.items {
        let stored = store
            .find_by_id(e.id.parse().unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(e.flagged, Some(stored.flagged));
        assert_eq!(
            e.created_at.as_deref(),
            Some(shared::util::millis_to_rfc3339(stored.created_at).as_str())
        );
        assert_eq!(
            e.updated_at.as_deref(),
            Some(shared::util::millis_to_rfc3339(stored.updated_at).as_str())
        );
    }
    assert!(as_admin.items.iter().any(|e| e.flagged == Some(true)));
}
