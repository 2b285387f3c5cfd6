//! List query integration tests
//!
//! Runs the query coordinator over stored entries and the audit trail:
//! filtering, sorting, pagination totals, facet counting.

mod common;

use serde_json::json;

use tessera_api::{FacetRequest, Predicate, SearchRequest, SortClause, SortOrder};
use tessera_config::{
    ScopeLocks,
    service::{audit, entry},
};

use common::{form, setup};

const TENANT: &str = "diku";

/// Five entries under other_settings with codes {a,a,b,c,c}; the repeated
/// codes live in distinct buckets via a user-scoped owner.
async fn seed_five(db: &sea_orm::DatabaseConnection, locks: &ScopeLocks) {
    for (code, user_id) in [
        (Some("a"), None),
        (Some("a"), Some("u1")),
        (Some("b"), None),
        (Some("c"), None),
        (Some("c"), Some("u1")),
    ] {
        entry::create(
            db,
            locks,
            TENANT,
            None,
            form("CHECKOUT", "other_settings", code, user_id, None),
        )
        .await
        .unwrap();
    }
}

fn eq(field: &str, value: &str) -> Predicate {
    Predicate::Eq {
        field: field.to_string(),
        value: value.into(),
    }
}

#[tokio::test]
async fn test_facet_scenario_top_two_with_tie_break() {
    let db = setup().await;
    let locks = ScopeLocks::new();
    seed_five(&db, &locks).await;

    let request = SearchRequest {
        predicate: Some(eq("configName", "other_settings")),
        facets: vec![FacetRequest {
            field: "code".to_string(),
            top_n: 2,
        }],
        limit: 100,
        ..Default::default()
    };
    let result = entry::search(&db, TENANT, &request).await.unwrap();

    assert_eq!(result.total_records, 5);
    let table = &result.facets["code"];
    assert_eq!(table.len(), 2);
    assert_eq!((table[0].value.as_str(), table[0].count), ("a", 2));
    assert_eq!((table[1].value.as_str(), table[1].count), ("c", 2));
}

#[tokio::test]
async fn test_total_records_is_stable_across_pages() {
    let db = setup().await;
    let locks = ScopeLocks::new();
    seed_five(&db, &locks).await;

    for offset in [0, 2, 4, 100] {
        let request = SearchRequest {
            offset,
            limit: 2,
            ..Default::default()
        };
        let result = entry::search(&db, TENANT, &request).await.unwrap();
        assert_eq!(result.total_records, 5, "offset {offset}");
        if offset >= 5 {
            assert!(result.records.is_empty());
        }
    }
}

#[tokio::test]
async fn test_default_order_is_creation_order() {
    let db = setup().await;
    let locks = ScopeLocks::new();
    seed_five(&db, &locks).await;

    let result = entry::search(&db, TENANT, &SearchRequest::default()).await.unwrap();
    let codes: Vec<_> = result
        .records
        .iter()
        .map(|r| r["code"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(codes, vec!["a", "a", "b", "c", "c"]);
}

#[tokio::test]
async fn test_sort_clause_overrides_creation_order() {
    let db = setup().await;
    let locks = ScopeLocks::new();
    seed_five(&db, &locks).await;

    let request = SearchRequest {
        sort: Some(SortClause {
            field: "code".to_string(),
            order: SortOrder::Descending,
        }),
        ..Default::default()
    };
    let result = entry::search(&db, TENANT, &request).await.unwrap();
    assert_eq!(result.records[0]["code"], "c");
}

#[tokio::test]
async fn test_search_is_tenant_scoped() {
    let db = setup().await;
    let locks = ScopeLocks::new();
    seed_five(&db, &locks).await;
    entry::create(
        &db,
        &locks,
        "other-tenant",
        None,
        form("CHECKOUT", "other_settings", Some("z"), None, None),
    )
    .await
    .unwrap();

    let result = entry::search(&db, TENANT, &SearchRequest::default()).await.unwrap();
    assert_eq!(result.total_records, 5);
}

#[tokio::test]
async fn test_nested_predicate_and_wildcard() {
    let db = setup().await;
    let locks = ScopeLocks::new();
    entry::create(
        &db,
        &locks,
        TENANT,
        Some("amy"),
        form("CHECKOUT", "other_settings", Some("audioAlertsEnabled"), None, None),
    )
    .await
    .unwrap();
    entry::create(
        &db,
        &locks,
        TENANT,
        Some("bob"),
        form("CHECKOUT", "other_settings", Some("checkoutTimeout"), None, None),
    )
    .await
    .unwrap();

    let request = SearchRequest {
        predicate: Some(Predicate::And {
            clauses: vec![
                Predicate::Prefix {
                    field: "code".to_string(),
                    value: "audio".to_string(),
                },
                Predicate::Eq {
                    field: "metadata.createdBy".to_string(),
                    value: json!("amy"),
                },
            ],
        }),
        ..Default::default()
    };
    let result = entry::search(&db, TENANT, &request).await.unwrap();
    assert_eq!(result.total_records, 1);
    assert_eq!(result.records[0]["code"], "audioAlertsEnabled");
}

#[tokio::test]
async fn test_malformed_predicate_surfaces_validation_error() {
    let db = setup().await;

    let request = SearchRequest {
        predicate: Some(eq("", "x")),
        ..Default::default()
    };
    let err = entry::search(&db, TENANT, &request).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<tessera_common::TesseraError>(),
        Some(tessera_common::TesseraError::InvalidParam { .. })
    ));
}

#[tokio::test]
async fn test_audit_browse_supports_the_query_contract() {
    let db = setup().await;
    let locks = ScopeLocks::new();

    let created = entry::create(
        &db,
        &locks,
        TENANT,
        None,
        form("CHECKOUT", "other_settings", Some("x"), None, None),
    )
    .await
    .unwrap();
    let mut update = form("CHECKOUT", "other_settings", Some("x"), None, None);
    update.value = "42".to_string();
    entry::replace(&db, &locks, TENANT, None, &created.id, update)
        .await
        .unwrap();
    entry::delete(&db, TENANT, &created.id).await.unwrap();

    // filter by operation, facet over the operation field
    let request = SearchRequest {
        predicate: Some(eq("operation", "UPDATE")),
        ..Default::default()
    };
    let result = audit::search(&db, TENANT, &request).await.unwrap();
    assert_eq!(result.total_records, 1);
    assert_eq!(result.records[0]["snapshot"]["value"], "42");

    let request = SearchRequest {
        facets: vec![FacetRequest {
            field: "operation".to_string(),
            top_n: 5,
        }],
        ..Default::default()
    };
    let result = audit::search(&db, TENANT, &request).await.unwrap();
    assert_eq!(result.total_records, 3);
    let table = &result.facets["operation"];
    assert_eq!(table.len(), 3);
    for facet in table {
        assert_eq!(facet.count, 1);
    }
}
