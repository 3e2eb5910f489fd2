//! Integration tests for PgSnapshotStore.
//! Requires a Postgres instance. Set DATABASE_TEST_URL or these tests are
//! skipped.

use chrono::{Duration, Utc};
use sqlx::PgPool;

use trendwatch_common::{DiscoverySnapshot, RelatedKeyword, ResultClass, ScoredKeyword};
use trendwatch_discovery::traits::SnapshotStore;
use trendwatch_discovery::PgSnapshotStore;

async fn test_store() -> Option<PgSnapshotStore> {
    let url = std::env::var("DATABASE_TEST_URL").ok()?;
    let pool = PgPool::connect(&url).await.ok()?;
    let store = PgSnapshotStore::new(pool);
    store.ensure_schema().await.ok()?;
    Some(store)
}

fn snapshot(scenario: &str, geo: &str, term: &str, age: Duration) -> DiscoverySnapshot {
    DiscoverySnapshot {
        scenario: scenario.to_string(),
        geo: geo.to_string(),
        top_keywords: vec![ScoredKeyword {
            term: term.to_string(),
            score: 80.0,
        }],
        related_keywords: vec![RelatedKeyword {
            term: format!("{term} 相關"),
            source_term: term.to_string(),
            result_class: ResultClass::Top,
            value: 100,
        }],
        created_at: Utc::now() - age,
    }
}

#[tokio::test]
async fn insert_then_latest_since_round_trips() {
    let Some(store) = test_store().await else {
        return;
    };

    let written = snapshot("旅遊", "round-trip", "旅遊", Duration::zero());
    store.insert(&written).await.unwrap();

    let read = store
        .latest_since("旅遊", "round-trip", Utc::now() - Duration::days(7))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(read.top_keywords, written.top_keywords);
    assert_eq!(read.related_keywords, written.related_keywords);
    assert_eq!(read.scenario, "旅遊");
}

#[tokio::test]
async fn cutoff_excludes_stale_rows() {
    let Some(store) = test_store().await else {
        return;
    };

    store
        .insert(&snapshot("旅遊", "cutoff", "舊資料", Duration::days(10)))
        .await
        .unwrap();

    let fresh = store
        .latest_since("旅遊", "cutoff", Utc::now() - Duration::days(7))
        .await
        .unwrap();
    assert!(fresh.is_none());

    // A wider window still finds it.
    let wide = store
        .latest_since("旅遊", "cutoff", Utc::now() - Duration::days(30))
        .await
        .unwrap();
    assert!(wide.is_some());
}

#[tokio::test]
async fn most_recent_matching_row_wins() {
    let Some(store) = test_store().await else {
        return;
    };

    store
        .insert(&snapshot("健康", "ordering", "第一", Duration::hours(3)))
        .await
        .unwrap();
    store
        .insert(&snapshot("健康", "ordering", "第二", Duration::hours(1)))
        .await
        .unwrap();

    let latest = store
        .latest_since("健康", "ordering", Utc::now() - Duration::days(7))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(latest.top_keywords[0].term, "第二");
}

#[tokio::test]
async fn rows_are_scoped_by_scenario_and_geo() {
    let Some(store) = test_store().await else {
        return;
    };

    store
        .insert(&snapshot("牙科", "scoping", "植牙", Duration::zero()))
        .await
        .unwrap();

    let cutoff = Utc::now() - Duration::days(7);
    assert!(store
        .latest_since("牙科", "other-geo", cutoff)
        .await
        .unwrap()
        .is_none());
    assert!(store
        .latest_since("保健品", "scoping", cutoff)
        .await
        .unwrap()
        .is_none());
    assert!(store
        .latest_since("牙科", "scoping", cutoff)
        .await
        .unwrap()
        .is_some());
}
