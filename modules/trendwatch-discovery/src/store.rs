//! Postgres-backed snapshot persistence.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};

use trendwatch_common::DiscoverySnapshot;

use crate::traits::SnapshotStore;

/// Append-only snapshot table. Stale rows are never deleted; recency
/// ordering supersedes them.
#[derive(Clone)]
pub struct PgSnapshotStore {
    pool: PgPool,
}

impl PgSnapshotStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the snapshot table and lookup index if missing. Idempotent.
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS keyword_snapshots (
                id               BIGSERIAL    PRIMARY KEY,
                scenario         TEXT         NOT NULL,
                geo              TEXT         NOT NULL DEFAULT 'TW',
                top_keywords     JSONB        NOT NULL,
                related_keywords JSONB        NOT NULL,
                created_at       TIMESTAMPTZ  NOT NULL DEFAULT now()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_kw_snap_lookup
             ON keyword_snapshots (scenario, geo, created_at DESC)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl SnapshotStore for PgSnapshotStore {
    async fn insert(&self, snapshot: &DiscoverySnapshot) -> Result<()> {
        sqlx::query(
            "INSERT INTO keyword_snapshots
                 (scenario, geo, top_keywords, related_keywords, created_at)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(&snapshot.scenario)
        .bind(&snapshot.geo)
        .bind(serde_json::to_value(&snapshot.top_keywords)?)
        .bind(serde_json::to_value(&snapshot.related_keywords)?)
        .bind(snapshot.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn latest_since(
        &self,
        scenario: &str,
        geo: &str,
        cutoff: DateTime<Utc>,
    ) -> Result<Option<DiscoverySnapshot>> {
        let row = sqlx::query(
            "SELECT scenario, geo, top_keywords, related_keywords, created_at
             FROM keyword_snapshots
             WHERE scenario = $1 AND geo = $2 AND created_at >= $3
             ORDER BY created_at DESC
             LIMIT 1",
        )
        .bind(scenario)
        .bind(geo)
        .bind(cutoff)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| -> Result<DiscoverySnapshot> {
            let top: serde_json::Value = row.try_get("top_keywords")?;
            let related: serde_json::Value = row.try_get("related_keywords")?;
            Ok(DiscoverySnapshot {
                scenario: row.try_get("scenario")?,
                geo: row.try_get("geo")?,
                top_keywords: serde_json::from_value(top)?,
                related_keywords: serde_json::from_value(related)?,
                created_at: row.try_get("created_at")?,
            })
        })
        .transpose()
    }
}
