//! Discovery sequencing: cache lookup → scoring → expansion → cache write →
//! service annotation.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::info;

use trendwatch_common::{
    annotate, scenario_names, seeds_for, DiscoveryView, RelatedKeyword, ScoredKeyword,
};

use crate::cache::SnapshotCache;
use crate::config::DiscoveryConfig;
use crate::error::DiscoveryError;
use crate::expander::RelatedExpander;
use crate::scorer::BatchScorer;
use crate::traits::{Clock, Sleeper, SnapshotStore, TrendSource};

/// The public entry point for keyword discovery. All dependencies are
/// injected at construction; binaries wire the real client, store, sleeper
/// and clock, tests substitute fakes.
pub struct DiscoveryOrchestrator {
    source: Arc<dyn TrendSource>,
    cache: SnapshotCache,
    sleeper: Arc<dyn Sleeper>,
    config: DiscoveryConfig,
    // Per-(scenario, geo) single-flight locks: concurrent cache-miss callers
    // collapse onto one recomputation.
    inflight: Mutex<HashMap<(String, String), Arc<Mutex<()>>>>,
}

impl DiscoveryOrchestrator {
    pub fn new(
        source: Arc<dyn TrendSource>,
        store: Arc<dyn SnapshotStore>,
        sleeper: Arc<dyn Sleeper>,
        clock: Arc<dyn Clock>,
        config: DiscoveryConfig,
    ) -> Self {
        Self {
            cache: SnapshotCache::new(store, clock, config.ttl),
            source,
            sleeper,
            config,
            inflight: Mutex::new(HashMap::new()),
        }
    }

    /// All configured scenario names.
    pub fn list_scenarios(&self) -> Vec<String> {
        scenario_names()
    }

    /// Discover the loudest keywords for a scenario and their related
    /// terms. Serves from the snapshot cache when a fresh row exists and
    /// `force_refresh` is off; otherwise recomputes and caches best-effort.
    ///
    /// Only an unknown scenario is an error. Upstream and store failures
    /// degrade to partial data.
    pub async fn discover(
        &self,
        scenario: &str,
        geo: &str,
        top_n: usize,
        force_refresh: bool,
    ) -> Result<DiscoveryView, DiscoveryError> {
        if seeds_for(scenario).is_none() {
            return Err(DiscoveryError::UnknownScenario(scenario.to_string()));
        }

        if !force_refresh {
            if let Some(snapshot) = self.cache.read(scenario, geo).await {
                return Ok(assemble(
                    scenario,
                    geo,
                    &snapshot.top_keywords,
                    &snapshot.related_keywords,
                    snapshot.created_at,
                    true,
                ));
            }
        }

        let key_lock = self.key_lock(scenario, geo).await;
        let _guard = key_lock.lock().await;

        // A concurrent miss may have filled the cache while we waited on
        // the lock.
        if !force_refresh {
            if let Some(snapshot) = self.cache.read(scenario, geo).await {
                return Ok(assemble(
                    scenario,
                    geo,
                    &snapshot.top_keywords,
                    &snapshot.related_keywords,
                    snapshot.created_at,
                    true,
                ));
            }
        }

        info!(scenario, geo, top_n, force_refresh, "Starting keyword discovery");

        let scorer = BatchScorer::new(self.source.as_ref(), self.sleeper.as_ref(), &self.config);
        let top_keywords = scorer.score_top_keywords(scenario, geo, top_n).await?;

        // The scoring and expansion stages share the source's client-wide
        // rate limit; pause between them.
        self.sleeper.sleep(self.config.stage_pause).await;

        let expander = RelatedExpander::new(self.source.as_ref(), self.sleeper.as_ref(), &self.config);
        let related_keywords = expander
            .expand_related(&top_keywords, geo, self.config.max_related_per_term)
            .await;

        let created_at = self
            .cache
            .write(scenario, geo, &top_keywords, &related_keywords)
            .await;

        Ok(assemble(
            scenario,
            geo,
            &top_keywords,
            &related_keywords,
            created_at,
            false,
        ))
    }

    async fn key_lock(&self, scenario: &str, geo: &str) -> Arc<Mutex<()>> {
        let mut inflight = self.inflight.lock().await;
        inflight
            .entry((scenario.to_string(), geo.to_string()))
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

/// Annotate both keyword lists with the current service table and assemble
/// the response. Annotation happens on every read, cache hit or not.
fn assemble(
    scenario: &str,
    geo: &str,
    top_keywords: &[ScoredKeyword],
    related_keywords: &[RelatedKeyword],
    as_of: DateTime<Utc>,
    served_from_cache: bool,
) -> DiscoveryView {
    DiscoveryView {
        scenario: scenario.to_string(),
        geo: geo.to_string(),
        top_keywords: top_keywords.iter().map(|k| annotate(k, scenario)).collect(),
        related_keywords: related_keywords
            .iter()
            .map(|k| annotate(k, scenario))
            .collect(),
        as_of,
        served_from_cache,
    }
}
