//! Seed scoring: chunked interest-over-time calls reduced to mean scores.

use std::collections::HashMap;

use tracing::{info, warn};

use trendwatch_common::{seeds_for, ScoredKeyword};

use crate::config::DiscoveryConfig;
use crate::error::DiscoveryError;
use crate::retry::call_with_retry;
use crate::traits::{Sleeper, TrendSource};

pub struct BatchScorer<'a> {
    source: &'a dyn TrendSource,
    sleeper: &'a dyn Sleeper,
    config: &'a DiscoveryConfig,
}

impl<'a> BatchScorer<'a> {
    pub fn new(
        source: &'a dyn TrendSource,
        sleeper: &'a dyn Sleeper,
        config: &'a DiscoveryConfig,
    ) -> Self {
        Self {
            source,
            sleeper,
            config,
        }
    }

    /// Score a scenario's seed terms by mean search volume over the
    /// discovery window and return the `top_n` loudest, ranked descending.
    ///
    /// A failed chunk (including exhausted retries) scores every term in it
    /// 0.0 instead of aborting the scenario. Ties keep seed-list order.
    pub async fn score_top_keywords(
        &self,
        scenario: &str,
        geo: &str,
        top_n: usize,
    ) -> Result<Vec<ScoredKeyword>, DiscoveryError> {
        let seeds = seeds_for(scenario)
            .ok_or_else(|| DiscoveryError::UnknownScenario(scenario.to_string()))?;

        let mut scores: HashMap<&str, f64> = HashMap::new();
        let chunks: Vec<&[&str]> = seeds.chunks(self.config.chunk_size).collect();
        let total = chunks.len();

        for (idx, chunk) in chunks.iter().enumerate() {
            let terms: Vec<String> = chunk.iter().map(|s| (*s).to_string()).collect();
            info!(scenario, batch = idx + 1, total, ?terms, "Scoring seed batch");

            let result = call_with_retry(self.config.retry, self.sleeper, || {
                self.source
                    .interest_over_time(&terms, geo, &self.config.timeframe)
            })
            .await;

            match result {
                Ok(series) => {
                    for term in *chunk {
                        let score = series.get(*term).map(|v| mean(v)).unwrap_or(0.0);
                        scores.insert(*term, round2(score));
                    }
                }
                Err(e) => {
                    warn!(?terms, error = %e, "Seed batch failed, scoring zero");
                    for term in *chunk {
                        scores.insert(*term, 0.0);
                    }
                }
            }

            if idx + 1 < total {
                self.sleeper.sleep(self.config.chunk_pause).await;
            }
        }

        // Stable sort: equal scores keep seed-list order.
        let mut ranked: Vec<ScoredKeyword> = seeds
            .iter()
            .map(|term| ScoredKeyword {
                term: (*term).to_string(),
                score: scores.get(term).copied().unwrap_or(0.0),
            })
            .collect();
        ranked.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked.truncate(top_n.min(seeds.len()));

        info!(scenario, count = ranked.len(), "Top keywords ranked");
        Ok(ranked)
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockTrendSource, RecordingSleeper};

    fn config() -> DiscoveryConfig {
        DiscoveryConfig::default()
    }

    #[tokio::test]
    async fn ranks_by_mean_score_descending() {
        let source = MockTrendSource::new()
            .on_series("旅遊", &[80.0, 80.0])
            .on_series("機票", &[60.0, 70.0])
            .on_series("訂房", &[10.0, 10.0]);
        let sleeper = RecordingSleeper::new();
        let config = config();
        let scorer = BatchScorer::new(&source, &sleeper, &config);

        let top = scorer.score_top_keywords("旅遊", "TW", 3).await.unwrap();

        assert_eq!(top.len(), 3);
        assert_eq!(top[0].term, "旅遊");
        assert_eq!(top[0].score, 80.0);
        assert_eq!(top[1].term, "機票");
        assert_eq!(top[1].score, 65.0);
    }

    #[tokio::test]
    async fn chunks_ten_seeds_into_two_calls_with_one_pause() {
        let source = MockTrendSource::new();
        let sleeper = RecordingSleeper::new();
        let config = config();
        let scorer = BatchScorer::new(&source, &sleeper, &config);

        scorer.score_top_keywords("健康", "TW", 5).await.unwrap();

        assert_eq!(source.series_call_count(), 2);
        assert_eq!(sleeper.sleeps(), vec![config.chunk_pause]);
    }

    #[tokio::test]
    async fn missing_terms_score_exactly_zero() {
        let source = MockTrendSource::new().on_series("牙科", &[50.0]);
        let sleeper = RecordingSleeper::new();
        let config = config();
        let scorer = BatchScorer::new(&source, &sleeper, &config);

        let top = scorer.score_top_keywords("牙科", "TW", 10).await.unwrap();

        assert_eq!(top.len(), 10);
        assert_eq!(top[0].term, "牙科");
        assert!(top[1..].iter().all(|k| k.score == 0.0));
    }

    #[tokio::test]
    async fn zero_score_ties_keep_seed_order() {
        let source = MockTrendSource::new();
        let sleeper = RecordingSleeper::new();
        let config = config();
        let scorer = BatchScorer::new(&source, &sleeper, &config);

        let top = scorer.score_top_keywords("保健品", "TW", 3).await.unwrap();

        let terms: Vec<&str> = top.iter().map(|k| k.term.as_str()).collect();
        assert_eq!(terms, vec!["保健品", "維他命", "益生菌"]);
    }

    #[tokio::test]
    async fn failed_chunk_degrades_to_zero_scores() {
        // First chunk of 健康 contains 健康; fail it, leave the second alone.
        let source = MockTrendSource::new()
            .fail_series_for("健康")
            .on_series("減重", &[44.0]);
        let sleeper = RecordingSleeper::new();
        let config = config();
        let scorer = BatchScorer::new(&source, &sleeper, &config);

        let top = scorer.score_top_keywords("健康", "TW", 10).await.unwrap();

        assert_eq!(top[0].term, "減重");
        assert_eq!(top[0].score, 44.0);
        let zeroed: Vec<_> = top.iter().filter(|k| k.score == 0.0).collect();
        assert_eq!(zeroed.len(), 9);
    }

    #[tokio::test]
    async fn top_n_is_clamped_to_seed_count() {
        let source = MockTrendSource::new();
        let sleeper = RecordingSleeper::new();
        let config = config();
        let scorer = BatchScorer::new(&source, &sleeper, &config);

        let top = scorer.score_top_keywords("旅遊", "TW", 50).await.unwrap();
        assert_eq!(top.len(), 10);
    }

    #[tokio::test]
    async fn unknown_scenario_makes_no_external_call() {
        let source = MockTrendSource::new();
        let sleeper = RecordingSleeper::new();
        let config = config();
        let scorer = BatchScorer::new(&source, &sleeper, &config);

        let err = scorer
            .score_top_keywords("sports", "TW", 5)
            .await
            .unwrap_err();

        assert_eq!(err, DiscoveryError::UnknownScenario("sports".into()));
        assert_eq!(source.series_call_count(), 0);
    }

    #[tokio::test]
    async fn scores_are_rounded_to_two_decimals() {
        let source = MockTrendSource::new().on_series("植牙", &[1.0, 2.0, 2.0]);
        let sleeper = RecordingSleeper::new();
        let config = config();
        let scorer = BatchScorer::new(&source, &sleeper, &config);

        let top = scorer.score_top_keywords("牙科", "TW", 1).await.unwrap();
        assert_eq!(top[0].score, 1.67);
    }
}
