//! Related-term expansion: chunked related-queries calls, deduplicated by
//! normalized term text.

use std::collections::HashSet;

use tracing::{info, warn};

use gtrends_client::RelatedEntry;
use trendwatch_common::{RelatedKeyword, ResultClass, ScoredKeyword};

use crate::config::DiscoveryConfig;
use crate::retry::call_with_retry;
use crate::traits::{Sleeper, TrendSource};

pub struct RelatedExpander<'a> {
    source: &'a dyn TrendSource,
    sleeper: &'a dyn Sleeper,
    config: &'a DiscoveryConfig,
}

impl<'a> RelatedExpander<'a> {
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

    /// Expand the top keywords into related terms, taking up to
    /// `max_per_term` entries per source term and listing ("top" before
    /// "rising"). The first occurrence of a normalized term wins; later
    /// duplicates are dropped. A failed chunk is skipped, the rest still
    /// contribute.
    pub async fn expand_related(
        &self,
        top_keywords: &[ScoredKeyword],
        geo: &str,
        max_per_term: usize,
    ) -> Vec<RelatedKeyword> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut related: Vec<RelatedKeyword> = Vec::new();

        let terms: Vec<String> = top_keywords.iter().map(|k| k.term.clone()).collect();
        let chunks: Vec<&[String]> = terms.chunks(self.config.chunk_size).collect();
        let total = chunks.len();

        for (idx, chunk) in chunks.iter().enumerate() {
            info!(batch = idx + 1, total, terms = ?chunk, "Expanding related queries");

            let result = call_with_retry(self.config.retry, self.sleeper, || {
                self.source
                    .related_queries(chunk, geo, &self.config.timeframe)
            })
            .await;

            match result {
                Ok(results) => {
                    for term in chunk.iter() {
                        let Some(queries) = results.get(term) else {
                            continue;
                        };
                        collect_listing(
                            &mut related,
                            &mut seen,
                            term,
                            ResultClass::Top,
                            &queries.top,
                            max_per_term,
                        );
                        collect_listing(
                            &mut related,
                            &mut seen,
                            term,
                            ResultClass::Rising,
                            &queries.rising,
                            max_per_term,
                        );
                    }
                }
                Err(e) => {
                    warn!(terms = ?chunk, error = %e, "Related batch failed, skipping");
                }
            }

            if idx + 1 < total {
                self.sleeper.sleep(self.config.chunk_pause).await;
            }
        }

        info!(count = related.len(), "Related keywords collected");
        related
    }
}

fn collect_listing(
    out: &mut Vec<RelatedKeyword>,
    seen: &mut HashSet<String>,
    source_term: &str,
    result_class: ResultClass,
    entries: &[RelatedEntry],
    max_per_term: usize,
) {
    for entry in entries.iter().take(max_per_term) {
        let term = entry.query.trim();
        if term.is_empty() || seen.contains(term) {
            continue;
        }
        seen.insert(term.to_string());
        out.push(RelatedKeyword {
            term: term.to_string(),
            source_term: source_term.to_string(),
            result_class,
            value: entry.value.max(0),
        });
    }
}
