//! Core value types for keyword discovery.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::services::services_for;

/// A seed term scored by its mean search volume over the discovery window.
///
/// A score of 0.0 means the upstream source returned no data for the term
/// (or the whole chunk failed), never that the term was dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredKeyword {
    pub term: String,
    pub score: f64,
}

/// Which related-queries listing a term came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultClass {
    Top,
    Rising,
}

impl std::fmt::Display for ResultClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResultClass::Top => write!(f, "top"),
            ResultClass::Rising => write!(f, "rising"),
        }
    }
}

/// A related search term expanded from one of the top keywords.
///
/// `term` is unique within one expansion run after whitespace trimming;
/// the first occurrence wins (source-term order, top before rising).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedKeyword {
    pub term: String,
    pub source_term: String,
    pub result_class: ResultClass,
    pub value: i64,
}

/// One immutable discovery result for a (scenario, geo) pair.
///
/// The store keeps an append-only history; only the most recent row inside
/// the TTL window is ever read back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoverySnapshot {
    pub scenario: String,
    pub geo: String,
    pub top_keywords: Vec<ScoredKeyword>,
    pub related_keywords: Vec<RelatedKeyword>,
    pub created_at: DateTime<Utc>,
}

/// A keyword plus the services joined in from the curated lookup table.
///
/// Services are never stored with a snapshot; they are recomputed on every
/// read so lookup-table edits take effect without invalidating the cache.
#[derive(Debug, Clone, Serialize)]
pub struct Annotated<K> {
    #[serde(flatten)]
    pub keyword: K,
    pub services: Vec<String>,
}

/// Anything carrying a search term that can be annotated.
pub trait HasTerm {
    fn term(&self) -> &str;
}

impl HasTerm for ScoredKeyword {
    fn term(&self) -> &str {
        &self.term
    }
}

impl HasTerm for RelatedKeyword {
    fn term(&self) -> &str {
        &self.term
    }
}

/// Join a keyword against the service lookup table. Pure; the input is not
/// mutated.
pub fn annotate<K: HasTerm + Clone>(keyword: &K, scenario: &str) -> Annotated<K> {
    Annotated {
        services: services_for(keyword.term(), scenario),
        keyword: keyword.clone(),
    }
}

/// The response assembled by the orchestrator for one discovery request.
#[derive(Debug, Clone, Serialize)]
pub struct DiscoveryView {
    pub scenario: String,
    pub geo: String,
    pub top_keywords: Vec<Annotated<ScoredKeyword>>,
    pub related_keywords: Vec<Annotated<RelatedKeyword>>,
    pub as_of: DateTime<Utc>,
    pub served_from_cache: bool,
}
