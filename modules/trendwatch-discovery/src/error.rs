use thiserror::Error;

/// The only failure surfaced to callers. Rate limits, upstream outages and
/// store failures are all absorbed internally and show up only as degraded
/// data (zero scores, fewer related terms, an uncached response).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiscoveryError {
    #[error("unknown scenario: '{0}'")]
    UnknownScenario(String),
}
