use serde::{Deserialize, Serialize};

// --- Explore response ---

/// One widget descriptor from the explore response. The `request` payload is
/// passed back verbatim to the widgetdata endpoint together with the token.
#[derive(Debug, Clone, Deserialize)]
pub struct Widget {
    pub id: String,
    pub token: String,
    pub request: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ExploreResponse {
    pub widgets: Vec<Widget>,
}

// --- Timeseries (widgetdata/multiline) ---

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct MultilineResponse {
    pub default: MultilineDefault,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct MultilineDefault {
    #[serde(rename = "timelineData")]
    pub timeline_data: Vec<TimelinePoint>,
}

/// One sampled point across all queried terms. `value[i]` belongs to the
/// i-th comparison item of the originating explore request.
#[derive(Debug, Clone, Deserialize)]
pub struct TimelinePoint {
    pub time: String,
    #[serde(default)]
    pub value: Vec<f64>,
}

// --- Related queries (widgetdata/relatedsearches) ---

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RelatedResponse {
    pub default: RelatedDefault,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RelatedDefault {
    /// First list is "top", second is "rising". Either may be absent.
    #[serde(rename = "rankedList", default)]
    pub ranked_list: Vec<RankedList>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RankedList {
    #[serde(rename = "rankedKeyword", default)]
    pub ranked_keyword: Vec<RankedKeyword>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RankedKeyword {
    pub query: String,
    #[serde(default)]
    pub value: i64,
}

// --- Public result types ---

/// A related search term with its popularity value (0–100 for "top",
/// percentage growth for "rising").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedEntry {
    pub query: String,
    pub value: i64,
}

/// The two related-queries listings for one source term.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedQueries {
    pub top: Vec<RelatedEntry>,
    pub rising: Vec<RelatedEntry>,
}
