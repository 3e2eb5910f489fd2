pub mod error;
pub mod types;

pub use error::{Result, TrendsError};
pub use types::{RelatedEntry, RelatedQueries, TimelinePoint, Widget};

use std::collections::HashMap;

use types::{ExploreResponse, MultilineResponse, RelatedResponse};

const BASE_URL: &str = "https://trends.google.com/trends/api";

/// Widget id carrying the interest-over-time token.
const TIMESERIES_WIDGET: &str = "TIMESERIES";

/// Widget id carrying a related-queries token (one per requested term).
const RELATED_WIDGET: &str = "RELATED_QUERIES";

/// Client for the Google Trends widget API.
///
/// Every data request is a two-step dance: `explore` issues the query and
/// returns tokenized widget descriptors, then each widgetdata endpoint is
/// called with the widget's token and request payload echoed back verbatim.
pub struct GtrendsClient {
    client: reqwest::Client,
    hl: String,
    tz: i32,
}

impl GtrendsClient {
    /// `hl` is the host language (e.g. "zh-TW"), `tz` the timezone offset in
    /// minutes west of UTC (e.g. -480 for UTC+8).
    pub fn new(hl: &str, tz: i32) -> Self {
        Self {
            client: reqwest::Client::new(),
            hl: hl.to_string(),
            tz,
        }
    }

    /// Fetch the interest-over-time series for up to 5 terms.
    /// Returns one series per requested term; terms the source omitted map
    /// to an empty series.
    pub async fn interest_over_time(
        &self,
        terms: &[String],
        geo: &str,
        timeframe: &str,
    ) -> Result<HashMap<String, Vec<f64>>> {
        tracing::debug!(?terms, geo, timeframe, "Fetching interest over time");

        let widgets = self.explore(terms, geo, timeframe).await?;
        let widget = widgets
            .iter()
            .find(|w| w.id == TIMESERIES_WIDGET)
            .ok_or_else(|| TrendsError::MissingWidget(TIMESERIES_WIDGET.to_string()))?;

        let body = self.widget_data("widgetdata/multiline", widget).await?;
        parse_multiline(&body, terms)
    }

    /// Fetch the "top" and "rising" related-queries listings for up to 5
    /// terms. One widgetdata call per term; the explore response carries one
    /// RELATED_QUERIES widget per comparison item, in request order.
    pub async fn related_queries(
        &self,
        terms: &[String],
        geo: &str,
        timeframe: &str,
    ) -> Result<HashMap<String, RelatedQueries>> {
        tracing::debug!(?terms, geo, timeframe, "Fetching related queries");

        let widgets = self.explore(terms, geo, timeframe).await?;
        let related: Vec<&Widget> = widgets.iter().filter(|w| w.id == RELATED_WIDGET).collect();
        if related.is_empty() {
            return Err(TrendsError::MissingWidget(RELATED_WIDGET.to_string()));
        }

        let mut out = HashMap::new();
        for (idx, widget) in related.iter().enumerate() {
            // The widget request embeds the restriction keyword; positional
            // order is the documented fallback.
            let term = match widget_keyword(widget) {
                Some(term) => term,
                None => match terms.get(idx) {
                    Some(term) => term.clone(),
                    None => continue,
                },
            };

            let body = self.widget_data("widgetdata/relatedsearches", widget).await?;
            out.insert(term, parse_related(&body)?);
        }
        Ok(out)
    }

    async fn explore(&self, terms: &[String], geo: &str, timeframe: &str) -> Result<Vec<Widget>> {
        let comparison: Vec<serde_json::Value> = terms
            .iter()
            .map(|t| {
                serde_json::json!({
                    "keyword": t,
                    "geo": geo,
                    "time": timeframe,
                })
            })
            .collect();
        let req = serde_json::json!({
            "comparisonItem": comparison,
            "category": 0,
            "property": "",
        });

        let url = format!("{BASE_URL}/explore");
        let resp = self
            .client
            .get(&url)
            .query(&[
                ("hl", self.hl.clone()),
                ("tz", self.tz.to_string()),
                ("req", req.to_string()),
            ])
            .send()
            .await?;

        let body = checked_text(resp).await?;
        parse_widgets(&body)
    }

    async fn widget_data(&self, path: &str, widget: &Widget) -> Result<String> {
        let url = format!("{BASE_URL}/{path}");
        let resp = self
            .client
            .get(&url)
            .query(&[
                ("hl", self.hl.clone()),
                ("tz", self.tz.to_string()),
                ("req", widget.request.to_string()),
                ("token", widget.token.clone()),
            ])
            .send()
            .await?;

        checked_text(resp).await
    }
}

/// Map the HTTP status before touching the body: 429 is the distinguished
/// rate-limit signal, any other non-success is a terminal API error.
async fn checked_text(resp: reqwest::Response) -> Result<String> {
    let status = resp.status();
    if status.as_u16() == 429 {
        return Err(TrendsError::RateLimited);
    }
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(TrendsError::Api {
            status: status.as_u16(),
            message: body,
        });
    }
    Ok(resp.text().await?)
}

/// Google prefixes JSON bodies with an anti-hijacking garbage line (`)]}'`);
/// strip everything before the first brace.
fn strip_json_prefix(body: &str) -> &str {
    match body.find('{') {
        Some(idx) => &body[idx..],
        None => body,
    }
}

fn parse_widgets(body: &str) -> Result<Vec<Widget>> {
    let resp: ExploreResponse = serde_json::from_str(strip_json_prefix(body))?;
    Ok(resp.widgets)
}

/// The multiline payload carries one value per comparison item per sample;
/// re-key it by term using the original request order.
fn parse_multiline(body: &str, terms: &[String]) -> Result<HashMap<String, Vec<f64>>> {
    let resp: MultilineResponse = serde_json::from_str(strip_json_prefix(body))?;

    let mut series: HashMap<String, Vec<f64>> =
        terms.iter().map(|t| (t.clone(), Vec::new())).collect();
    for point in &resp.default.timeline_data {
        for (idx, term) in terms.iter().enumerate() {
            if let Some(v) = point.value.get(idx) {
                if let Some(values) = series.get_mut(term) {
                    values.push(*v);
                }
            }
        }
    }
    Ok(series)
}

/// First ranked list is "top", second is "rising"; either may be missing.
fn parse_related(body: &str) -> Result<RelatedQueries> {
    let resp: RelatedResponse = serde_json::from_str(strip_json_prefix(body))?;

    let mut lists = resp.default.ranked_list.into_iter();
    let to_entries = |list: types::RankedList| {
        list.ranked_keyword
            .into_iter()
            .map(|rk| RelatedEntry {
                query: rk.query,
                value: rk.value,
            })
            .collect()
    };

    Ok(RelatedQueries {
        top: lists.next().map(&to_entries).unwrap_or_default(),
        rising: lists.next().map(&to_entries).unwrap_or_default(),
    })
}

/// The restriction keyword embedded in a RELATED_QUERIES widget request.
fn widget_keyword(widget: &Widget) -> Option<String> {
    widget
        .request
        .pointer("/restriction/complexKeywordsRestriction/keyword/0/value")?
        .as_str()
        .map(str::to_string)
}
