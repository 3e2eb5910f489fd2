//! Keyword news lookup: GNews API first, Taiwanese RSS feeds as fallback.
//! Results are cached in-process for two hours; every failure degrades to
//! an empty list.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::warn;

const GNEWS_BASE: &str = "https://gnews.io/api/v4/search";

/// RSS fallback feeds per scenario.
const RSS_FEEDS: &[(&str, &str)] = &[
    ("旅遊", "https://www.ltn.com.tw/rss/life.xml"),
    ("健康", "https://www.ltn.com.tw/rss/health.xml"),
    ("牙科", "https://www.ltn.com.tw/rss/health.xml"),
    ("保健品", "https://www.ltn.com.tw/rss/health.xml"),
];
const DEFAULT_FEED: &str = "https://www.ltn.com.tw/rss/all.xml";
const RSS_SOURCE_NAME: &str = "自由時報";

const CACHE_TTL: Duration = Duration::from_secs(7200);

/// Description length cap for RSS items (characters).
const MAX_DESCRIPTION_CHARS: usize = 200;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewsArticle {
    pub title: String,
    pub description: String,
    pub url: String,
    pub source: String,
    pub published_at: String,
}

// --- GNews response shapes ---

#[derive(Deserialize)]
struct GnewsResponse {
    #[serde(default)]
    articles: Vec<GnewsArticle>,
}

#[derive(Deserialize)]
struct GnewsArticle {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    url: String,
    source: Option<GnewsSource>,
    #[serde(rename = "publishedAt", default)]
    published_at: String,
}

#[derive(Deserialize)]
struct GnewsSource {
    #[serde(default)]
    name: String,
}

pub struct NewsFetcher {
    client: reqwest::Client,
    api_key: Option<String>,
    cache: Mutex<HashMap<String, (Instant, Vec<NewsArticle>)>>,
}

impl NewsFetcher {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Up to `max` articles mentioning the keyword. GNews when an API key
    /// is configured, per-scenario RSS fallback otherwise or on empty
    /// GNews results.
    pub async fn fetch(&self, keyword: &str, scenario: &str, max: usize) -> Vec<NewsArticle> {
        let cache_key = format!("news:{keyword}:{scenario}:{max}");
        if let Some(articles) = self.cache_get(&cache_key) {
            return articles;
        }

        let mut articles = self.fetch_gnews(keyword, max).await;
        if articles.is_empty() {
            articles = self.fetch_rss(keyword, scenario, max).await;
        }

        // An empty list is cached too: "no news" should not refetch for 2h.
        self.cache_set(cache_key, articles.clone());
        articles
    }

    fn cache_get(&self, key: &str) -> Option<Vec<NewsArticle>> {
        let cache = self.cache.lock().unwrap();
        let (stored_at, articles) = cache.get(key)?;
        if stored_at.elapsed() < CACHE_TTL {
            Some(articles.clone())
        } else {
            None
        }
    }

    fn cache_set(&self, key: String, articles: Vec<NewsArticle>) {
        self.cache
            .lock()
            .unwrap()
            .insert(key, (Instant::now(), articles));
    }

    async fn fetch_gnews(&self, keyword: &str, max: usize) -> Vec<NewsArticle> {
        let Some(api_key) = &self.api_key else {
            return Vec::new();
        };

        let result = async {
            let resp = self
                .client
                .get(GNEWS_BASE)
                .query(&[
                    ("q", keyword),
                    ("lang", "zh-Hant"),
                    ("country", "tw"),
                    ("max", &max.to_string()),
                    ("apikey", api_key),
                ])
                .send()
                .await?;
            if !resp.status().is_success() {
                anyhow::bail!("GNews status {}", resp.status());
            }
            let body: GnewsResponse = resp.json().await?;
            Ok::<_, anyhow::Error>(body.articles)
        }
        .await;

        match result {
            Ok(articles) => articles
                .into_iter()
                .map(|a| NewsArticle {
                    title: a.title,
                    description: a.description,
                    url: a.url,
                    source: a.source.map(|s| s.name).unwrap_or_default(),
                    published_at: a.published_at,
                })
                .collect(),
            Err(e) => {
                warn!(keyword, error = %e, "GNews request failed");
                Vec::new()
            }
        }
    }

    async fn fetch_rss(&self, keyword: &str, scenario: &str, max: usize) -> Vec<NewsArticle> {
        let feed_url = RSS_FEEDS
            .iter()
            .find(|(name, _)| *name == scenario)
            .map(|(_, url)| *url)
            .unwrap_or(DEFAULT_FEED);

        let result = async {
            let resp = self.client.get(feed_url).send().await?;
            if !resp.status().is_success() {
                anyhow::bail!("feed status {}", resp.status());
            }
            let bytes = resp.bytes().await?;
            Ok::<_, anyhow::Error>(feed_rs::parser::parse(bytes.as_ref())?)
        }
        .await;

        match result {
            Ok(feed) => filter_feed(feed, keyword, max),
            Err(e) => {
                warn!(feed = feed_url, error = %e, "RSS fetch failed");
                Vec::new()
            }
        }
    }
}

/// Keep feed items whose title or summary mentions the keyword.
fn filter_feed(feed: feed_rs::model::Feed, keyword: &str, max: usize) -> Vec<NewsArticle> {
    let mut articles = Vec::new();
    for entry in feed.entries {
        let title = entry.title.map(|t| t.content).unwrap_or_default();
        let description = entry.summary.map(|s| s.content).unwrap_or_default();
        if !title.contains(keyword) && !description.contains(keyword) {
            continue;
        }

        articles.push(NewsArticle {
            title,
            description: description.chars().take(MAX_DESCRIPTION_CHARS).collect(),
            url: entry
                .links
                .first()
                .map(|l| l.href.clone())
                .unwrap_or_default(),
            source: RSS_SOURCE_NAME.to_string(),
            published_at: entry
                .published
                .map(|d| d.to_rfc3339())
                .unwrap_or_default(),
        });

        if articles.len() >= max {
            break;
        }
    }
    articles
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"><channel>
  <title>測試新聞</title>
  <item>
    <title>日本旅遊解禁，機票搜尋暴增</title>
    <description>航空公司加開航班</description>
    <link>https://news.example/a</link>
  </item>
  <item>
    <title>健保新制上路</title>
    <description>與旅遊無關的新聞</description>
    <link>https://news.example/b</link>
  </item>
  <item>
    <title>國內旅遊補助開跑</title>
    <description>各縣市民宿訂房踴躍</description>
    <link>https://news.example/c</link>
  </item>
</channel></rss>"#;

    fn parsed() -> feed_rs::model::Feed {
        feed_rs::parser::parse(FEED_XML.as_bytes()).unwrap()
    }

    #[test]
    fn keeps_items_matching_title_or_description() {
        let articles = filter_feed(parsed(), "旅遊", 5);
        assert_eq!(articles.len(), 3);
        assert_eq!(articles[0].url, "https://news.example/a");
        assert_eq!(articles[0].source, RSS_SOURCE_NAME);
    }

    #[test]
    fn caps_at_max_results() {
        let articles = filter_feed(parsed(), "旅遊", 1);
        assert_eq!(articles.len(), 1);
    }

    #[test]
    fn no_match_yields_empty() {
        assert!(filter_feed(parsed(), "牙周病", 5).is_empty());
    }

    #[test]
    fn cache_round_trips_within_ttl() {
        let fetcher = NewsFetcher::new(None);
        let articles = vec![NewsArticle {
            title: "t".into(),
            description: "d".into(),
            url: "u".into(),
            source: "s".into(),
            published_at: String::new(),
        }];
        fetcher.cache_set("news:k::5".to_string(), articles.clone());
        assert_eq!(fetcher.cache_get("news:k::5"), Some(articles));
        assert_eq!(fetcher.cache_get("news:other::5"), None);
    }
}
