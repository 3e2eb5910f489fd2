use anyhow::Result;

/// Application configuration loaded from environment variables.
/// Contains only secrets and env-specific values; scenario seeds and the
/// service lookup table are compiled-in static configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    // Database
    pub database_url: String,

    // News
    pub gnews_api_key: Option<String>,

    // Trend source locale
    pub trends_hl: String,
    pub trends_tz: i32,
    pub default_geo: String,

    // HTTP
    pub api_host: String,
    pub api_port: u16,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            database_url: std::env::var("DATABASE_URL")?,
            gnews_api_key: std::env::var("GNEWS_API_KEY")
                .ok()
                .filter(|k| !k.is_empty()),
            trends_hl: std::env::var("TRENDS_HL").unwrap_or_else(|_| "zh-TW".to_string()),
            trends_tz: std::env::var("TRENDS_TZ")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(-480),
            default_geo: std::env::var("DEFAULT_GEO").unwrap_or_else(|_| "TW".to_string()),
            api_host: std::env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            api_port: std::env::var("API_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
        };

        config.log_keys();
        Ok(config)
    }

    fn log_keys(&self) {
        fn preview(val: &str) -> String {
            let n = val.len().min(5);
            format!("{}...({} chars)", &val[..n], val.len())
        }
        fn preview_opt(val: &Option<String>) -> String {
            match val {
                Some(v) if !v.is_empty() => preview(v),
                _ => "<not set>".to_string(),
            }
        }

        tracing::info!("Config loaded:");
        tracing::info!("  DATABASE_URL: {}", preview(&self.database_url));
        tracing::info!("  GNEWS_API_KEY: {}", preview_opt(&self.gnews_api_key));
        tracing::info!("  DEFAULT_GEO: {}", self.default_geo);
    }
}
