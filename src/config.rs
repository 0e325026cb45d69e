use std::time::Duration;

use reqwest::Url;

use crate::parse_error::{ParseError, Result};

pub const DEFAULT_BASE_URL: &str = "https://mintmanga.live";
pub const DEFAULT_RATE_LIMIT: u32 = 2;
pub const DEFAULT_RATE_PERIOD_MS: u64 = 1000;
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:107.0) Gecko/20100101 Firefox/107.0";

#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub base_url: Url,
    /// Requests allowed to start per [SourceConfig::rate_period]
    pub rate_limit: u32,
    pub rate_period: Duration,
    /// User agent of page requests, images always use the desktop one the site expects
    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base url is valid"),
            rate_limit: DEFAULT_RATE_LIMIT,
            rate_period: Duration::from_millis(DEFAULT_RATE_PERIOD_MS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl SourceConfig {
    /// Reads `MINTMANGA_*` variables (and a `.env` file if present),
    /// anything missing or malformed keeps its default.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let base_url = match dotenvy::var("MINTMANGA_BASE_URL") {
            Ok(url) => Url::parse(url.trim_end_matches('/'))
                .map_err(|_| ParseError::InvalidUrl(url.clone()))?,
            Err(_) => defaults.base_url,
        };
        let rate_limit: u32 = dotenvy::var("MINTMANGA_RATE_LIMIT")
            .unwrap_or(DEFAULT_RATE_LIMIT.to_string())
            .parse()
            .unwrap_or(DEFAULT_RATE_LIMIT)
            .max(1);
        let rate_period_ms: u64 = dotenvy::var("MINTMANGA_RATE_PERIOD_MS")
            .unwrap_or(DEFAULT_RATE_PERIOD_MS.to_string())
            .parse()
            .unwrap_or(DEFAULT_RATE_PERIOD_MS);
        let user_agent =
            dotenvy::var("MINTMANGA_USER_AGENT").unwrap_or(defaults.user_agent);

        Ok(Self {
            base_url,
            rate_limit,
            rate_period: Duration::from_millis(rate_period_ms),
            user_agent,
        })
    }

    /// Base url as written in front of relative paths, without trailing slash.
    pub fn base(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SourceConfig::default();
        assert_eq!(config.base(), "https://mintmanga.live");
        assert_eq!(config.rate_limit, 2);
        assert_eq!(config.rate_period, Duration::from_secs(1));
    }
}
