use std::time::Duration;

use crate::config::Config;
use crate::error::{BannerError, BannerResult};
use crate::track::{LatestSong, TrackRecord};

/// HTTP client for the listening-history service.
#[derive(Debug, Clone)]
pub struct TrackClient {
    http: reqwest::Client,
    endpoint: String,
}

impl TrackClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> BannerResult<Self> {
        let http = build_http_client(timeout)?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_config(config: &Config) -> BannerResult<Self> {
        Self::new(
            config.track_endpoint.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The shared HTTP client, reused for asset downloads.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Fetch the latest (or currently playing) track. Single attempt.
    pub async fn latest(&self) -> BannerResult<TrackRecord> {
        tracing::info!(endpoint = %self.endpoint, "fetching latest track");

        let response = self.http.get(&self.endpoint).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(BannerError::HttpStatus {
                url: self.endpoint.clone(),
                status: status.as_u16(),
            });
        }

        let body: LatestSong = response.json().await?;
        let record = TrackRecord::from_response(body)?;
        tracing::debug!(
            title = record.title.as_deref().unwrap_or_default(),
            playing = record.is_playing,
            "track fetched"
        );
        Ok(record)
    }
}

/// reqwest client with the crate's user agent and a request timeout.
pub fn build_http_client(timeout: Duration) -> BannerResult<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()
        .map_err(BannerError::from)
}
