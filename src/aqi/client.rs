//! AQI endpoint client
//!
//! Issues a single GET per lookup. Any failure (transport, non-2xx status,
//! undecodable body) becomes an [`SustainEarthError::Api`] whose user
//! message is the same generic text; the cause is only logged. There is no
//! retry.

use reqwest::Client;
use std::future::Future;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument, warn};

use crate::config::AqiConfig;
use crate::error::LOCATION_REQUIRED;
use crate::models::{AqiReading, AqiResult};
use crate::{Result, SustainEarthError};

/// Anything that can produce an air quality reading for a location
pub trait AqiSource {
    fn fetch(&self, location: &str) -> impl Future<Output = Result<AqiResult>> + Send;
}

/// Reject blank locations before any request is made
pub fn validate_location(location: &str) -> Result<&str> {
    let trimmed = location.trim();
    if trimmed.is_empty() {
        return Err(SustainEarthError::validation(LOCATION_REQUIRED));
    }
    Ok(trimmed)
}

/// HTTP client for the configured AQI endpoint
#[derive(Debug, Clone)]
pub struct AqiClient {
    client: Client,
    base_url: String,
}

impl AqiClient {
    /// Create a new AQI client
    pub fn new(config: &AqiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("SustainEarth/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SustainEarthError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// URL queried for a location
    #[must_use]
    pub fn request_url(&self, location: &str) -> String {
        format!("{}/?city={}", self.base_url, urlencoding::encode(location))
    }

    async fn get_reading(&self, location: &str) -> Result<AqiReading> {
        let url = self.request_url(location);
        debug!("AQI request URL: {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            error!("AQI request failed: {}", e);
            SustainEarthError::api(format!("request failed: {e}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(%status, body = %body, "AQI endpoint returned an error status");
            return Err(SustainEarthError::api(format!(
                "AQI endpoint returned {status}"
            )));
        }

        response.json::<AqiReading>().await.map_err(|e| {
            error!("Failed to parse AQI response: {}", e);
            SustainEarthError::api(format!("invalid response body: {e}"))
        })
    }
}

impl AqiSource for AqiClient {
    #[instrument(skip(self))]
    async fn fetch(&self, location: &str) -> Result<AqiResult> {
        let location = validate_location(location)?;
        info!("Fetching air quality for: {}", location);
        let start_time = Instant::now();

        let reading = self.get_reading(location).await?;
        let result = AqiResult::from_reading(reading);

        let elapsed = start_time.elapsed();
        info!(
            aqi = result.reading.aqi,
            category = %result.category,
            "Retrieved air quality in {:.3}s",
            elapsed.as_secs_f64()
        );
        if elapsed.as_secs() > 5 {
            warn!("Slow AQI response detected: {:.3}s", elapsed.as_secs_f64());
        }

        Ok(result)
    }
}
