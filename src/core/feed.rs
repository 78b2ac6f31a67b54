use crate::core::{ConfigProvider, Entry, FeedSource, RawEntry};
use crate::utils::error::{GalleryError, Result};
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// Default location of the classroom APOD mirror.
pub const DEFAULT_FEED_URL: &str = "https://cdn.jsdelivr.net/gh/GCA-Classroom/apod/data.json";

pub struct FeedClient {
    client: Client,
    feed_url: String,
}

impl FeedClient {
    pub fn new(feed_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            feed_url: feed_url.into(),
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(seconds) = config.timeout_seconds() {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        let client = builder.build().map_err(|e| GalleryError::ConfigError {
            message: format!("failed to build HTTP client: {}", e),
        })?;

        Ok(Self {
            client,
            feed_url: config.feed_url().to_string(),
        })
    }
}

#[async_trait::async_trait]
impl FeedSource for FeedClient {
    async fn fetch_all(&self) -> Result<Vec<Entry>> {
        tracing::debug!("Requesting feed from: {}", self.feed_url);
        let response = self
            .client
            .get(&self.feed_url)
            .header(CACHE_CONTROL, "no-cache, no-store")
            .header(PRAGMA, "no-cache")
            .send()
            .await
            .map_err(|e| GalleryError::FeedUnavailable {
                status: e.status().map(|s| s.as_u16()),
                message: format!("request failed: {}", e),
            })?;

        let status = response.status();
        tracing::debug!("Feed response status: {}", status);

        if !status.is_success() {
            return Err(GalleryError::FeedUnavailable {
                status: Some(status.as_u16()),
                message: format!("feed request returned HTTP {}", status),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| GalleryError::FeedUnavailable {
                status: Some(status.as_u16()),
                message: format!("failed to read response body: {}", e),
            })?;

        let json: Value = serde_json::from_str(&body).map_err(|e| GalleryError::FeedMalformed {
            message: format!("response is not valid JSON: {}", e),
        })?;

        let entries = normalize_feed(json);
        tracing::debug!("Feed normalized to {} entries", entries.len());
        Ok(entries)
    }
}

/// Accepts a bare array of entries or an object wrapping one under `results`.
/// Any other top-level shape is treated as an empty feed.
pub fn normalize_feed(json: Value) -> Vec<Entry> {
    let items = match json {
        Value::Array(items) => items,
        Value::Object(mut obj) => match obj.remove("results") {
            Some(Value::Array(items)) => items,
            _ => {
                tracing::warn!("Feed object has no 'results' array, treating as empty");
                Vec::new()
            }
        },
        other => {
            tracing::warn!("Unrecognized feed shape ({}), treating as empty", kind_of(&other));
            Vec::new()
        }
    };

    let mut entries = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let raw = match serde_json::from_value::<RawEntry>(item) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Skipping feed item {}: {}", index, e);
                continue;
            }
        };

        match Entry::try_from(raw) {
            Ok(entry) => entries.push(entry),
            Err(e) => tracing::warn!("Skipping feed item {}: {}", index, e),
        }
    }

    entries
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
