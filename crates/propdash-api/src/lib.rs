// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use propdash_app::{AdviceOutcome, PropertyRecord, SummaryStats};
use reqwest::StatusCode;
use reqwest::blocking::{Client as HttpClient, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

const PROPERTIES_PATH: &str = "/api/properties";
const SUMMARY_PATH: &str = "/api/insights/summary";
const COACH_PATH: &str = "/api/coach";
const HEALTH_PATH: &str = "/api/health";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid API base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("build HTTP client: {error}")]
    Client { error: reqwest::Error },
    #[error("cannot reach {url} -- is the dashboard backend running? ({error})")]
    Transport { url: String, error: reqwest::Error },
    #[error("{url} returned HTTP {status}{}", .detail.as_deref().map(|text| format!(": {text}")).unwrap_or_default())]
    Status {
        url: String,
        status: StatusCode,
        detail: Option<String>,
    },
    #[error("decode response from {url}: {error}")]
    Decode {
        url: String,
        error: serde_json::Error,
    },
}

/// Optional server-side narrowing applied to the listing and summary queries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryFilter {
    pub suburb: Option<String>,
    pub state: Option<String>,
}

impl QueryFilter {
    pub fn is_empty(&self) -> bool {
        self.pairs().next().is_none()
    }

    fn pairs(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [("suburb", &self.suburb), ("state", &self.state)]
            .into_iter()
            .filter_map(|(key, value)| {
                value
                    .as_deref()
                    .map(str::trim)
                    .filter(|value| !value.is_empty())
                    .map(|value| (key, value))
            })
    }
}

#[derive(Debug, Clone)]
pub struct Client {
    base_url: String,
    timeout: Duration,
    filter: QueryFilter,
    http: HttpClient,
}

impl Client {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = validate_base_url(base_url)?;
        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| ApiError::Client { error })?;

        Ok(Self {
            base_url,
            timeout,
            filter: QueryFilter::default(),
            http,
        })
    }

    pub fn with_filter(mut self, filter: QueryFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn filter(&self) -> &QueryFilter {
        &self.filter
    }

    pub fn fetch_properties(&self) -> Result<Vec<PropertyRecord>, ApiError> {
        let url = self.endpoint(PROPERTIES_PATH, true);
        self.send_json(self.http.get(&url), &url)
    }

    pub fn fetch_summary(&self) -> Result<SummaryStats, ApiError> {
        let url = self.endpoint(SUMMARY_PATH, true);
        self.send_json(self.http.get(&url), &url)
    }

    /// Posts the record to the coach endpoint. `Ok(None)` means the server
    /// answered without usable advice text, including JSON error replies such
    /// as a 422 validation body. The advice string is returned as sent.
    pub fn request_advice(&self, record: &PropertyRecord) -> Result<Option<String>, ApiError> {
        let url = self.endpoint(COACH_PATH, false);
        debug!(url = %url, "sending request");
        let response = self
            .http
            .post(&url)
            .json(record)
            .send()
            .map_err(|error| ApiError::Transport {
                url: url.clone(),
                error,
            })?;

        let status = response.status();
        let body = response.text().map_err(|error| ApiError::Transport {
            url: url.clone(),
            error,
        })?;
        let value: Value = match serde_json::from_str(&body) {
            Ok(value) => value,
            Err(_) if !status.is_success() => {
                return Err(ApiError::Status {
                    url,
                    status,
                    detail: error_detail(&body),
                });
            }
            Err(error) => return Err(ApiError::Decode { url, error }),
        };
        if !status.is_success() {
            debug!(url = %url, %status, "coach answered with an error body");
        }
        Ok(advice_text(&value))
    }

    pub fn health(&self) -> Result<(), ApiError> {
        let url = self.endpoint(HEALTH_PATH, false);
        let _: Value = self.send_json(self.http.get(&url), &url)?;
        Ok(())
    }

    /// Listing fetch for the table: failures are logged and shown as no rows.
    pub fn properties_or_empty(&self) -> Vec<PropertyRecord> {
        match self.fetch_properties() {
            Ok(rows) => {
                info!(count = rows.len(), "fetched properties");
                rows
            }
            Err(error) => {
                warn!(%error, "properties fetch failed; showing an empty table");
                Vec::new()
            }
        }
    }

    pub fn summary_or_none(&self) -> Option<SummaryStats> {
        match self.fetch_summary() {
            Ok(summary) => {
                info!(count = summary.count, "fetched summary");
                Some(summary)
            }
            Err(error) => {
                warn!(%error, "summary fetch failed");
                None
            }
        }
    }

    pub fn advice_outcome(&self, record: &PropertyRecord) -> AdviceOutcome {
        match self.request_advice(record) {
            Ok(Some(advice)) => AdviceOutcome::Advice(advice),
            Ok(None) => {
                info!(id = %record.id, "coach returned no advice");
                AdviceOutcome::Empty
            }
            Err(error) => {
                warn!(id = %record.id, %error, "coach request failed");
                AdviceOutcome::Failed
            }
        }
    }

    fn endpoint(&self, path: &str, filtered: bool) -> String {
        let raw = format!("{}{path}", self.base_url);
        if !filtered || self.filter.is_empty() {
            return raw;
        }
        match Url::parse(&raw) {
            Ok(mut url) => {
                url.query_pairs_mut().extend_pairs(self.filter.pairs());
                url.into()
            }
            Err(_) => raw,
        }
    }

    fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: &str,
    ) -> Result<T, ApiError> {
        debug!(url, "sending request");
        let response = request.send().map_err(|error| ApiError::Transport {
            url: url.to_owned(),
            error,
        })?;

        let status = response.status();
        let body = response.text().map_err(|error| ApiError::Transport {
            url: url.to_owned(),
            error,
        })?;
        if !status.is_success() {
            return Err(ApiError::Status {
                url: url.to_owned(),
                status,
                detail: error_detail(&body),
            });
        }

        serde_json::from_str(&body).map_err(|error| ApiError::Decode {
            url: url.to_owned(),
            error,
        })
    }
}

fn validate_base_url(raw: &str) -> Result<String, ApiError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let invalid = |reason: &str| ApiError::InvalidBaseUrl {
        url: raw.to_owned(),
        reason: reason.to_owned(),
    };
    if trimmed.is_empty() {
        return Err(invalid("must not be empty"));
    }
    let parsed = Url::parse(trimmed).map_err(|error| invalid(&error.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(invalid("must not carry a query or fragment"));
    }
    Ok(trimmed.to_owned())
}

fn advice_text(body: &Value) -> Option<String> {
    body.get("advice")
        .and_then(Value::as_str)
        .filter(|advice| !advice.trim().is_empty())
        .map(str::to_owned)
}

/// Pulls a short human-readable reason out of an error body, if there is one.
fn error_detail(body: &str) -> Option<String> {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        return match value.get("detail") {
            Some(Value::String(detail)) if !detail.is_empty() => Some(detail.clone()),
            Some(Value::Null) | None => None,
            Some(other) => Some(other.to_string()),
        };
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() && trimmed.len() < 100 && !trimmed.contains('<') {
        return Some(trimmed.to_owned());
    }
    None
}
