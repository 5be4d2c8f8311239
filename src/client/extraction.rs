//! Reqwest-backed implementation of the extraction service protocol.
//!
//! Wire protocol (consumed, not implemented here):
//! - `GET /` → health probe
//! - `POST /api/process {summary}` → [`ProcessingResult`]
//! - `GET /api/leads?limit=N` → [`LeadPage`]
//! - `GET /api/stats` → [`Stats`]
//! - `DELETE /api/leads` → `{message}`
//!
//! Every operation classifies failures into the same three transport kinds:
//! timeout (elapsed without response), network (no response reached the
//! service), and API (response with an error status, carrying the
//! server-supplied detail when one is present). The health probe collapses
//! all three into `Connectivity`; at startup they all mean the same thing.

use std::time::Instant;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::ClientConfig;
use crate::traits::ExtractionApi;
use crate::types::{LeadPage, ProcessingResult, ServiceHealth, Stats};
use crate::{MuninnError, Result, telemetry};

/// Client for the remote extraction service.
#[derive(Clone)]
pub struct ExtractionClient {
    http: Client,
    base_url: String,
    config: ClientConfig,
}

impl ExtractionClient {
    /// Create a client against the default loopback service.
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client with a custom base URL (for testing with wiremock).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::with_config(ClientConfig::with_base_url(base_url))
    }

    /// Create a client from a full configuration.
    pub fn with_config(config: ClientConfig) -> Self {
        let http = Client::builder()
            .build()
            .expect("failed to build HTTP client");
        let base_url = config.base_url.trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            config,
        }
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Probe the service root. Short timeout; any failure is `Connectivity`.
    pub async fn health_check(&self) -> Result<ServiceHealth> {
        let started = Instant::now();
        let result = self.health_check_inner().await;
        self.record("health_check", started, result.is_ok());
        result
    }

    async fn health_check_inner(&self) -> Result<ServiceHealth> {
        let url = format!("{}/", self.base_url);
        let response = self
            .http
            .get(&url)
            .timeout(self.config.health_timeout)
            .send()
            .await
            .map_err(|e| MuninnError::Connectivity(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MuninnError::Connectivity(format!(
                "health probe returned HTTP {status}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| MuninnError::Connectivity(e.to_string()))
    }

    /// Submit one meeting summary for extraction. Long timeout tier.
    pub async fn process_meeting(&self, summary: &str) -> Result<ProcessingResult> {
        let started = Instant::now();
        debug!(chars = summary.chars().count(), "submitting meeting summary");
        let result = self.process_meeting_inner(summary).await;
        if let Err(e) = &result {
            warn!(error = %e, "meeting processing failed");
        }
        self.record("process_meeting", started, result.is_ok());
        result
    }

    async fn process_meeting_inner(&self, summary: &str) -> Result<ProcessingResult> {
        let url = format!("{}/api/process", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(&ProcessingRequest { summary })
            .timeout(self.config.process_timeout)
            .send()
            .await
            .map_err(|e| classify_transport("process_meeting", e))?;

        let response = check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| MuninnError::Network(e.to_string()))
    }

    /// Fetch persisted leads. A `limit` is forwarded as a query parameter;
    /// the server owns all filtering.
    pub async fn get_leads(&self, limit: Option<usize>) -> Result<LeadPage> {
        let started = Instant::now();
        let result = self.get_leads_inner(limit).await;
        self.record("get_leads", started, result.is_ok());
        result
    }

    async fn get_leads_inner(&self, limit: Option<usize>) -> Result<LeadPage> {
        let url = format!("{}/api/leads", self.base_url);
        let mut request = self.http.get(&url).timeout(self.config.request_timeout);
        if let Some(limit) = limit {
            request = request.query(&[("limit", limit)]);
        }
        let response = request
            .send()
            .await
            .map_err(|e| classify_transport("get_leads", e))?;

        let response = check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| MuninnError::Network(e.to_string()))
    }

    /// Fetch server-computed aggregates. No client-side recomputation.
    pub async fn get_stats(&self) -> Result<Stats> {
        let started = Instant::now();
        let result = self.get_stats_inner().await;
        self.record("get_stats", started, result.is_ok());
        result
    }

    async fn get_stats_inner(&self) -> Result<Stats> {
        let url = format!("{}/api/stats", self.base_url);
        let response = self
            .http
            .get(&url)
            .timeout(self.config.request_timeout)
            .send()
            .await
            .map_err(|e| classify_transport("get_stats", e))?;

        let response = check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| MuninnError::Network(e.to_string()))
    }

    /// Delete all persisted leads. Test/reset flows only, never part of the
    /// normal user flow.
    pub async fn clear_leads(&self) -> Result<String> {
        let started = Instant::now();
        let result = self.clear_leads_inner().await;
        self.record("clear_leads", started, result.is_ok());
        result
    }

    async fn clear_leads_inner(&self) -> Result<String> {
        let url = format!("{}/api/leads", self.base_url);
        let response = self
            .http
            .delete(&url)
            .timeout(self.config.request_timeout)
            .send()
            .await
            .map_err(|e| classify_transport("clear_leads", e))?;

        let response = check_status(response).await?;
        let body: MessageBody = response
            .json()
            .await
            .map_err(|e| MuninnError::Network(e.to_string()))?;
        Ok(body.message)
    }

    fn record(&self, operation: &'static str, started: Instant, ok: bool) {
        let status = if ok { "ok" } else { "error" };
        metrics::counter!(telemetry::REQUESTS_TOTAL,
            "operation" => operation,
            "status" => status,
        )
        .increment(1);
        metrics::histogram!(telemetry::REQUEST_DURATION_SECONDS,
            "operation" => operation,
        )
        .record(started.elapsed().as_secs_f64());
    }
}

impl Default for ExtractionClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Classify a reqwest transport failure: elapsed timeout vs no response.
fn classify_transport(operation: &'static str, err: reqwest::Error) -> MuninnError {
    if err.is_timeout() {
        MuninnError::Timeout { operation }
    } else {
        MuninnError::Network(err.to_string())
    }
}

/// Map a non-2xx response to an API error, preferring the server-supplied
/// detail message over the generic fallback.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let code = status.as_u16();
    let detail = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.detail.or(body.error))
        .filter(|msg| !msg.trim().is_empty());

    Err(MuninnError::Api {
        status: code,
        message: detail.unwrap_or_else(|| format!("extraction service returned HTTP {status}")),
    })
}

#[derive(Serialize)]
struct ProcessingRequest<'a> {
    summary: &'a str,
}

#[derive(Deserialize)]
struct MessageBody {
    message: String,
}

/// Error payload shapes seen from the service (`{"detail": ...}` from the
/// framework, `{"error": ...}` from handlers).
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

// ============================================================================
// ExtractionApi implementation
// ============================================================================

#[async_trait::async_trait]
impl ExtractionApi for ExtractionClient {
    async fn health_check(&self) -> Result<ServiceHealth> {
        ExtractionClient::health_check(self).await
    }

    async fn process_meeting(&self, summary: &str) -> Result<ProcessingResult> {
        ExtractionClient::process_meeting(self, summary).await
    }

    async fn get_leads(&self, limit: Option<usize>) -> Result<LeadPage> {
        ExtractionClient::get_leads(self, limit).await
    }

    async fn get_stats(&self) -> Result<Stats> {
        ExtractionClient::get_stats(self).await
    }

    async fn clear_leads(&self) -> Result<String> {
        ExtractionClient::clear_leads(self).await
    }
}
