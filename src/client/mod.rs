//! HTTP client for the remote extraction service.

mod extraction;

pub use extraction::ExtractionClient;

use std::time::Duration;

/// Default base URL when nothing is configured: local loopback.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "MUNINN_API_URL";

/// Configuration for the extraction client.
///
/// Timeouts are tiered per operation: the health probe fails fast, while
/// `process_meeting` gets a long bound reflecting real AI-extraction latency.
///
/// ```rust
/// # use muninn::client::ClientConfig;
/// # use std::time::Duration;
/// let config = ClientConfig::with_base_url("http://crm.internal:8000")
///     .process_timeout(Duration::from_secs(120));
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the extraction service (no trailing slash required).
    pub base_url: String,
    /// Bound on the health probe. Default: 10s.
    pub health_timeout: Duration,
    /// Bound on `process_meeting`. Default: 90s.
    pub process_timeout: Duration,
    /// Bound on every other operation. Default: 30s.
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            health_timeout: Duration::from_secs(10),
            process_timeout: Duration::from_secs(90),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    /// Create a config with a custom base URL and default timeouts.
    pub fn with_base_url(url: impl Into<String>) -> Self {
        Self {
            base_url: url.into(),
            ..Default::default()
        }
    }

    /// Read the base URL from `MUNINN_API_URL`, falling back to loopback.
    ///
    /// A set-but-unparseable URL is a configuration error, not a silent
    /// fallback.
    pub fn from_env() -> crate::Result<Self> {
        match std::env::var(BASE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => {
                url.parse::<reqwest::Url>().map_err(|e| {
                    crate::MuninnError::Configuration(format!("invalid {BASE_URL_ENV} '{url}': {e}"))
                })?;
                Ok(Self::with_base_url(url))
            }
            _ => Ok(Self::default()),
        }
    }

    /// Set the health probe timeout.
    pub fn health_timeout(mut self, timeout: Duration) -> Self {
        self.health_timeout = timeout;
        self
    }

    /// Set the meeting-processing timeout.
    pub fn process_timeout(mut self, timeout: Duration) -> Self {
        self.process_timeout = timeout;
        self
    }

    /// Set the timeout for lead, stats, and reset operations.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
