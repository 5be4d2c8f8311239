//! The extraction service seam.

use async_trait::async_trait;

use crate::Result;
use crate::types::{LeadPage, ProcessingResult, ServiceHealth, Stats};

/// Abstraction over the remote extraction service.
///
/// The [`SessionController`](crate::session::SessionController) drives this
/// trait rather than a concrete HTTP client, so session logic is testable
/// against a scripted double. The production implementation is
/// [`ExtractionClient`](crate::client::ExtractionClient).
#[async_trait]
pub trait ExtractionApi: Send + Sync {
    /// Probe the service root. Any failure is a connectivity failure.
    async fn health_check(&self) -> Result<ServiceHealth>;

    /// Submit one meeting summary for extraction.
    async fn process_meeting(&self, summary: &str) -> Result<ProcessingResult>;

    /// Fetch persisted leads, newest page semantics owned by the server.
    /// A `limit` is forwarded verbatim; the client never filters locally.
    async fn get_leads(&self, limit: Option<usize>) -> Result<LeadPage>;

    /// Fetch server-computed aggregates.
    async fn get_stats(&self) -> Result<Stats>;

    /// Delete all persisted leads. Test/reset flows only.
    async fn clear_leads(&self) -> Result<String>;
}
