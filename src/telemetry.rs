//! Telemetry metric name constants.
//!
//! Centralised metric names for muninn operations. Consumers install their
//! own `metrics` recorder (e.g. prometheus, statsd); without a recorder
//! installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `muninn_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `operation` — client operation invoked (e.g. "process_meeting", "get_leads")
//! - `status` — outcome: "ok" or "error"

/// Total requests dispatched through the extraction client.
///
/// Labels: `operation`, `status` ("ok" | "error").
pub const REQUESTS_TOTAL: &str = "muninn_requests_total";

/// Request duration in seconds.
///
/// Labels: `operation`.
pub const REQUEST_DURATION_SECONDS: &str = "muninn_request_duration_seconds";

/// Total meeting submissions accepted by the session controller
/// (guard-rejected submissions are not counted).
///
/// Labels: `status` ("ok" | "error").
pub const SUBMISSIONS_TOTAL: &str = "muninn_submissions_total";
