//! Session controller: the view/session state machine.
//!
//! Sequences startup connectivity checks, steady-state view navigation,
//! submission, and result display over an [`ExtractionApi`]. All session
//! state lives in one [`SessionState`] value with explicit transitions, so
//! the machine is testable without any rendering.
//!
//! ```text
//! Checking ──ok──▶ Connected { Input | Results | Dashboard }
//!     │
//!     └──fail──▶ Failed ──restart()──▶ Checking
//! ```
//!
//! `Failed` is reachable only from `Checking` (startup failure) and exited
//! only by an explicit restart. While connected, recoverable errors stay on
//! the current view with a user-visible message.

use std::sync::Arc;

use tracing::{info, warn};

use crate::aggregate::AggregateConfig;
use crate::traits::ExtractionApi;
use crate::types::{Lead, ProcessingResult, Stats};
use crate::{MuninnError, Result, telemetry};

/// Active sub-view while the session is connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Input,
    Results,
    Dashboard,
}

/// Mutable state of a connected session.
///
/// Owned exclusively by the [`SessionController`]; the aggregation engine
/// only ever reads snapshots handed to it.
#[derive(Debug, Clone)]
pub struct Workspace {
    pub view: View,
    /// True only while a submission is in flight. Navigation and further
    /// submissions are rejected until it settles.
    pub submitting: bool,
    /// User-visible message from the last recoverable failure.
    pub error: Option<String>,
    /// The currently displayed result, if any.
    pub result: Option<ProcessingResult>,
    /// Running lead counter, seeded from the startup fetch.
    pub lead_count: u64,
}

impl Workspace {
    fn new(lead_count: u64) -> Self {
        Self {
            view: View::Input,
            submitting: false,
            error: None,
            result: None,
            lead_count,
        }
    }
}

/// The one state value the session controller owns.
#[derive(Debug, Clone)]
pub enum SessionState {
    /// Startup checks in progress.
    Checking,
    /// Startup succeeded; normal operation.
    Connected(Workspace),
    /// Startup failed. Terminal until an explicit restart.
    Failed { message: String },
}

/// Data for one dashboard render: leads page and stats, fetched together.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardData {
    pub leads: Vec<Lead>,
    pub stats: Stats,
    /// Total persisted leads, independent of the page size.
    pub total: u64,
}

impl DashboardData {
    /// Zero-state probe: render the call-to-action instead of stat cards.
    pub fn is_empty(&self) -> bool {
        self.leads.is_empty() && self.total == 0
    }
}

/// State machine sequencing startup, submission, navigation, and dashboard
/// refresh against an extraction service.
pub struct SessionController {
    api: Arc<dyn ExtractionApi>,
    state: SessionState,
    config: AggregateConfig,
}

impl SessionController {
    /// Create a controller in the `Checking` state. Call [`start`](Self::start)
    /// to run the startup sequence.
    pub fn new(api: Arc<dyn ExtractionApi>) -> Self {
        Self::with_config(api, AggregateConfig::default())
    }

    /// Create a controller with custom aggregation/page-size configuration.
    pub fn with_config(api: Arc<dyn ExtractionApi>, config: AggregateConfig) -> Self {
        Self {
            api,
            state: SessionState::Checking,
            config,
        }
    }

    /// Create a controller in a given state. Intended for tests that need to
    /// exercise guards without driving a full startup.
    pub fn from_state(api: Arc<dyn ExtractionApi>, state: SessionState) -> Self {
        Self {
            api,
            state,
            config: AggregateConfig::default(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The connected workspace, if the session is connected.
    pub fn workspace(&self) -> Option<&Workspace> {
        match &self.state {
            SessionState::Connected(ws) => Some(ws),
            _ => None,
        }
    }

    fn workspace_mut(&mut self) -> Option<&mut Workspace> {
        match &mut self.state {
            SessionState::Connected(ws) => Some(ws),
            _ => None,
        }
    }

    /// Run the startup sequence: health probe, then the initial lead-count
    /// fetch, strictly in that order, so a failed probe short-circuits the
    /// lead fetch. Either failure enters `Failed` with the message.
    pub async fn start(&mut self) -> Result<()> {
        self.state = SessionState::Checking;

        if let Err(e) = self.api.health_check().await {
            warn!(error = %e, "startup health probe failed");
            self.state = SessionState::Failed {
                message: e.to_string(),
            };
            return Err(e);
        }

        match self.api.get_leads(Some(1)).await {
            Ok(page) => {
                info!(lead_count = page.total, "session connected");
                self.state = SessionState::Connected(Workspace::new(page.total));
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "startup lead-count fetch failed");
                self.state = SessionState::Failed {
                    message: e.to_string(),
                };
                Err(e)
            }
        }
    }

    /// Explicit user-triggered restart out of the `Failed` state.
    pub async fn restart(&mut self) -> Result<()> {
        if !matches!(self.state, SessionState::Failed { .. }) {
            return Err(MuninnError::InvalidInput(
                "restart is only available after a startup failure".into(),
            ));
        }
        self.start().await
    }

    /// Submit a meeting summary for extraction.
    ///
    /// Guarded: a whitespace-only summary or an in-flight submission is
    /// rejected before any network call, leaving state untouched. On success
    /// the result is stored, the lead counter bumps, and the view switches to
    /// `Results`; on failure the view stays on `Input` with the classified
    /// message surfaced.
    pub async fn submit(&mut self, text: &str) -> Result<()> {
        let summary = text.trim().to_string();
        {
            let ws = self.workspace_mut().ok_or_else(|| {
                MuninnError::InvalidInput("no connected session to submit from".into())
            })?;
            if summary.is_empty() {
                return Err(MuninnError::InvalidInput("meeting summary is empty".into()));
            }
            if ws.submitting {
                return Err(MuninnError::InvalidInput(
                    "a submission is already in flight".into(),
                ));
            }
            ws.submitting = true;
            ws.error = None;
        }

        let outcome = self.api.process_meeting(&summary).await;

        // &mut self is held across the await, so the workspace is still here.
        let ws = match self.workspace_mut() {
            Some(ws) => ws,
            None => return Err(MuninnError::InvalidInput("session ended mid-submit".into())),
        };
        ws.submitting = false;

        match outcome {
            Ok(result) => {
                metrics::counter!(telemetry::SUBMISSIONS_TOTAL, "status" => "ok").increment(1);
                ws.result = Some(result);
                ws.lead_count += 1;
                ws.view = View::Results;
                Ok(())
            }
            Err(e) => {
                metrics::counter!(telemetry::SUBMISSIONS_TOTAL, "status" => "error").increment(1);
                ws.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Clear the displayed result and any error, returning to `Input`.
    /// A no-op unless the current view is `Results` or `Dashboard`.
    pub fn new_meeting(&mut self) {
        if let Some(ws) = self.workspace_mut()
            && matches!(ws.view, View::Results | View::Dashboard)
        {
            ws.result = None;
            ws.error = None;
            ws.view = View::Input;
        }
    }

    /// Switch to another view. Rejected while a submission is in flight;
    /// the submission must settle before navigation means anything.
    pub fn change_view(&mut self, target: View) -> Result<()> {
        let ws = self
            .workspace_mut()
            .ok_or_else(|| MuninnError::InvalidInput("no connected session".into()))?;
        if ws.submitting {
            return Err(MuninnError::InvalidInput(
                "cannot navigate while a submission is in flight".into(),
            ));
        }
        ws.view = target;
        Ok(())
    }

    /// Fetch one dashboard render's worth of data. Rejected unless the
    /// session is connected, like every other connected-state operation.
    ///
    /// Lead page and stats are independent and fetched concurrently, but the
    /// refresh is all-or-nothing: if either fails, no partial data is
    /// returned.
    pub async fn refresh_dashboard(&self) -> Result<DashboardData> {
        if self.workspace().is_none() {
            return Err(MuninnError::InvalidInput("no connected session".into()));
        }
        let (page, stats) = tokio::join!(
            self.api.get_leads(Some(self.config.dashboard_page_size)),
            self.api.get_stats(),
        );
        let page = page?;
        let stats = stats?;
        Ok(DashboardData {
            leads: page.leads,
            stats,
            total: page.total,
        })
    }
}
