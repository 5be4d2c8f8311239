//! Session controller tests against a scripted extraction service double.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use muninn::{
    Company, Contact, Deal, ExtractionApi, Lead, LeadPage, MuninnError, ProcessingResult, Result,
    ServiceHealth, SessionController, SessionState, Stats, View, Workspace,
};

/// A scripted `ExtractionApi`: queued responses per operation, plus a call
/// log so tests can assert sequencing. Unqueued calls answer with benign
/// defaults.
#[derive(Default)]
struct ScriptedApi {
    health: Mutex<VecDeque<Result<ServiceHealth>>>,
    process: Mutex<VecDeque<Result<ProcessingResult>>>,
    leads: Mutex<VecDeque<Result<LeadPage>>>,
    stats: Mutex<VecDeque<Result<Stats>>>,
    log: Mutex<Vec<String>>,
}

impl ScriptedApi {
    fn queue_health(&self, response: Result<ServiceHealth>) {
        self.health.lock().unwrap().push_back(response);
    }

    fn queue_process(&self, response: Result<ProcessingResult>) {
        self.process.lock().unwrap().push_back(response);
    }

    fn queue_leads(&self, response: Result<LeadPage>) {
        self.leads.lock().unwrap().push_back(response);
    }

    fn queue_stats(&self, response: Result<Stats>) {
        self.stats.lock().unwrap().push_back(response);
    }

    fn calls(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    fn process_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.as_str() == "process_meeting")
            .count()
    }
}

fn healthy() -> ServiceHealth {
    ServiceHealth {
        message: Some("CRM Processor API".into()),
        status: Some("healthy".into()),
    }
}

fn empty_page() -> LeadPage {
    LeadPage {
        leads: vec![],
        total: 0,
    }
}

#[async_trait]
impl ExtractionApi for ScriptedApi {
    async fn health_check(&self) -> Result<ServiceHealth> {
        self.log.lock().unwrap().push("health_check".into());
        self.health
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(healthy()))
    }

    async fn process_meeting(&self, _summary: &str) -> Result<ProcessingResult> {
        self.log.lock().unwrap().push("process_meeting".into());
        self.process
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(sample_result()))
    }

    async fn get_leads(&self, limit: Option<usize>) -> Result<LeadPage> {
        self.log.lock().unwrap().push(format!("get_leads({limit:?})"));
        self.leads
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(empty_page()))
    }

    async fn get_stats(&self) -> Result<Stats> {
        self.log.lock().unwrap().push("get_stats".into());
        self.stats
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Stats::default()))
    }

    async fn clear_leads(&self) -> Result<String> {
        self.log.lock().unwrap().push("clear_leads".into());
        Ok("All leads cleared".into())
    }
}

fn sample_result() -> ProcessingResult {
    ProcessingResult {
        pii: vec![],
        contact: Contact {
            name: Some("Sarah Johnson".into()),
            ..Contact::default()
        },
        company: Company::default(),
        deal: Deal {
            value: Some("30000".into()),
            stage: Some("Demo Scheduled".into()),
            ..Deal::default()
        },
        confidence: 0.92,
        processed_at: Utc::now(),
        success: true,
        error: None,
    }
}

fn sample_lead() -> Lead {
    let now = Utc::now();
    Lead {
        pii: vec![],
        contact: Contact::default(),
        company: Company::default(),
        deal: Deal::default(),
        confidence: 0.8,
        processed_at: now,
        created_at: now,
    }
}

fn connected_workspace(submitting: bool) -> SessionState {
    SessionState::Connected(Workspace {
        view: View::Input,
        submitting,
        error: None,
        result: None,
        lead_count: 0,
    })
}

// ============================================================================
// Startup
// ============================================================================

#[tokio::test]
async fn startup_connects_with_fetched_lead_count() {
    let api = Arc::new(ScriptedApi::default());
    api.queue_leads(Ok(LeadPage {
        leads: vec![],
        total: 7,
    }));

    let mut session = SessionController::new(api.clone());
    session.start().await.expect("startup should succeed");

    let ws = session.workspace().expect("should be connected");
    assert_eq!(ws.view, View::Input);
    assert_eq!(ws.lead_count, 7);
    assert!(!ws.submitting);

    // Probe settles before the lead fetch begins.
    assert_eq!(api.calls(), vec!["health_check", "get_leads(Some(1))"]);
}

#[tokio::test]
async fn startup_probe_failure_short_circuits_lead_fetch() {
    let api = Arc::new(ScriptedApi::default());
    api.queue_health(Err(MuninnError::Connectivity("connection refused".into())));

    let mut session = SessionController::new(api.clone());
    let result = session.start().await;

    assert!(result.is_err());
    assert!(matches!(
        session.state(),
        SessionState::Failed { message } if message.contains("connection refused")
    ));
    assert_eq!(api.calls(), vec!["health_check"], "lead fetch never issued");
}

#[tokio::test]
async fn startup_lead_fetch_failure_enters_failed() {
    let api = Arc::new(ScriptedApi::default());
    api.queue_leads(Err(MuninnError::Network("socket closed".into())));

    let mut session = SessionController::new(api);
    assert!(session.start().await.is_err());
    assert!(matches!(session.state(), SessionState::Failed { .. }));
}

#[tokio::test]
async fn restart_requires_failed_state() {
    let api = Arc::new(ScriptedApi::default());
    let mut session = SessionController::from_state(api, connected_workspace(false));

    let result = session.restart().await;
    assert!(matches!(result, Err(MuninnError::InvalidInput(_))));
    assert!(session.workspace().is_some(), "state untouched");
}

#[tokio::test]
async fn restart_reruns_startup_from_failed() {
    let api = Arc::new(ScriptedApi::default());
    api.queue_health(Err(MuninnError::Connectivity("down".into())));

    let mut session = SessionController::new(api.clone());
    assert!(session.start().await.is_err());

    // Service comes back; defaults answer the second round.
    session.restart().await.expect("restart should reconnect");
    assert!(session.workspace().is_some());
}

// ============================================================================
// Submission
// ============================================================================

#[tokio::test]
async fn whitespace_submission_never_reaches_the_network() {
    let api = Arc::new(ScriptedApi::default());
    let mut session = SessionController::new(api.clone());
    session.start().await.unwrap();

    let result = session.submit("   ").await;

    assert!(matches!(result, Err(MuninnError::InvalidInput(_))));
    assert_eq!(api.process_calls(), 0);
    let ws = session.workspace().unwrap();
    assert_eq!(ws.view, View::Input);
    assert_eq!(ws.error, None, "guard rejection leaves no error message");
}

#[tokio::test]
async fn successful_submission_stores_result_and_shows_it() {
    let api = Arc::new(ScriptedApi::default());
    api.queue_leads(Ok(LeadPage {
        leads: vec![],
        total: 4,
    }));

    let mut session = SessionController::new(api);
    session.start().await.unwrap();
    session
        .submit("Met Sarah Johnson from GrowthTech, budget $30k.")
        .await
        .expect("submission should succeed");

    let ws = session.workspace().unwrap();
    assert_eq!(ws.view, View::Results);
    assert_eq!(ws.lead_count, 5, "counter bumps by one");
    assert!(!ws.submitting);
    let stored = ws.result.as_ref().expect("result stored");
    assert_eq!(stored.contact.name.as_deref(), Some("Sarah Johnson"));
}

#[tokio::test]
async fn failed_submission_stays_on_input_with_message() {
    let api = Arc::new(ScriptedApi::default());
    api.queue_process(Err(MuninnError::Api {
        status: 422,
        message: "Summary must be at least 10 characters".into(),
    }));

    let mut session = SessionController::new(api);
    session.start().await.unwrap();
    let result = session.submit("short but not empty").await;

    assert!(result.is_err());
    let ws = session.workspace().unwrap();
    assert_eq!(ws.view, View::Input);
    assert!(!ws.submitting, "flag returns to false after failure");
    assert!(ws.result.is_none());
    let message = ws.error.as_deref().expect("message surfaced");
    assert!(message.contains("Summary must be at least 10 characters"));
}

#[tokio::test]
async fn timeout_failure_surfaces_the_timeout_message() {
    let api = Arc::new(ScriptedApi::default());
    api.queue_process(Err(MuninnError::Timeout {
        operation: "process_meeting",
    }));

    let mut session = SessionController::new(api);
    session.start().await.unwrap();
    assert!(session.submit("a slow meeting summary").await.is_err());

    let ws = session.workspace().unwrap();
    assert!(!ws.submitting);
    let message = ws.error.as_deref().unwrap();
    assert!(
        message.contains("taking longer than expected"),
        "timeout message, not the generic network one: {message}"
    );
}

#[tokio::test]
async fn submission_while_in_flight_is_rejected() {
    let api = Arc::new(ScriptedApi::default());
    let mut session = SessionController::from_state(api.clone(), connected_workspace(true));

    let result = session.submit("another meeting").await;

    assert!(matches!(result, Err(MuninnError::InvalidInput(_))));
    assert_eq!(api.process_calls(), 0);
}

// ============================================================================
// Navigation
// ============================================================================

#[tokio::test]
async fn change_view_switches_between_views() {
    let api = Arc::new(ScriptedApi::default());
    let mut session = SessionController::new(api);
    session.start().await.unwrap();

    session.change_view(View::Dashboard).unwrap();
    assert_eq!(session.workspace().unwrap().view, View::Dashboard);
    session.change_view(View::Input).unwrap();
    assert_eq!(session.workspace().unwrap().view, View::Input);
}

#[tokio::test]
async fn change_view_rejected_mid_submission() {
    let api = Arc::new(ScriptedApi::default());
    let mut session = SessionController::from_state(api, connected_workspace(true));

    let result = session.change_view(View::Dashboard);

    assert!(matches!(result, Err(MuninnError::InvalidInput(_))));
    assert_eq!(session.workspace().unwrap().view, View::Input, "view unchanged");
}

#[tokio::test]
async fn new_meeting_clears_result_and_returns_to_input() {
    let api = Arc::new(ScriptedApi::default());
    let mut session = SessionController::new(api);
    session.start().await.unwrap();
    session.submit("Met Sarah Johnson, budget $30k.").await.unwrap();
    assert_eq!(session.workspace().unwrap().view, View::Results);

    session.new_meeting();

    let ws = session.workspace().unwrap();
    assert_eq!(ws.view, View::Input);
    assert!(ws.result.is_none());
    assert!(ws.error.is_none());
}

#[tokio::test]
async fn new_meeting_is_a_noop_on_input() {
    let api = Arc::new(ScriptedApi::default());
    let mut session = SessionController::new(api);
    session.start().await.unwrap();

    session.new_meeting();
    assert_eq!(session.workspace().unwrap().view, View::Input);
}

// ============================================================================
// Dashboard refresh
// ============================================================================

#[tokio::test]
async fn dashboard_refresh_fetches_page_and_stats_together() {
    let api = Arc::new(ScriptedApi::default());
    api.queue_leads(Ok(empty_page())); // startup count fetch
    api.queue_leads(Ok(LeadPage {
        leads: vec![sample_lead()],
        total: 12,
    }));
    api.queue_stats(Ok(Stats {
        total_leads: 12,
        total_deals: 3,
        total_value: 45000.0,
    }));

    let mut session = SessionController::new(api.clone());
    session.start().await.unwrap();
    let data = session.refresh_dashboard().await.expect("refresh should succeed");

    assert_eq!(data.total, 12);
    assert_eq!(data.leads.len(), 1);
    assert_eq!(data.stats.total_deals, 3);
    assert!(!data.is_empty());

    // The dashboard page size is configuration (default 10), not a literal
    // inside the fetch.
    assert!(api.calls().contains(&"get_leads(Some(10))".to_string()));
}

#[tokio::test]
async fn dashboard_refresh_is_all_or_nothing() {
    let api = Arc::new(ScriptedApi::default());
    api.queue_leads(Ok(empty_page())); // startup count fetch
    api.queue_leads(Ok(LeadPage {
        leads: vec![sample_lead()],
        total: 1,
    }));
    api.queue_stats(Err(MuninnError::Network("stats backend down".into())));

    let mut session = SessionController::new(api);
    session.start().await.unwrap();
    let result = session.refresh_dashboard().await;

    assert!(result.is_err(), "no partial rendering of leads without stats");
}

#[tokio::test]
async fn dashboard_refresh_requires_a_connected_session() {
    let api = Arc::new(ScriptedApi::default());
    let session = SessionController::from_state(
        api.clone(),
        SessionState::Failed {
            message: "connection refused".into(),
        },
    );

    let result = session.refresh_dashboard().await;

    assert!(matches!(result, Err(MuninnError::InvalidInput(_))));
    assert!(api.calls().is_empty(), "no fetch issued without a workspace");
}

#[tokio::test]
async fn dashboard_zero_state() {
    let api = Arc::new(ScriptedApi::default());
    let mut session = SessionController::new(api);
    session.start().await.unwrap();

    let data = session.refresh_dashboard().await.unwrap();
    assert!(data.is_empty(), "empty page and zero total render the zero-state");
}
