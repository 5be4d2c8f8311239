//! Muninn - client-side orchestration for meeting-to-CRM extraction
//!
//! This crate turns free-text meeting summaries into structured CRM records
//! (contact, company, deal, detected PII) by driving a remote extraction
//! service, and lets a consumer review, export, and aggregate those records
//! across sessions. Extraction itself lives behind the network boundary;
//! muninn owns the session state machine, request orchestration, dashboard
//! aggregation, and export serialization.
//!
//! # Session Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use muninn::{ExtractionClient, SessionController};
//!
//! #[tokio::main]
//! async fn main() -> muninn::Result<()> {
//!     let client = Arc::new(ExtractionClient::new());
//!     let mut session = SessionController::new(client);
//!
//!     session.start().await?;
//!     session.submit("Met Sarah Johnson from GrowthTech, budget $30k, demo Friday.").await?;
//!
//!     if let Some(result) = session.workspace().and_then(|ws| ws.result.as_ref()) {
//!         println!("confidence: {}", result.confidence);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Export Example
//!
//! ```rust,no_run
//! use muninn::export::{self, ExportFormat};
//! # fn demo(result: &muninn::ProcessingResult) -> muninn::Result<()> {
//! let file = export::export_result(result, ExportFormat::Csv)?;
//! println!("{} ({})", file.filename, file.mime);
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod client;
pub mod error;
pub mod export;
pub mod session;
pub mod telemetry;
pub mod traits;
pub mod types;

// Re-export main types at crate root
pub use client::{ClientConfig, ExtractionClient};
pub use error::{MuninnError, Result};
pub use session::{DashboardData, SessionController, SessionState, View, Workspace};
pub use traits::ExtractionApi;

// Re-export record types
pub use types::{
    Company, Contact, Deal, ExtractionBatch, Lead, LeadPage, PiiEntity, ProcessingResult,
    ServiceHealth, Stats, StructuredCompany, StructuredContact, StructuredDeal,
};
