//! Persisted leads and server-side aggregates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::empty_as_none;
use super::record::{Company, Contact, Deal, PiiEntity};

/// A persisted extraction result.
///
/// Created by the backing store when a [`ProcessingResult`](super::ProcessingResult)
/// is persisted; `created_at` is server-assigned and never earlier than
/// `processed_at`. Leads are immutable snapshots: the client only ever
/// aggregates over them, it never mutates one after receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    #[serde(default)]
    pub pii: Vec<PiiEntity>,
    #[serde(default)]
    pub contact: Contact,
    #[serde(default)]
    pub company: Company,
    #[serde(default)]
    pub deal: Deal,
    pub confidence: f64,
    pub processed_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// One page of leads from `GET /api/leads`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadPage {
    pub leads: Vec<Lead>,
    /// Total persisted leads, independent of any `limit` applied to `leads`.
    pub total: u64,
}

/// Server-computed aggregates from `GET /api/stats`.
///
/// These three fields are the backing store's job; the client never
/// recomputes them from a page of leads (the offline variant uses
/// [`compute_stats`](crate::aggregate::compute_stats) instead).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub total_leads: u64,
    pub total_deals: u64,
    pub total_value: f64,
}

/// Response of the health probe at the service root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceHealth {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub status: Option<String>,
}
