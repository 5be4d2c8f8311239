//! Extraction result records: the canonical (API-backed) shapes.
//!
//! Every optional field is a tagged present/absent value. Absent fields
//! serialize as explicit `null` so a JSON export can be re-imported without
//! loss; blank strings on the wire deserialize to absent (see
//! [`empty_as_none`](super::empty_as_none)).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::empty_as_none;

/// A detected PII span in the submitted text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PiiEntity {
    /// Category label (e.g. "EMAIL_ADDRESS", "PHONE_NUMBER").
    pub entity: String,
    /// Half-open character offsets into the submitted text:
    /// `0 <= start < end <= len(text)`.
    pub start: usize,
    pub end: usize,
    /// Detector confidence in `[0, 1]`.
    pub score: f64,
}

impl PiiEntity {
    /// Check the offset invariant against the text the entity was detected in.
    pub fn offsets_valid(&self, text: &str) -> bool {
        self.start < self.end && self.end <= text.chars().count()
    }
}

/// An extracted contact. No identity beyond its owning result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub phone: Option<String>,
}

/// An extracted company. Size and budget are free text, not guaranteed numeric.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Company {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub industry: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub size: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub budget: Option<String>,
}

/// An extracted deal in the canonical free-text shape.
///
/// The standalone numeric variant ([`StructuredDeal`](super::StructuredDeal))
/// is translated into this shape at the boundary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub value: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub stage: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub timeline: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub competitor: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub next_action: Option<String>,
}

/// The synchronous response to one meeting submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingResult {
    #[serde(default)]
    pub pii: Vec<PiiEntity>,
    #[serde(default)]
    pub contact: Contact,
    #[serde(default)]
    pub company: Company,
    #[serde(default)]
    pub deal: Deal,
    /// Extraction confidence in `[0, 1]`.
    pub confidence: f64,
    pub processed_at: DateTime<Utc>,
    pub success: bool,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub error: Option<String>,
}

impl ProcessingResult {
    /// Whether the extracted fields may be treated as authoritative.
    ///
    /// When the service reports `success: false`, contact/company/deal are
    /// best-effort partials and must not be presented as extracted facts.
    pub fn is_authoritative(&self) -> bool {
        self.success
    }

    pub fn has_contact_data(&self) -> bool {
        let c = &self.contact;
        c.name.is_some() || c.title.is_some() || c.email.is_some() || c.phone.is_some()
    }

    pub fn has_company_data(&self) -> bool {
        let c = &self.company;
        c.name.is_some() || c.industry.is_some() || c.size.is_some() || c.budget.is_some()
    }

    pub fn has_deal_data(&self) -> bool {
        let d = &self.deal;
        d.value.is_some()
            || d.stage.is_some()
            || d.timeline.is_some()
            || d.competitor.is_some()
            || d.next_action.is_some()
    }
}
