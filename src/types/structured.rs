//! The standalone (offline mock) record shapes and their boundary translation.
//!
//! The offline variant of the system emits lists of structured records with
//! numeric deal values instead of the API-backed single-record free-text
//! shape. The canonical shape is the API-backed one; these types exist so a
//! batch can be accepted at the boundary and translated, never guessed at
//! downstream.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::record::{Company, Contact, Deal, ProcessingResult};

/// Contact in the structured batch shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredContact {
    pub name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    /// Whether this contact holds decision authority.
    pub authority: bool,
    pub company: String,
}

/// Company in the structured batch shape. `size` is a headcount, not free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredCompany {
    pub name: String,
    pub industry: String,
    pub size: u64,
    pub website: String,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub pain_points: Vec<String>,
}

/// Deal in the structured batch shape: numeric value, currency, probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredDeal {
    pub name: String,
    pub value: f64,
    pub currency: String,
    pub stage: String,
    pub competitor: String,
    pub next_step: String,
    pub timeline: String,
    /// Win probability in percent.
    pub probability: f64,
}

/// One extraction in the structured batch shape: lists of records rather
/// than a single contact/company/deal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionBatch {
    pub contacts: Vec<StructuredContact>,
    pub companies: Vec<StructuredCompany>,
    pub deals: Vec<StructuredDeal>,
    pub summary: String,
    pub confidence: f64,
    pub extracted_at: DateTime<Utc>,
}

fn non_blank(s: String) -> Option<String> {
    if s.trim().is_empty() { None } else { Some(s) }
}

/// Format a numeric deal value as canonical free text ("30000", "1250.5").
fn value_text(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

impl From<StructuredContact> for Contact {
    fn from(c: StructuredContact) -> Self {
        Contact {
            name: non_blank(c.name),
            title: non_blank(c.title),
            email: non_blank(c.email),
            phone: non_blank(c.phone),
        }
    }
}

impl From<StructuredCompany> for Company {
    fn from(c: StructuredCompany) -> Self {
        Company {
            name: non_blank(c.name),
            industry: non_blank(c.industry),
            size: Some(c.size.to_string()),
            budget: None,
        }
    }
}

impl From<StructuredDeal> for Deal {
    fn from(d: StructuredDeal) -> Self {
        Deal {
            value: Some(value_text(d.value)),
            stage: non_blank(d.stage),
            timeline: non_blank(d.timeline),
            competitor: non_blank(d.competitor),
            next_action: non_blank(d.next_step),
        }
    }
}

/// Translate a structured batch into the canonical single-record result.
///
/// The first contact, company, and deal win; the batch shape has no PII
/// spans, so `pii` is empty and the translation is always `success`.
impl From<ExtractionBatch> for ProcessingResult {
    fn from(batch: ExtractionBatch) -> Self {
        ProcessingResult {
            pii: Vec::new(),
            contact: batch.contacts.into_iter().next().map(Contact::from).unwrap_or_default(),
            company: batch
                .companies
                .into_iter()
                .next()
                .map(Company::from)
                .unwrap_or_default(),
            deal: batch.deals.into_iter().next().map(Deal::from).unwrap_or_default(),
            confidence: batch.confidence,
            processed_at: batch.extracted_at,
            success: true,
            error: None,
        }
    }
}
