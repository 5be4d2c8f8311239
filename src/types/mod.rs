//! Core record types shared across the crate

mod lead;
mod record;
mod structured;

pub use lead::{Lead, LeadPage, ServiceHealth, Stats};
pub use record::{Company, Contact, Deal, PiiEntity, ProcessingResult};
pub use structured::{ExtractionBatch, StructuredCompany, StructuredContact, StructuredDeal};

use serde::{Deserialize, Deserializer};

/// Deserialize an optional string, collapsing empty/whitespace-only values
/// to `None`.
///
/// The wire format does not distinguish "field omitted" from "field present
/// but blank"; both mean the extractor found nothing, so both become the one
/// explicit absent state.
pub(crate) fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
