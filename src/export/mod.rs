//! Export serializer: flatten a result to CSV or serialize it to JSON.
//!
//! JSON export is lossless: absent fields appear as explicit `null`, so
//! parsing the output back yields the original record. CSV is lossy by
//! design: absent fields are dropped. Every CSV cell is quoted and embedded
//! quotes are doubled per RFC 4180.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, Utc};

use crate::aggregate::format_usd;
use crate::types::{ExtractionBatch, ProcessingResult};
use crate::{MuninnError, Result};

/// The two supported download formats. Anything else is a programming error,
/// rejected at parse time rather than silently defaulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn mime(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Json => "application/json",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = MuninnError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(MuninnError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// A ready-to-download export: dated filename, MIME type, and content.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportFile {
    /// `meeting-data-<YYYY-MM-DD>.<ext>`
    pub filename: String,
    pub mime: &'static str,
    pub content: String,
}

/// Serialize a result losslessly to JSON.
///
/// Absent optional fields are emitted as explicit `null`, never omitted, so
/// a re-import round-trips exactly.
pub fn to_json(result: &ProcessingResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

/// Flatten a result into `(Type, Field, Value)` CSV rows, header first,
/// skipping absent fields.
pub fn result_to_csv(result: &ProcessingResult) -> String {
    let mut rows: Vec<Vec<String>> = vec![vec!["Type".into(), "Field".into(), "Value".into()]];

    let contact = &result.contact;
    let company = &result.company;
    let deal = &result.deal;
    let fields: [(&str, &str, &Option<String>); 13] = [
        ("Contact", "Name", &contact.name),
        ("Contact", "Title", &contact.title),
        ("Contact", "Email", &contact.email),
        ("Contact", "Phone", &contact.phone),
        ("Company", "Name", &company.name),
        ("Company", "Industry", &company.industry),
        ("Company", "Size", &company.size),
        ("Company", "Budget", &company.budget),
        ("Deal", "Value", &deal.value),
        ("Deal", "Stage", &deal.stage),
        ("Deal", "Timeline", &deal.timeline),
        ("Deal", "Competitor", &deal.competitor),
        ("Deal", "Next Action", &deal.next_action),
    ];
    for (kind, field, value) in fields {
        if let Some(value) = value {
            rows.push(vec![kind.into(), field.into(), value.clone()]);
        }
    }

    render_rows(&rows)
}

/// Flatten a structured batch into `(Type, Name, Details, Value)` CSV rows,
/// the list-shape variant used by the standalone deployment.
pub fn batch_to_csv(batch: &ExtractionBatch) -> String {
    let mut rows: Vec<Vec<String>> = vec![
        ["Type", "Name", "Details", "Value"]
            .map(String::from)
            .to_vec(),
    ];

    for contact in &batch.contacts {
        rows.push(vec![
            "Contact".into(),
            contact.name.clone(),
            format!("{} at {}", contact.title, contact.company),
            contact.email.clone(),
        ]);
    }
    for company in &batch.companies {
        rows.push(vec![
            "Company".into(),
            company.name.clone(),
            company.industry.clone(),
            format!("{} employees", company.size),
        ]);
    }
    for deal in &batch.deals {
        rows.push(vec![
            "Deal".into(),
            deal.name.clone(),
            deal.stage.clone(),
            format_usd(deal.value),
        ]);
    }

    render_rows(&rows)
}

/// Produce a download for the given format, dated today (UTC).
pub fn export_result(result: &ProcessingResult, format: ExportFormat) -> Result<ExportFile> {
    export_result_dated(result, format, Utc::now().date_naive())
}

/// Produce a download with an explicit date (the testable entry point).
pub fn export_result_dated(
    result: &ProcessingResult,
    format: ExportFormat,
    date: NaiveDate,
) -> Result<ExportFile> {
    let content = match format {
        ExportFormat::Csv => result_to_csv(result),
        ExportFormat::Json => to_json(result)?,
    };
    Ok(ExportFile {
        filename: format!(
            "meeting-data-{}.{}",
            date.format("%Y-%m-%d"),
            format.extension()
        ),
        mime: format.mime(),
        content,
    })
}

/// Quote a cell, doubling embedded quotes (RFC 4180).
fn escape_cell(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}

fn render_rows(rows: &[Vec<String>]) -> String {
    rows.iter()
        .map(|row| {
            row.iter()
                .map(|cell| escape_cell(cell))
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
