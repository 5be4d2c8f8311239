//! Aggregation engine: pure functions over an in-memory lead snapshot.
//!
//! No network, no mutation, no retention: every function takes a borrowed
//! slice and returns owned numbers. [`compute_stats`] is reserved for the
//! standalone/offline variant; the API-backed deployment takes its three
//! headline numbers from `GET /api/stats` and never recomputes them here.

use std::collections::HashMap;

use crate::types::{Deal, Lead, Stats};

/// Size knobs for the dashboard views.
///
/// These are configuration, not literals: the "recent activity" list shows
/// `recent_limit` entries and the dashboard fetches `dashboard_page_size`
/// leads per refresh.
#[derive(Debug, Clone)]
pub struct AggregateConfig {
    /// Entries in the recent-activity list. Default: 5.
    pub recent_limit: usize,
    /// Leads fetched per dashboard refresh. Default: 10.
    pub dashboard_page_size: usize,
}

impl Default for AggregateConfig {
    fn default() -> Self {
        Self {
            recent_limit: 5,
            dashboard_page_size: 10,
        }
    }
}

/// Parse a free-text deal value ("30000", "$45,000") as a number.
///
/// Lenient on currency symbols and thousands separators; anything else is
/// `None`. Aggregation treats unparseable values as contributing zero,
/// never as an error.
pub fn deal_value_number(deal: &Deal) -> Option<f64> {
    let raw = deal.value.as_deref()?;
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '$' | ',') && !c.is_whitespace())
        .collect();
    cleaned.parse().ok()
}

/// Compute headline stats over a lead snapshot.
///
/// `total_deals` counts leads with a present deal value (numeric or not);
/// `total_value` sums the values that parse as numbers.
pub fn compute_stats(leads: &[Lead]) -> Stats {
    let total_deals = leads
        .iter()
        .filter(|lead| lead.deal.value.is_some())
        .count() as u64;
    let total_value = leads
        .iter()
        .filter_map(|lead| deal_value_number(&lead.deal))
        .sum();
    Stats {
        total_leads: leads.len() as u64,
        total_deals,
        total_value,
    }
}

/// Arithmetic mean of extraction confidence; 0 for an empty snapshot.
pub fn average_confidence(leads: &[Lead]) -> f64 {
    if leads.is_empty() {
        return 0.0;
    }
    leads.iter().map(|lead| lead.confidence).sum::<f64>() / leads.len() as f64
}

/// Count deals per stage label. Each lead with a non-empty stage contributes
/// exactly one count to its bucket.
pub fn deals_by_stage(leads: &[Lead]) -> HashMap<String, usize> {
    let mut buckets = HashMap::new();
    for lead in leads {
        if let Some(stage) = lead.deal.stage.as_deref()
            && !stage.trim().is_empty()
        {
            *buckets.entry(stage.to_string()).or_insert(0) += 1;
        }
    }
    buckets
}

/// Proportion of staged deals in one bucket, for proportional bars.
/// 0 when there are no staged deals (never NaN).
pub fn stage_share(buckets: &HashMap<String, usize>, stage: &str) -> f64 {
    let total: usize = buckets.values().sum();
    if total == 0 {
        return 0.0;
    }
    buckets.get(stage).copied().unwrap_or(0) as f64 / total as f64
}

/// The last `n` leads by arrival order, most-recent-first.
///
/// Stable for input arriving in ascending chronological order: the newest
/// lead comes out first.
pub fn recent(leads: &[Lead], n: usize) -> Vec<&Lead> {
    let start = leads.len().saturating_sub(n);
    leads[start..].iter().rev().collect()
}

/// Format a dollar amount with thousands separators ("$45,000").
pub fn format_usd(value: f64) -> String {
    let negative = value < 0.0;
    let whole = value.abs().trunc() as u64;
    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if negative {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_usd_groups_thousands() {
        assert_eq!(format_usd(45000.0), "$45,000");
        assert_eq!(format_usd(0.0), "$0");
        assert_eq!(format_usd(999.0), "$999");
        assert_eq!(format_usd(1234567.0), "$1,234,567");
    }

    #[test]
    fn deal_value_parsing_is_lenient() {
        let deal = |v: &str| Deal {
            value: Some(v.to_string()),
            ..Deal::default()
        };
        assert_eq!(deal_value_number(&deal("30000")), Some(30000.0));
        assert_eq!(deal_value_number(&deal("$45,000")), Some(45000.0));
        assert_eq!(deal_value_number(&deal("$ 1 250.5")), Some(1250.5));
        assert_eq!(deal_value_number(&deal("about fifty grand")), None);
        assert_eq!(deal_value_number(&Deal::default()), None);
    }
}
