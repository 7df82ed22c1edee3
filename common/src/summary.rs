//! List-view reshaping
//!
//! Grouping reports by health status for the summary chart, and the local
//! category filter on daily tips.

use crate::types::{DailyTip, HealthStatus, ScanReport, TipCategory};
use std::str::FromStr;

/// One slice of the health summary
#[derive(Debug, Clone, PartialEq)]
pub struct HealthSummaryEntry {
    pub status: HealthStatus,
    pub count: usize,
    /// Share of all reports, rounded to a whole percent
    pub percent: u8,
}

/// Count reports per health status
///
/// Known statuses come first in a fixed order, then unknown ones in
/// first-seen order. Zero counts are omitted.
pub fn health_summary(reports: &[ScanReport]) -> Vec<HealthSummaryEntry> {
    let mut counts: Vec<(HealthStatus, usize)> = HealthStatus::KNOWN
        .iter()
        .cloned()
        .map(|s| (s, 0))
        .collect();

    for report in reports {
        match counts.iter_mut().find(|(s, _)| *s == report.health_status) {
            Some((_, n)) => *n += 1,
            None => counts.push((report.health_status.clone(), 1)),
        }
    }

    let total = reports.len();
    counts
        .into_iter()
        .filter(|(_, n)| *n > 0)
        .map(|(status, count)| HealthSummaryEntry {
            status,
            count,
            percent: ((count as f64 / total as f64) * 100.0).round() as u8,
        })
        .collect()
}

/// Tip category selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(TipCategory),
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        s.parse::<TipCategory>().map(CategoryFilter::Only)
    }
}

/// Filter tips by category, keeping order
pub fn filter_tips_by_category(tips: &[DailyTip], filter: CategoryFilter) -> Vec<&DailyTip> {
    tips.iter()
        .filter(|tip| match filter {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => tip.category == category,
        })
        .collect()
}
