//! Scan reports: listing and the single-report view

mod controller;

pub use controller::{Phase, ReportViewController, SwitchOutcome};

use crate::client::{with_deadline, EntityStore, ListQuery};
use crate::error::Result;
use kisan_mitra_common::ScanReport;
use std::time::Duration;

/// All reports, newest first
pub async fn list_reports<S: EntityStore>(store: &S, deadline: Duration) -> Result<Vec<ScanReport>> {
    let query = ListQuery::new().sort("-created_date");
    let reports = with_deadline(deadline, store.list::<ScanReport>(&query)).await?;
    tracing::debug!(count = reports.len(), "reports listed");
    Ok(reports)
}
