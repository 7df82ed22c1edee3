//! Terminal rendering of reports, summaries and tips

use kisan_mitra_common::{health_status_label, DailyTip, HealthSummaryEntry, ScanReport};
use std::fmt::Write;

const BAR_WIDTH: usize = 20;

/// Status label: the translated text when present, else the built-in label
pub fn status_text(report: &ScanReport) -> String {
    report
        .health_status_label
        .clone()
        .unwrap_or_else(|| health_status_label(&report.health_status, report.language))
}

fn push_list(out: &mut String, heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    let _ = writeln!(out, "{}:", heading);
    for item in items {
        let _ = writeln!(out, "  - {}", item);
    }
}

pub fn format_report(report: &ScanReport) -> String {
    let mut out = String::new();

    let _ = write!(out, "🌿 {}", report.plant_name);
    if let Some(name) = report.scientific_name.as_deref().filter(|s| !s.is_empty()) {
        let _ = write!(out, " ({})", name);
    }
    out.push('\n');

    let _ = writeln!(
        out,
        "Status: {} [{}]",
        status_text(report),
        report.health_status.color()
    );
    if let Some(disease) = report.disease_name.as_deref().filter(|s| !s.is_empty()) {
        let _ = writeln!(out, "Disease: {}", disease);
    }
    if let Some(percent) = report.confidence_percent() {
        let _ = writeln!(out, "Confidence: {}%", percent);
    }
    if let Some(date) = report.created_date {
        let _ = writeln!(out, "Scanned: {}", date.format("%Y-%m-%d %H:%M"));
    }
    let _ = writeln!(out, "Language: {}", report.language.native_name());

    push_list(&mut out, "Symptoms", &report.symptoms);
    push_list(&mut out, "Causes", &report.causes);
    push_list(&mut out, "Organic treatment", &report.treatments.organic);
    push_list(&mut out, "Chemical treatment", &report.treatments.chemical);
    push_list(&mut out, "Prevention", &report.treatments.preventive);
    push_list(&mut out, "Growth tips", &report.growth_tips);

    out
}

/// One line per report: date, plant, status
pub fn format_report_row(report: &ScanReport) -> String {
    let date = report
        .created_date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "----------".to_string());
    format!(
        "{}  {:<12} {:<20} {}",
        date,
        report.id.as_deref().unwrap_or("-"),
        report.plant_name,
        status_text(report)
    )
}

pub fn format_summary(entries: &[HealthSummaryEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        let filled = (entry.percent as usize * BAR_WIDTH + 50) / 100;
        let _ = writeln!(
            out,
            "{:<20} {:<width$} {:>3} ({}%)",
            entry.status.as_str(),
            "█".repeat(filled),
            entry.count,
            entry.percent,
            width = BAR_WIDTH
        );
    }
    out
}

pub fn format_tip(tip: &DailyTip) -> String {
    let badge = if tip.is_high_priority() { "⭐ " } else { "" };
    format!("{}{} [{}]\n  {}", badge, tip.title, tip.category, tip.content)
}
