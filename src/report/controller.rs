//! Report view controller
//!
//! Keeps the fetched report (`original`) and what is currently shown
//! (`displayed`). Language switches re-render `displayed` from `original`
//! through one LLM translation call; switching back to the report's own
//! language is local.

use crate::client::{with_deadline, EntityStore, InvokeRequest, LlmService};
use crate::error::{KisanMitraError, Result};
use kisan_mitra_common::{
    apply_translation, build_translation_prompt, parse_translated_fields, translation_schema,
    Language, ScanReport, TranslatableFields,
};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Loaded,
    Translating,
    /// Load failed; carries the message shown to the user
    Error(String),
}

/// Result of a language switch
#[derive(Debug, Clone, PartialEq)]
pub enum SwitchOutcome {
    /// Target is the report's own language; `displayed` reset to `original`
    Reverted,
    Translated,
    /// Translation failed; `displayed` kept as it was
    Failed(String),
    NotLoaded,
}

pub struct ReportViewController<S, L> {
    store: S,
    llm: L,
    deadline: Duration,
    phase: Phase,
    original: Option<ScanReport>,
    displayed: Option<ScanReport>,
}

impl<S: EntityStore, L: LlmService> ReportViewController<S, L> {
    pub fn new(store: S, llm: L, deadline: Duration) -> Self {
        Self {
            store,
            llm,
            deadline,
            phase: Phase::Idle,
            original: None,
            displayed: None,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn original(&self) -> Option<&ScanReport> {
        self.original.as_ref()
    }

    pub fn displayed(&self) -> Option<&ScanReport> {
        self.displayed.as_ref()
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.phase {
            Phase::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Fetch a report by id
    ///
    /// A failed load leaves both snapshots empty and the phase in `Error`.
    pub async fn load(&mut self, report_id: &str) -> Result<&ScanReport> {
        self.original = None;
        self.displayed = None;

        let report_id = report_id.trim();
        if report_id.is_empty() {
            self.phase = Phase::Error("Report ID not found.".to_string());
            return Err(KisanMitraError::NotFound {
                entity: "PlantScan",
                id: String::new(),
            });
        }

        self.phase = Phase::Loading;
        tracing::debug!(report_id, "loading report");

        let fetched = with_deadline(self.deadline, self.store.get::<ScanReport>(report_id)).await;
        match fetched {
            Ok(report) => {
                tracing::info!(report_id, plant = %report.plant_name, "report loaded");
                self.phase = Phase::Loaded;
                self.displayed = Some(report.clone());
                Ok(self.original.insert(report))
            }
            Err(e) => {
                let message = if e.is_not_found() {
                    "Report not found.".to_string()
                } else {
                    format!("Failed to load report: {}", e)
                };
                tracing::error!(report_id, error = %e, "failed to load report");
                self.phase = Phase::Error(message);
                Err(e)
            }
        }
    }

    /// Re-render the displayed report in `target`
    pub async fn switch_language(&mut self, target: Language) -> SwitchOutcome {
        let Some(original) = self.original.as_ref() else {
            tracing::warn!(%target, "language switch requested before a report was loaded");
            return SwitchOutcome::NotLoaded;
        };

        if target == original.language {
            self.displayed = Some(original.clone());
            return SwitchOutcome::Reverted;
        }

        self.phase = Phase::Translating;
        let result = translate(&self.llm, self.deadline, original, target).await;
        self.phase = Phase::Loaded;

        match result {
            Ok(translated) => {
                tracing::info!(%target, "report translated");
                self.displayed = Some(translated);
                SwitchOutcome::Translated
            }
            Err(e) => {
                tracing::warn!(%target, error = %e, "translation failed, keeping current view");
                SwitchOutcome::Failed(e.to_string())
            }
        }
    }
}

async fn translate<L: LlmService>(
    llm: &L,
    deadline: Duration,
    original: &ScanReport,
    target: Language,
) -> Result<ScanReport> {
    let fields = TranslatableFields::from(original);
    let request = InvokeRequest::text(build_translation_prompt(&fields, target)?)
        .with_schema(translation_schema(&fields));

    let output = with_deadline(deadline, llm.invoke(&request)).await?;
    let translated = parse_translated_fields(output, &fields)?;
    Ok(apply_translation(original, translated, target))
}
