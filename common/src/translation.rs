//! Report translation payloads
//!
//! - TranslatableFields: the text-bearing subset of a ScanReport sent to the LLM
//! - RequiredKeys: the keys a translation must return, derived from what was sent
//! - TranslatedFields: the validated LLM answer
//! - apply_translation: overlay a translation onto the original snapshot

use crate::types::{Language, ScanReport, Treatments};
use serde::{Deserialize, Serialize};

/// Text fields of a report, as sent for translation
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TranslatableFields {
    pub plant_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scientific_name: Option<String>,
    pub health_status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disease_name: Option<String>,
    pub symptoms: Vec<String>,
    pub causes: Vec<String>,
    pub treatments: Treatments,
    pub growth_tips: Vec<String>,
}

impl From<&ScanReport> for TranslatableFields {
    fn from(report: &ScanReport) -> Self {
        Self {
            plant_name: report.plant_name.clone(),
            scientific_name: report.scientific_name.clone(),
            health_status: report.health_status.as_str().to_string(),
            disease_name: report.disease_name.clone(),
            symptoms: report.symptoms.clone(),
            causes: report.causes.clone(),
            treatments: report.treatments.clone(),
            growth_tips: report.growth_tips.clone(),
        }
    }
}

impl TranslatableFields {
    /// Keys the translated object must carry: `plant_name` plus every text
    /// field that is non-empty here. A reply missing one of them would leave
    /// source-language text under the target language tag.
    pub fn required_keys(&self) -> RequiredKeys {
        fn filled(value: &Option<String>) -> bool {
            value.as_deref().is_some_and(|s| !s.trim().is_empty())
        }

        let mut top = vec!["plant_name"];
        if filled(&self.scientific_name) {
            top.push("scientific_name");
        }
        if !self.health_status.trim().is_empty() {
            top.push("health_status");
        }
        if filled(&self.disease_name) {
            top.push("disease_name");
        }
        for (key, items) in [
            ("symptoms", &self.symptoms),
            ("causes", &self.causes),
            ("growth_tips", &self.growth_tips),
        ] {
            if !items.is_empty() {
                top.push(key);
            }
        }

        let treatments: Vec<&'static str> = [
            ("organic", &self.treatments.organic),
            ("chemical", &self.treatments.chemical),
            ("preventive", &self.treatments.preventive),
        ]
        .into_iter()
        .filter(|(_, items)| !items.is_empty())
        .map(|(key, _)| key)
        .collect();
        if !treatments.is_empty() {
            top.push("treatments");
        }

        RequiredKeys { top, treatments }
    }
}

/// Keys a translation reply must contain, with non-empty values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredKeys {
    pub top: Vec<&'static str>,
    /// Sub-keys of `treatments`
    pub treatments: Vec<&'static str>,
}

impl Default for RequiredKeys {
    fn default() -> Self {
        Self {
            top: vec!["plant_name"],
            treatments: Vec::new(),
        }
    }
}

/// Translated treatment lists; `None` keeps the original list
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TranslatedTreatments {
    pub organic: Option<Vec<String>>,
    pub chemical: Option<Vec<String>>,
    pub preventive: Option<Vec<String>>,
}

/// Validated translation result
///
/// Built by `parser::parse_translated_fields`, which rejects replies missing
/// any required key. `None` therefore only occurs for fields that were empty
/// in the original, and applying it keeps that empty value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TranslatedFields {
    pub plant_name: String,
    pub scientific_name: Option<String>,
    pub health_status: Option<String>,
    pub disease_name: Option<String>,
    pub symptoms: Option<Vec<String>>,
    pub causes: Option<Vec<String>>,
    pub treatments: Option<TranslatedTreatments>,
    pub growth_tips: Option<Vec<String>>,
}

/// Build the displayed snapshot: `original` overlaid by `translated`,
/// tagged with `target`.
///
/// Non-text fields (id, image_url, confidence_score, created_date) and the
/// `health_status` enum always come from `original`. The translated status
/// text is kept in `health_status_label`.
pub fn apply_translation(
    original: &ScanReport,
    translated: TranslatedFields,
    target: Language,
) -> ScanReport {
    let mut report = original.clone();

    report.plant_name = translated.plant_name;
    if let Some(name) = translated.scientific_name {
        report.scientific_name = Some(name);
    }
    if let Some(name) = translated.disease_name {
        report.disease_name = Some(name);
    }
    if let Some(items) = translated.symptoms {
        report.symptoms = items;
    }
    if let Some(items) = translated.causes {
        report.causes = items;
    }
    if let Some(t) = translated.treatments {
        if let Some(items) = t.organic {
            report.treatments.organic = items;
        }
        if let Some(items) = t.chemical {
            report.treatments.chemical = items;
        }
        if let Some(items) = t.preventive {
            report.treatments.preventive = items;
        }
    }
    if let Some(items) = translated.growth_tips {
        report.growth_tips = items;
    }

    report.health_status_label = translated.health_status.filter(|s| !s.trim().is_empty());
    report.language = target;
    report
}
