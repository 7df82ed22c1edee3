//! LLM response parser
//!
//! Extracts the JSON object from an LLM answer and validates it against the
//! translation / diagnosis shapes before anything is merged into a report.

use crate::error::{Error, Result};
use crate::translation::{RequiredKeys, TranslatableFields, TranslatedFields, TranslatedTreatments};
use crate::types::{HealthStatus, Language, ScanReport, Treatments};
use serde_json::{Map, Value};

/// Extract the JSON object part of a text response
///
/// Priority:
/// 1. ```json ... ``` block
/// 2. raw `{...}`
///
/// # Examples
/// ```
/// use kisan_mitra_common::extract_json;
///
/// let json = extract_json("Sure: {\"plant_name\": \"Rice\"}").unwrap();
/// assert_eq!(json, "{\"plant_name\": \"Rice\"}");
/// ```
pub fn extract_json(response: &str) -> Result<&str> {
    if let Some(start_marker) = response.find("```json") {
        let start = start_marker + 7;
        if let Some(end_offset) = response[start..].find("```") {
            let end = start + end_offset;
            return Ok(response[start..end].trim());
        }
    }

    if let Some(start) = response.find('{') {
        if let Some(end) = response.rfind('}') {
            if end > start {
                return Ok(&response[start..=end]);
            }
        }
    }

    Err(Error::Parse("no JSON object found".into()))
}

/// Normalize an LLM output into a JSON object
///
/// Schema-constrained calls usually return an object directly, but some
/// deployments return it serialized inside a string.
pub fn into_json_object(output: Value) -> Result<Map<String, Value>> {
    match output {
        Value::Object(map) => Ok(map),
        Value::String(text) => {
            let json_str = extract_json(&text)?;
            match serde_json::from_str::<Value>(json_str)? {
                Value::Object(map) => Ok(map),
                other => Err(malformed(format!("expected object, got {}", kind(&other)))),
            }
        }
        other => Err(malformed(format!("expected object, got {}", kind(&other)))),
    }
}

/// Validate a translation answer
///
/// Every key in `sent.required_keys()` must be present with a non-empty
/// value. Other known keys are optional, but when present (and not null)
/// must match the schema type. Unknown keys are ignored.
pub fn parse_translated_fields(output: Value, sent: &TranslatableFields) -> Result<TranslatedFields> {
    let map = into_json_object(output)?;

    let plant_name = required_string(&map, "plant_name")?;
    check_required(&map, &sent.required_keys())?;

    Ok(TranslatedFields {
        plant_name,
        scientific_name: optional_string(&map, "scientific_name")?,
        health_status: optional_string(&map, "health_status")?,
        disease_name: optional_string(&map, "disease_name")?,
        symptoms: optional_string_list(&map, "symptoms")?,
        causes: optional_string_list(&map, "causes")?,
        treatments: optional_treatments(&map)?,
        growth_tips: optional_string_list(&map, "growth_tips")?,
    })
}

/// Validate a diagnosis answer and build an unsaved report
///
/// Unlike translation, `health_status` is required and must be one of the
/// known wire values.
pub fn parse_diagnosis(output: Value, image_url: &str, language: Language) -> Result<ScanReport> {
    let map = into_json_object(output)?;

    let plant_name = required_string(&map, "plant_name")?;
    let status_raw = required_string(&map, "health_status")?;
    let health_status = HealthStatus::from(status_raw.to_lowercase());
    if !health_status.is_known() {
        return Err(malformed(format!("unknown health_status: {}", status_raw)));
    }

    let treatments = optional_treatments(&map)?.unwrap_or_default();
    let confidence_score = match map.get("confidence_score") {
        None | Some(Value::Null) => None,
        Some(Value::Number(n)) => n.as_f64().map(|v| v.clamp(0.0, 1.0)),
        Some(other) => {
            return Err(malformed(format!(
                "confidence_score must be a number, got {}",
                kind(other)
            )))
        }
    };

    let disease_name = optional_string(&map, "disease_name")?.filter(|s| !s.trim().is_empty());

    Ok(ScanReport {
        id: None,
        image_url: image_url.to_string(),
        plant_name,
        scientific_name: optional_string(&map, "scientific_name")?,
        disease_name: if health_status == HealthStatus::Diseased {
            disease_name
        } else {
            None
        },
        health_status,
        symptoms: optional_string_list(&map, "symptoms")?.unwrap_or_default(),
        causes: optional_string_list(&map, "causes")?.unwrap_or_default(),
        treatments: Treatments {
            organic: treatments.organic.unwrap_or_default(),
            chemical: treatments.chemical.unwrap_or_default(),
            preventive: treatments.preventive.unwrap_or_default(),
        },
        growth_tips: optional_string_list(&map, "growth_tips")?.unwrap_or_default(),
        confidence_score,
        language,
        created_date: None,
        health_status_label: None,
    })
}

// =============================================
// field helpers
// =============================================

fn malformed(msg: String) -> Error {
    Error::MalformedResponse(msg)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn required_string(map: &Map<String, Value>, key: &str) -> Result<String> {
    match optional_string(map, key)? {
        Some(s) if !s.trim().is_empty() => Ok(s),
        _ => Err(malformed(format!("{} is missing or empty", key))),
    }
}

fn is_filled(value: Option<&Value>) -> bool {
    match value {
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(_)) => true,
        _ => false,
    }
}

fn check_required(map: &Map<String, Value>, required: &RequiredKeys) -> Result<()> {
    if let Some(key) = required.top.iter().find(|k| !is_filled(map.get(**k))) {
        return Err(malformed(format!("{} is missing or empty", key)));
    }
    if let Some(Value::Object(inner)) = map.get("treatments") {
        if let Some(key) = required.treatments.iter().find(|k| !is_filled(inner.get(**k))) {
            return Err(malformed(format!("treatments.{} is missing or empty", key)));
        }
    } else if let Some(key) = required.treatments.first() {
        return Err(malformed(format!("treatments.{} is missing", key)));
    }
    Ok(())
}

fn optional_string(map: &Map<String, Value>, key: &str) -> Result<Option<String>> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(malformed(format!("{} must be a string, got {}", key, kind(other)))),
    }
}

fn string_list(value: &Value, key: &str) -> Result<Vec<String>> {
    let Value::Array(items) = value else {
        return Err(malformed(format!("{} must be an array, got {}", key, kind(value))));
    };
    items
        .iter()
        .map(|item| match item {
            Value::String(s) => Ok(s.clone()),
            other => Err(malformed(format!(
                "{} items must be strings, got {}",
                key,
                kind(other)
            ))),
        })
        .collect()
}

fn optional_string_list(map: &Map<String, Value>, key: &str) -> Result<Option<Vec<String>>> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => string_list(value, key).map(Some),
    }
}

fn optional_treatments(map: &Map<String, Value>) -> Result<Option<TranslatedTreatments>> {
    match map.get("treatments") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(inner)) => Ok(Some(TranslatedTreatments {
            organic: optional_string_list(inner, "organic")?,
            chemical: optional_string_list(inner, "chemical")?,
            preventive: optional_string_list(inner, "preventive")?,
        })),
        Some(other) => Err(malformed(format!(
            "treatments must be an object, got {}",
            kind(other)
        ))),
    }
}
