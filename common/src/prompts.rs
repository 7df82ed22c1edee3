//! Prompt builders
//!
//! - build_translation_prompt / translation_schema: report re-rendering
//! - build_chat_prompt: farming assistant answer
//! - build_diagnosis_prompt / diagnosis_schema: photo diagnosis

use crate::error::Result;
use crate::translation::TranslatableFields;
use crate::types::Language;
use serde_json::{json, Value};

/// Translation prompt
///
/// # Arguments
/// * `fields` - text fields of the original report
/// * `target` - language to translate into
pub fn build_translation_prompt(fields: &TranslatableFields, target: Language) -> Result<String> {
    let payload = serde_json::to_string_pretty(fields)?;
    Ok(format!(
        r#"Translate the string values in the following JSON object to {target}. Keep the original JSON structure and keys. Do not translate the keys themselves. Provide only the translated JSON object as the output.

JSON to translate:
{payload}"#,
        target = target.prompt_name(),
    ))
}

fn string_array() -> Value {
    json!({ "type": "array", "items": { "type": "string" } })
}

fn treatments_schema(required: &[&str]) -> Value {
    json!({
        "type": "object",
        "properties": {
            "organic": string_array(),
            "chemical": string_array(),
            "preventive": string_array()
        },
        "required": required
    })
}

/// JSON schema constraining the translation output
///
/// Every non-empty field of `fields` is listed under `required`.
pub fn translation_schema(fields: &TranslatableFields) -> Value {
    let required = fields.required_keys();
    json!({
        "type": "object",
        "properties": {
            "plant_name": { "type": "string" },
            "scientific_name": { "type": "string" },
            "health_status": { "type": "string" },
            "disease_name": { "type": "string" },
            "symptoms": string_array(),
            "causes": string_array(),
            "treatments": treatments_schema(&required.treatments),
            "growth_tips": string_array()
        },
        "required": required.top
    })
}

/// Farming assistant prompt
pub fn build_chat_prompt(question: &str, language: Language) -> String {
    format!(
        r#"You are an expert AI farming assistant helping farmers. Answer the following question in {language}.

Be practical, specific, and actionable in your advice. Focus on:
- Practical farming solutions
- Cost-effective methods
- Organic and chemical options when relevant
- Seasonal considerations
- Local farming practices in India
- Disease prevention and treatment
- Crop management
- Soil health
- Irrigation techniques
- Market prices and crop selection
- Weather-related farming advice

Farmer's question: {question}

Provide a helpful, detailed response that a farmer can easily understand and implement. Use simple language and include specific measurements, timing, and steps when possible."#,
        language = language.prompt_name(),
    )
}

/// Plant diagnosis prompt for an attached photograph
pub fn build_diagnosis_prompt(language: Language) -> String {
    format!(
        r#"You are an expert plant pathologist helping farmers in India. Analyze the attached plant photograph.

Identify the plant and assess its health. Respond in {language} for every text value, but keep "health_status" as exactly one of: healthy, diseased, pest_affected, nutrient_deficient.

Include:
- plant_name and scientific_name
- health_status
- disease_name (only if diseased)
- symptoms visible in the photo
- likely causes
- treatments split into organic, chemical and preventive measures
- growth_tips for this plant
- confidence_score between 0 and 1

Use simple language a farmer can act on. Output only the JSON object."#,
        language = language.prompt_name(),
    )
}

/// JSON schema constraining the diagnosis output
pub fn diagnosis_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "plant_name": { "type": "string" },
            "scientific_name": { "type": "string" },
            "health_status": {
                "type": "string",
                "enum": ["healthy", "diseased", "pest_affected", "nutrient_deficient"]
            },
            "disease_name": { "type": "string" },
            "symptoms": string_array(),
            "causes": string_array(),
            "treatments": treatments_schema(&[]),
            "growth_tips": string_array(),
            "confidence_score": { "type": "number" }
        },
        "required": ["plant_name", "health_status"]
    })
}
