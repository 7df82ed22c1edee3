use crate::client::{with_deadline, EntityStore, InvokeRequest, LlmService};
use crate::error::{KisanMitraError, Result};
use kisan_mitra_common::{build_diagnosis_prompt, diagnosis_schema, parse_diagnosis, Language, ScanReport};
use std::time::Duration;

/// Diagnose the plant in a hosted photograph and store the report
///
/// # Arguments
/// * `image_url` - publicly reachable image URL, attached to the LLM call
/// * `language` - language for every text field of the report
///
/// # Returns
/// The created `PlantScan` entity (with its store-assigned id)
pub async fn diagnose<S: EntityStore, L: LlmService>(
    store: &S,
    llm: &L,
    image_url: &str,
    language: Language,
    deadline: Duration,
) -> Result<ScanReport> {
    let image_url = image_url.trim();
    if image_url.is_empty() {
        return Err(KisanMitraError::Input("image URL is empty".into()));
    }

    let request = InvokeRequest::text(build_diagnosis_prompt(language))
        .with_schema(diagnosis_schema())
        .with_file(image_url);

    tracing::info!(image_url, %language, "requesting diagnosis");
    let output = with_deadline(deadline, llm.invoke(&request)).await?;
    let report = parse_diagnosis(output, image_url, language)?;

    let created = with_deadline(deadline, store.create(&report)).await?;
    tracing::info!(
        id = created.id.as_deref().unwrap_or("-"),
        plant = %created.plant_name,
        status = %created.health_status,
        "diagnosis stored"
    );
    Ok(created)
}
