//! Reports list, daily tips and diagnosis against in-memory services

mod common;

use common::{FakeLlm, FakeStore, DEADLINE};
use kisan_mitra::diagnose::diagnose;
use kisan_mitra::error::KisanMitraError;
use kisan_mitra::report::list_reports;
use kisan_mitra::tips::load_tips;
use kisan_mitra_common::{
    filter_tips_by_category, health_summary, timestamp, CategoryFilter, DailyTip, HealthStatus,
    Language, ScanReport, TipCategory, TipPriority,
};
use serde_json::json;

fn report(id: &str, status: HealthStatus, date: &str) -> ScanReport {
    ScanReport {
        id: Some(id.to_string()),
        plant_name: format!("plant {}", id),
        health_status: status,
        created_date: timestamp::parse(date),
        ..Default::default()
    }
}

fn tip(title: &str, category: TipCategory, language: Language, date: &str) -> DailyTip {
    DailyTip {
        id: Some(title.to_lowercase()),
        title: title.to_string(),
        content: format!("{} content", title),
        category,
        priority: TipPriority::Medium,
        language,
        created_date: timestamp::parse(date),
    }
}

#[tokio::test]
async fn test_reports_newest_first_with_summary() {
    let store = FakeStore::new().with(&[
        report("a", HealthStatus::Healthy, "2024-05-01T08:00:00Z"),
        report("b", HealthStatus::Diseased, "2024-05-03T08:00:00Z"),
        report("c", HealthStatus::Healthy, "2024-05-02T08:00:00Z"),
        report("d", HealthStatus::Unknown("wilting".into()), "2024-04-30T08:00:00Z"),
    ]);

    let reports = list_reports(&store, DEADLINE).await.unwrap();

    let ids: Vec<&str> = reports.iter().filter_map(|r| r.id.as_deref()).collect();
    assert_eq!(ids, vec!["b", "c", "a", "d"]);

    let summary = health_summary(&reports);
    let counts: Vec<(String, usize, u8)> = summary
        .iter()
        .map(|e| (e.status.as_str().to_string(), e.count, e.percent))
        .collect();
    assert_eq!(
        counts,
        vec![
            ("healthy".to_string(), 2, 50),
            ("diseased".to_string(), 1, 25),
            ("wilting".to_string(), 1, 25),
        ]
    );
}

#[tokio::test]
async fn test_reports_unavailable() {
    let store = FakeStore::new();
    store.set_unavailable(true);

    let err = list_reports(&store, DEADLINE).await.unwrap_err();

    assert!(err.is_unavailable());
}

#[tokio::test]
async fn test_tips_filtered_by_language_then_category() {
    let store = FakeStore::new().with(&[
        tip("Mulch", TipCategory::Watering, Language::English, "2024-06-01T06:00:00Z"),
        tip("Urea", TipCategory::Fertilizer, Language::English, "2024-06-03T06:00:00Z"),
        tip("Drip", TipCategory::Watering, Language::English, "2024-06-02T06:00:00Z"),
        tip("सिंचाई", TipCategory::Watering, Language::Hindi, "2024-06-04T06:00:00Z"),
    ]);

    let tips = load_tips(&store, Language::English, DEADLINE).await.unwrap();
    let titles: Vec<&str> = tips.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Urea", "Drip", "Mulch"]);

    let watering = filter_tips_by_category(&tips, CategoryFilter::Only(TipCategory::Watering));
    let titles: Vec<&str> = watering.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Drip", "Mulch"]);

    assert_eq!(filter_tips_by_category(&tips, CategoryFilter::All).len(), 3);
}

#[tokio::test]
async fn test_diagnose_creates_report() {
    let store = FakeStore::new();
    let llm = FakeLlm::answering(json!({
        "plant_name": "टमाटर",
        "scientific_name": "Solanum lycopersicum",
        "health_status": "diseased",
        "disease_name": "झुलसा",
        "symptoms": ["भूरे धब्बे"],
        "treatments": {"organic": ["नीम तेल"]},
        "confidence_score": 0.81
    }));
    let image_url = "https://cdn.example.com/uploads/leaf.jpg";

    let created = diagnose(&store, &llm, image_url, Language::Hindi, DEADLINE)
        .await
        .unwrap();

    assert!(created.id.is_some());
    assert_eq!(created.plant_name, "टमाटर");
    assert_eq!(created.health_status, HealthStatus::Diseased);
    assert_eq!(created.language, Language::Hindi);
    assert_eq!(created.image_url, image_url);
    assert_eq!(created.confidence_score, Some(0.81));
    assert_eq!(store.stored::<ScanReport>().len(), 1);

    let requests = llm.requests();
    assert_eq!(requests[0].file_urls, vec![image_url.to_string()]);
    assert!(requests[0].response_json_schema.is_some());
    assert!(requests[0].prompt.contains("Hindi"));
}

#[tokio::test]
async fn test_diagnose_rejects_unknown_status() {
    let store = FakeStore::new();
    let llm = FakeLlm::answering(json!({"plant_name": "Rice", "health_status": "sad"}));

    let err = diagnose(&store, &llm, "https://cdn.example.com/rice.jpg", Language::English, DEADLINE)
        .await
        .unwrap_err();

    assert!(err.is_malformed());
    assert!(store.calls().is_empty());
}

#[tokio::test]
async fn test_diagnose_empty_url_makes_no_call() {
    let store = FakeStore::new();
    let llm = FakeLlm::new();

    let err = diagnose(&store, &llm, " ", Language::English, DEADLINE)
        .await
        .unwrap_err();

    assert!(matches!(err, KisanMitraError::Input(_)), "{:?}", err);
    assert!(llm.requests().is_empty());
    assert!(store.calls().is_empty());
}
