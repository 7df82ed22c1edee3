//! In-memory fakes of the service traits

#![allow(dead_code)]

use kisan_mitra::client::{EntityStore, InvokeRequest, ListQuery, LlmService};
use kisan_mitra::error::{KisanMitraError, Result};
use kisan_mitra_common::{Entity, HealthStatus, Language, ScanReport, Treatments};
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Default)]
pub struct FakeStore {
    entities: Mutex<HashMap<&'static str, Vec<Value>>>,
    calls: Mutex<Vec<String>>,
    unavailable: AtomicBool,
    next_id: Mutex<u32>,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<E: Entity>(self, entities: &[E]) -> Self {
        for entity in entities {
            self.insert(entity);
        }
        self
    }

    pub fn insert<E: Entity>(&self, entity: &E) {
        let value = serde_json::to_value(entity).expect("serialize entity");
        self.entities
            .lock()
            .unwrap()
            .entry(E::ENTITY_TYPE)
            .or_default()
            .push(value);
    }

    pub fn stored<E: Entity>(&self) -> Vec<E> {
        self.entities
            .lock()
            .unwrap()
            .get(E::ENTITY_TYPE)
            .map(|values| {
                values
                    .iter()
                    .map(|v| serde_json::from_value(v.clone()).expect("stored entity"))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(KisanMitraError::Network("store unavailable".into()));
        }
        Ok(())
    }
}

fn field_text(value: &Value, field: &str) -> Option<String> {
    match value.get(field)? {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

impl EntityStore for FakeStore {
    async fn list<E: Entity>(&self, query: &ListQuery) -> Result<Vec<E>> {
        self.record(format!("list {}", E::ENTITY_TYPE))?;

        let mut values: Vec<Value> = self
            .entities
            .lock()
            .unwrap()
            .get(E::ENTITY_TYPE)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .filter(|v| {
                query
                    .filters
                    .iter()
                    .all(|(field, expected)| field_text(v, field).as_deref() == Some(expected.as_str()))
            })
            .collect();

        if let Some(sort) = &query.sort {
            let (field, descending) = match sort.strip_prefix('-') {
                Some(field) => (field, true),
                None => (sort.as_str(), false),
            };
            values.sort_by_key(|v| field_text(v, field));
            if descending {
                values.reverse();
            }
        }

        values
            .into_iter()
            .map(|v| serde_json::from_value(v).map_err(KisanMitraError::from))
            .collect()
    }

    async fn get<E: Entity>(&self, id: &str) -> Result<E> {
        self.record(format!("get {} {}", E::ENTITY_TYPE, id))?;

        let found = self
            .entities
            .lock()
            .unwrap()
            .get(E::ENTITY_TYPE)
            .and_then(|values| {
                values
                    .iter()
                    .find(|v| field_text(v, "id").as_deref() == Some(id))
                    .cloned()
            });

        match found {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Err(KisanMitraError::NotFound {
                entity: E::ENTITY_TYPE,
                id: id.to_string(),
            }),
        }
    }

    async fn create<E: Entity>(&self, entity: &E) -> Result<E> {
        self.record(format!("create {}", E::ENTITY_TYPE))?;

        let mut value = serde_json::to_value(entity)?;
        if field_text(&value, "id").is_none() {
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            value["id"] = Value::String(format!("{}_{}", E::ENTITY_TYPE.to_lowercase(), *next));
        }
        self.entities
            .lock()
            .unwrap()
            .entry(E::ENTITY_TYPE)
            .or_default()
            .push(value.clone());
        Ok(serde_json::from_value(value)?)
    }

    async fn update<E: Entity>(&self, id: &str, entity: &E) -> Result<E> {
        self.record(format!("update {} {}", E::ENTITY_TYPE, id))?;

        let mut value = serde_json::to_value(entity)?;
        value["id"] = Value::String(id.to_string());

        let mut entities = self.entities.lock().unwrap();
        let slot = entities
            .get_mut(E::ENTITY_TYPE)
            .and_then(|values| {
                values
                    .iter_mut()
                    .find(|v| field_text(v, "id").as_deref() == Some(id))
            })
            .ok_or_else(|| KisanMitraError::NotFound {
                entity: E::ENTITY_TYPE,
                id: id.to_string(),
            })?;
        *slot = value.clone();
        Ok(serde_json::from_value(value)?)
    }
}

/// Scripted LLM: answers are consumed in order; an empty script fails
#[derive(Default)]
pub struct FakeLlm {
    responses: Mutex<VecDeque<std::result::Result<Value, String>>>,
    requests: Mutex<Vec<InvokeRequest>>,
    delay: Option<Duration>,
}

impl FakeLlm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answering(response: Value) -> Self {
        let llm = Self::new();
        llm.push(response);
        llm
    }

    pub fn failing(message: &str) -> Self {
        let llm = Self::new();
        llm.push_error(message);
        llm
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn push(&self, response: Value) {
        self.responses.lock().unwrap().push_back(Ok(response));
    }

    pub fn push_error(&self, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
    }

    pub fn requests(&self) -> Vec<InvokeRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl LlmService for FakeLlm {
    async fn invoke(&self, request: &InvokeRequest) -> Result<Value> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(Ok(value)) => Ok(value),
            Some(Err(message)) => Err(KisanMitraError::Network(message)),
            None => Err(KisanMitraError::Network("no scripted response".into())),
        }
    }
}

pub const DEADLINE: Duration = Duration::from_secs(5);

/// English tomato report with blight
pub fn tomato_report() -> ScanReport {
    ScanReport {
        id: Some("r1".to_string()),
        image_url: "https://cdn.example.com/scans/r1.jpg".to_string(),
        plant_name: "Tomato".to_string(),
        scientific_name: Some("Solanum lycopersicum".to_string()),
        health_status: HealthStatus::Diseased,
        disease_name: Some("Blight".to_string()),
        symptoms: vec!["Brown spots on leaves".to_string()],
        causes: vec!["Fungal infection".to_string()],
        treatments: Treatments {
            organic: vec!["Neem oil spray".to_string()],
            chemical: vec!["Mancozeb".to_string()],
            preventive: vec!["Crop rotation".to_string()],
        },
        growth_tips: vec!["Water at the base".to_string()],
        confidence_score: Some(0.92),
        language: Language::English,
        created_date: kisan_mitra_common::timestamp::parse("2024-06-01T10:30:00Z"),
        health_status_label: None,
    }
}
