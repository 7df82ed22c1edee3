//! External service seams
//!
//! - EntityStore: CRUD on the remote entity store
//! - LlmService: prompt invocation (optionally schema-constrained)
//!
//! Flows are generic over these traits; `HttpEntityStore` and
//! `HttpLlmService` are the reqwest-backed implementations.

mod entity_store;
mod llm;

pub use entity_store::HttpEntityStore;
pub use llm::HttpLlmService;

use crate::error::{KisanMitraError, Result};
use kisan_mitra_common::Entity;
use serde::Serialize;
use serde_json::Value;
use std::future::Future;
use std::time::Duration;

/// List parameters: equality filters and an optional sort field
/// (`-field` for descending)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    pub filters: Vec<(String, String)>,
    pub sort: Option<String>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, field: &str, value: impl Into<String>) -> Self {
        self.filters.push((field.to_string(), value.into()));
        self
    }

    pub fn sort(mut self, field: &str) -> Self {
        self.sort = Some(field.to_string());
        self
    }

    /// Query string pairs, filters first
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = self.filters.clone();
        if let Some(sort) = &self.sort {
            pairs.push(("sort".to_string(), sort.clone()));
        }
        pairs
    }
}

#[allow(async_fn_in_trait)]
pub trait EntityStore {
    async fn list<E: Entity>(&self, query: &ListQuery) -> Result<Vec<E>>;

    /// Fails with `NotFound` for an unknown id
    async fn get<E: Entity>(&self, id: &str) -> Result<E>;

    async fn create<E: Entity>(&self, entity: &E) -> Result<E>;

    async fn update<E: Entity>(&self, id: &str, entity: &E) -> Result<E>;
}

impl<T: EntityStore> EntityStore for &T {
    async fn list<E: Entity>(&self, query: &ListQuery) -> Result<Vec<E>> {
        (**self).list(query).await
    }

    async fn get<E: Entity>(&self, id: &str) -> Result<E> {
        (**self).get(id).await
    }

    async fn create<E: Entity>(&self, entity: &E) -> Result<E> {
        (**self).create(entity).await
    }

    async fn update<E: Entity>(&self, id: &str, entity: &E) -> Result<E> {
        (**self).update(id, entity).await
    }
}

/// LLM invocation request
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InvokeRequest {
    pub prompt: String,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub add_context_from_internet: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_json_schema: Option<Value>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub file_urls: Vec<String>,
}

impl InvokeRequest {
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }

    pub fn with_schema(mut self, schema: Value) -> Self {
        self.response_json_schema = Some(schema);
        self
    }

    pub fn with_internet_context(mut self) -> Self {
        self.add_context_from_internet = true;
        self
    }

    pub fn with_file(mut self, url: impl Into<String>) -> Self {
        self.file_urls.push(url.into());
        self
    }
}

#[allow(async_fn_in_trait)]
pub trait LlmService {
    /// Returns a JSON string for free-text prompts, or the JSON object for
    /// schema-constrained ones.
    async fn invoke(&self, request: &InvokeRequest) -> Result<Value>;
}

impl<T: LlmService> LlmService for &T {
    async fn invoke(&self, request: &InvokeRequest) -> Result<Value> {
        (**self).invoke(request).await
    }
}

/// Run `fut` with a deadline; expiry becomes `KisanMitraError::Timeout`
pub async fn with_deadline<T, F>(deadline: Duration, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(deadline, fut).await {
        Ok(result) => result,
        Err(_) => Err(KisanMitraError::Timeout(deadline)),
    }
}

/// Text of a free-text LLM answer
pub fn output_text(output: Value) -> Result<String> {
    match output {
        Value::String(text) if !text.trim().is_empty() => Ok(text),
        Value::String(_) | Value::Null => Err(KisanMitraError::ApiParse("empty response".into())),
        other => Ok(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_query_pairs() {
        let query = ListQuery::new()
            .filter("language", "hindi")
            .sort("-created_date");
        assert_eq!(
            query.to_pairs(),
            vec![
                ("language".to_string(), "hindi".to_string()),
                ("sort".to_string(), "-created_date".to_string()),
            ]
        );
        assert!(ListQuery::new().to_pairs().is_empty());
    }

    #[test]
    fn test_invoke_request_serialize_minimal() {
        let request = InvokeRequest::text("hello");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, json!({"prompt": "hello"}));
    }

    #[test]
    fn test_invoke_request_serialize_full() {
        let request = InvokeRequest::text("diagnose")
            .with_internet_context()
            .with_schema(json!({"type": "object"}))
            .with_file("https://cdn.example.com/leaf.jpg");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["add_context_from_internet"], true);
        assert_eq!(json["response_json_schema"]["type"], "object");
        assert_eq!(json["file_urls"][0], "https://cdn.example.com/leaf.jpg");
    }

    #[test]
    fn test_output_text() {
        assert_eq!(output_text(json!("Use compost")).unwrap(), "Use compost");
        assert!(output_text(json!("  ")).is_err());
        assert!(output_text(Value::Null).is_err());
        assert_eq!(output_text(json!({"a": 1})).unwrap(), "{\"a\":1}");
    }

    #[tokio::test]
    async fn test_with_deadline_expires() {
        let result: Result<()> = with_deadline(Duration::from_millis(10), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        })
        .await;
        assert!(matches!(result, Err(KisanMitraError::Timeout(_))));
    }

    #[tokio::test]
    async fn test_with_deadline_passes_result() {
        let result = with_deadline(Duration::from_secs(1), async { Ok(7) }).await;
        assert_eq!(result.unwrap(), 7);
    }
}
