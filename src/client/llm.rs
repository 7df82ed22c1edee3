use super::entity_store::{check_status, map_transport_error, read_json};
use super::{InvokeRequest, LlmService};
use crate::config::Config;
use crate::error::Result;
use reqwest::Client;
use serde_json::Value;

/// LLM integration endpoint (`{app_url}/integrations/Core/InvokeLLM`)
#[derive(Clone)]
pub struct HttpLlmService {
    client: Client,
    url: String,
    api_key: String,
}

impl HttpLlmService {
    pub fn new(client: Client, url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            api_key: api_key.into(),
        }
    }

    pub fn from_config(client: Client, config: &Config) -> Result<Self> {
        Ok(Self::new(client, config.llm_url()?, config.get_api_key()?))
    }
}

impl LlmService for HttpLlmService {
    async fn invoke(&self, request: &InvokeRequest) -> Result<Value> {
        tracing::debug!(
            url = %self.url,
            prompt_len = request.prompt.len(),
            schema = request.response_json_schema.is_some(),
            files = request.file_urls.len(),
            "invoke llm"
        );

        let response = self
            .client
            .post(&self.url)
            .header("api_key", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(map_transport_error)?;

        read_json(check_status(response).await?).await
    }
}
