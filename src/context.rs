use crate::client::{HttpEntityStore, HttpLlmService};
use crate::config::Config;
use crate::error::{KisanMitraError, Result};
use crate::preferences::PreferenceStore;
use std::time::Duration;

/// Services shared by every flow, built once in `main`
pub struct AppContext<S, L> {
    pub store: S,
    pub llm: L,
    pub preferences: PreferenceStore,
    /// Deadline applied to each external call
    pub deadline: Duration,
}

impl<S, L> AppContext<S, L> {
    pub fn new(store: S, llm: L, preferences: PreferenceStore, deadline: Duration) -> Self {
        Self {
            store,
            llm,
            preferences,
            deadline,
        }
    }
}

impl AppContext<HttpEntityStore, HttpLlmService> {
    pub fn from_config(config: &Config, preferences: PreferenceStore) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| KisanMitraError::Config(format!("cannot build HTTP client: {}", e)))?;

        let store = HttpEntityStore::from_config(client.clone(), config)?;
        let llm = HttpLlmService::from_config(client, config)?;
        Ok(Self::new(store, llm, preferences, config.timeout()))
    }
}
