use super::{EntityStore, ListQuery};
use crate::config::Config;
use crate::error::{KisanMitraError, Result};
use kisan_mitra_common::Entity;
use reqwest::{Client, RequestBuilder, Response, StatusCode};

/// Entity store over HTTP
///
/// `GET/POST/PUT {app_url}/entities/{Type}[/{id}]`, authenticated with the
/// `api_key` header.
#[derive(Clone)]
pub struct HttpEntityStore {
    client: Client,
    app_url: String,
    api_key: String,
}

impl HttpEntityStore {
    pub fn new(client: Client, app_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            app_url: app_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn from_config(client: Client, config: &Config) -> Result<Self> {
        Ok(Self::new(client, config.app_url()?, config.get_api_key()?))
    }

    fn collection_url<E: Entity>(&self) -> String {
        format!("{}/entities/{}", self.app_url, E::ENTITY_TYPE)
    }

    fn item_url<E: Entity>(&self, id: &str) -> String {
        format!("{}/{}", self.collection_url::<E>(), id)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        request
            .header("api_key", &self.api_key)
            .send()
            .await
            .map_err(map_transport_error)
    }
}

impl EntityStore for HttpEntityStore {
    async fn list<E: Entity>(&self, query: &ListQuery) -> Result<Vec<E>> {
        let url = self.collection_url::<E>();
        tracing::debug!(%url, filters = ?query.filters, sort = ?query.sort, "list entities");

        let response = self
            .send(self.client.get(&url).query(&query.to_pairs()))
            .await?;
        read_json(check_status(response).await?).await
    }

    async fn get<E: Entity>(&self, id: &str) -> Result<E> {
        let url = self.item_url::<E>(id);
        tracing::debug!(%url, "get entity");

        let response = self.send(self.client.get(&url)).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(KisanMitraError::NotFound {
                entity: E::ENTITY_TYPE,
                id: id.to_string(),
            });
        }
        read_json(check_status(response).await?).await
    }

    async fn create<E: Entity>(&self, entity: &E) -> Result<E> {
        let url = self.collection_url::<E>();
        tracing::debug!(%url, "create entity");

        let response = self.send(self.client.post(&url).json(entity)).await?;
        read_json(check_status(response).await?).await
    }

    async fn update<E: Entity>(&self, id: &str, entity: &E) -> Result<E> {
        let url = self.item_url::<E>(id);
        tracing::debug!(%url, "update entity");

        let response = self.send(self.client.put(&url).json(entity)).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(KisanMitraError::NotFound {
                entity: E::ENTITY_TYPE,
                id: id.to_string(),
            });
        }
        read_json(check_status(response).await?).await
    }
}

pub(super) fn map_transport_error(e: reqwest::Error) -> KisanMitraError {
    if e.is_timeout() {
        KisanMitraError::Network(format!("request timed out: {}", e))
    } else if e.is_connect() {
        KisanMitraError::Network(format!("cannot connect: {}", e))
    } else {
        KisanMitraError::Network(e.to_string())
    }
}

pub(super) async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(KisanMitraError::Http {
        status: status.as_u16(),
        body,
    })
}

pub(super) async fn read_json<T: serde::de::DeserializeOwned>(response: Response) -> Result<T> {
    let text = response.text().await.map_err(map_transport_error)?;
    serde_json::from_str(&text).map_err(|e| KisanMitraError::ApiParse(e.to_string()))
}
