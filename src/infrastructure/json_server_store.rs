// json-server store - collections served over HTTP by a json-server instance
use crate::application::store::{Collection, CollectionStore, ListQuery, StoreError};
use async_trait::async_trait;
use reqwest::{Method, Response, StatusCode};
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct JsonServerStore {
    base_url: String,
    client: reqwest::Client,
}

impl JsonServerStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn collection_url(&self, collection: Collection) -> String {
        format!("{}/{}", self.base_url, collection.as_str())
    }

    fn record_url(&self, collection: Collection, id: &str) -> String {
        format!(
            "{}/{}",
            self.collection_url(collection),
            urlencoding::encode(id)
        )
    }

    fn list_url(&self, collection: Collection, query: &ListQuery) -> String {
        let pairs = query.to_query_pairs();
        if pairs.is_empty() {
            return self.collection_url(collection);
        }
        let encoded: Vec<String> = pairs
            .iter()
            .map(|(key, value)| {
                format!("{}={}", urlencoding::encode(key), urlencoding::encode(value))
            })
            .collect();
        format!("{}?{}", self.collection_url(collection), encoded.join("&"))
    }

    async fn send(&self, method: Method, url: &str, body: Option<&Value>) -> Result<Response, StoreError> {
        tracing::debug!(%method, url, "json-server request");
        let mut request = self
            .client
            .request(method, url)
            .header("Accept", "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }
        request
            .send()
            .await
            .map_err(|e| StoreError::Request(format!("Failed to reach json-server: {}", e)))
    }

    /// `None` on 404, the decoded body on success, an error otherwise.
    async fn read_json(response: Response) -> Result<Option<Value>, StoreError> {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Status {
                status: status.as_u16(),
                body,
            });
        }
        let value = response
            .json::<Value>()
            .await
            .map_err(|e| StoreError::Request(format!("Failed to parse json-server response: {}", e)))?;
        Ok(Some(value))
    }
}

#[async_trait]
impl CollectionStore for JsonServerStore {
    async fn list(&self, collection: Collection, query: &ListQuery) -> Result<Vec<Value>, StoreError> {
        let url = self.list_url(collection, query);
        let response = self.send(Method::GET, &url, None).await?;
        match Self::read_json(response).await? {
            Some(Value::Array(records)) => Ok(records),
            Some(other) => Err(StoreError::Unavailable(format!(
                "expected an array from {}, got {}",
                url, other
            ))),
            None => Err(StoreError::Status {
                status: StatusCode::NOT_FOUND.as_u16(),
                body: format!("collection {} not found", collection.as_str()),
            }),
        }
    }

    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Value>, StoreError> {
        let response = self
            .send(Method::GET, &self.record_url(collection, id), None)
            .await?;
        Self::read_json(response).await
    }

    async fn create(&self, collection: Collection, record: Value) -> Result<Value, StoreError> {
        let url = self.collection_url(collection);
        let response = self.send(Method::POST, &url, Some(&record)).await?;
        Self::read_json(response)
            .await?
            .ok_or_else(|| StoreError::Unavailable(format!("{} rejected the record", url)))
    }

    async fn patch(
        &self,
        collection: Collection,
        id: &str,
        changes: Value,
    ) -> Result<Option<Value>, StoreError> {
        let response = self
            .send(Method::PATCH, &self.record_url(collection, id), Some(&changes))
            .await?;
        Self::read_json(response).await
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<bool, StoreError> {
        let response = self
            .send(Method::DELETE, &self.record_url(collection, id), None)
            .await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(true)
    }
}
