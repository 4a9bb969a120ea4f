use std::str::FromStr;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{Map, Value};
use tracing::instrument;

use crate::application::ports::{RepositoryError, WorkOrderRepository};
use crate::domain::{WorkOrder, WorkOrderId};

const COLLECTION: &str = "work_orders";

/// Work orders under `/work_orders/<id>` in a Firebase Realtime Database,
/// through its REST interface.
pub struct FirebaseWorkOrderRepository {
    client: Client,
    database_url: String,
    auth_token: Option<String>,
}

impl FirebaseWorkOrderRepository {
    pub fn new(database_url: &str, auth_token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            database_url: database_url.trim_end_matches('/').to_string(),
            auth_token: auth_token.filter(|t| !t.trim().is_empty()),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}.json", self.database_url, path)
    }

    fn with_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth_token {
            Some(token) => request.query(&[("auth", token.as_str())]),
            None => request,
        }
    }
}

#[async_trait]
impl WorkOrderRepository for FirebaseWorkOrderRepository {
    #[instrument(skip(self))]
    async fn list_ids(&self) -> Result<Vec<WorkOrderId>, RepositoryError> {
        let request = self
            .client
            .get(self.url(COLLECTION))
            .query(&[("shallow", "true")]);

        let response = self
            .with_auth(request)
            .send()
            .await
            .map_err(|e| RepositoryError::RequestFailed(e.to_string()))?;

        let body = ok_json(response).await?;

        // An empty collection reads back as `null`.
        let keys: Map<String, Value> = match body {
            Value::Null => Map::new(),
            Value::Object(map) => map,
            other => {
                return Err(RepositoryError::InvalidRecord(format!(
                    "expected an object of ids, got {}",
                    other
                )));
            }
        };

        let ids: Vec<WorkOrderId> = keys
            .keys()
            .filter_map(|key| match WorkOrderId::from_str(key) {
                Ok(id) => Some(id),
                Err(_) => {
                    tracing::debug!(key = %key, "Skipping foreign key in work order collection");
                    None
                }
            })
            .collect();

        tracing::debug!(count = ids.len(), "Listed work order ids");
        Ok(ids)
    }

    #[instrument(skip(self), fields(work_order_id = %id))]
    async fn get(&self, id: &WorkOrderId) -> Result<Option<WorkOrder>, RepositoryError> {
        let request = self.client.get(self.url(&format!("{}/{}", COLLECTION, id)));

        let response = self
            .with_auth(request)
            .send()
            .await
            .map_err(|e| RepositoryError::RequestFailed(e.to_string()))?;

        match ok_json(response).await? {
            Value::Null => Ok(None),
            record => serde_json::from_value(record)
                .map(Some)
                .map_err(|e| RepositoryError::InvalidRecord(e.to_string())),
        }
    }

    #[instrument(skip(self, work_order), fields(work_order_id = %work_order.id))]
    async fn create(&self, work_order: &WorkOrder) -> Result<(), RepositoryError> {
        let request = self
            .client
            .put(self.url(&format!("{}/{}", COLLECTION, work_order.id)))
            .json(work_order);

        let response = self
            .with_auth(request)
            .send()
            .await
            .map_err(|e| RepositoryError::RequestFailed(e.to_string()))?;

        ok_json(response).await?;
        Ok(())
    }
}

async fn ok_json(response: reqwest::Response) -> Result<Value, RepositoryError> {
    let status = response.status();
    if status != StatusCode::OK {
        let body = response.text().await.unwrap_or_default();
        return Err(RepositoryError::RequestFailed(format!(
            "HTTP {}: {}",
            status.as_u16(),
            body
        )));
    }

    response
        .json()
        .await
        .map_err(|e| RepositoryError::InvalidRecord(e.to_string()))
}
