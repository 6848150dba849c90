use serde_json::Value;

use crate::errors::Error;

use super::creation_body;
use super::executor::{ApiExecutor, JsonObject, PageRequest, Query, require, require_update};

const COLLECTION: &str = "iam/v1/apiKeys";
const ID_LABEL: &str = "API key ID";

/// API keys issued to service accounts.
#[derive(Clone)]
pub struct ApiKeys {
    executor: ApiExecutor,
}

impl ApiKeys {
    pub fn new(executor: ApiExecutor) -> Self {
        Self { executor }
    }

    pub async fn list(
        &self,
        service_account_id: &str,
        page: &PageRequest,
    ) -> Result<JsonObject, Error> {
        require(service_account_id, "Service account ID")?;
        let query = Query::new()
            .param("serviceAccountId", service_account_id)
            .page(page)
            .encode();
        self.executor.get(&format!("{COLLECTION}{query}")).await
    }

    pub async fn get(&self, api_key_id: &str) -> Result<JsonObject, Error> {
        require(api_key_id, ID_LABEL)?;
        self.executor
            .get(&format!("{COLLECTION}/{api_key_id}"))
            .await
    }

    /// The secret part of the key is only present in this response.
    pub async fn create(
        &self,
        service_account_id: &str,
        description: Option<&str>,
    ) -> Result<JsonObject, Error> {
        require(service_account_id, "Service account ID")?;
        let body = creation_body(
            [("serviceAccountId", service_account_id)],
            description,
            None,
        );
        self.executor.post(COLLECTION, &body).await
    }

    pub async fn update(&self, api_key_id: &str, data: JsonObject) -> Result<JsonObject, Error> {
        require(api_key_id, ID_LABEL)?;
        require_update(&data)?;
        self.executor
            .patch(&format!("{COLLECTION}/{api_key_id}"), &Value::Object(data))
            .await
    }

    pub async fn delete(&self, api_key_id: &str) -> Result<JsonObject, Error> {
        require(api_key_id, ID_LABEL)?;
        self.executor
            .delete(&format!("{COLLECTION}/{api_key_id}"))
            .await
    }
}
