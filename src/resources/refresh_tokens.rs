use crate::errors::Error;

use super::executor::{ApiExecutor, JsonObject, PageRequest, Query, require};

const COLLECTION: &str = "iam/v1/refreshTokens";

#[derive(Clone)]
pub struct RefreshTokens {
    executor: ApiExecutor,
}

impl RefreshTokens {
    pub fn new(executor: ApiExecutor) -> Self {
        Self { executor }
    }

    pub async fn list(&self, page: &PageRequest) -> Result<JsonObject, Error> {
        let query = Query::new().page(page).encode();
        self.executor.get(&format!("{COLLECTION}{query}")).await
    }

    pub async fn revoke(&self, token_id: &str) -> Result<JsonObject, Error> {
        require(token_id, "Token ID")?;
        self.executor
            .delete(&format!("{COLLECTION}/{token_id}"))
            .await
    }
}
