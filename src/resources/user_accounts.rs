use crate::errors::Error;

use super::executor::{ApiExecutor, JsonObject, Query, require};

#[derive(Clone)]
pub struct UserAccounts {
    executor: ApiExecutor,
}

impl UserAccounts {
    pub fn new(executor: ApiExecutor) -> Self {
        Self { executor }
    }

    pub async fn get(&self, user_account_id: &str) -> Result<JsonObject, Error> {
        require(user_account_id, "User account ID")?;
        self.executor
            .get(&format!("iam/v1/userAccounts/{user_account_id}"))
            .await
    }
}

/// Lookup of Yandex Passport accounts by login.
#[derive(Clone)]
pub struct YandexPassportUserAccounts {
    executor: ApiExecutor,
}

impl YandexPassportUserAccounts {
    pub fn new(executor: ApiExecutor) -> Self {
        Self { executor }
    }

    pub async fn get_by_login(&self, login: &str) -> Result<JsonObject, Error> {
        require(login, "Login")?;
        let query = Query::new().param("login", login).encode();
        self.executor
            .get(&format!("iam/v1/yandexPassportUserAccounts:byLogin{query}"))
            .await
    }
}
