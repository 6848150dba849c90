use serde_json::Value;

use crate::errors::Error;

use super::access_bindings::{AccessBindings, BindingAction};
use super::creation_body;
use super::executor::{ApiExecutor, JsonObject, PageRequest, Query, require, require_update};

const COLLECTION: &str = "iam/v1/serviceAccounts";
const ID_LABEL: &str = "Service account ID";

#[derive(Clone)]
pub struct ServiceAccounts {
    executor: ApiExecutor,
}

impl ServiceAccounts {
    pub fn new(executor: ApiExecutor) -> Self {
        Self { executor }
    }

    fn bindings(&self) -> AccessBindings<'_> {
        AccessBindings::new(&self.executor, COLLECTION, ID_LABEL)
    }

    /// Lists service accounts in a folder.
    pub async fn list(&self, folder_id: &str, page: &PageRequest) -> Result<JsonObject, Error> {
        require(folder_id, "Folder ID")?;
        let query = Query::new().param("folderId", folder_id).page(page).encode();
        self.executor.get(&format!("{COLLECTION}{query}")).await
    }

    pub async fn get(&self, service_account_id: &str) -> Result<JsonObject, Error> {
        require(service_account_id, ID_LABEL)?;
        self.executor
            .get(&format!("{COLLECTION}/{service_account_id}"))
            .await
    }

    pub async fn create(
        &self,
        folder_id: &str,
        name: &str,
        description: Option<&str>,
    ) -> Result<JsonObject, Error> {
        require(folder_id, "Folder ID")?;
        require(name, "Service account name")?;
        let body = creation_body([("folderId", folder_id), ("name", name)], description, None);
        self.executor.post(COLLECTION, &body).await
    }

    pub async fn update(
        &self,
        service_account_id: &str,
        data: JsonObject,
    ) -> Result<JsonObject, Error> {
        require(service_account_id, ID_LABEL)?;
        require_update(&data)?;
        self.executor
            .patch(
                &format!("{COLLECTION}/{service_account_id}"),
                &Value::Object(data),
            )
            .await
    }

    pub async fn delete(&self, service_account_id: &str) -> Result<JsonObject, Error> {
        require(service_account_id, ID_LABEL)?;
        self.executor
            .delete(&format!("{COLLECTION}/{service_account_id}"))
            .await
    }

    pub async fn list_access_bindings(
        &self,
        service_account_id: &str,
        page: &PageRequest,
    ) -> Result<JsonObject, Error> {
        self.bindings().list(service_account_id, page).await
    }

    pub async fn update_access_bindings(
        &self,
        service_account_id: &str,
        deltas: Vec<Value>,
    ) -> Result<JsonObject, Error> {
        self.bindings().update(service_account_id, deltas).await
    }

    pub async fn add_role(
        &self,
        service_account_id: &str,
        subject_id: &str,
        role_id: &str,
        subject_type: Option<&str>,
    ) -> Result<JsonObject, Error> {
        self.bindings()
            .change_role(
                BindingAction::Add,
                service_account_id,
                subject_id,
                role_id,
                subject_type,
            )
            .await
    }

    pub async fn remove_role(
        &self,
        service_account_id: &str,
        subject_id: &str,
        role_id: &str,
        subject_type: Option<&str>,
    ) -> Result<JsonObject, Error> {
        self.bindings()
            .change_role(
                BindingAction::Remove,
                service_account_id,
                subject_id,
                role_id,
                subject_type,
            )
            .await
    }
}
