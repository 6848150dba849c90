use serde_json::Value;

use crate::errors::Error;

use super::access_bindings::{AccessBindings, BindingAction};
use super::executor::{ApiExecutor, JsonObject, PageRequest, Query, require, require_update};
use super::{Labels, creation_body};

const COLLECTION: &str = "resource-manager/v1/folders";
const ID_LABEL: &str = "Folder ID";

/// Resource Manager folders.
#[derive(Clone)]
pub struct Folders {
    executor: ApiExecutor,
}

impl Folders {
    pub fn new(executor: ApiExecutor) -> Self {
        Self { executor }
    }

    fn bindings(&self) -> AccessBindings<'_> {
        AccessBindings::new(&self.executor, COLLECTION, ID_LABEL)
    }

    /// Lists folders of one cloud.
    pub async fn list(&self, cloud_id: &str, page: &PageRequest) -> Result<JsonObject, Error> {
        require(cloud_id, "Cloud ID")?;
        let query = Query::new().param("cloudId", cloud_id).page(page).encode();
        self.executor.get(&format!("{COLLECTION}{query}")).await
    }

    pub async fn get(&self, folder_id: &str) -> Result<JsonObject, Error> {
        require(folder_id, ID_LABEL)?;
        self.executor.get(&format!("{COLLECTION}/{folder_id}")).await
    }

    pub async fn create(
        &self,
        cloud_id: &str,
        name: &str,
        description: Option<&str>,
        labels: Option<&Labels>,
    ) -> Result<JsonObject, Error> {
        require(cloud_id, "Cloud ID")?;
        require(name, "Folder name")?;
        let body = creation_body(
            [("cloudId", cloud_id), ("name", name)],
            description,
            labels,
        );
        self.executor.post(COLLECTION, &body).await
    }

    pub async fn update(&self, folder_id: &str, data: JsonObject) -> Result<JsonObject, Error> {
        require(folder_id, ID_LABEL)?;
        require_update(&data)?;
        self.executor
            .patch(&format!("{COLLECTION}/{folder_id}"), &Value::Object(data))
            .await
    }

    pub async fn delete(&self, folder_id: &str) -> Result<JsonObject, Error> {
        require(folder_id, ID_LABEL)?;
        self.executor
            .delete(&format!("{COLLECTION}/{folder_id}"))
            .await
    }

    /// Lists long-running operations started on one folder.
    pub async fn list_operations(
        &self,
        folder_id: &str,
        page: &PageRequest,
    ) -> Result<JsonObject, Error> {
        require(folder_id, ID_LABEL)?;
        let query = Query::new().page(page).encode();
        self.executor
            .get(&format!("{COLLECTION}/{folder_id}/operations{query}"))
            .await
    }

    pub async fn set_access_bindings(
        &self,
        folder_id: &str,
        bindings: Vec<Value>,
    ) -> Result<JsonObject, Error> {
        self.bindings().set(folder_id, bindings).await
    }

    pub async fn list_access_bindings(
        &self,
        folder_id: &str,
        page: &PageRequest,
    ) -> Result<JsonObject, Error> {
        self.bindings().list(folder_id, page).await
    }

    pub async fn update_access_bindings(
        &self,
        folder_id: &str,
        deltas: Vec<Value>,
    ) -> Result<JsonObject, Error> {
        self.bindings().update(folder_id, deltas).await
    }

    pub async fn add_role(
        &self,
        folder_id: &str,
        subject_id: &str,
        role_id: &str,
        subject_type: Option<&str>,
    ) -> Result<JsonObject, Error> {
        self.bindings()
            .change_role(BindingAction::Add, folder_id, subject_id, role_id, subject_type)
            .await
    }

    pub async fn remove_role(
        &self,
        folder_id: &str,
        subject_id: &str,
        role_id: &str,
        subject_type: Option<&str>,
    ) -> Result<JsonObject, Error> {
        self.bindings()
            .change_role(BindingAction::Remove, folder_id, subject_id, role_id, subject_type)
            .await
    }
}
