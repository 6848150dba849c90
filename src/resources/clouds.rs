use serde_json::Value;

use crate::errors::Error;

use super::access_bindings::{AccessBindings, BindingAction};
use super::executor::{ApiExecutor, JsonObject, PageRequest, Query, require, require_update};
use super::{Labels, creation_body};

const COLLECTION: &str = "resource-manager/v1/clouds";
const ID_LABEL: &str = "Cloud ID";

/// Resource Manager clouds.
#[derive(Clone)]
pub struct Clouds {
    executor: ApiExecutor,
}

impl Clouds {
    pub fn new(executor: ApiExecutor) -> Self {
        Self { executor }
    }

    fn bindings(&self) -> AccessBindings<'_> {
        AccessBindings::new(&self.executor, COLLECTION, ID_LABEL)
    }

    /// Lists clouds, optionally restricted to one organization.
    pub async fn list(
        &self,
        organization_id: Option<&str>,
        page: &PageRequest,
    ) -> Result<JsonObject, Error> {
        let query = Query::new()
            .opt_param("organizationId", organization_id)
            .page(page)
            .encode();
        self.executor.get(&format!("{COLLECTION}{query}")).await
    }

    pub async fn get(&self, cloud_id: &str) -> Result<JsonObject, Error> {
        require(cloud_id, ID_LABEL)?;
        self.executor.get(&format!("{COLLECTION}/{cloud_id}")).await
    }

    pub async fn create(
        &self,
        organization_id: &str,
        name: &str,
        description: Option<&str>,
        labels: Option<&Labels>,
    ) -> Result<JsonObject, Error> {
        require(organization_id, "Organization ID")?;
        require(name, "Cloud name")?;
        let body = creation_body(
            [("organizationId", organization_id), ("name", name)],
            description,
            labels,
        );
        self.executor.post(COLLECTION, &body).await
    }

    pub async fn update(&self, cloud_id: &str, data: JsonObject) -> Result<JsonObject, Error> {
        require(cloud_id, ID_LABEL)?;
        require_update(&data)?;
        self.executor
            .patch(&format!("{COLLECTION}/{cloud_id}"), &Value::Object(data))
            .await
    }

    pub async fn delete(&self, cloud_id: &str) -> Result<JsonObject, Error> {
        require(cloud_id, ID_LABEL)?;
        self.executor
            .delete(&format!("{COLLECTION}/{cloud_id}"))
            .await
    }

    pub async fn set_access_bindings(
        &self,
        cloud_id: &str,
        bindings: Vec<Value>,
    ) -> Result<JsonObject, Error> {
        self.bindings().set(cloud_id, bindings).await
    }

    pub async fn list_access_bindings(
        &self,
        cloud_id: &str,
        page: &PageRequest,
    ) -> Result<JsonObject, Error> {
        self.bindings().list(cloud_id, page).await
    }

    pub async fn update_access_bindings(
        &self,
        cloud_id: &str,
        deltas: Vec<Value>,
    ) -> Result<JsonObject, Error> {
        self.bindings().update(cloud_id, deltas).await
    }

    pub async fn add_role(
        &self,
        cloud_id: &str,
        subject_id: &str,
        role_id: &str,
        subject_type: Option<&str>,
    ) -> Result<JsonObject, Error> {
        self.bindings()
            .change_role(BindingAction::Add, cloud_id, subject_id, role_id, subject_type)
            .await
    }

    pub async fn remove_role(
        &self,
        cloud_id: &str,
        subject_id: &str,
        role_id: &str,
        subject_type: Option<&str>,
    ) -> Result<JsonObject, Error> {
        self.bindings()
            .change_role(BindingAction::Remove, cloud_id, subject_id, role_id, subject_type)
            .await
    }
}
