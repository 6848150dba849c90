use serde_json::Value;

use crate::errors::Error;

use super::access_bindings::{AccessBindings, BindingAction};
use super::executor::{ApiExecutor, JsonObject, PageRequest, Query, require, require_update};

const COLLECTION: &str = "organization-manager/v1/organizations";
const ID_LABEL: &str = "Organization ID";

/// Organization Manager: organizations and their access bindings.
#[derive(Clone)]
pub struct Organizations {
    executor: ApiExecutor,
}

impl Organizations {
    pub fn new(executor: ApiExecutor) -> Self {
        Self { executor }
    }

    fn bindings(&self) -> AccessBindings<'_> {
        AccessBindings::new(&self.executor, COLLECTION, ID_LABEL)
    }

    pub async fn list(&self, page: &PageRequest) -> Result<JsonObject, Error> {
        let query = Query::new().page(page).encode();
        self.executor.get(&format!("{COLLECTION}{query}")).await
    }

    pub async fn get(&self, organization_id: &str) -> Result<JsonObject, Error> {
        require(organization_id, ID_LABEL)?;
        self.executor
            .get(&format!("{COLLECTION}/{organization_id}"))
            .await
    }

    pub async fn update(
        &self,
        organization_id: &str,
        data: JsonObject,
    ) -> Result<JsonObject, Error> {
        require(organization_id, ID_LABEL)?;
        require_update(&data)?;
        self.executor
            .patch(
                &format!("{COLLECTION}/{organization_id}"),
                &Value::Object(data),
            )
            .await
    }

    pub async fn list_access_bindings(
        &self,
        organization_id: &str,
        page: &PageRequest,
    ) -> Result<JsonObject, Error> {
        self.bindings().list(organization_id, page).await
    }

    pub async fn update_access_bindings(
        &self,
        organization_id: &str,
        deltas: Vec<Value>,
    ) -> Result<JsonObject, Error> {
        self.bindings().update(organization_id, deltas).await
    }

    pub async fn add_role(
        &self,
        organization_id: &str,
        subject_id: &str,
        role_id: &str,
        subject_type: Option<&str>,
    ) -> Result<JsonObject, Error> {
        self.bindings()
            .change_role(
                BindingAction::Add,
                organization_id,
                subject_id,
                role_id,
                subject_type,
            )
            .await
    }

    pub async fn remove_role(
        &self,
        organization_id: &str,
        subject_id: &str,
        role_id: &str,
        subject_type: Option<&str>,
    ) -> Result<JsonObject, Error> {
        self.bindings()
            .change_role(
                BindingAction::Remove,
                organization_id,
                subject_id,
                role_id,
                subject_type,
            )
            .await
    }
}
