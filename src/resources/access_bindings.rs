use serde_json::{Value, json};

use crate::errors::Error;

use super::executor::{ApiExecutor, JsonObject, PageRequest, Query, require};

pub const DEFAULT_SUBJECT_TYPE: &str = "userAccount";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BindingAction {
    Add,
    Remove,
}

impl BindingAction {
    fn as_str(self) -> &'static str {
        match self {
            BindingAction::Add => "ADD",
            BindingAction::Remove => "REMOVE",
        }
    }
}

/// Builds one `accessBindingDeltas` entry granting or revoking `role_id` for a subject.
/// A missing or empty `subject_type` becomes `userAccount`.
pub fn binding_delta(
    action: BindingAction,
    subject_id: &str,
    role_id: &str,
    subject_type: Option<&str>,
) -> Value {
    json!({
        "action": action.as_str(),
        "accessBinding": {
            "roleId": role_id,
            "subject": {
                "id": subject_id,
                "type": subject_type
                    .filter(|t| !t.is_empty())
                    .unwrap_or(DEFAULT_SUBJECT_TYPE),
            },
        },
    })
}

/// Access-binding calls shared by every resource that supports them.
pub(crate) struct AccessBindings<'a> {
    executor: &'a ApiExecutor,
    collection: &'static str,
    id_label: &'static str,
}

impl<'a> AccessBindings<'a> {
    pub(crate) fn new(
        executor: &'a ApiExecutor,
        collection: &'static str,
        id_label: &'static str,
    ) -> Self {
        Self {
            executor,
            collection,
            id_label,
        }
    }

    pub(crate) async fn list(&self, id: &str, page: &PageRequest) -> Result<JsonObject, Error> {
        require(id, self.id_label)?;
        let query = Query::new().page(page).encode();
        self.executor
            .get(&format!("{}/{}:listAccessBindings{}", self.collection, id, query))
            .await
    }

    pub(crate) async fn set(&self, id: &str, bindings: Vec<Value>) -> Result<JsonObject, Error> {
        require(id, self.id_label)?;
        if bindings.is_empty() {
            return Err(Error::validation("Access bindings cannot be empty"));
        }
        let body = json!({ "accessBindings": bindings });
        self.executor
            .post(&format!("{}/{}:setAccessBindings", self.collection, id), &body)
            .await
    }

    pub(crate) async fn update(&self, id: &str, deltas: Vec<Value>) -> Result<JsonObject, Error> {
        require(id, self.id_label)?;
        if deltas.is_empty() {
            return Err(Error::validation("Access binding deltas cannot be empty"));
        }
        let body = json!({ "accessBindingDeltas": deltas });
        self.executor
            .post(
                &format!("{}/{}:updateAccessBindings", self.collection, id),
                &body,
            )
            .await
    }

    pub(crate) async fn change_role(
        &self,
        action: BindingAction,
        id: &str,
        subject_id: &str,
        role_id: &str,
        subject_type: Option<&str>,
    ) -> Result<JsonObject, Error> {
        let delta = binding_delta(action, subject_id, role_id, subject_type);
        self.update(id, vec![delta]).await
    }
}
