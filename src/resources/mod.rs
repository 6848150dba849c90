//! Thin wrappers over the Yandex Cloud REST resources. They share one
//! `ApiExecutor` each and return the decoded JSON object untouched.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

pub mod access_bindings;
pub mod api_keys;
pub mod clouds;
pub mod executor;
pub mod folders;
pub mod organizations;
pub mod refresh_tokens;
pub mod service_accounts;
pub mod user_accounts;

pub use access_bindings::{BindingAction, binding_delta};
pub use api_keys::ApiKeys;
pub use clouds::Clouds;
pub use executor::{ApiExecutor, JsonObject, PageRequest, Query};
pub use folders::Folders;
pub use organizations::Organizations;
pub use refresh_tokens::RefreshTokens;
pub use service_accounts::ServiceAccounts;
pub use user_accounts::{UserAccounts, YandexPassportUserAccounts};

pub type Labels = BTreeMap<String, String>;

/// Body for create calls: required string fields plus optional description and labels.
pub(crate) fn creation_body<const N: usize>(
    fields: [(&str, &str); N],
    description: Option<&str>,
    labels: Option<&Labels>,
) -> Value {
    let mut body = Map::new();
    for (key, value) in fields {
        body.insert(key.to_string(), Value::from(value));
    }
    if let Some(description) = description {
        body.insert("description".into(), Value::from(description));
    }
    if let Some(labels) = labels {
        let labels = labels
            .iter()
            .map(|(k, v)| (k.clone(), Value::from(v.as_str())))
            .collect::<Map<String, Value>>();
        body.insert("labels".into(), Value::Object(labels));
    }
    Value::Object(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creation_body_skips_absent_optionals() {
        let body = creation_body([("cloudId", "b1g"), ("name", "prod")], None, None);
        assert_eq!(body, serde_json::json!({"cloudId": "b1g", "name": "prod"}));
    }

    #[test]
    fn creation_body_includes_labels() {
        let mut labels = Labels::new();
        labels.insert("env".into(), "prod".into());
        let body = creation_body([("name", "x")], Some("desc"), Some(&labels));
        assert_eq!(body["description"], "desc");
        assert_eq!(body["labels"]["env"], "prod");
    }
}
