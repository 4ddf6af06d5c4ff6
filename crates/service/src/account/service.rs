use std::sync::Arc;

use models::account;
use serde_json::{Map, Value};
use tracing::{info, instrument};

use crate::account::repository::AccountRepository;
use crate::errors::ServiceError;

/// Application service encapsulating the account rules that sit above
/// field-level deserialization: required keys on create, defaults for
/// omitted contact fields, and back-filling partial updates.
#[derive(Clone)]
pub struct AccountService {
    repo: Arc<dyn AccountRepository>,
}

/// A key counts as supplied when it is present and not `null`.
fn supplied(obj: &Map<String, Value>, key: &str) -> bool {
    obj.get(key).is_some_and(|v| !v.is_null())
}

fn as_object(payload: &Value) -> Result<&Map<String, Value>, ServiceError> {
    payload
        .as_object()
        .ok_or_else(|| ServiceError::Validation("request body must be a JSON object".into()))
}

impl AccountService {
    pub fn new(repo: Arc<dyn AccountRepository>) -> Self { Self { repo } }

    pub async fn list(&self) -> Result<Vec<account::Model>, ServiceError> {
        self.repo.all().await
    }

    pub async fn get(&self, id: i32) -> Result<Option<account::Model>, ServiceError> {
        self.repo.find(id).await
    }

    /// Create from a wire payload.
    ///
    /// `name` and at least one of `email` / `address` are required; the
    /// missing contact field defaults to an empty string.
    #[instrument(skip_all)]
    pub async fn create(&self, payload: &Value) -> Result<account::Model, ServiceError> {
        let obj = as_object(payload)?;
        if !supplied(obj, "name") {
            return Err(ServiceError::Validation("missing name".into()));
        }
        if !supplied(obj, "email") && !supplied(obj, "address") {
            return Err(ServiceError::Validation("either email or address is required".into()));
        }

        let mut fields = obj.clone();
        for key in ["email", "address"] {
            if !supplied(&fields, key) {
                fields.insert(key.to_string(), Value::from(""));
            }
        }

        let mut acct = account::Model::default();
        acct.deserialize(&Value::Object(fields))?;
        self.repo.create(acct).await
    }

    /// Apply a (possibly partial) payload over `current`; omitted keys keep
    /// their stored values and the id never changes.
    #[instrument(skip_all, fields(id = current.id))]
    pub async fn update(&self, current: account::Model, payload: &Value) -> Result<account::Model, ServiceError> {
        let obj = as_object(payload)?;
        let mut merged = current.serialize();
        for (key, value) in obj {
            if key != "id" {
                merged.insert(key.clone(), value.clone());
            }
        }

        let mut acct = current;
        acct.deserialize(&Value::Object(merged))?;
        let updated = self.repo.update(acct).await?;
        info!(id = updated.id, "account updated");
        Ok(updated)
    }

    /// Remove by id; returns whether it existed.
    pub async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let existed = self.repo.delete(id).await?;
        if existed {
            info!(id, "account deleted");
        }
        Ok(existed)
    }
}
