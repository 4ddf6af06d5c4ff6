//! `account` entity and its wire contract.
//!
//! `serialize` / `deserialize` translate between the stored row and the JSON
//! object exchanged over HTTP. `deserialize` only checks field shapes; the
//! "email or address" rule for new accounts is enforced by the service layer.
use sea_orm::entity::prelude::*;
use serde_json::{Map, Value};

use crate::errors::ModelError;

#[derive(Clone, Debug, Default, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "account")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub email: String,
    pub address: String,
    pub phone_number: Option<String>,
    pub date_joined: Option<Date>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

const DATE_FORMAT: &str = "%Y-%m-%d";

impl Model {
    /// Wire representation. Unset optional fields become `null`.
    pub fn serialize(&self) -> Map<String, Value> {
        let mut out = Map::new();
        out.insert("id".into(), Value::from(self.id));
        out.insert("name".into(), Value::from(self.name.clone()));
        out.insert("email".into(), Value::from(self.email.clone()));
        out.insert("address".into(), Value::from(self.address.clone()));
        out.insert(
            "phone_number".into(),
            self.phone_number.clone().map(Value::from).unwrap_or(Value::Null),
        );
        out.insert(
            "date_joined".into(),
            self.date_joined
                .map(|d| Value::from(d.format(DATE_FORMAT).to_string()))
                .unwrap_or(Value::Null),
        );
        out
    }

    /// Populate fields from a wire payload.
    ///
    /// `id` is never read. Keys other than `name` that are absent leave the
    /// current value untouched; an explicit `null` clears `phone_number` and
    /// `date_joined`.
    pub fn deserialize(&mut self, payload: &Value) -> Result<(), ModelError> {
        let Some(obj) = payload.as_object() else {
            return Err(ModelError::invalid("body of request contained bad or no data"));
        };

        let name = match obj.get("name") {
            Some(Value::String(s)) => s.clone(),
            Some(_) => return Err(ModelError::invalid("invalid type for name: expected a string")),
            None => return Err(ModelError::invalid("missing name")),
        };
        let email = optional_string(obj, "email")?;
        let address = optional_string(obj, "address")?;
        let phone_number = nullable_string(obj, "phone_number")?;
        let date_joined = nullable_date(obj, "date_joined")?;

        // assign only after every field passed, so a failed call leaves `self` as it was
        self.name = name;
        if let Some(email) = email { self.email = email; }
        if let Some(address) = address { self.address = address; }
        if let Some(phone_number) = phone_number { self.phone_number = phone_number; }
        if let Some(date_joined) = date_joined { self.date_joined = date_joined; }
        Ok(())
    }
}

fn optional_string(obj: &Map<String, Value>, key: &str) -> Result<Option<String>, ModelError> {
    match obj.get(key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ModelError::invalid(format!("invalid type for {key}: expected a string"))),
    }
}

/// `None` = key absent, `Some(None)` = explicit null.
fn nullable_string(obj: &Map<String, Value>, key: &str) -> Result<Option<Option<String>>, ModelError> {
    match obj.get(key) {
        None => Ok(None),
        Some(Value::Null) => Ok(Some(None)),
        Some(Value::String(s)) => Ok(Some(Some(s.clone()))),
        Some(_) => Err(ModelError::invalid(format!("invalid type for {key}: expected a string or null"))),
    }
}

fn nullable_date(obj: &Map<String, Value>, key: &str) -> Result<Option<Option<Date>>, ModelError> {
    match obj.get(key) {
        None => Ok(None),
        Some(Value::Null) => Ok(Some(None)),
        Some(Value::String(s)) if !is_calendar_date_shape(s) => {
            Err(ModelError::invalid(format!("invalid {key} '{s}': expected YYYY-MM-DD")))
        }
        Some(Value::String(s)) => Date::parse_from_str(s, DATE_FORMAT)
            .map(|d| Some(Some(d)))
            .map_err(|e| ModelError::invalid(format!("invalid {key} '{s}': {e}"))),
        Some(_) => Err(ModelError::invalid(format!("invalid type for {key}: expected an ISO-8601 date string"))),
    }
}

/// Exactly `DDDD-DD-DD`; chrono alone accepts unpadded fields, signs and leading spaces.
fn is_calendar_date_shape(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 10
        && b.iter().enumerate().all(|(i, c)| match i {
            4 | 7 => *c == b'-',
            _ => c.is_ascii_digit(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Model {
        Model {
            id: 7,
            name: "Jane Doe".into(),
            email: "jane@example.com".into(),
            address: "1 Main St".into(),
            phone_number: Some("555-0100".into()),
            date_joined: Date::from_ymd_opt(2024, 2, 29),
        }
    }

    #[test]
    fn serialize_renders_every_field() {
        let out = Value::Object(sample().serialize());
        assert_eq!(out, json!({
            "id": 7,
            "name": "Jane Doe",
            "email": "jane@example.com",
            "address": "1 Main St",
            "phone_number": "555-0100",
            "date_joined": "2024-02-29",
        }));
    }

    #[test]
    fn serialize_unset_optionals_as_null() {
        let acct = Model { name: "Jane".into(), ..Default::default() };
        let out = acct.serialize();
        assert_eq!(out["phone_number"], Value::Null);
        assert_eq!(out["date_joined"], Value::Null);
        assert_eq!(out["address"], json!(""));
    }

    #[test]
    fn round_trip_preserves_fields() {
        let original = sample();
        let mut copy = Model::default();
        copy.deserialize(&Value::Object(original.serialize())).unwrap();
        assert_eq!(copy, Model { id: 0, ..original });
    }

    #[test]
    fn deserialize_ignores_id() {
        let mut acct = Model::default();
        acct.deserialize(&json!({ "id": 99, "name": "Jane" })).unwrap();
        assert_eq!(acct.id, 0);
    }

    #[test]
    fn deserialize_requires_name() {
        let mut acct = Model::default();
        let err = acct.deserialize(&json!({ "email": "a@b.c" })).unwrap_err();
        assert!(matches!(err, ModelError::DataValidation(ref m) if m.contains("name")));
    }

    #[test]
    fn deserialize_rejects_non_string_name() {
        let mut acct = Model::default();
        assert!(acct.deserialize(&json!({ "name": 42 })).is_err());
    }

    #[test]
    fn deserialize_rejects_non_object() {
        let mut acct = Model::default();
        assert!(acct.deserialize(&json!(["name"])).is_err());
        assert!(acct.deserialize(&Value::Null).is_err());
    }

    #[test]
    fn deserialize_rejects_bad_date() {
        let mut acct = Model::default();
        let err = acct
            .deserialize(&json!({ "name": "Jane", "date_joined": "29/02/2024" }))
            .unwrap_err();
        assert!(err.to_string().contains("date_joined"));
        assert!(acct.deserialize(&json!({ "name": "Jane", "date_joined": 20240229 })).is_err());
        assert!(acct.deserialize(&json!({ "name": "Jane", "date_joined": "2023-02-29" })).is_err());
        for loose in ["2024-1-5", "+2024-01-05", " 2024-01-05", "2024-01-05 "] {
            assert!(
                acct.deserialize(&json!({ "name": "Jane", "date_joined": loose })).is_err(),
                "accepted {loose:?}"
            );
        }
        assert_eq!(acct.date_joined, None);
    }

    #[test]
    fn failed_deserialize_leaves_fields_untouched() {
        let mut acct = sample();
        let _ = acct.deserialize(&json!({ "name": "Other", "email": 5 }));
        assert_eq!(acct, sample());
    }

    #[test]
    fn absent_keys_keep_current_values_and_null_clears() {
        let mut acct = sample();
        acct.deserialize(&json!({ "name": "Renamed", "phone_number": null })).unwrap();
        assert_eq!(acct.name, "Renamed");
        assert_eq!(acct.email, "jane@example.com");
        assert_eq!(acct.phone_number, None);
        assert_eq!(acct.date_joined, Date::from_ymd_opt(2024, 2, 29));
    }
}
