use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::errors::ServiceError;

/// One submitted appointment. Phone, date and time formats are not checked.
///
/// Stored fields that hold a number or boolean instead of a string (older or
/// hand-edited data) read back as their JSON text.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Record {
    #[serde(deserialize_with = "text_field")]
    pub name: String,
    #[serde(deserialize_with = "text_field")]
    pub phone_number: String,
    #[serde(deserialize_with = "text_field")]
    pub date: String,
    #[serde(deserialize_with = "text_field")]
    pub time: String,
}

pub const REQUIRED_FIELDS: [&str; 4] = ["name", "phone_number", "date", "time"];

impl Record {
    /// Build a record from a raw submission body.
    ///
    /// The body must be a JSON object whose four required fields are all
    /// present and truthy (not `null`, `false`, zero, `""`, `[]` or `{}`).
    /// Truthy numbers and `true` are kept as their JSON text; nested arrays
    /// or objects are not record text and reject the whole body.
    pub fn from_payload(payload: &Value) -> Result<Self, ServiceError> {
        let obj = payload.as_object().ok_or(ServiceError::InvalidFormat)?;
        if !REQUIRED_FIELDS.iter().all(|f| obj.get(*f).is_some_and(is_truthy)) {
            return Err(ServiceError::MissingFields);
        }
        Ok(Self {
            name: field_text(obj, "name")?,
            phone_number: field_text(obj, "phone_number")?,
            date: field_text(obj, "date")?,
            time: field_text(obj, "time")?,
        })
    }
}

fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn scalar_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(_) | Value::Bool(_) => Some(v.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn text_field<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    let v = Value::deserialize(d)?;
    scalar_text(&v).ok_or_else(|| D::Error::custom(format!("expected text, found {v}")))
}

fn field_text(obj: &Map<String, Value>, key: &str) -> Result<String, ServiceError> {
    match obj.get(key) {
        Some(Value::Null) | None => Err(ServiceError::MissingFields),
        Some(v) => scalar_text(v).ok_or(ServiceError::InvalidFormat),
    }
}
