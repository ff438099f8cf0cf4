use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::database::models::ProfileDataPatch;
use crate::error::ApiError;

/// Request body that must be a JSON object. Rejections use the API's
/// `{error}` shape instead of axum's plain-text ones.
#[derive(Debug)]
pub struct JsonObject(pub Map<String, Value>);

#[async_trait]
impl<S: Send + Sync> FromRequest<S> for JsonObject {
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|_| ApiError::bad_request("Could not read request body"))?;

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Object(map)) => Ok(JsonObject(map)),
            Ok(_) => Err(ApiError::bad_request("Request body must be a JSON object")),
            Err(_) => Err(ApiError::bad_request("Invalid JSON body")),
        }
    }
}

/// `null`, `false`, `0` and `""` count as empty, the same as absent.
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Value of `key` if present and not falsy.
pub fn truthy<'a>(body: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    body.get(key).filter(|v| !is_falsy(v))
}

/// Text column value. Non-string values are stored in their JSON form.
pub fn string_field(body: &Map<String, Value>, key: &str) -> Option<String> {
    truthy(body, key).map(|v| match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}

/// Integer column value. Numeric strings are accepted.
pub fn int_field(body: &Map<String, Value>, key: &str) -> Result<Option<i32>, ApiError> {
    let Some(value) = truthy(body, key) else {
        return Ok(None);
    };

    let parsed = match value {
        Value::Number(n) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<i32>().ok(),
        _ => None,
    };

    parsed
        .map(Some)
        .ok_or_else(|| ApiError::bad_request(format!("{} must be an integer", key)))
}

/// Build a profile JSON merge over a fixed field list.
///
/// Fields present in the body overwrite the stored value (empty values
/// become null). Fields absent from the body keep what is stored, or start
/// as null. Keys outside `fields` are dropped.
pub fn profile_patch(fields: &[&str], body: &Map<String, Value>) -> ProfileDataPatch {
    let mut patch = ProfileDataPatch::default();

    for field in fields {
        patch.defaults.insert(field.to_string(), Value::Null);
        if let Some(value) = body.get(*field) {
            let value = if is_falsy(value) { Value::Null } else { value.clone() };
            patch.patch.insert(field.to_string(), value);
        }
    }

    patch
}

pub fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw.trim()).ok()
}
