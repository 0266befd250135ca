//! Response shaping for frame/circle use-cases.
//!
//! # Responsibility
//! - Translate JSON request bodies into drafts and patches.
//! - Render records, `{errors: [...]}` payloads and HTTP-style status codes.
//!
//! # Invariants
//! - Error bodies always carry a non-empty `errors` list.
//! - Success bodies never carry an `errors` key.
//! - Storage failure details never leave the process; they are logged.

use crate::model::scalar::Scalar;
use crate::service::ServiceError;
use log::error;
use serde::Serialize;
use serde_json::{json, Map, Value};
use uuid::Uuid;

pub mod circles;
pub mod frames;

pub const STATUS_OK: u16 = 200;
pub const STATUS_CREATED: u16 = 201;
pub const STATUS_NO_CONTENT: u16 = 204;
pub const STATUS_NOT_FOUND: u16 = 404;
pub const STATUS_UNPROCESSABLE: u16 = 422;
pub const STATUS_INTERNAL_ERROR: u16 = 500;

/// Status code plus optional JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    /// `None` only for `204 No Content`.
    pub body: Option<Value>,
}

impl ApiResponse {
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            body: Some(body),
        }
    }

    pub fn no_content() -> Self {
        Self {
            status: STATUS_NO_CONTENT,
            body: None,
        }
    }

    /// Builds an error payload. An empty list is replaced by a generic message.
    pub fn errors(status: u16, messages: Vec<String>) -> Self {
        let messages = if messages.is_empty() {
            vec!["request failed".to_string()]
        } else {
            messages
        };
        Self::json(status, json!({ "errors": messages }))
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Error messages carried by the body, if any.
    pub fn error_messages(&self) -> Vec<String> {
        self.body
            .as_ref()
            .and_then(|body| body.get("errors"))
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Maps a service failure to its status code.
pub fn status_for(err: &ServiceError) -> u16 {
    match err {
        ServiceError::Validation(_) | ServiceError::NonEmptyChildren { .. } => {
            STATUS_UNPROCESSABLE
        }
        ServiceError::FrameNotFound(_) | ServiceError::CircleNotFound(_) => STATUS_NOT_FOUND,
        ServiceError::Repo(_) => STATUS_INTERNAL_ERROR,
    }
}

pub(crate) fn error_response(err: &ServiceError) -> ApiResponse {
    ApiResponse::errors(status_for(err), err.messages())
}

pub(crate) fn render<T: Serialize>(status: u16, record: &T) -> ApiResponse {
    match serde_json::to_value(record) {
        Ok(body) => ApiResponse::json(status, body),
        Err(err) => {
            error!("event=api_render module=api status=error error={err}");
            render_failure()
        }
    }
}

pub(crate) fn render_failure() -> ApiResponse {
    ApiResponse::errors(
        STATUS_INTERNAL_ERROR,
        vec!["failed to render response".to_string()],
    )
}

pub(crate) fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw.trim()).ok()
}

/// Returns the object under `root_key`, or the body itself when unwrapped.
///
/// A `root_key` holding anything but an object is rejected.
pub(crate) fn body_object<'a>(body: &'a Value, root_key: &str) -> Option<&'a Map<String, Value>> {
    match body.get(root_key) {
        Some(Value::Object(inner)) => Some(inner),
        Some(_) => None,
        None => body.as_object(),
    }
}

/// Reads a numeric field. Returns `None` when the key is absent.
pub(crate) fn scalar_field(object: &Map<String, Value>, key: &str) -> Option<Scalar> {
    object.get(key).map(scalar_from_json)
}

pub(crate) fn scalar_from_json(value: &Value) -> Scalar {
    match value {
        Value::Null => Scalar::Missing,
        Value::Number(number) => number
            .as_f64()
            .map_or_else(|| Scalar::Invalid(number.to_string()), Scalar::Number),
        Value::String(raw) => Scalar::parse(raw),
        other => Scalar::Invalid(other.to_string()),
    }
}
