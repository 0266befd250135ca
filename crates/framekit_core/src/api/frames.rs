//! Frame endpoints: create (with nested circles), show with metrics, delete.

use super::{
    body_object, error_response, parse_id, render, render_failure, scalar_field, ApiResponse,
    STATUS_CREATED, STATUS_NOT_FOUND, STATUS_OK, STATUS_UNPROCESSABLE,
};
use crate::api::circles::circle_draft_from;
use crate::model::frame::FrameDraft;
use crate::model::scalar::Scalar;
use crate::service::frame_service::FrameService;
use rusqlite::Connection;
use serde_json::Value;

/// `POST /frames` with `{frame: {x, y, width, height, circles?: [...]}}`.
///
/// Returns `201` with the frame record, or `422` with every violation.
pub fn create_frame(conn: &Connection, body: &Value) -> ApiResponse {
    let draft = match frame_draft_from(body) {
        Ok(draft) => draft,
        Err(message) => return ApiResponse::errors(STATUS_UNPROCESSABLE, vec![message]),
    };

    match FrameService::new(conn).create_frame(&draft) {
        Ok(frame) => render(STATUS_CREATED, &frame),
        Err(err) => error_response(&err),
    }
}

/// `GET /frames/{id}`: frame record plus a `metrics` object.
pub fn show_frame(conn: &Connection, id: &str) -> ApiResponse {
    let Some(frame_id) = parse_id(id) else {
        return frame_not_found(id);
    };

    let details = match FrameService::new(conn).frame_details(frame_id) {
        Ok(details) => details,
        Err(err) => return error_response(&err),
    };

    match (
        serde_json::to_value(&details.frame),
        serde_json::to_value(details.metrics),
    ) {
        (Ok(Value::Object(mut frame)), Ok(metrics)) => {
            frame.insert("metrics".to_string(), metrics);
            ApiResponse::json(STATUS_OK, Value::Object(frame))
        }
        _ => render_failure(),
    }
}

/// `DELETE /frames/{id}`: `204`, `404`, or `422` while circles remain.
pub fn destroy_frame(conn: &Connection, id: &str) -> ApiResponse {
    let Some(frame_id) = parse_id(id) else {
        return frame_not_found(id);
    };

    match FrameService::new(conn).delete_frame(frame_id) {
        Ok(()) => ApiResponse::no_content(),
        Err(err) => error_response(&err),
    }
}

pub(crate) fn frame_not_found(raw_id: &str) -> ApiResponse {
    ApiResponse::errors(
        STATUS_NOT_FOUND,
        vec![format!("frame not found: {}", raw_id.trim())],
    )
}

fn frame_draft_from(body: &Value) -> Result<FrameDraft, String> {
    let object =
        body_object(body, "frame").ok_or_else(|| "frame must be a JSON object".to_string())?;

    let circles = match object.get("circles") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                item.as_object()
                    .map(circle_draft_from)
                    .ok_or_else(|| format!("circles[{index}] must be a JSON object"))
            })
            .collect::<Result<Vec<_>, _>>()?,
        Some(_) => return Err("circles must be a JSON array".to_string()),
    };

    Ok(FrameDraft {
        x: scalar_field(object, "x").unwrap_or(Scalar::Missing),
        y: scalar_field(object, "y").unwrap_or(Scalar::Missing),
        width: scalar_field(object, "width").unwrap_or(Scalar::Missing),
        height: scalar_field(object, "height").unwrap_or(Scalar::Missing),
        circles,
    })
}

#[cfg(test)]
mod tests {
    use super::frame_draft_from;
    use crate::model::scalar::Scalar;
    use serde_json::json;

    #[test]
    fn draft_reads_nested_circles() {
        let draft = frame_draft_from(&json!({
            "frame": {
                "x": 0, "y": "0", "width": 100, "height": 100,
                "circles": [{ "x": 10, "y": 10, "diameter": 5 }]
            }
        }))
        .unwrap();
        assert_eq!(draft.y, Scalar::Number(0.0));
        assert_eq!(draft.circles.len(), 1);
        assert_eq!(draft.circles[0].diameter, Scalar::Number(5.0));
    }

    #[test]
    fn draft_marks_absent_fields_missing() {
        let draft = frame_draft_from(&json!({ "x": 1 })).unwrap();
        assert!(draft.width.is_missing());
        assert!(draft.circles.is_empty());
    }

    #[test]
    fn draft_rejects_malformed_circle_list() {
        let err = frame_draft_from(&json!({ "circles": { "x": 1 } })).unwrap_err();
        assert_eq!(err, "circles must be a JSON array");
        let err = frame_draft_from(&json!({ "circles": [3] })).unwrap_err();
        assert_eq!(err, "circles[0] must be a JSON object");
    }
}
