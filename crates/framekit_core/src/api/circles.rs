//! Circle endpoints: create inside a frame, update, delete, radius search.

use super::frames::frame_not_found;
use super::{
    body_object, error_response, parse_id, render, scalar_field, ApiResponse, STATUS_CREATED,
    STATUS_NOT_FOUND, STATUS_OK, STATUS_UNPROCESSABLE,
};
use crate::model::circle::{CircleDraft, CirclePatch};
use crate::model::scalar::Scalar;
use crate::search::disk::SearchParams;
use crate::service::circle_service::CircleService;
use rusqlite::Connection;
use serde_json::{Map, Value};

/// `POST /frames/{frame_id}/circles` with `{circle: {x, y, diameter}}`.
pub fn create_circle(conn: &Connection, frame_id: &str, body: &Value) -> ApiResponse {
    let Some(parsed_frame_id) = parse_id(frame_id) else {
        return frame_not_found(frame_id);
    };
    let Some(object) = body_object(body, "circle") else {
        return not_an_object();
    };

    let draft = circle_draft_from(object);
    match CircleService::new(conn).create_circle(parsed_frame_id, &draft) {
        Ok(circle) => render(STATUS_CREATED, &circle),
        Err(err) => error_response(&err),
    }
}

/// `PUT /circles/{id}`: absent fields keep their stored value.
pub fn update_circle(conn: &Connection, id: &str, body: &Value) -> ApiResponse {
    let Some(circle_id) = parse_id(id) else {
        return circle_not_found(id);
    };
    let Some(object) = body_object(body, "circle") else {
        return not_an_object();
    };

    let patch = CirclePatch {
        x: scalar_field(object, "x"),
        y: scalar_field(object, "y"),
        diameter: scalar_field(object, "diameter"),
    };
    match CircleService::new(conn).update_circle(circle_id, &patch) {
        Ok(circle) => render(STATUS_OK, &circle),
        Err(err) => error_response(&err),
    }
}

/// `DELETE /circles/{id}`: `204` or `404`.
pub fn destroy_circle(conn: &Connection, id: &str) -> ApiResponse {
    let Some(circle_id) = parse_id(id) else {
        return circle_not_found(id);
    };

    match CircleService::new(conn).delete_circle(circle_id) {
        Ok(()) => ApiResponse::no_content(),
        Err(err) => error_response(&err),
    }
}

/// `GET /circles?center_x&center_y&radius[&frame_id]`: array of circles.
pub fn search_circles(conn: &Connection, params: &SearchParams) -> ApiResponse {
    match CircleService::new(conn).search_circles(params) {
        Ok(circles) => render(STATUS_OK, &circles),
        Err(err) => error_response(&err),
    }
}

pub(crate) fn circle_draft_from(object: &Map<String, Value>) -> CircleDraft {
    CircleDraft {
        id: None,
        x: scalar_field(object, "x").unwrap_or(Scalar::Missing),
        y: scalar_field(object, "y").unwrap_or(Scalar::Missing),
        diameter: scalar_field(object, "diameter").unwrap_or(Scalar::Missing),
    }
}

fn circle_not_found(raw_id: &str) -> ApiResponse {
    ApiResponse::errors(
        STATUS_NOT_FOUND,
        vec![format!("circle not found: {}", raw_id.trim())],
    )
}

fn not_an_object() -> ApiResponse {
    ApiResponse::errors(
        STATUS_UNPROCESSABLE,
        vec!["circle must be a JSON object".to_string()],
    )
}
