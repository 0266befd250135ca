//! Circle repository contract and SQLite implementation.
//!
//! # Invariants
//! - Frame listings are deterministic: `created_at ASC, uuid ASC`.
//! - Box queries are a coarse prefilter; exact geometry stays in callers.

use super::{ensure_positive, parse_uuid_column, RepoError, RepoResult};
use crate::geometry::Rect;
use crate::model::circle::{Circle, CircleId};
use crate::model::frame::FrameId;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const CIRCLE_SELECT_SQL: &str = "SELECT
    uuid,
    frame_uuid,
    x,
    y,
    diameter,
    created_at,
    updated_at
FROM circles";

/// Repository interface for circle persistence.
pub trait CircleRepository {
    fn create_circle(&self, circle: &Circle) -> RepoResult<CircleId>;
    /// Rewrites geometry and `updated_at` of an existing circle.
    fn update_circle(&self, circle: &Circle) -> RepoResult<()>;
    fn get_circle(&self, id: CircleId) -> RepoResult<Option<Circle>>;
    fn list_frame_circles(&self, frame_id: FrameId) -> RepoResult<Vec<Circle>>;
    fn count_frame_circles(&self, frame_id: FrameId) -> RepoResult<u32>;
    /// Lists circles whose center lies inside `bbox`, boundary inclusive.
    fn list_circles_centered_in(
        &self,
        bbox: &Rect,
        frame_id: Option<FrameId>,
    ) -> RepoResult<Vec<Circle>>;
    fn delete_circle(&self, id: CircleId) -> RepoResult<()>;
}

/// SQLite-backed circle repository.
///
/// Accepts any connection, including an open `Transaction`.
pub struct SqliteCircleRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCircleRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl CircleRepository for SqliteCircleRepository<'_> {
    fn create_circle(&self, circle: &Circle) -> RepoResult<CircleId> {
        self.conn.execute(
            "INSERT INTO circles (
                uuid,
                frame_uuid,
                x,
                y,
                diameter,
                created_at,
                updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                circle.id.to_string(),
                circle.frame_id.to_string(),
                circle.x,
                circle.y,
                circle.diameter,
                circle.created_at,
                circle.updated_at,
            ],
        )?;
        Ok(circle.id)
    }

    fn update_circle(&self, circle: &Circle) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE circles
             SET
                x = ?1,
                y = ?2,
                diameter = ?3,
                updated_at = ?4
             WHERE uuid = ?5;",
            params![
                circle.x,
                circle.y,
                circle.diameter,
                circle.updated_at,
                circle.id.to_string(),
            ],
        )?;
        if changed == 0 {
            return Err(RepoError::CircleNotFound(circle.id));
        }
        Ok(())
    }

    fn get_circle(&self, id: CircleId) -> RepoResult<Option<Circle>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CIRCLE_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_circle_row(row)?));
        }
        Ok(None)
    }

    fn list_frame_circles(&self, frame_id: FrameId) -> RepoResult<Vec<Circle>> {
        let mut stmt = self.conn.prepare(&format!(
            "{CIRCLE_SELECT_SQL}
             WHERE frame_uuid = ?1
             ORDER BY created_at ASC, uuid ASC;"
        ))?;
        let mut rows = stmt.query([frame_id.to_string()])?;
        let mut circles = Vec::new();
        while let Some(row) = rows.next()? {
            circles.push(parse_circle_row(row)?);
        }
        Ok(circles)
    }

    fn count_frame_circles(&self, frame_id: FrameId) -> RepoResult<u32> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM circles WHERE frame_uuid = ?1;",
            [frame_id.to_string()],
            |row| row.get(0),
        )?;
        u32::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("circle count `{count}` out of range")))
    }

    fn list_circles_centered_in(
        &self,
        bbox: &Rect,
        frame_id: Option<FrameId>,
    ) -> RepoResult<Vec<Circle>> {
        let mut sql = format!(
            "{CIRCLE_SELECT_SQL}
             WHERE x BETWEEN ? AND ?
               AND y BETWEEN ? AND ?"
        );
        let mut bind_values = vec![
            Value::Real(bbox.left()),
            Value::Real(bbox.right()),
            Value::Real(bbox.top()),
            Value::Real(bbox.bottom()),
        ];

        if let Some(frame_id) = frame_id {
            sql.push_str(" AND frame_uuid = ?");
            bind_values.push(Value::Text(frame_id.to_string()));
        }
        sql.push_str(" ORDER BY created_at ASC, uuid ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut circles = Vec::new();
        while let Some(row) = rows.next()? {
            circles.push(parse_circle_row(row)?);
        }
        Ok(circles)
    }

    fn delete_circle(&self, id: CircleId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM circles WHERE uuid = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::CircleNotFound(id));
        }
        Ok(())
    }
}

fn parse_circle_row(row: &Row<'_>) -> RepoResult<Circle> {
    let uuid_text: String = row.get("uuid")?;
    let frame_text: String = row.get("frame_uuid")?;

    Ok(Circle {
        id: parse_uuid_column(&uuid_text, "circles.uuid")?,
        frame_id: parse_uuid_column(&frame_text, "circles.frame_uuid")?,
        x: row.get("x")?,
        y: row.get("y")?,
        diameter: ensure_positive(row.get("diameter")?, "circles.diameter")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
