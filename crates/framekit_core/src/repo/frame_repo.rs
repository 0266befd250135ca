//! Frame repository contract and SQLite implementation.
//!
//! # Invariants
//! - `circle_count` is only changed through `adjust_circle_count`.
//! - A frame row cannot be deleted while circles reference it
//!   (`ON DELETE RESTRICT`).

use super::{ensure_positive, parse_uuid_column, RepoError, RepoResult};
use crate::geometry::Rect;
use crate::model::frame::{Frame, FrameId};
use rusqlite::{params, Connection, Row};

const FRAME_SELECT_SQL: &str = "SELECT
    uuid,
    x,
    y,
    width,
    height,
    circle_count,
    created_at,
    updated_at
FROM frames";

/// Repository interface for frame persistence.
pub trait FrameRepository {
    fn create_frame(&self, frame: &Frame) -> RepoResult<FrameId>;
    fn get_frame(&self, id: FrameId) -> RepoResult<Option<Frame>>;
    /// Lists frames whose rectangle overlaps or touches `rect`.
    fn list_frames_touching(&self, rect: &Rect) -> RepoResult<Vec<Frame>>;
    fn delete_frame(&self, id: FrameId) -> RepoResult<()>;
    /// Adds `delta` to the stored circle counter.
    fn adjust_circle_count(&self, id: FrameId, delta: i64) -> RepoResult<()>;
}

/// SQLite-backed frame repository.
///
/// Accepts any connection, including an open `Transaction`.
pub struct SqliteFrameRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteFrameRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl FrameRepository for SqliteFrameRepository<'_> {
    fn create_frame(&self, frame: &Frame) -> RepoResult<FrameId> {
        self.conn.execute(
            "INSERT INTO frames (
                uuid,
                x,
                y,
                width,
                height,
                circle_count,
                created_at,
                updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
            params![
                frame.id.to_string(),
                frame.x,
                frame.y,
                frame.width,
                frame.height,
                i64::from(frame.circle_count),
                frame.created_at,
                frame.updated_at,
            ],
        )?;
        Ok(frame.id)
    }

    fn get_frame(&self, id: FrameId) -> RepoResult<Option<Frame>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{FRAME_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_frame_row(row)?));
        }
        Ok(None)
    }

    fn list_frames_touching(&self, rect: &Rect) -> RepoResult<Vec<Frame>> {
        // Same inclusive comparisons as `rectangles_overlap_or_touch`.
        let mut stmt = self.conn.prepare(&format!(
            "{FRAME_SELECT_SQL}
             WHERE x <= ?2
               AND x + width >= ?1
               AND y <= ?4
               AND y + height >= ?3
             ORDER BY created_at ASC, uuid ASC;"
        ))?;
        let mut rows = stmt.query(params![
            rect.left(),
            rect.right(),
            rect.top(),
            rect.bottom()
        ])?;
        let mut frames = Vec::new();
        while let Some(row) = rows.next()? {
            frames.push(parse_frame_row(row)?);
        }
        Ok(frames)
    }

    fn delete_frame(&self, id: FrameId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM frames WHERE uuid = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::FrameNotFound(id));
        }
        Ok(())
    }

    fn adjust_circle_count(&self, id: FrameId, delta: i64) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE frames
             SET circle_count = MAX(circle_count + ?2, 0)
             WHERE uuid = ?1;",
            params![id.to_string(), delta],
        )?;
        if changed == 0 {
            return Err(RepoError::FrameNotFound(id));
        }
        Ok(())
    }
}

fn parse_frame_row(row: &Row<'_>) -> RepoResult<Frame> {
    let uuid_text: String = row.get("uuid")?;
    let id = parse_uuid_column(&uuid_text, "frames.uuid")?;

    let count: i64 = row.get("circle_count")?;
    let circle_count = u32::try_from(count).map_err(|_| {
        RepoError::InvalidData(format!("invalid circle_count `{count}` in frames.circle_count"))
    })?;

    Ok(Frame {
        id,
        x: row.get("x")?,
        y: row.get("y")?,
        width: ensure_positive(row.get("width")?, "frames.width")?,
        height: ensure_positive(row.get("height")?, "frames.height")?,
        circle_count,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
