//! Circle use-case service.
//!
//! # Responsibility
//! - Create, update and delete circles inside their owning frame.
//! - Run radius searches over persisted circles.
//!
//! # Invariants
//! - Updates revalidate the merged record against the frame and all siblings.
//! - Circle create/delete adjusts the frame counter in the same transaction.

use super::{in_transaction, log_rejection, ServiceError, ServiceResult};
use crate::model::circle::{Circle, CircleDraft, CircleId, CirclePatch};
use crate::model::epoch_ms_now;
use crate::model::frame::FrameId;
use crate::repo::circle_repo::{CircleRepository, SqliteCircleRepository};
use crate::repo::frame_repo::{FrameRepository, SqliteFrameRepository};
use crate::repo::RepoError;
use crate::search::disk::{CircleSearch, SearchParams};
use crate::validation::validate_circle_placement;
use log::{debug, info};
use rusqlite::{Connection, TransactionBehavior};

/// Circle service facade over a migrated SQLite connection.
pub struct CircleService<'conn> {
    conn: &'conn Connection,
}

impl<'conn> CircleService<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Creates one circle inside frame `frame_id`.
    ///
    /// # Errors
    /// - `FrameNotFound` when the frame does not exist.
    /// - `Validation` listing every violated rule.
    pub fn create_circle(&self, frame_id: FrameId, draft: &CircleDraft) -> ServiceResult<Circle> {
        let result = in_transaction(self.conn, TransactionBehavior::Immediate, |tx| {
            let frames = SqliteFrameRepository::new(tx);
            let circles = SqliteCircleRepository::new(tx);

            let frame = frames
                .get_frame(frame_id)?
                .ok_or(ServiceError::FrameNotFound(frame_id))?;
            let siblings = circles.list_frame_circles(frame_id)?;
            let disc = validate_circle_placement(draft, &frame, &siblings)?;

            let circle = Circle::new(frame_id, disc);
            circles.create_circle(&circle)?;
            frames.adjust_circle_count(frame_id, 1)?;
            Ok(circle)
        });

        match &result {
            Ok(circle) => info!(
                "event=circle_create module=service status=ok circle_id={} frame_id={}",
                circle.id, circle.frame_id
            ),
            Err(err) => log_rejection("circle_create", err),
        }
        result
    }

    /// Applies `patch` to an existing circle after whole-record revalidation.
    ///
    /// # Errors
    /// - `CircleNotFound` when `id` does not exist.
    /// - `Validation` listing every violated rule of the merged record.
    pub fn update_circle(&self, id: CircleId, patch: &CirclePatch) -> ServiceResult<Circle> {
        let result = in_transaction(self.conn, TransactionBehavior::Immediate, |tx| {
            let frames = SqliteFrameRepository::new(tx);
            let circles = SqliteCircleRepository::new(tx);

            let current = circles
                .get_circle(id)?
                .ok_or(ServiceError::CircleNotFound(id))?;
            let frame = frames.get_frame(current.frame_id)?.ok_or_else(|| {
                RepoError::InvalidData(format!(
                    "circle {id} references missing frame {}",
                    current.frame_id
                ))
            })?;
            let siblings = circles.list_frame_circles(current.frame_id)?;

            let draft = patch.apply_to(&current);
            let disc = validate_circle_placement(&draft, &frame, &siblings)?;

            let updated = Circle {
                x: disc.center.x,
                y: disc.center.y,
                diameter: disc.diameter,
                updated_at: epoch_ms_now(),
                ..current
            };
            circles.update_circle(&updated)?;
            Ok(updated)
        });

        match &result {
            Ok(circle) => info!(
                "event=circle_update module=service status=ok circle_id={}",
                circle.id
            ),
            Err(err) => log_rejection("circle_update", err),
        }
        result
    }

    /// Loads one circle by ID.
    pub fn get_circle(&self, id: CircleId) -> ServiceResult<Circle> {
        SqliteCircleRepository::new(self.conn)
            .get_circle(id)?
            .ok_or(ServiceError::CircleNotFound(id))
    }

    /// Deletes one circle and decrements its frame's counter.
    pub fn delete_circle(&self, id: CircleId) -> ServiceResult<()> {
        let result = in_transaction(self.conn, TransactionBehavior::Immediate, |tx| {
            let circles = SqliteCircleRepository::new(tx);
            let circle = circles
                .get_circle(id)?
                .ok_or(ServiceError::CircleNotFound(id))?;
            circles.delete_circle(id)?;
            SqliteFrameRepository::new(tx).adjust_circle_count(circle.frame_id, -1)?;
            Ok(())
        });

        match &result {
            Ok(()) => info!("event=circle_delete module=service status=ok circle_id={id}"),
            Err(err) => log_rejection("circle_delete", err),
        }
        result
    }

    /// Validates raw search parameters and runs the search.
    ///
    /// # Errors
    /// - `Validation` with `MissingParameter`/`InvalidArgument` entries.
    pub fn search_circles(&self, params: &SearchParams) -> ServiceResult<Vec<Circle>> {
        let search = CircleSearch::from_params(params).map_err(|errors| {
            let err = ServiceError::Validation(errors);
            log_rejection("circle_search", &err);
            err
        })?;
        self.run_search(&search)
    }

    /// Returns circles fully contained in the search disk, in no set order.
    ///
    /// An unknown `frame_id` simply matches nothing.
    pub fn run_search(&self, search: &CircleSearch) -> ServiceResult<Vec<Circle>> {
        let candidates = SqliteCircleRepository::new(self.conn)
            .list_circles_centered_in(&search.bounding_box(), search.frame_id)?;
        let candidate_count = candidates.len();
        let found = search.filter(candidates);
        debug!(
            "event=circle_search module=service status=ok candidates={} matches={}",
            candidate_count,
            found.len()
        );
        Ok(found)
    }
}
