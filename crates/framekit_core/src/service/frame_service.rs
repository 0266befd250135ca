//! Frame use-case service.
//!
//! # Responsibility
//! - Create frames, optionally with an initial batch of circles.
//! - Load frames with circle metrics, and delete empty frames.
//!
//! # Invariants
//! - Frame-with-circles creation is all-or-nothing.
//! - A frame owning circles is never deleted; emptiness is decided by the
//!   actual circle rows, not the cached counter.

use super::{in_transaction, log_rejection, ServiceError, ServiceResult};
use crate::metrics::{frame_metrics, FrameMetrics};
use crate::model::circle::Circle;
use crate::model::frame::{Frame, FrameDraft, FrameId};
use crate::repo::circle_repo::{CircleRepository, SqliteCircleRepository};
use crate::repo::frame_repo::{FrameRepository, SqliteFrameRepository};
use crate::repo::RepoError;
use crate::validation::validate_frame_with_circles;
use log::info;
use rusqlite::{Connection, TransactionBehavior};

/// Frame together with the metrics of its circles.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameDetails {
    pub frame: Frame,
    pub metrics: FrameMetrics,
}

/// Frame service facade over a migrated SQLite connection.
pub struct FrameService<'conn> {
    conn: &'conn Connection,
}

impl<'conn> FrameService<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Creates a frame and the circles nested in `draft`.
    ///
    /// # Errors
    /// - `Validation` listing every frame and nested-circle violation.
    pub fn create_frame(&self, draft: &FrameDraft) -> ServiceResult<Frame> {
        let result = in_transaction(self.conn, TransactionBehavior::Immediate, |tx| {
            let frames = SqliteFrameRepository::new(tx);
            let circles = SqliteCircleRepository::new(tx);

            let neighbors = match draft.rect() {
                Some(rect) => frames.list_frames_touching(&rect)?,
                None => Vec::new(),
            };
            let (rect, discs) = validate_frame_with_circles(draft, &neighbors)?;

            let mut frame = Frame::new(rect);
            frame.circle_count = u32::try_from(discs.len()).map_err(|_| {
                RepoError::InvalidData(format!("too many nested circles: {}", discs.len()))
            })?;
            frames.create_frame(&frame)?;
            for disc in discs {
                circles.create_circle(&Circle::new(frame.id, disc))?;
            }
            Ok(frame)
        });

        match &result {
            Ok(frame) => info!(
                "event=frame_create module=service status=ok frame_id={} circles={}",
                frame.id, frame.circle_count
            ),
            Err(err) => log_rejection("frame_create", err),
        }
        result
    }

    /// Loads one frame by ID.
    pub fn get_frame(&self, id: FrameId) -> ServiceResult<Frame> {
        SqliteFrameRepository::new(self.conn)
            .get_frame(id)?
            .ok_or(ServiceError::FrameNotFound(id))
    }

    /// Loads one frame and the metrics of its circles from one snapshot.
    pub fn frame_details(&self, id: FrameId) -> ServiceResult<FrameDetails> {
        in_transaction(self.conn, TransactionBehavior::Deferred, |tx| {
            let frame = SqliteFrameRepository::new(tx)
                .get_frame(id)?
                .ok_or(ServiceError::FrameNotFound(id))?;
            let circles = SqliteCircleRepository::new(tx).list_frame_circles(id)?;
            Ok(FrameDetails {
                frame,
                metrics: frame_metrics(&circles),
            })
        })
    }

    /// Deletes a frame that owns no circles.
    ///
    /// # Errors
    /// - `FrameNotFound` when `id` does not exist.
    /// - `NonEmptyChildren` when at least one circle still references it.
    pub fn delete_frame(&self, id: FrameId) -> ServiceResult<()> {
        let result = in_transaction(self.conn, TransactionBehavior::Immediate, |tx| {
            let frames = SqliteFrameRepository::new(tx);
            if frames.get_frame(id)?.is_none() {
                return Err(ServiceError::FrameNotFound(id));
            }

            let circle_count = SqliteCircleRepository::new(tx).count_frame_circles(id)?;
            if circle_count > 0 {
                return Err(ServiceError::NonEmptyChildren {
                    frame_id: id,
                    circle_count,
                });
            }

            frames.delete_frame(id)?;
            Ok(())
        });

        match &result {
            Ok(()) => info!("event=frame_delete module=service status=ok frame_id={id}"),
            Err(err) => log_rejection("frame_delete", err),
        }
        result
    }
}
