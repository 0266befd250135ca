//! Frame domain model.
//!
//! # Responsibility
//! - Define the persisted rectangular container record.
//! - Define the unvalidated draft accepted by frame creation.
//!
//! # Invariants
//! - `width > 0` and `height > 0` for every persisted frame.
//! - Frames are never mutated after creation except for `circle_count`.

use crate::geometry::Rect;
use crate::model::circle::CircleDraft;
use crate::model::epoch_ms_now;
use crate::model::scalar::Scalar;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a frame.
pub type FrameId = Uuid;

/// Persisted frame record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub id: FrameId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Number of circles owned by this frame. Serialized as `total_circles`.
    #[serde(rename = "total_circles")]
    pub circle_count: u32,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds.
    pub updated_at: i64,
}

impl Frame {
    /// Creates a fresh, empty frame record covering `rect`.
    pub fn new(rect: Rect) -> Self {
        let now = epoch_ms_now();
        Self {
            id: Uuid::new_v4(),
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            circle_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Proposed frame, optionally with circles to create alongside it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameDraft {
    pub x: Scalar,
    pub y: Scalar,
    pub width: Scalar,
    pub height: Scalar,
    pub circles: Vec<CircleDraft>,
}

impl FrameDraft {
    /// Builds a draft from plain numbers, with no nested circles.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            width: width.into(),
            height: height.into(),
            circles: Vec::new(),
        }
    }

    /// Rectangle described by the draft, when all four fields are numbers.
    ///
    /// Does not check positivity; use validation for that.
    pub fn rect(&self) -> Option<Rect> {
        Some(Rect::new(
            self.x.value()?,
            self.y.value()?,
            self.width.value()?,
            self.height.value()?,
        ))
    }

    /// Adds a nested circle to be created with the frame.
    pub fn with_circle(mut self, circle: CircleDraft) -> Self {
        self.circles.push(circle);
        self
    }
}
