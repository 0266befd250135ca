//! Circle domain model.
//!
//! # Responsibility
//! - Define the persisted circle record and its draft/patch inputs.
//!
//! # Invariants
//! - `diameter > 0` for every persisted circle.
//! - `frame_id` never changes after creation.
//! - Updates are whole-record: a patch is merged onto the stored circle and
//!   the merged draft is revalidated as a unit.

use crate::geometry::Disc;
use crate::model::epoch_ms_now;
use crate::model::frame::FrameId;
use crate::model::scalar::Scalar;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a circle.
pub type CircleId = Uuid;

/// Persisted circle record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub id: CircleId,
    pub frame_id: FrameId,
    /// Center x coordinate.
    pub x: f64,
    /// Center y coordinate.
    pub y: f64,
    pub diameter: f64,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds.
    pub updated_at: i64,
}

impl Circle {
    /// Creates a fresh circle record owned by `frame_id`.
    pub fn new(frame_id: FrameId, disc: Disc) -> Self {
        let now = epoch_ms_now();
        Self {
            id: Uuid::new_v4(),
            frame_id,
            x: disc.center.x,
            y: disc.center.y,
            diameter: disc.diameter,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn disc(&self) -> Disc {
        Disc::from_diameter(self.x, self.y, self.diameter)
    }

    pub fn radius(&self) -> f64 {
        self.diameter / 2.0
    }
}

/// Candidate circle state submitted for validation.
///
/// `id` is set when the draft re-validates an existing circle, so the
/// circle is not compared against itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CircleDraft {
    pub id: Option<CircleId>,
    pub x: Scalar,
    pub y: Scalar,
    pub diameter: Scalar,
}

impl CircleDraft {
    /// Builds a draft for a new circle from plain numbers.
    pub fn new(x: f64, y: f64, diameter: f64) -> Self {
        Self {
            id: None,
            x: x.into(),
            y: y.into(),
            diameter: diameter.into(),
        }
    }
}

impl From<&Circle> for CircleDraft {
    fn from(circle: &Circle) -> Self {
        Self {
            id: Some(circle.id),
            x: circle.x.into(),
            y: circle.y.into(),
            diameter: circle.diameter.into(),
        }
    }
}

/// Partial circle update. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CirclePatch {
    pub x: Option<Scalar>,
    pub y: Option<Scalar>,
    pub diameter: Option<Scalar>,
}

impl CirclePatch {
    /// Merges this patch onto `current`, yielding the full candidate.
    pub fn apply_to(&self, current: &Circle) -> CircleDraft {
        let mut draft = CircleDraft::from(current);
        if let Some(x) = &self.x {
            draft.x = x.clone();
        }
        if let Some(y) = &self.y {
            draft.y = y.clone();
        }
        if let Some(diameter) = &self.diameter {
            draft.diameter = diameter.clone();
        }
        draft
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none() && self.diameter.is_none()
    }
}
