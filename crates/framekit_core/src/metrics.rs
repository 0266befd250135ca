//! Positional summary of the circles inside one frame.
//!
//! Smaller `y` is visually higher, so the highest circle has the minimum `y`.

use crate::model::circle::Circle;
use serde::{Deserialize, Serialize};

/// Extents and count of a frame's circles.
///
/// Positional fields are `None` for an empty frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameMetrics {
    pub total_circles: u32,
    pub highest_circle_position: Option<f64>,
    pub lowest_circle_position: Option<f64>,
    pub leftmost_circle_position: Option<f64>,
    pub rightmost_circle_position: Option<f64>,
}

/// Computes center-coordinate extents over `circles`.
pub fn frame_metrics(circles: &[Circle]) -> FrameMetrics {
    let mut metrics = FrameMetrics {
        total_circles: u32::try_from(circles.len()).unwrap_or(u32::MAX),
        ..FrameMetrics::default()
    };

    for circle in circles {
        metrics.highest_circle_position =
            Some(fold(metrics.highest_circle_position, circle.y, f64::min));
        metrics.lowest_circle_position =
            Some(fold(metrics.lowest_circle_position, circle.y, f64::max));
        metrics.leftmost_circle_position =
            Some(fold(metrics.leftmost_circle_position, circle.x, f64::min));
        metrics.rightmost_circle_position =
            Some(fold(metrics.rightmost_circle_position, circle.x, f64::max));
    }

    metrics
}

fn fold(current: Option<f64>, value: f64, pick: fn(f64, f64) -> f64) -> f64 {
    current.map_or(value, |current| pick(current, value))
}
