//! Domain model for frames and the circles placed inside them.
//!
//! # Responsibility
//! - Define persisted records (`Frame`, `Circle`) and their stable IDs.
//! - Define caller-facing drafts that carry unvalidated scalar input.
//!
//! # Invariants
//! - Every record is identified by a stable UUID assigned at creation.
//! - A circle belongs to exactly one frame for its whole lifetime.
//! - `Frame::circle_count` is derived state, kept in step by services.

pub mod circle;
pub mod frame;
pub mod scalar;

use std::time::{SystemTime, UNIX_EPOCH};

/// Current wall-clock time in Unix epoch milliseconds.
///
/// Falls back to `0` if the clock reads earlier than the epoch.
pub fn epoch_ms_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
