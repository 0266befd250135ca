//! Core domain logic for framekit.
//! This crate is the single source of truth for frame and circle invariants.

pub mod api;
pub mod config;
pub mod db;
pub mod geometry;
pub mod logging;
pub mod metrics;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;
pub mod validation;

pub use api::ApiResponse;
pub use config::AppConfig;
pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use geometry::{Disc, Point, Rect};
pub use logging::{default_log_level, init_logging, logging_status};
pub use metrics::{frame_metrics, FrameMetrics};
pub use model::circle::{Circle, CircleDraft, CircleId, CirclePatch};
pub use model::frame::{Frame, FrameDraft, FrameId};
pub use model::scalar::Scalar;
pub use repo::{RepoError, RepoResult};
pub use search::disk::{CircleSearch, SearchParams};
pub use service::circle_service::CircleService;
pub use service::frame_service::{FrameDetails, FrameService};
pub use service::{ServiceError, ServiceResult};
pub use validation::{ValidationError, ValidationErrors};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
