//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for frames and circles.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repositories never validate placement; services do that before writing.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Repository APIs return semantic errors (`*NotFound`) in addition to DB
//!   transport errors.

use crate::db::DbError;
use crate::model::circle::CircleId;
use crate::model::frame::FrameId;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub mod circle_repo;
pub mod frame_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for frame/circle persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    FrameNotFound(FrameId),
    CircleNotFound(CircleId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::FrameNotFound(id) => write!(f, "frame not found: {id}"),
            Self::CircleNotFound(id) => write!(f, "circle not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::FrameNotFound(_) | Self::CircleNotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

pub(crate) fn parse_uuid_column(value: &str, column: &str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{value}` in {column}")))
}

pub(crate) fn ensure_positive(value: f64, column: &str) -> RepoResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(RepoError::InvalidData(format!(
            "non-positive value `{value}` in {column}"
        )))
    }
}
