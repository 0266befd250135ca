//! Core use-case services.
//!
//! # Responsibility
//! - Run each mutation as one validate-then-persist unit of work.
//! - Keep the frame circle counter in step with circle create/delete.
//!
//! # Invariants
//! - Mutations run inside `BEGIN IMMEDIATE`, so sibling reads and the write
//!   are serialized against every other writer.
//! - A rejected mutation leaves persisted state unchanged.

use crate::db::DbError;
use crate::model::circle::CircleId;
use crate::model::frame::FrameId;
use crate::repo::RepoError;
use crate::validation::ValidationErrors;
use log::{error, warn};
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod circle_service;
pub mod frame_service;

/// Result type used by service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors from frame/circle use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// One or more placement/argument rules were violated.
    Validation(ValidationErrors),
    /// Referenced frame does not exist.
    FrameNotFound(FrameId),
    /// Referenced circle does not exist.
    CircleNotFound(CircleId),
    /// Frame still owns circles and cannot be deleted.
    NonEmptyChildren {
        frame_id: FrameId,
        circle_count: u32,
    },
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl ServiceError {
    /// Human-readable messages for callers.
    ///
    /// Storage failures collapse to one generic message; details are logged.
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::Validation(errors) => errors.messages(),
            Self::Repo(_) => vec!["internal storage error".to_string()],
            other => vec![other.to_string()],
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(errors) => write!(f, "{errors}"),
            Self::FrameNotFound(id) => write!(f, "frame not found: {id}"),
            Self::CircleNotFound(id) => write!(f, "circle not found: {id}"),
            Self::NonEmptyChildren {
                frame_id,
                circle_count,
            } => write!(
                f,
                "frame {frame_id} still has {circle_count} circle(s) and cannot be deleted"
            ),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(errors) => Some(errors),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::FrameNotFound(id) => Self::FrameNotFound(id),
            RepoError::CircleNotFound(id) => Self::CircleNotFound(id),
            other => Self::Repo(other),
        }
    }
}

impl From<rusqlite::Error> for ServiceError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Repo(RepoError::Db(DbError::Sqlite(value)))
    }
}

/// Runs `work` in a transaction, committing only when it succeeds.
///
/// Dropping the transaction on the error path rolls it back.
fn in_transaction<T>(
    conn: &Connection,
    behavior: TransactionBehavior,
    work: impl FnOnce(&Transaction<'_>) -> ServiceResult<T>,
) -> ServiceResult<T> {
    let tx = Transaction::new_unchecked(conn, behavior)?;
    let value = work(&tx)?;
    tx.commit()?;
    Ok(value)
}

/// Logs a failed use-case with metadata only.
fn log_rejection(event: &str, err: &ServiceError) {
    match err {
        ServiceError::Validation(errors) => warn!(
            "event={event} module=service status=rejected violations={}",
            errors.len()
        ),
        ServiceError::Repo(repo_err) => {
            error!("event={event} module=service status=error error={repo_err}")
        }
        other => warn!("event={event} module=service status=rejected reason={other}"),
    }
}
