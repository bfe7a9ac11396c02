//! Error types for `roster-core`.

use thiserror::Error;

use crate::validate::Violations;

#[derive(Debug, Error)]
pub enum Error {
  #[error("student {0} does not exist")]
  StudentNotFound(String),

  #[error("student with student number {0} already exists")]
  StudentExists(String),

  #[error("{0}")]
  InvalidInput(Violations),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
