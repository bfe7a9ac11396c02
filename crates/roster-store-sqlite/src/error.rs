//! Error type for `roster-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// An update targeted a student number with no row behind it.
  #[error("no stored student with number {0}")]
  StudentMissing(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
