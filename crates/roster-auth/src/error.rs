//! Error type for `roster-auth`.

use roster_core::validate::Violations;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("user with login {0} already exists")]
  LoginTaken(String),

  /// Unknown login or wrong password. Does not say which.
  #[error("invalid login or password")]
  InvalidCredentials,

  #[error("{0}")]
  InvalidInput(Violations),

  #[error("token error: {0}")]
  Token(#[from] jsonwebtoken::errors::Error),

  #[error("password hash error: {0}")]
  PasswordHash(String),

  #[error("invalid token configuration: {0}")]
  Config(&'static str),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
