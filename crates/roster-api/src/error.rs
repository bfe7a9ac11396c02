//! Error type and axum `IntoResponse` implementation.

use axum::{
  Json,
  extract::rejection::JsonRejection,
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use roster_core::validate::Violations;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Missing, malformed, forged or expired bearer token.
  #[error("unauthorized")]
  Unauthorized,

  #[error("invalid login or password")]
  InvalidCredentials,

  #[error("{0}")]
  NotFound(String),

  #[error("{0}")]
  Conflict(String),

  #[error("{0}")]
  Invalid(Violations),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("internal error: {0}")]
  Internal(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<roster_core::Error> for Error {
  fn from(e: roster_core::Error) -> Self {
    use roster_core::Error as E;
    match e {
      E::StudentNotFound(_) => Error::NotFound(e.to_string()),
      E::StudentExists(_) => Error::Conflict(e.to_string()),
      E::InvalidInput(v) => Error::Invalid(v),
      E::Store(inner) => Error::Internal(inner),
    }
  }
}

impl From<roster_auth::Error> for Error {
  fn from(e: roster_auth::Error) -> Self {
    use roster_auth::Error as E;
    match e {
      E::LoginTaken(_) => Error::Conflict(e.to_string()),
      E::InvalidCredentials => Error::InvalidCredentials,
      E::InvalidInput(v) => Error::Invalid(v),
      E::Store(inner) => Error::Internal(inner),
      other @ (E::Token(_) | E::PasswordHash(_) | E::Config(_)) => {
        Error::Internal(Box::new(other))
      }
    }
  }
}

impl From<JsonRejection> for Error {
  fn from(rejection: JsonRejection) -> Self { Error::BadRequest(rejection.body_text()) }
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    let (status, body) = match &self {
      Error::Unauthorized | Error::InvalidCredentials => {
        let mut res =
          (StatusCode::UNAUTHORIZED, Json(json!({ "error": self.to_string() })))
            .into_response();
        res.headers_mut().insert(
          header::WWW_AUTHENTICATE,
          HeaderValue::from_static("Bearer realm=\"roster\""),
        );
        return res;
      }
      Error::NotFound(m) => (StatusCode::NOT_FOUND, json!({ "error": m })),
      Error::Conflict(m) => (StatusCode::CONFLICT, json!({ "error": m })),
      Error::Invalid(v) => (
        StatusCode::BAD_REQUEST,
        json!({ "error": v.to_string(), "violations": v }),
      ),
      Error::BadRequest(m) => (StatusCode::BAD_REQUEST, json!({ "error": m })),
      Error::Internal(e) => {
        tracing::error!(error = %e, "request failed");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          json!({ "error": "internal server error" }),
        )
      }
    };
    (status, Json(body)).into_response()
  }
}
