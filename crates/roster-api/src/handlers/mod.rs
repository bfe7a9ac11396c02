//! Route handlers, one module per resource.

pub mod accounts;
pub mod students;

use axum::{
  Json,
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use serde::Serialize;

/// `201 Created` with `body` and a `Location` header. Callers percent-encode
/// `location`, so it is always a valid header value.
pub(crate) fn created<T: Serialize>(location: &str, body: T) -> Response {
  let mut res = (StatusCode::CREATED, Json(body)).into_response();
  if let Ok(value) = HeaderValue::from_str(location) {
    res.headers_mut().insert(header::LOCATION, value);
  }
  res
}
