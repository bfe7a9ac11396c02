//! Bearer-token extractor guarding the student routes.

use axum::{
  extract::FromRequestParts,
  http::{HeaderMap, header, request::Parts},
};
use roster_auth::token::TokenService;

use crate::{AppState, Store, error::Error};

/// The verified token subject. Present in a handler means the request carried
/// a valid, unexpired token.
#[derive(Debug, Clone)]
pub struct Authenticated(pub String);

/// Verify the `Authorization: Bearer …` header directly.
pub fn verify_bearer(headers: &HeaderMap, tokens: &TokenService) -> Result<String, Error> {
  let token = headers
    .get(header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .and_then(|v| v.strip_prefix("Bearer "))
    .map(str::trim)
    .ok_or(Error::Unauthorized)?;

  tokens.verify(token).ok_or(Error::Unauthorized)
}

impl<S: Store> FromRequestParts<AppState<S>> for Authenticated {
  type Rejection = Error;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    verify_bearer(&parts.headers, &state.tokens).map(Authenticated)
  }
}
