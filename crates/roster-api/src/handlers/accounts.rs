//! Handlers for account registration, login and token checks. None of these
//! require a token.

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
  response::Response,
};

use super::created;
use crate::{
  AppState, Store,
  dto::{AccountDto, LoginBody, RegisterBody},
  error::Error,
};

/// `POST /api/register`
pub async fn register<S: Store>(
  State(state): State<AppState<S>>,
  payload: Result<Json<RegisterBody>, JsonRejection>,
) -> Result<Response, Error> {
  let Json(body) = payload?;
  let user = state.accounts.register(body.into()).await?;
  Ok(created("/api/login", AccountDto::from(user)))
}

/// `POST /api/login`. Responds with the bare token as `text/plain`.
pub async fn login<S: Store>(
  State(state): State<AppState<S>>,
  payload: Result<Json<LoginBody>, JsonRejection>,
) -> Result<String, Error> {
  let Json(body) = payload?;
  let login = body.login.unwrap_or_default();
  let password = body.password.unwrap_or_default();
  Ok(state.accounts.login(&login, &password).await?)
}

/// `GET /api/auth/{token}`. Always 200; the body says whether the token is
/// currently valid.
pub async fn verify<S: Store>(
  State(state): State<AppState<S>>,
  Path(token): Path<String>,
) -> Json<bool> {
  Json(state.tokens.verify(&token).is_some())
}
