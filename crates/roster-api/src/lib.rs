//! HTTP layer for the student registry.
//!
//! Exposes an axum [`Router`] serving account and student endpoints under
//! `/api`, backed by any store implementing both [`StudentStore`] and
//! [`UserStore`].

pub mod auth;
pub mod dates;
pub mod dto;
pub mod error;
pub mod handlers;

pub use error::Error;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post},
};
use roster_auth::{account::AccountService, token::TokenService};
use roster_core::{
  service::StudentService,
  store::{StudentStore, UserStore},
};
use serde::Deserialize;

use handlers::{accounts, students};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `ROSTER_*` environment variables.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:         String,
  #[serde(default = "default_port")]
  pub port:         u16,
  pub store_path:   PathBuf,
  pub jwt_secret:   String,
  #[serde(default = "default_jwt_ttl_secs")]
  pub jwt_ttl_secs: i64,
}

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 8080 }

fn default_jwt_ttl_secs() -> i64 { 3600 }

impl std::fmt::Debug for ServerConfig {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ServerConfig")
      .field("host", &self.host)
      .field("port", &self.port)
      .field("store_path", &self.store_path)
      .field("jwt_ttl_secs", &self.jwt_ttl_secs)
      .finish_non_exhaustive()
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// A backend holding both students and accounts.
pub trait Store: StudentStore + UserStore + 'static {}

impl<T: StudentStore + UserStore + 'static> Store for T {}

/// Shared state threaded through all axum handlers.
pub struct AppState<S> {
  pub students: StudentService<S>,
  pub accounts: AccountService<S>,
  pub tokens:   Arc<TokenService>,
}

impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      students: self.students.clone(),
      accounts: self.accounts.clone(),
      tokens:   Arc::clone(&self.tokens),
    }
  }
}

impl<S: Store> AppState<S> {
  pub fn new(store: Arc<S>, tokens: TokenService) -> Self {
    let tokens = Arc::new(tokens);
    Self {
      students: StudentService::new(Arc::clone(&store)),
      accounts: AccountService::new(store, Arc::clone(&tokens)),
      tokens,
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the API [`Router`].
pub fn router<S: Store>(state: AppState<S>) -> Router {
  Router::new()
    // Accounts
    .route("/api/register",       post(accounts::register::<S>))
    .route("/api/login",          post(accounts::login::<S>))
    .route("/api/auth/{token}",   get(accounts::verify::<S>))
    // Students
    .route(
      "/api/student",
      get(students::list::<S>).post(students::create::<S>),
    )
    .route(
      "/api/student/{student_number}",
      get(students::get_one::<S>)
        .put(students::update::<S>)
        .delete(students::delete::<S>),
    )
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
