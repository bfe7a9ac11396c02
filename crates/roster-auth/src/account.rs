//! [`AccountService`]: registration and login against a [`UserStore`].
//!
//! A login attempt looks the account up, checks the password, and on success
//! issues a token. Nothing about the attempt is persisted.

use std::sync::Arc;

use chrono::Utc;
use roster_core::{
  store::UserStore,
  user::User,
  validate::{Violation, Violations},
};

use crate::{
  Error, Result,
  password::{hash_password, verify_password},
  token::TokenService,
};

/// Everything needed to open an account.
#[derive(Debug, Clone, Default)]
pub struct Registration {
  pub login:      String,
  pub password:   String,
  pub first_name: String,
  pub last_name:  String,
}

impl Registration {
  fn check(&self) -> Violations {
    let mut errors = credential_violations(&self.login, &self.password);
    if self.first_name.trim().is_empty() {
      errors.push(Violation::new(
        "firstName",
        "firstName.required",
        "First name is required",
      ));
    }
    if self.last_name.trim().is_empty() {
      errors.push(Violation::new(
        "lastName",
        "lastName.required",
        "Last name is required",
      ));
    }
    errors
  }
}

pub struct AccountService<U> {
  store:  Arc<U>,
  tokens: Arc<TokenService>,
}

impl<U> Clone for AccountService<U> {
  fn clone(&self) -> Self {
    Self {
      store:  Arc::clone(&self.store),
      tokens: Arc::clone(&self.tokens),
    }
  }
}

impl<U: UserStore> AccountService<U> {
  pub fn new(store: Arc<U>, tokens: Arc<TokenService>) -> Self {
    Self { store, tokens }
  }

  /// Open a new account. The password is stored only as an argon2 hash.
  pub async fn register(&self, registration: Registration) -> Result<User> {
    let errors = registration.check();
    if !errors.is_empty() {
      return Err(Error::InvalidInput(errors));
    }

    tracing::info!(login = %registration.login, "registering user");
    let existing = self
      .store
      .find_user(&registration.login)
      .await
      .map_err(store_err)?;
    if existing.is_some() {
      return Err(Error::LoginTaken(registration.login));
    }

    let login = registration.login.clone();
    let user = User {
      password_hash: hash_password(&registration.password)?,
      login:         registration.login,
      first_name:    registration.first_name,
      last_name:     registration.last_name,
      created_at:    Utc::now(),
    };
    self
      .store
      .insert_user(user)
      .await
      .map_err(store_err)?
      .ok_or(Error::LoginTaken(login))
  }

  /// Exchange a login/password pair for a signed token.
  ///
  /// An unknown login and a wrong password fail identically.
  pub async fn login(&self, login: &str, password: &str) -> Result<String> {
    let missing = credential_violations(login, password);
    if !missing.is_empty() {
      return Err(Error::InvalidInput(missing));
    }

    let Some(user) = self.store.find_user(login).await.map_err(store_err)? else {
      tracing::debug!(login, "login rejected: unknown user");
      return Err(Error::InvalidCredentials);
    };

    if !verify_password(password, &user.password_hash) {
      tracing::debug!(login, "login rejected: password mismatch");
      return Err(Error::InvalidCredentials);
    }

    self.tokens.issue(&user.login)
  }

  /// The token service this account service issues with.
  pub fn tokens(&self) -> &TokenService { &self.tokens }
}

fn credential_violations(login: &str, password: &str) -> Violations {
  let mut errors = Violations::default();
  if login.trim().is_empty() {
    errors.push(Violation::new("login", "login.required", "Login is required"));
  }
  if password.is_empty() {
    errors.push(Violation::new(
      "password",
      "password.required",
      "Password is required",
    ));
  }
  errors
}

fn store_err<E>(e: E) -> Error
where
  E: std::error::Error + Send + Sync + 'static,
{
  Error::Store(Box::new(e))
}
