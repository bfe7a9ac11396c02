//! Authentication for the roster API.
//!
//! - [`token::TokenService`] issues and verifies signed, time-bounded tokens.
//! - [`account::AccountService`] registers accounts and exchanges a correct
//!   login/password pair for a token.
//!
//! Tokens are stateless: nothing is stored server-side, so a token stays
//! valid until it expires.

pub mod account;
pub mod error;
pub mod password;
pub mod token;

pub use error::{Error, Result};
