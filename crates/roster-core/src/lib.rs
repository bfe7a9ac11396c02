//! Core types and services for the roster student registry.
//!
//! This crate has no HTTP or database dependencies.
//! Storage backends implement the traits in [`store`]; the HTTP layer talks
//! to [`service::StudentService`] and never to a backend directly.

// Store impls use native `async fn`; the trait signatures carry the `Send`
// bounds the lint asks about.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod service;
pub mod store;
pub mod student;
pub mod user;
pub mod validate;

pub use error::{Error, Result};
