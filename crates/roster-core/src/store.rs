//! Storage traits for students and user accounts.
//!
//! The traits are implemented by storage backends (e.g.
//! `roster-store-sqlite`). Services depend on this abstraction, not on any
//! concrete backend.
//!
//! Backends are expected to serialise individual calls. Nothing here assumes
//! transactions spanning several calls.

use std::future::Future;

use crate::{student::Student, user::User};

// ─── Students ────────────────────────────────────────────────────────────────

/// Abstraction over a student record backend.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait StudentStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// All students, in the backend's natural order.
  fn list_students(
    &self,
  ) -> impl Future<Output = Result<Vec<Student>, Self::Error>> + Send + '_;

  /// Retrieve a student by student number. Returns `None` if not found.
  fn find_student<'a>(
    &'a self,
    student_number: &'a str,
  ) -> impl Future<Output = Result<Option<Student>, Self::Error>> + Send + 'a;

  /// Persist a new student. Returns `None`, writing nothing, if the student
  /// number is already taken.
  ///
  /// The service checks for an existing key first, but not atomically, so the
  /// backend must enforce uniqueness itself.
  fn insert_student(
    &self,
    student: Student,
  ) -> impl Future<Output = Result<Option<Student>, Self::Error>> + Send + '_;

  /// Replace the stored row for `student.student_number`.
  fn update_student(
    &self,
    student: Student,
  ) -> impl Future<Output = Result<Student, Self::Error>> + Send + '_;

  /// Remove a student. Returns `false` if there was nothing to remove.
  fn delete_student<'a>(
    &'a self,
    student_number: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;
}

// ─── Users ───────────────────────────────────────────────────────────────────

/// Abstraction over the account (login → password hash) backend.
pub trait UserStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Retrieve an account by login. Returns `None` if not found.
  fn find_user<'a>(
    &'a self,
    login: &'a str,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + 'a;

  /// Persist a new account. Returns `None`, writing nothing, if the login is
  /// already taken.
  fn insert_user(
    &self,
    user: User,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;
}
