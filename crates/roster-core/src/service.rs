//! [`StudentService`]: lookup, uniqueness, merge and validation in front of a
//! [`StudentStore`].

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::{
  Error, Result,
  store::StudentStore,
  student::{Student, StudentFields},
  validate::validate,
};

/// Outcome of [`StudentService::upsert`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upserted {
  pub student: Student,
  /// `true` if no student existed under the key and one was created.
  pub created: bool,
}

/// Orchestrates every write to the student registry.
///
/// Timestamps are set here, never by the backend or the client.
pub struct StudentService<S> {
  store: Arc<S>,
}

impl<S> Clone for StudentService<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S: StudentStore> StudentService<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  pub async fn list(&self) -> Result<Vec<Student>> {
    self.store.list_students().await.map_err(store_err)
  }

  pub async fn get(&self, student_number: &str) -> Result<Student> {
    self
      .store
      .find_student(student_number)
      .await
      .map_err(store_err)?
      .ok_or_else(|| Error::StudentNotFound(student_number.to_owned()))
  }

  /// Create a student under `student_number`.
  ///
  /// Fails with [`Error::StudentExists`] if the number is taken, whatever
  /// `fields` contains.
  pub async fn create(
    &self,
    student_number: &str,
    fields: StudentFields,
  ) -> Result<Student> {
    tracing::info!(student_number, "creating student");

    let existing = self
      .store
      .find_student(student_number)
      .await
      .map_err(store_err)?;
    if existing.is_some() {
      return Err(Error::StudentExists(student_number.to_owned()));
    }

    self.insert_new(student_number, fields, Utc::now()).await
  }

  /// Create-or-patch the student under `student_number`.
  ///
  /// An existing student keeps every field that `patch` leaves as `None`.
  /// A missing student is created from `patch` alone. The key always comes
  /// from `student_number`.
  pub async fn upsert(
    &self,
    student_number: &str,
    patch: StudentFields,
  ) -> Result<Upserted> {
    let now = Utc::now();
    let existing = self
      .store
      .find_student(student_number)
      .await
      .map_err(store_err)?;

    let Some(mut student) = existing else {
      tracing::info!(student_number, "creating student from update");
      let student = self.insert_new(student_number, patch, now).await?;
      return Ok(Upserted { student, created: true });
    };

    tracing::info!(student_number, "updating student");
    student.merge(patch);
    student.updated_at = now;
    check(&student, now)?;

    let student = self.store.update_student(student).await.map_err(store_err)?;
    Ok(Upserted { student, created: false })
  }

  pub async fn delete(&self, student_number: &str) -> Result<()> {
    tracing::info!(student_number, "deleting student");
    let removed = self
      .store
      .delete_student(student_number)
      .await
      .map_err(store_err)?;
    if !removed {
      return Err(Error::StudentNotFound(student_number.to_owned()));
    }
    Ok(())
  }

  async fn insert_new(
    &self,
    student_number: &str,
    fields: StudentFields,
    now: DateTime<Utc>,
  ) -> Result<Student> {
    let student =
      Student::assemble(student_number, fields, now).map_err(Error::InvalidInput)?;
    check(&student, now)?;
    self
      .store
      .insert_student(student)
      .await
      .map_err(store_err)?
      .ok_or_else(|| {
        tracing::debug!(student_number, "lost insert race");
        Error::StudentExists(student_number.to_owned())
      })
  }
}

fn check(student: &Student, now: DateTime<Utc>) -> Result<()> {
  let mut errors = student.missing_fields();
  errors.extend(validate(student, now.date_naive()));
  if errors.is_empty() {
    Ok(())
  } else {
    tracing::debug!(
      student_number = %student.student_number,
      %errors,
      "student rejected"
    );
    Err(Error::InvalidInput(errors))
  }
}

fn store_err<E>(e: E) -> Error
where
  E: std::error::Error + Send + Sync + 'static,
{
  Error::Store(Box::new(e))
}
