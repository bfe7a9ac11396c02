//! [`SqliteStore`]: the SQLite implementation of [`StudentStore`] and
//! [`UserStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;

use roster_core::{
  store::{StudentStore, UserStore},
  student::Student,
  user::User,
};

use crate::{
  Error, Result,
  encode::{RawStudent, RawUser, STUDENT_COLUMNS, encode_dt},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A roster store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── StudentStore impl ───────────────────────────────────────────────────────

impl StudentStore for SqliteStore {
  type Error = Error;

  async fn list_students(&self) -> Result<Vec<Student>> {
    let raws: Vec<RawStudent> = self
      .conn
      .call(|conn| {
        let mut stmt = conn
          .prepare(&format!("SELECT {STUDENT_COLUMNS} FROM students ORDER BY id"))?;
        let rows = stmt
          .query_map([], RawStudent::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawStudent::into_student).collect()
  }

  async fn find_student(&self, student_number: &str) -> Result<Option<Student>> {
    let number = student_number.to_owned();

    let raw: Option<RawStudent> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {STUDENT_COLUMNS} FROM students WHERE student_number = ?1"),
            rusqlite::params![number],
            RawStudent::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawStudent::into_student).transpose()
  }

  async fn insert_student(&self, student: Student) -> Result<Option<Student>> {
    let raw = RawStudent::from_student(&student);

    let inserted = self
      .conn
      .call(move |conn| {
        let res = conn.execute(
          &format!(
            "INSERT INTO students ({STUDENT_COLUMNS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)"
          ),
          rusqlite::params![
            raw.student_number,
            raw.first_name,
            raw.last_name,
            raw.birth_date,
            raw.email,
            raw.phone_number,
            raw.subscribe_start,
            raw.subscribe_end,
            raw.created_at,
            raw.updated_at,
          ],
        );
        Ok(unless_duplicate(res)?)
      })
      .await?;

    Ok(inserted.map(|_| student))
  }

  async fn update_student(&self, student: Student) -> Result<Student> {
    let raw = RawStudent::from_student(&student);

    // created_at is never rewritten.
    let updated = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE students SET
             first_name = ?2, last_name = ?3, birth_date = ?4,
             email = ?5, phone_number = ?6,
             subscribe_start = ?7, subscribe_end = ?8,
             updated_at = ?9
           WHERE student_number = ?1",
          rusqlite::params![
            raw.student_number,
            raw.first_name,
            raw.last_name,
            raw.birth_date,
            raw.email,
            raw.phone_number,
            raw.subscribe_start,
            raw.subscribe_end,
            raw.updated_at,
          ],
        )?)
      })
      .await?;

    if updated == 0 {
      return Err(Error::StudentMissing(student.student_number));
    }
    Ok(student)
  }

  async fn delete_student(&self, student_number: &str) -> Result<bool> {
    let number = student_number.to_owned();

    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM students WHERE student_number = ?1",
          rusqlite::params![number],
        )?)
      })
      .await?;

    Ok(deleted > 0)
  }
}

// ─── UserStore impl ──────────────────────────────────────────────────────────

impl UserStore for SqliteStore {
  type Error = Error;

  async fn find_user(&self, login: &str) -> Result<Option<User>> {
    let login = login.to_owned();

    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT login, password_hash, first_name, last_name, created_at
             FROM users WHERE login = ?1",
            rusqlite::params![login],
            |row| {
              Ok(RawUser {
                login:         row.get(0)?,
                password_hash: row.get(1)?,
                first_name:    row.get(2)?,
                last_name:     row.get(3)?,
                created_at:    row.get(4)?,
              })
            },
          )
          .optional()?)
      })
      .await?;

    raw.map(RawUser::into_user).transpose()
  }

  async fn insert_user(&self, user: User) -> Result<Option<User>> {
    let login         = user.login.clone();
    let password_hash = user.password_hash.clone();
    let first_name    = user.first_name.clone();
    let last_name     = user.last_name.clone();
    let created_at    = encode_dt(user.created_at);

    let inserted = self
      .conn
      .call(move |conn| {
        let res = conn.execute(
          "INSERT INTO users (login, password_hash, first_name, last_name, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![login, password_hash, first_name, last_name, created_at],
        );
        Ok(unless_duplicate(res)?)
      })
      .await?;

    Ok(inserted.map(|_| user))
  }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// Turn a `UNIQUE` constraint failure into `Ok(None)`; pass everything else
/// through.
fn unless_duplicate<T>(res: rusqlite::Result<T>) -> rusqlite::Result<Option<T>> {
  match res {
    Ok(v) => Ok(Some(v)),
    Err(rusqlite::Error::SqliteFailure(e, _))
      if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
    {
      Ok(None)
    }
    Err(e) => Err(e),
  }
}
