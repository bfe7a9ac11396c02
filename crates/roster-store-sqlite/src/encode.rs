//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, calendar dates as ISO 8601
//! (`YYYY-MM-DD`).

use chrono::{DateTime, NaiveDate, Utc};
use roster_core::{student::Student, user::User};

use crate::{Error, Result};

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NaiveDate ────────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

fn decode_opt_date(s: Option<String>) -> Result<Option<NaiveDate>> {
  s.as_deref().map(decode_date).transpose()
}

// ─── Raw row types ────────────────────────────────────────────────────────────

/// A `students` row exactly as read from SQLite.
pub struct RawStudent {
  pub student_number:  String,
  pub first_name:      String,
  pub last_name:       String,
  pub birth_date:      String,
  pub email:           Option<String>,
  pub phone_number:    Option<String>,
  pub subscribe_start: Option<String>,
  pub subscribe_end:   Option<String>,
  pub created_at:      String,
  pub updated_at:      String,
}

/// Column list matching [`RawStudent::from_row`].
pub const STUDENT_COLUMNS: &str = "student_number, first_name, last_name, \
  birth_date, email, phone_number, subscribe_start, subscribe_end, \
  created_at, updated_at";

impl RawStudent {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      student_number:  row.get(0)?,
      first_name:      row.get(1)?,
      last_name:       row.get(2)?,
      birth_date:      row.get(3)?,
      email:           row.get(4)?,
      phone_number:    row.get(5)?,
      subscribe_start: row.get(6)?,
      subscribe_end:   row.get(7)?,
      created_at:      row.get(8)?,
      updated_at:      row.get(9)?,
    })
  }

  pub fn from_student(s: &Student) -> Self {
    Self {
      student_number:  s.student_number.clone(),
      first_name:      s.first_name.clone(),
      last_name:       s.last_name.clone(),
      birth_date:      encode_date(s.birth_date),
      email:           s.email.clone(),
      phone_number:    s.phone_number.clone(),
      subscribe_start: s.subscribe_start.map(encode_date),
      subscribe_end:   s.subscribe_end.map(encode_date),
      created_at:      encode_dt(s.created_at),
      updated_at:      encode_dt(s.updated_at),
    }
  }

  pub fn into_student(self) -> Result<Student> {
    Ok(Student {
      student_number:  self.student_number,
      first_name:      self.first_name,
      last_name:       self.last_name,
      birth_date:      decode_date(&self.birth_date)?,
      email:           self.email,
      phone_number:    self.phone_number,
      subscribe_start: decode_opt_date(self.subscribe_start)?,
      subscribe_end:   decode_opt_date(self.subscribe_end)?,
      created_at:      decode_dt(&self.created_at)?,
      updated_at:      decode_dt(&self.updated_at)?,
    })
  }
}

/// A `users` row exactly as read from SQLite.
pub struct RawUser {
  pub login:         String,
  pub password_hash: String,
  pub first_name:    String,
  pub last_name:     String,
  pub created_at:    String,
}

impl RawUser {
  pub fn into_user(self) -> Result<User> {
    Ok(User {
      login:         self.login,
      password_hash: self.password_hash,
      first_name:    self.first_name,
      last_name:     self.last_name,
      created_at:    decode_dt(&self.created_at)?,
    })
  }
}
