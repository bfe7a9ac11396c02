//! Wire shapes for request and response bodies.
//!
//! Field names are camelCase; dates use the formats in [`crate::dates`].
//! Server-assigned fields (`createdAt`, `updatedAt`) are ignored on input.

use chrono::{DateTime, NaiveDate, Utc};
use roster_auth::account::Registration;
use roster_core::student::{Student, StudentFields};
use serde::{Deserialize, Serialize};

use crate::dates;

// ─── Students ────────────────────────────────────────────────────────────────

/// A student as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDto {
  pub student_number:  String,
  pub first_name:      String,
  pub last_name:       String,
  #[serde(with = "dates::date")]
  pub birth_date:      NaiveDate,
  pub email:           Option<String>,
  pub phone_number:    Option<String>,
  #[serde(with = "dates::option_date", default)]
  pub subscribe_start: Option<NaiveDate>,
  #[serde(with = "dates::option_date", default)]
  pub subscribe_end:   Option<NaiveDate>,
  #[serde(with = "dates::date_time")]
  pub created_at:      DateTime<Utc>,
  #[serde(with = "dates::date_time")]
  pub updated_at:      DateTime<Utc>,
}

impl From<Student> for StudentDto {
  fn from(s: Student) -> Self {
    Self {
      student_number:  s.student_number,
      first_name:      s.first_name,
      last_name:       s.last_name,
      birth_date:      s.birth_date,
      email:           s.email,
      phone_number:    s.phone_number,
      subscribe_start: s.subscribe_start,
      subscribe_end:   s.subscribe_end,
      created_at:      s.created_at,
      updated_at:      s.updated_at,
    }
  }
}

/// `POST /api/student` body. Required fields are checked by the service so
/// that every omission is reported together.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentBody {
  #[serde(default)]
  pub student_number:  Option<String>,
  #[serde(default)]
  pub first_name:      Option<String>,
  #[serde(default)]
  pub last_name:       Option<String>,
  #[serde(with = "dates::option_date", default)]
  pub birth_date:      Option<NaiveDate>,
  #[serde(default)]
  pub email:           Option<String>,
  #[serde(default)]
  pub phone_number:    Option<String>,
  #[serde(with = "dates::option_date", default)]
  pub subscribe_start: Option<NaiveDate>,
  #[serde(with = "dates::option_date", default)]
  pub subscribe_end:   Option<NaiveDate>,
}

impl CreateStudentBody {
  pub fn into_parts(self) -> (String, StudentFields) {
    let fields = StudentFields {
      first_name:      self.first_name,
      last_name:       self.last_name,
      birth_date:      self.birth_date,
      email:           self.email,
      phone_number:    self.phone_number,
      subscribe_start: self.subscribe_start,
      subscribe_end:   self.subscribe_end,
    };
    (self.student_number.unwrap_or_default(), fields)
  }
}

/// `PUT /api/student/{studentNum}` body. Absent or `null` fields are left
/// untouched; the student number always comes from the path.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStudentBody {
  #[serde(default)]
  pub first_name:      Option<String>,
  #[serde(default)]
  pub last_name:       Option<String>,
  #[serde(with = "dates::option_date", default)]
  pub birth_date:      Option<NaiveDate>,
  #[serde(default)]
  pub email:           Option<String>,
  #[serde(default)]
  pub phone_number:    Option<String>,
  #[serde(with = "dates::option_date", default)]
  pub subscribe_start: Option<NaiveDate>,
  #[serde(with = "dates::option_date", default)]
  pub subscribe_end:   Option<NaiveDate>,
}

impl From<UpdateStudentBody> for StudentFields {
  fn from(b: UpdateStudentBody) -> Self {
    Self {
      first_name:      b.first_name,
      last_name:       b.last_name,
      birth_date:      b.birth_date,
      email:           b.email,
      phone_number:    b.phone_number,
      subscribe_start: b.subscribe_start,
      subscribe_end:   b.subscribe_end,
    }
  }
}

// ─── Accounts ────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterBody {
  #[serde(default)]
  pub login:      Option<String>,
  #[serde(default)]
  pub password:   Option<String>,
  #[serde(default)]
  pub first_name: Option<String>,
  #[serde(default)]
  pub last_name:  Option<String>,
}

impl From<RegisterBody> for Registration {
  fn from(b: RegisterBody) -> Self {
    Self {
      login:      b.login.unwrap_or_default(),
      password:   b.password.unwrap_or_default(),
      first_name: b.first_name.unwrap_or_default(),
      last_name:  b.last_name.unwrap_or_default(),
    }
  }
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginBody {
  #[serde(default)]
  pub login:    Option<String>,
  #[serde(default)]
  pub password: Option<String>,
}

/// A registered account as returned by `POST /api/register`. The password
/// hash never leaves the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDto {
  pub login:      String,
  pub first_name: String,
  pub last_name:  String,
}

impl From<roster_core::user::User> for AccountDto {
  fn from(u: roster_core::user::User) -> Self {
    Self {
      login:      u.login,
      first_name: u.first_name,
      last_name:  u.last_name,
    }
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;
  use serde_json::json;

  use super::*;

  #[test]
  fn student_dto_uses_camel_case_and_day_first_dates() {
    let at = Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap();
    let dto = StudentDto {
      student_number:  "000001".into(),
      first_name:      "Ada".into(),
      last_name:       "Lovelace".into(),
      birth_date:      NaiveDate::from_ymd_opt(2001, 12, 10).unwrap(),
      email:           None,
      phone_number:    Some("0606060606".into()),
      subscribe_start: NaiveDate::from_ymd_opt(2026, 1, 1),
      subscribe_end:   None,
      created_at:      at,
      updated_at:      at,
    };
    let value = serde_json::to_value(&dto).unwrap();
    assert_eq!(value["studentNumber"], "000001");
    assert_eq!(value["birthDate"], "10/12/2001");
    assert_eq!(value["subscribeStart"], "01/01/2026");
    assert_eq!(value["subscribeEnd"], serde_json::Value::Null);
    assert_eq!(value["createdAt"], "01/03/2026 09:30:00");
  }

  #[test]
  fn create_body_tolerates_missing_fields() {
    let body: CreateStudentBody =
      serde_json::from_value(json!({ "firstName": "Ada" })).unwrap();
    let (key, fields) = body.into_parts();
    assert_eq!(key, "");
    assert_eq!(fields.first_name.as_deref(), Some("Ada"));
    assert_eq!(fields.birth_date, None);
  }

  #[test]
  fn update_body_ignores_server_fields() {
    let body: UpdateStudentBody = serde_json::from_value(json!({
      "studentNumber": "999",
      "createdAt": "01/01/2000 00:00:00",
      "birthDate": "05/06/2007",
    }))
    .unwrap();
    let fields = StudentFields::from(body);
    assert_eq!(fields.birth_date, NaiveDate::from_ymd_opt(2007, 6, 5));
    assert_eq!(fields.first_name, None);
  }

  #[test]
  fn malformed_date_is_a_deserialisation_error() {
    let res: Result<CreateStudentBody, _> =
      serde_json::from_value(json!({ "birthDate": "2007-06-05" }));
    assert!(res.is_err());
  }
}
