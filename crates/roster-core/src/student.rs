//! Student, the record managed by the registry.
//!
//! A student is identified by its externally assigned student number. The
//! number never changes once the record exists; every other field may be
//! replaced through [`StudentFields`].

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::validate::{Violation, Violations};

/// A persisted student record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
  pub student_number:  String,
  pub first_name:      String,
  pub last_name:       String,
  pub birth_date:      NaiveDate,
  pub email:           Option<String>,
  pub phone_number:    Option<String>,
  pub subscribe_start: Option<NaiveDate>,
  pub subscribe_end:   Option<NaiveDate>,
  /// Server-assigned on creation; never supplied by clients.
  pub created_at:      DateTime<Utc>,
  /// Server-assigned on every write.
  pub updated_at:      DateTime<Utc>,
}

/// The client-writable fields of a [`Student`], all optional.
///
/// Used both as a creation payload and as an update patch: `None` means the
/// field was not supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentFields {
  pub first_name:      Option<String>,
  pub last_name:       Option<String>,
  pub birth_date:      Option<NaiveDate>,
  pub email:           Option<String>,
  pub phone_number:    Option<String>,
  pub subscribe_start: Option<NaiveDate>,
  pub subscribe_end:   Option<NaiveDate>,
}

impl Student {
  /// Build a brand-new student from `fields`, stamping both timestamps with
  /// `now`.
  ///
  /// Fails with every missing required field listed at once.
  pub fn assemble(
    student_number: &str,
    fields: StudentFields,
    now: DateTime<Utc>,
  ) -> Result<Self, Violations> {
    let mut missing = Violations::default();
    if student_number.trim().is_empty() {
      missing.push(Violation::new(
        "studentNumber",
        "studentNumber.required",
        "Student number is required",
      ));
    }
    missing.extend(name_violations(
      fields.first_name.as_deref(),
      fields.last_name.as_deref(),
    ));
    let first_name = fields.first_name.filter(|s| !s.trim().is_empty());
    let last_name = fields.last_name.filter(|s| !s.trim().is_empty());
    if fields.birth_date.is_none() {
      missing.push(Violation::new(
        "birthDate",
        "birthDate.required",
        "Birth date is required",
      ));
    }

    let (Some(first_name), Some(last_name), Some(birth_date)) =
      (first_name, last_name, fields.birth_date)
    else {
      return Err(missing);
    };
    if !missing.is_empty() {
      return Err(missing);
    }

    Ok(Self {
      student_number: student_number.to_owned(),
      first_name,
      last_name,
      birth_date,
      email: fields.email,
      phone_number: fields.phone_number,
      subscribe_start: fields.subscribe_start,
      subscribe_end: fields.subscribe_end,
      created_at: now,
      updated_at: now,
    })
  }

  /// Required-field violations of an already built record. Empty unless a
  /// patch blanked out a name.
  pub fn missing_fields(&self) -> Violations {
    name_violations(Some(&self.first_name), Some(&self.last_name))
  }

  /// Overwrite every field that is present in `patch`.
  ///
  /// The student number and creation timestamp are never touched.
  pub fn merge(&mut self, patch: StudentFields) {
    if let Some(v) = patch.first_name {
      self.first_name = v;
    }
    if let Some(v) = patch.last_name {
      self.last_name = v;
    }
    if let Some(v) = patch.birth_date {
      self.birth_date = v;
    }
    if let Some(v) = patch.email {
      self.email = Some(v);
    }
    if let Some(v) = patch.phone_number {
      self.phone_number = Some(v);
    }
    if let Some(v) = patch.subscribe_start {
      self.subscribe_start = Some(v);
    }
    if let Some(v) = patch.subscribe_end {
      self.subscribe_end = Some(v);
    }
  }
}

/// Both names are required and must not be blank.
fn name_violations(first_name: Option<&str>, last_name: Option<&str>) -> Violations {
  let mut errors = Violations::default();
  if first_name.is_none_or(|s| s.trim().is_empty()) {
    errors.push(Violation::new(
      "firstName",
      "firstName.required",
      "First name is required",
    ));
  }
  if last_name.is_none_or(|s| s.trim().is_empty()) {
    errors.push(Violation::new(
      "lastName",
      "lastName.required",
      "Last name is required",
    ));
  }
  errors
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  fn now() -> DateTime<Utc> { Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap() }

  fn fields() -> StudentFields {
    StudentFields {
      first_name: Some("Jean".into()),
      last_name: Some("Dupont".into()),
      birth_date: NaiveDate::from_ymd_opt(2000, 2, 1),
      email: Some("a@b.com".into()),
      ..Default::default()
    }
  }

  #[test]
  fn assemble_stamps_both_timestamps() {
    let s = Student::assemble("000001", fields(), now()).unwrap();
    assert_eq!(s.student_number, "000001");
    assert_eq!(s.created_at, now());
    assert_eq!(s.updated_at, now());
    assert_eq!(s.phone_number, None);
  }

  #[test]
  fn assemble_reports_every_missing_field() {
    let err = Student::assemble("  ", StudentFields::default(), now()).unwrap_err();
    let rules: Vec<_> = err.iter().map(|v| v.rule).collect();
    assert_eq!(
      rules,
      [
        "studentNumber.required",
        "firstName.required",
        "lastName.required",
        "birthDate.required",
      ]
    );
  }

  #[test]
  fn blank_name_counts_as_missing() {
    let mut f = fields();
    f.last_name = Some("   ".into());
    let err = Student::assemble("000001", f, now()).unwrap_err();
    assert_eq!(err.len(), 1);
    assert_eq!(err.iter().next().unwrap().field, "lastName");
  }

  #[test]
  fn merge_can_blank_a_name_and_missing_fields_notices() {
    let mut s = Student::assemble("000001", fields(), now()).unwrap();
    assert!(s.missing_fields().is_empty());

    s.merge(StudentFields {
      first_name: Some(String::new()),
      last_name: Some("   ".into()),
      ..Default::default()
    });
    let rules: Vec<_> = s.missing_fields().iter().map(|v| v.rule).collect();
    assert_eq!(rules, ["firstName.required", "lastName.required"]);
  }

  #[test]
  fn merge_only_overwrites_present_fields() {
    let mut s = Student::assemble("000001", fields(), now()).unwrap();
    s.merge(StudentFields {
      email: Some("new@b.com".into()),
      ..Default::default()
    });
    assert_eq!(s.first_name, "Jean");
    assert_eq!(s.email.as_deref(), Some("new@b.com"));
    assert_eq!(s.student_number, "000001");
  }
}
