//! Business rules for student records.
//!
//! Every rule is evaluated on every call; nothing short-circuits. The caller
//! gets back the complete list of violations and decides how to report it.

use std::{fmt, sync::LazyLock};

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;

use crate::student::Student;

/// Longest accepted first or last name, in characters.
pub const MAX_NAME_LEN: usize = 120;

static PHONE_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^[+]?[0-9\s]+$").unwrap());

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^[a-zA-Z0-9_!#$%&'*+/=?`{|}~^.-]+@[a-zA-Z0-9.-]+$").unwrap()
});

// ─── Violations ──────────────────────────────────────────────────────────────

/// A single rejected field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Violation {
  /// Client-facing (camelCase) field name.
  pub field:   &'static str,
  /// Stable rule identifier, e.g. `firstName.toolong`.
  pub rule:    &'static str,
  pub message: &'static str,
}

impl Violation {
  pub const fn new(
    field: &'static str,
    rule: &'static str,
    message: &'static str,
  ) -> Self {
    Self { field, rule, message }
  }
}

/// An ordered collection of [`Violation`]s. Empty means valid.
///
/// Displays as the messages joined with `". "`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Violations(Vec<Violation>);

impl Violations {
  pub fn push(&mut self, v: Violation) { self.0.push(v); }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  pub fn len(&self) -> usize { self.0.len() }

  pub fn iter(&self) -> impl Iterator<Item = &Violation> { self.0.iter() }
}

impl Extend<Violation> for Violations {
  fn extend<I: IntoIterator<Item = Violation>>(&mut self, iter: I) {
    self.0.extend(iter);
  }
}

impl IntoIterator for Violations {
  type Item = Violation;
  type IntoIter = std::vec::IntoIter<Violation>;

  fn into_iter(self) -> Self::IntoIter { self.0.into_iter() }
}

impl fmt::Display for Violations {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, v) in self.0.iter().enumerate() {
      if i > 0 {
        f.write_str(". ")?;
      }
      f.write_str(v.message)?;
    }
    Ok(())
  }
}

// ─── Rules ───────────────────────────────────────────────────────────────────

/// Check `student` against every rule, as of `today`.
pub fn validate(student: &Student, today: NaiveDate) -> Violations {
  let mut errors = Violations::default();

  if student.first_name.chars().count() > MAX_NAME_LEN {
    errors.push(Violation::new(
      "firstName",
      "firstName.toolong",
      "First name is too long",
    ));
  }
  if student.last_name.chars().count() > MAX_NAME_LEN {
    errors.push(Violation::new(
      "lastName",
      "lastName.toolong",
      "Last name is too long",
    ));
  }
  if student.birth_date > today {
    errors.push(Violation::new(
      "birthDate",
      "birthDate.impossible",
      "Student isn't born yet",
    ));
  }
  if let Some(phone) = student.phone_number.as_deref()
    && !phone.trim().is_empty()
    && !PHONE_RE.is_match(phone)
  {
    errors.push(Violation::new(
      "phoneNumber",
      "phone.incorrect",
      "Phone number is incorrect",
    ));
  }
  if let Some(email) = student.email.as_deref()
    && !email.is_empty()
    && !EMAIL_RE.is_match(email)
  {
    errors.push(Violation::new("email", "email.incorrect", "Email is incorrect"));
  }
  if let (Some(start), Some(end)) = (student.subscribe_start, student.subscribe_end)
    && start > end
  {
    errors.push(Violation::new(
      "subscribeEnd",
      "subscribeEnd.impossible",
      "Subscribe can't end before it starts",
    ));
  }

  errors
}

#[cfg(test)]
mod tests {
  use chrono::{TimeZone, Utc};

  use super::*;

  fn today() -> NaiveDate { NaiveDate::from_ymd_opt(2026, 3, 1).unwrap() }

  fn student() -> Student {
    let at = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();
    Student {
      student_number:  "000001".into(),
      first_name:      "Testname".into(),
      last_name:       "Testlastname".into(),
      birth_date:      NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
      email:           Some("testemail@hotmail.com".into()),
      phone_number:    Some("0606060606".into()),
      subscribe_start: NaiveDate::from_ymd_opt(2026, 1, 1),
      subscribe_end:   NaiveDate::from_ymd_opt(2030, 1, 1),
      created_at:      at,
      updated_at:      at,
    }
  }

  fn rules(v: &Violations) -> Vec<&'static str> { v.iter().map(|v| v.rule).collect() }

  #[test]
  fn valid_student_has_no_violations() {
    assert!(validate(&student(), today()).is_empty());
  }

  #[test]
  fn optional_fields_may_be_absent_or_empty() {
    let mut s = student();
    s.email = Some(String::new());
    s.phone_number = Some("   ".into());
    s.subscribe_start = None;
    assert!(validate(&s, today()).is_empty());

    s.email = None;
    s.phone_number = None;
    s.subscribe_end = None;
    assert!(validate(&s, today()).is_empty());
  }

  #[test]
  fn name_length_limit_is_inclusive() {
    let mut s = student();
    s.first_name = "A".repeat(MAX_NAME_LEN);
    s.last_name = "é".repeat(MAX_NAME_LEN);
    assert!(validate(&s, today()).is_empty());
  }

  #[test]
  fn first_name_too_long_is_the_only_violation() {
    let mut s = student();
    s.first_name = "A".repeat(121);
    s.last_name = "B".into();
    s.birth_date = today().pred_opt().unwrap();
    let v = validate(&s, today());
    assert_eq!(rules(&v), ["firstName.toolong"]);
    assert_eq!(v.iter().next().unwrap().field, "firstName");
  }

  #[test]
  fn last_name_too_long() {
    let mut s = student();
    s.last_name = "a".repeat(150);
    assert_eq!(rules(&validate(&s, today())), ["lastName.toolong"]);
  }

  #[test]
  fn birth_date_today_is_fine_tomorrow_is_not() {
    let mut s = student();
    s.birth_date = today();
    assert!(validate(&s, today()).is_empty());
    s.birth_date = today().succ_opt().unwrap();
    assert_eq!(rules(&validate(&s, today())), ["birthDate.impossible"]);
  }

  #[test]
  fn phone_number_shapes() {
    let mut s = student();
    for ok in ["+33 6 06 06 06 06", "0606060606", "+1234"] {
      s.phone_number = Some(ok.into());
      assert!(validate(&s, today()).is_empty(), "{ok}");
    }
    for bad in ["abcd", "06-06-06", "++33", "33+"] {
      s.phone_number = Some(bad.into());
      assert_eq!(rules(&validate(&s, today())), ["phone.incorrect"], "{bad}");
    }
  }

  #[test]
  fn email_shapes() {
    let mut s = student();
    for ok in ["a@b.com", "first.last+tag@sub.example.org", "x_y@localhost"] {
      s.email = Some(ok.into());
      assert!(validate(&s, today()).is_empty(), "{ok}");
    }
    for bad in ["not.an.email", "a@b@c", "@b.com", "a@", "a b@c.com"] {
      s.email = Some(bad.into());
      assert_eq!(rules(&validate(&s, today())), ["email.incorrect"], "{bad}");
    }
  }

  #[test]
  fn subscription_window_must_not_be_reversed() {
    let mut s = student();
    s.subscribe_start = NaiveDate::from_ymd_opt(4000, 1, 1);
    assert_eq!(rules(&validate(&s, today())), ["subscribeEnd.impossible"]);

    s.subscribe_start = s.subscribe_end;
    assert!(validate(&s, today()).is_empty());
  }

  #[test]
  fn every_violation_is_collected() {
    let mut s = student();
    s.first_name = "a".repeat(121);
    s.last_name = "b".repeat(121);
    s.birth_date = NaiveDate::from_ymd_opt(4000, 1, 1).unwrap();
    s.phone_number = Some("abcd".into());
    s.email = Some("nope".into());
    s.subscribe_start = NaiveDate::from_ymd_opt(4000, 1, 1);

    let v = validate(&s, today());
    assert_eq!(
      rules(&v),
      [
        "firstName.toolong",
        "lastName.toolong",
        "birthDate.impossible",
        "phone.incorrect",
        "email.incorrect",
        "subscribeEnd.impossible",
      ]
    );
  }

  #[test]
  fn display_joins_messages() {
    let mut s = student();
    s.phone_number = Some("abcd".into());
    s.email = Some("nope".into());
    assert_eq!(
      validate(&s, today()).to_string(),
      "Phone number is incorrect. Email is incorrect"
    );
  }
}
