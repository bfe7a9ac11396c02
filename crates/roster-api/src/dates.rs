//! `serde` adapters for the API's fixed date formats.
//!
//! Dates travel as `dd/MM/yyyy`, timestamps as `dd/MM/yyyy HH:mm:ss` (UTC).

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer, de};

pub const DATE_FORMAT: &str = "%d/%m/%Y";
pub const DATE_TIME_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

fn parse_date<E: de::Error>(s: &str) -> Result<NaiveDate, E> {
  NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
    .map_err(|_| E::custom(format!("invalid date {s:?}, expected dd/MM/yyyy")))
}

/// `NaiveDate` ⇄ `dd/MM/yyyy`.
pub mod date {
  use super::*;

  pub fn serialize<S: Serializer>(d: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(&d.format(DATE_FORMAT))
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDate, D::Error> {
    let s = String::deserialize(d)?;
    parse_date(&s)
  }
}

/// `Option<NaiveDate>` ⇄ `dd/MM/yyyy` or `null`. A blank string reads as
/// `None`.
pub mod option_date {
  use super::*;

  pub fn serialize<S: Serializer>(d: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
    match d {
      Some(d) => s.collect_str(&d.format(DATE_FORMAT)),
      None => s.serialize_none(),
    }
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(
    d: D,
  ) -> Result<Option<NaiveDate>, D::Error> {
    match Option::<String>::deserialize(d)? {
      Some(s) if !s.trim().is_empty() => parse_date(&s).map(Some),
      _ => Ok(None),
    }
  }
}

/// `DateTime<Utc>` ⇄ `dd/MM/yyyy HH:mm:ss`.
pub mod date_time {
  use super::*;

  pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(&dt.format(DATE_TIME_FORMAT))
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
    let s = String::deserialize(d)?;
    NaiveDateTime::parse_from_str(s.trim(), DATE_TIME_FORMAT)
      .map(|naive| naive.and_utc())
      .map_err(|_| {
        de::Error::custom(format!("invalid timestamp {s:?}, expected dd/MM/yyyy HH:mm:ss"))
      })
  }
}
