//! Integration tests for `SqliteStore` against an in-memory database.

use std::sync::Arc;

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use roster_core::{
  Error as CoreError,
  service::StudentService,
  store::{StudentStore, UserStore},
  student::{Student, StudentFields},
  user::User,
};

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn student(number: &str) -> Student {
  let at = Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap();
  Student {
    student_number:  number.into(),
    first_name:      "Jean".into(),
    last_name:       "Dupont".into(),
    birth_date:      NaiveDate::from_ymd_opt(2000, 2, 1).unwrap(),
    email:           Some("jean@example.com".into()),
    phone_number:    None,
    subscribe_start: NaiveDate::from_ymd_opt(2026, 1, 1),
    subscribe_end:   None,
    created_at:      at,
    updated_at:      at,
  }
}

// ─── Students ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_and_find_student() {
  let s = store().await;
  let inserted = s.insert_student(student("000001")).await.unwrap().unwrap();

  let fetched = s.find_student("000001").await.unwrap();
  assert_eq!(fetched, Some(inserted));
}

#[tokio::test]
async fn find_missing_student_returns_none() {
  let s = store().await;
  assert!(s.find_student("nope").await.unwrap().is_none());
}

#[tokio::test]
async fn list_students_in_insertion_order() {
  let s = store().await;
  for n in ["000003", "000001", "000002"] {
    s.insert_student(student(n)).await.unwrap();
  }

  let all = s.list_students().await.unwrap();
  let numbers: Vec<_> = all.iter().map(|s| s.student_number.as_str()).collect();
  assert_eq!(numbers, ["000003", "000001", "000002"]);
}

#[tokio::test]
async fn duplicate_student_number_is_rejected_by_the_schema() {
  let s = store().await;
  s.insert_student(student("000001")).await.unwrap();

  let mut again = student("000001");
  again.first_name = "Other".into();
  assert_eq!(s.insert_student(again).await.unwrap(), None);

  let all = s.list_students().await.unwrap();
  assert_eq!(all.len(), 1);
  assert_eq!(all[0].first_name, "Jean");
}

#[tokio::test]
async fn racing_creates_of_one_key_yield_one_conflict() {
  let svc = StudentService::new(Arc::new(store().await));
  let fields = || StudentFields {
    first_name: Some("Jean".into()),
    last_name:  Some("Dupont".into()),
    birth_date: NaiveDate::from_ymd_opt(2000, 2, 1),
    ..Default::default()
  };

  let (a, b) = tokio::join!(svc.create("000001", fields()), svc.create("000001", fields()));
  let outcomes = [a, b];
  assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
  assert!(
    outcomes
      .iter()
      .any(|r| matches!(r, Err(CoreError::StudentExists(n)) if n == "000001")),
    "{outcomes:?}"
  );
  assert_eq!(svc.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn update_replaces_fields_but_keeps_created_at() {
  let s = store().await;
  let original = s.insert_student(student("000001")).await.unwrap().unwrap();

  let mut changed = original.clone();
  changed.first_name = "Jeanne".into();
  changed.phone_number = Some("+33 6 06 06 06 06".into());
  changed.subscribe_end = NaiveDate::from_ymd_opt(2030, 1, 1);
  changed.updated_at = original.updated_at + Duration::minutes(5);
  changed.created_at = original.created_at + Duration::days(1);
  s.update_student(changed.clone()).await.unwrap();

  let fetched = s.find_student("000001").await.unwrap().unwrap();
  assert_eq!(fetched.first_name, "Jeanne");
  assert_eq!(fetched.phone_number, changed.phone_number);
  assert_eq!(fetched.subscribe_end, changed.subscribe_end);
  assert_eq!(fetched.updated_at, changed.updated_at);
  assert_eq!(fetched.created_at, original.created_at);
}

#[tokio::test]
async fn update_missing_student_errors() {
  let s = store().await;
  let err = s.update_student(student("000009")).await.unwrap_err();
  assert!(matches!(err, Error::StudentMissing(ref n) if n == "000009"));
}

#[tokio::test]
async fn delete_reports_whether_a_row_went_away() {
  let s = store().await;
  s.insert_student(student("000001")).await.unwrap();

  assert!(s.delete_student("000001").await.unwrap());
  assert!(!s.delete_student("000001").await.unwrap());
  assert!(s.find_student("000001").await.unwrap().is_none());
}

// ─── Users ───────────────────────────────────────────────────────────────────

fn user(login: &str) -> User {
  User {
    login:         login.into(),
    password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".into(),
    first_name:    "Alice".into(),
    last_name:     "Liddell".into(),
    created_at:    Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
  }
}

#[tokio::test]
async fn insert_and_find_user() {
  let s = store().await;
  let inserted = s.insert_user(user("alice")).await.unwrap().unwrap();
  assert_eq!(s.find_user("alice").await.unwrap(), Some(inserted));
  assert!(s.find_user("bob").await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_login_is_rejected_by_the_schema() {
  let s = store().await;
  s.insert_user(user("alice")).await.unwrap();
  assert_eq!(s.insert_user(user("alice")).await.unwrap(), None);
}

#[tokio::test]
async fn file_store_persists_across_reopen() {
  let dir = std::env::temp_dir().join(format!(
    "roster-store-test-{}-{}",
    std::process::id(),
    Utc::now().timestamp_nanos_opt().unwrap_or_default()
  ));
  std::fs::create_dir_all(&dir).unwrap();
  let path = dir.join("roster.db");

  {
    let s = SqliteStore::open(&path).await.unwrap();
    s.insert_student(student("000001")).await.unwrap();
  }
  let s = SqliteStore::open(&path).await.unwrap();
  assert!(s.find_student("000001").await.unwrap().is_some());

  drop(s);
  let _ = std::fs::remove_dir_all(&dir);
}
