//! Handlers for `/api/student` endpoints. Every route requires a bearer token.
//!
//! | Method   | Path                        | Notes                          |
//! |----------|-----------------------------|--------------------------------|
//! | `GET`    | `/api/student`              | All students                   |
//! | `POST`   | `/api/student`              | 409 if the number is taken     |
//! | `GET`    | `/api/student/{studentNum}` | 404 if not found               |
//! | `PUT`    | `/api/student/{studentNum}` | Patch, or create if missing    |
//! | `DELETE` | `/api/student/{studentNum}` | Echoes the deleted number      |

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
  response::{IntoResponse, Response},
};

use super::created;
use crate::{
  AppState, Store,
  auth::Authenticated,
  dto::{CreateStudentBody, StudentDto, UpdateStudentBody},
  error::Error,
};

/// Path of a student resource, with the number percent-encoded as a single
/// segment.
fn location(student_number: &str) -> String {
  format!("/api/student/{}", urlencoding::encode(student_number))
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /api/student`
pub async fn list<S: Store>(
  State(state): State<AppState<S>>,
  _auth: Authenticated,
) -> Result<Json<Vec<StudentDto>>, Error> {
  let students = state.students.list().await?;
  Ok(Json(students.into_iter().map(StudentDto::from).collect()))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /api/student`
pub async fn create<S: Store>(
  State(state): State<AppState<S>>,
  Authenticated(caller): Authenticated,
  payload: Result<Json<CreateStudentBody>, JsonRejection>,
) -> Result<Response, Error> {
  let Json(body) = payload?;
  let (student_number, fields) = body.into_parts();
  tracing::debug!(%caller, %student_number, "create requested");

  let student = state.students.create(&student_number, fields).await?;
  Ok(created(&location(&student.student_number), StudentDto::from(student)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /api/student/{studentNum}`
pub async fn get_one<S: Store>(
  State(state): State<AppState<S>>,
  _auth: Authenticated,
  Path(student_number): Path<String>,
) -> Result<Json<StudentDto>, Error> {
  let student = state.students.get(&student_number).await?;
  Ok(Json(student.into()))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /api/student/{studentNum}`
pub async fn update<S: Store>(
  State(state): State<AppState<S>>,
  Authenticated(caller): Authenticated,
  Path(student_number): Path<String>,
  payload: Result<Json<UpdateStudentBody>, JsonRejection>,
) -> Result<Response, Error> {
  let Json(body) = payload?;
  tracing::debug!(%caller, %student_number, "update requested");

  let outcome = state.students.upsert(&student_number, body.into()).await?;
  let dto = StudentDto::from(outcome.student);
  if outcome.created {
    Ok(created(&location(&dto.student_number), dto))
  } else {
    Ok(Json(dto).into_response())
  }
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /api/student/{studentNum}`
pub async fn delete<S: Store>(
  State(state): State<AppState<S>>,
  Authenticated(caller): Authenticated,
  Path(student_number): Path<String>,
) -> Result<String, Error> {
  tracing::debug!(%caller, %student_number, "delete requested");
  state.students.delete(&student_number).await?;
  Ok(student_number)
}
