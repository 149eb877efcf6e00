use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use studentapp_core::{Student, StudentId, Validator};

use crate::error::ApiError;
use crate::state::AppState;

const STUDENT_NOT_FOUND: &str = "Student with this id does not exist";
const STUDENT_MISSING: &str = "The student does not exist";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/students", get(list_students))
        .route("/student", post(create_student))
        .route(
            "/student/{id}",
            get(get_student).put(update_student).delete(delete_student),
        )
}

#[derive(Deserialize)]
pub struct StudentRequest {
    name: Option<Value>,
}

#[derive(Serialize)]
struct UpdatedStudent {
    id: StudentId,
    name: String,
}

async fn list_students(State(state): State<AppState>) -> Result<Json<Vec<Student>>, ApiError> {
    let students = state.directory.list_all().await?;
    tracing::info!(count = students.len(), "Fetched students");
    Ok(Json(students))
}

async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Student>, ApiError> {
    let id = Validator::parse_student_id(&id)?;

    match state.directory.get_by_id(id).await? {
        Some(student) => {
            tracing::debug!(id, "Fetched student");
            Ok(Json(student))
        }
        None => Err(ApiError::NotFound(STUDENT_NOT_FOUND)),
    }
}

async fn create_student(
    State(state): State<AppState>,
    payload: Result<Json<StudentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Student>), ApiError> {
    let Json(req) = payload?;
    let name = Validator::validate_name(req.name.as_ref())?;

    let student = state.directory.create(&name).await?;
    tracing::info!(id = student.id, "Created student");
    Ok((StatusCode::CREATED, Json(student)))
}

async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<StudentRequest>, JsonRejection>,
) -> Result<Json<UpdatedStudent>, ApiError> {
    let id = Validator::parse_student_id(&id)?;
    let Json(req) = payload?;
    let name = Validator::validate_name(req.name.as_ref())?;

    if state.directory.get_by_id(id).await?.is_none() {
        return Err(ApiError::NotFound(STUDENT_MISSING));
    }
    if !state.directory.update_name(id, &name).await? {
        return Err(ApiError::NotFound(STUDENT_MISSING));
    }

    tracing::info!(id, "Updated student");
    Ok(Json(UpdatedStudent { id, name }))
}

async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = Validator::parse_student_id(&id)?;

    if state.directory.get_by_id(id).await?.is_none() {
        return Err(ApiError::NotFound(STUDENT_MISSING));
    }
    if !state.directory.delete(id).await? {
        return Err(ApiError::NotFound(STUDENT_MISSING));
    }

    tracing::debug!(id, "Deleted student");
    Ok(StatusCode::NO_CONTENT)
}
