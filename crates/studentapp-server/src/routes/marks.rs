use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;

use studentapp_core::{MarksEntry, Validator};

use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/marks", post(create_marks))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMarksRequest {
    student_id: Option<Value>,
    subject: Option<Value>,
    marks: Option<Value>,
}

async fn create_marks(
    State(state): State<AppState>,
    payload: Result<Json<CreateMarksRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MarksEntry>), ApiError> {
    let Json(req) = payload?;
    let marks = Validator::validate_new_marks(
        req.student_id.as_ref(),
        req.subject.as_ref(),
        req.marks.as_ref(),
    )?;

    let entry = state.ledger.create(marks).await?;
    tracing::info!(id = entry.id, student_id = entry.student_id, "Recorded marks");
    Ok((StatusCode::CREATED, Json(entry)))
}
