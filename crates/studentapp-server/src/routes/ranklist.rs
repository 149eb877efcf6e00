use axum::{extract::State, routing::get, Json, Router};

use studentapp_core::RankRecord;

use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/ranklist", get(rank_list))
}

async fn rank_list(State(state): State<AppState>) -> Result<Json<Vec<RankRecord>>, ApiError> {
    Ok(Json(state.directory.rank_list().await?))
}
