pub mod health;
pub mod marks;
pub mod ranklist;
pub mod students;

use axum::Router;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::state::AppState;

/// Every route is served under this prefix.
pub const API_PREFIX: &str = "/studentapp/v1";

pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .merge(students::routes())
        .merge(marks::routes())
        .merge(ranklist::routes())
        .merge(health::routes());

    // Request spans and completion events at INFO so the default filter shows them
    let trace = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .nest(API_PREFIX, api)
        .layer(trace)
        .with_state(state)
}
