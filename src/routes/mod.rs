mod common;
mod students;

pub use common::common_routes_with_ready;
pub use students::{student_routes, STUDENTS_PATH};

use crate::state::AppState;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;

/// Full application router: operational routes plus `/estudantes`, with a request body limit.
pub fn app(state: AppState, body_limit_bytes: usize) -> Router {
    Router::new()
        .merge(common_routes_with_ready(state.clone()))
        .merge(student_routes(state))
        .layer(RequestBodyLimitLayer::new(body_limit_bytes))
}
