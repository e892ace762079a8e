mod chat;
mod meal;
mod nutrition;
mod system;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tracing::info_span;

use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let trace_layer = tower_http::trace::TraceLayer::new_for_http().make_span_with(
        |request: &axum::extract::Request| {
            let uri: String = request.uri().to_string();
            info_span!("http_request", method = ?request.method(), uri)
        },
    );

    Router::new()
        .route("/", get(system::root))
        .route("/health", get(system::health))
        .route("/analytics/popular-queries", get(system::popular_queries))
        .route("/chat", post(chat::chat))
        .route("/analyze-meal", post(meal::analyze_meal))
        .route("/nutrition/search/:food_name", get(nutrition::search))
        .route("/nutrition/categories", get(nutrition::categories))
        .route(
            "/nutrition/dishes-by-category",
            get(nutrition::dishes_by_category),
        )
        .route("/nutrition/regional/:region", get(nutrition::regional))
        .route("/nutrition/compare", post(nutrition::compare))
        .route("/nutrition/upload", post(nutrition::upload))
        .layer(trace_layer)
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}
