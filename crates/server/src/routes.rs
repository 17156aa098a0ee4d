use axum::{
    routing::{get, post},
    Router,
};
use service::booking::BookingService;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

pub mod bookings;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub bookings: BookingService,
}

/// Build the full application router: liveness root, submit and list.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/", get(bookings::root).post(bookings::root))
        .route("/submit", post(bookings::submit))
        .route("/data", get(bookings::list))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx and I/O failures
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
