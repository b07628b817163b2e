use axum::{routing, Router};
use tower_http::trace::TraceLayer;

use crate::relay::RelayService;

use super::relay;

pub fn app(service: RelayService) -> Router {
    Router::new()
        .route("/", routing::get(index))
        .route("/command", routing::post(relay::enqueue))
        .route("/heartbeat", routing::post(relay::heartbeat))
        .route("/next-command", routing::get(relay::next_command))
        .route("/status", routing::get(relay::status))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

pub async fn index() -> &'static str {
    "rover command relay"
}
