use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use rover_relay_shared::{
    CommandAccepted, CommandRequest, ErrorResponse, HeartbeatAck, NextCommand, RelayError,
    StatusResponse,
};
use tracing::debug;

use crate::relay::RelayService;

/// `POST /command`: queue an instruction for the rover.
///
/// A body that is missing, malformed or carries a non-string `command` is
/// treated the same as an empty command.
pub async fn enqueue(
    State(service): State<RelayService>,
    payload: Result<Json<CommandRequest>, JsonRejection>,
) -> Result<Json<CommandAccepted>, (StatusCode, Json<ErrorResponse>)> {
    let command = match payload {
        Ok(Json(request)) => request.command,
        Err(rejection) => {
            debug!("unusable command body: {}", rejection);
            None
        }
    };

    let queue_length = service
        .enqueue(command.as_deref())
        .await
        .map_err(bad_request)?;

    Ok(Json(CommandAccepted::new(queue_length)))
}

pub async fn heartbeat(State(service): State<RelayService>) -> Json<HeartbeatAck> {
    service.heartbeat().await;
    Json(HeartbeatAck::default())
}

pub async fn next_command(State(service): State<RelayService>) -> Json<NextCommand> {
    Json(service.next_command().await.into())
}

pub async fn status(State(service): State<RelayService>) -> Json<StatusResponse> {
    Json(service.status().await.into())
}

fn bad_request(err: RelayError) -> (StatusCode, Json<ErrorResponse>) {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(err.to_string())))
}
