use crate::error::ApiError;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    Json,
};
use iq_core::{Sample, SharedBuffer};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Acknowledgement returned for an accepted batch.
#[derive(Debug, Serialize)]
pub struct Ack {
    pub status: &'static str,
}

/// `POST /webhook` — append a JSON array of samples to the buffer.
///
/// The body is parsed by hand rather than through the `Json` extractor so a
/// missing `Content-Type` is tolerated and every parse failure maps to the
/// same `400`.  Bodies over the router's limit are answered with a JSON `413`.
pub async fn ingest(
    State(buffer): State<SharedBuffer>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Ack>, ApiError> {
    let body = body.map_err(|rejection| {
        warn!("Rejected request body: {rejection}");
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge
        } else {
            ApiError::UnreadableBody(rejection.body_text())
        }
    })?;

    let batch: Vec<Sample> = serde_json::from_slice(&body).map_err(|e| {
        warn!("Error parsing JSON: {e}");
        ApiError::InvalidJson(e)
    })?;

    info!("Received {} IQ data points", batch.len());
    let len = buffer.append(&batch);
    debug!("Buffer holds {len}/{} samples", buffer.capacity());

    Ok(Json(Ack { status: "received" }))
}

/// `GET /api/iq-data` — current buffer contents, oldest first.
pub async fn iq_data(State(buffer): State<SharedBuffer>) -> Json<Vec<Sample>> {
    Json(buffer.snapshot())
}
