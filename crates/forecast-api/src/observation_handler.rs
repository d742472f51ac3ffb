use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use forecast_domain::{CreateObservationInput, DomainError};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::server::AppState;

/// Characters escaped in the Location header locator. Control bytes are
/// invalid in a header value outright; the rest would mangle the path.
/// `/` stays raw: it separates the location and date segments.
const LOCATOR: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`');

/// Inbound payload for `POST /weatherforecast`.
/// Unparsable dates or temperatures are rejected by serde before the
/// handler body runs, which counts as a validation failure (400).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateObservationRequest {
    pub location: String,
    pub observed_date: NaiveDate,
    pub temperature_c: i32,
    pub summary: Option<String>,
}

/// Echo of the stored record, returned with the 201.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationResponse {
    pub location: String,
    pub observed_date: NaiveDate,
    pub temperature_c: i32,
    pub summary: Option<String>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

pub async fn create_observation(
    State(state): State<AppState>,
    Json(request): Json<CreateObservationRequest>,
) -> Response {
    let input = CreateObservationInput {
        location: request.location.clone(),
        observed_date: request.observed_date,
        temperature_c: request.temperature_c,
        summary: request.summary.clone(),
    };

    match state.ingestion_service.ingest(input).await {
        Ok(key) => {
            let location_header = format!(
                "/weatherforecast/{}",
                utf8_percent_encode(&key.resource_path(), LOCATOR)
            );
            let body = ObservationResponse {
                location: request.location,
                observed_date: request.observed_date,
                temperature_c: request.temperature_c,
                summary: request.summary,
            };
            (
                StatusCode::CREATED,
                [(header::LOCATION, location_header)],
                Json(body),
            )
                .into_response()
        }
        Err(error) => domain_error_response(error),
    }
}

/// Map domain failures to distinct status categories so callers can tell
/// "nothing happened" apart from "the record exists but the announcement
/// was lost".
fn domain_error_response(error: DomainError) -> Response {
    let (status, message) = match &error {
        DomainError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        DomainError::Persistence(_) => {
            warn!(error = %error, "observation write failed");
            (StatusCode::SERVICE_UNAVAILABLE, error.to_string())
        }
        DomainError::Propagation(_) => {
            warn!(error = %error, "observation stored but announcement failed");
            (StatusCode::BAD_GATEWAY, error.to_string())
        }
    };

    (status, Json(ErrorBody { error: message })).into_response()
}
