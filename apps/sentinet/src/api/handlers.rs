//! # API Endpoint Handlers
//!
//! This module implements the actual HTTP endpoint handlers.

use super::{
    AppState,
    types::{ConfigResponse, ErrorResponse, HealthResponse, NetworkRequest},
};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sentinet_core::{NetworkSelection, RenderPayload, RequestTracker, SentinetError, Ticket};
use std::sync::Arc;
use tokio::sync::Mutex;

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse::ok(state.records.len()))
}

// =============================================================================
// CONFIG HANDLER
// =============================================================================

/// Keyword lists and layout settings.
pub async fn config_handler(State(state): State<AppState>) -> impl IntoResponse {
    let keywords = state.engine.keywords();
    Json(ConfigResponse {
        energy: keywords.energy().as_slice().to_vec(),
        positive: keywords.positive().as_slice().to_vec(),
        negative: keywords.negative().as_slice().to_vec(),
        layout: *state.engine.layout_config(),
    })
}

// =============================================================================
// NETWORK HANDLER
// =============================================================================

/// Compute the network for a filter selection.
///
/// The computation runs on the blocking pool. If a newer request for the same
/// selection starts meanwhile, this one answers `409 Conflict`.
pub async fn network_handler(
    State(state): State<AppState>,
    Json(request): Json<NetworkRequest>,
) -> Response {
    let selection = request.selection();
    let ticket = state.tracker.lock().await.begin(selection.clone());

    let engine = Arc::clone(&state.engine);
    let records = Arc::clone(&state.records);
    let computed =
        tokio::task::spawn_blocking(move || engine.render(&records, &selection)).await;

    match computed {
        Ok(result) => settle(&state.tracker, ticket, result).await,
        Err(e) => {
            state.tracker.lock().await.abandon(ticket);
            tracing::error!("network computation aborted: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "computation aborted")
        }
    }
}

/// Answer a finished computation, or `409 Conflict` if a newer request for
/// the same selection started after it.
async fn settle(
    tracker: &Mutex<RequestTracker<NetworkSelection>>,
    ticket: Ticket<NetworkSelection>,
    result: Result<RenderPayload, SentinetError>,
) -> Response {
    let Some(result) = tracker.lock().await.finish(ticket, result) else {
        return error_response(
            StatusCode::CONFLICT,
            "superseded by a newer request for the same selection",
        );
    };

    match result {
        Ok(payload) => (StatusCode::OK, Json(payload)).into_response(),
        Err(SentinetError::InvalidInput(message)) => {
            error_response(StatusCode::BAD_REQUEST, message)
        }
        Err(e) => {
            tracing::error!("network build failed: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorResponse::new(message))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use sentinet_core::{EnergySelection, NetworkEngine, SentimentSelection, TextRecord};

    fn render(selection: &NetworkSelection) -> Result<RenderPayload, SentinetError> {
        let records = vec![TextRecord::new("solar growth", "Spain").with_sentiment(0.4)];
        NetworkEngine::default().render(&records, selection)
    }

    async fn error_body(response: Response) -> ErrorResponse {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        serde_json::from_slice(&bytes).expect("error json")
    }

    #[tokio::test]
    async fn superseded_request_is_conflict() {
        let tracker = Mutex::new(RequestTracker::new());
        let selection = NetworkSelection::all();
        let older = tracker.lock().await.begin(selection.clone());
        let newer = tracker.lock().await.begin(selection.clone());

        let response = settle(&tracker, older, render(&selection)).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert!(error_body(response).await.error.contains("superseded"));

        let response = settle(&tracker, newer, render(&selection)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(tracker.lock().await.in_flight(), 0);
    }

    #[tokio::test]
    async fn other_selection_is_not_superseded() {
        let tracker = Mutex::new(RequestTracker::new());
        let all = NetworkSelection::all();
        let positive = NetworkSelection::new(EnergySelection::All, SentimentSelection::Positive);
        let ticket = tracker.lock().await.begin(all.clone());
        let _other = tracker.lock().await.begin(positive);

        let response = settle(&tracker, ticket, render(&all)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(tracker.lock().await.in_flight(), 1);
    }

    #[tokio::test]
    async fn invalid_selection_is_bad_request() {
        let tracker = Mutex::new(RequestTracker::new());
        let selection = NetworkSelection::new(
            EnergySelection::Only(vec!["nuclear".to_string()]),
            SentimentSelection::Both,
        );
        let ticket = tracker.lock().await.begin(selection.clone());

        let response = settle(&tracker, ticket, render(&selection)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(error_body(response).await.error.contains("nuclear"));
    }
}
