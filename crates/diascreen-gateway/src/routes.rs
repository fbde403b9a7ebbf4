//! HTTP routes and handlers

use axum::{
    extract::{FromRequest, Request, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};

use diascreen_core::{validate, Error, ScreeningRecord};

use crate::state::AppState;
use crate::static_page;

/// Error payload for the JSON entry point when the body carries no
/// usable feature list
const JSON_CONTRACT_ERROR: &str = "Invalid input. Please provide 'features' in JSON format.";

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(static_page::serve_index))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .route("/predict", post(predict))
        .fallback(fallback)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "feature_count": state.predictor.feature_count(),
    }))
}

async fn metrics(State(state): State<AppState>) -> String {
    state.metrics.render()
}

/// Main prediction handler.
///
/// Two request shapes share this route and keep their own policies:
/// `application/json` bodies carry a raw `features` array and skip range
/// validation; everything else is decoded as the screening form and
/// range-validated before inference.
async fn predict(State(state): State<AppState>, req: Request) -> Response {
    metrics::counter!("diascreen_requests_total").increment(1);

    // MIME type matching is case-insensitive
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_ascii_lowercase();

    if content_type.starts_with("application/json") {
        predict_json(state, req).await
    } else {
        predict_form(state, req).await
    }
}

/// The structured-form policy: decode, range-validate, classify, map the
/// verdict to its label string.
///
/// Validation and inference failures both answer HTTP 200 with an
/// `error` payload; only a body that fails form decoding is rejected at
/// the transport level.
async fn predict_form(state: AppState, req: Request) -> Response {
    let Form(record) = match Form::<ScreeningRecord>::from_request(req, &()).await {
        Ok(form) => form,
        Err(rejection) => {
            metrics::counter!("diascreen_request_errors_total", "kind" => "decode").increment(1);
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "error": rejection.body_text() })),
            )
                .into_response();
        }
    };

    let features = match validate(&record) {
        Ok(features) => features,
        Err(err) => {
            info!("screening input rejected: {}", err);
            metrics::counter!("diascreen_request_errors_total", "kind" => "validation")
                .increment(1);
            return Json(json!({ "error": err.to_string() })).into_response();
        }
    };

    match state.predictor.screen(&features) {
        Ok(verdict) => {
            debug!("screening verdict: {}", verdict.name());
            metrics::counter!("diascreen_predictions_total", "verdict" => verdict.name())
                .increment(1);
            Json(json!({ "prediction": verdict.screening_label() })).into_response()
        }
        Err(err) => {
            error!("inference failed on screening request: {}", err);
            metrics::counter!("diascreen_request_errors_total", "kind" => "inference")
                .increment(1);
            Json(json!({ "error": err.to_string() })).into_response()
        }
    }
}

/// The JSON-array policy: a `features` array reshaped into one row, no
/// range validation. A body without a usable `features` key is a 400
/// with the fixed contract message; every later failure is a 500 with
/// the underlying message.
async fn predict_json(state: AppState, req: Request) -> Response {
    let payload = match Json::<serde_json::Value>::from_request(req, &()).await {
        Ok(Json(payload)) => payload,
        Err(_) => {
            metrics::counter!("diascreen_request_errors_total", "kind" => "decode").increment(1);
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": JSON_CONTRACT_ERROR })),
            )
                .into_response();
        }
    };

    let Some(features) = payload.get("features") else {
        metrics::counter!("diascreen_request_errors_total", "kind" => "decode").increment(1);
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": JSON_CONTRACT_ERROR })),
        )
            .into_response();
    };

    let row = match feature_row(features) {
        Ok(row) => row,
        Err(err) => {
            error!("malformed feature list: {}", err);
            metrics::counter!("diascreen_request_errors_total", "kind" => "inference")
                .increment(1);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": err.to_string() })),
            )
                .into_response();
        }
    };

    match state.predictor.predict_row(&row) {
        Ok(verdict) => {
            debug!("feature row verdict: {}", verdict.name());
            metrics::counter!("diascreen_predictions_total", "verdict" => verdict.name())
                .increment(1);
            Json(json!({ "prediction": verdict.class() })).into_response()
        }
        Err(err) => {
            error!("inference failed on feature row: {}", err);
            metrics::counter!("diascreen_request_errors_total", "kind" => "inference")
                .increment(1);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": err.to_string() })),
            )
                .into_response()
        }
    }
}

/// Reshape the JSON `features` value into a single numeric row
fn feature_row(value: &serde_json::Value) -> Result<Vec<f64>, Error> {
    let items = value
        .as_array()
        .ok_or_else(|| Error::inference("'features' must be an array of numbers"))?;

    items
        .iter()
        .map(|item| {
            item.as_f64()
                .ok_or_else(|| Error::inference(format!("non-numeric feature value: {}", item)))
        })
        .collect()
}

async fn fallback() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" })))
}
