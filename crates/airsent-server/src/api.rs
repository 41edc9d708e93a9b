//! REST API handlers and embedded assets for airsent-server.

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use airsent_core::{
    read_reviews, submit_review, AirsentError, ChartId, ReviewSubmission, ACKNOWLEDGEMENT,
};

use crate::state::AppState;

// ─── Router ──────────────────────────────────────────────────────────────────

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/charts", get(list_charts))
        .route("/charts/{chart}", get(get_chart))
        .route("/summary", get(get_summary))
        .route("/reviews", get(list_reviews).post(create_review))
        .route("/config", get(get_server_config))
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// HTTP status for a failed submission.
pub(crate) fn status_for(error: &AirsentError) -> StatusCode {
    match error {
        AirsentError::EmptyReview => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

// ─── Handlers ────────────────────────────────────────────────────────────────

async fn list_charts() -> impl IntoResponse {
    let charts: Vec<_> = ChartId::ALL
        .iter()
        .map(|id| serde_json::json!({ "id": id, "title": id.title() }))
        .collect();
    Json(charts)
}

async fn get_chart(State(state): State<AppState>, Path(chart): Path<String>) -> impl IntoResponse {
    match chart.parse::<ChartId>() {
        Ok(id) => (
            [(header::CONTENT_TYPE, "application/json")],
            state.ctx.charts().get(id).to_json(),
        )
            .into_response(),
        Err(e) => (StatusCode::NOT_FOUND, e.to_string()).into_response(),
    }
}

async fn get_summary(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.ctx.summary().clone())
}

async fn list_reviews(State(state): State<AppState>) -> impl IntoResponse {
    match read_reviews(state.reviews.path()) {
        Ok(rows) => Json(rows).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

async fn create_review(
    State(state): State<AppState>,
    Json(submission): Json<ReviewSubmission>,
) -> impl IntoResponse {
    match submit_review(state.ctx.model(), &state.reviews, submission).await {
        Ok(row) => (
            StatusCode::CREATED,
            Json(serde_json::json!({ "review": row, "message": ACKNOWLEDGEMENT })),
        )
            .into_response(),
        Err(e) => (status_for(&e), e.to_string()).into_response(),
    }
}

async fn get_server_config(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "version": env!("CARGO_PKG_VERSION"),
        "row_limit": state.ctx.config().row_limit,
    }))
}

// ─── Static content ──────────────────────────────────────────────────────────

/// Serve the logo image loaded at startup.
pub async fn logo(State(state): State<AppState>) -> impl IntoResponse {
    let logo = state.ctx.logo();
    let mime = mime_guess::from_path(&logo.path).first_or_octet_stream();

    Response::builder()
        .header(header::CONTENT_TYPE, mime.as_ref())
        .body(Body::from(logo.bytes.clone()))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

/// Serve the embedded CSS/JS.
pub async fn serve_static(Path(path): Path<String>) -> impl IntoResponse {
    let Some(content) = Assets::get(&format!("static/{path}")) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let mime = mime_guess::from_path(&path).first_or_octet_stream();

    Response::builder()
        .header(header::CONTENT_TYPE, mime.as_ref())
        .body(Body::from(content.data.into_owned()))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

#[derive(rust_embed::Embed)]
#[folder = "assets"]
#[include = "templates/*.html"]
#[include = "static/*.css"]
#[include = "static/*.js"]
pub(crate) struct Assets;
