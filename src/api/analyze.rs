use crate::api::AppState;
use crate::error::{PipelineError, Result};
use crate::types::Timeframe;
use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use uuid::Uuid;

/// One supported timeframe entry for menu building.
#[derive(Debug, Serialize)]
struct TimeframeEntry {
    token: &'static str,
    seconds: i64,
}

/// Completed analysis response.
#[derive(Debug, Serialize)]
struct AnalyzeResponse {
    request_id: Uuid,
    timeframe: Timeframe,
    /// Formatted reply for the conversational layer to deliver.
    message: String,
    /// Where the rendered chart can be fetched.
    chart_url: String,
}

/// GET /api/timeframes
async fn list_timeframes() -> Json<Vec<TimeframeEntry>> {
    Json(
        Timeframe::ALL
            .iter()
            .map(|tf| TimeframeEntry {
                token: tf.token(),
                seconds: tf.seconds(),
            })
            .collect(),
    )
}

/// POST /api/analyze/:timeframe
async fn analyze(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<AnalyzeResponse>> {
    let timeframe = Timeframe::from_token(&token)
        .ok_or_else(|| PipelineError::InvalidTimeframe(token.clone()))?;

    let outcome = state.pipeline.run(timeframe).await?;

    Ok(Json(AnalyzeResponse {
        request_id: outcome.request_id,
        timeframe: outcome.timeframe,
        message: outcome.reply,
        chart_url: format!("/api/charts/{}", outcome.request_id),
    }))
}

/// GET /api/charts/:id
async fn get_chart(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let request_id: Uuid = id
        .parse()
        .map_err(|_| PipelineError::NotFound(format!("chart {id}")))?;

    let artifact = state
        .artifacts
        .get(&request_id)
        .ok_or_else(|| PipelineError::NotFound(format!("chart {request_id}")))?;

    Ok((
        [(header::CONTENT_TYPE, artifact.content_type)],
        artifact.bytes.clone(),
    ))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/timeframes", get(list_timeframes))
        .route("/api/analyze/:timeframe", post(analyze))
        .route("/api/charts/:id", get(get_chart))
}
