use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Pipeline error types. Every failure is local to one request and maps
/// to one fixed user-visible message.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("unrecognized timeframe token: {0}")]
    InvalidTimeframe(String),

    #[error("insufficient data: {count} candles fetched, {min} required")]
    InsufficientData { count: usize, min: usize },

    #[error("malformed candle: {0}")]
    MalformedCandle(String),

    #[error("chart render failed: {0}")]
    Render(String),

    #[error("analysis service returned status {status}")]
    AnalysisService { status: u16 },

    #[error("not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),

    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PipelineError {
    /// The fixed end-user message for this failure. One distinct message
    /// per failure kind; the raw error detail only goes to logs.
    pub fn user_message(&self) -> String {
        match self {
            PipelineError::InvalidTimeframe(_) => "❌ Interval tidak valid.".to_string(),
            PipelineError::InsufficientData { .. } => "❌ Data terlalu sedikit.".to_string(),
            PipelineError::MalformedCandle(_) => "❌ Data candle tidak valid.".to_string(),
            PipelineError::Render(_) => "❌ Gagal membuat chart.".to_string(),
            PipelineError::AnalysisService { status } => {
                format!("❌ Gagal menganalisis gambar ({status})")
            }
            PipelineError::NotFound(_) => "❌ Tidak ditemukan.".to_string(),
            // Timeouts surface here and are treated like a service failure.
            PipelineError::Reqwest(_) => "❌ Gagal menghubungi layanan.".to_string(),
            PipelineError::SerdeJson(_) | PipelineError::Other(_) => {
                "❌ Terjadi kesalahan internal.".to_string()
            }
        }
    }
}

impl IntoResponse for PipelineError {
    fn into_response(self) -> Response {
        let status = match &self {
            PipelineError::InvalidTimeframe(_) => StatusCode::BAD_REQUEST,
            PipelineError::InsufficientData { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            PipelineError::MalformedCandle(_) => StatusCode::BAD_GATEWAY,
            PipelineError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
            PipelineError::AnalysisService { .. } => StatusCode::BAD_GATEWAY,
            PipelineError::NotFound(_) => StatusCode::NOT_FOUND,
            PipelineError::Reqwest(_) => StatusCode::BAD_GATEWAY,
            PipelineError::SerdeJson(_) => StatusCode::BAD_GATEWAY,
            PipelineError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.user_message(),
            "detail": self.to_string(),
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // User Message Tests
    // =========================================================================

    #[test]
    fn test_invalid_timeframe_message() {
        let err = PipelineError::InvalidTimeframe("7min".to_string());
        assert_eq!(err.user_message(), "❌ Interval tidak valid.");
    }

    #[test]
    fn test_insufficient_data_message() {
        let err = PipelineError::InsufficientData { count: 5, min: 10 };
        assert_eq!(err.user_message(), "❌ Data terlalu sedikit.");
        assert!(err.to_string().contains("5"));
        assert!(err.to_string().contains("10"));
    }

    #[test]
    fn test_analysis_service_message_embeds_status() {
        let err = PipelineError::AnalysisService { status: 500 };
        assert_eq!(err.user_message(), "❌ Gagal menganalisis gambar (500)");
    }

    #[test]
    fn test_messages_are_distinct() {
        let errors = [
            PipelineError::InvalidTimeframe("x".to_string()),
            PipelineError::InsufficientData { count: 0, min: 10 },
            PipelineError::MalformedCandle("x".to_string()),
            PipelineError::Render("x".to_string()),
            PipelineError::AnalysisService { status: 503 },
            PipelineError::NotFound("x".to_string()),
        ];

        let messages: Vec<String> = errors.iter().map(|e| e.user_message()).collect();
        for (i, a) in messages.iter().enumerate() {
            for b in messages.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
