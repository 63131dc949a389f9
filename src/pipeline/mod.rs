//! Per-request analysis pipeline.
//!
//! One user request runs one sequential pipeline instance:
//! fetch -> normalize -> render -> analyze -> extract -> format.
//! Each stage depends on the previous stage's output; concurrent requests
//! share nothing mutable except the outbound network clients.

pub mod artifacts;
pub mod normalize;

pub use artifacts::ArtifactStore;
pub use normalize::{normalize_series, SeriesOutcome, DISPLAY_TZ};

use crate::analysis::{format_reply, GeminiClient, SignalExtractor};
use crate::chart::render_chart;
use crate::market::KuCoinClient;
use crate::config::Config;
use crate::error::{PipelineError, Result};
use crate::types::{ChartArtifact, RawCandle, Timeframe};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Candle history source.
#[allow(async_fn_in_trait)]
pub trait MarketData {
    async fn fetch_candles(&self, timeframe: Timeframe, limit: usize) -> Result<Vec<RawCandle>>;
}

/// Multimodal chart analysis service.
#[allow(async_fn_in_trait)]
pub trait ChartAnalysis {
    async fn analyze_chart(&self, artifact: &ChartArtifact, symbol: &str) -> Result<String>;
}

impl MarketData for KuCoinClient {
    async fn fetch_candles(&self, timeframe: Timeframe, limit: usize) -> Result<Vec<RawCandle>> {
        KuCoinClient::fetch_candles(self, timeframe, limit).await
    }
}

impl ChartAnalysis for GeminiClient {
    async fn analyze_chart(&self, artifact: &ChartArtifact, symbol: &str) -> Result<String> {
        GeminiClient::analyze_chart(self, artifact, symbol).await
    }
}

/// The two observable artifacts of one completed request.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub request_id: Uuid,
    pub timeframe: Timeframe,
    /// Formatted reply message for delivery.
    pub reply: String,
    /// Rendered chart, also retained in the artifact store under
    /// `request_id`.
    pub chart: Arc<ChartArtifact>,
}

/// Pipeline orchestrator. Owns the only cross-component control flow;
/// every stage failure aborts the remaining stages for that request and
/// maps to one fixed user-facing message. No retries anywhere: the user
/// re-triggers by selecting a timeframe again.
pub struct AnalysisPipeline<M, A> {
    symbol: String,
    candle_limit: usize,
    min_candles: usize,
    market: M,
    analysis: A,
    extractor: SignalExtractor,
    artifacts: Arc<ArtifactStore>,
}

impl<M: MarketData, A: ChartAnalysis> AnalysisPipeline<M, A> {
    pub fn new(config: &Config, market: M, analysis: A, artifacts: Arc<ArtifactStore>) -> Self {
        Self {
            symbol: config.symbol.clone(),
            candle_limit: config.candle_limit,
            min_candles: config.min_candles,
            market,
            analysis,
            extractor: SignalExtractor::new(),
            artifacts,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Run one full analysis for the given timeframe.
    pub async fn run(&self, timeframe: Timeframe) -> Result<AnalysisOutcome> {
        let request_id = Uuid::new_v4();
        info!(
            "Analysis request {} for {} ({})",
            request_id,
            self.symbol,
            timeframe.token()
        );

        // A failed fetch is "no data": the insufficient-data check below
        // turns it into the user-facing short-circuit.
        let raw = match self.market.fetch_candles(timeframe, self.candle_limit).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Candle fetch failed: {}", e);
                Vec::new()
            }
        };

        let series = match normalize_series(&raw, self.min_candles)? {
            SeriesOutcome::Ready(series) => series,
            SeriesOutcome::Insufficient { count, min } => {
                return Err(PipelineError::InsufficientData { count, min });
            }
        };

        let chart = Arc::new(render_chart(&series, &self.symbol, timeframe)?);
        self.artifacts.insert(request_id, chart.clone());

        let text = self.analysis.analyze_chart(&chart, &self.symbol).await?;

        let record = self.extractor.extract(&text);
        let body = format_reply(&record);
        let reply = format!(
            "📈 Hasil Analisa {} ({}):\n\n{}",
            self.symbol,
            timeframe.token(),
            body
        );

        info!(
            "Analysis request {} complete: {} fields extracted",
            request_id,
            record.len()
        );

        Ok(AnalysisOutcome {
            request_id,
            timeframe,
            reply,
            chart,
        })
    }
}

/// The production pipeline wiring: KuCoin candles, Gemini analysis.
pub type Pipeline = AnalysisPipeline<KuCoinClient, GeminiClient>;
