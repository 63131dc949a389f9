//! End-to-end pipeline tests with mocked external services.

use candlescope::config::Config;
use candlescope::error::{PipelineError, Result};
use candlescope::pipeline::{AnalysisPipeline, ArtifactStore, ChartAnalysis, MarketData};
use candlescope::types::{ChartArtifact, RawCandle, Timeframe};
use candlescope::FALLBACK_REPLY;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        symbol: "BTC-USDT".to_string(),
        gemini_api_key: None,
        gemini_api_url: "http://localhost/unused".to_string(),
        kucoin_api_url: "http://localhost/unused".to_string(),
        candle_limit: 200,
        min_candles: 10,
        http_timeout_secs: 5,
        max_stored_charts: 8,
    }
}

/// Raw candles with descending timestamps, so sorting is exercised.
fn raw_candles(count: usize) -> Vec<RawCandle> {
    (0..count)
        .map(|i| {
            let ts = 1_700_000_000 + (count - i) as i64 * 900;
            let base = 43000.0 + i as f64 * 12.0;
            RawCandle::new(ts, base, base + 8.0, base + 20.0, base - 15.0, 4.0 + i as f64)
        })
        .collect()
}

struct StaticMarket {
    candles: Vec<RawCandle>,
}

impl MarketData for StaticMarket {
    async fn fetch_candles(&self, _tf: Timeframe, _limit: usize) -> Result<Vec<RawCandle>> {
        Ok(self.candles.clone())
    }
}

struct FailingMarket;

impl MarketData for FailingMarket {
    async fn fetch_candles(&self, _tf: Timeframe, _limit: usize) -> Result<Vec<RawCandle>> {
        Err(PipelineError::Other(anyhow::anyhow!("connection refused")))
    }
}

struct CountingAnalyzer {
    calls: Arc<AtomicUsize>,
    reply: String,
}

impl ChartAnalysis for CountingAnalyzer {
    async fn analyze_chart(&self, artifact: &ChartArtifact, _symbol: &str) -> Result<String> {
        assert_eq!(artifact.content_type, "image/png");
        assert!(!artifact.is_empty());
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.reply.clone())
    }
}

struct FailingAnalyzer {
    status: u16,
}

impl ChartAnalysis for FailingAnalyzer {
    async fn analyze_chart(&self, _artifact: &ChartArtifact, _symbol: &str) -> Result<String> {
        Err(PipelineError::AnalysisService {
            status: self.status,
        })
    }
}

const ANALYSIS_TEXT: &str = "\
Sinyal: BUY
Entry ideal: 43100
Take Profit: 43900
Stop Loss: 42700
Pola candlestick: bullish engulfing
Kesimpulan: tren naik jangka pendek.";

#[tokio::test]
async fn test_successful_run_produces_reply_and_chart() {
    let config = test_config();
    let artifacts = ArtifactStore::new(config.max_stored_charts);
    let calls = Arc::new(AtomicUsize::new(0));

    let pipeline = AnalysisPipeline::new(
        &config,
        StaticMarket {
            candles: raw_candles(20),
        },
        CountingAnalyzer {
            calls: calls.clone(),
            reply: ANALYSIS_TEXT.to_string(),
        },
        artifacts.clone(),
    );

    let outcome = pipeline.run(Timeframe::FifteenMinutes).await.unwrap();

    assert!(outcome
        .reply
        .starts_with("📈 Hasil Analisa BTC-USDT (15min):\n\n"));
    assert!(outcome.reply.contains("🔁 Sinyal: buy"));
    assert!(outcome.reply.contains("🧠 Kesimpulan: tren naik jangka pendek."));
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // The chart is the second observable artifact, stored under the request id
    let stored = artifacts.get(&outcome.request_id).unwrap();
    assert_eq!(&stored.bytes[..4], &[0x89, b'P', b'N', b'G']);
}

#[tokio::test]
async fn test_insufficient_data_short_circuits_before_analysis() {
    let config = test_config();
    let artifacts = ArtifactStore::new(config.max_stored_charts);
    let calls = Arc::new(AtomicUsize::new(0));

    let pipeline = AnalysisPipeline::new(
        &config,
        StaticMarket {
            candles: raw_candles(5),
        },
        CountingAnalyzer {
            calls: calls.clone(),
            reply: ANALYSIS_TEXT.to_string(),
        },
        artifacts.clone(),
    );

    let err = pipeline.run(Timeframe::FifteenMinutes).await.unwrap_err();

    assert!(matches!(
        err,
        PipelineError::InsufficientData { count: 5, min: 10 }
    ));
    assert_eq!(err.user_message(), "❌ Data terlalu sedikit.");
    // No chart rendered, no analysis attempted
    assert!(artifacts.is_empty());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_fetch_failure_is_treated_as_no_data() {
    let config = test_config();
    let artifacts = ArtifactStore::new(config.max_stored_charts);

    let pipeline = AnalysisPipeline::new(
        &config,
        FailingMarket,
        FailingAnalyzer { status: 500 },
        artifacts.clone(),
    );

    let err = pipeline.run(Timeframe::OneHour).await.unwrap_err();
    assert!(matches!(
        err,
        PipelineError::InsufficientData { count: 0, .. }
    ));
    assert!(artifacts.is_empty());
}

#[tokio::test]
async fn test_malformed_candle_aborts_batch() {
    let config = test_config();
    let artifacts = ArtifactStore::new(config.max_stored_charts);
    let mut candles = raw_candles(15);
    candles[7].0[1] = "not-a-number".to_string();

    let pipeline = AnalysisPipeline::new(
        &config,
        StaticMarket { candles },
        FailingAnalyzer { status: 500 },
        artifacts.clone(),
    );

    let err = pipeline.run(Timeframe::OneHour).await.unwrap_err();
    assert!(matches!(err, PipelineError::MalformedCandle(_)));
    assert!(artifacts.is_empty());
}

#[tokio::test]
async fn test_analysis_service_failure_carries_status() {
    let config = test_config();
    let artifacts = ArtifactStore::new(config.max_stored_charts);

    let pipeline = AnalysisPipeline::new(
        &config,
        StaticMarket {
            candles: raw_candles(20),
        },
        FailingAnalyzer { status: 500 },
        artifacts.clone(),
    );

    let err = pipeline.run(Timeframe::FourHours).await.unwrap_err();

    assert!(matches!(
        err,
        PipelineError::AnalysisService { status: 500 }
    ));
    assert_eq!(err.user_message(), "❌ Gagal menganalisis gambar (500)");
    // The chart was already rendered and stored before the analysis call
    assert_eq!(artifacts.len(), 1);
}

#[tokio::test]
async fn test_unreadable_analysis_text_yields_fallback_reply() {
    let config = test_config();
    let artifacts = ArtifactStore::new(config.max_stored_charts);

    let pipeline = AnalysisPipeline::new(
        &config,
        StaticMarket {
            candles: raw_candles(20),
        },
        CountingAnalyzer {
            calls: Arc::new(AtomicUsize::new(0)),
            reply: "maaf, saya tidak bisa membaca chart ini".to_string(),
        },
        artifacts.clone(),
    );

    let outcome = pipeline.run(Timeframe::OneDay).await.unwrap();
    assert!(outcome.reply.ends_with(FALLBACK_REPLY));
}

#[tokio::test]
async fn test_concurrent_requests_get_distinct_artifacts() {
    let config = test_config();
    let artifacts = ArtifactStore::new(config.max_stored_charts);

    let pipeline = Arc::new(AnalysisPipeline::new(
        &config,
        StaticMarket {
            candles: raw_candles(20),
        },
        CountingAnalyzer {
            calls: Arc::new(AtomicUsize::new(0)),
            reply: ANALYSIS_TEXT.to_string(),
        },
        artifacts.clone(),
    ));

    let (a, b) = tokio::join!(
        pipeline.run(Timeframe::FiveMinutes),
        pipeline.run(Timeframe::FiveMinutes)
    );
    let (a, b) = (a.unwrap(), b.unwrap());

    assert_ne!(a.request_id, b.request_id);
    assert!(artifacts.get(&a.request_id).is_some());
    assert!(artifacts.get(&b.request_id).is_some());
    assert_eq!(artifacts.len(), 2);
}
