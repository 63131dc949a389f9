//! candlescope - candlestick chart analysis pipeline
//!
//! Fetches recent candle history for one trading pair, renders it as a
//! candlestick-with-volume chart, submits the image to a multimodal
//! analysis service, and converts the free-text answer into a compact
//! structured trading summary.

pub mod analysis;
pub mod api;
pub mod chart;
pub mod config;
pub mod error;
pub mod market;
pub mod pipeline;
pub mod types;

pub use analysis::{format_reply, DuplicatePolicy, SignalExtractor, FALLBACK_REPLY};
pub use config::Config;
pub use error::{PipelineError, Result};
pub use pipeline::{AnalysisOutcome, AnalysisPipeline, ArtifactStore, SeriesOutcome};
pub use types::{Candle, ChartArtifact, RawCandle, SignalField, SignalRecord, Timeframe};
