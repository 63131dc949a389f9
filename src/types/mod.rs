pub mod artifact;
pub mod candle;
pub mod signal;
pub mod timeframe;

pub use artifact::ChartArtifact;
pub use candle::{raw_field, Candle, RawCandle};
pub use signal::{SignalField, SignalRecord};
pub use timeframe::Timeframe;
