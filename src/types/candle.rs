use chrono::DateTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Raw candle record in exchange-native field order:
/// `[time, open, close, high, low, volume, turnover]`, every field a
/// decimal encoded as text. Ordering across a batch is not guaranteed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCandle(pub Vec<String>);

impl RawCandle {
    /// Build a raw candle from typed values (exchange field order).
    pub fn new(time: i64, open: f64, close: f64, high: f64, low: f64, volume: f64) -> Self {
        RawCandle(vec![
            time.to_string(),
            open.to_string(),
            close.to_string(),
            high.to_string(),
            low.to_string(),
            volume.to_string(),
        ])
    }

    pub fn field(&self, idx: usize) -> Option<&str> {
        self.0.get(idx).map(String::as_str)
    }
}

/// Position of each OHLCV field in a raw exchange candle.
pub mod raw_field {
    pub const TIME: usize = 0;
    pub const OPEN: usize = 1;
    pub const CLOSE: usize = 2;
    pub const HIGH: usize = 3;
    pub const LOW: usize = 4;
    pub const VOLUME: usize = 5;
}

/// Normalized OHLCV candle with a timezone-aware timestamp.
///
/// Series of these are strictly non-decreasing by timestamp.
#[derive(Debug, Clone, Serialize)]
pub struct Candle {
    pub time: DateTime<Tz>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    /// Whether the candle closed at or above its open.
    pub fn is_bullish(&self) -> bool {
        self.close >= self.open
    }
}
