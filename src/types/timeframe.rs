use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Candle timeframe supported by the exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "1min")]
    OneMinute,
    #[serde(rename = "3min")]
    ThreeMinutes,
    #[serde(rename = "5min")]
    FiveMinutes,
    #[serde(rename = "15min")]
    FifteenMinutes,
    #[serde(rename = "30min")]
    ThirtyMinutes,
    #[serde(rename = "1hour")]
    OneHour,
    #[serde(rename = "2hour")]
    TwoHours,
    #[serde(rename = "4hour")]
    FourHours,
    #[serde(rename = "6hour")]
    SixHours,
    #[serde(rename = "8hour")]
    EightHours,
    #[serde(rename = "12hour")]
    TwelveHours,
    #[serde(rename = "1day")]
    OneDay,
    #[serde(rename = "1week")]
    OneWeek,
}

impl Timeframe {
    /// All supported timeframes, in ascending duration order.
    pub const ALL: [Timeframe; 13] = [
        Timeframe::OneMinute,
        Timeframe::ThreeMinutes,
        Timeframe::FiveMinutes,
        Timeframe::FifteenMinutes,
        Timeframe::ThirtyMinutes,
        Timeframe::OneHour,
        Timeframe::TwoHours,
        Timeframe::FourHours,
        Timeframe::SixHours,
        Timeframe::EightHours,
        Timeframe::TwelveHours,
        Timeframe::OneDay,
        Timeframe::OneWeek,
    ];

    /// Parse an exchange granularity token.
    pub fn from_token(s: &str) -> Option<Self> {
        match s {
            "1min" => Some(Timeframe::OneMinute),
            "3min" => Some(Timeframe::ThreeMinutes),
            "5min" => Some(Timeframe::FiveMinutes),
            "15min" => Some(Timeframe::FifteenMinutes),
            "30min" => Some(Timeframe::ThirtyMinutes),
            "1hour" => Some(Timeframe::OneHour),
            "2hour" => Some(Timeframe::TwoHours),
            "4hour" => Some(Timeframe::FourHours),
            "6hour" => Some(Timeframe::SixHours),
            "8hour" => Some(Timeframe::EightHours),
            "12hour" => Some(Timeframe::TwelveHours),
            "1day" => Some(Timeframe::OneDay),
            "1week" => Some(Timeframe::OneWeek),
            _ => None,
        }
    }

    /// The exchange granularity token for this timeframe.
    pub fn token(&self) -> &'static str {
        match self {
            Timeframe::OneMinute => "1min",
            Timeframe::ThreeMinutes => "3min",
            Timeframe::FiveMinutes => "5min",
            Timeframe::FifteenMinutes => "15min",
            Timeframe::ThirtyMinutes => "30min",
            Timeframe::OneHour => "1hour",
            Timeframe::TwoHours => "2hour",
            Timeframe::FourHours => "4hour",
            Timeframe::SixHours => "6hour",
            Timeframe::EightHours => "8hour",
            Timeframe::TwelveHours => "12hour",
            Timeframe::OneDay => "1day",
            Timeframe::OneWeek => "1week",
        }
    }

    /// Candle bucket duration in seconds.
    pub fn seconds(&self) -> i64 {
        match self {
            Timeframe::OneMinute => 60,
            Timeframe::ThreeMinutes => 180,
            Timeframe::FiveMinutes => 300,
            Timeframe::FifteenMinutes => 900,
            Timeframe::ThirtyMinutes => 1800,
            Timeframe::OneHour => 3600,
            Timeframe::TwoHours => 7200,
            Timeframe::FourHours => 14400,
            Timeframe::SixHours => 21600,
            Timeframe::EightHours => 28800,
            Timeframe::TwelveHours => 43200,
            Timeframe::OneDay => 86400,
            Timeframe::OneWeek => 604800,
        }
    }

    /// Fetch window for `limit` candles ending at `end`, as epoch seconds.
    pub fn window(&self, limit: usize, end: DateTime<Utc>) -> (i64, i64) {
        let end_at = end.timestamp();
        let start_at = end_at - self.seconds() * limit as i64;
        (start_at, end_at)
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}
