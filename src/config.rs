use std::env;

const KUCOIN_API_URL: &str = "https://api.kucoin.com/api/v1";
const GEMINI_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent";

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Trading pair analyzed by the pipeline (exchange notation).
    pub symbol: String,
    /// Gemini API key for chart analysis.
    pub gemini_api_key: Option<String>,
    /// Gemini generateContent endpoint (overridable for tests).
    pub gemini_api_url: String,
    /// KuCoin REST base URL (overridable for tests).
    pub kucoin_api_url: String,
    /// Number of candles requested per analysis.
    pub candle_limit: usize,
    /// Minimum candle count for a chart to be meaningful.
    pub min_candles: usize,
    /// Timeout applied to every outbound HTTP call, in seconds.
    pub http_timeout_secs: u64,
    /// Maximum number of chart artifacts retained in memory.
    pub max_stored_charts: usize,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3001),
            symbol: env::var("SYMBOL").unwrap_or_else(|_| "BTC-USDT".to_string()),
            gemini_api_key: env::var("GEMINI_API_KEY").ok(),
            gemini_api_url: env::var("GEMINI_API_URL").unwrap_or_else(|_| GEMINI_API_URL.to_string()),
            kucoin_api_url: env::var("KUCOIN_API_URL").unwrap_or_else(|_| KUCOIN_API_URL.to_string()),
            candle_limit: env::var("CANDLE_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(200),
            min_candles: env::var("MIN_CANDLES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            http_timeout_secs: env::var("HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            max_stored_charts: env::var("MAX_STORED_CHARTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(64),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
