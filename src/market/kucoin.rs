use crate::config::Config;
use crate::error::Result;
use crate::types::{RawCandle, Timeframe};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// KuCoin kline response. `data` is a list of raw candle rows in no
/// guaranteed order.
#[derive(Debug, Deserialize)]
struct KlineResponse {
    code: String,
    data: Option<Vec<RawCandle>>,
}

/// KuCoin REST client for candle history.
///
/// A non-success response (transport status or exchange error code) is
/// reported as an empty batch: the pipeline treats it as "no data" and
/// short-circuits on the insufficient-data check.
#[derive(Clone)]
pub struct KuCoinClient {
    client: Client,
    base_url: String,
    symbol: String,
}

impl KuCoinClient {
    /// Create a new KuCoin client with the configured timeout.
    pub fn new(config: &Config) -> Self {
        let client = Client::builder()
            .user_agent(concat!("candlescope/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: config.kucoin_api_url.clone(),
            symbol: config.symbol.clone(),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Fetch up to `limit` candles for the given timeframe, ending now.
    pub async fn fetch_candles(&self, timeframe: Timeframe, limit: usize) -> Result<Vec<RawCandle>> {
        let (start_at, end_at) = timeframe.window(limit, chrono::Utc::now());
        let url = format!("{}/market/candles", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("symbol", self.symbol.as_str()),
                ("type", timeframe.token()),
                ("startAt", &start_at.to_string()),
                ("endAt", &end_at.to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            let snippet: String = text.chars().take(200).collect();
            warn!("KuCoin API returned {}: {}", status, snippet);
            return Ok(Vec::new());
        }

        let body: KlineResponse = response.json().await?;

        if body.code != "200000" {
            warn!("KuCoin API error code: {}", body.code);
            return Ok(Vec::new());
        }

        let candles = body.data.unwrap_or_default();
        debug!(
            "Fetched {} candles for {} ({})",
            candles.len(),
            self.symbol,
            timeframe.token()
        );

        Ok(candles)
    }
}
