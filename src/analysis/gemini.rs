use crate::config::Config;
use crate::error::{PipelineError, Result};
use crate::types::ChartArtifact;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// The fixed instruction prompt sent with every chart image.
///
/// This text is a contract with the extractor vocabulary: the requested
/// fields (signal, entry, TP/SL, pattern, conclusion) are exactly the
/// fields the extraction rules know how to classify. Changing one side
/// requires changing the other in lockstep.
pub fn analysis_prompt(symbol: &str) -> String {
    let pair = symbol.replace('-', "");
    format!(
        "Ini adalah chart {pair}. Lakukan analisa teknikal:\n\
         - Sinyal saat ini (BUY/SELL)\n\
         - Entry ideal\n\
         - Take Profit & Stop Loss yang ideal\n\
         - Pola candlestick penting\n\
         - Kesimpulan dalam 1 kalimat"
    )
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(rename = "inline_data", skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Gemini multimodal analysis client.
///
/// One attempt per request; a non-success status is classified as an
/// `AnalysisService` failure carrying the status code, and the caller
/// surfaces it without retrying.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GeminiClient {
    /// Create a new Gemini client with the configured timeout.
    pub fn new(config: &Config) -> Self {
        let client = Client::builder()
            .user_agent(concat!("candlescope/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: config.gemini_api_url.clone(),
            api_key: config.gemini_api_key.clone().unwrap_or_default(),
        }
    }

    /// Submit a chart image for technical analysis and return the raw
    /// free-text answer.
    pub async fn analyze_chart(&self, artifact: &ChartArtifact, symbol: &str) -> Result<String> {
        let payload = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![
                    Part {
                        text: Some(analysis_prompt(symbol)),
                        inline_data: None,
                    },
                    Part {
                        text: None,
                        inline_data: Some(InlineData {
                            mime_type: artifact.content_type.to_string(),
                            data: BASE64.encode(&artifact.bytes),
                        }),
                    },
                ],
            }],
        };

        let response = self
            .client
            .post(&self.base_url)
            .query(&[("key", self.api_key.as_str())])
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            warn!("Analysis service returned status {}", status);
            return Err(PipelineError::AnalysisService { status });
        }

        let body: GenerateResponse = response.json().await?;
        let text = body
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().find_map(|p| p.text))
            .unwrap_or_default();

        debug!("Analysis response: {} chars", text.len());
        Ok(text)
    }
}
