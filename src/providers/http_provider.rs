use crate::core::{Calculation, CalculationMode, CalculationRequest, Calculator};
use crate::providers::util::with_retry;
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use tracing::debug;

/// Sends calculations to a remote backend exposing `/calculate-sip` and
/// `/calculate-emi`.
pub struct HttpProvider {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

impl HttpProvider {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("fincalc/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(HttpProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Request body in the shape the backend expects for `mode`.
    fn payload(mode: CalculationMode, request: &CalculationRequest) -> Value {
        let fields = mode.spec().fields;
        let mut body = Map::new();
        body.insert(fields.amount.to_string(), json!(request.amount));
        body.insert(fields.rate.to_string(), json!(request.rate));
        body.insert(fields.years.to_string(), json!(request.years));
        Value::Object(body)
    }
}

#[async_trait]
impl Calculator for HttpProvider {
    async fn calculate(
        &self,
        mode: CalculationMode,
        request: &CalculationRequest,
    ) -> Result<Calculation> {
        let url = format!("{}{}", self.base_url, mode.spec().endpoint);
        let payload = Self::payload(mode, request);
        debug!("Posting {} calculation to {}: {}", mode, url, payload);

        let response = with_retry(
            || async { self.client.post(&url).json(&payload).send().await },
            3,
            500,
        )
        .await
        .with_context(|| format!("Failed to reach calculation backend at {url}"))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .with_context(|| format!("Failed to read response from {url}"))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(&response_text)
                .map(|body| body.error)
                .unwrap_or(response_text);
            return Err(anyhow!(
                "Backend rejected {} calculation ({}): {}",
                mode,
                status,
                message
            ));
        }

        let body: Value = serde_json::from_str(&response_text).with_context(|| {
            format!("Failed to parse response from {url}. Response: '{response_text}'")
        })?;
        debug!("Received {} result: {}", mode, body);
        Calculation::from_json(mode, body)
    }
}
