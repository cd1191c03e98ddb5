//! Client for the external StreamLit analytics endpoint.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;
use url::Url;

use crate::config::AnalyticsConfig;
use crate::error::FetchError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StreamLitReport {
    pub analysis: String,
    #[serde(rename = "chartUrl", default, skip_serializing_if = "Option::is_none")]
    pub chart_url: Option<String>,
}

#[derive(Clone)]
pub struct AnalyticsClient {
    base_url: String,
    client: Client,
}

impl AnalyticsClient {
    pub fn new(config: &AnalyticsConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            base_url: config.base_url.clone(),
            client,
        })
    }

    /// `<base_url>?stock=<ticker>` with the ticker percent-encoded
    pub fn report_url(&self, ticker: &str) -> Result<Url, FetchError> {
        Url::parse_with_params(&self.base_url, &[("stock", ticker)])
            .map_err(|e| FetchError::Network(format!("invalid analytics url: {}", e)))
    }

    pub async fn fetch_report(&self, ticker: &str) -> Result<StreamLitReport, FetchError> {
        let url = self.report_url(ticker)?;
        info!("📊 [STREAMLIT] GET {}", url);

        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
