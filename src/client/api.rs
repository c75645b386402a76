//! HTTP client for the analysis endpoint: one request, one envelope

use crate::client::request::{multipart_form, AnalysisRequest};
use crate::config::Config;
use crate::error::{Result, ResumeMatcherError, GENERIC_ANALYSIS_ERROR};
use crate::output::report::AnalysisData;
use log::{debug, info, warn};
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;

/// Response envelope: `{data}` on success, `{error}` on failure. Any
/// `success` flag is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ResponseEnvelope {
    pub data: Option<AnalysisData>,
    pub error: Option<String>,
}

impl ResponseEnvelope {
    fn error_message(&self) -> String {
        self.error
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .unwrap_or(GENERIC_ANALYSIS_ERROR)
            .to_string()
    }

    pub fn into_result(self, ok_status: bool) -> Result<AnalysisData> {
        if !ok_status {
            return Err(ResumeMatcherError::Api(self.error_message()));
        }
        match self.data {
            Some(data) => Ok(data),
            None => Err(ResumeMatcherError::Api(self.error_message())),
        }
    }
}

/// Map a status code and raw body onto analysis data or a user-facing error
pub fn interpret_response(status: StatusCode, body: &str) -> Result<AnalysisData> {
    match serde_json::from_str::<ResponseEnvelope>(body) {
        Ok(envelope) => envelope.into_result(status.is_success()),
        Err(e) if status.is_success() => {
            warn!("Unparseable success response: {}", e);
            Err(ResumeMatcherError::Api(format!("Invalid response from server: {}", e)))
        }
        Err(_) => {
            debug!("Non-JSON error body (status {}): {}", status, body);
            Err(ResumeMatcherError::Api(GENERIC_ANALYSIS_ERROR.to_string()))
        }
    }
}

pub struct AnalysisClient {
    client: reqwest::Client,
    url: String,
}

impl AnalysisClient {
    pub fn new(url: impl Into<String>, timeout_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ResumeMatcherError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.analyze_url(), config.server.timeout_secs)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send the request once; no retries
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisData> {
        info!("Submitting {} to {}", request.describe(), self.url);

        let builder = self.client.post(&self.url);
        let builder = match request {
            AnalysisRequest::Json(body) => builder.json(body),
            AnalysisRequest::Multipart { jd, resume } => builder.multipart(multipart_form(jd, resume)?),
        };

        let response = builder.send().await?;
        let status = response.status();
        debug!("Response status: {}", status);

        let body = response.text().await?;
        interpret_response(status, &body)
    }
}
