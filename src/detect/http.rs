//! HTTP detection client.
//!
//! Sends each frame to a local object-detection service as a blocking
//! multipart POST (PNG image + confidence threshold) and parses the JSON
//! `predictions` list from the response. The service contract follows the
//! DeepStack / CodeProject.AI vision API: a null or missing list means
//! "nothing detected".

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::time::Duration;
use url::Url;

use crate::detect::multipart::MultipartForm;
use crate::detect::{Detector, Prediction};
use crate::frame::Frame;

/// Configuration for the HTTP detector.
#[derive(Clone, Debug)]
pub struct HttpDetectorConfig {
    /// Detection endpoint, e.g. "http://127.0.0.1:32168/v1/vision/detection".
    pub endpoint: String,
    /// Confidence threshold forwarded to the service as `min_confidence`.
    pub min_confidence: f32,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for HttpDetectorConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:32168/v1/vision/detection".to_string(),
            min_confidence: 0.4,
            timeout: Duration::from_secs(5),
        }
    }
}

/// Blocking HTTP client for the detection service.
pub struct HttpDetector {
    config: HttpDetectorConfig,
    agent: ureq::Agent,
}

#[derive(Debug, Default, Deserialize)]
struct DetectionResponse {
    #[serde(default)]
    predictions: Option<Vec<Prediction>>,
}

impl HttpDetector {
    pub fn new(config: HttpDetectorConfig) -> Result<Self> {
        let url = Url::parse(&config.endpoint).context("parse detection endpoint")?;
        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(anyhow!(
                    "unsupported detection endpoint scheme '{}'; expected http(s)",
                    other
                ))
            }
        }
        let agent = ureq::AgentBuilder::new()
            .timeout(config.timeout)
            .build();
        Ok(Self { config, agent })
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }
}

impl Detector for HttpDetector {
    fn name(&self) -> &'static str {
        "http"
    }

    fn detect(&mut self, frame: &Frame) -> Result<Vec<Prediction>> {
        let png = frame.encode_png()?;

        let mut form = MultipartForm::new();
        form.add_text(
            "min_confidence",
            &format!("{}", self.config.min_confidence),
        );
        form.add_file("image", "frame.png", "image/png", &png);
        let (content_type, body) = form.finish();

        let response = self
            .agent
            .post(&self.config.endpoint)
            .set("Content-Type", &content_type)
            .send_bytes(&body)
            .with_context(|| format!("post frame to {}", self.config.endpoint))?;

        let json = response
            .into_string()
            .context("read detection response body")?;
        parse_response(&json)
    }
}

/// Parse the service response. A null or absent `predictions` list is
/// treated as empty.
fn parse_response(json: &str) -> Result<Vec<Prediction>> {
    let response: DetectionResponse =
        serde_json::from_str(json).context("parse detection response json")?;
    Ok(response.predictions.unwrap_or_default())
}
