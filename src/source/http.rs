use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::CovError;

use super::CoverageSource;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const COVERAGE_PATH: &str = "coverage";

#[derive(Debug, Clone)]
pub struct HttpSource {
    base_url: String,
    timeout: Duration,
}

impl HttpSource {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), COVERAGE_PATH)
    }
}

impl Default for HttpSource {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl CoverageSource for HttpSource {
    fn fetch(&self) -> Result<Value, CovError> {
        let url = self.endpoint();
        debug!(%url, "requesting coverage analysis");
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()?;
        let response = client.get(&url).send()?;
        if !response.status().is_success() {
            warn!(%url, status = response.status().as_u16(), "coverage request rejected");
            return Err(CovError::HttpStatus(response.status().as_u16()));
        }
        let body = response.text()?;
        Ok(serde_json::from_str(&body)?)
    }

    fn name(&self) -> String {
        self.endpoint()
    }
}
