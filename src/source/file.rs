use std::{fs, path::PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::errors::CovError;

use super::CoverageSource;

/// Reads a saved `/coverage` response from disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl CoverageSource for FileSource {
    fn fetch(&self) -> Result<Value, CovError> {
        debug!(path = %self.path.display(), "reading coverage payload");
        let json_str = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&json_str)?)
    }

    fn name(&self) -> String {
        self.path.to_string_lossy().to_string()
    }
}
