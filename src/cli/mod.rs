use std::{path::PathBuf, str::FromStr};

use crate::errors::CovError;

pub mod cli_parser;
pub mod settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = CovError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(CovError::InvalidArgument(format!(
                "Unknown output format: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SourceConfig {
    Http { base_url: String },
    File { path: PathBuf },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub source: SourceConfig,
    pub format: OutputFormat,
    pub color: bool,
    pub interactive: bool,
    pub query: Option<String>,
    /// Zero-based suggestion index to start expanded.
    pub expand: Option<usize>,
}
