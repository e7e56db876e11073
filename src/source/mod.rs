use serde_json::Value;

use crate::errors::CovError;

pub mod file;
pub mod http;

pub use file::FileSource;
pub use http::HttpSource;

/// Where the raw analysis payload comes from. Implementations only fetch
/// and parse JSON; shaping the payload is the normalizer's job.
pub trait CoverageSource: Send + Sync {
    fn fetch(&self) -> Result<Value, CovError>;
    fn name(&self) -> String;
}
