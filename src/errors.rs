use std::fmt::Display;

#[derive(Debug)]
pub enum CovError {
    IoError(std::io::Error),
    Json(serde_json::Error),
    Transport(reqwest::Error),
    HttpStatus(u16),
    InvalidArgument(String),
    ConfigError(String),
    RuntimeError(String),
    InternalError(String),
}

impl CovError {
    /// Errors a `CoverageSource` raises when the payload cannot be obtained
    /// or read: network, status, unreadable file, non-JSON body. The session
    /// logs these as recoverable; anything else is a worker fault.
    pub fn is_transport_failure(&self) -> bool {
        matches!(
            self,
            CovError::Transport(_)
                | CovError::HttpStatus(_)
                | CovError::Json(_)
                | CovError::IoError(_)
        )
    }
}

impl std::error::Error for CovError {}

impl Display for CovError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CovError::IoError(io_error) => write!(f, "{}", io_error),
            CovError::Json(error) => write!(f, "invalid JSON payload: {}", error),
            CovError::Transport(error) => write!(f, "request failed: {}", error),
            CovError::HttpStatus(status) => write!(f, "server responded with status {}", status),
            CovError::InvalidArgument(error) => write!(f, "{}", error),
            CovError::ConfigError(error) => write!(f, "{}", error),
            CovError::RuntimeError(error) => write!(f, "{}", error),
            CovError::InternalError(error) => write!(f, "{}", error),
        }
    }
}

impl From<std::io::Error> for CovError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError(err)
    }
}

impl From<serde_json::Error> for CovError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<reqwest::Error> for CovError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_failures_are_classified() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        assert!(CovError::from(json_err).is_transport_failure());
        assert!(CovError::HttpStatus(503).is_transport_failure());
        let missing = std::io::Error::new(std::io::ErrorKind::NotFound, "coverage.json");
        assert!(CovError::from(missing).is_transport_failure());
        assert!(!CovError::InvalidArgument("bad".to_string()).is_transport_failure());
        assert!(!CovError::InternalError("worker gone".to_string()).is_transport_failure());
    }

    #[test]
    fn status_error_mentions_code() {
        assert_eq!(
            CovError::HttpStatus(404).to_string(),
            "server responded with status 404"
        );
    }
}
