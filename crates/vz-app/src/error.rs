use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Network(String),
    /// Remote job reported failure; carries the remote message verbatim.
    #[error("{0}")]
    JobFailed(String),
    #[error("Job timed out")]
    JobTimeout,
    #[error("No result URL found")]
    MissingResult,
    #[error("Download failed: {0}")]
    Download(String),
    /// The flow was superseded by a reset or a newer action.
    #[error("Superseded by a newer action")]
    Cancelled,
}

impl AppError {
    pub fn network(step: &str, status: reqwest::StatusCode) -> Self {
        Self::Network(format!("{}: {}", step, status))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(error: reqwest::Error) -> Self {
        Self::Network(error.to_string())
    }
}
