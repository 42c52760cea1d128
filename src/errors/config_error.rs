use thiserror::Error;

/// Fatal startup conditions. These are detected before any manager or
/// transport is constructed; the process exits instead of serving.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is required and must not be empty")]
    MissingVar(&'static str),

    #[error("{var} is not a valid http(s) URL: {reason}")]
    InvalidBaseUrl { var: &'static str, reason: String },
}
