/// Errors that can occur while delivering a submission.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// The collector answered with a non-success status.
    #[error("{}", message.as_deref().unwrap_or("Submission failed"))]
    Rejected {
        /// HTTP status code of the response.
        status: u16,
        /// The `error` field of the response body, when present.
        message: Option<String>,
    },

    /// No response arrived within the configured timeout.
    #[error("submission timed out")]
    Timeout,

    /// The request could not be sent or the connection failed.
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),
}

impl From<reqwest::Error> for SubmitError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else {
            Self::Network(error)
        }
    }
}
