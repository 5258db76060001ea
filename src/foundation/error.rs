use std::time::Duration;

/// Convenience result type used across memeforge.
pub type MemeResult<T> = Result<T, MemeError>;

/// Top-level error taxonomy used by library APIs.
#[derive(thiserror::Error, Debug)]
pub enum MemeError {
    /// Input could not be loaded or decoded (file, template fetch, data URL).
    #[error("input error: {0}")]
    Input(String),

    /// The captioning backend failed.
    #[error("service error: {0}")]
    Service(#[from] ServiceError),

    /// Text measurement, rasterization or encoding failed.
    #[error("render error: {0}")]
    Render(String),

    /// Caller-provided values violate an API contract.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MemeError {
    /// Build a [`MemeError::Input`] value.
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    /// Build a [`MemeError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`MemeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Return the service failure behind this error, if any.
    pub fn as_service(&self) -> Option<&ServiceError> {
        match self {
            Self::Service(e) => Some(e),
            _ => None,
        }
    }
}

/// Failures reported by a captioning backend.
#[derive(thiserror::Error, Debug)]
pub enum ServiceError {
    /// The backend answered, but the response carried no inline image payload.
    #[error("no image was generated")]
    NoImageProduced,

    /// The request did not complete within the configured timeout.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The backend answered with a non-success HTTP status.
    #[error("backend returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, as text.
        body: String,
    },

    /// The request could not be sent or the response could not be read.
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body did not have the expected shape.
    #[error("malformed response: {0}")]
    Parse(String),

    /// No API credential was configured.
    #[error("missing API credential")]
    MissingCredential,
}

impl ServiceError {
    /// Build a [`ServiceError::Parse`] value.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Build a [`ServiceError::Transport`] value.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
