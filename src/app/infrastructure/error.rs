use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Settings error: {0}")]
    Settings(String),
}

/// Convenience type alias for Results with AppError
pub type Result<T> = std::result::Result<T, AppError>;

/// Failure talking to the place service.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Failed to reach the place service: {0}")]
    Transport(String),

    /// Non-success status. `message` is the service's own explanation, if any.
    #[error("Place service returned status {status}")]
    Status { status: i32, message: Option<String> },

    #[error("Failed to read the place service response: {0}")]
    Decode(String),
}

impl StoreError {
    /// Text worth showing to the user, if the failure carries any.
    pub fn user_message(&self) -> Option<&str> {
        match self {
            StoreError::Status { message, .. } => message.as_deref(),
            StoreError::Transport(_) | StoreError::Decode(_) => None,
        }
    }

    /// Network-level failure rather than a response the service produced.
    pub fn is_transport(&self) -> bool {
        matches!(self, StoreError::Transport(_))
    }
}

impl From<minreq::Error> for StoreError {
    fn from(e: minreq::Error) -> Self {
        match e {
            minreq::Error::SerdeJsonError(e) => StoreError::Decode(e.to_string()),
            other => StoreError::Transport(other.to_string()),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LocationError {
    #[error("Location unavailable: {0}")]
    Unavailable(String),

    #[error("Timed out waiting for a location fix")]
    Timeout,

    #[error("Location provider returned invalid coordinates ({latitude}, {longitude})")]
    Invalid { latitude: f64, longitude: f64 },
}
