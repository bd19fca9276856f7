//! Error codes and exit status for heraldctl

use thiserror::Error;

/// Exit code when the daemon returns something that is not a chat reply
pub const EXIT_INVALID_RESPONSE: i32 = 65;

/// heraldd could not be reached at the configured URL
pub const EXIT_DAEMON_UNAVAILABLE: i32 = 70;

/// The reply was received and rendered
pub const EXIT_SUCCESS: i32 = 0;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Daemon unavailable at {url}: {message}. Is heraldd running?")]
    Unavailable { url: String, message: String },

    #[error("Invalid response from daemon: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Unavailable { .. } => EXIT_DAEMON_UNAVAILABLE,
            Self::InvalidResponse(_) => EXIT_INVALID_RESPONSE,
        }
    }
}
