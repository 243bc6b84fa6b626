//! Error types crossing the IPC boundary
//!
//! Typed errors from the core are mapped to a serializable code/message
//! pair before they reach the frontend.

use crate::capture::HostError;
use crate::recorder::SessionError;
use serde::{Deserialize, Serialize};

/// Error response for the frontend
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    fn new(code: &str, message: String) -> Self {
        Self {
            code: code.to_string(),
            message,
        }
    }
}

impl From<SessionError> for ErrorResponse {
    fn from(error: SessionError) -> Self {
        let code = match &error {
            SessionError::NoSource => "NO_SOURCE",
            SessionError::StreamAcquisition { .. } => "STREAM_ACQUISITION",
            SessionError::NotFinalizing => "NOT_FINALIZING",
            SessionError::Dialog(_) => "DIALOG_ERROR",
            SessionError::Write(_) => "WRITE_FAILURE",
        };
        Self::new(code, error.to_string())
    }
}

impl From<HostError> for ErrorResponse {
    fn from(error: HostError) -> Self {
        let code = match &error {
            HostError::Unavailable(_) => "HOST_UNAVAILABLE",
            HostError::Menu(_) => "MENU_ERROR",
            HostError::PermissionDenied(_) => "PERMISSION_DENIED",
        };
        Self::new(code, error.to_string())
    }
}
