//! Recording session state types
//!
//! Defines the session lifecycle states, the session error taxonomy, and
//! the finalized output types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// MIME type of the finalized output: WebM container, VP9 video, no audio
pub const OUTPUT_MIME_TYPE: &str = "video/webm;codecs=vp9";

/// File extension matching [`OUTPUT_MIME_TYPE`]
pub const OUTPUT_EXTENSION: &str = "webm";

/// Current state of the recording session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// No stream bound
    Idle,
    /// A stream is bound and showing in the preview
    Previewing,
    /// Chunks are being accumulated
    Recording,
    /// Accumulation has ended; the output is being assembled and saved
    Finalizing,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::Idle
    }
}

/// Errors from the recording session and its host services
#[derive(Error, Debug)]
pub enum SessionError {
    /// Start was requested before any capture source was selected
    #[error("no capture source selected")]
    NoSource,

    /// The host denied the stream or the target vanished
    #[error("failed to open capture stream for \"{target}\": {reason}")]
    StreamAcquisition { target: String, reason: String },

    /// Output was requested outside of finalization
    #[error("no finalization in progress")]
    NotFinalizing,

    /// The save dialog broke down (not: was cancelled)
    #[error("save dialog failed: {0}")]
    Dialog(String),

    /// Writing the finalized output failed
    #[error("failed to write recording: {0}")]
    Write(#[from] std::io::Error),
}

/// The assembled output of one recording period
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedMedia {
    mime_type: &'static str,
    data: Vec<u8>,
}

impl RecordedMedia {
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            mime_type: OUTPUT_MIME_TYPE,
            data,
        }
    }

    pub fn mime_type(&self) -> &str {
        self.mime_type
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// A finalized recording written to persistent storage
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedRecording {
    /// Destination path chosen in the save dialog
    pub path: String,

    /// Size of the written file in bytes
    pub bytes: u64,
}

/// Default filename offered by the save dialog
pub fn default_output_name(now: DateTime<Utc>) -> String {
    format!("vid-{}.{}", now.timestamp_millis(), OUTPUT_EXTENSION)
}
