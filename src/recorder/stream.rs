//! Capture stream seam
//!
//! The session only ever holds a [`StreamHandle`]; the live stream itself
//! is owned by the capture subsystem behind [`StreamSource`].

use super::state::SessionError;
use crate::capture::CaptureTarget;
use async_trait::async_trait;
use uuid::Uuid;

/// The session's binding to one live capture stream
#[derive(Debug, Clone)]
pub struct StreamHandle {
    id: Uuid,
    target: CaptureTarget,
}

impl StreamHandle {
    /// Create a handle for a freshly opened stream on `target`
    pub fn new(target: CaptureTarget) -> Self {
        Self {
            id: Uuid::new_v4(),
            target,
        }
    }

    /// Identifier correlating this binding with the host's stream object
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The target this stream was opened for
    pub fn target(&self) -> &CaptureTarget {
        &self.target
    }
}

/// Host service that opens and tears down live capture streams
///
/// Opening also binds the stream to the preview surface; closing stops it.
/// The open await has no timeout: the host answers when acquisition
/// settles.
#[async_trait]
pub trait StreamSource: Send + Sync {
    async fn open(&self, target: &CaptureTarget) -> Result<StreamHandle, SessionError>;

    async fn close(&self, stream: &StreamHandle);
}
