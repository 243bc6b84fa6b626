//! Capture target types and host-service seams
//!
//! Platform-agnostic description of what the host can capture, plus the
//! async traits the selection flow uses to talk to the host. Production
//! implementations live in the platform modules and the app shell; tests
//! substitute mocks.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Kind of capturable target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    /// A whole screen/display
    Screen,
    /// A single application window
    Window,
}

/// One capturable screen or window, as enumerated by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureTarget {
    /// Opaque host identifier for this target
    pub id: String,

    /// Human-readable label shown in the selection menu
    pub label: String,

    /// Whether this is a whole screen or a single window
    pub kind: TargetKind,
}

impl CaptureTarget {
    pub fn new(id: impl Into<String>, label: impl Into<String>, kind: TargetKind) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
        }
    }
}

/// Errors from the host's enumeration and menu services
///
/// These never block the UI: the selection flow logs them and yields no
/// choice.
#[derive(Error, Debug)]
pub enum HostError {
    #[error("capture target enumeration failed: {0}")]
    Unavailable(String),

    #[error("source menu failed: {0}")]
    Menu(String),

    #[error("permission denied: {0}")]
    PermissionDenied(String),
}

/// Host service that lists the currently capturable targets
#[async_trait]
pub trait TargetEnumerator: Send + Sync {
    async fn list_targets(&self, kinds: &[TargetKind]) -> Result<Vec<CaptureTarget>, HostError>;
}

/// Host service that presents targets as a choice and yields at most one
///
/// `Ok(None)` means the user cancelled.
#[async_trait]
pub trait SourcePicker: Send + Sync {
    async fn pick(&self, targets: &[CaptureTarget]) -> Result<Option<CaptureTarget>, HostError>;
}
