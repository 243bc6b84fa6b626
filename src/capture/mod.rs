//! Capture target enumeration
//!
//! This module provides the host-facing side of source selection: the
//! target types, the selection flow, and platform-specific enumeration of
//! screens and windows.

pub mod selector;
pub mod traits;

#[cfg(target_os = "macos")]
pub mod macos;

#[cfg(target_os = "windows")]
pub mod windows;

use async_trait::async_trait;

// Re-export the selection surface
pub use selector::SourceSelector;
pub use traits::{CaptureTarget, HostError, SourcePicker, TargetEnumerator, TargetKind};

/// List capture targets of the requested kinds from the host
pub fn list_targets(kinds: &[TargetKind]) -> Result<Vec<CaptureTarget>, HostError> {
    #[cfg(target_os = "macos")]
    {
        macos::list_targets(kinds)
    }

    #[cfg(target_os = "windows")]
    {
        windows::list_targets(kinds)
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        // No native enumeration here. The webview's display-capture portal
        // can still record the desktop, so offer a single stub screen.
        let mut targets = Vec::new();
        if kinds.contains(&TargetKind::Screen) {
            targets.push(CaptureTarget::new(
                "screen:0",
                "Entire Screen",
                TargetKind::Screen,
            ));
        }
        Ok(targets)
    }
}

/// Host-backed enumerator used by the production selector
pub struct SystemEnumerator;

#[async_trait]
impl TargetEnumerator for SystemEnumerator {
    async fn list_targets(&self, kinds: &[TargetKind]) -> Result<Vec<CaptureTarget>, HostError> {
        list_targets(kinds)
    }
}

/// Check if screen capture permission is granted
pub fn has_capture_permission() -> bool {
    #[cfg(target_os = "macos")]
    {
        macos::has_screen_recording_permission()
    }

    #[cfg(not(target_os = "macos"))]
    {
        // Windows and the Linux portal gate access at capture time
        true
    }
}

/// Request screen capture permission
///
/// On macOS this may show the system permission prompt. Returns true if
/// permission was already granted.
pub fn request_capture_permission() -> bool {
    #[cfg(target_os = "macos")]
    {
        macos::request_screen_recording_permission()
    }

    #[cfg(not(target_os = "macos"))]
    {
        true
    }
}
