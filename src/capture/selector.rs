//! Source selection flow
//!
//! Composes the host's target enumeration with the native choice menu.
//! Host failures are logged only; both failure and cancellation yield no
//! selection.

use super::traits::{CaptureTarget, SourcePicker, TargetEnumerator, TargetKind};
use std::sync::Arc;

/// Kinds offered by the selection menu, in menu order
pub const OFFERED_KINDS: [TargetKind; 2] = [TargetKind::Window, TargetKind::Screen];

/// Lets the user choose one capture target from what the host offers
pub struct SourceSelector {
    enumerator: Arc<dyn TargetEnumerator>,
    picker: Arc<dyn SourcePicker>,
}

impl SourceSelector {
    pub fn new(enumerator: Arc<dyn TargetEnumerator>, picker: Arc<dyn SourcePicker>) -> Self {
        Self { enumerator, picker }
    }

    /// Enumerate capture targets and present them for a choice.
    ///
    /// Returns the chosen target, or `None` when the user cancelled, the
    /// host had nothing to offer, or a host call failed.
    pub async fn select(&self) -> Option<CaptureTarget> {
        let targets = match self.enumerator.list_targets(&OFFERED_KINDS).await {
            Ok(targets) => targets,
            Err(err) => {
                tracing::warn!("capture target enumeration failed: {err}");
                return None;
            }
        };

        if targets.is_empty() {
            tracing::warn!("host reported no capture targets");
            return None;
        }

        tracing::debug!(count = targets.len(), "presenting capture targets");

        match self.picker.pick(&targets).await {
            Ok(choice) => choice,
            Err(err) => {
                tracing::warn!("source menu failed: {err}");
                None
            }
        }
    }
}
