//! Source-selection commands

use crate::capture::{self, CaptureTarget, HostError, SourceSelector};
use crate::commands::recording::RecorderState;
use crate::utils::error::ErrorResponse;
use std::sync::Arc;
use tauri::State;

/// Application state for source selection
pub struct SelectorState {
    pub selector: Arc<SourceSelector>,
}

/// List every capture target the host currently offers
#[tauri::command]
pub async fn list_capture_targets() -> Result<Vec<CaptureTarget>, ErrorResponse> {
    capture::list_targets(&capture::selector::OFFERED_KINDS).map_err(ErrorResponse::from)
}

/// Run the selection flow: popup menu, then bind the chosen stream.
///
/// Returns the chosen target, or `None` when the user cancelled or the
/// host had nothing to offer.
#[tauri::command]
pub async fn choose_source(
    selector: State<'_, SelectorState>,
    recorder: State<'_, RecorderState>,
) -> Result<Option<CaptureTarget>, ErrorResponse> {
    if !capture::has_capture_permission() {
        capture::request_capture_permission();
        return Err(ErrorResponse::from(HostError::PermissionDenied(
            "screen recording not allowed, grant it in system settings and try again".to_string(),
        )));
    }

    // The menu await happens outside the coordinator lock so the session
    // stays responsive while the popup is up.
    let Some(target) = selector.selector.select().await else {
        return Ok(None);
    };

    let mut coordinator = recorder.coordinator.lock().await;
    coordinator
        .set_source(target.clone())
        .await
        .map_err(ErrorResponse::from)?;
    Ok(Some(target))
}

/// Check if screen capture permission is granted
#[tauri::command]
pub async fn check_capture_permission() -> Result<bool, ErrorResponse> {
    Ok(capture::has_capture_permission())
}

/// Request screen capture permission
#[tauri::command]
pub async fn request_capture_permission() -> Result<bool, ErrorResponse> {
    Ok(capture::request_capture_permission())
}
