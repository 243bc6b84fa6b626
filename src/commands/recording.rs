//! Recording lifecycle commands

use crate::host::stream::StreamBridge;
use crate::recorder::{SavedRecording, SessionCoordinator, SessionState};
use crate::utils::error::ErrorResponse;
use std::sync::Arc;
use tauri::State;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Application state for the recording session
pub struct RecorderState {
    pub coordinator: Arc<Mutex<SessionCoordinator>>,
}

/// Start recording the bound stream
#[tauri::command]
pub async fn start_recording(state: State<'_, RecorderState>) -> Result<(), ErrorResponse> {
    let mut coordinator = state.coordinator.lock().await;
    coordinator.start().map_err(ErrorResponse::from)
}

/// Deliver one encoded chunk from the capture subsystem
#[tauri::command]
pub async fn push_recording_chunk(
    state: State<'_, RecorderState>,
    chunk: Vec<u8>,
) -> Result<(), ErrorResponse> {
    let mut coordinator = state.coordinator.lock().await;
    coordinator.push_chunk(chunk);
    Ok(())
}

/// Stop recording and finalize the output file.
///
/// `None` means nothing was recording or the save dialog was cancelled.
#[tauri::command]
pub async fn stop_recording(
    state: State<'_, RecorderState>,
) -> Result<Option<SavedRecording>, ErrorResponse> {
    let mut coordinator = state.coordinator.lock().await;
    coordinator.stop_and_save().await.map_err(ErrorResponse::from)
}

/// Current lifecycle state of the session
#[tauri::command]
pub async fn get_session_state(
    state: State<'_, RecorderState>,
) -> Result<SessionState, ErrorResponse> {
    Ok(state.coordinator.lock().await.state())
}

/// The webview acquired the stream for an open request
#[tauri::command]
pub fn notify_stream_opened(bridge: State<'_, StreamBridge>, request_id: Uuid) {
    if !bridge.resolve_opened(request_id) {
        tracing::debug!(%request_id, "stream-opened ack for unknown request");
    }
}

/// The webview failed to acquire the stream for an open request
#[tauri::command]
pub fn notify_stream_failed(bridge: State<'_, StreamBridge>, request_id: Uuid, reason: String) {
    if !bridge.resolve_failed(request_id, reason) {
        tracing::debug!(%request_id, "stream-failed ack for unknown request");
    }
}
