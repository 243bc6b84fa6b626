//! Webview-backed capture streams
//!
//! The webview owns the actual display stream and the preview surface.
//! This adapter turns the open/close round trip into an awaited call:
//! an open request event goes out, the webview acquires the stream and
//! answers through the `notify_stream_*` commands, which resolve the
//! pending oneshot here. There is no timeout; the host answers when
//! acquisition settles.

use crate::capture::CaptureTarget;
use crate::recorder::{SessionError, StreamHandle, StreamSource};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::HashMap;
use tauri::{AppHandle, Emitter, Manager};
use tokio::sync::oneshot;
use uuid::Uuid;

/// Event asking the webview to acquire a stream
pub const OPEN_STREAM_EVENT: &str = "capture:open-stream";

/// Event asking the webview to stop a stream and clear the preview
pub const CLOSE_STREAM_EVENT: &str = "capture:close-stream";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct OpenStreamRequest<'a> {
    request_id: Uuid,
    stream_id: Uuid,
    target: &'a CaptureTarget,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct CloseStreamRequest {
    stream_id: Uuid,
}

/// Pending stream acknowledgments, keyed by request id
#[derive(Default)]
pub struct StreamBridge {
    pending: Mutex<HashMap<Uuid, oneshot::Sender<Result<(), String>>>>,
}

impl StreamBridge {
    fn begin(&self, request_id: Uuid) -> oneshot::Receiver<Result<(), String>> {
        let (tx, rx) = oneshot::channel();
        self.pending.lock().insert(request_id, tx);
        rx
    }

    /// The webview acquired the stream. Returns false for unknown ids.
    pub fn resolve_opened(&self, request_id: Uuid) -> bool {
        match self.pending.lock().remove(&request_id) {
            Some(tx) => {
                let _ = tx.send(Ok(()));
                true
            }
            None => false,
        }
    }

    /// The webview failed to acquire the stream. Returns false for
    /// unknown ids.
    pub fn resolve_failed(&self, request_id: Uuid, reason: String) -> bool {
        match self.pending.lock().remove(&request_id) {
            Some(tx) => {
                let _ = tx.send(Err(reason));
                true
            }
            None => false,
        }
    }
}

/// Stream source delegating acquisition and preview to the webview
pub struct WebviewStreamSource {
    app: AppHandle,
}

impl WebviewStreamSource {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }
}

#[async_trait]
impl StreamSource for WebviewStreamSource {
    async fn open(&self, target: &CaptureTarget) -> Result<StreamHandle, SessionError> {
        let handle = StreamHandle::new(target.clone());
        let request_id = Uuid::new_v4();
        let rx = self.app.state::<StreamBridge>().begin(request_id);

        self.app
            .emit(
                OPEN_STREAM_EVENT,
                OpenStreamRequest {
                    request_id,
                    stream_id: handle.id(),
                    target,
                },
            )
            .map_err(|err| SessionError::StreamAcquisition {
                target: target.label.clone(),
                reason: err.to_string(),
            })?;

        match rx.await {
            Ok(Ok(())) => Ok(handle),
            Ok(Err(reason)) => Err(SessionError::StreamAcquisition {
                target: target.label.clone(),
                reason,
            }),
            Err(_) => Err(SessionError::StreamAcquisition {
                target: target.label.clone(),
                reason: "stream request dropped".to_string(),
            }),
        }
    }

    async fn close(&self, stream: &StreamHandle) {
        let request = CloseStreamRequest {
            stream_id: stream.id(),
        };
        if let Err(err) = self.app.emit(CLOSE_STREAM_EVENT, request) {
            tracing::warn!("failed to notify webview of stream teardown: {err}");
        }
    }
}
