//! Session coordinator
//!
//! Owns the recording session and drives it through the host services:
//! stream acquisition and teardown, the save dialog, and the output
//! write. Emits [`SessionEvent`]s so the UI can mirror the lifecycle.

use super::session::RecordingSession;
use super::sink::{self, SaveDialog};
use super::state::{default_output_name, SavedRecording, SessionError, SessionState};
use super::stream::StreamSource;
use crate::capture::CaptureTarget;
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Events emitted while the session moves through its lifecycle
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum SessionEvent {
    /// A stream was bound and is showing in the preview
    PreviewStarted { target: CaptureTarget },
    /// The bound stream was torn down
    PreviewStopped,
    /// Chunk accumulation began
    RecordingStarted,
    /// Chunk accumulation ended
    RecordingStopped,
    /// The finalized recording was written
    Saved { path: String, bytes: u64 },
    /// The save dialog was cancelled and the recording discarded
    SaveDiscarded,
}

/// Drives the single recording session through its host services
pub struct SessionCoordinator {
    session: RecordingSession,
    streams: Arc<dyn StreamSource>,
    dialog: Arc<dyn SaveDialog>,
    event_tx: broadcast::Sender<SessionEvent>,
}

impl SessionCoordinator {
    pub fn new(streams: Arc<dyn StreamSource>, dialog: Arc<dyn SaveDialog>) -> Self {
        let (event_tx, _) = broadcast::channel(64);
        Self {
            session: RecordingSession::new(),
            streams,
            dialog,
            event_tx,
        }
    }

    /// Subscribe to lifecycle events
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.event_tx.subscribe()
    }

    /// Current lifecycle state
    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    fn emit(&self, event: SessionEvent) {
        let _ = self.event_tx.send(event);
    }

    /// Bind the session to a newly selected capture target.
    ///
    /// The previous stream, if any, is torn down first so only the most
    /// recent target's stream is ever active. On acquisition failure the
    /// session is left idle with no binding.
    pub async fn set_source(&mut self, target: CaptureTarget) -> Result<(), SessionError> {
        if let Some(previous) = self.session.release_stream() {
            self.streams.close(&previous).await;
            self.emit(SessionEvent::PreviewStopped);
        }

        let stream = self.streams.open(&target).await?;
        if let Some(stale) = self.session.bind_stream(stream) {
            self.streams.close(&stale).await;
        }

        tracing::info!(target = %target.label, "capture source selected");
        self.emit(SessionEvent::PreviewStarted { target });
        Ok(())
    }

    /// Begin recording the bound stream.
    ///
    /// A second start while recording is a silent no-op; starting without
    /// a bound stream fails with [`SessionError::NoSource`].
    pub fn start(&mut self) -> Result<(), SessionError> {
        if self.session.start()? {
            tracing::info!("recording started");
            self.emit(SessionEvent::RecordingStarted);
        } else {
            tracing::debug!("start requested while already recording");
        }
        Ok(())
    }

    /// Hand one encoded chunk to the session
    pub fn push_chunk(&mut self, chunk: Vec<u8>) {
        self.session.push_chunk(chunk);
    }

    /// Stop recording and finalize: assemble the chunks, prompt for a
    /// destination, write the file, then reset to idle.
    ///
    /// Returns `Ok(None)` when nothing was recording or the dialog was
    /// cancelled. The session always ends up idle with the stream torn
    /// down, even when the dialog or the write failed.
    pub async fn stop_and_save(&mut self) -> Result<Option<SavedRecording>, SessionError> {
        if !self.session.stop() {
            tracing::debug!("stop requested with no active recording");
            return Ok(None);
        }
        self.emit(SessionEvent::RecordingStopped);

        let outcome = self.finalize().await;

        if let Some(stream) = self.session.reset() {
            self.streams.close(&stream).await;
            self.emit(SessionEvent::PreviewStopped);
        }

        outcome
    }

    async fn finalize(&mut self) -> Result<Option<SavedRecording>, SessionError> {
        let media = self.session.take_media()?;
        tracing::info!(
            bytes = media.len(),
            mime = media.mime_type(),
            "finalizing recording"
        );

        let default_name = default_output_name(Utc::now());
        let Some(path) = self.dialog.pick_save_path(&default_name).await? else {
            tracing::info!(bytes = media.len(), "save cancelled, recording discarded");
            self.emit(SessionEvent::SaveDiscarded);
            return Ok(None);
        };

        let bytes = sink::write_recording(&path, &media).await?;
        let saved = SavedRecording {
            path: path.to_string_lossy().into_owned(),
            bytes,
        };
        self.emit(SessionEvent::Saved {
            path: saved.path.clone(),
            bytes,
        });
        Ok(Some(saved))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::TargetKind;
    use crate::recorder::stream::StreamHandle;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicBool, Ordering};
    use uuid::Uuid;

    /// Stream source that records every open/close and can fail on demand.
    #[derive(Default)]
    struct MockStreams {
        opened: Mutex<Vec<Uuid>>,
        closed: Mutex<Vec<Uuid>>,
        fail_next_open: AtomicBool,
    }

    #[async_trait]
    impl StreamSource for MockStreams {
        async fn open(&self, target: &CaptureTarget) -> Result<StreamHandle, SessionError> {
            if self.fail_next_open.swap(false, Ordering::SeqCst) {
                return Err(SessionError::StreamAcquisition {
                    target: target.label.clone(),
                    reason: "denied".to_string(),
                });
            }
            let handle = StreamHandle::new(target.clone());
            self.opened.lock().push(handle.id());
            Ok(handle)
        }

        async fn close(&self, stream: &StreamHandle) {
            self.closed.lock().push(stream.id());
        }
    }

    /// Save dialog answering with a fixed path, or `None` to cancel.
    struct MockDialog {
        path: Option<PathBuf>,
    }

    #[async_trait]
    impl SaveDialog for MockDialog {
        async fn pick_save_path(
            &self,
            _default_name: &str,
        ) -> Result<Option<PathBuf>, SessionError> {
            Ok(self.path.clone())
        }
    }

    fn target(id: &str) -> CaptureTarget {
        CaptureTarget::new(id, format!("Target {id}"), TargetKind::Screen)
    }

    fn coordinator(
        streams: Arc<MockStreams>,
        dialog: MockDialog,
    ) -> SessionCoordinator {
        SessionCoordinator::new(streams, Arc::new(dialog))
    }

    #[tokio::test]
    async fn test_reselection_tears_down_previous_stream() {
        let streams = Arc::new(MockStreams::default());
        let mut coordinator = coordinator(streams.clone(), MockDialog { path: None });

        coordinator.set_source(target("screen:1")).await.unwrap();
        coordinator.set_source(target("screen:2")).await.unwrap();
        coordinator.set_source(target("window:7")).await.unwrap();

        let opened = streams.opened.lock().clone();
        let closed = streams.closed.lock().clone();
        assert_eq!(opened.len(), 3);
        // Every superseded stream closed exactly once, newest still open
        assert_eq!(closed, opened[..2].to_vec());
        assert_eq!(coordinator.state(), SessionState::Previewing);
    }

    #[tokio::test]
    async fn test_acquisition_failure_leaves_session_idle() {
        let streams = Arc::new(MockStreams::default());
        let mut coordinator = coordinator(streams.clone(), MockDialog { path: None });

        coordinator.set_source(target("screen:1")).await.unwrap();

        streams.fail_next_open.store(true, Ordering::SeqCst);
        let err = coordinator.set_source(target("screen:2")).await.unwrap_err();
        assert!(matches!(err, SessionError::StreamAcquisition { .. }));

        // The old stream is gone and nothing replaced it
        assert_eq!(coordinator.state(), SessionState::Idle);
        assert_eq!(streams.closed.lock().len(), 1);
        assert!(matches!(coordinator.start(), Err(SessionError::NoSource)));
    }

    #[tokio::test]
    async fn test_start_without_source_is_guarded() {
        let streams = Arc::new(MockStreams::default());
        let mut coordinator = coordinator(streams, MockDialog { path: None });

        assert!(matches!(coordinator.start(), Err(SessionError::NoSource)));
        assert_eq!(coordinator.state(), SessionState::Idle);
    }

    #[tokio::test]
    async fn test_stop_with_nothing_recording_is_noop() {
        let streams = Arc::new(MockStreams::default());
        let mut coordinator = coordinator(streams.clone(), MockDialog { path: None });

        assert!(coordinator.stop_and_save().await.unwrap().is_none());
        assert_eq!(coordinator.state(), SessionState::Idle);

        coordinator.set_source(target("screen:1")).await.unwrap();
        assert!(coordinator.stop_and_save().await.unwrap().is_none());
        assert_eq!(coordinator.state(), SessionState::Previewing);
        // The preview stream survives a no-op stop
        assert!(streams.closed.lock().is_empty());
    }

    #[tokio::test]
    async fn test_record_and_save_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vid-123.webm");
        let streams = Arc::new(MockStreams::default());
        let mut coordinator = coordinator(
            streams.clone(),
            MockDialog {
                path: Some(path.clone()),
            },
        );
        let mut events = coordinator.subscribe();

        coordinator.set_source(target("screen:1")).await.unwrap();
        coordinator.start().unwrap();
        coordinator.start().unwrap(); // idempotent
        coordinator.push_chunk(vec![1, 2]);
        coordinator.push_chunk(vec![3]);
        coordinator.push_chunk(vec![4, 5, 6]);

        let saved = coordinator.stop_and_save().await.unwrap().unwrap();
        assert_eq!(saved.bytes, 6);
        assert_eq!(std::fs::read(&path).unwrap(), vec![1, 2, 3, 4, 5, 6]);

        // Session fully reset: stream closed, buffer gone, start guarded
        assert_eq!(coordinator.state(), SessionState::Idle);
        assert_eq!(streams.closed.lock().len(), 1);
        assert!(matches!(coordinator.start(), Err(SessionError::NoSource)));

        // One RecordingStarted despite the double start
        let mut starts = 0;
        while let Ok(event) = events.try_recv() {
            if matches!(event, SessionEvent::RecordingStarted) {
                starts += 1;
            }
        }
        assert_eq!(starts, 1);
    }

    #[tokio::test]
    async fn test_cancelled_dialog_discards_recording() {
        let streams = Arc::new(MockStreams::default());
        let mut coordinator = coordinator(streams.clone(), MockDialog { path: None });

        coordinator.set_source(target("screen:1")).await.unwrap();
        coordinator.start().unwrap();
        coordinator.push_chunk(vec![1, 2, 3]);

        assert!(coordinator.stop_and_save().await.unwrap().is_none());
        assert_eq!(coordinator.state(), SessionState::Idle);
        assert_eq!(streams.closed.lock().len(), 1);
        assert!(matches!(coordinator.start(), Err(SessionError::NoSource)));
    }

    #[tokio::test]
    async fn test_write_failure_still_resets_session() {
        let dir = tempfile::tempdir().unwrap();
        // Parent directory does not exist, so the write fails
        let path = dir.path().join("missing").join("vid-123.webm");
        let streams = Arc::new(MockStreams::default());
        let mut coordinator = coordinator(
            streams.clone(),
            MockDialog { path: Some(path) },
        );

        coordinator.set_source(target("screen:1")).await.unwrap();
        coordinator.start().unwrap();
        coordinator.push_chunk(vec![1]);

        let err = coordinator.stop_and_save().await.unwrap_err();
        assert!(matches!(err, SessionError::Write(_)));
        assert_eq!(coordinator.state(), SessionState::Idle);
        assert_eq!(streams.closed.lock().len(), 1);
    }

    #[tokio::test]
    async fn test_reselection_while_recording_discards_buffer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vid-456.webm");
        let streams = Arc::new(MockStreams::default());
        let mut coordinator = coordinator(
            streams.clone(),
            MockDialog {
                path: Some(path.clone()),
            },
        );

        coordinator.set_source(target("screen:1")).await.unwrap();
        coordinator.start().unwrap();
        coordinator.push_chunk(vec![9, 9, 9]);

        // New selection invalidates the in-progress recording
        coordinator.set_source(target("screen:2")).await.unwrap();
        coordinator.start().unwrap();
        coordinator.push_chunk(vec![7]);

        let saved = coordinator.stop_and_save().await.unwrap().unwrap();
        assert_eq!(saved.bytes, 1);
        assert_eq!(std::fs::read(&path).unwrap(), vec![7]);
    }

    #[test]
    fn test_session_events_serialize_with_camel_case_tags() {
        let event = SessionEvent::Saved {
            path: "/tmp/vid-1.webm".to_string(),
            bytes: 6,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "saved");
        assert_eq!(json["bytes"], 6);

        let json = serde_json::to_value(SessionEvent::PreviewStarted {
            target: target("screen:1"),
        })
        .unwrap();
        assert_eq!(json["type"], "previewStarted");
        assert_eq!(json["target"]["id"], "screen:1");
    }
}
