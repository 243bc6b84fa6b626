//! Recording session state machine
//!
//! `Idle -> Previewing -> Recording -> Finalizing -> Idle`, driven by the
//! coordinator. The session owns the chunk buffer and the stream binding;
//! it never touches the host directly, which keeps every transition unit
//! testable.

use super::state::{RecordedMedia, SessionError, SessionState};
use super::stream::StreamHandle;

/// The mutable recording session
///
/// At most one exists per coordinator, and at most one stream is bound at
/// a time.
#[derive(Debug, Default)]
pub struct RecordingSession {
    state: SessionState,
    stream: Option<StreamHandle>,
    chunks: Vec<Vec<u8>>,
}

impl RecordingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn stream(&self) -> Option<&StreamHandle> {
        self.stream.as_ref()
    }

    /// Number of chunks accumulated so far
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Bind a freshly opened stream: `Idle -> Previewing`.
    ///
    /// Any previous binding is displaced and returned for host teardown;
    /// a recording that was still buffering is discarded.
    pub fn bind_stream(&mut self, stream: StreamHandle) -> Option<StreamHandle> {
        let displaced = self.release_stream();
        tracing::debug!(stream = %stream.id(), target = %stream.target().label, "stream bound");
        self.stream = Some(stream);
        self.state = SessionState::Previewing;
        displaced
    }

    /// Drop the current binding and buffered data, returning to `Idle`.
    ///
    /// Returns the displaced handle so the caller can tear the stream
    /// down on the host side.
    pub fn release_stream(&mut self) -> Option<StreamHandle> {
        if !self.chunks.is_empty() {
            tracing::warn!(
                discarded_chunks = self.chunks.len(),
                "releasing stream with a buffered recording, data discarded"
            );
        }
        self.chunks.clear();
        self.state = SessionState::Idle;
        self.stream.take()
    }

    /// Begin accumulating chunks: `Previewing -> Recording`.
    ///
    /// Returns `Ok(true)` when the transition happened and `Ok(false)` for
    /// the idempotent already-recording case. Fails with
    /// [`SessionError::NoSource`] when no stream is bound.
    pub fn start(&mut self) -> Result<bool, SessionError> {
        match self.state {
            SessionState::Idle => Err(SessionError::NoSource),
            SessionState::Previewing => {
                self.state = SessionState::Recording;
                Ok(true)
            }
            SessionState::Recording => Ok(false),
            SessionState::Finalizing => {
                tracing::debug!("start ignored, finalization in progress");
                Ok(false)
            }
        }
    }

    /// Append one encoded chunk, in arrival order.
    ///
    /// Chunks are only accepted while recording; anything else is dropped.
    pub fn push_chunk(&mut self, chunk: Vec<u8>) -> bool {
        if self.state != SessionState::Recording {
            tracing::debug!(
                bytes = chunk.len(),
                state = ?self.state,
                "dropping chunk delivered outside recording"
            );
            return false;
        }
        self.chunks.push(chunk);
        true
    }

    /// End accumulation: `Recording -> Finalizing`.
    ///
    /// Returns false (and changes nothing) when no recording is active.
    pub fn stop(&mut self) -> bool {
        if self.state != SessionState::Recording {
            return false;
        }
        self.state = SessionState::Finalizing;
        true
    }

    /// Assemble the buffered chunks into the output payload.
    ///
    /// Only valid while finalizing; empties the buffer.
    pub fn take_media(&mut self) -> Result<RecordedMedia, SessionError> {
        if self.state != SessionState::Finalizing {
            return Err(SessionError::NotFinalizing);
        }

        let mut data = Vec::with_capacity(self.chunks.iter().map(Vec::len).sum());
        for chunk in self.chunks.drain(..) {
            data.extend_from_slice(&chunk);
        }
        Ok(RecordedMedia::new(data))
    }

    /// Finish finalization: `Finalizing -> Idle`.
    ///
    /// Clears the buffer and the stream binding; the displaced handle is
    /// returned for host teardown.
    pub fn reset(&mut self) -> Option<StreamHandle> {
        self.chunks.clear();
        self.state = SessionState::Idle;
        self.stream.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::{CaptureTarget, TargetKind};

    fn stream() -> StreamHandle {
        StreamHandle::new(CaptureTarget::new(
            "screen:1",
            "Main Display",
            TargetKind::Screen,
        ))
    }

    #[test]
    fn test_start_without_stream_never_transitions() {
        let mut session = RecordingSession::new();

        for _ in 0..3 {
            assert!(matches!(session.start(), Err(SessionError::NoSource)));
            assert_eq!(session.state(), SessionState::Idle);
        }
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut session = RecordingSession::new();
        session.bind_stream(stream());

        assert!(session.start().unwrap());
        assert_eq!(session.state(), SessionState::Recording);

        // Second start changes nothing and is not an error
        assert!(!session.start().unwrap());
        assert_eq!(session.state(), SessionState::Recording);
    }

    #[test]
    fn test_stop_without_recording_is_noop() {
        let mut session = RecordingSession::new();
        assert!(!session.stop());
        assert_eq!(session.state(), SessionState::Idle);

        session.bind_stream(stream());
        assert!(!session.stop());
        assert_eq!(session.state(), SessionState::Previewing);
    }

    #[test]
    fn test_chunks_concatenate_in_arrival_order() {
        let mut session = RecordingSession::new();
        session.bind_stream(stream());
        session.start().unwrap();

        assert!(session.push_chunk(vec![1, 2]));
        assert!(session.push_chunk(vec![3]));
        assert!(session.push_chunk(vec![4, 5, 6]));

        assert!(session.stop());
        let media = session.take_media().unwrap();
        assert_eq!(media.data(), &[1, 2, 3, 4, 5, 6]);
        assert_eq!(media.mime_type(), "video/webm;codecs=vp9");
        assert_eq!(session.chunk_count(), 0);
    }

    #[test]
    fn test_chunks_outside_recording_are_dropped() {
        let mut session = RecordingSession::new();
        assert!(!session.push_chunk(vec![1]));

        session.bind_stream(stream());
        assert!(!session.push_chunk(vec![2]));
        assert_eq!(session.chunk_count(), 0);

        session.start().unwrap();
        assert!(session.push_chunk(vec![3]));
        session.stop();
        assert!(!session.push_chunk(vec![4]));
        assert_eq!(session.chunk_count(), 1);
    }

    #[test]
    fn test_take_media_requires_finalizing() {
        let mut session = RecordingSession::new();
        assert!(matches!(
            session.take_media(),
            Err(SessionError::NotFinalizing)
        ));

        session.bind_stream(stream());
        session.start().unwrap();
        assert!(matches!(
            session.take_media(),
            Err(SessionError::NotFinalizing)
        ));
    }

    #[test]
    fn test_bind_stream_displaces_previous_and_discards_buffer() {
        let mut session = RecordingSession::new();
        let first = stream();
        let first_id = first.id();

        session.bind_stream(first);
        session.start().unwrap();
        session.push_chunk(vec![1, 2, 3]);

        let displaced = session.bind_stream(stream()).unwrap();
        assert_eq!(displaced.id(), first_id);
        assert_eq!(session.state(), SessionState::Previewing);
        assert_eq!(session.chunk_count(), 0);
    }

    #[test]
    fn test_reset_clears_binding_and_buffer() {
        let mut session = RecordingSession::new();
        let bound = stream();
        let bound_id = bound.id();

        session.bind_stream(bound);
        session.start().unwrap();
        session.push_chunk(vec![9]);
        session.stop();

        let displaced = session.reset().unwrap();
        assert_eq!(displaced.id(), bound_id);
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.chunk_count(), 0);

        // Without a new selection, start is guarded again
        assert!(matches!(session.start(), Err(SessionError::NoSource)));
    }
}
