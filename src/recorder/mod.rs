//! Recording session core
//!
//! This module implements the recording lifecycle:
//! - RecordingSession state machine (Idle/Previewing/Recording/Finalizing)
//! - SessionCoordinator to drive it through the host services
//! - Output sink for the save dialog and file write

pub mod coordinator;
pub mod session;
pub mod sink;
pub mod state;
pub mod stream;

pub use coordinator::{SessionCoordinator, SessionEvent};
pub use session::RecordingSession;
pub use sink::SaveDialog;
pub use state::{
    default_output_name, RecordedMedia, SavedRecording, SessionError, SessionState,
    OUTPUT_EXTENSION, OUTPUT_MIME_TYPE,
};
pub use stream::{StreamHandle, StreamSource};
