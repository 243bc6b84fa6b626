//! Output sink
//!
//! The save-dialog seam and the file write that finalizes a recording.

use super::state::{RecordedMedia, SessionError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Host service that prompts for a save destination
///
/// `Ok(None)` means the user cancelled the dialog.
#[async_trait]
pub trait SaveDialog: Send + Sync {
    async fn pick_save_path(&self, default_name: &str) -> Result<Option<PathBuf>, SessionError>;
}

/// Write the finalized media to `path`, returning the byte count
pub async fn write_recording(path: &Path, media: &RecordedMedia) -> Result<u64, SessionError> {
    tokio::fs::write(path, media.data()).await?;
    tracing::info!(
        path = %path.display(),
        bytes = media.len(),
        "video saved"
    );
    Ok(media.len() as u64)
}
