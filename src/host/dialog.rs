//! Native save dialog
//!
//! Bridges the dialog plugin's callback API to the awaited save-dialog
//! seam.

use crate::recorder::{SaveDialog, SessionError};
use async_trait::async_trait;
use std::path::PathBuf;
use tauri::AppHandle;
use tauri_plugin_dialog::DialogExt;
use tokio::sync::oneshot;

pub struct NativeSaveDialog {
    app: AppHandle,
}

impl NativeSaveDialog {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }
}

#[async_trait]
impl SaveDialog for NativeSaveDialog {
    async fn pick_save_path(&self, default_name: &str) -> Result<Option<PathBuf>, SessionError> {
        let (tx, rx) = oneshot::channel();

        self.app
            .dialog()
            .file()
            .set_title("Save video")
            .set_file_name(default_name)
            .add_filter("WebM video", &["webm"])
            .save_file(move |picked| {
                let _ = tx.send(picked);
            });

        let picked = rx
            .await
            .map_err(|_| SessionError::Dialog("save dialog closed without a response".to_string()))?;

        Ok(picked.and_then(|file| match file.into_path() {
            Ok(path) => Some(path),
            Err(err) => {
                tracing::warn!("save dialog returned a non-path destination: {err}");
                None
            }
        }))
    }
}
