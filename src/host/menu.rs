//! Native source-selection menu
//!
//! Presents capture targets as a popup menu on the main window. The
//! chosen item resolves the pending oneshot via the app-level menu event
//! handler; a dismissed popup never reports back, so opening the next
//! popup cancels a still-pending one.

use crate::capture::{CaptureTarget, HostError, SourcePicker};
use async_trait::async_trait;
use parking_lot::Mutex;
use tauri::menu::{Menu, MenuItem};
use tauri::{AppHandle, Manager};
use tokio::sync::oneshot;

/// Menu item id prefix for source entries
const SOURCE_ITEM_PREFIX: &str = "source:";

/// Pending menu choice, resolved by the menu event handler
#[derive(Default)]
pub struct MenuBridge {
    pending: Mutex<Option<oneshot::Sender<Option<String>>>>,
}

impl MenuBridge {
    /// Route a menu event. Returns true when it belonged to a source menu.
    pub fn handle_menu_event(&self, item_id: &str) -> bool {
        let Some(target_id) = item_id.strip_prefix(SOURCE_ITEM_PREFIX) else {
            return false;
        };
        match self.pending.lock().take() {
            Some(tx) => {
                let _ = tx.send(Some(target_id.to_string()));
            }
            None => tracing::debug!(target_id, "source menu event with no pending choice"),
        }
        true
    }

    fn begin(&self) -> oneshot::Receiver<Option<String>> {
        let (tx, rx) = oneshot::channel();
        if let Some(stale) = self.pending.lock().replace(tx) {
            let _ = stale.send(None);
        }
        rx
    }
}

/// Source picker backed by a native popup menu on the main window
pub struct MenuSourcePicker {
    app: AppHandle,
}

impl MenuSourcePicker {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }
}

#[async_trait]
impl SourcePicker for MenuSourcePicker {
    async fn pick(&self, targets: &[CaptureTarget]) -> Result<Option<CaptureTarget>, HostError> {
        let window = self
            .app
            .get_webview_window("main")
            .ok_or_else(|| HostError::Menu("main window not found".to_string()))?;

        let menu = Menu::new(&self.app).map_err(|err| HostError::Menu(err.to_string()))?;
        for target in targets {
            let item = MenuItem::with_id(
                &self.app,
                format!("{SOURCE_ITEM_PREFIX}{}", target.id),
                &target.label,
                true,
                None::<&str>,
            )
            .map_err(|err| HostError::Menu(err.to_string()))?;
            menu.append(&item)
                .map_err(|err| HostError::Menu(err.to_string()))?;
        }

        let rx = self.app.state::<MenuBridge>().begin();
        window
            .popup_menu(&menu)
            .map_err(|err| HostError::Menu(err.to_string()))?;

        // Resolved by handle_menu_event; superseded pickers resolve None.
        let choice = rx.await.unwrap_or(None);
        Ok(choice.and_then(|id| targets.iter().find(|target| target.id == id).cloned()))
    }
}
