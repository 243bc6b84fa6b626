//! Production host-service adapters
//!
//! Implements the capture and recorder seams on top of the Tauri shell:
//! the native popup menu, the webview-owned capture stream, and the
//! native save dialog.

pub mod dialog;
pub mod menu;
pub mod stream;

pub use dialog::NativeSaveDialog;
pub use menu::{MenuBridge, MenuSourcePicker};
pub use stream::{StreamBridge, WebviewStreamSource};
