//! QuickRec - minimal screen recordings.
//!
//! This is the main library crate for the QuickRec application. It wires
//! the Tauri shell to the recording session core: source selection via a
//! native popup menu, a previewed capture stream, and a start/stop
//! lifecycle that finalizes into a single WebM file.

pub mod capture;
pub mod commands;
pub mod host;
pub mod recorder;
pub mod utils;

use capture::{SourceSelector, SystemEnumerator};
use commands::recording::RecorderState;
use commands::sources::SelectorState;
use host::{MenuBridge, MenuSourcePicker, NativeSaveDialog, StreamBridge, WebviewStreamSource};
use recorder::SessionCoordinator;
use std::sync::Arc;
use tauri::{Emitter, Manager};
use tokio::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Event carrying lifecycle updates to the webview
pub const SESSION_EVENT: &str = "session:event";

/// Initialize the application
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Initialize tracing/logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quickrec=debug,tauri=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting QuickRec v{}", env!("CARGO_PKG_VERSION"));

    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .manage(MenuBridge::default())
        .manage(StreamBridge::default())
        .setup(|app| {
            let handle = app.handle().clone();

            let selector = SourceSelector::new(
                Arc::new(SystemEnumerator),
                Arc::new(MenuSourcePicker::new(handle.clone())),
            );
            let coordinator = SessionCoordinator::new(
                Arc::new(WebviewStreamSource::new(handle.clone())),
                Arc::new(NativeSaveDialog::new(handle.clone())),
            );

            // Forward session events to the webview
            let mut events = coordinator.subscribe();
            tauri::async_runtime::spawn(async move {
                while let Ok(event) = events.recv().await {
                    if let Err(err) = handle.emit(SESSION_EVENT, &event) {
                        tracing::warn!("failed to forward session event: {err}");
                    }
                }
            });

            app.manage(SelectorState {
                selector: Arc::new(selector),
            });
            app.manage(RecorderState {
                coordinator: Arc::new(Mutex::new(coordinator)),
            });
            Ok(())
        })
        .on_menu_event(|app, event| {
            let bridge = app.state::<MenuBridge>();
            if !bridge.handle_menu_event(event.id().as_ref()) {
                tracing::debug!(id = event.id().as_ref(), "unhandled menu event");
            }
        })
        .invoke_handler(tauri::generate_handler![
            // Source selection commands
            commands::sources::list_capture_targets,
            commands::sources::choose_source,
            commands::sources::check_capture_permission,
            commands::sources::request_capture_permission,
            // Recording commands
            commands::recording::start_recording,
            commands::recording::push_recording_chunk,
            commands::recording::stop_recording,
            commands::recording::get_session_state,
            commands::recording::notify_stream_opened,
            commands::recording::notify_stream_failed,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
