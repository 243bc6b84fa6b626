//! macOS capture target enumeration
//!
//! Screens come from CGDisplay; windows from the CGWindowList API.

use super::traits::{CaptureTarget, HostError, TargetKind};
use core_foundation::base::{CFType, TCFType};
use core_foundation::dictionary::{CFDictionary, CFDictionaryRef};
use core_foundation::number::CFNumber;
use core_foundation::string::CFString;
use core_graphics::access::ScreenCaptureAccess;
use core_graphics::display::CGDisplay;
use core_graphics::window::{
    copy_window_info, kCGNullWindowID, kCGWindowListExcludeDesktopElements,
    kCGWindowListOptionOnScreenOnly,
};

/// List capture targets of the requested kinds
pub fn list_targets(kinds: &[TargetKind]) -> Result<Vec<CaptureTarget>, HostError> {
    let mut targets = Vec::new();
    for kind in kinds {
        match kind {
            TargetKind::Window => targets.extend(list_windows()),
            TargetKind::Screen => targets.extend(list_screens()?),
        }
    }
    Ok(targets)
}

fn list_screens() -> Result<Vec<CaptureTarget>, HostError> {
    let display_ids = CGDisplay::active_displays()
        .map_err(|code| HostError::Unavailable(format!("CGGetActiveDisplayList failed: {code}")))?;

    Ok(display_ids
        .iter()
        .enumerate()
        .map(|(index, &id)| {
            let display = CGDisplay::new(id);
            let label = if display.is_main() {
                "Main Display".to_string()
            } else {
                format!("Display {}", index + 1)
            };
            CaptureTarget::new(format!("screen:{id}"), label, TargetKind::Screen)
        })
        .collect())
}

fn list_windows() -> Vec<CaptureTarget> {
    let Some(window_info) = copy_window_info(
        kCGWindowListOptionOnScreenOnly | kCGWindowListExcludeDesktopElements,
        kCGNullWindowID,
    ) else {
        tracing::warn!("CGWindowListCopyWindowInfo returned nothing");
        return Vec::new();
    };

    let mut targets = Vec::new();
    for item in window_info.iter() {
        let entry = unsafe {
            CFDictionary::<CFString, CFType>::wrap_under_get_rule(*item as CFDictionaryRef)
        };

        // Skip overlays like the menu bar and the dock
        if number_value(&entry, "kCGWindowLayer").unwrap_or(0) != 0 {
            continue;
        }

        let Some(number) = number_value(&entry, "kCGWindowNumber") else {
            continue;
        };

        let owner = string_value(&entry, "kCGWindowOwnerName");
        let title = string_value(&entry, "kCGWindowName").filter(|title| !title.is_empty());
        let label = match (owner, title) {
            (Some(owner), Some(title)) => format!("{owner}: {title}"),
            (Some(owner), None) => owner,
            (None, Some(title)) => title,
            (None, None) => continue,
        };

        targets.push(CaptureTarget::new(
            format!("window:{number}"),
            label,
            TargetKind::Window,
        ));
    }
    targets
}

fn string_value(entry: &CFDictionary<CFString, CFType>, key: &'static str) -> Option<String> {
    let key = CFString::from_static_string(key);
    entry
        .find(&key)
        .and_then(|value| value.downcast::<CFString>())
        .map(|value| value.to_string())
}

fn number_value(entry: &CFDictionary<CFString, CFType>, key: &'static str) -> Option<i64> {
    let key = CFString::from_static_string(key);
    entry
        .find(&key)
        .and_then(|value| value.downcast::<CFNumber>())
        .and_then(|value| value.to_i64())
}

/// Check if screen recording permission is granted
pub fn has_screen_recording_permission() -> bool {
    ScreenCaptureAccess::default().preflight()
}

/// Request screen recording permission
///
/// The actual permission dialog is shown by the system. Returns true if
/// permission was already granted.
pub fn request_screen_recording_permission() -> bool {
    ScreenCaptureAccess::default().request()
}
