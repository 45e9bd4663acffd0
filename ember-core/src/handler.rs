use dpi::{PhysicalPosition, PhysicalSize};

use crate::event::DragEvent;
use crate::window::{ClosingReason, HitTest};

/// Engine side receiver of window notifications.
///
/// Every method has a no-op default. Callbacks take `&self`: a handler may be entered again
/// from inside one of its own callbacks when that callback triggers OS messages, so handlers
/// keep their mutable state behind `Cell`/`RefCell`.
pub trait WindowHandler {
    /// The client area changed to `size`. Both dimensions are positive.
    fn on_resize(&self, size: PhysicalSize<u32>) {
        let _ = size;
    }

    fn on_got_focus(&self) {}

    fn on_lost_focus(&self) {}

    /// Classifies a desktop point. `None` leaves the decision to the OS.
    fn on_hit_test(&self, position: PhysicalPosition<i32>) -> Option<HitTest> {
        let _ = position;
        None
    }

    /// A left click in the non-client area. Return `true` to suppress the OS handling.
    fn on_left_button_hit(&self, hit: HitTest) -> bool {
        let _ = hit;
        false
    }

    /// The window is about to close. Return `true` to cancel.
    fn on_closing(&self, reason: ClosingReason) -> bool {
        let _ = reason;
        false
    }

    /// The window is gone. Called once.
    fn on_closed(&self) {}

    fn on_shown(&self) {}

    fn on_hidden(&self) {}

    fn on_dpi_changed(&self, dpi: u32, scale: f32) {
        let _ = (dpi, scale);
    }

    fn on_fullscreen_changed(&self, fullscreen: bool) {
        let _ = fullscreen;
    }

    fn on_drag(&self, event: &DragEvent) {
        let _ = event;
    }

    /// The system is about to suspend.
    fn on_system_suspend(&self) {}

    fn on_system_resume(&self) {}
}

/// A handler that ignores everything.
impl WindowHandler for () {}
