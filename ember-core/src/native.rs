//! The OS calls a window backend has to provide.

use dpi::{PhysicalPosition, PhysicalSize};

use crate::error::OsError;
use crate::geometry::Rect;
use crate::window::{Cursor, ShowCommand, WindowSettings};

/// Raw operations on one native window handle.
///
/// Implementations perform the OS call and nothing else: no caching, no callbacks. Calls may
/// synchronously deliver messages back to the window, so the caller must not hold any lock on
/// the window state while calling in. Positions are desktop coordinates unless stated otherwise.
pub trait NativeWindow {
    fn show(&self, command: ShowCommand);

    /// Current client area size as reported by the OS.
    fn client_size(&self) -> PhysicalSize<u32>;

    fn outer_position(&self) -> PhysicalPosition<i32>;

    fn outer_size(&self) -> PhysicalSize<u32>;

    /// Moves and/or resizes the outer window. `None` keeps the current value.
    fn set_window_pos(
        &self,
        position: Option<PhysicalPosition<i32>>,
        size: Option<PhysicalSize<u32>>,
        activate: bool,
    );

    /// Grows a client rectangle by the current frame.
    fn adjust_client_rect(&self, client: Rect) -> Rect;

    /// Total size the frame adds around the client area.
    fn frame_size(&self) -> PhysicalSize<u32>;

    /// Restyles the window with or without the OS frame and refreshes it.
    fn apply_border(&self, has_border: bool, settings: &WindowSettings);

    /// Forces the OS to recompute the non-client area.
    fn refresh_frame(&self);

    fn is_minimized(&self) -> bool;

    /// The restore placement of the window is maximized.
    fn is_placement_maximized(&self) -> bool;

    fn set_active(&self);

    /// Brings a non-regular window to the top of the z-order.
    fn raise(&self, topmost: bool, activate: bool);

    fn has_focus(&self) -> bool;

    fn set_focus(&self);

    fn is_foreground(&self) -> bool;

    /// Flashes the taskbar entry to request attention.
    fn flash(&self);

    fn screen_to_client(&self, position: PhysicalPosition<i32>) -> PhysicalPosition<i32>;

    fn client_to_screen(&self, position: PhysicalPosition<i32>) -> PhysicalPosition<i32>;

    /// Bounds of the monitor nearest to the window.
    fn monitor_bounds(&self) -> Rect;

    /// Work area of the monitor nearest to the window, excluding the taskbar.
    fn monitor_work_area(&self) -> Rect;

    fn set_opacity(&self, alpha: u8);

    fn opacity(&self) -> u8;

    /// Returns `false` if the OS rejected the title.
    fn set_title(&self, title: &str) -> bool;

    fn set_capture(&self);

    fn release_capture(&self);

    /// Confines the cursor to a desktop rectangle, or frees it.
    fn clip_cursor(&self, rect: Option<Rect>);

    fn apply_cursor(&self, cursor: Cursor);

    fn set_cursor_position(&self, position: PhysicalPosition<i32>);

    /// Requests a single mouse leave notification.
    fn arm_mouse_leave(&self);

    fn set_timer(&self, id: usize, period_ms: u32);

    fn kill_timer(&self, id: usize);

    /// Desktop composition is available, so a borderless window keeps its shadow.
    fn is_composition_enabled(&self) -> bool;

    fn dpi(&self) -> u32;

    /// Unregisters the window as a drop target.
    fn revoke_drag_drop(&self) -> Result<(), OsError>;

    fn destroy(&self) -> Result<(), OsError>;

    /// Asks the message loop of the calling thread to stop.
    fn post_quit(&self, exit_code: i32);
}
