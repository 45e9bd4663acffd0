use bitflags::bitflags;
use dpi::{PhysicalPosition, PhysicalSize};

use crate::geometry::Rect;
use crate::window::{Cursor, WindowSettings};

/// DPI at which one logical pixel is one physical pixel.
pub const BASE_DPI: u32 = 96;

/// Scale factor for a monitor DPI.
pub fn dpi_to_scale_factor(dpi: u32) -> f32 {
    dpi as f32 / BASE_DPI as f32
}

/// Everything the adapter knows about its window between two OS notifications.
#[derive(Debug, Clone)]
pub struct WindowState {
    pub settings: WindowSettings,
    pub flags: WindowFlags,

    pub client_size: PhysicalSize<u32>,
    /// Size last reported through `on_resize`.
    pub last_resize: Option<PhysicalSize<u32>>,

    pub dpi: u32,
    pub dpi_scale: f32,

    pub title: String,
    pub cursor: Cursor,
    /// Desktop rectangle the cursor is confined to while [`WindowFlags::CLIPPING_CURSOR`] is set.
    pub clip_rect: Rect,
    pub mouse: MouseTracking,

    /// Outer rectangle to return to when leaving fullscreen.
    pub saved_rect: Option<Rect>,
}

/// Mouse capture bookkeeping, used by the engine for camera style dragging.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct MouseTracking {
    /// Wrap the cursor around the monitor edges and accumulate the jumps in `offset`.
    pub use_screen_offset: bool,
    pub screen: Rect,
    pub offset: PhysicalPosition<i32>,
    pub horizontal_flip: bool,
    pub vertical_flip: bool,
}

bitflags! {
    #[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct WindowFlags: u32 {
        const VISIBLE              = 1 << 0;
        const FOCUSED              = 1 << 1;
        const MINIMIZED            = 1 << 2;
        const MAXIMIZED            = 1 << 3;
        /// The user is dragging the frame; size checks wait for the modal loop to end.
        const RESIZING             = 1 << 4;
        /// Size notifications caused by entering or leaving fullscreen are ignored.
        const SWITCHING_FULLSCREEN = 1 << 5;
        const FULLSCREEN           = 1 << 6;
        const DURING_MAXIMIZE      = 1 << 7;
        /// A cursor clip was requested.
        const CLIPPING_CURSOR      = 1 << 8;
        /// The requested clip is currently applied to the OS cursor.
        const CLIP_CURSOR_SET      = 1 << 9;
        const TRACKING_MOUSE       = 1 << 10;
        const MOUSE_LEAVE_ARMED    = 1 << 11;
        const DRAG_AND_DROP        = 1 << 12;
        const CLOSED               = 1 << 13;
    }
}

impl WindowState {
    pub fn new(settings: WindowSettings, dpi: u32) -> Self {
        Self {
            client_size: settings.size,
            last_resize: None,
            dpi,
            dpi_scale: dpi_to_scale_factor(dpi),
            title: settings.title.clone(),
            cursor: Cursor::default(),
            clip_rect: Rect::default(),
            mouse: MouseTracking::default(),
            saved_rect: None,
            settings,
            flags: WindowFlags::empty(),
        }
    }

    pub fn set_dpi(&mut self, dpi: u32) {
        self.dpi = dpi;
        self.dpi_scale = dpi_to_scale_factor(dpi);
    }

    #[inline]
    pub fn has_border(&self) -> bool {
        self.settings.has_border
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_follows_dpi() {
        let mut state = WindowState::new(WindowSettings::default(), BASE_DPI);
        assert_eq!(state.dpi_scale, 1.0);
        state.set_dpi(144);
        assert_eq!(state.dpi_scale, 1.5);
    }

    #[test]
    fn initial_state_mirrors_settings() {
        let settings = WindowSettings::default().with_title("t").with_fullscreen(true);
        let state = WindowState::new(settings.clone(), 120);
        assert_eq!(state.title, "t");
        assert_eq!(state.client_size, settings.size);
        // Fullscreen is entered by the backend once the window exists.
        assert!(state.flags.is_empty());
        assert_eq!(state.last_resize, None);
    }
}
