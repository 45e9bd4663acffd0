//! Window styles derived from [`WindowSettings`].

use bitflags::bitflags;
use ember_core::window::WindowSettings;
use windows_sys::Win32::UI::WindowsAndMessaging::{
    WINDOW_EX_STYLE, WINDOW_STYLE, WS_BORDER, WS_CAPTION, WS_CLIPCHILDREN, WS_CLIPSIBLINGS,
    WS_EX_APPWINDOW, WS_EX_LAYERED, WS_EX_NOACTIVATE, WS_EX_TOOLWINDOW, WS_EX_TOPMOST,
    WS_EX_TRANSPARENT, WS_EX_WINDOWEDGE, WS_MAXIMIZEBOX, WS_MINIMIZEBOX, WS_OVERLAPPED,
    WS_POPUP, WS_SYSMENU, WS_THICKFRAME,
};

bitflags! {
    /// The settings that influence the Win32 styles of a window.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct StyleFlags: u32 {
        const BORDER          = 1 << 0;
        const SIZING_FRAME    = 1 << 1;
        const REGULAR         = 1 << 2;
        const TOPMOST         = 1 << 3;
        const ON_TASKBAR      = 1 << 4;
        const ACTIVATE        = 1 << 5;
        const INPUT           = 1 << 6;
        const MINIMIZE_BOX    = 1 << 7;
        const MAXIMIZE_BOX    = 1 << 8;
        const TRANSPARENCY    = 1 << 9;
    }
}

/// Styles a bordered window owns and a borderless one drops.
const BORDER_STYLES: WINDOW_STYLE = WS_OVERLAPPED | WS_SYSMENU | WS_BORDER | WS_CAPTION;
/// Styles a borderless window owns and a bordered one drops.
const BORDERLESS_STYLES: WINDOW_STYLE = WS_POPUP | WS_CLIPCHILDREN | WS_CLIPSIBLINGS;

impl StyleFlags {
    pub fn from_settings(settings: &WindowSettings) -> Self {
        let mut flags = StyleFlags::empty();
        flags.set(StyleFlags::BORDER, settings.has_border);
        flags.set(StyleFlags::SIZING_FRAME, settings.has_sizing_frame);
        flags.set(StyleFlags::REGULAR, settings.is_regular_window);
        flags.set(StyleFlags::TOPMOST, settings.is_topmost);
        flags.set(StyleFlags::ON_TASKBAR, settings.show_in_taskbar);
        flags.set(StyleFlags::ACTIVATE, settings.activate_when_first_shown);
        flags.set(StyleFlags::INPUT, settings.allow_input);
        flags.set(StyleFlags::MINIMIZE_BOX, settings.allow_minimize);
        flags.set(StyleFlags::MAXIMIZE_BOX, settings.allow_maximize);
        flags.set(StyleFlags::TRANSPARENCY, settings.supports_transparency);
        flags
    }

    /// Styles passed to `CreateWindowExW`.
    pub fn to_window_styles(self) -> (WINDOW_STYLE, WINDOW_EX_STYLE) {
        let (mut style, mut style_ex) = (WS_POPUP, 0);

        if self.contains(StyleFlags::TRANSPARENCY) {
            style_ex |= WS_EX_LAYERED;
        }
        if !self.contains(StyleFlags::ACTIVATE) {
            style_ex |= WS_EX_NOACTIVATE;
        }
        if self.contains(StyleFlags::ON_TASKBAR) {
            style_ex |= WS_EX_APPWINDOW;
        } else {
            style_ex |= WS_EX_TOOLWINDOW;
        }
        if self.contains(StyleFlags::TOPMOST) {
            style_ex |= WS_EX_TOPMOST;
        }
        if !self.contains(StyleFlags::INPUT) {
            style_ex |= WS_EX_TRANSPARENT;
        }

        style |= self.frame_buttons();

        if self.contains(StyleFlags::BORDER) {
            style |= BORDER_STYLES;
        } else {
            style |= WS_CLIPCHILDREN | WS_CLIPSIBLINGS;
            if self.contains(StyleFlags::REGULAR) {
                style |= WS_THICKFRAME | WS_SYSMENU;
            }
            // Keeps the minimize and maximize animations; the caption is removed again in
            // `WM_NCCALCSIZE`.
            style |= WS_CAPTION;
            style_ex |= WS_EX_WINDOWEDGE;
        }

        (style, style_ex)
    }

    /// Rewrites the style of an existing window to gain or lose the OS frame.
    pub fn restyle(self, mut style: WINDOW_STYLE) -> WINDOW_STYLE {
        if self.contains(StyleFlags::BORDER) {
            style &= !BORDERLESS_STYLES;
            style |= self.frame_buttons() | BORDER_STYLES;
        } else {
            style &= !(WS_THICKFRAME | BORDER_STYLES);
            style |= BORDERLESS_STYLES;
            if self.contains(StyleFlags::REGULAR) {
                style |= WS_THICKFRAME | WS_SYSMENU;
            }
        }
        style
    }

    fn frame_buttons(self) -> WINDOW_STYLE {
        let mut style = 0;
        if self.contains(StyleFlags::MAXIMIZE_BOX) {
            style |= WS_MAXIMIZEBOX;
        }
        if self.contains(StyleFlags::MINIMIZE_BOX) {
            style |= WS_MINIMIZEBOX;
        }
        if self.contains(StyleFlags::SIZING_FRAME) {
            style |= WS_THICKFRAME;
        }
        style
    }
}
