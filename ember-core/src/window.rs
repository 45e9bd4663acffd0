//! Creation settings and the small enumerations shared by every backend.

use cursor_icon::CursorIcon;
use dpi::{PhysicalPosition, PhysicalSize};

/// Settings used when creating a window.
///
/// Everything except [`has_border`](Self::has_border) is fixed once the window exists; the border
/// is toggled through [`Window::set_borderless`](crate::Window::set_borderless).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WindowSettings {
    pub title: String,
    /// Initial position of the client area on the desktop.
    pub position: PhysicalPosition<i32>,
    /// Initial client area size.
    pub size: PhysicalSize<u32>,
    pub min_size: PhysicalSize<u32>,
    /// Largest client area the user can drag the window to. The frame is added on top.
    pub max_size: PhysicalSize<u32>,
    pub has_border: bool,
    pub has_sizing_frame: bool,
    /// Regular windows are normal application windows; others are tool or popup windows.
    pub is_regular_window: bool,
    pub is_topmost: bool,
    pub show_in_taskbar: bool,
    pub activate_when_first_shown: bool,
    pub allow_input: bool,
    pub allow_minimize: bool,
    pub allow_maximize: bool,
    pub allow_drag_and_drop: bool,
    pub supports_transparency: bool,
    pub fullscreen: bool,
}

impl Default for WindowSettings {
    #[inline]
    fn default() -> Self {
        Self {
            title: "ember".to_owned(),
            position: PhysicalPosition::new(100, 100),
            size: PhysicalSize::new(1280, 720),
            min_size: PhysicalSize::new(1, 1),
            max_size: PhysicalSize::new(8192, 4096),
            has_border: true,
            has_sizing_frame: true,
            is_regular_window: true,
            is_topmost: false,
            show_in_taskbar: true,
            activate_when_first_shown: true,
            allow_input: true,
            allow_minimize: true,
            allow_maximize: true,
            allow_drag_and_drop: false,
            supports_transparency: false,
            fullscreen: false,
        }
    }
}

impl WindowSettings {
    /// The default is `"ember"`.
    #[inline]
    pub fn with_title<T: Into<String>>(mut self, title: T) -> Self {
        self.title = title.into();
        self
    }

    #[inline]
    pub fn with_position(mut self, position: PhysicalPosition<i32>) -> Self {
        self.position = position;
        self
    }

    /// Sets the initial client area size.
    #[inline]
    pub fn with_size(mut self, size: PhysicalSize<u32>) -> Self {
        self.size = size;
        self
    }

    #[inline]
    pub fn with_min_size(mut self, min_size: PhysicalSize<u32>) -> Self {
        self.min_size = min_size;
        self
    }

    #[inline]
    pub fn with_max_size(mut self, max_size: PhysicalSize<u32>) -> Self {
        self.max_size = max_size;
        self
    }

    /// Whether the OS draws a caption and border around the client area.
    #[inline]
    pub fn with_border(mut self, has_border: bool) -> Self {
        self.has_border = has_border;
        self
    }

    #[inline]
    pub fn with_sizing_frame(mut self, has_sizing_frame: bool) -> Self {
        self.has_sizing_frame = has_sizing_frame;
        self
    }

    #[inline]
    pub fn with_regular_window(mut self, is_regular_window: bool) -> Self {
        self.is_regular_window = is_regular_window;
        self
    }

    #[inline]
    pub fn with_topmost(mut self, is_topmost: bool) -> Self {
        self.is_topmost = is_topmost;
        self
    }

    #[inline]
    pub fn with_taskbar_entry(mut self, show_in_taskbar: bool) -> Self {
        self.show_in_taskbar = show_in_taskbar;
        self
    }

    #[inline]
    pub fn with_activate_when_first_shown(mut self, activate: bool) -> Self {
        self.activate_when_first_shown = activate;
        self
    }

    /// Windows without input never take focus when shown.
    #[inline]
    pub fn with_input(mut self, allow_input: bool) -> Self {
        self.allow_input = allow_input;
        self
    }

    #[inline]
    pub fn with_minimize(mut self, allow_minimize: bool) -> Self {
        self.allow_minimize = allow_minimize;
        self
    }

    #[inline]
    pub fn with_maximize(mut self, allow_maximize: bool) -> Self {
        self.allow_maximize = allow_maximize;
        self
    }

    /// Registers the window as a drop target for files.
    #[inline]
    pub fn with_drag_and_drop(mut self, allow_drag_and_drop: bool) -> Self {
        self.allow_drag_and_drop = allow_drag_and_drop;
        self
    }

    #[inline]
    pub fn with_transparency(mut self, supports_transparency: bool) -> Self {
        self.supports_transparency = supports_transparency;
        self
    }

    #[inline]
    pub fn with_fullscreen(mut self, fullscreen: bool) -> Self {
        self.fullscreen = fullscreen;
        self
    }

    /// Client rectangle on the desktop the window starts with.
    pub fn client_rect(&self) -> crate::geometry::Rect {
        crate::geometry::Rect::from_position_size(self.position, self.size)
    }
}

/// The region of a window a point falls in, with the raw values of the Win32 `HT*` codes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(i32)]
pub enum HitTest {
    Transparent = -1,
    NoWhere = 0,
    Client = 1,
    Caption = 2,
    SystemMenu = 3,
    GrowBox = 4,
    Menu = 5,
    HorizontalScroll = 6,
    VerticalScroll = 7,
    MinButton = 8,
    MaxButton = 9,
    Left = 10,
    Right = 11,
    Top = 12,
    TopLeft = 13,
    TopRight = 14,
    Bottom = 15,
    BottomLeft = 16,
    BottomRight = 17,
    Border = 18,
    Object = 19,
    Close = 20,
    Help = 21,
}

impl HitTest {
    /// Every variant, ordered by raw value.
    pub const ALL: [HitTest; 23] = [
        HitTest::Transparent,
        HitTest::NoWhere,
        HitTest::Client,
        HitTest::Caption,
        HitTest::SystemMenu,
        HitTest::GrowBox,
        HitTest::Menu,
        HitTest::HorizontalScroll,
        HitTest::VerticalScroll,
        HitTest::MinButton,
        HitTest::MaxButton,
        HitTest::Left,
        HitTest::Right,
        HitTest::Top,
        HitTest::TopLeft,
        HitTest::TopRight,
        HitTest::Bottom,
        HitTest::BottomLeft,
        HitTest::BottomRight,
        HitTest::Border,
        HitTest::Object,
        HitTest::Close,
        HitTest::Help,
    ];

    pub fn from_raw(raw: i32) -> Option<Self> {
        let index = usize::try_from(raw.checked_add(1)?).ok()?;
        Self::ALL.get(index).copied()
    }

    #[inline]
    pub fn to_raw(self) -> i32 {
        self as i32
    }
}

/// What the OS shows for the mouse pointer over the client area.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Cursor {
    Icon(CursorIcon),
    Hidden,
}

impl Default for Cursor {
    fn default() -> Self {
        Cursor::Icon(CursorIcon::Default)
    }
}

impl From<CursorIcon> for Cursor {
    fn from(icon: CursorIcon) -> Self {
        Cursor::Icon(icon)
    }
}

/// The pointer shapes the engine asks for.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CursorKind {
    #[default]
    Default,
    Cross,
    Hand,
    Help,
    IBeam,
    No,
    Wait,
    SizeAll,
    SizeNesw,
    SizeNs,
    SizeNwse,
    SizeWe,
    Hidden,
}

impl From<CursorKind> for Cursor {
    fn from(kind: CursorKind) -> Self {
        let icon = match kind {
            CursorKind::Default => CursorIcon::Default,
            CursorKind::Cross => CursorIcon::Crosshair,
            CursorKind::Hand => CursorIcon::Pointer,
            CursorKind::Help => CursorIcon::Help,
            CursorKind::IBeam => CursorIcon::Text,
            CursorKind::No => CursorIcon::NotAllowed,
            CursorKind::Wait => CursorIcon::Wait,
            CursorKind::SizeAll => CursorIcon::Move,
            CursorKind::SizeNesw => CursorIcon::NeswResize,
            CursorKind::SizeNs => CursorIcon::NsResize,
            CursorKind::SizeNwse => CursorIcon::NwseResize,
            CursorKind::SizeWe => CursorIcon::EwResize,
            CursorKind::Hidden => return Cursor::Hidden,
        };
        Cursor::Icon(icon)
    }
}

/// Why a window is being closed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClosingReason {
    /// The user closed the window (close button, Alt+F4).
    User,
    EngineExit,
    /// A close event raised from gameplay or editor code.
    CloseEvent,
    Unknown,
}

/// A native show request, modelled on the Win32 `SW_*` commands.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ShowCommand {
    Show,
    ShowNoActivate,
    Hide,
    Minimize,
    Maximize,
    ShowMaximized,
    Restore,
    Normal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_test_raw_values() {
        for (i, hit) in HitTest::ALL.iter().enumerate() {
            assert_eq!(hit.to_raw(), i as i32 - 1);
            assert_eq!(HitTest::from_raw(hit.to_raw()), Some(*hit));
        }
        assert_eq!(HitTest::Client.to_raw(), 1);
        assert_eq!(HitTest::BottomRight.to_raw(), 17);
        assert_eq!(HitTest::from_raw(-2), None);
        assert_eq!(HitTest::from_raw(22), None);
        assert_eq!(HitTest::from_raw(i32::MAX), None);
        assert_eq!(HitTest::from_raw(i32::MIN), None);
    }

    #[test]
    fn default_settings() {
        let settings = WindowSettings::default();
        assert_eq!(settings.size, PhysicalSize::new(1280, 720));
        assert!(settings.has_border && settings.is_regular_window && settings.allow_input);
        assert!(!settings.allow_drag_and_drop && !settings.fullscreen);
        assert_eq!(settings.client_rect().size(), settings.size);
    }

    #[test]
    fn builder_sets_fields() {
        let settings = WindowSettings::default()
            .with_title("game")
            .with_border(false)
            .with_topmost(true)
            .with_size(PhysicalSize::new(640, 480));
        assert_eq!(settings.title, "game");
        assert!(!settings.has_border);
        assert!(settings.is_topmost);
        assert_eq!(settings.client_rect().width(), 640);
    }

    #[test]
    fn cursor_kinds() {
        assert_eq!(Cursor::from(CursorKind::Hidden), Cursor::Hidden);
        assert_eq!(Cursor::from(CursorKind::IBeam), Cursor::Icon(CursorIcon::Text));
        assert_eq!(Cursor::from(CursorKind::default()), Cursor::default());
    }
}
