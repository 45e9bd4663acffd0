//! An in-memory window backend.
//!
//! [`HeadlessWindow`] keeps the geometry a real OS window would have and records every mutating
//! call it receives. It never sends messages back; callers feed [`NativeEvent`]s themselves.
//! Useful for running engine code without a display and for tests.
//!
//! [`NativeEvent`]: crate::event::NativeEvent

use std::cell::{Cell, RefCell};
use std::mem;

use dpi::{PhysicalPosition, PhysicalSize};

use crate::error::OsError;
use crate::geometry::Rect;
use crate::native::NativeWindow;
use crate::state::BASE_DPI;
use crate::window::{Cursor, ShowCommand, WindowSettings};

/// Frame thickness of a bordered headless window: left, top (caption), right, bottom.
pub const FRAME_INSETS: [i32; 4] = [8, 31, 8, 8];

/// Default simulated monitor, with a 40 pixel taskbar at the bottom.
pub const MONITOR: Rect = Rect::new(0, 0, 1920, 1080);
pub const WORK_AREA: Rect = Rect::new(0, 0, 1920, 1040);

/// A mutating call received by a [`HeadlessWindow`].
#[derive(Debug, Clone, PartialEq)]
pub enum NativeCall {
    Show(ShowCommand),
    SetWindowPos {
        position: Option<PhysicalPosition<i32>>,
        size: Option<PhysicalSize<u32>>,
        activate: bool,
    },
    ApplyBorder(bool),
    RefreshFrame,
    SetActive,
    Raise {
        topmost: bool,
        activate: bool,
    },
    SetFocus,
    Flash,
    SetOpacity(u8),
    SetTitle(String),
    SetCapture,
    ReleaseCapture,
    ClipCursor(Option<Rect>),
    ApplyCursor(Cursor),
    SetCursorPosition(PhysicalPosition<i32>),
    ArmMouseLeave,
    SetTimer {
        id: usize,
        period_ms: u32,
    },
    KillTimer(usize),
    RevokeDragDrop,
    Destroy,
    PostQuit(i32),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Placement {
    Normal,
    Minimized,
    Maximized,
}

#[derive(Debug)]
struct Geometry {
    outer: Rect,
    /// Outer rectangle to go back to when leaving a minimized or maximized placement.
    restored: Rect,
    placement: Placement,
    has_border: bool,
}

impl Geometry {
    fn insets(&self) -> [i32; 4] {
        if self.has_border {
            FRAME_INSETS
        } else {
            [0; 4]
        }
    }

    fn client_rect(&self) -> Rect {
        if self.placement == Placement::Minimized {
            return Rect::from_position_size(self.outer.position(), PhysicalSize::new(0, 0));
        }

        let [left, top, right, bottom] = self.insets();
        Rect::new(
            self.outer.left + left,
            self.outer.top + top,
            self.outer.right - right,
            self.outer.bottom - bottom,
        )
    }

    fn grow(&self, client: Rect) -> Rect {
        let [left, top, right, bottom] = self.insets();
        Rect::new(
            client.left - left,
            client.top - top,
            client.right + right,
            client.bottom + bottom,
        )
    }
}

/// A simulated native window.
#[derive(Debug)]
pub struct HeadlessWindow {
    geometry: RefCell<Geometry>,
    monitor: Cell<Rect>,
    work_area: Cell<Rect>,
    visible: Cell<bool>,
    focused: Cell<bool>,
    foreground: Cell<bool>,
    composition: Cell<bool>,
    reject_titles: Cell<bool>,
    dpi: Cell<u32>,
    opacity: Cell<u8>,
    title: RefCell<String>,
    destroyed: Cell<bool>,
    calls: RefCell<Vec<NativeCall>>,
}

impl HeadlessWindow {
    /// Creates a hidden window the way the Win32 backend would for `settings`.
    pub fn new(settings: &WindowSettings) -> Self {
        let mut geometry = Geometry {
            outer: Rect::default(),
            restored: Rect::default(),
            placement: Placement::Normal,
            has_border: settings.has_border,
        };
        geometry.outer = geometry.grow(settings.client_rect());
        geometry.restored = geometry.outer;

        Self {
            geometry: RefCell::new(geometry),
            monitor: Cell::new(MONITOR),
            work_area: Cell::new(WORK_AREA),
            visible: Cell::new(false),
            focused: Cell::new(false),
            foreground: Cell::new(false),
            composition: Cell::new(true),
            reject_titles: Cell::new(false),
            dpi: Cell::new(BASE_DPI),
            opacity: Cell::new(u8::MAX),
            title: RefCell::new(settings.title.clone()),
            destroyed: Cell::new(false),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn with_dpi(self, dpi: u32) -> Self {
        self.dpi.set(dpi);
        self
    }

    pub fn with_monitor(self, monitor: Rect, work_area: Rect) -> Self {
        self.monitor.set(monitor);
        self.work_area.set(work_area);
        self
    }

    pub fn with_composition(self, enabled: bool) -> Self {
        self.composition.set(enabled);
        self
    }

    /// Calls received since the last [`take_calls`](Self::take_calls).
    pub fn take_calls(&self) -> Vec<NativeCall> {
        mem::take(&mut *self.calls.borrow_mut())
    }

    /// Makes [`NativeWindow::set_title`] fail while `reject` is set.
    pub fn reject_titles(&self, reject: bool) {
        self.reject_titles.set(reject);
    }

    /// Resizes the client area as if the user dragged the frame.
    pub fn set_client_size(&self, size: PhysicalSize<u32>) {
        let mut geometry = self.geometry.borrow_mut();
        let client = Rect::from_position_size(geometry.client_rect().position(), size);
        geometry.outer = geometry.grow(client);
    }

    /// Simulates the OS granting or taking keyboard focus and foreground status.
    pub fn set_focused(&self, focused: bool) {
        self.focused.set(focused);
        self.foreground.set(focused);
    }

    pub fn title(&self) -> String {
        self.title.borrow().clone()
    }

    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    pub fn has_border(&self) -> bool {
        self.geometry.borrow().has_border
    }

    pub fn outer_rect(&self) -> Rect {
        self.geometry.borrow().outer
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed.get()
    }

    fn record(&self, call: NativeCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl NativeWindow for HeadlessWindow {
    fn show(&self, command: ShowCommand) {
        self.record(NativeCall::Show(command));

        let mut geometry = self.geometry.borrow_mut();
        if geometry.placement == Placement::Normal && command != ShowCommand::Hide {
            geometry.restored = geometry.outer;
        }

        match command {
            ShowCommand::Hide => {
                self.visible.set(false);
                return;
            },
            ShowCommand::Minimize => geometry.placement = Placement::Minimized,
            ShowCommand::Maximize | ShowCommand::ShowMaximized => {
                geometry.placement = Placement::Maximized;
                geometry.outer = if geometry.has_border {
                    geometry.grow(self.work_area.get())
                } else {
                    self.work_area.get()
                };
            },
            ShowCommand::Restore | ShowCommand::Normal => {
                if geometry.placement != Placement::Normal {
                    geometry.placement = Placement::Normal;
                    geometry.outer = geometry.restored;
                }
            },
            ShowCommand::Show | ShowCommand::ShowNoActivate => (),
        }

        self.visible.set(true);
        if matches!(command, ShowCommand::Show | ShowCommand::Maximize | ShowCommand::Restore) {
            self.set_focused(true);
        }
    }

    fn client_size(&self) -> PhysicalSize<u32> {
        self.geometry.borrow().client_rect().size()
    }

    fn outer_position(&self) -> PhysicalPosition<i32> {
        self.geometry.borrow().outer.position()
    }

    fn outer_size(&self) -> PhysicalSize<u32> {
        self.geometry.borrow().outer.size()
    }

    fn set_window_pos(
        &self,
        position: Option<PhysicalPosition<i32>>,
        size: Option<PhysicalSize<u32>>,
        activate: bool,
    ) {
        self.record(NativeCall::SetWindowPos { position, size, activate });

        let mut geometry = self.geometry.borrow_mut();
        let position = position.unwrap_or(geometry.outer.position());
        let size = size.unwrap_or(geometry.outer.size());
        geometry.outer = Rect::from_position_size(position, size);
        if activate {
            self.set_focused(true);
        }
    }

    fn adjust_client_rect(&self, client: Rect) -> Rect {
        self.geometry.borrow().grow(client)
    }

    fn frame_size(&self) -> PhysicalSize<u32> {
        let [left, top, right, bottom] = self.geometry.borrow().insets();
        PhysicalSize::new((left + right) as u32, (top + bottom) as u32)
    }

    fn apply_border(&self, has_border: bool, _settings: &WindowSettings) {
        self.record(NativeCall::ApplyBorder(has_border));

        // Restyling keeps the outer rectangle, the client area absorbs the difference.
        self.geometry.borrow_mut().has_border = has_border;
    }

    fn refresh_frame(&self) {
        self.record(NativeCall::RefreshFrame);
    }

    fn is_minimized(&self) -> bool {
        self.geometry.borrow().placement == Placement::Minimized
    }

    fn is_placement_maximized(&self) -> bool {
        self.geometry.borrow().placement == Placement::Maximized
    }

    fn set_active(&self) {
        self.record(NativeCall::SetActive);
        self.set_focused(true);
    }

    fn raise(&self, topmost: bool, activate: bool) {
        self.record(NativeCall::Raise { topmost, activate });
        if activate {
            self.set_focused(true);
        }
    }

    fn has_focus(&self) -> bool {
        self.focused.get()
    }

    fn set_focus(&self) {
        self.record(NativeCall::SetFocus);
        self.focused.set(true);
    }

    fn is_foreground(&self) -> bool {
        self.foreground.get()
    }

    fn flash(&self) {
        self.record(NativeCall::Flash);
    }

    fn screen_to_client(&self, position: PhysicalPosition<i32>) -> PhysicalPosition<i32> {
        let origin = self.geometry.borrow().client_rect().position();
        PhysicalPosition::new(position.x - origin.x, position.y - origin.y)
    }

    fn client_to_screen(&self, position: PhysicalPosition<i32>) -> PhysicalPosition<i32> {
        let origin = self.geometry.borrow().client_rect().position();
        PhysicalPosition::new(position.x + origin.x, position.y + origin.y)
    }

    fn monitor_bounds(&self) -> Rect {
        self.monitor.get()
    }

    fn monitor_work_area(&self) -> Rect {
        self.work_area.get()
    }

    fn set_opacity(&self, alpha: u8) {
        self.record(NativeCall::SetOpacity(alpha));
        self.opacity.set(alpha);
    }

    fn opacity(&self) -> u8 {
        self.opacity.get()
    }

    fn set_title(&self, title: &str) -> bool {
        self.record(NativeCall::SetTitle(title.to_owned()));
        if self.reject_titles.get() {
            return false;
        }
        *self.title.borrow_mut() = title.to_owned();
        true
    }

    fn set_capture(&self) {
        self.record(NativeCall::SetCapture);
    }

    fn release_capture(&self) {
        self.record(NativeCall::ReleaseCapture);
    }

    fn clip_cursor(&self, rect: Option<Rect>) {
        self.record(NativeCall::ClipCursor(rect));
    }

    fn apply_cursor(&self, cursor: Cursor) {
        self.record(NativeCall::ApplyCursor(cursor));
    }

    fn set_cursor_position(&self, position: PhysicalPosition<i32>) {
        self.record(NativeCall::SetCursorPosition(position));
    }

    fn arm_mouse_leave(&self) {
        self.record(NativeCall::ArmMouseLeave);
    }

    fn set_timer(&self, id: usize, period_ms: u32) {
        self.record(NativeCall::SetTimer { id, period_ms });
    }

    fn kill_timer(&self, id: usize) {
        self.record(NativeCall::KillTimer(id));
    }

    fn is_composition_enabled(&self) -> bool {
        self.composition.get()
    }

    fn dpi(&self) -> u32 {
        self.dpi.get()
    }

    fn revoke_drag_drop(&self) -> Result<(), OsError> {
        self.record(NativeCall::RevokeDragDrop);
        if self.destroyed.get() {
            return Err(os_error!("window already destroyed"));
        }
        Ok(())
    }

    fn destroy(&self) -> Result<(), OsError> {
        self.record(NativeCall::Destroy);
        if self.destroyed.replace(true) {
            return Err(os_error!("invalid window handle"));
        }
        self.visible.set(false);
        self.focused.set(false);
        Ok(())
    }

    fn post_quit(&self, exit_code: i32) {
        self.record(NativeCall::PostQuit(exit_code));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bordered_window_grows_by_frame() {
        let settings = WindowSettings::default();
        let window = HeadlessWindow::new(&settings);
        assert_eq!(window.client_size(), settings.size);
        assert_eq!(window.outer_size(), PhysicalSize::new(1280 + 16, 720 + 39));
        assert_eq!(window.client_to_screen(PhysicalPosition::new(0, 0)), settings.position);
        assert_eq!(window.frame_size(), PhysicalSize::new(16, 39));
    }

    #[test]
    fn maximize_and_restore() {
        let settings = WindowSettings::default().with_border(false);
        let window = HeadlessWindow::new(&settings);
        window.show(ShowCommand::Maximize);
        assert!(window.is_placement_maximized());
        assert_eq!(window.outer_rect(), WORK_AREA);

        window.show(ShowCommand::Restore);
        assert!(!window.is_placement_maximized());
        assert_eq!(window.outer_rect(), settings.client_rect());
    }

    #[test]
    fn minimized_client_is_empty() {
        let window = HeadlessWindow::new(&WindowSettings::default());
        window.show(ShowCommand::Minimize);
        assert!(window.is_minimized());
        assert_eq!(window.client_size(), PhysicalSize::new(0, 0));
    }

    #[test]
    fn destroy_twice_fails() {
        let window = HeadlessWindow::new(&WindowSettings::default());
        assert!(window.destroy().is_ok());
        assert!(window.destroy().is_err());
        assert_eq!(window.take_calls(), [NativeCall::Destroy, NativeCall::Destroy]);
    }
}
