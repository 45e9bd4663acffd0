//! The platform independent window object.

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use dpi::{PhysicalPosition, PhysicalSize};
use tracing::{debug, warn};

use crate::event::DragEvent;
use crate::geometry::Rect;
use crate::handler::WindowHandler;
use crate::native::NativeWindow;
use crate::state::{WindowFlags, WindowState};
use crate::window::{ClosingReason, Cursor, ShowCommand, WindowSettings};

mod dispatch;

/// Timer restarted on every mouse move while the mouse is tracked.
pub const MOUSE_STOP_TIMER: usize = 1;
/// Milliseconds without movement before the mouse counts as stopped.
pub const MOUSE_STOP_DELAY: u32 = 100;

/// A native window together with its state and the engine handler it reports to.
///
/// The state lock is only taken for short reads and writes. It is released before every call
/// into `N` and before every handler callback, because both may re-enter the window.
pub struct Window<N: NativeWindow> {
    native: N,
    state: Mutex<WindowState>,
    handler: Box<dyn WindowHandler>,
}

impl<N: NativeWindow> fmt::Debug for Window<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Window").field("state", &*self.state_lock()).finish_non_exhaustive()
    }
}

impl<N: NativeWindow> Window<N> {
    /// Wraps an existing native window. The DPI is read from the backend.
    pub fn new(native: N, settings: WindowSettings, handler: Box<dyn WindowHandler>) -> Self {
        let dpi = native.dpi();
        Self { native, state: Mutex::new(WindowState::new(settings, dpi)), handler }
    }

    #[inline]
    pub fn native(&self) -> &N {
        &self.native
    }

    #[inline]
    pub fn handler(&self) -> &dyn WindowHandler {
        &*self.handler
    }

    pub(crate) fn state_lock(&self) -> MutexGuard<'_, WindowState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// A snapshot of the window state.
    pub fn state(&self) -> WindowState {
        self.state_lock().clone()
    }

    #[inline]
    pub fn flags(&self) -> WindowFlags {
        self.state_lock().flags
    }

    fn set_flags(&self, flags: WindowFlags, value: bool) {
        self.state_lock().flags.set(flags, value);
    }

    pub fn settings(&self) -> WindowSettings {
        self.state_lock().settings.clone()
    }

    pub fn show(&self) {
        let command = {
            let state = self.state_lock();
            if state.flags.intersects(WindowFlags::VISIBLE | WindowFlags::CLOSED) {
                return;
            }
            if state.settings.allow_input && state.settings.activate_when_first_shown {
                ShowCommand::Show
            } else {
                ShowCommand::ShowNoActivate
            }
        };

        self.native.show(command);
        if !self.state_lock().has_border() {
            self.native.refresh_frame();
        }

        self.set_flags(WindowFlags::VISIBLE, true);
        self.handler.on_shown();
    }

    pub fn hide(&self) {
        if !self.flags().contains(WindowFlags::VISIBLE) {
            return;
        }

        self.native.show(ShowCommand::Hide);
        self.set_flags(WindowFlags::VISIBLE, false);
        self.handler.on_hidden();
    }

    pub fn minimize(&self) {
        if !self.state_lock().settings.allow_minimize {
            return;
        }
        self.native.show(ShowCommand::Minimize);
    }

    pub fn maximize(&self) {
        {
            let mut state = self.state_lock();
            if !state.settings.allow_maximize {
                return;
            }
            state.flags.insert(WindowFlags::DURING_MAXIMIZE);
        }

        self.native.show(ShowCommand::Maximize);
        self.set_flags(WindowFlags::DURING_MAXIMIZE, false);
    }

    pub fn restore(&self) {
        self.native.show(ShowCommand::Restore);
    }

    /// Switches the OS frame off or on, optionally showing the window maximized afterwards.
    pub fn set_borderless(&self, borderless: bool, maximized: bool) {
        if self.is_fullscreen() {
            self.set_fullscreen(false);
        }
        if self.is_maximized() {
            self.restore();
        }

        let settings = {
            let mut state = self.state_lock();
            state.settings.has_border = !borderless;
            state.settings.clone()
        };

        self.bring_to_front(false);
        self.native.apply_border(!borderless, &settings);

        if maximized {
            if borderless {
                self.native.show(ShowCommand::ShowMaximized);
            } else {
                self.maximize();
            }
        } else {
            self.native.show(ShowCommand::Show);
        }

        self.set_flags(WindowFlags::VISIBLE, true);
        self.check_for_window_resize();
    }

    pub fn bring_to_front(&self, force: bool) {
        let (regular, topmost) = {
            let state = self.state_lock();
            (state.settings.is_regular_window, state.settings.is_topmost)
        };

        if regular {
            if self.native.is_minimized() {
                self.native.show(ShowCommand::Restore);
            } else {
                self.native.set_active();
            }
        } else {
            self.native.raise(topmost, force);
        }
    }

    /// Client area on the desktop.
    pub fn client_bounds(&self) -> Rect {
        let position = self.native.client_to_screen(PhysicalPosition::new(0, 0));
        Rect::from_position_size(position, self.client_size())
    }

    /// Moves and resizes the client area. A size change is reported before the native call.
    pub fn set_client_bounds(&self, bounds: Rect) {
        let current = self.client_bounds();
        let size_changed = current.size() != bounds.size();
        if current.position() == bounds.position() && !size_changed {
            return;
        }

        if size_changed {
            {
                let mut state = self.state_lock();
                state.client_size = bounds.size();
                state.last_resize = Some(bounds.size());
            }
            self.handler.on_resize(bounds.size());
        }

        let has_border = self.state_lock().has_border();
        let outer = if has_border { self.native.adjust_client_rect(bounds) } else { bounds };
        self.native.set_window_pos(Some(outer.position()), Some(outer.size()), false);
    }

    /// Moves the outer window.
    pub fn set_position(&self, position: PhysicalPosition<i32>) {
        self.native.set_window_pos(Some(position), None, false);
    }

    /// Moves the window so its client area starts at `position`.
    pub fn set_client_position(&self, position: PhysicalPosition<i32>) {
        let (has_border, client_size) = {
            let state = self.state_lock();
            (state.has_border(), state.client_size)
        };

        let position = if has_border {
            let client = Rect::from_position_size(position, client_size);
            self.native.adjust_client_rect(client).position()
        } else {
            position
        };
        self.native.set_window_pos(Some(position), None, false);
    }

    /// Borderless fullscreen on the monitor nearest to the window.
    pub fn set_fullscreen(&self, fullscreen: bool) {
        {
            let mut state = self.state_lock();
            if state.flags.contains(WindowFlags::FULLSCREEN) == fullscreen {
                return;
            }
            state.flags.insert(WindowFlags::SWITCHING_FULLSCREEN);
        }

        if fullscreen {
            let saved =
                Rect::from_position_size(self.native.outer_position(), self.native.outer_size());
            let settings = {
                let mut state = self.state_lock();
                state.saved_rect = Some(saved);
                state.flags.insert(WindowFlags::FULLSCREEN);
                state.settings.clone()
            };

            self.native.apply_border(false, &settings);
            let monitor = self.native.monitor_bounds();
            self.native.set_window_pos(Some(monitor.position()), Some(monitor.size()), true);
        } else {
            let (saved, settings) = {
                let mut state = self.state_lock();
                state.flags.remove(WindowFlags::FULLSCREEN);
                (state.saved_rect.take(), state.settings.clone())
            };

            self.native.apply_border(settings.has_border, &settings);
            self.native.show(ShowCommand::Normal);
            if let Some(saved) = saved {
                self.native.set_window_pos(Some(saved.position()), Some(saved.size()), false);
            }
        }

        self.set_flags(WindowFlags::SWITCHING_FULLSCREEN, false);
        self.check_for_window_resize();
        self.handler.on_fullscreen_changed(fullscreen);
    }

    /// Outer window position.
    pub fn position(&self) -> PhysicalPosition<i32> {
        self.native.outer_position()
    }

    /// Outer window size.
    pub fn size(&self) -> PhysicalSize<u32> {
        self.native.outer_size()
    }

    /// Cached client area size.
    pub fn client_size(&self) -> PhysicalSize<u32> {
        self.state_lock().client_size
    }

    pub fn screen_to_client(&self, position: PhysicalPosition<i32>) -> PhysicalPosition<i32> {
        self.native.screen_to_client(position)
    }

    pub fn client_to_screen(&self, position: PhysicalPosition<i32>) -> PhysicalPosition<i32> {
        self.native.client_to_screen(position)
    }

    /// Flashes the taskbar entry unless the window already has focus.
    pub fn flash(&self) {
        if self.is_focused() {
            return;
        }
        self.native.flash();
    }

    /// Bounds of the monitor the window is on.
    pub fn screen_info(&self) -> Rect {
        self.native.monitor_bounds()
    }

    pub fn opacity(&self) -> f32 {
        f32::from(self.native.opacity()) / 255.0
    }

    /// Sets the window alpha. Values outside `0.0..=1.0` saturate.
    pub fn set_opacity(&self, opacity: f32) {
        let alpha = (opacity.clamp(0.0, 1.0) * 255.0) as u8;
        self.native.set_opacity(alpha);
    }

    /// Gives the window keyboard focus.
    pub fn focus(&self) {
        if !self.native.has_focus() {
            self.native.set_focus();
        }
    }

    pub fn title(&self) -> String {
        self.state_lock().title.clone()
    }

    /// The stored title only changes when the OS accepted the new one.
    pub fn set_title(&self, title: &str) {
        if self.native.set_title(title) {
            self.state_lock().title = title.to_owned();
        }
    }

    /// Captures the mouse. With `use_screen_offset` the cursor wraps around the monitor edges
    /// and the jumps accumulate in [`tracking_mouse_offset`](Self::tracking_mouse_offset).
    pub fn start_tracking_mouse(&self, use_screen_offset: bool) {
        if self.flags().contains(WindowFlags::TRACKING_MOUSE) {
            return;
        }

        let screen = self.native.monitor_bounds();
        {
            let mut state = self.state_lock();
            state.flags.insert(WindowFlags::TRACKING_MOUSE);
            state.mouse.use_screen_offset = use_screen_offset;
            state.mouse.screen = screen;
            state.mouse.offset = PhysicalPosition::new(0, 0);
            state.mouse.horizontal_flip = false;
            state.mouse.vertical_flip = false;
        }

        self.native.set_capture();
    }

    pub fn end_tracking_mouse(&self) {
        {
            let mut state = self.state_lock();
            if !state.flags.contains(WindowFlags::TRACKING_MOUSE) {
                return;
            }
            state.flags.remove(WindowFlags::TRACKING_MOUSE);
            state.mouse.horizontal_flip = false;
            state.mouse.vertical_flip = false;
        }

        self.native.release_capture();
    }

    pub fn tracking_mouse_offset(&self) -> PhysicalPosition<i32> {
        self.state_lock().mouse.offset
    }

    /// Confines the cursor to a desktop rectangle.
    ///
    /// An unfocused window remembers the request and applies it when it gains focus.
    pub fn start_clipping_cursor(&self, bounds: Rect) {
        let apply = {
            let mut state = self.state_lock();
            state.clip_rect = bounds;
            state.flags.insert(WindowFlags::CLIPPING_CURSOR);
            let focused = state.flags.contains(WindowFlags::FOCUSED);
            state.flags.set(WindowFlags::CLIP_CURSOR_SET, focused);
            focused
        };

        if apply {
            self.native.clip_cursor(Some(bounds));
        }
    }

    pub fn end_clipping_cursor(&self) {
        {
            let mut state = self.state_lock();
            if !state.flags.contains(WindowFlags::CLIPPING_CURSOR) {
                return;
            }
            state.flags.remove(WindowFlags::CLIPPING_CURSOR | WindowFlags::CLIP_CURSOR_SET);
        }

        self.native.clip_cursor(None);
    }

    pub fn cursor(&self) -> Cursor {
        self.state_lock().cursor
    }

    pub fn set_cursor(&self, cursor: impl Into<Cursor>) {
        let cursor = cursor.into();
        self.state_lock().cursor = cursor;
        self.native.apply_cursor(cursor);
    }

    /// Asks the handler and, unless it cancels, destroys the native window.
    pub fn close(&self, reason: ClosingReason) {
        if self.is_closed() {
            return;
        }
        if self.handler.on_closing(reason) {
            debug!(?reason, "window close cancelled");
            return;
        }

        self.hide();
        if let Err(err) = self.native.destroy() {
            warn!("failed to destroy window: {err}");
            return;
        }
        self.mark_destroyed();
    }

    /// Records that the native window is gone and reports it once.
    pub fn mark_destroyed(&self) {
        let first = {
            let mut state = self.state_lock();
            let first = !state.flags.contains(WindowFlags::CLOSED);
            state.flags.insert(WindowFlags::CLOSED);
            state.flags.remove(WindowFlags::VISIBLE | WindowFlags::FOCUSED);
            first
        };

        if first {
            debug!("window destroyed");
            self.handler.on_closed();
        }
    }

    /// Backends call this once the window is registered as a drop target.
    pub fn set_drag_and_drop_enabled(&self, enabled: bool) {
        self.set_flags(WindowFlags::DRAG_AND_DROP, enabled);
    }

    /// Forwards a drag-and-drop notification while drag-and-drop is enabled.
    pub fn handle_drag(&self, event: DragEvent) {
        if self.flags().contains(WindowFlags::DRAG_AND_DROP) {
            self.handler.on_drag(&event);
        }
    }

    /// Re-reads the client size and reports it when it changed since the last report.
    pub fn check_for_window_resize(&self) {
        if self.flags().contains(WindowFlags::MINIMIZED) {
            return;
        }

        let size = self.native.client_size();
        let changed = {
            let mut state = self.state_lock();
            state.client_size = size;
            let changed = size.width > 0 && size.height > 0 && state.last_resize != Some(size);
            if changed {
                state.last_resize = Some(size);
            }
            changed
        };

        if changed {
            self.handler.on_resize(size);
        }
    }

    pub fn is_closed(&self) -> bool {
        self.flags().contains(WindowFlags::CLOSED)
    }

    pub fn is_foreground(&self) -> bool {
        self.native.is_foreground()
    }

    pub fn dpi(&self) -> u32 {
        self.state_lock().dpi
    }

    pub fn dpi_scale(&self) -> f32 {
        self.state_lock().dpi_scale
    }

    pub fn is_visible(&self) -> bool {
        self.flags().contains(WindowFlags::VISIBLE)
    }

    pub fn is_minimized(&self) -> bool {
        self.flags().contains(WindowFlags::MINIMIZED)
    }

    pub fn is_maximized(&self) -> bool {
        self.flags().contains(WindowFlags::MAXIMIZED)
    }

    pub fn is_fullscreen(&self) -> bool {
        self.flags().contains(WindowFlags::FULLSCREEN)
    }

    pub fn is_focused(&self) -> bool {
        self.flags().contains(WindowFlags::FOCUSED)
    }

    pub fn has_border(&self) -> bool {
        self.state_lock().has_border()
    }
}

impl<N: NativeWindow> Drop for Window<N> {
    fn drop(&mut self) {
        let flags = self.flags();
        if flags.contains(WindowFlags::CLOSED) {
            return;
        }

        if flags.contains(WindowFlags::DRAG_AND_DROP) {
            if let Err(err) = self.native.revoke_drag_drop() {
                warn!("failed to revoke drag and drop: {err}");
            }
        }
        if let Err(err) = self.native.destroy() {
            warn!("failed to destroy window: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::headless::{HeadlessWindow, NativeCall};

    #[derive(Default)]
    struct Log(RefCell<Vec<String>>);

    struct Recorder {
        log: Rc<Log>,
        cancel_close: bool,
    }

    impl WindowHandler for Recorder {
        fn on_resize(&self, size: PhysicalSize<u32>) {
            self.log.0.borrow_mut().push(format!("resize {}x{}", size.width, size.height));
        }

        fn on_closing(&self, _reason: ClosingReason) -> bool {
            self.log.0.borrow_mut().push("closing".into());
            self.cancel_close
        }

        fn on_closed(&self) {
            self.log.0.borrow_mut().push("closed".into());
        }

        fn on_shown(&self) {
            self.log.0.borrow_mut().push("shown".into());
        }
    }

    fn window(settings: WindowSettings, cancel_close: bool) -> (Window<HeadlessWindow>, Rc<Log>) {
        let log = Rc::new(Log::default());
        let native = HeadlessWindow::new(&settings);
        let handler = Recorder { log: log.clone(), cancel_close };
        (Window::new(native, settings, Box::new(handler)), log)
    }

    fn entries(log: &Log) -> Vec<String> {
        log.0.borrow().clone()
    }

    #[test]
    fn show_is_idempotent() {
        let (window, log) = window(WindowSettings::default(), false);
        window.show();
        window.show();
        assert!(window.is_visible());
        assert_eq!(entries(&log), ["shown"]);
        assert_eq!(window.native().take_calls(), [NativeCall::Show(ShowCommand::Show)]);
    }

    #[test]
    fn show_without_input_does_not_activate() {
        let settings = WindowSettings::default().with_input(false).with_border(false);
        let (window, _) = window(settings, false);
        window.show();
        assert_eq!(
            window.native().take_calls(),
            [NativeCall::Show(ShowCommand::ShowNoActivate), NativeCall::RefreshFrame]
        );
    }

    #[test]
    fn disallowed_maximize_is_ignored() {
        let (window, _) = window(WindowSettings::default().with_maximize(false), false);
        window.maximize();
        assert!(window.native().take_calls().is_empty());
    }

    #[test]
    fn opacity_saturates() {
        let (window, _) = window(WindowSettings::default(), false);
        window.set_opacity(2.0);
        window.set_opacity(-1.0);
        window.set_opacity(0.5);
        assert_eq!(
            window.native().take_calls(),
            [NativeCall::SetOpacity(255), NativeCall::SetOpacity(0), NativeCall::SetOpacity(127)]
        );
        assert!((window.opacity() - 127.0 / 255.0).abs() < f32::EPSILON);
    }

    #[test]
    fn rejected_title_is_not_stored() {
        let (window, _) = window(WindowSettings::default().with_title("old"), false);
        window.native().reject_titles(true);
        window.set_title("new");
        assert_eq!(window.title(), "old");

        window.native().reject_titles(false);
        window.set_title("new");
        assert_eq!(window.title(), "new");
        assert_eq!(window.native().title(), "new");
    }

    #[test]
    fn client_bounds_report_resize_first() {
        let (window, log) = window(WindowSettings::default(), false);
        let bounds = window.client_bounds();
        window.native().take_calls();

        window.set_client_bounds(bounds);
        assert!(window.native().take_calls().is_empty());

        let grown = Rect::from_position_size(bounds.position(), PhysicalSize::new(800, 600));
        window.set_client_bounds(grown);
        assert_eq!(entries(&log), ["resize 800x600"]);
        assert_eq!(window.client_size(), PhysicalSize::new(800, 600));
        assert_eq!(window.native().client_size(), PhysicalSize::new(800, 600));
        assert_eq!(window.client_bounds(), grown);
    }

    #[test]
    fn cancelled_close_keeps_window() {
        let (window, log) = window(WindowSettings::default(), true);
        window.show();
        window.close(ClosingReason::User);
        assert!(!window.is_closed());
        assert!(window.is_visible());
        assert_eq!(entries(&log), ["shown", "closing"]);
    }

    #[test]
    fn close_destroys_once() {
        let (window, log) = window(WindowSettings::default(), false);
        window.close(ClosingReason::EngineExit);
        window.close(ClosingReason::EngineExit);
        window.mark_destroyed();
        assert!(window.is_closed());
        assert_eq!(entries(&log), ["closing", "closed"]);
        assert!(window.native().is_destroyed());
    }

    #[test]
    fn check_for_resize_skips_unchanged_and_empty() {
        let (window, log) = window(WindowSettings::default(), false);
        window.check_for_window_resize();
        window.check_for_window_resize();
        assert_eq!(entries(&log), ["resize 1280x720"]);

        window.native().set_client_size(PhysicalSize::new(0, 720));
        window.check_for_window_resize();
        assert_eq!(window.client_size(), PhysicalSize::new(0, 720));
        assert_eq!(entries(&log).len(), 1);
    }
}
