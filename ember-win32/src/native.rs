//! [`NativeWindow`] on top of a Win32 `HWND`.

use std::cell::RefCell;
use std::num::NonZeroIsize;
use std::{io, mem, ptr};

use dpi::{PhysicalPosition, PhysicalSize};
use ember_core::error::OsError;
use ember_core::event::DragEvent;
use ember_core::geometry::Rect;
use ember_core::native::NativeWindow;
use ember_core::window::{Cursor, ShowCommand, WindowSettings};
use tracing::debug;
use windows_sys::Win32::Foundation::{
    HWND, OLE_E_WRONGCOMPOBJ, POINT, RPC_E_CHANGED_MODE, S_OK,
};
use windows_sys::Win32::Graphics::Dwm::DwmIsCompositionEnabled;
use windows_sys::Win32::Graphics::Gdi::{ClientToScreen, ScreenToClient};
use windows_sys::Win32::System::Ole::{OleInitialize, RegisterDragDrop, RevokeDragDrop};
use windows_sys::Win32::UI::Input::KeyboardAndMouse::{
    GetFocus, ReleaseCapture, SetActiveWindow, SetCapture, SetFocus, TrackMouseEvent, TME_HOVER,
    TME_LEAVE, TRACKMOUSEEVENT,
};
use windows_sys::Win32::UI::WindowsAndMessaging::{
    DestroyWindow, FlashWindow, GetClientRect, GetForegroundWindow, GetLayeredWindowAttributes,
    KillTimer, LoadCursorW, PostQuitMessage, SetCursor, SetCursorPos, SetLayeredWindowAttributes,
    SetTimer, SetWindowPos, SetWindowTextW, ShowWindow, GWLP_HINSTANCE, GWL_EXSTYLE, GWL_STYLE,
    HWND_TOP, HWND_TOPMOST, LWA_ALPHA, SET_WINDOW_POS_FLAGS, SHOW_WINDOW_CMD, SWP_FRAMECHANGED,
    SWP_NOACTIVATE, SWP_NOMOVE, SWP_NOOWNERZORDER, SWP_NOSIZE, SWP_NOZORDER, SW_HIDE,
    SW_MAXIMIZE, SW_MINIMIZE, SW_NORMAL, SW_RESTORE, SW_SHOW, SW_SHOWMAXIMIZED, SW_SHOWNA,
};

use crate::drop_handler::FileDropHandler;
use crate::hidpi::{adjust_window_rect_with_styles, hwnd_dpi};
use crate::style::StyleFlags;
use crate::util::{self, rect_from_win, rect_to_win};

/// Hover time passed to `TrackMouseEvent`, in milliseconds.
const MOUSE_HOVER_TIME: u32 = 5000;

/// The Win32 half of a window: one `HWND` and the drop target registered for it.
pub struct Win32Native {
    hwnd: HWND,
    drop_handler: RefCell<Option<FileDropHandler>>,
}

impl std::fmt::Debug for Win32Native {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Win32Native").field("hwnd", &self.hwnd).finish_non_exhaustive()
    }
}

impl Win32Native {
    pub(crate) fn new(hwnd: HWND) -> Self {
        Self { hwnd, drop_handler: RefCell::new(None) }
    }

    #[inline]
    pub fn hwnd(&self) -> HWND {
        self.hwnd
    }

    pub fn hinstance(&self) -> isize {
        unsafe { util::get_window_long(self.hwnd, GWLP_HINSTANCE) }
    }

    /// Registers the window as an OLE drop target forwarding to `send_event`.
    pub(crate) fn register_drag_drop(
        &self,
        send_event: Box<dyn Fn(DragEvent)>,
    ) -> Result<(), OsError> {
        // `S_FALSE` only means OLE is already initialized on this thread.
        let ole_init_result = unsafe { OleInitialize(ptr::null_mut()) };
        if ole_init_result == OLE_E_WRONGCOMPOBJ || ole_init_result == RPC_E_CHANGED_MODE {
            return Err(os_error!(io::Error::from_raw_os_error(ole_init_result)));
        }

        let handler = FileDropHandler::new(self.hwnd, send_event);
        let result = unsafe { RegisterDragDrop(self.hwnd, handler.as_interface()) };
        if result != S_OK {
            return Err(os_error!(io::Error::from_raw_os_error(result)));
        }

        *self.drop_handler.borrow_mut() = Some(handler);
        Ok(())
    }

    fn styles(&self) -> (u32, u32) {
        unsafe {
            (
                util::get_window_long(self.hwnd, GWL_STYLE) as u32,
                util::get_window_long(self.hwnd, GWL_EXSTYLE) as u32,
            )
        }
    }

    fn outer_rect(&self) -> Rect {
        util::get_window_rect(self.hwnd).map(rect_from_win).unwrap_or(Rect::new(0, 0, 0, 0))
    }

    fn set_window_pos_raw(&self, insert_after: HWND, flags: SET_WINDOW_POS_FLAGS) {
        unsafe { SetWindowPos(self.hwnd, insert_after, 0, 0, 0, 0, flags) };
    }
}

fn to_show_window_cmd(command: ShowCommand) -> SHOW_WINDOW_CMD {
    match command {
        ShowCommand::Show => SW_SHOW,
        ShowCommand::ShowNoActivate => SW_SHOWNA,
        ShowCommand::Hide => SW_HIDE,
        ShowCommand::Minimize => SW_MINIMIZE,
        ShowCommand::Maximize => SW_MAXIMIZE,
        ShowCommand::ShowMaximized => SW_SHOWMAXIMIZED,
        ShowCommand::Restore => SW_RESTORE,
        ShowCommand::Normal => SW_NORMAL,
    }
}

impl NativeWindow for Win32Native {
    fn show(&self, command: ShowCommand) {
        unsafe { ShowWindow(self.hwnd, to_show_window_cmd(command)) };
    }

    fn client_size(&self) -> PhysicalSize<u32> {
        let mut rect = unsafe { mem::zeroed() };
        if unsafe { GetClientRect(self.hwnd, &mut rect) } == false.into() {
            return PhysicalSize::new(0, 0);
        }
        rect_from_win(rect).size()
    }

    fn outer_position(&self) -> PhysicalPosition<i32> {
        self.outer_rect().position()
    }

    fn outer_size(&self) -> PhysicalSize<u32> {
        self.outer_rect().size()
    }

    fn set_window_pos(
        &self,
        position: Option<PhysicalPosition<i32>>,
        size: Option<PhysicalSize<u32>>,
        activate: bool,
    ) {
        let mut flags = SWP_NOZORDER;
        if !activate {
            flags |= SWP_NOACTIVATE;
        }
        if position.is_none() {
            flags |= SWP_NOMOVE;
        }
        if size.is_none() {
            flags |= SWP_NOSIZE;
        }

        let position = position.unwrap_or_default();
        let size = size.unwrap_or_default();
        unsafe {
            SetWindowPos(
                self.hwnd,
                ptr::null_mut(),
                position.x,
                position.y,
                size.width as i32,
                size.height as i32,
                flags,
            )
        };
    }

    fn adjust_client_rect(&self, client: Rect) -> Rect {
        let (style, style_ex) = self.styles();
        adjust_window_rect_with_styles(rect_to_win(client), style, style_ex, Some(self.dpi()))
            .map(rect_from_win)
            .unwrap_or(client)
    }

    fn frame_size(&self) -> PhysicalSize<u32> {
        self.adjust_client_rect(Rect::new(0, 0, 0, 0)).size()
    }

    fn apply_border(&self, has_border: bool, settings: &WindowSettings) {
        let mut flags = StyleFlags::from_settings(settings);
        flags.set(StyleFlags::BORDER, has_border);

        let (style, _) = self.styles();
        let style = flags.restyle(style);
        unsafe { util::set_window_long(self.hwnd, GWL_STYLE, style as isize) };
        self.set_window_pos_raw(
            ptr::null_mut(),
            SWP_FRAMECHANGED | SWP_NOMOVE | SWP_NOSIZE | SWP_NOZORDER | SWP_NOACTIVATE,
        );
    }

    fn refresh_frame(&self) {
        self.set_window_pos_raw(
            ptr::null_mut(),
            SWP_FRAMECHANGED | SWP_NOMOVE | SWP_NOSIZE | SWP_NOACTIVATE | SWP_NOZORDER,
        );
    }

    fn is_minimized(&self) -> bool {
        util::is_minimized(self.hwnd)
    }

    fn is_placement_maximized(&self) -> bool {
        util::is_maximized(self.hwnd)
    }

    fn set_active(&self) {
        unsafe { SetActiveWindow(self.hwnd) };
    }

    fn raise(&self, topmost: bool, activate: bool) {
        let mut flags = SWP_NOMOVE | SWP_NOSIZE | SWP_NOOWNERZORDER;
        if !activate {
            flags |= SWP_NOACTIVATE;
        }
        self.set_window_pos_raw(if topmost { HWND_TOPMOST } else { HWND_TOP }, flags);
    }

    fn has_focus(&self) -> bool {
        unsafe { GetFocus() == self.hwnd }
    }

    fn set_focus(&self) {
        unsafe { SetFocus(self.hwnd) };
    }

    fn is_foreground(&self) -> bool {
        unsafe { GetForegroundWindow() == self.hwnd }
    }

    fn flash(&self) {
        unsafe { FlashWindow(self.hwnd, false.into()) };
    }

    fn screen_to_client(&self, position: PhysicalPosition<i32>) -> PhysicalPosition<i32> {
        let mut point = POINT { x: position.x, y: position.y };
        unsafe { ScreenToClient(self.hwnd, &mut point) };
        PhysicalPosition::new(point.x, point.y)
    }

    fn client_to_screen(&self, position: PhysicalPosition<i32>) -> PhysicalPosition<i32> {
        let mut point = POINT { x: position.x, y: position.y };
        unsafe { ClientToScreen(self.hwnd, &mut point) };
        PhysicalPosition::new(point.x, point.y)
    }

    fn monitor_bounds(&self) -> Rect {
        util::monitor_info(self.hwnd)
            .map(|info| rect_from_win(info.rcMonitor))
            .unwrap_or_else(|| self.outer_rect())
    }

    fn monitor_work_area(&self) -> Rect {
        util::monitor_info(self.hwnd)
            .map(|info| rect_from_win(info.rcWork))
            .unwrap_or_else(|| self.outer_rect())
    }

    fn set_opacity(&self, alpha: u8) {
        unsafe { SetLayeredWindowAttributes(self.hwnd, 0, alpha, LWA_ALPHA) };
    }

    fn opacity(&self) -> u8 {
        let mut alpha = u8::MAX;
        let mut flags = 0;
        let ok = unsafe {
            GetLayeredWindowAttributes(self.hwnd, ptr::null_mut(), &mut alpha, &mut flags)
        };
        if ok == false.into() || flags & LWA_ALPHA == 0 {
            return u8::MAX;
        }
        alpha
    }

    fn set_title(&self, title: &str) -> bool {
        let title = util::encode_wide(title);
        unsafe { SetWindowTextW(self.hwnd, title.as_ptr()) != false.into() }
    }

    fn set_capture(&self) {
        unsafe { SetCapture(self.hwnd) };
    }

    fn release_capture(&self) {
        unsafe { ReleaseCapture() };
    }

    fn clip_cursor(&self, rect: Option<Rect>) {
        if let Err(error) = util::set_cursor_clip(rect.map(rect_to_win)) {
            debug!(%error, "ClipCursor failed");
        }
    }

    fn apply_cursor(&self, cursor: Cursor) {
        unsafe {
            match cursor {
                Cursor::Hidden => SetCursor(ptr::null_mut()),
                Cursor::Icon(icon) => {
                    SetCursor(LoadCursorW(ptr::null_mut(), util::to_windows_cursor(icon)))
                },
            };
        }
    }

    fn set_cursor_position(&self, position: PhysicalPosition<i32>) {
        unsafe { SetCursorPos(position.x, position.y) };
    }

    fn arm_mouse_leave(&self) {
        let mut event = TRACKMOUSEEVENT {
            cbSize: mem::size_of::<TRACKMOUSEEVENT>() as u32,
            dwFlags: TME_HOVER | TME_LEAVE,
            hwndTrack: self.hwnd,
            dwHoverTime: MOUSE_HOVER_TIME,
        };
        unsafe { TrackMouseEvent(&mut event) };
    }

    fn set_timer(&self, id: usize, period_ms: u32) {
        unsafe { SetTimer(self.hwnd, id, period_ms, None) };
    }

    fn kill_timer(&self, id: usize) {
        unsafe { KillTimer(self.hwnd, id) };
    }

    fn is_composition_enabled(&self) -> bool {
        let mut enabled = false.into();
        let result = unsafe { DwmIsCompositionEnabled(&mut enabled) };
        result == S_OK && enabled != false.into()
    }

    fn dpi(&self) -> u32 {
        hwnd_dpi(self.hwnd)
    }

    fn revoke_drag_drop(&self) -> Result<(), OsError> {
        let result = unsafe { RevokeDragDrop(self.hwnd) };
        if result != S_OK {
            return Err(os_error!(io::Error::from_raw_os_error(result)));
        }
        Ok(())
    }

    fn destroy(&self) -> Result<(), OsError> {
        util::win_to_err(unsafe { DestroyWindow(self.hwnd) }).map_err(|error| os_error!(error))
    }

    fn post_quit(&self, exit_code: i32) {
        unsafe { PostQuitMessage(exit_code) };
    }
}

impl rwh_06::HasWindowHandle for Win32Native {
    fn window_handle(&self) -> Result<rwh_06::WindowHandle<'_>, rwh_06::HandleError> {
        let hwnd = NonZeroIsize::new(self.hwnd as isize).ok_or(rwh_06::HandleError::Unavailable)?;
        let mut handle = rwh_06::Win32WindowHandle::new(hwnd);
        handle.hinstance = NonZeroIsize::new(self.hinstance());
        unsafe { Ok(rwh_06::WindowHandle::borrow_raw(handle.into())) }
    }
}

impl rwh_06::HasDisplayHandle for Win32Native {
    fn display_handle(&self) -> Result<rwh_06::DisplayHandle<'_>, rwh_06::HandleError> {
        Ok(rwh_06::DisplayHandle::windows())
    }
}
