//! Window creation and the window procedure.

use std::mem::ManuallyDrop;
use std::ops::Deref;
use std::rc::{Rc, Weak};
use std::sync::{LazyLock, OnceLock};
use std::{io, mem, ptr};

use dpi::{PhysicalPosition, PhysicalSize};
use ember_core::error::OsError;
use ember_core::event::{NativeEvent, PowerEvent, Response, SizeKind, SysCommand, SysKey};
use ember_core::geometry::MinMaxInfo;
use ember_core::handler::WindowHandler;
use ember_core::window::{HitTest, WindowSettings};
use tracing::{debug, trace, warn};
use windows_sys::Win32::Foundation::{HWND, LPARAM, LRESULT, POINT, RECT, WPARAM};
use windows_sys::Win32::Graphics::Dwm::DwmExtendFrameIntoClientArea;
use windows_sys::Win32::UI::Controls::MARGINS;
use windows_sys::Win32::UI::Input::KeyboardAndMouse::{VK_F4, VK_RETURN};
use windows_sys::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, LoadCursorW, RegisterClassExW, CS_HREDRAW, CS_VREDRAW,
    GWLP_USERDATA, IDC_ARROW, MINMAXINFO, MNC_CLOSE, PBT_APMQUERYSUSPEND, PBT_APMRESUMESUSPEND,
    SC_KEYMENU, SC_MAXIMIZE, SC_MOVE, SC_SIZE, SIZE_MAXIMIZED, SIZE_MINIMIZED, SIZE_RESTORED,
    WM_ACTIVATEAPP, WM_CLOSE, WM_CREATE, WM_DESTROY, WM_DPICHANGED, WM_ENTERSIZEMOVE,
    WM_ERASEBKGND, WM_EXITSIZEMOVE, WM_GETMINMAXINFO, WM_KILLFOCUS, WM_MENUCHAR, WM_MOUSELEAVE,
    WM_MOUSEMOVE, WM_NCACTIVATE, WM_NCCALCSIZE, WM_NCDESTROY, WM_NCHITTEST, WM_NCLBUTTONDBLCLK,
    WM_NCLBUTTONDOWN, WM_POWERBROADCAST, WM_SETCURSOR, WM_SETFOCUS, WM_SIZE, WM_SYSCOMMAND,
    WM_SYSKEYDOWN, WM_TIMER, WNDCLASSEXW,
};

use crate::hidpi::{adjust_window_rect_with_styles, become_dpi_aware};
use crate::native::Win32Native;
use crate::style::StyleFlags;
use crate::util::{self, get_x_lparam, get_y_lparam, hiword, loword, rect_from_win, rect_to_win};

type CoreWindow = ember_core::Window<Win32Native>;

static CLASS_NAME: LazyLock<Vec<u16>> = LazyLock::new(|| util::encode_wide("EmberWindow"));

/// A top-level Win32 window.
///
/// Dereferences to the platform independent [`ember_core::Window`], which carries every
/// operation. The native window is destroyed when the last clone is dropped.
#[derive(Clone)]
pub struct Window {
    inner: Rc<CoreWindow>,
}

impl std::fmt::Debug for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.inner.fmt(f)
    }
}

impl Deref for Window {
    type Target = CoreWindow;

    #[inline]
    fn deref(&self) -> &CoreWindow {
        &self.inner
    }
}

impl Window {
    /// Creates the native window. It starts hidden; call [`show`](CoreWindow::show).
    pub fn new(settings: WindowSettings, handler: Box<dyn WindowHandler>) -> Result<Self, OsError> {
        become_dpi_aware();
        register_window_class()?;

        let (style, style_ex) = StyleFlags::from_settings(&settings).to_window_styles();
        let mut outer = settings.client_rect();
        if settings.has_border {
            if let Some(rect) =
                adjust_window_rect_with_styles(rect_to_win(outer), style, style_ex, None)
            {
                outer = rect_from_win(rect);
            }
        }

        let title = util::encode_wide(&settings.title);
        let hwnd = unsafe {
            CreateWindowExW(
                style_ex,
                CLASS_NAME.as_ptr(),
                title.as_ptr(),
                style,
                outer.left,
                outer.top,
                outer.width() as i32,
                outer.height() as i32,
                ptr::null_mut(),
                ptr::null_mut(),
                util::get_instance_handle(),
                ptr::null(),
            )
        };
        if hwnd.is_null() {
            return Err(os_error!(io::Error::last_os_error()));
        }

        let extend_frame = settings.is_regular_window && !settings.has_border;
        let allow_drag_and_drop = settings.allow_drag_and_drop;
        let fullscreen = settings.fullscreen;

        let inner = Rc::new(CoreWindow::new(Win32Native::new(hwnd), settings, handler));
        let userdata = Weak::into_raw(Rc::downgrade(&inner));
        unsafe { util::set_window_long(hwnd, GWLP_USERDATA, userdata as isize) };
        debug!(?hwnd, dpi = inner.dpi(), "Created window");

        // Keeps the drop shadow of a borderless window.
        if extend_frame && inner.native().is_composition_enabled() {
            let margins =
                MARGINS { cxLeftWidth: 1, cxRightWidth: 1, cyTopHeight: 1, cyBottomHeight: 1 };
            unsafe { DwmExtendFrameIntoClientArea(hwnd, &margins) };
        }

        if allow_drag_and_drop {
            let target = Rc::downgrade(&inner);
            let send_event = Box::new(move |event| {
                if let Some(window) = target.upgrade() {
                    window.handle_drag(event);
                }
            });
            match inner.native().register_drag_drop(send_event) {
                Ok(()) => inner.set_drag_and_drop_enabled(true),
                Err(error) => warn!(%error, stage = 1, "Drag and drop registration failed"),
            }
        }

        if fullscreen {
            inner.set_fullscreen(true);
        }

        Ok(Self { inner })
    }

    #[inline]
    pub fn hwnd(&self) -> HWND {
        self.inner.native().hwnd()
    }
}

impl rwh_06::HasWindowHandle for Window {
    fn window_handle(&self) -> Result<rwh_06::WindowHandle<'_>, rwh_06::HandleError> {
        self.inner.native().window_handle()
    }
}

impl rwh_06::HasDisplayHandle for Window {
    fn display_handle(&self) -> Result<rwh_06::DisplayHandle<'_>, rwh_06::HandleError> {
        self.inner.native().display_handle()
    }
}

fn register_window_class() -> Result<(), OsError> {
    static REGISTERED: OnceLock<Result<(), i32>> = OnceLock::new();

    let result = *REGISTERED.get_or_init(|| {
        let class = WNDCLASSEXW {
            cbSize: mem::size_of::<WNDCLASSEXW>() as u32,
            style: CS_HREDRAW | CS_VREDRAW,
            lpfnWndProc: Some(window_proc),
            cbClsExtra: 0,
            cbWndExtra: 0,
            hInstance: util::get_instance_handle(),
            hIcon: ptr::null_mut(),
            hCursor: unsafe { LoadCursorW(ptr::null_mut(), IDC_ARROW) },
            hbrBackground: ptr::null_mut(),
            lpszMenuName: ptr::null(),
            lpszClassName: CLASS_NAME.as_ptr(),
            hIconSm: ptr::null_mut(),
        };

        if unsafe { RegisterClassExW(&class) } == 0 {
            Err(io::Error::last_os_error().raw_os_error().unwrap_or_default())
        } else {
            Ok(())
        }
    });

    result.map_err(|code| os_error!(io::Error::from_raw_os_error(code)))
}

/// `GWLP_USERDATA` holds a `Weak<CoreWindow>` from the end of `Window::new` until
/// `WM_NCDESTROY`. Messages sent before or after that go to `DefWindowProcW`.
unsafe extern "system" fn window_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    let userdata = unsafe { util::get_window_long(hwnd, GWLP_USERDATA) } as *const CoreWindow;
    if userdata.is_null() {
        return unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) };
    }

    if msg == WM_NCDESTROY {
        unsafe {
            util::set_window_long(hwnd, GWLP_USERDATA, 0);
            drop(Weak::from_raw(userdata));
        }
        return unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) };
    }

    let target = ManuallyDrop::new(unsafe { Weak::from_raw(userdata) });
    // The window may already be dropping, destroying the `HWND` on its way out.
    let Some(window) = target.upgrade() else {
        return unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) };
    };

    trace!(?hwnd, msg, wparam, lparam, "Window message");
    let response = unsafe { dispatch(&window, msg, wparam, lparam) };
    match response {
        Some(response) => to_lresult(response, hwnd, msg, wparam, lparam),
        None => unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) },
    }
}

/// Runs one message through the adapter. `None` means the message has no counterpart.
unsafe fn dispatch(
    window: &CoreWindow,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> Option<Response> {
    match msg {
        WM_NCCALCSIZE => {
            // With `wparam` set this is an `NCCALCSIZE_PARAMS`, whose first member is the
            // proposed window rectangle; otherwise it is that rectangle alone.
            let rect = lparam as *mut RECT;
            let mut client = rect_from_win(unsafe { *rect });
            let valid_rects = wparam != 0;
            let response =
                window.handle_event(NativeEvent::NcCalcSize { valid_rects, client: &mut client });
            if response != Response::Default {
                unsafe { *rect = rect_to_win(client) };
            }
            Some(response)
        },
        WM_GETMINMAXINFO => {
            let raw = lparam as *mut MINMAXINFO;
            let mut info = unsafe { min_max_info_from_win(&*raw) };
            let response = window.handle_event(NativeEvent::GetMinMaxInfo(&mut info));
            if response != Response::Default {
                unsafe { min_max_info_to_win(&info, &mut *raw) };
            }
            Some(response)
        },
        WM_DPICHANGED => {
            let suggested = rect_from_win(unsafe { *(lparam as *const RECT) });
            let dpi = hiword(wparam as u32) as u32;
            Some(window.handle_event(NativeEvent::DpiChanged { dpi, suggested }))
        },
        _ => decode_message(msg, wparam, lparam).map(|event| window.handle_event(event)),
    }
}

/// Decodes the messages that carry their data by value.
fn decode_message(msg: u32, wparam: WPARAM, lparam: LPARAM) -> Option<NativeEvent<'static>> {
    let event = match msg {
        WM_CREATE => NativeEvent::Create,
        WM_SETCURSOR => {
            NativeEvent::SetCursor { hit: hit_test(loword(lparam as u32) as i16 as i32) }
        },
        WM_MOUSEMOVE => NativeEvent::MouseMove { position: lparam_position(lparam) },
        WM_MOUSELEAVE => NativeEvent::MouseLeave,
        WM_TIMER => NativeEvent::Timer { id: wparam },
        WM_NCHITTEST => NativeEvent::NcHitTest { position: lparam_position(lparam) },
        WM_NCLBUTTONDOWN => NativeEvent::NcLeftButtonDown { hit: hit_test(wparam as i32) },
        WM_NCLBUTTONDBLCLK => NativeEvent::NcLeftButtonDoubleClick,
        WM_NCACTIVATE => NativeEvent::NcActivate,
        WM_ERASEBKGND => NativeEvent::EraseBackground,
        WM_SYSCOMMAND => NativeEvent::SysCommand(match (wparam & 0xFFF0) as u32 {
            SC_MOVE => SysCommand::Move,
            SC_SIZE => SysCommand::Size,
            SC_MAXIMIZE => SysCommand::Maximize,
            SC_KEYMENU => SysCommand::KeyMenu,
            _ => SysCommand::Other,
        }),
        WM_SIZE => NativeEvent::Size(match wparam as u32 {
            SIZE_RESTORED => SizeKind::Restored,
            SIZE_MINIMIZED => SizeKind::Minimized,
            SIZE_MAXIMIZED => SizeKind::Maximized,
            _ => SizeKind::Other,
        }),
        WM_ENTERSIZEMOVE => NativeEvent::EnterSizeMove,
        WM_EXITSIZEMOVE => NativeEvent::ExitSizeMove,
        WM_SETFOCUS => NativeEvent::SetFocus,
        WM_KILLFOCUS => NativeEvent::KillFocus,
        WM_ACTIVATEAPP => NativeEvent::ActivateApp { active: wparam != 0 },
        WM_MENUCHAR => NativeEvent::MenuChar,
        WM_SYSKEYDOWN => NativeEvent::SysKeyDown(match wparam as u16 {
            VK_F4 => SysKey::F4,
            VK_RETURN => SysKey::Return,
            _ => SysKey::Other,
        }),
        WM_POWERBROADCAST => NativeEvent::PowerBroadcast(match wparam as u32 {
            PBT_APMQUERYSUSPEND => PowerEvent::QuerySuspend,
            PBT_APMRESUMESUSPEND => PowerEvent::ResumeSuspend,
            _ => PowerEvent::Other,
        }),
        WM_CLOSE => NativeEvent::Close,
        WM_DESTROY => NativeEvent::Destroy,
        _ => return None,
    };
    Some(event)
}

fn to_lresult(response: Response, hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    match response {
        Response::Default => unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) },
        Response::Handled => 0,
        Response::Consumed => 1,
        Response::HitTest(hit) => hit.to_raw() as LRESULT,
        Response::MenuClose => (MNC_CLOSE << 16) as LRESULT,
    }
}

/// Unknown codes such as `HTERROR` count as nowhere.
fn hit_test(raw: i32) -> HitTest {
    HitTest::from_raw(raw).unwrap_or(HitTest::NoWhere)
}

fn lparam_position(lparam: LPARAM) -> PhysicalPosition<i32> {
    PhysicalPosition::new(get_x_lparam(lparam as u32) as i32, get_y_lparam(lparam as u32) as i32)
}

fn point_to_size(point: POINT) -> PhysicalSize<u32> {
    PhysicalSize::new(point.x.max(0) as u32, point.y.max(0) as u32)
}

fn size_to_point(size: PhysicalSize<u32>) -> POINT {
    POINT {
        x: i32::try_from(size.width).unwrap_or(i32::MAX),
        y: i32::try_from(size.height).unwrap_or(i32::MAX),
    }
}

fn min_max_info_from_win(raw: &MINMAXINFO) -> MinMaxInfo {
    MinMaxInfo {
        max_position: PhysicalPosition::new(raw.ptMaxPosition.x, raw.ptMaxPosition.y),
        max_size: point_to_size(raw.ptMaxSize),
        min_track_size: point_to_size(raw.ptMinTrackSize),
        max_track_size: point_to_size(raw.ptMaxTrackSize),
    }
}

fn min_max_info_to_win(info: &MinMaxInfo, raw: &mut MINMAXINFO) {
    raw.ptMaxPosition = POINT { x: info.max_position.x, y: info.max_position.y };
    raw.ptMaxSize = size_to_point(info.max_size);
    raw.ptMinTrackSize = size_to_point(info.min_track_size);
    raw.ptMaxTrackSize = size_to_point(info.max_track_size);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_lparam(x: i16, y: i16) -> LPARAM {
        (((y as u16 as u32) << 16) | x as u16 as u32) as LPARAM
    }

    #[test]
    fn decodes_positions() {
        let event = decode_message(WM_NCHITTEST, 0, make_lparam(-5, 1079));
        let position = PhysicalPosition::new(-5, 1079);
        assert_eq!(event, Some(NativeEvent::NcHitTest { position }));

        let event = decode_message(WM_MOUSEMOVE, 0, make_lparam(12, 34));
        assert_eq!(event, Some(NativeEvent::MouseMove { position: PhysicalPosition::new(12, 34) }));
    }

    #[test]
    fn decodes_hit_codes() {
        // HTCLIENT in the low word, the mouse message in the high word.
        let lparam = ((WM_MOUSEMOVE as LPARAM) << 16) | 1;
        assert_eq!(
            decode_message(WM_SETCURSOR, 0, lparam),
            Some(NativeEvent::SetCursor { hit: HitTest::Client })
        );
        // HTERROR
        assert_eq!(
            decode_message(WM_SETCURSOR, 0, 0xFFFE),
            Some(NativeEvent::SetCursor { hit: HitTest::NoWhere })
        );
        assert_eq!(
            decode_message(WM_NCLBUTTONDOWN, 2, 0),
            Some(NativeEvent::NcLeftButtonDown { hit: HitTest::Caption })
        );
    }

    #[test]
    fn decodes_commands() {
        // The low four bits of `SC_*` are used by the system.
        assert_eq!(
            decode_message(WM_SYSCOMMAND, SC_MOVE as usize | 0x2, 0),
            Some(NativeEvent::SysCommand(SysCommand::Move))
        );
        assert_eq!(
            decode_message(WM_SYSCOMMAND, SC_KEYMENU as usize, 0),
            Some(NativeEvent::SysCommand(SysCommand::KeyMenu))
        );
        assert_eq!(
            decode_message(WM_SIZE, SIZE_MINIMIZED as usize, 0),
            Some(NativeEvent::Size(SizeKind::Minimized))
        );
        assert_eq!(
            decode_message(WM_SYSKEYDOWN, VK_F4 as usize, 0),
            Some(NativeEvent::SysKeyDown(SysKey::F4))
        );
        assert_eq!(
            decode_message(WM_POWERBROADCAST, PBT_APMRESUMESUSPEND as usize, 0),
            Some(NativeEvent::PowerBroadcast(PowerEvent::ResumeSuspend))
        );
        assert_eq!(
            decode_message(WM_ACTIVATEAPP, 0, 0),
            Some(NativeEvent::ActivateApp { active: false })
        );
        assert_eq!(decode_message(WM_NCDESTROY, 0, 0), None);
    }

    #[test]
    fn responses() {
        let hwnd = ptr::null_mut();
        assert_eq!(to_lresult(Response::Handled, hwnd, WM_CLOSE, 0, 0), 0);
        assert_eq!(to_lresult(Response::Consumed, hwnd, WM_ERASEBKGND, 0, 0), 1);
        let hit = Response::HitTest(HitTest::BottomRight);
        assert_eq!(to_lresult(hit, hwnd, WM_NCHITTEST, 0, 0), 17);
        assert_eq!(to_lresult(Response::MenuClose, hwnd, WM_MENUCHAR, 0, 0), 0x1_0000);
    }

    #[test]
    fn min_max_info_conversion() {
        let mut raw: MINMAXINFO = unsafe { mem::zeroed() };
        raw.ptMaxTrackSize = POINT { x: -1, y: 900 };
        let mut info = min_max_info_from_win(&raw);
        assert_eq!(info.max_track_size, PhysicalSize::new(0, 900));

        info.max_position = PhysicalPosition::new(-8, -8);
        info.max_size = PhysicalSize::new(u32::MAX, 1056);
        min_max_info_to_win(&info, &mut raw);
        assert_eq!((raw.ptMaxPosition.x, raw.ptMaxPosition.y), (-8, -8));
        assert_eq!((raw.ptMaxSize.x, raw.ptMaxSize.y), (i32::MAX, 1056));
    }
}
