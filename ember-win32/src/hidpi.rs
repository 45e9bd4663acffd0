#![allow(non_snake_case)]

use std::sync::Once;

use ember_core::state::BASE_DPI;
use windows_sys::Win32::Foundation::{HWND, RECT};
use windows_sys::Win32::Graphics::Gdi::{GetDC, GetDeviceCaps, ReleaseDC, LOGPIXELSX};
use windows_sys::Win32::UI::HiDpi::{
    DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE, DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2,
};
use windows_sys::Win32::UI::WindowsAndMessaging::{
    AdjustWindowRectEx, IsProcessDPIAware, WINDOW_EX_STYLE, WINDOW_STYLE,
};

use crate::util::{
    ADJUST_WINDOW_RECT_EX_FOR_DPI, GET_DPI_FOR_WINDOW, SET_PROCESS_DPI_AWARE,
    SET_PROCESS_DPI_AWARENESS_CONTEXT,
};

/// Opts the process into per-monitor DPI awareness. Only the first call has an effect.
pub fn become_dpi_aware() {
    static ENABLE_DPI_AWARENESS: Once = Once::new();
    ENABLE_DPI_AWARENESS.call_once(|| unsafe {
        if let Some(SetProcessDpiAwarenessContext) = *SET_PROCESS_DPI_AWARENESS_CONTEXT {
            // V2 needs Windows 10 1703, fall back to V1 before that.
            if SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2)
                == false.into()
            {
                SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE);
            }
        } else if let Some(SetProcessDPIAware) = *SET_PROCESS_DPI_AWARE {
            SetProcessDPIAware();
        }
    });
}

/// DPI of the monitor the window is on.
pub fn hwnd_dpi(hwnd: HWND) -> u32 {
    unsafe {
        if let Some(GetDpiForWindow) = *GET_DPI_FOR_WINDOW {
            // 0 is returned for an invalid handle.
            return match GetDpiForWindow(hwnd) {
                0 => BASE_DPI,
                dpi => dpi,
            };
        }

        // A DPI unaware process is scaled by the OS, so it must not scale again.
        if IsProcessDPIAware() == false.into() {
            return BASE_DPI;
        }

        let hdc = GetDC(hwnd);
        if hdc.is_null() {
            return BASE_DPI;
        }
        let dpi = GetDeviceCaps(hdc, LOGPIXELSX) as u32;
        ReleaseDC(hwnd, hdc);
        dpi
    }
}

/// Grows `rect` by the frame the given styles produce at `dpi`, or at the system DPI.
pub fn adjust_window_rect_with_styles(
    rect: RECT,
    style: WINDOW_STYLE,
    style_ex: WINDOW_EX_STYLE,
    dpi: Option<u32>,
) -> Option<RECT> {
    let mut rect = rect;
    let result = unsafe {
        match (*ADJUST_WINDOW_RECT_EX_FOR_DPI, dpi) {
            (Some(AdjustWindowRectExForDpi), Some(dpi)) => {
                AdjustWindowRectExForDpi(&mut rect, style, false.into(), style_ex, dpi)
            },
            _ => AdjustWindowRectEx(&mut rect, style, false.into(), style_ex),
        }
    };
    if result == false.into() {
        None
    } else {
        Some(rect)
    }
}
