//! The thread message loop windows are driven by.

use std::{mem, ptr};

use tracing::debug;
use windows_sys::Win32::UI::WindowsAndMessaging::{
    DispatchMessageW, GetMessageW, PeekMessageW, TranslateMessage, MSG, PM_REMOVE, WM_QUIT,
};

/// Outcome of [`pump_events`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpStatus {
    /// The queue is empty and no quit was requested.
    Continue,
    /// `WM_QUIT` was received with this exit code.
    Exit(i32),
}

/// Dispatches messages until `WM_QUIT` arrives and returns its exit code.
///
/// The last window posts `WM_QUIT` when it is destroyed.
pub fn run() -> i32 {
    let mut msg: MSG = unsafe { mem::zeroed() };
    loop {
        match unsafe { GetMessageW(&mut msg, ptr::null_mut(), 0, 0) } {
            // `-1` is an invalid window handle in the filter, which cannot happen with a null one.
            -1 | 0 => break,
            _ => unsafe {
                TranslateMessage(&msg);
                DispatchMessageW(&msg);
            },
        }
    }

    let exit_code = msg.wParam as i32;
    debug!(exit_code, "Message loop finished");
    exit_code
}

/// Dispatches every pending message without blocking.
pub fn pump_events() -> PumpStatus {
    let mut msg: MSG = unsafe { mem::zeroed() };
    while unsafe { PeekMessageW(&mut msg, ptr::null_mut(), 0, 0, PM_REMOVE) } != false.into() {
        if msg.message == WM_QUIT {
            return PumpStatus::Exit(msg.wParam as i32);
        }

        unsafe {
            TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }

    PumpStatus::Continue
}
