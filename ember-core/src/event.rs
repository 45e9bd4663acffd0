//! The window messages the adapter understands, and what it answers.
//!
//! Backends decode raw OS messages into [`NativeEvent`]s. Messages without a counterpart here
//! go straight to the OS default handling.

use std::path::PathBuf;

use dpi::PhysicalPosition;

use crate::geometry::{MinMaxInfo, Rect};
use crate::window::HitTest;

/// A decoded window message.
#[derive(Debug, PartialEq)]
pub enum NativeEvent<'a> {
    Create,
    /// The OS asks which cursor to show; `hit` is the region under the pointer.
    SetCursor {
        hit: HitTest,
    },
    /// The pointer moved inside the client area.
    MouseMove {
        position: PhysicalPosition<i32>,
    },
    MouseLeave,
    Timer {
        id: usize,
    },
    /// The OS asks for the client rectangle of a window with the given outer rectangle.
    ///
    /// `client` holds the proposed outer rectangle and receives the client rectangle.
    NcCalcSize {
        /// The message carries a full `NCCALCSIZE_PARAMS` block rather than a single rectangle.
        valid_rects: bool,
        client: &'a mut Rect,
    },
    /// Desktop coordinates of the point to classify.
    NcHitTest {
        position: PhysicalPosition<i32>,
    },
    NcLeftButtonDown {
        hit: HitTest,
    },
    NcLeftButtonDoubleClick,
    NcActivate,
    EraseBackground,
    GetMinMaxInfo(&'a mut MinMaxInfo),
    SysCommand(SysCommand),
    Size(SizeKind),
    /// The window moved to a monitor with a different DPI.
    DpiChanged {
        dpi: u32,
        /// Outer rectangle the OS suggests for the new DPI.
        suggested: Rect,
    },
    EnterSizeMove,
    ExitSizeMove,
    SetFocus,
    KillFocus,
    ActivateApp {
        active: bool,
    },
    /// An accelerator key did not match a menu mnemonic.
    MenuChar,
    SysKeyDown(SysKey),
    PowerBroadcast(PowerEvent),
    Close,
    Destroy,
}

/// How the backend should complete a message.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Response {
    /// Let the OS default procedure handle the message.
    Default,
    /// The message was handled. Backends return `0`.
    Handled,
    /// The message was handled and the OS must not act on it. Backends return `TRUE`.
    Consumed,
    HitTest(HitTest),
    /// Close the active menu without a beep.
    MenuClose,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SizeKind {
    Restored,
    Minimized,
    Maximized,
    /// Size notifications about other windows.
    Other,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SysCommand {
    Move,
    Size,
    Maximize,
    /// The menu bar was opened with the keyboard.
    KeyMenu,
    Other,
}

impl SysCommand {
    /// Commands a fullscreen window refuses.
    pub fn breaks_fullscreen(self) -> bool {
        matches!(
            self,
            SysCommand::Move | SysCommand::Size | SysCommand::Maximize | SysCommand::KeyMenu
        )
    }
}

/// Keys pressed together with Alt.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SysKey {
    F4,
    Return,
    Other,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PowerEvent {
    /// The system asks permission to suspend.
    QuerySuspend,
    /// The system resumed from suspension.
    ResumeSuspend,
    Other,
}

/// File drag-and-drop over a window registered as a drop target.
///
/// Positions are in client coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragEvent {
    Entered { paths: Vec<PathBuf>, position: PhysicalPosition<i32> },
    Moved { position: PhysicalPosition<i32> },
    Dropped { paths: Vec<PathBuf>, position: PhysicalPosition<i32> },
    Left,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fullscreen_vetoes() {
        assert!(SysCommand::Move.breaks_fullscreen());
        assert!(SysCommand::KeyMenu.breaks_fullscreen());
        assert!(!SysCommand::Other.breaks_fullscreen());
    }
}
