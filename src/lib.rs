//! Platform layer of the ember engine.
//!
//! The crate is a facade over:
//!
//! - [`ember_core`], the platform independent window model: [`WindowSettings`], the
//!   [`WindowHandler`] callbacks, and the [`Window`](ember_core::Window) adapter that implements
//!   the window operations and the reaction to OS messages;
//! - `ember_win32`, the Win32 backend, re-exported as [`platform`] on Windows;
//! - [`ember_strings`], character classification and NUL-terminated string helpers, re-exported
//!   as [`strings`].
//!
//! # Creating a window
//!
//! ```no_run
//! # #[cfg(windows)]
//! # fn main() {
//! use ember::WindowSettings;
//!
//! let window = ember::create_window(WindowSettings::default().with_title("ember"), ());
//! window.show();
//! std::process::exit(ember::platform::run());
//! # }
//! # #[cfg(not(windows))]
//! # fn main() {}
//! ```
//!
//! On other targets only the platform independent model is available. Its
//! [`headless`](ember_core::headless) backend simulates a native window in memory and is what the
//! test-suite drives.
//!
//! # Cargo features
//!
//! - `serde`: `Serialize`/`Deserialize` for [`WindowSettings`], the plain enums and the `dpi`
//!   geometry types.

pub use dpi;
pub use ember_core;
pub use ember_core::error::OsError;
pub use ember_core::event::DragEvent;
pub use ember_core::handler::WindowHandler;
pub use ember_core::window::{ClosingReason, Cursor, CursorKind, HitTest, WindowSettings};
pub use ember_strings as strings;
#[cfg(windows_platform)]
pub use ember_win32 as platform;

/// Creates a native window with `handler` receiving its notifications.
///
/// Logs the error and aborts the process if the OS refuses to create the window.
#[cfg(windows_platform)]
pub fn create_window<H>(settings: WindowSettings, handler: H) -> ember_win32::Window
where
    H: WindowHandler + 'static,
{
    tracing::debug!(title = %settings.title, "Creating window");
    match ember_win32::Window::new(settings, Box::new(handler)) {
        Ok(window) => window,
        Err(error) => ember_core::error::fatal(format_args!("Failed to create window: {error}")),
    }
}
