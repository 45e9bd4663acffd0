//! # Ember Win32 backend
//!
//! Creates top-level windows with `CreateWindowExW` and runs their window procedure. Raw
//! messages are decoded into [`NativeEvent`](ember_core::event::NativeEvent)s for the
//! platform independent [`ember_core::Window`], and the OS calls it requests are performed by
//! [`Win32Native`].
//!
//! Windows, and their handlers, belong to the thread that created them and are driven by
//! [`run`] or [`pump_events`] on that thread.
#![cfg(target_os = "windows")]

#[macro_use]
mod util;
mod definitions;
mod drop_handler;
mod event_loop;
mod hidpi;
mod native;
mod style;
mod window;

pub use self::event_loop::{pump_events, run, PumpStatus};
pub use self::hidpi::become_dpi_aware;
pub use self::native::Win32Native;
pub use self::style::StyleFlags;
pub use self::window::Window;
