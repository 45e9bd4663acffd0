//! Platform independent half of the ember window layer.
//!
//! A native window is split in two:
//!
//! - a backend type implementing [`NativeWindow`](native::NativeWindow), which performs the raw
//!   OS calls for one handle and nothing else;
//! - the [`Window`](adapter::Window) adapter, which owns that backend together with the
//!   per-window [`WindowState`](state::WindowState) record, implements every imperative
//!   operation (show, maximize, borderless toggling, cursor clipping, ...) and translates the
//!   backend's [`NativeEvent`](event::NativeEvent)s into [`WindowHandler`](handler::WindowHandler)
//!   callbacks.
//!
//! Backends translate their OS message codes into [`NativeEvent`](event::NativeEvent)s and turn
//! the returned [`Response`](event::Response) back into an OS result. The
//! [`headless`] backend simulates a window in memory and backs the test-suite.

#[macro_use]
pub mod error;

pub mod adapter;
pub mod event;
pub mod geometry;
pub mod handler;
pub mod headless;
pub mod native;
pub mod state;
pub mod window;

pub use adapter::Window;
pub use dpi;
