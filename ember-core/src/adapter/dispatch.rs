use dpi::{PhysicalPosition, PhysicalSize};
use tracing::{info, trace, warn};

use super::{Window, MOUSE_STOP_DELAY, MOUSE_STOP_TIMER};
use crate::event::{NativeEvent, PowerEvent, Response, SizeKind, SysCommand, SysKey};
use crate::geometry::{MinMaxInfo, Rect};
use crate::native::NativeWindow;
use crate::state::WindowFlags;
use crate::window::{ClosingReason, HitTest};

/// Distance from the near monitor edges at which a tracked cursor wraps around.
const WRAP_MARGIN: i32 = 2;
/// Same for the far edges, which are exclusive.
const WRAP_FAR_MARGIN: i32 = 1;
/// Distance from the opposite edge the wrapped cursor lands at.
const WRAP_INSET: i32 = 3;

impl<N: NativeWindow> Window<N> {
    /// Reacts to one window message.
    pub fn handle_event(&self, event: NativeEvent<'_>) -> Response {
        trace!(?event, "window message");

        match event {
            NativeEvent::Create => Response::Handled,
            NativeEvent::SetCursor { hit } => self.on_set_cursor(hit),
            NativeEvent::MouseMove { position } => self.on_mouse_move(position),
            NativeEvent::MouseLeave => {
                self.set_flags(WindowFlags::MOUSE_LEAVE_ARMED, false);
                Response::Default
            },
            NativeEvent::Timer { id } => self.on_timer(id),
            NativeEvent::NcCalcSize { valid_rects, client } => {
                self.on_nc_calc_size(valid_rects, client)
            },
            NativeEvent::NcHitTest { position } => self.on_nc_hit_test(position),
            NativeEvent::NcLeftButtonDown { hit } => {
                if self.handler.on_left_button_hit(hit) {
                    Response::Handled
                } else {
                    Response::Default
                }
            },
            NativeEvent::NcLeftButtonDoubleClick => {
                if self.is_maximized() {
                    self.restore();
                } else {
                    self.maximize();
                }
                Response::Handled
            },
            NativeEvent::NcActivate => {
                if !self.has_border() && !self.native.is_composition_enabled() {
                    Response::Consumed
                } else {
                    Response::Default
                }
            },
            NativeEvent::EraseBackground => Response::Consumed,
            NativeEvent::GetMinMaxInfo(info) => self.on_get_min_max_info(info),
            NativeEvent::SysCommand(command) => self.on_sys_command(command),
            NativeEvent::Size(kind) => self.on_size(kind),
            NativeEvent::DpiChanged { dpi, suggested } => self.on_dpi_changed(dpi, suggested),
            NativeEvent::EnterSizeMove => {
                self.set_flags(WindowFlags::RESIZING, true);
                Response::Default
            },
            NativeEvent::ExitSizeMove => {
                self.set_flags(WindowFlags::RESIZING, false);
                self.check_for_window_resize();
                Response::Default
            },
            NativeEvent::SetFocus => {
                self.focus_gained();
                self.reapply_cursor_clip();
                Response::Default
            },
            NativeEvent::KillFocus => {
                self.release_cursor_clip();
                self.focus_lost();
                Response::Default
            },
            NativeEvent::ActivateApp { active } => self.on_activate_app(active),
            NativeEvent::MenuChar => Response::MenuClose,
            NativeEvent::SysKeyDown(key) => self.on_sys_key_down(key),
            NativeEvent::PowerBroadcast(event) => self.on_power_broadcast(event),
            NativeEvent::Close => {
                self.close(ClosingReason::User);
                Response::Handled
            },
            NativeEvent::Destroy => self.on_destroy(),
        }
    }

    fn on_set_cursor(&self, hit: HitTest) -> Response {
        if hit != HitTest::Client {
            return Response::Default;
        }

        let cursor = self.state_lock().cursor;
        self.native.apply_cursor(cursor);
        Response::Consumed
    }

    fn on_mouse_move(&self, position: PhysicalPosition<i32>) -> Response {
        let (arm_leave, tracking, wrap) = {
            let mut state = self.state_lock();
            let arm_leave = !state.flags.contains(WindowFlags::MOUSE_LEAVE_ARMED);
            state.flags.insert(WindowFlags::MOUSE_LEAVE_ARMED);
            let tracking = state.flags.contains(WindowFlags::TRACKING_MOUSE);
            (arm_leave, tracking, tracking && state.mouse.use_screen_offset)
        };

        if arm_leave {
            self.native.arm_mouse_leave();
        }
        if !tracking {
            return Response::Default;
        }

        self.native.kill_timer(MOUSE_STOP_TIMER);
        self.native.set_timer(MOUSE_STOP_TIMER, MOUSE_STOP_DELAY);

        if wrap {
            let mouse = self.native.client_to_screen(position);
            let screen = self.state_lock().mouse.screen;
            let (wrapped, horizontal, vertical) = wrap_to_screen(mouse, screen);
            {
                let mut state = self.state_lock();
                state.mouse.horizontal_flip = horizontal;
                state.mouse.vertical_flip = vertical;
                state.mouse.offset.x -= wrapped.x - mouse.x;
                state.mouse.offset.y -= wrapped.y - mouse.y;
            }
            if wrapped != mouse {
                self.native.set_cursor_position(wrapped);
            }
        }

        Response::Default
    }

    fn on_timer(&self, id: usize) -> Response {
        if id != MOUSE_STOP_TIMER {
            return Response::Default;
        }
        self.native.kill_timer(id);
        Response::Handled
    }

    fn on_nc_calc_size(&self, valid_rects: bool, client: &mut Rect) -> Response {
        // Fullscreen restyles the window without touching `has_border`.
        if !valid_rects || (self.has_border() && !self.is_fullscreen()) {
            return Response::Default;
        }

        // A maximized borderless window would otherwise cover the taskbar.
        if self.native.is_placement_maximized() {
            *client = self.native.monitor_work_area();
        }
        Response::Handled
    }

    fn on_nc_hit_test(&self, position: PhysicalPosition<i32>) -> Response {
        if self.is_fullscreen() {
            return Response::HitTest(HitTest::Client);
        }

        match self.handler.on_hit_test(position) {
            Some(hit) => Response::HitTest(hit),
            None => Response::Default,
        }
    }

    fn on_get_min_max_info(&self, info: &mut MinMaxInfo) -> Response {
        let (min_size, max_size, has_border, flags) = {
            let state = self.state_lock();
            (state.settings.min_size, state.settings.max_size, state.has_border(), state.flags)
        };

        let frame = if has_border { self.native.frame_size() } else { PhysicalSize::new(0, 0) };
        info.min_track_size = min_size;
        info.max_track_size = PhysicalSize::new(
            max_size.width.saturating_add(frame.width),
            max_size.height.saturating_add(frame.height),
        );

        let fit_work_area = !flags.contains(WindowFlags::FULLSCREEN)
            && (flags.contains(WindowFlags::DURING_MAXIMIZE)
                || self.native.is_placement_maximized()
                || self.native.is_minimized());
        if fit_work_area {
            let monitor = self.native.monitor_bounds();
            let work = self.native.monitor_work_area();
            let offset = (work.left - monitor.left, work.top - monitor.top);
            info.max_position = PhysicalPosition::new(offset.0.abs(), offset.1.abs());
            info.max_size = work.size();
        }

        Response::Handled
    }

    fn on_sys_command(&self, command: SysCommand) -> Response {
        if self.is_fullscreen() && command.breaks_fullscreen() {
            Response::Handled
        } else {
            Response::Default
        }
    }

    fn on_size(&self, kind: SizeKind) -> Response {
        match kind {
            SizeKind::Minimized => {
                let mut state = self.state_lock();
                state.flags.insert(WindowFlags::MINIMIZED);
                state.flags.remove(WindowFlags::MAXIMIZED);
            },
            // Rapid minimize and restore can report an empty client area after the fact.
            _ if self.native.client_size().height == 0 => (),
            SizeKind::Maximized => {
                {
                    let mut state = self.state_lock();
                    state.flags.remove(WindowFlags::MINIMIZED);
                    state.flags.insert(WindowFlags::MAXIMIZED);
                }
                self.check_for_window_resize();
            },
            SizeKind::Restored => {
                let flags = self.flags();
                if flags.intersects(WindowFlags::MAXIMIZED | WindowFlags::MINIMIZED) {
                    self.set_flags(WindowFlags::MAXIMIZED | WindowFlags::MINIMIZED, false);
                    self.check_for_window_resize();
                } else if !flags
                    .intersects(WindowFlags::RESIZING | WindowFlags::SWITCHING_FULLSCREEN)
                {
                    self.check_for_window_resize();
                }
            },
            SizeKind::Other => (),
        }

        Response::Default
    }

    fn on_dpi_changed(&self, dpi: u32, suggested: Rect) -> Response {
        let scale = {
            let mut state = self.state_lock();
            state.set_dpi(dpi);
            state.dpi_scale
        };

        self.native.set_window_pos(Some(suggested.position()), Some(suggested.size()), false);
        self.handler.on_dpi_changed(dpi, scale);
        Response::Handled
    }

    fn on_activate_app(&self, active: bool) -> Response {
        let focused = self.is_focused();
        if active && !focused {
            self.focus_gained();
        } else if !active && focused {
            self.focus_lost();

            let flags = self.flags();
            if flags.contains(WindowFlags::FULLSCREEN)
                && !flags.contains(WindowFlags::SWITCHING_FULLSCREEN)
            {
                self.set_fullscreen(false);
            }
        }

        Response::Default
    }

    fn focus_gained(&self) {
        self.set_flags(WindowFlags::FOCUSED, true);
        self.handler.on_got_focus();
    }

    fn focus_lost(&self) {
        self.set_flags(WindowFlags::FOCUSED, false);
        self.handler.on_lost_focus();
    }

    fn reapply_cursor_clip(&self) {
        let clip = {
            let mut state = self.state_lock();
            let reapply = state.flags.contains(WindowFlags::CLIPPING_CURSOR)
                && !state.flags.contains(WindowFlags::CLIP_CURSOR_SET);
            if reapply {
                state.flags.insert(WindowFlags::CLIP_CURSOR_SET);
            }
            reapply.then_some(state.clip_rect)
        };

        if let Some(rect) = clip {
            self.native.clip_cursor(Some(rect));
        }
    }

    fn release_cursor_clip(&self) {
        let release = {
            let mut state = self.state_lock();
            let release = state.flags.contains(WindowFlags::CLIP_CURSOR_SET);
            state.flags.remove(WindowFlags::CLIP_CURSOR_SET);
            release
        };

        if release {
            self.native.clip_cursor(None);
        }
    }

    fn on_sys_key_down(&self, key: SysKey) -> Response {
        match key {
            SysKey::F4 => {
                info!("Alt+F4 pressed");
                self.close(ClosingReason::User);
                Response::Handled
            },
            SysKey::Return => {
                info!("Alt+Enter pressed");
                self.set_fullscreen(!self.is_fullscreen());
                Response::Handled
            },
            SysKey::Other => Response::Default,
        }
    }

    fn on_power_broadcast(&self, event: PowerEvent) -> Response {
        match event {
            PowerEvent::QuerySuspend => {
                self.handler.on_system_suspend();
                Response::Consumed
            },
            PowerEvent::ResumeSuspend => {
                self.handler.on_system_resume();
                Response::Consumed
            },
            PowerEvent::Other => Response::Default,
        }
    }

    fn on_destroy(&self) -> Response {
        if self.flags().contains(WindowFlags::DRAG_AND_DROP) {
            if let Err(err) = self.native.revoke_drag_drop() {
                warn!("failed to revoke drag and drop: {err}");
            }
            self.set_flags(WindowFlags::DRAG_AND_DROP, false);
        }

        self.mark_destroyed();
        self.native.post_quit(0);
        Response::Handled
    }
}

/// Moves a cursor that touches a monitor edge to the opposite edge.
///
/// Returns the new position and whether it wrapped horizontally and vertically.
fn wrap_to_screen(
    mouse: PhysicalPosition<i32>,
    screen: Rect,
) -> (PhysicalPosition<i32>, bool, bool) {
    let mut wrapped = mouse;

    let horizontal = if mouse.x <= screen.left + WRAP_MARGIN {
        wrapped.x = screen.right - WRAP_INSET;
        true
    } else if mouse.x >= screen.right - WRAP_FAR_MARGIN {
        wrapped.x = screen.left + WRAP_INSET;
        true
    } else {
        false
    };

    let vertical = if mouse.y <= screen.top + WRAP_MARGIN {
        wrapped.y = screen.bottom - WRAP_INSET;
        true
    } else if mouse.y >= screen.bottom - WRAP_FAR_MARGIN {
        wrapped.y = screen.top + WRAP_INSET;
        true
    } else {
        false
    };

    (wrapped, horizontal, vertical)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: Rect = Rect::new(0, 0, 1920, 1080);

    #[test]
    fn wrap_leaves_interior_points() {
        let mouse = PhysicalPosition::new(500, 500);
        assert_eq!(wrap_to_screen(mouse, SCREEN), (mouse, false, false));
        let near = PhysicalPosition::new(3, 1078);
        assert_eq!(wrap_to_screen(near, SCREEN), (near, false, false));
    }

    #[test]
    fn wrap_jumps_to_opposite_edge() {
        assert_eq!(
            wrap_to_screen(PhysicalPosition::new(2, 500), SCREEN),
            (PhysicalPosition::new(1917, 500), true, false)
        );
        assert_eq!(
            wrap_to_screen(PhysicalPosition::new(1919, 1079), SCREEN),
            (PhysicalPosition::new(3, 3), true, true)
        );
        assert_eq!(
            wrap_to_screen(PhysicalPosition::new(700, -4), SCREEN),
            (PhysicalPosition::new(700, 1077), false, true)
        );
    }
}
