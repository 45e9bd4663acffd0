// Limit this demo to platforms with a native backend.
#[cfg(windows_platform)]
fn main() -> std::process::ExitCode {
    use std::cell::Cell;
    use std::process::ExitCode;

    use cursor_icon::CursorIcon;
    use ember::dpi::{PhysicalPosition, PhysicalSize};
    use ember::{ClosingReason, DragEvent, WindowHandler, WindowSettings};
    use tracing_subscriber::EnvFilter;

    #[derive(Default)]
    struct Logger {
        close_attempts: Cell<u32>,
    }

    impl WindowHandler for Logger {
        fn on_resize(&self, size: PhysicalSize<u32>) {
            println!("resized to {}x{}", size.width, size.height);
        }

        fn on_got_focus(&self) {
            println!("focused");
        }

        fn on_lost_focus(&self) {
            println!("unfocused");
        }

        fn on_closing(&self, reason: ClosingReason) -> bool {
            // The first close request is refused.
            let attempts = self.close_attempts.get() + 1;
            self.close_attempts.set(attempts);
            println!("close requested ({reason:?}), attempt {attempts}");
            attempts < 2
        }

        fn on_closed(&self) {
            println!("closed");
        }

        fn on_dpi_changed(&self, dpi: u32, scale: f32) {
            println!("dpi {dpi} (scale {scale})");
        }

        fn on_fullscreen_changed(&self, fullscreen: bool) {
            println!("fullscreen: {fullscreen}");
        }

        fn on_drag(&self, event: &DragEvent) {
            println!("{event:?}");
        }
    }

    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let settings = WindowSettings::default()
        .with_title("A fantastic window!")
        .with_position(PhysicalPosition::new(200, 200))
        .with_size(PhysicalSize::new(800, 600))
        .with_min_size(PhysicalSize::new(320, 240))
        .with_drag_and_drop(true);
    let window = ember::create_window(settings, Logger::default());

    window.set_cursor(CursorIcon::Crosshair);
    window.show();
    println!("client bounds: {:?}", window.client_bounds());
    println!("monitor: {:?}", window.screen_info());

    let exit_code = ember::platform::run();
    ExitCode::from(exit_code as u8)
}

#[cfg(not(windows_platform))]
fn main() {
    println!("This platform has no native window backend.");
}
