// Limit this demo to platforms with a native backend.
#[cfg(windows_platform)]
fn main() -> std::process::ExitCode {
    use std::cell::RefCell;
    use std::process::ExitCode;
    use std::rc::Rc;

    use ember::dpi::{PhysicalPosition, PhysicalSize};
    use ember::platform::Window;
    use ember::{HitTest, WindowHandler, WindowSettings};
    use tracing_subscriber::EnvFilter;

    const CAPTION_HEIGHT: i32 = 32;
    const EDGE: i32 = 6;

    /// Classifies a client point of a `width` x `height` window.
    fn classify(x: i32, y: i32, width: i32, height: i32) -> HitTest {
        let left = x < EDGE;
        let right = x >= width - EDGE;
        let top = y < EDGE;
        let bottom = y >= height - EDGE;
        match (left, right, top, bottom) {
            (true, _, true, _) => HitTest::TopLeft,
            (_, true, true, _) => HitTest::TopRight,
            (true, _, _, true) => HitTest::BottomLeft,
            (_, true, _, true) => HitTest::BottomRight,
            (true, ..) => HitTest::Left,
            (_, true, ..) => HitTest::Right,
            (_, _, true, _) => HitTest::Top,
            (.., true) => HitTest::Bottom,
            _ if y < CAPTION_HEIGHT => HitTest::Caption,
            _ => HitTest::Client,
        }
    }

    #[derive(Default)]
    struct Chrome {
        window: Rc<RefCell<Option<Window>>>,
    }

    impl WindowHandler for Chrome {
        fn on_hit_test(&self, position: PhysicalPosition<i32>) -> Option<HitTest> {
            let window = self.window.borrow();
            let window = window.as_ref()?;
            if window.is_maximized() {
                let caption = window.screen_to_client(position).y < CAPTION_HEIGHT;
                return Some(if caption { HitTest::Caption } else { HitTest::Client });
            }

            let bounds = window.client_bounds();
            Some(classify(
                position.x - bounds.left,
                position.y - bounds.top,
                bounds.width() as i32,
                bounds.height() as i32,
            ))
        }

        fn on_resize(&self, size: PhysicalSize<u32>) {
            println!("resized to {}x{}", size.width, size.height);
        }

        fn on_closed(&self) {
            self.window.borrow_mut().take();
        }
    }

    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let chrome = Chrome::default();
    let slot = chrome.window.clone();
    let settings = WindowSettings::default()
        .with_title("Borderless")
        .with_size(PhysicalSize::new(960, 540))
        .with_border(false);
    let window = ember::create_window(settings, chrome);
    *slot.borrow_mut() = Some(window.clone());

    window.show();
    window.bring_to_front(true);

    let exit_code = ember::platform::run();
    ExitCode::from(exit_code as u8)
}

#[cfg(not(windows_platform))]
fn main() {
    println!("This platform has no native window backend.");
}
