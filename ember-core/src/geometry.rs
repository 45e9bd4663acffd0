//! Screen rectangles and sizing limits.

use dpi::{PhysicalPosition, PhysicalSize};

/// An edge based rectangle in physical pixels, laid out like the Win32 `RECT`.
///
/// `right` and `bottom` are exclusive.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }

    pub fn from_position_size(position: PhysicalPosition<i32>, size: PhysicalSize<u32>) -> Self {
        Self {
            left: position.x,
            top: position.y,
            right: position.x.saturating_add(clamp_extent(size.width)),
            bottom: position.y.saturating_add(clamp_extent(size.height)),
        }
    }

    /// Horizontal extent. Inverted rectangles have a width of 0.
    pub fn width(&self) -> u32 {
        extent(self.left, self.right)
    }

    pub fn height(&self) -> u32 {
        extent(self.top, self.bottom)
    }

    pub fn position(&self) -> PhysicalPosition<i32> {
        PhysicalPosition::new(self.left, self.top)
    }

    pub fn size(&self) -> PhysicalSize<u32> {
        PhysicalSize::new(self.width(), self.height())
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn contains(&self, point: PhysicalPosition<i32>) -> bool {
        (self.left..self.right).contains(&point.x) && (self.top..self.bottom).contains(&point.y)
    }
}

fn extent(from: i32, to: i32) -> u32 {
    u32::try_from(i64::from(to) - i64::from(from)).unwrap_or(0)
}

fn clamp_extent(extent: u32) -> i32 {
    i32::try_from(extent).unwrap_or(i32::MAX)
}

/// Tracking limits and maximized placement negotiated with the OS before a window is sized.
///
/// Mirrors the parts of `MINMAXINFO` the window layer fills in.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct MinMaxInfo {
    /// Position of the maximized window relative to its monitor.
    pub max_position: PhysicalPosition<i32>,
    /// Outer size of the maximized window.
    pub max_size: PhysicalSize<u32>,
    pub min_track_size: PhysicalSize<u32>,
    pub max_track_size: PhysicalSize<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_size_round_trip() {
        let rect =
            Rect::from_position_size(PhysicalPosition::new(-10, 20), PhysicalSize::new(300, 200));
        assert_eq!(rect, Rect::new(-10, 20, 290, 220));
        assert_eq!(rect.position(), PhysicalPosition::new(-10, 20));
        assert_eq!(rect.size(), PhysicalSize::new(300, 200));
    }

    #[test]
    fn inverted_rect_is_empty() {
        let rect = Rect::new(10, 10, 5, 40);
        assert_eq!(rect.width(), 0);
        assert_eq!(rect.height(), 30);
        assert!(rect.is_empty());
        assert!(Rect::default().is_empty());
    }

    #[test]
    fn contains_excludes_far_edges() {
        let rect = Rect::new(0, 0, 10, 10);
        assert!(rect.contains(PhysicalPosition::new(0, 0)));
        assert!(rect.contains(PhysicalPosition::new(9, 9)));
        assert!(!rect.contains(PhysicalPosition::new(10, 5)));
        assert!(!rect.contains(PhysicalPosition::new(5, -1)));
    }

    #[test]
    fn huge_sizes_saturate() {
        let position = PhysicalPosition::new(i32::MAX - 5, 0);
        let rect = Rect::from_position_size(position, PhysicalSize::new(u32::MAX, 1));
        assert_eq!(rect.right, i32::MAX);
        assert_eq!(rect.width(), 5);
    }
}
