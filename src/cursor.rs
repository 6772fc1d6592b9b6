// Camera-to-screen mapping and cursor smoothing.

use crate::types::Point;

/// Scale a detection from camera-pixel space into screen-pixel space.
///
/// Pure, origin-aligned scaling on each axis. If the camera and screen have
/// different aspect ratios the motion is stretched accordingly; that is a
/// known limitation we accept instead of letterboxing.
pub fn map_to_screen(
    detected: Point,
    frame_size: (usize, usize),
    screen_size: (usize, usize),
) -> Point {
    Point::new(
        detected.x / frame_size.0 as f64 * screen_size.0 as f64,
        detected.y / frame_size.1 as f64 * screen_size.1 as f64,
    )
}

/// Smoothed cursor position in screen space. The only piece of cursor state
/// that survives across frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CursorState {
    pub x: f64,
    pub y: f64,
}

impl CursorState {
    /// Start at the screen center, matching where most users look first.
    pub fn centered(screen_size: (usize, usize)) -> Self {
        Self {
            x: screen_size.0 as f64 / 2.0,
            y: screen_size.1 as f64 / 2.0,
        }
    }

    /// Exponential moving average toward `mapped`, weighting the previous
    /// position by `factor`. Callers only invoke this when the index marker
    /// was actually detected; on a lost marker the state is left alone and
    /// the cursor freezes in place rather than drifting.
    pub fn smooth_toward(&mut self, mapped: Point, factor: f64) {
        self.x = factor * self.x + (1.0 - factor) * mapped.x;
        self.y = factor * self.y + (1.0 - factor) * mapped.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_is_linear_and_origin_preserving() {
        let p = map_to_screen(Point::new(320.0, 240.0), (640, 480), (1920, 1080));
        assert_eq!(p, Point::new(960.0, 540.0));
        let origin = map_to_screen(Point::new(0.0, 0.0), (640, 480), (1920, 1080));
        assert_eq!(origin, Point::new(0.0, 0.0));
    }

    #[test]
    fn mapping_corners() {
        let p = map_to_screen(Point::new(640.0, 480.0), (640, 480), (1920, 1080));
        assert_eq!(p, Point::new(1920.0, 1080.0));
    }

    #[test]
    fn smoothing_formula() {
        let mut cursor = CursorState { x: 100.0, y: 100.0 };
        cursor.smooth_toward(Point::new(200.0, 100.0), 0.85);
        assert!((cursor.x - 115.0).abs() < 1e-9);
        assert!((cursor.y - 100.0).abs() < 1e-9);
    }

    #[test]
    fn centered_start() {
        let cursor = CursorState::centered((1920, 1080));
        assert_eq!(cursor, CursorState { x: 960.0, y: 540.0 });
    }
}
