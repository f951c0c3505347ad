//! Pointer signal: the 2D coordinate that drives the Julia constant.

/// Horizontal drift amplitude in pixels.
pub const DRIFT_AMPLITUDE_X: f64 = 450.0;
/// Vertical drift amplitude in pixels.
pub const DRIFT_AMPLITUDE_Y: f64 = 300.0;
/// Divisor applied to wall-clock milliseconds for the horizontal drift.
pub const DRIFT_PERIOD_X_MS: f64 = 8000.0;
/// Divisor applied to wall-clock milliseconds for the vertical drift.
pub const DRIFT_PERIOD_Y_MS: f64 = 5000.0;

/// A pointer position in canvas pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerSample {
    pub x: f64,
    pub y: f64,
}

impl PointerSample {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: PointerSample) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Maps the sample into the Julia constant space: `[-1, 1]` per axis of
    /// the canvas, scaled by 1.5.
    pub fn to_julia_constant(self, width: f64, height: f64) -> (f64, f64) {
        let w = width.max(1.0);
        let h = height.max(1.0);
        (
            (self.x / w * 2.0 - 1.0) * 1.5,
            (self.y / h * 2.0 - 1.0) * 1.5,
        )
    }
}

/// Canvas dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(self) -> PointerSample {
        PointerSample::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Idle oscillation around the canvas center.
///
/// The two axes use unrelated periods so the curve does not close on itself
/// in any reasonable time span.
pub fn drift(now_ms: f64, size: CanvasSize) -> PointerSample {
    let center = size.center();
    PointerSample::new(
        center.x + DRIFT_AMPLITUDE_X * (now_ms / DRIFT_PERIOD_X_MS).sin(),
        center.y + DRIFT_AMPLITUDE_Y * (now_ms / DRIFT_PERIOD_Y_MS).cos(),
    )
}

/// Where the current pointer position comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalMode {
    /// Auto drift, nobody has touched the canvas yet (or the session was reset).
    Drift,
    /// Last pointer/touch event wins.
    Live,
    /// A recorded path is being replayed.
    Playback,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::TAU;

    #[test]
    fn drift_at_time_zero_is_offset_vertically() {
        let size = CanvasSize::new(800.0, 600.0);
        let p = drift(0.0, size);
        assert!((p.x - 400.0).abs() < 1e-9);
        assert!((p.y - 600.0).abs() < 1e-9);
    }

    #[test]
    fn drift_stays_within_amplitude() {
        let size = CanvasSize::new(1920.0, 1080.0);
        let center = size.center();
        for step in 0..500 {
            let p = drift(step as f64 * 97.0, size);
            assert!((p.x - center.x).abs() <= DRIFT_AMPLITUDE_X + 1e-9);
            assert!((p.y - center.y).abs() <= DRIFT_AMPLITUDE_Y + 1e-9);
        }
    }

    #[test]
    fn drift_repeats_horizontally_after_full_cycle() {
        let size = CanvasSize::new(800.0, 600.0);
        let a = drift(1234.0, size);
        let b = drift(1234.0 + TAU * DRIFT_PERIOD_X_MS, size);
        assert!((a.x - b.x).abs() < 1e-6);
    }

    #[test]
    fn julia_constant_for_reference_pointer() {
        let (cx, cy) = PointerSample::new(650.0, 450.0).to_julia_constant(800.0, 600.0);
        assert!((cx - 0.9375).abs() < 1e-12);
        assert!((cy - 0.75).abs() < 1e-12);
    }
}
