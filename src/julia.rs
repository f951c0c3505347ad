//! Host-side reference of the per-pixel color function.
//!
//! The fragment program in [`crate::shaders`] evaluates the same formula on the
//! GPU; the palette constants below are spliced into its source so both sides
//! agree.

use std::f64::consts::TAU;

/// Iteration cap of the escape-time loop.
pub const MAX_ITERATIONS: u32 = 100;
/// Escape radius.
pub const ESCAPE_RADIUS: f64 = 2.0;

/// Cosine palette `a + b * cos(2pi * (c * t + d))`.
pub const COSINE_A: [f64; 3] = [0.5, 0.5, 0.5];
pub const COSINE_B: [f64; 3] = [0.5, 0.5, 0.5];
pub const COSINE_C: [f64; 3] = [1.0, 1.0, 1.0];
pub const COSINE_D: [f64; 3] = [0.263, 0.416, 0.557];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Escape {
    /// Iterations completed before `|z|` exceeded the radius.
    pub count: u32,
    /// `|z|` when the loop stopped.
    pub magnitude: f64,
    pub escaped: bool,
}

impl Escape {
    /// Normalized escape ratio with the continuous-coloring correction.
    pub fn ratio(&self) -> f64 {
        let t = f64::from(self.count) / f64::from(MAX_ITERATIONS);
        if self.escaped {
            t - (self.magnitude - ESCAPE_RADIUS) / 200.0
        } else {
            t
        }
    }
}

/// Iterates `z <- z^2 + c` starting at `z`.
pub fn escape(z: (f64, f64), c: (f64, f64)) -> Escape {
    let (mut zx, mut zy) = z;
    let mut count = 0;
    for _ in 0..MAX_ITERATIONS {
        let next_x = zx * zx - zy * zy + c.0;
        zy = 2.0 * zx * zy + c.1;
        zx = next_x;
        if zx.hypot(zy) > ESCAPE_RADIUS {
            return Escape {
                count,
                magnitude: zx.hypot(zy),
                escaped: true,
            };
        }
        count += 1;
    }
    Escape {
        count,
        magnitude: zx.hypot(zy),
        escaped: false,
    }
}

/// Maps a fragment coordinate (origin bottom-left) into the centered,
/// aspect-corrected plane.
pub fn normalize(frag: (f64, f64), width: f64, height: f64) -> (f64, f64) {
    let w = width.max(1.0);
    let h = height.max(1.0);
    let x = (frag.0 / w * 2.0 - 1.0) * (w / h);
    let y = frag.1 / h * 2.0 - 1.0;
    (x, y)
}

pub fn cosine_palette(t: f64) -> [f64; 3] {
    std::array::from_fn(|i| COSINE_A[i] + COSINE_B[i] * (TAU * (COSINE_C[i] * t + COSINE_D[i])).cos())
}

/// `sin(t * k)` per channel; negative values clamp to black on output.
pub fn tunable_palette(t: f64, coefficients: [f32; 3]) -> [f64; 3] {
    coefficients.map(|k| (t * f64::from(k)).sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_with_zero_constant_never_escapes() {
        let result = escape((0.0, 0.0), (0.0, 0.0));
        assert!(!result.escaped);
        assert_eq!(result.count, MAX_ITERATIONS);
        assert_eq!(result.ratio(), 1.0);
    }

    #[test]
    fn far_point_escapes_immediately() {
        let result = escape((3.0, 0.0), (0.0, 0.0));
        assert!(result.escaped);
        assert_eq!(result.count, 0);
        // |z| = 9 after one step
        assert!((result.ratio() - (0.0 - 7.0 / 200.0)).abs() < 1e-12);
    }

    #[test]
    fn normalize_centers_and_corrects_aspect() {
        let (x, y) = normalize((400.0, 300.0), 800.0, 600.0);
        assert!(x.abs() < 1e-12 && y.abs() < 1e-12);
        let (x, y) = normalize((800.0, 600.0), 800.0, 600.0);
        assert!((x - 800.0 / 600.0).abs() < 1e-12);
        assert!((y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn cosine_palette_is_periodic_and_bounded() {
        for step in 0..50 {
            let t = step as f64 * 0.037;
            let a = cosine_palette(t);
            let b = cosine_palette(t + 1.0);
            for i in 0..3 {
                assert!((a[i] - b[i]).abs() < 1e-9);
                assert!((0.0..=1.0).contains(&a[i]));
            }
        }
    }

    #[test]
    fn tunable_palette_is_black_for_zero_coefficients() {
        assert_eq!(tunable_palette(0.7, [0.0; 3]), [0.0; 3]);
    }
}
