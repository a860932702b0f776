//! Easing curves for tweens and looping decorations

/// Easing function type
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// CSS-style `cubic-bezier(x1, y1, x2, y2)`
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// Overshooting ease used for the cursor core scale
    pub const BACK_OUT: Easing = Easing::CubicBezier(0.34, 1.56, 0.64, 1.0);

    /// Apply the easing function to a progress value (0.0 to 1.0)
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Easing::Linear => t,
            Easing::EaseIn => t * t * t,
            Easing::EaseOut => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier(t, x1, y1, x2, y2),
        }
    }

    /// Out-and-back: rises from 0 to 1 over the first half of `t`, then
    /// falls back to 0, easing both legs.
    pub fn apply_mirrored(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        if t < 0.5 {
            self.apply(t * 2.0)
        } else {
            self.apply((1.0 - t) * 2.0)
        }
    }
}

/// Solve the bezier for x with Newton steps, falling back to bisection when
/// the slope flattens out. Computed in f64.
fn cubic_bezier(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let target = t as f64;
    let (x1, y1, x2, y2) = (x1 as f64, y1 as f64, x2 as f64, y2 as f64);

    let mut s = target;
    let mut solved = false;
    for _ in 0..8 {
        let err = sample(s, x1, x2) - target;
        if err.abs() < 1e-7 {
            solved = true;
            break;
        }
        let slope = slope(s, x1, x2);
        if slope.abs() < 1e-7 {
            break;
        }
        s -= err / slope;
    }

    if !solved {
        let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
        s = target;
        for _ in 0..24 {
            let x = sample(s, x1, x2);
            if (x - target).abs() < 1e-7 {
                break;
            }
            if x < target {
                lo = s;
            } else {
                hi = s;
            }
            s = (lo + hi) * 0.5;
        }
    }

    sample(s, y1, y2) as f32
}

#[inline]
fn sample(s: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    ((a * s + b) * s + c) * s
}

#[inline]
fn slope(s: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    (3.0 * a * s + 2.0 * b) * s + c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        for easing in [
            Easing::Linear,
            Easing::EaseIn,
            Easing::EaseOut,
            Easing::EaseInOut,
            Easing::BACK_OUT,
        ] {
            assert!(easing.apply(0.0).abs() < 1e-6, "{easing:?} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6, "{easing:?} at 1");
        }
    }

    #[test]
    fn test_back_out_overshoots() {
        let peak = (1..100)
            .map(|i| Easing::BACK_OUT.apply(i as f32 / 100.0))
            .fold(f32::MIN, f32::max);
        assert!(peak > 1.0);
    }

    #[test]
    fn test_mirrored_peaks_at_half() {
        let e = Easing::EaseInOut;
        assert!(e.apply_mirrored(0.0).abs() < 1e-6);
        assert!((e.apply_mirrored(0.5) - 1.0).abs() < 1e-6);
        assert!(e.apply_mirrored(1.0).abs() < 1e-6);
        assert!((e.apply_mirrored(0.25) - e.apply_mirrored(0.75)).abs() < 1e-6);
    }
}
