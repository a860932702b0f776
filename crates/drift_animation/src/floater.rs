//! Looping decorative floaters
//!
//! Stars and dots that bob, pulse and spin forever on their own period. They
//! ignore the pointer; only the clock moves them.

use crate::easing::Easing;
use crate::scheduler::{FrameContext, FrameTask};
use drift_core::{Point, Size, Vec2};
use rand::Rng;
use serde::Serialize;
use std::any::Any;
use std::f32::consts::PI;

/// One looping decoration
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Floater {
    pub anchor: Point,
    /// Seconds per loop
    pub period: f32,
    /// Seconds before the first loop starts
    pub delay: f32,
    /// Peak upward travel in pixels
    pub bob: f32,
    /// Opacity at rest and at the peak of the loop
    pub opacity: (f32, f32),
    /// Full turn per loop
    pub spin: bool,
}

/// Where a floater is drawn at some instant
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FloaterPose {
    pub position: Point,
    pub opacity: f32,
    /// Degrees
    pub rotation: f32,
}

impl Floater {
    pub fn pose(&self, elapsed: f32) -> FloaterPose {
        let local = elapsed - self.delay;
        if local < 0.0 || self.period <= 0.0 {
            return FloaterPose {
                position: self.anchor,
                opacity: self.opacity.0,
                rotation: 0.0,
            };
        }

        let progress = (local % self.period) / self.period;
        let swell = Easing::EaseInOut.apply_mirrored(progress);
        let (lo, hi) = self.opacity;

        FloaterPose {
            position: self.anchor + Vec2::new(0.0, -self.bob * swell),
            opacity: lo + (hi - lo) * swell,
            rotation: if self.spin { 360.0 * progress } else { 0.0 },
        }
    }
}

/// A page's worth of floaters sharing one clock
#[derive(Clone, Debug, Default)]
pub struct FloaterField {
    floaters: Vec<Floater>,
    elapsed: f32,
}

impl FloaterField {
    pub fn new(floaters: Vec<Floater>) -> Self {
        Self {
            floaters,
            elapsed: 0.0,
        }
    }

    /// Concatenate two fields, keeping this field's clock
    pub fn merged(mut self, other: FloaterField) -> Self {
        self.floaters.extend(other.floaters);
        self
    }

    /// Twinkling background stars spread over the whole viewport
    pub fn twinkles<R: Rng>(rng: &mut R, viewport: Size, count: usize) -> Self {
        let floaters = (0..count)
            .map(|_| Floater {
                anchor: random_point(rng, viewport, 0.0, 1.0),
                period: rng.gen_range(2.0..5.0),
                delay: rng.gen_range(0.0..2.0),
                bob: 0.0,
                opacity: (0.0, 1.0),
                spin: false,
            })
            .collect();
        Self::new(floaters)
    }

    /// Soft dots drifting up and down across the viewport
    pub fn drifters<R: Rng>(rng: &mut R, viewport: Size, count: usize) -> Self {
        let floaters = (0..count)
            .map(|_| Floater {
                anchor: random_point(rng, viewport, 0.0, 1.0),
                period: rng.gen_range(4.0..6.0),
                delay: rng.gen_range(0.0..3.0),
                bob: 20.0,
                opacity: (0.2, 0.8),
                spin: false,
            })
            .collect();
        Self::new(floaters)
    }

    /// Spinning bubbles kept to the middle of the viewport
    pub fn bubbles<R: Rng>(rng: &mut R, viewport: Size, count: usize) -> Self {
        let floaters = (0..count)
            .map(|_| Floater {
                anchor: random_point(rng, viewport, 0.2, 0.8),
                period: rng.gen_range(3.0..5.0),
                delay: rng.gen_range(0.0..2.0),
                bob: 20.0,
                opacity: (0.3, 0.3),
                spin: true,
            })
            .collect();
        Self::new(floaters)
    }

    /// Evenly spaced dots on a circle, staggered by half a second
    pub fn ring(center: Point, radius: f32, count: usize) -> Self {
        let step = 2.0 * PI / count.max(1) as f32;
        let floaters = (0..count)
            .map(|i| Floater {
                anchor: center + Vec2::from_angle(i as f32 * step) * radius,
                period: 3.0,
                delay: i as f32 * 0.5,
                bob: 10.0,
                opacity: (0.3, 0.8),
                spin: false,
            })
            .collect();
        Self::new(floaters)
    }

    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt.max(0.0);
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn floaters(&self) -> &[Floater] {
        &self.floaters
    }

    pub fn len(&self) -> usize {
        self.floaters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.floaters.is_empty()
    }

    /// Poses at the current time, computed on each call
    pub fn poses(&self) -> impl Iterator<Item = FloaterPose> + '_ {
        self.floaters.iter().map(move |f| f.pose(self.elapsed))
    }
}

impl FrameTask for FloaterField {
    fn step(&mut self, frame: &FrameContext) {
        self.advance(frame.dt);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

fn random_point<R: Rng>(rng: &mut R, viewport: Size, lo: f32, hi: f32) -> Point {
    Point::new(
        viewport.width * rng.gen_range(lo..hi),
        viewport.height * rng.gen_range(lo..hi),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn star() -> Floater {
        Floater {
            anchor: Point::new(10.0, 10.0),
            period: 2.0,
            delay: 1.0,
            bob: 20.0,
            opacity: (0.2, 0.8),
            spin: true,
        }
    }

    #[test]
    fn test_rests_before_delay() {
        let pose = star().pose(0.5);
        assert_eq!(pose.position, Point::new(10.0, 10.0));
        assert_eq!(pose.opacity, 0.2);
        assert_eq!(pose.rotation, 0.0);
    }

    #[test]
    fn test_peaks_mid_loop() {
        let pose = star().pose(2.0);
        assert!((pose.position.y - -10.0).abs() < 1e-4);
        assert!((pose.opacity - 0.8).abs() < 1e-5);
        assert!((pose.rotation - 180.0).abs() < 1e-3);
    }

    #[test]
    fn test_loops_with_period() {
        let a = star().pose(1.3);
        let b = star().pose(3.3);
        assert!((a.position.y - b.position.y).abs() < 1e-3);
        assert!((a.opacity - b.opacity).abs() < 1e-4);
    }

    #[test]
    fn test_presets_respect_counts_and_bounds() {
        let mut rng = StdRng::seed_from_u64(5);
        let viewport = Size::new(1000.0, 500.0);

        let twinkles = FloaterField::twinkles(&mut rng, viewport, 100);
        assert_eq!(twinkles.len(), 100);
        assert!(twinkles
            .floaters()
            .iter()
            .all(|f| (2.0..5.0).contains(&f.period) && f.bob == 0.0));

        let bubbles = FloaterField::bubbles(&mut rng, viewport, 8);
        assert!(bubbles.floaters().iter().all(|f| {
            f.spin
                && (200.0..800.0).contains(&f.anchor.x)
                && (100.0..400.0).contains(&f.anchor.y)
        }));

        let merged = twinkles.merged(FloaterField::drifters(&mut rng, viewport, 20));
        assert_eq!(merged.len(), 120);
    }

    #[test]
    fn test_ring_is_staggered() {
        let ring = FloaterField::ring(Point::new(0.0, 0.0), 300.0, 6);
        assert_eq!(ring.len(), 6);
        for (i, f) in ring.floaters().iter().enumerate() {
            assert!((f.anchor.distance_to(Point::ZERO) - 300.0).abs() < 1e-3);
            assert_eq!(f.delay, i as f32 * 0.5);
        }
    }

    #[test]
    fn test_poses_follow_clock() {
        let mut field = FloaterField::new(vec![star()]);
        let rest: Vec<_> = field.poses().collect();
        field.advance(2.0);
        let peak: Vec<_> = field.poses().collect();
        assert_ne!(rest, peak);
        assert_eq!(field.elapsed(), 2.0);
    }
}
