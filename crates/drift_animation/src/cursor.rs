//! Cursor tracking
//!
//! A single point trails the raw pointer with exponential smoothing. When the
//! cursor is "angry" and strays within the trigger radius of the repulsion
//! center it is kicked away in one jump, then stays put until the cooldown
//! runs out. A ring of sparks orbits the tracked point.

use crate::easing::Easing;
use crate::scheduler::{FrameContext, FrameTask};
use drift_core::{Point, Vec2};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::any::Any;
use std::f32::consts::TAU;
use tracing::debug;

/// Cursor tuning
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorConfig {
    /// Fraction of the remaining distance covered each frame, in (0, 1]
    pub smoothing: f32,
    /// Distance from the repulsion center that arms a kick
    pub trigger_radius: f32,
    /// Length of the kick displacement
    pub kick_strength: f32,
    /// Minimum time between kicks; the cursor is frozen meanwhile
    pub cooldown_ms: f64,
    pub spark_count: usize,
    /// Orbit clock advance per frame
    pub orbit_step: f32,
    /// Duration of the core scale tween
    pub scale_duration_ms: f64,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            smoothing: 0.2,
            trigger_radius: 120.0,
            kick_strength: 150.0,
            cooldown_ms: 1200.0,
            spark_count: 6,
            orbit_step: 0.016,
            scale_duration_ms: 300.0,
        }
    }
}

/// What a cursor update did
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorMotion {
    /// Moved toward the pointer
    Followed,
    /// Jumped away from the repulsion center
    Kicked,
    /// Held in place by the kick cooldown
    Cooling,
    /// No pointer to follow
    Idle,
}

/// A spark circling the cursor
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct OrbitSpark {
    pub base_angle: f32,
    pub radius: f32,
    pub size: f32,
    /// Radians per unit of orbit time
    pub speed: f32,
}

impl OrbitSpark {
    /// Spark `index` of a ring of `count`
    pub fn nth(index: usize, count: usize) -> Self {
        Self {
            base_angle: index as f32 / count.max(1) as f32 * TAU,
            radius: 18.0 + (index % 2) as f32 * 6.0,
            size: 2.5 + (index % 3) as f32 * 0.8,
            speed: 0.9 + index as f32 * 0.15,
        }
    }

    /// Position around `center` at orbit time `time`
    pub fn position(&self, center: Point, time: f32) -> Point {
        center + Vec2::from_angle(self.base_angle + time * self.speed) * self.radius
    }
}

/// A tween between two scalar values
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleTween {
    from: f32,
    to: f32,
    started_ms: f64,
    duration_ms: f64,
    easing: Easing,
}

impl ScaleTween {
    pub fn settled(value: f32, duration_ms: f64, easing: Easing) -> Self {
        Self {
            from: value,
            to: value,
            started_ms: 0.0,
            duration_ms,
            easing,
        }
    }

    pub fn value(&self, now_ms: f64) -> f32 {
        if self.duration_ms <= 0.0 {
            return self.to;
        }
        let t = ((now_ms - self.started_ms) / self.duration_ms).clamp(0.0, 1.0) as f32;
        self.from + (self.to - self.from) * self.easing.apply(t)
    }

    /// Start heading for `to` from wherever the tween is now
    pub fn retarget(&mut self, to: f32, now_ms: f64) {
        if (to - self.to).abs() < f32::EPSILON {
            return;
        }
        self.from = self.value(now_ms);
        self.to = to;
        self.started_ms = now_ms;
    }
}

/// The smoothed cursor with its kick state and orbiting sparks
#[derive(Clone, Debug)]
pub struct CursorTracker {
    config: CursorConfig,
    position: Point,
    repel_center: Point,
    angry: bool,
    last_kick_ms: Option<f64>,
    kicks: u64,
    orbit_time: f32,
    now_ms: f64,
    last_motion: CursorMotion,
    sparks: SmallVec<[OrbitSpark; 8]>,
    scale: ScaleTween,
}

impl CursorTracker {
    /// Create a cursor resting at `start`
    pub fn new(config: CursorConfig, start: Point, repel_center: Point) -> Self {
        let sparks = (0..config.spark_count)
            .map(|i| OrbitSpark::nth(i, config.spark_count))
            .collect();
        Self {
            config,
            position: start,
            repel_center,
            angry: false,
            last_kick_ms: None,
            kicks: 0,
            orbit_time: 0.0,
            now_ms: 0.0,
            last_motion: CursorMotion::Idle,
            sparks,
            scale: ScaleTween::settled(1.0, config.scale_duration_ms, Easing::BACK_OUT),
        }
    }

    pub fn set_angry(&mut self, angry: bool) {
        self.angry = angry;
    }

    pub fn is_angry(&self) -> bool {
        self.angry
    }

    /// Snap the cursor somewhere without animating
    pub fn warp_to(&mut self, position: Point) {
        self.position = position;
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Kicks performed so far
    pub fn kicks(&self) -> u64 {
        self.kicks
    }

    pub fn last_motion(&self) -> CursorMotion {
        self.last_motion
    }

    /// Whether a kick happened less than one cooldown ago
    pub fn is_cooling(&self, now_ms: f64) -> bool {
        self.last_kick_ms
            .is_some_and(|kicked| now_ms - kicked < self.config.cooldown_ms)
    }

    /// Advance the cursor to time `now_ms` with the latest pointer sample
    pub fn update(&mut self, pointer: Option<Point>, now_ms: f64) -> CursorMotion {
        self.now_ms = now_ms;

        let motion = if self.is_cooling(now_ms) {
            CursorMotion::Cooling
        } else if self.angry
            && self.position.distance_to(self.repel_center) < self.config.trigger_radius
        {
            let away = (self.position - self.repel_center).normalize();
            self.position += away * self.config.kick_strength;
            self.last_kick_ms = Some(now_ms);
            self.kicks += 1;
            debug!(kicks = self.kicks, x = self.position.x, y = self.position.y, "cursor kicked");
            CursorMotion::Kicked
        } else if let Some(pointer) = pointer {
            self.position += (pointer - self.position) * self.config.smoothing;
            CursorMotion::Followed
        } else {
            CursorMotion::Idle
        };

        let target_scale = match (self.is_cooling(now_ms), self.angry) {
            (true, true) => 2.0,
            (true, false) => 1.5,
            (false, _) => 1.0,
        };
        self.scale.retarget(target_scale, now_ms);

        self.last_motion = motion;
        motion
    }

    /// Advance the spark orbit by one frame
    pub fn advance_orbit(&mut self) {
        self.orbit_time += self.config.orbit_step;
    }

    pub fn orbit_time(&self) -> f32 {
        self.orbit_time
    }

    pub fn sparks(&self) -> &[OrbitSpark] {
        &self.sparks
    }

    /// Where each spark currently is
    pub fn spark_positions(&self) -> impl Iterator<Item = Point> + '_ {
        self.sparks
            .iter()
            .map(move |spark| spark.position(self.position, self.orbit_time))
    }

    /// Current scale of the cursor core
    pub fn core_scale(&self) -> f32 {
        self.scale.value(self.now_ms)
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite()
    }
}

impl FrameTask for CursorTracker {
    fn step(&mut self, frame: &FrameContext) {
        self.update(frame.pointer, frame.now_ms);
        self.advance_orbit();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn angry_cursor(at: Point) -> CursorTracker {
        let mut cursor = CursorTracker::new(CursorConfig::default(), at, Point::new(100.0, 100.0));
        cursor.set_angry(true);
        cursor
    }

    #[test]
    fn test_follows_pointer_with_smoothing() {
        let mut cursor =
            CursorTracker::new(CursorConfig::default(), Point::ZERO, Point::new(-500.0, -500.0));

        let motion = cursor.update(Some(Point::new(100.0, 50.0)), 0.0);
        assert_eq!(motion, CursorMotion::Followed);
        assert!((cursor.position().x - 20.0).abs() < 1e-4);
        assert!((cursor.position().y - 10.0).abs() < 1e-4);

        for i in 1..200 {
            cursor.update(Some(Point::new(100.0, 50.0)), i as f64 * 16.0);
        }
        assert!(cursor.position().distance_to(Point::new(100.0, 50.0)) < 1e-3);
    }

    #[test]
    fn test_calm_cursor_never_kicks() {
        let mut cursor = CursorTracker::new(
            CursorConfig::default(),
            Point::new(100.0, 100.0),
            Point::new(100.0, 100.0),
        );
        let motion = cursor.update(Some(Point::new(110.0, 100.0)), 0.0);
        assert_eq!(motion, CursorMotion::Followed);
        assert_eq!(cursor.kicks(), 0);
    }

    #[test]
    fn test_one_kick_per_cooldown_window() {
        let mut cursor = angry_cursor(Point::new(110.0, 100.0));
        let pointer = Some(Point::new(110.0, 100.0));

        // t = 0: inside the trigger radius, kicked 150px away from the center
        assert_eq!(cursor.update(pointer, 0.0), CursorMotion::Kicked);
        assert!((cursor.position().x - 260.0).abs() < 1e-3);
        assert!((cursor.position().y - 100.0).abs() < 1e-3);

        // t = 500: trigger condition holds again but the cooldown blocks it
        cursor.warp_to(Point::new(110.0, 100.0));
        assert_eq!(cursor.update(pointer, 500.0), CursorMotion::Cooling);
        assert_eq!(cursor.position(), Point::new(110.0, 100.0));
        assert_eq!(cursor.kicks(), 1);

        // After the window a new kick is allowed
        assert_eq!(cursor.update(pointer, 1300.0), CursorMotion::Kicked);
        assert_eq!(cursor.kicks(), 2);
    }

    #[test]
    fn test_cooling_cursor_ignores_pointer() {
        let mut cursor = angry_cursor(Point::new(110.0, 100.0));
        cursor.update(None, 0.0);
        let kicked_to = cursor.position();

        cursor.set_angry(false);
        let motion = cursor.update(Some(Point::new(0.0, 0.0)), 600.0);
        assert_eq!(motion, CursorMotion::Cooling);
        assert_eq!(cursor.position(), kicked_to);
    }

    #[test]
    fn test_kick_from_center_stays_finite() {
        let mut cursor = angry_cursor(Point::new(100.0, 100.0));
        cursor.update(Some(Point::new(100.0, 100.0)), 0.0);
        assert!(cursor.is_finite());
        assert_eq!(cursor.kicks(), 1);
    }

    #[test]
    fn test_outside_trigger_radius_follows() {
        let mut cursor = angry_cursor(Point::new(400.0, 100.0));
        let motion = cursor.update(Some(Point::new(400.0, 200.0)), 0.0);
        assert_eq!(motion, CursorMotion::Followed);
        assert_eq!(cursor.kicks(), 0);
    }

    #[test]
    fn test_core_scale_grows_while_cooling() {
        let mut cursor = angry_cursor(Point::new(110.0, 100.0));
        assert_eq!(cursor.core_scale(), 1.0);

        cursor.update(None, 0.0);
        cursor.update(None, 300.0);
        assert!((cursor.core_scale() - 2.0).abs() < 1e-4);

        // Cooldown over: back to rest size
        cursor.set_angry(false);
        cursor.warp_to(Point::new(900.0, 900.0));
        cursor.update(None, 1300.0);
        cursor.update(None, 1700.0);
        assert!((cursor.core_scale() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_sparks_orbit_at_their_radius() {
        let mut cursor =
            CursorTracker::new(CursorConfig::default(), Point::new(50.0, 50.0), Point::ZERO);
        assert_eq!(cursor.sparks().len(), 6);

        for _ in 0..10 {
            cursor.advance_orbit();
        }
        for (spark, position) in cursor.sparks().iter().zip(cursor.spark_positions()) {
            let r = position.distance_to(cursor.position());
            assert!((r - spark.radius).abs() < 1e-3);
        }
        assert!((cursor.orbit_time() - 0.16).abs() < 1e-5);
    }
}
