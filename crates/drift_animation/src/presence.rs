//! Breathing and gaze for the profile face

use crate::scheduler::{FrameContext, FrameTask};
use drift_core::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::any::Any;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresenceConfig {
    /// Phase advance per frame, radians
    pub breath_step: f32,
    /// Peak relative scale change of a breath
    pub breath_depth: f32,
    /// Face offset per pixel of pointer offset
    pub face_follow: f32,
    /// Largest face offset per axis
    pub face_limit: f32,
    /// Eye offset per pixel of pointer offset
    pub eye_follow: f32,
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self {
            breath_step: 0.02,
            breath_depth: 0.02,
            face_follow: 0.03,
            face_limit: 15.0,
            eye_follow: 0.02,
        }
    }
}

/// Where the face and eyes lean for a given pointer
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Gaze {
    pub face_offset: Vec2,
    pub eye_offset: Vec2,
}

impl Gaze {
    pub fn toward(pointer: Point, center: Point, config: &PresenceConfig) -> Self {
        let delta = pointer - center;
        Self {
            face_offset: (delta * config.face_follow).clamp_components(config.face_limit),
            eye_offset: delta * config.eye_follow,
        }
    }
}

/// Breathing phase plus the latest gaze
#[derive(Clone, Debug)]
pub struct Presence {
    config: PresenceConfig,
    center: Point,
    phase: f32,
    gaze: Gaze,
}

impl Presence {
    pub fn new(config: PresenceConfig, center: Point) -> Self {
        Self {
            config,
            center,
            phase: 0.0,
            gaze: Gaze::default(),
        }
    }

    pub fn advance(&mut self, pointer: Option<Point>) {
        self.phase += self.config.breath_step;
        // Keep looking at the last known spot when the pointer leaves
        if let Some(pointer) = pointer {
            self.gaze = Gaze::toward(pointer, self.center, &self.config);
        }
    }

    pub fn breathing_scale(&self) -> f32 {
        1.0 + self.phase.sin() * self.config.breath_depth
    }

    pub fn gaze(&self) -> Gaze {
        self.gaze
    }

    pub fn center(&self) -> Point {
        self.center
    }
}

impl FrameTask for Presence {
    fn step(&mut self, frame: &FrameContext) {
        self.advance(frame.pointer);
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

    #[test]
    fn test_face_offset_is_clamped() {
        let config = PresenceConfig::default();
        let gaze = Gaze::toward(Point::new(2000.0, 350.0), Point::new(830.0, 350.0), &config);
        assert_eq!(gaze.face_offset, Vec2::new(15.0, 0.0));
        assert!((gaze.eye_offset.x - 23.4).abs() < 1e-3);
    }

    #[test]
    fn test_small_offsets_track_linearly() {
        let config = PresenceConfig::default();
        let gaze = Gaze::toward(Point::new(800.0, 450.0), Point::new(830.0, 350.0), &config);
        assert!((gaze.face_offset.x - -0.9).abs() < 1e-4);
        assert!((gaze.face_offset.y - 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_breathing_oscillates_within_depth() {
        let mut presence = Presence::new(PresenceConfig::default(), Point::ZERO);
        assert_eq!(presence.breathing_scale(), 1.0);

        let mut lo = f32::MAX;
        let mut hi = f32::MIN;
        for _ in 0..400 {
            presence.advance(None);
            lo = lo.min(presence.breathing_scale());
            hi = hi.max(presence.breathing_scale());
        }
        assert!(hi > 1.019 && hi <= 1.02 + 1e-6);
        assert!(lo < 0.981 && lo >= 0.98 - 1e-6);
    }

    #[test]
    fn test_gaze_holds_when_pointer_leaves() {
        let mut presence = Presence::new(PresenceConfig::default(), Point::ZERO);
        presence.advance(Some(Point::new(100.0, 0.0)));
        let held = presence.gaze();
        presence.advance(None);
        assert_eq!(presence.gaze(), held);
    }
}
