//! Pointer-driven kinematics
//!
//! One update per frame, per element:
//!
//! 1. Inside the repulsion radius the element is pushed away from the pointer.
//!    The push falls off linearly and vanishes at the radius.
//! 2. Beyond the release radius a spring pulls it back toward its origin.
//!    The gap between the two radii keeps elements from flickering between
//!    pushed and pulled at the boundary.
//! 3. Idle elements (beyond the release radius) get a slow periodic jitter.
//! 4. Velocity is applied, then damped.
//!
//! With damping in (0, 1) and no pointer nearby every element comes to rest.
//! Elements never see each other.

use crate::element::MovingElement;
use drift_core::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Tuning for the element update rule. Distances are in surface pixels and
/// impulses in pixels per frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KinematicsConfig {
    /// Pointer distance below which elements are pushed away
    pub repulsion_radius: f32,
    /// Pointer distance above which elements return home and jitter
    pub release_radius: f32,
    /// Push at zero distance
    pub repulsion_strength: f32,
    /// Spring constant of the pull toward the origin
    pub return_stiffness: f32,
    /// Largest pull applied in a single frame
    pub max_return_impulse: f32,
    /// Scale of the idle jitter; zero disables it
    pub jitter_amplitude: f32,
    /// Per-frame velocity multiplier
    pub damping: f32,
}

impl Default for KinematicsConfig {
    fn default() -> Self {
        Self {
            repulsion_radius: 150.0,
            release_radius: 200.0,
            repulsion_strength: 0.08,
            return_stiffness: 0.002,
            max_return_impulse: 0.5,
            jitter_amplitude: 0.01,
            damping: 0.95,
        }
    }
}

impl KinematicsConfig {
    /// Same tuning without idle jitter
    pub fn without_jitter(mut self) -> Self {
        self.jitter_amplitude = 0.0;
        self
    }
}

/// Idle jitter impulse at ambient time `time` (seconds) for an element with
/// the given phase offset
pub fn jitter(time: f32, phase: f32, amplitude: f32) -> Vec2 {
    let t = time + phase;
    Vec2::new((t * 0.5).sin() * 2.0, (t * 0.3).cos() * 1.5) * amplitude
}

/// Compute the next state of one element.
///
/// `pointer` is `None` when the pointer is off the surface, which counts as
/// being beyond the release radius. `time` is the ambient clock in seconds.
pub fn step_element(
    element: &MovingElement,
    pointer: Option<Point>,
    time: f32,
    config: &KinematicsConfig,
) -> MovingElement {
    let mut next = *element;

    let (distance, away) = match pointer {
        Some(pointer) => {
            let to_pointer = pointer - next.position;
            // Zero distance normalizes to a zero direction: no push, no NaN
            (to_pointer.length(), -to_pointer.normalize())
        }
        None => (f32::INFINITY, Vec2::ZERO),
    };

    next.repelled = distance < config.repulsion_radius;
    if next.repelled {
        let falloff = (config.repulsion_radius - distance) / config.repulsion_radius;
        next.velocity += away * (config.repulsion_strength * falloff);
    }

    if distance > config.release_radius {
        let pull = (next.origin - next.position) * config.return_stiffness;
        next.velocity += pull.clamp_length(config.max_return_impulse);

        if config.jitter_amplitude > 0.0 {
            next.velocity += jitter(time, next.phase, config.jitter_amplitude);
        }
    }

    next.position += next.velocity;
    next.velocity *= config.damping;
    next
}

/// Advance a whole set of elements by one frame against a single pointer
/// snapshot.
pub fn advance(
    elements: &[MovingElement],
    pointer: Option<Point>,
    time: f32,
    config: &KinematicsConfig,
) -> Vec<MovingElement> {
    elements
        .iter()
        .map(|element| step_element(element, pointer, time, config))
        .collect()
}
