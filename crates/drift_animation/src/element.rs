//! Moving elements

use drift_core::{Point, Vec2};
use serde::Serialize;

/// A visual element with an anchor, a position and a velocity.
///
/// Everything the update rule needs lives on the element itself, including
/// whether the pointer pushed it on the last frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MovingElement {
    /// Anchor the element drifts back to when undisturbed
    pub origin: Point,
    pub position: Point,
    pub velocity: Vec2,
    /// Phase offset of the idle jitter, in radians
    pub phase: f32,
    /// Whether the last update applied a repulsion impulse
    pub repelled: bool,
}

impl MovingElement {
    /// Create an element at rest on its origin
    pub fn new(origin: Point) -> Self {
        Self {
            origin,
            position: origin,
            velocity: Vec2::ZERO,
            phase: 0.0,
            repelled: false,
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_phase(mut self, phase: f32) -> Self {
        self.phase = phase;
        self
    }

    pub fn with_position(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    pub fn distance_from_origin(&self) -> f32 {
        self.origin.distance_to(self.position)
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }
}

/// Read-only view of one element, computed on demand
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ElementState {
    pub index: usize,
    pub position: Point,
    /// Displacement from the element's origin
    pub offset: Vec2,
    pub speed: f32,
    pub repelled: bool,
}

impl ElementState {
    pub fn of(index: usize, element: &MovingElement) -> Self {
        Self {
            index,
            position: element.position,
            offset: element.position - element.origin,
            speed: element.speed(),
            repelled: element.repelled,
        }
    }
}
