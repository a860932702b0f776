//! A page-owned set of moving elements

use crate::element::{ElementState, MovingElement};
use crate::kinematics::{self, KinematicsConfig};
use crate::scheduler::{FrameContext, FrameTask};
use drift_core::Point;
use std::any::Any;

/// Elements pushed around by the pointer and pulled back to their anchors.
///
/// The field keeps its own ambient clock for the idle jitter. Element states
/// are derived on demand from the current elements rather than stored.
#[derive(Clone, Debug)]
pub struct ParticleField {
    elements: Vec<MovingElement>,
    config: KinematicsConfig,
    clock: f32,
    frames: u64,
}

impl ParticleField {
    pub fn new(elements: Vec<MovingElement>, config: KinematicsConfig) -> Self {
        Self {
            elements,
            config,
            clock: 0.0,
            frames: 0,
        }
    }

    /// Advance every element by one frame.
    ///
    /// `dt` (seconds) only moves the jitter clock; forces are applied once
    /// per call.
    pub fn advance(&mut self, pointer: Option<Point>, dt: f32) {
        self.clock += dt.max(0.0);
        self.elements = kinematics::advance(&self.elements, pointer, self.clock, &self.config);
        self.frames += 1;
    }

    pub fn elements(&self) -> &[MovingElement] {
        &self.elements
    }

    /// Element `index`. Panics if out of range.
    pub fn element(&self, index: usize) -> &MovingElement {
        &self.elements[index]
    }

    /// Current state of every element, recomputed on each call
    pub fn states(&self) -> impl Iterator<Item = ElementState> + '_ {
        self.elements
            .iter()
            .enumerate()
            .map(|(i, element)| ElementState::of(i, element))
    }

    pub fn config(&self) -> &KinematicsConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Number of frames advanced
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Every element within `epsilon` of its origin
    pub fn is_at_rest(&self, epsilon: f32) -> bool {
        self.elements
            .iter()
            .all(|e| e.distance_from_origin() <= epsilon)
    }

    pub fn is_finite(&self) -> bool {
        self.elements.iter().all(MovingElement::is_finite)
    }

    /// Largest displacement from origin across the field
    pub fn max_offset(&self) -> f32 {
        self.elements
            .iter()
            .map(MovingElement::distance_from_origin)
            .fold(0.0, f32::max)
    }
}

impl FrameTask for ParticleField {
    fn step(&mut self, frame: &FrameContext) {
        self.advance(frame.pointer, frame.dt);
    }

    fn is_settled(&self) -> bool {
        self.config.jitter_amplitude == 0.0
            && self
                .elements
                .iter()
                .all(|e| e.speed() < 1e-3 && e.distance_from_origin() < 0.01)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
