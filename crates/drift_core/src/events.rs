//! Pointer input
//!
//! The host delivers pointer samples asynchronously; the frame loop only ever
//! reads the most recent one. There is no queue and no back-pressure.

use crate::geometry::Point;
use tracing::trace;

/// A pointer event delivered by the host environment
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Move { x: f32, y: f32 },
    Down { x: f32, y: f32 },
    Up { x: f32, y: f32 },
    /// Pointer left the surface; no position is known until the next move
    Leave,
}

impl PointerEvent {
    /// Position carried by the event, if any
    pub fn position(&self) -> Option<Point> {
        match *self {
            PointerEvent::Move { x, y }
            | PointerEvent::Down { x, y }
            | PointerEvent::Up { x, y } => Some(Point::new(x, y)),
            PointerEvent::Leave => None,
        }
    }
}

/// Latest-value-wins pointer state.
///
/// Every positional event overwrites the previous sample. `sequence` counts
/// samples so callers can tell whether anything arrived between two frames.
#[derive(Clone, Copy, Debug, Default)]
pub struct PointerInput {
    latest: Option<Point>,
    pressed: bool,
    sequence: u64,
}

impl PointerInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold an event into the current state
    pub fn apply(&mut self, event: &PointerEvent) {
        match *event {
            PointerEvent::Move { .. } => {}
            PointerEvent::Down { .. } => self.pressed = true,
            PointerEvent::Up { .. } => self.pressed = false,
            PointerEvent::Leave => {
                trace!("pointer left surface");
                self.latest = None;
                self.pressed = false;
                self.sequence = self.sequence.wrapping_add(1);
                return;
            }
        }
        self.latest = event.position();
        self.sequence = self.sequence.wrapping_add(1);
    }

    /// Most recent pointer position, if the pointer is over the surface
    pub fn position(&self) -> Option<Point> {
        self.latest
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Number of samples folded in so far
    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}
