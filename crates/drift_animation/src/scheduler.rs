//! Frame scheduler
//!
//! Owns every active frame loop and steps them once per display frame. The
//! host drives it, either with an explicit `dt` ([`FrameScheduler::advance`])
//! or from the wall clock ([`FrameScheduler::tick`]).
//!
//! All loops stepped in one frame see the same [`FrameContext`], so the pointer
//! position cannot change half way through a frame. Unregistering a loop drops
//! it immediately; it is never stepped again.

use drift_core::Point;
use slotmap::{new_key_type, SlotMap};
use std::any::Any;
use std::time::Instant;
use tracing::{debug, trace};

new_key_type! {
    /// Handle to a registered frame loop
    pub struct LoopId;
}

/// Everything a loop may read during one frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameContext {
    /// Zero-based index of this frame
    pub frame_index: u64,
    /// Seconds since the previous frame
    pub dt: f32,
    /// Milliseconds since the scheduler started, including this frame
    pub now_ms: f64,
    /// Pointer snapshot taken once for the whole frame
    pub pointer: Option<Point>,
}

/// A per-frame animation loop.
///
/// `as_any` lets callers get their concrete loop back out of the scheduler.
pub trait FrameTask: Any {
    /// Advance by one frame
    fn step(&mut self, frame: &FrameContext);

    /// Whether the loop has nothing left to animate
    fn is_settled(&self) -> bool {
        false
    }

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// The scheduler that ticks all registered loops
pub struct FrameScheduler {
    loops: SlotMap<LoopId, Box<dyn FrameTask>>,
    frame_index: u64,
    elapsed_ms: f64,
    last_frame: Option<Instant>,
    target_fps: u32,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self {
            loops: SlotMap::with_key(),
            frame_index: 0,
            elapsed_ms: 0.0,
            last_frame: None,
            target_fps: 60,
        }
    }

    pub fn set_target_fps(&mut self, fps: u32) {
        self.target_fps = fps.max(1);
    }

    pub fn target_fps(&self) -> u32 {
        self.target_fps
    }

    /// Nominal frame duration in seconds for the target frame rate
    pub fn frame_duration(&self) -> f32 {
        1.0 / self.target_fps as f32
    }

    pub fn register<T: FrameTask>(&mut self, task: T) -> LoopId {
        let id = self.loops.insert(Box::new(task));
        debug!(?id, loops = self.loops.len(), "registered frame loop");
        id
    }

    /// Remove a loop. Returns false if it was already gone.
    pub fn unregister(&mut self, id: LoopId) -> bool {
        let removed = self.loops.remove(id).is_some();
        if removed {
            debug!(?id, loops = self.loops.len(), "unregistered frame loop");
        }
        removed
    }

    pub fn contains(&self, id: LoopId) -> bool {
        self.loops.contains_key(id)
    }

    /// Borrow a registered loop as its concrete type
    pub fn get<T: FrameTask>(&self, id: LoopId) -> Option<&T> {
        self.loops.get(id)?.as_any().downcast_ref::<T>()
    }

    /// Mutably borrow a registered loop as its concrete type
    pub fn get_mut<T: FrameTask>(&mut self, id: LoopId) -> Option<&mut T> {
        self.loops.get_mut(id)?.as_any_mut().downcast_mut::<T>()
    }

    /// Step every loop once with an explicit frame delta (seconds).
    ///
    /// Negative or NaN deltas are treated as zero.
    pub fn advance(&mut self, pointer: Option<Point>, dt: f32) -> FrameContext {
        let dt = dt.max(0.0);
        self.elapsed_ms += dt as f64 * 1000.0;

        let frame = FrameContext {
            frame_index: self.frame_index,
            dt,
            now_ms: self.elapsed_ms,
            pointer,
        };

        for (_, task) in self.loops.iter_mut() {
            task.step(&frame);
        }
        trace!(frame = frame.frame_index, loops = self.loops.len(), "frame stepped");

        self.frame_index += 1;
        frame
    }

    /// Step every loop using the wall-clock time since the previous tick.
    ///
    /// The first tick uses the nominal frame duration.
    pub fn tick(&mut self, pointer: Option<Point>) -> FrameContext {
        let now = Instant::now();
        let dt = match self.last_frame {
            Some(last) => (now - last).as_secs_f32(),
            None => self.frame_duration(),
        };
        self.last_frame = Some(now);
        self.advance(pointer, dt)
    }

    /// Check if any loop still has motion to produce
    pub fn has_active_loops(&self) -> bool {
        self.loops.iter().any(|(_, task)| !task.is_settled())
    }

    /// Get the number of registered loops
    pub fn loop_count(&self) -> usize {
        self.loops.len()
    }

    /// Number of frames stepped so far
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}
