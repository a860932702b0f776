//! Drift Core
//!
//! Foundational types shared by the Drift motion crates:
//!
//! - **Geometry**: `Point`, `Vec2` and `Size` with the arithmetic the kinematics need
//! - **Pointer Input**: latest-value-wins pointer sampling for the frame loop
//!
//! # Example
//!
//! ```rust
//! use drift_core::{Point, PointerEvent, PointerInput};
//!
//! let mut input = PointerInput::new();
//! input.apply(&PointerEvent::Move { x: 10.0, y: 20.0 });
//! input.apply(&PointerEvent::Move { x: 30.0, y: 40.0 });
//!
//! // Only the most recent sample is ever observed
//! assert_eq!(input.position(), Some(Point::new(30.0, 40.0)));
//! ```

pub mod events;
pub mod geometry;

pub use events::{PointerEvent, PointerInput};
pub use geometry::{Point, Size, Vec2};
