//! Drift Animation System
//!
//! Decorative motion for pages, stepped once per display frame.
//!
//! # Features
//!
//! - **Kinematics**: pointer repulsion, origin return, idle jitter and damping
//! - **Cursor**: smoothed cursor with cooldown-gated kicks and orbiting sparks
//! - **Bursts**: click particles with gravity and fade
//! - **Floaters**: looping bob/pulse/spin decorations
//! - **Scheduler**: host-driven frame loop with register/unregister per page
//!
//! # Example
//!
//! ```rust
//! use drift_animation::{FrameScheduler, KinematicsConfig, MovingElement, ParticleField};
//! use drift_core::Point;
//!
//! let mut scheduler = FrameScheduler::new();
//! let field = ParticleField::new(
//!     vec![MovingElement::new(Point::new(100.0, 100.0))],
//!     KinematicsConfig::default(),
//! );
//! let id = scheduler.register(field);
//!
//! // Pointer sitting exactly on the element: no push, no NaN
//! scheduler.advance(Some(Point::new(100.0, 100.0)), 1.0 / 60.0);
//!
//! let field = scheduler.get::<ParticleField>(id).unwrap();
//! assert!(field.is_finite());
//!
//! // Unmount: the loop is gone for good
//! scheduler.unregister(id);
//! assert_eq!(scheduler.loop_count(), 0);
//! ```

pub mod burst;
pub mod cursor;
pub mod easing;
pub mod element;
pub mod field;
pub mod floater;
pub mod kinematics;
pub mod layout;
pub mod presence;
pub mod scheduler;

pub use burst::{BurstConfig, BurstEmitter, BurstParticle};
pub use cursor::{CursorConfig, CursorMotion, CursorTracker, OrbitSpark};
pub use easing::Easing;
pub use element::{ElementState, MovingElement};
pub use field::ParticleField;
pub use floater::{Floater, FloaterField, FloaterPose};
pub use kinematics::{advance, step_element, KinematicsConfig};
pub use layout::{ArcLayout, Side};
pub use presence::{Gaze, Presence, PresenceConfig};
pub use scheduler::{FrameContext, FrameScheduler, FrameTask, LoopId};
