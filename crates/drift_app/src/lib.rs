//! Drift Application Shell
//!
//! Ties the motion loops to a sidebar-navigated set of pages. The shell owns
//! the frame scheduler and mounts each page's loops when the page is shown,
//! removing them again when the user navigates away.
//!
//! # Example
//!
//! ```rust
//! use drift_app::{DriftConfig, Page, Shell};
//! use drift_core::PointerEvent;
//!
//! let mut shell = Shell::new(DriftConfig::default()).unwrap();
//! shell.navigate(Page::Profile);
//! shell.handle_pointer(PointerEvent::Move { x: 830.0, y: 350.0 });
//!
//! for _ in 0..60 {
//!     shell.frame_nominal();
//! }
//!
//! // Cursor plus the profile page's field, bursts, presence and ring
//! assert_eq!(shell.active_loops(), 5);
//! assert!(shell.is_finite());
//! ```
//!
//! # Headless runs
//!
//! Scenarios are JSON lists of tagged steps executed against a fresh shell on
//! a fixed frame clock; see [`headless_runner::run_scenario`].

pub mod config;
pub mod error;
pub mod headless_assert;
pub mod headless_report;
pub mod headless_runner;
pub mod headless_runtime;
pub mod headless_scenario;
pub mod navigation;
pub mod scene;
pub mod shell;
pub mod telemetry;

pub use config::DriftConfig;
pub use error::{DriftError, Result};
pub use headless_report::{HeadlessReport, ReportStatus};
pub use headless_runner::{run_loaded_scenario, run_scenario, RunOutcome};
pub use headless_runtime::HeadlessRunConfig;
pub use headless_scenario::{HeadlessScenario, ScenarioStep};
pub use navigation::{Navigator, Page, Transition};
pub use scene::MountedScene;
pub use shell::{CursorSnapshot, Shell, ShellSnapshot};
