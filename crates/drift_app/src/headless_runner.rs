//! Scenario runner that drives a shell through headless steps.

use crate::config::DriftConfig;
use crate::headless_assert::{
    evaluate_assert_finite, evaluate_assert_kicks, evaluate_assert_loops, evaluate_assert_page,
    evaluate_assert_settled, evaluate_assert_sidebar, AssertionResult,
};
use crate::headless_report::{HeadlessReport, RunProgress};
use crate::headless_runtime::{HeadlessContext, HeadlessRunConfig, HeadlessRuntime};
use crate::headless_scenario::{HeadlessScenario, ScenarioStep};
use crate::shell::Shell;
use anyhow::Result;
use drift_core::PointerEvent;
use tracing::{debug, warn};

/// Final outcome of a scenario run.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    Passed { report: HeadlessReport },
    Failed { report: HeadlessReport },
}

impl RunOutcome {
    pub fn report(&self) -> &HeadlessReport {
        match self {
            RunOutcome::Passed { report } => report,
            RunOutcome::Failed { report } => report,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RunOutcome::Failed { .. })
    }
}

/// Execute scenario JSON against a fresh shell built from `config`.
pub fn run_scenario(
    input: &str,
    config: DriftConfig,
    runtime_cfg: HeadlessRunConfig,
) -> Result<RunOutcome> {
    let scenario = HeadlessScenario::from_json(input)?;
    let mut shell = Shell::new(config)?;
    run_loaded_scenario(&scenario, &mut shell, runtime_cfg)
}

/// Execute a pre-loaded scenario against an existing shell.
pub fn run_loaded_scenario(
    scenario: &HeadlessScenario,
    shell: &mut Shell,
    runtime_cfg: HeadlessRunConfig,
) -> Result<RunOutcome> {
    let mut clock = Clock::default();

    for (step_index, step) in scenario.steps.iter().enumerate() {
        debug!(step_index, ?step, "scenario step");
        let (name, result) = match *step {
            ScenarioStep::Pointer { x, y } => {
                shell.handle_pointer(PointerEvent::Move { x, y });
                continue;
            }
            ScenarioStep::Leave => {
                shell.handle_pointer(PointerEvent::Leave);
                continue;
            }
            ScenarioStep::Click { x, y } => {
                shell.handle_pointer(PointerEvent::Down { x, y });
                shell.handle_pointer(PointerEvent::Up { x, y });
                continue;
            }
            ScenarioStep::Navigate { page } => {
                shell.navigate(page);
                continue;
            }
            ScenarioStep::ToggleSidebar => {
                shell.toggle_sidebar();
                continue;
            }
            ScenarioStep::SetAngry { angry } => {
                shell.set_angry(angry);
                continue;
            }
            ScenarioStep::Wait { ms } => {
                if ms > 0 {
                    let start = clock;
                    HeadlessRuntime::run_for(runtime_cfg, ms, |ctx| {
                        clock = step_frame(shell, start, ctx);
                    })?;
                }
                continue;
            }
            ScenarioStep::Tick { frames } => {
                if frames > 0 {
                    let start = clock;
                    let cfg = HeadlessRunConfig {
                        max_frames: frames,
                        ..runtime_cfg
                    };
                    HeadlessRuntime::run(cfg, |ctx| {
                        clock = step_frame(shell, start, ctx);
                    })?;
                }
                continue;
            }
            ScenarioStep::AssertPage { page } => ("assert_page", evaluate_assert_page(page, shell)),
            ScenarioStep::AssertLoops { count } => {
                ("assert_loops", evaluate_assert_loops(count, shell))
            }
            ScenarioStep::AssertFinite => ("assert_finite", evaluate_assert_finite(shell)),
            ScenarioStep::AssertSettled { epsilon } => {
                ("assert_settled", evaluate_assert_settled(epsilon, shell))
            }
            ScenarioStep::AssertKicks { count } => {
                ("assert_kicks", evaluate_assert_kicks(count, shell))
            }
            ScenarioStep::AssertSidebar { open } => {
                ("assert_sidebar", evaluate_assert_sidebar(open, shell))
            }
        };

        if let AssertionResult::Failed { code, message } = result {
            warn!(step_index, assertion = name, %message, "scenario assertion failed");
            let report = HeadlessReport::failed(
                name,
                step_index,
                code,
                message,
                clock.progress(shell),
            );
            return Ok(RunOutcome::Failed { report });
        }
    }

    Ok(RunOutcome::Passed {
        report: HeadlessReport::passed(clock.progress(shell)),
    })
}

/// Logical time consumed by the scenario so far
#[derive(Debug, Clone, Copy, Default)]
struct Clock {
    frames: u64,
    ms: u64,
}

impl Clock {
    fn progress(&self, shell: &Shell) -> RunProgress {
        RunProgress {
            elapsed_frames: self.frames,
            elapsed_ms: self.ms,
            page: shell.current_page(),
        }
    }
}

/// Advance the shell by one runtime frame and return the clock after it
fn step_frame(shell: &mut Shell, start: Clock, ctx: &HeadlessContext) -> Clock {
    shell.frame(ctx.delta_ms as f32 / 1000.0);
    Clock {
        frames: start.frames.saturating_add(u64::from(ctx.frame_index) + 1),
        ms: start.ms.saturating_add(ctx.end_ms()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless_report::ReportStatus;
    use crate::navigation::Page;

    fn run(input: &str) -> RunOutcome {
        run_scenario(input, DriftConfig::default(), HeadlessRunConfig::default()).unwrap()
    }

    #[test]
    fn test_navigation_scenario_passes() {
        let outcome = run(
            r#"{"steps": [
                {"type": "assert_page", "page": "home"},
                {"type": "assert_loops", "count": 1},
                {"type": "navigate", "page": "profile"},
                {"type": "assert_loops", "count": 5},
                {"type": "tick", "frames": 10},
                {"type": "navigate", "page": "contacts"},
                {"type": "assert_loops", "count": 2},
                {"type": "wait", "ms": 40},
                {"type": "assert_finite"}
            ]}"#,
        );

        assert!(!outcome.is_failed());
        let report = outcome.report();
        assert_eq!(report.status, ReportStatus::Passed);
        assert_eq!(report.elapsed_frames, 13);
        assert_eq!(report.elapsed_ms, 200);
        assert_eq!(report.page, Page::Contacts);
    }

    #[test]
    fn test_failed_assertion_reports_step() {
        let outcome = run(
            r#"{"steps": [
                {"type": "toggle_sidebar"},
                {"type": "tick", "frames": 2},
                {"type": "assert_sidebar", "open": true}
            ]}"#,
        );

        assert!(outcome.is_failed());
        let report = outcome.report();
        assert_eq!(report.failed_step_index, Some(2));
        assert_eq!(report.assertion.as_deref(), Some("assert_sidebar"));
        assert_eq!(report.code.as_deref(), Some("sidebar_mismatch"));
        assert_eq!(report.elapsed_frames, 2);
    }

    #[test]
    fn test_angry_cursor_kicks_once_per_cooldown() {
        // The cursor starts at the viewport center, 50 px from the repulsion
        // center. Ten frames of 16 ms stay inside the 1200 ms cooldown.
        let mut config = DriftConfig::default();
        config.layout.center = config.frame.viewport().center() + drift_core::Vec2::new(50.0, 0.0);
        let outcome = run_scenario(
            r#"{"steps": [
                {"type": "set_angry", "angry": true},
                {"type": "tick", "frames": 10},
                {"type": "assert_kicks", "count": 1}
            ]}"#,
            config,
            HeadlessRunConfig::default(),
        )
        .unwrap();
        assert!(!outcome.is_failed(), "{:?}", outcome.report());
    }

    #[test]
    fn test_partial_wait_counts_exact_milliseconds() {
        let outcome = run_scenario(
            r#"{"steps": [
                {"type": "wait", "ms": 25},
                {"type": "tick", "frames": 0},
                {"type": "wait", "ms": 0},
                {"type": "tick", "frames": 1}
            ]}"#,
            DriftConfig::default(),
            HeadlessRunConfig {
                tick_ms: 10,
                ..Default::default()
            },
        )
        .unwrap();
        let report = outcome.report();
        assert_eq!(report.elapsed_frames, 4);
        assert_eq!(report.elapsed_ms, 35);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(run_scenario(
            "{\"steps\": [{\"type\": \"fly\"}]}",
            DriftConfig::default(),
            HeadlessRunConfig::default()
        )
        .is_err());
    }
}
