//! Assertion helpers for headless checks.

use crate::navigation::Page;
use crate::shell::Shell;

/// Assertion result with structured failure details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssertionResult {
    Passed,
    Failed { code: String, message: String },
}

impl AssertionResult {
    fn failed(code: &str, message: String) -> Self {
        AssertionResult::Failed {
            code: code.to_string(),
            message,
        }
    }
}

pub fn evaluate_assert_page(expected: Page, shell: &Shell) -> AssertionResult {
    let current = shell.current_page();
    if current == expected {
        AssertionResult::Passed
    } else {
        AssertionResult::failed(
            "page_mismatch",
            format!("expected page '{expected}', on '{current}'"),
        )
    }
}

pub fn evaluate_assert_loops(expected: usize, shell: &Shell) -> AssertionResult {
    let active = shell.active_loops();
    if active == expected {
        AssertionResult::Passed
    } else {
        AssertionResult::failed(
            "loop_count_mismatch",
            format!("expected {expected} active loops, found {active}"),
        )
    }
}

pub fn evaluate_assert_finite(shell: &Shell) -> AssertionResult {
    if shell.is_finite() {
        AssertionResult::Passed
    } else {
        AssertionResult::failed(
            "non_finite_state",
            "motion state contains NaN or infinity".to_string(),
        )
    }
}

pub fn evaluate_assert_settled(epsilon: f32, shell: &Shell) -> AssertionResult {
    if shell.is_settled(epsilon) {
        return AssertionResult::Passed;
    }
    let offset = shell
        .profile_field()
        .map_or(0.0, |field| field.max_offset());
    let live = shell.bursts().map_or(0, |b| b.particles().len());
    AssertionResult::failed(
        "not_settled",
        format!("max offset {offset:.3} (epsilon {epsilon}), {live} live burst particles"),
    )
}

pub fn evaluate_assert_kicks(expected: u64, shell: &Shell) -> AssertionResult {
    let Some(cursor) = shell.cursor() else {
        return AssertionResult::failed("missing_cursor", "cursor loop not registered".to_string());
    };
    if cursor.kicks() == expected {
        AssertionResult::Passed
    } else {
        AssertionResult::failed(
            "kick_count_mismatch",
            format!("expected {expected} kicks, got {}", cursor.kicks()),
        )
    }
}

pub fn evaluate_assert_sidebar(open: bool, shell: &Shell) -> AssertionResult {
    if shell.sidebar_open() == open {
        AssertionResult::Passed
    } else {
        AssertionResult::failed(
            "sidebar_mismatch",
            format!("expected sidebar open={open}"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DriftConfig;

    #[test]
    fn test_page_and_loops() {
        let mut shell = Shell::new(DriftConfig::default()).unwrap();
        assert_eq!(evaluate_assert_page(Page::Home, &shell), AssertionResult::Passed);
        assert_eq!(evaluate_assert_loops(1, &shell), AssertionResult::Passed);

        shell.navigate(Page::Roadmap);
        match evaluate_assert_loops(1, &shell) {
            AssertionResult::Failed { code, message } => {
                assert_eq!(code, "loop_count_mismatch");
                assert!(message.contains("found 2"));
            }
            AssertionResult::Passed => panic!("expected failure"),
        }
    }

    #[test]
    fn test_kicks_and_sidebar() {
        let mut shell = Shell::new(DriftConfig::default()).unwrap();
        assert_eq!(evaluate_assert_kicks(0, &shell), AssertionResult::Passed);
        shell.toggle_sidebar();
        assert_eq!(evaluate_assert_sidebar(false, &shell), AssertionResult::Passed);
        assert!(matches!(
            evaluate_assert_sidebar(true, &shell),
            AssertionResult::Failed { .. }
        ));
    }

    #[test]
    fn test_settled_reports_live_bursts() {
        let mut shell = Shell::new(DriftConfig::default()).unwrap();
        shell.navigate(Page::Profile);
        let center = shell.config().layout.center;
        shell.handle_pointer(drift_core::PointerEvent::Down {
            x: center.x,
            y: center.y,
        });
        match evaluate_assert_settled(1000.0, &shell) {
            AssertionResult::Failed { message, .. } => assert!(message.contains("8 live")),
            AssertionResult::Passed => panic!("bursts should be live"),
        }
    }
}
