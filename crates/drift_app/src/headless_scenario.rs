//! Scenario definition for headless runs.

use crate::navigation::Page;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Sequence of headless steps.
#[derive(Debug, Clone, Deserialize)]
pub struct HeadlessScenario {
    pub steps: Vec<ScenarioStep>,
}

impl HeadlessScenario {
    /// Load a scenario from JSON text.
    pub fn from_json(input: &str) -> Result<Self> {
        serde_json::from_str(input).context("Failed to parse scenario")
    }

    /// Load a scenario from file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_json(&raw)
    }
}

/// One scenario step: input, time, or a check against the shell.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioStep {
    Pointer { x: f32, y: f32 },
    Leave,
    /// Press and release at one spot
    Click { x: f32, y: f32 },
    Navigate { page: Page },
    ToggleSidebar,
    SetAngry { angry: bool },
    Wait { ms: u64 },
    Tick { frames: u32 },
    AssertPage { page: Page },
    /// Registered loops, cursor included
    AssertLoops { count: usize },
    AssertFinite,
    AssertSettled {
        #[serde(default = "default_epsilon")]
        epsilon: f32,
    },
    AssertKicks { count: u64 },
    AssertSidebar { open: bool },
}

fn default_epsilon() -> f32 {
    0.5
}

impl ScenarioStep {
    pub fn is_assertion(&self) -> bool {
        matches!(
            self,
            ScenarioStep::AssertPage { .. }
                | ScenarioStep::AssertLoops { .. }
                | ScenarioStep::AssertFinite
                | ScenarioStep::AssertSettled { .. }
                | ScenarioStep::AssertKicks { .. }
                | ScenarioStep::AssertSidebar { .. }
        )
    }
}
