//! Headless runtime primitives for deterministic frame execution.

use anyhow::{bail, Result};

/// Configuration for deterministic headless frame execution.
#[derive(Debug, Clone, Copy)]
pub struct HeadlessRunConfig {
    /// Number of frames to execute.
    pub max_frames: u32,
    /// Logical milliseconds between frames.
    pub tick_ms: u64,
}

impl Default for HeadlessRunConfig {
    fn default() -> Self {
        Self {
            max_frames: 1,
            tick_ms: 16,
        }
    }
}

/// Frame context passed to headless frame callbacks.
#[derive(Debug, Clone, Copy)]
pub struct HeadlessContext {
    pub frame_index: u32,
    /// Logical time at the start of this frame
    pub elapsed_ms: u64,
    /// Logical time this frame covers
    pub delta_ms: u64,
}

impl HeadlessContext {
    /// Logical time at the end of this frame
    pub fn end_ms(&self) -> u64 {
        self.elapsed_ms.saturating_add(self.delta_ms)
    }
}

/// Deterministic headless runtime loop.
pub struct HeadlessRuntime;

impl HeadlessRuntime {
    /// Run a fixed frame budget in headless mode.
    pub fn run<F>(cfg: HeadlessRunConfig, mut on_frame: F) -> Result<()>
    where
        F: FnMut(&HeadlessContext),
    {
        if cfg.max_frames == 0 {
            bail!("headless max_frames must be > 0");
        }
        if cfg.tick_ms == 0 {
            bail!("headless tick_ms must be > 0");
        }

        for frame in 0..cfg.max_frames {
            on_frame(&HeadlessContext {
                frame_index: frame,
                elapsed_ms: cfg.tick_ms.saturating_mul(frame as u64),
                delta_ms: cfg.tick_ms,
            });
        }

        Ok(())
    }

    /// Cover `duration_ms` of logical time in `tick_ms` frames.
    ///
    /// The last frame is shortened so the deltas sum to exactly
    /// `duration_ms`; `cfg.max_frames` is ignored.
    pub fn run_for<F>(cfg: HeadlessRunConfig, duration_ms: u64, mut on_frame: F) -> Result<()>
    where
        F: FnMut(&HeadlessContext),
    {
        if duration_ms == 0 {
            bail!("headless duration_ms must be > 0");
        }
        if cfg.tick_ms == 0 {
            bail!("headless tick_ms must be > 0");
        }

        for frame in 0..frames_for(duration_ms, cfg.tick_ms) {
            let elapsed_ms = cfg.tick_ms.saturating_mul(frame as u64);
            on_frame(&HeadlessContext {
                frame_index: frame,
                elapsed_ms,
                delta_ms: cfg.tick_ms.min(duration_ms - elapsed_ms),
            });
        }

        Ok(())
    }
}

/// Frames of `tick_ms` needed to cover `duration_ms`, rounding up
fn frames_for(duration_ms: u64, tick_ms: u64) -> u32 {
    if duration_ms == 0 {
        return 0;
    }
    let tick = tick_ms.max(1);
    let frames = duration_ms.saturating_add(tick.saturating_sub(1)) / tick;
    frames.min(u32::MAX as u64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_exact_frame_budget() {
        let mut seen = Vec::new();
        HeadlessRuntime::run(
            HeadlessRunConfig {
                max_frames: 3,
                tick_ms: 10,
            },
            |ctx| seen.push((ctx.frame_index, ctx.elapsed_ms, ctx.delta_ms)),
        )
        .unwrap();
        assert_eq!(seen, vec![(0, 0, 10), (1, 10, 10), (2, 20, 10)]);
    }

    #[test]
    fn test_rejects_zero_budget() {
        let cfg = HeadlessRunConfig {
            max_frames: 0,
            ..Default::default()
        };
        assert!(HeadlessRuntime::run(cfg, |_| {}).is_err());

        let cfg = HeadlessRunConfig {
            tick_ms: 0,
            ..Default::default()
        };
        assert!(HeadlessRuntime::run(cfg, |_| {}).is_err());
        assert!(HeadlessRuntime::run_for(cfg, 40, |_| {}).is_err());
        assert!(HeadlessRuntime::run_for(HeadlessRunConfig::default(), 0, |_| {}).is_err());
    }

    #[test]
    fn test_run_for_shortens_last_frame() {
        let mut seen = Vec::new();
        HeadlessRuntime::run_for(HeadlessRunConfig::default(), 40, |ctx| {
            seen.push((ctx.frame_index, ctx.elapsed_ms, ctx.delta_ms))
        })
        .unwrap();
        assert_eq!(seen, vec![(0, 0, 16), (1, 16, 16), (2, 32, 8)]);
        assert_eq!(seen.iter().map(|s| s.2).sum::<u64>(), 40);
    }

    #[test]
    fn test_frames_for_rounds_up() {
        assert_eq!(frames_for(0, 16), 0);
        assert_eq!(frames_for(16, 16), 1);
        assert_eq!(frames_for(17, 16), 2);
        assert_eq!(frames_for(5, 0), 5);
    }
}
