//! Click bursts: short-lived particles that fly out, fall and fade

use crate::scheduler::{FrameContext, FrameTask};
use drift_core::{Point, Vec2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::any::Any;
use tracing::trace;

/// Burst tuning
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BurstConfig {
    /// Particles per burst
    pub count: usize,
    /// Horizontal launch speed is drawn from `[-spread_x, spread_x)`
    pub spread_x: f32,
    /// Vertical launch speed range (negative is up)
    pub min_vy: f32,
    pub max_vy: f32,
    /// Frames each particle lives
    pub lifetime: u32,
    /// Added to vertical velocity every frame
    pub gravity: f32,
}

impl Default for BurstConfig {
    fn default() -> Self {
        Self {
            count: 8,
            spread_x: 4.0,
            min_vy: -6.0,
            max_vy: 2.0,
            lifetime: 60,
            gravity: 0.1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BurstParticle {
    pub position: Point,
    pub velocity: Vec2,
    pub life: u32,
    pub max_life: u32,
}

impl BurstParticle {
    /// Linear fade from 1 at birth to 0 at death
    pub fn opacity(&self) -> f32 {
        if self.max_life == 0 {
            return 0.0;
        }
        self.life as f32 / self.max_life as f32
    }

    fn step(&mut self, gravity: f32) {
        self.position += self.velocity;
        self.velocity.y += gravity;
        self.life = self.life.saturating_sub(1);
    }
}

/// Owns the live burst particles of a page
#[derive(Clone, Debug)]
pub struct BurstEmitter {
    config: BurstConfig,
    particles: Vec<BurstParticle>,
    rng: StdRng,
    bursts: u64,
}

impl BurstEmitter {
    pub fn new(config: BurstConfig, seed: u64) -> Self {
        Self {
            config,
            particles: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
            bursts: 0,
        }
    }

    /// Launch a burst from `center` using the emitter's own RNG
    pub fn emit(&mut self, center: Point) {
        let particles = spawn(&self.config, center, &mut self.rng);
        self.push_burst(particles);
    }

    fn push_burst(&mut self, particles: Vec<BurstParticle>) {
        self.particles.extend(particles);
        self.bursts += 1;
        trace!(live = self.particles.len(), "burst emitted");
    }

    /// Move every particle one frame and drop the dead ones
    pub fn advance(&mut self) {
        let gravity = self.config.gravity;
        for particle in &mut self.particles {
            particle.step(gravity);
        }
        self.particles.retain(|p| p.life > 0);
    }

    pub fn particles(&self) -> &[BurstParticle] {
        &self.particles
    }

    /// Bursts emitted so far
    pub fn bursts(&self) -> u64 {
        self.bursts
    }

    pub fn is_finite(&self) -> bool {
        self.particles
            .iter()
            .all(|p| p.position.is_finite() && p.velocity.is_finite())
    }
}

impl FrameTask for BurstEmitter {
    fn step(&mut self, _frame: &FrameContext) {
        self.advance();
    }

    fn is_settled(&self) -> bool {
        self.particles.is_empty()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

fn spawn<R: Rng>(config: &BurstConfig, center: Point, rng: &mut R) -> Vec<BurstParticle> {
    let spread = config.spread_x.abs();
    let (lo, hi) = (config.min_vy, config.max_vy);

    (0..config.count)
        .map(|_| {
            let vx = if spread > 0.0 { rng.gen_range(-spread..spread) } else { 0.0 };
            let vy = if hi > lo { rng.gen_range(lo..hi) } else { lo };
            BurstParticle {
                position: center,
                velocity: Vec2::new(vx, vy),
                life: config.lifetime,
                max_life: config.lifetime,
            }
        })
        .collect()
}
