//! The navigation shell
//!
//! Owns the frame scheduler, the pointer state, the always-on cursor loop and
//! whichever page scene is mounted. Navigation tears the old scene down
//! before the new one is built, so at any moment the scheduler holds exactly
//! the cursor plus the current page's loops.

use crate::config::DriftConfig;
use crate::error::Result;
use crate::navigation::{Navigator, Page, Transition};
use crate::scene::MountedScene;
use drift_animation::{
    BurstEmitter, CursorMotion, CursorTracker, ElementState, FloaterField, FrameContext,
    FrameScheduler, Gaze, LoopId, ParticleField, Presence,
};
use drift_core::{Point, PointerEvent, PointerInput};
use serde::Serialize;
use tracing::{debug, info};

pub struct Shell {
    config: DriftConfig,
    navigator: Navigator,
    scheduler: FrameScheduler,
    pointer: PointerInput,
    cursor: LoopId,
    scene: Option<MountedScene>,
    mounts: u64,
}

impl Shell {
    /// Build a shell on the home page. Fails if `config` does not validate.
    pub fn new(config: DriftConfig) -> Result<Self> {
        config.validate()?;

        let mut scheduler = FrameScheduler::new();
        scheduler.set_target_fps(config.frame.target_fps);

        let start = config.frame.viewport().center();
        let cursor = scheduler.register(CursorTracker::new(
            config.cursor,
            start,
            config.layout.center,
        ));

        let navigator = Navigator::new();
        let scene = MountedScene::mount(
            navigator.current(),
            &config,
            &mut scheduler,
            config.frame.seed,
        );
        info!(page = %navigator.current(), "shell started");

        Ok(Self {
            config,
            navigator,
            scheduler,
            pointer: PointerInput::new(),
            cursor,
            scene: Some(scene),
            mounts: 1,
        })
    }

    pub fn config(&self) -> &DriftConfig {
        &self.config
    }

    pub fn current_page(&self) -> Page {
        self.navigator.current()
    }

    pub fn sidebar_open(&self) -> bool {
        self.navigator.sidebar_open()
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    /// Switch pages, swapping the mounted scene. No-op on the current page.
    pub fn navigate(&mut self, page: Page) -> Option<Transition> {
        let transition = self.navigator.navigate(page)?;

        if let Some(previous) = self.scene.take() {
            previous.unmount(&mut self.scheduler);
        }

        let seed = self.config.frame.seed.wrapping_add(self.mounts);
        self.mounts += 1;
        self.scene = Some(MountedScene::mount(
            page,
            &self.config,
            &mut self.scheduler,
            seed,
        ));

        Some(transition)
    }

    pub fn toggle_sidebar(&mut self) -> bool {
        self.navigator.toggle_sidebar()
    }

    /// Feed one pointer event. A press on the profile face launches a burst.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        self.pointer.apply(&event);

        let PointerEvent::Down { x, y } = event else {
            return;
        };
        let at = Point::new(x, y);
        let on_face =
            at.distance_to(self.config.layout.center) <= self.config.profile.face_radius;
        if !on_face {
            return;
        }
        if let Some(id) = self.scene.as_ref().and_then(MountedScene::bursts) {
            if let Some(emitter) = self.scheduler.get_mut::<BurstEmitter>(id) {
                emitter.emit(at);
                debug!(x, y, bursts = emitter.bursts(), "face clicked");
            }
        }
    }

    pub fn set_angry(&mut self, angry: bool) {
        if let Some(cursor) = self.scheduler.get_mut::<CursorTracker>(self.cursor) {
            cursor.set_angry(angry);
        }
    }

    /// Run one frame of `dt` seconds against the latest pointer sample
    pub fn frame(&mut self, dt: f32) -> FrameContext {
        self.scheduler.advance(self.pointer.position(), dt)
    }

    /// Run one frame of the nominal duration for the target frame rate
    pub fn frame_nominal(&mut self) -> FrameContext {
        let dt = self.scheduler.frame_duration();
        self.frame(dt)
    }

    /// Run one frame timed by the wall clock
    pub fn tick(&mut self) -> FrameContext {
        self.scheduler.tick(self.pointer.position())
    }

    pub fn cursor(&self) -> Option<&CursorTracker> {
        self.scheduler.get::<CursorTracker>(self.cursor)
    }

    pub fn profile_field(&self) -> Option<&ParticleField> {
        let id = self.scene.as_ref()?.field()?;
        self.scheduler.get::<ParticleField>(id)
    }

    pub fn bursts(&self) -> Option<&BurstEmitter> {
        let id = self.scene.as_ref()?.bursts()?;
        self.scheduler.get::<BurstEmitter>(id)
    }

    pub fn presence(&self) -> Option<&Presence> {
        let id = self.scene.as_ref()?.presence()?;
        self.scheduler.get::<Presence>(id)
    }

    pub fn floaters(&self) -> Option<&FloaterField> {
        let id = self.scene.as_ref()?.floaters()?;
        self.scheduler.get::<FloaterField>(id)
    }

    /// Loops registered right now, cursor included
    pub fn active_loops(&self) -> usize {
        self.scheduler.loop_count()
    }

    /// Loops owned by the current page
    pub fn page_loops(&self) -> usize {
        self.scene.as_ref().map_or(0, |scene| scene.loops().len())
    }

    /// No NaN or infinity anywhere in the moving state
    pub fn is_finite(&self) -> bool {
        self.cursor().map_or(true, CursorTracker::is_finite)
            && self.profile_field().map_or(true, ParticleField::is_finite)
            && self.bursts().map_or(true, BurstEmitter::is_finite)
    }

    /// Every field element within `epsilon` of its anchor and no live burst
    pub fn is_settled(&self, epsilon: f32) -> bool {
        self.profile_field()
            .map_or(true, |field| field.max_offset() <= epsilon)
            && self
                .bursts()
                .map_or(true, |bursts| bursts.particles().is_empty())
    }

    pub fn snapshot(&self) -> ShellSnapshot {
        let cursor = self.cursor().map(|cursor| CursorSnapshot {
            position: cursor.position(),
            motion: cursor.last_motion(),
            kicks: cursor.kicks(),
            angry: cursor.is_angry(),
            core_scale: cursor.core_scale(),
            sparks: cursor.spark_positions().collect(),
        });
        let field = self.profile_field();

        ShellSnapshot {
            page: self.current_page(),
            sidebar_open: self.sidebar_open(),
            frame_index: self.scheduler.frame_index(),
            elapsed_ms: self.scheduler.elapsed_ms(),
            pointer: self.pointer.position(),
            active_loops: self.active_loops(),
            page_loops: self.page_loops(),
            cursor,
            max_offset: field.map(ParticleField::max_offset),
            elements: field.map(|f| f.states().collect()).unwrap_or_default(),
            burst_particles: self.bursts().map_or(0, |b| b.particles().len()),
            breathing_scale: self.presence().map(Presence::breathing_scale),
            gaze: self.presence().map(Presence::gaze),
            floaters: self.floaters().map_or(0, FloaterField::len),
            finite: self.is_finite(),
        }
    }
}

/// Serializable view of the cursor
#[derive(Clone, Debug, Serialize)]
pub struct CursorSnapshot {
    pub position: Point,
    pub motion: CursorMotion,
    pub kicks: u64,
    pub angry: bool,
    pub core_scale: f32,
    /// Orbiting spark positions
    pub sparks: Vec<Point>,
}

/// Serializable view of the whole shell at one instant
#[derive(Clone, Debug, Serialize)]
pub struct ShellSnapshot {
    pub page: Page,
    pub sidebar_open: bool,
    pub frame_index: u64,
    pub elapsed_ms: f64,
    pub pointer: Option<Point>,
    pub active_loops: usize,
    pub page_loops: usize,
    pub cursor: Option<CursorSnapshot>,
    pub max_offset: Option<f32>,
    pub elements: Vec<ElementState>,
    pub burst_particles: usize,
    pub breathing_scale: Option<f32>,
    /// Profile face lean, present only on the profile page
    pub gaze: Option<Gaze>,
    pub floaters: usize,
    pub finite: bool,
}
