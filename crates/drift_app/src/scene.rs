//! Per-page motion scenes
//!
//! Mounting a page registers the loops it owns with the scheduler; unmounting
//! removes every one of them. Nothing a page registers outlives the page.

use crate::config::DriftConfig;
use crate::navigation::Page;
use drift_animation::{BurstEmitter, FloaterField, FrameScheduler, LoopId, ParticleField, Presence};
use rand::rngs::StdRng;
use rand::SeedableRng;
use smallvec::SmallVec;
use tracing::debug;

/// The loops a mounted page owns
#[derive(Debug)]
pub struct MountedScene {
    page: Page,
    loops: SmallVec<[LoopId; 4]>,
    field: Option<LoopId>,
    bursts: Option<LoopId>,
    presence: Option<LoopId>,
    floaters: Option<LoopId>,
}

impl MountedScene {
    /// Register the loops for `page`.
    ///
    /// `seed` drives every random draw of this mount, so the same seed
    /// rebuilds the same scene.
    pub fn mount(
        page: Page,
        config: &DriftConfig,
        scheduler: &mut FrameScheduler,
        seed: u64,
    ) -> Self {
        let mut scene = Self {
            page,
            loops: SmallVec::new(),
            field: None,
            bursts: None,
            presence: None,
            floaters: None,
        };
        let mut rng = StdRng::seed_from_u64(seed);
        let viewport = config.frame.viewport();

        match page {
            Page::Profile => {
                let center = config.layout.center;
                let elements = config.layout.spawn(&mut rng);
                scene.field = Some(scene.own(
                    scheduler.register(ParticleField::new(elements, config.kinematics)),
                ));
                scene.bursts = Some(scene.own(
                    scheduler.register(BurstEmitter::new(config.burst, seed.wrapping_add(1))),
                ));
                scene.presence =
                    Some(scene.own(scheduler.register(Presence::new(config.presence, center))));
                scene.floaters = Some(scene.own(scheduler.register(FloaterField::ring(
                    center,
                    config.profile.ring_radius,
                    config.profile.ring_count,
                ))));
            }
            Page::Roadmap => {
                let counts = config.floaters;
                let field = FloaterField::twinkles(&mut rng, viewport, counts.roadmap_twinkles)
                    .merged(FloaterField::drifters(&mut rng, viewport, counts.roadmap_drifters));
                scene.floaters = Some(scene.own(scheduler.register(field)));
            }
            Page::Contacts => {
                let field =
                    FloaterField::bubbles(&mut rng, viewport, config.floaters.contacts_bubbles);
                scene.floaters = Some(scene.own(scheduler.register(field)));
            }
            Page::Home | Page::Tools => {}
        }

        debug!(page = %page, loops = scene.loops.len(), "scene mounted");
        scene
    }

    fn own(&mut self, id: LoopId) -> LoopId {
        self.loops.push(id);
        id
    }

    /// Unregister every loop this scene owns
    pub fn unmount(self, scheduler: &mut FrameScheduler) {
        let mut removed = 0;
        for id in &self.loops {
            if scheduler.unregister(*id) {
                removed += 1;
            }
        }
        debug!(page = %self.page, removed, "scene unmounted");
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn loops(&self) -> &[LoopId] {
        &self.loops
    }

    pub fn field(&self) -> Option<LoopId> {
        self.field
    }

    pub fn bursts(&self) -> Option<LoopId> {
        self.bursts
    }

    pub fn presence(&self) -> Option<LoopId> {
        self.presence
    }

    pub fn floaters(&self) -> Option<LoopId> {
        self.floaters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loop_counts_per_page() {
        let config = DriftConfig::default();
        let expected = [
            (Page::Home, 0),
            (Page::Profile, 4),
            (Page::Tools, 0),
            (Page::Roadmap, 1),
            (Page::Contacts, 1),
        ];
        for (page, count) in expected {
            let mut scheduler = FrameScheduler::new();
            let scene = MountedScene::mount(page, &config, &mut scheduler, 1);
            assert_eq!(scene.loops().len(), count, "{page}");
            assert_eq!(scheduler.loop_count(), count, "{page}");
        }
    }

    #[test]
    fn test_profile_scene_contents() {
        let config = DriftConfig::default();
        let mut scheduler = FrameScheduler::new();
        let scene = MountedScene::mount(Page::Profile, &config, &mut scheduler, 1);

        let field = scheduler
            .get::<ParticleField>(scene.field().unwrap())
            .unwrap();
        assert_eq!(field.len(), 12);

        let ring = scheduler
            .get::<FloaterField>(scene.floaters().unwrap())
            .unwrap();
        assert_eq!(ring.len(), 6);
    }

    #[test]
    fn test_roadmap_merges_twinkles_and_drifters() {
        let config = DriftConfig::default();
        let mut scheduler = FrameScheduler::new();
        let scene = MountedScene::mount(Page::Roadmap, &config, &mut scheduler, 1);
        let floaters = scheduler
            .get::<FloaterField>(scene.floaters().unwrap())
            .unwrap();
        assert_eq!(floaters.len(), 120);
        assert!(scene.field().is_none());
    }

    #[test]
    fn test_unmount_removes_only_own_loops() {
        let config = DriftConfig::default();
        let mut scheduler = FrameScheduler::new();
        let outsider = scheduler.register(FloaterField::default());

        let scene = MountedScene::mount(Page::Profile, &config, &mut scheduler, 3);
        let owned: Vec<_> = scene.loops().to_vec();
        scene.unmount(&mut scheduler);

        assert!(owned.iter().all(|id| !scheduler.contains(*id)));
        assert!(scheduler.contains(outsider));
        assert_eq!(scheduler.loop_count(), 1);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let config = DriftConfig::default();
        let mut a = FrameScheduler::new();
        let mut b = FrameScheduler::new();
        let sa = MountedScene::mount(Page::Profile, &config, &mut a, 9);
        let sb = MountedScene::mount(Page::Profile, &config, &mut b, 9);
        let fa = a.get::<ParticleField>(sa.field().unwrap()).unwrap();
        let fb = b.get::<ParticleField>(sb.field().unwrap()).unwrap();
        assert_eq!(fa.elements(), fb.elements());
    }
}
