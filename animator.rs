//! Animator: one per drawing surface
//!
//! Owns the surface, the scheduler handle, and every particle for as long as
//! it lives. Each scheduled frame runs the simulation step, paints, and asks
//! for the next frame.
//!
//! On resize the host stops the old animator and builds a new one sized to
//! the new surface. [`Animator::into_parts`] is the only way to get the
//! surface back, and it unsubscribes first, so a stale callback can never
//! paint over a replacement.

use crate::clock::FrameClock;
use crate::error::ConfigError;
use crate::renderer;
use crate::rng::Rng;
use crate::scheduler::{FrameScheduler, Subscription};
use crate::settings::{Scene, Settings};
use crate::simulation;
use crate::spawner;
use crate::store::ParticleStore;
use crate::surface::{effective_ratio, Bounds, Surface};

pub struct Animator<D: Surface, S: FrameScheduler, const N: usize> {
    surface: D,
    scheduler: S,
    subscription: Subscription<S::Handle>,
    store: ParticleStore<N>,
    rng: Rng,
    clock: FrameClock,
    bounds: Bounds,
    settings: Settings,
}

impl<D: Surface, S: FrameScheduler, const N: usize> Animator<D, S, N> {
    /// Build an animator for `surface` at host time `now` (ms). A starfield
    /// places its steady stars here; nothing is scheduled until
    /// [`subscribe`](Self::subscribe).
    pub fn new(surface: D, scheduler: S, settings: Settings, now: f64) -> Result<Self, ConfigError> {
        settings.validate()?;

        let bounds = Bounds::of(&surface);
        let mut rng = Rng::new(settings.rng_seed);
        let mut store = ParticleStore::new();

        match settings.scene {
            Scene::Starfield => {
                let placed = spawner::populate_stars(&mut store, &mut rng, bounds, &settings.starfield);
                log::debug!(
                    "starfield on {}x{} logical px: {} stars",
                    bounds.width,
                    bounds.height,
                    placed
                );
            }
            Scene::Fireworks => {
                log::debug!("fireworks on {}x{} logical px", bounds.width, bounds.height);
            }
        }

        Ok(Self {
            surface,
            scheduler,
            subscription: Subscription::new(),
            store,
            rng,
            clock: FrameClock::new(now),
            bounds,
            settings,
        })
    }

    /// Start continuous animation: the first frame is requested immediately.
    pub fn subscribe(&mut self) {
        if !self.subscription.is_subscribed() {
            log::debug!("animator subscribed");
        }
        self.subscription.arm(&mut self.scheduler);
    }

    /// Stop animating and cancel the outstanding frame request. Safe to call
    /// any number of times.
    pub fn unsubscribe(&mut self) {
        if self.subscription.is_subscribed() {
            log::debug!("animator unsubscribed");
        }
        self.subscription.disarm(&mut self.scheduler);
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_subscribed()
    }

    /// Outstanding frame request, if any.
    pub fn pending_frame(&self) -> Option<S::Handle> {
        self.subscription.pending()
    }

    /// Per-refresh entry point, called by the host when a scheduled frame
    /// fires, with the host's timestamp in milliseconds.
    pub fn paint_frame(&mut self, now: f64) {
        self.subscription.fired();

        self.advance(now);

        let ratio = effective_ratio(self.surface.pixel_ratio());
        match self.surface.context() {
            Some(ctx) => renderer::paint(
                ctx,
                &self.store,
                self.bounds,
                ratio,
                &self.clock,
                now,
                &self.settings,
            ),
            // Detached canvas: try again next frame
            None => log::trace!("no render context, frame at {now} not painted"),
        }

        self.clock.mark_frame(now);
        self.subscription.rearm(&mut self.scheduler);
    }

    fn advance(&mut self, now: f64) {
        match self.settings.scene {
            Scene::Fireworks => {
                let cfg = &self.settings.fireworks;
                if cfg.tick_gate.should_advance(self.clock.ms_since_update(now)) {
                    self.clock.mark_update(now);
                    simulation::step_fireworks(&mut self.store, &mut self.rng, self.bounds, cfg);
                }
            }
            Scene::Starfield => {
                let dt = self.clock.seconds_since_last_frame(now);
                simulation::step_starfield(
                    &mut self.store,
                    &mut self.rng,
                    self.bounds,
                    &self.settings.starfield,
                    now,
                    dt,
                );
            }
        }
    }

    pub fn particles(&self) -> &ParticleStore<N> {
        &self.store
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn surface(&self) -> &D {
        &self.surface
    }

    /// Hosts attach or swap the underlying context through here. Size
    /// changes need a new animator instead.
    pub fn surface_mut(&mut self) -> &mut D {
        &mut self.surface
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// The host's refresh loop needs to drive its own scheduler.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Stop the loop and hand back the surface and scheduler, e.g. to build a
    /// replacement after a resize.
    pub fn into_parts(mut self) -> (D, S) {
        self.unsubscribe();
        (self.surface, self.scheduler)
    }
}
