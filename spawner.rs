//! Spawner: stochastic per-tick spawn decisions and randomized initial state
//!
//! Every random field is drawn here, once, when the particle is created.

use core::f32::consts::PI;

use crate::particle::{FadeIn, Particle, Rising, ShootingStar, Star, Twinkle};
use crate::rng::Rng;
use crate::settings::{FireworksSettings, StarfieldSettings};
use crate::store::ParticleStore;
use crate::surface::Bounds;

/// Rising particle somewhere in the lower half of the surface.
pub fn spawn_rocket(rng: &mut Rng, bounds: Bounds, cfg: &FireworksSettings) -> Rising {
    let half = bounds.height / 2.0;
    Rising {
        x: bounds.width * rng.random(),
        y: half * rng.random() + half,
        vy: rng.range(cfg.up_velocity_min, cfg.up_velocity_max),
        progress: 0.0,
        speed: rng.range(cfg.up_speed_min, cfg.up_speed_max),
        hue: 360.0 * rng.random(),
    }
}

/// At most one new rocket per tick, with a fixed chance.
pub fn maybe_spawn_rocket(
    rng: &mut Rng,
    bounds: Bounds,
    cfg: &FireworksSettings,
) -> Option<Rising> {
    // COMPAT: same comparison shape as the shooting star roll below
    if rng.random() > 1.0 - cfg.add_chance {
        Some(spawn_rocket(rng, bounds, cfg))
    } else {
        None
    }
}

/// Number of steady stars for a surface: `floor(area * density)`.
pub fn star_count(bounds: Bounds, density: f32) -> usize {
    libm::floorf(bounds.area() * density).max(0.0) as usize
}

pub fn spawn_star(rng: &mut Rng, bounds: Bounds, cfg: &StarfieldSettings) -> Star {
    let x = rng.random() * bounds.width;
    let y = rng.random() * bounds.height;
    let size = rng.range(cfg.star_size_min, cfg.star_size_max);
    let a = rng.random();
    let b = rng.random();
    let period = rng.range(cfg.twinkle_period_min, cfg.twinkle_period_max);
    let duration = rng.random() * cfg.fade_in_duration_max;
    let offset = rng.random() * cfg.fade_in_offset_max;
    let phase = rng.random() * cfg.twinkle_phase_max;
    let color = rng.pick(cfg.star_colors).copied().unwrap_or_default();

    Star {
        x,
        y,
        size,
        color,
        twinkle: Twinkle {
            min: a.min(b),
            max: a.max(b),
            period,
            phase,
        },
        fade_in: FadeIn { duration, offset },
    }
}

/// Fill the store with the surface's steady stars. Returns how many were
/// placed, which is less than [`star_count`] only when the store is too small.
pub fn populate_stars<const N: usize>(
    store: &mut ParticleStore<N>,
    rng: &mut Rng,
    bounds: Bounds,
    cfg: &StarfieldSettings,
) -> usize {
    let wanted = star_count(bounds, cfg.star_density);
    let mut placed = 0;
    for _ in 0..wanted {
        let star = spawn_star(rng, bounds, cfg);
        if store.push(Particle::Star(star)).is_err() {
            log::debug!(
                "star field truncated to {} of {} stars (store capacity {})",
                placed,
                wanted,
                N
            );
            break;
        }
        placed += 1;
    }
    placed
}

/// Linear approximation of `1 - (1 - rate)^dt`. Can exceed 1 after a long
/// stall; the roll then always succeeds, but still for a single star.
pub fn shooting_star_chance(rate: f32, dt_seconds: f32) -> f32 {
    rate * dt_seconds
}

pub fn spawn_shooting_star(
    rng: &mut Rng,
    bounds: Bounds,
    cfg: &StarfieldSettings,
    now: f64,
) -> ShootingStar {
    let color = rng.pick(cfg.star_colors).copied().unwrap_or_default();
    ShootingStar {
        start: now,
        x0: rng.random() * bounds.width,
        y0: rng.random() * bounds.height,
        size: rng.range(cfg.shooting_size_min, cfg.shooting_size_max),
        angle: rng.random() * PI * 2.0,
        life: rng.range(cfg.shooting_life_min, cfg.shooting_life_max),
        velocity: rng.range(cfg.shooting_velocity_min, cfg.shooting_velocity_max),
        color,
    }
}

/// One fresh roll per tick; no catch-up for long gaps between frames.
pub fn maybe_spawn_shooting_star(
    rng: &mut Rng,
    bounds: Bounds,
    cfg: &StarfieldSettings,
    now: f64,
    dt_seconds: f32,
) -> Option<ShootingStar> {
    let chance = shooting_star_chance(cfg.shooting_stars_per_second, dt_seconds);
    if rng.random() > 1.0 - chance {
        Some(spawn_shooting_star(rng, bounds, cfg, now))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    const BOUNDS: Bounds = Bounds {
        width: 400.0,
        height: 300.0,
    };

    #[test]
    fn rockets_start_in_lower_half_moving_up() {
        let cfg = FireworksSettings::default();
        let mut rng = Rng::new(11);
        for _ in 0..500 {
            let r = spawn_rocket(&mut rng, BOUNDS, &cfg);
            assert!(r.x >= 0.0 && r.x < BOUNDS.width);
            assert!(r.y >= BOUNDS.height / 2.0 && r.y < BOUNDS.height);
            assert!(r.vy >= cfg.up_velocity_min && r.vy < cfg.up_velocity_max);
            assert!(r.vy < 0.0);
            assert!(r.speed >= cfg.up_speed_min && r.speed < cfg.up_speed_max);
            assert!(r.hue >= 0.0 && r.hue < 360.0);
            assert_eq!(r.progress, 0.0);
        }
    }

    #[test]
    fn rocket_chance_extremes() {
        let mut rng = Rng::new(5);
        let mut cfg = FireworksSettings::default();
        cfg.add_chance = 0.0;
        assert!((0..1000).all(|_| maybe_spawn_rocket(&mut rng, BOUNDS, &cfg).is_none()));
        cfg.add_chance = 1.0;
        assert!((0..1000).all(|_| maybe_spawn_rocket(&mut rng, BOUNDS, &cfg).is_some()));
    }

    #[test]
    fn rocket_chance_is_roughly_honoured() {
        let mut rng = Rng::new(1234);
        let cfg = FireworksSettings::default();
        let spawned = (0..20_000)
            .filter(|_| maybe_spawn_rocket(&mut rng, BOUNDS, &cfg).is_some())
            .count();
        // 5% of 20k = 1000
        assert!(spawned > 800 && spawned < 1200, "spawned {spawned}");
    }

    #[test]
    fn star_count_floors_area_times_density() {
        assert_eq!(star_count(Bounds::new(100.0, 100.0), 0.0004), 4);
        assert_eq!(star_count(Bounds::new(1920.0, 1080.0), 0.0004), 829);
        assert_eq!(star_count(Bounds::new(10.0, 10.0), 0.0004), 0);
    }

    #[test]
    fn stars_draw_fields_in_range() {
        let cfg = StarfieldSettings::default();
        let mut rng = Rng::new(77);
        for _ in 0..500 {
            let s = spawn_star(&mut rng, BOUNDS, &cfg);
            assert!(s.x >= 0.0 && s.x < BOUNDS.width);
            assert!(s.y >= 0.0 && s.y < BOUNDS.height);
            assert!(s.size >= 0.25 && s.size < 1.5);
            assert!(s.twinkle.min <= s.twinkle.max);
            assert!(s.twinkle.min >= 0.0 && s.twinkle.max < 1.0);
            assert!(s.twinkle.period >= 10.0 && s.twinkle.period < 20.0);
            assert!(s.twinkle.phase >= 0.0 && s.twinkle.phase < 20.0);
            assert!(s.fade_in.duration >= 0.0 && s.fade_in.duration < 30.0);
            assert!(s.fade_in.offset >= 0.0 && s.fade_in.offset < 30.0);
            assert!(cfg.star_colors.contains(&s.color));
        }
    }

    #[test]
    fn populate_stops_at_capacity() {
        let cfg = Settings::default().starfield;
        let mut rng = Rng::new(3);

        let mut roomy: ParticleStore<16> = ParticleStore::new();
        assert_eq!(populate_stars(&mut roomy, &mut rng, Bounds::new(100.0, 100.0), &cfg), 4);
        assert_eq!(roomy.len(), 4);

        let mut tight: ParticleStore<2> = ParticleStore::new();
        assert_eq!(populate_stars(&mut tight, &mut rng, Bounds::new(100.0, 100.0), &cfg), 2);
        assert_eq!(tight.len(), 2);
    }

    #[test]
    fn shooting_stars_draw_fields_in_range() {
        let cfg = StarfieldSettings::default();
        let mut rng = Rng::new(8);
        for _ in 0..500 {
            let s = spawn_shooting_star(&mut rng, BOUNDS, &cfg, 1_234.0);
            assert_eq!(s.start, 1_234.0);
            assert!(s.angle >= 0.0 && s.angle < 2.0 * PI);
            assert!(s.life >= 0.5 && s.life < 2.0);
            assert!(s.velocity >= 80.0 && s.velocity < 160.0);
            assert!(s.size >= 0.25 && s.size < 1.5);
        }
    }

    #[test]
    fn shooting_star_roll_scales_with_elapsed_time() {
        let cfg = StarfieldSettings::default();
        let mut rng = Rng::new(21);
        assert!((0..1000)
            .all(|_| maybe_spawn_shooting_star(&mut rng, BOUNDS, &cfg, 0.0, 0.0).is_none()));
        // A long stall guarantees a spawn, but only ever one per roll
        assert!((0..1000)
            .all(|_| maybe_spawn_shooting_star(&mut rng, BOUNDS, &cfg, 0.0, 5.0).is_some()));

        let hits = (0..10_000)
            .filter(|_| maybe_spawn_shooting_star(&mut rng, BOUNDS, &cfg, 0.0, 0.1).is_some())
            .count();
        assert!(hits > 800 && hits < 1200, "hits {hits}");
    }
}
