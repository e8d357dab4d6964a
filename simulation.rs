//! Simulation step: advance every live particle by one tick
//!
//! Fireworks particles integrate per tick (velocities are pixels per tick,
//! gravity is pixels per tick squared). Starfield particles are closed form in
//! time, so their step only retires expired shooting stars and rolls for a
//! new one.

use core::f32::consts::PI;

use heapless::Vec;

use crate::particle::{Falling, Particle, Rising};
use crate::rng::Rng;
use crate::settings::{FireworksSettings, StarfieldSettings};
use crate::spawner;
use crate::store::ParticleStore;
use crate::surface::Bounds;

fn keep<const N: usize>(next: &mut Vec<Particle, N>, particle: Particle) {
    if next.push(particle).is_err() {
        log::debug!("particle store full ({} slots), dropping particle", N);
    }
}

pub fn advance_rising(rocket: &mut Rising, cfg: &FireworksSettings) {
    rocket.y += rocket.vy;
    rocket.vy += cfg.gravity;
    rocket.progress += rocket.speed;
}

pub fn advance_falling(shard: &mut Falling, cfg: &FireworksSettings) {
    // Progress saturates; it never runs away past the first value >= 1
    if shard.progress < 1.0 {
        shard.progress += shard.speed;
    }
    shard.y += shard.vy;
    shard.x += shard.vx;
    shard.vy += cfg.gravity;
    shard.vx *= cfg.wind_resistance;
}

/// Burst a rocket into shards spread evenly around a full circle. All shards
/// share one explosion speed and inherit the rocket's position and hue.
/// Returns how many shards were produced (some may be dropped if `next` is
/// full).
pub fn shatter<const N: usize>(
    rocket: &Rising,
    rng: &mut Rng,
    cfg: &FireworksSettings,
    next: &mut Vec<Particle, N>,
) -> u32 {
    let speed = rng.range(cfg.explosion_speed_min, cfg.explosion_speed_max);
    let count = rng.range_inclusive(cfg.min_shards, cfg.max_shards).max(1);

    log::trace!(
        "burst at ({:.1}, {:.1}) into {} shards",
        rocket.x,
        rocket.y,
        count
    );

    for j in 0..count {
        let angle = 2.0 * PI * (j as f32 / count as f32);
        let shard = Falling {
            x: rocket.x,
            y: rocket.y,
            vx: libm::sinf(angle) * speed,
            vy: libm::cosf(angle) * speed,
            progress: 0.0,
            speed: rng.range(cfg.down_speed_min, cfg.down_speed_max),
            hue: rocket.hue,
        };
        keep(next, Particle::Falling(shard));
    }
    count
}

/// One fireworks tick. Rockets whose progress reaches 1 are replaced by
/// their shards in the same tick; shards that leave the top edge or finish
/// fading are dropped in the same tick. Then at most one new rocket.
pub fn step_fireworks<const N: usize>(
    store: &mut ParticleStore<N>,
    rng: &mut Rng,
    bounds: Bounds,
    cfg: &FireworksSettings,
) {
    let mut next: Vec<Particle, N> = Vec::new();

    for particle in store.iter() {
        match *particle {
            Particle::Rising(mut rocket) => {
                advance_rising(&mut rocket, cfg);
                if rocket.progress >= 1.0 {
                    shatter(&rocket, rng, cfg, &mut next);
                } else {
                    keep(&mut next, Particle::Rising(rocket));
                }
            }
            Particle::Falling(mut shard) => {
                // A shard already out of flight goes now, whatever this
                // tick's integration would do to it
                if shard.in_flight() {
                    advance_falling(&mut shard, cfg);
                    if shard.in_flight() {
                        keep(&mut next, Particle::Falling(shard));
                    }
                }
            }
            Particle::Star(_) | Particle::ShootingStar(_) => keep(&mut next, *particle),
        }
    }

    if let Some(rocket) = spawner::maybe_spawn_rocket(rng, bounds, cfg) {
        keep(&mut next, Particle::Rising(rocket));
    }

    store.replace(next);
}

/// One starfield tick at host time `now`, `dt_seconds` after the previous
/// painted frame. Expired shooting stars go before the spawn roll.
pub fn step_starfield<const N: usize>(
    store: &mut ParticleStore<N>,
    rng: &mut Rng,
    bounds: Bounds,
    cfg: &StarfieldSettings,
    now: f64,
    dt_seconds: f32,
) {
    store.retain(|particle| match particle {
        Particle::ShootingStar(streak) => !streak.is_expired(now),
        Particle::Star(_) | Particle::Rising(_) | Particle::Falling(_) => true,
    });

    if let Some(streak) = spawner::maybe_spawn_shooting_star(rng, bounds, cfg, now, dt_seconds) {
        if store.push(Particle::ShootingStar(streak)).is_err() {
            log::debug!("particle store full ({} slots), skipping shooting star", N);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::{FadeIn, ShootingStar, Star, Twinkle};
    use crate::color::Rgb;

    const BOUNDS: Bounds = Bounds {
        width: 800.0,
        height: 600.0,
    };

    fn quiet() -> FireworksSettings {
        FireworksSettings {
            add_chance: 0.0,
            ..FireworksSettings::default()
        }
    }

    fn rocket(progress: f32) -> Rising {
        Rising {
            x: 100.0,
            y: 300.0,
            vy: -3.0,
            progress,
            speed: 0.015,
            hue: 42.0,
        }
    }

    fn shard(y: f32, progress: f32) -> Falling {
        Falling {
            x: 50.0,
            y,
            vx: 2.0,
            vy: 1.0,
            progress,
            speed: 0.01,
            hue: 10.0,
        }
    }

    fn shards<const N: usize>(store: &ParticleStore<N>) -> std::vec::Vec<Falling> {
        store
            .iter()
            .filter_map(|p| match p {
                Particle::Falling(f) => Some(*f),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn rising_integrates_velocity_and_gravity() {
        let cfg = FireworksSettings::default();
        let mut r = rocket(0.2);
        advance_rising(&mut r, &cfg);
        assert_eq!(r.y, 297.0);
        assert_eq!(r.vy, -3.0 + cfg.gravity);
        assert_eq!(r.progress, 0.2 + 0.015);
    }

    #[test]
    fn falling_applies_gravity_and_wind() {
        let cfg = FireworksSettings::default();
        let mut s = shard(100.0, 0.0);
        advance_falling(&mut s, &cfg);
        assert_eq!(s.x, 52.0);
        assert_eq!(s.y, 101.0);
        assert_eq!(s.vy, 1.0 + cfg.gravity);
        assert_eq!(s.vx, 2.0 * cfg.wind_resistance);
        assert_eq!(s.progress, 0.01);
    }

    #[test]
    fn falling_progress_saturates() {
        let cfg = FireworksSettings::default();
        let mut s = shard(100.0, 1.0);
        advance_falling(&mut s, &cfg);
        assert_eq!(s.progress, 1.0);
    }

    #[test]
    fn rocket_at_full_progress_bursts_into_shards() {
        let mut cfg = quiet();
        cfg.min_shards = 8;
        cfg.max_shards = 8;
        let mut rng = Rng::new(9);
        let mut store: ParticleStore<64> = ParticleStore::new();
        store.push(Particle::Rising(rocket(1.0))).unwrap();

        let before = store.len();
        step_fireworks(&mut store, &mut rng, BOUNDS, &cfg);

        assert_eq!(store.len(), before + 8 - 1);
        assert!(store.iter().all(|p| matches!(p, Particle::Falling(_))));
    }

    #[test]
    fn burst_count_stays_in_configured_range() {
        let cfg = quiet();
        let mut rng = Rng::new(31);
        for _ in 0..200 {
            let mut store: ParticleStore<64> = ParticleStore::new();
            store.push(Particle::Rising(rocket(1.0))).unwrap();
            step_fireworks(&mut store, &mut rng, BOUNDS, &cfg);
            let n = store.len() as u32;
            assert!(n >= cfg.min_shards && n <= cfg.max_shards, "{n} shards");
        }
    }

    #[test]
    fn shards_are_evenly_spaced_with_equal_speed() {
        let cfg = quiet();
        let mut rng = Rng::new(4);
        let mut next: Vec<Particle, 32> = Vec::new();
        let parent = rocket(1.0);
        let count = shatter(&parent, &mut rng, &cfg, &mut next);
        assert_eq!(next.len() as u32, count);

        let step = 2.0 * PI / count as f32;
        let mut speed = None;
        for (j, p) in next.iter().enumerate() {
            let Particle::Falling(s) = p else {
                panic!("expected a shard");
            };
            assert_eq!((s.x, s.y), (parent.x, parent.y));
            assert_eq!(s.hue, parent.hue);
            assert_eq!(s.progress, 0.0);
            assert!(s.speed >= cfg.down_speed_min && s.speed < cfg.down_speed_max);

            let magnitude = (s.vx * s.vx + s.vy * s.vy).sqrt();
            let first = *speed.get_or_insert(magnitude);
            assert!((magnitude - first).abs() < 1e-4);
            assert!(magnitude >= cfg.explosion_speed_min && magnitude < cfg.explosion_speed_max + 1e-4);

            // angle measured the same way it was built: (sin, cos)
            let mut angle = s.vx.atan2(s.vy);
            if angle < -1e-4 {
                angle += 2.0 * PI;
            }
            assert!((angle - step * j as f32).abs() < 1e-3, "shard {j} at {angle}");
        }
    }

    #[test]
    fn rocket_below_full_progress_keeps_rising() {
        let cfg = quiet();
        let mut rng = Rng::new(1);
        let mut store: ParticleStore<8> = ParticleStore::new();
        store.push(Particle::Rising(rocket(0.5))).unwrap();
        step_fireworks(&mut store, &mut rng, BOUNDS, &cfg);
        assert_eq!(store.len(), 1);
        assert!(matches!(store.as_slice()[0], Particle::Rising(r) if r.progress > 0.5));
    }

    #[test]
    fn shard_above_top_edge_is_gone_next_tick() {
        let cfg = quiet();
        let mut rng = Rng::new(1);
        let mut store: ParticleStore<8> = ParticleStore::new();
        // Moving down fast enough to re-enter, progress barely started
        let mut s = shard(0.0, 0.0);
        s.vy = 5.0;
        store.push(Particle::Falling(s)).unwrap();
        store.push(Particle::Falling(shard(-3.0, 0.2))).unwrap();
        step_fireworks(&mut store, &mut rng, BOUNDS, &cfg);
        assert!(store.is_empty());
    }

    #[test]
    fn faded_shard_is_gone_next_tick() {
        let cfg = quiet();
        let mut rng = Rng::new(1);
        let mut store: ParticleStore<8> = ParticleStore::new();
        store.push(Particle::Falling(shard(300.0, 1.0))).unwrap();
        store.push(Particle::Falling(shard(300.0, 0.995))).unwrap();
        step_fireworks(&mut store, &mut rng, BOUNDS, &cfg);
        assert!(store.is_empty());
    }

    #[test]
    fn shard_crossing_top_edge_is_dropped_same_tick() {
        let cfg = quiet();
        let mut rng = Rng::new(1);
        let mut store: ParticleStore<8> = ParticleStore::new();
        let mut s = shard(2.0, 0.1);
        s.vy = -5.0;
        store.push(Particle::Falling(s)).unwrap();
        step_fireworks(&mut store, &mut rng, BOUNDS, &cfg);
        assert!(shards(&store).is_empty());
    }

    #[test]
    fn shards_keep_falling_off_the_bottom_until_faded() {
        let cfg = quiet();
        let mut rng = Rng::new(1);
        let mut store: ParticleStore<8> = ParticleStore::new();
        store.push(Particle::Falling(shard(BOUNDS.height + 50.0, 0.1))).unwrap();
        step_fireworks(&mut store, &mut rng, BOUNDS, &cfg);
        assert_eq!(shards(&store).len(), 1);
    }

    #[test]
    fn at_most_one_rocket_per_tick() {
        let mut cfg = FireworksSettings::default();
        cfg.add_chance = 1.0;
        let mut rng = Rng::new(2);
        let mut store: ParticleStore<256> = ParticleStore::new();
        step_fireworks(&mut store, &mut rng, BOUNDS, &cfg);
        assert_eq!(store.len(), 1);
        step_fireworks(&mut store, &mut rng, BOUNDS, &cfg);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn full_store_drops_shards_without_panicking() {
        let mut cfg = quiet();
        cfg.min_shards = 12;
        cfg.max_shards = 12;
        let mut rng = Rng::new(6);
        let mut store: ParticleStore<4> = ParticleStore::new();
        store.push(Particle::Rising(rocket(1.0))).unwrap();
        step_fireworks(&mut store, &mut rng, BOUNDS, &cfg);
        assert_eq!(store.len(), 4);
    }

    fn streak(start: f64, life: f32) -> ShootingStar {
        ShootingStar {
            start,
            x0: 0.0,
            y0: 0.0,
            angle: 0.0,
            velocity: 100.0,
            life,
            size: 1.0,
            color: Rgb::new(255, 255, 255),
        }
    }

    fn star() -> Star {
        Star {
            x: 1.0,
            y: 1.0,
            size: 1.0,
            color: Rgb::new(255, 255, 255),
            twinkle: Twinkle {
                min: 0.2,
                max: 0.8,
                period: 12.0,
                phase: 0.0,
            },
            fade_in: FadeIn {
                duration: 3.0,
                offset: 1.0,
            },
        }
    }

    #[test]
    fn starfield_retires_expired_streaks_and_keeps_stars() {
        let cfg = StarfieldSettings {
            shooting_stars_per_second: 0.0,
            ..StarfieldSettings::default()
        };
        let mut rng = Rng::new(1);
        let mut store: ParticleStore<8> = ParticleStore::new();
        store.push(Particle::Star(star())).unwrap();
        store.push(Particle::ShootingStar(streak(0.0, 1.0))).unwrap();
        store.push(Particle::ShootingStar(streak(500.0, 1.0))).unwrap();

        step_starfield(&mut store, &mut rng, BOUNDS, &cfg, 1_000.0, 0.016);

        assert_eq!(store.len(), 2);
        assert!(matches!(store.as_slice()[0], Particle::Star(_)));
        assert!(matches!(store.as_slice()[1], Particle::ShootingStar(s) if s.start == 500.0));
    }

    #[test]
    fn starfield_spawns_at_most_one_streak_per_tick() {
        let cfg = StarfieldSettings::default();
        let mut rng = Rng::new(1);
        let mut store: ParticleStore<8> = ParticleStore::new();
        // Ten seconds since the last frame: certain, but still single
        step_starfield(&mut store, &mut rng, BOUNDS, &cfg, 10_000.0, 10.0);
        assert_eq!(store.len(), 1);
        assert!(matches!(store.as_slice()[0], Particle::ShootingStar(s) if s.start == 10_000.0));
    }
}
