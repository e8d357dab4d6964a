//! Animator configuration
//!
//! Every tunable lives here. Defaults reproduce the look of the page the
//! animator was written for.

use crate::clock::TickGate;
use crate::color::Rgb;
use crate::error::ConfigError;

/// Which particle field the animator runs.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Scene {
    /// Rising particles that burst into falling shards.
    Fireworks,
    /// Twinkling stars over a fading sky, with occasional shooting stars.
    Starfield,
}

pub static DEFAULT_STAR_COLORS: [Rgb; 1] = [Rgb::from_hex(0xf8fafc)];

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FireworksSettings {
    // Spawning (per tick)
    pub add_chance: f32,
    pub up_speed_min: f32,
    pub up_speed_max: f32,
    pub up_velocity_min: f32,
    pub up_velocity_max: f32,

    // Explosion
    pub explosion_speed_min: f32,
    pub explosion_speed_max: f32,
    pub min_shards: u32,
    pub max_shards: u32,
    pub down_speed_min: f32,
    pub down_speed_max: f32,

    // Physics (per tick)
    pub gravity: f32,
    pub wind_resistance: f32,

    // Look
    pub max_alpha: f32,
    pub radius: f32,

    // Timing
    pub fps: f32,
    pub tick_gate: TickGate,
}

impl Default for FireworksSettings {
    fn default() -> Self {
        Self {
            add_chance: 0.05,
            up_speed_min: 0.01,
            up_speed_max: 0.02,
            up_velocity_min: -4.0,
            up_velocity_max: -2.0,
            explosion_speed_min: 1.0,
            explosion_speed_max: 6.0,
            min_shards: 6,
            max_shards: 11,
            down_speed_min: 0.01,
            down_speed_max: 0.02,
            gravity: 0.05,
            wind_resistance: 0.99,
            max_alpha: 0.6,
            radius: 4.0,
            fps: 60.0,
            tick_gate: TickGate::EveryFrame,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StarfieldSettings {
    // Steady stars
    pub star_density: f32,
    pub star_size_min: f32,
    pub star_size_max: f32,
    pub twinkle_period_min: f32,
    pub twinkle_period_max: f32,
    pub twinkle_phase_max: f32,
    pub fade_in_duration_max: f32,
    pub fade_in_offset_max: f32,

    // Shooting stars
    pub shooting_stars_per_second: f32,
    pub shooting_life_min: f32,
    pub shooting_life_max: f32,
    pub shooting_velocity_min: f32,
    pub shooting_velocity_max: f32,
    pub shooting_size_min: f32,
    pub shooting_size_max: f32,

    // Sky
    pub star_colors: &'static [Rgb],
    pub dark_sky: Rgb,
    pub light_sky: Rgb,
    pub background_fade_in_seconds: f32,
}

impl Default for StarfieldSettings {
    fn default() -> Self {
        Self {
            star_density: 0.0004,
            star_size_min: 0.25,
            star_size_max: 1.5,
            twinkle_period_min: 10.0,
            twinkle_period_max: 20.0,
            twinkle_phase_max: 20.0,
            fade_in_duration_max: 30.0,
            fade_in_offset_max: 30.0,
            shooting_stars_per_second: 1.0,
            shooting_life_min: 0.5,
            shooting_life_max: 2.0,
            shooting_velocity_min: 80.0,
            shooting_velocity_max: 160.0,
            shooting_size_min: 0.25,
            shooting_size_max: 1.5,
            star_colors: &DEFAULT_STAR_COLORS,
            dark_sky: Rgb::from_hex(0x020617),
            light_sky: Rgb::from_hex(0x0f172a),
            background_fade_in_seconds: 5.0,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Settings {
    pub scene: Scene,
    pub fireworks: FireworksSettings,
    pub starfield: StarfieldSettings,
    pub rng_seed: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scene: Scene::Starfield,
            fireworks: FireworksSettings::default(),
            starfield: StarfieldSettings::default(),
            rng_seed: 0x12345678,
        }
    }
}

impl Settings {
    pub fn fireworks() -> Self {
        Self {
            scene: Scene::Fireworks,
            ..Self::default()
        }
    }

    pub fn starfield() -> Self {
        Self {
            scene: Scene::Starfield,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.rng_seed = seed;
        self
    }

    /// Reject values that would make the simulation meaningless (inverted
    /// ranges, zero periods, empty palette). Both scenes are checked so a
    /// host can switch scene without revalidating.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.fireworks.validate()?;
        self.starfield.validate()
    }
}

impl FireworksSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        unit("add_chance", self.add_chance)?;
        positive_range("up_speed", self.up_speed_min, self.up_speed_max)?;
        range("up_velocity", self.up_velocity_min, self.up_velocity_max)?;
        range(
            "explosion_speed",
            self.explosion_speed_min,
            self.explosion_speed_max,
        )?;
        positive_range("down_speed", self.down_speed_min, self.down_speed_max)?;
        if self.min_shards == 0 {
            return Err(ConfigError::NoShards);
        }
        range("shards", self.min_shards as f32, self.max_shards as f32)?;
        unit("wind_resistance", self.wind_resistance)?;
        unit("max_alpha", self.max_alpha)?;
        positive("radius", self.radius)?;
        positive("fps", self.fps)?;
        if let TickGate::FixedStep { fps } = self.tick_gate {
            positive("tick_gate.fps", fps)?;
        }
        Ok(())
    }
}

impl StarfieldSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.star_colors.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        non_negative("star_density", self.star_density)?;
        positive_range("star_size", self.star_size_min, self.star_size_max)?;
        positive_range(
            "twinkle_period",
            self.twinkle_period_min,
            self.twinkle_period_max,
        )?;
        non_negative("twinkle_phase_max", self.twinkle_phase_max)?;
        non_negative("fade_in_duration_max", self.fade_in_duration_max)?;
        non_negative("fade_in_offset_max", self.fade_in_offset_max)?;
        non_negative("shooting_stars_per_second", self.shooting_stars_per_second)?;
        positive_range("shooting_life", self.shooting_life_min, self.shooting_life_max)?;
        range(
            "shooting_velocity",
            self.shooting_velocity_min,
            self.shooting_velocity_max,
        )?;
        positive_range("shooting_size", self.shooting_size_min, self.shooting_size_max)?;
        non_negative(
            "background_fade_in_seconds",
            self.background_fade_in_seconds,
        )
    }
}

fn range(name: &'static str, min: f32, max: f32) -> Result<(), ConfigError> {
    // NaN fails the comparison and lands here too
    if min <= max {
        Ok(())
    } else {
        Err(ConfigError::InvertedRange { name, min, max })
    }
}

fn positive_range(name: &'static str, min: f32, max: f32) -> Result<(), ConfigError> {
    positive(name, min)?;
    range(name, min, max)
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { name, value })
    }
}

fn unit(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfUnitRange { name, value })
    }
}
