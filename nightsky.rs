//! nightsky - Particle-field animator for decorative page backgrounds
//! No heap allocation, no_std compatible
//!
//! Two scenes share one loop: a starfield with twinkling stars and shooting
//! stars, and a fireworks field of rising particles that burst into shards.
//! The host supplies a [`Surface`] to paint on and a [`FrameScheduler`] that
//! calls [`Animator::paint_frame`] once per display refresh.

#![cfg_attr(not(test), no_std)]

pub mod animator;
pub mod clock;
pub mod color;
#[cfg(feature = "embedded-graphics")]
pub mod display;
pub mod error;
pub mod particle;
pub mod renderer;
pub mod rng;
pub mod scheduler;
pub mod settings;
pub mod simulation;
pub mod spawner;
pub mod store;
pub mod surface;

#[cfg(test)]
mod testing;

pub use animator::Animator;
pub use clock::{FrameClock, TickGate};
pub use color::{Rgb, Rgba, Tint};
#[cfg(feature = "embedded-graphics")]
pub use display::GraphicsSurface;
pub use error::ConfigError;
pub use particle::{Falling, FadeIn, Particle, Rising, ShootingStar, Star, Twinkle};
pub use scheduler::{FrameScheduler, Subscription};
pub use settings::{FireworksSettings, Scene, Settings, StarfieldSettings};
pub use store::ParticleStore;
pub use surface::{Bounds, RenderContext, Surface};
