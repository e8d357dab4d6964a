//! Configuration errors
//!
//! Painting has no failure modes; the only thing that can be rejected is a
//! `Settings` value that cannot drive the simulation.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{name}: min {min} is greater than max {max}")]
    InvertedRange {
        name: &'static str,
        min: f32,
        max: f32,
    },

    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f32 },

    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: f32 },

    #[error("{name} must lie in [0, 1], got {value}")]
    OutOfUnitRange { name: &'static str, value: f32 },

    #[error("an explosion needs at least one shard")]
    NoShards,

    #[error("star palette is empty")]
    EmptyPalette,
}
