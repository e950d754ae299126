#![deny(unsafe_code)]
//! Generic particle lifecycle controller for the nocturne engine.
//!
//! Builds the spawn / noise-driven-drift / recycle cycle that every
//! concrete scene (snow, sparkles, aurora) shares: a [`ParticleSystem`]
//! owns a recyclable [`nocturne_core::ObjectPool`] of [`Particle`]s plus a
//! [`nocturne_core::NoiseField`], and scene-specific behavior plugs in
//! through the [`ParticleStyle`] trait.

pub mod particle;
pub mod style;
pub mod system;
pub mod wind;

pub use particle::Particle;
pub use style::ParticleStyle;
pub use system::{ParticleSystem, ParticleSystemConfig, RespawnEdge};
pub use wind::{Wind, WindConfig};
