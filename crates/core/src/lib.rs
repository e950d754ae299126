#![deny(unsafe_code)]
//! Core types for the nocturne ambient-scene engine.
//!
//! Provides the `Scene` lifecycle trait and `SceneContext`, the
//! `ObjectPool` recyclable arena, the seeded `NoiseField` coherent-noise
//! generator, `Srgb`/`WeightedPalette` color selection, the `Xorshift64`
//! PRNG, and JSON parameter helpers.

pub mod error;
pub mod noise;
pub mod palette;
pub mod params;
pub mod pool;
pub mod prng;
pub mod scene;

pub use error::SceneError;
pub use noise::NoiseField;
pub use palette::{Srgb, WeightedPalette};
pub use pool::{ObjectPool, PoolHandle, PoolStats};
pub use prng::Xorshift64;
pub use scene::{Scene, SceneContext};
