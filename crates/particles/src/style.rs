//! Per-scene particle behavior hooks.
//!
//! The lifecycle controller owns motion integration, recycling, and depth
//! ordering; everything scene-specific (intrinsic velocity, palette choice,
//! twinkle/wobble/pulse visuals) goes through a [`ParticleStyle`]. Styles
//! are trait objects so one controller type serves every subsystem.

use crate::particle::Particle;
use glam::DVec2;
use nocturne_core::Xorshift64;

/// Scene-specific particle behavior, dispatched through `Box<dyn ParticleStyle>`.
pub trait ParticleStyle: Send + Sync {
    /// Finishes initializing a freshly spawned particle. The controller has
    /// already assigned position, depth, lifetime, noise offset, and phase;
    /// the style derives depth-scaled visuals, picks a color, and may
    /// adjust the spawn position within `domain` (width, height).
    fn on_spawn(&self, particle: &mut Particle, rng: &mut Xorshift64, domain: DVec2);

    /// Intrinsic depth-scaled velocity, before flow-field drift and wind
    /// are added.
    fn base_velocity(&self, particle: &Particle, elapsed: f64) -> DVec2;

    /// Re-derives the transient visuals (alpha, scale, rotation) from age,
    /// depth, and the particle's oscillator phase.
    fn update_visuals(&self, particle: &mut Particle, elapsed: f64);
}
