//! The pooled particle entity.

use glam::DVec2;
use nocturne_core::Srgb;

/// One recyclable particle.
///
/// Depth is assigned once at spawn and stays fixed until the particle is
/// recycled; age only grows between spawns. Alpha, scale, and rotation are
/// transient values re-derived every frame by the owning style.
#[derive(Debug, Clone)]
pub struct Particle {
    /// Position in viewport coordinates.
    pub pos: DVec2,
    /// Velocity in viewport units per second, recomputed each frame.
    pub vel: DVec2,
    /// Parallax depth in [0, 1]; 1 is nearest (larger, faster, brighter).
    pub depth: f64,
    /// Seconds since spawn.
    pub age: f64,
    /// Assigned lifespan in seconds; infinite for boundary-recycled
    /// particles.
    pub lifetime: f64,
    /// Per-entity offset added to flow-field sample coordinates so
    /// particles sharing one noise field do not move in lockstep.
    pub noise_offset: DVec2,
    /// Per-entity random phase fed to every oscillator, preventing visible
    /// synchronization between same-frequency particles.
    pub phase: f64,
    /// Derived opacity in [0, 1].
    pub alpha: f64,
    /// Derived render scale.
    pub scale: f64,
    /// Derived rotation in radians.
    pub rotation: f64,
    /// Tint drawn from the scene palette at spawn.
    pub color: Srgb,
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            pos: DVec2::ZERO,
            vel: DVec2::ZERO,
            depth: 0.0,
            age: 0.0,
            lifetime: f64::INFINITY,
            noise_offset: DVec2::ZERO,
            phase: 0.0,
            alpha: 1.0,
            scale: 1.0,
            rotation: 0.0,
            color: Srgb::WHITE,
        }
    }
}

impl Particle {
    /// Restores spawn-ready defaults. Called when a slot is recycled.
    pub fn reset(&mut self) {
        *self = Particle::default();
    }

    /// Age as a fraction of lifetime, clamped to [0, 1]. Zero for
    /// infinite-lifetime particles.
    pub fn life_fraction(&self) -> f64 {
        if self.lifetime.is_finite() && self.lifetime > 0.0 {
            (self.age / self.lifetime).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// True once age has reached the assigned lifetime.
    pub fn expired(&self) -> bool {
        self.age >= self.lifetime
    }
}
