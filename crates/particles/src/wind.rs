//! Slowly varying global wind force.
//!
//! The wind holds a current vector that chases a target vector; the target
//! is re-randomized on a fixed cadence and the chase rate is scaled by the
//! frame delta, so direction changes arrive as gradual swings rather than
//! abrupt jumps.

use glam::DVec2;
use nocturne_core::Xorshift64;

/// Tuning for the global wind force.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindConfig {
    /// Maximum magnitude of each target component, viewport units/second.
    pub strength: f64,
    /// Seconds between target re-randomizations.
    pub retarget_interval: f64,
    /// Fraction of the remaining gap closed per second.
    pub blend_rate: f64,
}

impl Default for WindConfig {
    fn default() -> Self {
        Self {
            strength: 30.0,
            retarget_interval: 6.0,
            blend_rate: 0.8,
        }
    }
}

/// Global wind state owned by a particle system.
#[derive(Debug, Clone)]
pub struct Wind {
    config: WindConfig,
    current: DVec2,
    target: DVec2,
    next_retarget: f64,
}

impl Wind {
    /// Creates a calm wind; the first retarget happens on the first update.
    pub fn new(config: WindConfig) -> Self {
        Self {
            config,
            current: DVec2::ZERO,
            target: DVec2::ZERO,
            next_retarget: 0.0,
        }
    }

    /// Advances the wind by one frame.
    pub fn update(&mut self, delta: f64, elapsed: f64, rng: &mut Xorshift64) {
        if elapsed >= self.next_retarget {
            let s = self.config.strength;
            self.target = DVec2::new(rng.next_range(-s, s), rng.next_range(-s, s));
            self.next_retarget = elapsed + self.config.retarget_interval;
        }
        // Clamp the step so a long frame cannot overshoot the target.
        let blend = (self.config.blend_rate * delta).min(1.0);
        self.current += (self.target - self.current) * blend;
    }

    /// The force currently applied to particles.
    pub fn current(&self) -> DVec2 {
        self.current
    }

    /// The vector the wind is drifting toward.
    pub fn target(&self) -> DVec2 {
        self.target
    }
}
