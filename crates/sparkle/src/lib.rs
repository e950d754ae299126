#![deny(unsafe_code)]
//! Twinkling-sparkle scene.
//!
//! Lifetime-bounded motes that fade in, twinkle on a phase-shifted
//! oscillator, and fade back out before recycling anywhere in the domain.
//! Motion is dominated by flow-field drift with only a faint upward float,
//! so sparkles hang and wander rather than travel.

use glam::DVec2;
use nocturne_core::params::{param_f64, param_usize};
use nocturne_core::{Scene, SceneContext, SceneError, WeightedPalette, Xorshift64};
use nocturne_particles::{
    Particle, ParticleStyle, ParticleSystem, ParticleSystemConfig, RespawnEdge,
};
use serde_json::Value;

/// Steady-state sparkle count.
const DEFAULT_COUNT: usize = 140;
/// Twinkle oscillator angular frequency at depth 0, rad/s.
const DEFAULT_TWINKLE_FREQUENCY: f64 = 3.0;
/// Flow-field drift multiplier.
const DEFAULT_DRIFT_STRENGTH: f64 = 26.0;
/// Lifetime range in seconds.
const LIFETIME_RANGE: (f64, f64) = (2.5, 6.0);
/// Fraction of the lifetime spent fading in (and again fading out).
const FADE_FRACTION: f64 = 0.25;
/// Upward float speed at depth 1.
const FLOAT_SPEED: f64 = 5.0;
/// Recycle margin around the viewport.
const DOMAIN_MARGIN: f64 = 40.0;

/// Tunable sparkle parameters.
#[derive(Debug, Clone)]
pub struct SparkleParams {
    /// Number of sparkles kept alive.
    pub count: usize,
    /// Twinkle oscillator frequency, rad/s.
    pub twinkle_frequency: f64,
    /// Flow-field drift multiplier.
    pub drift_strength: f64,
}

impl Default for SparkleParams {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            twinkle_frequency: DEFAULT_TWINKLE_FREQUENCY,
            drift_strength: DEFAULT_DRIFT_STRENGTH,
        }
    }
}

impl SparkleParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        Self {
            count: param_usize(params, "count", DEFAULT_COUNT),
            twinkle_frequency: param_f64(
                params,
                "twinkle_frequency",
                DEFAULT_TWINKLE_FREQUENCY,
            ),
            drift_strength: param_f64(params, "drift_strength", DEFAULT_DRIFT_STRENGTH),
        }
    }
}

/// Fade-in/out envelope multiplied by a per-entity twinkle oscillator.
struct SparkleStyle {
    palette: WeightedPalette,
    twinkle_frequency: f64,
}

impl SparkleStyle {
    /// Trapezoid over the life fraction: ramp up over the first
    /// `FADE_FRACTION`, hold, ramp down over the last.
    fn envelope(life_fraction: f64) -> f64 {
        (life_fraction / FADE_FRACTION)
            .min((1.0 - life_fraction) / FADE_FRACTION)
            .clamp(0.0, 1.0)
    }
}

impl ParticleStyle for SparkleStyle {
    fn on_spawn(&self, particle: &mut Particle, rng: &mut Xorshift64, _domain: DVec2) {
        particle.color = self.palette.pick(rng);
        particle.scale = 0.4 + 1.2 * particle.depth;
        // Invisible until the first update applies the fade-in envelope.
        particle.alpha = 0.0;
    }

    fn base_velocity(&self, particle: &Particle, _elapsed: f64) -> DVec2 {
        DVec2::new(0.0, -FLOAT_SPEED * (0.3 + 0.7 * particle.depth))
    }

    fn update_visuals(&self, particle: &mut Particle, elapsed: f64) {
        let envelope = Self::envelope(particle.life_fraction());
        // Depth skews the twinkle frequency so no two depth layers beat
        // together; the random phase decorrelates entities within a layer.
        let twinkle = 0.5
            + 0.5
                * (elapsed * self.twinkle_frequency * (0.7 + 0.6 * particle.depth)
                    + particle.phase)
                    .sin();
        particle.alpha = (0.25 + 0.75 * particle.depth) * envelope * (0.4 + 0.6 * twinkle);
        particle.scale = (0.4 + 1.2 * particle.depth) * (0.85 + 0.3 * twinkle);
    }
}

/// Twinkling-sparkle scene.
pub struct SparkleField {
    params: SparkleParams,
    seed: u64,
    system: Option<ParticleSystem>,
}

impl SparkleField {
    /// Creates the scene; the particle system is built on `on_add`.
    pub fn new(params: SparkleParams, seed: u64) -> Self {
        Self {
            params,
            seed,
            system: None,
        }
    }

    /// Creates the scene from a JSON params object.
    pub fn from_json(params: &Value, seed: u64) -> Self {
        Self::new(SparkleParams::from_json(params), seed)
    }

    /// The underlying particle system, once attached.
    pub fn system(&self) -> Option<&ParticleSystem> {
        self.system.as_ref()
    }

    fn palette() -> WeightedPalette {
        WeightedPalette::from_hex(&[
            ("#fffbe8", 0.5),
            ("#ffe9a8", 0.3),
            ("#ffd56b", 0.2),
        ])
        .expect("sparkle palette hex values are valid")
    }
}

impl Scene for SparkleField {
    fn on_add(&mut self, ctx: &SceneContext) -> Result<(), SceneError> {
        let config = ParticleSystemConfig {
            count: self.params.count,
            margin: DOMAIN_MARGIN,
            drift_strength: self.params.drift_strength,
            spatial_scale: 0.004,
            time_scale: 0.35,
            lifetime: Some(LIFETIME_RANGE),
            respawn_edge: RespawnEdge::Inside,
            wind: None,
            max_pool_size: None,
        };
        let style = SparkleStyle {
            palette: Self::palette(),
            twinkle_frequency: self.params.twinkle_frequency,
        };
        self.system = Some(ParticleSystem::new(
            config,
            Box::new(style),
            self.seed,
            ctx.width,
            ctx.height,
        )?);
        Ok(())
    }

    fn update(&mut self, delta: f64, elapsed: f64) {
        if let Some(system) = &mut self.system {
            system.update(delta, elapsed);
        }
    }

    fn on_resize(&mut self, width: f64, height: f64) {
        if let Some(system) = &mut self.system {
            system.set_domain(width, height);
        }
    }

    fn on_destroy(&mut self) {
        if let Some(mut system) = self.system.take() {
            system.dispose();
        }
    }
}
