#![deny(unsafe_code)]
//! Aurora band scene.
//!
//! Wisps stream left to right in a handful of horizontal bands across the
//! upper part of the viewport. Each wisp is pinned to one band at spawn
//! with vertical jitter, so the bands read as soft ribbons rather than
//! hard stripes, and a slow alpha pulse makes the curtain breathe.

use glam::DVec2;
use nocturne_core::params::{param_f64, param_usize};
use nocturne_core::{Scene, SceneContext, SceneError, WeightedPalette, Xorshift64};
use nocturne_particles::{
    Particle, ParticleStyle, ParticleSystem, ParticleSystemConfig, RespawnEdge,
};
use serde_json::Value;

/// Steady-state wisp count.
const DEFAULT_COUNT: usize = 180;
/// Horizontal streaming speed at depth 1, px/s.
const DEFAULT_FLOW_SPEED: f64 = 55.0;
/// Flow-field drift multiplier; kept small so bands hold their shape.
const DEFAULT_DRIFT_STRENGTH: f64 = 14.0;
/// Number of horizontal bands.
const BAND_COUNT: usize = 5;
/// Bands fill this fraction of the viewport height, measured from the top.
const BAND_REGION: f64 = 0.6;
/// Vertical jitter inside a band, as a fraction of the band height.
const BAND_JITTER: f64 = 0.8;
/// Alpha pulse angular frequency, rad/s.
const PULSE_FREQUENCY: f64 = 0.4;
/// Recycle margin; wide so long wisps never pop at the screen edge.
const DOMAIN_MARGIN: f64 = 120.0;

/// Tunable aurora parameters.
#[derive(Debug, Clone)]
pub struct AuroraParams {
    /// Number of wisps kept alive.
    pub count: usize,
    /// Horizontal streaming speed, px/s.
    pub flow_speed: f64,
    /// Flow-field drift multiplier.
    pub drift_strength: f64,
}

impl Default for AuroraParams {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            flow_speed: DEFAULT_FLOW_SPEED,
            drift_strength: DEFAULT_DRIFT_STRENGTH,
        }
    }
}

impl AuroraParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        Self {
            count: param_usize(params, "count", DEFAULT_COUNT),
            flow_speed: param_f64(params, "flow_speed", DEFAULT_FLOW_SPEED),
            drift_strength: param_f64(params, "drift_strength", DEFAULT_DRIFT_STRENGTH),
        }
    }
}

/// Pins each wisp to a band at spawn and streams it horizontally.
struct AuroraStyle {
    palette: WeightedPalette,
    flow_speed: f64,
}

impl AuroraStyle {
    /// Band centre for `band`, in viewport-height fractions.
    fn band_center(band: usize) -> f64 {
        BAND_REGION * (band as f64 + 0.5) / BAND_COUNT as f64
    }
}

impl ParticleStyle for AuroraStyle {
    fn on_spawn(&self, particle: &mut Particle, rng: &mut Xorshift64, domain: DVec2) {
        let band = rng.next_usize(BAND_COUNT);
        let band_height = domain.y * BAND_REGION / BAND_COUNT as f64;
        let jitter = rng.next_range(-0.5, 0.5) * BAND_JITTER * band_height;
        particle.pos.y = domain.y * Self::band_center(band) + jitter;
        particle.color = self.palette.pick(rng);
        particle.scale = 1.0 + 2.5 * particle.depth;
        particle.alpha = 0.0;
    }

    fn base_velocity(&self, particle: &Particle, _elapsed: f64) -> DVec2 {
        // Deeper wisps stream faster, giving the curtain parallax.
        DVec2::new(self.flow_speed * (0.4 + 0.6 * particle.depth), 0.0)
    }

    fn update_visuals(&self, particle: &mut Particle, elapsed: f64) {
        let pulse = 0.5 + 0.5 * (elapsed * PULSE_FREQUENCY + particle.phase).sin();
        particle.alpha = (0.15 + 0.5 * particle.depth) * (0.5 + 0.5 * pulse);
    }
}

/// Horizontally streaming aurora scene.
pub struct AuroraBands {
    params: AuroraParams,
    seed: u64,
    system: Option<ParticleSystem>,
}

impl AuroraBands {
    /// Creates the scene; the particle system is built on `on_add`.
    pub fn new(params: AuroraParams, seed: u64) -> Self {
        Self {
            params,
            seed,
            system: None,
        }
    }

    /// Creates the scene from a JSON params object.
    pub fn from_json(params: &Value, seed: u64) -> Self {
        Self::new(AuroraParams::from_json(params), seed)
    }

    /// The underlying particle system, once attached.
    pub fn system(&self) -> Option<&ParticleSystem> {
        self.system.as_ref()
    }

    fn palette() -> WeightedPalette {
        WeightedPalette::from_hex(&[
            ("#52ffb8", 0.45),
            ("#2ad4c8", 0.3),
            ("#7a5cff", 0.15),
            ("#b48cff", 0.1),
        ])
        .expect("aurora palette hex values are valid")
    }
}

impl Scene for AuroraBands {
    fn on_add(&mut self, ctx: &SceneContext) -> Result<(), SceneError> {
        let config = ParticleSystemConfig {
            count: self.params.count,
            margin: DOMAIN_MARGIN,
            drift_strength: self.params.drift_strength,
            spatial_scale: 0.0015,
            time_scale: 0.15,
            lifetime: None,
            respawn_edge: RespawnEdge::Left,
            wind: None,
            max_pool_size: None,
        };
        let style = AuroraStyle {
            palette: Self::palette(),
            flow_speed: self.params.flow_speed,
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
