#![deny(unsafe_code)]
//! Falling-snow scene.
//!
//! Flakes enter along the top edge, fall at a depth-scaled rate, sway
//! sideways on a phase-shifted sine, and spin slowly. Flow-field drift and
//! the global wind push the fall off the vertical so the motion never
//! reads as a straight rain of dots. Flakes recycle on domain exit; the
//! population is constant for the scene's lifetime.

use glam::DVec2;
use nocturne_core::params::{param_bool, param_f64, param_usize};
use nocturne_core::{Scene, SceneContext, SceneError, WeightedPalette, Xorshift64};
use nocturne_particles::{
    Particle, ParticleStyle, ParticleSystem, ParticleSystemConfig, RespawnEdge, WindConfig,
};
use serde_json::Value;
use std::f64::consts::TAU;

/// Steady-state flake count.
const DEFAULT_COUNT: usize = 220;
/// Fall speed at depth 1, viewport units/second.
const DEFAULT_FALL_SPEED: f64 = 90.0;
/// Peak sideways sway speed at depth 1.
const DEFAULT_SWAY: f64 = 24.0;
/// Flow-field drift multiplier.
const DEFAULT_DRIFT_STRENGTH: f64 = 18.0;
/// Recycle margin around the viewport.
const DOMAIN_MARGIN: f64 = 60.0;
/// Sway oscillator angular frequency, rad/s.
const SWAY_FREQUENCY: f64 = 0.9;
/// Spin rate at depth 1, rad/s.
const SPIN_RATE: f64 = 0.8;

/// Tunable snowfall parameters.
#[derive(Debug, Clone)]
pub struct SnowfallParams {
    /// Number of flakes kept alive.
    pub count: usize,
    /// Fall speed at depth 1.
    pub fall_speed: f64,
    /// Peak sway speed at depth 1.
    pub sway: f64,
    /// Flow-field drift multiplier.
    pub drift_strength: f64,
    /// Whether the slowly varying global wind is enabled.
    pub wind: bool,
}

impl Default for SnowfallParams {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            fall_speed: DEFAULT_FALL_SPEED,
            sway: DEFAULT_SWAY,
            drift_strength: DEFAULT_DRIFT_STRENGTH,
            wind: true,
        }
    }
}

impl SnowfallParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        Self {
            count: param_usize(params, "count", DEFAULT_COUNT),
            fall_speed: param_f64(params, "fall_speed", DEFAULT_FALL_SPEED),
            sway: param_f64(params, "sway", DEFAULT_SWAY),
            drift_strength: param_f64(params, "drift_strength", DEFAULT_DRIFT_STRENGTH),
            wind: param_bool(params, "wind", true),
        }
    }
}

/// Depth-scaled fall, sway, and spin.
struct SnowStyle {
    palette: WeightedPalette,
    fall_speed: f64,
    sway: f64,
}

impl ParticleStyle for SnowStyle {
    fn on_spawn(&self, particle: &mut Particle, rng: &mut Xorshift64, _domain: DVec2) {
        particle.color = self.palette.pick(rng);
        particle.scale = 0.6 + 1.8 * particle.depth;
        particle.alpha = 0.35 + 0.65 * particle.depth;
        particle.rotation = rng.next_range(0.0, TAU);
    }

    fn base_velocity(&self, particle: &Particle, elapsed: f64) -> DVec2 {
        let fall = self.fall_speed * (0.35 + 0.65 * particle.depth);
        let sway = (elapsed * SWAY_FREQUENCY + particle.phase).sin()
            * self.sway
            * (0.4 + 0.6 * particle.depth);
        DVec2::new(sway, fall)
    }

    fn update_visuals(&self, particle: &mut Particle, elapsed: f64) {
        particle.rotation =
            particle.phase + elapsed * SPIN_RATE * (0.3 + 0.7 * particle.depth);
        particle.alpha = 0.35 + 0.65 * particle.depth;
    }
}

/// Falling-snow scene.
pub struct Snowfall {
    params: SnowfallParams,
    seed: u64,
    system: Option<ParticleSystem>,
}

impl Snowfall {
    /// Creates the scene; the particle system is built on `on_add` when
    /// the viewport is known.
    pub fn new(params: SnowfallParams, seed: u64) -> Self {
        Self {
            params,
            seed,
            system: None,
        }
    }

    /// Creates the scene from a JSON params object.
    pub fn from_json(params: &Value, seed: u64) -> Self {
        Self::new(SnowfallParams::from_json(params), seed)
    }

    /// The underlying particle system, once attached.
    pub fn system(&self) -> Option<&ParticleSystem> {
        self.system.as_ref()
    }

    fn palette() -> WeightedPalette {
        WeightedPalette::from_hex(&[
            ("#ffffff", 0.7),
            ("#eaf3ff", 0.2),
            ("#d7e8ff", 0.1),
        ])
        .expect("snow palette hex values are valid")
    }
}

impl Scene for Snowfall {
    fn on_add(&mut self, ctx: &SceneContext) -> Result<(), SceneError> {
        let config = ParticleSystemConfig {
            count: self.params.count,
            margin: DOMAIN_MARGIN,
            drift_strength: self.params.drift_strength,
            spatial_scale: 0.003,
            time_scale: 0.2,
            lifetime: None,
            respawn_edge: RespawnEdge::Top,
            wind: self.params.wind.then(|| WindConfig {
                strength: 26.0,
                retarget_interval: 7.0,
                blend_rate: 0.6,
            }),
            max_pool_size: None,
        };
        let style = SnowStyle {
            palette: Self::palette(),
            fall_speed: self.params.fall_speed,
            sway: self.params.sway,
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

#[cfg(test)]
mod tests {
    use super::*;

    fn attached(seed: u64) -> Snowfall {
        let mut scene = Snowfall::new(SnowfallParams::default(), seed);
        scene.on_add(&SceneContext::new(800.0, 600.0)).unwrap();
        scene
    }

    #[test]
    fn on_add_fills_the_configured_population() {
        let scene = attached(42);
        assert_eq!(scene.system().unwrap().len(), DEFAULT_COUNT);
    }

    #[test]
    fn on_add_rejects_zero_viewport() {
        let mut scene = Snowfall::new(SnowfallParams::default(), 1);
        let result = scene.on_add(&SceneContext::new(0.0, 600.0));
        assert!(matches!(result, Err(SceneError::InvalidDimensions)));
    }

    #[test]
    fn population_constant_across_frames() {
        let mut scene = attached(9);
        for frame in 0..240 {
            scene.update(1.0 / 60.0, frame as f64 / 60.0);
            assert_eq!(scene.system().unwrap().len(), DEFAULT_COUNT);
        }
    }

    #[test]
    fn flakes_fall_downward_on_average() {
        let mut scene = attached(7);
        let before: f64 = scene.system().unwrap().particles().map(|p| p.pos.y).sum();
        for frame in 0..60 {
            scene.update(1.0 / 60.0, frame as f64 / 60.0);
        }
        let after: f64 = scene.system().unwrap().particles().map(|p| p.pos.y).sum();
        // Recycling pulls exited flakes back to the top, so compare sums
        // over a window short enough that most flakes stay in view.
        assert!(
            after > before,
            "mean flake y did not increase: {before} -> {after}"
        );
    }

    #[test]
    fn flake_visuals_stay_in_range() {
        let mut scene = attached(3);
        for frame in 0..120 {
            scene.update(1.0 / 60.0, frame as f64 / 60.0);
        }
        for p in scene.system().unwrap().particles() {
            assert!((0.0..=1.0).contains(&p.alpha), "alpha = {}", p.alpha);
            assert!(p.scale > 0.0, "scale = {}", p.scale);
        }
    }

    #[test]
    fn from_json_overrides_defaults() {
        let params = serde_json::json!({
            "count": 40,
            "fall_speed": 150.0,
            "wind": false
        });
        let mut scene = Snowfall::from_json(&params, 5);
        scene.on_add(&SceneContext::new(640.0, 480.0)).unwrap();
        assert_eq!(scene.system().unwrap().len(), 40);
    }

    #[test]
    fn destroy_disposes_the_system() {
        let mut scene = attached(11);
        scene.on_destroy();
        assert!(scene.system().is_none());
    }

    #[test]
    fn resize_updates_domain_without_dropping_flakes() {
        let mut scene = attached(13);
        scene.on_resize(1280.0, 720.0);
        let system = scene.system().unwrap();
        assert_eq!(system.domain(), DVec2::new(1280.0, 720.0));
        assert_eq!(system.len(), DEFAULT_COUNT);
    }
}
