//! The particle lifecycle controller.
//!
//! [`ParticleSystem`] owns a recyclable pool, a seeded noise field, and a
//! scene style, and drives the SPAWNING -> ALIVE -> RECYCLING -> SPAWNING
//! cycle: spawn fills a pooled slot, the per-frame update integrates
//! noise-driven motion and derives visuals, and any particle that leaves
//! the visible domain (or outlives its assigned lifetime) is released and
//! immediately replaced, so the alive population stays constant for the
//! system's whole running life.
//!
//! Single-threaded by construction: one logical owner calls `update` once
//! per frame, and all motion scales by the frame delta rather than the
//! frame count.

use crate::particle::Particle;
use crate::style::ParticleStyle;
use crate::wind::{Wind, WindConfig};
use glam::DVec2;
use nocturne_core::{NoiseField, ObjectPool, PoolHandle, PoolStats, SceneError, Xorshift64};
use std::f64::consts::TAU;

/// Span of the random per-particle noise offset. Large relative to any
/// viewport so offset particles sample unrelated regions of the field.
const NOISE_OFFSET_SPAN: f64 = 10_000.0;

/// Where steady-state replacements enter the domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RespawnEdge {
    /// Enter from above (falling scenes).
    Top,
    /// Enter from below.
    Bottom,
    /// Enter from the left (horizontally flowing scenes).
    Left,
    /// Enter from the right.
    Right,
    /// Re-enter anywhere in the domain (lifetime-bounded scenes).
    Inside,
}

/// Tuning for a particle system.
#[derive(Debug, Clone)]
pub struct ParticleSystemConfig {
    /// Steady-state alive particle count.
    pub count: usize,
    /// Distance past the domain bounds before a particle is recycled, and
    /// the band outside the domain where edge respawns land.
    pub margin: f64,
    /// Multiplier applied to the unit flow-field vector, units/second.
    pub drift_strength: f64,
    /// Spatial frequency of the flow field.
    pub spatial_scale: f64,
    /// Temporal frequency of the flow field.
    pub time_scale: f64,
    /// Lifetime range in seconds; `None` recycles on domain exit only.
    pub lifetime: Option<(f64, f64)>,
    /// Where replacements spawn.
    pub respawn_edge: RespawnEdge,
    /// Global wind force; `None` disables it.
    pub wind: Option<WindConfig>,
    /// Hard cap on pool growth; `None` grows without bound (the
    /// availability-over-memory default).
    pub max_pool_size: Option<usize>,
}

impl Default for ParticleSystemConfig {
    fn default() -> Self {
        Self {
            count: 200,
            margin: 60.0,
            drift_strength: 20.0,
            spatial_scale: 0.002,
            time_scale: 0.25,
            lifetime: None,
            respawn_edge: RespawnEdge::Top,
            wind: None,
            max_pool_size: None,
        }
    }
}

impl ParticleSystemConfig {
    fn validate(&self) -> Result<(), SceneError> {
        if !self.margin.is_finite() || self.margin < 0.0 {
            return Err(SceneError::InvalidConfig(format!(
                "margin must be finite and non-negative, got {}",
                self.margin
            )));
        }
        if !self.drift_strength.is_finite() {
            return Err(SceneError::InvalidConfig(
                "drift_strength must be finite".to_string(),
            ));
        }
        if let Some((lo, hi)) = self.lifetime {
            if !(lo > 0.0 && hi >= lo) {
                return Err(SceneError::InvalidConfig(format!(
                    "lifetime range ({lo}, {hi}) must satisfy 0 < lo <= hi"
                )));
            }
        }
        Ok(())
    }
}

/// Particle lifecycle controller: pool + noise field + style.
pub struct ParticleSystem {
    config: ParticleSystemConfig,
    style: Box<dyn ParticleStyle>,
    pool: ObjectPool<Particle>,
    noise: NoiseField,
    rng: Xorshift64,
    wind: Option<Wind>,
    alive: Vec<PoolHandle>,
    width: f64,
    height: f64,
}

impl ParticleSystem {
    /// Creates a system and spawns its initial population uniformly inside
    /// the domain.
    ///
    /// Returns [`SceneError::InvalidDimensions`] for a non-positive
    /// viewport and [`SceneError::InvalidConfig`] for out-of-range tuning.
    pub fn new(
        config: ParticleSystemConfig,
        style: Box<dyn ParticleStyle>,
        seed: u64,
        width: f64,
        height: f64,
    ) -> Result<Self, SceneError> {
        if !(width > 0.0 && height > 0.0) {
            return Err(SceneError::InvalidDimensions);
        }
        config.validate()?;
        let pool = match config.max_pool_size {
            Some(max) => {
                ObjectPool::with_capacity_limit(Particle::default, config.count.min(max), max)
            }
            None => ObjectPool::new(Particle::default, config.count),
        };
        let mut system = Self {
            noise: NoiseField::new((seed ^ (seed >> 32)) as u32),
            rng: Xorshift64::new(seed),
            wind: config.wind.map(Wind::new),
            pool,
            alive: Vec::with_capacity(config.count),
            width,
            height,
            config,
            style,
        };
        for _ in 0..system.config.count {
            if system.spawn(false).is_none() {
                break;
            }
        }
        Ok(system)
    }

    /// Spawns one particle into the alive set: at the configured respawn
    /// edge when `at_edge`, else uniformly inside the domain (initial fill).
    ///
    /// Returns `None` only when a capped pool is exhausted.
    pub fn spawn(&mut self, at_edge: bool) -> Option<PoolHandle> {
        let handle = self.spawn_slot(at_edge)?;
        self.alive.push(handle);
        Some(handle)
    }

    /// Advances every alive particle by one frame.
    ///
    /// `delta` is wall-clock seconds since the previous frame and scales
    /// all motion; `elapsed` is seconds since start and drives the flow
    /// field's time axis and the style oscillators.
    pub fn update(&mut self, delta: f64, elapsed: f64) {
        if let Some(wind) = self.wind.as_mut() {
            wind.update(delta, elapsed, &mut self.rng);
        }
        let wind_force = self.wind.as_ref().map_or(DVec2::ZERO, Wind::current);
        let margin = self.config.margin;
        let (width, height) = (self.width, self.height);
        let drift_strength = self.config.drift_strength;
        let spatial_scale = self.config.spatial_scale;
        let time_scale = self.config.time_scale;

        // Forward walk with in-place replacement on recycle, so no entry
        // is skipped or visited twice within the frame.
        let mut i = 0;
        while i < self.alive.len() {
            let handle = self.alive[i];
            let mut recycle = false;
            if let Some(p) = self.pool.get_mut(handle) {
                let sample = p.pos + p.noise_offset;
                let drift = self
                    .noise
                    .flow(sample.x, sample.y, elapsed, spatial_scale, time_scale)
                    * drift_strength;
                p.vel = self.style.base_velocity(p, elapsed) + drift + wind_force;
                p.pos += p.vel * delta;
                p.age += delta;
                self.style.update_visuals(p, elapsed);
                let outside = p.pos.x < -margin
                    || p.pos.x > width + margin
                    || p.pos.y < -margin
                    || p.pos.y > height + margin;
                recycle = outside || p.expired();
            }
            if recycle {
                self.pool.release(handle);
                // A slot was just freed, so this only fails for a capped
                // pool that shrank under us; drop the entry in that case.
                match self.spawn_slot(true) {
                    Some(replacement) => {
                        self.alive[i] = replacement;
                        i += 1;
                    }
                    None => {
                        self.alive.swap_remove(i);
                    }
                }
            } else {
                i += 1;
            }
        }

        // Near (large, fast) particles draw after far ones. Full stable
        // re-sort each frame; populations are hundreds, not millions.
        let pool = &self.pool;
        self.alive.sort_by(|a, b| {
            let da = pool.get(*a).map_or(0.0, |p| p.depth);
            let db = pool.get(*b).map_or(0.0, |p| p.depth);
            da.total_cmp(&db)
        });
    }

    /// Alive particles in ascending depth order (far to near).
    pub fn particles(&self) -> impl Iterator<Item = &Particle> {
        self.alive.iter().filter_map(|h| self.pool.get(*h))
    }

    /// Handles of the alive set, in draw order.
    pub fn handles(&self) -> &[PoolHandle] {
        &self.alive
    }

    /// Shared access to one alive particle.
    pub fn particle(&self, handle: PoolHandle) -> Option<&Particle> {
        self.pool.get(handle)
    }

    /// Mutable access to one alive particle.
    pub fn particle_mut(&mut self, handle: PoolHandle) -> Option<&mut Particle> {
        self.pool.get_mut(handle)
    }

    /// Number of alive particles.
    pub fn len(&self) -> usize {
        self.alive.len()
    }

    /// True when no particles are alive.
    pub fn is_empty(&self) -> bool {
        self.alive.is_empty()
    }

    /// Pool occupancy counts.
    pub fn stats(&self) -> PoolStats {
        self.pool.stats()
    }

    /// Current domain size.
    pub fn domain(&self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }

    /// Adopts a new viewport size. Existing particles keep their positions
    /// and drift naturally into the new bounds. Non-positive dimensions
    /// are ignored.
    pub fn set_domain(&mut self, width: f64, height: f64) {
        if width > 0.0 && height > 0.0 {
            self.width = width;
            self.height = height;
        }
    }

    /// Tears the system down: every pooled particle is reset and the pool
    /// is emptied for good. No `update` calls may follow.
    pub fn dispose(&mut self) {
        self.pool.dispose(Particle::reset);
        self.alive.clear();
    }

    /// Acquires and initializes a slot without alive-list bookkeeping.
    fn spawn_slot(&mut self, at_edge: bool) -> Option<PoolHandle> {
        let handle = self.pool.acquire()?;
        let margin = self.config.margin;
        let depth = self.rng.next_f64();
        let pos = if at_edge {
            match self.config.respawn_edge {
                RespawnEdge::Top => DVec2::new(
                    self.rng.next_range(-margin, self.width + margin),
                    -margin,
                ),
                RespawnEdge::Bottom => DVec2::new(
                    self.rng.next_range(-margin, self.width + margin),
                    self.height + margin,
                ),
                RespawnEdge::Left => {
                    DVec2::new(-margin, self.rng.next_range(0.0, self.height))
                }
                RespawnEdge::Right => DVec2::new(
                    self.width + margin,
                    self.rng.next_range(0.0, self.height),
                ),
                RespawnEdge::Inside => DVec2::new(
                    self.rng.next_range(0.0, self.width),
                    self.rng.next_range(0.0, self.height),
                ),
            }
        } else {
            DVec2::new(
                self.rng.next_range(0.0, self.width),
                self.rng.next_range(0.0, self.height),
            )
        };
        let lifetime = match self.config.lifetime {
            Some((lo, hi)) => self.rng.next_range(lo, hi).max(lo),
            None => f64::INFINITY,
        };
        let noise_offset = DVec2::new(
            self.rng.next_range(0.0, NOISE_OFFSET_SPAN),
            self.rng.next_range(0.0, NOISE_OFFSET_SPAN),
        );
        let phase = self.rng.next_range(0.0, TAU);
        let domain = DVec2::new(self.width, self.height);
        if let Some(p) = self.pool.get_mut(handle) {
            p.reset();
            p.pos = pos;
            p.depth = depth;
            p.lifetime = lifetime;
            p.noise_offset = noise_offset;
            p.phase = phase;
            self.style.on_spawn(p, &mut self.rng, domain);
        }
        Some(handle)
    }
}
