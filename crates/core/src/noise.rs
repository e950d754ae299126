//! Seeded coherent-noise field with fractal composition and a time-varying
//! 2D flow-field sampling mode.
//!
//! [`NoiseField`] wraps a seeded Perlin generator behind single-octave
//! samplers (2D/3D/4D), fractal (FBM) layering, and [`NoiseField::flow`],
//! which pairs two decorrelated fractal samples into a smoothly time-varying
//! vector field suitable for wind and drift forces.
//!
//! All sampling is read-only and deterministic: a fixed seed and fixed
//! inputs return bit-identical values across instances. There is no shared
//! default instance; every consumer owns or receives its own field.

use glam::DVec2;
use noise::{NoiseFn, Perlin};

/// Coordinate offset applied to the second flow sample so the two
/// components of the vector field are uncorrelated.
const FLOW_DECORRELATION_OFFSET: f64 = 1000.0;

/// Octave count used by [`NoiseField::flow`].
const FLOW_OCTAVES: u32 = 3;
/// Frequency multiplier between flow octaves.
const FLOW_LACUNARITY: f64 = 2.0;
/// Amplitude multiplier between flow octaves.
const FLOW_PERSISTENCE: f64 = 0.5;

/// Deterministic multi-dimensional coherent-noise generator.
///
/// Immutable after construction and safe to share across readers
/// (`Send + Sync`); every query only reads the internal permutation table.
#[derive(Debug, Clone)]
pub struct NoiseField {
    perlin: Perlin,
    seed: u32,
}

impl NoiseField {
    /// Creates a noise field from a seed.
    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
            seed,
        }
    }

    /// The seed this field was constructed with.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Single-octave 2D sample in [-1, 1], smooth across lattice boundaries.
    pub fn sample2(&self, x: f64, y: f64) -> f64 {
        self.perlin.get([x, y])
    }

    /// Single-octave 3D sample in [-1, 1].
    pub fn sample3(&self, x: f64, y: f64, z: f64) -> f64 {
        self.perlin.get([x, y, z])
    }

    /// Single-octave 4D sample in [-1, 1].
    pub fn sample4(&self, x: f64, y: f64, z: f64, w: f64) -> f64 {
        self.perlin.get([x, y, z, w])
    }

    /// Fractal (FBM) 2D noise: `octaves` layers at geometrically increasing
    /// frequency (`* lacunarity` per layer, starting at `scale`) and
    /// decreasing amplitude (`* persistence` per layer, starting at 1),
    /// normalized by the accumulated amplitude so the result stays in
    /// [-1, 1] for any octave count.
    ///
    /// `octaves` must be at least 1; 0 octaves has no defined normalization
    /// and is a caller error. `lacunarity` and `persistence` are passed
    /// through unclamped.
    pub fn fractal2(
        &self,
        x: f64,
        y: f64,
        octaves: u32,
        lacunarity: f64,
        persistence: f64,
        scale: f64,
    ) -> f64 {
        debug_assert!(octaves >= 1, "fractal2 requires octaves >= 1");
        let mut sum = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = scale;
        let mut total_amplitude = 0.0;
        for _ in 0..octaves {
            sum += self.perlin.get([x * frequency, y * frequency]) * amplitude;
            total_amplitude += amplitude;
            amplitude *= persistence;
            frequency *= lacunarity;
        }
        sum / total_amplitude
    }

    /// Fractal (FBM) 3D noise; same layering and normalization as
    /// [`NoiseField::fractal2`].
    pub fn fractal3(
        &self,
        x: f64,
        y: f64,
        z: f64,
        octaves: u32,
        lacunarity: f64,
        persistence: f64,
        scale: f64,
    ) -> f64 {
        debug_assert!(octaves >= 1, "fractal3 requires octaves >= 1");
        let mut sum = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = scale;
        let mut total_amplitude = 0.0;
        for _ in 0..octaves {
            sum += self
                .perlin
                .get([x * frequency, y * frequency, z * frequency])
                * amplitude;
            total_amplitude += amplitude;
            amplitude *= persistence;
            frequency *= lacunarity;
        }
        sum / total_amplitude
    }

    /// Samples the flow field at `(x, y)` and `time`, returning a drift
    /// vector with both components in [-1, 1].
    ///
    /// The two components are independent [`NoiseField::fractal3`] samples
    /// of `(x * spatial_scale, y * spatial_scale, time * time_scale)`; the
    /// second sample's spatial inputs are shifted by a fixed large offset
    /// so the pair behaves as a 2D vector field rather than a duplicated
    /// scalar.
    pub fn flow(
        &self,
        x: f64,
        y: f64,
        time: f64,
        spatial_scale: f64,
        time_scale: f64,
    ) -> DVec2 {
        let sx = x * spatial_scale;
        let sy = y * spatial_scale;
        let t = time * time_scale;
        let dx = self.fractal3(sx, sy, t, FLOW_OCTAVES, FLOW_LACUNARITY, FLOW_PERSISTENCE, 1.0);
        let dy = self.fractal3(
            sx + FLOW_DECORRELATION_OFFSET,
            sy + FLOW_DECORRELATION_OFFSET,
            t,
            FLOW_OCTAVES,
            FLOW_LACUNARITY,
            FLOW_PERSISTENCE,
            1.0,
        );
        DVec2::new(dx, dy)
    }
}
