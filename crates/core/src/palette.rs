//! Colors and weighted palettes for particle tinting.
//!
//! A [`WeightedPalette`] maps a uniform random draw to a color according to
//! per-entry weights. The cumulative-distribution array is built once at
//! construction and every pick is a binary search, so per-spawn color
//! selection does not scale with palette size.

use crate::error::SceneError;
use crate::prng::Xorshift64;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// sRGB color with components in [0, 1].
///
/// Serializes as a `"#rrggbb"` hex string. The hex round-trip quantizes to
/// 8 bits per channel, which is what hex colors carry anyway.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Srgb {
    /// Opaque white, the neutral particle tint.
    pub const WHITE: Srgb = Srgb {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    /// Parses `"#rrggbb"` or `"rrggbb"` (case insensitive).
    pub fn from_hex(hex: &str) -> Result<Srgb, SceneError> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 {
            return Err(SceneError::InvalidColor(format!(
                "expected 6 hex digits, got {}",
                hex.len()
            )));
        }
        let channel = |range: std::ops::Range<usize>, name: &str| {
            u8::from_str_radix(&hex[range], 16)
                .map(|v| v as f64 / 255.0)
                .map_err(|e| SceneError::InvalidColor(format!("invalid {name} component: {e}")))
        };
        Ok(Srgb {
            r: channel(0..2, "red")?,
            g: channel(2..4, "green")?,
            b: channel(4..6, "blue")?,
        })
    }

    /// Formats as `"#rrggbb"`, rounding each channel to 8 bits.
    pub fn to_hex(self) -> String {
        let r = (self.r.clamp(0.0, 1.0) * 255.0).round() as u8;
        let g = (self.g.clamp(0.0, 1.0) * 255.0).round() as u8;
        let b = (self.b.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

impl Serialize for Srgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Srgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Srgb::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Palette sampled by weighted random draw.
///
/// Weights are assumed to sum to 1. A draw that falls past the last
/// cumulative bucket (possible when the weights under-sum, or from
/// floating-point drift) resolves to the last entry.
#[derive(Debug, Clone)]
pub struct WeightedPalette {
    colors: Vec<Srgb>,
    cumulative: Vec<f64>,
}

impl WeightedPalette {
    /// Builds a palette from `(color, weight)` entries.
    ///
    /// Requires at least one entry and non-negative weights.
    pub fn new(entries: Vec<(Srgb, f64)>) -> Result<Self, SceneError> {
        if entries.is_empty() {
            return Err(SceneError::InvalidPalette(
                "palette requires at least 1 entry".to_string(),
            ));
        }
        let mut colors = Vec::with_capacity(entries.len());
        let mut cumulative = Vec::with_capacity(entries.len());
        let mut running = 0.0;
        for (color, weight) in entries {
            if weight < 0.0 || !weight.is_finite() {
                return Err(SceneError::InvalidPalette(format!(
                    "weight {weight} is not a finite non-negative number"
                )));
            }
            running += weight;
            colors.push(color);
            cumulative.push(running);
        }
        Ok(Self { colors, cumulative })
    }

    /// Builds a palette from `(hex, weight)` entries.
    pub fn from_hex(entries: &[(&str, f64)]) -> Result<Self, SceneError> {
        let parsed: Result<Vec<(Srgb, f64)>, SceneError> = entries
            .iter()
            .map(|(hex, weight)| Srgb::from_hex(hex).map(|c| (c, *weight)))
            .collect();
        Self::new(parsed?)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false for constructed palettes.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Draws a color with probability proportional to its weight.
    pub fn pick(&self, rng: &mut Xorshift64) -> Srgb {
        self.pick_at(rng.next_f64())
    }

    /// Maps a draw `t` in [0, 1) to a color by binary search over the
    /// cumulative buckets. Past-the-end draws resolve to the last entry.
    pub fn pick_at(&self, t: f64) -> Srgb {
        let idx = self.cumulative.partition_point(|&edge| edge <= t);
        self.colors[idx.min(self.colors.len() - 1)]
    }
}
