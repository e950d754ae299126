//! Error types for the nocturne core.

use thiserror::Error;

/// Errors produced when constructing or configuring scenes.
///
/// Per-frame paths (`Scene::update`, pool acquire/release, noise sampling)
/// never return errors; everything fallible is validated at construction.
#[derive(Debug, Error)]
pub enum SceneError {
    /// Viewport width or height was not strictly positive.
    #[error("invalid dimensions: width and height must be positive")]
    InvalidDimensions,

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A weighted palette could not be constructed from the given entries.
    #[error("invalid palette: {0}")]
    InvalidPalette(String),

    /// A scene or particle-system configuration value was out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// A requested scene name was not recognized by the registry.
    #[error("unknown scene: {0}")]
    UnknownScene(String),
}
