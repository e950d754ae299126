#![deny(unsafe_code)]
//! Scene registry: maps scene names to implementations.
//!
//! This crate sits between `nocturne-core` (which defines the `Scene` trait)
//! and the individual scene crates (`nocturne-snow`, etc.). Embedders depend
//! on this crate to avoid duplicating dispatch logic.

use nocturne_aurora::AuroraBands;
use nocturne_core::{Scene, SceneContext, SceneError};
use nocturne_particles::ParticleSystem;
use nocturne_snow::Snowfall;
use nocturne_sparkle::SparkleField;
use serde_json::Value;

/// All available scene names.
const SCENE_NAMES: &[&str] = &["snowfall", "sparkles", "aurora"];

/// Enumeration of all available ambient scenes.
///
/// Wraps each scene implementation and delegates `Scene` trait methods.
/// Use [`SceneKind::from_name`] for string-based construction.
pub enum SceneKind {
    /// Depth-layered falling snow.
    Snowfall(Snowfall),
    /// Lifetime-bounded twinkling sparkles.
    Sparkles(SparkleField),
    /// Horizontally streaming aurora bands.
    Aurora(AuroraBands),
}

impl SceneKind {
    /// Constructs a scene by name.
    ///
    /// Returns `SceneError::UnknownScene` if the name is not recognized.
    pub fn from_name(name: &str, params: &Value, seed: u64) -> Result<Self, SceneError> {
        match name {
            "snowfall" => Ok(SceneKind::Snowfall(Snowfall::from_json(params, seed))),
            "sparkles" => Ok(SceneKind::Sparkles(SparkleField::from_json(params, seed))),
            "aurora" => Ok(SceneKind::Aurora(AuroraBands::from_json(params, seed))),
            _ => Err(SceneError::UnknownScene(name.to_string())),
        }
    }

    /// Returns a slice of all recognized scene names.
    pub fn list_scenes() -> &'static [&'static str] {
        SCENE_NAMES
    }

    /// The wrapped scene's particle system, once attached.
    pub fn system(&self) -> Option<&ParticleSystem> {
        match self {
            SceneKind::Snowfall(s) => s.system(),
            SceneKind::Sparkles(s) => s.system(),
            SceneKind::Aurora(s) => s.system(),
        }
    }
}

impl Scene for SceneKind {
    fn on_add(&mut self, ctx: &SceneContext) -> Result<(), SceneError> {
        match self {
            SceneKind::Snowfall(s) => s.on_add(ctx),
            SceneKind::Sparkles(s) => s.on_add(ctx),
            SceneKind::Aurora(s) => s.on_add(ctx),
        }
    }

    fn update(&mut self, delta: f64, elapsed: f64) {
        match self {
            SceneKind::Snowfall(s) => s.update(delta, elapsed),
            SceneKind::Sparkles(s) => s.update(delta, elapsed),
            SceneKind::Aurora(s) => s.update(delta, elapsed),
        }
    }

    fn on_resize(&mut self, width: f64, height: f64) {
        match self {
            SceneKind::Snowfall(s) => s.on_resize(width, height),
            SceneKind::Sparkles(s) => s.on_resize(width, height),
            SceneKind::Aurora(s) => s.on_resize(width, height),
        }
    }

    fn on_destroy(&mut self) {
        match self {
            SceneKind::Snowfall(s) => s.on_destroy(),
            SceneKind::Sparkles(s) => s.on_destroy(),
            SceneKind::Aurora(s) => s.on_destroy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_name_builds_every_listed_scene() {
        for name in SceneKind::list_scenes() {
            let scene = SceneKind::from_name(name, &json!({}), 42);
            assert!(scene.is_ok(), "scene {name} failed to construct");
        }
    }

    #[test]
    fn from_name_unknown_returns_error() {
        let result = SceneKind::from_name("nonexistent", &json!({}), 42);
        assert!(matches!(result, Err(SceneError::UnknownScene(_))));
    }

    #[test]
    fn list_scenes_names_all_three() {
        let names = SceneKind::list_scenes();
        assert_eq!(names.len(), 3);
        assert!(names.contains(&"snowfall"));
        assert!(names.contains(&"sparkles"));
        assert!(names.contains(&"aurora"));
    }

    #[test]
    fn trait_delegation_runs_the_full_lifecycle() {
        for name in SceneKind::list_scenes() {
            let mut scene = SceneKind::from_name(name, &json!({}), 7).unwrap();
            assert!(scene.system().is_none());
            scene.on_add(&SceneContext::new(800.0, 600.0)).unwrap();
            assert!(scene.system().is_some_and(|s| !s.is_empty()));
            for frame in 0..10 {
                scene.update(1.0 / 60.0, frame as f64 / 60.0);
            }
            scene.on_resize(1024.0, 768.0);
            scene.on_destroy();
            assert!(scene.system().is_none());
        }
    }

    #[test]
    fn params_flow_through_to_the_scene() {
        let mut scene = SceneKind::from_name("snowfall", &json!({ "count": 12 }), 1).unwrap();
        scene.on_add(&SceneContext::new(640.0, 480.0)).unwrap();
        assert_eq!(scene.system().unwrap().len(), 12);
    }

    #[test]
    fn on_add_rejects_degenerate_dimensions() {
        let mut scene = SceneKind::from_name("snowfall", &json!({}), 1).unwrap();
        let result = scene.on_add(&SceneContext::new(0.0, 480.0));
        assert!(matches!(result, Err(SceneError::InvalidDimensions)));
    }
}
