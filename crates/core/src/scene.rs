//! The scene lifecycle contract between particle-driven subsystems and the
//! host composition layer.
//!
//! Every visual subsystem implements [`Scene`] explicitly; there is no
//! optional-method probing. The host calls `on_add` once at attach time
//! (supplying viewport dimensions), `update` once per rendered frame,
//! `on_resize` on viewport changes, and `on_destroy` once at teardown.
//!
//! The trait is object-safe so the layering container can hold
//! `Box<dyn Scene>` values and dispatch uniformly.

use crate::error::SceneError;

/// Viewport context handed to a scene when it is attached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneContext {
    /// Viewport width in logical pixels.
    pub width: f64,
    /// Viewport height in logical pixels.
    pub height: f64,
}

impl SceneContext {
    /// Creates a context. Dimensions are validated by `Scene::on_add`, not
    /// here, so hosts can construct the context before layout settles.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Lifecycle capability interface for ambient visual subsystems.
pub trait Scene {
    /// Called once when the scene is attached. Sizes the particle pool and
    /// performs the initial fill from the viewport dimensions.
    ///
    /// Returns [`SceneError::InvalidDimensions`] when width or height is
    /// not strictly positive.
    fn on_add(&mut self, ctx: &SceneContext) -> Result<(), SceneError>;

    /// Called once per rendered frame. `delta` is wall-clock seconds since
    /// the previous frame; `elapsed` is wall-clock seconds since start.
    /// Always runs to completion; never fails.
    fn update(&mut self, delta: f64, elapsed: f64);

    /// Called when the viewport changes. Scenes update their visible
    /// domain and let existing particles drift naturally rather than
    /// repositioning them.
    fn on_resize(&mut self, width: f64, height: f64);

    /// Called once at teardown; disposes the particle pool. No further
    /// calls may follow.
    fn on_destroy(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal implementation used to verify the trait contract shape.
    struct CountingScene {
        added: bool,
        frames: usize,
        size: (f64, f64),
        destroyed: bool,
    }

    impl CountingScene {
        fn new() -> Self {
            Self {
                added: false,
                frames: 0,
                size: (0.0, 0.0),
                destroyed: false,
            }
        }
    }

    impl Scene for CountingScene {
        fn on_add(&mut self, ctx: &SceneContext) -> Result<(), SceneError> {
            if ctx.width <= 0.0 || ctx.height <= 0.0 {
                return Err(SceneError::InvalidDimensions);
            }
            self.added = true;
            self.size = (ctx.width, ctx.height);
            Ok(())
        }

        fn update(&mut self, _delta: f64, _elapsed: f64) {
            self.frames += 1;
        }

        fn on_resize(&mut self, width: f64, height: f64) {
            self.size = (width, height);
        }

        fn on_destroy(&mut self) {
            self.destroyed = true;
        }
    }

    #[test]
    fn scene_trait_is_object_safe() {
        let mut scene: Box<dyn Scene> = Box::new(CountingScene::new());
        scene.on_add(&SceneContext::new(800.0, 600.0)).unwrap();
        scene.update(1.0 / 60.0, 0.0);
        scene.on_resize(1024.0, 768.0);
        scene.on_destroy();
    }

    #[test]
    fn lifecycle_calls_reach_the_implementation() {
        let mut scene = CountingScene::new();
        scene.on_add(&SceneContext::new(320.0, 240.0)).unwrap();
        assert!(scene.added);
        scene.update(0.016, 0.016);
        scene.update(0.016, 0.032);
        assert_eq!(scene.frames, 2);
        scene.on_resize(640.0, 480.0);
        assert_eq!(scene.size, (640.0, 480.0));
        scene.on_destroy();
        assert!(scene.destroyed);
    }

    #[test]
    fn non_positive_dimensions_are_rejected_at_add() {
        let mut scene = CountingScene::new();
        for (w, h) in [(0.0, 600.0), (800.0, 0.0), (-1.0, 600.0)] {
            let result = scene.on_add(&SceneContext::new(w, h));
            assert!(
                matches!(result, Err(SceneError::InvalidDimensions)),
                "({w}, {h}) accepted"
            );
        }
    }
}
