//! Frame driver for a scene

use crate::core::SceneTreeConfig;
use crate::foundation::time::Timer;
use crate::input::InputEvent;
use crate::render::DrawList;
use crate::scene::{NodeId, Scene, SceneResult};

/// Owns a [`Scene`] and drives it one frame at a time.
///
/// Dropping the tree removes its root, so every resident node sees its exit
/// hook exactly once.
#[derive(Debug)]
pub struct SceneTree {
    scene: Scene,
    timer: Timer,
    config: SceneTreeConfig,
    frames: u64,
}

impl Default for SceneTree {
    fn default() -> Self {
        Self::new(SceneTreeConfig::default())
    }
}

impl SceneTree {
    /// Create a tree around an empty scene
    pub fn new(config: SceneTreeConfig) -> Self {
        Self::with_scene(Scene::new(), config)
    }

    /// Create a tree around an existing scene
    pub fn with_scene(scene: Scene, config: SceneTreeConfig) -> Self {
        Self {
            scene,
            timer: Timer::new(),
            config,
            frames: 0,
        }
    }

    /// Node storage
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Mutable node storage
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Frame driver settings
    pub fn config(&self) -> &SceneTreeConfig {
        &self.config
    }

    /// Current root
    pub fn root(&self) -> Option<NodeId> {
        self.scene.root()
    }

    /// Install the root; its subtree enters the tree
    pub fn set_root(&mut self, id: NodeId) -> SceneResult<()> {
        self.scene.set_root(id)?;
        self.timer.reset();
        Ok(())
    }

    /// Frames stepped so far
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Step using wall-clock time since the previous frame
    pub fn process_frame(&mut self) -> DrawList {
        let delta = self.timer.tick();
        self.step(delta)
    }

    /// Step with an explicit frame delta
    pub fn step(&mut self, delta: f32) -> DrawList {
        let mut draws = DrawList::new();
        self.step_into(delta, &mut draws);
        draws
    }

    /// Step with an explicit frame delta, appending draws to `draws`
    pub fn step_into(&mut self, delta: f32, draws: &mut DrawList) {
        let delta = self.config.clamp_delta(delta);
        if let Some(root) = self.scene.root() {
            self.scene.propagate_update(root, delta, draws);
        }
        self.frames += 1;
        log::trace!("Frame {} stepped with delta {:.4}", self.frames, delta);
    }

    /// Deliver an input event to the whole tree
    pub fn dispatch_input(&mut self, event: &InputEvent) {
        if let Some(root) = self.scene.root() {
            self.scene.propagate_input(root, event);
        }
    }

    /// Remove the root from the tree. The nodes stay allocated.
    pub fn terminate(&mut self) {
        if let Some(root) = self.scene.root() {
            log::info!("Terminating scene tree after {} frames", self.frames);
            self.scene.remove_from_scene(root);
        }
    }
}

impl Drop for SceneTree {
    fn drop(&mut self) {
        self.terminate();
    }
}
