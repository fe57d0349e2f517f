//! # Scene Engine
//!
//! A node-tree scene core with cached hierarchical transforms, z-index and
//! y-sort draw ordering, and a batched 2D sprite renderer.
//!
//! ## Features
//!
//! - **Node Tree**: Arena-backed nodes with lifecycle hooks
//! - **Transforms**: Lazily computed, memoized 2D and 3D global transforms
//! - **Draw Ordering**: Z-index layers and y-sorted scopes
//! - **Sprite Batching**: Quads grouped by texture and shader into few draw calls
//! - **Pluggable Backend**: Any graphics API behind [`render::GpuBackend`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scene_engine::prelude::*;
//!
//! fn frame(tree: &mut SceneTree, renderer: &mut SceneRenderer, backend: &mut dyn GpuBackend)
//!     -> Result<(), RenderError>
//! {
//!     let draws = tree.process_frame();
//!     renderer.render(backend, &draws)?;
//!     Ok(())
//! }
//!
//! let mut tree = SceneTree::new(SceneTreeConfig::default());
//! let scene = tree.scene_mut();
//! let root = scene.create_node_2d("world");
//! let ship = scene.create_node_2d("ship");
//! scene.set_behavior(ship, Sprite2D::new(TextureHandle::new(1, 64, 64))).unwrap();
//! scene.add_child(root, ship).unwrap();
//! tree.set_root(root).unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod core;

pub mod config;
pub mod foundation;
pub mod input;
pub mod render;
pub mod resources;
pub mod scene;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        core::{ApplicationConfig, Config, EngineConfig, RendererConfig, SceneTreeConfig},
        foundation::{
            math::{Mat3, Mat4, Transform2D, Transform3D, Vec2, Vec3},
            time::{Stopwatch, Timer},
        },
        input::{InputEvent, KeyAction, KeyCode, MouseButton},
        render::{DrawList, GpuBackend, RenderError, SceneRenderer, SpriteBatch},
        resources::{ResourceLoader, TextureHandle},
        scene::{
            Behavior, MeshInstance3D, NodeId, Scene, SceneError, SceneTree, Sprite2D,
        },
    };
}
