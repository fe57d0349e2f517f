//! Scene tree
//!
//! Nodes form a single-rooted tree stored in a [`Scene`] arena. Each node
//! may be plain, 2D or 3D, and may carry a [`Behavior`] whose hooks the
//! tree invokes as nodes enter and leave it and once per frame.
//!
//! ## Frame flow
//!
//! ```text
//! SceneTree::step(delta)
//!      ↓
//! propagate_update (children first)
//!      ├─ 2D draw roots: on_draw in z / y-sort order → DrawList
//!      └─ 3D nodes: on_draw after on_update         → DrawList
//!      ↓
//! SceneRenderer::render(backend, &draws)
//! ```

mod behavior;
mod draw_order;
mod error;
mod lifecycle;
mod node;
mod renderables;
mod spatial_2d;
mod spatial_3d;
mod transform_cache;
mod tree;

#[cfg(test)]
mod tests;

pub use behavior::{downcast_mut, downcast_ref, AsAny, Behavior};
pub use error::{SceneError, SceneResult};
pub use node::{KindTag, Node, NodeId, NodeKind, Scene};
pub use renderables::{MeshInstance3D, Sprite2D};
pub use spatial_2d::{Node2DMut, Node2DRef, Spatial2D};
pub use spatial_3d::{Node3DMut, Node3DRef, Spatial3D};
pub use tree::SceneTree;
