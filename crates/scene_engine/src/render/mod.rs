//! Rendering system
//!
//! The scene core talks to graphics hardware only through [`GpuBackend`].
//! A frame's draws are collected into a [`DrawList`] by the scene update
//! pass and submitted by a [`SceneRenderer`], which batches sprites with a
//! [`SpriteBatch`].

pub mod backend;
pub mod batch_renderer;
pub mod draw_list;
pub mod scene_renderer;

#[cfg(test)]
pub(crate) mod testing;

pub use backend::{BackendResult, BufferId, GpuBackend, VertexAttribute};
pub use batch_renderer::{BatchState, BatchStats, SpriteBatch};
pub use draw_list::{DrawList, MeshDraw, Region, SpriteDraw};
pub use scene_renderer::{FrameStats, SceneRenderer};

/// Result type for rendering operations
pub type RenderResult<T> = Result<T, RenderError>;

/// Rendering errors
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The backend rejected an operation
    #[error("Backend error: {0}")]
    Backend(String),

    /// Shader compilation or linking failed
    #[error("Shader compilation failed: {0}")]
    ShaderCompilation(String),

    /// Renderer configuration is unusable
    #[error("Invalid renderer configuration: {0}")]
    InvalidConfig(String),

    /// A batch grew past what one draw call can address
    #[error("Batch of {0} quads exceeds the index range")]
    BatchOverflow(usize),
}
