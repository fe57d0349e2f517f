//! Backend abstraction traits for the rendering system
//!
//! This module defines the narrow interface a graphics API wrapper must
//! provide. The batched sprite renderer and the 3D mesh pass are its only
//! callers.

use crate::foundation::math::Mat4;
use crate::render::RenderError;
use crate::resources::{MaterialHandle, MeshHandle, ShaderHandle, TextureHandle};

/// Result type for backend operations
pub type BackendResult<T> = Result<T, RenderError>;

/// Identifier of a vertex buffer object owned by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferId(pub u32);

/// Per-vertex attribute streams used by the sprite batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexAttribute {
    /// Two floats per vertex, transformed position
    Position,
    /// Two floats per vertex, texture coordinate
    TexCoord,
}

impl VertexAttribute {
    /// Number of floats per vertex for this attribute
    pub fn components(self) -> usize {
        match self {
            Self::Position | Self::TexCoord => 2,
        }
    }
}

/// Rendering API abstraction
pub trait GpuBackend {
    /// Create an empty vertex buffer object
    fn create_vertex_buffer(&mut self) -> BackendResult<BufferId>;

    /// Allocate or overwrite one attribute stream of a buffer
    fn update_attribute(
        &mut self,
        buffer: BufferId,
        attribute: VertexAttribute,
        data: &[f32],
    ) -> BackendResult<()>;

    /// Replace the index data of a buffer
    fn set_index_data(&mut self, buffer: BufferId, indices: &[u32]) -> BackendResult<()>;

    /// Issue one indexed draw call over the first `index_count` indices
    fn draw_indexed(&mut self, buffer: BufferId, index_count: u32) -> BackendResult<()>;

    /// Compile and link a shader program from source
    fn compile_shader(&mut self, vertex_source: &str, fragment_source: &str)
        -> BackendResult<ShaderHandle>;

    /// Make a shader program current
    fn bind_shader(&mut self, shader: ShaderHandle) -> BackendResult<()>;

    /// Upload an RGBA8 pixel buffer as a texture
    fn create_texture(&mut self, pixels: &[u8], width: u32, height: u32)
        -> BackendResult<TextureHandle>;

    /// Make a texture current
    fn bind_texture(&mut self, texture: TextureHandle) -> BackendResult<()>;

    /// Draw a mesh with a material at the given world transform
    fn draw_mesh(
        &mut self,
        mesh: MeshHandle,
        material: Option<MaterialHandle>,
        transform: &Mat4,
    ) -> BackendResult<()>;
}
