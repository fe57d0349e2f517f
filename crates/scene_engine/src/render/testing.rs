//! Recording backend used by unit tests

use crate::foundation::math::Mat4;
use crate::render::backend::{BackendResult, BufferId, GpuBackend, VertexAttribute};
use crate::render::RenderError;
use crate::resources::{MaterialHandle, MeshHandle, ShaderHandle, TextureHandle};

/// One captured backend call
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum BackendCall {
    CreateVertexBuffer(BufferId),
    UpdateAttribute {
        buffer: BufferId,
        attribute: VertexAttribute,
        data: Vec<f32>,
    },
    SetIndexData {
        buffer: BufferId,
        len: usize,
    },
    DrawIndexed {
        buffer: BufferId,
        index_count: u32,
    },
    BindShader(ShaderHandle),
    BindTexture(TextureHandle),
    DrawMesh {
        mesh: MeshHandle,
        material: Option<MaterialHandle>,
        transform: Mat4,
    },
}

/// Backend that records every call and never touches a GPU
#[derive(Debug, Default)]
pub(crate) struct RecordingBackend {
    pub calls: Vec<BackendCall>,
    pub compiled_shaders: u32,
    pub fail_draws: bool,
    next_id: u32,
}

impl RecordingBackend {
    fn next_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    pub fn draw_index_counts(&self) -> Vec<u32> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                BackendCall::DrawIndexed { index_count, .. } => Some(*index_count),
                _ => None,
            })
            .collect()
    }

    pub fn bound_textures(&self) -> Vec<TextureHandle> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                BackendCall::BindTexture(texture) => Some(*texture),
                _ => None,
            })
            .collect()
    }

    pub fn bound_shaders(&self) -> Vec<ShaderHandle> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                BackendCall::BindShader(shader) => Some(*shader),
                _ => None,
            })
            .collect()
    }

    fn uploads(&self, wanted: VertexAttribute) -> Vec<Vec<f32>> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                BackendCall::UpdateAttribute { attribute, data, .. } if *attribute == wanted => {
                    Some(data.clone())
                }
                _ => None,
            })
            .collect()
    }

    pub fn position_uploads(&self) -> Vec<Vec<f32>> {
        self.uploads(VertexAttribute::Position)
    }

    pub fn uv_uploads(&self) -> Vec<Vec<f32>> {
        self.uploads(VertexAttribute::TexCoord)
    }

    pub fn mesh_draws(&self) -> Vec<MeshHandle> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                BackendCall::DrawMesh { mesh, .. } => Some(*mesh),
                _ => None,
            })
            .collect()
    }
}

impl GpuBackend for RecordingBackend {
    fn create_vertex_buffer(&mut self) -> BackendResult<BufferId> {
        let buffer = BufferId(self.next_id());
        self.calls.push(BackendCall::CreateVertexBuffer(buffer));
        Ok(buffer)
    }

    fn update_attribute(
        &mut self,
        buffer: BufferId,
        attribute: VertexAttribute,
        data: &[f32],
    ) -> BackendResult<()> {
        self.calls.push(BackendCall::UpdateAttribute {
            buffer,
            attribute,
            data: data.to_vec(),
        });
        Ok(())
    }

    fn set_index_data(&mut self, buffer: BufferId, indices: &[u32]) -> BackendResult<()> {
        self.calls.push(BackendCall::SetIndexData { buffer, len: indices.len() });
        Ok(())
    }

    fn draw_indexed(&mut self, buffer: BufferId, index_count: u32) -> BackendResult<()> {
        if self.fail_draws {
            return Err(RenderError::Backend("draw rejected".to_string()));
        }
        self.calls.push(BackendCall::DrawIndexed { buffer, index_count });
        Ok(())
    }

    fn compile_shader(&mut self, _vertex: &str, _fragment: &str) -> BackendResult<ShaderHandle> {
        self.compiled_shaders += 1;
        Ok(ShaderHandle(self.next_id()))
    }

    fn bind_shader(&mut self, shader: ShaderHandle) -> BackendResult<()> {
        self.calls.push(BackendCall::BindShader(shader));
        Ok(())
    }

    fn create_texture(&mut self, _pixels: &[u8], width: u32, height: u32) -> BackendResult<TextureHandle> {
        Ok(TextureHandle::new(self.next_id(), width, height))
    }

    fn bind_texture(&mut self, texture: TextureHandle) -> BackendResult<()> {
        self.calls.push(BackendCall::BindTexture(texture));
        Ok(())
    }

    fn draw_mesh(
        &mut self,
        mesh: MeshHandle,
        material: Option<MaterialHandle>,
        transform: &Mat4,
    ) -> BackendResult<()> {
        self.calls.push(BackendCall::DrawMesh {
            mesh,
            material,
            transform: *transform,
        });
        Ok(())
    }
}
