//! # Batch Renderer
//!
//! Groups consecutive sprite draws that share a texture and shader into one
//! vertex upload and one indexed draw call.
//!
//! ## Flush rules
//!
//! A batch is flushed when the next sprite's texture or shader differs from
//! the accumulating batch, when the batch reaches its quad capacity, and at
//! the end of the frame if anything is left.
//!
//! ## Quad layout
//!
//! Each quad contributes four vertices in top-left, bottom-left,
//! bottom-right, top-right order and six indices (two triangles). The index
//! buffer is generated once for the full capacity and never re-uploaded.

use bytemuck::cast_slice;

use crate::core::config::RendererConfig;
use crate::foundation::math::{Mat3, Point2};
use crate::render::backend::{BufferId, GpuBackend, VertexAttribute};
use crate::render::draw_list::{Region, SpriteDraw};
use crate::render::{RenderError, RenderResult};
use crate::resources::{ShaderHandle, TextureHandle};

/// Vertex stage of the built-in sprite shader
pub const SPRITE_VERTEX_SHADER: &str = r"#version 330 core
layout(location = 0) in vec2 a_position;
layout(location = 1) in vec2 a_uv;
uniform mat4 u_projection;
out vec2 v_uv;
void main() {
    v_uv = a_uv;
    gl_Position = u_projection * vec4(a_position, 0.0, 1.0);
}
";

/// Fragment stage of the built-in sprite shader
pub const SPRITE_FRAGMENT_SHADER: &str = r"#version 330 core
in vec2 v_uv;
uniform sampler2D u_texture;
out vec4 frag_color;
void main() {
    frag_color = texture(u_texture, v_uv);
}
";

const VERTICES_PER_QUAD: usize = 4;
const INDICES_PER_QUAD: usize = 6;

/// Where the batch is in its per-frame cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchState {
    /// Nothing accumulated
    Idle,
    /// At least one quad is waiting for a flush
    Accumulating,
    /// Uploading and drawing the current batch
    Flushing,
}

/// What a batch is keyed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct BatchKey {
    texture: TextureHandle,
    shader: ShaderHandle,
}

/// Statistics for one frame of batching
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchStats {
    /// Quads submitted
    pub quads: usize,

    /// Flushes performed, equal to the number of draw calls issued
    pub flushes: usize,

    /// Flushes caused by a texture or shader change
    pub state_changes: usize,

    /// Flushes caused by reaching capacity
    pub capacity_flushes: usize,
}

impl BatchStats {
    /// Calculate average quads per draw call
    #[allow(clippy::cast_precision_loss)]
    pub fn avg_quads_per_flush(&self) -> f32 {
        if self.flushes == 0 {
            0.0
        } else {
            self.quads as f32 / self.flushes as f32
        }
    }
}

/// Build the immutable index buffer for `max_quads` quads
pub fn quad_indices(max_quads: usize) -> Vec<u32> {
    let mut indices = Vec::with_capacity(max_quads * INDICES_PER_QUAD);
    for quad in 0..max_quads {
        #[allow(clippy::cast_possible_truncation)]
        let base = (quad * VERTICES_PER_QUAD) as u32;
        indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }
    indices
}

/// Corners of a texture-sized quad centred on the local origin, transformed
/// into the space of `transform`. Order matches [`Region::corners`].
#[allow(clippy::cast_precision_loss)]
pub fn quad_vertices(texture: TextureHandle, transform: &Mat3) -> [[f32; 2]; 4] {
    let half_width = texture.width as f32 * 0.5;
    let half_height = texture.height as f32 * 0.5;
    let local = [
        Point2::new(-half_width, half_height),
        Point2::new(-half_width, -half_height),
        Point2::new(half_width, -half_height),
        Point2::new(half_width, half_height),
    ];
    local.map(|corner| {
        let world = transform.transform_point(&corner);
        [world.x, world.y]
    })
}

/// Batched sprite renderer
///
/// Owned by the rendering system and fed one frame at a time; all of its
/// accumulation state is private to the instance.
#[derive(Debug)]
pub struct SpriteBatch {
    buffer: BufferId,
    default_shader: ShaderHandle,
    max_quads: usize,
    positions: Vec<[f32; 2]>,
    uvs: Vec<[f32; 2]>,
    quads: usize,
    current: Option<BatchKey>,
    state: BatchState,
    stats: BatchStats,
}

impl SpriteBatch {
    /// Create a batch renderer, compiling the built-in sprite shader and
    /// uploading the index buffer
    pub fn new(backend: &mut dyn GpuBackend, config: &RendererConfig) -> RenderResult<Self> {
        config
            .validate()
            .map_err(|e| RenderError::InvalidConfig(e.to_string()))?;

        let default_shader = backend.compile_shader(SPRITE_VERTEX_SHADER, SPRITE_FRAGMENT_SHADER)?;
        let buffer = backend.create_vertex_buffer()?;
        backend.set_index_data(buffer, &quad_indices(config.max_batch_quads))?;

        log::debug!(
            "Sprite batch ready: {} quads per batch, default shader {:?}",
            config.max_batch_quads,
            default_shader
        );

        Ok(Self {
            buffer,
            default_shader,
            max_quads: config.max_batch_quads,
            positions: Vec::new(),
            uvs: Vec::new(),
            quads: 0,
            current: None,
            state: BatchState::Idle,
            stats: BatchStats::default(),
        })
    }

    /// Reset per-frame statistics
    pub fn begin_frame(&mut self) {
        self.stats = BatchStats::default();
    }

    /// Queue one sprite, flushing first if it cannot join the current batch
    pub fn draw(&mut self, backend: &mut dyn GpuBackend, sprite: &SpriteDraw) -> RenderResult<()> {
        let key = BatchKey {
            texture: sprite.texture,
            shader: sprite.shader.unwrap_or(self.default_shader),
        };

        if self.quads > 0 && self.current != Some(key) {
            self.stats.state_changes += 1;
            self.flush(backend)?;
        }

        self.current = Some(key);
        self.push_quad(sprite.texture, &sprite.transform, &sprite.region);

        if self.quads == self.max_quads {
            self.stats.capacity_flushes += 1;
            self.flush(backend)?;
        }
        Ok(())
    }

    /// Flush whatever is left and return the frame's statistics
    pub fn end_frame(&mut self, backend: &mut dyn GpuBackend) -> RenderResult<BatchStats> {
        if self.quads > 0 {
            self.flush(backend)?;
        }
        self.current = None;
        Ok(self.stats.clone())
    }

    fn push_quad(&mut self, texture: TextureHandle, transform: &Mat3, region: &Region) {
        self.positions.extend_from_slice(&quad_vertices(texture, transform));
        self.uvs.extend_from_slice(&region.corners());
        self.quads += 1;
        self.stats.quads += 1;
        self.state = BatchState::Accumulating;
    }

    /// Submit the pending quads. The buffers are emptied and the batch goes
    /// back to idle whether or not the backend accepted them.
    fn flush(&mut self, backend: &mut dyn GpuBackend) -> RenderResult<()> {
        let Some(key) = self.current else {
            return Ok(());
        };
        self.state = BatchState::Flushing;

        let submitted = self.submit(backend, key);
        match &submitted {
            Ok(()) => {
                log::trace!("Flushed {} quads with {:?}", self.quads, key);
                self.stats.flushes += 1;
            }
            Err(e) => log::error!("Dropped {} quads with {:?}: {}", self.quads, key, e),
        }

        self.positions.clear();
        self.uvs.clear();
        self.quads = 0;
        self.state = BatchState::Idle;
        submitted
    }

    fn submit(&self, backend: &mut dyn GpuBackend, key: BatchKey) -> RenderResult<()> {
        backend.bind_shader(key.shader)?;
        backend.bind_texture(key.texture)?;
        backend.update_attribute(self.buffer, VertexAttribute::Position, cast_slice(&self.positions))?;
        backend.update_attribute(self.buffer, VertexAttribute::TexCoord, cast_slice(&self.uvs))?;

        let index_count = u32::try_from(self.quads * INDICES_PER_QUAD)
            .map_err(|_| RenderError::BatchOverflow(self.quads))?;
        backend.draw_indexed(self.buffer, index_count)
    }

    /// Current state of the accumulate/flush cycle
    pub fn state(&self) -> BatchState {
        self.state
    }

    /// Quads waiting for the next flush
    pub fn pending_quads(&self) -> usize {
        self.quads
    }

    /// Capacity in quads
    pub fn max_quads(&self) -> usize {
        self.max_quads
    }

    /// Shader used for sprites without an override
    pub fn default_shader(&self) -> ShaderHandle {
        self.default_shader
    }

    /// Statistics accumulated since [`SpriteBatch::begin_frame`]
    pub fn stats(&self) -> &BatchStats {
        &self.stats
    }
}
