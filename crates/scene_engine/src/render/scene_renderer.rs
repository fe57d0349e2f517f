//! Frame submission
//!
//! Turns the [`DrawList`] produced by one scene update into backend calls:
//! sprites go through the [`SpriteBatch`], meshes are issued directly.

use crate::core::config::RendererConfig;
use crate::foundation::time::Stopwatch;
use crate::render::backend::GpuBackend;
use crate::render::batch_renderer::{BatchStats, SpriteBatch};
use crate::render::draw_list::DrawList;
use crate::render::RenderResult;

/// Statistics for one submitted frame
#[derive(Debug, Clone, Default)]
pub struct FrameStats {
    /// Sprite batching statistics
    pub batches: BatchStats,

    /// Meshes drawn
    pub meshes: usize,

    /// Time spent submitting (microseconds)
    pub submission_time_us: u64,
}

/// Renders scene draw lists through a backend
#[derive(Debug)]
pub struct SceneRenderer {
    batch: SpriteBatch,
    last_frame: FrameStats,
}

impl SceneRenderer {
    /// Create a renderer and its sprite batch
    pub fn new(backend: &mut dyn GpuBackend, config: &RendererConfig) -> RenderResult<Self> {
        Ok(Self {
            batch: SpriteBatch::new(backend, config)?,
            last_frame: FrameStats::default(),
        })
    }

    /// Submit one frame. Meshes are drawn before sprites so 2D content
    /// overlays the 3D scene.
    pub fn render(&mut self, backend: &mut dyn GpuBackend, draws: &DrawList) -> RenderResult<FrameStats> {
        let stopwatch = Stopwatch::start_new();

        for mesh in draws.meshes() {
            backend.draw_mesh(mesh.mesh, mesh.material, &mesh.transform)?;
        }

        self.batch.begin_frame();
        for sprite in draws.sprites() {
            self.batch.draw(backend, sprite)?;
        }
        let batches = self.batch.end_frame(backend)?;

        self.last_frame = FrameStats {
            batches,
            meshes: draws.meshes().len(),
            submission_time_us: stopwatch.elapsed_micros(),
        };
        log::trace!(
            "Frame submitted: {} meshes, {} quads in {} draw calls",
            self.last_frame.meshes,
            self.last_frame.batches.quads,
            self.last_frame.batches.flushes
        );
        Ok(self.last_frame.clone())
    }

    /// The sprite batch
    pub fn batch(&self) -> &SpriteBatch {
        &self.batch
    }

    /// Statistics of the last submitted frame
    pub fn last_frame(&self) -> &FrameStats {
        &self.last_frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Mat3, Mat4};
    use crate::render::draw_list::{MeshDraw, Region, SpriteDraw};
    use crate::render::testing::RecordingBackend;
    use crate::render::RenderError;
    use crate::resources::{MeshHandle, TextureHandle};

    #[test]
    fn test_meshes_and_sprites_submitted() {
        let mut backend = RecordingBackend::default();
        let mut renderer = SceneRenderer::new(&mut backend, &RendererConfig::default()).expect("renderer");

        let mut draws = DrawList::new();
        draws.push_mesh(MeshDraw { mesh: MeshHandle(3), material: None, transform: Mat4::identity() });
        for _ in 0..3 {
            draws.push_sprite(SpriteDraw {
                texture: TextureHandle::new(1, 16, 16),
                shader: None,
                transform: Mat3::identity(),
                region: Region::FULL,
            });
        }

        let stats = renderer.render(&mut backend, &draws).expect("render");
        assert_eq!(stats.meshes, 1);
        assert_eq!(stats.batches.quads, 3);
        assert_eq!(stats.batches.flushes, 1);
        assert_eq!(backend.mesh_draws(), vec![MeshHandle(3)]);
        assert_eq!(renderer.last_frame().batches.flushes, 1);
    }

    #[test]
    fn test_backend_failure_propagates() {
        let mut backend = RecordingBackend::default();
        let mut renderer = SceneRenderer::new(&mut backend, &RendererConfig::default()).expect("renderer");
        backend.fail_draws = true;

        let mut draws = DrawList::new();
        draws.push_sprite(SpriteDraw {
            texture: TextureHandle::new(1, 16, 16),
            shader: None,
            transform: Mat3::identity(),
            region: Region::FULL,
        });

        assert!(matches!(renderer.render(&mut backend, &draws), Err(RenderError::Backend(_))));
    }
}
