//! Built-in drawable behaviors

use crate::render::{DrawList, MeshDraw, Region, SpriteDraw};
use crate::resources::{MaterialHandle, MeshHandle, ResourceLoader, ShaderHandle, TextureHandle};
use crate::scene::behavior::Behavior;
use crate::scene::{NodeId, Scene};

/// Draws a textured quad at its 2D node's global transform.
///
/// The quad is as large as the texture in pixels, centred on the node.
/// Without a texture nothing is drawn.
#[derive(Debug, Clone, Default)]
pub struct Sprite2D {
    /// Texture to show
    pub texture: Option<TextureHandle>,
    /// Shader override
    pub shader: Option<ShaderHandle>,
    /// Part of the texture to show
    pub region: Region,
}

impl Sprite2D {
    /// Sprite showing the whole texture with the default shader
    pub fn new(texture: TextureHandle) -> Self {
        Self {
            texture: Some(texture),
            ..Self::default()
        }
    }

    /// Sprite whose texture comes from a loader. A failed load leaves the
    /// sprite blank.
    pub fn from_path(loader: &mut dyn ResourceLoader, path: &str) -> Self {
        let texture = loader.load_texture(path);
        if texture.is_none() {
            log::warn!("Sprite texture '{}' is unavailable", path);
        }
        Self {
            texture,
            ..Self::default()
        }
    }

    /// Use a custom shader
    pub fn with_shader(mut self, shader: ShaderHandle) -> Self {
        self.shader = Some(shader);
        self
    }

    /// Show only part of the texture
    pub fn with_region(mut self, region: Region) -> Self {
        self.region = region;
        self
    }
}

impl Behavior for Sprite2D {
    fn on_draw(&mut self, scene: &Scene, id: NodeId, draws: &mut DrawList) {
        let Some(texture) = self.texture else {
            return;
        };
        let Some(transform) = scene.global_transform_2d(id) else {
            return;
        };
        draws.push_sprite(SpriteDraw {
            texture,
            shader: self.shader,
            transform,
            region: self.region,
        });
    }
}

/// Draws a mesh at its 3D node's global transform
#[derive(Debug, Clone, Default)]
pub struct MeshInstance3D {
    /// Mesh to draw; nothing is drawn without one
    pub mesh: Option<MeshHandle>,
    /// Material, or the backend's default
    pub material: Option<MaterialHandle>,
}

impl MeshInstance3D {
    /// Mesh with no material
    pub fn new(mesh: MeshHandle) -> Self {
        Self {
            mesh: Some(mesh),
            material: None,
        }
    }

    /// Attach a material
    pub fn with_material(mut self, material: MaterialHandle) -> Self {
        self.material = Some(material);
        self
    }
}

impl Behavior for MeshInstance3D {
    fn on_draw(&mut self, scene: &Scene, id: NodeId, draws: &mut DrawList) {
        let (Some(mesh), Some(transform)) = (self.mesh, scene.global_transform_3d(id)) else {
            return;
        };
        draws.push_mesh(MeshDraw {
            mesh,
            material: self.material,
            transform,
        });
    }
}
