//! Per-frame draw requests
//!
//! The scene's update pass appends to a [`DrawList`] in resolved draw order.
//! The renderer consumes it afterwards, so no draw state outlives a frame.

use crate::foundation::math::{Mat3, Mat4};
use crate::resources::{MaterialHandle, MeshHandle, ShaderHandle, TextureHandle};

/// Source rectangle in normalized texture coordinates, origin at the top-left
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Region {
    /// The whole texture
    pub const FULL: Self = Self { x: 0.0, y: 0.0, width: 1.0, height: 1.0 };

    /// Create a region
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Corners in top-left, bottom-left, bottom-right, top-right order
    pub fn corners(&self) -> [[f32; 2]; 4] {
        let right = self.x + self.width;
        let bottom = self.y + self.height;
        [
            [self.x, self.y],
            [self.x, bottom],
            [right, bottom],
            [right, self.y],
        ]
    }
}

impl Default for Region {
    fn default() -> Self {
        Self::FULL
    }
}

/// One textured quad
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteDraw {
    /// Texture sampled by the quad; its size sets the quad size
    pub texture: TextureHandle,
    /// Shader override; the batch's built-in sprite shader when `None`
    pub shader: Option<ShaderHandle>,
    /// Global 2D affine of the drawing node
    pub transform: Mat3,
    /// Part of the texture to show
    pub region: Region,
}

/// One mesh draw, issued directly to the backend
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshDraw {
    /// Mesh to draw
    pub mesh: MeshHandle,
    /// Optional material
    pub material: Option<MaterialHandle>,
    /// Global 3D affine of the drawing node
    pub transform: Mat4,
}

/// Draw requests collected during one update pass
#[derive(Debug, Default, Clone)]
pub struct DrawList {
    sprites: Vec<SpriteDraw>,
    meshes: Vec<MeshDraw>,
}

impl DrawList {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a sprite
    pub fn push_sprite(&mut self, sprite: SpriteDraw) {
        self.sprites.push(sprite);
    }

    /// Queue a mesh
    pub fn push_mesh(&mut self, mesh: MeshDraw) {
        self.meshes.push(mesh);
    }

    /// Sprites in draw order
    pub fn sprites(&self) -> &[SpriteDraw] {
        &self.sprites
    }

    /// Meshes in issue order
    pub fn meshes(&self) -> &[MeshDraw] {
        &self.meshes
    }

    /// Whether nothing was queued
    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty() && self.meshes.is_empty()
    }

    /// Drop all requests, keeping the allocations
    pub fn clear(&mut self) {
        self.sprites.clear();
        self.meshes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_corner_order() {
        let region = Region::new(0.25, 0.5, 0.25, 0.5);
        assert_eq!(
            region.corners(),
            [[0.25, 0.5], [0.25, 1.0], [0.5, 1.0], [0.5, 0.5]]
        );
    }

    #[test]
    fn test_clear_keeps_list_usable() {
        let mut list = DrawList::new();
        list.push_mesh(MeshDraw {
            mesh: MeshHandle(1),
            material: None,
            transform: Mat4::identity(),
        });
        assert!(!list.is_empty());

        list.clear();
        assert!(list.is_empty());
    }
}
