//! 3D spatial nodes
//!
//! Same caching rules as the 2D variant, with XYZ Euler rotation and 4x4
//! homogeneous affines. 3D nodes take no part in draw ordering.

use crate::foundation::math::{inverse_3d, Mat4, Point3, Transform3D, Vec3};
use crate::scene::node::NodeKind;
use crate::scene::transform_cache::TransformCache;
use crate::scene::{NodeId, Scene};

/// Transform state of a 3D node
#[derive(Debug)]
pub struct Spatial3D {
    position: Vec3,
    rotation: Vec3,
    scale: Vec3,
    pub(crate) cache: TransformCache<Mat4>,
}

impl Default for Spatial3D {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
            cache: TransformCache::default(),
        }
    }
}

impl Spatial3D {
    /// Position relative to the parent
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Euler rotation relative to the parent, in radians
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    /// Scale relative to the parent
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// The transform components as one value
    pub fn transform(&self) -> Transform3D {
        Transform3D {
            position: self.position,
            rotation: self.rotation,
            scale: self.scale,
        }
    }

    /// Translation * rotation * scale, memoized
    pub fn local_transform(&self) -> Mat4 {
        self.cache.local_or_compute(|| self.transform().to_matrix())
    }

    /// How many times the global transform has been recomputed
    pub fn global_computations(&self) -> u64 {
        self.cache.global_computations()
    }
}

impl Scene {
    pub(crate) fn spatial_3d(&self, id: NodeId) -> Option<&Spatial3D> {
        self.nodes.get(id).and_then(|node| node.as_spatial_3d())
    }

    fn spatial_3d_mut(&mut self, id: NodeId) -> Option<&mut Spatial3D> {
        match self.nodes.get_mut(id).map(|node| &mut node.kind) {
            Some(NodeKind::Spatial3D(data)) => Some(data),
            _ => None,
        }
    }

    fn parent_global_3d(&self, id: NodeId) -> Option<Mat4> {
        self.parent(id)
            .filter(|&parent| self.spatial_3d(parent).is_some())
            .and_then(|parent| self.global_transform_3d(parent))
    }

    /// Read access to a 3D node
    pub fn node_3d(&self, id: NodeId) -> Option<Node3DRef<'_>> {
        let data = self.spatial_3d(id)?;
        Some(Node3DRef { scene: self, id, data })
    }

    /// Write access to a 3D node
    pub fn node_3d_mut(&mut self, id: NodeId) -> Option<Node3DMut<'_>> {
        self.spatial_3d(id)?;
        Some(Node3DMut { scene: self, id })
    }

    /// Global affine of a 3D node
    pub fn global_transform_3d(&self, id: NodeId) -> Option<Mat4> {
        let data = self.spatial_3d(id)?;
        if let Some(global) = data.cache.global() {
            return Some(global);
        }

        let local = data.local_transform();
        let global = match self.parent_global_3d(id) {
            Some(parent_global) => parent_global * local,
            None => local,
        };
        data.cache.store_global(global);
        Some(global)
    }

    pub(crate) fn invalidate_3d(&self, id: NodeId) {
        let Some(data) = self.spatial_3d(id) else {
            return;
        };
        let had_global = data.cache.has_global();
        data.cache.clear();
        if had_global {
            for &child in self.children(id) {
                self.invalidate_3d(child);
            }
        }
    }
}

/// Shared view of a 3D node
#[derive(Clone, Copy)]
pub struct Node3DRef<'a> {
    scene: &'a Scene,
    id: NodeId,
    data: &'a Spatial3D,
}

impl<'a> Node3DRef<'a> {
    /// The raw spatial state
    pub fn data(&self) -> &'a Spatial3D {
        self.data
    }

    pub fn position(&self) -> Vec3 {
        self.data.position
    }

    pub fn rotation(&self) -> Vec3 {
        self.data.rotation
    }

    pub fn scale(&self) -> Vec3 {
        self.data.scale
    }

    pub fn local_transform(&self) -> Mat4 {
        self.data.local_transform()
    }

    pub fn global_transform(&self) -> Mat4 {
        self.scene
            .global_transform_3d(self.id)
            .unwrap_or_else(|| self.data.local_transform())
    }

    /// Translation column of the global affine
    pub fn global_position(&self) -> Vec3 {
        let global = self.global_transform();
        Vec3::new(global.m14, global.m24, global.m34)
    }

    /// Euler angles of the global affine
    pub fn global_rotation(&self) -> Vec3 {
        Transform3D::from_matrix(&self.global_transform()).rotation
    }

    /// Column lengths of the global affine
    pub fn global_scale(&self) -> Vec3 {
        Transform3D::from_matrix(&self.global_transform()).scale
    }

    pub fn global_computations(&self) -> u64 {
        self.data.global_computations()
    }
}

/// Exclusive handle to a 3D node. Setters chain.
pub struct Node3DMut<'a> {
    scene: &'a mut Scene,
    id: NodeId,
}

impl Node3DMut<'_> {
    /// Read access through this handle
    pub fn view(&self) -> Option<Node3DRef<'_>> {
        self.scene.node_3d(self.id)
    }

    fn modify(&mut self, change: impl FnOnce(&mut Spatial3D) -> bool) -> &mut Self {
        if self.scene.spatial_3d_mut(self.id).is_some_and(change) {
            self.scene.invalidate_3d(self.id);
        }
        self
    }

    pub fn set_position(&mut self, position: Vec3) -> &mut Self {
        self.modify(|data| std::mem::replace(&mut data.position, position) != position)
    }

    pub fn set_rotation(&mut self, rotation: Vec3) -> &mut Self {
        self.modify(|data| std::mem::replace(&mut data.rotation, rotation) != rotation)
    }

    pub fn set_scale(&mut self, scale: Vec3) -> &mut Self {
        self.modify(|data| std::mem::replace(&mut data.scale, scale) != scale)
    }

    /// Move by `offset` in parent space; zero is a no-op
    pub fn translate(&mut self, offset: Vec3) -> &mut Self {
        if offset == Vec3::zeros() {
            return self;
        }
        self.modify(|data| {
            data.position += offset;
            true
        })
    }

    /// Add `angles` to the Euler rotation; zero is a no-op
    pub fn rotate(&mut self, angles: Vec3) -> &mut Self {
        if angles == Vec3::zeros() {
            return self;
        }
        self.modify(|data| {
            data.rotation += angles;
            true
        })
    }

    /// Grow the scale by `amount`; zero is a no-op
    pub fn apply_scale(&mut self, amount: Vec3) -> &mut Self {
        if amount == Vec3::zeros() {
            return self;
        }
        self.modify(|data| {
            data.scale += amount;
            true
        })
    }

    /// Move the node so its global position becomes `position`
    pub fn set_global_position(&mut self, position: Vec3) -> &mut Self {
        let local = match self.scene.parent_global_3d(self.id) {
            Some(parent_global) => inverse_3d(&parent_global)
                .transform_point(&Point3::from(position))
                .coords,
            None => position,
        };
        self.set_position(local)
    }

    /// Solve the local transform that yields the given global one
    pub fn set_global_transform(&mut self, global: Transform3D) -> &mut Self {
        let desired = global.to_matrix();
        let local = match self.scene.parent_global_3d(self.id) {
            Some(parent_global) => inverse_3d(&parent_global) * desired,
            None => desired,
        };
        let parts = Transform3D::from_matrix(&local);
        self.modify(|data| {
            data.position = parts.position;
            data.rotation = parts.rotation;
            data.scale = parts.scale;
            true
        })
    }
}
