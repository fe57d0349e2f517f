//! 2D spatial nodes
//!
//! A 2D node stores position, rotation and scale relative to its parent
//! together with its draw-order settings. The local and global affines are
//! computed on demand and memoized; any change to the node's own transform
//! or to its parent link drops the memo for the node and, while the node's
//! global was known, for its 2D descendants.
//!
//! Access goes through [`Node2DRef`] and [`Node2DMut`], obtained from
//! [`Scene::node_2d`] and [`Scene::node_2d_mut`], because the global
//! transform depends on the chain of 2D ancestors.

use crate::foundation::math::{inverse_2d, Mat3, Point2, Transform2D, Vec2};
use crate::scene::node::NodeKind;
use crate::scene::transform_cache::TransformCache;
use crate::scene::{NodeId, Scene};

/// Transform and draw-order state of a 2D node
#[derive(Debug)]
pub struct Spatial2D {
    position: Vec2,
    rotation: f32,
    scale: Vec2,
    z_index: i32,
    y_sort: bool,
    pub(crate) cache: TransformCache<Mat3>,
}

impl Default for Spatial2D {
    fn default() -> Self {
        Self {
            position: Vec2::zeros(),
            rotation: 0.0,
            scale: Vec2::new(1.0, 1.0),
            z_index: 0,
            y_sort: false,
            cache: TransformCache::default(),
        }
    }
}

impl Spatial2D {
    /// Position relative to the parent
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Rotation relative to the parent, in radians
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Scale relative to the parent
    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    /// Draw layer offset, added to the parent's effective layer
    pub fn z_index(&self) -> i32 {
        self.z_index
    }

    /// Whether this node's subtree is drawn sorted by global y
    pub fn y_sort(&self) -> bool {
        self.y_sort
    }

    /// The transform components as one value
    pub fn transform(&self) -> Transform2D {
        Transform2D::new(self.position, self.rotation, self.scale)
    }

    /// Translation * rotation * scale, memoized
    pub fn local_transform(&self) -> Mat3 {
        self.cache.local_or_compute(|| self.transform().to_matrix())
    }

    /// How many times the global transform has been recomputed
    pub fn global_computations(&self) -> u64 {
        self.cache.global_computations()
    }
}

impl Scene {
    pub(crate) fn spatial_2d(&self, id: NodeId) -> Option<&Spatial2D> {
        self.nodes.get(id).and_then(|node| node.as_spatial_2d())
    }

    fn spatial_2d_mut(&mut self, id: NodeId) -> Option<&mut Spatial2D> {
        match self.nodes.get_mut(id).map(|node| &mut node.kind) {
            Some(NodeKind::Spatial2D(data)) => Some(data),
            _ => None,
        }
    }

    /// The parent, if it is a 2D node
    pub(crate) fn parent_2d(&self, id: NodeId) -> Option<NodeId> {
        self.parent(id).filter(|&parent| self.spatial_2d(parent).is_some())
    }

    /// Read access to a 2D node
    pub fn node_2d(&self, id: NodeId) -> Option<Node2DRef<'_>> {
        let data = self.spatial_2d(id)?;
        Some(Node2DRef { scene: self, id, data })
    }

    /// Write access to a 2D node
    pub fn node_2d_mut(&mut self, id: NodeId) -> Option<Node2DMut<'_>> {
        self.spatial_2d(id)?;
        Some(Node2DMut { scene: self, id })
    }

    /// Global affine of a 2D node: the product of the local transforms of
    /// its chain of 2D ancestors and itself
    pub fn global_transform_2d(&self, id: NodeId) -> Option<Mat3> {
        let data = self.spatial_2d(id)?;
        if let Some(global) = data.cache.global() {
            return Some(global);
        }

        let local = data.local_transform();
        let global = match self.parent_2d(id).and_then(|parent| self.global_transform_2d(parent)) {
            Some(parent_global) => parent_global * local,
            None => local,
        };
        data.cache.store_global(global);
        Some(global)
    }

    /// Drop memoized transforms, descending only while globals were known
    pub(crate) fn invalidate_2d(&self, id: NodeId) {
        let Some(data) = self.spatial_2d(id) else {
            return;
        };
        let had_global = data.cache.has_global();
        data.cache.clear();
        if !had_global {
            return;
        }
        for &child in self.children(id) {
            self.invalidate_2d(child);
        }
    }

    fn parent_global_2d(&self, id: NodeId) -> Option<Mat3> {
        self.parent_2d(id).and_then(|parent| self.global_transform_2d(parent))
    }
}

/// Shared view of a 2D node
#[derive(Clone, Copy)]
pub struct Node2DRef<'a> {
    scene: &'a Scene,
    id: NodeId,
    data: &'a Spatial2D,
}

impl<'a> Node2DRef<'a> {
    /// Node handle
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The raw spatial state
    pub fn data(&self) -> &'a Spatial2D {
        self.data
    }

    /// Position relative to the parent
    pub fn position(&self) -> Vec2 {
        self.data.position
    }

    /// Rotation relative to the parent
    pub fn rotation(&self) -> f32 {
        self.data.rotation
    }

    /// Scale relative to the parent
    pub fn scale(&self) -> Vec2 {
        self.data.scale
    }

    /// Draw layer offset
    pub fn z_index(&self) -> i32 {
        self.data.z_index
    }

    /// Whether the subtree is y-sorted
    pub fn y_sort(&self) -> bool {
        self.data.y_sort
    }

    /// Local affine
    pub fn local_transform(&self) -> Mat3 {
        self.data.local_transform()
    }

    /// Global affine
    pub fn global_transform(&self) -> Mat3 {
        self.scene
            .global_transform_2d(self.id)
            .unwrap_or_else(|| self.data.local_transform())
    }

    /// Translation column of the global affine
    pub fn global_position(&self) -> Vec2 {
        let global = self.global_transform();
        Vec2::new(global.m13, global.m23)
    }

    /// Angle of the global affine's first column
    pub fn global_rotation(&self) -> f32 {
        let global = self.global_transform();
        global.m21.atan2(global.m11)
    }

    /// Column lengths of the global affine, second one signed by the
    /// determinant
    pub fn global_scale(&self) -> Vec2 {
        Transform2D::from_matrix(&self.global_transform()).scale
    }

    /// Number of global transform recomputations so far
    pub fn global_computations(&self) -> u64 {
        self.data.global_computations()
    }
}

/// Exclusive handle to a 2D node. Setters chain.
pub struct Node2DMut<'a> {
    scene: &'a mut Scene,
    id: NodeId,
}

impl Node2DMut<'_> {
    /// Node handle
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Read access through this handle
    pub fn view(&self) -> Option<Node2DRef<'_>> {
        self.scene.node_2d(self.id)
    }

    fn modify(&mut self, change: impl FnOnce(&mut Spatial2D) -> bool) -> &mut Self {
        let changed = self.scene.spatial_2d_mut(self.id).is_some_and(change);
        if changed {
            self.scene.invalidate_2d(self.id);
        }
        self
    }

    /// Set the position relative to the parent
    pub fn set_position(&mut self, position: Vec2) -> &mut Self {
        self.modify(|data| {
            let changed = data.position != position;
            data.position = position;
            changed
        })
    }

    /// Set the rotation relative to the parent
    pub fn set_rotation(&mut self, rotation: f32) -> &mut Self {
        self.modify(|data| {
            let changed = data.rotation != rotation;
            data.rotation = rotation;
            changed
        })
    }

    /// Set the scale relative to the parent
    pub fn set_scale(&mut self, scale: Vec2) -> &mut Self {
        self.modify(|data| {
            let changed = data.scale != scale;
            data.scale = scale;
            changed
        })
    }

    /// Move by `offset` in parent space
    pub fn translate(&mut self, offset: Vec2) -> &mut Self {
        if offset == Vec2::zeros() {
            return self;
        }
        self.modify(|data| {
            data.position += offset;
            true
        })
    }

    /// Rotate by `angle` radians
    pub fn rotate(&mut self, angle: f32) -> &mut Self {
        if angle == 0.0 {
            return self;
        }
        self.modify(|data| {
            data.rotation += angle;
            true
        })
    }

    /// Grow the scale by `amount`
    pub fn apply_scale(&mut self, amount: Vec2) -> &mut Self {
        if amount == Vec2::zeros() {
            return self;
        }
        self.modify(|data| {
            data.scale += amount;
            true
        })
    }

    /// Set the draw layer offset
    pub fn set_z_index(&mut self, z_index: i32) -> &mut Self {
        if let Some(data) = self.scene.spatial_2d_mut(self.id) {
            data.z_index = z_index;
        }
        self
    }

    /// Enable or disable y-sorting of this node's subtree
    pub fn set_y_sort(&mut self, y_sort: bool) -> &mut Self {
        if let Some(data) = self.scene.spatial_2d_mut(self.id) {
            data.y_sort = y_sort;
        }
        self
    }

    /// Move the node so its global position becomes `position`
    pub fn set_global_position(&mut self, position: Vec2) -> &mut Self {
        let local = match self.scene.parent_global_2d(self.id) {
            Some(parent_global) => inverse_2d(&parent_global)
                .transform_point(&Point2::from(position))
                .coords,
            None => position,
        };
        self.set_position(local)
    }

    /// Rotate the node so its global rotation becomes `rotation`, keeping
    /// its global position and scale
    pub fn set_global_rotation(&mut self, rotation: f32) -> &mut Self {
        let Some(global) = self.scene.global_transform_2d(self.id) else {
            return self;
        };
        let current = Transform2D::from_matrix(&global);
        self.set_global_transform(Transform2D { rotation, ..current })
    }

    /// Scale the node so its global scale becomes `scale`, keeping its
    /// global position and rotation
    pub fn set_global_scale(&mut self, scale: Vec2) -> &mut Self {
        let Some(global) = self.scene.global_transform_2d(self.id) else {
            return self;
        };
        let current = Transform2D::from_matrix(&global);
        self.set_global_transform(Transform2D { scale, ..current })
    }

    /// Solve the local transform that yields the given global one
    pub fn set_global_transform(&mut self, global: Transform2D) -> &mut Self {
        let desired = global.to_matrix();
        let local = match self.scene.parent_global_2d(self.id) {
            Some(parent_global) => inverse_2d(&parent_global) * desired,
            None => desired,
        };
        let parts = Transform2D::from_matrix(&local);
        self.modify(|data| {
            data.position = parts.position;
            data.rotation = parts.rotation;
            data.scale = parts.scale;
            true
        })
    }
}
