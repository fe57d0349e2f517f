//! Draw order resolution for 2D subtrees
//!
//! Nodes are grouped by effective z-index: the sum of `z_index` along the
//! path from the draw root, the root's own value included. Lower layers are
//! drawn first and each layer keeps document order (parent before children,
//! siblings in order).
//!
//! A y-sorted node draws its subtree sorted by descending global y, so that
//! with y pointing up, nodes further down the screen end up on top. Inside
//! such a scope a nested y-sorted node moves as one unit at its own y, with
//! its content ordered against a fresh baseline.

use std::collections::BTreeMap;

use crate::scene::{NodeId, Scene};

type Layers = BTreeMap<i32, Vec<NodeId>>;

/// One sortable item of a y-sort scope: a single node, or a whole nested
/// scope already flattened
struct SortItem {
    y: f32,
    nodes: Vec<NodeId>,
}

impl Scene {
    /// Whether `id` starts its own 2D draw pass: a 2D node whose parent is
    /// not a 2D node
    pub fn is_draw_root_2d(&self, id: NodeId) -> bool {
        self.spatial_2d(id).is_some() && self.parent_2d(id).is_none()
    }

    /// All 2D nodes reachable from `root` through 2D children, in the order
    /// they are asked to draw
    pub fn resolve_draw_order(&self, root: NodeId) -> Vec<NodeId> {
        let mut layers = Layers::new();
        self.collect_layers(root, 0, &mut layers);
        layers.into_values().flatten().collect()
    }

    fn global_y(&self, id: NodeId) -> f32 {
        self.global_transform_2d(id).map_or(0.0, |global| global.m23)
    }

    fn collect_layers(&self, id: NodeId, parent_z: i32, layers: &mut Layers) {
        let Some(data) = self.spatial_2d(id) else {
            return;
        };
        let z = parent_z.saturating_add(data.z_index());

        if data.y_sort() {
            for (layer, nodes) in self.sorted_scope(id, z) {
                layers.entry(layer).or_default().extend(nodes);
            }
            return;
        }

        layers.entry(z).or_default().push(id);
        for &child in self.children(id) {
            self.collect_layers(child, z, layers);
        }
    }

    /// Layers of a y-sort scope rooted at `scope`, keyed relative to the
    /// same baseline as `scope_z`
    fn sorted_scope(&self, scope: NodeId, scope_z: i32) -> Layers {
        let mut items: BTreeMap<i32, Vec<SortItem>> = BTreeMap::new();
        items.entry(scope_z).or_default().push(SortItem {
            y: self.global_y(scope),
            nodes: vec![scope],
        });
        for &child in self.children(scope) {
            self.collect_scope_items(child, scope_z, &mut items);
        }

        items
            .into_iter()
            .map(|(layer, mut bucket)| {
                // Stable: equal y keeps document order.
                bucket.sort_by(|a, b| b.y.total_cmp(&a.y));
                (layer, bucket.into_iter().flat_map(|item| item.nodes).collect())
            })
            .collect()
    }

    fn collect_scope_items(&self, id: NodeId, parent_z: i32, items: &mut BTreeMap<i32, Vec<SortItem>>) {
        let Some(data) = self.spatial_2d(id) else {
            return;
        };
        let z = parent_z.saturating_add(data.z_index());
        let y = self.global_y(id);

        if data.y_sort() {
            let nodes = self.sorted_scope(id, 0).into_values().flatten().collect();
            items.entry(z).or_default().push(SortItem { y, nodes });
            return;
        }

        items.entry(z).or_default().push(SortItem { y, nodes: vec![id] });
        for &child in self.children(id) {
            self.collect_scope_items(child, z, items);
        }
    }
}
