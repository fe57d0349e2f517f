//! Tree membership and per-frame dispatch
//!
//! Every recursive pass walks a snapshot of the child list and skips any
//! child that a callback has meanwhile moved elsewhere.

use crate::input::InputEvent;
use crate::render::DrawList;
use crate::scene::behavior::Behavior;
use crate::scene::node::{KindTag, NodeKind};
use crate::scene::{NodeId, Scene};

impl Scene {
    /// Run `call` with the node's behavior taken out of the node.
    ///
    /// The behavior is put back only if the hook did not install a new one
    /// or destroy the node. Returns `None` when there was nothing to call.
    pub(crate) fn call_behavior<R>(
        &mut self,
        id: NodeId,
        call: impl FnOnce(&mut dyn Behavior, &mut Scene) -> R,
    ) -> Option<R> {
        let mut behavior = self.nodes.get_mut(id)?.behavior.take()?;
        let result = call(behavior.as_mut(), self);
        if let Some(node) = self.nodes.get_mut(id) {
            if node.behavior.is_none() {
                node.behavior = Some(behavior);
            }
        }
        Some(result)
    }

    fn child_snapshot(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id).to_vec()
    }

    fn still_child_of(&self, child: NodeId, parent: NodeId) -> bool {
        self.parent(child) == Some(parent)
    }

    /// Mark a subtree resident, children first, firing enter hooks
    pub(crate) fn enter_tree(&mut self, id: NodeId) {
        for child in self.child_snapshot(id) {
            if self.still_child_of(child, id) {
                self.enter_tree(child);
            }
        }

        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        node.in_tree = true;
        log::trace!("{:?} entered the tree", id);
        self.call_behavior(id, |behavior, scene| behavior.on_enter(scene, id));
    }

    /// Fire exit hooks children first.
    /// Membership flags and cached transforms are left for
    /// [`Scene::clear_membership`].
    pub(crate) fn exit_tree(&mut self, id: NodeId) {
        for child in self.child_snapshot(id) {
            if self.still_child_of(child, id) {
                self.exit_tree(child);
            }
        }

        if !self.contains(id) {
            return;
        }
        log::trace!("{:?} leaving the tree", id);
        self.call_behavior(id, |behavior, scene| behavior.on_exit(scene, id));
    }

    /// Clear residency and cached transforms for a subtree, parents before
    /// children. Must run after every exit hook in the subtree has fired.
    pub(crate) fn clear_membership(&mut self, id: NodeId) {
        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            self.clear_transform_cache(current);
            if let Some(node) = self.nodes.get_mut(current) {
                node.in_tree = false;
                pending.extend(node.children.iter().rev().copied());
            }
        }
    }

    fn clear_transform_cache(&self, id: NodeId) {
        match self.nodes.get(id).map(|node| &node.kind) {
            Some(NodeKind::Spatial2D(data)) => data.cache.clear(),
            Some(NodeKind::Spatial3D(data)) => data.cache.clear(),
            _ => {}
        }
    }

    /// Forget cached transforms of a node whose parent link changed
    pub(crate) fn invalidate_transform(&self, id: NodeId) {
        match self.nodes.get(id).map(|node| node.kind.tag()) {
            Some(KindTag::Spatial2D) => self.invalidate_2d(id),
            Some(KindTag::Spatial3D) => self.invalidate_3d(id),
            _ => {}
        }
    }

    /// Update a subtree for one frame.
    ///
    /// A 2D node without a 2D parent first draws its whole 2D subtree in
    /// resolved order. Children update before their parent, and a 3D node
    /// draws right after its own update.
    pub fn propagate_update(&mut self, id: NodeId, delta: f32, draws: &mut DrawList) {
        if self.is_draw_root_2d(id) {
            self.draw_2d_subtree(id, draws);
        }

        for child in self.child_snapshot(id) {
            if self.still_child_of(child, id) {
                self.propagate_update(child, delta, draws);
            }
        }

        self.call_behavior(id, |behavior, scene| behavior.on_update(scene, id, delta));

        if self.node(id).and_then(|node| node.as_spatial_3d()).is_some() {
            self.call_behavior(id, |behavior, scene| behavior.on_draw(scene, id, draws));
        }
    }

    fn draw_2d_subtree(&mut self, root: NodeId, draws: &mut DrawList) {
        for id in self.resolve_draw_order(root) {
            self.call_behavior(id, |behavior, scene| behavior.on_draw(scene, id, draws));
        }
    }

    /// Deliver an input event to a subtree, children before parents
    pub fn propagate_input(&mut self, id: NodeId, event: &InputEvent) {
        for child in self.child_snapshot(id) {
            if self.still_child_of(child, id) {
                self.propagate_input(child, event);
            }
        }

        self.call_behavior(id, |behavior, scene| behavior.on_input(scene, id, event));
    }
}
