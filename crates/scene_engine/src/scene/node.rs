//! Node storage and tree mechanics
//!
//! Nodes live in a slot map owned by [`Scene`] and are addressed by
//! [`NodeId`]. A node owns the ordered list of its children; the parent link
//! and the tree-membership flag are plain back references that never affect
//! a node's lifetime. Removing a node from the scene and destroying it are
//! separate operations.

use slotmap::{new_key_type, SlotMap};

use crate::scene::behavior::{downcast_mut, downcast_ref, Behavior};
use crate::scene::spatial_2d::Spatial2D;
use crate::scene::spatial_3d::Spatial3D;
use crate::scene::{SceneError, SceneResult};

new_key_type! {
    /// Stable handle to a node in a [`Scene`]
    pub struct NodeId;
}

/// Spatial state carried by a node
#[derive(Debug)]
pub enum NodeKind {
    /// Plain tree node without a transform
    Plain,
    /// 2D position/rotation/scale with draw ordering
    Spatial2D(Spatial2D),
    /// 3D position/rotation/scale
    Spatial3D(Spatial3D),
}

impl NodeKind {
    /// The kind without its payload
    pub fn tag(&self) -> KindTag {
        match self {
            Self::Plain => KindTag::Plain,
            Self::Spatial2D(_) => KindTag::Spatial2D,
            Self::Spatial3D(_) => KindTag::Spatial3D,
        }
    }
}

/// Payload-free discriminant of [`NodeKind`], used for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KindTag {
    /// [`NodeKind::Plain`]
    Plain,
    /// [`NodeKind::Spatial2D`]
    Spatial2D,
    /// [`NodeKind::Spatial3D`]
    Spatial3D,
}

/// One node of the tree
pub struct Node {
    name: String,
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) in_tree: bool,
    pub(crate) behavior: Option<Box<dyn Behavior>>,
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("name", &self.name)
            .field("kind", &self.kind.tag())
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("in_tree", &self.in_tree)
            .field("has_behavior", &self.behavior.is_some())
            .finish()
    }
}

impl Node {
    fn new(name: String, kind: NodeKind) -> Self {
        Self {
            name,
            kind,
            parent: None,
            children: Vec::new(),
            in_tree: false,
            behavior: None,
        }
    }

    /// Display name; not required to be unique
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Spatial kind
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Parent, if attached
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in sibling order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Whether the node is reachable from the scene root
    pub fn is_inside_tree(&self) -> bool {
        self.in_tree
    }

    /// The attached behavior, if it is a `T`
    pub fn behavior<T: Behavior>(&self) -> Option<&T> {
        self.behavior.as_deref().and_then(|behavior| downcast_ref::<T>(behavior))
    }

    /// 2D spatial state, if this is a 2D node
    pub fn as_spatial_2d(&self) -> Option<&Spatial2D> {
        match &self.kind {
            NodeKind::Spatial2D(data) => Some(data),
            _ => None,
        }
    }

    /// 3D spatial state, if this is a 3D node
    pub fn as_spatial_3d(&self) -> Option<&Spatial3D> {
        match &self.kind {
            NodeKind::Spatial3D(data) => Some(data),
            _ => None,
        }
    }
}

/// Arena of nodes plus the designated root
pub struct Scene {
    pub(crate) nodes: SlotMap<NodeId, Node>,
    pub(crate) root: Option<NodeId>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let resident = self.nodes.values().filter(|node| node.in_tree).count();
        f.debug_struct("Scene")
            .field("nodes", &self.nodes.len())
            .field("resident", &resident)
            .field("root", &self.root)
            .finish()
    }
}

/// Clamp a sequence-insert index: negative counts from the end, anything
/// out of range sticks to the nearest end.
fn insertion_index(index: isize, len: usize) -> usize {
    if index < 0 {
        len.saturating_sub(index.unsigned_abs())
    } else {
        index.unsigned_abs().min(len)
    }
}

/// Resolve a bounds-checked index: negative counts from the end.
fn element_index(index: isize, len: usize) -> SceneResult<usize> {
    let resolved = if index < 0 {
        len.checked_sub(index.unsigned_abs())
    } else {
        Some(index.unsigned_abs()).filter(|&i| i < len)
    };
    resolved.ok_or(SceneError::IndexOutOfRange { index, len })
}

impl Scene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            root: None,
        }
    }

    /// Create a detached node of the given kind
    pub fn create(&mut self, name: impl Into<String>, kind: NodeKind) -> NodeId {
        let id = self.nodes.insert(Node::new(name.into(), kind));
        log::trace!("Created node {:?}", id);
        id
    }

    /// Create a detached plain node
    pub fn create_node(&mut self, name: impl Into<String>) -> NodeId {
        self.create(name, NodeKind::Plain)
    }

    /// Create a detached 2D node at the origin
    pub fn create_node_2d(&mut self, name: impl Into<String>) -> NodeId {
        self.create(name, NodeKind::Spatial2D(Spatial2D::default()))
    }

    /// Create a detached 3D node at the origin
    pub fn create_node_3d(&mut self, name: impl Into<String>) -> NodeId {
        self.create(name, NodeKind::Spatial3D(Spatial3D::default()))
    }

    /// Attach a behavior, replacing any previous one
    pub fn set_behavior(&mut self, id: NodeId, behavior: impl Behavior) -> SceneResult<()> {
        self.node_mut_or_err(id)?.behavior = Some(Box::new(behavior));
        Ok(())
    }

    /// Detach and return the behavior
    pub fn take_behavior(&mut self, id: NodeId) -> Option<Box<dyn Behavior>> {
        self.nodes.get_mut(id).and_then(|node| node.behavior.take())
    }

    /// The node's behavior, if it is a `T`
    pub fn behavior<T: Behavior>(&self, id: NodeId) -> Option<&T> {
        self.nodes.get(id).and_then(Node::behavior::<T>)
    }

    /// The node's behavior, mutably, if it is a `T`
    pub fn behavior_mut<T: Behavior>(&mut self, id: NodeId) -> Option<&mut T> {
        self.nodes
            .get_mut(id)
            .and_then(|node| node.behavior.as_deref_mut())
            .and_then(|behavior| downcast_mut::<T>(behavior))
    }

    /// Look up a node
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub(crate) fn node_or_err(&self, id: NodeId) -> SceneResult<&Node> {
        self.nodes.get(id).ok_or(SceneError::NodeNotFound(id))
    }

    fn node_mut_or_err(&mut self, id: NodeId) -> SceneResult<&mut Node> {
        self.nodes.get_mut(id).ok_or(SceneError::NodeNotFound(id))
    }

    /// Whether the handle refers to a live node
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of live nodes, resident or not
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena holds no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The tree root
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Parent of a node
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|node| node.parent)
    }

    /// Children of a node, empty for unknown handles
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id).map_or(&[], |node| node.children.as_slice())
    }

    /// Display name of a node
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(id).map(Node::name)
    }

    /// Rename a node
    pub fn set_name(&mut self, id: NodeId, name: impl Into<String>) -> SceneResult<()> {
        self.node_mut_or_err(id)?.name = name.into();
        Ok(())
    }

    /// Whether a node is reachable from the root
    pub fn is_inside_tree(&self, id: NodeId) -> bool {
        self.nodes.get(id).is_some_and(|node| node.in_tree)
    }

    /// Iterate from the parent of `id` up to the topmost ancestor
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&current| self.parent(current))
    }

    /// Whether `ancestor` lies on the parent chain of `id`
    pub fn is_ancestor_of(&self, ancestor: NodeId, id: NodeId) -> bool {
        self.ancestors(id).any(|current| current == ancestor)
    }

    /// Slash-separated names from the topmost ancestor down to `id`
    pub fn path(&self, id: NodeId) -> Option<String> {
        let own = self.name(id)?;
        let mut names: Vec<&str> = self.ancestors(id).filter_map(|a| self.name(a)).collect();
        names.reverse();
        names.push(own);
        Some(format!("/{}", names.join("/")))
    }

    /// Make a detached node the root of the tree, firing enter callbacks
    /// for its whole subtree
    pub fn set_root(&mut self, id: NodeId) -> SceneResult<()> {
        let node = self.node_or_err(id)?;
        if let Some(root) = self.root {
            return Err(SceneError::RootAlreadySet(root));
        }
        if node.parent.is_some() || node.in_tree {
            return Err(SceneError::RootNotDetached(id));
        }

        log::debug!("Node {:?} ({}) becomes the scene root", id, node.name);
        self.root = Some(id);
        self.enter_tree(id);
        Ok(())
    }

    fn validate_attach(&self, parent: NodeId, child: NodeId) -> SceneResult<()> {
        let parent_node = self.node_or_err(parent)?;
        let child_node = self.node_or_err(child)?;

        if parent == child {
            return Err(SceneError::SelfParenting(child));
        }
        if let Some(current) = child_node.parent {
            return Err(SceneError::AlreadyParented { child, parent: current });
        }
        if child_node.in_tree {
            return Err(SceneError::IsRoot(child));
        }
        // A resident parent's ancestors all have parents, so a detached
        // child cannot be among them.
        if !parent_node.in_tree && self.is_ancestor_of(child, parent) {
            return Err(SceneError::Cycle { child, parent });
        }
        Ok(())
    }

    /// Append `child` to the children of `parent`
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> SceneResult<()> {
        let end = isize::try_from(self.children(parent).len()).unwrap_or(isize::MAX);
        self.add_child_at(parent, child, end)
    }

    /// Insert `child` among the children of `parent`.
    ///
    /// `index` follows sequence-insert rules: negative values count from the
    /// end and out-of-range values clamp. If `parent` is inside the tree the
    /// child's subtree enters it, children before parents.
    pub fn add_child_at(&mut self, parent: NodeId, child: NodeId, index: isize) -> SceneResult<()> {
        self.validate_attach(parent, child)?;

        let parent_node = self.node_mut_or_err(parent)?;
        let position = insertion_index(index, parent_node.children.len());
        parent_node.children.insert(position, child);
        let parent_resident = parent_node.in_tree;
        self.node_mut_or_err(child)?.parent = Some(parent);
        self.invalidate_transform(child);

        log::debug!("Attached {:?} under {:?} at {}", child, parent, position);

        if parent_resident {
            self.enter_tree(child);
        }
        Ok(())
    }

    /// Take a node out of the tree and off its parent.
    ///
    /// Exit callbacks fire children first, then membership is cleared top
    /// down. Calling this on a detached node is a no-op.
    pub fn remove_from_scene(&mut self, id: NodeId) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };

        if node.in_tree {
            self.exit_tree(id);
            self.clear_membership(id);
            if self.root == Some(id) {
                log::debug!("Scene root {:?} removed", id);
                self.root = None;
            }
        }

        // Exit callbacks may already have moved or destroyed the node.
        let Some(parent) = self.parent(id) else {
            return;
        };
        if let Some(parent_node) = self.nodes.get_mut(parent) {
            parent_node.children.retain(|&c| c != id);
        }
        if let Some(node) = self.nodes.get_mut(id) {
            node.parent = None;
        }
        self.invalidate_transform(id);
        log::debug!("Detached {:?} from {:?}", id, parent);
    }

    /// Move a node under a new parent.
    ///
    /// The node leaves its current place first. If one of the exit hooks
    /// that fire on the way out destroys `new_parent`, the call returns
    /// [`SceneError::NodeNotFound`] and the node stays detached.
    pub fn set_parent(&mut self, id: NodeId, new_parent: NodeId) -> SceneResult<()> {
        self.node_or_err(id)?;
        self.node_or_err(new_parent)?;
        if id == new_parent {
            return Err(SceneError::SelfParenting(id));
        }
        if self.is_ancestor_of(id, new_parent) {
            return Err(SceneError::Cycle { child: id, parent: new_parent });
        }

        self.remove_from_scene(id);
        if !self.contains(new_parent) {
            log::warn!("{:?} was destroyed while {:?} moved to it", new_parent, id);
            return Err(SceneError::NodeNotFound(new_parent));
        }
        self.add_child(new_parent, id)
    }

    /// Remove a node from the scene and free it together with its subtree
    pub fn destroy(&mut self, id: NodeId) -> SceneResult<()> {
        self.node_or_err(id)?;
        self.remove_from_scene(id);

        let mut pending = vec![id];
        let mut freed = 0usize;
        while let Some(current) = pending.pop() {
            if let Some(node) = self.nodes.remove(current) {
                pending.extend(node.children);
                freed += 1;
            }
        }
        log::debug!("Destroyed {:?} and {} descendants", id, freed.saturating_sub(1));
        Ok(())
    }

    /// Child at `index`; negative values count from the end
    pub fn child(&self, id: NodeId, index: isize) -> SceneResult<NodeId> {
        let children = &self.node_or_err(id)?.children;
        let position = element_index(index, children.len())?;
        Ok(children[position])
    }

    /// Position of a node among its siblings
    pub fn sibling_index(&self, id: NodeId) -> SceneResult<usize> {
        let parent = self.node_or_err(id)?.parent.ok_or(SceneError::NoParent(id))?;
        self.children(parent)
            .iter()
            .position(|&c| c == id)
            .ok_or(SceneError::NodeNotFound(id))
    }

    /// Move a node to `index` among its siblings; negative values count
    /// from the end
    pub fn set_sibling_index(&mut self, id: NodeId, index: isize) -> SceneResult<()> {
        let current = self.sibling_index(id)?;
        let parent = self.node_or_err(id)?.parent.ok_or(SceneError::NoParent(id))?;
        let siblings = &mut self.node_mut_or_err(parent)?.children;
        let target = element_index(index, siblings.len())?;

        let moved = siblings.remove(current);
        siblings.insert(target, moved);
        Ok(())
    }

    /// First direct child matching `predicate`
    pub fn find_child(&self, id: NodeId, predicate: impl Fn(&Node) -> bool) -> Option<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .find(|&c| self.nodes.get(c).is_some_and(&predicate))
    }

    /// All direct children matching `predicate`, in sibling order
    pub fn find_children(&self, id: NodeId, predicate: impl Fn(&Node) -> bool) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|&c| self.nodes.get(c).is_some_and(&predicate))
            .collect()
    }

    /// First descendant matching `predicate`.
    ///
    /// At every level all direct children are checked before the search
    /// descends into each child in sibling order.
    pub fn find_descendant(&self, id: NodeId, predicate: impl Fn(&Node) -> bool) -> Option<NodeId> {
        self.find_descendant_with(id, &predicate)
    }

    fn find_descendant_with(&self, id: NodeId, predicate: &dyn Fn(&Node) -> bool) -> Option<NodeId> {
        self.find_child(id, predicate).or_else(|| {
            self.children(id)
                .iter()
                .find_map(|&c| self.find_descendant_with(c, predicate))
        })
    }

    /// All descendants matching `predicate`, in the same order
    /// [`Scene::find_descendant`] visits them
    pub fn find_descendants(&self, id: NodeId, predicate: impl Fn(&Node) -> bool) -> Vec<NodeId> {
        let mut found = Vec::new();
        self.collect_descendants(id, &predicate, &mut found);
        found
    }

    fn collect_descendants(&self, id: NodeId, predicate: &dyn Fn(&Node) -> bool, found: &mut Vec<NodeId>) {
        found.extend(self.find_children(id, predicate));
        for &child in self.children(id) {
            self.collect_descendants(child, predicate, found);
        }
    }

    /// First direct child with the given name
    pub fn find_child_by_name(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.find_child(id, |node| node.name() == name)
    }

    /// First descendant with the given name
    pub fn find_descendant_by_name(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.find_descendant(id, |node| node.name() == name)
    }

    /// Direct children whose behavior is a `T`
    pub fn children_with_behavior<T: Behavior>(&self, id: NodeId) -> Vec<NodeId> {
        self.find_children(id, |node| node.behavior::<T>().is_some())
    }

    /// Direct children of the given spatial kind
    pub fn children_of_kind(&self, id: NodeId, kind: KindTag) -> Vec<NodeId> {
        self.find_children(id, |node| node.kind.tag() == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_index_clamps() {
        assert_eq!(insertion_index(0, 3), 0);
        assert_eq!(insertion_index(2, 3), 2);
        assert_eq!(insertion_index(10, 3), 3);
        assert_eq!(insertion_index(-1, 3), 2);
        assert_eq!(insertion_index(-10, 3), 0);
    }

    #[test]
    fn test_element_index_bounds() {
        assert_eq!(element_index(0, 3), Ok(0));
        assert_eq!(element_index(-1, 3), Ok(2));
        assert_eq!(element_index(-3, 3), Ok(0));
        assert_eq!(element_index(3, 3), Err(SceneError::IndexOutOfRange { index: 3, len: 3 }));
        assert_eq!(element_index(-4, 3), Err(SceneError::IndexOutOfRange { index: -4, len: 3 }));
        assert!(element_index(0, 0).is_err());
    }

    #[test]
    fn test_path() {
        let mut scene = Scene::new();
        let world = scene.create_node("world");
        let player = scene.create_node_2d("player");
        let gun = scene.create_node_2d("gun");
        scene.add_child(world, player).unwrap();
        scene.add_child(player, gun).unwrap();

        assert_eq!(scene.path(gun).as_deref(), Some("/world/player/gun"));
        assert_eq!(scene.path(world).as_deref(), Some("/world"));
    }

    #[test]
    fn test_destroy_frees_subtree() {
        let mut scene = Scene::new();
        let a = scene.create_node("a");
        let b = scene.create_node("b");
        let c = scene.create_node("c");
        scene.add_child(a, b).unwrap();
        scene.add_child(b, c).unwrap();

        scene.destroy(b).unwrap();
        assert!(scene.contains(a));
        assert!(!scene.contains(b));
        assert!(!scene.contains(c));
        assert!(scene.children(a).is_empty());
        assert_eq!(scene.destroy(b), Err(SceneError::NodeNotFound(b)));
    }
}
