//! Per-node lifecycle hooks
//!
//! Any node can carry one [`Behavior`]. The scene calls its hooks while the
//! behavior is temporarily taken out of the node, so a hook receives the
//! whole [`Scene`] mutably and may restructure the tree.

use std::any::Any;

use crate::input::InputEvent;
use crate::render::DrawList;
use crate::scene::{NodeId, Scene};

/// Downcasting support for behaviors
pub trait AsAny: Any {
    /// As `&dyn Any`
    fn as_any(&self) -> &dyn Any;

    /// As `&mut dyn Any`
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Custom node behavior. Every hook defaults to doing nothing.
pub trait Behavior: AsAny {
    /// The node entered the scene tree. Children have already entered.
    fn on_enter(&mut self, _scene: &mut Scene, _id: NodeId) {}

    /// The node is leaving the scene tree. Children have already left.
    fn on_exit(&mut self, _scene: &mut Scene, _id: NodeId) {}

    /// Per-frame update, called after the children's updates
    fn on_update(&mut self, _scene: &mut Scene, _id: NodeId, _delta: f32) {}

    /// Input event, delivered after the children have seen it
    fn on_input(&mut self, _scene: &mut Scene, _id: NodeId, _event: &InputEvent) {}

    /// Emit draw requests for this node.
    ///
    /// 2D nodes are asked in resolved draw order by their subtree's update
    /// pass; 3D nodes right after their own update.
    fn on_draw(&mut self, _scene: &Scene, _id: NodeId, _draws: &mut DrawList) {}
}

/// Downcast a behavior to its concrete type
pub fn downcast_ref<T: Behavior>(behavior: &dyn Behavior) -> Option<&T> {
    behavior.as_any().downcast_ref::<T>()
}

/// Downcast a behavior to its concrete type, mutably
pub fn downcast_mut<T: Behavior>(behavior: &mut dyn Behavior) -> Option<&mut T> {
    behavior.as_any_mut().downcast_mut::<T>()
}
