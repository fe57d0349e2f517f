//! Scenario tests for the scene tree

mod draw_order;

use std::cell::RefCell;
use std::rc::Rc;

use crate::input::InputEvent;
use crate::render::DrawList;
use crate::scene::{Behavior, NodeId, Scene};

/// Shared, ordered record of hook invocations
pub(super) type EventLog = Rc<RefCell<Vec<String>>>;

pub(super) fn event_log() -> EventLog {
    Rc::new(RefCell::new(Vec::new()))
}

pub(super) fn take(log: &EventLog) -> Vec<String> {
    std::mem::take(&mut *log.borrow_mut())
}

/// Behavior that writes `hook:name` for every hook it receives
pub(super) struct Recorder {
    name: String,
    log: EventLog,
}

impl Recorder {
    pub(super) fn new(name: &str, log: &EventLog) -> Self {
        Self {
            name: name.to_string(),
            log: Rc::clone(log),
        }
    }

    fn record(&self, hook: &str) {
        self.log.borrow_mut().push(format!("{hook}:{}", self.name));
    }
}

impl Behavior for Recorder {
    fn on_enter(&mut self, _scene: &mut Scene, _id: NodeId) {
        self.record("enter");
    }

    fn on_exit(&mut self, _scene: &mut Scene, _id: NodeId) {
        self.record("exit");
    }

    fn on_update(&mut self, _scene: &mut Scene, _id: NodeId, _delta: f32) {
        self.record("update");
    }

    fn on_input(&mut self, _scene: &mut Scene, _id: NodeId, _event: &InputEvent) {
        self.record("input");
    }

    fn on_draw(&mut self, _scene: &Scene, _id: NodeId, _draws: &mut DrawList) {
        self.record("draw");
    }
}

/// Behavior running a closure on update
pub(super) struct OnUpdate<F>(pub F);

impl<F: FnMut(&mut Scene, NodeId, f32) + 'static> Behavior for OnUpdate<F> {
    fn on_update(&mut self, scene: &mut Scene, id: NodeId, delta: f32) {
        (self.0)(scene, id, delta);
    }
}

pub(super) fn on_update<F>(hook: F) -> OnUpdate<F>
where
    F: FnMut(&mut Scene, NodeId, f32) + 'static,
{
    OnUpdate(hook)
}

/// Behavior running a closure on exit
pub(super) struct OnExit<F>(pub F);

impl<F: FnMut(&mut Scene, NodeId) + 'static> Behavior for OnExit<F> {
    fn on_exit(&mut self, scene: &mut Scene, id: NodeId) {
        (self.0)(scene, id);
    }
}

pub(super) fn on_exit<F>(hook: F) -> OnExit<F>
where
    F: FnMut(&mut Scene, NodeId) + 'static,
{
    OnExit(hook)
}

/// Plain node with a [`Recorder`]
pub(super) fn plain(scene: &mut Scene, name: &str, log: &EventLog) -> NodeId {
    let id = scene.create_node(name);
    scene.set_behavior(id, Recorder::new(name, log)).unwrap();
    id
}

/// 2D node with a [`Recorder`]
pub(super) fn node_2d(scene: &mut Scene, name: &str, log: &EventLog) -> NodeId {
    let id = scene.create_node_2d(name);
    scene.set_behavior(id, Recorder::new(name, log)).unwrap();
    id
}

/// 3D node with a [`Recorder`]
pub(super) fn node_3d(scene: &mut Scene, name: &str, log: &EventLog) -> NodeId {
    let id = scene.create_node_3d(name);
    scene.set_behavior(id, Recorder::new(name, log)).unwrap();
    id
}
