//! Z-index layering and y-sorting

use crate::foundation::math::Vec2;
use crate::scene::{NodeId, Scene};

fn add_2d(scene: &mut Scene, parent: Option<NodeId>, name: &str, z: i32, y: f32) -> NodeId {
    let id = scene.create_node_2d(name);
    scene
        .node_2d_mut(id)
        .unwrap()
        .set_z_index(z)
        .set_position(Vec2::new(0.0, y));
    if let Some(parent) = parent {
        scene.add_child(parent, id).unwrap();
    }
    id
}

fn order(scene: &Scene, root: NodeId) -> Vec<String> {
    scene
        .resolve_draw_order(root)
        .iter()
        .map(|&id| scene.name(id).unwrap_or("?").to_string())
        .collect()
}

#[test]
fn test_layers_keep_document_order() {
    let mut scene = Scene::new();
    let root = add_2d(&mut scene, None, "root", 0, 0.0);
    let a = add_2d(&mut scene, Some(root), "a", 1, 0.0);
    add_2d(&mut scene, Some(root), "b", -1, 0.0);
    add_2d(&mut scene, Some(root), "c", 0, 0.0);
    add_2d(&mut scene, Some(a), "a1", 0, 0.0);
    add_2d(&mut scene, Some(a), "a2", -1, 0.0);

    assert_eq!(order(&scene, root), ["b", "root", "a2", "c", "a", "a1"]);
}

#[test]
fn test_root_z_index_counts() {
    let mut scene = Scene::new();
    let root = add_2d(&mut scene, None, "root", 5, 0.0);
    add_2d(&mut scene, Some(root), "under", -5, 0.0);
    add_2d(&mut scene, Some(root), "over", 0, 0.0);

    assert_eq!(order(&scene, root), ["under", "root", "over"]);
}

#[test]
fn test_non_2d_children_are_not_walked() {
    let mut scene = Scene::new();
    let root = add_2d(&mut scene, None, "root", 0, 0.0);
    let gap = scene.create_node("gap");
    scene.add_child(root, gap).unwrap();
    add_2d(&mut scene, Some(gap), "hidden", 0, 0.0);
    add_2d(&mut scene, Some(root), "shown", 0, 0.0);

    assert_eq!(order(&scene, root), ["root", "shown"]);
}

#[test]
fn test_y_sort_draws_lower_nodes_last() {
    let mut scene = Scene::new();
    let root = add_2d(&mut scene, None, "root", 0, 0.0);
    scene.node_2d_mut(root).unwrap().set_y_sort(true);
    add_2d(&mut scene, Some(root), "y1", 0, 1.0);
    add_2d(&mut scene, Some(root), "y3", 0, 3.0);
    add_2d(&mut scene, Some(root), "y2", 0, 2.0);
    add_2d(&mut scene, Some(root), "twin", 0, 2.0);

    assert_eq!(order(&scene, root), ["y3", "y2", "twin", "y1", "root"]);
}

#[test]
fn test_y_sort_uses_global_position() {
    let mut scene = Scene::new();
    let root = add_2d(&mut scene, None, "root", 0, 0.0);
    scene.node_2d_mut(root).unwrap().set_y_sort(true);
    let holder = add_2d(&mut scene, Some(root), "holder", 0, 10.0);
    add_2d(&mut scene, Some(holder), "low", 0, -20.0);
    add_2d(&mut scene, Some(root), "mid", 0, 5.0);

    // holder 10, mid 5, root 0, low -10
    assert_eq!(order(&scene, root), ["holder", "mid", "root", "low"]);
}

#[test]
fn test_nested_y_sort_moves_as_unit() {
    let mut scene = Scene::new();
    let root = add_2d(&mut scene, None, "root", 0, 0.0);
    scene.node_2d_mut(root).unwrap().set_y_sort(true);
    let group = add_2d(&mut scene, Some(root), "group", 0, 2.0);
    scene.node_2d_mut(group).unwrap().set_y_sort(true);
    add_2d(&mut scene, Some(group), "deep", 0, -10.0);
    add_2d(&mut scene, Some(group), "level", 0, 0.0);
    add_2d(&mut scene, Some(root), "other", 0, 1.0);

    // "deep" sits at y = -8 but stays inside its group, which sorts at y = 2.
    assert_eq!(order(&scene, root), ["group", "level", "deep", "other", "root"]);
}

#[test]
fn test_y_sort_scope_joins_outer_layers() {
    let mut scene = Scene::new();
    let root = add_2d(&mut scene, None, "root", 0, 0.0);
    let scope = add_2d(&mut scene, Some(root), "scope", 0, 0.0);
    scene.node_2d_mut(scope).unwrap().set_y_sort(true);
    add_2d(&mut scene, Some(scope), "raised", 1, 5.0);
    add_2d(&mut scene, Some(scope), "ground", 0, 10.0);
    add_2d(&mut scene, Some(root), "after", 0, 0.0);

    assert_eq!(order(&scene, root), ["root", "ground", "scope", "after", "raised"]);
}

#[test]
fn test_z_index_within_y_sort_scope() {
    let mut scene = Scene::new();
    let root = add_2d(&mut scene, None, "root", 0, 0.0);
    scene.node_2d_mut(root).unwrap().set_y_sort(true);
    add_2d(&mut scene, Some(root), "front", 1, 100.0);
    add_2d(&mut scene, Some(root), "back", -1, -100.0);
    add_2d(&mut scene, Some(root), "plain", 0, 50.0);

    assert_eq!(order(&scene, root), ["back", "plain", "root", "front"]);
}

#[test]
fn test_higher_z_sibling_draws_last() {
    let mut scene = Scene::new();
    let root = add_2d(&mut scene, None, "root", 0, 0.0);
    add_2d(&mut scene, Some(root), "A", 0, 0.0);
    add_2d(&mut scene, Some(root), "B", 1, 0.0);
    add_2d(&mut scene, Some(root), "C", 0, 0.0);

    assert_eq!(order(&scene, root), ["root", "A", "C", "B"]);
}

#[test]
fn test_y_sorted_siblings_lower_one_on_top() {
    let mut scene = Scene::new();
    let root = add_2d(&mut scene, None, "root", 0, 20.0);
    scene.node_2d_mut(root).unwrap().set_y_sort(true);
    add_2d(&mut scene, Some(root), "below", 0, -25.0);
    add_2d(&mut scene, Some(root), "above", 0, -10.0);

    // Globals: root 20, below -5, above 10.
    assert_eq!(order(&scene, root), ["root", "above", "below"]);
}
