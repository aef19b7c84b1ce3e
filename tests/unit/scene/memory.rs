use super::*;
use crate::foundation::core::Vec2;

fn scene() -> MemoryScene {
    let mut s = MemoryScene::new(Rect::new(0.0, 0.0, 1000.0, 500.0));
    let root = s.root();
    s.add_node(
        root,
        NodeDef::new("g")
            .id("group")
            .bbox(0.0, 0.0, 100.0, 50.0)
            .transform(Affine::translate(Vec2::new(10.0, 20.0)))
            .child(NodeDef::new("path").id("p1").bbox(0.0, 0.0, 10.0, 10.0))
            .child(
                NodeDef::new("g")
                    .child(NodeDef::new("path").id("p2").fill("red"))
                    .child(NodeDef::new("text").id("label")),
            ),
    )
    .unwrap();
    s
}

#[test]
fn root_answers_to_svg() {
    let s = scene();
    assert_eq!(s.select(ROOT_ID), Some(s.root()));
    assert_eq!(s.client_rect(s.root()), Rect::new(0.0, 0.0, 1000.0, 500.0));
    assert_eq!(s.camera(), ViewportPos::new(500.0, 250.0, 1000.0));
}

#[test]
fn client_rect_applies_ancestor_transforms() {
    let s = scene();
    let p1 = s.select("p1").unwrap();
    assert_eq!(s.client_rect(p1), Rect::new(10.0, 20.0, 20.0, 30.0));
    let group = s.select("group").unwrap();
    assert_eq!(s.client_rect(group), Rect::new(10.0, 20.0, 110.0, 70.0));
}

#[test]
fn children_matching_walks_descendants_in_document_order() {
    let s = scene();
    let group = s.select("group").unwrap();
    let paths = s.children_matching(group, "path");
    let ids: Vec<_> = paths.iter().map(|n| s.id_of(*n).unwrap()).collect();
    assert_eq!(ids, vec!["p1", "p2"]);
    assert_eq!(s.children_matching(group, "*").len(), 4);
}

#[test]
fn duplicate_ids_are_rejected() {
    let mut s = scene();
    let root = s.root();
    let err = s.add_node(root, NodeDef::new("g").id("p1")).unwrap_err();
    assert!(matches!(err, PanslideError::Validation(_)));
}

#[test]
fn a_node_named_svg_replaces_the_root_alias() {
    let mut s = scene();
    let root = s.root();
    let node = s.add_node(root, NodeDef::new("g").id(ROOT_ID)).unwrap();
    assert_eq!(s.select(ROOT_ID), Some(node));
    assert_eq!(s.id_of(root), None);
    let err = s.add_node(root, NodeDef::new("g").id(ROOT_ID)).unwrap_err();
    assert!(matches!(err, PanslideError::Validation(_)));
}

#[test]
fn alias_adds_a_second_name() {
    let mut s = scene();
    let root = s.root();
    s.alias("deck", root).unwrap();
    assert_eq!(s.select("deck"), Some(root));
    assert_eq!(s.select(ROOT_ID), Some(root));
    assert_eq!(s.id_of(root), Some("deck"));

    let group = s.select("group").unwrap();
    s.alias("group", group).unwrap();
    assert!(s.alias("p1", group).is_err());
}

#[test]
fn invalid_opacity_is_rejected() {
    let mut s = scene();
    let root = s.root();
    assert!(s.add_node(root, NodeDef::new("g").opacity(1.5)).is_err());
}

#[test]
fn transitions_progress_with_the_clock() {
    let mut s = scene();
    let p1 = s.select("p1").unwrap();
    assert_eq!(s.style(p1, Attr::Opacity), None);
    s.animate(
        p1,
        Transition::new(Attr::Opacity, AttrValue::Number(0.0), 100)
            .delay(100)
            .ease(Ease::Linear),
    );
    assert_eq!(s.opacity("p1"), Some(1.0));
    s.tick(150);
    assert_eq!(s.opacity("p1"), Some(0.5));
    assert!(!s.is_idle());
    s.tick(50);
    assert_eq!(s.opacity("p1"), Some(0.0));
    assert!(s.is_idle());
}

#[test]
fn zero_length_transitions_apply_immediately() {
    let mut s = scene();
    let p2 = s.select("p2").unwrap();
    s.animate(
        p2,
        Transition::new(Attr::Fill, AttrValue::Paint("blue".into()), 0),
    );
    assert_eq!(s.fill(p2), "blue");
    assert!(s.is_idle());
}

#[test]
fn newer_transition_on_same_attribute_wins() {
    let mut s = scene();
    let p1 = s.select("p1").unwrap();
    s.animate(
        p1,
        Transition::new(Attr::Opacity, AttrValue::Number(0.0), 100).ease(Ease::Linear),
    );
    s.tick(50);
    s.animate(
        p1,
        Transition::new(Attr::Opacity, AttrValue::Number(1.0), 100).ease(Ease::Linear),
    );
    // Restarts from the visible 0.5.
    assert_eq!(s.opacity("p1"), Some(0.5));
    s.settle();
    assert_eq!(s.opacity("p1"), Some(1.0));
    assert_eq!(s.issued().len(), 2);
}

#[test]
fn fill_holds_until_the_end_of_its_transition() {
    let mut s = scene();
    let p2 = s.select("p2").unwrap();
    s.animate(
        p2,
        Transition::new(Attr::Fill, AttrValue::Paint("blue".into()), 100),
    );
    s.tick(99);
    assert_eq!(s.fill(p2), "red");
    s.tick(1);
    assert_eq!(s.fill(p2), "blue");
}

#[test]
fn transform_animation_replaces_the_list() {
    let mut s = scene();
    let group = s.select("group").unwrap();
    let target = Affine::translate(Vec2::new(30.0, 40.0));
    s.animate(
        group,
        Transition::new(Attr::Transform, AttrValue::Matrix(target), 200).ease(Ease::Linear),
    );
    s.tick(100);
    assert_eq!(
        s.transform_list(group),
        vec![Affine::translate(Vec2::new(20.0, 30.0))]
    );
    s.settle();
    assert_eq!(s.transform_list(group), vec![target]);
    assert_eq!(s.now_ms(), 200);
}

#[test]
fn notifications_are_recorded() {
    let mut s = scene();
    s.notify("toggle-overlay");
    s.notify("toggle-overlay");
    assert_eq!(s.events(), &["toggle-overlay", "toggle-overlay"]);
}

#[test]
fn scene_def_parses_from_json() {
    let s = MemoryScene::from_json_str(
        r#"{
            "viewport": [0, 0, 800, 600],
            "nodes": [
                { "id": "a", "bbox": [10, 10, 20, 20], "transforms": [[2, 0, 0, 2, 0, 0]] }
            ]
        }"#,
    )
    .unwrap();
    let a = s.select("a").unwrap();
    assert_eq!(s.client_rect(a), Rect::new(20.0, 20.0, 60.0, 60.0));
    assert_eq!(s.viewport_rect(), Rect::new(0.0, 0.0, 800.0, 600.0));
}

#[test]
fn malformed_scene_json_is_a_serde_error() {
    let err = MemoryScene::from_json_str("{").unwrap_err();
    assert!(matches!(err, PanslideError::Serde(_)));
}
