use super::*;
use crate::foundation::core::Vec2;
use crate::scene::memory::MemoryScene;
use crate::scene::model::NodeDef;

fn scene_with(def: NodeDef) -> (MemoryScene, NodeId) {
    let mut s = MemoryScene::new(Rect::new(0.0, 0.0, 1000.0, 500.0));
    let root = s.root();
    let node = s.add_node(root, def).unwrap();
    (s, node)
}

#[test]
fn cumulative_transform_composes_left_to_right() {
    let t = Affine::translate(Vec2::new(100.0, 0.0));
    let k = Affine::scale(2.0);
    let (s, node) = scene_with(NodeDef::new("g").transform(t).transform(k));
    assert_eq!(cumulative_transform(&s, node), t * k);
    // The scale applies first, then the translation.
    assert_eq!(
        cumulative_transform(&s, node) * Point::new(1.0, 1.0),
        Point::new(102.0, 2.0)
    );
}

#[test]
fn cumulative_transform_of_untransformed_node_is_identity() {
    let (s, node) = scene_with(NodeDef::new("g"));
    assert_eq!(cumulative_transform(&s, node), Affine::IDENTITY);
}

#[test]
fn absolute_position_uses_svg_matrix_convention() {
    // a=1 b=2 c=3 d=4 e=5 f=6 applied to the bbox origin (10, 20):
    // x = a*10 + c*20 + e = 75, y = b*10 + d*20 + f = 106
    let m = Affine::new([1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    let (s, node) = scene_with(NodeDef::new("g").bbox(10.0, 20.0, 5.0, 5.0).transform(m));
    assert_eq!(absolute_position(&s, node), Point::new(75.0, 106.0));
}

#[test]
fn bounding_rect_is_the_client_rect() {
    let (s, node) = scene_with(
        NodeDef::new("g")
            .bbox(0.0, 0.0, 10.0, 20.0)
            .transform(Affine::translate(Vec2::new(5.0, 5.0))),
    );
    assert_eq!(bounding_rect(&s, node), Rect::new(5.0, 5.0, 15.0, 25.0));
}

#[test]
fn compose_matches_multiplication() {
    let a = Affine::translate(Vec2::new(1.0, 2.0));
    let b = Affine::scale(3.0);
    assert_eq!(compose(a, b), a * b);
    assert_eq!(compose(Affine::IDENTITY, a), a);
}
