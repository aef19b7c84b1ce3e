//! Affine transform helpers over scene nodes.
//!
//! Matrices follow the SVG `(a, b, c, d, e, f)` convention that `kurbo` shares:
//! `x' = a·x + c·y + e`, `y' = b·x + d·y + f`.

use crate::foundation::core::{Affine, Point, Rect};
use crate::scene::node::{NodeId, Scene};

/// `a ∘ b`: apply `b` first, then `a`.
#[inline]
pub fn compose(a: Affine, b: Affine) -> Affine {
    a * b
}

/// Identity composed with every entry of the node's transform list, left to right.
pub fn cumulative_transform(scene: &dyn Scene, node: NodeId) -> Affine {
    scene
        .transform_list(node)
        .into_iter()
        .fold(Affine::IDENTITY, compose)
}

/// The node's bbox origin mapped through its cumulative transform.
pub fn absolute_position(scene: &dyn Scene, node: NodeId) -> Point {
    let bbox = scene.bbox(node);
    cumulative_transform(scene, node) * Point::new(bbox.x0, bbox.y0)
}

/// The node's rectangle in viewport space.
pub fn bounding_rect(scene: &dyn Scene, node: NodeId) -> Rect {
    scene.client_rect(node)
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/transform.rs"]
mod tests;
