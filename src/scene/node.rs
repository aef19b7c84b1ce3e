use crate::animation::ease::Ease;
use crate::animation::zoom::ZoomTransition;
use crate::foundation::core::{Affine, Rect};
use crate::foundation::error::{PanslideError, PanslideResult};

/// Opaque handle to a node, issued by [`Scene::select`] and friends.
///
/// Handles are only meaningful for the scene that issued them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Raw index of the handle inside its scene.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Animatable node attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Attr {
    /// The node's whole transform list, replaced by a single matrix when animated.
    Transform,
    /// Style opacity in `[0, 1]`.
    Opacity,
    /// Style fill paint.
    Fill,
}

/// Value of an [`Attr`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttrValue {
    /// Scalar (opacity).
    Number(f64),
    /// Affine matrix (transform).
    Matrix(Affine),
    /// Paint string such as `"black"` or `"#ff0000"` (fill).
    Paint(String),
}

impl AttrValue {
    /// Scalar payload, if this is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Matrix payload, if this is a matrix.
    pub fn as_matrix(&self) -> Option<Affine> {
        match self {
            Self::Matrix(m) => Some(*m),
            _ => None,
        }
    }

    /// Paint payload, if this is a paint.
    pub fn as_paint(&self) -> Option<&str> {
        match self {
            Self::Paint(p) => Some(p),
            _ => None,
        }
    }
}

/// Fire-and-forget attribute animation request.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    /// Animated attribute.
    pub attr: Attr,
    /// Final value.
    pub value: AttrValue,
    /// Animation length.
    pub duration_ms: u64,
    /// Wait before the animation starts.
    pub delay_ms: u64,
    /// Easing curve.
    pub ease: Ease,
}

impl Transition {
    /// Transition of `attr` to `value` over `duration_ms`, no delay, default easing.
    pub fn new(attr: Attr, value: AttrValue, duration_ms: u64) -> Self {
        Self {
            attr,
            value,
            duration_ms,
            delay_ms: 0,
            ease: Ease::default(),
        }
    }

    /// Set the start delay.
    pub fn delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Set the easing curve.
    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }
}

/// Capabilities the presentation engine needs from a retained vector scene.
///
/// Geometry queries are synchronous reads of what is currently visible. `animate`, `zoom` and
/// `notify` are fire-and-forget: they return before anything visible changes, and a newer
/// transition on the same node attribute (or on the camera) supersedes a running one.
pub trait Scene {
    /// Look up a node by its element id.
    fn select(&self, id: &str) -> Option<NodeId>;

    /// Local bounding box, in the coordinate system the node's transform list maps from.
    fn bbox(&self, node: NodeId) -> Rect;

    /// Bounding rectangle in viewport space.
    fn client_rect(&self, node: NodeId) -> Rect;

    /// The node's own transform list, in declared order.
    fn transform_list(&self, node: NodeId) -> Vec<Affine>;

    /// Current style value, `None` when unset.
    fn style(&self, node: NodeId, attr: Attr) -> Option<AttrValue>;

    /// Descendants of `node` whose tag matches `selector`, in document order.
    fn children_matching(&self, node: NodeId, selector: &str) -> Vec<NodeId>;

    /// Issue an attribute transition.
    fn animate(&mut self, node: NodeId, transition: Transition);

    /// The viewport rectangle the scene is displayed in.
    fn viewport_rect(&self) -> Rect;

    /// Issue a camera move.
    fn zoom(&mut self, transition: ZoomTransition);

    /// Deliver a payload-less notification to the enclosing document.
    fn notify(&mut self, event: &str);
}

/// [`Scene::select`] that fails with [`PanslideError::ElementNotFound`].
pub fn resolve(scene: &dyn Scene, id: &str) -> PanslideResult<NodeId> {
    scene
        .select(id)
        .ok_or_else(|| PanslideError::element_not_found(id))
}

/// Resolve every id, failing on the first missing one.
pub fn resolve_all(scene: &dyn Scene, ids: &[String]) -> PanslideResult<Vec<NodeId>> {
    ids.iter().map(|id| resolve(scene, id)).collect()
}
