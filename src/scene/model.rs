use serde::{Deserialize, Serialize};

use crate::foundation::core::{Affine, Rect};

fn default_tag() -> String {
    "g".to_string()
}

/// JSON-facing scene document: a viewport and a node tree under the implicit `svg` root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneDef {
    /// Viewport rectangle as `[x, y, width, height]`.
    pub viewport: [f64; 4],
    /// Top-level nodes.
    #[serde(default)]
    pub nodes: Vec<NodeDef>,
}

/// One scene node and its subtree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDef {
    /// Element id; anonymous nodes are reachable only through their ancestors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Element tag such as `g` or `path`.
    #[serde(default = "default_tag")]
    pub tag: String,
    /// Local bounding box as `[x, y, width, height]`.
    #[serde(default)]
    pub bbox: [f64; 4],
    /// Transform list, each entry `[a, b, c, d, e, f]`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transforms: Vec<[f64; 6]>,
    /// Style opacity; unset means fully opaque.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    /// Style fill.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    /// Child nodes in document order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeDef>,
}

impl NodeDef {
    /// Anonymous node with the given tag and an empty bbox.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            id: None,
            tag: tag.into(),
            bbox: [0.0; 4],
            transforms: Vec::new(),
            opacity: None,
            fill: None,
            children: Vec::new(),
        }
    }

    /// Set the element id.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the local bbox.
    pub fn bbox(mut self, x: f64, y: f64, width: f64, height: f64) -> Self {
        self.bbox = [x, y, width, height];
        self
    }

    /// Append a transform-list entry.
    pub fn transform(mut self, m: Affine) -> Self {
        self.transforms.push(m.as_coeffs());
        self
    }

    /// Set the style opacity.
    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    /// Set the style fill.
    pub fn fill(mut self, fill: impl Into<String>) -> Self {
        self.fill = Some(fill.into());
        self
    }

    /// Append a child node.
    pub fn child(mut self, child: NodeDef) -> Self {
        self.children.push(child);
        self
    }

    pub(crate) fn bbox_rect(&self) -> Rect {
        let [x, y, w, h] = self.bbox;
        Rect::new(x, y, x + w, y + h)
    }
}
