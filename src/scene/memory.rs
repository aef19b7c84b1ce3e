//! In-memory retained scene with a logical clock.
//!
//! Transitions are recorded when issued and become visible as the clock moves
//! ([`MemoryScene::tick`]) or all at once ([`MemoryScene::settle`]). Reads always return what is
//! visible *now*, so a half-finished fade reports its in-between opacity, the same way a browser
//! reports computed style mid-transition.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::animation::ease::{Ease, progress};
use crate::animation::zoom::ZoomTransition;
use crate::foundation::core::{Affine, Rect, ViewportPos};
use crate::foundation::error::{PanslideError, PanslideResult};
use crate::scene::model::{NodeDef, SceneDef};
use crate::scene::node::{Attr, AttrValue, NodeId, Scene, Transition};

/// Element id the scene root answers to.
pub const ROOT_ID: &str = "svg";

/// A transition as it was handed to the scene.
#[derive(Clone, Debug, PartialEq)]
pub enum Issued {
    /// Attribute transition on a node.
    Element {
        /// Target node.
        node: NodeId,
        /// The request.
        transition: Transition,
        /// Scene clock at issue time.
        at_ms: u64,
    },
    /// Camera move.
    Zoom {
        /// The request.
        transition: ZoomTransition,
        /// Scene clock at issue time.
        at_ms: u64,
    },
}

#[derive(Clone, Debug)]
struct NodeData {
    id: Option<String>,
    tag: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    bbox: Rect,
    transforms: Vec<Affine>,
    opacity: Option<f64>,
    fill: Option<String>,
}

#[derive(Clone, Debug)]
struct Running {
    from: AttrValue,
    transition: Transition,
    issued_ms: u64,
}

impl Running {
    fn progress(&self, now_ms: u64) -> f64 {
        progress(
            now_ms,
            self.issued_ms,
            self.transition.delay_ms,
            self.transition.duration_ms,
        )
    }

    fn end_ms(&self) -> u64 {
        self.issued_ms
            .saturating_add(self.transition.delay_ms)
            .saturating_add(self.transition.duration_ms)
    }
}

#[derive(Clone, Copy, Debug)]
struct RunningZoom {
    transition: ZoomTransition,
    issued_ms: u64,
}

impl RunningZoom {
    fn progress(&self, now_ms: u64) -> f64 {
        progress(
            now_ms,
            self.issued_ms,
            self.transition.delay_ms,
            self.transition.duration_ms,
        )
    }

    fn end_ms(&self) -> u64 {
        self.issued_ms
            .saturating_add(self.transition.delay_ms)
            .saturating_add(self.transition.duration_ms)
    }
}

/// Retained scene graph kept entirely in memory.
///
/// Client rects are reported in root coordinates, i.e. as seen by an unzoomed camera; the camera
/// itself is tracked separately ([`MemoryScene::camera`]).
#[derive(Clone, Debug)]
pub struct MemoryScene {
    nodes: Vec<NodeData>,
    by_id: BTreeMap<String, NodeId>,
    viewport: Rect,
    camera: ViewportPos,
    now_ms: u64,
    running: BTreeMap<(NodeId, Attr), Running>,
    running_zoom: Option<RunningZoom>,
    events: Vec<String>,
    issued: Vec<Issued>,
}

impl MemoryScene {
    /// Empty scene showing `viewport`; the root node answers to [`ROOT_ID`].
    pub fn new(viewport: Rect) -> Self {
        let root = NodeData {
            id: Some(ROOT_ID.to_string()),
            tag: "svg".to_string(),
            parent: None,
            children: Vec::new(),
            bbox: viewport,
            transforms: Vec::new(),
            opacity: None,
            fill: None,
        };
        let mut by_id = BTreeMap::new();
        by_id.insert(ROOT_ID.to_string(), NodeId(0));
        Self {
            nodes: vec![root],
            by_id,
            viewport,
            camera: ViewportPos::from_rect(viewport),
            now_ms: 0,
            running: BTreeMap::new(),
            running_zoom: None,
            events: Vec::new(),
            issued: Vec::new(),
        }
    }

    /// Build a scene from its JSON-facing definition.
    pub fn from_def(def: SceneDef) -> PanslideResult<Self> {
        let [x, y, w, h] = def.viewport;
        let mut scene = Self::new(Rect::new(x, y, x + w, y + h));
        let root = scene.root();
        for node in def.nodes {
            scene.add_node(root, node)?;
        }
        Ok(scene)
    }

    /// Parse a scene definition from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> PanslideResult<Self> {
        let def: SceneDef = serde_json::from_reader(r)
            .map_err(|e| PanslideError::serde(format!("parse scene JSON: {e}")))?;
        Self::from_def(def)
    }

    /// Parse a scene definition from a JSON string.
    pub fn from_json_str(s: &str) -> PanslideResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    /// Parse a scene definition from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> PanslideResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            PanslideError::validation(format!("open scene JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// The root node.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append `def` (and its subtree) as the last child of `parent`.
    pub fn add_node(&mut self, parent: NodeId, def: NodeDef) -> PanslideResult<NodeId> {
        if parent.index() >= self.nodes.len() {
            return Err(PanslideError::validation(format!(
                "parent node {} does not exist",
                parent.index()
            )));
        }
        let [_, _, w, h] = def.bbox;
        if def.bbox.iter().any(|v| !v.is_finite()) || w < 0.0 || h < 0.0 {
            return Err(PanslideError::validation(format!(
                "node {:?} has an invalid bbox {:?}",
                def.id, def.bbox
            )));
        }
        if let Some(op) = def.opacity
            && !(0.0..=1.0).contains(&op)
        {
            return Err(PanslideError::validation(format!(
                "node {:?} opacity {op} is outside [0, 1]",
                def.id
            )));
        }

        let node = NodeId(self.nodes.len() as u32);
        if let Some(id) = &def.id {
            match self.by_id.get(id) {
                // A document element named like the root alias takes the name over.
                Some(&owner) if owner == self.root() && id == ROOT_ID => {
                    if self.nodes[0].id.as_deref() == Some(ROOT_ID) {
                        self.nodes[0].id = None;
                    }
                }
                Some(_) => {
                    return Err(PanslideError::validation(format!(
                        "duplicate element id '{id}'"
                    )));
                }
                None => {}
            }
            self.by_id.insert(id.clone(), node);
        }

        self.nodes.push(NodeData {
            id: def.id.clone(),
            tag: def.tag.clone(),
            parent: Some(parent),
            children: Vec::new(),
            bbox: def.bbox_rect(),
            transforms: def.transforms.iter().map(|c| Affine::new(*c)).collect(),
            opacity: def.opacity,
            fill: def.fill.clone(),
        });
        self.nodes[parent.index()].children.push(node);

        for child in def.children {
            self.add_node(node, child)?;
        }
        Ok(node)
    }

    /// Make `node` selectable under `id` as well; the first alias also becomes its element id.
    pub fn alias(&mut self, id: &str, node: NodeId) -> PanslideResult<()> {
        if node.index() >= self.nodes.len() {
            return Err(PanslideError::validation(format!(
                "node {} does not exist",
                node.index()
            )));
        }
        match self.by_id.get(id) {
            Some(&owner) if owner == node => return Ok(()),
            Some(_) => {
                return Err(PanslideError::validation(format!("duplicate element id '{id}'")));
            }
            None => {}
        }
        self.by_id.insert(id.to_string(), node);
        let data = &mut self.nodes[node.index()];
        if data.id.is_none() || (node.index() == 0 && data.id.as_deref() == Some(ROOT_ID)) {
            data.id = Some(id.to_string());
        }
        Ok(())
    }

    /// Number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Element id of `node`, if it has one.
    pub fn id_of(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node.index()).and_then(|n| n.id.as_deref())
    }

    /// Current scene clock.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Move the clock forward, finishing every transition that completes on the way.
    pub fn tick(&mut self, ms: u64) {
        self.now_ms = self.now_ms.saturating_add(ms);
        let now = self.now_ms;

        let finished: Vec<(NodeId, Attr)> = self
            .running
            .iter()
            .filter(|(_, r)| r.progress(now) >= 1.0)
            .map(|(k, _)| *k)
            .collect();
        for key in finished {
            if let Some(r) = self.running.remove(&key) {
                self.commit(key.0, r.transition.value);
            }
        }

        if let Some(z) = self.running_zoom
            && z.progress(now) >= 1.0
        {
            self.camera = z.transition.path.to();
            self.running_zoom = None;
        }
    }

    /// Jump the clock to the end of the longest running transition.
    pub fn settle(&mut self) {
        let end = self
            .running
            .values()
            .map(Running::end_ms)
            .chain(self.running_zoom.iter().map(RunningZoom::end_ms))
            .max()
            .unwrap_or(self.now_ms);
        self.tick(end.saturating_sub(self.now_ms));
    }

    /// No transition is pending or in flight.
    pub fn is_idle(&self) -> bool {
        self.running.is_empty() && self.running_zoom.is_none()
    }

    /// Visible camera.
    pub fn camera(&self) -> ViewportPos {
        match &self.running_zoom {
            Some(z) => {
                let t = z.progress(self.now_ms);
                z.transition.path.sample(Ease::default().apply(t))
            }
            None => self.camera,
        }
    }

    /// Visible opacity of the element `id`, unset counting as 1.
    pub fn opacity(&self, id: &str) -> Option<f64> {
        let node = self.select(id)?;
        Some(
            self.style(node, Attr::Opacity)
                .and_then(|v| v.as_number())
                .unwrap_or(1.0),
        )
    }

    /// Visible fill of `node`, unset counting as `"black"`.
    pub fn fill(&self, node: NodeId) -> String {
        self.style(node, Attr::Fill)
            .and_then(|v| v.as_paint().map(str::to_string))
            .unwrap_or_else(|| "black".to_string())
    }

    /// Notifications delivered so far.
    pub fn events(&self) -> &[String] {
        &self.events
    }

    /// Every transition issued so far, in order.
    pub fn issued(&self) -> &[Issued] {
        &self.issued
    }

    fn data(&self, node: NodeId) -> Option<&NodeData> {
        self.nodes.get(node.index())
    }

    fn base_value(&self, node: NodeId, attr: Attr) -> Option<AttrValue> {
        let n = self.data(node)?;
        match attr {
            Attr::Transform => {
                if n.transforms.is_empty() {
                    None
                } else {
                    Some(AttrValue::Matrix(
                        n.transforms.iter().fold(Affine::IDENTITY, |m, t| m * *t),
                    ))
                }
            }
            Attr::Opacity => n.opacity.map(AttrValue::Number),
            Attr::Fill => n.fill.clone().map(AttrValue::Paint),
        }
    }

    fn visible_value(&self, node: NodeId, attr: Attr) -> Option<AttrValue> {
        match self.running.get(&(node, attr)) {
            Some(r) => Some(interpolate(
                &r.from,
                &r.transition.value,
                r.transition.ease.apply(r.progress(self.now_ms)),
            )),
            None => self.base_value(node, attr),
        }
    }

    fn commit(&mut self, node: NodeId, value: AttrValue) {
        let Some(n) = self.nodes.get_mut(node.index()) else {
            return;
        };
        match value {
            AttrValue::Matrix(m) => n.transforms = vec![m],
            AttrValue::Number(v) => n.opacity = Some(v),
            AttrValue::Paint(p) => n.fill = Some(p),
        }
    }

    fn abs_transform(&self, node: NodeId) -> Affine {
        let mut chain = Vec::new();
        let mut cur = Some(node);
        while let Some(n) = cur {
            chain.push(n);
            cur = self.data(n).and_then(|d| d.parent);
        }
        chain.iter().rev().fold(Affine::IDENTITY, |m, n| {
            self.transform_list(*n).into_iter().fold(m, |acc, t| acc * t)
        })
    }

    fn collect_matching(&self, node: NodeId, selector: &str, out: &mut Vec<NodeId>) {
        let Some(n) = self.data(node) else {
            return;
        };
        for &child in &n.children {
            if let Some(c) = self.data(child)
                && (selector == "*" || c.tag == selector)
            {
                out.push(child);
            }
            self.collect_matching(child, selector, out);
        }
    }
}

fn default_value(attr: Attr) -> AttrValue {
    match attr {
        Attr::Transform => AttrValue::Matrix(Affine::IDENTITY),
        Attr::Opacity => AttrValue::Number(1.0),
        Attr::Fill => AttrValue::Paint("black".to_string()),
    }
}

fn interpolate(from: &AttrValue, to: &AttrValue, t: f64) -> AttrValue {
    if t >= 1.0 {
        return to.clone();
    }
    match (from, to) {
        (AttrValue::Number(a), AttrValue::Number(b)) => AttrValue::Number(a + (b - a) * t),
        (AttrValue::Matrix(a), AttrValue::Matrix(b)) => {
            let a = a.as_coeffs();
            let b = b.as_coeffs();
            AttrValue::Matrix(Affine::new(std::array::from_fn(|i| {
                a[i] + (b[i] - a[i]) * t
            })))
        }
        // Paints and mismatched kinds hold until the transition ends.
        _ => from.clone(),
    }
}

impl Scene for MemoryScene {
    fn select(&self, id: &str) -> Option<NodeId> {
        self.by_id.get(id).copied()
    }

    fn bbox(&self, node: NodeId) -> Rect {
        self.data(node).map(|n| n.bbox).unwrap_or(Rect::ZERO)
    }

    fn client_rect(&self, node: NodeId) -> Rect {
        if node == self.root() {
            return self.viewport;
        }
        self.abs_transform(node).transform_rect_bbox(self.bbox(node))
    }

    fn transform_list(&self, node: NodeId) -> Vec<Affine> {
        if self.running.contains_key(&(node, Attr::Transform)) {
            let m = self
                .visible_value(node, Attr::Transform)
                .and_then(|v| v.as_matrix())
                .unwrap_or(Affine::IDENTITY);
            return vec![m];
        }
        self.data(node)
            .map(|n| n.transforms.clone())
            .unwrap_or_default()
    }

    fn style(&self, node: NodeId, attr: Attr) -> Option<AttrValue> {
        self.visible_value(node, attr)
    }

    fn children_matching(&self, node: NodeId, selector: &str) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_matching(node, selector, &mut out);
        out
    }

    fn animate(&mut self, node: NodeId, transition: Transition) {
        if self.data(node).is_none() {
            tracing::warn!(node = node.index(), "animate on unknown node ignored");
            return;
        }
        let attr = transition.attr;
        let from = self
            .visible_value(node, attr)
            .unwrap_or_else(|| default_value(attr));
        self.issued.push(Issued::Element {
            node,
            transition: transition.clone(),
            at_ms: self.now_ms,
        });

        if transition.delay_ms == 0 && transition.duration_ms == 0 {
            self.running.remove(&(node, attr));
            self.commit(node, transition.value);
            return;
        }
        self.running.insert(
            (node, attr),
            Running {
                from,
                transition,
                issued_ms: self.now_ms,
            },
        );
    }

    fn viewport_rect(&self) -> Rect {
        self.viewport
    }

    fn zoom(&mut self, transition: ZoomTransition) {
        self.issued.push(Issued::Zoom {
            transition,
            at_ms: self.now_ms,
        });
        // The camera snaps to the path start, then travels.
        self.camera = transition.path.from();
        if transition.delay_ms == 0 && transition.duration_ms == 0 {
            self.camera = transition.path.to();
            self.running_zoom = None;
            return;
        }
        self.running_zoom = Some(RunningZoom {
            transition,
            issued_ms: self.now_ms,
        });
    }

    fn notify(&mut self, event: &str) {
        self.events.push(event.to_string());
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/memory.rs"]
mod tests;
