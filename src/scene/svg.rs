//! SVG import: builds a [`MemoryScene`] from an SVG document via `usvg`.
//!
//! `usvg` resolves styles and flattens `<use>`, CSS and nested viewports; what survives is a
//! tree of groups, paths, images and text. Each element that carried an `id` stays selectable.
//! Groups keep their own transform as a one-entry transform list, paths keep their solid fill.

use std::path::Path;

use anyhow::Context as _;
use usvg::roxmltree;

use crate::foundation::core::{Affine, Rect};
use crate::foundation::error::{PanslideError, PanslideResult};
use crate::scene::memory::MemoryScene;
use crate::scene::model::NodeDef;

/// Parse SVG bytes into a `usvg` tree.
pub fn parse_svg(bytes: &[u8]) -> PanslideResult<usvg::Tree> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts).context("parse svg tree")?;
    Ok(tree)
}

/// Read and parse an SVG file.
pub fn load_svg(path: impl AsRef<Path>) -> PanslideResult<usvg::Tree> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)
        .with_context(|| format!("read svg '{}'", path.display()))?;
    parse_svg(&bytes)
}

/// Parse SVG (or gzip-compressed SVGZ) bytes, keeping the root element's `id`.
///
/// `usvg` folds the root `<svg>` into its tree root and drops its attributes.
fn parse_document(bytes: &[u8]) -> PanslideResult<(usvg::Tree, Option<String>)> {
    let inflated;
    let data = if bytes.starts_with(&[0x1f, 0x8b]) {
        inflated = usvg::decompress_svgz(bytes).context("inflate svgz")?;
        inflated.as_slice()
    } else {
        bytes
    };
    let text = std::str::from_utf8(data).context("svg is not valid UTF-8")?;
    let xml_opts = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..Default::default()
    };
    let doc = roxmltree::Document::parse_with_options(text, xml_opts).context("parse svg xml")?;
    let root_id = doc
        .root_element()
        .attribute("id")
        .filter(|id| !id.is_empty())
        .map(str::to_string);
    let tree = usvg::Tree::from_xmltree(&doc, &usvg::Options::default())
        .context("parse svg tree")?;
    Ok((tree, root_id))
}

pub(crate) fn to_affine(t: usvg::Transform) -> Affine {
    Affine::new([
        f64::from(t.sx),
        f64::from(t.ky),
        f64::from(t.kx),
        f64::from(t.sy),
        f64::from(t.tx),
        f64::from(t.ty),
    ])
}

fn to_rect(r: usvg::Rect) -> Rect {
    Rect::new(
        f64::from(r.left()),
        f64::from(r.top()),
        f64::from(r.right()),
        f64::from(r.bottom()),
    )
}

fn paint_string(paint: &usvg::Paint) -> Option<String> {
    match paint {
        usvg::Paint::Color(c) => Some(format!("#{:02x}{:02x}{:02x}", c.red, c.green, c.blue)),
        _ => None,
    }
}

fn node_def(node: &usvg::Node) -> NodeDef {
    let abs = to_affine(node.abs_transform());
    let abs_bbox = to_rect(node.abs_bounding_box());
    // Undo the accumulated transform to get the bbox in the element's own user space.
    let local = if abs.determinant().abs() > f64::EPSILON {
        abs.inverse().transform_rect_bbox(abs_bbox)
    } else {
        abs_bbox
    };

    let tag = match node {
        usvg::Node::Group(_) => "g",
        usvg::Node::Path(_) => "path",
        usvg::Node::Image(_) => "image",
        usvg::Node::Text(_) => "text",
    };
    let mut def = NodeDef::new(tag).bbox(local.x0, local.y0, local.width(), local.height());
    if !node.id().is_empty() {
        def = def.id(node.id());
    }

    match node {
        usvg::Node::Group(g) => {
            if !g.transform().is_identity() {
                def = def.transform(to_affine(g.transform()));
            }
            let opacity = f64::from(g.opacity().get());
            if opacity < 1.0 {
                def = def.opacity(opacity);
            }
            for child in g.children() {
                def = def.child(node_def(child));
            }
        }
        usvg::Node::Path(p) => {
            if let Some(fill) = p.fill().and_then(|f| paint_string(f.paint())) {
                def = def.fill(fill);
            }
        }
        usvg::Node::Image(_) | usvg::Node::Text(_) => {}
    }
    def
}

impl MemoryScene {
    /// Build a scene from a parsed SVG tree; the root `<svg>` answers to `"svg"`.
    ///
    /// An element of the document that is itself named `"svg"` takes that name over.
    pub fn from_svg_tree(tree: &usvg::Tree) -> PanslideResult<Self> {
        Self::from_svg_parts(tree, None)
    }

    fn from_svg_parts(tree: &usvg::Tree, root_id: Option<&str>) -> PanslideResult<Self> {
        let size = tree.size();
        let viewport = Rect::new(0.0, 0.0, f64::from(size.width()), f64::from(size.height()));
        let mut scene = MemoryScene::new(viewport);
        let root = scene.root();

        let top = tree.root();
        let children: Vec<NodeDef> = top.children().iter().map(node_def).collect();
        if top.transform().is_identity() {
            for child in children {
                scene.add_node(root, child)?;
            }
        } else {
            // viewBox scaling lands on the root group; keep it above everything else.
            let mut wrapper = NodeDef::new("g").transform(to_affine(top.transform()));
            wrapper.children = children;
            scene.add_node(root, wrapper)?;
        }
        if let Some(id) = root_id {
            scene.alias(id, root)?;
        }

        tracing::debug!(
            nodes = scene.node_count(),
            width = viewport.width(),
            height = viewport.height(),
            root_id,
            "imported svg scene"
        );
        Ok(scene)
    }

    /// Parse SVG bytes and build a scene from them; an `id` on the root `<svg>` selects the root.
    pub fn from_svg_data(bytes: &[u8]) -> PanslideResult<Self> {
        let (tree, root_id) = parse_document(bytes)?;
        Self::from_svg_parts(&tree, root_id.as_deref())
    }

    /// Read an SVG file and build a scene from it.
    pub fn from_svg_path(path: impl AsRef<Path>) -> PanslideResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("read svg '{}'", path.display()))?;
        Self::from_svg_data(&bytes)
    }
}

/// Load a scene from `path`, picking the format from the extension (`.svg` or JSON).
pub fn load_scene(path: impl AsRef<Path>) -> PanslideResult<MemoryScene> {
    let path = path.as_ref();
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("svg") => MemoryScene::from_svg_path(path),
        Some(ext) if ext.eq_ignore_ascii_case("json") => MemoryScene::from_path(path),
        _ => Err(PanslideError::validation(format!(
            "scene '{}' must be an .svg or .json file",
            path.display()
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/svg.rs"]
mod tests;
