//! `SceneGraph` on top of fixed-position `div`s.

use crate::constants::*;
use aura_core::{ElementId, NodeId, NodeKind, NodeSpec, Rgba, SceneGraph, Transform};
use fnv::FnvHashMap;
use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys as web;

pub const NODE_CLASS: &str = "aura-node";

struct DomNode {
    el: web::HtmlElement,
    kind: NodeKind,
    diameter: f32,
}

pub struct DomScene {
    document: web::Document,
    root: web::Element,
    next: u64,
    nodes: FnvHashMap<NodeId, DomNode>,
    elements: FnvHashMap<ElementId, web::HtmlElement>,
}

fn set_style(el: &web::HtmlElement, prop: &str, value: &str) {
    _ = el.style().set_property(prop, value);
}

fn kind_class(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Glyph => "aura-glyph",
        NodeKind::Echo(_) => "aura-echo",
        NodeKind::Spotlight => "aura-spotlight",
        NodeKind::ProgressBar => "aura-progress",
        NodeKind::Ring => "aura-ring",
        NodeKind::Particle => "aura-particle",
    }
}

fn z_index(kind: NodeKind) -> i32 {
    match kind {
        NodeKind::Glyph => Z_GLYPH,
        NodeKind::Echo(_) => Z_ECHO,
        NodeKind::Spotlight => Z_SPOTLIGHT,
        NodeKind::ProgressBar => Z_PROGRESS,
        NodeKind::Ring | NodeKind::Particle => Z_EFFECT,
    }
}

fn css_transform(t: &Transform) -> String {
    format!(
        "translate3d({:.2}px, {:.2}px, 0) translate(-50%, -50%) scale({:.4})",
        t.centre.x, t.centre.y, t.scale
    )
}

impl DomScene {
    /// Nodes are appended to `root` (normally `<body>`).
    pub fn new(document: web::Document, root: web::Element) -> Self {
        Self {
            document,
            root,
            next: 0,
            nodes: FnvHashMap::default(),
            elements: FnvHashMap::default(),
        }
    }

    pub fn for_body(document: &web::Document) -> anyhow::Result<Self> {
        let body = document
            .body()
            .ok_or_else(|| anyhow::anyhow!("document has no <body>"))?;
        Ok(Self::new(document.clone(), body.into()))
    }

    /// Make a page element addressable by `set_element_offset`.
    pub fn attach_element(&mut self, id: ElementId, el: web::HtmlElement) {
        self.elements.insert(id, el);
    }

    pub fn element(&self, id: ElementId) -> Option<&web::HtmlElement> {
        self.elements.get(&id)
    }

    pub fn live_nodes(&self) -> usize {
        self.nodes.len()
    }

    fn create(&self, spec: &NodeSpec) -> Option<web::HtmlElement> {
        let el: web::HtmlElement = self
            .document
            .create_element("div")
            .ok()?
            .dyn_into()
            .ok()?;
        el.set_class_name(&format!("{} {}", NODE_CLASS, kind_class(spec.kind)));
        _ = el.set_attribute("aria-hidden", "true");
        set_style(&el, "position", "fixed");
        set_style(&el, "pointer-events", "none");
        set_style(&el, "z-index", &z_index(spec.kind).to_string());
        set_style(&el, "will-change", "transform, opacity");

        if spec.kind == NodeKind::ProgressBar {
            set_style(&el, "left", "0");
            set_style(&el, "top", "0");
            set_style(&el, "width", "100%");
            set_style(&el, "height", &format!("{}px", PROGRESS_BAR_HEIGHT_PX));
            set_style(&el, "transform-origin", "0 50%");
            set_style(&el, "background", &spec.fill.to_string());
        } else {
            let d = format!("{:.2}px", spec.transform.diameter);
            set_style(&el, "left", "0");
            set_style(&el, "top", "0");
            set_style(&el, "width", &d);
            set_style(&el, "height", &d);
            set_style(&el, "border-radius", "50%");
            if spec.kind == NodeKind::Spotlight {
                set_style(
                    &el,
                    "background",
                    &format!("radial-gradient(circle, {} 0%, transparent 70%)", spec.fill),
                );
            } else {
                set_style(&el, "background", &spec.fill.to_string());
            }
            if let Some(outline) = spec.outline {
                set_style(&el, "border", &format!("1.5px solid {}", outline));
            }
        }
        Some(el)
    }

    fn apply_transform(node: &mut DomNode, t: &Transform) {
        if node.kind == NodeKind::ProgressBar {
            set_style(&node.el, "transform", &format!("scaleX({:.4})", t.scale));
            return;
        }
        if (node.diameter - t.diameter).abs() > f32::EPSILON {
            let d = format!("{:.2}px", t.diameter);
            set_style(&node.el, "width", &d);
            set_style(&node.el, "height", &d);
            node.diameter = t.diameter;
        }
        set_style(&node.el, "transform", &css_transform(t));
    }
}

impl SceneGraph for DomScene {
    fn spawn(&mut self, spec: NodeSpec) -> NodeId {
        let id = NodeId(self.next);
        self.next += 1;
        let Some(el) = self.create(&spec) else {
            log::warn!("[cursor] could not create node {:?}", spec.kind);
            return id;
        };
        if self.root.append_child(&el).is_err() {
            log::warn!("[cursor] could not attach node {:?}", spec.kind);
            return id;
        }
        let mut node = DomNode {
            el,
            kind: spec.kind,
            diameter: spec.transform.diameter,
        };
        Self::apply_transform(&mut node, &spec.transform);
        set_style(&node.el, "opacity", &format!("{:.3}", spec.opacity));
        self.nodes.insert(id, node);
        id
    }

    fn set_transform(&mut self, node: NodeId, transform: Transform) {
        if let Some(n) = self.nodes.get_mut(&node) {
            Self::apply_transform(n, &transform);
        }
    }

    fn set_opacity(&mut self, node: NodeId, opacity: f32) {
        if let Some(n) = self.nodes.get(&node) {
            set_style(&n.el, "opacity", &format!("{:.3}", opacity));
        }
    }

    fn set_fill(&mut self, node: NodeId, fill: Rgba) {
        if let Some(n) = self.nodes.get(&node) {
            set_style(&n.el, "background", &fill.to_string());
        }
    }

    fn set_outline(&mut self, node: NodeId, outline: Rgba) {
        if let Some(n) = self.nodes.get(&node) {
            set_style(&n.el, "border", &format!("1.5px solid {}", outline));
        }
    }

    fn remove(&mut self, node: NodeId) {
        if let Some(n) = self.nodes.remove(&node) {
            n.el.remove();
        }
    }

    fn set_element_offset(&mut self, element: ElementId, offset: Vec2, scale: f32) {
        let Some(el) = self.elements.get(&element) else {
            return;
        };
        if offset == Vec2::ZERO && scale == 1.0 {
            _ = el.style().remove_property("transform");
        } else {
            set_style(
                el,
                "transform",
                &format!(
                    "translate({:.2}px, {:.2}px) scale({:.3})",
                    offset.x, offset.y, scale
                ),
            );
        }
    }
}
