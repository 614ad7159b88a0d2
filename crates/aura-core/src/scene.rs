//! Render back-end seam. The animation logic only ever talks to a
//! [`SceneGraph`]; the web shell implements it with DOM nodes, tests with a
//! recording double.

use crate::color::Rgba;
use crate::responder::ElementId;
use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Glyph,
    Echo(usize),
    Spotlight,
    /// Horizontal bar pinned to the top of the viewport; only `scale` of its
    /// transform is meaningful (as scaleX).
    ProgressBar,
    Ring,
    Particle,
}

/// Every node is a circle of `diameter` CSS pixels centred on `centre`,
/// uniformly scaled by `scale`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub centre: Vec2,
    pub diameter: f32,
    pub scale: f32,
}

impl Transform {
    pub fn new(centre: Vec2, diameter: f32, scale: f32) -> Self {
        Self {
            centre,
            diameter,
            scale,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeSpec {
    pub kind: NodeKind,
    pub transform: Transform,
    pub opacity: f32,
    pub fill: Rgba,
    pub outline: Option<Rgba>,
}

pub trait SceneGraph {
    fn spawn(&mut self, spec: NodeSpec) -> NodeId;
    fn set_transform(&mut self, node: NodeId, transform: Transform);
    fn set_opacity(&mut self, node: NodeId, opacity: f32);
    fn set_fill(&mut self, node: NodeId, fill: Rgba);
    fn set_outline(&mut self, node: NodeId, outline: Rgba);
    /// Detach the node. Called exactly once per spawned node.
    fn remove(&mut self, node: NodeId);
    /// Offset a page element (not a spawned node) from its layout position.
    fn set_element_offset(&mut self, element: ElementId, offset: Vec2, scale: f32);
}
