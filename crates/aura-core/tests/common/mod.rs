// Recording scene double shared by the integration tests.

#![allow(dead_code)]

use aura_core::{ElementId, NodeId, NodeKind, NodeSpec, Rgba, SceneGraph, Transform};
use glam::Vec2;
use std::collections::BTreeMap;

#[derive(Clone, Debug)]
pub struct NodeRecord {
    pub spec: NodeSpec,
    pub transform: Transform,
    pub opacity: f32,
    pub fill: Rgba,
}

#[derive(Debug, Default)]
pub struct RecordingScene {
    next: u64,
    pub live: BTreeMap<NodeId, NodeRecord>,
    pub spawned: u64,
    pub removed: u64,
    /// Calls that touched a node which was never spawned or already removed.
    pub stale_calls: u64,
    pub element_offsets: BTreeMap<ElementId, (Vec2, f32)>,
    /// Last written state of every removed node.
    pub retired: BTreeMap<NodeId, NodeRecord>,
}

impl RecordingScene {
    pub fn live_of(&self, kind: NodeKind) -> usize {
        self.live.values().filter(|n| n.spec.kind == kind).count()
    }

    pub fn live_particles(&self) -> Vec<&NodeRecord> {
        self.live
            .values()
            .filter(|n| n.spec.kind == NodeKind::Particle)
            .collect()
    }

    pub fn glyph(&self) -> Option<&NodeRecord> {
        self.live.values().find(|n| n.spec.kind == NodeKind::Glyph)
    }
}

impl SceneGraph for RecordingScene {
    fn spawn(&mut self, spec: NodeSpec) -> NodeId {
        let id = NodeId(self.next);
        self.next += 1;
        self.spawned += 1;
        self.live.insert(
            id,
            NodeRecord {
                spec,
                transform: spec.transform,
                opacity: spec.opacity,
                fill: spec.fill,
            },
        );
        id
    }

    fn set_transform(&mut self, node: NodeId, transform: Transform) {
        match self.live.get_mut(&node) {
            Some(n) => n.transform = transform,
            None => self.stale_calls += 1,
        }
    }

    fn set_opacity(&mut self, node: NodeId, opacity: f32) {
        match self.live.get_mut(&node) {
            Some(n) => n.opacity = opacity,
            None => self.stale_calls += 1,
        }
    }

    fn set_fill(&mut self, node: NodeId, fill: Rgba) {
        match self.live.get_mut(&node) {
            Some(n) => n.fill = fill,
            None => self.stale_calls += 1,
        }
    }

    fn set_outline(&mut self, node: NodeId, outline: Rgba) {
        match self.live.get_mut(&node) {
            Some(n) => n.spec.outline = Some(outline),
            None => self.stale_calls += 1,
        }
    }

    fn remove(&mut self, node: NodeId) {
        match self.live.remove(&node) {
            Some(record) => {
                self.removed += 1;
                self.retired.insert(node, record);
            }
            None => self.stale_calls += 1,
        }
    }

    fn set_element_offset(&mut self, element: ElementId, offset: Vec2, scale: f32) {
        self.element_offsets.insert(element, (offset, scale));
    }
}
