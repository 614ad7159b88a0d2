//! Hover/press responses for registered page elements.
//!
//! Elements are classified once, when they are registered, into an
//! [`ElementRole`]. Hovering only looks the role up.

use crate::color::Rgba;
use crate::config::{parse_f32, ConfigError};
use crate::constants::{DEFAULT_MAGNET_RADIUS_PX, DEFAULT_MAGNET_STRENGTH, TRAIL_HOVER_PULSE};
use crate::glyph::VisualTarget;
use fnv::FnvHashMap;
use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementRole {
    Button,
    Link,
    Input,
    Generic,
}

impl ElementRole {
    /// Classify from a tag name plus the optional `role` and `data-cursor`
    /// attributes. `data-cursor` wins, then ARIA role, then the tag.
    pub fn classify(tag: &str, aria_role: Option<&str>, cursor_hint: Option<&str>) -> Self {
        if let Some(role) = cursor_hint.and_then(Self::from_hint) {
            return role;
        }
        if let Some(role) = aria_role.and_then(Self::from_hint) {
            return role;
        }
        match tag.to_ascii_lowercase().as_str() {
            "button" => ElementRole::Button,
            "a" => ElementRole::Link,
            "input" | "textarea" | "select" => ElementRole::Input,
            _ => ElementRole::Generic,
        }
    }

    fn from_hint(hint: &str) -> Option<Self> {
        match hint.trim().to_ascii_lowercase().as_str() {
            "button" => Some(ElementRole::Button),
            "link" => Some(ElementRole::Link),
            "input" | "text" | "textbox" | "searchbox" => Some(ElementRole::Input),
            "generic" => Some(ElementRole::Generic),
            _ => None,
        }
    }

    pub fn visual_target(self) -> VisualTarget {
        let brand = |a: f32| Rgba::from_u8(30, 58, 95, a);
        match self {
            ElementRole::Button => VisualTarget {
                scale: 2.5,
                opacity: 0.8,
                fill: brand(0.2),
                outline: brand(0.4),
                trail_pulse: TRAIL_HOVER_PULSE,
            },
            ElementRole::Link => VisualTarget {
                scale: 2.0,
                opacity: 0.7,
                fill: brand(0.12),
                outline: brand(0.35),
                trail_pulse: TRAIL_HOVER_PULSE,
            },
            // thin caret-like glyph over text fields
            ElementRole::Input => VisualTarget {
                scale: 0.6,
                opacity: 0.9,
                fill: brand(0.5),
                outline: Rgba::TRANSPARENT,
                trail_pulse: 1.0,
            },
            ElementRole::Generic => VisualTarget {
                scale: 1.6,
                opacity: 0.6,
                fill: brand(0.08),
                outline: brand(0.3),
                trail_pulse: 1.25,
            },
        }
    }
}

/// Pull between the cursor and a flagged element, falling off linearly to
/// zero at `radius`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Magnet {
    pub strength: f32,
    pub radius: f32,
}

impl Default for Magnet {
    fn default() -> Self {
        Self {
            strength: DEFAULT_MAGNET_STRENGTH,
            radius: DEFAULT_MAGNET_RADIUS_PX,
        }
    }
}

impl Magnet {
    /// Read `magnetic-strength` / `magnetic-distance` (attribute names without `data-`).
    pub fn from_attributes<'a, I>(attrs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        Magnet::default().overlay(attrs)
    }

    /// Same as [`from_attributes`](Self::from_attributes) but starting from `self`,
    /// so page-wide defaults can be overridden per element.
    pub fn overlay<'a, I>(self, attrs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut m = self;
        for (key, value) in attrs {
            match key {
                "magnetic-strength" => m.strength = parse_f32(key, value)?.clamp(0.0, 1.0),
                "magnetic-distance" => m.radius = parse_f32(key, value)?.max(1.0),
                _ => {}
            }
        }
        Ok(m)
    }

    fn falloff(&self, distance: f32) -> f32 {
        if self.radius <= 0.0 {
            return 0.0;
        }
        self.strength * (1.0 - (distance / self.radius).min(1.0))
    }

    /// Offset added to the glyph's target: toward the element centre.
    pub fn pull(&self, pointer: Vec2, centre: Vec2) -> Vec2 {
        let delta = centre - pointer;
        delta * self.falloff(delta.length())
    }

    /// Offset applied to the element itself: toward the pointer.
    pub fn drift(&self, pointer: Vec2, centre: Vec2) -> Vec2 {
        -self.pull(pointer, centre)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Registration {
    pub role: ElementRole,
    pub magnet: Option<Magnet>,
}

#[derive(Debug, Default)]
pub struct ElementRegistry {
    entries: FnvHashMap<ElementId, Registration>,
    next_id: u32,
}

impl ElementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, role: ElementRole, magnet: Option<Magnet>) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        self.entries.insert(id, Registration { role, magnet });
        id
    }

    pub fn get(&self, id: ElementId) -> Option<&Registration> {
        self.entries.get(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Hovered {
    id: ElementId,
    centre: Vec2,
    registration: Registration,
}

/// Tracks which registered element is hovered and turns hover changes into
/// visual targets.
#[derive(Debug, Default)]
pub struct Responder {
    registry: ElementRegistry,
    hovered: Option<Hovered>,
}

impl Responder {
    pub fn new(registry: ElementRegistry) -> Self {
        Self {
            registry,
            hovered: None,
        }
    }

    pub fn registry(&self) -> &ElementRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ElementRegistry {
        &mut self.registry
    }

    pub fn hovered(&self) -> Option<ElementId> {
        self.hovered.map(|h| h.id)
    }

    /// Returns the target to apply, or `None` for an unknown element.
    pub fn hover_enter(&mut self, id: ElementId, centre: Vec2) -> Option<VisualTarget> {
        let registration = *self.registry.get(id)?;
        self.hovered = Some(Hovered {
            id,
            centre,
            registration,
        });
        Some(registration.role.visual_target())
    }

    /// Returns the resting target if `id` was the hovered element.
    pub fn hover_leave(&mut self, id: ElementId) -> Option<VisualTarget> {
        match self.hovered {
            Some(h) if h.id == id => {
                self.hovered = None;
                Some(VisualTarget::rest())
            }
            _ => None,
        }
    }

    /// Refresh the hovered element's centre after layout or scroll moved it.
    pub fn update_centre(&mut self, id: ElementId, centre: Vec2) {
        if let Some(h) = self.hovered.as_mut().filter(|h| h.id == id) {
            h.centre = centre;
        }
    }

    pub fn clear(&mut self) {
        self.hovered = None;
    }

    pub fn magnetic_pull(&self, pointer: Vec2) -> Vec2 {
        self.hovered
            .and_then(|h| h.registration.magnet.map(|m| m.pull(pointer, h.centre)))
            .unwrap_or(Vec2::ZERO)
    }

    pub fn element_drift(&self, pointer: Vec2) -> Option<(ElementId, Vec2)> {
        let h = self.hovered?;
        let m = h.registration.magnet?;
        Some((h.id, m.drift(pointer, h.centre)))
    }
}
