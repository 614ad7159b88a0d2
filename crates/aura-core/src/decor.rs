//! Decorative 3D layer: rotating torus rings and a sparkle field.
//!
//! Pure state only; the web renderer reads matrices and instance data out of
//! here each frame. Pointer and scroll are read-only inputs and nothing in
//! the cursor system depends on this module.

use crate::color::Rgba;
use crate::constants::*;
use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};
use rand::prelude::*;
use std::f32::consts::{FRAC_PI_4, TAU};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingSpec {
    pub radius: f32,
    pub tube: f32,
    pub color: Rgba,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RingState {
    pub rotation: Vec3,
    pub position: Vec3,
    pub scale: f32,
}

/// The four-ring "reactor" arrangement.
pub fn reactor_rings() -> Vec<RingSpec> {
    let deep = Rgba::from_u8(0x60, 0xA5, 0xFA, 1.0);
    let pale = Rgba::from_u8(0x93, 0xC5, 0xFD, 1.0);
    vec![
        RingSpec {
            radius: 2.0,
            tube: 0.1,
            color: deep,
        },
        RingSpec {
            radius: 1.5,
            tube: 0.08,
            color: pale,
        },
        RingSpec {
            radius: 2.5,
            tube: 0.12,
            color: deep,
        },
        RingSpec {
            radius: 1.8,
            tube: 0.09,
            color: pale,
        },
    ]
}

#[derive(Clone, Debug)]
pub struct RingField {
    specs: Vec<RingSpec>,
    states: Vec<RingState>,
    elapsed: f32,
    emissive: f32,
    frozen: bool,
}

impl RingField {
    pub fn new(specs: Vec<RingSpec>) -> Self {
        let states = (0..specs.len())
            .map(|i| RingState {
                rotation: Vec3::ZERO,
                position: Vec3::new(0.0, i as f32 * 0.5 - 0.75, 0.0),
                scale: 1.0,
            })
            .collect();
        Self {
            specs,
            states,
            elapsed: 0.0,
            emissive: DECOR_BASE_EMISSIVE,
            frozen: false,
        }
    }

    pub fn specs(&self) -> &[RingSpec] {
        &self.specs
    }

    pub fn states(&self) -> &[RingState] {
        &self.states
    }

    pub fn emissive(&self) -> f32 {
        self.emissive
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// A frozen field keeps its last pose (reduced motion).
    pub fn set_frozen(&mut self, frozen: bool) {
        self.frozen = frozen;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// `pointer` is in normalised device coordinates (-1..1, y up);
    /// `scroll` in CSS pixels.
    pub fn step(&mut self, dt_sec: f32, pointer: Vec2, scroll: f32) {
        let scale = scroll_scale(scroll);
        self.emissive = DECOR_BASE_EMISSIVE + pointer.x.abs() * 0.3 + pointer.y.abs() * 0.2;
        if self.frozen {
            for s in &mut self.states {
                s.scale = scale;
            }
            return;
        }
        let dt = dt_sec.clamp(0.0, 0.1);
        self.elapsed += dt;
        let t = self.elapsed;
        let influence = 1.0 + pointer.length() * DECOR_POINTER_INFLUENCE;
        for (i, s) in self.states.iter_mut().enumerate() {
            let fi = i as f32;
            let speed = DECOR_RING_BASE_SPEED + fi * DECOR_RING_SPEED_STEP;
            let spin = dt * speed * influence;
            s.rotation += Vec3::new(spin, spin * 0.7, spin * 0.5);
            s.rotation = Vec3::new(
                s.rotation.x.rem_euclid(TAU),
                s.rotation.y.rem_euclid(TAU),
                s.rotation.z.rem_euclid(TAU),
            );
            s.position.x = (t * 0.3 + fi).cos() * 0.2 + pointer.x * 0.3;
            s.position.y = (t * 0.5 + fi).sin() * 0.3 + pointer.y * 0.2 + (fi * 0.5 - 0.75);
            s.scale = scale;
        }
    }

    /// Model matrix of ring `i`: animated pose, then the fixed 45° tilt.
    pub fn model_matrix(&self, i: usize) -> Option<Mat4> {
        let s = self.states.get(i)?;
        let spin = Quat::from_euler(EulerRot::XYZ, s.rotation.x, s.rotation.y, s.rotation.z);
        let tilt = Quat::from_euler(EulerRot::XYZ, FRAC_PI_4, FRAC_PI_4, 0.0);
        Some(Mat4::from_scale_rotation_translation(
            Vec3::splat(s.scale),
            spin * tilt,
            s.position,
        ))
    }
}

impl Default for RingField {
    fn default() -> Self {
        Self::new(reactor_rings())
    }
}

pub fn scroll_scale(scroll: f32) -> f32 {
    (1.0 - scroll.max(0.0) * DECOR_SCROLL_SHRINK_PER_PX).max(DECOR_MIN_SCROLL_SCALE)
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TorusVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub vertices: Vec<TorusVertex>,
    pub indices: Vec<u32>,
}

/// Torus around the Z axis. `radial` segments go around the tube,
/// `tubular` segments around the ring.
pub fn torus_mesh(radius: f32, tube: f32, radial: u32, tubular: u32) -> Mesh {
    let radial = radial.max(3);
    let tubular = tubular.max(3);
    let mut mesh = Mesh::default();
    for j in 0..=radial {
        let v = j as f32 / radial as f32 * TAU;
        for i in 0..=tubular {
            let u = i as f32 / tubular as f32 * TAU;
            let centre = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);
            let position = Vec3::new(
                (radius + tube * v.cos()) * u.cos(),
                (radius + tube * v.cos()) * u.sin(),
                tube * v.sin(),
            );
            let normal = (position - centre).normalize_or_zero();
            mesh.vertices.push(TorusVertex {
                position: position.to_array(),
                normal: normal.to_array(),
            });
        }
    }
    let row = tubular + 1;
    for j in 1..=radial {
        for i in 1..=tubular {
            let a = row * j + i - 1;
            let b = row * (j - 1) + i - 1;
            let c = row * (j - 1) + i;
            let d = row * j + i;
            mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
    mesh
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sparkle {
    pub radius: f32,
    pub angle: f32,
    pub height: f32,
    pub size: f32,
    pub brightness: f32,
}

impl Sparkle {
    pub fn position(&self) -> Vec3 {
        Vec3::new(
            self.radius * self.angle.cos(),
            self.height,
            self.radius * self.angle.sin(),
        )
    }
}

/// Seeded sparkle shell orbiting slowly around the rings.
#[derive(Clone, Debug)]
pub struct ParticleField {
    sparkles: Vec<Sparkle>,
    base_brightness: Vec<f32>,
}

impl ParticleField {
    pub fn new(count: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let sparkles: Vec<Sparkle> = (0..count)
            .map(|_| Sparkle {
                radius: rng.gen_range(SPARKLE_INNER_RADIUS..SPARKLE_OUTER_RADIUS),
                angle: rng.gen_range(0.0..TAU),
                height: rng.gen_range(-1.5..1.5),
                size: rng.gen_range(0.02..0.06),
                brightness: rng.gen_range(0.3..0.8),
            })
            .collect();
        let base_brightness = sparkles.iter().map(|s| s.brightness).collect();
        Self {
            sparkles,
            base_brightness,
        }
    }

    pub fn sparkles(&self) -> &[Sparkle] {
        &self.sparkles
    }

    pub fn len(&self) -> usize {
        self.sparkles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sparkles.is_empty()
    }

    /// Orbit and brighten sparkles on the pointer's side of the field.
    pub fn step(&mut self, dt_sec: f32, pointer: Vec2) {
        let dt = dt_sec.clamp(0.0, 0.1);
        let pointer_dir = pointer.clamp_length_max(1.0);
        for (s, base) in self.sparkles.iter_mut().zip(&self.base_brightness) {
            s.angle = (s.angle + dt * SPARKLE_ORBIT_SPEED).rem_euclid(TAU);
            let facing = Vec2::new(s.angle.cos(), s.height / 1.5).dot(pointer_dir).max(0.0);
            s.brightness = (base + facing * 0.4).min(1.0);
        }
    }
}

impl Default for ParticleField {
    fn default() -> Self {
        Self::new(DEFAULT_SPARKLE_COUNT, 7)
    }
}
