//! Background field of slowly spinning tori and boxes.

use std::f32::consts::PI;

use glam::Vec3;
use slotmap::{new_key_type, SlotMap};

use crate::math::RandomStream;

new_key_type! {
    /// Stable handle to one shape instance.
    pub struct ShapeKey;
}

#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    Torus = 0,
    Box = 1,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeInstance {
    pub kind: ShapeKind,
    pub position: Vec3,
    /// Euler XYZ, radians.
    pub rotation: Vec3,
    pub scale: f32,
    /// Added to `rotation` every frame after multiplying by the field's spin factor.
    pub rotation_speed: Vec3,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeFieldConfig {
    pub torus_count: u32,
    pub box_count: u32,
    /// Torus major radius and tube radius.
    pub torus: (f32, f32),
    /// Box edge length.
    pub box_size: f32,
    /// x and y are spread over `[-spread/2, spread/2)`.
    pub spread: f32,
    /// z is drawn from `[-(depth_offset + depth_range), -depth_offset)`.
    pub depth_range: f32,
    pub depth_offset: f32,
    /// Uniform scale is drawn from `[min_scale, min_scale + 1)`.
    pub min_scale: f32,
    /// Per-frame rotation step factor.
    pub spin: f32,
}

impl Default for ShapeFieldConfig {
    fn default() -> Self {
        Self {
            torus_count: 30,
            box_count: 30,
            torus: (4.0, 3.0),
            box_size: 10.0,
            spread: 350.0,
            depth_range: 350.0,
            depth_offset: 100.0,
            min_scale: 0.3,
            spin: 0.005,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ShapeField {
    shapes: SlotMap<ShapeKey, ShapeInstance>,
    spin: f32,
}

impl ShapeField {
    pub fn new(spin: f32) -> Self {
        Self {
            shapes: SlotMap::with_key(),
            spin,
        }
    }

    /// Populate a field with randomly placed tori, then boxes.
    pub fn scatter(config: &ShapeFieldConfig, rng: &mut RandomStream) -> Self {
        let mut field = Self::new(config.spin);
        let kinds = std::iter::repeat(ShapeKind::Torus)
            .take(config.torus_count as usize)
            .chain(std::iter::repeat(ShapeKind::Box).take(config.box_count as usize));

        for kind in kinds {
            let position = Vec3::new(
                (rng.next_f32() - 0.5) * config.spread,
                (rng.next_f32() - 0.5) * config.spread,
                rng.next_f32() * -config.depth_range - config.depth_offset,
            );
            let rotation = Vec3::new(rng.next_f32() * PI, rng.next_f32() * PI, 0.0);
            let scale = config.min_scale + rng.next_f32();
            let rotation_speed = Vec3::new(
                (rng.next_f32() - 0.5) * 2.0,
                (rng.next_f32() - 0.5) * 2.0,
                (rng.next_f32() - 0.5) * 2.0,
            );
            field.insert(ShapeInstance {
                kind,
                position,
                rotation,
                scale,
                rotation_speed,
            });
        }

        log::debug!("shape field scattered: {} instances", field.len());
        field
    }

    pub fn insert(&mut self, shape: ShapeInstance) -> ShapeKey {
        self.shapes.insert(shape)
    }

    pub fn remove(&mut self, key: ShapeKey) -> Option<ShapeInstance> {
        self.shapes.remove(key)
    }

    pub fn get(&self, key: ShapeKey) -> Option<&ShapeInstance> {
        self.shapes.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ShapeKey, &ShapeInstance)> {
        self.shapes.iter()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Advance every shape's rotation by one frame.
    pub fn rotate(&mut self) {
        let spin = self.spin;
        for shape in self.shapes.values_mut() {
            shape.rotation += shape.rotation_speed * spin;
        }
    }
}
