//! Procedural primitives.
//!
//! Both shapes are centred on the origin. Cylinders run along the Y axis and
//! their first side vertex sits on +Z; winding is counter-clockwise when seen
//! from outside.

use std::f32::consts::TAU;

use cgmath::{ElementWise, InnerSpace, Vector3};

use crate::data_structures::model::ModelVertex;

#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    Box {
        width: f32,
        height: f32,
        depth: f32,
    },
    Cylinder {
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        radial_segments: u32,
    },
}

impl Geometry {
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        Geometry::Box {
            width,
            height,
            depth,
        }
    }

    /// A straight cylinder. Fewer than three segments are raised to three.
    pub fn cylinder(radius: f32, height: f32, radial_segments: u32) -> Self {
        Geometry::Cylinder {
            radius_top: radius,
            radius_bottom: radius,
            height,
            radial_segments: radial_segments.max(3),
        }
    }

    pub fn name(&self) -> String {
        match self {
            Geometry::Box {
                width,
                height,
                depth,
            } => format!("Box {}x{}x{}", width, height, depth),
            Geometry::Cylinder {
                radius_top,
                radius_bottom,
                height,
                radial_segments,
            } => format!(
                "Cylinder r{}/{} h{} s{}",
                radius_top, radius_bottom, height, radial_segments
            ),
        }
    }

    pub fn vertex_count(&self) -> usize {
        match self {
            Geometry::Box { .. } => 24,
            Geometry::Cylinder {
                radial_segments, ..
            } => {
                let n = *radial_segments as usize;
                // side rings plus one cap (centres + ring) at each end
                (n + 1) * 2 + 2 * (n + n + 1)
            }
        }
    }

    pub fn index_count(&self) -> usize {
        match self {
            Geometry::Box { .. } => 36,
            Geometry::Cylinder {
                radial_segments, ..
            } => 12 * *radial_segments as usize,
        }
    }

    pub fn tessellate(&self) -> (Vec<ModelVertex>, Vec<u32>) {
        match *self {
            Geometry::Box {
                width,
                height,
                depth,
            } => tessellate_box(Vector3::new(width, height, depth) / 2.0),
            Geometry::Cylinder {
                radius_top,
                radius_bottom,
                height,
                radial_segments,
            } => tessellate_cylinder(radius_top, radius_bottom, height, radial_segments.max(3)),
        }
    }
}

fn tessellate_box(half: Vector3<f32>) -> (Vec<ModelVertex>, Vec<u32>) {
    // (normal, u, v) with u x v == normal
    let faces = [
        (Vector3::unit_x(), -Vector3::unit_z(), Vector3::unit_y()),
        (-Vector3::unit_x(), Vector3::unit_z(), Vector3::unit_y()),
        (Vector3::unit_y(), Vector3::unit_x(), -Vector3::unit_z()),
        (-Vector3::unit_y(), Vector3::unit_x(), Vector3::unit_z()),
        (Vector3::unit_z(), Vector3::unit_x(), Vector3::unit_y()),
        (-Vector3::unit_z(), -Vector3::unit_x(), Vector3::unit_y()),
    ];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (normal, u, v) in faces {
        let centre = normal.mul_element_wise(half);
        let u = u.mul_element_wise(half);
        let v = v.mul_element_wise(half);

        let base = vertices.len() as u32;
        for corner in [centre - u - v, centre + u - v, centre + u + v, centre - u + v] {
            vertices.push(ModelVertex {
                position: corner.into(),
                normal: normal.into(),
            });
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    (vertices, indices)
}

fn tessellate_cylinder(
    radius_top: f32,
    radius_bottom: f32,
    height: f32,
    segments: u32,
) -> (Vec<ModelVertex>, Vec<u32>) {
    let n = segments;
    let half_height = height / 2.0;
    let slope = (radius_bottom - radius_top) / height;

    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    // Side: row 0 is the top ring, row 1 the bottom ring.
    for row in 0..=1u32 {
        let t = row as f32;
        let radius = t * (radius_bottom - radius_top) + radius_top;
        for x in 0..=n {
            let theta = x as f32 / n as f32 * TAU;
            let (sin, cos) = theta.sin_cos();
            vertices.push(ModelVertex {
                position: [radius * sin, half_height - t * height, radius * cos],
                normal: Vector3::new(sin, slope, cos).normalize().into(),
            });
        }
    }
    let ring = n + 1;
    for x in 0..n {
        let a = x;
        let b = ring + x;
        let c = ring + x + 1;
        let d = x + 1;
        indices.extend_from_slice(&[a, b, d, b, c, d]);
    }

    for top in [true, false] {
        let (radius, sign) = if top {
            (radius_top, 1.0)
        } else {
            (radius_bottom, -1.0)
        };
        let y = half_height * sign;
        let normal = [0.0, sign, 0.0];

        // one centre vertex per segment so every triangle owns its apex
        let centre_start = vertices.len() as u32;
        for _ in 0..n {
            vertices.push(ModelVertex {
                position: [0.0, y, 0.0],
                normal,
            });
        }
        let ring_start = vertices.len() as u32;
        for x in 0..=n {
            let theta = x as f32 / n as f32 * TAU;
            let (sin, cos) = theta.sin_cos();
            vertices.push(ModelVertex {
                position: [radius * sin, y, radius * cos],
                normal,
            });
        }
        for x in 0..n {
            let c = centre_start + x;
            let i = ring_start + x;
            if top {
                indices.extend_from_slice(&[i, i + 1, c]);
            } else {
                indices.extend_from_slice(&[i + 1, i, c]);
            }
        }
    }

    (vertices, indices)
}
