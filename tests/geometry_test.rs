use cgmath::{InnerSpace, Vector3};
use fan_flow::data_structures::{geometry::Geometry, model::ModelVertex};

use crate::common::test_utils::assert_close;

mod common;

fn v(p: [f32; 3]) -> Vector3<f32> {
    Vector3::new(p[0], p[1], p[2])
}

/// Every triangle must face the same way as its vertex normals.
fn assert_outward_winding(vertices: &[ModelVertex], indices: &[u32]) {
    for tri in indices.chunks(3) {
        let [a, b, c] = [0, 1, 2].map(|i| &vertices[tri[i] as usize]);
        let face = (v(b.position) - v(a.position)).cross(v(c.position) - v(a.position));
        let normal = v(a.normal) + v(b.normal) + v(c.normal);
        assert!(face.dot(normal) > 0.0, "triangle {:?} is wound inwards", tri);
    }
}

#[test]
fn box_counts_and_extent() {
    let geometry = Geometry::cuboid(1.0, 0.1, 2.0);
    let (vertices, indices) = geometry.tessellate();
    assert_eq!(vertices.len(), 24);
    assert_eq!(indices.len(), 36);
    assert_eq!(geometry.vertex_count(), 24);
    assert_eq!(geometry.index_count(), 36);

    for vertex in &vertices {
        assert_close(v(vertex.normal).magnitude(), 1.0);
        assert_close(vertex.position[0].abs(), 0.5);
        assert_close(vertex.position[1].abs(), 0.05);
        assert_close(vertex.position[2].abs(), 1.0);
    }
    assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));
}

#[test]
fn box_faces_point_outwards() {
    let (vertices, indices) = Geometry::cuboid(1.0, 0.1, 2.0).tessellate();
    assert_outward_winding(&vertices, &indices);

    // each vertex lies on the face its normal names
    for vertex in &vertices {
        let n = v(vertex.normal);
        let p = v(vertex.position);
        let half = Vector3::new(0.5, 0.05, 1.0);
        let along = n.x * p.x / half.x + n.y * p.y / half.y + n.z * p.z / half.z;
        assert_close(along, 1.0);
    }
}

#[test]
fn cylinder_counts() {
    let geometry = Geometry::cylinder(0.75, 0.5, 32);
    let (vertices, indices) = geometry.tessellate();
    assert_eq!(vertices.len(), 33 * 2 + 2 * (32 + 33));
    assert_eq!(indices.len(), 12 * 32);
    assert_eq!(geometry.vertex_count(), vertices.len());
    assert_eq!(geometry.index_count(), indices.len());
    assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));
}

#[test]
fn cylinder_shape() {
    let (vertices, indices) = Geometry::cylinder(2.0, 0.125, 32).tessellate();
    for vertex in &vertices {
        let p = vertex.position;
        assert_close(p[1].abs(), 0.0625);
        let r = (p[0] * p[0] + p[2] * p[2]).sqrt();
        assert!(r < 1e-4 || (r - 2.0).abs() < 1e-4, "radius {}", r);
        assert_close(v(vertex.normal).magnitude(), 1.0);
    }
    // first side vertex sits on +Z at the top
    assert_close(vertices[0].position[2], 2.0);
    assert_close(vertices[0].position[1], 0.0625);
    assert_outward_winding(&vertices, &indices);
}

#[test]
fn straight_cylinder_side_normals_are_horizontal() {
    let (vertices, _) = Geometry::cylinder(0.25, 5.0, 16).tessellate();
    for vertex in &vertices[..2 * 17] {
        assert_close(vertex.normal[1], 0.0);
    }
}

#[test]
fn cylinder_needs_three_segments() {
    let geometry = Geometry::cylinder(1.0, 1.0, 1);
    assert_eq!(
        geometry,
        Geometry::Cylinder {
            radius_top: 1.0,
            radius_bottom: 1.0,
            height: 1.0,
            radial_segments: 3,
        }
    );
    assert_eq!(geometry.tessellate().1.len(), 36);
}

#[test]
fn names_are_distinct() {
    let names = [
        Geometry::cuboid(1.0, 0.1, 2.0).name(),
        Geometry::cylinder(0.75, 0.5, 32).name(),
        Geometry::cylinder(0.25, 1.0, 32).name(),
    ];
    assert_ne!(names[0], names[1]);
    assert_ne!(names[1], names[2]);
}
