use std::rc::Rc;

use cgmath::{InnerSpace, Vector3};
use fan_flow::{
    animation::FrameLoop,
    config::SceneConfig,
    data_structures::{
        geometry::Geometry,
        instance::Instance,
        model::Material,
        scene_graph::{self, SceneNode},
    },
    scene::{Fan, build_fan},
};

pub const EPS: f32 = 1e-4;

#[track_caller]
pub fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < EPS,
        "expected {}, got {}",
        expected,
        actual
    );
}

#[track_caller]
pub fn assert_vec3_close(actual: Vector3<f32>, expected: Vector3<f32>) {
    assert!(
        (actual - expected).magnitude() < EPS,
        "expected {:?}, got {:?}",
        expected,
        actual
    );
}

/// Rotations `q` and `-q` describe the same orientation.
#[track_caller]
pub fn assert_same_rotation(actual: cgmath::Quaternion<f32>, expected: cgmath::Quaternion<f32>) {
    let dot = actual.s * expected.s + actual.v.dot(expected.v);
    assert!(
        (dot.abs() - 1.0).abs() < EPS,
        "expected {:?}, got {:?}",
        expected,
        actual
    );
}

pub fn default_fan() -> Fan {
    build_fan(&SceneConfig::default())
}

/// A started frame loop plus a fan, both at their initial state.
pub fn running_fan() -> (Fan, FrameLoop) {
    let config = SceneConfig::default();
    let fan = build_fan(&config);
    let mut frame_loop = FrameLoop::new(&config.animation);
    frame_loop.start();
    (fan, frame_loop)
}

pub fn advance_frames(frame_loop: &mut FrameLoop, fan: &mut Fan, frames: usize) {
    for _ in 0..frames {
        assert!(frame_loop.advance(fan));
    }
}

pub struct MeshInfo {
    pub name: String,
    pub geometry: Rc<Geometry>,
    pub material: Rc<Material>,
    pub world: Instance,
}

/// All mesh nodes below `root`, depth first.
pub fn meshes(root: &dyn SceneNode) -> Vec<MeshInfo> {
    let mut out = Vec::new();
    scene_graph::visit(root, &mut |node| {
        if let Some((geometry, material)) = node.get_mesh() {
            out.push(MeshInfo {
                name: node.get_name().to_string(),
                geometry: geometry.clone(),
                material: material.clone(),
                world: node.get_world_transform().clone(),
            });
        }
    });
    out
}

pub fn mesh_named<'a>(meshes: &'a [MeshInfo], name: &str) -> &'a MeshInfo {
    meshes
        .iter()
        .find(|m| m.name == name)
        .unwrap_or_else(|| panic!("no mesh named {}", name))
}
