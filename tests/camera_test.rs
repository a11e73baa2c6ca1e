use cgmath::{Deg, EuclideanSpace, Point3, Vector4};
use fan_flow::{
    camera::{Camera, CameraUniform, Projection},
    config::CameraConfig,
};

use crate::common::test_utils::{assert_close, default_fan, meshes};

mod common;

fn projection(width: u32, height: u32) -> Projection {
    let config = CameraConfig::default();
    Projection::new(width, height, config.fovy, config.znear, config.zfar)
}

fn clip(uniform: &CameraUniform, p: Point3<f32>) -> Vector4<f32> {
    let c = uniform.view_proj() * p.to_homogeneous();
    c / c.w
}

#[test]
fn aspect_follows_resize() {
    let mut projection = projection(800, 600);
    assert_close(projection.aspect(), 800.0 / 600.0);

    projection.resize(1920, 1080);
    assert_close(projection.aspect(), 1920.0 / 1080.0);
}

#[test]
fn zero_sized_resize_is_ignored() {
    let mut projection = projection(800, 600);
    projection.resize(0, 600);
    projection.resize(800, 0);
    projection.resize(0, 0);
    assert_close(projection.aspect(), 800.0 / 600.0);
}

#[test]
fn target_lands_in_the_centre() {
    let config = CameraConfig::default();
    let camera = Camera::new(&config);
    let mut uniform = CameraUniform::new();
    uniform.update_view_proj(&camera, &projection(800, 600));

    let centre = clip(&uniform, config.target);
    assert_close(centre.x, 0.0);
    assert_close(centre.y, 0.0);
    // wgpu depth range
    assert!(centre.z > 0.0 && centre.z < 1.0, "depth {}", centre.z);

    assert_eq!(uniform.view_position(), Point3::new(8.0, 8.0, 10.0));
}

#[test]
fn fan_is_inside_the_frustum() {
    let camera = Camera::new(&CameraConfig::default());
    let mut uniform = CameraUniform::new();
    uniform.update_view_proj(&camera, &projection(800, 600));

    let fan = default_fan();
    for mesh in meshes(&fan.scene.root) {
        let p = clip(&uniform, Point3::from_vec(mesh.world.position));
        assert!(p.x.abs() <= 1.0 && p.y.abs() <= 1.0, "{} off screen", mesh.name);
        assert!(p.z > 0.0 && p.z < 1.0, "{} clipped", mesh.name);
    }
}

#[test]
fn resize_leaves_the_scene_alone() {
    let fan = default_fan();
    let before: Vec<_> = meshes(&fan.scene.root).into_iter().map(|m| m.world).collect();

    let camera = Camera::new(&CameraConfig::default());
    let mut projection = projection(800, 600);
    let mut uniform = CameraUniform::new();
    uniform.update_view_proj(&camera, &projection);
    let wide = clip(&uniform, Point3::new(1.0, 0.0, 0.0));

    projection.resize(400, 600);
    uniform.update_view_proj(&camera, &projection);
    let narrow = clip(&uniform, Point3::new(1.0, 0.0, 0.0));

    // a narrower surface spreads the same point further from the centre
    assert!(narrow.x.abs() > wide.x.abs());
    let after: Vec<_> = meshes(&fan.scene.root).into_iter().map(|m| m.world).collect();
    assert_eq!(before, after);
}

#[test]
fn fovy_is_sixty_degrees() {
    let config = CameraConfig::default();
    assert_eq!(config.fovy, Deg(60.0));
    assert_eq!(config.znear, 0.1);
    assert_eq!(config.zfar, 20.0);
}
