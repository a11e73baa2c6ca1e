use std::rc::Rc;

use cgmath::Vector3;
use fan_flow::{
    animation::AnimationState,
    config::{MaterialConfig, Rgb},
    data_structures::{
        geometry::Geometry,
        instance::Instance,
        model::Material,
        scene_graph::{ContainerNode, MeshNode, SceneNode},
    },
    render::collect_batches,
};

use crate::common::test_utils::{assert_vec3_close, default_fan, meshes};

mod common;

#[test]
fn fan_batches_by_shared_geometry() {
    let fan = default_fan();
    let batches = collect_batches(&fan.scene.root);
    assert_eq!(batches.len(), 6);

    let sizes: Vec<usize> = batches.iter().map(|b| b.instances.len()).collect();
    // first-seen order: motor, blades, hub, hub rod, support rod, stand
    assert_eq!(sizes, vec![1, 3, 1, 1, 1, 1]);
    assert!(matches!(*batches[1].geometry, Geometry::Box { .. }));
    assert_eq!(sizes.iter().sum::<usize>(), fan.scene.mesh_count());

    let material = &batches[0].material;
    assert!(batches.iter().all(|b| Rc::ptr_eq(&b.material, material)));
}

#[test]
fn batches_carry_world_transforms() {
    let mut fan = default_fan();
    let mut state = AnimationState::default();
    state.spin = -1.0;
    state.sway = 0.2;
    fan.pose(&state);

    let batches = collect_batches(&fan.scene.root);
    let worlds: Vec<Instance> = batches.iter().flat_map(|b| b.instances.clone()).collect();
    let mut expected: Vec<Instance> = meshes(&fan.scene.root).into_iter().map(|m| m.world).collect();
    // blades come right after the motor in both walks, so the orders agree
    assert_eq!(worlds.len(), expected.len());
    for (actual, expected) in worlds.iter().zip(expected.drain(..)) {
        assert_vec3_close(actual.position, expected.position);
    }
    assert_eq!(batches[1].to_raw().len(), 3);
}

#[test]
fn equal_but_separate_geometries_do_not_batch() {
    let material = Rc::new(Material::phong(&MaterialConfig {
        colour: Rgb(0xff0000),
        specular: Rgb(0x000000),
        shininess: 10.0,
    }));
    let a = Rc::new(Geometry::cuboid(1.0, 1.0, 1.0));
    let b = Rc::new(Geometry::cuboid(1.0, 1.0, 1.0));

    let mut root = ContainerNode::new("root", Instance::new());
    root.add_child(Box::new(MeshNode::new("a1", a.clone(), material.clone(), Instance::new())));
    root.add_child(Box::new(MeshNode::new("b", b, material.clone(), Instance::new())));
    root.add_child(Box::new(MeshNode::new(
        "a2",
        a,
        material,
        Instance::from(Vector3::new(2.0, 0.0, 0.0)),
    )));
    root.update_world_transform_all();

    let batches = collect_batches(&root);
    assert_eq!(batches.len(), 2);
    assert_eq!(batches[0].instances.len(), 2);
    assert_vec3_close(batches[0].instances[1].position, Vector3::new(2.0, 0.0, 0.0));
    assert_eq!(batches[1].instances.len(), 1);
}

#[test]
fn empty_tree_has_no_batches() {
    let root = ContainerNode::new("root", Instance::new());
    assert!(collect_batches(&root).is_empty());
}
