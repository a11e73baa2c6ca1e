//! The desk fan scene.
//!
//! ```text
//! scene
//! └── fan                (lifted by the fan offset)
//!     ├── head           (tilted about X, sways about Z)
//!     │   ├── motor
//!     │   └── wing       (spins about Y)
//!     │       ├── blade × 3
//!     │       ├── hub
//!     │       └── hub rod
//!     ├── support rod
//!     └── stand
//! ```

use std::{f32::consts::TAU, rc::Rc};

use cgmath::{Rad, Rotation3, Vector3};

use crate::{
    animation::AnimationState,
    config::{CylinderDims, LightConfig, SceneConfig},
    data_structures::{
        geometry::Geometry,
        instance::{Instance, euler_xyz},
        model::Material,
        scene_graph::{self, ContainerNode, MeshNode, NodePath, SceneNode},
    },
};

/// Light shining from `position` towards the origin.
#[derive(Clone, Debug)]
pub struct DirectionalLight {
    pub colour: [f32; 3],
    pub intensity: f32,
    pub position: Vector3<f32>,
}

impl From<&LightConfig> for DirectionalLight {
    fn from(config: &LightConfig) -> Self {
        Self {
            colour: config.colour.to_linear(),
            intensity: config.intensity,
            position: config.position,
        }
    }
}

#[derive(Clone, Debug)]
pub struct AmbientLight {
    pub colour: [f32; 3],
    pub intensity: f32,
}

impl From<&LightConfig> for AmbientLight {
    fn from(config: &LightConfig) -> Self {
        Self {
            colour: config.colour.to_linear(),
            intensity: config.intensity,
        }
    }
}

pub struct Scene {
    pub directional: DirectionalLight,
    pub ambient: AmbientLight,
    pub root: ContainerNode,
}

impl Scene {
    pub fn new(directional: DirectionalLight, ambient: AmbientLight) -> Self {
        Self {
            directional,
            ambient,
            root: ContainerNode::new("scene", Instance::new()),
        }
    }

    pub fn node(&self, path: &NodePath) -> Option<&dyn SceneNode> {
        scene_graph::descendant(&self.root, &path.0)
    }

    pub fn node_mut(&mut self, path: &NodePath) -> Option<&mut dyn SceneNode> {
        scene_graph::descendant_mut(&mut self.root, &path.0)
    }

    /// Number of drawable nodes in the whole tree.
    pub fn mesh_count(&self) -> usize {
        let mut count = 0;
        scene_graph::visit(&self.root, &mut |node| {
            if node.get_mesh().is_some() {
                count += 1;
            }
        });
        count
    }

    pub fn update_world_transforms(&mut self) {
        self.root.update_world_transform_all();
    }
}

/// The built scene together with handles to its two animated groups.
pub struct Fan {
    pub scene: Scene,
    pub wing: NodePath,
    pub head: NodePath,
    head_tilt: Rad<f32>,
}

impl Fan {
    /// Writes the wing spin and head sway of `state` into the tree and
    /// re-propagates world transforms.
    pub fn pose(&mut self, state: &AnimationState) {
        let spin = cgmath::Quaternion::from_angle_y(Rad(state.spin as f32));
        let sway = euler_xyz(self.head_tilt, Rad(0.0), Rad(state.sway as f32));

        set_rotation(&mut self.scene, &self.wing, spin);
        set_rotation(&mut self.scene, &self.head, sway);
        self.scene.update_world_transforms();
    }
}

fn set_rotation(scene: &mut Scene, path: &NodePath, rotation: cgmath::Quaternion<f32>) {
    match scene.node_mut(path) {
        Some(node) => {
            let local = node.get_local_transform().clone().with_rotation(rotation);
            node.set_local_transform(local);
        }
        None => log::warn!("no scene node at {:?}", path),
    }
}

fn cylinder(dims: &CylinderDims) -> Rc<Geometry> {
    Rc::new(Geometry::cylinder(dims.radius, dims.height, dims.segments))
}

pub fn build_fan(config: &SceneConfig) -> Fan {
    let mut scene = Scene::new(
        DirectionalLight::from(&config.directional_light),
        AmbientLight::from(&config.ambient_light),
    );

    let material = Rc::new(Material::phong(&config.material));
    let geometry = &config.geometry;
    let layout = &config.layout;
    let [width, height, depth] = geometry.blade;
    let blade = Rc::new(Geometry::cuboid(width, height, depth));
    let hub = cylinder(&geometry.hub);
    let hub_rod = cylinder(&geometry.hub_rod);
    let motor = cylinder(&geometry.motor);
    let support_rod = cylinder(&geometry.support_rod);
    let stand = cylinder(&geometry.stand);

    let mesh = |name: &str, geometry: &Rc<Geometry>, local: Instance| -> Box<dyn SceneNode> {
        Box::new(MeshNode::new(
            name,
            geometry.clone(),
            material.clone(),
            local,
        ))
    };

    let mut wing = ContainerNode::new("wing", Instance::from(layout.wing_offset));
    for i in 0..layout.blade_count {
        let theta = i as f32 * TAU / layout.blade_count as f32;
        let position = Vector3::new(
            layout.blade_radius * theta.sin(),
            0.0,
            layout.blade_radius * theta.cos(),
        );
        let local =
            Instance::from(position).with_rotation(cgmath::Quaternion::from_angle_y(Rad(theta)));
        wing.add_child(mesh(&format!("blade {}", i), &blade, local));
    }
    wing.add_child(mesh("hub", &hub, Instance::new()));
    wing.add_child(mesh(
        "hub rod",
        &hub_rod,
        Instance::from(layout.hub_rod_offset),
    ));

    let head_tilt = Rad::from(layout.head_tilt);
    let mut head = ContainerNode::new(
        "head",
        Instance::new().with_rotation(cgmath::Quaternion::from_angle_x(head_tilt)),
    );
    head.add_child(mesh("motor", &motor, Instance::new()));
    let wing_idx = head.add_child(Box::new(wing));

    let mut fan = ContainerNode::new("fan", Instance::from(layout.fan_offset));
    let head_idx = fan.add_child(Box::new(head));
    fan.add_child(mesh(
        "support rod",
        &support_rod,
        Instance::from(layout.support_rod_offset),
    ));
    fan.add_child(mesh("stand", &stand, Instance::from(layout.stand_offset)));

    let fan_idx = scene.root.add_child(Box::new(fan));
    scene.update_world_transforms();

    let head = NodePath(vec![fan_idx, head_idx]);
    let wing = head.child(wing_idx);
    log::info!("fan scene built with {} meshes", scene.mesh_count());

    Fan {
        scene,
        wing,
        head,
        head_tilt,
    }
}
