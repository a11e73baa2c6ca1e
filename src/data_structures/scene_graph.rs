//! Scene graph and hierarchical scene organization.
//!
//! A scene is a tree of boxed [`SceneNode`]s. Every node owns a local
//! transform relative to its parent and caches the world transform that results
//! from multiplying it with all of its ancestors. Group nodes only carry
//! children; mesh nodes additionally reference a shared geometry and material.

use std::rc::Rc;

use crate::data_structures::{geometry::Geometry, instance::Instance, model::Material};

pub trait SceneNode {
    fn get_name(&self) -> &str;

    fn get_local_transform(&self) -> &Instance;

    fn set_local_transform(&mut self, instance: Instance);

    fn get_world_transform(&self) -> &Instance;

    fn get_children(&self) -> &Vec<Box<dyn SceneNode>>;

    fn get_children_mut(&mut self) -> &mut Vec<Box<dyn SceneNode>>;

    /// Appends `child` and returns its index among the children.
    fn add_child(&mut self, child: Box<dyn SceneNode>) -> usize;

    /// Geometry and material of a drawable node.
    fn get_mesh(&self) -> Option<(&Rc<Geometry>, &Rc<Material>)> {
        None
    }

    /**
     * Recomputes this node's world transform from `parents_world_transform`
     * and passes the result down to all children.
     */
    fn update_world_transforms(&mut self, parents_world_transform: &Instance);

    fn update_world_transform_all(&mut self) {
        self.update_world_transforms(&Instance::default());
    }
}

/// A node without geometry of its own.
pub struct ContainerNode {
    name: String,
    children: Vec<Box<dyn SceneNode>>,
    instance: (Instance, Instance),
}

impl ContainerNode {
    pub fn new(name: &str, local: Instance) -> Self {
        Self {
            name: name.to_string(),
            children: vec![],
            instance: (local.clone(), local),
        }
    }
}

impl SceneNode for ContainerNode {
    fn get_name(&self) -> &str {
        &self.name
    }

    fn get_local_transform(&self) -> &Instance {
        &self.instance.0
    }

    fn set_local_transform(&mut self, instance: Instance) {
        self.instance.0 = instance;
    }

    fn get_world_transform(&self) -> &Instance {
        &self.instance.1
    }

    fn get_children(&self) -> &Vec<Box<dyn SceneNode>> {
        &self.children
    }

    fn get_children_mut(&mut self) -> &mut Vec<Box<dyn SceneNode>> {
        &mut self.children
    }

    fn add_child(&mut self, child: Box<dyn SceneNode>) -> usize {
        self.children.push(child);
        self.children.len() - 1
    }

    fn update_world_transforms(&mut self, parents_world_transform: &Instance) {
        let (local, world) = &mut self.instance;
        *world = parents_world_transform * &*local;
        let world = world.clone();
        for child in self.children.iter_mut() {
            child.update_world_transforms(&world);
        }
    }
}

/// A drawable node. Geometry and material are shared through [`Rc`] so that
/// repeated parts (the blades) point at the same GPU resources.
pub struct MeshNode {
    name: String,
    children: Vec<Box<dyn SceneNode>>,
    instance: (Instance, Instance),
    geometry: Rc<Geometry>,
    material: Rc<Material>,
}

impl MeshNode {
    pub fn new(name: &str, geometry: Rc<Geometry>, material: Rc<Material>, local: Instance) -> Self {
        Self {
            name: name.to_string(),
            children: vec![],
            instance: (local.clone(), local),
            geometry,
            material,
        }
    }
}

impl SceneNode for MeshNode {
    fn get_name(&self) -> &str {
        &self.name
    }

    fn get_local_transform(&self) -> &Instance {
        &self.instance.0
    }

    fn set_local_transform(&mut self, instance: Instance) {
        self.instance.0 = instance;
    }

    fn get_world_transform(&self) -> &Instance {
        &self.instance.1
    }

    fn get_children(&self) -> &Vec<Box<dyn SceneNode>> {
        &self.children
    }

    fn get_children_mut(&mut self) -> &mut Vec<Box<dyn SceneNode>> {
        &mut self.children
    }

    fn add_child(&mut self, child: Box<dyn SceneNode>) -> usize {
        self.children.push(child);
        self.children.len() - 1
    }

    fn get_mesh(&self) -> Option<(&Rc<Geometry>, &Rc<Material>)> {
        Some((&self.geometry, &self.material))
    }

    fn update_world_transforms(&mut self, parents_world_transform: &Instance) {
        let (local, world) = &mut self.instance;
        *world = parents_world_transform * &*local;
        let world = world.clone();
        for child in self.children.iter_mut() {
            child.update_world_transforms(&world);
        }
    }
}

/// Child indices leading from a root to one of its descendants.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NodePath(pub Vec<usize>);

impl NodePath {
    pub fn child(&self, idx: usize) -> NodePath {
        let mut path = self.0.clone();
        path.push(idx);
        NodePath(path)
    }
}

pub fn descendant<'a>(node: &'a dyn SceneNode, path: &[usize]) -> Option<&'a dyn SceneNode> {
    match path.split_first() {
        None => Some(node),
        Some((&idx, rest)) => descendant(node.get_children().get(idx)?.as_ref(), rest),
    }
}

pub fn descendant_mut<'a>(
    node: &'a mut dyn SceneNode,
    path: &[usize],
) -> Option<&'a mut dyn SceneNode> {
    match path.split_first() {
        None => Some(node),
        Some((&idx, rest)) => descendant_mut(node.get_children_mut().get_mut(idx)?.as_mut(), rest),
    }
}

/// Depth-first, parents before children, children in insertion order.
pub fn visit(node: &dyn SceneNode, f: &mut dyn FnMut(&dyn SceneNode)) {
    f(node);
    for child in node.get_children() {
        visit(child.as_ref(), f);
    }
}
