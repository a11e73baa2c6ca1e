//! Render composition and instanced batching.
//!
//! Every frame the scene graph is flattened into [`Batch`]es: one per pair of
//! shared geometry and shared material, carrying the world transforms of all
//! mesh nodes that use that pair. The [`Renderer`] uploads each batch into its
//! own instance buffer and issues one instanced draw call per batch.
//!
//! # Key types
//!
//! - [`Batch`] is the CPU side of one instanced draw call
//! - [`Renderer`] owns the pipeline and all GPU meshes, materials and instance buffers
//!

use std::rc::Rc;

use wgpu::util::DeviceExt;

use crate::{
    data_structures::{
        geometry::Geometry,
        instance::{Instance, InstanceRaw},
        model::{self, DrawModel, GpuMaterial, Material, Mesh},
        scene_graph::{self, SceneNode},
    },
    pipelines::basic::mk_phong_pipeline,
};

/// Mesh nodes sharing one geometry and one material.
#[derive(Clone, Debug)]
pub struct Batch {
    pub geometry: Rc<Geometry>,
    pub material: Rc<Material>,
    pub instances: Vec<Instance>,
}

impl Batch {
    pub fn to_raw(&self) -> Vec<InstanceRaw> {
        self.instances.iter().map(Instance::to_raw).collect()
    }
}

/// Groups all mesh nodes below `root` by shared geometry and material.
///
/// Sharing is decided by pointer identity, so two equal but separately
/// allocated geometries end up in different batches. Batches keep the order in
/// which their first node is met during a depth-first walk.
pub fn collect_batches(root: &dyn SceneNode) -> Vec<Batch> {
    let mut batches: Vec<Batch> = Vec::new();
    scene_graph::visit(root, &mut |node| {
        let Some((geometry, material)) = node.get_mesh() else {
            return;
        };
        let world = node.get_world_transform().clone();
        match batches
            .iter_mut()
            .find(|b| Rc::ptr_eq(&b.geometry, geometry) && Rc::ptr_eq(&b.material, material))
        {
            Some(batch) => batch.instances.push(world),
            None => batches.push(Batch {
                geometry: geometry.clone(),
                material: material.clone(),
                instances: vec![world],
            }),
        }
    });
    batches
}

struct InstanceBuffer {
    buffer: wgpu::Buffer,
    capacity: usize,
}

struct Draw {
    mesh: usize,
    material: usize,
    instances: u32,
}

pub struct Renderer {
    pipeline: wgpu::RenderPipeline,
    material_bind_group_layout: wgpu::BindGroupLayout,
    meshes: Vec<(Rc<Geometry>, Mesh)>,
    materials: Vec<(Rc<Material>, GpuMaterial)>,
    instance_buffers: Vec<InstanceBuffer>,
    draws: Vec<Draw>,
}

impl Renderer {
    pub fn new(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        camera_bind_group_layout: &wgpu::BindGroupLayout,
        light_bind_group_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let material_bind_group_layout = model::material_bind_group_layout(device);
        let pipeline = mk_phong_pipeline(
            device,
            config,
            camera_bind_group_layout,
            light_bind_group_layout,
            &material_bind_group_layout,
        );
        Self {
            pipeline,
            material_bind_group_layout,
            meshes: Vec::new(),
            materials: Vec::new(),
            instance_buffers: Vec::new(),
            draws: Vec::new(),
        }
    }

    /// Number of distinct GPU meshes created so far.
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    fn mesh_index(&mut self, device: &wgpu::Device, geometry: &Rc<Geometry>) -> usize {
        if let Some(idx) = self.meshes.iter().position(|(g, _)| Rc::ptr_eq(g, geometry)) {
            return idx;
        }
        log::debug!("uploading mesh {}", geometry.name());
        self.meshes
            .push((geometry.clone(), Mesh::from_geometry(device, geometry)));
        self.meshes.len() - 1
    }

    fn material_index(&mut self, device: &wgpu::Device, material: &Rc<Material>) -> usize {
        if let Some(idx) = self.materials.iter().position(|(m, _)| Rc::ptr_eq(m, material)) {
            return idx;
        }
        let gpu = GpuMaterial::new(device, &self.material_bind_group_layout, material);
        self.materials.push((material.clone(), gpu));
        self.materials.len() - 1
    }

    /// Uploads the current world transforms of everything below `root`.
    pub fn prepare(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, root: &dyn SceneNode) {
        self.draws.clear();
        for (i, batch) in collect_batches(root).iter().enumerate() {
            let mesh = self.mesh_index(device, &batch.geometry);
            let material = self.material_index(device, &batch.material);
            let raw = batch.to_raw();

            match self.instance_buffers.get(i) {
                Some(existing) if existing.capacity >= raw.len() => {
                    queue.write_buffer(&existing.buffer, 0, bytemuck::cast_slice(&raw));
                }
                _ => {
                    let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                        label: Some(&format!("Instance Buffer {}", i)),
                        contents: bytemuck::cast_slice(&raw),
                        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                    });
                    let instance_buffer = InstanceBuffer {
                        buffer,
                        capacity: raw.len(),
                    };
                    if i < self.instance_buffers.len() {
                        self.instance_buffers[i] = instance_buffer;
                    } else {
                        self.instance_buffers.push(instance_buffer);
                    }
                }
            }

            self.draws.push(Draw {
                mesh,
                material,
                instances: raw.len() as u32,
            });
        }
    }

    pub fn draw(
        &self,
        render_pass: &mut wgpu::RenderPass<'_>,
        camera_bind_group: &wgpu::BindGroup,
        light_bind_group: &wgpu::BindGroup,
    ) {
        render_pass.set_pipeline(&self.pipeline);
        for (draw, instances) in self.draws.iter().zip(&self.instance_buffers) {
            render_pass.set_vertex_buffer(1, instances.buffer.slice(..));
            render_pass.draw_mesh_instanced(
                &self.meshes[draw.mesh].1,
                &self.materials[draw.material].1.bind_group,
                0..draw.instances,
                camera_bind_group,
                light_bind_group,
            );
        }
    }
}
