//! fan-flow
//!
//! A desk fan rendered with wgpu: three blades spinning on a hub, a motor head
//! swaying left and right on a rod, all standing on a round base. Runs natively
//! in a winit window and in the browser via WASM, where three buttons pick the
//! blade speed.
//!
//! High-level modules
//! - `config`: every constant the scene is built from
//! - `scene`: builds the fan's scene graph and poses it per frame
//! - `animation`: spin and sway state plus the explicit frame loop
//! - `controls`: the three blade speeds and their bindings
//! - `camera`: fixed perspective camera and its uniform
//! - `context`: central GPU and window context that owns device/queue/surface
//! - `data_structures`: geometry, meshes, materials, instances, scene graph
//! - `pipelines`: the Phong pipeline and light uniforms
//! - `render`: batching of shared meshes into instanced draw calls
//! - `flow`: the winit event loop tying everything together
//! - `web`: DOM integration (wasm32 only)
//!

pub mod animation;
pub mod camera;
pub mod config;
pub mod context;
pub mod controls;
pub mod data_structures;
pub mod flow;
pub mod pipelines;
pub mod render;
pub mod scene;
#[cfg(target_arch = "wasm32")]
pub mod web;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath;
pub use controls::Speed;
pub use scene::{Fan, build_fan};
