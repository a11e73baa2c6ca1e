//! Engine data structures: geometry, models, scene graphs, and instances.
//!
//! - `geometry` tessellates the procedural box and cylinder primitives
//! - `model` contains the vertex layout, materials and GPU meshes
//! - `texture` holds the depth buffer
//! - `instance` holds per-node transformation data
//! - `scene_graph` enables hierarchical scene organization

pub mod geometry;
pub mod instance;
pub mod model;
pub mod scene_graph;
pub mod texture;
