//! Render pipelines and their uniforms.
//!
//! - `basic` holds the Phong pipeline and the shared pipeline constructor
//! - `light` holds the light uniform and its bind group

pub mod basic;
pub mod light;
