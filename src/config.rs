//! Scene constants.
//!
//! Every number the fan scene is built from lives here. [`SceneConfig::default`]
//! reproduces the stock desk fan; tests and embedders can construct a different
//! config to tweak dimensions, colours or the animation without touching the
//! builder itself.

use cgmath::{Deg, Point3, Vector3};

use crate::controls::Speed;

/// An sRGB colour given as `0xRRGGBB`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u32);

impl Rgb {
    /// Gamma-encoded channels in `0.0..=1.0`.
    pub fn to_srgb(self) -> [f32; 3] {
        let r = ((self.0 >> 16) & 0xff) as f32 / 255.0;
        let g = ((self.0 >> 8) & 0xff) as f32 / 255.0;
        let b = (self.0 & 0xff) as f32 / 255.0;
        [r, g, b]
    }

    /// Linear channels, which is what the shaders work with as the surface is sRGB.
    pub fn to_linear(self) -> [f32; 3] {
        self.to_srgb().map(srgb_to_linear)
    }

    pub fn to_wgpu(self) -> wgpu::Color {
        let [r, g, b] = self.to_linear();
        wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: 1.0,
        }
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[derive(Clone, Debug)]
pub struct CameraConfig {
    pub fovy: Deg<f32>,
    pub znear: f32,
    pub zfar: f32,
    pub eye: Point3<f32>,
    pub target: Point3<f32>,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fovy: Deg(60.0),
            znear: 0.1,
            zfar: 20.0,
            eye: Point3::new(8.0, 8.0, 10.0),
            target: Point3::new(0.0, 0.0, 0.0),
        }
    }
}

#[derive(Clone, Debug)]
pub struct LightConfig {
    pub colour: Rgb,
    pub intensity: f32,
    /// Only used by directional lights: the light shines from here towards the origin.
    pub position: Vector3<f32>,
}

#[derive(Clone, Debug)]
pub struct MaterialConfig {
    pub colour: Rgb,
    pub specular: Rgb,
    pub shininess: f32,
}

/// Radius, height and radial segment count of a (straight) cylinder.
#[derive(Clone, Copy, Debug)]
pub struct CylinderDims {
    pub radius: f32,
    pub height: f32,
    pub segments: u32,
}

impl CylinderDims {
    const fn new(radius: f32, height: f32) -> Self {
        Self {
            radius,
            height,
            segments: 32,
        }
    }
}

#[derive(Clone, Debug)]
pub struct GeometryConfig {
    /// width, height, depth
    pub blade: [f32; 3],
    pub hub: CylinderDims,
    pub hub_rod: CylinderDims,
    pub motor: CylinderDims,
    pub support_rod: CylinderDims,
    pub stand: CylinderDims,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            blade: [1.0, 0.1, 2.0],
            hub: CylinderDims::new(0.75, 0.5),
            hub_rod: CylinderDims::new(0.25, 1.0),
            motor: CylinderDims::new(1.0, 1.0),
            support_rod: CylinderDims::new(0.25, 5.0),
            stand: CylinderDims::new(2.0, 0.125),
        }
    }
}

/// Where the parts of the fan sit relative to their parent group.
#[derive(Clone, Debug)]
pub struct LayoutConfig {
    pub blade_count: u32,
    pub blade_radius: f32,
    pub hub_rod_offset: Vector3<f32>,
    pub wing_offset: Vector3<f32>,
    pub head_tilt: Deg<f32>,
    pub support_rod_offset: Vector3<f32>,
    pub stand_offset: Vector3<f32>,
    pub fan_offset: Vector3<f32>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            blade_count: 3,
            blade_radius: 1.5,
            hub_rod_offset: Vector3::new(0.0, -0.75, 0.0),
            wing_offset: Vector3::new(0.0, 1.5, 0.0),
            head_tilt: Deg(90.0),
            support_rod_offset: Vector3::new(0.0, -3.0, 0.0),
            stand_offset: Vector3::new(0.0, -5.5, 0.0),
            fan_offset: Vector3::new(0.0, 3.0, 0.0),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AnimationConfig {
    pub initial_speed: Speed,
    /// The head sway reverses once it reaches `±sway_limit`.
    pub sway_limit: f64,
    pub sway_step: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            initial_speed: Speed::Medium,
            sway_limit: 1.0,
            sway_step: 0.005,
        }
    }
}

#[derive(Clone, Debug)]
pub struct SceneConfig {
    pub camera: CameraConfig,
    pub clear_colour: Rgb,
    pub directional_light: LightConfig,
    pub ambient_light: LightConfig,
    pub material: MaterialConfig,
    pub geometry: GeometryConfig,
    pub layout: LayoutConfig,
    pub animation: AnimationConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            clear_colour: Rgb(0xcccccc),
            directional_light: LightConfig {
                colour: Rgb(0xffffff),
                intensity: 1.0,
                position: Vector3::new(1.0, 1.0, 1.0),
            },
            ambient_light: LightConfig {
                colour: Rgb(0xffffff),
                intensity: 0.2,
                position: Vector3::new(0.0, 0.0, 0.0),
            },
            material: MaterialConfig {
                colour: Rgb(0x3399ff),
                specular: Rgb(0x111111),
                shininess: 30.0,
            },
            geometry: GeometryConfig::default(),
            layout: LayoutConfig::default(),
            animation: AnimationConfig::default(),
        }
    }
}
