//! Sphere Field - procedural sphere scenes for GPU ray tracing
//!
//! Core modules:
//! - `scene`: Non-overlapping sphere placement and the `Scene` aggregate
//! - `intersect`: Exact ray-sphere intersection with hit-driven albedo decay
//! - `settings`: Generation parameters and per-frame renderer inputs
//! - `clock`: Injected time sources
//! - `gpu`: Buffer upload for the shader consumer

pub mod clock;
pub mod error;
pub mod gpu;
pub mod intersect;
pub mod scene;
pub mod settings;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::SceneError;
pub use intersect::{HitResult, Ray, decay_alpha, intersect, ray_sphere};
pub use scene::{GenerationReport, GpuSphere, Material, Pick, Scene, Sphere, generate};
pub use settings::{FrameParams, RadiusRange, SceneSettings};

/// Scene configuration constants
pub mod consts {
    /// Default number of placement attempts (one per requested sphere)
    pub const DEFAULT_MAX_SPHERES: u32 = 100;
    /// Default radius bounds
    pub const DEFAULT_RADIUS_MIN: f32 = 3.0;
    pub const DEFAULT_RADIUS_MAX: f32 = 8.0;
    /// Default radius of the ground disk spheres are scattered over
    pub const DEFAULT_PLACEMENT_RADIUS: f32 = 100.0;

    /// Chance that an accepted sphere is metallic
    pub const METAL_PROBABILITY: f32 = 0.5;
    /// Reflectance of non-metals (roughly 4% at normal incidence)
    pub const DIELECTRIC_SPECULAR: f32 = 0.04;

    /// Floats per sphere record in the GPU buffer
    pub const SPHERE_RECORD_FLOATS: usize = 11;
    /// Bytes per sphere record in the GPU buffer
    pub const SPHERE_STRIDE: usize = SPHERE_RECORD_FLOATS * std::mem::size_of::<f32>();
}
