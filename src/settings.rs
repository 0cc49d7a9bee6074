//! Scene generation settings and per-frame renderer inputs
//!
//! `SceneSettings` is what the host hands to the generator. `FrameParams` is
//! forwarded untouched to the rendering collaborator each frame.

use glam::{Mat4, UVec2, Vec2, Vec3, Vec4};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SceneError;
use crate::intersect::Ray;

/// Inclusive bounds for sampled sphere radii
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadiusRange {
    pub min: f32,
    pub max: f32,
}

impl RadiusRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn contains(&self, radius: f32) -> bool {
        radius >= self.min && radius <= self.max
    }

    /// Linear interpolation between the bounds, `t` in [0, 1]
    #[inline]
    pub fn lerp(&self, t: f32) -> f32 {
        self.min + t * (self.max - self.min)
    }
}

impl Default for RadiusRange {
    fn default() -> Self {
        Self::new(DEFAULT_RADIUS_MIN, DEFAULT_RADIUS_MAX)
    }
}

/// Parameters for one generation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneSettings {
    /// Placement attempts; the scene holds at most this many spheres
    pub max_count: u32,
    /// Radius bounds for every sphere
    pub radius_range: RadiusRange,
    /// Radius of the ground disk centers are scattered over
    pub placement_disk_radius: f32,
    /// Chance an accepted sphere is metallic (0.0 - 1.0)
    pub metal_probability: f32,
    /// Grey specular reflectance given to diffuse spheres
    pub dielectric_specular: f32,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            max_count: DEFAULT_MAX_SPHERES,
            radius_range: RadiusRange::default(),
            placement_disk_radius: DEFAULT_PLACEMENT_RADIUS,
            metal_probability: METAL_PROBABILITY,
            dielectric_specular: DIELECTRIC_SPECULAR,
        }
    }
}

impl SceneSettings {
    pub fn new(max_count: u32, radius_range: RadiusRange, placement_disk_radius: f32) -> Self {
        Self {
            max_count,
            radius_range,
            placement_disk_radius,
            ..Self::default()
        }
    }

    /// Check the caller contract. Zero `max_count` is allowed.
    pub fn validate(&self) -> Result<(), SceneError> {
        let RadiusRange { min, max } = self.radius_range;
        if !min.is_finite() || !max.is_finite() {
            return Err(SceneError::invalid(
                "radius_range",
                format!("bounds must be finite, got [{min}, {max}]"),
            ));
        }
        if min > max {
            return Err(SceneError::invalid(
                "radius_range",
                format!("min {min} is greater than max {max}"),
            ));
        }
        if min <= 0.0 {
            return Err(SceneError::invalid(
                "radius_range",
                format!("radii must be positive, got min {min}"),
            ));
        }
        if !self.placement_disk_radius.is_finite() || self.placement_disk_radius < 0.0 {
            return Err(SceneError::invalid(
                "placement_disk_radius",
                format!("must be finite and >= 0, got {}", self.placement_disk_radius),
            ));
        }
        if !(0.0..=1.0).contains(&self.metal_probability) {
            return Err(SceneError::invalid(
                "metal_probability",
                format!("must be within [0, 1], got {}", self.metal_probability),
            ));
        }
        // NaN fails the range check too
        if !(0.0..=1.0).contains(&self.dielectric_specular) {
            return Err(SceneError::invalid(
                "dielectric_specular",
                format!("must be within [0, 1], got {}", self.dielectric_specular),
            ));
        }
        Ok(())
    }

    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        log::info!("Loaded scene settings: {} spheres max", settings.max_count);
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SceneError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Per-frame inputs for the renderer. Not interpreted by this crate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameParams {
    pub camera_to_world: Mat4,
    pub inverse_projection: Mat4,
    /// xyz = light forward direction, w = intensity
    pub directional_light: Vec4,
    /// Sub-pixel jitter in [0, 1)^2, resampled every frame
    pub pixel_offset: Vec2,
    pub resolution: UVec2,
    /// Seconds from the host clock
    pub time: f32,
}

impl Default for FrameParams {
    fn default() -> Self {
        Self {
            camera_to_world: Mat4::IDENTITY,
            inverse_projection: Mat4::IDENTITY,
            directional_light: Vec4::new(0.0, -1.0, 0.0, 1.0),
            pixel_offset: Vec2::splat(0.5),
            resolution: UVec2::new(1, 1),
            time: 0.0,
        }
    }
}

impl FrameParams {
    pub fn new(camera_to_world: Mat4, inverse_projection: Mat4, resolution: UVec2) -> Self {
        Self {
            camera_to_world,
            inverse_projection,
            resolution,
            ..Self::default()
        }
    }

    /// Pack light direction and intensity the way the shader expects
    pub fn set_light(&mut self, forward: Vec3, intensity: f32) {
        self.directional_light = forward.extend(intensity);
    }

    /// Resample the per-frame pixel jitter
    pub fn jitter<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.pixel_offset = Vec2::new(rng.random::<f32>(), rng.random::<f32>());
    }

    /// Jittered camera ray through `pixel` (bottom-left origin)
    pub fn camera_ray(&self, pixel: UVec2) -> Ray {
        Ray::from_screen(
            pixel.as_vec2() + self.pixel_offset,
            self.resolution,
            self.camera_to_world,
            self.inverse_projection,
        )
    }
}
