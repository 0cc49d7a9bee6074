//! Sphere records and their GPU wire layout

use bytemuck::{Pod, Zeroable};
use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// Surface category. A sphere is exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Material {
    /// Colour lives in `specular`, albedo is zero
    Metallic,
    /// Colour lives in `albedo`, specular is a small grey constant
    Diffuse,
}

/// A sphere resting on the ground plane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
    /// Diffuse reflectance; alpha decays on hit
    pub albedo: Vec4,
    pub specular: Vec3,
    pub material: Material,
}

impl Sphere {
    /// Metal: no diffuse term, tinted reflection
    pub fn metallic(center: Vec3, radius: f32, color: Vec3) -> Self {
        Self {
            center,
            radius,
            albedo: Vec4::ZERO,
            specular: color,
            material: Material::Metallic,
        }
    }

    /// Dielectric: coloured diffuse term, grey reflection
    pub fn diffuse(center: Vec3, radius: f32, color: Vec3, specular: f32) -> Self {
        Self {
            center,
            radius,
            albedo: color.extend(1.0),
            specular: Vec3::splat(specular),
            material: Material::Diffuse,
        }
    }

    #[inline]
    pub fn is_metallic(&self) -> bool {
        self.material == Material::Metallic
    }

    /// True when the two spheres share any volume. Touching is not overlap.
    #[inline]
    pub fn overlaps(&self, other: &Sphere) -> bool {
        Self::overlaps_at(self.center, self.radius, other)
    }

    /// Overlap test for a candidate that has not been built yet
    #[inline]
    pub(crate) fn overlaps_at(center: Vec3, radius: f32, other: &Sphere) -> bool {
        let min_dist = radius + other.radius;
        center.distance_squared(other.center) < min_dist * min_dist
    }

    pub fn to_gpu(&self) -> GpuSphere {
        GpuSphere::from(self)
    }
}

/// Shader-side sphere record: 11 floats, 44 bytes, no padding
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct GpuSphere {
    pub center: [f32; 3],   // offset 0
    pub radius: f32,        // offset 12
    pub albedo: [f32; 4],   // offset 16
    pub specular: [f32; 3], // offset 32
}

impl From<&Sphere> for GpuSphere {
    fn from(sphere: &Sphere) -> Self {
        Self {
            center: sphere.center.to_array(),
            radius: sphere.radius,
            albedo: sphere.albedo.to_array(),
            specular: sphere.specular.to_array(),
        }
    }
}
