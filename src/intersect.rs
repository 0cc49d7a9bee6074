//! Ray-sphere intersection
//!
//! Closed-form quadratic with a unit-length direction, so `a = 1` and the
//! half-`b` form of the discriminant is used. Non-unit directions are a caller
//! error and give meaningless distances.

use glam::{Mat4, UVec2, Vec2, Vec3, Vec4};

use crate::scene::Sphere;

/// A half-line with a unit direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// `direction` must already be unit length
    pub const fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Ray from `origin` through `target`
    pub fn towards(origin: Vec3, target: Vec3) -> Self {
        Self::new(origin, (target - origin).normalize_or_zero())
    }

    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// World-space camera ray through a continuous screen position.
    ///
    /// `screen` is in pixels with (0, 0) at the bottom-left corner; add the
    /// frame's sub-pixel offset before calling.
    pub fn from_screen(
        screen: Vec2,
        resolution: UVec2,
        camera_to_world: Mat4,
        inverse_projection: Mat4,
    ) -> Self {
        let uv = screen / resolution.max(UVec2::ONE).as_vec2() * 2.0 - Vec2::ONE;

        let origin = camera_to_world.w_axis.truncate();
        // Point on the near plane in view space; the view-space eye is the origin
        let near = inverse_projection * Vec4::new(uv.x, uv.y, 0.0, 1.0);
        let view_dir = near.truncate() / near.w;
        let direction = camera_to_world.transform_vector3(view_dir).normalize_or_zero();

        Self::new(origin, direction)
    }
}

/// Outcome of a single ray-sphere test
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitResult {
    Miss,
    /// `distance` is the nearer root; negative when the sphere is behind
    /// the origin or the origin is inside it
    Hit { distance: f32 },
}

impl HitResult {
    #[inline]
    pub fn is_hit(&self) -> bool {
        matches!(self, HitResult::Hit { .. })
    }

    #[inline]
    pub fn distance(&self) -> Option<f32> {
        match *self {
            HitResult::Hit { distance } => Some(distance),
            HitResult::Miss => None,
        }
    }
}

/// Roots of the ray/sphere quadratic as `(near, far)`, or `None` on a miss
#[inline]
pub(crate) fn roots(ray: &Ray, sphere: &Sphere) -> Option<(f32, f32)> {
    let oc = ray.origin - sphere.center;
    let b = ray.direction.dot(oc);
    let c = oc.dot(oc) - sphere.radius * sphere.radius;
    // b^2 - 4ac with a = 1 and b halved, all divided by 4
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    let root = discriminant.sqrt();
    Some((-b - root, -b + root))
}

/// Side-effect-free intersection test. Tangent rays count as hits.
pub fn ray_sphere(ray: &Ray, sphere: &Sphere) -> HitResult {
    match roots(ray, sphere) {
        Some((near, _)) => HitResult::Hit { distance: near },
        None => HitResult::Miss,
    }
}

/// Intersect and, on a hit, fade the sphere's albedo alpha for `time`.
///
/// The fade is not guarded against repeats: call at most once per sphere per
/// frame or the decrement compounds.
pub fn intersect(ray: &Ray, sphere: &mut Sphere, time: f32) -> HitResult {
    let result = ray_sphere(ray, sphere);
    if result.is_hit() {
        decay_alpha(&mut sphere.albedo, time);
    }
    result
}

/// Subtract `(cos(time) + 1) / 4` from alpha, clamped at zero
#[inline]
pub fn decay_alpha(albedo: &mut Vec4, time: f32) {
    let fade = (time.cos() + 1.0) / 4.0;
    albedo.w = (albedo.w - fade).max(0.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    const EPS: f32 = 1e-4;

    fn unit_sphere() -> Sphere {
        Sphere::diffuse(Vec3::ZERO, 1.0, Vec3::new(0.8, 0.2, 0.2), 0.04)
    }

    #[test]
    fn test_head_on_hit_distance() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
        let result = ray_sphere(&ray, &unit_sphere());
        let distance = result.distance().unwrap();
        assert!((distance - 4.0).abs() < EPS);
        assert!(ray.at(distance).abs_diff_eq(Vec3::new(0.0, 0.0, -1.0), EPS));
    }

    #[test]
    fn test_parallel_offset_miss() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::X);
        assert_eq!(ray_sphere(&ray, &unit_sphere()), HitResult::Miss);
    }

    #[test]
    fn test_tangent_counts_as_hit() {
        let ray = Ray::new(Vec3::new(1.0, 0.0, -5.0), Vec3::Z);
        let distance = ray_sphere(&ray, &unit_sphere()).distance().unwrap();
        assert!((distance - 5.0).abs() < EPS);
    }

    #[test]
    fn test_sphere_behind_origin_reports_negative_distance() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), -Vec3::Z);
        let distance = ray_sphere(&ray, &unit_sphere()).distance().unwrap();
        assert!((distance - (-6.0)).abs() < EPS);
    }

    #[test]
    fn test_offset_sphere_hit_from_towards() {
        let mut sphere = unit_sphere();
        sphere.center = Vec3::new(10.0, 3.0, 10.0);
        sphere.radius = 3.0;
        let origin = Vec3::new(0.0, 3.0, 0.0);
        let ray = Ray::towards(origin, sphere.center);
        let expected = origin.distance(sphere.center) - 3.0;
        let distance = ray_sphere(&ray, &sphere).distance().unwrap();
        assert!((distance - expected).abs() < 1e-3);
    }

    #[test]
    fn test_miss_leaves_alpha_untouched() {
        let mut sphere = unit_sphere();
        let ray = Ray::new(Vec3::new(0.0, 5.0, -5.0), Vec3::Z);
        assert_eq!(intersect(&ray, &mut sphere, 0.0), HitResult::Miss);
        assert_eq!(sphere.albedo.w, 1.0);
    }

    #[test]
    fn test_hit_decays_alpha_by_time() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);

        // cos(0) = 1 -> fade 0.5
        let mut sphere = unit_sphere();
        assert!(intersect(&ray, &mut sphere, 0.0).is_hit());
        assert!((sphere.albedo.w - 0.5).abs() < EPS);

        // cos(pi) = -1 -> no fade
        let mut sphere = unit_sphere();
        intersect(&ray, &mut sphere, PI);
        assert!((sphere.albedo.w - 1.0).abs() < EPS);

        // rgb never changes
        assert_eq!(sphere.albedo.truncate(), Vec3::new(0.8, 0.2, 0.2));
    }

    #[test]
    fn test_repeated_hits_compound_then_clamp() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
        let mut sphere = unit_sphere();
        // cos(pi/2) = 0 -> fade 0.25 per hit
        let expected = [0.75, 0.5, 0.25, 0.0, 0.0, 0.0];
        for want in expected {
            intersect(&ray, &mut sphere, FRAC_PI_2);
            assert!((sphere.albedo.w - want).abs() < EPS, "alpha = {}", sphere.albedo.w);
        }
    }

    #[test]
    fn test_metallic_alpha_stays_zero() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
        let mut sphere = Sphere::metallic(Vec3::ZERO, 1.0, Vec3::ONE);
        intersect(&ray, &mut sphere, 0.0);
        assert_eq!(sphere.albedo, Vec4::ZERO);
    }

    #[test]
    fn test_screen_center_ray_follows_camera() {
        let projection = Mat4::perspective_rh(60f32.to_radians(), 1.0, 0.1, 100.0);
        let camera_to_world = Mat4::from_translation(Vec3::new(0.0, 0.0, 5.0));
        let ray = Ray::from_screen(
            Vec2::new(50.0, 50.0),
            UVec2::new(100, 100),
            camera_to_world,
            projection.inverse(),
        );
        assert!(ray.origin.abs_diff_eq(Vec3::new(0.0, 0.0, 5.0), EPS));
        assert!(ray.direction.abs_diff_eq(-Vec3::Z, EPS));

        let distance = ray_sphere(&ray, &unit_sphere()).distance().unwrap();
        assert!((distance - 4.0).abs() < 1e-3);
    }

    #[test]
    fn test_screen_corner_ray_is_unit_and_off_axis() {
        let projection = Mat4::perspective_rh(90f32.to_radians(), 1.0, 0.1, 100.0);
        let ray = Ray::from_screen(
            Vec2::ZERO,
            UVec2::new(64, 64),
            Mat4::IDENTITY,
            projection.inverse(),
        );
        assert!((ray.direction.length() - 1.0).abs() < EPS);
        // Bottom-left corner of a 90 degree frustum: 45 degrees off axis on both
        let expected = Vec3::new(-1.0, -1.0, -1.0).normalize();
        assert!(ray.direction.abs_diff_eq(expected, 1e-3));
    }
}
