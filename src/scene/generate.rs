//! Rejection-sampled sphere placement
//!
//! One attempt per requested sphere. A candidate that overlaps any accepted
//! sphere is dropped and its slot is skipped, never retried, so scenes usually
//! come out smaller than requested. Placement is O(n) per candidate against
//! the accepted list; counts are small enough that no spatial index is needed.

use glam::{Vec2, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use super::sphere::Sphere;
use crate::error::SceneError;
use crate::settings::SceneSettings;

/// Upper bound on the up-front reservation. Rejections usually leave the
/// scene well short of `max_count`, and counts near `u32::MAX` are valid.
const RESERVE_LIMIT: u32 = 1024;

/// Outcome counts for one generation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub requested: u32,
    pub accepted: u32,
    pub rejected: u32,
}

/// Generate a scene's spheres from `settings`, drawing from `rng`
pub fn generate<R: Rng + ?Sized>(
    settings: &SceneSettings,
    rng: &mut R,
) -> Result<Vec<Sphere>, SceneError> {
    generate_with_report(settings, rng).map(|(spheres, _)| spheres)
}

/// Same as [`generate`], also returning how many attempts were rejected
pub fn generate_with_report<R: Rng + ?Sized>(
    settings: &SceneSettings,
    rng: &mut R,
) -> Result<(Vec<Sphere>, GenerationReport), SceneError> {
    settings.validate()?;

    let mut spheres: Vec<Sphere> = Vec::with_capacity(initial_capacity(settings.max_count));
    let mut report = GenerationReport {
        requested: settings.max_count,
        ..Default::default()
    };

    for attempt in 0..settings.max_count {
        let radius = settings.radius_range.lerp(rng.random::<f32>());
        let ground = sample_in_disk(rng, settings.placement_disk_radius);
        // Rest on the y = 0 plane
        let center = Vec3::new(ground.x, radius, ground.y);

        if spheres
            .iter()
            .any(|other| Sphere::overlaps_at(center, radius, other))
        {
            log::debug!("Attempt {attempt}: sphere r={radius:.2} at {center} overlaps, skipped");
            report.rejected += 1;
            continue;
        }

        let color = random_hsv_color(rng);
        let metal = rng.random::<f32>() < settings.metal_probability;
        let sphere = if metal {
            Sphere::metallic(center, radius, color)
        } else {
            Sphere::diffuse(center, radius, color, settings.dielectric_specular)
        };
        spheres.push(sphere);
        report.accepted += 1;
    }

    log::info!(
        "Generated {} of {} spheres ({} rejected)",
        report.accepted,
        report.requested,
        report.rejected
    );
    if report.accepted == 0 && report.requested > 0 {
        log::warn!("Scene generation produced no spheres");
    }

    Ok((spheres, report))
}

#[inline]
fn initial_capacity(max_count: u32) -> usize {
    max_count.min(RESERVE_LIMIT) as usize
}

/// Uniform-area point in a disk centered on the origin
pub fn sample_in_disk<R: Rng + ?Sized>(rng: &mut R, radius: f32) -> Vec2 {
    // sqrt keeps density uniform instead of piling up at the center
    let r = radius * rng.random::<f32>().sqrt();
    let theta = rng.random::<f32>() * TAU;
    Vec2::from_angle(theta) * r
}

/// Random colour with hue, saturation and value each uniform in [0, 1]
pub fn random_hsv_color<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let h = rng.random::<f32>();
    let s = rng.random::<f32>();
    let v = rng.random::<f32>();
    hsv_to_rgb(h, s, v)
}

/// Convert HSV (all components in [0, 1]) to linear RGB
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> Vec3 {
    if s <= 0.0 {
        return Vec3::splat(v);
    }
    let h6 = h.rem_euclid(1.0) * 6.0;
    let sector = h6.floor();
    let f = h6 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    match sector as u32 {
        0 => Vec3::new(v, t, p),
        1 => Vec3::new(q, v, p),
        2 => Vec3::new(p, v, t),
        3 => Vec3::new(p, q, v),
        4 => Vec3::new(t, p, v),
        _ => Vec3::new(v, p, q),
    }
}
