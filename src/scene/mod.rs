//! Scene aggregate
//!
//! A `Scene` owns one generated set of spheres plus what produced it (settings
//! and seed), so a reset can regenerate it in place. Count is fixed after
//! generation; only albedo alpha changes, through picking.

pub mod generate;
pub mod sphere;

pub use generate::{GenerationReport, generate, generate_with_report};
pub use sphere::{GpuSphere, Material, Sphere};

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::error::SceneError;
use crate::intersect::{Ray, decay_alpha, roots};
use crate::settings::SceneSettings;

/// The nearest sphere in front of a picking ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pick {
    /// Index into `Scene::spheres`
    pub index: usize,
    pub distance: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    pub settings: SceneSettings,
    /// Seed of the current generation
    pub seed: u64,
    pub spheres: Vec<Sphere>,
    pub report: GenerationReport,
    /// Progressive accumulation sample counter, reset with the scene
    #[serde(skip)]
    sample_index: u32,
}

impl Scene {
    /// Generate a scene fully determined by `settings` and `seed`
    pub fn generate(settings: SceneSettings, seed: u64) -> Result<Self, SceneError> {
        let mut rng = Pcg32::seed_from_u64(seed);
        let (spheres, report) = generate_with_report(&settings, &mut rng)?;
        log::info!("Scene seed {seed}: {} spheres", spheres.len());
        Ok(Self {
            settings,
            seed,
            spheres,
            report,
            sample_index: 0,
        })
    }

    /// Wrap hand-placed spheres. No overlap check is made.
    ///
    /// Report counts saturate at `u32::MAX`; GPU upload rejects such scenes.
    pub fn from_spheres(spheres: Vec<Sphere>) -> Self {
        let count = u32::try_from(spheres.len()).unwrap_or(u32::MAX);
        Self {
            settings: SceneSettings {
                max_count: count,
                ..SceneSettings::default()
            },
            seed: 0,
            spheres,
            report: GenerationReport {
                requested: count,
                accepted: count,
                rejected: 0,
            },
            sample_index: 0,
        }
    }

    /// Throw the spheres away and regenerate with the stored settings.
    ///
    /// On error the current scene is left untouched.
    pub fn reset(&mut self, seed: u64) -> Result<(), SceneError> {
        let fresh = Self::generate(self.settings.clone(), seed)?;
        *self = fresh;
        Ok(())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.spheres.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.spheres.is_empty()
    }

    pub fn sample_index(&self) -> u32 {
        self.sample_index
    }

    /// Bump the accumulation counter after a frame is rendered
    pub fn advance_sample(&mut self) -> u32 {
        self.sample_index = self.sample_index.saturating_add(1);
        self.sample_index
    }

    /// Find the nearest sphere in front of `ray` and fade it.
    ///
    /// Only the picked sphere is faded, once, using the clock's current time.
    /// A ray starting inside a sphere picks that sphere at its exit point.
    pub fn pick(&mut self, ray: &Ray, clock: &impl Clock) -> Option<Pick> {
        let mut best: Option<Pick> = None;
        for (index, sphere) in self.spheres.iter().enumerate() {
            let Some((near, far)) = roots(ray, sphere) else {
                continue;
            };
            let distance = if near >= 0.0 { near } else { far };
            if distance < 0.0 {
                continue;
            }
            if best.is_none_or(|b| distance < b.distance) {
                best = Some(Pick { index, distance });
            }
        }

        if let Some(pick) = best {
            let time = clock.now();
            decay_alpha(&mut self.spheres[pick.index].albedo, time);
            log::debug!("Picked sphere {} at distance {:.3}", pick.index, pick.distance);
        }
        best
    }

    /// Records in buffer order for the shader
    pub fn gpu_records(&self) -> Vec<GpuSphere> {
        self.spheres.iter().map(GpuSphere::from).collect()
    }
}
