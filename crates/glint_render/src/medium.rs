//! Constant-density participating media (smoke, fog).
//!
//! A medium is bounded by another hittable. A ray entering the boundary
//! scatters at an exponentially distributed depth; if the sampled depth
//! exceeds the chord through the volume, the ray passes through.

use std::sync::Arc;

use rand::RngCore;

use crate::hittable::{HitRecord, Hittable};
use crate::material::{Color, Isotropic, Material};
use crate::sampling::gen_f64;
use crate::texture::Texture;
use glint_math::{Aabb, Interval, Ray, Vec3};

/// A volume of uniform density with an isotropic phase function.
///
/// The boundary must be convex: the hit test probes one entry and one
/// exit point along the ray.
pub struct ConstantMedium {
    boundary: Arc<dyn Hittable>,
    neg_inv_density: f64,
    phase_function: Arc<dyn Material>,
}

impl ConstantMedium {
    /// Create a medium with a texture-driven albedo.
    pub fn new(boundary: Arc<dyn Hittable>, density: f64, texture: Arc<dyn Texture>) -> Self {
        Self {
            boundary,
            neg_inv_density: -1.0 / density,
            phase_function: Arc::new(Isotropic::textured(texture)),
        }
    }

    /// Create a medium with a solid albedo color.
    pub fn from_color(boundary: Arc<dyn Hittable>, density: f64, albedo: Color) -> Self {
        Self {
            boundary,
            neg_inv_density: -1.0 / density,
            phase_function: Arc::new(Isotropic::new(albedo)),
        }
    }
}

impl Hittable for ConstantMedium {
    fn hit(&self, ray: &Ray, ray_t: Interval, rng: &mut dyn RngCore) -> Option<HitRecord> {
        // Find where the ray enters and leaves the boundary, searching the
        // whole line so rays starting inside still find their exit
        let rec1 = self.boundary.hit(ray, Interval::UNIVERSE, rng)?;
        let rec2 = self
            .boundary
            .hit(ray, Interval::new(rec1.t + 0.0001, f64::INFINITY), rng)?;

        let mut t_enter = rec1.t.max(ray_t.min);
        let t_exit = rec2.t.min(ray_t.max);

        if t_enter >= t_exit {
            return None;
        }

        if t_enter < 0.0 {
            t_enter = 0.0;
        }

        let ray_length = ray.direction.length();
        let distance_inside_boundary = (t_exit - t_enter) * ray_length;
        let hit_distance = self.neg_inv_density * gen_f64(rng).ln();

        if hit_distance > distance_inside_boundary {
            return None;
        }

        let t = t_enter + hit_distance / ray_length;

        Some(HitRecord {
            p: ray.at(t),
            normal: Vec3::X, // arbitrary
            mat: self.phase_function.clone(),
            t,
            u: 0.0,
            v: 0.0,
            front_face: true, // also arbitrary
        })
    }

    fn bounding_box(&self) -> Aabb {
        self.boundary.bounding_box()
    }
}
