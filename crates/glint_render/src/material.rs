//! Material trait for surface scattering.

use crate::hittable::HitRecord;
use crate::sampling::{gen_f64, random_unit_vector};
use crate::texture::{SolidColor, Texture};
use glint_math::{Point3, Ray, Vec3};
use rand::RngCore;
use std::sync::Arc;

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Trait for materials that describe how light interacts with surfaces.
pub trait Material: Send + Sync {
    /// Scatter an incoming ray.
    ///
    /// Returns Some((attenuation, scattered_ray)) if the ray scatters,
    /// or None if the ray is absorbed.
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<(Color, Ray)>;

    /// Get emitted light from this material.
    ///
    /// Returns the color of light emitted at the given UV coordinates and point.
    /// Most materials return black (no emission).
    fn emitted(&self, _u: f64, _v: f64, _p: Point3) -> Color {
        Color::ZERO
    }
}

/// Lambertian (diffuse) material with a texture-driven albedo.
pub struct Lambertian {
    texture: Arc<dyn Texture>,
}

impl Lambertian {
    /// Create a Lambertian material with a solid albedo color.
    pub fn new(albedo: Color) -> Self {
        Self {
            texture: Arc::new(SolidColor::new(albedo)),
        }
    }

    /// Create a Lambertian material driven by a texture.
    pub fn textured(texture: Arc<dyn Texture>) -> Self {
        Self { texture }
    }
}

impl Material for Lambertian {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<(Color, Ray)> {
        // Scatter in a random direction on the hemisphere around the normal
        let mut scatter_direction = rec.normal + random_unit_vector(rng);

        // Catch degenerate scatter direction
        if scatter_direction.length_squared() < 1e-16 {
            scatter_direction = rec.normal;
        }

        let scattered = Ray::new(rec.p, scatter_direction, ray_in.time);
        let attenuation = self.texture.value(rec.u, rec.v, rec.p);
        Some((attenuation, scattered))
    }
}

/// Metal (specular) material.
pub struct Metal {
    albedo: Color,
    fuzz: f64,
}

impl Metal {
    /// Create a new Metal material.
    ///
    /// - `albedo`: The color of the metal
    /// - `fuzz`: Roughness, 0.0 = perfect mirror, 1.0 = very rough
    pub fn new(albedo: Color, fuzz: f64) -> Self {
        Self {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }
}

impl Material for Metal {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<(Color, Ray)> {
        let reflected = reflect(ray_in.direction, rec.normal);
        let scattered_dir = reflected.normalize() + self.fuzz * random_unit_vector(rng);

        // Only scatter if the fuzzed ray stays in the same hemisphere as the normal
        if scattered_dir.dot(rec.normal) > 0.0 {
            let scattered = Ray::new(rec.p, scattered_dir, ray_in.time);
            Some((self.albedo, scattered))
        } else {
            None
        }
    }
}

/// Dielectric (glass) material.
pub struct Dielectric {
    /// Index of refraction
    ior: f64,
}

impl Dielectric {
    /// Create a new Dielectric material.
    ///
    /// - `ior`: Index of refraction (1.0 = air, 1.5 = glass, 2.4 = diamond)
    pub fn new(ior: f64) -> Self {
        Self { ior }
    }

    /// Schlick's approximation for reflectance
    fn reflectance(cosine: f64, ior: f64) -> f64 {
        let r0 = ((1.0 - ior) / (1.0 + ior)).powi(2);
        r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
    }
}

impl Material for Dielectric {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<(Color, Ray)> {
        let attenuation = Color::ONE;
        let refraction_ratio = if rec.front_face {
            1.0 / self.ior
        } else {
            self.ior
        };

        let unit_direction = ray_in.direction.normalize();
        let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

        // Check for total internal reflection
        let cannot_refract = refraction_ratio * sin_theta > 1.0;

        let direction =
            if cannot_refract || Self::reflectance(cos_theta, refraction_ratio) > gen_f64(rng) {
                reflect(unit_direction, rec.normal)
            } else {
                refract(unit_direction, rec.normal, refraction_ratio)
            };

        let scattered = Ray::new(rec.p, direction, ray_in.time);
        Some((attenuation, scattered))
    }
}

/// Diffuse light emitter.
pub struct DiffuseLight {
    texture: Arc<dyn Texture>,
}

impl DiffuseLight {
    /// Create a diffuse light with a uniform emission color.
    pub fn new(emit: Color) -> Self {
        Self {
            texture: Arc::new(SolidColor::new(emit)),
        }
    }

    /// Create a diffuse light driven by a texture.
    pub fn textured(texture: Arc<dyn Texture>) -> Self {
        Self { texture }
    }
}

impl Material for DiffuseLight {
    fn scatter(
        &self,
        _ray_in: &Ray,
        _rec: &HitRecord,
        _rng: &mut dyn RngCore,
    ) -> Option<(Color, Ray)> {
        // Lights don't scatter rays
        None
    }

    fn emitted(&self, u: f64, v: f64, p: Point3) -> Color {
        self.texture.value(u, v, p)
    }
}

/// Isotropic phase function for participating media.
///
/// Scatters into a uniformly random direction, independent of the
/// incoming ray.
pub struct Isotropic {
    texture: Arc<dyn Texture>,
}

impl Isotropic {
    /// Create an isotropic material with a solid albedo color.
    pub fn new(albedo: Color) -> Self {
        Self {
            texture: Arc::new(SolidColor::new(albedo)),
        }
    }

    /// Create an isotropic material driven by a texture.
    pub fn textured(texture: Arc<dyn Texture>) -> Self {
        Self { texture }
    }
}

impl Material for Isotropic {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<(Color, Ray)> {
        let scattered = Ray::new(rec.p, random_unit_vector(rng), ray_in.time);
        let attenuation = self.texture.value(rec.u, rec.v, rec.p);
        Some((attenuation, scattered))
    }
}

// =============================================================================
// Helper functions
// =============================================================================

/// Reflect a vector about a normal.
#[inline]
fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a vector through a surface.
#[inline]
fn refract(uv: Vec3, n: Vec3, etai_over_etat: f64) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn hit_at_origin(ray: &Ray, outward_normal: Vec3, mat: Arc<dyn Material>) -> HitRecord {
        let mut rec = HitRecord {
            p: Point3::ZERO,
            normal: Vec3::ZERO,
            mat,
            t: 1.0,
            u: 0.0,
            v: 0.0,
            front_face: false,
        };
        rec.set_face_normal(ray, outward_normal);
        rec
    }

    #[test]
    fn test_lambertian_scatter() {
        let mat = Arc::new(Lambertian::new(Color::new(0.8, 0.1, 0.1)));
        let ray = Ray::new_simple(Point3::new(0.0, 1.0, 0.0), -Vec3::Y);
        let rec = hit_at_origin(&ray, Vec3::Y, mat.clone());

        let mut rng = StdRng::seed_from_u64(42);
        let (attenuation, scattered) = mat
            .scatter(&ray, &rec, &mut rng)
            .expect("lambertian always scatters");

        assert_eq!(attenuation, Color::new(0.8, 0.1, 0.1));
        assert_eq!(scattered.origin, rec.p);
        assert!(scattered.direction.length_squared() > 1e-16);
        // Cosine-weighted directions stay in the normal's hemisphere
        assert!(scattered.direction.dot(rec.normal) > 0.0);
    }

    #[test]
    fn test_metal_mirror_reflection() {
        let mat = Arc::new(Metal::new(Color::new(0.9, 0.9, 0.9), 0.0));
        let incoming = Vec3::new(1.0, -1.0, 0.0);
        let ray = Ray::new_simple(Point3::new(-1.0, 1.0, 0.0), incoming);
        let rec = hit_at_origin(&ray, Vec3::Y, mat.clone());

        let mut rng = StdRng::seed_from_u64(42);
        let (_, scattered) = mat
            .scatter(&ray, &rec, &mut rng)
            .expect("mirror reflection above the surface");

        // Perfect mirror: (1,-1,0) reflects to (1,1,0), normalized
        let expected = Vec3::new(1.0, 1.0, 0.0).normalize();
        assert!((scattered.direction - expected).length() < 1e-9);
    }

    #[test]
    fn test_dielectric_unit_ior_passes_straight() {
        let mat = Arc::new(Dielectric::new(1.0));
        let direction = -Vec3::Y;
        let ray = Ray::new_simple(Point3::new(0.0, 1.0, 0.0), direction);
        let rec = hit_at_origin(&ray, Vec3::Y, mat.clone());

        let mut rng = StdRng::seed_from_u64(42);
        let (attenuation, scattered) = mat
            .scatter(&ray, &rec, &mut rng)
            .expect("dielectric always scatters");

        // At index 1.0 and head-on incidence the ray continues unchanged
        assert_eq!(attenuation, Color::ONE);
        assert!((scattered.direction - direction).length() < 1e-9);
    }

    #[test]
    fn test_diffuse_light_emits_and_absorbs() {
        let mat = Arc::new(DiffuseLight::new(Color::new(4.0, 4.0, 4.0)));
        let ray = Ray::new_simple(Point3::new(0.0, 1.0, 0.0), -Vec3::Y);
        let rec = hit_at_origin(&ray, Vec3::Y, mat.clone());

        let mut rng = StdRng::seed_from_u64(42);
        assert!(mat.scatter(&ray, &rec, &mut rng).is_none());
        assert_eq!(mat.emitted(0.0, 0.0, Point3::ZERO), Color::new(4.0, 4.0, 4.0));
    }

    #[test]
    fn test_isotropic_scatters_unit_direction() {
        let mat = Arc::new(Isotropic::new(Color::new(0.2, 0.4, 0.6)));
        let ray = Ray::new_simple(Point3::new(0.0, 1.0, 0.0), -Vec3::Y);
        let rec = hit_at_origin(&ray, Vec3::Y, mat.clone());

        let mut rng = StdRng::seed_from_u64(42);
        let (attenuation, scattered) = mat
            .scatter(&ray, &rec, &mut rng)
            .expect("isotropic always scatters");

        assert_eq!(attenuation, Color::new(0.2, 0.4, 0.6));
        assert!((scattered.direction.length() - 1.0).abs() < 1e-9);
    }
}
