//! Instance transforms that reposition hittables without moving geometry.
//!
//! Instead of transforming the object, the incoming ray is moved into the
//! object's local space and the hit is mapped back out. Composing wrappers
//! applies the transforms innermost first.

use std::sync::Arc;

use rand::RngCore;

use crate::hittable::{HitRecord, Hittable};
use glint_math::{Aabb, Interval, Point3, Ray, Vec3};

/// Moves an object by a fixed offset.
pub struct Translate {
    object: Arc<dyn Hittable>,
    offset: Vec3,
    bbox: Aabb,
}

impl Translate {
    pub fn new(object: Arc<dyn Hittable>, offset: Vec3) -> Self {
        let bbox = object.bounding_box().translate(offset);

        Self {
            object,
            offset,
            bbox,
        }
    }
}

impl Hittable for Translate {
    fn hit(&self, ray: &Ray, ray_t: Interval, rng: &mut dyn RngCore) -> Option<HitRecord> {
        // Move the ray backwards by the offset
        let offset_ray = Ray::new(ray.origin - self.offset, ray.direction, ray.time);

        // Intersect in local space, then move the hit point forwards
        let mut rec = self.object.hit(&offset_ray, ray_t, rng)?;
        rec.p += self.offset;

        Some(rec)
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

/// Rotates an object around the world Y axis.
pub struct RotateY {
    object: Arc<dyn Hittable>,
    sin_theta: f64,
    cos_theta: f64,
    bbox: Aabb,
}

impl RotateY {
    pub fn new(object: Arc<dyn Hittable>, angle_degrees: f64) -> Self {
        let radians = angle_degrees.to_radians();
        let sin_theta = radians.sin();
        let cos_theta = radians.cos();

        // Rotate all eight corners of the child box and rebox them
        let child_bbox = object.bounding_box();
        let mut min = Point3::splat(f64::INFINITY);
        let mut max = Point3::splat(f64::NEG_INFINITY);

        for i in 0..2 {
            for j in 0..2 {
                for k in 0..2 {
                    let x = i as f64 * child_bbox.x.max + (1 - i) as f64 * child_bbox.x.min;
                    let y = j as f64 * child_bbox.y.max + (1 - j) as f64 * child_bbox.y.min;
                    let z = k as f64 * child_bbox.z.max + (1 - k) as f64 * child_bbox.z.min;

                    let new_x = cos_theta * x + sin_theta * z;
                    let new_z = -sin_theta * x + cos_theta * z;

                    let tester = Vec3::new(new_x, y, new_z);
                    min = min.min(tester);
                    max = max.max(tester);
                }
            }
        }

        Self {
            object,
            sin_theta,
            cos_theta,
            bbox: Aabb::from_points(min, max),
        }
    }

    fn world_to_object(&self, v: Vec3) -> Vec3 {
        Vec3::new(
            self.cos_theta * v.x - self.sin_theta * v.z,
            v.y,
            self.sin_theta * v.x + self.cos_theta * v.z,
        )
    }

    fn object_to_world(&self, v: Vec3) -> Vec3 {
        Vec3::new(
            self.cos_theta * v.x + self.sin_theta * v.z,
            v.y,
            -self.sin_theta * v.x + self.cos_theta * v.z,
        )
    }
}

impl Hittable for RotateY {
    fn hit(&self, ray: &Ray, ray_t: Interval, rng: &mut dyn RngCore) -> Option<HitRecord> {
        // Transform the ray from world space to object space
        let rotated = Ray::new(
            self.world_to_object(ray.origin),
            self.world_to_object(ray.direction),
            ray.time,
        );

        // Intersect in object space, then rotate the hit back out
        let mut rec = self.object.hit(&rotated, ray_t, rng)?;
        rec.p = self.object_to_world(rec.p);
        rec.normal = self.object_to_world(rec.normal);

        Some(rec)
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::{Color, Lambertian};
    use crate::sphere::Sphere;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn unit_sphere_at(center: Point3) -> Arc<dyn Hittable> {
        Arc::new(Sphere::new(
            center,
            0.5,
            Arc::new(Lambertian::new(Color::splat(0.5))),
        ))
    }

    fn full_range() -> Interval {
        Interval::new(0.001, f64::INFINITY)
    }

    #[test]
    fn test_translate_shifts_hit_point() {
        let moved = Translate::new(unit_sphere_at(Point3::ZERO), Vec3::new(0.0, 5.0, 0.0));

        let mut rng = StdRng::seed_from_u64(42);
        let ray = Ray::new_simple(Point3::new(0.0, 5.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let rec = moved
            .hit(&ray, full_range(), &mut rng)
            .expect("translated sphere should sit in this ray's path");

        assert!((rec.t - 4.5).abs() < 1e-9);
        assert!((rec.p - Point3::new(0.0, 5.0, 0.5)).length() < 1e-9);

        // The original location no longer hits
        let ray = Ray::new_simple(Point3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(moved.hit(&ray, full_range(), &mut rng).is_none());
    }

    #[test]
    fn test_translate_bbox() {
        let moved = Translate::new(unit_sphere_at(Point3::ZERO), Vec3::new(10.0, 0.0, 0.0));
        let bbox = moved.bounding_box();

        assert!(bbox.x.contains(9.5) && bbox.x.contains(10.5));
        assert!(!bbox.x.contains(0.0));
    }

    #[test]
    fn test_rotate_y_quarter_turn() {
        // A sphere at (2, 0, 0) rotated +90 degrees lands at (0, 0, -2)
        let rotated = RotateY::new(unit_sphere_at(Point3::new(2.0, 0.0, 0.0)), 90.0);

        let mut rng = StdRng::seed_from_u64(42);
        let ray = Ray::new_simple(Point3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let rec = rotated
            .hit(&ray, full_range(), &mut rng)
            .expect("rotated sphere should be on the -z axis");

        assert!((rec.t - 1.5).abs() < 1e-9);
        assert!((rec.p - Point3::new(0.0, 0.0, -1.5)).length() < 1e-9);
        assert!((rec.normal - Vec3::Z).length() < 1e-9);

        // The original location no longer hits
        let ray = Ray::new_simple(Point3::new(2.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(rotated.hit(&ray, full_range(), &mut rng).is_none());
    }

    #[test]
    fn test_rotate_y_bbox_follows_rotation() {
        let rotated = RotateY::new(unit_sphere_at(Point3::new(2.0, 0.0, 0.0)), 90.0);
        let bbox = rotated.bounding_box();

        assert!(bbox.x.contains(0.0));
        assert!(bbox.z.contains(-2.0));
        assert!(bbox.z.max < -1.0);
    }

    #[test]
    fn test_rotate_y_zero_is_identity() {
        let sphere = unit_sphere_at(Point3::new(1.0, 2.0, -3.0));
        let rotated = RotateY::new(sphere.clone(), 0.0);

        let mut rng = StdRng::seed_from_u64(42);
        let ray = Ray::new_simple(Point3::new(1.0, 2.0, 5.0), Vec3::new(0.0, 0.0, -1.0));

        let direct = sphere
            .hit(&ray, full_range(), &mut rng)
            .expect("direct hit");
        let wrapped = rotated
            .hit(&ray, full_range(), &mut rng)
            .expect("identity rotation hit");

        assert!((direct.t - wrapped.t).abs() < 1e-12);
        assert!((direct.p - wrapped.p).length() < 1e-12);
    }
}
