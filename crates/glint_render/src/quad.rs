//! Planar primitives: quads, triangles, ellipses and annuli.
//!
//! Each primitive lives on a plane spanned by two edge vectors and differs
//! only in which (alpha, beta) planar coordinates count as interior. A box
//! builder assembles six quads into a cuboid.

use std::sync::Arc;

use rand::RngCore;

use crate::hittable::{HitRecord, Hittable, HittableList};
use crate::material::Material;
use glint_math::{Aabb, Interval, Point3, Ray, Vec3};

/// The plane spanned by two edge vectors from an anchor point.
///
/// Caches the normal, the plane offset `d` and the basis helper `w` used
/// to decompose hit points into planar (alpha, beta) coordinates.
struct Plane {
    q: Point3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    normal: Vec3,
    d: f64,
}

impl Plane {
    fn new(q: Point3, u: Vec3, v: Vec3) -> Self {
        let n = u.cross(v);
        let normal = n.normalize();

        Self {
            q,
            u,
            v,
            w: n / n.dot(n),
            normal,
            d: normal.dot(q),
        }
    }

    /// Intersect a ray with the infinite plane.
    ///
    /// Returns (t, alpha, beta) where alpha and beta are the hit point's
    /// coordinates in the (u, v) edge basis.
    fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<(f64, f64, f64)> {
        let denom = self.normal.dot(ray.direction);

        // No hit if the ray is parallel to the plane
        if denom.abs() < 1e-8 {
            return None;
        }

        let t = (self.d - self.normal.dot(ray.origin)) / denom;
        if !ray_t.contains(t) {
            return None;
        }

        let planar_hitpt = ray.at(t) - self.q;
        let alpha = self.w.dot(planar_hitpt.cross(self.v));
        let beta = self.w.dot(self.u.cross(planar_hitpt));

        Some((t, alpha, beta))
    }

    /// Build the hit record for an accepted intersection.
    fn record(&self, ray: &Ray, t: f64, u: f64, v: f64, mat: &Arc<dyn Material>) -> HitRecord {
        let mut rec = HitRecord {
            p: ray.at(t),
            normal: Vec3::ZERO,
            mat: mat.clone(),
            t,
            u,
            v,
            front_face: false,
        };
        rec.set_face_normal(ray, self.normal);
        rec
    }

    /// Bounding box of the parallelogram spanned by the edges.
    fn parallelogram_bbox(&self) -> Aabb {
        let diagonal1 = Aabb::from_points(self.q, self.q + self.u + self.v);
        let diagonal2 = Aabb::from_points(self.q + self.u, self.q + self.v);
        Aabb::surrounding(&diagonal1, &diagonal2)
    }

    /// Bounding box of the full extent around a center anchor.
    fn centered_bbox(&self) -> Aabb {
        Aabb::from_points(self.q - self.u - self.v, self.q + self.u + self.v)
    }
}

/// A parallelogram defined by an anchor corner and two edge vectors.
pub struct Quad {
    plane: Plane,
    mat: Arc<dyn Material>,
    bbox: Aabb,
}

impl Quad {
    pub fn new(q: Point3, u: Vec3, v: Vec3, mat: Arc<dyn Material>) -> Self {
        let plane = Plane::new(q, u, v);
        let bbox = plane.parallelogram_bbox();
        Self { plane, mat, bbox }
    }
}

impl Hittable for Quad {
    fn hit(&self, ray: &Ray, ray_t: Interval, _rng: &mut dyn RngCore) -> Option<HitRecord> {
        let (t, alpha, beta) = self.plane.intersect(ray, ray_t)?;

        let unit = Interval::new(0.0, 1.0);
        if !unit.contains(alpha) || !unit.contains(beta) {
            return None;
        }

        Some(self.plane.record(ray, t, alpha, beta, &self.mat))
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

/// A triangle with one corner at the anchor and two edge vectors.
pub struct Triangle {
    plane: Plane,
    mat: Arc<dyn Material>,
    bbox: Aabb,
}

impl Triangle {
    pub fn new(q: Point3, u: Vec3, v: Vec3, mat: Arc<dyn Material>) -> Self {
        let plane = Plane::new(q, u, v);
        let bbox = plane.parallelogram_bbox();
        Self { plane, mat, bbox }
    }
}

impl Hittable for Triangle {
    fn hit(&self, ray: &Ray, ray_t: Interval, _rng: &mut dyn RngCore) -> Option<HitRecord> {
        let (t, alpha, beta) = self.plane.intersect(ray, ray_t)?;

        if alpha < 0.0 || beta < 0.0 || alpha + beta > 1.0 {
            return None;
        }

        Some(self.plane.record(ray, t, alpha, beta, &self.mat))
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

/// An ellipse centered on the anchor, with the edge vectors as semi-axes.
pub struct Ellipse {
    plane: Plane,
    mat: Arc<dyn Material>,
    bbox: Aabb,
}

impl Ellipse {
    pub fn new(center: Point3, side_a: Vec3, side_b: Vec3, mat: Arc<dyn Material>) -> Self {
        let plane = Plane::new(center, side_a, side_b);
        let bbox = plane.centered_bbox();
        Self { plane, mat, bbox }
    }
}

impl Hittable for Ellipse {
    fn hit(&self, ray: &Ray, ray_t: Interval, _rng: &mut dyn RngCore) -> Option<HitRecord> {
        let (t, alpha, beta) = self.plane.intersect(ray, ray_t)?;

        if alpha * alpha + beta * beta > 1.0 {
            return None;
        }

        // Remap (-1, 1) planar coordinates to (0, 1) UVs
        let u = alpha / 2.0 + 0.5;
        let v = beta / 2.0 + 0.5;
        Some(self.plane.record(ray, t, u, v, &self.mat))
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

/// A flat ring centered on the anchor.
///
/// `inner` is the inner radius as a fraction of the outer edge length,
/// so 0.5 leaves a hole half the width of the ring's extent.
pub struct Annulus {
    plane: Plane,
    inner: f64,
    mat: Arc<dyn Material>,
    bbox: Aabb,
}

impl Annulus {
    pub fn new(
        center: Point3,
        side_a: Vec3,
        side_b: Vec3,
        inner: f64,
        mat: Arc<dyn Material>,
    ) -> Self {
        let plane = Plane::new(center, side_a, side_b);
        let bbox = plane.centered_bbox();
        Self {
            plane,
            inner,
            mat,
            bbox,
        }
    }
}

impl Hittable for Annulus {
    fn hit(&self, ray: &Ray, ray_t: Interval, _rng: &mut dyn RngCore) -> Option<HitRecord> {
        let (t, alpha, beta) = self.plane.intersect(ray, ray_t)?;

        let center_dist = (alpha * alpha + beta * beta).sqrt();
        if center_dist < self.inner || center_dist > 1.0 {
            return None;
        }

        let u = alpha / 2.0 + 0.5;
        let v = beta / 2.0 + 0.5;
        Some(self.plane.record(ray, t, u, v, &self.mat))
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

/// Build an axis-aligned box from two opposite corners as six quads.
pub fn cuboid(a: Point3, b: Point3, mat: Arc<dyn Material>) -> HittableList {
    let mut sides = HittableList::new();

    let min = Point3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z));
    let max = Point3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z));

    let dx = Vec3::new(max.x - min.x, 0.0, 0.0);
    let dy = Vec3::new(0.0, max.y - min.y, 0.0);
    let dz = Vec3::new(0.0, 0.0, max.z - min.z);

    let face = |q, u, v| Arc::new(Quad::new(q, u, v, mat.clone())) as Arc<dyn Hittable>;

    sides.add(face(Point3::new(min.x, min.y, max.z), dx, dy)); // front
    sides.add(face(Point3::new(max.x, min.y, max.z), -dz, dy)); // right
    sides.add(face(Point3::new(max.x, min.y, min.z), -dx, dy)); // back
    sides.add(face(Point3::new(min.x, min.y, min.z), dz, dy)); // left
    sides.add(face(Point3::new(min.x, max.y, max.z), dx, -dz)); // top
    sides.add(face(Point3::new(min.x, min.y, min.z), dx, dz)); // bottom

    sides
}
