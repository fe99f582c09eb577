//! Bounding Volume Hierarchy (BVH) acceleration structure.
//!
//! Uses a binary tree structure for efficient ray-scene intersection testing.
//! Construction sorts each span on a randomly chosen axis and splits at the
//! midpoint; a single object becomes both children of its node.

use std::cmp::Ordering;
use std::sync::Arc;

use rand::RngCore;

use crate::hittable::{HitRecord, Hittable, HittableList};
use crate::sampling::random_int;
use glint_math::{Aabb, Interval, Ray};

/// BVH node with two children and the box enclosing both.
pub struct BvhNode {
    left: Arc<dyn Hittable>,
    right: Arc<dyn Hittable>,
    bbox: Aabb,
}

impl BvhNode {
    /// Build a BVH over the objects of a list.
    ///
    /// The split axis at each level is drawn from `rng`, so construction is
    /// reproducible for a seeded generator.
    pub fn new(list: HittableList, rng: &mut dyn RngCore) -> Self {
        let mut objects = list.objects;

        if objects.is_empty() {
            // Degenerate tree that no ray can hit
            return Self {
                left: Arc::new(HittableList::new()),
                right: Arc::new(HittableList::new()),
                bbox: Aabb::EMPTY,
            };
        }

        let len = objects.len();
        Self::build(&mut objects, 0, len, rng)
    }

    /// Recursive construction over `objects[start..end]`.
    fn build(
        objects: &mut [Arc<dyn Hittable>],
        start: usize,
        end: usize,
        rng: &mut dyn RngCore,
    ) -> Self {
        let axis = random_int(rng, 0, 2) as usize;
        let object_span = end - start;

        let (left, right): (Arc<dyn Hittable>, Arc<dyn Hittable>) = match object_span {
            // A lone object fills both slots so traversal needs no None checks
            1 => (objects[start].clone(), objects[start].clone()),
            2 => (objects[start].clone(), objects[start + 1].clone()),
            _ => {
                objects[start..end].sort_unstable_by(|a, b| box_compare(a, b, axis));

                let mid = start + object_span / 2;
                let left = Self::build(objects, start, mid, rng);
                let right = Self::build(objects, mid, end, rng);
                (Arc::new(left), Arc::new(right))
            }
        };

        let bbox = Aabb::surrounding(&left.bounding_box(), &right.bounding_box());

        Self { left, right, bbox }
    }
}

/// Order two objects by bounding box minimum on the given axis.
fn box_compare(a: &Arc<dyn Hittable>, b: &Arc<dyn Hittable>, axis: usize) -> Ordering {
    let a_min = a.bounding_box().axis_interval(axis).min;
    let b_min = b.bounding_box().axis_interval(axis).min;
    a_min.partial_cmp(&b_min).unwrap_or(Ordering::Equal)
}

impl Hittable for BvhNode {
    fn hit(&self, ray: &Ray, ray_t: Interval, rng: &mut dyn RngCore) -> Option<HitRecord> {
        if !self.bbox.hit(ray, ray_t) {
            return None;
        }

        let hit_left = self.left.hit(ray, ray_t, rng);

        // Only check right up to the closest hit so far
        let right_max = hit_left.as_ref().map_or(ray_t.max, |rec| rec.t);
        let hit_right = self
            .right
            .hit(ray, Interval::new(ray_t.min, right_max), rng);

        hit_right.or(hit_left)
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}
