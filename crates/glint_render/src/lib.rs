//! glint renderer - CPU path tracing
//!
//! A Monte Carlo path tracer for physically-based rendering: polymorphic
//! geometry behind a BVH, scatter/emit materials, procedural and image
//! textures, and a bucket-parallel render loop with deterministic seeding.

mod bucket;
mod bvh;
mod camera;
mod hittable;
mod material;
mod medium;
mod perlin;
mod quad;
mod renderer;
mod sampling;
mod sphere;
mod texture;
mod transform;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use bvh::BvhNode;
pub use camera::{Background, Camera};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{Color, Dielectric, DiffuseLight, Isotropic, Lambertian, Material, Metal};
pub use medium::ConstantMedium;
pub use perlin::Perlin;
pub use quad::{cuboid, Annulus, Ellipse, Quad, Triangle};
pub use renderer::{color_to_rgb, ray_color, render, render_pixel, ImageBuffer};
pub use sampling::{
    gen_f64, random_color, random_color_range, random_f64_range, random_in_unit_disk, random_int,
    random_unit_vector,
};
pub use sphere::Sphere;
pub use texture::{CheckerTexture, ImageTexture, NoiseTexture, SolidColor, Texture, TextureError};
pub use transform::{RotateY, Translate};

/// Re-export common math types from glint_math
pub use glint_math::{Aabb, Interval, Point3, Ray, Vec3};
