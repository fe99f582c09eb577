// Double precision math types for the renderer.
pub use glam::DVec3;

/// 3D vector, f64 components.
pub type Vec3 = DVec3;

/// Alias for positions, to keep signatures readable.
pub type Point3 = DVec3;

mod ray;
pub use ray::Ray;

mod interval;
pub use interval::Interval;

mod aabb;
pub use aabb::Aabb;
