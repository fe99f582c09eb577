//! Sampling helpers over an explicit RNG handle.
//!
//! Every stochastic routine in the renderer draws from a caller-supplied
//! `&mut dyn RngCore`, so a render is reproducible from its seed.

use glint_math::Vec3;
use rand::{Rng, RngCore};

/// Uniform f64 in [0, 1).
#[inline]
pub fn gen_f64(rng: &mut dyn RngCore) -> f64 {
    rng.gen()
}

/// Uniform f64 in [min, max).
#[inline]
pub fn random_f64_range(rng: &mut dyn RngCore, min: f64, max: f64) -> f64 {
    rng.gen_range(min..max)
}

/// Uniform integer in [min, max], inclusive on both ends.
#[inline]
pub fn random_int(rng: &mut dyn RngCore, min: i32, max: i32) -> i32 {
    rng.gen_range(min..=max)
}

/// Random point on the unit sphere, uniformly distributed.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    // Rejection sampling: draw from the cube, keep points inside the ball,
    // normalize. The lower bound rejects vectors too short to normalize.
    loop {
        let v = Vec3::new(
            random_f64_range(rng, -1.0, 1.0),
            random_f64_range(rng, -1.0, 1.0),
            random_f64_range(rng, -1.0, 1.0),
        );
        let len_sq = v.length_squared();
        if len_sq > 1e-160 && len_sq <= 1.0 {
            return v / len_sq.sqrt();
        }
    }
}

/// Random point in the unit disk on the XY plane.
pub fn random_in_unit_disk(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(
            random_f64_range(rng, -1.0, 1.0),
            random_f64_range(rng, -1.0, 1.0),
            0.0,
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Random color with each channel in [0, 1).
pub fn random_color(rng: &mut dyn RngCore) -> Vec3 {
    Vec3::new(gen_f64(rng), gen_f64(rng), gen_f64(rng))
}

/// Random color with each channel in [min, max).
pub fn random_color_range(rng: &mut dyn RngCore, min: f64, max: f64) -> Vec3 {
    Vec3::new(
        random_f64_range(rng, min, max),
        random_f64_range(rng, min, max),
        random_f64_range(rng, min, max),
    )
}
