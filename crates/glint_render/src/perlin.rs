//! Perlin gradient noise.
//!
//! Classic lattice noise: random unit gradients on an integer grid,
//! hashed by permutation tables, interpolated with a Hermite cubic.
//! `turb` stacks octaves for a turbulence value used by marble textures.

use rand::RngCore;

use crate::sampling::{random_int, random_unit_vector};
use glint_math::{Point3, Vec3};

const POINT_COUNT: usize = 256;

/// Perlin noise generator with gradient and permutation tables.
pub struct Perlin {
    randvec: Vec<Vec3>,
    perm_x: Vec<usize>,
    perm_y: Vec<usize>,
    perm_z: Vec<usize>,
}

impl Perlin {
    /// Build the gradient and permutation tables from `rng`.
    pub fn new(rng: &mut dyn RngCore) -> Self {
        let randvec = (0..POINT_COUNT).map(|_| random_unit_vector(rng)).collect();

        Self {
            randvec,
            perm_x: generate_perm(rng),
            perm_y: generate_perm(rng),
            perm_z: generate_perm(rng),
        }
    }

    /// Sample the noise field at a point. Output is in roughly [-1, 1]
    /// and is exactly zero on lattice points.
    pub fn noise(&self, p: Point3) -> f64 {
        let u = p.x - p.x.floor();
        let v = p.y - p.y.floor();
        let w = p.z - p.z.floor();

        let i = p.x.floor() as i64;
        let j = p.y.floor() as i64;
        let k = p.z.floor() as i64;

        // Gather the gradients of the surrounding lattice cell
        let mut c = [[[Vec3::ZERO; 2]; 2]; 2];
        for (di, plane) in c.iter_mut().enumerate() {
            for (dj, row) in plane.iter_mut().enumerate() {
                for (dk, corner) in row.iter_mut().enumerate() {
                    let idx = self.perm_x[((i + di as i64) & 255) as usize]
                        ^ self.perm_y[((j + dj as i64) & 255) as usize]
                        ^ self.perm_z[((k + dk as i64) & 255) as usize];
                    *corner = self.randvec[idx];
                }
            }
        }

        perlin_interp(&c, u, v, w)
    }

    /// Sum `depth` octaves of noise with halving amplitude and doubling
    /// frequency, returning the absolute value.
    pub fn turb(&self, p: Point3, depth: usize) -> f64 {
        let mut accum = 0.0;
        let mut temp_p = p;
        let mut weight = 1.0;

        for _ in 0..depth {
            accum += weight * self.noise(temp_p);
            weight *= 0.5;
            temp_p *= 2.0;
        }

        accum.abs()
    }
}

/// Build a shuffled permutation of 0..POINT_COUNT.
fn generate_perm(rng: &mut dyn RngCore) -> Vec<usize> {
    let mut perm: Vec<usize> = (0..POINT_COUNT).collect();

    for i in (1..POINT_COUNT).rev() {
        let target = random_int(rng, 0, i as i32) as usize;
        perm.swap(i, target);
    }

    perm
}

/// Trilinear interpolation of gradient dot products with Hermite smoothing.
fn perlin_interp(c: &[[[Vec3; 2]; 2]; 2], u: f64, v: f64, w: f64) -> f64 {
    let uu = u * u * (3.0 - 2.0 * u);
    let vv = v * v * (3.0 - 2.0 * v);
    let ww = w * w * (3.0 - 2.0 * w);

    let mut accum = 0.0;
    for (i, plane) in c.iter().enumerate() {
        for (j, row) in plane.iter().enumerate() {
            for (k, corner) in row.iter().enumerate() {
                let (fi, fj, fk) = (i as f64, j as f64, k as f64);
                let weight = Vec3::new(u - fi, v - fj, w - fk);

                accum += (fi * uu + (1.0 - fi) * (1.0 - uu))
                    * (fj * vv + (1.0 - fj) * (1.0 - vv))
                    * (fk * ww + (1.0 - fk) * (1.0 - ww))
                    * corner.dot(weight);
            }
        }
    }

    accum
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_noise_is_reproducible() {
        let mut rng_a = StdRng::seed_from_u64(42);
        let mut rng_b = StdRng::seed_from_u64(42);
        let perlin_a = Perlin::new(&mut rng_a);
        let perlin_b = Perlin::new(&mut rng_b);

        let p = Point3::new(1.3, -0.7, 4.1);
        assert_eq!(perlin_a.noise(p), perlin_b.noise(p));
        assert_eq!(perlin_a.turb(p, 7), perlin_b.turb(p, 7));
    }

    #[test]
    fn test_noise_vanishes_on_lattice_points() {
        let mut rng = StdRng::seed_from_u64(42);
        let perlin = Perlin::new(&mut rng);

        // Gradient noise dots the gradient with a zero offset at corners
        assert_eq!(perlin.noise(Point3::new(0.0, 0.0, 0.0)), 0.0);
        assert_eq!(perlin.noise(Point3::new(3.0, -2.0, 7.0)), 0.0);
    }

    #[test]
    fn test_noise_stays_bounded() {
        let mut rng = StdRng::seed_from_u64(42);
        let perlin = Perlin::new(&mut rng);

        for i in 0..200 {
            let p = Point3::new(i as f64 * 0.173, i as f64 * -0.059, i as f64 * 0.311);
            let n = perlin.noise(p);
            assert!(n.abs() < 2.0, "noise out of range: {n}");
        }
    }

    #[test]
    fn test_turb_is_non_negative() {
        let mut rng = StdRng::seed_from_u64(42);
        let perlin = Perlin::new(&mut rng);

        for i in 0..50 {
            let p = Point3::new(i as f64 * 0.41, 0.5, i as f64 * -0.23);
            assert!(perlin.turb(p, 7) >= 0.0);
        }
    }

    #[test]
    fn test_perm_tables_are_permutations() {
        let mut rng = StdRng::seed_from_u64(42);
        let perlin = Perlin::new(&mut rng);

        for table in [&perlin.perm_x, &perlin.perm_y, &perlin.perm_z] {
            let mut sorted = table.clone();
            sorted.sort_unstable();
            let expected: Vec<usize> = (0..POINT_COUNT).collect();
            assert_eq!(sorted, expected);
        }
    }
}
