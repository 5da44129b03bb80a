//! Improved Perlin noise over the constant permutation table.
//!
//! Coordinates are first normalized with `(c - 0.5) * 2`, so one lattice cell
//! spans half a unit of input. The 1D variant is scaled by 2 to use the full
//! `[-1, 1]` range.

use std::ops::Mul;

use glam::{Vec2, Vec3};

use super::PERMUTATION;

/// Stateless Perlin gradient noise generator.
///
/// Identical inputs always give bit-identical outputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GradientNoise;

impl GradientNoise {
    /// Creates the generator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// 1D noise in `[-1, 1]`.
    #[must_use]
    pub fn noise_1d(&self, x: f32) -> f32 {
        let x = normalize(x);
        let (xi, x) = lattice(x);
        let u = fade(x);
        lerp(u, grad_1d(perm(xi), x), grad_1d(perm(xi + 1), x - 1.0)) * 2.0
    }

    /// 2D noise, roughly in `[-1, 1]`.
    #[must_use]
    pub fn noise_2d(&self, point: Vec2) -> f32 {
        let (xi, x) = lattice(normalize(point.x));
        let (yi, y) = lattice(normalize(point.y));
        let u = fade(x);
        let v = fade(y);

        let a = (perm(xi) as usize + yi) & 0xFF;
        let b = (perm(xi + 1) as usize + yi) & 0xFF;

        lerp(
            v,
            lerp(u, grad_2d(perm(a), x, y), grad_2d(perm(b), x - 1.0, y)),
            lerp(
                u,
                grad_2d(perm(a + 1), x, y - 1.0),
                grad_2d(perm(b + 1), x - 1.0, y - 1.0),
            ),
        )
    }

    /// 3D noise, roughly in `[-1, 1]`.
    #[must_use]
    pub fn noise_3d(&self, point: Vec3) -> f32 {
        let (xi, x) = lattice(normalize(point.x));
        let (yi, y) = lattice(normalize(point.y));
        let (zi, z) = lattice(normalize(point.z));
        let u = fade(x);
        let v = fade(y);
        let w = fade(z);

        let a = (perm(xi) as usize + yi) & 0xFF;
        let b = (perm(xi + 1) as usize + yi) & 0xFF;
        let aa = (perm(a) as usize + zi) & 0xFF;
        let ba = (perm(b) as usize + zi) & 0xFF;
        let ab = (perm(a + 1) as usize + zi) & 0xFF;
        let bb = (perm(b + 1) as usize + zi) & 0xFF;

        lerp(
            w,
            lerp(
                v,
                lerp(u, grad_3d(perm(aa), x, y, z), grad_3d(perm(ba), x - 1.0, y, z)),
                lerp(
                    u,
                    grad_3d(perm(ab), x, y - 1.0, z),
                    grad_3d(perm(bb), x - 1.0, y - 1.0, z),
                ),
            ),
            lerp(
                v,
                lerp(
                    u,
                    grad_3d(perm(aa + 1), x, y, z - 1.0),
                    grad_3d(perm(ba + 1), x - 1.0, y, z - 1.0),
                ),
                lerp(
                    u,
                    grad_3d(perm(ab + 1), x, y - 1.0, z - 1.0),
                    grad_3d(perm(bb + 1), x - 1.0, y - 1.0, z - 1.0),
                ),
            ),
        )
    }

    /// [`noise_1d`](Self::noise_1d) remapped with `(f + 1) / 2`.
    ///
    /// The result is not clamped. Raw noise can overshoot `[-1, 1]` slightly,
    /// so values may leave `[0, 1]` by a small margin.
    #[must_use]
    pub fn normalized_1d(&self, x: f32) -> f32 {
        to_unit(self.noise_1d(x))
    }

    /// [`noise_2d`](Self::noise_2d) remapped with `(f + 1) / 2`. See
    /// [`normalized_1d`](Self::normalized_1d).
    #[must_use]
    pub fn normalized_2d(&self, point: Vec2) -> f32 {
        to_unit(self.noise_2d(point))
    }

    /// [`noise_3d`](Self::noise_3d) remapped with `(f + 1) / 2`. See
    /// [`normalized_1d`](Self::normalized_1d).
    #[must_use]
    pub fn normalized_3d(&self, point: Vec3) -> f32 {
        to_unit(self.noise_3d(point))
    }

    /// Fractal Brownian motion: each octave doubles frequency and halves amplitude.
    ///
    /// Returns `sum(noise(x * 2^i) * 0.5^(i + 1))` for `i` in `0..octaves`.
    #[must_use]
    pub fn fbm_1d(&self, x: f32, octaves: u32) -> f32 {
        fbm(x, octaves, |x| self.noise_1d(x))
    }

    /// 2D fractal Brownian motion. See [`fbm_1d`](Self::fbm_1d).
    #[must_use]
    pub fn fbm_2d(&self, point: Vec2, octaves: u32) -> f32 {
        fbm(point, octaves, |p| self.noise_2d(p))
    }

    /// 3D fractal Brownian motion. See [`fbm_1d`](Self::fbm_1d).
    #[must_use]
    pub fn fbm_3d(&self, point: Vec3, octaves: u32) -> f32 {
        fbm(point, octaves, |p| self.noise_3d(p))
    }
}

fn fbm<T>(mut coord: T, octaves: u32, sample: impl Fn(T) -> f32) -> f32
where
    T: Copy + Mul<f32, Output = T>,
{
    let mut sum = 0.0;
    let mut weight = 0.5;
    for _ in 0..octaves {
        sum += weight * sample(coord);
        coord = coord * 2.0;
        weight *= 0.5;
    }
    sum
}

#[inline]
fn normalize(c: f32) -> f32 {
    (c - 0.5) * 2.0
}

/// Splits a coordinate into its wrapped lattice cell and fractional offset.
#[inline]
fn lattice(c: f32) -> (usize, f32) {
    let floored = c.floor();
    ((floored as i32 & 0xFF) as usize, c - floored)
}

#[inline]
fn perm(index: usize) -> u8 {
    PERMUTATION[index]
}

#[inline]
fn to_unit(value: f32) -> f32 {
    (value + 1.0) * 0.5
}

/// Quintic fade curve `6t^5 - 15t^4 + 10t^3`.
#[inline]
fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(t: f32, a: f32, b: f32) -> f32 {
    a + t * (b - a)
}

#[inline]
fn grad_1d(hash: u8, x: f32) -> f32 {
    if hash & 1 == 0 { x } else { -x }
}

#[inline]
fn grad_2d(hash: u8, x: f32, y: f32) -> f32 {
    (if hash & 1 == 0 { x } else { -x }) + (if hash & 2 == 0 { y } else { -y })
}

/// Picks one of Perlin's 12 cube-edge gradients from the low four hash bits.
#[inline]
fn grad_3d(hash: u8, x: f32, y: f32, z: f32) -> f32 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        z
    };
    (if h & 1 == 0 { u } else { -u }) + (if h & 2 == 0 { v } else { -v })
}
