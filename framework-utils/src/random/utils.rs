//! Random helpers built on top of [`Random`]: coin flips, directions,
//! rotations, shuffling and weighted choice.

use std::f32::consts::TAU;

use glam::{Quat, Vec2, Vec3};

use super::Random;
use crate::error::InvalidArgument;

/// Returns `true` with probability `probability` (clamped to `[0, 1]`).
pub fn chance<R: Random + ?Sized>(rng: &mut R, probability: f32) -> bool {
    rng.next_f32() < probability
}

/// Returns `1.0` or `-1.0` with equal probability.
pub fn sign<R: Random + ?Sized>(rng: &mut R) -> f32 {
    if rng.next_bool() { 1.0 } else { -1.0 }
}

/// A uniformly distributed point on the unit circle.
pub fn on_unit_circle<R: Random + ?Sized>(rng: &mut R) -> Vec2 {
    Vec2::from_angle(rng.next_f32() * TAU)
}

/// A uniformly distributed point inside the unit disc.
pub fn inside_unit_circle<R: Random + ?Sized>(rng: &mut R) -> Vec2 {
    // sqrt keeps the density uniform over the area instead of the radius.
    let radius = rng.next_f32().sqrt();
    on_unit_circle(rng) * radius
}

/// A uniformly distributed point on the unit sphere.
pub fn on_unit_sphere<R: Random + ?Sized>(rng: &mut R) -> Vec3 {
    let z = rng.next_f32() * 2.0 - 1.0;
    let (sin, cos) = (rng.next_f32() * TAU).sin_cos();
    let ring = (1.0 - z * z).max(0.0).sqrt();
    Vec3::new(ring * cos, ring * sin, z)
}

/// A uniformly distributed point inside the unit ball.
pub fn inside_unit_sphere<R: Random + ?Sized>(rng: &mut R) -> Vec3 {
    let radius = rng.next_f32().cbrt();
    on_unit_sphere(rng) * radius
}

/// A uniformly distributed rotation (Shoemake's method).
pub fn rotation<R: Random + ?Sized>(rng: &mut R) -> Quat {
    let u1 = rng.next_f32();
    let (sin2, cos2) = (rng.next_f32() * TAU).sin_cos();
    let (sin3, cos3) = (rng.next_f32() * TAU).sin_cos();
    let a = (1.0 - u1).sqrt();
    let b = u1.sqrt();
    Quat::from_xyzw(a * sin2, a * cos2, b * sin3, b * cos3).normalize()
}

/// Shuffles `items` in place (Fisher-Yates).
pub fn shuffle<R: Random + ?Sized, T>(rng: &mut R, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = rng.next_index(i + 1);
        items.swap(i, j);
    }
}

/// Picks a uniformly random element, or `None` for an empty slice.
pub fn choose<'a, R: Random + ?Sized, T>(rng: &mut R, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(rng.next_index(items.len()))
}

/// Picks an index with probability proportional to its weight.
///
/// # Errors
/// Returns [`InvalidArgument`] if `weights` is empty, contains a negative or
/// non-finite value, or sums to zero.
pub fn weighted_index<R: Random + ?Sized>(
    rng: &mut R,
    weights: &[f32],
) -> Result<usize, InvalidArgument> {
    if weights.is_empty() {
        return Err(InvalidArgument::EmptyWeights);
    }

    let mut total = 0.0f64;
    for (index, &weight) in weights.iter().enumerate() {
        if !weight.is_finite() || weight < 0.0 {
            return Err(InvalidArgument::InvalidWeight { index, weight });
        }
        total += f64::from(weight);
    }
    if total <= 0.0 {
        return Err(InvalidArgument::ZeroTotalWeight);
    }

    let target = rng.next_f64() * total;
    let mut cumulative = 0.0;
    let mut last_positive = 0;
    for (index, &weight) in weights.iter().enumerate() {
        if weight <= 0.0 {
            continue;
        }
        cumulative += f64::from(weight);
        if target < cumulative {
            return Ok(index);
        }
        last_positive = index;
    }
    // Rounding can leave `target` a hair above the final sum.
    Ok(last_positive)
}

/// Picks an element of `items` with probability proportional to `weights`.
///
/// # Errors
/// Returns [`InvalidArgument`] if the slices differ in length or the weights
/// are rejected by [`weighted_index`].
pub fn choose_weighted<'a, R: Random + ?Sized, T>(
    rng: &mut R,
    items: &'a [T],
    weights: &[f32],
) -> Result<&'a T, InvalidArgument> {
    if items.len() != weights.len() {
        return Err(InvalidArgument::WeightCountMismatch {
            items: items.len(),
            weights: weights.len(),
        });
    }
    let index = weighted_index(rng, weights)?;
    items.get(index).ok_or(InvalidArgument::EmptyWeights)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::Xoroshiro;

    #[test]
    fn chance_extremes() {
        let mut rng = Xoroshiro::from_seed(1);
        for _ in 0..1000 {
            assert!(!chance(&mut rng, 0.0));
            assert!(chance(&mut rng, 1.0));
        }
    }

    #[test]
    fn chance_frequency() {
        let mut rng = Xoroshiro::from_seed(2);
        let hits = (0..20_000).filter(|_| chance(&mut rng, 0.25)).count();
        assert!((4_500..5_500).contains(&hits), "hits {hits}");
    }

    #[test]
    fn sign_is_unit() {
        let mut rng = Xoroshiro::from_seed(3);
        let mut seen = (false, false);
        for _ in 0..100 {
            let s = sign(&mut rng);
            assert!((s.abs() - 1.0).abs() < f32::EPSILON);
            if s > 0.0 {
                seen.0 = true;
            } else {
                seen.1 = true;
            }
        }
        assert_eq!(seen, (true, true));
    }

    #[test]
    fn circle_and_sphere_lengths() {
        let mut rng = Xoroshiro::from_seed(4);
        for _ in 0..1000 {
            assert!((on_unit_circle(&mut rng).length() - 1.0).abs() < 1e-5);
            assert!(inside_unit_circle(&mut rng).length() <= 1.0 + 1e-5);
            assert!((on_unit_sphere(&mut rng).length() - 1.0).abs() < 1e-5);
            assert!(inside_unit_sphere(&mut rng).length() <= 1.0 + 1e-5);
        }
    }

    #[test]
    fn sphere_points_are_centered() {
        let mut rng = Xoroshiro::from_seed(5);
        let sum = (0..20_000).fold(Vec3::ZERO, |acc, _| acc + on_unit_sphere(&mut rng));
        assert!((sum / 20_000.0).length() < 0.03, "mean {sum}");
    }

    #[test]
    fn rotations_are_unit() {
        let mut rng = Xoroshiro::from_seed(6);
        for _ in 0..1000 {
            assert!(rotation(&mut rng).is_normalized());
        }
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = Xoroshiro::from_seed(7);
        let mut items: Vec<u32> = (0..50).collect();
        shuffle(&mut rng, &mut items);
        assert_ne!(items, (0..50).collect::<Vec<_>>());
        items.sort_unstable();
        assert_eq!(items, (0..50).collect::<Vec<_>>());

        let mut empty: [u32; 0] = [];
        shuffle(&mut rng, &mut empty);
    }

    #[test]
    fn choose_from_slice() {
        let mut rng = Xoroshiro::from_seed(8);
        let empty: [u8; 0] = [];
        assert_eq!(choose(&mut rng, &empty), None);
        let items = [10, 20, 30];
        for _ in 0..100 {
            assert!(items.contains(choose(&mut rng, &items).unwrap()));
        }
    }

    #[test]
    fn weighted_rejects_bad_input() {
        let mut rng = Xoroshiro::from_seed(9);
        assert_eq!(weighted_index(&mut rng, &[]), Err(InvalidArgument::EmptyWeights));
        assert_eq!(
            weighted_index(&mut rng, &[1.0, -1.0]),
            Err(InvalidArgument::InvalidWeight {
                index: 1,
                weight: -1.0
            })
        );
        assert!(matches!(
            weighted_index(&mut rng, &[f32::NAN]),
            Err(InvalidArgument::InvalidWeight { index: 0, .. })
        ));
        assert_eq!(
            weighted_index(&mut rng, &[0.0, 0.0]),
            Err(InvalidArgument::ZeroTotalWeight)
        );
        assert_eq!(
            choose_weighted(&mut rng, &["a", "b"], &[1.0]),
            Err(InvalidArgument::WeightCountMismatch {
                items: 2,
                weights: 1
            })
        );
    }

    #[test]
    fn weighted_skips_zero_weights() {
        let mut rng = Xoroshiro::from_seed(10);
        for _ in 0..1000 {
            assert_eq!(weighted_index(&mut rng, &[0.0, 3.0, 0.0]), Ok(1));
        }
    }

    #[test]
    fn weighted_follows_proportions() {
        let mut rng = Xoroshiro::from_seed(11);
        let items = ['a', 'b'];
        let picks_b = (0..20_000)
            .filter(|_| *choose_weighted(&mut rng, &items, &[1.0, 3.0]).unwrap() == 'b')
            .count();
        assert!((14_500..15_500).contains(&picks_b), "picks {picks_b}");
    }
}
