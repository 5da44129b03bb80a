//! Scalar math helpers.
//!
//! Wrapping and rounding are exposed as traits implemented for the primitive
//! numeric types, because the integer and floating point variants differ in
//! semantics (inclusive vs. half-open upper bound). Interpolation helpers are
//! generic over [`num_traits::Float`].

pub mod spring;

use num_traits::Float;

pub use spring::DampedSpring;

/// Lowest value returned by [`linear_to_decibel`].
pub const MIN_DECIBEL: f32 = -80.0;

/// Wrap a value into a bounded interval.
///
/// Floating point types wrap into `[lower, upper)`. Integer types wrap into
/// `[lower, upper]` (both ends inclusive, interval `upper - lower + 1`).
/// Negative inputs wrap around rather than truncate toward zero.
pub trait Wrap: Sized {
    /// Wrap `self` into the interval described by `lower` and `upper`.
    #[must_use]
    fn wrap(self, lower: Self, upper: Self) -> Self;
}

/// Round a value to the nearest multiple of an interval.
pub trait RoundToNearest: Sized {
    /// Returns `round(self / interval) * interval`.
    ///
    /// A zero interval leaves the value untouched.
    #[must_use]
    fn round_to_nearest(self, interval: Self) -> Self;
}

macro_rules! impl_float_ops {
    ($($t:ty),*) => {$(
        impl Wrap for $t {
            #[inline]
            fn wrap(self, lower: Self, upper: Self) -> Self {
                if self >= lower && self < upper {
                    return self;
                }
                let range = upper - lower;
                if range <= 0.0 {
                    return lower;
                }
                let wrapped = self - range * ((self - lower) / range).floor();
                // Rounding can land exactly on the excluded upper bound.
                if wrapped >= upper || wrapped < lower {
                    lower
                } else {
                    wrapped
                }
            }
        }

        impl RoundToNearest for $t {
            #[inline]
            fn round_to_nearest(self, interval: Self) -> Self {
                if interval == 0.0 {
                    return self;
                }
                (self / interval).round() * interval
            }
        }
    )*};
}

macro_rules! impl_int_ops {
    ($($t:ty => $wide:ty),*) => {$(
        impl Wrap for $t {
            #[inline]
            #[allow(clippy::cast_possible_truncation)]
            fn wrap(self, lower: Self, upper: Self) -> Self {
                let low = <$wide>::from(lower);
                let range = <$wide>::from(upper) - low + 1;
                if range <= 0 {
                    return lower;
                }
                // Lands in `[lower, upper]`, so the narrowing cast is exact.
                (low + (<$wide>::from(self) - low).rem_euclid(range)) as $t
            }
        }

        impl RoundToNearest for $t {
            #[inline]
            #[allow(clippy::cast_possible_truncation)]
            fn round_to_nearest(self, interval: Self) -> Self {
                let value = <$wide>::from(self);
                let step = <$wide>::from(interval).abs();
                if step == 0 {
                    return self;
                }
                let rem = value.rem_euclid(step);
                let down = value - rem;
                // Ties round away from zero, like `f32::round`.
                let nearest = if rem * 2 > step || (rem * 2 == step && value >= 0) {
                    down + step
                } else {
                    down
                };
                nearest.clamp(<$wide>::from(<$t>::MIN), <$wide>::from(<$t>::MAX)) as $t
            }
        }
    )*};
}

impl_float_ops!(f32, f64);
impl_int_ops!(i32 => i64, i64 => i128);

/// Floors a double to an `i32`.
#[inline]
#[must_use]
pub fn floor(value: f64) -> i32 {
    let truncated = value as i32;
    if value < f64::from(truncated) {
        truncated - 1
    } else {
        truncated
    }
}

/// Compares two floats with a tolerance scaled to their magnitude.
#[inline]
#[must_use]
pub fn approximately(a: f32, b: f32) -> bool {
    (b - a).abs() < (1e-6 * a.abs().max(b.abs())).max(f32::EPSILON * 8.0)
}

/// Linear interpolation with `t` clamped to `[0, 1]`.
#[inline]
#[must_use]
pub fn lerp<T: Float>(a: T, b: T, t: T) -> T {
    lerp_unclamped(a, b, t.max(T::zero()).min(T::one()))
}

/// Linear interpolation that extrapolates for `t` outside `[0, 1]`.
#[inline]
#[must_use]
pub fn lerp_unclamped<T: Float>(a: T, b: T, t: T) -> T {
    a + (b - a) * t
}

/// Where `value` lies between `a` and `b`, clamped to `[0, 1]`.
///
/// Returns zero when `a == b`.
#[inline]
#[must_use]
pub fn inverse_lerp<T: Float>(a: T, b: T, value: T) -> T {
    if a == b {
        return T::zero();
    }
    ((value - a) / (b - a)).max(T::zero()).min(T::one())
}

/// Interpolates with `t` raised to `exponent` first.
///
/// Exponents above one ease in, below one ease out.
#[inline]
#[must_use]
pub fn lerp_exponent<T: Float>(a: T, b: T, t: T, exponent: T) -> T {
    let t = t.max(T::zero()).min(T::one());
    lerp_unclamped(a, b, t.powf(exponent))
}

/// Interpolates from `a` to `b` passing through `mid` at `t = 0.5`.
#[must_use]
pub fn lerp_midpoint<T: Float>(a: T, mid: T, b: T, t: T) -> T {
    let two = T::one() + T::one();
    let t = t.max(T::zero()).min(T::one());
    if t < T::one() / two {
        lerp_unclamped(a, mid, t * two)
    } else {
        lerp_unclamped(mid, b, t * two - T::one())
    }
}

/// Remaps `value` from `[in_min, in_max]` onto `[out_min, out_max]`.
///
/// Extrapolates outside the input range. A zero-width input range maps to
/// `out_min`.
#[must_use]
pub fn map<T: Float>(value: T, in_min: T, in_max: T, out_min: T, out_max: T) -> T {
    if in_max == in_min {
        return out_min;
    }
    out_min + (value - in_min) * (out_max - out_min) / (in_max - in_min)
}

/// Like [`map`], but the result never leaves the output range.
#[must_use]
pub fn map_clamped<T: Float>(value: T, in_min: T, in_max: T, out_min: T, out_max: T) -> T {
    let mapped = map(value, in_min, in_max, out_min, out_max);
    let (lo, hi) = if out_min <= out_max {
        (out_min, out_max)
    } else {
        (out_max, out_min)
    };
    mapped.max(lo).min(hi)
}

/// Wraps an angle in degrees into `[-180, 180)`.
#[inline]
#[must_use]
pub fn wrap_angle(degrees: f32) -> f32 {
    degrees.wrap(-180.0, 180.0)
}

/// Shortest signed difference from `current` to `target`, in degrees.
#[inline]
#[must_use]
pub fn delta_angle(current: f32, target: f32) -> f32 {
    wrap_angle(target - current)
}

/// Hyperbolic secant.
#[inline]
#[must_use]
pub fn sech<T: Float>(x: T) -> T {
    x.cosh().recip()
}

/// Hyperbolic cosecant. Infinite at zero.
#[inline]
#[must_use]
pub fn csch<T: Float>(x: T) -> T {
    x.sinh().recip()
}

/// Hyperbolic cotangent. Infinite at zero.
#[inline]
#[must_use]
pub fn coth<T: Float>(x: T) -> T {
    x.cosh() / x.sinh()
}

/// Inverse hyperbolic cotangent, defined for `|x| > 1`.
#[inline]
#[must_use]
pub fn acoth<T: Float>(x: T) -> T {
    let half = (T::one() + T::one()).recip();
    half * ((x + T::one()) / (x - T::one())).ln()
}

/// Converts a linear amplitude to decibels, floored at [`MIN_DECIBEL`].
#[inline]
#[must_use]
pub fn linear_to_decibel(linear: f32) -> f32 {
    if linear <= 0.0 {
        return MIN_DECIBEL;
    }
    (20.0 * linear.log10()).max(MIN_DECIBEL)
}

/// Converts decibels to a linear amplitude.
#[inline]
#[must_use]
pub fn decibel_to_linear(decibel: f32) -> f32 {
    10.0_f32.powf(decibel / 20.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::float_cmp)]
    fn wrap_float() {
        assert_eq!(3.5_f32.wrap(0.0, 1.0), 0.5);
        assert_eq!((-0.25_f32).wrap(0.0, 1.0), 0.75);
        assert_eq!(0.25_f32.wrap(0.0, 1.0), 0.25);
        assert_eq!(1.0_f32.wrap(0.0, 1.0), 0.0);
        assert_eq!(370.0_f64.wrap(0.0, 360.0), 10.0);
    }

    #[test]
    fn wrap_int_inclusive_upper() {
        assert_eq!(370_i32.wrap(0, 360), 9);
        assert_eq!(360_i32.wrap(0, 360), 360);
        assert_eq!((-1_i32).wrap(0, 9), 9);
        assert_eq!((-11_i64).wrap(0, 9), 9);
        assert_eq!(5_i32.wrap(3, 5), 5);
        assert_eq!(6_i32.wrap(3, 5), 3);
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn wrap_idempotent() {
        for i in -500..500 {
            let x = i as f32 * 0.731;
            let once = x.wrap(-3.0, 7.5);
            assert!((-3.0..7.5).contains(&once), "{x} wrapped to {once}");
            assert_eq!(once.wrap(-3.0, 7.5), once);
        }
        for x in -200_i32..200 {
            let once = x.wrap(-7, 13);
            assert_eq!(once.wrap(-7, 13), once);
        }
    }

    #[test]
    fn wrap_tiny_negative_stays_in_range() {
        let wrapped = (-1e-9_f32).wrap(0.0, 1.0);
        assert!((0.0..1.0).contains(&wrapped));
    }

    #[test]
    fn round_to_nearest_int() {
        assert_eq!(7_i32.round_to_nearest(5), 5);
        assert_eq!(13_i32.round_to_nearest(5), 15);
        assert_eq!((-7_i32).round_to_nearest(5), -5);
        assert_eq!((-8_i64).round_to_nearest(5), -10);
        assert_eq!(10_i32.round_to_nearest(4), 12);
        assert_eq!(9_i32.round_to_nearest(0), 9);
    }

    #[test]
    fn wrap_int_extremes() {
        // 2^31 mod 11 == 2
        assert_eq!(i32::MAX.wrap(-1, 9), 1);
        assert_eq!(i32::MIN.wrap(0, 9), 2);
        assert_eq!(i32::MIN.wrap(i32::MIN, i32::MAX), i32::MIN);
        assert_eq!(i32::MAX.wrap(i32::MIN, i32::MAX), i32::MAX);
        assert_eq!(17_i32.wrap(i32::MIN, i32::MAX), 17);
        // 2^63 mod 11 == 8
        assert_eq!(i64::MAX.wrap(-1, 9), 7);
        assert_eq!(i64::MIN.wrap(i64::MIN, i64::MAX), i64::MIN);
        assert_eq!((-5_i64).wrap(i64::MIN, i64::MAX), -5);
    }

    #[test]
    fn round_int_extremes_saturate() {
        assert_eq!(i32::MIN.round_to_nearest(5), i32::MIN);
        assert_eq!(i32::MAX.round_to_nearest(5), 2_147_483_645);
        assert_eq!(i32::MAX.round_to_nearest(10), i32::MAX);
        assert_eq!(i32::MAX.round_to_nearest(i32::MIN), i32::MAX);
        assert_eq!(i32::MIN.round_to_nearest(i32::MIN), i32::MIN);
        assert_eq!(100_i32.round_to_nearest(i32::MIN), 0);
        assert_eq!(i64::MIN.round_to_nearest(5), i64::MIN);
        assert_eq!(i64::MAX.round_to_nearest(2), i64::MAX);
        assert_eq!(i64::MIN.round_to_nearest(i64::MIN), i64::MIN);
    }

    #[test]
    fn round_to_nearest_float() {
        assert!((7.0_f32.round_to_nearest(5.0) - 5.0).abs() < 1e-6);
        assert!((0.26_f64.round_to_nearest(0.25) - 0.25).abs() < 1e-12);
        assert!((1.3_f32.round_to_nearest(0.5) - 1.5).abs() < 1e-6);
    }

    #[test]
    fn floor_negative() {
        assert_eq!(floor(-0.5), -1);
        assert_eq!(floor(-1.0), -1);
        assert_eq!(floor(2.9), 2);
    }

    #[test]
    fn interpolation() {
        assert!((lerp(0.0_f32, 10.0, 2.0) - 10.0).abs() < 1e-6);
        assert!((lerp_unclamped(0.0_f32, 10.0, 2.0) - 20.0).abs() < 1e-6);
        assert!((inverse_lerp(2.0_f32, 4.0, 3.0) - 0.5).abs() < 1e-6);
        assert!((lerp_exponent(0.0_f32, 1.0, 0.5, 2.0) - 0.25).abs() < 1e-6);
        assert!((lerp_midpoint(0.0_f32, 8.0, 10.0, 0.25) - 4.0).abs() < 1e-6);
        assert!((lerp_midpoint(0.0_f32, 8.0, 10.0, 0.75) - 9.0).abs() < 1e-6);
    }

    #[test]
    fn remap() {
        assert!((map(5.0_f32, 0.0, 10.0, 100.0, 200.0) - 150.0).abs() < 1e-4);
        assert!((map(15.0_f32, 0.0, 10.0, 100.0, 200.0) - 250.0).abs() < 1e-4);
        assert!((map_clamped(15.0_f32, 0.0, 10.0, 200.0, 100.0) - 100.0).abs() < 1e-4);
        assert!((map(1.0_f32, 3.0, 3.0, 7.0, 9.0) - 7.0).abs() < 1e-6);
    }

    #[test]
    fn angles() {
        assert!((wrap_angle(190.0) + 170.0).abs() < 1e-4);
        assert!((delta_angle(350.0, 10.0) - 20.0).abs() < 1e-4);
        assert!((delta_angle(10.0, 350.0) + 20.0).abs() < 1e-4);
    }

    #[test]
    fn hyperbolic() {
        let x = 0.7_f64;
        assert!((sech(x) * x.cosh() - 1.0).abs() < 1e-12);
        assert!((csch(x) * x.sinh() - 1.0).abs() < 1e-12);
        assert!((coth(x) * x.tanh() - 1.0).abs() < 1e-12);
        assert!((acoth(coth(x)) - x).abs() < 1e-9);
    }

    #[test]
    fn decibels() {
        assert!(linear_to_decibel(1.0).abs() < 1e-5);
        assert!((linear_to_decibel(0.5) + 6.0206).abs() < 1e-3);
        assert!((linear_to_decibel(0.0) - MIN_DECIBEL).abs() < 1e-6);
        assert!((decibel_to_linear(-6.0206) - 0.5).abs() < 1e-4);
        assert!((decibel_to_linear(linear_to_decibel(0.3)) - 0.3).abs() < 1e-5);
    }

    #[test]
    fn approximately_scales_with_magnitude() {
        assert!(approximately(1_000_000.0, 1_000_000.5));
        assert!(!approximately(1.0, 1.001));
        assert!(approximately(0.1 + 0.2, 0.3));
    }
}
