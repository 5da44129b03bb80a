//! Damped harmonic oscillator stepping.
//!
//! The spring is advanced analytically rather than integrated, so a step is
//! stable for any time delta. The four coefficients depend only on the time
//! delta, angular frequency and damping ratio; they can be cached and reused
//! while those stay constant.

use glam::Vec3;

/// Below this the frequency is treated as zero and the ratio as exactly one.
const EPSILON: f32 = 0.0001;

/// Coefficients mapping `(position, velocity)` at time `t` to time `t + dt`.
///
/// Positions are relative to the equilibrium point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DampedSpring {
    /// Contribution of the old position to the new position.
    pub pos_pos: f32,
    /// Contribution of the old velocity to the new position.
    pub pos_vel: f32,
    /// Contribution of the old position to the new velocity.
    pub vel_pos: f32,
    /// Contribution of the old velocity to the new velocity.
    pub vel_vel: f32,
}

impl DampedSpring {
    /// Coefficients that leave position and velocity unchanged.
    pub const IDENTITY: Self = Self {
        pos_pos: 1.0,
        pos_vel: 0.0,
        vel_pos: 0.0,
        vel_vel: 1.0,
    };

    /// Computes the step coefficients.
    ///
    /// Negative `angular_frequency` or `damping_ratio` are clamped to zero.
    /// A frequency of (almost) zero yields [`DampedSpring::IDENTITY`].
    #[must_use]
    pub fn new(delta_time: f32, angular_frequency: f32, damping_ratio: f32) -> Self {
        let damping_ratio = damping_ratio.max(0.0);
        let angular_frequency = angular_frequency.max(0.0);

        if angular_frequency < EPSILON {
            return Self::IDENTITY;
        }

        if damping_ratio > 1.0 + EPSILON {
            Self::over_damped(delta_time, angular_frequency, damping_ratio)
        } else if damping_ratio < 1.0 - EPSILON {
            Self::under_damped(delta_time, angular_frequency, damping_ratio)
        } else {
            Self::critically_damped(delta_time, angular_frequency)
        }
    }

    fn over_damped(dt: f32, omega: f32, zeta: f32) -> Self {
        let za = -omega * zeta;
        let zb = omega * (zeta * zeta - 1.0).sqrt();
        let z1 = za - zb;
        let z2 = za + zb;

        let e1 = (z1 * dt).exp();
        let e2 = (z2 * dt).exp();

        let inv_two_zb = 1.0 / (2.0 * zb);
        let e1_over_two_zb = e1 * inv_two_zb;
        let e2_over_two_zb = e2 * inv_two_zb;
        let z1e1_over_two_zb = z1 * e1_over_two_zb;
        let z2e2_over_two_zb = z2 * e2_over_two_zb;

        Self {
            pos_pos: e1_over_two_zb * z2 - z2e2_over_two_zb + e2,
            pos_vel: -e1_over_two_zb + e2_over_two_zb,
            vel_pos: (z1e1_over_two_zb - z2e2_over_two_zb + e2) * z2,
            vel_vel: -z1e1_over_two_zb + z2e2_over_two_zb,
        }
    }

    fn under_damped(dt: f32, omega: f32, zeta: f32) -> Self {
        let omega_zeta = omega * zeta;
        let alpha = omega * (1.0 - zeta * zeta).sqrt();

        let exp_term = (-omega_zeta * dt).exp();
        let (sin_term, cos_term) = (alpha * dt).sin_cos();
        let inv_alpha = 1.0 / alpha;

        let exp_sin = exp_term * sin_term;
        let exp_cos = exp_term * cos_term;
        let exp_omega_zeta_sin_over_alpha = exp_term * omega_zeta * sin_term * inv_alpha;

        Self {
            pos_pos: exp_cos + exp_omega_zeta_sin_over_alpha,
            pos_vel: exp_sin * inv_alpha,
            vel_pos: -exp_sin * alpha - omega_zeta * exp_omega_zeta_sin_over_alpha,
            vel_vel: exp_cos - exp_omega_zeta_sin_over_alpha,
        }
    }

    fn critically_damped(dt: f32, omega: f32) -> Self {
        let exp_term = (-omega * dt).exp();
        let time_exp = dt * exp_term;
        let time_exp_freq = time_exp * omega;

        Self {
            pos_pos: time_exp_freq + exp_term,
            pos_vel: time_exp,
            vel_pos: -omega * time_exp_freq,
            vel_vel: -time_exp_freq + exp_term,
        }
    }

    /// Advances a scalar spring by one step toward `equilibrium`.
    pub fn apply(&self, position: &mut f32, velocity: &mut f32, equilibrium: f32) {
        let old_pos = *position - equilibrium;
        let old_vel = *velocity;
        *position = old_pos * self.pos_pos + old_vel * self.pos_vel + equilibrium;
        *velocity = old_pos * self.vel_pos + old_vel * self.vel_vel;
    }

    /// Advances a vector spring by one step toward `equilibrium`.
    pub fn apply_vec3(&self, position: &mut Vec3, velocity: &mut Vec3, equilibrium: Vec3) {
        let old_pos = *position - equilibrium;
        let old_vel = *velocity;
        *position = old_pos * self.pos_pos + old_vel * self.pos_vel + equilibrium;
        *velocity = old_pos * self.vel_pos + old_vel * self.vel_vel;
    }
}

impl Default for DampedSpring {
    fn default() -> Self {
        Self::IDENTITY
    }
}
