//! Swing-twist decomposition.
//!
//! Any rotation `q` can be split into a twist about a chosen axis followed by
//! a swing that moves the axis, with `q = swing * twist`. Interpolating the two
//! parts separately ("sterp") avoids the candy-wrapper artifacts of a plain
//! slerp when a joint both bends and rolls.

use glam::{Quat, Vec3, Vec4};

use super::EPSILON;

/// Result of [`decompose_swing_twist`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwingTwist {
    /// Rotation perpendicular to the twist axis.
    pub swing: Quat,
    /// Rotation about the twist axis.
    pub twist: Quat,
}

impl SwingTwist {
    /// Recombines the parts into `swing * twist`.
    #[inline]
    #[must_use]
    pub fn compose(&self) -> Quat {
        self.swing * self.twist
    }
}

/// Splits `rotation` into swing and twist around `twist_axis`.
///
/// When the rotation's component about the axis vanishes (a half turn about a
/// perpendicular axis), the twist is ambiguous. The swing is then taken as the
/// half turn about the perpendicular part of the rotation's own vector part,
/// and the twist is the (near identity) remainder.
#[must_use]
pub fn decompose_swing_twist(rotation: Quat, twist_axis: Vec3) -> SwingTwist {
    let axis = twist_axis.normalize_or_zero();
    if axis == Vec3::ZERO {
        return SwingTwist {
            swing: rotation,
            twist: Quat::IDENTITY,
        };
    }

    let vector_part = Vec3::new(rotation.x, rotation.y, rotation.z);
    let projected = axis * vector_part.dot(axis);
    let twist_candidate = Vec4::new(projected.x, projected.y, projected.z, rotation.w);

    if twist_candidate.length_squared() < EPSILON {
        // |q| = 1, so the perpendicular part has length close to one here.
        let perpendicular = (vector_part - projected).normalize_or_zero();
        let swing = Quat::from_xyzw(perpendicular.x, perpendicular.y, perpendicular.z, 0.0);
        let twist = (swing.inverse() * rotation).normalize();
        return SwingTwist { swing, twist };
    }

    let twist = Quat::from_vec4(twist_candidate.normalize());
    let swing = rotation * twist.inverse();
    SwingTwist { swing, twist }
}

/// Rotates from `from` toward `to`, interpolating swing and twist separately.
///
/// `t_swing` and `t_twist` of `0` return `from`; both `1` return `to`.
#[must_use]
pub fn sterp(from: Quat, to: Quat, twist_axis: Vec3, t_swing: f32, t_twist: f32) -> Quat {
    let delta = to * from.inverse();
    let full = decompose_swing_twist(delta, twist_axis);
    let swing = Quat::IDENTITY.slerp(full.swing, t_swing);
    let twist = Quat::IDENTITY.slerp(full.twist, t_twist);
    (swing * twist * from).normalize()
}

#[cfg(test)]
mod tests {
    use std::f32::consts::PI;

    use super::*;

    fn same_rotation(a: Quat, b: Quat) -> bool {
        a.dot(b).abs() > 1.0 - 1e-4
    }

    fn twist_keeps_axis(twist: Quat, axis: Vec3) -> bool {
        (twist * axis - axis).length() < 1e-3
    }

    fn swing_perpendicular(swing: Quat, axis: Vec3) -> bool {
        let (swing_axis, angle) = swing.to_axis_angle();
        angle.abs() < 1e-3 || swing_axis.dot(axis).abs() < 1e-3
    }

    #[test]
    fn decomposition_recomposes() {
        let axis = Vec3::Y;
        let rotation = Quat::from_axis_angle(Vec3::X, 0.6) * Quat::from_axis_angle(Vec3::Y, 1.1);
        let parts = decompose_swing_twist(rotation, axis);

        assert!(same_rotation(parts.compose(), rotation));
        assert!(twist_keeps_axis(parts.twist, axis));
        assert!(swing_perpendicular(parts.swing, axis));
    }

    #[test]
    fn pure_twist_has_identity_swing() {
        let rotation = Quat::from_axis_angle(Vec3::Z, 2.0);
        let parts = decompose_swing_twist(rotation, Vec3::Z);
        assert!(same_rotation(parts.swing, Quat::IDENTITY));
        assert!(same_rotation(parts.twist, rotation));
    }

    #[test]
    fn half_turn_about_twist_axis() {
        let rotation = Quat::from_axis_angle(Vec3::Z, PI);
        let parts = decompose_swing_twist(rotation, Vec3::Z);
        assert!(same_rotation(parts.compose(), rotation));
        assert!(same_rotation(parts.swing, Quat::IDENTITY));
    }

    #[test]
    fn half_turn_perpendicular_to_axis_is_singular_but_valid() {
        let rotation = Quat::from_axis_angle(Vec3::X, PI);
        let parts = decompose_swing_twist(rotation, Vec3::Z);
        assert!(same_rotation(parts.compose(), rotation));
        assert!(twist_keeps_axis(parts.twist, Vec3::Z));
        assert!(swing_perpendicular(parts.swing, Vec3::Z));
    }

    #[test]
    fn perpendicular_half_turns_have_identity_twist() {
        for angle in [0.0_f32, 0.4, 1.3, 2.9, -2.0] {
            let perpendicular = Vec3::new(angle.cos(), angle.sin(), 0.0);
            let rotation = Quat::from_axis_angle(perpendicular, PI);
            let parts = decompose_swing_twist(rotation, Vec3::Z);
            assert!(same_rotation(parts.swing, rotation), "angle {angle}");
            assert!(same_rotation(parts.twist, Quat::IDENTITY), "angle {angle}");
            assert!(swing_perpendicular(parts.swing, Vec3::Z));
            assert_eq!(parts, decompose_swing_twist(rotation, Vec3::Z));
        }
    }

    #[test]
    fn near_singular_rotation_still_recomposes() {
        let rotation = Quat::from_axis_angle(Vec3::Y, PI) * Quat::from_axis_angle(Vec3::X, 0.02);
        let parts = decompose_swing_twist(rotation, Vec3::Z);
        assert!(same_rotation(parts.compose(), rotation));
        assert!(swing_perpendicular(parts.swing, Vec3::Z));
    }

    #[test]
    fn sterp_endpoints() {
        let from = Quat::from_axis_angle(Vec3::Y, 0.3);
        let to = Quat::from_axis_angle(Vec3::X, 1.0) * Quat::from_axis_angle(Vec3::Y, -0.8);
        assert!(same_rotation(sterp(from, to, Vec3::Y, 0.0, 0.0), from));
        assert!(same_rotation(sterp(from, to, Vec3::Y, 1.0, 1.0), to));
    }

    #[test]
    fn sterp_twist_only() {
        let from = Quat::IDENTITY;
        let to = Quat::from_axis_angle(Vec3::Y, 1.2);
        let half = sterp(from, to, Vec3::Y, 0.0, 0.5);
        assert!(same_rotation(half, Quat::from_axis_angle(Vec3::Y, 0.6)));
    }
}
