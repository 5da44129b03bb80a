//! Ray, plane and line algebra.
//!
//! All degeneracy checks share a single tolerance, [`EPSILON`]. Configurations
//! that approach degeneracy (parallel rays, parallel planes) return `None`
//! instead of a numerically wild result.
//!
//! - [`Ray`], [`Plane`], [`LineSegment`] - Plain value types
//! - [`intersection`] - Plane/plane, ray/plane, ray/ray and closest-approach solvers
//! - [`projection`] - Point and vector projection, angle helpers
//! - [`rotation`] - Swing-twist decomposition and interpolation

pub mod intersection;
pub mod projection;
pub mod rotation;
mod shapes;

pub use intersection::{
    closest_points_on_two_rays, plane_plane_intersection, ray_plane_intersection,
    ray_ray_intersection,
};
pub use projection::{
    SegmentSide, angle_between, angle_vector_plane, point_side_of_segment,
    project_point_on_line, project_point_on_line_segment, project_point_on_plane,
    project_vector_on_plane, signed_angle,
};
pub use rotation::{SwingTwist, decompose_swing_twist, sterp};
pub use shapes::{LineSegment, Plane, Ray};

/// Tolerance for every degeneracy test in this module.
pub const EPSILON: f32 = 0.001;
