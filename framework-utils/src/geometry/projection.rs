//! Projection and angle helpers.

use glam::Vec3;

use super::{LineSegment, Plane};

/// Where a point on a segment's line lies relative to the segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentSide {
    /// Behind `start`, or exactly on it.
    BeforeStart,
    /// Between the endpoints.
    OnSegment,
    /// Beyond `end`.
    PastEnd,
}

/// Projects `point` onto the infinite line through `line_point` along `line_direction`.
///
/// A zero direction returns `line_point`.
#[must_use]
pub fn project_point_on_line(line_point: Vec3, line_direction: Vec3, point: Vec3) -> Vec3 {
    let direction = line_direction.normalize_or_zero();
    line_point + direction * (point - line_point).dot(direction)
}

/// Projects `point` onto `plane`.
#[inline]
#[must_use]
pub fn project_point_on_plane(plane: &Plane, point: Vec3) -> Vec3 {
    plane.closest_point(point)
}

/// Removes the component of `vector` along `normal`.
#[must_use]
pub fn project_vector_on_plane(normal: Vec3, vector: Vec3) -> Vec3 {
    let normal = normal.normalize_or_zero();
    vector - normal * vector.dot(normal)
}

/// Classifies a point already lying on the segment's line.
#[must_use]
pub fn point_side_of_segment(segment: &LineSegment, point: Vec3) -> SegmentSide {
    let segment_vector = segment.vector();
    let point_vector = point - segment.start;

    if point_vector.dot(segment_vector) > 0.0 {
        if point_vector.length_squared() <= segment_vector.length_squared() {
            SegmentSide::OnSegment
        } else {
            SegmentSide::PastEnd
        }
    } else {
        SegmentSide::BeforeStart
    }
}

/// Closest point of `segment` to `point`.
///
/// Projects onto the segment's line and clamps to whichever endpoint the
/// projection falls behind.
#[must_use]
pub fn project_point_on_line_segment(segment: &LineSegment, point: Vec3) -> Vec3 {
    let projected = project_point_on_line(segment.start, segment.vector(), point);
    match point_side_of_segment(segment, projected) {
        SegmentSide::OnSegment => projected,
        SegmentSide::BeforeStart => segment.start,
        SegmentSide::PastEnd => segment.end,
    }
}

/// Unsigned angle between two vectors in degrees, `0` if either is zero.
#[must_use]
pub fn angle_between(from: Vec3, to: Vec3) -> f32 {
    let denominator = (from.length_squared() * to.length_squared()).sqrt();
    if denominator < 1e-15 {
        return 0.0;
    }
    (from.dot(to) / denominator).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Angle from `from` to `to` in degrees, signed by rotation sense around `axis`.
#[must_use]
pub fn signed_angle(from: Vec3, to: Vec3, axis: Vec3) -> f32 {
    let angle = angle_between(from, to);
    if axis.dot(from.cross(to)) < 0.0 {
        -angle
    } else {
        angle
    }
}

/// Angle in degrees between a vector and a plane with the given normal.
///
/// Positive when the vector points to the normal side, `0` when it lies in the plane.
#[must_use]
pub fn angle_vector_plane(vector: Vec3, normal: Vec3) -> f32 {
    90.0 - angle_between(vector, normal)
}
