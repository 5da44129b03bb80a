//! Intersection and closest-approach solvers.

use glam::Vec3;

use super::{EPSILON, Plane, Ray};

/// Line along which two planes meet.
///
/// The returned ray's direction is `cross(a.normal, b.normal)` and its origin
/// lies on both planes. Returns `None` for parallel planes.
#[must_use]
pub fn plane_plane_intersection(a: &Plane, b: &Plane) -> Option<Ray> {
    let direction = a.normal.cross(b.normal);
    // Direction inside plane b, perpendicular to the intersection line.
    let towards_line = b.normal.cross(direction);
    let denominator = a.normal.dot(towards_line);
    if denominator.abs() <= EPSILON {
        return None;
    }

    let a_origin = a.origin();
    let b_origin = b.origin();
    let t = a.normal.dot(a_origin - b_origin) / denominator;
    Some(Ray::new(b_origin + towards_line * t, direction))
}

/// Point where the infinite line through `ray` crosses `plane`.
///
/// Negative parameters are allowed. Returns `None` when the ray runs parallel
/// to the plane.
#[must_use]
pub fn ray_plane_intersection(ray: &Ray, plane: &Plane) -> Option<Vec3> {
    let denominator = ray.direction.dot(plane.normal);
    if denominator.abs() <= EPSILON {
        return None;
    }
    let numerator = (plane.origin() - ray.origin).dot(plane.normal);
    Some(ray.point_at(numerator / denominator))
}

/// Intersection of two coplanar rays.
///
/// `a.direction` doubles as the extent of `a`: the crossing must lie at a
/// parameter in `[0, 1]` along it. Returns `None` for non-coplanar or parallel
/// rays, or when the crossing is outside that range.
#[must_use]
pub fn ray_ray_intersection(a: &Ray, b: &Ray) -> Option<Vec3> {
    let between = b.origin - a.origin;
    let cross_ab = a.direction.cross(b.direction);
    let cross_between_b = between.cross(b.direction);

    let planar_factor = between.dot(cross_ab);
    let cross_sq = cross_ab.length_squared();
    if planar_factor.abs() >= EPSILON || cross_sq <= EPSILON {
        return None;
    }

    let s = cross_between_b.dot(cross_ab) / cross_sq;
    if !(0.0..=1.0).contains(&s) {
        return None;
    }
    Some(a.point_at(s))
}

/// Closest points between the infinite lines through two rays.
///
/// Returns `(point_on_a, point_on_b)`, or `None` when the lines are parallel.
#[must_use]
pub fn closest_points_on_two_rays(a: &Ray, b: &Ray) -> Option<(Vec3, Vec3)> {
    let aa = a.direction.dot(a.direction);
    let ab = a.direction.dot(b.direction);
    let bb = b.direction.dot(b.direction);

    let determinant = aa * bb - ab * ab;
    if determinant.abs() <= EPSILON {
        return None;
    }

    let offset = a.origin - b.origin;
    let c = a.direction.dot(offset);
    let f = b.direction.dot(offset);

    let s = (ab * f - c * bb) / determinant;
    let t = (aa * f - c * ab) / determinant;
    Some((a.point_at(s), b.point_at(t)))
}
