use glam::Vec3;

/// A half-line: origin plus direction.
///
/// The direction is not required to be normalized.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Ray {
    /// Start point.
    pub origin: Vec3,
    /// Direction (and, for segment-like uses, extent).
    pub direction: Vec3,
}

impl Ray {
    /// Creates a ray.
    #[must_use]
    pub const fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Point at parameter `t` along the direction.
    #[inline]
    #[must_use]
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// A plane satisfying `dot(normal, p) + distance == 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Unit normal.
    pub normal: Vec3,
    /// Signed distance of the plane from the world origin, against the normal.
    pub distance: f32,
}

impl Plane {
    /// Creates a plane, normalizing `normal`.
    #[must_use]
    pub fn new(normal: Vec3, distance: f32) -> Self {
        Self {
            normal: normal.normalize_or_zero(),
            distance,
        }
    }

    /// Creates the plane with the given normal passing through `point`.
    #[must_use]
    pub fn from_normal_and_point(normal: Vec3, point: Vec3) -> Self {
        let normal = normal.normalize_or_zero();
        Self {
            normal,
            distance: -normal.dot(point),
        }
    }

    /// The point of the plane closest to the world origin.
    #[inline]
    #[must_use]
    pub fn origin(&self) -> Vec3 {
        self.normal * -self.distance
    }

    /// Signed distance from the plane to `point`, positive on the normal side.
    #[inline]
    #[must_use]
    pub fn signed_distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.distance
    }

    /// Orthogonal projection of `point` onto the plane.
    #[inline]
    #[must_use]
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        point - self.normal * self.signed_distance(point)
    }
}

/// A finite segment between two points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LineSegment {
    /// First endpoint.
    pub start: Vec3,
    /// Second endpoint.
    pub end: Vec3,
}

impl LineSegment {
    /// Creates a segment.
    #[must_use]
    pub const fn new(start: Vec3, end: Vec3) -> Self {
        Self { start, end }
    }

    /// Vector from `start` to `end`.
    #[inline]
    #[must_use]
    pub fn vector(&self) -> Vec3 {
        self.end - self.start
    }

    /// Distance between the endpoints.
    #[inline]
    #[must_use]
    pub fn length(&self) -> f32 {
        self.vector().length()
    }
}
