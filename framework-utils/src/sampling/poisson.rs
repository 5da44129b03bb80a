//! Uniform Poisson-disc sampling (Bridson's algorithm).
//!
//! Points are thrown around already accepted "active" points at a distance
//! between `d` and `2d`, and kept only when no existing point is closer than
//! `d`. A background grid with cells of size `d / √2` holds at most one point
//! per cell, so every distance check only looks at the surrounding 5x5 cells.
//!
//! Each active point gets all of its candidate attempts per pick and every
//! candidate that passes is accepted. A point is retired once a pick produces
//! nothing.

use std::f32::consts::{SQRT_2, TAU};
use std::num::NonZeroUsize;

use glam::Vec2;

use crate::error::InvalidArgument;
use crate::random::Random;

/// Candidate attempts per active point when not configured otherwise.
pub const DEFAULT_POINTS_PER_ITERATION: u32 = 30;

/// Largest acceleration grid a sampler will allocate.
pub const MAX_GRID_CELLS: usize = 1 << 24;

/// Parameters shared by [`sample_rectangle`] and [`sample_circle`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoissonDiskSettings {
    /// Minimum distance between any two samples.
    pub min_distance: f32,
    /// Candidates thrown around an active point each time it is picked.
    pub points_per_iteration: u32,
    /// Upper bound on loop iterations (first point re-rolls plus active point
    /// picks). `None` runs until no active points remain.
    pub max_iterations: Option<NonZeroUsize>,
}

impl PoissonDiskSettings {
    /// Settings with the default attempt count and no iteration cap.
    #[must_use]
    pub const fn new(min_distance: f32) -> Self {
        Self {
            min_distance,
            points_per_iteration: DEFAULT_POINTS_PER_ITERATION,
            max_iterations: None,
        }
    }

    /// Sets the number of candidates per active point.
    #[must_use]
    pub const fn with_points_per_iteration(mut self, points_per_iteration: u32) -> Self {
        self.points_per_iteration = points_per_iteration;
        self
    }

    /// Caps the number of loop iterations.
    #[must_use]
    pub const fn with_max_iterations(mut self, max_iterations: Option<NonZeroUsize>) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Checks that the settings describe a samplable configuration.
    pub fn validate(&self) -> Result<(), InvalidArgument> {
        if !self.min_distance.is_finite() || self.min_distance <= 0.0 {
            return Err(InvalidArgument::MinDistance(self.min_distance));
        }
        if self.points_per_iteration == 0 {
            return Err(InvalidArgument::ZeroPointsPerIteration);
        }
        Ok(())
    }
}

/// Output of a sampling run.
#[derive(Debug, Clone)]
pub struct PoissonDiskSample {
    /// Accepted points in acceptance order.
    pub points: Vec<Vec2>,
    /// The acceleration grid, holding every accepted point.
    pub grid: SampleGrid,
}

/// Background grid with at most one point per cell.
#[derive(Debug, Clone)]
pub struct SampleGrid {
    width: usize,
    height: usize,
    cell_size: f32,
    origin: Vec2,
    cells: Vec<Option<Vec2>>,
}

impl SampleGrid {
    fn new(origin: Vec2, dimensions: Vec2, cell_size: f32) -> Result<Self, InvalidArgument> {
        // Float to int casts saturate, so huge regions end up at `usize::MAX`.
        let width = ((dimensions.x / cell_size) as usize).saturating_add(1);
        let height = ((dimensions.y / cell_size) as usize).saturating_add(1);
        match width.checked_mul(height) {
            Some(count) if count <= MAX_GRID_CELLS => Ok(Self {
                width,
                height,
                cell_size,
                origin,
                cells: vec![None; count],
            }),
            _ => Err(InvalidArgument::GridTooLarge { width, height }),
        }
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Side length of a cell.
    #[must_use]
    pub const fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// World position of the corner of cell `(0, 0)`.
    #[must_use]
    pub const fn origin(&self) -> Vec2 {
        self.origin
    }

    /// The point stored in cell `(x, y)`, if any.
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> Option<Vec2> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells[y * self.width + x]
    }

    /// The cell containing `point`, or `None` when it lies outside the grid.
    #[must_use]
    pub fn cell_of(&self, point: Vec2) -> Option<(usize, usize)> {
        let local = (point - self.origin) / self.cell_size;
        if !local.is_finite() || local.min_element() < 0.0 {
            return None;
        }
        let (x, y) = (local.x as usize, local.y as usize);
        (x < self.width && y < self.height).then_some((x, y))
    }

    /// Iterates over occupied cells as `((x, y), point)`.
    pub fn occupied(&self) -> impl Iterator<Item = ((usize, usize), Vec2)> + '_ {
        self.cells.iter().enumerate().filter_map(|(index, cell)| {
            cell.map(|point| ((index % self.width, index / self.width), point))
        })
    }

    fn insert(&mut self, point: Vec2) {
        if let Some((x, y)) = self.cell_of(point) {
            self.cells[y * self.width + x] = Some(point);
        }
    }

    /// Whether any stored point within two cells of `point` is closer than `min_distance`.
    fn has_neighbour_within(&self, point: Vec2, min_distance: f32) -> bool {
        let Some((cx, cy)) = self.cell_of(point) else {
            return false;
        };
        let min_distance_sq = min_distance * min_distance;
        let x_range = cx.saturating_sub(2)..=(cx + 2).min(self.width - 1);
        for y in cy.saturating_sub(2)..=(cy + 2).min(self.height - 1) {
            for x in x_range.clone() {
                if let Some(other) = self.cells[y * self.width + x]
                    && other.distance_squared(point) < min_distance_sq
                {
                    return true;
                }
            }
        }
        false
    }
}

/// Samples points inside the rectangle spanned by `top_left` (minimum corner)
/// and `bottom_right` (maximum corner).
///
/// # Errors
/// Returns [`InvalidArgument`] for invalid settings, a rectangle that is
/// empty, inverted or not finite, or one that needs more than
/// [`MAX_GRID_CELLS`] grid cells.
pub fn sample_rectangle<R: Random + ?Sized>(
    top_left: Vec2,
    bottom_right: Vec2,
    settings: &PoissonDiskSettings,
    rng: &mut R,
) -> Result<PoissonDiskSample, InvalidArgument> {
    settings.validate()?;
    let region = Region::new(top_left, bottom_right, None)?;
    Ok(Sampler::new(region, settings, rng)?.run())
}

/// Samples points inside the circle of `radius` around `center`.
///
/// # Errors
/// Returns [`InvalidArgument`] for invalid settings, a radius that is not
/// positive and finite, or a circle too large for the acceleration grid.
pub fn sample_circle<R: Random + ?Sized>(
    center: Vec2,
    radius: f32,
    settings: &PoissonDiskSettings,
    rng: &mut R,
) -> Result<PoissonDiskSample, InvalidArgument> {
    settings.validate()?;
    if !radius.is_finite() || radius <= 0.0 {
        return Err(InvalidArgument::Radius(radius));
    }
    let extent = Vec2::splat(radius);
    let region = Region::new(center - extent, center + extent, Some(radius))?;
    Ok(Sampler::new(region, settings, rng)?.run())
}

/// Rectangle with an optional inscribed rejection circle.
#[derive(Debug, Clone, Copy)]
struct Region {
    top_left: Vec2,
    bottom_right: Vec2,
    center: Vec2,
    rejection_sq: Option<f32>,
}

impl Region {
    fn new(
        top_left: Vec2,
        bottom_right: Vec2,
        rejection_radius: Option<f32>,
    ) -> Result<Self, InvalidArgument> {
        if !top_left.is_finite()
            || !bottom_right.is_finite()
            || bottom_right.x <= top_left.x
            || bottom_right.y <= top_left.y
        {
            return Err(InvalidArgument::Bounds {
                top_left: top_left.to_array(),
                bottom_right: bottom_right.to_array(),
            });
        }
        Ok(Self {
            top_left,
            bottom_right,
            center: (top_left + bottom_right) * 0.5,
            rejection_sq: rejection_radius.map(|r| r * r),
        })
    }

    fn dimensions(&self) -> Vec2 {
        self.bottom_right - self.top_left
    }

    fn contains(&self, point: Vec2) -> bool {
        point.x >= self.top_left.x
            && point.x < self.bottom_right.x
            && point.y > self.top_left.y
            && point.y < self.bottom_right.y
            && self.inside_rejection(point)
    }

    fn inside_rejection(&self, point: Vec2) -> bool {
        self.rejection_sq
            .is_none_or(|limit| self.center.distance_squared(point) <= limit)
    }
}

struct Sampler<'a, R: ?Sized> {
    region: Region,
    min_distance: f32,
    points_per_iteration: u32,
    max_iterations: Option<NonZeroUsize>,
    iterations: usize,
    rng: &'a mut R,
    grid: SampleGrid,
    points: Vec<Vec2>,
    active: Vec<Vec2>,
}

impl<'a, R: Random + ?Sized> Sampler<'a, R> {
    fn new(
        region: Region,
        settings: &PoissonDiskSettings,
        rng: &'a mut R,
    ) -> Result<Self, InvalidArgument> {
        let cell_size = settings.min_distance / SQRT_2;
        let grid = SampleGrid::new(region.top_left, region.dimensions(), cell_size)?;
        Ok(Self {
            region,
            min_distance: settings.min_distance,
            points_per_iteration: settings.points_per_iteration,
            max_iterations: settings.max_iterations,
            iterations: 0,
            rng,
            grid,
            points: Vec::new(),
            active: Vec::new(),
        })
    }

    fn run(mut self) -> PoissonDiskSample {
        if let Some(first) = self.first_point() {
            self.accept(first);
            while !self.active.is_empty() && self.tick() {
                let index = self.rng.next_index(self.active.len());
                let point = self.active[index];

                let mut found = false;
                for _ in 0..self.points_per_iteration {
                    found |= self.spawn_around(point);
                }
                if !found {
                    self.active.remove(index);
                }
            }
        }

        tracing::debug!(
            points = self.points.len(),
            iterations = self.iterations,
            "Poisson disk sampling finished"
        );
        PoissonDiskSample {
            points: self.points,
            grid: self.grid,
        }
    }

    /// Counts one iteration, or returns `false` once the cap is reached.
    fn tick(&mut self) -> bool {
        if let Some(max) = self.max_iterations
            && self.iterations >= max.get()
        {
            tracing::debug!(
                max_iterations = max.get(),
                active = self.active.len(),
                "Poisson disk sampling hit its iteration cap"
            );
            return false;
        }
        self.iterations += 1;
        true
    }

    fn first_point(&mut self) -> Option<Vec2> {
        let dimensions = self.region.dimensions();
        while self.tick() {
            let offset = Vec2::new(self.rng.next_f32(), self.rng.next_f32()) * dimensions;
            let point = self.region.top_left + offset;
            if self.region.inside_rejection(point) {
                return Some(point);
            }
        }
        None
    }

    fn spawn_around(&mut self, point: Vec2) -> bool {
        let radius = self.min_distance + self.min_distance * self.rng.next_f32();
        let (sin, cos) = (TAU * self.rng.next_f32()).sin_cos();
        let candidate = point + Vec2::new(sin, cos) * radius;

        if !self.region.contains(candidate)
            || self.grid.has_neighbour_within(candidate, self.min_distance)
        {
            return false;
        }
        self.accept(candidate);
        true
    }

    fn accept(&mut self, point: Vec2) {
        self.grid.insert(point);
        self.points.push(point);
        self.active.push(point);
    }
}
