//! Sphere-traced rays
//!
//! A march starts at the emitter's current position and repeatedly advances
//! by the distance to the nearest boundary, which can never overshoot a
//! surface. It ends when a surface is within [`HIT_THRESHOLD`], when no
//! geometry bounds the step, or after [`MAX_MARCH_STEPS`] iterations.

use glam::Vec2;

use super::grid::SpatialGrid;
use super::polygon::{Polygon, nearest_distance};
use crate::consts::{HIT_THRESHOLD, MAX_MARCH_STEPS};

/// Which polygons a distance query considers
#[derive(Debug, Clone, Copy)]
pub enum Obstacles<'a> {
    /// Every polygon in the scene
    All(&'a [Polygon]),
    /// Only polygons registered in the query point's grid cell
    Grid {
        grid: &'a SpatialGrid,
        polygons: &'a [Polygon],
    },
}

impl Obstacles<'_> {
    /// Distance to the nearest candidate boundary, `None` if there are no candidates
    pub fn nearest_distance(&self, point: Vec2) -> Option<f32> {
        match *self {
            Obstacles::All(polygons) => nearest_distance(polygons, point),
            Obstacles::Grid { grid, polygons } => nearest_distance(
                grid.polygons_near(point)
                    .iter()
                    .filter_map(|id| polygons.get(id.0)),
                point,
            ),
        }
    }
}

/// Why a march stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarchOutcome {
    /// No geometry near the current position to bound the next step
    Unbounded,
    /// Came within the hit threshold of a surface
    Hit,
    /// Iteration cap reached
    Exhausted,
}

/// A single ray with a fixed direction
#[derive(Debug, Clone)]
pub struct Ray {
    direction: Vec2,
    steps: Vec<Vec2>,
}

impl Ray {
    /// `direction` is normalized; a zero vector points along +x
    pub fn new(direction: Vec2) -> Self {
        Self {
            direction: direction.try_normalize().unwrap_or(Vec2::X),
            steps: Vec::with_capacity(MAX_MARCH_STEPS),
        }
    }

    /// Ray pointing at `angle` radians
    pub fn from_angle(angle: f32) -> Self {
        Self::new(Vec2::from_angle(angle))
    }

    #[inline]
    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    /// Sample positions recorded by the last march, origin first
    #[inline]
    pub fn steps(&self) -> &[Vec2] {
        &self.steps
    }

    /// March from `origin` against the given obstacles
    pub fn march(&mut self, origin: Vec2, obstacles: &Obstacles<'_>) -> MarchOutcome {
        self.march_field(origin, |p| obstacles.nearest_distance(p))
    }

    /// March from `origin` against an arbitrary distance field.
    ///
    /// `field` returns `None` when nothing bounds the step at a point. Any
    /// previous steps are discarded.
    pub fn march_field<F>(&mut self, origin: Vec2, field: F) -> MarchOutcome
    where
        F: Fn(Vec2) -> Option<f32>,
    {
        self.steps.clear();
        let mut current = origin;

        for _ in 0..MAX_MARCH_STEPS {
            let Some(min_distance) = field(current).filter(|d| d.is_finite()) else {
                return MarchOutcome::Unbounded;
            };

            self.steps.push(current);

            if min_distance < HIT_THRESHOLD {
                return MarchOutcome::Hit;
            }

            current += self.direction * min_distance;
        }

        MarchOutcome::Exhausted
    }
}
