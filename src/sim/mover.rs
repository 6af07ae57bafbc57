//! The moving point and its ray bundle
//!
//! Collision response is a reflect-and-retry heuristic, not rigid-body
//! physics:
//! - the step is taken, then every polygon is checked (no grid)
//! - a polygon closer than `speed` undoes the step, reflects the direction
//!   off its closest edge and retakes the step along the new direction
//! - the retaken step is not re-checked against the polygon that caused it,
//!   so adjacent obstacles can leave a residual overlap
//! - walls only flip the direction component; the position is not pulled
//!   back inside, so the point can sit outside the canvas for a frame

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::polygon::Polygon;
use super::ray::{MarchOutcome, Obstacles, Ray};
use super::sdf::reflect;

/// What happened during one [`MovingPoint::advance`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Polygons that triggered a reflection
    pub collisions: usize,
    /// Direction x flipped by a side wall
    pub bounced_x: bool,
    /// Direction y flipped by a top/bottom wall
    pub bounced_y: bool,
}

/// A point travelling at constant speed that emits a fixed bundle of rays
#[derive(Debug, Clone)]
pub struct MovingPoint {
    pub position: Vec2,
    direction: Vec2,
    speed: f32,
    rays: Vec<Ray>,
}

impl MovingPoint {
    /// Create a point with `ray_count` rays evenly spaced over a full turn.
    ///
    /// `direction` is normalized; a zero vector points along +x.
    pub fn new(position: Vec2, direction: Vec2, speed: f32, ray_count: usize) -> Self {
        let rays = (0..ray_count)
            .map(|i| Ray::from_angle(TAU / ray_count as f32 * i as f32))
            .collect();
        Self {
            position,
            direction: direction.try_normalize().unwrap_or(Vec2::X),
            speed,
            rays,
        }
    }

    /// Random position inside `[0, extent)` heading in a random direction
    pub fn random<R: Rng + ?Sized>(extent: Vec2, speed: f32, ray_count: usize, rng: &mut R) -> Self {
        let position = Vec2::new(
            rng.random_range(0.0..extent.x),
            rng.random_range(0.0..extent.y),
        );
        let direction = Vec2::from_angle(rng.random_range(0.0..TAU));
        Self::new(position, direction, speed, ray_count)
    }

    /// Unit heading
    #[inline]
    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    /// Set the heading (normalized; zero vectors are ignored)
    pub fn set_direction(&mut self, direction: Vec2) {
        if let Some(direction) = direction.try_normalize() {
            self.direction = direction;
        }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    #[inline]
    pub fn rays(&self) -> &[Ray] {
        &self.rays
    }

    /// Advance one frame, bouncing off polygons and the `[0, extent]` walls
    pub fn advance(&mut self, polygons: &[Polygon], extent: Vec2) -> MoveOutcome {
        let mut outcome = MoveOutcome::default();
        let mut step = self.direction * self.speed;
        self.position += step;

        for (index, polygon) in polygons.iter().enumerate() {
            let distance = polygon.distance_to(self.position);
            if distance < self.speed {
                let normal = polygon.closest_edge_normal(self.position);
                self.position -= step;
                self.direction = reflect(self.direction, normal)
                    .try_normalize()
                    .unwrap_or(-self.direction);
                step = self.direction * self.speed;
                self.position += step;
                outcome.collisions += 1;
                log::trace!(
                    "Bounced off polygon {} at distance {:.3}, heading now ({:.3}, {:.3})",
                    index,
                    distance,
                    self.direction.x,
                    self.direction.y
                );
            }
        }

        if self.position.x < 0.0 || self.position.x > extent.x {
            self.direction.x = -self.direction.x;
            outcome.bounced_x = true;
        }
        if self.position.y < 0.0 || self.position.y > extent.y {
            self.direction.y = -self.direction.y;
            outcome.bounced_y = true;
        }

        outcome
    }

    /// March every ray from the current position; returns how many hit a surface
    pub fn cast_rays(&mut self, obstacles: &Obstacles<'_>) -> usize {
        let origin = self.position;
        self.rays
            .iter_mut()
            .map(|ray| ray.march(origin, obstacles))
            .filter(|outcome| *outcome == MarchOutcome::Hit)
            .count()
    }
}
