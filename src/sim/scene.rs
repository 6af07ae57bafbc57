//! Scene state
//!
//! Owns the obstacles, the spatial grid and the moving point. The polygon
//! list only grows; its order is the query and display order. All
//! randomness comes from the scene's seeded RNG, so two scenes built from
//! the same seed and fed the same inputs stay identical.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::grid::{PolygonId, SpatialGrid};
use super::mover::{MoveOutcome, MovingPoint};
use super::polygon::Polygon;
use super::ray::Obstacles;
use crate::consts::*;
use crate::error::SimError;
use crate::settings::Settings;

/// Result of one [`Scene::update`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// False when the frame was skipped because the scene is paused
    pub advanced: bool,
    pub movement: MoveOutcome,
    /// Rays that reached a surface this frame
    pub ray_hits: usize,
}

/// The complete simulation
#[derive(Debug, Clone)]
pub struct Scene {
    /// Run seed for reproducibility
    pub seed: u64,
    extent: Vec2,
    polygons: Vec<Polygon>,
    grid: SpatialGrid,
    point: MovingPoint,
    paused: bool,
    debug_timing: bool,
    rays_use_grid: bool,
    frame: u64,
    rng: Pcg32,
}

impl Scene {
    /// Build an empty scene with the point at a random position
    pub fn new(settings: &Settings, seed: u64) -> Result<Self, SimError> {
        settings.validate()?;
        let extent = Vec2::new(settings.canvas_width, settings.canvas_height);
        let mut rng = Pcg32::seed_from_u64(seed);
        let point = MovingPoint::random(extent, settings.speed, settings.ray_count, &mut rng);
        log::debug!(
            "Scene {}x{} seeded with {}, point at ({:.1}, {:.1})",
            extent.x,
            extent.y,
            seed,
            point.position.x,
            point.position.y
        );

        Ok(Self {
            seed,
            extent,
            polygons: Vec::new(),
            grid: SpatialGrid::new(extent.x, extent.y, settings.cell_size),
            point,
            paused: false,
            debug_timing: settings.debug_timing,
            rays_use_grid: settings.rays_use_grid,
            frame: 0,
            rng,
        })
    }

    /// Canvas size; walls sit at 0 and at each extent
    #[inline]
    pub fn extent(&self) -> Vec2 {
        self.extent
    }

    #[inline]
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    #[inline]
    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    #[inline]
    pub fn point(&self) -> &MovingPoint {
        &self.point
    }

    /// Mutable access for callers that reposition or re-aim the point
    #[inline]
    pub fn point_mut(&mut self) -> &mut MovingPoint {
        &mut self.point
    }

    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Whether the collaborator should time its calls into the scene
    #[inline]
    pub fn debug_timing(&self) -> bool {
        self.debug_timing
    }

    pub fn set_debug_timing(&mut self, enabled: bool) {
        self.debug_timing = enabled;
    }

    /// Whether rays only consult their current grid cell
    #[inline]
    pub fn rays_use_grid(&self) -> bool {
        self.rays_use_grid
    }

    /// Append a polygon and index it in the grid
    pub fn add_polygon(&mut self, polygon: Polygon) -> PolygonId {
        let id = PolygonId(self.polygons.len());
        let cells = self.grid.insert(id, polygon.bounds());
        log::debug!(
            "Added polygon {} ({} vertices) to {} grid cells",
            id.0,
            polygon.vertices().len(),
            cells
        );
        self.polygons.push(polygon);
        id
    }

    /// Place a random obstacle centred on `center`, with side count and
    /// size drawn from the obstacle ranges
    pub fn place_obstacle(&mut self, center: Vec2) -> Result<PolygonId, SimError> {
        let sides = self.rng.random_range(MIN_OBSTACLE_SIDES..=MAX_OBSTACLE_SIDES);
        let size = self.rng.random_range(MIN_OBSTACLE_SIZE..MAX_OBSTACLE_SIZE);
        self.place_obstacle_with(center, sides, size)
    }

    /// Place a perturbed obstacle with explicit side count and size
    pub fn place_obstacle_with(
        &mut self,
        center: Vec2,
        sides: usize,
        size: f32,
    ) -> Result<PolygonId, SimError> {
        let polygon = Polygon::generate(center, sides, size, &mut self.rng)?;
        Ok(self.add_polygon(polygon))
    }

    /// Place `count` random obstacles at random canvas positions
    pub fn seed_obstacles(&mut self, count: usize) -> Result<(), SimError> {
        for _ in 0..count {
            let center = Vec2::new(
                self.rng.random_range(0.0..self.extent.x),
                self.rng.random_range(0.0..self.extent.y),
            );
            self.place_obstacle(center)?;
        }
        log::debug!("Seeded {} obstacles", count);
        Ok(())
    }

    /// Advance one frame: move the point, then cast its rays.
    ///
    /// Does nothing while paused.
    pub fn update(&mut self) -> FrameStats {
        if self.paused {
            return FrameStats::default();
        }

        self.frame += 1;
        let movement = self.point.advance(&self.polygons, self.extent);

        // Collisions above scan every polygon; rays may use the grid
        let obstacles = if self.rays_use_grid {
            Obstacles::Grid {
                grid: &self.grid,
                polygons: &self.polygons,
            }
        } else {
            Obstacles::All(&self.polygons)
        };
        let ray_hits = self.point.cast_rays(&obstacles);

        log::trace!(
            "Frame {}: {} collisions, {} ray hits",
            self.frame,
            movement.collisions,
            ray_hits
        );

        FrameStats {
            advanced: true,
            movement,
            ray_hits,
        }
    }
}
