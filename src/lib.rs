//! Polymarch - a point bouncing through a field of polygons
//!
//! Core modules:
//! - `sim`: Deterministic simulation (polygon distance fields, spatial grid,
//!   sphere-traced rays, moving point physics, scene orchestration)
//! - `settings`: Scene configuration
//! - `error`: Construction and configuration errors
//!
//! Drawing and input devices live outside this crate. A collaborator feeds
//! [`sim::FrameInput`] into [`sim::tick`] once per frame and reads back a
//! [`sim::FrameSnapshot`].

pub mod error;
pub mod settings;
pub mod sim;

pub use error::SimError;
pub use settings::Settings;

use glam::Vec2;

/// Simulation constants
pub mod consts {
    /// Default canvas dimensions
    pub const CANVAS_WIDTH: f32 = 400.0;
    pub const CANVAS_HEIGHT: f32 = 400.0;

    /// Edge length of one spatial grid cell
    pub const GRID_CELL_SIZE: f32 = 50.0;
    /// Upper bound on grid cells a canvas/cell size pair may produce
    pub const MAX_GRID_CELLS: usize = 1 << 20;

    /// Rays emitted by the moving point, evenly spaced over a full turn
    pub const RAY_COUNT: usize = 180;
    /// Distance the moving point travels per frame
    pub const BASE_SPEED: f32 = 4.0;

    /// Iteration cap for a single ray march
    pub const MAX_MARCH_STEPS: usize = 20;
    /// A ray closer than this to a surface has hit it
    pub const HIT_THRESHOLD: f32 = 1.0;

    /// Obstacle side count range (inclusive)
    pub const MIN_OBSTACLE_SIDES: usize = 5;
    pub const MAX_OBSTACLE_SIDES: usize = 10;
    /// Obstacle base size range (half-open)
    pub const MIN_OBSTACLE_SIZE: f32 = 20.0;
    pub const MAX_OBSTACLE_SIZE: f32 = 100.0;

    /// Vertex radius is `size * (RADIUS_JITTER_BASE + u)`, u in [0, RADIUS_JITTER_SPAN)
    pub const RADIUS_JITTER_BASE: f32 = 0.7;
    pub const RADIUS_JITTER_SPAN: f32 = 0.6;

    /// Edges shorter than this (squared) are treated as degenerate
    pub const MIN_EDGE_LENGTH_SQ: f32 = 1e-8;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
