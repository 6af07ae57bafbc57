//! Deterministic simulation module
//!
//! All scene logic lives here. This module must stay pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (polygon placement order)
//! - No rendering, timing or platform dependencies

pub mod grid;
pub mod mover;
pub mod polygon;
pub mod ray;
pub mod scene;
pub mod sdf;
pub mod snapshot;
pub mod tick;

pub use grid::{PolygonId, SpatialGrid};
pub use mover::{MoveOutcome, MovingPoint};
pub use polygon::{Bounds, Polygon, nearest_distance};
pub use ray::{MarchOutcome, Obstacles, Ray};
pub use scene::{FrameStats, Scene};
pub use sdf::{closest_point_on_segment, reflect, sd_segment};
pub use snapshot::{FrameSnapshot, GridLayout, RaySnapshot};
pub use tick::{FrameInput, tick};
