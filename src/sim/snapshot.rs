//! Read-only view of a frame for drawing
//!
//! The core never draws. A renderer takes a snapshot after each tick and
//! paints polygons, rays and grid lines from it.

use glam::Vec2;
use serde::Serialize;

use super::scene::Scene;

/// Grid dimensions, enough to draw the cell lines
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridLayout {
    pub cols: usize,
    pub rows: usize,
    pub cell_size: f32,
}

/// One ray's march result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RaySnapshot {
    /// Point position the march started from
    pub origin: Vec2,
    pub direction: Vec2,
    /// Sample positions, origin first; empty if nothing bounded the march
    pub steps: Vec<Vec2>,
}

impl RaySnapshot {
    /// Far end of the drawn ray segment
    pub fn end(&self) -> Option<Vec2> {
        self.steps.last().copied()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSnapshot {
    pub frame: u64,
    pub paused: bool,
    pub extent: Vec2,
    pub point: Vec2,
    pub direction: Vec2,
    /// Vertex lists in placement order
    pub polygons: Vec<Vec<Vec2>>,
    pub rays: Vec<RaySnapshot>,
    pub grid: GridLayout,
}

impl Scene {
    /// Capture everything a renderer needs for the current frame
    pub fn snapshot(&self) -> FrameSnapshot {
        let point = self.point();
        FrameSnapshot {
            frame: self.frame(),
            paused: self.is_paused(),
            extent: self.extent(),
            point: point.position,
            direction: point.direction(),
            polygons: self.polygons().iter().map(|p| p.vertices().to_vec()).collect(),
            rays: point
                .rays()
                .iter()
                .map(|ray| RaySnapshot {
                    origin: point.position,
                    direction: ray.direction(),
                    steps: ray.steps().to_vec(),
                })
                .collect(),
            grid: GridLayout {
                cols: self.grid().cols(),
                rows: self.grid().rows(),
                cell_size: self.grid().cell_size(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;
    use crate::sim::Polygon;

    #[test]
    fn test_snapshot_reflects_scene() {
        let settings = Settings {
            ray_count: 8,
            rays_use_grid: false,
            ..Default::default()
        };
        let mut scene = Scene::new(&settings, 21).unwrap();
        scene.add_polygon(Polygon::regular(Vec2::new(200.0, 200.0), 5, 30.0).unwrap());
        scene.update();

        let snapshot = scene.snapshot();
        assert_eq!(snapshot.frame, 1);
        assert_eq!(snapshot.polygons.len(), 1);
        assert_eq!(snapshot.polygons[0].len(), 5);
        assert_eq!(snapshot.rays.len(), 8);
        assert!(snapshot.rays.iter().all(|r| r.steps.first() == Some(&snapshot.point)));
        assert!(snapshot.rays.iter().all(|r| r.end().is_some()));
        assert!(snapshot.rays.iter().all(|r| r.origin == snapshot.point));
        assert_eq!(
            snapshot.grid,
            GridLayout {
                cols: 8,
                rows: 8,
                cell_size: 50.0
            }
        );
    }

    #[test]
    fn test_snapshot_serializes_to_json() {
        let settings = Settings {
            ray_count: 2,
            ..Default::default()
        };
        let scene = Scene::new(&settings, 1).unwrap();
        let json = serde_json::to_value(scene.snapshot()).unwrap();
        assert_eq!(json["frame"], 0);
        assert_eq!(json["rays"].as_array().map(Vec::len), Some(2));
        assert_eq!(json["grid"]["cols"], 8);
        // Nothing to march against, but the origin is still reported
        assert!(json["rays"][0]["steps"].as_array().is_some_and(Vec::is_empty));
        assert_eq!(json["rays"][0]["origin"], json["point"]);
    }
}
