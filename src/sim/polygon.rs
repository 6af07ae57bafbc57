//! Polygon obstacles and their boundary distance field
//!
//! A polygon is an ordered vertex list; edge i joins vertex i to vertex
//! (i + 1) mod n. Vertices never change after construction, so the bounding
//! box is computed once.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::sdf::{sd_segment, segment_normal_facing};
use crate::consts::*;
use crate::error::SimError;
use crate::polar_to_cartesian;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    /// Smallest box enclosing all points (None for an empty slice)
    pub fn from_points(points: &[Vec2]) -> Option<Self> {
        let first = *points.first()?;
        Some(points.iter().fold(
            Bounds {
                min: first,
                max: first,
            },
            |b, &p| Bounds {
                min: b.min.min(p),
                max: b.max.max(p),
            },
        ))
    }

    /// Whether the two boxes overlap; touching edges count
    #[inline]
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }
}

/// A closed polygon obstacle
#[derive(Debug, Clone)]
pub struct Polygon {
    vertices: Vec<Vec2>,
    bounds: Bounds,
}

impl Polygon {
    /// Build a polygon from an explicit vertex list.
    ///
    /// Rejects fewer than 3 vertices, non-finite coordinates, and shapes
    /// left with fewer than 3 edges of non-zero length.
    pub fn from_vertices(vertices: Vec<Vec2>) -> Result<Self, SimError> {
        if vertices.len() < 3 {
            return Err(SimError::TooFewVertices(vertices.len()));
        }
        if let Some((index, v)) = vertices.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(SimError::NonFiniteVertex {
                index,
                x: v.x,
                y: v.y,
            });
        }

        let n = vertices.len();
        let live_edges = (0..n)
            .filter(|&i| {
                (vertices[(i + 1) % n] - vertices[i]).length_squared() >= MIN_EDGE_LENGTH_SQ
            })
            .count();
        if live_edges < 3 {
            return Err(SimError::CollapsedPolygon(live_edges));
        }

        let bounds = Bounds::from_points(&vertices).ok_or(SimError::TooFewVertices(0))?;
        Ok(Self { vertices, bounds })
    }

    /// Generate a perturbed polygon around `center`.
    ///
    /// Vertices sit at evenly spaced angles starting from a random offset;
    /// each radius is `size * (0.7 + u)` with u uniform in [0, 0.6), so the
    /// result is irregular and may be locally concave.
    pub fn generate<R: Rng + ?Sized>(
        center: Vec2,
        sides: usize,
        size: f32,
        rng: &mut R,
    ) -> Result<Self, SimError> {
        check_shape(sides, size)?;
        let angle_offset = rng.random_range(0.0..TAU);
        let vertices = (0..sides)
            .map(|i| {
                let angle = TAU / sides as f32 * i as f32 + angle_offset;
                let radius = size * (RADIUS_JITTER_BASE + rng.random_range(0.0..RADIUS_JITTER_SPAN));
                center + polar_to_cartesian(radius, angle)
            })
            .collect();
        Self::from_vertices(vertices)
    }

    /// Regular polygon with all vertices at distance `size` from `center`,
    /// the first vertex at angle 0.
    pub fn regular(center: Vec2, sides: usize, size: f32) -> Result<Self, SimError> {
        check_shape(sides, size)?;
        let vertices = (0..sides)
            .map(|i| center + polar_to_cartesian(size, TAU / sides as f32 * i as f32))
            .collect();
        Self::from_vertices(vertices)
    }

    #[inline]
    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    /// Axis-aligned bounds over all vertices
    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Non-degenerate edges as (start, end), wrapping last to first
    pub fn edges(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        let n = self.vertices.len();
        (0..n)
            .map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
            .filter(|(a, b)| (*b - *a).length_squared() >= MIN_EDGE_LENGTH_SQ)
    }

    /// Unsigned distance from `point` to the polygon boundary.
    ///
    /// Points inside the polygon get their distance to the nearest edge,
    /// never zero or negative.
    pub fn distance_to(&self, point: Vec2) -> f32 {
        self.edges()
            .map(|(a, b)| sd_segment(point, a, b))
            .fold(f32::INFINITY, f32::min)
    }

    /// Unit normal of the edge closest to `point`, facing the side of the
    /// edge that `point` lies on.
    pub fn closest_edge_normal(&self, point: Vec2) -> Vec2 {
        let mut min_distance = f32::INFINITY;
        let mut normal = Vec2::ZERO;
        for (a, b) in self.edges() {
            let distance = sd_segment(point, a, b);
            if distance < min_distance {
                min_distance = distance;
                normal = segment_normal_facing(point, a, b);
            }
        }
        normal
    }
}

fn check_shape(sides: usize, size: f32) -> Result<(), SimError> {
    if sides < 3 {
        return Err(SimError::InvalidSideCount(sides));
    }
    if !size.is_finite() || size <= 0.0 {
        return Err(SimError::InvalidSize(size));
    }
    Ok(())
}

/// Smallest boundary distance from `point` over a set of polygons.
///
/// `None` when the set is empty.
pub fn nearest_distance<'a, I>(polygons: I, point: Vec2) -> Option<f32>
where
    I: IntoIterator<Item = &'a Polygon>,
{
    polygons
        .into_iter()
        .map(|polygon| polygon.distance_to(point))
        .reduce(f32::min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::f32::consts::PI;

    fn square() -> Polygon {
        Polygon::from_vertices(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_square_distance_from_center() {
        assert!((square().distance_to(Vec2::new(5.0, 5.0)) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_square_bottom_edge_normal() {
        let normal = square().closest_edge_normal(Vec2::new(5.0, -1.0));
        assert!((normal - Vec2::new(0.0, -1.0)).length() < 1e-6);
        assert!((normal.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_distance_past_corner_uses_endpoint() {
        // Nearest boundary point is the (10, 10) corner
        let d = square().distance_to(Vec2::new(13.0, 14.0));
        assert!((d - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_regular_polygon_center_distance_is_apothem() {
        for sides in 3..=12 {
            let size = 50.0;
            let polygon = Polygon::regular(Vec2::new(200.0, 200.0), sides, size).unwrap();
            let apothem = size * (PI / sides as f32).cos();
            let d = polygon.distance_to(Vec2::new(200.0, 200.0));
            assert!((d - apothem).abs() < 1e-3, "sides={sides}: {d} vs {apothem}");
        }
    }

    #[test]
    fn test_bounds() {
        let bounds = square().bounds();
        assert_eq!(bounds.min, Vec2::new(0.0, 0.0));
        assert_eq!(bounds.max, Vec2::new(10.0, 10.0));
        let touching = Bounds {
            min: Vec2::new(10.0, -5.0),
            max: Vec2::new(20.0, 0.0),
        };
        let apart = Bounds {
            min: Vec2::new(10.1, 0.0),
            max: Vec2::new(20.0, 5.0),
        };
        assert!(bounds.intersects(&touching));
        assert!(!bounds.intersects(&apart));
    }

    #[test]
    fn test_generate_respects_radius_range() {
        let mut rng = Pcg32::seed_from_u64(7);
        let center = Vec2::new(100.0, 100.0);
        let size = 40.0;
        let polygon = Polygon::generate(center, 8, size, &mut rng).unwrap();
        assert_eq!(polygon.vertices().len(), 8);
        for v in polygon.vertices() {
            let r = (*v - center).length();
            assert!(r >= size * 0.7 - 1e-3 && r < size * 1.3 + 1e-3, "radius {r}");
        }
    }

    #[test]
    fn test_generate_is_deterministic_per_seed() {
        let a = Polygon::generate(Vec2::ZERO, 6, 30.0, &mut Pcg32::seed_from_u64(3)).unwrap();
        let b = Polygon::generate(Vec2::ZERO, 6, 30.0, &mut Pcg32::seed_from_u64(3)).unwrap();
        assert_eq!(a.vertices(), b.vertices());
    }

    #[test]
    fn test_rejects_degenerate_input() {
        let mut rng = Pcg32::seed_from_u64(1);
        assert!(matches!(
            Polygon::generate(Vec2::ZERO, 2, 30.0, &mut rng),
            Err(SimError::InvalidSideCount(2))
        ));
        assert!(matches!(
            Polygon::regular(Vec2::ZERO, 5, 0.0),
            Err(SimError::InvalidSize(_))
        ));
        assert!(matches!(
            Polygon::from_vertices(vec![Vec2::ZERO, Vec2::X]),
            Err(SimError::TooFewVertices(2))
        ));
        assert!(matches!(
            Polygon::from_vertices(vec![Vec2::ZERO, Vec2::X, Vec2::new(f32::NAN, 1.0)]),
            Err(SimError::NonFiniteVertex { index: 2, .. })
        ));
        // Four vertices but only two distinct points
        assert!(matches!(
            Polygon::from_vertices(vec![Vec2::ZERO, Vec2::ZERO, Vec2::X, Vec2::X]),
            Err(SimError::CollapsedPolygon(2))
        ));
    }

    #[test]
    fn test_zero_length_edge_is_skipped() {
        // Duplicate vertex creates one zero-length edge
        let polygon = Polygon::from_vertices(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        ])
        .unwrap();
        assert_eq!(polygon.edges().count(), 4);
        let normal = polygon.closest_edge_normal(Vec2::new(12.0, 5.0));
        assert!((normal - Vec2::new(1.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_nearest_distance_over_set() {
        let near = square();
        let far = Polygon::regular(Vec2::new(100.0, 100.0), 6, 10.0).unwrap();
        let polygons = [far, near];
        let d = nearest_distance(&polygons, Vec2::new(5.0, -2.0)).unwrap();
        assert!((d - 2.0).abs() < 1e-6);
        assert!(nearest_distance(std::iter::empty::<&Polygon>(), Vec2::ZERO).is_none());
    }

    proptest! {
        #[test]
        fn prop_distance_is_never_negative(
            seed in any::<u64>(),
            sides in 3usize..=10,
            size in 1.0f32..100.0,
            px in -500.0f32..500.0,
            py in -500.0f32..500.0,
        ) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let polygon = Polygon::generate(Vec2::ZERO, sides, size, &mut rng).unwrap();
            let d = polygon.distance_to(Vec2::new(px, py));
            prop_assert!(d >= 0.0);
            let n = polygon.closest_edge_normal(Vec2::new(px, py));
            prop_assert!((n.length() - 1.0).abs() < 1e-4);
        }
    }
}
