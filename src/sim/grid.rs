//! Uniform bucket grid over the canvas
//!
//! Each cell lists the polygons whose bounding box overlaps it. Lookups are
//! single-cell: a polygon near a point but not overlapping the point's cell
//! is not returned. Ray marching accepts that miss in exchange for only
//! testing local geometry.

use glam::Vec2;

use super::polygon::Bounds;

/// Index of a polygon in the scene's polygon list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PolygonId(pub usize);

/// Fixed-size grid of polygon buckets, stored row-major
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    cell_size: f32,
    cols: usize,
    rows: usize,
    cells: Vec<Vec<PolygonId>>,
}

impl SpatialGrid {
    /// Allocate `ceil(width / cell_size) x ceil(height / cell_size)` empty cells
    pub fn new(width: f32, height: f32, cell_size: f32) -> Self {
        let cols = ((width / cell_size).ceil() as usize).max(1);
        let rows = ((height / cell_size).ceil() as usize).max(1);
        Self {
            cell_size,
            cols,
            rows,
            cells: vec![Vec::new(); cols * rows],
        }
    }

    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Cell (col, row) containing `point`, clamped onto the grid
    #[inline]
    pub fn cell_at(&self, point: Vec2) -> (usize, usize) {
        (
            clamp_index(point.x / self.cell_size, self.cols),
            clamp_index(point.y / self.cell_size, self.rows),
        )
    }

    /// Polygons registered in the cell containing `point` (possibly empty)
    pub fn polygons_near(&self, point: Vec2) -> &[PolygonId] {
        let (col, row) = self.cell_at(point);
        self.cell(col, row)
    }

    /// Polygons registered in cell (col, row); empty when out of range
    pub fn cell(&self, col: usize, row: usize) -> &[PolygonId] {
        if col < self.cols && row < self.rows {
            &self.cells[row * self.cols + col]
        } else {
            &[]
        }
    }

    /// Register `id` in every cell its bounds overlap.
    ///
    /// The index range is clamped to the grid. Bounds lying entirely
    /// outside the grid register nowhere. Returns the number of cells
    /// touched.
    pub fn insert(&mut self, id: PolygonId, bounds: Bounds) -> usize {
        let extent = Bounds {
            min: Vec2::ZERO,
            max: Vec2::new(self.cols as f32, self.rows as f32) * self.cell_size,
        };
        if !extent.intersects(&bounds) {
            log::debug!("Polygon {} lies outside the grid, not indexed", id.0);
            return 0;
        }

        let min_col = clamp_index(bounds.min.x / self.cell_size, self.cols);
        let max_col = clamp_index(bounds.max.x / self.cell_size, self.cols);
        let min_row = clamp_index(bounds.min.y / self.cell_size, self.rows);
        let max_row = clamp_index(bounds.max.y / self.cell_size, self.rows);

        for row in min_row..=max_row {
            for col in min_col..=max_col {
                self.cells[row * self.cols + col].push(id);
            }
        }
        (max_col - min_col + 1) * (max_row - min_row + 1)
    }
}

/// floor(coord) clamped to [0, len - 1]
#[inline]
fn clamp_index(coord: f32, len: usize) -> usize {
    let max = len.saturating_sub(1) as f32;
    coord.floor().clamp(0.0, max) as usize
}
