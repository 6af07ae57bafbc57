//! Distance field primitives for line segments
//!
//! Unsigned distances only: the polygon field measures distance to the
//! boundary, never inside/outside.

use glam::Vec2;

use crate::consts::MIN_EDGE_LENGTH_SQ;

/// Closest point to `p` on segment `a`-`b` (projection clamped to the segment)
#[inline]
pub fn closest_point_on_segment(p: Vec2, a: Vec2, b: Vec2) -> Vec2 {
    let line_vec = b - a;
    let len_sq = line_vec.length_squared();
    if len_sq < MIN_EDGE_LENGTH_SQ {
        return a;
    }
    let t = ((p - a).dot(line_vec) / len_sq).clamp(0.0, 1.0);
    a + line_vec * t
}

/// Distance from `p` to segment `a`-`b`
#[inline]
pub fn sd_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    (p - closest_point_on_segment(p, a, b)).length()
}

/// Unit normal of segment `a`-`b`, oriented toward the side `p` is on.
///
/// The raw normal is the edge vector rotated 90° (`(-dy, dx)`). Returns
/// zero for a degenerate segment.
pub fn segment_normal_facing(p: Vec2, a: Vec2, b: Vec2) -> Vec2 {
    let normal = (b - a).perp().normalize_or_zero();
    if (p - a).dot(normal) < 0.0 { -normal } else { normal }
}

/// Reflect a direction off a surface with given unit normal
///
/// d' = d - 2(d·n)n
#[inline]
pub fn reflect(dir: Vec2, normal: Vec2) -> Vec2 {
    dir - 2.0 * dir.dot(normal) * normal
}
