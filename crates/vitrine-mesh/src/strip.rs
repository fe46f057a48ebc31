//! Flat meshes from 2D triangle strips.

use glam::{Vec2, Vec3};

use crate::mesh::Mesh;

/// Builds a flat mesh (z = 0) from a triangle strip outline.
///
/// Triangle `k` is `(k, k + 1, k + 2)`; winding is not alternated, so every
/// other triangle faces away and the mesh must be drawn without culling.
/// Fewer than three points produce a mesh without triangles.
pub fn strip_mesh(points: &[Vec2]) -> Mesh {
    let positions: Vec<Vec3> = points.iter().map(|p| p.extend(0.0)).collect();

    let tri_count = points.len().saturating_sub(2) as u32;
    let indices = (0..tri_count).flat_map(|k| [k, k + 1, k + 2]).collect();

    Mesh::new(positions, indices)
}

/// Fits several outlines jointly into the square `[-0.5, 0.5]²`.
///
/// The shared bounding box is grown on its shorter side (equally in both
/// directions) until it is square, then mapped onto the unit square centered on
/// the origin, so relative placement and aspect ratio are preserved.
///
/// Leaves the input untouched when there are no points or the bounding box
/// collapses to a single point.
pub fn fit_to_unit_square(outlines: &mut [Vec<Vec2>]) {
    let mut points = outlines.iter().flatten().copied().peekable();
    if points.peek().is_none() {
        return;
    }

    let (mut min, max) = points.fold((Vec2::INFINITY, Vec2::NEG_INFINITY), |(lo, hi), p| {
        (lo.min(p), hi.max(p))
    });

    let extent = max - min;
    let side = extent.max_element();
    if !(side > 0.0 && side.is_finite()) {
        return;
    }

    if extent.x > extent.y {
        min.y -= (extent.x - extent.y) / 2.0;
    } else {
        min.x -= (extent.y - extent.x) / 2.0;
    }

    for p in outlines.iter_mut().flatten() {
        *p = (*p - min) / side - Vec2::splat(0.5);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f32, y: f32) -> Vec2 {
        Vec2::new(x, y)
    }

    // ── strip_mesh ────────────────────────────────────────────────────────

    #[test]
    fn strip_has_one_triangle_per_extra_point() {
        let points: Vec<Vec2> = (0..7).map(|i| v(i as f32, (i % 2) as f32)).collect();
        let m = strip_mesh(&points);
        assert_eq!(m.vertex_count(), 7);
        assert_eq!(m.triangle_count(), 5);
        assert!(m.is_well_formed());
        assert_eq!(m.triangles().nth(3), Some([3, 4, 5]));
    }

    #[test]
    fn strip_is_flat() {
        let m = strip_mesh(&[v(1.0, 2.0), v(3.0, 4.0), v(5.0, 7.0)]);
        assert!(m.positions.iter().all(|p| p.z == 0.0));
        assert_eq!(m.positions[1], Vec3::new(3.0, 4.0, 0.0));
    }

    #[test]
    fn short_strip_has_no_triangles() {
        assert_eq!(strip_mesh(&[]).triangle_count(), 0);
        assert_eq!(strip_mesh(&[v(0.0, 0.0), v(1.0, 1.0)]).triangle_count(), 0);
    }

    // ── fit_to_unit_square ────────────────────────────────────────────────

    #[test]
    fn wide_outline_spans_x_and_centers_y() {
        let mut outlines = vec![vec![v(10.0, 0.0), v(30.0, 10.0)]];
        fit_to_unit_square(&mut outlines);
        assert!(outlines[0][0].abs_diff_eq(v(-0.5, -0.25), 1e-6));
        assert!(outlines[0][1].abs_diff_eq(v(0.5, 0.25), 1e-6));
    }

    #[test]
    fn tall_outline_spans_y_and_centers_x() {
        let mut outlines = vec![vec![v(0.0, -4.0), v(2.0, 4.0)]];
        fit_to_unit_square(&mut outlines);
        assert!(outlines[0][0].abs_diff_eq(v(-0.125, -0.5), 1e-6));
        assert!(outlines[0][1].abs_diff_eq(v(0.125, 0.5), 1e-6));
    }

    #[test]
    fn outlines_share_one_bounding_box() {
        let mut outlines = vec![vec![v(0.0, 0.0), v(1.0, 1.0)], vec![v(3.0, 3.0), v(4.0, 4.0)]];
        fit_to_unit_square(&mut outlines);
        assert!(outlines[0][0].abs_diff_eq(v(-0.5, -0.5), 1e-6));
        assert!(outlines[0][1].abs_diff_eq(v(-0.25, -0.25), 1e-6));
        assert!(outlines[1][1].abs_diff_eq(v(0.5, 0.5), 1e-6));
    }

    #[test]
    fn empty_and_single_point_are_untouched() {
        let mut empty: Vec<Vec<Vec2>> = vec![vec![], vec![]];
        fit_to_unit_square(&mut empty);
        assert!(empty.iter().all(Vec::is_empty));

        let mut single = vec![vec![v(3.0, 4.0)]];
        fit_to_unit_square(&mut single);
        assert_eq!(single[0][0], v(3.0, 4.0));
    }
}
