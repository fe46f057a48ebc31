//! Smooth per-vertex normals from face normals.

use glam::Vec3;

/// Geometric normal of a triangle: `normalize((b - a) × (c - a))`.
///
/// Degenerate (zero-area) triangles yield `Vec3::ZERO`.
#[inline]
pub fn face_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (b - a).cross(c - a).normalize_or_zero()
}

/// Computes one normal per vertex by summing the unit face normals of every
/// triangle that references it, then normalizing the sum.
///
/// A vertex that no triangle references, or whose face normals cancel out
/// exactly, gets `Vec3::ZERO`.
pub fn vertex_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut sums = vec![Vec3::ZERO; positions.len()];

    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let n = face_normal(positions[a], positions[b], positions[c]);
        sums[a] += n;
        sums[b] += n;
        sums[c] += n;
    }

    for n in &mut sums {
        *n = n.normalize_or_zero();
    }

    sums
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::approx;

    // ── face_normal ───────────────────────────────────────────────────────

    #[test]
    fn face_normal_follows_winding() {
        assert!(approx(face_normal(Vec3::ZERO, Vec3::X, Vec3::Y), Vec3::Z));
        assert!(approx(face_normal(Vec3::ZERO, Vec3::Y, Vec3::X), -Vec3::Z));
    }

    #[test]
    fn face_normal_is_unit_for_large_triangles() {
        let n = face_normal(Vec3::ZERO, Vec3::X * 100.0, Vec3::Z * -40.0);
        assert!((n.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn degenerate_face_is_zero() {
        assert_eq!(face_normal(Vec3::ZERO, Vec3::X, Vec3::X * 2.0), Vec3::ZERO);
    }

    // ── vertex_normals ────────────────────────────────────────────────────

    #[test]
    fn flat_quad_shares_one_normal() {
        let positions = [Vec3::ZERO, Vec3::X, Vec3::new(1.0, 1.0, 0.0), Vec3::Y];
        let normals = vertex_normals(&positions, &[0, 1, 2, 0, 2, 3]);
        assert!(normals.iter().all(|&n| approx(n, Vec3::Z)));
    }

    #[test]
    fn shared_edge_averages_faces() {
        // Two faces folded 90 degrees along the X axis; the hinge vertices
        // should end up on the bisector.
        let positions = [Vec3::ZERO, Vec3::X, Vec3::Y, -Vec3::Z];
        let normals = vertex_normals(&positions, &[0, 1, 2, 0, 1, 3]);

        let bisector = (Vec3::Z + Vec3::Y).normalize();
        assert!(approx(normals[0], bisector));
        assert!(approx(normals[1], bisector));
        assert!(approx(normals[2], Vec3::Z));
        assert!(approx(normals[3], Vec3::Y));
    }

    #[test]
    fn unreferenced_vertex_is_zero() {
        let positions = [Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::splat(5.0)];
        let normals = vertex_normals(&positions, &[0, 1, 2]);
        assert_eq!(normals[3], Vec3::ZERO);
    }

    #[test]
    fn opposite_faces_cancel_to_zero() {
        let positions = [Vec3::ZERO, Vec3::X, Vec3::Y];
        let normals = vertex_normals(&positions, &[0, 1, 2, 0, 2, 1]);
        assert!(normals.iter().all(|&n| n == Vec3::ZERO));
    }
}
