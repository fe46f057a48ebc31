//! Capsule tessellation.
//!
//! The capsule is built like a UV-sphere whose equator has been split in two:
//! two rings sit exactly on the waist (polar angle π/2) and are pushed apart
//! along Y by `±(half_height - radius)`, while every other ring is offset
//! towards its own pole. The result is a cylinder closed by two hemispheres.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec3;
use log::debug;

use crate::mesh::Mesh;
use crate::normals::vertex_normals;

/// Smallest supported subdivision count.
pub const MIN_DIVISIONS: u32 = 2;

/// Minimum length by which `half_height` must exceed `radius`.
pub const WAIST_MARGIN: f32 = 0.1;

/// Generates a Y-aligned capsule centered on the origin.
///
/// - `divisions`: subdivisions per half turn; each ring has `2 * divisions`
///   vertices and each hemisphere `divisions / 2` latitude steps.
///   Values below 2 are raised to 2.
/// - `radius`: radius of the hemispheres and of the waist.
/// - `half_height`: distance from the center to either pole. Raised to
///   `radius + 0.1` when smaller so the waist keeps a positive length.
///
/// Vertex 0 is the top pole, the last vertex the bottom pole, rings are laid
/// out top to bottom in between. Triangles wind counter-clockwise seen from
/// outside and the mesh carries averaged per-vertex normals.
pub fn capsule(divisions: u32, radius: f32, half_height: f32) -> Mesh {
    let divisions = if divisions < MIN_DIVISIONS {
        debug!("capsule: divisions {divisions} raised to {MIN_DIVISIONS}");
        MIN_DIVISIONS
    } else {
        divisions
    };

    let min_half_height = radius + WAIST_MARGIN;
    let half_height = if half_height < min_half_height {
        debug!("capsule: half_height {half_height} raised to {min_half_height}");
        min_half_height
    } else {
        half_height
    };

    let layout = RingLayout::new(divisions);
    let positions = ring_positions(&layout, radius, half_height);
    let indices = ring_indices(&layout);
    let normals = vertex_normals(&positions, &indices);

    Mesh::new(positions, indices).with_normals(normals)
}

/// Ring bookkeeping shared by the position and index passes.
#[derive(Debug, Copy, Clone)]
struct RingLayout {
    divisions: u32,
    /// Vertices per ring.
    ring_len: u32,
    /// Rings between the two poles. Always even: half above the waist, half below.
    ring_count: u32,
}

impl RingLayout {
    fn new(divisions: u32) -> Self {
        Self {
            divisions,
            ring_len: 2 * divisions,
            ring_count: divisions + divisions % 2,
        }
    }

    fn vertex_count(&self) -> u32 {
        2 + self.ring_count * self.ring_len
    }

    /// Index of the first vertex of 1-based ring `ring`.
    fn ring_start(&self, ring: u32) -> u32 {
        1 + (ring - 1) * self.ring_len
    }

    fn bottom_pole(&self) -> u32 {
        self.vertex_count() - 1
    }

    /// Whether 1-based ring `ring` belongs to the upper hemisphere.
    fn is_upper(&self, ring: u32) -> bool {
        ring <= self.ring_count / 2
    }

    /// Polar angle (from +Y) of 1-based ring `ring`.
    ///
    /// Both waist rings land on exactly π/2; the hemisphere rings are spaced
    /// `π / divisions` apart, skipping the duplicated equator.
    fn polar_angle(&self, ring: u32) -> f32 {
        let d = self.divisions;
        let step = PI / d as f32;

        if d % 2 == 0 {
            let waist = (d + 2) / 2;
            if ring == waist {
                FRAC_PI_2
            } else if ring < waist {
                ring as f32 * step
            } else {
                (ring - 1) as f32 * step
            }
        } else {
            let (upper_waist, lower_waist) = ((d + 1) / 2, (d + 3) / 2);
            if ring == upper_waist || ring == lower_waist {
                FRAC_PI_2
            } else if ring < upper_waist {
                ring as f32 * step
            } else {
                (ring - 2) as f32 * step
            }
        }
    }
}

fn ring_positions(layout: &RingLayout, radius: f32, half_height: f32) -> Vec<Vec3> {
    let waist_offset = half_height - radius;
    let azimuth_step = PI / layout.divisions as f32;

    let mut positions = Vec::with_capacity(layout.vertex_count() as usize);
    positions.push(Vec3::new(0.0, half_height, 0.0));

    for ring in 1..=layout.ring_count {
        let (sin_p, cos_p) = layout.polar_angle(ring).sin_cos();
        let ring_radius = sin_p * radius;
        let offset = if layout.is_upper(ring) { waist_offset } else { -waist_offset };
        let y = cos_p * radius + offset;

        for j in 0..layout.ring_len {
            // x = sin, z = cos: rings run counter-clockwise seen from +Y, so faces wind outward.
            let (sin_a, cos_a) = (j as f32 * azimuth_step).sin_cos();
            positions.push(Vec3::new(ring_radius * sin_a, y, ring_radius * cos_a));
        }
    }

    positions.push(Vec3::new(0.0, -half_height, 0.0));
    positions
}

fn ring_indices(layout: &RingLayout) -> Vec<u32> {
    let n = layout.ring_len;
    let bands = layout.ring_count - 1;
    let mut indices = Vec::with_capacity(((2 * n + 2 * n * bands) * 3) as usize);

    // Top cap: pole to ring 1.
    let first = layout.ring_start(1);
    for j in 0..n {
        indices.extend_from_slice(&[0, first + j, first + (j + 1) % n]);
    }

    // Quad strips between consecutive rings.
    for ring in 1..layout.ring_count {
        let upper = layout.ring_start(ring);
        let lower = layout.ring_start(ring + 1);
        for j in 0..n {
            let a = upper + j;
            let b = upper + (j + 1) % n;
            let c = lower + j;
            let d = lower + (j + 1) % n;
            indices.extend_from_slice(&[a, d, b, a, c, d]);
        }
    }

    // Bottom cap: reversed so it still faces outward.
    let pole = layout.bottom_pole();
    let last = layout.ring_start(layout.ring_count);
    for j in 0..n {
        indices.extend_from_slice(&[pole, last + (j + 1) % n, last + j]);
    }

    indices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::approx;

    fn normals(mesh: &Mesh) -> &[Vec3] {
        mesh.normals.as_deref().expect("capsule carries normals")
    }

    fn radial(v: Vec3) -> f32 {
        Vec3::new(v.x, 0.0, v.z).length()
    }

    /// Closest point to `p` on the capsule's inner segment.
    fn axis_point(p: Vec3, half_height: f32, radius: f32) -> Vec3 {
        let h = half_height - radius;
        Vec3::new(0.0, p.y.clamp(-h, h), 0.0)
    }

    // ── clamping ──────────────────────────────────────────────────────────

    #[test]
    fn half_height_is_clamped_above_radius() {
        let m = capsule(2, 1.0, 1.0);
        assert!(approx(m.positions[0], Vec3::new(0.0, 1.1, 0.0)));
        assert!(approx(*m.positions.last().unwrap(), Vec3::new(0.0, -1.1, 0.0)));
    }

    #[test]
    fn divisions_below_two_behave_like_two() {
        assert_eq!(capsule(0, 1.0, 2.0), capsule(2, 1.0, 2.0));
        assert_eq!(capsule(1, 1.0, 2.0), capsule(2, 1.0, 2.0));
    }

    // ── counts ────────────────────────────────────────────────────────────

    #[test]
    fn smallest_capsule_counts() {
        let m = capsule(2, 1.0, 1.0);
        assert_eq!(m.vertex_count(), 10);
        // 4 top fan + 8 waist band + 4 bottom fan.
        assert_eq!(m.triangle_count(), 16);
        assert_eq!(m.indices.len(), 48);
    }

    #[test]
    fn counts_for_even_and_odd_divisions() {
        for d in 2..=17u32 {
            let rings = d + d % 2;
            let m = capsule(d, 0.5, 3.0);
            assert_eq!(m.vertex_count() as u32, 2 + rings * 2 * d, "divisions {d}");
            assert_eq!(m.triangle_count() as u32, 2 * d * 2 * rings, "divisions {d}");
        }
    }

    #[test]
    fn indices_are_in_range() {
        for d in 2..=24 {
            let m = capsule(d, 1.0, 2.0);
            assert_eq!(m.indices.len() % 3, 0);
            assert!(m.is_well_formed(), "divisions {d}");
        }
    }

    // ── shape ─────────────────────────────────────────────────────────────

    #[test]
    fn surface_is_at_radius_from_axis() {
        let (radius, half_height) = (0.75, 2.0);
        for d in [2, 3, 8, 16] {
            let m = capsule(d, radius, half_height);
            for &p in &m.positions {
                let dist = p.distance(axis_point(p, half_height, radius));
                assert!((dist - radius).abs() < 1e-5, "divisions {d}: {p:?}");
            }
        }
    }

    #[test]
    fn waist_rings_sit_at_the_cylinder_ends() {
        let m = capsule(4, 1.0, 3.0);
        // rings 2 and 3 are the waist rings for divisions = 4.
        let ring_len = 8;
        for j in 0..ring_len {
            let upper = m.positions[1 + ring_len + j];
            let lower = m.positions[1 + 2 * ring_len + j];
            assert!((upper.y - 2.0).abs() < 1e-5);
            assert!((lower.y + 2.0).abs() < 1e-5);
            assert!((radial(upper) - 1.0).abs() < 1e-5);
            assert!((radial(lower) - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn symmetric_under_y_flip_with_pole_swap() {
        for d in [2, 3, 6, 7, 16] {
            let m = capsule(d, 1.0, 2.5);
            let n = m.vertex_count();
            let ring_len = 2 * d as usize;
            let rings = (n - 2) / ring_len;

            let flip = |v: Vec3| Vec3::new(v.x, -v.y, v.z);
            assert!(approx(flip(m.positions[0]), m.positions[n - 1]));

            for r in 0..rings {
                let mirror = rings - 1 - r;
                for j in 0..ring_len {
                    let p = m.positions[1 + r * ring_len + j];
                    let q = m.positions[1 + mirror * ring_len + j];
                    assert!(approx(flip(p), q), "divisions {d}, ring {r}, j {j}");
                }
            }
        }
    }

    // ── normals ───────────────────────────────────────────────────────────

    #[test]
    fn normals_are_unit_length() {
        for d in 2..=20 {
            let m = capsule(d, 1.0, 2.0);
            for n in normals(&m) {
                assert!((n.length() - 1.0).abs() < 1e-4, "divisions {d}: {n:?}");
            }
        }
    }

    #[test]
    fn normals_point_away_from_the_axis() {
        let (radius, half_height) = (1.0, 2.0);
        let m = capsule(16, radius, half_height);
        for (&p, &n) in m.positions.iter().zip(normals(&m)) {
            let outward = (p - axis_point(p, half_height, radius)).normalize();
            assert!(n.dot(outward) > 0.5, "{p:?} has normal {n:?}");
        }
    }

    #[test]
    fn poles_face_along_y() {
        let m = capsule(16, 1.0, 2.0);
        let ns = normals(&m);
        assert!(approx(ns[0], Vec3::Y));
        assert!(approx(ns[ns.len() - 1], -Vec3::Y));
    }

    #[test]
    fn faces_wind_outward() {
        let (radius, half_height) = (1.0, 2.0);
        let m = capsule(9, radius, half_height);
        for tri in m.triangles() {
            let [a, b, c] = m.triangle_positions(tri);
            let face = (b - a).cross(c - a);
            let centroid = (a + b + c) / 3.0;
            let outward = centroid - axis_point(centroid, half_height, radius);
            assert!(face.dot(outward) > 0.0, "triangle {tri:?} faces inward");
        }
    }
}
