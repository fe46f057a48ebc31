//! Unit UV-sphere.

use std::f32::consts::{PI, TAU};

use glam::Vec3;
use log::debug;

use crate::mesh::Mesh;

/// Generates a unit sphere centered on the origin, positions only.
///
/// The grid has `divisions + 1` rows from the north pole (+Y) to the south
/// pole and `divisions + 1` columns from azimuth 0 to 2π. Pole rows and the
/// wrap-around column are kept as separate vertices, so the mesh is not
/// welded and has degenerate triangles at the poles. `divisions` of 0 is
/// raised to 1.
pub fn sphere(divisions: u32) -> Mesh {
    let divisions = if divisions == 0 {
        debug!("sphere: divisions 0 raised to 1");
        1
    } else {
        divisions
    };

    let row = divisions + 1;
    let mut positions = Vec::with_capacity((row * row) as usize);

    for i in 0..=divisions {
        let (sin_p, cos_p) = (i as f32 * PI / divisions as f32).sin_cos();
        for j in 0..=divisions {
            let (sin_a, cos_a) = (j as f32 * TAU / divisions as f32).sin_cos();
            positions.push(Vec3::new(sin_p * sin_a, cos_p, sin_p * cos_a));
        }
    }

    let mut indices = Vec::with_capacity((6 * divisions * divisions) as usize);
    for i in 0..divisions {
        for j in 0..divisions {
            let p1 = i * row + j;
            let p2 = p1 + row;
            indices.extend_from_slice(&[p1, p2, p1 + 1, p1 + 1, p2, p2 + 1]);
        }
    }

    Mesh::new(positions, indices)
}
