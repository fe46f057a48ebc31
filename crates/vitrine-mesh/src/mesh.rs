use glam::Vec3;

/// Indexed triangle mesh.
///
/// Invariants (upheld by every generator in this crate):
/// - `indices.len()` is a multiple of 3; each triple is one triangle and its
///   order is the winding used for back-face culling
/// - every index is `< positions.len()`
/// - `normals`, when present, has one entry per position
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub positions: Vec<Vec3>,
    pub indices: Vec<u32>,
    pub normals: Option<Vec<Vec3>>,
}

impl Mesh {
    #[inline]
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>) -> Self {
        Self { positions, indices, normals: None }
    }

    /// Attaches per-vertex normals.
    pub fn with_normals(mut self, normals: Vec<Vec3>) -> Self {
        debug_assert_eq!(normals.len(), self.positions.len());
        self.normals = Some(normals);
        self
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterates over triangles as index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Returns the corner positions of triangle `tri`.
    pub fn triangle_positions(&self, tri: [u32; 3]) -> [Vec3; 3] {
        tri.map(|i| self.positions[i as usize])
    }

    /// Checks the structural invariants listed on the type.
    pub fn is_well_formed(&self) -> bool {
        let n = self.positions.len();
        self.indices.len() % 3 == 0
            && self.indices.iter().all(|&i| (i as usize) < n)
            && self.normals.as_ref().is_none_or(|ns| ns.len() == n)
    }
}
