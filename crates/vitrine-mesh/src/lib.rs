//! Procedural meshes for the vitrine demos.
//!
//! Every generator is a pure function from a handful of parameters to a
//! [`Mesh`]. Nothing here touches the GPU; the engine uploads the result once
//! and never mutates it again.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`mesh`] | `Mesh` container and its invariants |
//! | [`capsule`] | capsule (cylinder + two hemispheres) with smooth normals |
//! | [`sphere`] | unit UV-sphere, positions only |
//! | [`normals`] | face-normal accumulation into per-vertex normals |
//! | [`strip`] | triangle strips from 2D outlines, unit-square fitting |
//!
//! # Quick start
//!
//! ```rust
//! use vitrine_mesh::{capsule, sphere};
//!
//! let pill = capsule(16, 1.0, 2.0);
//! assert!(pill.is_well_formed());
//! assert!(pill.normals.is_some());
//!
//! let ball = sphere(4);
//! assert_eq!(ball.vertex_count(), 25);
//! assert_eq!(ball.triangle_count(), 32);
//! ```

pub mod capsule;
pub mod mesh;
pub mod normals;
pub mod sphere;
pub mod strip;

pub use capsule::capsule;
pub use mesh::Mesh;
pub use normals::vertex_normals;
pub use sphere::sphere;
pub use strip::{fit_to_unit_square, strip_mesh};
