//! Scene data records.
//!
//! Plain data plus free functions that turn it into matrices for the renderers:
//! - `camera`: perspective projection with eye distance and tilt
//! - `light`: orbiting point light
//! - `model`: Euler rotation, normal matrix and Phong material
//! - `orbit`: parent → child transform hierarchy

pub mod camera;
pub mod light;
pub mod model;
pub mod orbit;

pub use camera::Camera;
pub use light::Light;
pub use model::{Material, Rotation};
pub use orbit::{Body, BodyId, OrbitSystem};
