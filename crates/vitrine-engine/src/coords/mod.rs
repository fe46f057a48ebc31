//! Screen-space sizes handed to renderers.

mod viewport;

pub use viewport::Viewport;
