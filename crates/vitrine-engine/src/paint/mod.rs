//! Colors shared between the demos and the renderers.

pub mod color;

pub use color::Color;
