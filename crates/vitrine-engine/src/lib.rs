//! Vitrine engine crate.
//!
//! Platform + GPU runtime shared by the demos: window loop, device and depth
//! buffer, lit and flat mesh renderers, scene records and input.

pub mod core;
pub mod device;
pub mod input;
pub mod time;
pub mod window;

pub mod coords;
pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;
