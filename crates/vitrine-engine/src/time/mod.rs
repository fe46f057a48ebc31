//! Frame timing.
//!
//! One `FrameClock` drives the render loop; `tick()` is called once per
//! redraw and yields the wall-clock delta used to advance the simulation.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
