//! The three vitrine demos.
//!
//! Each module holds a config struct with the demo's constants, a testable
//! simulation state, the [`vitrine_engine::core::App`] implementation and a
//! `run` entry point used by the matching binary.

pub mod capsule_viewer;
pub mod logo;
pub mod orrery;
