//! GPU rendering subsystem.
//!
//! Each renderer owns its pipeline and uniform buffers; meshes are uploaded
//! once into [`GpuMesh`] and shared by reference in per-frame draw lists.
//!
//! Convention:
//! - positions are model-space; `model_view` takes them to eye space
//! - `projection` maps eye space to clip space with depth in `[0, 1]`
//! - every pass loads the color and depth cleared by `FrameCtx::render`

mod common;
mod ctx;
mod flat;
mod lit;
mod mesh;

pub use ctx::{RenderCtx, RenderTarget};
pub use flat::{FlatDraw, FlatRenderer};
pub use lit::{LitDraw, LitRenderer};
pub use mesh::{GpuMesh, VertexKind};
