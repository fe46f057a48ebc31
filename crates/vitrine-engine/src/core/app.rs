use winit::event::WindowEvent;
use winit::window::WindowId;

use crate::device::Gpu;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by the demos.
pub trait App {
    /// Called once after the window's GPU context exists, before the first frame.
    ///
    /// Pipelines and static buffers are created here. An error is logged and
    /// ends the event loop; `Runtime::run` then returns it.
    fn on_gpu_ready(&mut self, gpu: &Gpu<'_>) -> anyhow::Result<()> {
        let _ = gpu;
        Ok(())
    }

    /// Called for window events.
    fn on_window_event(&mut self, window_id: WindowId, event: &WindowEvent) -> AppControl {
        let _ = (window_id, event);
        AppControl::Continue
    }

    /// Called once per rendered frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
